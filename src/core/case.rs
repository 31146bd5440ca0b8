/// The case: every stage of generation wired together, from population to
/// environment.
///
/// Stages run in a fixed order on one generator: suspect count, suspect
/// profiles, clue templates, environment. Changing that order changes what a
/// seed produces.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::ops::{Index, RangeInclusive};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::catalog::{CatalogError, ClueCatalog, TraitCatalog};
use crate::core::environment::{Environment, EnvironmentOdds, OddsError};
use crate::core::pool::SuspectPool;
use crate::core::relation::{Commonalities, RelationGraph};
use crate::core::search::FactCombination;
use crate::core::synthesis::ClueSet;
use crate::schema::suspect::{Profile, Suspect, SuspectSet, GUILTY_INDEX, MAX_SUSPECTS};
use crate::schema::traits::TraitValue;

/// Default number of suspects, drawn uniformly.
pub const DEFAULT_SUSPECT_RANGE: RangeInclusive<usize> = 5..=10;

#[derive(Debug, Error)]
pub enum CaseError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("invalid suspect range {min}..={max}: must be non-empty and within 2..={limit}", limit = MAX_SUSPECTS)]
    InvalidSuspectRange { min: usize, max: usize },
    #[error("population of {0} suspects is outside 1..={limit}", limit = MAX_SUSPECTS)]
    InvalidPopulation(usize),
    #[error("invalid environment odds: {0}")]
    InvalidOdds(#[from] OddsError),
}

/// A generated murder mystery. Built via `Case::new` or `Case::builder()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Case {
    seed: u64,
    suspects: Vec<Suspect>,
    #[serde(skip)]
    graph: RelationGraph,
    commonalities: Commonalities,
    dopplegangers: SuspectSet,
    combination: FactCombination,
    clues: ClueSet,
    environment: Environment,
}

/// Builder for constructing a `Case`.
pub struct CaseBuilder {
    seed: Option<u64>,
    suspect_range: RangeInclusive<usize>,
    trait_catalog: Option<TraitCatalog>,
    trait_catalog_path: Option<PathBuf>,
    clue_catalog: Option<ClueCatalog>,
    clue_catalog_paths: Vec<PathBuf>,
    odds: EnvironmentOdds,
    population: Option<Vec<Profile>>,
}

impl Case {
    /// Generate a case with the standard catalogs. Without a seed, one is
    /// drawn from entropy and kept in [`Case::seed`].
    pub fn new(seed: Option<u64>) -> Self {
        generate(
            resolve_seed(seed),
            DEFAULT_SUSPECT_RANGE,
            &TraitCatalog::standard(),
            &ClueCatalog::standard(),
            &EnvironmentOdds::default(),
            None,
        )
    }

    pub fn builder() -> CaseBuilder {
        CaseBuilder {
            seed: None,
            suspect_range: DEFAULT_SUSPECT_RANGE,
            trait_catalog: None,
            trait_catalog_path: None,
            clue_catalog: None,
            clue_catalog_paths: Vec::new(),
            odds: EnvironmentOdds::default(),
            population: None,
        }
    }

    /// The seed that reproduces this case.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn suspects(&self) -> &[Suspect] {
        &self.suspects
    }

    pub fn guilty(&self) -> &Suspect {
        &self.suspects[GUILTY_INDEX]
    }

    pub fn graph(&self) -> &RelationGraph {
        &self.graph
    }

    pub fn commonalities(&self) -> &Commonalities {
        &self.commonalities
    }

    /// Suspects the culprit cannot be told apart from by any single trait.
    pub fn dopplegangers(&self) -> SuspectSet {
        self.dopplegangers
    }

    pub fn combination(&self) -> &FactCombination {
        &self.combination
    }

    pub fn clues(&self) -> &ClueSet {
        &self.clues
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Indices of the suspects holding every value in `facts`, ascending.
    pub fn suspects_matching(&self, facts: &[TraitValue]) -> Vec<usize> {
        self.suspects
            .iter()
            .filter(|s| facts.iter().all(|f| s.has(f)))
            .map(|s| s.index())
            .collect()
    }

    /// Check an accusation.
    pub fn is_culprit(&self, index: usize) -> bool {
        self.suspects.get(index).is_some_and(|s| s.is_guilty())
    }
}

impl Index<usize> for Case {
    type Output = Suspect;

    fn index(&self, index: usize) -> &Suspect {
        &self.suspects[index]
    }
}

impl CaseBuilder {
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Range the suspect count is drawn from. Ignored with a fixed
    /// population.
    pub fn suspect_range(mut self, range: RangeInclusive<usize>) -> Self {
        self.suspect_range = range;
        self
    }

    /// Provide a trait catalog directly.
    pub fn with_trait_catalog(mut self, catalog: TraitCatalog) -> Self {
        self.trait_catalog = Some(catalog);
        self
    }

    /// Load trait weight overrides from a RON file. Takes precedence over
    /// `with_trait_catalog`.
    pub fn trait_catalog_path(mut self, path: impl AsRef<Path>) -> Self {
        self.trait_catalog_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Replace the standard clue catalog.
    pub fn with_clue_catalog(mut self, catalog: ClueCatalog) -> Self {
        self.clue_catalog = Some(catalog);
        self
    }

    /// Append templates from a RON file to the clue catalog. May be called
    /// more than once.
    pub fn clue_catalog_path(mut self, path: impl AsRef<Path>) -> Self {
        self.clue_catalog_paths.push(path.as_ref().to_path_buf());
        self
    }

    pub fn environment_odds(mut self, odds: EnvironmentOdds) -> Self {
        self.odds = odds;
        self
    }

    /// Use fixed profiles instead of rolling suspects. The first profile is
    /// the culprit.
    pub fn population(mut self, profiles: Vec<Profile>) -> Self {
        self.population = Some(profiles);
        self
    }

    pub fn build(self) -> Result<Case, CaseError> {
        let (min, max) = (*self.suspect_range.start(), *self.suspect_range.end());
        if min < 2 || max > MAX_SUSPECTS || min > max {
            return Err(CaseError::InvalidSuspectRange { min, max });
        }
        if let Some(profiles) = &self.population {
            if profiles.is_empty() || profiles.len() > MAX_SUSPECTS {
                return Err(CaseError::InvalidPopulation(profiles.len()));
            }
        }
        self.odds.validate()?;

        let trait_catalog = match (&self.trait_catalog_path, self.trait_catalog) {
            (Some(path), _) => TraitCatalog::load_from_ron(path)?,
            (None, Some(catalog)) => catalog,
            (None, None) => TraitCatalog::standard(),
        };

        let mut clue_catalog = self.clue_catalog.unwrap_or_else(ClueCatalog::standard);
        for path in &self.clue_catalog_paths {
            clue_catalog.extend(ClueCatalog::load_from_ron(path)?);
        }

        Ok(generate(
            resolve_seed(self.seed),
            self.suspect_range,
            &trait_catalog,
            &clue_catalog,
            &self.odds,
            self.population.as_deref(),
        ))
    }
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| StdRng::from_entropy().gen())
}

fn generate(
    seed: u64,
    suspect_range: RangeInclusive<usize>,
    traits: &TraitCatalog,
    catalog: &ClueCatalog,
    odds: &EnvironmentOdds,
    population: Option<&[Profile]>,
) -> Case {
    let mut rng = StdRng::seed_from_u64(seed);

    let suspects = match population {
        Some(profiles) => SuspectPool::from_profiles(profiles),
        None => {
            // Drawn as u32 so the stream matches on 32- and 64-bit targets.
            let (min, max) = (*suspect_range.start() as u32, *suspect_range.end() as u32);
            let n = rng.gen_range(min..=max) as usize;
            SuspectPool::generate(n, traits, &mut rng)
        }
    };

    let graph = RelationGraph::build(&suspects);
    let commonalities = Commonalities::analyze(&graph, GUILTY_INDEX);
    let dopplegangers = commonalities.dopplegangers();
    let combination = FactCombination::search(&commonalities);
    debug!(
        facts = combination.len(),
        unique = combination.is_unique(),
        dopplegangers = %dopplegangers,
        "fact combination chosen"
    );

    let clues = ClueSet::synthesize(&combination, &commonalities, catalog, &mut rng);
    let environment = Environment::derive(&clues, suspects.len(), odds, &mut rng);

    info!(
        seed,
        suspects = suspects.len(),
        clues = clues.len(),
        alibi = clues.needs_alibi(),
        "case generated"
    );

    Case {
        seed,
        suspects,
        graph,
        commonalities,
        dopplegangers,
        combination,
        clues,
        environment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::traits::*;

    fn base() -> Profile {
        Profile {
            gender: Gender::Female,
            eye_color: EyeColor::Green,
            hair_color: HairColor::Red,
            height: Height::Medium,
            blood_type: BloodType::B,
            hand: Hand::Right,
            link_to_victim: LinkToVictim::Ex,
        }
    }

    #[test]
    fn same_seed_same_case() {
        assert_eq!(Case::new(Some(42)), Case::new(Some(42)));
    }

    #[test]
    fn suspect_count_within_default_range() {
        for seed in 0..30 {
            let case = Case::new(Some(seed));
            assert!(DEFAULT_SUSPECT_RANGE.contains(&case.suspects().len()));
            assert!(case.guilty().is_guilty());
            assert_eq!(case.environment().can_inspect_houses.len(), case.suspects().len());
        }
    }

    #[test]
    fn entropy_seed_is_recorded() {
        let case = Case::new(None);
        assert_eq!(Case::new(Some(case.seed())), case);
    }

    #[test]
    fn fixed_range_is_honored() {
        let case = Case::builder().seed(9).suspect_range(7..=7).build().unwrap();
        assert_eq!(case.suspects().len(), 7);
    }

    #[test]
    fn builder_rejects_bad_configuration() {
        assert!(matches!(
            Case::builder().suspect_range(1..=5).build(),
            Err(CaseError::InvalidSuspectRange { min: 1, max: 5 })
        ));
        assert!(matches!(
            Case::builder().suspect_range(8..=6).build(),
            Err(CaseError::InvalidSuspectRange { .. })
        ));
        assert!(matches!(
            Case::builder().suspect_range(5..=33).build(),
            Err(CaseError::InvalidSuspectRange { .. })
        ));
        assert!(matches!(
            Case::builder().population(Vec::new()).build(),
            Err(CaseError::InvalidPopulation(0))
        ));
        let odds = EnvironmentOdds {
            neighbor: -0.1,
            ..Default::default()
        };
        assert!(matches!(
            Case::builder().environment_odds(odds).build(),
            Err(CaseError::InvalidOdds(OddsError { field: "neighbor", .. }))
        ));
    }

    #[test]
    fn builder_rejects_odds_that_would_panic_the_roll() {
        let above = EnvironmentOdds {
            cctv: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            Case::builder().seed(1).environment_odds(above).build(),
            Err(CaseError::InvalidOdds(OddsError { field: "cctv", .. }))
        ));
        let nan = EnvironmentOdds {
            victim_phone: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            Case::builder().seed(1).environment_odds(nan).build(),
            Err(CaseError::InvalidOdds(OddsError { field: "victim_phone", .. }))
        ));
        let edges = EnvironmentOdds {
            suspect_house: 0.0,
            cctv: 1.0,
            victim_phone: 1.0,
            neighbor: 0.0,
        };
        assert!(Case::builder().seed(1).environment_odds(edges).build().is_ok());
    }

    #[test]
    fn suspect_count_is_drawn_as_u32() {
        for seed in [0, 2, 4, 5, 42, 2026] {
            let expected = StdRng::seed_from_u64(seed).gen_range(5u32..=10) as usize;
            assert_eq!(Case::new(Some(seed)).suspects().len(), expected, "seed {seed}");
        }
        let expected = StdRng::seed_from_u64(77).gen_range(3u32..=32) as usize;
        let case = Case::builder().seed(77).suspect_range(3..=32).build().unwrap();
        assert_eq!(case.suspects().len(), expected);
    }

    #[test]
    fn missing_catalog_file_is_io_error() {
        let result = Case::builder()
            .clue_catalog_path("does/not/exist.ron")
            .build();
        assert!(matches!(
            result,
            Err(CaseError::Catalog(CatalogError::Io(_)))
        ));
    }

    #[test]
    fn fixed_population_is_used_verbatim() {
        let culprit = Profile {
            height: Height::Tall,
            hand: Hand::Left,
            ..base()
        };
        let profiles = vec![
            culprit,
            Profile {
                height: Height::Tall,
                ..base()
            },
            Profile {
                hand: Hand::Left,
                ..base()
            },
            base(),
        ];
        let case = Case::builder()
            .seed(1)
            .population(profiles.clone())
            .build()
            .unwrap();
        assert_eq!(case.suspects().len(), 4);
        assert_eq!(case[0].profile(), &culprit);
        assert_eq!(case[3].profile(), &profiles[3]);
        assert!(case.combination().is_unique());
        let facts: Vec<TraitValue> = case.clues().facts().collect();
        assert_eq!(case.suspects_matching(&facts), vec![GUILTY_INDEX]);
    }

    #[test]
    fn single_suspect_population_is_trivially_unique() {
        let case = Case::builder().seed(3).population(vec![base()]).build().unwrap();
        assert!(case.combination().is_unique());
        assert_eq!(case.combination().len(), 1);
        assert!(case.dopplegangers().is_empty());
        assert!(!case.clues().needs_alibi());
    }

    #[test]
    fn accusation() {
        let case = Case::new(Some(5));
        assert!(case.is_culprit(0));
        assert!(!case.is_culprit(1));
        assert!(!case.is_culprit(99));
    }

    #[test]
    fn empty_clue_catalog_yields_no_trait_clues() {
        let case = Case::builder()
            .seed(11)
            .with_clue_catalog(ClueCatalog::default())
            .build()
            .unwrap();
        assert_eq!(case.clues().len(), 0);
        assert!(!case.environment().can_inspect_murder_weapon);
        assert!(!case.environment().can_inspect_cctv);
    }

    #[test]
    fn serializes_without_graph() {
        let case = Case::new(Some(2));
        let text = ron::ser::to_string(&case).unwrap();
        assert!(text.contains("seed"));
        assert!(!text.contains("graph"));
    }
}
