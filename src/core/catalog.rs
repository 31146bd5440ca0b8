/// Catalogs: weighted trait tables and the clue template catalog, with
/// RON loading and validation.

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::schema::clue::ClueTemplate;
use crate::schema::location::Location;
use crate::schema::suspect::Profile;
use crate::schema::traits::{
    BloodType, EyeColor, Gender, HairColor, Hand, Height, LinkToVictim, TraitCategory, TraitValue,
};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid weights for {category}: {reason}")]
    InvalidWeights {
        category: TraitCategory,
        reason: String,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Default weight table for a category, aligned with `category.values()`.
fn default_weights(category: TraitCategory) -> &'static [f64] {
    match category {
        TraitCategory::Gender => &[1.0, 1.0],
        TraitCategory::HairColor => &[4.0, 3.0, 2.0, 1.0],
        TraitCategory::EyeColor => &[7.0, 1.0, 1.0, 1.0],
        TraitCategory::Height => &[0.3, 0.5, 0.3],
        TraitCategory::BloodType => &[6.0, 4.0, 2.0, 1.0],
        TraitCategory::Hand => &[0.8, 0.2],
        TraitCategory::LinkToVictim => &[3.0, 5.0, 2.0, 3.0, 2.0],
    }
}

/// Weighted samplers for every trait category.
#[derive(Debug, Clone)]
pub struct TraitCatalog {
    weights: Vec<Vec<f64>>,
    samplers: Vec<WeightedIndex<f64>>,
}

impl TraitCatalog {
    /// The built-in population statistics.
    pub fn standard() -> Self {
        Self::with_overrides(HashMap::new()).expect("built-in trait weights are valid")
    }

    /// Build a catalog where `overrides` replace the default weights of the
    /// categories they name.
    pub fn with_overrides(
        mut overrides: HashMap<TraitCategory, Vec<f64>>,
    ) -> Result<Self, CatalogError> {
        let mut weights = Vec::with_capacity(TraitCategory::COUNT);
        let mut samplers = Vec::with_capacity(TraitCategory::COUNT);

        for category in TraitCategory::ALL {
            let table = overrides
                .remove(&category)
                .unwrap_or_else(|| default_weights(category).to_vec());
            validate_weights(category, &table)?;
            let sampler =
                WeightedIndex::new(&table).map_err(|e| CatalogError::InvalidWeights {
                    category,
                    reason: e.to_string(),
                })?;
            weights.push(table);
            samplers.push(sampler);
        }

        Ok(Self { weights, samplers })
    }

    /// Load weight overrides from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse weight overrides from a RON map, e.g. `{ Height: [0.2, 0.6, 0.2] }`.
    pub fn parse_ron(input: &str) -> Result<Self, CatalogError> {
        let overrides: HashMap<TraitCategory, Vec<f64>> = ron::from_str(input)?;
        Self::with_overrides(overrides)
    }

    pub fn weights(&self, category: TraitCategory) -> &[f64] {
        &self.weights[category.index()]
    }

    /// Index into `category.values()`, drawn by weight.
    fn pick(&self, category: TraitCategory, rng: &mut StdRng) -> usize {
        self.samplers[category.index()].sample(rng)
    }

    /// Draw one value of `category`.
    pub fn sample(&self, category: TraitCategory, rng: &mut StdRng) -> TraitValue {
        category.values()[self.pick(category, rng)]
    }

    /// Draw a full profile. Draw order is gender, eye color, hair color,
    /// height, blood type, hand, link to victim; seeded generation depends
    /// on it.
    pub fn sample_profile(&self, rng: &mut StdRng) -> Profile {
        let gender = Gender::ALL[self.pick(TraitCategory::Gender, rng)];
        let eye_color = EyeColor::ALL[self.pick(TraitCategory::EyeColor, rng)];
        let hair_color = HairColor::ALL[self.pick(TraitCategory::HairColor, rng)];
        let height = Height::ALL[self.pick(TraitCategory::Height, rng)];
        let blood_type = BloodType::ALL[self.pick(TraitCategory::BloodType, rng)];
        let hand = Hand::ALL[self.pick(TraitCategory::Hand, rng)];
        let link_to_victim = LinkToVictim::ALL[self.pick(TraitCategory::LinkToVictim, rng)];

        Profile {
            gender,
            eye_color,
            hair_color,
            height,
            blood_type,
            hand,
            link_to_victim,
        }
    }
}

impl Default for TraitCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn validate_weights(category: TraitCategory, table: &[f64]) -> Result<(), CatalogError> {
    let expected = category.values().len();
    let invalid = |reason: String| CatalogError::InvalidWeights { category, reason };

    if table.len() != expected {
        return Err(invalid(format!(
            "expected {} weights, got {}",
            expected,
            table.len()
        )));
    }
    if let Some(bad) = table.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(invalid(format!("weight {bad} is not a finite, non-negative number")));
    }
    if table.iter().sum::<f64>() <= 0.0 {
        return Err(invalid("weights sum to zero".to_string()));
    }
    Ok(())
}

/// A problem found by [`ClueCatalog::lint`].
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogIssue {
    /// No template reveals this category at all.
    MissingCategory(TraitCategory),
    /// No template can reveal this value on its own: every template of the
    /// category is conditioned on other values.
    UncoveredValue(TraitValue),
    /// Template at this position has an empty condition list and can never
    /// be chosen.
    EmptyConditions(usize),
}

/// The clue template catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClueCatalog {
    pub templates: Vec<ClueTemplate>,
}

impl ClueCatalog {
    /// The built-in catalog.
    pub fn standard() -> Self {
        use Location::*;
        use TraitCategory as C;
        use TraitValue::LinkToVictim as Link;

        let templates = vec![
            ClueTemplate::new(C::Gender, Witness).described("a witness saw the killer flee"),
            ClueTemplate::new(C::Gender, Neighbor).described("the neighbors heard a scream"),
            ClueTemplate::new(C::Gender, Cctv).described("a silhouette caught on a security camera"),
            ClueTemplate::new(C::Gender, VictimPhone).described("a blurry photo on the victim's phone"),
            ClueTemplate::new(C::LinkToVictim, VictimHouse)
                .with_conditions(&[
                    Link(LinkToVictim::Sibling),
                    Link(LinkToVictim::Colleague),
                    Link(LinkToVictim::Neighborhood),
                    Link(LinkToVictim::Ex),
                ])
                .described("a death-threat letter hidden in a drawer"),
            ClueTemplate::new(C::LinkToVictim, MurdererHouse)
                .with_conditions(&[
                    Link(LinkToVictim::Sibling),
                    Link(LinkToVictim::Colleague),
                    Link(LinkToVictim::Neighborhood),
                ])
                .described("a lie about knowing the victim"),
            ClueTemplate::new(C::LinkToVictim, MurdererHouse)
                .with_conditions(&[Link(LinkToVictim::Unknown)])
                .described("clippings about strangers pinned to a wall"),
            ClueTemplate::new(C::LinkToVictim, CrimeScene)
                .with_conditions(&[Link(LinkToVictim::Sibling)])
                .described("the violence of the attack suggests passion"),
            ClueTemplate::new(C::LinkToVictim, CrimeScene)
                .with_conditions(&[Link(LinkToVictim::Sibling), Link(LinkToVictim::Ex)])
                .described("the victim wrote on the wall: they knew the killer"),
            ClueTemplate::new(C::LinkToVictim, CrimeScene)
                .with_conditions(&[Link(LinkToVictim::Neighborhood)])
                .described("a cold, quick robbery by someone who knew the street"),
            ClueTemplate::new(C::LinkToVictim, VictimPhone)
                .with_conditions(&[Link(LinkToVictim::Sibling)])
                .described("threatening texts from a sibling"),
            ClueTemplate::new(C::LinkToVictim, VictimPhone)
                .with_conditions(&[Link(LinkToVictim::Colleague)])
                .described("harassing messages from a coworker"),
            ClueTemplate::new(C::Hand, VictimHouse)
                .with_conditions(&[
                    Link(LinkToVictim::Sibling),
                    Link(LinkToVictim::Colleague),
                    Link(LinkToVictim::Neighborhood),
                ])
                .described("the slant of a handwritten threat"),
            ClueTemplate::new(C::Hand, MurderWeapon).described("the grip marks on the weapon"),
            ClueTemplate::new(C::Hand, Witness).described("a witness saw which hand held the knife"),
            ClueTemplate::new(C::HairColor, Witness).described("a witness glimpsed the killer's hair"),
            ClueTemplate::new(C::HairColor, CrimeScene).described("a hair on the carpet"),
            ClueTemplate::new(C::HairColor, Cctv).described("hair color visible on camera"),
            ClueTemplate::new(C::HairColor, Victim).described("a hair under the victim's fingernails"),
            ClueTemplate::new(C::HairColor, MurderWeapon).described("a hair stuck to the weapon"),
            ClueTemplate::new(C::HairColor, VictimPhone).described("hair color in a phone photo"),
            ClueTemplate::new(C::EyeColor, Witness).described("a witness met the killer's eyes"),
            ClueTemplate::new(C::EyeColor, VictimPhone).described("a close-up in the phone's camera roll"),
            ClueTemplate::new(C::BloodType, CrimeScene).described("blood traces under UV light"),
            ClueTemplate::new(C::BloodType, Victim).described("blood under the victim's fingernails"),
            ClueTemplate::new(C::BloodType, MurderWeapon).described("the killer's blood on the weapon"),
            ClueTemplate::new(C::Height, Witness).described("a witness judged the killer's height"),
            ClueTemplate::new(C::Height, CrimeScene).described("a deep footprint in the grass"),
        ];

        Self { templates }
    }

    /// Load a catalog from a RON file holding a list of templates.
    pub fn load_from_ron(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<Self, CatalogError> {
        let templates: Vec<ClueTemplate> = ron::from_str(input)?;
        Ok(Self { templates })
    }

    /// Append the templates of `other`.
    pub fn extend(&mut self, other: ClueCatalog) {
        self.templates.extend(other.templates);
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Templates that could reveal `fact` given the full fact set.
    pub fn matching<'a>(
        &'a self,
        fact: &'a TraitValue,
        facts: &'a [TraitValue],
    ) -> impl Iterator<Item = &'a ClueTemplate> + 'a {
        self.templates
            .iter()
            .filter(move |t| t.describes(fact) && t.conditions_met(facts))
    }

    /// Check coverage and template sanity.
    pub fn lint(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();

        for category in TraitCategory::ALL {
            let templates: Vec<&ClueTemplate> = self
                .templates
                .iter()
                .filter(|t| t.category == category)
                .collect();
            if templates.is_empty() {
                issues.push(CatalogIssue::MissingCategory(category));
                continue;
            }
            for value in category.values() {
                let covered = templates.iter().any(|t| t.conditions_met(&[value]));
                if !covered {
                    issues.push(CatalogIssue::UncoveredValue(value));
                }
            }
        }

        for (i, template) in self.templates.iter().enumerate() {
            if matches!(&template.conditions, Some(conditions) if conditions.is_empty()) {
                issues.push(CatalogIssue::EmptyConditions(i));
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn standard_weights_align_with_values() {
        let catalog = TraitCatalog::standard();
        for category in TraitCategory::ALL {
            assert_eq!(catalog.weights(category).len(), category.values().len());
        }
        assert_eq!(catalog.weights(TraitCategory::EyeColor), &[7.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn sampling_is_deterministic_per_seed() {
        let catalog = TraitCatalog::standard();
        let mut rng1 = StdRng::seed_from_u64(9);
        let mut rng2 = StdRng::seed_from_u64(9);
        for _ in 0..20 {
            assert_eq!(catalog.sample_profile(&mut rng1), catalog.sample_profile(&mut rng2));
        }
    }

    #[test]
    fn sample_respects_zero_weights() {
        let catalog = TraitCatalog::parse_ron("{ Height: [0.0, 0.0, 1.0] }").unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            assert_eq!(
                catalog.sample(TraitCategory::Height, &mut rng),
                TraitValue::Height(Height::Tall)
            );
        }
        // Other categories keep their defaults.
        assert_eq!(catalog.weights(TraitCategory::Hand), &[0.8, 0.2]);
    }

    #[test]
    fn wrong_weight_count_rejected() {
        let err = TraitCatalog::parse_ron("{ BloodType: [1.0, 2.0] }").unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidWeights {
                category: TraitCategory::BloodType,
                ..
            }
        ));
    }

    #[test]
    fn negative_and_zero_sum_weights_rejected() {
        assert!(TraitCatalog::parse_ron("{ Hand: [-1.0, 2.0] }").is_err());
        assert!(TraitCatalog::parse_ron("{ Hand: [0.0, 0.0] }").is_err());
    }

    #[test]
    fn malformed_ron_is_error() {
        assert!(matches!(
            TraitCatalog::parse_ron("{ Height: "),
            Err(CatalogError::Ron(_))
        ));
        assert!(matches!(
            ClueCatalog::parse_ron("[(category: Nope)]"),
            Err(CatalogError::Ron(_))
        ));
    }

    #[test]
    fn standard_clue_catalog_shape() {
        let catalog = ClueCatalog::standard();
        assert_eq!(catalog.len(), 28);
        let count = |c: TraitCategory| catalog.templates.iter().filter(|t| t.category == c).count();
        assert_eq!(count(TraitCategory::Gender), 4);
        assert_eq!(count(TraitCategory::LinkToVictim), 8);
        assert_eq!(count(TraitCategory::Hand), 3);
        assert_eq!(count(TraitCategory::HairColor), 6);
        assert_eq!(count(TraitCategory::EyeColor), 2);
        assert_eq!(count(TraitCategory::BloodType), 3);
        assert_eq!(count(TraitCategory::Height), 2);
        assert!(catalog.templates.iter().all(|t| !t.description.is_empty()));
    }

    #[test]
    fn standard_clue_catalog_lints_clean() {
        assert!(ClueCatalog::standard().lint().is_empty());
    }

    #[test]
    fn matching_filters_by_category_and_condition() {
        let catalog = ClueCatalog::standard();
        let fact = TraitValue::LinkToVictim(LinkToVictim::Colleague);
        let facts = [fact, TraitValue::Hand(Hand::Left)];
        let locations: Vec<Location> = catalog.matching(&fact, &facts).map(|t| t.location).collect();
        assert_eq!(
            locations,
            vec![Location::VictimHouse, Location::MurdererHouse, Location::VictimPhone]
        );
    }

    #[test]
    fn lint_reports_gaps() {
        let catalog = ClueCatalog::parse_ron(
            r#"[
                (category: Hand, location: Witness, conditions: Some([Hand(Left)])),
                (category: Height, location: CrimeScene, conditions: Some([])),
            ]"#,
        )
        .unwrap();
        let issues = catalog.lint();
        assert!(issues.contains(&CatalogIssue::MissingCategory(TraitCategory::Gender)));
        assert!(issues.contains(&CatalogIssue::UncoveredValue(TraitValue::Hand(Hand::Right))));
        assert!(!issues.contains(&CatalogIssue::UncoveredValue(TraitValue::Hand(Hand::Left))));
        assert!(issues.contains(&CatalogIssue::EmptyConditions(1)));
    }

    #[test]
    fn extend_appends() {
        let mut catalog = ClueCatalog::default();
        assert!(catalog.is_empty());
        catalog.extend(ClueCatalog::standard());
        catalog.extend(ClueCatalog {
            templates: vec![ClueTemplate::new(TraitCategory::Gender, Location::Police)],
        });
        assert_eq!(catalog.len(), 29);
        assert_eq!(catalog.templates[28].location, Location::Police);
    }
}
