/// Clue synthesis: turns the chosen facts into narrative clues.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::catalog::ClueCatalog;
use crate::core::relation::Commonalities;
use crate::core::search::FactCombination;
use crate::schema::clue::ClueTemplate;
use crate::schema::location::Location;
use crate::schema::suspect::SuspectSet;
use crate::schema::traits::TraitValue;

/// A fact of the culprit paired with the template that reveals it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedClue {
    pub fact: TraitValue,
    pub template: ClueTemplate,
}

/// Generic alibi check. Added when the facts alone leave other suspects
/// standing; `suspects` are the ones whose alibi must be broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlibiClue {
    pub suspects: SuspectSet,
}

/// Every clue of a case, in fact order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClueSet {
    pub clues: Vec<GeneratedClue>,
    pub alibi: Option<AlibiClue>,
}

impl ClueSet {
    /// Pick one matching template per fact, then decide whether an alibi
    /// check is needed.
    ///
    /// A fact with no matching template gets no clue. Draws from `rng` once
    /// per fact that has at least one match, in fact order.
    pub fn synthesize(
        combination: &FactCombination,
        commonalities: &Commonalities,
        catalog: &ClueCatalog,
        rng: &mut StdRng,
    ) -> Self {
        let facts: Vec<TraitValue> = combination.facts().collect();

        let mut clues = Vec::with_capacity(facts.len());
        for fact in &facts {
            let matching: Vec<&ClueTemplate> = catalog.matching(fact, &facts).collect();
            match matching.choose(rng) {
                Some(template) => clues.push(GeneratedClue {
                    fact: *fact,
                    template: (*template).clone(),
                }),
                None => debug!(%fact, "no clue template matches fact"),
            }
        }

        let guilty = commonalities.guilty_index();
        let mut standing = facts
            .iter()
            .map(|fact| {
                let holders = commonalities.holders(fact).unwrap_or_default();
                assert!(
                    holders.contains(guilty),
                    "culprit {guilty} missing from holders of {fact}"
                );
                holders
            })
            .reduce(|acc, holders| acc.intersection(holders))
            .unwrap_or_default();
        standing.remove(guilty);

        let alibi = (!standing.is_empty()).then_some(AlibiClue { suspects: standing });
        debug!(
            clues = clues.len(),
            alibi = alibi.is_some(),
            "clues synthesized"
        );

        Self { clues, alibi }
    }

    /// The template chosen for `fact`, if any.
    pub fn get(&self, fact: &TraitValue) -> Option<&ClueTemplate> {
        self.clues
            .iter()
            .find(|c| c.fact == *fact)
            .map(|c| &c.template)
    }

    pub fn facts(&self) -> impl Iterator<Item = TraitValue> + '_ {
        self.clues.iter().map(|c| c.fact)
    }

    /// Locations referenced by trait clues. The alibi has none.
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        self.clues.iter().map(|c| c.template.location)
    }

    pub fn references(&self, location: Location) -> bool {
        self.locations().any(|l| l == location)
    }

    pub fn needs_alibi(&self) -> bool {
        self.alibi.is_some()
    }

    /// Number of trait clues, not counting the alibi.
    pub fn len(&self) -> usize {
        self.clues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clues.is_empty() && self.alibi.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::relation::RelationGraph;
    use crate::schema::suspect::{Profile, Suspect, GUILTY_INDEX};
    use crate::schema::traits::*;
    use rand::SeedableRng;

    fn base() -> Profile {
        Profile {
            gender: Gender::Male,
            eye_color: EyeColor::Brown,
            hair_color: HairColor::Brown,
            height: Height::Medium,
            blood_type: BloodType::A,
            hand: Hand::Right,
            link_to_victim: LinkToVictim::Colleague,
        }
    }

    fn pipeline(profiles: &[Profile]) -> (Commonalities, FactCombination) {
        let suspects: Vec<Suspect> = profiles
            .iter()
            .enumerate()
            .map(|(i, p)| Suspect::new(i, *p))
            .collect();
        let graph = RelationGraph::build(&suspects);
        let common = Commonalities::analyze(&graph, GUILTY_INDEX);
        let combination = FactCombination::search(&common);
        (common, combination)
    }

    fn tall_and_o() -> Vec<Profile> {
        vec![
            Profile {
                height: Height::Tall,
                blood_type: BloodType::O,
                ..base()
            },
            Profile {
                height: Height::Tall,
                ..base()
            },
            Profile {
                blood_type: BloodType::O,
                ..base()
            },
            base(),
            base(),
        ]
    }

    #[test]
    fn one_clue_per_fact() {
        let (common, combination) = pipeline(&tall_and_o());
        let mut rng = StdRng::seed_from_u64(5);
        let clues = ClueSet::synthesize(&combination, &common, &ClueCatalog::standard(), &mut rng);
        assert_eq!(clues.len(), 2);
        assert!(clues.get(&TraitValue::Height(Height::Tall)).is_some());
        assert!(clues.get(&TraitValue::BloodType(BloodType::O)).is_some());
        assert!(!clues.needs_alibi());
        for clue in &clues.clues {
            assert_eq!(clue.template.category, clue.fact.category());
        }
    }

    #[test]
    fn unmatched_fact_is_skipped() {
        let (common, combination) = pipeline(&tall_and_o());
        let catalog = ClueCatalog {
            templates: vec![ClueTemplate::new(TraitCategory::Height, Location::Witness)],
        };
        let mut rng = StdRng::seed_from_u64(5);
        let clues = ClueSet::synthesize(&combination, &common, &catalog, &mut rng);
        assert_eq!(clues.facts().collect::<Vec<_>>(), vec![TraitValue::Height(Height::Tall)]);
        assert!(clues.references(Location::Witness));
        assert!(!clues.references(Location::CrimeScene));
    }

    #[test]
    fn conditions_checked_against_all_facts() {
        let (common, combination) = pipeline(&tall_and_o());
        let catalog = ClueCatalog {
            templates: vec![
                ClueTemplate::new(TraitCategory::Height, Location::CrimeScene)
                    .with_conditions(&[TraitValue::BloodType(BloodType::O)]),
                ClueTemplate::new(TraitCategory::BloodType, Location::Victim)
                    .with_conditions(&[TraitValue::Hand(Hand::Left)]),
            ],
        };
        let mut rng = StdRng::seed_from_u64(5);
        let clues = ClueSet::synthesize(&combination, &common, &catalog, &mut rng);
        // Height's condition is met by the blood type fact; blood type's
        // condition names a value outside the facts.
        assert_eq!(clues.len(), 1);
        assert_eq!(
            clues.get(&TraitValue::Height(Height::Tall)).map(|t| t.location),
            Some(Location::CrimeScene)
        );
    }

    #[test]
    fn twin_requires_alibi() {
        let twin = Profile {
            hand: Hand::Left,
            ..base()
        };
        let (common, combination) = pipeline(&[twin, twin, base(), base()]);
        let mut rng = StdRng::seed_from_u64(5);
        let clues = ClueSet::synthesize(&combination, &common, &ClueCatalog::standard(), &mut rng);
        assert_eq!(
            clues.alibi,
            Some(AlibiClue {
                suspects: SuspectSet::single(1)
            })
        );
        assert!(!clues.is_empty());
    }

    #[test]
    fn same_seed_same_clues() {
        let (common, combination) = pipeline(&tall_and_o());
        let catalog = ClueCatalog::standard();
        let a = ClueSet::synthesize(&combination, &common, &catalog, &mut StdRng::seed_from_u64(77));
        let b = ClueSet::synthesize(&combination, &common, &catalog, &mut StdRng::seed_from_u64(77));
        assert_eq!(a, b);
    }
}
