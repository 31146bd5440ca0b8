/// Feature/suspect relation and the culprit's commonalities.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::schema::suspect::{Suspect, SuspectSet};
use crate::schema::traits::{TraitCategory, TraitValue};

/// Bipartite relation between trait values and suspect indices.
///
/// Only values held by at least one suspect are present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationGraph {
    holders: FxHashMap<TraitValue, SuspectSet>,
    /// Held values in canonical category/value order.
    order: Vec<TraitValue>,
    features: Vec<Vec<TraitValue>>,
}

impl RelationGraph {
    pub fn build(suspects: &[Suspect]) -> Self {
        let mut graph = RelationGraph {
            features: vec![Vec::new(); suspects.len()],
            ..Default::default()
        };

        for category in TraitCategory::ALL {
            for value in category.values() {
                let holders: SuspectSet = suspects
                    .iter()
                    .filter(|s| s.has(&value))
                    .map(|s| s.index())
                    .collect();
                if holders.is_empty() {
                    continue;
                }
                for index in holders.iter() {
                    graph.features[index].push(value);
                }
                graph.holders.insert(value, holders);
                graph.order.push(value);
            }
        }

        graph
    }

    /// Suspects holding `feature`; empty if nobody does.
    pub fn holders(&self, feature: &TraitValue) -> SuspectSet {
        self.holders.get(feature).copied().unwrap_or_default()
    }

    /// Features of a suspect in canonical category order.
    pub fn features_of(&self, index: usize) -> &[TraitValue] {
        self.features.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every held feature with its holders.
    pub fn features(&self) -> impl Iterator<Item = (TraitValue, SuspectSet)> + '_ {
        self.order.iter().map(|f| (*f, self.holders(f)))
    }

    pub fn suspect_count(&self) -> usize {
        self.features.len()
    }
}

/// A fact of the culprit and every suspect sharing it, culprit included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commonality {
    pub fact: TraitValue,
    pub holders: SuspectSet,
}

/// The culprit's facts, each mapped to the suspects sharing it, in
/// canonical category order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commonalities {
    guilty: usize,
    entries: Vec<Commonality>,
}

impl Commonalities {
    /// Panics if a holder set misses the culprit; that means the graph was
    /// built from a different population.
    pub fn analyze(graph: &RelationGraph, guilty: usize) -> Self {
        let entries = graph
            .features_of(guilty)
            .iter()
            .map(|fact| {
                let holders = graph.holders(fact);
                assert!(
                    holders.contains(guilty),
                    "culprit {guilty} missing from holders of {fact}"
                );
                Commonality {
                    fact: *fact,
                    holders,
                }
            })
            .collect();

        Self { guilty, entries }
    }

    pub fn guilty_index(&self) -> usize {
        self.guilty
    }

    pub fn entries(&self) -> &[Commonality] {
        &self.entries
    }

    pub fn holders(&self, fact: &TraitValue) -> Option<SuspectSet> {
        self.entries
            .iter()
            .find(|c| c.fact == *fact)
            .map(|c| c.holders)
    }

    /// Suspects sharing every single fact with the culprit.
    pub fn dopplegangers(&self) -> SuspectSet {
        let mut shared = self
            .entries
            .iter()
            .map(|c| c.holders)
            .reduce(|acc, holders| acc.intersection(holders))
            .unwrap_or_default();
        shared.remove(self.guilty);
        shared
    }
}
