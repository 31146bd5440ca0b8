use serde::{Deserialize, Serialize};

use super::location::Location;
use super::traits::{TraitCategory, TraitValue};

/// A static catalog entry: a clue that reveals one trait category of the
/// culprit, found at `location`.
///
/// `conditions` restrict when the clue makes narrative sense. `None` means
/// always valid; otherwise at least one listed value must be among the
/// facts the case is built on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClueTemplate {
    pub category: TraitCategory,
    pub location: Location,
    #[serde(default)]
    pub conditions: Option<Vec<TraitValue>>,
    #[serde(default)]
    pub description: String,
}

impl ClueTemplate {
    pub fn new(category: TraitCategory, location: Location) -> Self {
        Self {
            category,
            location,
            conditions: None,
            description: String::new(),
        }
    }

    pub fn with_conditions(mut self, conditions: &[TraitValue]) -> Self {
        self.conditions = Some(conditions.to_vec());
        self
    }

    pub fn described(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Returns true if this template can reveal `fact`.
    pub fn describes(&self, fact: &TraitValue) -> bool {
        self.category == fact.category()
    }

    /// One shared value is enough to satisfy the conditions.
    pub fn conditions_met(&self, facts: &[TraitValue]) -> bool {
        match &self.conditions {
            None => true,
            Some(conditions) => conditions.iter().any(|c| facts.contains(c)),
        }
    }
}
