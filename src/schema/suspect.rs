use serde::{Deserialize, Serialize};
use std::fmt;

use super::traits::{
    BloodType, EyeColor, Gender, HairColor, Hand, Height, LinkToVictim, TraitCategory, TraitValue,
};

/// Index of the culprit in every population.
pub const GUILTY_INDEX: usize = 0;

/// Largest population a [`SuspectSet`] can address.
pub const MAX_SUSPECTS: usize = 32;

/// One value per trait category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Profile {
    pub gender: Gender,
    pub eye_color: EyeColor,
    pub hair_color: HairColor,
    pub height: Height,
    pub blood_type: BloodType,
    pub hand: Hand,
    pub link_to_victim: LinkToVictim,
}

impl Profile {
    /// The value this profile holds for `category`.
    pub fn get(&self, category: TraitCategory) -> TraitValue {
        match category {
            TraitCategory::Gender => TraitValue::Gender(self.gender),
            TraitCategory::HairColor => TraitValue::HairColor(self.hair_color),
            TraitCategory::EyeColor => TraitValue::EyeColor(self.eye_color),
            TraitCategory::Height => TraitValue::Height(self.height),
            TraitCategory::BloodType => TraitValue::BloodType(self.blood_type),
            TraitCategory::Hand => TraitValue::Hand(self.hand),
            TraitCategory::LinkToVictim => TraitValue::LinkToVictim(self.link_to_victim),
        }
    }

    /// All held values, in canonical category order.
    pub fn traits(&self) -> [TraitValue; TraitCategory::COUNT] {
        TraitCategory::ALL.map(|category| self.get(category))
    }

    /// Returns true if this profile holds `value`.
    pub fn has(&self, value: &TraitValue) -> bool {
        self.get(value.category()) == *value
    }
}

/// A person of interest. Immutable once built; the guilty flag follows
/// from the index at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suspect {
    index: usize,
    guilty: bool,
    profile: Profile,
}

impl Suspect {
    pub fn new(index: usize, profile: Profile) -> Self {
        Self {
            index,
            guilty: index == GUILTY_INDEX,
            profile,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_guilty(&self) -> bool {
        self.guilty
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn trait_value(&self, category: TraitCategory) -> TraitValue {
        self.profile.get(category)
    }

    pub fn has(&self, value: &TraitValue) -> bool {
        self.profile.has(value)
    }
}

/// A small set of suspect indices, stored as a bitmask.
///
/// Serializes as a sorted list of indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct SuspectSet(u32);

impl SuspectSet {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn single(index: usize) -> Self {
        let mut set = Self::new();
        set.insert(index);
        set
    }

    /// Every index in `0..count`.
    pub fn all(count: usize) -> Self {
        (0..count).collect()
    }

    /// Panics if `index` is not below [`MAX_SUSPECTS`].
    pub fn insert(&mut self, index: usize) {
        assert!(
            index < MAX_SUSPECTS,
            "suspect index {index} exceeds the supported population"
        );
        self.0 |= 1 << index;
    }

    /// Removes `index`, returning whether it was present.
    pub fn remove(&mut self, index: usize) -> bool {
        let present = self.contains(index);
        if present {
            self.0 &= !(1 << index);
        }
        present
    }

    pub fn contains(&self, index: usize) -> bool {
        index < MAX_SUSPECTS && self.0 & (1 << index) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn intersection(&self, other: SuspectSet) -> SuspectSet {
        SuspectSet(self.0 & other.0)
    }

    /// Indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> {
        let bits = self.0;
        (0..MAX_SUSPECTS).filter(move |&i| bits & (1 << i) != 0)
    }
}

impl FromIterator<usize> for SuspectSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = SuspectSet::new();
        for index in iter {
            set.insert(index);
        }
        set
    }
}

impl TryFrom<Vec<usize>> for SuspectSet {
    type Error = String;

    fn try_from(indices: Vec<usize>) -> Result<Self, Self::Error> {
        if let Some(bad) = indices.iter().find(|i| **i >= MAX_SUSPECTS) {
            return Err(format!(
                "suspect index {bad} exceeds the supported population of {MAX_SUSPECTS}"
            ));
        }
        Ok(indices.into_iter().collect())
    }
}

impl From<SuspectSet> for Vec<usize> {
    fn from(set: SuspectSet) -> Self {
        set.iter().collect()
    }
}

impl fmt::Display for SuspectSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indices: Vec<String> = self.iter().map(|i| i.to_string()).collect();
        write!(f, "{{{}}}", indices.join(", "))
    }
}
