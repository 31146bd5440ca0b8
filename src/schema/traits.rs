use serde::{Deserialize, Serialize};
use std::fmt;

/// A trait category. Declaration order is the canonical category order:
/// it fixes the order of a suspect's features and therefore how ties are
/// broken during the fact search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TraitCategory {
    Gender,
    HairColor,
    EyeColor,
    Height,
    BloodType,
    Hand,
    LinkToVictim,
}

impl TraitCategory {
    /// Every category, in canonical order.
    pub const ALL: [TraitCategory; 7] = [
        Self::Gender,
        Self::HairColor,
        Self::EyeColor,
        Self::Height,
        Self::BloodType,
        Self::Hand,
        Self::LinkToVictim,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Position of this category in [`TraitCategory::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Snake-case name, e.g. "blood_type".
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gender => "gender",
            Self::HairColor => "hair_color",
            Self::EyeColor => "eye_color",
            Self::Height => "height",
            Self::BloodType => "blood_type",
            Self::Hand => "hand",
            Self::LinkToVictim => "link_to_victim",
        }
    }

    /// Every value of this category, in declaration order. Weight tables
    /// line up with this order.
    pub fn values(&self) -> Vec<TraitValue> {
        match self {
            Self::Gender => Gender::ALL.iter().copied().map(TraitValue::Gender).collect(),
            Self::HairColor => HairColor::ALL
                .iter()
                .copied()
                .map(TraitValue::HairColor)
                .collect(),
            Self::EyeColor => EyeColor::ALL
                .iter()
                .copied()
                .map(TraitValue::EyeColor)
                .collect(),
            Self::Height => Height::ALL.iter().copied().map(TraitValue::Height).collect(),
            Self::BloodType => BloodType::ALL
                .iter()
                .copied()
                .map(TraitValue::BloodType)
                .collect(),
            Self::Hand => Hand::ALL.iter().copied().map(TraitValue::Hand).collect(),
            Self::LinkToVictim => LinkToVictim::ALL
                .iter()
                .copied()
                .map(TraitValue::LinkToVictim)
                .collect(),
        }
    }
}

impl fmt::Display for TraitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Self::Female, Self::Male];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HairColor {
    Black,
    Brown,
    Blond,
    Red,
}

impl HairColor {
    pub const ALL: [HairColor; 4] = [Self::Black, Self::Brown, Self::Blond, Self::Red];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EyeColor {
    Brown,
    Blue,
    Grey,
    Green,
}

impl EyeColor {
    pub const ALL: [EyeColor; 4] = [Self::Brown, Self::Blue, Self::Grey, Self::Green];
}

/// Rough height bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Height {
    Small,
    Medium,
    Tall,
}

impl Height {
    pub const ALL: [Height; 3] = [Self::Small, Self::Medium, Self::Tall];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BloodType {
    A,
    B,
    AB,
    O,
}

impl BloodType {
    pub const ALL: [BloodType; 4] = [Self::A, Self::B, Self::AB, Self::O];
}

/// Dominant hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Hand {
    Right,
    Left,
}

impl Hand {
    pub const ALL: [Hand; 2] = [Self::Right, Self::Left];
}

/// How the suspect knew the victim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LinkToVictim {
    Sibling,
    Neighborhood,
    Colleague,
    Ex,
    Unknown,
}

impl LinkToVictim {
    pub const ALL: [LinkToVictim; 5] = [
        Self::Sibling,
        Self::Neighborhood,
        Self::Colleague,
        Self::Ex,
        Self::Unknown,
    ];
}

/// A concrete trait value: the "feature" node of the deduction model.
/// Equality is by category and value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TraitValue {
    Gender(Gender),
    HairColor(HairColor),
    EyeColor(EyeColor),
    Height(Height),
    BloodType(BloodType),
    Hand(Hand),
    LinkToVictim(LinkToVictim),
}

impl TraitValue {
    pub fn category(&self) -> TraitCategory {
        match self {
            Self::Gender(_) => TraitCategory::Gender,
            Self::HairColor(_) => TraitCategory::HairColor,
            Self::EyeColor(_) => TraitCategory::EyeColor,
            Self::Height(_) => TraitCategory::Height,
            Self::BloodType(_) => TraitCategory::BloodType,
            Self::Hand(_) => TraitCategory::Hand,
            Self::LinkToVictim(_) => TraitCategory::LinkToVictim,
        }
    }

    /// Lower-case value name, e.g. "tall" or "ab".
    pub fn label(&self) -> &'static str {
        match self {
            Self::Gender(Gender::Female) => "female",
            Self::Gender(Gender::Male) => "male",
            Self::HairColor(HairColor::Black) => "black",
            Self::HairColor(HairColor::Brown) => "brown",
            Self::HairColor(HairColor::Blond) => "blond",
            Self::HairColor(HairColor::Red) => "red",
            Self::EyeColor(EyeColor::Brown) => "brown",
            Self::EyeColor(EyeColor::Blue) => "blue",
            Self::EyeColor(EyeColor::Grey) => "grey",
            Self::EyeColor(EyeColor::Green) => "green",
            Self::Height(Height::Small) => "small",
            Self::Height(Height::Medium) => "medium",
            Self::Height(Height::Tall) => "tall",
            Self::BloodType(BloodType::A) => "a",
            Self::BloodType(BloodType::B) => "b",
            Self::BloodType(BloodType::AB) => "ab",
            Self::BloodType(BloodType::O) => "o",
            Self::Hand(Hand::Right) => "right",
            Self::Hand(Hand::Left) => "left",
            Self::LinkToVictim(LinkToVictim::Sibling) => "sibling",
            Self::LinkToVictim(LinkToVictim::Neighborhood) => "neighborhood",
            Self::LinkToVictim(LinkToVictim::Colleague) => "colleague",
            Self::LinkToVictim(LinkToVictim::Ex) => "ex",
            Self::LinkToVictim(LinkToVictim::Unknown) => "unknown",
        }
    }
}

impl fmt::Display for TraitValue {
    /// Renders as a tag, e.g. "blood_type:o".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.category().name(), self.label())
    }
}
