use serde::{Deserialize, Serialize};

/// Places where evidence turns up or people can be questioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    CrimeScene,
    Hospital,
    Police,
    Witness,
    Victim,
    Cctv,
    VictimPhone,
    MurderWeapon,
    Neighbor,
    VictimHouse,
    MurdererHouse,
}

impl Location {
    pub const ALL: [Location; 11] = [
        Self::CrimeScene,
        Self::Hospital,
        Self::Police,
        Self::Witness,
        Self::Victim,
        Self::Cctv,
        Self::VictimPhone,
        Self::MurderWeapon,
        Self::Neighbor,
        Self::VictimHouse,
        Self::MurdererHouse,
    ];

    /// Returns the tag string for this location (e.g., "location:cctv").
    pub fn tag(&self) -> &'static str {
        match self {
            Self::CrimeScene => "location:crime_scene",
            Self::Hospital => "location:hospital",
            Self::Police => "location:police",
            Self::Witness => "location:witness",
            Self::Victim => "location:victim",
            Self::Cctv => "location:cctv",
            Self::VictimPhone => "location:victim_phone",
            Self::MurderWeapon => "location:murder_weapon",
            Self::Neighbor => "location:neighbor",
            Self::VictimHouse => "location:victim_house",
            Self::MurdererHouse => "location:murderer_house",
        }
    }

    /// Look up a location by tag, with or without the `location:` prefix.
    pub fn from_tag(tag: &str) -> Option<Location> {
        let name = tag.strip_prefix("location:").unwrap_or(tag);
        Self::ALL
            .into_iter()
            .find(|l| l.tag().strip_prefix("location:") == Some(name))
    }
}
