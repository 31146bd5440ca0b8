/// Environment: which places and evidence the player can inspect.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::synthesis::ClueSet;
use crate::schema::location::Location;
use crate::schema::routine::{MurderWeaponRoutine, VictimPhoneLockRoutine, VictimPhoneRoutine};
use crate::schema::suspect::GUILTY_INDEX;

/// Chances for evidence that no clue forces into the case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentOdds {
    /// Per innocent suspect: their house can be searched.
    pub suspect_house: f64,
    pub cctv: f64,
    pub victim_phone: f64,
    pub neighbor: f64,
}

impl Default for EnvironmentOdds {
    fn default() -> Self {
        Self {
            suspect_house: 0.33,
            cctv: 0.33,
            victim_phone: 0.15,
            neighbor: 0.15,
        }
    }
}

/// A chance outside `0.0..=1.0`, NaN included.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("{field} chance {value} is outside 0..=1")]
pub struct OddsError {
    pub field: &'static str,
    pub value: f64,
}

impl EnvironmentOdds {
    /// Every chance must lie in `0.0..=1.0`.
    pub fn validate(&self) -> Result<(), OddsError> {
        let named = [
            ("suspect_house", self.suspect_house),
            ("cctv", self.cctv),
            ("victim_phone", self.victim_phone),
            ("neighbor", self.neighbor),
        ];
        for (field, value) in named {
            if !(0.0..=1.0).contains(&value) {
                return Err(OddsError { field, value });
            }
        }
        Ok(())
    }
}

/// What exists in the world and what the player may inspect.
///
/// Presence flags (`murder_weapon`, `victim_phone`, `cctv`, `neighbor`) say
/// the thing exists; `can_inspect_*` flags say it holds a clue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub murder_weapon: bool,
    pub can_inspect_murder_weapon: bool,
    pub victim_phone: bool,
    pub can_inspect_victim_phone: bool,
    pub can_inspect_victim_house: bool,
    /// One entry per suspect, by index.
    pub can_inspect_houses: Vec<bool>,
    pub cctv: bool,
    pub can_inspect_cctv: bool,
    pub neighbor: bool,
    pub can_inspect_neighbor: bool,
    pub victim_phone_routine: Option<VictimPhoneRoutine>,
    pub victim_phone_lock_routine: Option<VictimPhoneLockRoutine>,
    pub murder_weapon_routine: Option<MurderWeaponRoutine>,
}

impl Environment {
    /// Derive the environment from the clues.
    ///
    /// Locations referenced by a clue are forced open. The rest is rolled in
    /// this order: innocent houses by index, CCTV, victim phone, neighbor,
    /// phone routine, phone lock routine, weapon routine. A locked phone
    /// opens the victim's house, where the unlock hint is kept.
    ///
    /// `odds` must already have passed [`EnvironmentOdds::validate`].
    pub(crate) fn derive(
        clues: &ClueSet,
        suspect_count: usize,
        odds: &EnvironmentOdds,
        rng: &mut StdRng,
    ) -> Self {
        let mut env = Environment {
            can_inspect_houses: vec![false; suspect_count],
            ..Default::default()
        };

        for location in clues.locations() {
            match location {
                Location::MurderWeapon => {
                    env.murder_weapon = true;
                    env.can_inspect_murder_weapon = true;
                }
                Location::VictimPhone => {
                    env.victim_phone = true;
                    env.can_inspect_victim_phone = true;
                }
                Location::MurdererHouse => {
                    if let Some(house) = env.can_inspect_houses.get_mut(GUILTY_INDEX) {
                        *house = true;
                    }
                }
                Location::VictimHouse => env.can_inspect_victim_house = true,
                Location::Cctv => {
                    env.cctv = true;
                    env.can_inspect_cctv = true;
                }
                Location::Neighbor => {
                    env.neighbor = true;
                    env.can_inspect_neighbor = true;
                }
                _ => {}
            }
        }

        for house in env.can_inspect_houses.iter_mut().skip(GUILTY_INDEX + 1) {
            *house = rng.gen_bool(odds.suspect_house);
        }
        if !env.cctv {
            env.cctv = rng.gen_bool(odds.cctv);
        }
        if !env.victim_phone {
            env.victim_phone = rng.gen_bool(odds.victim_phone);
        }
        if !env.neighbor {
            env.neighbor = rng.gen_bool(odds.neighbor);
        }

        if env.victim_phone {
            env.victim_phone_routine = VictimPhoneRoutine::ALL.choose(rng).copied();
            env.victim_phone_lock_routine = VictimPhoneLockRoutine::ALL.choose(rng).copied();
            if env.victim_phone_lock_routine.is_some_and(|lock| lock.is_locked()) {
                env.can_inspect_victim_house = true;
            }
        }
        if env.murder_weapon {
            env.murder_weapon_routine = MurderWeaponRoutine::ALL.choose(rng).copied();
        }

        env
    }

    /// Whether the player may inspect `location` for evidence.
    pub fn can_inspect(&self, location: Location) -> bool {
        match location {
            Location::MurderWeapon => self.can_inspect_murder_weapon,
            Location::VictimPhone => self.can_inspect_victim_phone,
            Location::VictimHouse => self.can_inspect_victim_house,
            Location::MurdererHouse => self
                .can_inspect_houses
                .get(GUILTY_INDEX)
                .copied()
                .unwrap_or(false),
            Location::Cctv => self.can_inspect_cctv,
            Location::Neighbor => self.can_inspect_neighbor,
            // Always reachable.
            Location::CrimeScene
            | Location::Hospital
            | Location::Police
            | Location::Witness
            | Location::Victim => true,
        }
    }

    /// Whether `suspect`'s house can be searched.
    pub fn can_inspect_house(&self, suspect: usize) -> bool {
        self.can_inspect_houses.get(suspect).copied().unwrap_or(false)
    }
}
