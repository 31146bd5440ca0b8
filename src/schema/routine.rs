/// Routines: how evidence ended up where the player finds it.
use serde::{Deserialize, Serialize};

/// Where the victim's phone ends up after the murder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VictimPhoneRoutine {
    NextToVictim,
    TrashCan,
    Lost,
}

impl VictimPhoneRoutine {
    pub const ALL: [VictimPhoneRoutine; 3] = [Self::NextToVictim, Self::TrashCan, Self::Lost];
}

/// How the victim's phone is locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VictimPhoneLockRoutine {
    LockBirthday,
    LockPet,
    LockMemo,
    Unlock,
}

impl VictimPhoneLockRoutine {
    pub const ALL: [VictimPhoneLockRoutine; 4] = [
        Self::LockBirthday,
        Self::LockPet,
        Self::LockMemo,
        Self::Unlock,
    ];

    /// A locked phone hides its hint in the victim's house.
    pub fn is_locked(&self) -> bool {
        !matches!(self, Self::Unlock)
    }
}

/// Where the murder weapon is left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MurderWeaponRoutine {
    NextToVictim,
    TrashCan,
    Lost,
}

impl MurderWeaponRoutine {
    pub const ALL: [MurderWeaponRoutine; 3] = [Self::NextToVictim, Self::TrashCan, Self::Lost];
}
