pub mod clue;
pub mod location;
pub mod routine;
pub mod suspect;
pub mod traits;
