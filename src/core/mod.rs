pub mod case;
pub mod catalog;
pub mod environment;
pub mod pool;
pub mod relation;
pub mod search;
pub mod synthesis;
