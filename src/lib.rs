//! Mystery Case: procedural murder-mystery generation.
//!
//! Rolls a population of suspects, searches for the smallest set of the
//! culprit's traits that singles them out, and turns that set into
//! narrative clues and an explorable crime scene. Every stage is driven by
//! one seeded generator, so a seed fully reproduces a case.

pub mod core;
pub mod schema;
