/// Suspect population generation.

use rand::rngs::StdRng;

use crate::core::catalog::TraitCatalog;
use crate::schema::suspect::{Profile, Suspect};

/// Builds the ordered population of a case. Index 0 is always the culprit.
pub struct SuspectPool;

impl SuspectPool {
    /// Roll `n` suspects, one full profile at a time.
    pub fn generate(n: usize, catalog: &TraitCatalog, rng: &mut StdRng) -> Vec<Suspect> {
        (0..n)
            .map(|index| Suspect::new(index, catalog.sample_profile(rng)))
            .collect()
    }

    /// Use fixed profiles instead of rolling them. The first profile is the
    /// culprit.
    pub fn from_profiles(profiles: &[Profile]) -> Vec<Suspect> {
        profiles
            .iter()
            .enumerate()
            .map(|(index, profile)| Suspect::new(index, *profile))
            .collect()
    }
}
