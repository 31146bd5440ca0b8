/// Fact search: the smallest set of the culprit's traits that, taken
/// together, rules out every other suspect.
///
/// The search is exhaustive. With at most seven trait categories there are
/// at most 2^7 combinations to try, so no pruning is attempted.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::relation::{Commonalities, Commonality};
use crate::schema::suspect::SuspectSet;
use crate::schema::traits::{TraitCategory, TraitValue};

/// Combinations shorter than this are never enumerated.
pub const MIN_COMBINATION_LEN: usize = 3;

/// Whether the chosen facts single out the culprit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// Intersecting the facts leaves the culprit alone.
    Unique,
    /// No combination isolates the culprit; `remaining` are the suspects
    /// (culprit included) the best combination could not tell apart.
    Ambiguous { remaining: SuspectSet },
}

/// The ordered facts a case is built on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactCombination {
    pub entries: Vec<Commonality>,
    pub resolution: Resolution,
}

impl FactCombination {
    /// Search the culprit's commonalities for the fact combination.
    ///
    /// Candidates are the facts shared with at least one other suspect,
    /// sorted by how few suspects share them (stable, so ties keep category
    /// order). Every combination of `MIN_COMBINATION_LEN..=7` candidates is
    /// intersected left to right; a combination whose running intersection
    /// hits a single suspect is recorded up to and including that fact. The
    /// longest record wins, earliest first on ties.
    ///
    /// If nothing is recorded, a fact held by the culprit alone is used on
    /// its own. Failing that, the combination with the smallest final
    /// intersection is used and the result is [`Resolution::Ambiguous`].
    pub fn search(commonalities: &Commonalities) -> Self {
        let guilty = commonalities.guilty_index();

        let mut candidates: Vec<Commonality> = commonalities
            .entries()
            .iter()
            .filter(|c| c.holders.len() > 1)
            .copied()
            .collect();
        candidates.sort_by_key(|c| c.holders.len());

        let mut possibilities: Vec<Vec<usize>> = Vec::new();
        let mut fallback: Option<(Vec<usize>, usize)> = None;

        let longest = TraitCategory::COUNT.min(candidates.len());
        for r in (MIN_COMBINATION_LEN..=longest).rev() {
            for combination in Combinations::new(candidates.len(), r) {
                let mut running = candidates[combination[0]].holders;
                let mut isolated_at = None;
                for (pos, &i) in combination.iter().enumerate().skip(1) {
                    running = running.intersection(candidates[i].holders);
                    if running.len() == 1 {
                        isolated_at = Some(pos);
                        break;
                    }
                }

                if let Some(pos) = isolated_at {
                    assert!(
                        running.contains(guilty),
                        "fact intersection isolated suspect other than culprit {guilty}"
                    );
                    possibilities.push(combination[..=pos].to_vec());
                }

                let improves = fallback
                    .as_ref()
                    .map_or(true, |(_, size)| running.len() < *size);
                if improves {
                    fallback = Some((combination, running.len()));
                }
            }
        }

        debug!(
            candidates = candidates.len(),
            possibilities = possibilities.len(),
            "fact search finished"
        );

        let picked = |indices: &[usize]| -> Vec<Commonality> {
            indices.iter().map(|&i| candidates[i]).collect()
        };

        let best = possibilities.iter().fold(None::<&Vec<usize>>, |best, p| match best {
            Some(b) if b.len() >= p.len() => Some(b),
            _ => Some(p),
        });
        if let Some(best) = best {
            return Self {
                entries: picked(best),
                resolution: Resolution::Unique,
            };
        }

        if let Some(unique) = commonalities.entries().iter().find(|c| c.holders.len() == 1) {
            return Self {
                entries: vec![*unique],
                resolution: Resolution::Unique,
            };
        }

        match fallback {
            Some((indices, _)) => {
                let entries = picked(&indices);
                let remaining = narrow(&entries).last().copied().unwrap_or_default();
                warn!(
                    remaining = %remaining,
                    "no fact combination isolates the culprit"
                );
                Self {
                    entries,
                    resolution: Resolution::Ambiguous { remaining },
                }
            }
            None => {
                warn!("culprit has no facts to search");
                Self {
                    entries: Vec::new(),
                    resolution: Resolution::Ambiguous {
                        remaining: SuspectSet::new(),
                    },
                }
            }
        }
    }

    pub fn facts(&self) -> impl Iterator<Item = TraitValue> + '_ {
        self.entries.iter().map(|c| c.fact)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_unique(&self) -> bool {
        self.resolution == Resolution::Unique
    }

    /// Running intersection after each fact, in order.
    pub fn narrowing(&self) -> Vec<SuspectSet> {
        narrow(&self.entries)
    }
}

fn narrow(entries: &[Commonality]) -> Vec<SuspectSet> {
    let mut steps: Vec<SuspectSet> = Vec::with_capacity(entries.len());
    for entry in entries {
        let next = match steps.last() {
            Some(previous) => previous.intersection(entry.holders),
            None => entry.holders,
        };
        steps.push(next);
    }
    steps
}

/// Index combinations of `r` out of `n`, in lexicographic order.
struct Combinations {
    n: usize,
    indices: Vec<usize>,
    exhausted: bool,
}

impl Combinations {
    fn new(n: usize, r: usize) -> Self {
        Self {
            n,
            indices: (0..r).collect(),
            exhausted: r > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.exhausted {
            return None;
        }
        let current = self.indices.clone();

        let r = self.indices.len();
        let mut i = r;
        loop {
            if i == 0 {
                self.exhausted = true;
                break;
            }
            i -= 1;
            if self.indices[i] != i + self.n - r {
                self.indices[i] += 1;
                for j in i + 1..r {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }
        }

        Some(current)
    }
}
