use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    chain::{chain_from, CHAIN_LENGTH},
    crash::{crash_point, is_instant_crash, CrashMultiplier},
    error::CrashResult,
    fairness::FairnessHasher,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub seed: String,
    pub multiplier: CrashMultiplier,
    pub hash: String, // hmac with client seed
}

#[derive(Debug, Clone, Default)]
pub struct RoundFormatter {
    hasher: FairnessHasher,
}

impl RoundFormatter {
    pub fn new(hasher: FairnessHasher) -> Self {
        Self { hasher }
    }

    pub fn hasher(&self) -> &FairnessHasher {
        &self.hasher
    }

    pub fn format_round(&self, seed: &str) -> CrashResult<RoundRecord> {
        let hash = self.hasher.salted_hash(seed);
        let multiplier = crash_point(&hash)?;
        Ok(RoundRecord {
            seed: seed.to_string(),
            multiplier,
            hash,
        })
    }

    /// The `CHAIN_LENGTH` rounds played before the one seeded by `seed`.
    pub fn previous_rounds(&self, seed: &str) -> CrashResult<Vec<RoundRecord>> {
        self.previous_rounds_n(seed, CHAIN_LENGTH)
    }

    pub fn previous_rounds_n(&self, seed: &str, count: usize) -> CrashResult<Vec<RoundRecord>> {
        let rounds = chain_from(seed, count)
            .map(|s| self.format_round(&s))
            .collect::<CrashResult<Vec<_>>>()?;
        debug!(count = rounds.len(), "derived previous rounds");
        Ok(rounds)
    }
}

/// Convenience: format a round against the committed client seed.
pub fn format_round(seed: &str) -> CrashResult<RoundRecord> {
    RoundFormatter::default().format_round(seed)
}

/// Convenience: previous rounds against the committed client seed.
pub fn previous_rounds(seed: &str) -> CrashResult<Vec<RoundRecord>> {
    RoundFormatter::default().previous_rounds(seed)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub count: usize,
    pub instant_crashes: usize,
    pub min: Option<CrashMultiplier>,
    pub max: Option<CrashMultiplier>,
    pub median: Option<CrashMultiplier>,
}

/// Batch statistics. Instant crashes are read from each round hash, since an
/// ordinary round can also land on 1.00x.
pub fn summarize(rounds: &[RoundRecord]) -> CrashResult<RoundSummary> {
    let mut instant_crashes = 0;
    for round in rounds {
        if is_instant_crash(&round.hash)? {
            instant_crashes += 1;
        }
    }
    let mut multipliers: Vec<CrashMultiplier> = rounds.iter().map(|r| r.multiplier).collect();
    multipliers.sort_unstable();
    Ok(RoundSummary {
        count: multipliers.len(),
        instant_crashes,
        min: multipliers.first().copied(),
        max: multipliers.last().copied(),
        // lower median for even counts, so the value is always an observed crash point
        median: multipliers
            .len()
            .checked_sub(1)
            .map(|last| multipliers[last / 2]),
    })
}
