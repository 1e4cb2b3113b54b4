use std::iter::FusedIterator;

use crate::fairness::FairnessHasher;

/// Number of previous rounds reconstructed from a revealed seed.
pub const CHAIN_LENGTH: usize = 100;

pub fn derive_next(seed: &str) -> String {
    FairnessHasher::plain_hash(seed)
}

/// Lazy walk down a seed chain. Each item is the SHA-256 of the one before,
/// starting with the hash of the anchor; the anchor itself is never yielded.
#[derive(Debug, Clone)]
pub struct HashChain {
    current: String,
    remaining: usize,
}

impl HashChain {
    pub fn new(anchor: impl Into<String>, length: usize) -> Self {
        Self {
            current: anchor.into(),
            remaining: length,
        }
    }
}

impl Iterator for HashChain {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.current = derive_next(&self.current);
        Some(self.current.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for HashChain {}

impl FusedIterator for HashChain {}

pub fn chain_from(anchor: &str, length: usize) -> HashChain {
    HashChain::new(anchor, length)
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("broken link at index {index}: seed is not the hash of its successor")]
    BrokenLink { index: usize },
}

/// Check that `seeds` are ordered as the game consumed them: every seed is the
/// hash of the seed played after it, so `seeds[i] == sha256(seeds[i + 1])`.
pub fn verify_chain<S: AsRef<str>>(seeds: &[S]) -> Result<(), ChainError> {
    for (index, pair) in seeds.windows(2).enumerate() {
        if derive_next(pair[1].as_ref()) != pair[0].as_ref() {
            return Err(ChainError::BrokenLink { index });
        }
    }
    Ok(())
}

/// How many hashing steps lead from `anchor` down to `target`, if within `max_depth`.
///
/// `Some(0)` means the two seeds are equal.
pub fn locate_in_chain(anchor: &str, target: &str, max_depth: usize) -> Option<usize> {
    if anchor == target {
        return Some(0);
    }
    chain_from(anchor, max_depth)
        .position(|seed| seed == target)
        .map(|pos| pos + 1)
}
