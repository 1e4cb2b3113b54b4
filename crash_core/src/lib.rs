pub mod chain;
pub mod crash;
pub mod error;
pub mod fairness;
pub mod round;

pub use crate::chain::{chain_from, derive_next, locate_in_chain, verify_chain, ChainError, HashChain, CHAIN_LENGTH};
pub use crate::crash::{crash_point, is_instant_crash, should_insta_crash, CrashMultiplier, INSTANT_CRASH_MODULUS};
pub use crate::error::{CrashError, CrashResult};
pub use crate::fairness::{derive_hash_hex, derive_hmac_hex, FairnessConfig, FairnessHasher, DEFAULT_CLIENT_SEED};
pub use crate::round::{format_round, previous_rounds, summarize, RoundFormatter, RoundRecord, RoundSummary};
