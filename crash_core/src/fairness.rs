use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::crash::crash_point;
use crate::error::CrashResult;
use crate::round::RoundRecord;

// Round hash construction: HMAC-SHA256 keyed by the server seed, with the
// committed client seed as the message. Chain links are plain SHA-256.

pub type HmacSha256 = Hmac<Sha256>;

/// Hash of Ethereum block #14211322, committed publicly before the seed chain was used.
pub const DEFAULT_CLIENT_SEED: &str =
    "0x3b2d4aa9bdfea91f09642ea20c65383b71bf785bd922a96fd7e70cbac4ee58d3";

pub fn derive_hash_hex(input: &[u8]) -> String {
    use sha2::Digest;
    let mut hasher = Sha256::new();
    hasher.update(input);
    hex::encode(hasher.finalize())
}

pub fn derive_hmac_hex(key: &[u8], message: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FairnessConfig {
    pub client_seed: String,
}

impl FairnessConfig {
    pub fn new(client_seed: impl Into<String>) -> Self {
        Self {
            client_seed: client_seed.into(),
        }
    }
}

impl Default for FairnessConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CLIENT_SEED)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FairnessHasher {
    config: FairnessConfig,
}

impl FairnessHasher {
    pub fn new(config: FairnessConfig) -> Self {
        Self { config }
    }

    pub fn client_seed(&self) -> &str {
        &self.config.client_seed
    }

    /// Round hash of `seed`: HMAC-SHA256 with the seed as key and the client seed as message.
    pub fn salted_hash(&self, seed: &str) -> String {
        derive_hmac_hex(seed.as_bytes(), self.config.client_seed.as_bytes())
    }

    pub fn plain_hash(seed: &str) -> String {
        derive_hash_hex(seed.as_bytes())
    }

    /// Recompute a published round and check both its hash and its multiplier.
    pub fn verify_round(&self, record: &RoundRecord) -> CrashResult<bool> {
        let hash = self.salted_hash(&record.seed);
        if hash != record.hash {
            return Ok(false);
        }
        Ok(crash_point(&hash)? == record.multiplier)
    }
}
