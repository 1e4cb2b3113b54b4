#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CrashError {
    #[error("malformed hash: expected at least 13 hex characters, got {len} bytes")]
    MalformedHash { len: usize },
    #[error("malformed hash: `{chunk}` is not hexadecimal")]
    InvalidHex { chunk: String },
    #[error("instant-crash modulus must be non-zero")]
    ZeroModulus,
    #[error("invalid multiplier: {0}")]
    InvalidMultiplier(String),
}

pub type CrashResult<T> = Result<T, CrashError>;
