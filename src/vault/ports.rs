use anyhow::Result;

use super::models::{CredentialRecord, PasswordEntry};

// Randomness provider for deterministic testing.
pub trait Rng: Send + Sync {
    fn fill(&self, bytes: &mut [u8]) -> Result<()>;
}

/// Returned by a `KeyValueStore` whose stored bytes are not text. The store
/// treats it like malformed JSON, not like an I/O failure.
#[derive(Debug, thiserror::Error)]
#[error("stored value for {key:?} is not valid UTF-8 text")]
pub struct UnreadableValue {
    pub key: String,
}

/// Persistent string store addressed by fixed keys.
///
/// Implementations must treat removing an absent key as success.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

pub trait VaultCodec: Send + Sync {
    fn encode_credentials(&self, record: &CredentialRecord) -> Result<String>;
    fn decode_credentials(&self, raw: &str) -> Result<CredentialRecord>;
    fn encode_entries(&self, entries: &[PasswordEntry]) -> Result<String>;
    fn decode_entries(&self, raw: &str) -> Result<Vec<PasswordEntry>>;
}

// Source of `createdAt` stamps, in epoch milliseconds.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

// Character classes the generator samples from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharsetOptions {
    pub include_uppercase: bool,
    pub include_lowercase: bool,
    pub include_digits: bool,
    pub include_symbols: bool,
}

impl Default for CharsetOptions {
    fn default() -> Self {
        Self {
            include_uppercase: true,
            include_lowercase: true,
            include_digits: true,
            include_symbols: true,
        }
    }
}

impl CharsetOptions {
    pub fn none() -> Self {
        Self {
            include_uppercase: false,
            include_lowercase: false,
            include_digits: false,
            include_symbols: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.include_uppercase
            || self.include_lowercase
            || self.include_digits
            || self.include_symbols)
    }
}

pub trait PasswordGenerator: Send + Sync {
    /// Produce exactly `length` characters. The length is taken as given;
    /// callers clamp it beforehand.
    fn generate(&self, length: usize, options: &CharsetOptions) -> Result<String>;
}
