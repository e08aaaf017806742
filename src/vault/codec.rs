use crate::vault::models::{CredentialRecord, PasswordEntry};
use crate::vault::ports::VaultCodec;
use anyhow::{Context, Result};

/// Plain JSON, so the stored values stay readable by hand: an object for the
/// credentials and an array of entry objects for the password list.
pub struct JsonCodec;

impl VaultCodec for JsonCodec {
    fn encode_credentials(&self, record: &CredentialRecord) -> Result<String> {
        serde_json::to_string(record).context("Failed to serialize credentials")
    }

    fn decode_credentials(&self, raw: &str) -> Result<CredentialRecord> {
        serde_json::from_str(raw).context("Failed to parse stored credentials")
    }

    fn encode_entries(&self, entries: &[PasswordEntry]) -> Result<String> {
        serde_json::to_string(entries).context("Failed to serialize password list")
    }

    fn decode_entries(&self, raw: &str) -> Result<Vec<PasswordEntry>> {
        serde_json::from_str(raw).context("Failed to parse stored password list")
    }
}
