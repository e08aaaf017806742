use crate::vault::error::StoreError;
use crate::vault::models::{CredentialRecord, NewPassword, PasswordEntry};
use crate::vault::ports::{Clock, KeyValueStore, SystemClock, UnreadableValue, VaultCodec};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::spawn_blocking;
use zeroize::Zeroizing;

pub const CREDENTIALS_KEY: &str = "app_credentials";
pub const PASSWORDS_KEY: &str = "saved_passwords";

/// Local password store: the credentials singleton plus the newest-first
/// list of saved passwords, both kept as JSON under fixed keys.
///
/// The plain methods never fail; they log and fall back to `None`, an empty
/// list or `false`. The `try_*` methods report the underlying `StoreError`.
pub struct PasswordStore {
    kv: Arc<dyn KeyValueStore>,
    codec: Arc<dyn VaultCodec>,
    clock: Arc<dyn Clock>,
    // Held across every read-modify-write issued through this instance.
    writes: Mutex<()>,
}

impl PasswordStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, codec: Arc<dyn VaultCodec>) -> Self {
        Self::with_clock(kv, codec, Arc::new(SystemClock))
    }

    pub fn with_clock(
        kv: Arc<dyn KeyValueStore>,
        codec: Arc<dyn VaultCodec>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            kv,
            codec,
            clock,
            writes: Mutex::new(()),
        }
    }

    // ===== Credentials =====

    pub async fn save_credentials(&self, record: &CredentialRecord) {
        if let Err(e) = self.try_save_credentials(record).await {
            tracing::warn!(error = %e, "Failed to save credentials");
        }
    }

    pub async fn get_credentials(&self) -> Option<CredentialRecord> {
        match self.try_get_credentials().await {
            Ok(rec) => rec,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read credentials");
                None
            }
        }
    }

    pub async fn remove_credentials(&self) -> bool {
        match self.try_remove_credentials().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to remove credentials");
                false
            }
        }
    }

    pub async fn try_save_credentials(&self, record: &CredentialRecord) -> Result<(), StoreError> {
        let raw = Zeroizing::new(
            self.codec
                .encode_credentials(record)
                .map_err(StoreError::Codec)?,
        );
        let _guard = self.writes.lock().await;
        self.write(CREDENTIALS_KEY, raw).await?;
        tracing::debug!(username = %record.username, "Credentials saved");
        Ok(())
    }

    pub async fn try_get_credentials(&self) -> Result<Option<CredentialRecord>, StoreError> {
        let Some(raw) = self.read(CREDENTIALS_KEY).await? else {
            return Ok(None);
        };
        self.codec
            .decode_credentials(&raw)
            .map(Some)
            .map_err(StoreError::Codec)
    }

    pub async fn try_remove_credentials(&self) -> Result<(), StoreError> {
        let _guard = self.writes.lock().await;
        let kv = self.kv.clone();
        spawn_blocking(move || kv.remove(CREDENTIALS_KEY))
            .await?
            .map_err(StoreError::Backend)?;
        tracing::debug!("Credentials removed");
        Ok(())
    }

    // ===== Saved passwords =====

    pub async fn save_password(&self, input: impl Into<NewPassword>) {
        if let Err(e) = self.try_save_password(input).await {
            tracing::warn!(error = %e, "Failed to save password");
        }
    }

    pub async fn get_passwords(&self) -> Vec<PasswordEntry> {
        match self.try_get_passwords().await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read saved passwords");
                Vec::new()
            }
        }
    }

    /// Removes every entry whose password equals `pwd`. Deleting a password
    /// that is not stored still succeeds.
    pub async fn delete_password(&self, pwd: &str) -> bool {
        match self.try_delete_password(pwd).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to delete password");
                false
            }
        }
    }

    /// Prepends a freshly stamped entry and returns it. An unreadable list is
    /// replaced rather than preserved.
    pub async fn try_save_password(
        &self,
        input: impl Into<NewPassword>,
    ) -> Result<PasswordEntry, StoreError> {
        let input = input.into();
        let _guard = self.writes.lock().await;
        let entry = input.into_entry(self.clock.now_millis());

        let mut entries = match self.load_entries().await {
            Ok(entries) => entries,
            Err(e) if e.is_corruption() => {
                tracing::warn!(error = %e, "Discarding unreadable password list");
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(0, entry.clone());
        self.store_entries(&entries).await?;
        tracing::debug!(count = entries.len(), "Password saved");
        Ok(entry)
    }

    pub async fn try_get_passwords(&self) -> Result<Vec<PasswordEntry>, StoreError> {
        self.load_entries().await
    }

    /// Returns how many entries were removed.
    pub async fn try_delete_password(&self, pwd: &str) -> Result<usize, StoreError> {
        let _guard = self.writes.lock().await;
        let mut entries = self.load_entries().await?;
        let before = entries.len();
        entries.retain(|e| !e.matches(pwd));
        let removed = before - entries.len();
        self.store_entries(&entries).await?;
        tracing::debug!(removed, remaining = entries.len(), "Password delete applied");
        Ok(removed)
    }

    // ===== Raw access =====

    async fn load_entries(&self) -> Result<Vec<PasswordEntry>, StoreError> {
        match self.read(PASSWORDS_KEY).await? {
            None => Ok(Vec::new()),
            Some(raw) => self.codec.decode_entries(&raw).map_err(StoreError::Codec),
        }
    }

    async fn store_entries(&self, entries: &[PasswordEntry]) -> Result<(), StoreError> {
        let raw = Zeroizing::new(
            self.codec
                .encode_entries(entries)
                .map_err(StoreError::Codec)?,
        );
        self.write(PASSWORDS_KEY, raw).await
    }

    // Empty stored text counts as absent.
    async fn read(&self, key: &'static str) -> Result<Option<Zeroizing<String>>, StoreError> {
        let kv = self.kv.clone();
        let raw = spawn_blocking(move || kv.get(key))
            .await?
            .map_err(classify_read_error)?;
        Ok(raw.filter(|s| !s.is_empty()).map(Zeroizing::new))
    }

    async fn write(&self, key: &'static str, raw: Zeroizing<String>) -> Result<(), StoreError> {
        let kv = self.kv.clone();
        spawn_blocking(move || kv.set(key, raw.as_str()))
            .await?
            .map_err(StoreError::Backend)
    }
}

// Non-text bytes are damaged data, like malformed JSON.
fn classify_read_error(e: anyhow::Error) -> StoreError {
    if e.chain().any(|cause| cause.is::<UnreadableValue>()) {
        StoreError::Codec(e)
    } else {
        StoreError::Backend(e)
    }
}
