use crate::config::app_config::Config;
use crate::cryptography::generator::{
    clamp_length, estimate_bits, strength_label, DefaultPasswordGenerator,
};
use crate::filesystem::clipboard::{
    copy_with_ttl, environment_warning, ttl_seconds, ClipboardEngine, SystemClipboardEngine,
};
use crate::filesystem::store::FileKeyValueStore;
use crate::vault::codec::JsonCodec;
use crate::vault::models::{CredentialRecord, NewPassword, PasswordEntry};
use crate::vault::ports::{CharsetOptions, KeyValueStore, PasswordGenerator, VaultCodec};
use crate::vault::service::PasswordStore;
use anyhow::{anyhow, bail, Context, Result};
use inquire::{Confirm, Password, Text};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::spawn_blocking;

pub struct GenerateOptions {
    pub length: Option<u32>,
    pub no_upper: bool,
    pub no_lower: bool,
    pub no_digits: bool,
    pub no_symbols: bool,
    pub platform: Option<String>,
    pub label: Option<String>,
    pub no_save: bool,
    pub copy: bool,
}

/// Command handlers: input validation and confirmation live here, storage
/// and generation are delegated to the core components.
pub struct App<'a> {
    config: &'a Config,
    store: Arc<PasswordStore>,
    generator: Arc<dyn PasswordGenerator>,
}

impl<'a> App<'a> {
    pub fn create(config: &'a Config) -> Self {
        let backups = config.backups.unwrap_or(2);
        let kv: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::new_with_backups(
            config.data_dir.clone(),
            backups,
        ));
        let codec: Arc<dyn VaultCodec> = Arc::new(JsonCodec);
        let store = Arc::new(PasswordStore::new(kv, codec));
        let generator: Arc<dyn PasswordGenerator> = Arc::new(DefaultPasswordGenerator::default());
        App {
            config,
            store,
            generator,
        }
    }

    pub async fn handle_login(&self, username: Option<String>, password: Option<String>) -> Result<()> {
        let username = match username {
            Some(u) => u,
            None => Text::new("Username").prompt()?,
        };
        let password = match password {
            Some(p) => p,
            None => Password::new("Password").without_confirmation().prompt()?,
        };
        if username.trim().is_empty() || password.trim().is_empty() {
            bail!("username and password are required");
        }
        self.store
            .try_save_credentials(&CredentialRecord::new(username.clone(), password))
            .await
            .context("Failed to save login")?;
        println!("✅ Logged in as {username}");
        Ok(())
    }

    pub async fn handle_logout(&self) -> Result<()> {
        if !self.store.remove_credentials().await {
            bail!("logout failed");
        }
        println!("👋 Logged out");
        Ok(())
    }

    pub async fn handle_whoami(&self) -> Result<()> {
        match self.store.get_credentials().await {
            Some(rec) => println!("{}", rec.username),
            None => println!("Not logged in"),
        }
        Ok(())
    }

    pub async fn handle_generate(&self, opts: GenerateOptions) -> Result<()> {
        let length = clamp_length(opts.length.or(self.config.generator_length));
        let symbols_default = self.config.generator_symbols.unwrap_or(true);
        let charset = CharsetOptions {
            include_uppercase: !opts.no_upper,
            include_lowercase: !opts.no_lower,
            include_digits: !opts.no_digits,
            include_symbols: symbols_default && !opts.no_symbols,
        };

        let generator = self.generator.clone();
        let generated = spawn_blocking(move || generator.generate(length, &charset))
            .await
            .map_err(|_| anyhow!("task join error"))??;

        let bits = estimate_bits(length, &charset);
        eprintln!(
            "🔒 Generated password strength: {} (~{:.1} bits)",
            strength_label(bits),
            bits
        );
        println!("{generated}");

        if !opts.no_save {
            self.store
                .try_save_password(NewPassword::with_metadata(
                    generated.clone(),
                    opts.platform,
                    opts.label,
                ))
                .await
                .context("Generated password was not saved")?;
            eprintln!("✅ Saved");
        }

        if opts.copy {
            self.copy_to_clipboard(SecretString::new(generated.into())).await?;
        }
        Ok(())
    }

    pub async fn handle_add(
        &self,
        pwd: String,
        platform: Option<String>,
        label: Option<String>,
    ) -> Result<()> {
        if pwd.trim().is_empty() {
            bail!("password must not be empty");
        }
        self.store
            .try_save_password(NewPassword::with_metadata(pwd, platform, label))
            .await
            .context("Failed to save password")?;
        println!("✅ Saved");
        Ok(())
    }

    pub async fn handle_list(&self, json: bool) -> Result<()> {
        let entries = self.store.get_passwords().await;
        if json {
            println!("{}", serde_json::to_string_pretty(&entries)?);
            return Ok(());
        }
        if entries.is_empty() {
            println!("No saved passwords.");
            return Ok(());
        }
        for (i, entry) in entries.iter().enumerate() {
            println!("{:>3}. {}", i + 1, describe(entry));
        }
        Ok(())
    }

    pub async fn handle_delete(&self, pwd: &str, yes: bool) -> Result<()> {
        if !yes {
            let confirmed = Confirm::new("Delete this password?")
                .with_default(false)
                .prompt()?;
            if !confirmed {
                println!("Cancelled.");
                return Ok(());
            }
        }
        if !self.store.delete_password(pwd).await {
            bail!("delete failed");
        }
        println!("🗑️ Deleted");
        Ok(())
    }

    pub async fn handle_copy(&self, index: usize) -> Result<()> {
        let entries = self.store.get_passwords().await;
        let entry = index
            .checked_sub(1)
            .and_then(|i| entries.get(i))
            .ok_or_else(|| anyhow!("no saved password at position {index}"))?;
        self.copy_to_clipboard(entry.pwd.clone()).await
    }

    async fn copy_to_clipboard(&self, secret: SecretString) -> Result<()> {
        if let Some(warn) = environment_warning() {
            eprintln!("⚠️ {warn}");
        }
        let engine: Arc<dyn ClipboardEngine> = Arc::new(SystemClipboardEngine::new()?);
        let ttl = ttl_seconds(self.config);
        let handle = copy_with_ttl(engine, &secret, Duration::from_secs(ttl))?;
        eprintln!("📋 Copied. Clipboard restores in {ttl}s.");
        // Clipboard ownership ends with the process on some platforms
        spawn_blocking(move || handle.join())
            .await
            .map_err(|_| anyhow!("task join error"))?
            .map_err(|_| anyhow!("clipboard restore thread panicked"))?;
        Ok(())
    }
}

fn describe(entry: &PasswordEntry) -> String {
    let mut line = entry.pwd.expose_secret().to_string();
    if let Some(platform) = &entry.platform {
        line.push_str(&format!("  [{platform}]"));
    }
    if let Some(label) = &entry.label {
        line.push_str(&format!("  ({label})"));
    }
    if let Some(ts) = chrono::DateTime::from_timestamp_millis(entry.created_at) {
        line.push_str(&format!("  {}", ts.format("%Y-%m-%d %H:%M")));
    }
    line
}
