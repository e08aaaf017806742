use crate::config::app_config::Config;
use anyhow::{anyhow, Result};
use copypasta::{ClipboardContext, ClipboardProvider};
use secrecy::{ExposeSecret, SecretString};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub const DEFAULT_CLIPBOARD_TTL: u64 = 20;

pub trait ClipboardEngine: Send + Sync + 'static {
    fn get_contents(&self) -> Result<Option<String>>;
    fn set_contents(&self, contents: &str) -> Result<()>;
}

pub struct SystemClipboardEngine {
    ctx: Mutex<ClipboardContext>,
}

impl SystemClipboardEngine {
    pub fn new() -> Result<Self> {
        let ctx =
            ClipboardContext::new().map_err(|e| anyhow!("Failed to access clipboard: {e}"))?;
        Ok(Self {
            ctx: Mutex::new(ctx),
        })
    }
}

impl ClipboardEngine for SystemClipboardEngine {
    fn get_contents(&self) -> Result<Option<String>> {
        let mut guard = self.ctx.lock().map_err(|_| anyhow!("clipboard lock poisoned"))?;
        Ok(guard.get_contents().ok())
    }

    fn set_contents(&self, contents: &str) -> Result<()> {
        let mut guard = self.ctx.lock().map_err(|_| anyhow!("clipboard lock poisoned"))?;
        guard
            .set_contents(contents.to_string())
            .map_err(|e| anyhow!("Failed to copy to clipboard: {e}"))
    }
}

/// Put `secret` on the clipboard and restore the previous contents after `ttl`.
/// Join the returned handle to keep the process alive until the restore runs.
pub fn copy_with_ttl(
    engine: Arc<dyn ClipboardEngine>,
    secret: &SecretString,
    ttl: Duration,
) -> Result<JoinHandle<()>> {
    let previous = engine.get_contents()?;
    engine.set_contents(secret.expose_secret())?;

    let handle = thread::spawn(move || {
        thread::sleep(ttl);
        let restored = engine.set_contents(previous.as_deref().unwrap_or(""));
        if let Err(e) = restored {
            tracing::warn!(error = %e, "Failed to restore clipboard");
        }
    });

    Ok(handle)
}

pub fn ttl_seconds(config: &Config) -> u64 {
    config.clipboard_ttl.unwrap_or(DEFAULT_CLIPBOARD_TTL)
}

/// Best-effort environment warning when clipboard is likely unavailable (SSH/headless)
pub fn environment_warning() -> Option<String> {
    let is_ssh = std::env::var("SSH_CONNECTION").is_ok() || std::env::var("SSH_TTY").is_ok();
    #[cfg(all(target_family = "unix", not(target_os = "macos")))]
    let headless = std::env::var("DISPLAY").is_err() && std::env::var("WAYLAND_DISPLAY").is_err();
    #[cfg(any(not(target_family = "unix"), target_os = "macos"))]
    let headless = false;
    if is_ssh {
        return Some("Detected SSH session; clipboard may be unavailable.".to_string());
    }
    if headless {
        return Some("No DISPLAY/WAYLAND detected; clipboard may be unavailable.".to_string());
    }
    None
}
