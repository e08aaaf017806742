use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Create `dir` if needed and restrict it to the owner on Unix.
pub fn ensure_dir_secure(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create data directory {}", dir.display()))?;
    #[cfg(unix)]
    {
        let _ = fs::set_permissions(dir, fs::Permissions::from_mode(0o700));
    }
    Ok(())
}

/// Write through a sibling temp file and rename over `path`, 0600 on Unix.
pub fn atomic_write_secure(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp_path = tmp_path_for(path);
    let written = write_then_rename(&tmp_path, path, bytes);
    if written.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    written
}

fn write_then_rename(tmp_path: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
    {
        let mut tmp = File::create(tmp_path).context("Failed to create temporary store file")?;
        #[cfg(unix)]
        {
            let _ = tmp.set_permissions(fs::Permissions::from_mode(0o600));
        }
        tmp.write_all(bytes)
            .context("Failed to write temporary store file")?;
        let _ = tmp.sync_data();
    }
    fs::rename(tmp_path, path).context("Failed to replace store file atomically")
}

fn tmp_path_for(path: &Path) -> PathBuf {
    PathBuf::from(format!("{}.tmp", path.display()))
}

pub fn backup_path(path: &Path, n: usize) -> PathBuf {
    PathBuf::from(format!("{}.{n}", path.display()))
}

/// Rotate `<file>.1 .. <file>.N` and then write atomically. `n == 0` keeps no backups.
pub fn write_with_backups_n(path: &Path, bytes: &[u8], n: usize) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir_secure(parent)?;
    }

    if n > 0 {
        let _ = fs::remove_file(backup_path(path, n));

        // Shift backups: n-1 -> n, ..., 1 -> 2
        for i in (1..n).rev() {
            let src = backup_path(path, i);
            if src.exists() {
                let _ = fs::rename(&src, backup_path(path, i + 1));
            }
        }

        // Copy rather than move so the live file never disappears
        if path.exists() {
            let first = backup_path(path, 1);
            fs::copy(path, &first).context("Failed to back up store file")?;
            #[cfg(unix)]
            {
                let _ = fs::set_permissions(&first, fs::Permissions::from_mode(0o600));
            }
        }
    }

    atomic_write_secure(path, bytes)
}
