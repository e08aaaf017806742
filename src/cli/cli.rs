use clap::{Parser, Subcommand};
use std::path::PathBuf;

const PASSKEEP_LONG_VERSION: &str = concat!(
"version: ", env!("CARGO_PKG_VERSION"), "\n",
"git sha: ", env!("PASSKEEP_GIT_SHA"), "\n",
"build time (UTC): ", env!("PASSKEEP_BUILD_TIME"), "\n",
"target: ", env!("PASSKEEP_TARGET")
);

#[derive(Parser)]
#[command(
    name = "passkeep",
    version = env!("CARGO_PKG_VERSION"),
    long_version = PASSKEEP_LONG_VERSION,
    about = " 🔑 Passkeep — local password keeper"
)]
pub struct Cli {
    /// Data directory override (also PASSKEEP_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Remember a username/password pair on this device
    Login {
        #[arg(long)]
        username: Option<String>,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the remembered login
    Logout,
    /// Show the remembered username
    Whoami,
    /// Generate a random password and save it
    Generate {
        /// Length, clamped to 6..=64 (default 16)
        #[arg(long)]
        length: Option<u32>,
        /// Disable uppercase letters
        #[arg(long)]
        no_upper: bool,
        /// Disable lowercase letters
        #[arg(long)]
        no_lower: bool,
        /// Disable digits
        #[arg(long)]
        no_digits: bool,
        /// Disable symbols
        #[arg(long)]
        no_symbols: bool,
        /// Platform the password is for (e.g. example.com)
        #[arg(long)]
        platform: Option<String>,
        /// Free-form label or username
        #[arg(long)]
        label: Option<String>,
        /// Print only; do not save
        #[arg(long)]
        no_save: bool,
        /// Also copy to the clipboard
        #[arg(long)]
        copy: bool,
    },
    /// Save a password you already have
    Add {
        pwd: String,
        #[arg(long)]
        platform: Option<String>,
        #[arg(long)]
        label: Option<String>,
    },
    /// List saved passwords, newest first
    List {
        /// Output the stored JSON array
        #[arg(long)]
        json: bool,
    },
    /// Delete every saved entry with this password
    Delete {
        pwd: String,
        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },
    /// Copy a saved password (1-based position in `list`) to the clipboard
    Copy { index: usize },
}
