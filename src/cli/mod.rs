#![allow(clippy::module_inception)]
use crate::cli::cli::{Cli, Commands};
use crate::cli::handlers::{App, GenerateOptions};
use crate::config::app_config::Config;
use clap::Parser;

pub mod cli;
pub mod handlers;

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::create(cli.data_dir)?;
    let app = App::create(&config);

    match cli.command {
        Commands::Login { username, password } => app.handle_login(username, password).await?,
        Commands::Logout => app.handle_logout().await?,
        Commands::Whoami => app.handle_whoami().await?,
        Commands::Generate {
            length,
            no_upper,
            no_lower,
            no_digits,
            no_symbols,
            platform,
            label,
            no_save,
            copy,
        } => {
            let opts = GenerateOptions {
                length,
                no_upper,
                no_lower,
                no_digits,
                no_symbols,
                platform,
                label,
                no_save,
                copy,
            };
            app.handle_generate(opts).await?
        }
        Commands::Add {
            pwd,
            platform,
            label,
        } => app.handle_add(pwd, platform, label).await?,
        Commands::List { json } => app.handle_list(json).await?,
        Commands::Delete { pwd, yes } => app.handle_delete(&pwd, yes).await?,
        Commands::Copy { index } => app.handle_copy(index).await?,
    }

    Ok(())
}
