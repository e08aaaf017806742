use passkeep::cli::run;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // RUST_LOG=passkeep=debug for verbose output; passwords are never logged.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("passkeep=warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("❌ Error: {e}");
        std::process::exit(1);
    }
}
