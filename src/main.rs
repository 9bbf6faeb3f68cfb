mod cli;
mod logging;
mod services;
mod sources;
mod types;

use clap::Parser;
use cli::Cli;

fn main() -> anyhow::Result<()> {
    // Optional; CI passes secrets through the real environment.
    // Logging is not set up yet, so a broken file is reported on stderr.
    if let Some(warning) = env_file_warning(dotenvy::dotenv()) {
        eprintln!("[profile-stats] Warning: {}", warning);
    }
    let cli = Cli::parse();
    cli.run()
}

/// A missing `.env` is normal; anything else is worth reporting
fn env_file_warning<T>(result: dotenvy::Result<T>) -> Option<String> {
    match result {
        Err(e) if !e.not_found() => Some(format!("ignoring .env: {}", e)),
        _ => None,
    }
}
