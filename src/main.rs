//! mpick - look up model names against the known-model catalog.

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use modelpick::{fuzzy_match_models, SettingsRegistry, StaticCatalog};

/// Mpick - model lookup for AI coding assistants
#[derive(Parser, Debug)]
#[command(name = "mpick")]
#[command(version, about, long_about = None)]
struct Args {
    /// Model name to look up
    model_name: String,

    /// Enable debug logging (equivalent to RUST_LOG=debug)
    #[arg(short = 'd', long)]
    debug: bool,

    /// Enable verbose logging (equivalent to RUST_LOG=trace)
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            err.print()?;
            std::process::exit(1);
        }
    };

    let default_level = if args.verbose {
        "trace"
    } else if args.debug {
        "debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut catalog = StaticCatalog::builtin();
    if let Ok(config_dir) = SettingsRegistry::config_dir() {
        let path = config_dir.join("catalog.json");
        if path.exists() {
            catalog.load_file(&path)?;
        }
    }

    let matches = fuzzy_match_models(&args.model_name, &catalog);
    if matches.is_empty() {
        println!("No matching models found for '{}'.", args.model_name);
    } else {
        println!("Matching models for '{}':", args.model_name);
        for name in &matches {
            println!("{name}");
        }
    }

    Ok(())
}
