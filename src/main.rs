use anyhow::Result;
use clap::Parser;
use simplenote_lib::config::{load_config, load_config_from};
use simplenote_lib::logger;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Command-line client for the notes service", long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Backend base URL, overriding the configuration file
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Path to the local note cache database
    #[arg(long, value_name = "PATH")]
    database: Option<PathBuf>,

    /// Do not read or write the local note cache
    #[arg(long)]
    no_cache: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_logging(args.verbose);
    tracing::info!("simplenote starting...");

    let mut config = match &args.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    if let Some(base_url) = args.base_url {
        config.base_url = base_url.trim_end_matches('/').to_string();
    }
    if let Some(database) = args.database {
        config.database_path = Some(database);
    }
    if args.no_cache {
        config.cache_enabled = false;
    }

    let stdin = std::io::stdin();
    simplenote_lib::run(&config, stdin.lock(), std::io::stdout())?;
    Ok(())
}
