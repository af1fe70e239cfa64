//! Entry point for the cleaner
use anyhow::Context;
use augment_cleaner::cleaner::Cleaner;
use augment_cleaner::common::{install_logger, APP_NAME};
use augment_cleaner::config::CleanerConfig;
use augment_cleaner::platform::Platform;
use augment_cleaner::process::SystemProcessControl;
use augment_cleaner::targets::Environment;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
    /// Override the config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

fn run(args: Args) -> anyhow::Result<()> {
    log::info!("Starting {}, version: {}", APP_NAME, env!("CARGO_PKG_VERSION"));
    let config = CleanerConfig::load(args.config).context("Unable to load config file")?;
    let platform = Platform::current();
    let env = Environment::detect(platform)?;
    let mut cleaner = Cleaner::new(platform, env, config, Box::new(SystemProcessControl));
    cleaner
        .run_cleanup(std::io::stdin().lock())
        .context("Unable to read confirmation")?;
    Ok(())
}

fn main() {
    let args: Args = Args::parse();

    // Setup logging
    if let Err(e) = install_logger(args.debug) {
        eprintln!("Unable to install logger: {:#}", e);
        std::process::exit(1);
    }
    // Run the application logic
    if let Err(e) = run(args) {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}
