//! catalog-complete
//!
//! Tab completion for large command-line tools from a lazily loaded
//! command catalog.
//!
//! # Usage
//!
//! ```bash
//! # One-shot completion, as called from a shell hook
//! catalog-complete complete -- "az vm cr"
//!
//! # Describe a command
//! catalog-complete describe -- az vm create
//!
//! # Interactive mode
//! catalog-complete repl
//! ```

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use catalog_complete::Result;
use catalog_complete::cli::CliInterface;

/// Application entry point
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Parse command-line arguments and load configuration
/// 2. Initialize logging
/// 3. Run the selected subcommand
fn run() -> Result<()> {
    let cli = CliInterface::new()?;
    initialize_logging(&cli)?;
    cli.run()
}

/// Initialize logging from the effective configuration
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to the
/// configured file, or to stderr so stdout stays reserved for output.
fn initialize_logging(cli: &CliInterface) -> Result<()> {
    let logging = &cli.config().logging;
    let level = logging.level.to_tracing_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match &logging.file_path {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let builder = builder.with_ansi(false).with_writer(Mutex::new(file));
            if logging.timestamps {
                builder.init();
            } else {
                builder.without_time().init();
            }
        }
        None => {
            let builder = builder.with_writer(std::io::stderr);
            if logging.timestamps {
                builder.init();
            } else {
                builder.without_time().init();
            }
        }
    }
    Ok(())
}
