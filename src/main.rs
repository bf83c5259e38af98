mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    init_tracing(args.verbose);

    let result = match &args.command {
        Some(Commands::Version) => cli::commands::version::execute(),
        None => cli::commands::lookup::execute(&args.lookup, args.config.as_deref()),
    };

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr so stdout carries only the table.
/// `RUST_LOG` overrides the level chosen by `--verbose`.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "cloudtrail_cli=debug"
    } else {
        "cloudtrail_cli=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
