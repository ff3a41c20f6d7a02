//! `datagen` entry point.

use std::io::{self, BufWriter};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod error;
mod run;

fn main() -> ExitCode {
    let args = args::Args::parse();

    // Logs go to stderr so stdout stays a clean stream of JSON lines.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr);
    if args.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match run::run(&args, &mut out) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "generation failed");
            eprintln!("datagen: {e}");
            ExitCode::FAILURE
        }
    }
}
