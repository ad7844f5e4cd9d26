//! todo - personal task tracker CLI
//!
//! Keeps a per-directory task list and a per-user task list as JSON files and
//! lets you add, remove, search, and list them.

use clap::Parser;
use todo::cli::{normalize_args, Cli};
use todo::output::emit_error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    // Tracing is opt-in via RUST_LOG and always goes to stderr.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() || raw.len() > 4096 {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    let options = cli.output_options();
    let command = cli.action().name();
    // Handled failures are reported, not turned into an exit code.
    if let Err(err) = cli.run() {
        let _ = emit_error(options, command, &err, &[]);
    }
}
