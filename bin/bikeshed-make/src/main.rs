//! bikeshed-make – entry point.
//!
//! Startup order:
//! 1. Parse the command line and configuration from environment variables.
//! 2. Initialise tracing (stderr, JSON on request).
//! 3. Convert the single source file and map the outcome to an exit code.

mod cli;
mod config;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use bikeshed_fetch::Api;
use clap::Parser;
use tracing::{debug, info};

use crate::cli::{Cli, USAGE};
use crate::config::Config;

const EXIT_REPORTED_ERRORS: u8 = 1;
const EXIT_USAGE: u8 = 2;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // ── 1. Command line + configuration ────────────────────────────────────────
    let cli = Cli::parse();
    let cfg = Config::from_env();

    // ── 2. Tracing ─────────────────────────────────────────────────────────────
    init_tracing(&cfg);

    let Some(job) = cli.job() else {
        println!("{USAGE}");
        return Ok(ExitCode::from(EXIT_USAGE));
    };

    // ── 3. Conversion ──────────────────────────────────────────────────────────
    let endpoint = cli.endpoint.clone().unwrap_or(cfg.endpoint);
    debug!(%endpoint, save_err = cli.save_err, "configured converter");

    let mut api = Api::new()
        .set_endpoint(endpoint)
        .save_err_to_txt(cli.save_err);
    if let Some(secs) = cli.timeout {
        api = api.set_timeout(Duration::from_secs(secs));
    }
    if cli.quiet {
        api = api.no_progress();
    }

    let report = api
        .converter()
        .convert(job)
        .await
        .with_context(|| format!("failed to convert {}", job.display()))?;

    info!(source = %report.source.display(), html = ?report.html, "conversion finished");

    if report.succeeded() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_REPORTED_ERRORS))
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `BIKESHED_LOG`; an unparsable filter falls back to
/// `warn` with a note on stderr.
fn init_tracing(cfg: &Config) {
    let env_filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => match cfg.log_level.parse::<tracing_subscriber::EnvFilter>() {
            Ok(f) => f,
            Err(e) => {
                eprintln!(
                    "WARN: BIKESHED_LOG='{}' is not a valid tracing filter ({}); \
                     falling back to 'warn'",
                    cfg.log_level, e
                );
                tracing_subscriber::EnvFilter::new("warn")
            }
        },
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    if cfg.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
