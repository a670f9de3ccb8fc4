use std::path::{Path, PathBuf};

use clap::Parser;

/// Printed when the command line does not name exactly one source file.
pub const USAGE: &str = "Usage: bikeshed-make file.bs";

/// Render a Bikeshed source through the CSSWG web service.
#[derive(Debug, Parser)]
#[command(name = "bikeshed-make", version, about)]
pub struct Cli {
    /// Bikeshed source file; exactly one is accepted.
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Also write a non-empty error report to `<name>.txt`.
    #[arg(long)]
    pub save_err: bool,

    /// Conversion endpoint (overrides BIKESHED_ENDPOINT).
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Per-request timeout in seconds; unset waits indefinitely.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Do not print build results.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// The single source to convert, or `None` if zero or several were given.
    pub fn job(&self) -> Option<&Path> {
        match self.files.as_slice() {
            [file] => Some(file.as_path()),
            _ => None,
        }
    }
}
