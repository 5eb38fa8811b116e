//! Binary entry point for the `zstdr` command-line tool.
//!
//! 1. [`Cli::from_env`] rewrites `-#` level shorthand and parses `argv`.
//! 2. `-v` / `-q` adjust the process-wide notification level.
//! 3. [`run`] dispatches to compress, decompress or list.

use std::process::ExitCode;

use zstdr::cli::{run, Cli};
use zstdr::display::{decrease_display_level, display_level, increase_display_level};

fn main() -> ExitCode {
    let cli = Cli::from_env();
    for _ in 0..cli.verbose {
        increase_display_level();
    }
    for _ in 0..cli.quiet {
        decrease_display_level();
    }
    zstdr::displaylevel!(
        4,
        "*** zstdr {} (libzstd {}) ***\n",
        env!("CARGO_PKG_VERSION"),
        zstdr::version_string()
    );

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if display_level() >= 1 {
                eprintln!("zstdr: {error:#}");
            }
            ExitCode::FAILURE
        }
    }
}
