//! Command-line interface for the `zstdr` binary.
//!
//! | Submodule | Responsibility |
//! |-----------|----------------|
//! | [`args`]  | clap definitions, `-#` level shorthand, level resolution |
//! | [`run`]   | per-file compress/decompress dispatch on a rayon pool |
//! | [`list`]  | `--list` frame tables |
//!
//! Typical call sequence: [`Cli::from_env`] → [`run::run`].

pub mod args;
pub mod list;
pub mod run;

pub use args::{normalize_args, Cli};
pub use run::{run, Job};
