//! Command-line argument definitions for the `zstdr` binary.
//!
//! Options are declared with clap's derive macros.  The one zstd-style
//! spelling clap cannot express, a bare numeric level such as `-19`, is
//! rewritten by [`normalize_args`] before parsing.

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{ArgAction, Parser};

use crate::config::{CLEVEL_ENV, DEFAULT_LEVEL};
use crate::displaylevel;
use crate::level::{CompressionLevel, LevelPolicy};
use crate::util::count_cores;

/// Compress or decompress files in the Zstandard format.
#[derive(Parser, Debug)]
#[command(name = "zstdr")]
#[command(about = "Compress or decompress files in the Zstandard format")]
#[command(version)]
pub struct Cli {
    /// Decompress instead of compress.
    #[arg(short = 'd', long = "decompress")]
    pub decompress: bool,

    /// Compression level (`-#` is accepted as shorthand).
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub level: Option<i32>,

    /// Use FILE as a dictionary for compression or decompression.
    #[arg(short = 'D', value_name = "FILE")]
    pub dictionary: Option<PathBuf>,

    /// Write to standard output.
    #[arg(short = 'c', long = "stdout")]
    pub stdout: bool,

    /// Overwrite existing outputs; allow writing to a terminal.
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Output file name (single input only).
    #[arg(short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Operate recursively on directories.
    #[arg(short = 'r')]
    pub recursive: bool,

    /// Number of files processed in parallel (0 = one per core).
    #[arg(short = 'T', long = "threads", value_name = "N", default_value_t = 1)]
    pub threads: usize,

    /// Reject negative levels, treating 0 as the default level.
    #[arg(long = "legacy-levels")]
    pub legacy_levels: bool,

    /// Stage input in fixed-size chunks before compressing.
    #[arg(long)]
    pub staged: bool,

    /// Print information about compressed files.
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Increase verbosity (repeatable).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Decrease verbosity (repeatable).
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,

    /// Input files; none or `-` means standard input.
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,
}

impl Cli {
    /// Parse the process arguments after level shorthand rewriting.
    pub fn from_env() -> Self {
        Cli::parse_from(normalize_args(std::env::args_os()))
    }

    pub fn policy(&self) -> LevelPolicy {
        if self.legacy_levels {
            LevelPolicy::Legacy
        } else {
            LevelPolicy::Modern
        }
    }

    /// Worker count with `0` resolved to the number of cores.
    pub fn worker_count(&self) -> usize {
        match self.threads {
            0 => count_cores(),
            n => n,
        }
    }

    /// Effective level: `--level`, else `ZSTD_CLEVEL`, else the default.
    pub fn resolve_level(&self) -> anyhow::Result<CompressionLevel> {
        self.resolve_level_with(std::env::var(CLEVEL_ENV).ok().as_deref())
    }

    fn resolve_level_with(&self, env: Option<&str>) -> anyhow::Result<CompressionLevel> {
        let requested = match self.level {
            Some(level) => level,
            None => env.and_then(env_level).unwrap_or(DEFAULT_LEVEL),
        };
        CompressionLevel::new(requested, self.policy())
            .with_context(|| format!("bad compression level {requested}"))
    }

    /// Check option combinations clap cannot express.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.output.is_some() && self.stdout {
            bail!("-o and -c are mutually exclusive");
        }
        if self.output.is_some() && self.files.len() > 1 {
            bail!("-o requires a single input file");
        }
        if self.list && self.decompress {
            bail!("--list cannot be combined with -d");
        }
        Ok(())
    }
}

/// Parse a `ZSTD_CLEVEL` value; invalid text is ignored with a warning.
fn env_level(value: &str) -> Option<i32> {
    match value.trim().parse::<i32>() {
        Ok(level) => Some(level),
        Err(_) => {
            displaylevel!(
                2,
                "zstdr: ignoring environment variable {}={}: not a number\n",
                CLEVEL_ENV,
                value
            );
            None
        }
    }
}

/// Rewrite `-N` level shorthand into `--level=N`.
///
/// Only arguments made entirely of a dash and digits are rewritten, and
/// nothing after a bare `--`.  The program name is left untouched.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut options_done = false;
    for (i, arg) in args.into_iter().enumerate() {
        if i == 0 || options_done {
            out.push(arg);
            continue;
        }
        if arg == "--" {
            options_done = true;
            out.push(arg);
            continue;
        }
        let level = arg
            .to_str()
            .and_then(|s| s.strip_prefix('-'))
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .map(|digits| OsString::from(format!("--level={digits}")));
        out.push(level.unwrap_or(arg));
    }
    out
}
