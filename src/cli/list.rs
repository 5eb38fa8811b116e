//! `--list`: print frame information for compressed files.
//!
//! At the default verbosity one summary row is printed per file; from `-v`
//! on, each frame gets its own row before the summary.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context};

use crate::display::display_level;
use crate::displaylevel;
use crate::frame::{scan_frames, ContentSize, FrameKind, ScanReport};

/// Format a byte count with a binary prefix, e.g. `"3.14 MiB"`.
pub fn to_human(size: u64) -> String {
    const UNITS: [&str; 7] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];
    let mut value = size as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{size} B")
    } else {
        format!("{value:.2} {}", UNITS[unit])
    }
}

fn ratio(report: &ScanReport) -> Option<f64> {
    match report.content_size() {
        ContentSize::Known(n) if report.compressed_size() > 0 => {
            Some(n as f64 / report.compressed_size() as f64)
        }
        _ => None,
    }
}

/// One summary row for `name`.
pub fn summary_row(report: &ScanReport, name: &str) -> String {
    let uncompressed = match report.content_size() {
        ContentSize::Known(n) => to_human(n),
        ContentSize::Unknown => "-".to_owned(),
    };
    let ratio = ratio(report).map_or_else(|| "-".to_owned(), |r| format!("{r:.3}"));
    let check = if report.all_checksummed() { "XXH64" } else { "None" };
    format!(
        "{:>7} {:>7} {:>12} {:>12} {:>7} {:>6}  {}",
        report.zstd_frames(),
        report.skippable_frames(),
        to_human(report.compressed_size()),
        uncompressed,
        ratio,
        check,
        name
    )
}

fn print_frames(report: &ScanReport) {
    println!(
        "    {:>6} {:>10} {:>10} {:>14} {:>14} {:>8}",
        "Frame", "Type", "DictID", "Compressed", "Uncompressed", "Checksum"
    );
    for (i, frame) in report.frames.iter().enumerate() {
        let h = &frame.header;
        let kind = match h.kind {
            FrameKind::Zstd => "Zstd",
            FrameKind::Skippable { .. } => "Skippable",
        };
        let content = match (h.kind, h.content_size) {
            (FrameKind::Skippable { .. }, _) | (_, ContentSize::Unknown) => "-".to_owned(),
            (_, ContentSize::Known(n)) => n.to_string(),
        };
        println!(
            "    {:>6} {:>10} {:>10} {:>14} {:>14} {:>8}",
            i + 1,
            kind,
            h.dict_id,
            frame.compressed_size,
            content,
            if h.checksum { "XXH64" } else { "-" }
        );
    }
}

/// Print frame information for every file in `paths`.
///
/// Every file is attempted; the run fails if any could not be read or
/// parsed.
pub fn list_files<P: AsRef<Path>>(paths: &[P]) -> anyhow::Result<()> {
    let verbose = display_level() >= 3;
    if !verbose {
        println!(
            "{:>7} {:>7} {:>12} {:>12} {:>7} {:>6}  {}",
            "Frames", "Skips", "Compressed", "Uncompressed", "Ratio", "Check", "Filename"
        );
    }

    let mut failed = 0;
    for path in paths {
        let path = path.as_ref();
        match list_one(path, verbose) {
            Ok(()) => {}
            Err(e) => {
                displaylevel!(1, "zstdr: {:#}\n", e);
                failed += 1;
            }
        }
    }
    if failed > 0 {
        bail!("{failed} file(s) could not be listed");
    }
    Ok(())
}

fn list_one(path: &Path, verbose: bool) -> anyhow::Result<()> {
    let data = fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    let report =
        scan_frames(&data).with_context(|| format!("{}: not a valid zstd file", path.display()))?;
    let name = path.display().to_string();
    if verbose {
        println!("{name}");
        print_frames(&report);
        println!();
    }
    println!("{}", summary_row(&report, &name));
    Ok(())
}
