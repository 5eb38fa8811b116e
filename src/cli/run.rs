//! Operation dispatch for the `zstdr` binary.
//!
//! Resolves the level and dictionary once, then compresses or decompresses
//! each input.  Several inputs run on a rayon pool sized by `-T`; output
//! to stdout (`-c`) is always sequential so frames are not interleaved.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use rayon::prelude::*;

use crate::cli::args::Cli;
use crate::cli::list::list_files;
use crate::config::{CompressionConfig, DecompressionConfig, EncodeStrategy};
use crate::dict::{CompressionDictionary, DecompressionDictionary};
use crate::displaylevel;
use crate::stream::{copy_decode, copy_encode};
use crate::util::{compressed_name, copy_file_stat, decompressed_name, expand_inputs};

/// Name that stands for standard input or output.
pub const STDIO_MARK: &str = "-";

/// Everything a single file operation needs, shared by all workers.
#[derive(Debug, Clone)]
pub struct Job {
    pub decompress: bool,
    pub compression: CompressionConfig,
    pub decompression: DecompressionConfig,
    pub force: bool,
    pub output: Option<PathBuf>,
}

impl Job {
    /// Build the job from parsed arguments.  The dictionary file is read
    /// and digested here, once, for the direction in use.
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let level = cli.resolve_level()?;
        let strategy = if cli.staged {
            EncodeStrategy::Staged
        } else {
            EncodeStrategy::Direct
        };
        let mut compression = CompressionConfig::new()
            .with_level(level.get())
            .with_policy(cli.policy())
            .with_strategy(strategy);
        let mut decompression = DecompressionConfig::new();

        if let Some(path) = &cli.dictionary {
            let bytes = fs::read(path)
                .with_context(|| format!("cannot read dictionary {}", path.display()))?;
            if cli.decompress {
                let dict = DecompressionDictionary::new(&bytes)
                    .with_context(|| format!("bad dictionary {}", path.display()))?;
                decompression = decompression.with_dictionary(Arc::new(dict));
            } else {
                let dict = CompressionDictionary::new(&bytes, level)
                    .with_context(|| format!("bad dictionary {}", path.display()))?;
                displaylevel!(4, "zstdr: dictionary {} (id {})\n", path.display(), dict.id());
                compression = compression.with_dictionary(Arc::new(dict));
            }
        }

        Ok(Job {
            decompress: cli.decompress,
            compression,
            decompression,
            force: cli.force,
            output: cli.output.clone(),
        })
    }

    /// Stream `src` into `dst` in the job's direction.  Returns the bytes
    /// read and written.
    pub fn transcode<R: Read, W: Write>(&self, src: R, dst: W) -> anyhow::Result<(u64, u64)> {
        let mut counted = CountingWriter { inner: dst, count: 0 };
        if self.decompress {
            let mut counted_src = CountingReader { inner: src, count: 0 };
            copy_decode(&mut counted_src, &mut counted, &self.decompression)?;
            counted.flush()?;
            Ok((counted_src.count, counted.count))
        } else {
            let (read, mut counted) = copy_encode(src, counted, &self.compression)?;
            counted.flush()?;
            Ok((read, counted.count))
        }
    }

    /// Output path for `src` when writing to files.
    fn destination(&self, src: &Path) -> anyhow::Result<PathBuf> {
        if let Some(out) = &self.output {
            return Ok(out.clone());
        }
        if self.decompress {
            decompressed_name(src)
                .ok_or_else(|| anyhow!("{}: unknown suffix -- ignored", src.display()))
        } else {
            Ok(compressed_name(src))
        }
    }

    /// Process one file into its derived output file.
    pub fn process_file(&self, src: &Path) -> anyhow::Result<()> {
        let dst = self.destination(src)?;
        self.check_overwrite(&dst)?;
        let input = File::open(src).with_context(|| format!("cannot open {}", src.display()))?;
        let (read, written) = self.transcode_into_file(BufReader::new(input), src, &dst)?;

        if let Err(e) = copy_file_stat(src, &dst) {
            displaylevel!(2, "zstdr: {}: cannot copy file status: {}\n", dst.display(), e);
        }
        report(src, &dst, self.decompress, read, written);
        Ok(())
    }

    /// Process `src` (named `name` in messages) into the file `dst`.
    pub fn process_reader<R: Read>(&self, src: R, name: &Path, dst: &Path) -> anyhow::Result<()> {
        self.check_overwrite(dst)?;
        let (read, written) = self.transcode_into_file(src, name, dst)?;
        report(name, dst, self.decompress, read, written);
        Ok(())
    }

    fn check_overwrite(&self, dst: &Path) -> anyhow::Result<()> {
        if dst.exists() && !self.force {
            bail!("{} already exists; not overwritten (use -f)", dst.display());
        }
        Ok(())
    }

    /// Create `dst` and transcode into it.  A failed transcode removes `dst`.
    fn transcode_into_file<R: Read>(
        &self,
        src: R,
        name: &Path,
        dst: &Path,
    ) -> anyhow::Result<(u64, u64)> {
        let output =
            File::create(dst).with_context(|| format!("cannot create {}", dst.display()))?;
        self.transcode(src, BufWriter::new(output)).map_err(|e| {
            let _ = fs::remove_file(dst);
            e.context(format!("{}", name.display()))
        })
    }

    /// Process one file onto an already open shared writer.
    fn process_to<W: Write>(&self, src: &Path, dst: &mut W) -> anyhow::Result<()> {
        let (read, written) = if src == Path::new(STDIO_MARK) {
            self.transcode(io::stdin().lock(), dst)?
        } else {
            let input =
                File::open(src).with_context(|| format!("cannot open {}", src.display()))?;
            self.transcode(BufReader::new(input), dst)?
        };
        report(src, Path::new("stdout"), self.decompress, read, written);
        Ok(())
    }
}

fn report(src: &Path, dst: &Path, decompress: bool, read: u64, written: u64) {
    if decompress {
        displaylevel!(2, "{:<20}: {} bytes\n", src.display(), written);
    } else {
        let ratio = if read == 0 { 0.0 } else { written as f64 * 100.0 / read as f64 };
        displaylevel!(
            2,
            "{:<20}:{:>6.2}%   ({} => {} bytes, {})\n",
            src.display(),
            ratio,
            read,
            written,
            dst.display()
        );
    }
}

/// Run the command described by `cli`.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    cli.validate()?;
    if cli.list {
        let inputs = expand_inputs(&cli.files, cli.recursive)?;
        if inputs.is_empty() {
            bail!("--list needs at least one file");
        }
        return list_files(&inputs);
    }

    let job = Job::from_cli(&cli)?;
    let stdio = cli.files.is_empty() || cli.files.iter().all(|f| f == Path::new(STDIO_MARK));
    if stdio && io::stdin().is_terminal() && !cli.force {
        bail!("refusing to read from a terminal (use -f)");
    }

    if stdio && job.output.is_none() {
        let stdout = io::stdout();
        if stdout.is_terminal() && !cli.force {
            bail!("refusing to write to a terminal (use -f)");
        }
        return job.process_to(Path::new(STDIO_MARK), &mut stdout.lock());
    }

    let inputs = if stdio {
        vec![PathBuf::from(STDIO_MARK)]
    } else {
        expand_inputs(&cli.files, cli.recursive)?
    };
    if job.output.is_some() && inputs.len() > 1 {
        bail!("-o requires a single input file");
    }

    if cli.stdout {
        let stdout = io::stdout();
        if stdout.is_terminal() && !cli.force {
            bail!("refusing to write to a terminal (use -f)");
        }
        let mut out = stdout.lock();
        for input in &inputs {
            job.process_to(input, &mut out)?;
        }
        return Ok(());
    }

    if let [input] = inputs.as_slice() {
        if input == Path::new(STDIO_MARK) {
            let dst = job.output.as_ref().ok_or_else(|| anyhow!("no output for stdin"))?;
            return job.process_reader(io::stdin().lock(), Path::new("stdin"), dst);
        }
    }

    process_all(&job, &inputs, cli.worker_count())
}

/// Process every input on a pool of `workers` threads.  All files are
/// attempted; the first failures are reported and the run fails if any did.
pub fn process_all(job: &Job, inputs: &[PathBuf], workers: usize) -> anyhow::Result<()> {
    if let [src] = inputs {
        return job.process_file(src);
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .build()
        .context("cannot start worker threads")?;
    displaylevel!(4, "zstdr: {} file(s) on {} thread(s)\n", inputs.len(), workers);

    let failures = pool.install(|| {
        inputs
            .par_iter()
            .filter_map(|src| job.process_file(src).err())
            .inspect(|e| displaylevel!(1, "zstdr: {:#}\n", e))
            .count()
    });
    if failures > 0 {
        bail!("{failures} of {} files failed", inputs.len());
    }
    Ok(())
}

struct CountingWriter<W> {
    inner: W,
    count: u64,
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

struct CountingReader<R> {
    inner: R,
    count: u64,
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.count += n as u64;
        Ok(n)
    }
}
