use crate::alignment::hit::{parse_hits, AlignmentHit};
use crate::config::Config;
use crate::error::ReorderError;
use anyhow::{Context, Result};
use log::debug;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Append-only results file for one batch run.
///
/// Every alignment writes into the same file and nothing truncates it, so a
/// path reused across runs still holds the hits of earlier runs. Callers
/// that need "hits since X" take a byte offset with [`HitSink::end_offset`] and read
/// from it later with [`HitSink::read_hits`].
#[derive(Debug)]
pub struct HitSink {
    path: PathBuf,
}

impl HitSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn open_append(&self) -> Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open results file {}", self.path.display()))
    }

    /// Byte offset of the end of the file; 0 when nothing has been written yet.
    pub fn end_offset(&self) -> Result<u64> {
        match fs::metadata(&self.path) {
            Ok(metadata) => Ok(metadata.len()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to stat results file {}", self.path.display())),
        }
    }

    /// Parses the hits stored between byte offsets `from` and `to`.
    pub fn read_hits(&self, from: u64, to: u64) -> Result<Vec<AlignmentHit>> {
        if to <= from {
            return Ok(Vec::new());
        }
        let bytes = fs::read(&self.path)
            .with_context(|| format!("Failed to read results file {}", self.path.display()))?;
        let end = (to as usize).min(bytes.len());
        let start = (from as usize).min(end);

        let first_line = bytes[..start].iter().filter(|&&b| b == b'\n').count() + 1;
        let chunk = String::from_utf8_lossy(&bytes[start..end]);
        parse_hits(&chunk, first_line)
            .with_context(|| format!("Failed to parse results file {}", self.path.display()))
    }
}

/// Pairwise aligner seam. Implementations append zero or more tabular hit
/// lines for `query` against `subject` to `sink`.
pub trait Aligner {
    fn align(&mut self, query: &Path, subject: &Path, sink: &HitSink) -> Result<()>;
}

/// Runs NCBI blastn as a child process. Arguments are passed as a list, never
/// through a shell, so paths with spaces or metacharacters are safe.
#[derive(Debug, Clone)]
pub struct BlastnAligner {
    program: String,
    max_target_seqs: u32,
    max_hsps: u32,
    extra_args: Vec<String>,
}

impl BlastnAligner {
    pub fn new(program: impl Into<String>) -> Self {
        Self::from_config(&Config {
            blastn_path: program.into(),
            ..Config::default()
        })
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            program: config.blastn_path.clone(),
            max_target_seqs: config.max_target_seqs,
            max_hsps: config.max_hsps,
            extra_args: config.extra_blastn_args.clone(),
        }
    }

    pub fn args(&self, query: &Path, subject: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-query".into(),
            query.as_os_str().to_owned(),
            "-subject".into(),
            subject.as_os_str().to_owned(),
            "-max_target_seqs".into(),
            self.max_target_seqs.to_string().into(),
            "-max_hsps".into(),
            self.max_hsps.to_string().into(),
            "-outfmt".into(),
            "6".into(),
        ];
        args.extend(self.extra_args.iter().map(OsString::from));
        args
    }
}

impl Aligner for BlastnAligner {
    fn align(&mut self, query: &Path, subject: &Path, sink: &HitSink) -> Result<()> {
        let out = sink.open_append()?;
        debug!(
            "{} -query {} -subject {} >> {}",
            self.program,
            query.display(),
            subject.display(),
            sink.path().display()
        );

        let output = Command::new(&self.program)
            .args(self.args(query, subject))
            .stdin(Stdio::null())
            .stdout(Stdio::from(out))
            .stderr(Stdio::piped())
            .output()
            .with_context(|| {
                format!(
                    "Failed to run {}. Please install BLAST+ (https://blast.ncbi.nlm.nih.gov/) and ensure it's in your PATH",
                    self.program
                )
            })?;

        if !output.status.success() {
            return Err(ReorderError::AlignerFailed {
                program: self.program.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }
            .into());
        }
        Ok(())
    }
}
