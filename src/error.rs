use std::path::PathBuf;
use thiserror::Error;

/// Failures specific to reordering. Everything else (I/O, FASTA parsing)
/// travels as a plain `anyhow::Error` with context attached.
#[derive(Debug, Error)]
pub enum ReorderError {
    #[error("rotation start {pos} is outside the sequence (valid range 1..={len})")]
    InvalidRotation { pos: usize, len: usize },

    #[error("no FASTA record found in {}", .0.display())]
    EmptyInput(PathBuf),

    #[error("{program} {}", exit_detail(.code, .stderr))]
    AlignerFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    /// `line` is 1-based.
    #[error("malformed hit on line {line}: {reason}")]
    MalformedHit { line: usize, reason: String },

    #[error("subject '{0}' matches no input record and is not a readable file")]
    UnknownSubject(String),

    /// Two inputs whose first records share an id; hits could not tell them apart.
    #[error("record id '{id}' appears in both {} and {}", .first.display(), .second.display())]
    DuplicateSubject {
        id: String,
        first: PathBuf,
        second: PathBuf,
    },
}

fn exit_detail(code: &Option<i32>, stderr: &str) -> String {
    let status = match code {
        Some(code) => format!("exited with status {}", code),
        None => "was terminated by a signal".to_string(),
    };
    match stderr.trim() {
        "" => status,
        stderr => format!("{}: {}", status, stderr),
    }
}
