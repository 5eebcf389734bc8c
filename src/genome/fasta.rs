use crate::error::ReorderError;
use anyhow::{Context, Result};
use bio::io::fasta;
use log::warn;
use std::path::Path;

/// Reads the first record of a FASTA file.
///
/// Genomes are handled one record per file. When a file carries more records,
/// the rest are ignored and a warning is logged.
pub fn read_first_record(path: &Path) -> Result<fasta::Record> {
    let reader = fasta::Reader::from_file(path)
        .with_context(|| format!("Failed to open FASTA file {}", path.display()))?;
    let mut records = reader.records();

    let first = records
        .next()
        .ok_or_else(|| ReorderError::EmptyInput(path.to_path_buf()))?
        .with_context(|| format!("Failed to parse FASTA file {}", path.display()))?;

    if records.next().is_some() {
        warn!(
            "{} contains more than one record; only '{}' is used",
            path.display(),
            first.id()
        );
    }
    Ok(first)
}

/// Id of the first record, without the multi-record warning.
pub fn first_record_id(path: &Path) -> Result<String> {
    let reader = fasta::Reader::from_file(path)
        .with_context(|| format!("Failed to open FASTA file {}", path.display()))?;
    let first = reader
        .records()
        .next()
        .ok_or_else(|| ReorderError::EmptyInput(path.to_path_buf()))?
        .with_context(|| format!("Failed to parse FASTA file {}", path.display()))?;
    Ok(first.id().to_string())
}

/// Writes a single-record FASTA file: `>id` header and one
/// unwrapped sequence line.
pub fn write_single_record(path: &Path, id: &str, seq: &[u8]) -> Result<()> {
    let mut writer = fasta::Writer::to_file(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    writer
        .write(id, None, seq)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
