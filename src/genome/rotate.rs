use crate::error::ReorderError;
use crate::genome::fasta::{read_first_record, write_single_record};
use anyhow::Result;
use bio::io::fasta;
use std::path::Path;

/// Rotates a circular sequence so the residue at 1-based `pos` comes first.
///
/// `pos` must lie in `[1, seq.len()]`; an empty sequence has no valid start.
pub fn rotate(seq: &[u8], pos: usize) -> Result<Vec<u8>, ReorderError> {
    if pos == 0 || pos > seq.len() {
        return Err(ReorderError::InvalidRotation {
            pos,
            len: seq.len(),
        });
    }
    let (head, tail) = seq.split_at(pos - 1);
    let mut rotated = Vec::with_capacity(seq.len());
    rotated.extend_from_slice(tail);
    rotated.extend_from_slice(head);
    Ok(rotated)
}

/// Writes the first record of `input`, rotated to start at `pos`, to
/// `output`. The record id is kept.
pub fn write_rotated(input: &Path, output: &Path, pos: usize) -> Result<fasta::Record> {
    let record = read_first_record(input)?;
    let seq = rotate(record.seq(), pos)?;

    write_single_record(output, record.id(), &seq)?;
    Ok(fasta::Record::with_attrs(record.id(), None, &seq))
}
