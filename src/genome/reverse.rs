use crate::genome::fasta::{read_first_record, write_single_record};
use anyhow::Result;
use bio::alphabets::dna;
use bio::io::fasta;
use std::path::Path;

/// Appended to the record id of a reverse-complemented genome.
pub const REVERSED_SUFFIX: &str = "_reversed";

/// A<->T, C<->G, N<->N (IUPAC codes and case are preserved), read backwards.
pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    dna::revcomp(seq)
}

/// Writes the reverse complement of the first record in `input` to `output`
/// under the id `<id>_reversed`, and returns the record written.
pub fn write_reversed(input: &Path, output: &Path) -> Result<fasta::Record> {
    let record = read_first_record(input)?;
    let id = format!("{}{}", record.id(), REVERSED_SUFFIX);
    let seq = reverse_complement(record.seq());

    write_single_record(output, &id, &seq)?;
    Ok(fasta::Record::with_attrs(&id, None, &seq))
}
