use genome_reorder::alignment::{Aligner, BlastnAligner, HitSink};
use genome_reorder::types::Orientation;
use std::fs;
use tempfile::tempdir;

// Needs BLAST+ on PATH.
// Run with:
//   cargo test --test blastn_alignment -- --ignored --nocapture

const REFERENCE: &str = "GATCACAGGTCTATCACCCTATTAACCACTCACGGGAGCTCTCCATGCATTTGGTATTTTCGTCTGGGGGGTATGCACGCGATAGCATTGCGAGACGCTGGAGCCGGAGCACCCTATGTCGCAGTATCTGTCTTTGATTCCTGCCTCATCCTATTATTTATCGCACCTACGTTCAATATTACAGGCGAACATACTTACTAAAGTGTGTTAATTAATTAATGCTTGTAGGACATAATAATAACAATTGAATGTCTGCACAGCCACTTTCCACACAGACATCATAACAAAAAATTTCCACCAAACCCCCCCTCCCCCGCTTCTGGCCACAGCACTTAAACACATCTCTGCCAAACCCCAAAAACAAAGAACCCTAACACCAGCCTAACCAGATTTCAAATTTTATCTTTTGGCGGTATGCACTTTTAACAGTCACCCCCCAACTAACACATTATTTTCCCCTCCCACTCCCATACTACTAATCTCATCAATACAACCCCCGCCCATCCTACCCAGCACACACACACCGCTGCTAACCCCATACCCCGAACCAACCAAACCCCAAAGACACCCCCCACAGTTTATGTAGCTTACC";

#[test]
#[ignore]
fn blastn_reports_rotation_offset() {
    let dir = tempdir().unwrap();
    let reference = dir.path().join("reference.fasta");
    let genome = dir.path().join("rotated genome.fasta");
    let results = dir.path().join("hits.tsv");

    // Same circle, starting 200 bases in.
    let rotated = format!("{}{}", &REFERENCE[199..], &REFERENCE[..199]);
    fs::write(&reference, format!(">ref\n{}\n", REFERENCE)).unwrap();
    fs::write(&genome, format!(">rotated\n{}\n", rotated)).unwrap();

    let sink = HitSink::new(&results);
    let mut aligner = BlastnAligner::new("blastn");
    aligner.align(&reference, &genome, &sink).expect("blastn run");

    let hits = sink.read_hits(0, sink.end_offset().unwrap()).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].subject_id, "rotated");
    assert_eq!(hits[0].orientation(), Orientation::Forward);
}
