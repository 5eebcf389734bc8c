use crate::alignment::{Aligner, AlignmentHit, BlastnAligner, HitSink};
use crate::config::Config;
use crate::error::ReorderError;
use crate::genome::fasta::first_record_id;
use crate::genome::{write_reversed, write_rotated, REVERSED_SUFFIX};
use crate::types::Orientation;
use crate::utils::external_tools::check_blastn;
use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::{bail, Result};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

const REVERSED_FILE_SUFFIX: &str = "_reversed.fasta";
const REORDERED_FILE_SUFFIX: &str = "_reordered.fasta";

#[derive(Debug, Clone)]
pub struct ReorderOptions {
    pub inputs: Vec<PathBuf>,
    pub reference: PathBuf,
    pub results: PathBuf,
    /// Rotate reversed genomes using their re-alignment hits in the same run.
    pub two_pass: bool,
}

impl ReorderOptions {
    /// `input_files` is the whitespace-separated list given on the command line.
    pub fn new(
        input_files: &str,
        reference: impl Into<PathBuf>,
        results: impl Into<PathBuf>,
        two_pass: bool,
    ) -> Result<Self> {
        let inputs: Vec<PathBuf> = input_files.split_whitespace().map(PathBuf::from).collect();
        if inputs.is_empty() {
            bail!("No input files given");
        }
        Ok(Self {
            inputs,
            reference: reference.into(),
            results: results.into(),
            two_pass,
        })
    }
}

#[derive(Debug, Default)]
pub struct RunSummary {
    /// blastn invocations, initial and re-alignments.
    pub alignments: usize,
    pub reversed: Vec<PathBuf>,
    pub reordered: Vec<PathBuf>,
    /// Hits that were deliberately not acted on.
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    /// Hits present once every input has been aligned.
    Orient,
    /// Hits appended by re-aligning the genomes reversed in `Orient`.
    Rotate,
}

/// Maps the subject ids blastn reports (FASTA record ids) back to files.
#[derive(Debug, Default)]
struct SubjectIndex {
    by_id: HashMap<String, PathBuf>,
}

impl SubjectIndex {
    /// Registers an input genome, and the reversed file it would produce, so
    /// hits for either resolve even when they come from an earlier run.
    ///
    /// Fails when either id is already taken by another input: blastn hits
    /// carry only the id, so the two genomes could not be told apart.
    fn register_input(&mut self, id: &str, path: &Path) -> Result<(), ReorderError> {
        let reversed_id = format!("{}{}", id, REVERSED_SUFFIX);
        for taken in [id, reversed_id.as_str()] {
            if let Some(first) = self.by_id.get(taken) {
                return Err(ReorderError::DuplicateSubject {
                    id: taken.to_string(),
                    first: first.clone(),
                    second: path.to_path_buf(),
                });
            }
        }

        self.by_id.insert(id.to_string(), path.to_path_buf());
        self.by_id
            .insert(reversed_id, with_suffix(path, REVERSED_FILE_SUFFIX));
        Ok(())
    }

    fn register(&mut self, id: &str, path: &Path) {
        self.by_id.insert(id.to_string(), path.to_path_buf());
    }

    /// Falls back to treating the id as a path, for genomes whose record id
    /// is their file name.
    fn resolve(&self, id: &str) -> Result<PathBuf, ReorderError> {
        if let Some(path) = self.by_id.get(id) {
            return Ok(path.clone());
        }
        let path = Path::new(id);
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        Err(ReorderError::UnknownSubject(id.to_string()))
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

struct Reorderer<'a, A: Aligner + ?Sized> {
    aligner: &'a mut A,
    sink: HitSink,
    reference: &'a Path,
    subjects: SubjectIndex,
    summary: RunSummary,
}

impl<A: Aligner + ?Sized> Reorderer<'_, A> {
    fn align(&mut self, subject: &Path) -> Result<()> {
        debug!(
            "aligning {} against {}",
            subject.display(),
            self.reference.display()
        );
        self.aligner.align(self.reference, subject, &self.sink)?;
        self.summary.alignments += 1;
        Ok(())
    }

    fn dispatch_range(&mut self, from: u64, to: u64, pass: Pass) -> Result<()> {
        let hits = self.sink.read_hits(from, to)?;
        debug!("{:?} pass: {} hit(s)", pass, hits.len());
        for hit in &hits {
            self.dispatch(hit, pass)?;
        }
        Ok(())
    }

    fn dispatch(&mut self, hit: &AlignmentHit, pass: Pass) -> Result<()> {
        debug!(
            "{} vs {}: {}..{} ({})",
            hit.query_id,
            hit.subject_id,
            hit.subject_start,
            hit.subject_end,
            hit.orientation()
        );
        match (hit.orientation(), pass) {
            (Orientation::Degenerate, _) => {
                warn!(
                    "Skipping hit for '{}': subject start and end are both {}",
                    hit.subject_id, hit.subject_start
                );
                self.summary.skipped += 1;
            }
            (Orientation::Reverse, Pass::Rotate) => {
                warn!(
                    "Skipping hit for '{}': still on the reverse strand after reversal ({}..{})",
                    hit.subject_id, hit.subject_start, hit.subject_end
                );
                self.summary.skipped += 1;
            }
            (Orientation::Reverse, Pass::Orient) => {
                let subject = self.subjects.resolve(&hit.subject_id)?;
                let output = with_suffix(&subject, REVERSED_FILE_SUFFIX);
                let record = write_reversed(&subject, &output)?;
                info!(
                    "{} aligns on the reverse strand; wrote {}",
                    subject.display(),
                    output.display()
                );

                self.subjects.register(record.id(), &output);
                self.summary.reversed.push(output.clone());
                self.align(&output)?;
            }
            (Orientation::Forward, _) => {
                let subject = self.subjects.resolve(&hit.subject_id)?;
                let output = with_suffix(&subject, REORDERED_FILE_SUFFIX);
                write_rotated(&subject, &output, hit.subject_start)?;
                info!(
                    "Rotated {} to start at {}; wrote {}",
                    subject.display(),
                    hit.subject_start,
                    output.display()
                );
                self.summary.reordered.push(output);
            }
        }
        Ok(())
    }
}

/// Aligns every input against the reference, then orients and rotates each
/// genome from the hits in the results file.
///
/// Every input is aligned before any hit is read. The orient pass covers all
/// hits in the results file at that point, including hits left by earlier
/// runs against the same path. Reversed genomes are re-aligned, and with
/// `two_pass` the hits those re-alignments appended are dispatched once more
/// so the reversed genomes get rotated too. There is no third pass.
pub fn reorder_genomes<A: Aligner + ?Sized>(
    options: &ReorderOptions,
    aligner: &mut A,
) -> Result<RunSummary> {
    let mut subjects = SubjectIndex::default();
    for input in &options.inputs {
        let id = first_record_id(input)?;
        subjects.register_input(&id, input)?;
    }

    let mut reorderer = Reorderer {
        aligner,
        sink: HitSink::new(&options.results),
        reference: &options.reference,
        subjects,
        summary: RunSummary::default(),
    };

    let progress =
        ProgressBarBuilder::counted(options.inputs.len() as u64, "Aligning genomes...").build()?;
    for input in &options.inputs {
        progress.set_message(format!("Aligning {}", input.display()));
        reorderer.align(input)?;
        progress.inc(1);
    }
    progress.finish_with_message(format!(
        "Aligned {} genome(s) against {}",
        options.inputs.len(),
        options.reference.display()
    ));

    let progress = ProgressBarBuilder::spinner("Orienting genomes...")
        .ticking(Duration::from_millis(200))
        .build()?;
    let orient_end = reorderer.sink.end_offset()?;
    reorderer.dispatch_range(0, orient_end, Pass::Orient)?;

    let realigned_end = reorderer.sink.end_offset()?;
    if options.two_pass {
        progress.set_message("Rotating reversed genomes...");
        reorderer.dispatch_range(orient_end, realigned_end, Pass::Rotate)?;
    } else if realigned_end > orient_end {
        info!(
            "Re-alignment hits for reversed genomes were appended to {}; run again to rotate them",
            options.results.display()
        );
    }
    progress.finish_with_message("Genomes reordered");

    Ok(reorderer.summary)
}

pub fn run(
    input_files: String,
    reference: String,
    blast_output: String,
    single_pass: bool,
    blastn: Option<String>,
) -> Result<()> {
    let options = ReorderOptions::new(&input_files, reference, blast_output, !single_pass)?;

    let mut config = Config::load();
    if let Some(program) = blastn {
        config.blastn_path = program;
    }
    check_blastn(&config.blastn_path)?;

    let mut aligner = BlastnAligner::from_config(&config);
    let summary = reorder_genomes(&options, &mut aligner)?;

    println!("\nReordering Summary:");
    println!("Alignments run: {}", summary.alignments);
    println!("Genomes reversed: {}", summary.reversed.len());
    for path in &summary.reversed {
        println!("  {}", path.display());
    }
    println!("Genomes reordered: {}", summary.reordered.len());
    for path in &summary.reordered {
        println!("  {}", path.display());
    }
    println!("Hits skipped: {}", summary.skipped);
    println!("Alignment hits: {}", options.results.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn input_list_is_whitespace_separated() {
        let options = ReorderOptions::new(" a.fa\tb.fa  c.fa ", "ref.fa", "hits.tsv", true).unwrap();
        assert_eq!(
            options.inputs,
            vec![PathBuf::from("a.fa"), PathBuf::from("b.fa"), PathBuf::from("c.fa")]
        );
    }

    #[test]
    fn empty_input_list_is_rejected() {
        assert!(ReorderOptions::new("   ", "ref.fa", "hits.tsv", true).is_err());
    }

    #[test]
    fn suffix_is_appended_to_the_full_path() {
        assert_eq!(
            with_suffix(Path::new("data/g1.fasta"), REORDERED_FILE_SUFFIX),
            PathBuf::from("data/g1.fasta_reordered.fasta")
        );
    }

    #[test]
    fn subjects_resolve_by_id_then_path() {
        let dir = tempdir().unwrap();
        let genome = dir.path().join("g1.fasta");
        fs::write(&genome, ">g1\nACGT\n").unwrap();

        let mut index = SubjectIndex::default();
        index.register_input("g1", &genome).unwrap();

        assert_eq!(index.resolve("g1").unwrap(), genome);
        assert_eq!(
            index.resolve("g1_reversed").unwrap(),
            dir.path().join("g1.fasta_reversed.fasta")
        );

        let by_path = genome.to_str().unwrap();
        assert_eq!(index.resolve(by_path).unwrap(), genome);

        assert!(matches!(
            index.resolve("nowhere"),
            Err(ReorderError::UnknownSubject(_))
        ));
    }

    #[test]
    fn colliding_ids_are_rejected() {
        let mut index = SubjectIndex::default();
        index.register_input("contig_1", Path::new("a.fasta")).unwrap();

        match index.register_input("contig_1", Path::new("b.fasta")) {
            Err(ReorderError::DuplicateSubject { id, first, second }) => {
                assert_eq!(id, "contig_1");
                assert_eq!(first, PathBuf::from("a.fasta"));
                assert_eq!(second, PathBuf::from("b.fasta"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(index.resolve("contig_1").unwrap(), PathBuf::from("a.fasta"));

        // An input literally named like another's reversed record collides too.
        match index.register_input("contig_1_reversed", Path::new("c.fasta")) {
            Err(ReorderError::DuplicateSubject { id, .. }) => assert_eq!(id, "contig_1_reversed"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
