use clap::Parser;

/// Reorder circular genomes to start where they align to a reference
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Genome FASTA files, space separated, passed as a single argument
    pub input_files: String,

    /// Reference FASTA file (used as the BLAST query)
    pub reference: String,

    /// Tabular BLAST output file; hits are appended and never cleared
    pub blast_output: String,

    /// Only orient genomes: re-alignments of reversed genomes are appended
    /// to the results file but not used to rotate them in this run
    #[arg(long)]
    pub single_pass: bool,

    /// blastn executable (overrides config and GENOME_REORDER_BLASTN)
    #[arg(long)]
    pub blastn: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
