use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// FASTA file with one or more sequences (takes precedence over --sequence)
    #[arg(short, long)]
    pub fasta_file: Option<PathBuf>,

    /// A single raw amino acid sequence
    #[arg(short, long)]
    pub sequence: Option<String>,

    /// Where to write the CSV report (stdout if not given)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of peptides sent to the classifier per call (will over-write the config file)
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Address of the model server (will over-write the config file)
    #[arg(short = 'a', long)]
    pub classifier_address: Option<String>,

    /// Use a classifier that scores everything as 0, to check inputs without a model
    #[arg(long)]
    pub dry_run: bool,
}
