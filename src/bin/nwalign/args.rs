//! Options and input helpers shared by the subcommands.
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use nwalign::*;

/// Scoring options: gap penalty and substitution matrix.
#[derive(Debug, Args)]
pub struct ScoringArgs {
    /// Gap penalty per gap column (linear model; usually negative).
    #[arg(short='g', long, default_value_t=-2, allow_hyphen_values=true)]
    pub gap: i32,
    /// Substitution matrix. `auto` picks DNAfull for ACGT input, BLOSUM62 for protein input.
    #[arg(long, value_enum, default_value_t=MatrixChoice::Auto)]
    pub matrix: MatrixChoice,
    /// Matrix file in NCBI layout; overrides --matrix.
    #[arg(long, value_name="FILE")]
    pub matrix_file: Option<PathBuf>,
    /// Match score for the simple scheme.
    #[arg(long="match", default_value_t=1, allow_hyphen_values=true)]
    pub match_score: i32,
    /// Mismatch score for the simple scheme.
    #[arg(long, default_value_t=-1, allow_hyphen_values=true)]
    pub mismatch: i32,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MatrixChoice { Auto, Blosum62, DnaFull, Simple }

impl From<MatrixChoice> for MatrixKind {
    fn from(c: MatrixChoice) -> Self {
        match c {
            MatrixChoice::Auto => MatrixKind::Auto,
            MatrixChoice::Blosum62 => MatrixKind::Blosum62,
            MatrixChoice::DnaFull => MatrixKind::DnaFull,
            MatrixChoice::Simple => MatrixKind::Simple,
        }
    }
}

impl ScoringArgs {
    /// Build the substitution matrix for the given input sequences.
    pub fn model<'a>(&self, seqs: impl IntoIterator<Item = &'a str>) -> Result<SubstitutionMatrix> {
        if let Some(path) = &self.matrix_file {
            let text = fs::read_to_string(path).with_context(|| format!("open matrix: {}", path.display()))?;
            let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
            return SubstitutionMatrix::parse(name, &text).with_context(|| format!("parse matrix: {}", path.display()));
        }
        let kind = MatrixKind::from(self.matrix).resolve(seqs);
        let model = match kind {
            MatrixKind::Blosum62 => SubstitutionMatrix::blosum62(),
            MatrixKind::DnaFull => SubstitutionMatrix::dna_full(),
            MatrixKind::Simple | MatrixKind::Auto => SubstitutionMatrix::simple_scheme(self.match_score, self.mismatch),
        };
        log::info!("using {} matrix, gap {}", model.name(), self.gap);
        Ok(model)
    }
}

/// Read every record of a FASTA file.
pub fn read_fasta(path: &Path) -> Result<Vec<FastaRecord>> {
    let text = fs::read_to_string(path).with_context(|| format!("open FASTA: {}", path.display()))?;
    let recs = parse_fasta(&text);
    if recs.is_empty() { anyhow::bail!("no FASTA records in {}", path.display()); }
    Ok(recs)
}
