//! Common helpers shared by the aligner and its tooling: the crate error type
//! and a minimal FASTA reader.
//!
//! ## FASTA
//! The parser is intentionally permissive. It supports multi-record inputs,
//! drops whitespace inside sequence lines and uppercases symbols. It does not
//! judge the alphabet; unknown symbols are rejected later by the scoring model.
//!
//! ## Examples
//! ```rust
//! use nwalign::parse_fasta;
//! let recs = parse_fasta(">seq\nACGT\n>p\nPAWHEAE\n");
//! assert_eq!(recs.len(), 2);
//! assert_eq!(recs[0].seq, "ACGT");
//! ```

/// Errors that can be returned by the scoring models and the aligner.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NwError {
    /// A symbol has no row/column in the scoring model.
    #[error("symbol '{symbol}' is not in the {matrix} alphabet")]
    UnknownSymbol { symbol: char, matrix: String },
    /// A substitution matrix was declared with no symbols.
    #[error("substitution matrix {0} has an empty alphabet")]
    EmptyAlphabet(String),
    /// The same symbol appears twice in a matrix alphabet.
    #[error("symbol '{symbol}' appears more than once in the {matrix} alphabet")]
    DuplicateSymbol { symbol: char, matrix: String },
    /// Score rows do not form a square table over the alphabet.
    #[error("substitution matrix {matrix} must be {expected}x{expected}, found {found}")]
    MatrixShape { matrix: String, expected: usize, found: String },
    /// A matrix file could not be parsed.
    #[error("matrix format error at line {line}: {msg}")]
    MatrixFormat { line: usize, msg: String },
    /// Returned when sequence input is empty or otherwise unusable.
    #[error("invalid sequence input: {0}")]
    InvalidSequence(&'static str),
}

/// A simple in-memory FASTA record parsed by [`parse_fasta`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FastaRecord {
    /// Identifier from the FASTA header (first word after '>').
    pub id: String,
    /// Sequence symbols, uppercased. Anything non-whitespace is kept as-is.
    pub seq: String,
}

impl FastaRecord {
    pub fn new(id: impl Into<String>, seq: impl Into<String>) -> Self {
        Self { id: id.into(), seq: seq.into() }
    }
}

/// Parse FASTA text into a vector of [`FastaRecord`].
///
/// *Lines starting with `>` start a new record.* All other lines are appended
/// (without whitespace) to the current sequence. Text before the first header
/// is ignored. A header with an empty sequence yields a record with an empty
/// `seq`.
pub fn parse_fasta(text: &str) -> Vec<FastaRecord> {
    let mut out: Vec<FastaRecord> = vec![];
    let mut current: Option<FastaRecord> = None;
    for line in text.lines() {
        if let Some(rest) = line.strip_prefix('>') {
            if let Some(rec) = current.take() {
                out.push(rec);
            }
            let id = rest.split_whitespace().next().unwrap_or("");
            current = Some(FastaRecord::new(id, String::new()));
        } else if let Some(rec) = current.as_mut() {
            rec.seq.extend(
                line.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| c.to_ascii_uppercase()),
            );
        }
    }
    out.extend(current);
    out
}
