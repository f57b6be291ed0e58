//! # nwalign
//!
//! Optimal global pairwise alignment of protein or nucleotide sequences with
//! the **Needleman–Wunsch** algorithm, in the spirit of EMBOSS `needle`.
//!
//! The crate has two layers:
//!
//! - a scoring model ([`ScoringModel`], [`SubstitutionMatrix`]) mapping a pair
//!   of symbols to an integer score, failing on symbols outside its alphabet;
//! - the aligner ([`needle`]) which fills an `(n+1)×(m+1)` score/direction
//!   matrix with a linear gap penalty and traces one optimal alignment back.
//!
//! Around them sit small helpers used by the `nwalign` binary: a FASTA reader,
//! an all-vs-all driver and plain-text/TSV writers.
//!
//! ### Example
//! ```
//! use nwalign::{needle, SubstitutionMatrix};
//! let blosum = SubstitutionMatrix::blosum62();
//! let aln = needle("HEAGAWGHEE", "PAWHEAE", &blosum, -8).unwrap();
//! assert_eq!(aln.align_a.len(), aln.align_b.len());
//! assert_eq!(aln.align_a.replace('-', ""), "HEAGAWGHEE");
//! ```
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod common;
pub mod needle;
pub mod needleall;
pub mod report;
pub mod scoring;

pub use common::{parse_fasta, FastaRecord, NwError};
pub use needle::{fill_matrix, needle, Direction, DpCell, DpMatrix, GlobalAlignment, GAP};
pub use needleall::{needleall_pairs, NeedleAllResult};
pub use report::{write_alignment, write_pair_summary, DEFAULT_WIDTH};
pub use scoring::{MatrixKind, ScoringModel, SubstitutionMatrix};
