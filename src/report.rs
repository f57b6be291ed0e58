//! Plain-text rendering of alignments.
//!
//! Two rows are printed in blocks of `width` columns, blocks separated by a
//! blank line, followed by a trailing score line:
//!
//! ```text
//! seq1: AATCG
//! seq2: AA-CG
//!
//! Score: 2
//! ```
use std::io::{self, Write};

use crate::needle::GlobalAlignment;
use crate::needleall::NeedleAllResult;

/// Column width used by the command-line tool.
pub const DEFAULT_WIDTH: usize = 100;

/// Write `aln` as labelled blocks of at most `width` columns (`0` disables
/// wrapping), then `Score: N`.
pub fn write_alignment<W: Write>(
    w: &mut W,
    aln: &GlobalAlignment,
    labels: (&str, &str),
    width: usize,
) -> io::Result<()> {
    let a: Vec<char> = aln.align_a.chars().collect();
    let b: Vec<char> = aln.align_b.chars().collect();
    let pad = labels.0.chars().count().max(labels.1.chars().count());
    let width = if width == 0 { a.len().max(1) } else { width };
    for (a_block, b_block) in a.chunks(width).zip(b.chunks(width)) {
        writeln!(w, "{:<pad$}: {}", labels.0, a_block.iter().collect::<String>())?;
        writeln!(w, "{:<pad$}: {}", labels.1, b_block.iter().collect::<String>())?;
        writeln!(w)?;
    }
    writeln!(w, "Score: {}", aln.score)
}

/// Tab-separated summary with one line per pair.
pub fn write_pair_summary<W: Write>(w: W, results: &[NeedleAllResult]) -> csv::Result<()> {
    let mut out = csv::WriterBuilder::new().delimiter(b'\t').from_writer(w);
    out.write_record(["a_id", "b_id", "score", "pct_identity", "pct_gaps", "cigar"])?;
    for r in results {
        out.write_record([
            r.a_id.clone(),
            r.b_id.clone(),
            r.alignment.score.to_string(),
            format!("{:.2}", r.alignment.pct_identity()),
            format!("{:.2}", r.alignment.pct_gaps()),
            r.alignment.cigar(),
        ])?;
    }
    out.flush()?;
    Ok(())
}
