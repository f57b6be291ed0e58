//! Many-to-many global alignments (EMBOSS `needleall`).
//!
//! This module runs [`needle`](crate::needle::needle) across **all pairs** of
//! two FASTA sets. Pairs are independent: each alignment owns its matrix and
//! only the read-only scoring model is shared, so pairs run on the rayon pool.
//!
//! ### Examples
//! ```rust
//! use nwalign::{parse_fasta, needleall_pairs, SubstitutionMatrix};
//! let a = parse_fasta(">a1\nACGT\n>a2\nACGA\n");
//! let b = parse_fasta(">b1\nACGG\n");
//! let results = needleall_pairs(&a, &b, &SubstitutionMatrix::dna_full(), -10).unwrap();
//! assert_eq!(results.len(), a.len() * b.len());
//! ```
use rayon::prelude::*;

use crate::common::{FastaRecord, NwError};
use crate::needle::{needle, GlobalAlignment};
use crate::scoring::ScoringModel;

/// A single pairwise result from [`needleall_pairs`].
#[derive(Clone, Debug)]
pub struct NeedleAllResult {
    /// Query (left) record ID.
    pub a_id: String,
    /// Subject (right) record ID.
    pub b_id: String,
    pub alignment: GlobalAlignment,
}

/// Align every `a` in `left` against every `b` in `right`.
///
/// Results come back in row-major order (for each `a`, all `b`) regardless of
/// the order the pool finished them in. The first scoring failure is returned
/// and no results are.
pub fn needleall_pairs<M>(
    left: &[FastaRecord],
    right: &[FastaRecord],
    model: &M,
    gap: i32,
) -> Result<Vec<NeedleAllResult>, NwError>
where
    M: ScoringModel + Sync + ?Sized,
{
    if left.is_empty() || right.is_empty() {
        return Err(NwError::InvalidSequence("empty input set"));
    }
    log::info!("needleall: {} x {} pairs", left.len(), right.len());
    left.par_iter()
        .flat_map_iter(|a| right.iter().map(move |b| (a, b)))
        .map(|(a, b)| {
            let alignment = needle(&a.seq, &b.seq, model, gap)?;
            Ok(NeedleAllResult { a_id: a.id.clone(), b_id: b.id.clone(), alignment })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::SubstitutionMatrix;

    #[test]
    fn row_major_order_and_scores() {
        let left = vec![FastaRecord::new("a1", "AATCG"), FastaRecord::new("a2", "ACGT")];
        let right = vec![FastaRecord::new("b1", "AACG"), FastaRecord::new("b2", "")];
        let m = SubstitutionMatrix::simple();
        let res = needleall_pairs(&left, &right, &m, -2).unwrap();
        let ids: Vec<(&str, &str)> = res.iter().map(|r| (r.a_id.as_str(), r.b_id.as_str())).collect();
        assert_eq!(ids, [("a1", "b1"), ("a1", "b2"), ("a2", "b1"), ("a2", "b2")]);
        assert_eq!(res[0].alignment.score, 2);
        assert_eq!(res[1].alignment.score, -10);
        assert_eq!(res[3].alignment.align_b, "----");
    }

    #[test]
    fn empty_set_is_rejected() {
        let m = SubstitutionMatrix::simple();
        let one = [FastaRecord::new("x", "A")];
        assert_eq!(
            needleall_pairs(&[], &one, &m, -1).unwrap_err(),
            NwError::InvalidSequence("empty input set")
        );
    }

    #[test]
    fn one_bad_pair_fails_the_batch() {
        let m = SubstitutionMatrix::dna_full();
        let left = [FastaRecord::new("ok", "ACGT"), FastaRecord::new("bad", "ACGU")];
        let right = [FastaRecord::new("r", "ACGT")];
        assert!(matches!(
            needleall_pairs(&left, &right, &m, -1),
            Err(NwError::UnknownSymbol { symbol: 'U', .. })
        ));
    }
}
