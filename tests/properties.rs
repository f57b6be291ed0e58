//! Invariants of the global aligner over generated sequences.
use nwalign::{needle, ScoringModel, SubstitutionMatrix, GAP};
use proptest::prelude::*;

fn dna(max_len: usize) -> impl Strategy<Value = String> {
    proptest::string::string_regex(&format!("[ACGT]{{0,{max_len}}}")).unwrap()
}

fn protein(max_len: usize) -> impl Strategy<Value = String> {
    proptest::string::string_regex(&format!("[ARNDCQEGHILKMFPSTWYV]{{0,{max_len}}}")).unwrap()
}

fn degap(s: &str) -> String {
    s.chars().filter(|&c| c != GAP).collect()
}

proptest! {
    #[test]
    fn rows_have_equal_length_and_no_gap_columns(a in dna(40), b in dna(40), gap in -8i32..=0) {
        let aln = needle(&a, &b, &SubstitutionMatrix::dna_full(), gap).unwrap();
        prop_assert_eq!(aln.align_a.chars().count(), aln.align_b.chars().count());
        prop_assert!(aln.align_a.chars().zip(aln.align_b.chars()).all(|(x, y)| !(x == GAP && y == GAP)));
        prop_assert!(aln.len() >= a.len().max(b.len()));
        prop_assert!(aln.len() <= a.len() + b.len());
    }

    #[test]
    fn removing_gaps_restores_inputs(a in protein(30), b in protein(30), gap in -12i32..=-1) {
        let aln = needle(&a, &b, &SubstitutionMatrix::blosum62(), gap).unwrap();
        prop_assert_eq!(degap(&aln.align_a), a);
        prop_assert_eq!(degap(&aln.align_b), b);
    }

    #[test]
    fn score_matches_the_returned_columns(a in protein(30), b in protein(30), gap in -12i32..=-1) {
        let m = SubstitutionMatrix::blosum62();
        let aln = needle(&a, &b, &m, gap).unwrap();
        let rescored: i64 = aln.align_a.chars().zip(aln.align_b.chars())
            .map(|(x, y)| if x == GAP || y == GAP { i64::from(gap) } else { i64::from(m.score(x, y).unwrap()) })
            .sum();
        prop_assert_eq!(rescored, aln.score);
    }

    #[test]
    fn swapping_inputs_with_transposed_model_keeps_score(
        a in dna(30),
        b in dna(30),
        table in proptest::collection::vec(-6i32..=6, 16),
        gap in -6i32..=0,
    ) {
        let rows: Vec<&[i32]> = table.chunks(4).collect();
        let m = SubstitutionMatrix::from_rows("random", &['A', 'C', 'G', 'T'], &rows).unwrap();
        let forward = needle(&a, &b, &m, gap).unwrap();
        let backward = needle(&b, &a, &m.transposed(), gap).unwrap();
        prop_assert_eq!(forward.score, backward.score);
    }

    #[test]
    fn empty_partner_gives_all_gaps(a in dna(50), gap in -10i32..=0) {
        let aln = needle(&a, "", &SubstitutionMatrix::dna_full(), gap).unwrap();
        prop_assert_eq!(&aln.align_a, &a);
        prop_assert_eq!(aln.align_b, GAP.to_string().repeat(a.len()));
        prop_assert_eq!(aln.score, a.len() as i64 * i64::from(gap));
    }

    #[test]
    fn self_alignment_is_identity(a in dna(60), gap in -10i32..=0) {
        let aln = needle(&a, &a, &SubstitutionMatrix::dna_full(), gap).unwrap();
        prop_assert_eq!(&aln.align_a, &a);
        prop_assert_eq!(&aln.align_b, &a);
        prop_assert_eq!(aln.score, 5 * a.len() as i64);
    }
}

#[test]
fn two_thousand_symbols_each() {
    let a: String = "MKTAYIAKQRQISFVKSHFSRQLEERLGLIEVQAPILSRVGDGTQDNLSGAEKAVQVKVKALPDAQFEVVHSLAKWKRQTLGQHDFSAGEGLYTHMKALRPDEDRLSPLHSVYVDQWDWERVMGDGERQFSTLKSTVEAIWAGIKATEAAVSEEFGLAPFLPDQIHFVHSQELLSRYPDLDAKGRERAIAKDLGAVFLVGIGGKLSDGHRHDVRAPDYDDWSTPSELGHAGLNGDILVWNPVLEDAFELSSMGIRVDADTLKHQLALTGDEDRLELEWHQALLRGEMPQTIGGGIGQSRLTMLLLQLPHIGQVQAGVWPAACRERVPALAQQ"
        .chars()
        .cycle()
        .take(2000)
        .collect();
    let b: String = a.chars().rev().collect();
    let aln = needle(&a, &b, &SubstitutionMatrix::blosum62(), -4).unwrap();
    assert_eq!(degap(&aln.align_a), a);
    assert_eq!(degap(&aln.align_b), b);
}
