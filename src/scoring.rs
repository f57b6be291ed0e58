//! Substitution scoring for the aligner.
//!
//! A [`ScoringModel`] maps an ordered pair of symbols to an integer score, or
//! fails when either symbol is outside its alphabet. Unknown pairs are never
//! scored as zero.
//!
//! [`SubstitutionMatrix`] is the concrete model: an ASCII symbol → slot index
//! plus a flat `k×k` score table, so a lookup is two array reads. Because the
//! alphabet is fixed at construction, whole sequences can be checked with
//! [`ScoringModel::validate`] before any dynamic programming starts.
//!
//! ### Example
//! ```rust
//! use nwalign::{ScoringModel, SubstitutionMatrix};
//! let m = SubstitutionMatrix::blosum62();
//! assert_eq!(m.score('W', 'W').unwrap(), 11);
//! assert!(m.score('W', ';').is_err());
//! ```
use crate::common::NwError;

/// Alphabet of the built-in BLOSUM62 table, in NCBI order.
pub const BLOSUM62_SYMBOLS: &str = "ARNDCQEGHILKMFPSTWYVBZX*";
/// Alphabet of the built-in nucleotide table.
pub const DNA_SYMBOLS: &str = "ACGT";
/// Alphabet of the default match/mismatch scheme.
pub const SIMPLE_SYMBOLS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ*";

const UNMAPPED: u8 = u8::MAX;

#[rustfmt::skip]
const BLOSUM62: [[i32; 24]; 24] = [
    //A   R   N   D   C   Q   E   G   H   I   L   K   M   F   P   S   T   W   Y   V   B   Z   X   *
    [ 4, -1, -2, -2,  0, -1, -1,  0, -2, -1, -1, -1, -1, -2, -1,  1,  0, -3, -2,  0, -2, -1,  0, -4], // A
    [-1,  5,  0, -2, -3,  1,  0, -2,  0, -3, -2,  2, -1, -3, -2, -1, -1, -3, -2, -3, -1,  0, -1, -4], // R
    [-2,  0,  6,  1, -3,  0,  0,  0,  1, -3, -3,  0, -2, -3, -2,  1,  0, -4, -2, -3,  3,  0, -1, -4], // N
    [-2, -2,  1,  6, -3,  0,  2, -1, -1, -3, -4, -1, -3, -3, -1,  0, -1, -4, -3, -3,  4,  1, -1, -4], // D
    [ 0, -3, -3, -3,  9, -3, -4, -3, -3, -1, -1, -3, -1, -2, -3, -1, -1, -2, -2, -1, -3, -3, -2, -4], // C
    [-1,  1,  0,  0, -3,  5,  2, -2,  0, -3, -2,  1,  0, -3, -1,  0, -1, -2, -1, -2,  0,  3, -1, -4], // Q
    [-1,  0,  0,  2, -4,  2,  5, -2,  0, -3, -3,  1, -2, -3, -1,  0, -1, -3, -2, -2,  1,  4, -1, -4], // E
    [ 0, -2,  0, -1, -3, -2, -2,  6, -2, -4, -4, -2, -3, -3, -2,  0, -2, -2, -3, -3, -1, -2, -1, -4], // G
    [-2,  0,  1, -1, -3,  0,  0, -2,  8, -3, -3, -1, -2, -1, -2, -1, -2, -2,  2, -3,  0,  0, -1, -4], // H
    [-1, -3, -3, -3, -1, -3, -3, -4, -3,  4,  2, -3,  1,  0, -3, -2, -1, -3, -1,  3, -3, -3, -1, -4], // I
    [-1, -2, -3, -4, -1, -2, -3, -4, -3,  2,  4, -2,  2,  0, -3, -2, -1, -2, -1,  1, -4, -3, -1, -4], // L
    [-1,  2,  0, -1, -3,  1,  1, -2, -1, -3, -2,  5, -1, -3, -1,  0, -1, -3, -2, -2,  0,  1, -1, -4], // K
    [-1, -1, -2, -3, -1,  0, -2, -3, -2,  1,  2, -1,  5,  0, -2, -1, -1, -1, -1,  1, -3, -1, -1, -4], // M
    [-2, -3, -3, -3, -2, -3, -3, -3, -1,  0,  0, -3,  0,  6, -4, -2, -2,  1,  3, -1, -3, -3, -1, -4], // F
    [-1, -2, -2, -1, -3, -1, -1, -2, -2, -3, -3, -1, -2, -4,  7, -1, -1, -4, -3, -2, -2, -1, -2, -4], // P
    [ 1, -1,  1,  0, -1,  0,  0,  0, -1, -2, -2,  0, -1, -2, -1,  4,  1, -3, -2, -2,  0,  0,  0, -4], // S
    [ 0, -1,  0, -1, -1, -1, -1, -2, -2, -1, -1, -1, -1, -2, -1,  1,  5, -2, -2,  0, -1, -1,  0, -4], // T
    [-3, -3, -4, -4, -2, -2, -3, -2, -2, -3, -2, -3, -1,  1, -4, -3, -2, 11,  2, -3, -4, -3, -2, -4], // W
    [-2, -2, -2, -3, -2, -1, -2, -3,  2, -1, -1, -2, -1,  3, -3, -2, -2,  2,  7, -1, -3, -2, -1, -4], // Y
    [ 0, -3, -3, -3, -1, -2, -2, -3, -3,  3,  1, -2,  1, -1, -2, -2,  0, -3, -1,  4, -3, -2, -1, -4], // V
    [-2, -1,  3,  4, -3,  0,  1, -1,  0, -3, -4,  0, -3, -3, -2,  0, -1, -4, -3, -3,  4,  1, -1, -4], // B
    [-1,  0,  0,  1, -3,  3,  4, -2,  0, -3, -3,  1, -1, -3, -1,  0, -1, -3, -2, -2,  1,  4, -1, -4], // Z
    [ 0, -1, -1, -1, -2, -1, -1, -1, -1, -1, -1, -1, -1, -1, -2,  0,  0, -2, -1, -1, -1, -1, -1, -4], // X
    [-4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4,  1], // *
];

/// Scores an ordered pair of symbols for the diagonal term of the recurrence.
///
/// `score(a, b)` is called with `a` from the row sequence and `b` from the
/// column sequence; it need not be symmetric.
pub trait ScoringModel {
    /// Score for aligning `a` against `b`, or [`NwError::UnknownSymbol`].
    fn score(&self, a: char, b: char) -> Result<i32, NwError>;

    /// Check that every symbol of `seq` can be scored.
    ///
    /// Models with a closed alphabet should override this so that failures
    /// surface before the aligner allocates its matrix.
    fn validate(&self, _seq: &str) -> Result<(), NwError> {
        Ok(())
    }
}

impl<T: ScoringModel + ?Sized> ScoringModel for &T {
    #[inline(always)]
    fn score(&self, a: char, b: char) -> Result<i32, NwError> {
        (**self).score(a, b)
    }

    fn validate(&self, seq: &str) -> Result<(), NwError> {
        (**self).validate(seq)
    }
}

/// A square substitution table over a fixed ASCII alphabet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubstitutionMatrix {
    name: String,
    symbols: Vec<char>,
    index: [u8; 128],
    scores: Vec<i32>,
}

impl SubstitutionMatrix {
    /// Build a matrix from an alphabet and one score row per symbol.
    ///
    /// `rows[i][j]` is the score of `symbols[i]` (row sequence) against
    /// `symbols[j]` (column sequence).
    pub fn from_rows<R: AsRef<[i32]>>(
        name: impl Into<String>,
        symbols: &[char],
        rows: &[R],
    ) -> Result<Self, NwError> {
        let name = name.into();
        if symbols.is_empty() {
            return Err(NwError::EmptyAlphabet(name));
        }
        let mut seen = [false; 128];
        for &s in symbols {
            let slot = u32::from(s) as usize;
            // Only ASCII symbols are indexable.
            if slot >= seen.len() {
                return Err(NwError::UnknownSymbol { symbol: s, matrix: name });
            }
            if seen[slot] {
                return Err(NwError::DuplicateSymbol { symbol: s, matrix: name });
            }
            seen[slot] = true;
        }
        let k = symbols.len();
        if rows.len() != k || rows.iter().any(|r| r.as_ref().len() != k) {
            let found = match rows.iter().find(|r| r.as_ref().len() != k) {
                Some(bad) if rows.len() == k => format!("a row of length {}", bad.as_ref().len()),
                _ => format!("{} rows", rows.len()),
            };
            return Err(NwError::MatrixShape { matrix: name, expected: k, found });
        }
        Ok(Self::build(name, symbols, rows))
    }

    /// Uniform scheme: `match_score` on identical symbols, `mismatch` otherwise.
    pub fn match_mismatch(
        name: impl Into<String>,
        symbols: &str,
        match_score: i32,
        mismatch: i32,
    ) -> Result<Self, NwError> {
        let symbols: Vec<char> = symbols.chars().collect();
        let rows = uniform_rows(symbols.len(), match_score, mismatch);
        Self::from_rows(name, &symbols, &rows)
    }

    /// NCBI BLOSUM62 including the ambiguity codes `B`, `Z`, `X` and stop `*`.
    pub fn blosum62() -> Self {
        let symbols: Vec<char> = BLOSUM62_SYMBOLS.chars().collect();
        Self::build("BLOSUM62".into(), &symbols, &BLOSUM62)
    }

    /// Nucleotide scoring over `ACGT`: +5 on a match, −4 on a mismatch.
    pub fn dna_full() -> Self {
        let symbols: Vec<char> = DNA_SYMBOLS.chars().collect();
        Self::build("DNAfull".into(), &symbols, &uniform_rows(symbols.len(), 5, -4))
    }

    /// The default scheme: +1 / −1 over the uppercase letters and `*`.
    pub fn simple() -> Self {
        Self::simple_scheme(1, -1)
    }

    /// The default alphabet with caller-chosen match and mismatch scores.
    pub fn simple_scheme(match_score: i32, mismatch: i32) -> Self {
        let symbols: Vec<char> = SIMPLE_SYMBOLS.chars().collect();
        let rows = uniform_rows(symbols.len(), match_score, mismatch);
        Self::build("simple".into(), &symbols, &rows)
    }

    /// Parse a matrix in the NCBI text layout (as distributed for BLOSUM/PAM).
    ///
    /// ```text
    /// # comment
    ///    A  C
    /// A  1 -1
    /// C -1  1
    /// ```
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self, NwError> {
        let mut columns: Option<Vec<char>> = None;
        let mut rows: Vec<Vec<i32>> = Vec::new();
        let mut last_line = 0;
        for (no, raw) in text.lines().enumerate() {
            let line = no + 1;
            let l = raw.trim();
            if l.is_empty() || l.starts_with('#') {
                continue;
            }
            last_line = line;
            let mut fields = l.split_whitespace();
            if columns.is_none() {
                columns = Some(fields.map(|f| symbol_field(f, line)).collect::<Result<_, _>>()?);
                continue;
            }
            let cols = columns.as_deref().unwrap_or_default();
            let Some(expected) = cols.get(rows.len()).copied() else {
                return Err(format_err(line, format!("more than {} score rows", cols.len())));
            };
            let row_sym = symbol_field(fields.next().unwrap_or_default(), line)?;
            if row_sym != expected {
                return Err(format_err(line, format!("row '{row_sym}' where '{expected}' was expected")));
            }
            let values = fields
                .map(|f| f.parse::<i32>().map_err(|_| format_err(line, format!("'{f}' is not an integer score"))))
                .collect::<Result<Vec<_>, _>>()?;
            if values.len() != cols.len() {
                return Err(format_err(line, format!("{} scores, expected {}", values.len(), cols.len())));
            }
            rows.push(values);
        }
        let cols = columns.ok_or_else(|| format_err(last_line, "no column header".into()))?;
        if rows.len() != cols.len() {
            return Err(format_err(last_line, format!("{} score rows, expected {}", rows.len(), cols.len())));
        }
        Self::from_rows(name, &cols, &rows)
    }

    /// The model with its arguments swapped: `t.score(x, y) == self.score(y, x)`.
    pub fn transposed(&self) -> Self {
        let k = self.symbols.len();
        let mut scores = vec![0; k * k];
        for i in 0..k {
            for j in 0..k {
                scores[i * k + j] = self.scores[j * k + i];
            }
        }
        Self { scores, ..self.clone() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// `true` if `c` has a row/column in this matrix.
    pub fn contains(&self, c: char) -> bool {
        self.slot(c).is_some()
    }

    fn build<R: AsRef<[i32]>>(name: String, symbols: &[char], rows: &[R]) -> Self {
        let mut index = [UNMAPPED; 128];
        for (i, &s) in symbols.iter().enumerate() {
            index[u32::from(s) as usize] = i as u8;
        }
        let scores = rows.iter().flat_map(|r| r.as_ref().iter().copied()).collect();
        Self { name, symbols: symbols.to_vec(), index, scores }
    }

    #[inline(always)]
    fn slot(&self, c: char) -> Option<usize> {
        match self.index.get(u32::from(c) as usize) {
            Some(&i) if i != UNMAPPED => Some(i as usize),
            _ => None,
        }
    }

    fn unknown(&self, symbol: char) -> NwError {
        NwError::UnknownSymbol { symbol, matrix: self.name.clone() }
    }
}

impl ScoringModel for SubstitutionMatrix {
    #[inline(always)]
    fn score(&self, a: char, b: char) -> Result<i32, NwError> {
        match (self.slot(a), self.slot(b)) {
            (Some(i), Some(j)) => Ok(self.scores[i * self.symbols.len() + j]),
            (None, _) => Err(self.unknown(a)),
            (_, None) => Err(self.unknown(b)),
        }
    }

    fn validate(&self, seq: &str) -> Result<(), NwError> {
        match seq.chars().find(|&c| !self.contains(c)) {
            Some(c) => Err(self.unknown(c)),
            None => Ok(()),
        }
    }
}

/// Built-in table selection, used by tooling that picks a model per input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatrixKind {
    /// Choose from the input alphabet with [`MatrixKind::detect`].
    Auto,
    Blosum62,
    DnaFull,
    Simple,
}

impl MatrixKind {
    /// `DnaFull` if every symbol is in `ACGT`, `Blosum62` if every symbol is
    /// in the BLOSUM62 alphabet, `Simple` otherwise.
    pub fn detect<'a>(seqs: impl IntoIterator<Item = &'a str>) -> Self {
        let (mut dna, mut protein) = (true, true);
        for c in seqs.into_iter().flat_map(str::chars) {
            dna &= DNA_SYMBOLS.contains(c);
            protein &= BLOSUM62_SYMBOLS.contains(c);
        }
        if dna {
            MatrixKind::DnaFull
        } else if protein {
            MatrixKind::Blosum62
        } else {
            MatrixKind::Simple
        }
    }

    /// Replace `Auto` with the detected kind; other kinds are returned as-is.
    pub fn resolve<'a>(self, seqs: impl IntoIterator<Item = &'a str>) -> Self {
        match self {
            MatrixKind::Auto => Self::detect(seqs),
            kind => kind,
        }
    }
}

fn uniform_rows(k: usize, match_score: i32, mismatch: i32) -> Vec<Vec<i32>> {
    (0..k)
        .map(|i| (0..k).map(|j| if i == j { match_score } else { mismatch }).collect())
        .collect()
}

fn symbol_field(field: &str, line: usize) -> Result<char, NwError> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format_err(line, format!("'{field}' is not a single symbol"))),
    }
}

fn format_err(line: usize, msg: String) -> NwError {
    NwError::MatrixFormat { line, msg }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blosum62_known_values() {
        let m = SubstitutionMatrix::blosum62();
        assert_eq!(m.score('A', 'A').unwrap(), 4);
        assert_eq!(m.score('W', 'W').unwrap(), 11);
        assert_eq!(m.score('C', 'C').unwrap(), 9);
        assert_eq!(m.score('W', 'C').unwrap(), -2);
        assert_eq!(m.score('B', 'D').unwrap(), 4);
        assert_eq!(m.score('*', '*').unwrap(), 1);
        assert_eq!(m.score('X', '*').unwrap(), -4);
    }

    #[test]
    fn blosum62_is_symmetric() {
        let m = SubstitutionMatrix::blosum62();
        assert_eq!(m, m.transposed());
    }

    #[test]
    fn dna_full_and_simple() {
        let d = SubstitutionMatrix::dna_full();
        assert_eq!(d.score('G', 'G').unwrap(), 5);
        assert_eq!(d.score('G', 'T').unwrap(), -4);
        assert!(d.score('N', 'A').is_err());

        let s = SubstitutionMatrix::simple();
        assert_eq!(s.score('Q', 'Q').unwrap(), 1);
        assert_eq!(s.score('Q', '*').unwrap(), -1);
    }

    #[test]
    fn unknown_symbols_fail() {
        let m = SubstitutionMatrix::dna_full();
        let err = m.score('A', 'u').unwrap_err();
        assert_eq!(err, NwError::UnknownSymbol { symbol: 'u', matrix: "DNAfull".into() });
        // Non-ASCII symbols are simply outside every table.
        assert!(m.score('Ä', 'A').is_err());
        assert!(m.validate("ACGT").is_ok());
        assert!(matches!(m.validate("ACGX"), Err(NwError::UnknownSymbol { symbol: 'X', .. })));
    }

    #[test]
    fn from_rows_rejects_bad_shapes() {
        let syms = ['A', 'C'];
        assert!(matches!(
            SubstitutionMatrix::from_rows("m", &syms, &[vec![1, 2]]),
            Err(NwError::MatrixShape { expected: 2, .. })
        ));
        assert!(matches!(
            SubstitutionMatrix::from_rows("m", &syms, &[vec![1, 2], vec![3]]),
            Err(NwError::MatrixShape { .. })
        ));
        assert!(matches!(
            SubstitutionMatrix::from_rows("m", &['A', 'A'], &[vec![1, 2], vec![3, 4]]),
            Err(NwError::DuplicateSymbol { symbol: 'A', .. })
        ));
        assert!(matches!(
            SubstitutionMatrix::from_rows::<Vec<i32>>("m", &[], &[]),
            Err(NwError::EmptyAlphabet(_))
        ));
    }

    #[test]
    fn asymmetric_and_transposed() {
        let m = SubstitutionMatrix::from_rows("asym", &['A', 'C'], &[[2, -3], [-1, 2]]).unwrap();
        assert_eq!(m.score('A', 'C').unwrap(), -3);
        assert_eq!(m.score('C', 'A').unwrap(), -1);
        let t = m.transposed();
        assert_eq!(t.score('A', 'C').unwrap(), -1);
        assert_eq!(t.score('C', 'A').unwrap(), -3);
    }

    #[test]
    fn parse_ncbi_layout() {
        let text = "# toy matrix\n   A  C  *\nA  2 -1 -4\nC -1  3 -4\n* -4 -4  1\n";
        let m = SubstitutionMatrix::parse("toy", text).unwrap();
        assert_eq!(m.symbols(), &['A', 'C', '*']);
        assert_eq!(m.score('C', 'C').unwrap(), 3);
        assert_eq!(m.score('*', 'A').unwrap(), -4);
        assert!(m.contains('*'));
        assert!(!m.contains('G'));
    }

    #[test]
    fn parse_errors_carry_line_numbers() {
        let bad_score = "   A  C\nA  1 x\nC  0 1\n";
        assert!(matches!(
            SubstitutionMatrix::parse("t", bad_score),
            Err(NwError::MatrixFormat { line: 2, .. })
        ));
        let short_row = "   A  C\nA  1\n";
        assert!(matches!(
            SubstitutionMatrix::parse("t", short_row),
            Err(NwError::MatrixFormat { line: 2, .. })
        ));
        let wrong_order = "   A  C\nC  1 0\nA  0 1\n";
        assert!(matches!(
            SubstitutionMatrix::parse("t", wrong_order),
            Err(NwError::MatrixFormat { line: 2, .. })
        ));
        let missing_row = "# c\n   A  C\nA  1 0\n";
        assert!(matches!(
            SubstitutionMatrix::parse("t", missing_row),
            Err(NwError::MatrixFormat { line: 3, .. })
        ));
        assert!(matches!(SubstitutionMatrix::parse("t", "# only comments\n"), Err(NwError::MatrixFormat { .. })));
    }

    #[test]
    fn detect_alphabet() {
        assert_eq!(MatrixKind::detect(["ACGT", "GGA"]), MatrixKind::DnaFull);
        assert_eq!(MatrixKind::detect(["ACGT", "PAWHE"]), MatrixKind::Blosum62);
        assert_eq!(MatrixKind::detect(["ACGU"]), MatrixKind::Simple);
        assert_eq!(MatrixKind::Blosum62.resolve(["ACGT"]), MatrixKind::Blosum62);
        assert_eq!(MatrixKind::Auto.resolve(["MKV"]), MatrixKind::Blosum62);
    }
}
