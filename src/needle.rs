//! Needleman–Wunsch global alignment with a linear gap penalty (EMBOSS `needle`).
//!
//! The row sequence `a` (length `n`) indexes matrix rows and the column
//! sequence `b` (length `m`) indexes columns. Every cell stores the best score
//! for the two prefixes ending there and which neighbour produced it:
//!
//! ```text
//! D(0,0) = 0
//! D(i,0) = i * gap                      (from top)
//! D(0,j) = j * gap                      (from left)
//! D(i,j) = max( D(i-1,j-1) + S(a_i, b_j),    diagonal
//!               D(i,j-1)   + gap,            left
//!               D(i-1,j)   + gap )           top
//! ```
//!
//! Ties go to the diagonal, then to left, then to top: a later candidate only
//! replaces the current best on strict improvement. Among several optimal
//! alignments this decides which one is returned.
//!
//! ### Example
//! ```rust
//! use nwalign::{needle, SubstitutionMatrix};
//! let m = SubstitutionMatrix::simple();
//! let aln = needle("AATCG", "AACG", &m, -2).unwrap();
//! assert_eq!(aln.align_a, "AATCG");
//! assert_eq!(aln.align_b, "AA-CG");
//! assert_eq!(aln.score, 2);
//! ```
use crate::common::NwError;
use crate::scoring::ScoringModel;

/// Gap marker used in aligned output.
pub const GAP: char = '-';

/// Which neighbour a cell's score was taken from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// Origin cell only.
    #[default]
    None,
    /// From `(i-1, j-1)`: both symbols aligned.
    Diagonal,
    /// From `(i-1, j)`: row symbol against a gap.
    Top,
    /// From `(i, j-1)`: gap against a column symbol.
    Left,
}

/// One entry of the dynamic-programming matrix.
///
/// Distances are `i64` so that sums of `i32` scores and gap penalties along a
/// path cannot overflow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DpCell {
    pub distance: i64,
    pub direction: Direction,
}

/// `(n+1) × (m+1)` score/direction matrix stored row-major in one allocation.
#[derive(Clone, Debug)]
pub struct DpMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<DpCell>,
}

impl DpMatrix {
    /// Allocate the matrix and initialise row 0 and column 0.
    fn with_boundary(rows: usize, cols: usize, gap: i32) -> Self {
        let mut cells = vec![DpCell::default(); rows * cols];
        let gap = i64::from(gap);
        for j in 1..cols {
            cells[j] = DpCell { distance: gap * j as i64, direction: Direction::Left };
        }
        for i in 1..rows {
            cells[i * cols] = DpCell { distance: gap * i as i64, direction: Direction::Top };
        }
        Self { rows, cols, cells }
    }

    /// Number of rows, `len(a) + 1`.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns, `len(b) + 1`.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell for prefixes `a[..i]` and `b[..j]`, or `None` when out of range.
    pub fn get(&self, i: usize, j: usize) -> Option<&DpCell> {
        (i < self.rows && j < self.cols).then(|| &self.cells[i * self.cols + j])
    }

    /// Like [`DpMatrix::get`] but panics when `(i, j)` is outside the matrix.
    pub fn cell(&self, i: usize, j: usize) -> &DpCell {
        match self.get(i, j) {
            Some(cell) => cell,
            None => panic!("cell ({i}, {j}) outside {}x{} matrix", self.rows, self.cols),
        }
    }

    /// Optimal global score, the distance of the final cell.
    pub fn score(&self) -> i64 {
        self.cells[self.cells.len() - 1].distance
    }

    /// Walk directions from `(n, m)` back to the origin and build the aligned rows.
    ///
    /// `a` and `b` must be the symbols this matrix was filled from.
    pub fn traceback(&self, a: &[char], b: &[char]) -> GlobalAlignment {
        debug_assert_eq!((a.len() + 1, b.len() + 1), (self.rows, self.cols));
        let (mut i, mut j) = (a.len(), b.len());
        let mut a_aln: Vec<char> = Vec::with_capacity(i + j);
        let mut b_aln: Vec<char> = Vec::with_capacity(i + j);
        // Columns are collected end-to-start and reversed once at the end.
        loop {
            match self.cells[i * self.cols + j].direction {
                Direction::None => break,
                Direction::Diagonal => {
                    a_aln.push(a[i - 1]);
                    b_aln.push(b[j - 1]);
                    i -= 1;
                    j -= 1;
                }
                Direction::Top => {
                    a_aln.push(a[i - 1]);
                    b_aln.push(GAP);
                    i -= 1;
                }
                Direction::Left => {
                    a_aln.push(GAP);
                    b_aln.push(b[j - 1]);
                    j -= 1;
                }
            }
        }
        GlobalAlignment {
            score: self.score(),
            align_a: a_aln.into_iter().rev().collect(),
            align_b: b_aln.into_iter().rev().collect(),
        }
    }
}

/// Fill the whole matrix for `a` (rows) against `b` (columns).
///
/// The fill is iterative and row-major; each cell only reads its top, left
/// and diagonal neighbours, which are already final. A scoring failure aborts
/// the fill and the partial matrix is dropped.
pub fn fill_matrix<M>(a: &[char], b: &[char], model: &M, gap: i32) -> Result<DpMatrix, NwError>
where
    M: ScoringModel + ?Sized,
{
    let mut dp = DpMatrix::with_boundary(a.len() + 1, b.len() + 1, gap);
    let cols = dp.cols;
    let gap = i64::from(gap);
    for (i, &x) in a.iter().enumerate().map(|(i, x)| (i + 1, x)) {
        let (prev, cur) = dp.cells[(i - 1) * cols..(i + 1) * cols].split_at_mut(cols);
        for (j, &y) in b.iter().enumerate().map(|(j, y)| (j + 1, y)) {
            let mut best = DpCell {
                distance: prev[j - 1].distance + i64::from(model.score(x, y)?),
                direction: Direction::Diagonal,
            };
            let left = cur[j - 1].distance + gap;
            if left > best.distance {
                best = DpCell { distance: left, direction: Direction::Left };
            }
            let top = prev[j].distance + gap;
            if top > best.distance {
                best = DpCell { distance: top, direction: Direction::Top };
            }
            cur[j] = best;
        }
    }
    Ok(dp)
}

/// A global alignment computed by Needleman–Wunsch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlobalAlignment {
    /// Optimal alignment score.
    pub score: i64,
    /// Row sequence with gaps (`-`) inserted.
    pub align_a: String,
    /// Column sequence with gaps (`-`) inserted.
    pub align_b: String,
}

impl GlobalAlignment {
    /// Number of alignment columns.
    pub fn len(&self) -> usize {
        self.align_a.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.align_a.is_empty()
    }

    fn columns(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.align_a.chars().zip(self.align_b.chars())
    }

    /// Columns holding the same symbol on both rows.
    pub fn identities(&self) -> usize {
        self.columns().filter(|&(x, y)| x != GAP && x == y).count()
    }

    /// Columns holding a gap on either row.
    pub fn gaps(&self) -> usize {
        self.columns().filter(|&(x, y)| x == GAP || y == GAP).count()
    }

    /// Percent identity over aligned columns (0..=100).
    pub fn pct_identity(&self) -> f64 {
        percent(self.identities(), self.len())
    }

    /// Percent gap columns (0..=100).
    pub fn pct_gaps(&self) -> f64 {
        percent(self.gaps(), self.len())
    }

    /// CIGAR-like run-length string, e.g. `2M1D2M`. `D` is a gap in `b`,
    /// `I` a gap in `a`.
    pub fn cigar(&self) -> String {
        let mut ops: Vec<(char, usize)> = Vec::new();
        for (x, y) in self.columns() {
            let op = if y == GAP { 'D' } else if x == GAP { 'I' } else { 'M' };
            match ops.last_mut() {
                Some(last) if last.0 == op => last.1 += 1,
                _ => ops.push((op, 1)),
            }
        }
        ops.into_iter().map(|(op, len)| format!("{len}{op}")).collect()
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

/// Run Needleman–Wunsch global alignment of `a` (rows) against `b` (columns).
///
/// Both sequences may be empty. Symbols the model cannot score abort the
/// alignment with [`NwError::UnknownSymbol`] and no partial result.
pub fn needle<M>(a: &str, b: &str, model: &M, gap: i32) -> Result<GlobalAlignment, NwError>
where
    M: ScoringModel + ?Sized,
{
    log::trace!("validating {} + {} symbols against the scoring model", a.len(), b.len());
    model.validate(a)?;
    model.validate(b)?;
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    log::debug!("needle: filling {}x{} matrix (gap {gap})", a.len() + 1, b.len() + 1);
    let dp = fill_matrix(&a, &b, model, gap)?;
    let aln = dp.traceback(&a, &b);
    log::debug!("needle: score {} over {} columns", aln.score, aln.len());
    Ok(aln)
}
