//! One-to-one pairing of query tokens with field tokens.
//!
//! Given a score matrix between query tokens (rows) and field tokens
//! (columns), pick the mapping that maximises the summed score, where a
//! row may also stay unmatched. The search is a depth-first walk over
//! rows with the set of used columns carried as a bitmask and memoised,
//! so repeated sub-problems collapse. Columns past the word width are
//! ignored in input order.

use std::collections::HashMap;

use crate::options::SearchOptions;
use crate::score::{ScoreType, MASK_BITS};

/// Rows are flipped onto columns when there are this many more rows than
/// columns, bounding the recursion depth by the smaller side.
const FLIP_SLACK: usize = 1;

/// Marker for cells that failed their row's inclusion threshold.
const DISQUALIFIED: ScoreType = ScoreType::NEG_INFINITY;

/// Dense row-major score matrix.
#[derive(Debug, Clone)]
pub struct ScoreMatrix {
    data: Vec<ScoreType>,
    rows: usize,
    cols: usize,
}

impl ScoreMatrix {
    /// Create a zeroed `rows x cols` matrix.
    pub fn zero(rows: usize, cols: usize) -> Self {
        ScoreMatrix {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Read the cell at `(row, col)`.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> ScoreType {
        self.data[row * self.cols + col]
    }

    /// Write the cell at `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: ScoreType) {
        self.data[row * self.cols + col] = value;
    }

    fn transposed(&self) -> ScoreMatrix {
        let mut t = ScoreMatrix::zero(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                t.set(c, r, self.at(r, c));
            }
        }
        t
    }
}

/// Result of the pairing: per row, the chosen column (or none), plus the
/// summed score.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Chosen column per row; `None` for unmatched rows.
    pub pairs: Vec<Option<usize>>,
    /// Sum of the matched cells.
    pub score: ScoreType,
}

impl Assignment {
    fn empty(rows: usize) -> Self {
        Assignment {
            pairs: vec![None; rows],
            score: 0.0,
        }
    }
}

/// Find the best one-to-one assignment under per-row thresholds.
///
/// A row may take a column only if its score reaches
/// `max(best_in_row * thresh_relative_to_best, minimum_match)`. Rows
/// with no qualifying column stay unmatched; when a single row
/// qualifies at all, its best column is returned directly. Thresholds
/// are applied before any row/column flip, so the flip changes only the
/// traversal, never which cells qualify.
pub fn match_tokens(matrix: &ScoreMatrix, opts: &SearchOptions) -> Assignment {
    let rows = matrix.rows();
    let cols = matrix.cols().min(MASK_BITS);
    if rows == 0 || cols == 0 {
        return Assignment::empty(rows);
    }

    // Bake per-row thresholds into a filtered copy.
    let mut filtered = ScoreMatrix::zero(rows, cols);
    let mut live_rows = 0;
    let mut last_live = 0;
    for row in 0..rows {
        let mut best = 0.0;
        for col in 0..cols {
            best = ScoreType::max(best, matrix.at(row, col));
        }
        let threshold = ScoreType::max(best * opts.thresh_relative_to_best, opts.minimum_match);
        let mut any = false;
        for col in 0..cols {
            let value = matrix.at(row, col);
            if value >= threshold {
                filtered.set(row, col, value);
                any = true;
            } else {
                filtered.set(row, col, DISQUALIFIED);
            }
        }
        if any {
            live_rows += 1;
            last_live = row;
        }
    }
    if live_rows == 0 {
        return Assignment::empty(rows);
    }
    if live_rows == 1 {
        let mut best = 0.0;
        let mut best_col = 0;
        for col in 0..cols {
            let v = matrix.at(last_live, col);
            if v > best {
                best = v;
                best_col = col;
            }
        }
        let mut out = Assignment::empty(rows);
        out.pairs[last_live] = Some(best_col);
        out.score = best;
        return out;
    }

    if rows > cols + FLIP_SLACK {
        let flipped = solve(&filtered.transposed());
        let mut out = Assignment::empty(rows);
        out.score = flipped.score;
        for (col, pair) in flipped.pairs.iter().enumerate() {
            if let Some(row) = *pair {
                out.pairs[row] = Some(col);
            }
        }
        return out;
    }

    solve(&filtered)
}

/// Memoised depth-first search over a threshold-filtered matrix.
fn solve(filtered: &ScoreMatrix) -> Assignment {
    let mut solver = Solver {
        matrix: filtered,
        cols: filtered.cols().min(MASK_BITS),
        memo: HashMap::new(),
    };
    let score = solver.best_from(0, 0);

    // Reconstruct the chosen columns by replaying the memo.
    let mut out = Assignment::empty(filtered.rows());
    out.score = score;
    let mut used: u64 = 0;
    for row in 0..filtered.rows() {
        if let Some(&(_, chosen)) = solver.memo.get(&(row, used)) {
            if let Some(col) = chosen {
                out.pairs[row] = Some(col);
                used |= 1 << col;
            }
        }
    }
    out
}

struct Solver<'a> {
    matrix: &'a ScoreMatrix,
    cols: usize,
    memo: HashMap<(usize, u64), (ScoreType, Option<usize>)>,
}

impl Solver<'_> {
    fn best_from(&mut self, row: usize, used: u64) -> ScoreType {
        if row == self.matrix.rows() {
            return 0.0;
        }
        if let Some(&(score, _)) = self.memo.get(&(row, used)) {
            return score;
        }

        // Leave this row unmatched.
        let mut best = self.best_from(row + 1, used);
        let mut chosen = None;

        for col in 0..self.cols {
            if used & (1 << col) != 0 {
                continue;
            }
            let value = self.matrix.at(row, col);
            if value == DISQUALIFIED {
                continue;
            }
            let total = value + self.best_from(row + 1, used | (1 << col));
            if total > best {
                best = total;
                chosen = Some(col);
            }
        }

        self.memo.insert((row, used), (best, chosen));
        best
    }
}
