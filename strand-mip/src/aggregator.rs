//! Incremental weighted row aggregation.
//!
//! The aggregator accumulates a weighted sum of relaxation rows. The
//! aggregation lives over an extended index universe: structural columns
//! `0..num_cols`, followed by one slack coordinate `num_cols + row` per row
//! carrying that row's accumulated weight. Consumers that only care about
//! structural coefficients skip indices `>= num_cols`; the cut generator
//! uses the slack entries to reconstruct the implied right-hand side from
//! the row bounds.

use strand_core::{LpRelaxation, VectorSum};

/// Values below this magnitude are dropped when the aggregation is read.
const DROP_TOLERANCE: f64 = 1e-12;

/// Weighted sum of relaxation rows with incremental extension.
#[derive(Debug, Clone)]
pub struct LpAggregator {
    num_cols: usize,
    cols: VectorSum,
    row_weights: VectorSum,
}

impl LpAggregator {
    /// Create an empty aggregator sized for `relax`.
    pub fn new(relax: &LpRelaxation) -> Self {
        Self {
            num_cols: relax.num_cols(),
            cols: VectorSum::new(relax.num_cols()),
            row_weights: VectorSum::new(relax.num_rows()),
        }
    }

    /// Fold `weight x row` into the aggregation.
    pub fn add_row(&mut self, relax: &LpRelaxation, row: usize, weight: f64) {
        let (cols, values) = relax.row(row);
        for (&col, &value) in cols.iter().zip(values) {
            self.cols.add(col, weight * value);
        }
        self.row_weights.add(row, weight);
    }

    /// Force a structural coefficient to exactly zero.
    ///
    /// Used right after a substitution row has been folded in, where
    /// floating-point cancellation can leave a residual that would keep the
    /// column alive.
    pub fn cancel(&mut self, col: usize) {
        self.cols.set_zero(col);
    }

    /// Accumulated weight of `row` in the current aggregation.
    pub fn row_weight(&self, row: usize) -> f64 {
        self.row_weights.get(row)
    }

    /// Read the current aggregation into `inds`/`vals`.
    ///
    /// Structural entries come first, then slack entries at
    /// `num_cols + row`. With `complement` set the aggregation is returned
    /// in the reversed orientation (all values negated), which is the form
    /// used for the second cut-generation attempt. Entries below the drop
    /// tolerance are omitted.
    pub fn current_aggregation(&self, complement: bool, inds: &mut Vec<usize>, vals: &mut Vec<f64>) {
        let sign = if complement { -1.0 } else { 1.0 };
        inds.clear();
        vals.clear();

        for &col in self.cols.touched() {
            let value = self.cols.get(col);
            if value.abs() <= DROP_TOLERANCE {
                continue;
            }
            inds.push(col);
            vals.push(sign * value);
        }
        for &row in self.row_weights.touched() {
            let weight = self.row_weights.get(row);
            if weight.abs() <= DROP_TOLERANCE {
                continue;
            }
            inds.push(self.num_cols + row);
            vals.push(sign * weight);
        }
    }

    /// Whether nothing has been aggregated since the last clear.
    pub fn is_empty(&self) -> bool {
        self.cols.is_empty() && self.row_weights.is_empty()
    }

    /// Reset to the empty aggregation.
    pub fn clear(&mut self) {
        self.cols.clear();
        self.row_weights.clear();
    }
}
