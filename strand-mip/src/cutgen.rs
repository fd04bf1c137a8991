//! Cut generation from a single aggregated row.
//!
//! The separator drives cut generation through the [`CutGenerator`] trait:
//! one attempt consumes the aggregated row (structural entries plus slack
//! coordinates) together with the transformed view and either yields a
//! valid inequality or reports failure. [`MirCutGenerator`] is the default
//! implementation, a mixed-integer rounding procedure with Gomory
//! treatment of integer columns.

use strand_core::LpRelaxation;

use crate::transformed::TransformedLp;

/// Coefficients below this magnitude are dropped from generated cuts.
const DROP_TOLERANCE: f64 = 1e-12;

/// A `<=`-oriented valid inequality over structural columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Cut {
    /// Support of the inequality.
    pub cols: Vec<usize>,
    /// Coefficient per support column.
    pub vals: Vec<f64>,
    /// Right-hand side.
    pub rhs: f64,
}

impl Cut {
    /// Activity of the cut at the given column values.
    pub fn activity(&self, col_value: &[f64]) -> f64 {
        self.cols
            .iter()
            .zip(&self.vals)
            .map(|(&col, &val)| val * col_value[col])
            .sum()
    }

    /// Violation at the given column values; positive means cut off.
    pub fn violation(&self, col_value: &[f64]) -> f64 {
        self.activity(col_value) - self.rhs
    }
}

/// Turns one aggregated row into a valid inequality, or fails.
pub trait CutGenerator {
    /// Attempt generation on an aggregated row.
    ///
    /// `inds`/`vals` hold structural entries (`< num_cols`) and slack
    /// entries (`num_cols + row` carrying the row's aggregation weight).
    /// `rhs` is the right-hand side accumulator, zero at the start of each
    /// attempt.
    fn generate(
        &mut self,
        relax: &LpRelaxation,
        transformed: &TransformedLp,
        inds: &[usize],
        vals: &[f64],
        rhs: f64,
    ) -> Option<Cut>;
}

/// Mixed-integer rounding cut generator.
///
/// Interprets the aggregation as a `>=` combination: each slack entry is
/// resolved against the bound consistent with its weight sign (a positive
/// weight needs a finite row lower bound, a negative one a finite upper
/// bound). Structural variables are shifted to their transformed-zero
/// bounds, the MIR formula is applied with the Gomory mixed-integer
/// coefficient on integer columns, and the result is shifted back. Only
/// cuts violated by the current relaxation solution are returned.
#[derive(Debug, Clone)]
pub struct MirCutGenerator {
    /// Minimum violation for a cut to be returned.
    pub min_violation: f64,
    /// Minimum distance of the shifted right-hand side from integrality.
    pub min_fraction: f64,
}

impl Default for MirCutGenerator {
    fn default() -> Self {
        Self {
            min_violation: 1e-7,
            min_fraction: 0.01,
        }
    }
}

impl MirCutGenerator {
    /// Create a generator with the given violation threshold.
    pub fn new(min_violation: f64) -> Self {
        Self {
            min_violation,
            ..Self::default()
        }
    }
}

impl CutGenerator for MirCutGenerator {
    fn generate(
        &mut self,
        relax: &LpRelaxation,
        transformed: &TransformedLp,
        inds: &[usize],
        vals: &[f64],
        rhs: f64,
    ) -> Option<Cut> {
        let num_cols = relax.num_cols();

        // resolve slack entries against row bounds: the aggregation is a
        // valid >= inequality iff every weight has the matching finite bound
        let mut implied_rhs = rhs;
        let mut cols = Vec::new();
        let mut coefs = Vec::new();
        for (&index, &value) in inds.iter().zip(vals) {
            if index >= num_cols {
                let row = index - num_cols;
                let bound = if value > 0.0 {
                    relax.row_lower(row)
                } else {
                    relax.row_upper(row)
                };
                if !bound.is_finite() {
                    return None;
                }
                implied_rhs += value * bound;
            } else {
                cols.push(index);
                coefs.push(-value); // negate into <= orientation
            }
        }
        if cols.is_empty() {
            return None;
        }
        let mut shifted_rhs = -implied_rhs;

        // shift every variable to its transformed-zero bound so all
        // variables are nonnegative
        for (k, &col) in cols.iter().enumerate() {
            let coef = coefs[k];
            if transformed.at_upper_bound(col) {
                shifted_rhs -= coef * relax.col_upper(col);
                coefs[k] = -coef;
            } else {
                let lower = relax.col_lower(col);
                if !lower.is_finite() {
                    return None;
                }
                shifted_rhs -= coef * lower;
            }
        }

        let rhs_floor = shifted_rhs.floor();
        let f0 = shifted_rhs - rhs_floor;
        if f0 < self.min_fraction || f0 > 1.0 - self.min_fraction {
            return None;
        }
        let scale = 1.0 - f0;

        // MIR coefficients in the shifted space
        for (k, &col) in cols.iter().enumerate() {
            let coef = coefs[k];
            coefs[k] = if relax.is_col_integral(col) {
                let floor = coef.floor();
                floor + (coef - floor - f0).max(0.0) / scale
            } else if coef < 0.0 {
                coef / scale
            } else {
                0.0
            };
        }

        // shift back to the original space
        let mut cut_rhs = rhs_floor;
        for (k, &col) in cols.iter().enumerate() {
            let coef = coefs[k];
            if transformed.at_upper_bound(col) {
                coefs[k] = -coef;
                cut_rhs -= coef * relax.col_upper(col);
            } else {
                cut_rhs += coef * relax.col_lower(col);
            }
        }

        let mut cut = Cut {
            cols: Vec::new(),
            vals: Vec::new(),
            rhs: cut_rhs,
        };
        for (k, &col) in cols.iter().enumerate() {
            if coefs[k].abs() > DROP_TOLERANCE {
                cut.cols.push(col);
                cut.vals.push(coefs[k]);
            }
        }
        if cut.cols.is_empty() {
            return None;
        }

        if cut.violation(&relax.solution().col_value) <= self.min_violation {
            return None;
        }
        Some(cut)
    }
}
