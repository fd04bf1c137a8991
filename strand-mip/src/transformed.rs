//! Transformed view of the relaxation.
//!
//! Every column is measured in a shifted coordinate system where its
//! relevant bound is zero: the bound nearer to the current primal value is
//! chosen, and the distance to it is the column's bound distance. A column
//! sitting on a bound (within the feasibility tolerance) or free in both
//! directions gets distance exactly zero; such columns never act as
//! substitution or path-extension candidates.

use strand_core::LpRelaxation;

/// Per-column bound distances in the shifted/complemented coordinate system.
#[derive(Debug, Clone)]
pub struct TransformedLp {
    bound_distance: Vec<f64>,
    at_upper: Vec<bool>,
}

impl TransformedLp {
    /// Compute bound distances from the relaxation's current solution.
    pub fn new(relax: &LpRelaxation, feastol: f64) -> Self {
        let num_cols = relax.num_cols();
        let mut bound_distance = vec![0.0; num_cols];
        let mut at_upper = vec![false; num_cols];

        for col in 0..num_cols {
            let value = relax.solution().col_value[col];
            let lower = relax.col_lower(col);
            let upper = relax.col_upper(col);

            let lower_dist = if lower.is_finite() {
                value - lower
            } else {
                f64::INFINITY
            };
            let upper_dist = if upper.is_finite() {
                upper - value
            } else {
                f64::INFINITY
            };

            if !lower_dist.is_finite() && !upper_dist.is_finite() {
                continue;
            }

            let dist;
            if upper_dist < lower_dist {
                at_upper[col] = true;
                dist = upper_dist;
            } else {
                dist = lower_dist;
            }
            if dist > feastol {
                bound_distance[col] = dist;
            }
        }

        Self {
            bound_distance,
            at_upper,
        }
    }

    /// Distance of column `col` from its shift bound; zero means at-bound
    /// or free.
    pub fn bound_distance(&self, col: usize) -> f64 {
        self.bound_distance[col]
    }

    /// Whether column `col` is measured from its upper bound.
    pub fn at_upper_bound(&self, col: usize) -> bool {
        self.at_upper[col]
    }
}
