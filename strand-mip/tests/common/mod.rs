//! Shared fixtures and generator doubles for the integration suites.
#![allow(dead_code)]

use strand_core::{LpRelaxation, LpSolution, SparseMatrix, VarType};
use strand_mip::{Cut, CutGenerator, TransformedLp};

pub const INF: f64 = f64::INFINITY;

/// Assemble a relaxation whose row activities are computed from the
/// entries, so tight bounds in the fixture are genuinely tight.
#[allow(clippy::too_many_arguments)]
pub fn relaxation(
    num_rows: usize,
    num_cols: usize,
    entries: &[(usize, usize, f64)],
    col_bounds: Vec<(f64, f64)>,
    row_bounds: Vec<(f64, f64)>,
    integrality: Vec<VarType>,
    col_value: Vec<f64>,
    row_dual: Vec<f64>,
    lp_iterations: u64,
) -> LpRelaxation {
    let matrix = SparseMatrix::from_triplets(num_rows, num_cols, entries).unwrap();
    let mut row_value = vec![0.0; num_rows];
    for &(row, col, value) in entries {
        row_value[row] += value * col_value[col];
    }
    let (col_lower, col_upper) = col_bounds.into_iter().unzip();
    let (row_lower, row_upper) = row_bounds.into_iter().unzip();
    LpRelaxation::new(
        matrix,
        col_lower,
        col_upper,
        row_lower,
        row_upper,
        integrality,
        LpSolution {
            col_value,
            row_value,
            row_dual,
        },
        lp_iterations,
    )
    .unwrap()
}

/// Generator double that always fails.
pub struct NeverGenerator;

impl CutGenerator for NeverGenerator {
    fn generate(
        &mut self,
        _relax: &LpRelaxation,
        _transformed: &TransformedLp,
        _inds: &[usize],
        _vals: &[f64],
        _rhs: f64,
    ) -> Option<Cut> {
        None
    }
}

/// Generator double that records every aggregation it is offered and
/// always fails, exposing the separator's attempt sequence.
#[derive(Default)]
pub struct RecordingGenerator {
    pub seen: Vec<(Vec<usize>, Vec<f64>)>,
}

impl CutGenerator for RecordingGenerator {
    fn generate(
        &mut self,
        _relax: &LpRelaxation,
        _transformed: &TransformedLp,
        inds: &[usize],
        vals: &[f64],
        _rhs: f64,
    ) -> Option<Cut> {
        self.seen.push((inds.to_vec(), vals.to_vec()));
        None
    }
}
