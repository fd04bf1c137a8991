//! Immutable snapshot of a linear relaxation.
//!
//! `LpRelaxation` bundles the constraint matrix, variable and row bounds,
//! integrality marks and the current primal/dual solution at a search-tree
//! node. Separation code only ever reads from it; the surrounding solver
//! rebuilds or patches the snapshot between invocations.

use crate::error::{ProblemError, ProblemResult};
use crate::sparse::SparseMatrix;

/// Variable type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    /// Continuous variable.
    Continuous,
    /// Integer variable.
    Integer,
}

/// Primal/dual solution of the relaxation.
#[derive(Debug, Clone)]
pub struct LpSolution {
    /// Primal value per column.
    pub col_value: Vec<f64>,
    /// Row activity per row.
    pub row_value: Vec<f64>,
    /// Dual value per row.
    pub row_dual: Vec<f64>,
}

/// Read-only relaxation state at one search-tree node.
#[derive(Debug, Clone)]
pub struct LpRelaxation {
    matrix: SparseMatrix,
    col_lower: Vec<f64>,
    col_upper: Vec<f64>,
    row_lower: Vec<f64>,
    row_upper: Vec<f64>,
    integrality: Vec<VarType>,
    solution: LpSolution,
    continuous_cols: Vec<usize>,
    lp_iterations: u64,
}

impl LpRelaxation {
    /// Assemble a relaxation snapshot, validating dimension agreement and
    /// bound sanity.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        matrix: SparseMatrix,
        col_lower: Vec<f64>,
        col_upper: Vec<f64>,
        row_lower: Vec<f64>,
        row_upper: Vec<f64>,
        integrality: Vec<VarType>,
        solution: LpSolution,
        lp_iterations: u64,
    ) -> ProblemResult<Self> {
        let num_rows = matrix.num_rows();
        let num_cols = matrix.num_cols();

        Self::check_len("col_lower", num_cols, col_lower.len())?;
        Self::check_len("col_upper", num_cols, col_upper.len())?;
        Self::check_len("row_lower", num_rows, row_lower.len())?;
        Self::check_len("row_upper", num_rows, row_upper.len())?;
        Self::check_len("integrality", num_cols, integrality.len())?;
        Self::check_len("col_value", num_cols, solution.col_value.len())?;
        Self::check_len("row_value", num_rows, solution.row_value.len())?;
        Self::check_len("row_dual", num_rows, solution.row_dual.len())?;

        for (index, (&lower, &upper)) in col_lower.iter().zip(&col_upper).enumerate() {
            if lower.is_nan() || upper.is_nan() || lower > upper {
                return Err(ProblemError::InvalidBounds {
                    context: "column",
                    index,
                    lower,
                    upper,
                });
            }
        }
        for (index, (&lower, &upper)) in row_lower.iter().zip(&row_upper).enumerate() {
            if lower.is_nan() || upper.is_nan() || lower > upper {
                return Err(ProblemError::InvalidBounds {
                    context: "row",
                    index,
                    lower,
                    upper,
                });
            }
        }

        let continuous_cols = integrality
            .iter()
            .enumerate()
            .filter_map(|(j, &vt)| (vt == VarType::Continuous).then_some(j))
            .collect();

        Ok(Self {
            matrix,
            col_lower,
            col_upper,
            row_lower,
            row_upper,
            integrality,
            solution,
            continuous_cols,
            lp_iterations,
        })
    }

    fn check_len(context: &'static str, expected: usize, found: usize) -> ProblemResult<()> {
        if expected != found {
            return Err(ProblemError::DimensionMismatch {
                context,
                expected,
                found,
            });
        }
        Ok(())
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.matrix.num_rows()
    }

    /// Number of columns.
    pub fn num_cols(&self) -> usize {
        self.matrix.num_cols()
    }

    /// The constraint matrix.
    pub fn matrix(&self) -> &SparseMatrix {
        &self.matrix
    }

    /// Column indices and values of row `row`.
    pub fn row(&self, row: usize) -> (&[usize], &[f64]) {
        self.matrix.row(row)
    }

    /// Row indices and values of column `col`.
    pub fn col(&self, col: usize) -> (&[usize], &[f64]) {
        self.matrix.col(col)
    }

    /// Lower bound of column `col`.
    pub fn col_lower(&self, col: usize) -> f64 {
        self.col_lower[col]
    }

    /// Upper bound of column `col`.
    pub fn col_upper(&self, col: usize) -> f64 {
        self.col_upper[col]
    }

    /// Lower bound of row `row`.
    pub fn row_lower(&self, row: usize) -> f64 {
        self.row_lower[row]
    }

    /// Upper bound of row `row`.
    pub fn row_upper(&self, row: usize) -> f64 {
        self.row_upper[row]
    }

    /// Type of column `col`.
    pub fn var_type(&self, col: usize) -> VarType {
        self.integrality[col]
    }

    /// Whether column `col` is restricted to integer values.
    pub fn is_col_integral(&self, col: usize) -> bool {
        self.integrality[col] == VarType::Integer
    }

    /// Columns of continuous type, in increasing index order.
    pub fn continuous_cols(&self) -> &[usize] {
        &self.continuous_cols
    }

    /// The current primal/dual solution.
    pub fn solution(&self) -> &LpSolution {
        &self.solution
    }

    /// Cumulative simplex iteration count reported by the LP solver.
    pub fn lp_iterations(&self) -> u64 {
        self.lp_iterations
    }
}
