//! Sparse matrix storage and a sparse accumulator.
//!
//! The separation code walks the constraint matrix in both directions:
//! column-wise when building the arc adjacency over continuous variables,
//! row-wise when folding rows into an aggregation. `SparseMatrix` therefore
//! keeps a CSC representation together with a CSR mirror, both built once
//! from triplets. `VectorSum` is the flat-array accumulator used for the
//! aggregation itself: dense values, an explicit nonzero index list and
//! membership flags, so that clearing touches only the entries that were
//! written.

use crate::error::{ProblemError, ProblemResult};

/// Compressed sparse matrix with both column-wise and row-wise access.
#[derive(Debug, Clone)]
pub struct SparseMatrix {
    num_rows: usize,
    num_cols: usize,
    col_start: Vec<usize>,
    col_rows: Vec<usize>,
    col_values: Vec<f64>,
    row_start: Vec<usize>,
    row_cols: Vec<usize>,
    row_values: Vec<f64>,
}

impl SparseMatrix {
    /// Build a matrix from `(row, col, value)` triplets.
    ///
    /// Duplicate entries are summed, exact zeros are dropped. Entries must
    /// be finite and in bounds.
    pub fn from_triplets(
        num_rows: usize,
        num_cols: usize,
        entries: &[(usize, usize, f64)],
    ) -> ProblemResult<Self> {
        for &(row, col, value) in entries {
            if row >= num_rows || col >= num_cols {
                return Err(ProblemError::EntryOutOfBounds {
                    row,
                    col,
                    num_rows,
                    num_cols,
                });
            }
            if !value.is_finite() {
                return Err(ProblemError::NonFiniteCoefficient { row, col, value });
            }
        }

        let mut sorted: Vec<(usize, usize, f64)> = entries.to_vec();
        sorted.sort_unstable_by_key(|&(row, col, _)| (col, row));

        // merge duplicates, drop entries that sum to exactly zero
        let mut merged: Vec<(usize, usize, f64)> = Vec::with_capacity(sorted.len());
        for (row, col, value) in sorted {
            match merged.last_mut() {
                Some(last) if last.0 == row && last.1 == col => last.2 += value,
                _ => merged.push((row, col, value)),
            }
        }
        merged.retain(|&(_, _, value)| value != 0.0);

        let mut col_start = vec![0usize; num_cols + 1];
        for &(_, col, _) in &merged {
            col_start[col + 1] += 1;
        }
        for j in 0..num_cols {
            col_start[j + 1] += col_start[j];
        }
        let col_rows: Vec<usize> = merged.iter().map(|&(row, _, _)| row).collect();
        let col_values: Vec<f64> = merged.iter().map(|&(_, _, value)| value).collect();

        let mut row_start = vec![0usize; num_rows + 1];
        for &(row, _, _) in &merged {
            row_start[row + 1] += 1;
        }
        for i in 0..num_rows {
            row_start[i + 1] += row_start[i];
        }
        let mut next = row_start.clone();
        let mut row_cols = vec![0usize; merged.len()];
        let mut row_values = vec![0.0f64; merged.len()];
        for &(row, col, value) in &merged {
            let pos = next[row];
            row_cols[pos] = col;
            row_values[pos] = value;
            next[row] += 1;
        }

        Ok(Self {
            num_rows,
            num_cols,
            col_start,
            col_rows,
            col_values,
            row_start,
            row_cols,
            row_values,
        })
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of columns.
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Number of stored nonzeros.
    pub fn num_nonzeros(&self) -> usize {
        self.col_values.len()
    }

    /// Row indices and values of column `col`.
    pub fn col(&self, col: usize) -> (&[usize], &[f64]) {
        let range = self.col_start[col]..self.col_start[col + 1];
        (&self.col_rows[range.clone()], &self.col_values[range])
    }

    /// Column indices and values of row `row`.
    pub fn row(&self, row: usize) -> (&[usize], &[f64]) {
        let range = self.row_start[row]..self.row_start[row + 1];
        (&self.row_cols[range.clone()], &self.row_values[range])
    }

    /// Number of nonzeros in column `col`.
    pub fn col_len(&self, col: usize) -> usize {
        self.col_start[col + 1] - self.col_start[col]
    }
}

/// Sparse accumulator over a fixed index universe.
///
/// Values live in a dense array; an explicit index list records which
/// entries have been touched so that iteration and clearing are linear in
/// the number of written entries, not in the dimension.
#[derive(Debug, Clone)]
pub struct VectorSum {
    values: Vec<f64>,
    nonzeros: Vec<usize>,
    active: Vec<bool>,
}

impl VectorSum {
    /// Create an accumulator over indices `0..dim`.
    pub fn new(dim: usize) -> Self {
        Self {
            values: vec![0.0; dim],
            nonzeros: Vec::new(),
            active: vec![false; dim],
        }
    }

    /// Add `value` to entry `index`.
    pub fn add(&mut self, index: usize, value: f64) {
        if !self.active[index] {
            self.active[index] = true;
            self.nonzeros.push(index);
        }
        self.values[index] += value;
    }

    /// Force entry `index` to exactly zero, keeping it in the touched set.
    pub fn set_zero(&mut self, index: usize) {
        if self.active[index] {
            self.values[index] = 0.0;
        }
    }

    /// Current value of entry `index`.
    pub fn get(&self, index: usize) -> f64 {
        self.values[index]
    }

    /// Indices touched since the last clear, in insertion order.
    pub fn touched(&self) -> &[usize] {
        &self.nonzeros
    }

    /// Whether no entry has been touched.
    pub fn is_empty(&self) -> bool {
        self.nonzeros.is_empty()
    }

    /// Reset all touched entries to zero.
    pub fn clear(&mut self) {
        for &index in &self.nonzeros {
            self.values[index] = 0.0;
            self.active[index] = false;
        }
        self.nonzeros.clear();
    }
}
