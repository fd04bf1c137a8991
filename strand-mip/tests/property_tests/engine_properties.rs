use proptest::prelude::*;
use strand_core::{LpRelaxation, LpSolution, SparseMatrix, VarType};
use strand_mip::{CutPool, LpAggregator, MirCutGenerator, PathSeparator, SeparatorSettings, TransformedLp};

use crate::common::RecordingGenerator;

const INF: f64 = f64::INFINITY;

prop_compose! {
    fn arb_relaxation()(
        num_rows in 1usize..6,
        num_cols in 1usize..6,
    )(
        num_rows in Just(num_rows),
        num_cols in Just(num_cols),
        entries in proptest::collection::vec(
            (0usize..32, 0usize..32, prop_oneof![Just(-3.0), Just(-1.0), Just(0.5), Just(1.0), Just(2.0)]),
            0..12,
        ),
        col_values in proptest::collection::vec(0.0f64..4.0, 6),
        integral in proptest::collection::vec(any::<bool>(), 6),
        row_shapes in proptest::collection::vec(0u8..4, 6),
        duals in proptest::collection::vec(-2.0f64..2.0, 6),
    ) -> LpRelaxation {
        let entries: Vec<_> = entries
            .into_iter()
            .map(|(row, col, value)| (row % num_rows, col % num_cols, value))
            .collect();
        let col_value: Vec<f64> = col_values[..num_cols].to_vec();
        let matrix = SparseMatrix::from_triplets(num_rows, num_cols, &entries).unwrap();
        let mut row_value = vec![0.0; num_rows];
        for row in 0..num_rows {
            let (cols, vals) = matrix.row(row);
            for (&col, &val) in cols.iter().zip(vals) {
                row_value[row] += val * col_value[col];
            }
        }
        let (row_lower, row_upper): (Vec<f64>, Vec<f64>) = row_shapes[..num_rows]
            .iter()
            .zip(&row_value)
            .map(|(&shape, &activity)| match shape {
                0 => (activity, activity),
                1 => (-INF, activity),
                2 => (activity, INF),
                _ => (activity - 5.0, activity + 5.0),
            })
            .unzip();
        LpRelaxation::new(
            matrix,
            vec![0.0; num_cols],
            vec![4.0; num_cols],
            row_lower,
            row_upper,
            integral[..num_cols]
                .iter()
                .map(|&b| if b { VarType::Integer } else { VarType::Continuous })
                .collect(),
            LpSolution {
                col_value,
                row_value,
                row_dual: duals[..num_rows].to_vec(),
            },
            23,
        )
        .unwrap()
    }
}

proptest! {
    #[test]
    fn accepted_cuts_are_violated_and_distinct(relax in arb_relaxation()) {
        let transformed = TransformedLp::new(&relax, 1e-6);
        let mut separator = PathSeparator::new(SeparatorSettings::default().with_seed(3));
        let mut aggregator = LpAggregator::new(&relax);
        let mut generator = MirCutGenerator::default();
        let mut pool = CutPool::new();

        let found = separator.separate(&relax, &transformed, &mut aggregator, &mut generator, &mut pool);
        prop_assert_eq!(found, pool.len());

        let col_value = &relax.solution().col_value;
        for cut in pool.cuts() {
            prop_assert!(cut.violation(col_value) > 0.0);
            for &col in &cut.cols {
                prop_assert!(col < relax.num_cols());
            }
        }
        for (i, a) in pool.cuts().iter().enumerate() {
            for b in &pool.cuts()[i + 1..] {
                prop_assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn attempt_sequence_is_reproducible(relax in arb_relaxation()) {
        let transformed = TransformedLp::new(&relax, 1e-6);

        let run = || {
            let mut separator = PathSeparator::new(SeparatorSettings::default().with_seed(41));
            let mut aggregator = LpAggregator::new(&relax);
            let mut generator = RecordingGenerator::default();
            let mut pool = CutPool::new();
            separator.separate(&relax, &transformed, &mut aggregator, &mut generator, &mut pool);
            generator.seen
        };

        prop_assert_eq!(run(), run());
    }
}
