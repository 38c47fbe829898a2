//! Property-based tests against a dense reference
//!
//! Every property builds the same matrix twice: once through triplet
//! construction and once as a plain dense `Vec<Vec<f64>>` accumulated
//! entry by entry.

use csrcore::{build, multiply_parallel, norm_parallel, CsrConfig, NormKind};
use proptest::prelude::*;
use std::collections::BTreeMap;

type TripletList = (usize, usize, Vec<(usize, usize, f64)>);

/// Shape plus triplets inside that shape; positions may repeat
fn triplet_strategy(max_dim: usize, max_len: usize) -> impl Strategy<Value = TripletList> {
    (1..=max_dim, 1..=max_dim).prop_flat_map(move |(n_rows, n_cols)| {
        let entry = (0..n_rows, 0..n_cols, -50.0..50.0f64);
        (Just(n_rows), Just(n_cols), prop::collection::vec(entry, 0..=max_len))
    })
}

fn dense(n_rows: usize, n_cols: usize, triplets: &[(usize, usize, f64)]) -> Vec<Vec<f64>> {
    let mut d = vec![vec![0.0; n_cols]; n_rows];
    for &(row, col, value) in triplets {
        d[row][col] += value;
    }
    d
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

proptest! {
    /// Without repeated positions, reading back yields exactly the input entries
    #[test]
    fn prop_roundtrip_unique_positions((n_rows, n_cols, triplets) in triplet_strategy(12, 40)) {
        let unique: BTreeMap<(usize, usize), f64> = triplets
            .iter()
            .map(|&(row, col, value)| ((row, col), value))
            .collect();
        let input: Vec<_> = unique.iter().map(|(&(row, col), &value)| (row, col, value)).collect();

        let matrix = build(n_rows, n_cols, input.clone()).unwrap();

        prop_assert_eq!(matrix.to_triplets(), input);
    }

    /// Structure invariants hold for arbitrary input, duplicates included
    #[test]
    fn prop_structure_invariants((n_rows, n_cols, triplets) in triplet_strategy(12, 60)) {
        let matrix = build(n_rows, n_cols, triplets.clone()).unwrap();
        let row_ptr = matrix.row_ptr();

        prop_assert_eq!(row_ptr.len(), n_rows + 1);
        prop_assert_eq!(row_ptr[0], 0);
        prop_assert_eq!(row_ptr[n_rows], matrix.nnz());
        prop_assert!(matrix.nnz() <= triplets.len());

        for i in 0..n_rows {
            prop_assert!(row_ptr[i] <= row_ptr[i + 1]);
            let cols = &matrix.col_idx()[row_ptr[i]..row_ptr[i + 1]];
            prop_assert!(cols.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(cols.iter().all(|&c| c < n_cols));
        }
    }

    /// Stored values equal the dense accumulation of all triplets
    #[test]
    fn prop_duplicates_sum_like_dense((n_rows, n_cols, triplets) in triplet_strategy(8, 60)) {
        let matrix = build(n_rows, n_cols, triplets.clone()).unwrap();
        let d = dense(n_rows, n_cols, &triplets);

        for i in 0..n_rows {
            for j in 0..n_cols {
                prop_assert!(close(matrix.get(i, j).unwrap(), d[i][j]));
            }
        }
    }

    #[test]
    fn prop_spmv_matches_dense(
        (n_rows, n_cols, triplets) in triplet_strategy(10, 50),
        seed in prop::collection::vec(-5.0..5.0f64, 10),
    ) {
        let matrix = build(n_rows, n_cols, triplets.clone()).unwrap();
        let d = dense(n_rows, n_cols, &triplets);
        let x: Vec<f64> = seed[..n_cols].to_vec();

        let y = matrix.multiply(&x).unwrap();
        let y_par = multiply_parallel(&matrix, &x, &CsrConfig::with_threads(2, 0)).unwrap();

        for i in 0..n_rows {
            let expected: f64 = d[i].iter().zip(&x).map(|(a, b)| a * b).sum();
            prop_assert!(close(y[i], expected), "row {}: {} vs {}", i, y[i], expected);
        }
        prop_assert_eq!(y, y_par);
    }

    #[test]
    fn prop_norms_match_dense((n_rows, n_cols, triplets) in triplet_strategy(10, 50)) {
        let matrix = build(n_rows, n_cols, triplets.clone()).unwrap();
        let d = dense(n_rows, n_cols, &triplets);

        let frobenius = d.iter().flatten().map(|v| v * v).sum::<f64>().sqrt();
        let infinity = d
            .iter()
            .map(|row| row.iter().map(|v| v.abs()).sum::<f64>())
            .fold(0.0, f64::max);
        let one = (0..n_cols)
            .map(|j| d.iter().map(|row| row[j].abs()).sum::<f64>())
            .fold(0.0, f64::max);

        prop_assert!(close(matrix.norm(NormKind::Frobenius), frobenius));
        prop_assert!(close(matrix.norm(NormKind::Infinity), infinity));
        prop_assert!(close(matrix.norm(NormKind::One), one));

        let config = CsrConfig::with_threads(2, 0);
        for kind in NormKind::ALL {
            prop_assert!(close(norm_parallel(&matrix, kind, &config), matrix.norm(kind)));
        }
    }

    /// Any triplet outside the shape rejects the whole input
    #[test]
    fn prop_out_of_range_rejected(
        (n_rows, n_cols, mut triplets) in triplet_strategy(6, 20),
        extra_row in 0usize..3,
        at in any::<prop::sample::Index>(),
    ) {
        let bad = (n_rows + extra_row, 0, 1.0);
        let pos = at.index(triplets.len() + 1);
        triplets.insert(pos, bad);

        prop_assert!(build(n_rows, n_cols, triplets).is_err());
    }
}
