//! Behavioural contract of construction, multiplication and norms

use csrcore::{build, NormKind, SparseError, SparseMatrixCSR};

/// 2×2 matrix with mixed signs:
/// [1 -2]
/// [3  0]
fn mixed_signs() -> SparseMatrixCSR<f64> {
    build(2, 2, vec![(0, 0, 1.0), (0, 1, -2.0), (1, 0, 3.0)]).unwrap()
}

#[test]
fn test_roundtrip_without_duplicates() {
    let input = vec![(2, 1, 6.0), (0, 3, -1.5), (1, 1, 2.0), (0, 0, 4.0), (2, 3, 0.25)];
    let matrix = build(3, 4, input.clone()).unwrap();

    let mut expected = input;
    expected.sort_by_key(|&(row, col, _)| (row, col));

    assert_eq!(matrix.nnz(), 5);
    assert_eq!(matrix.to_triplets(), expected);
}

#[test]
fn test_duplicate_triplets_are_summed() {
    let matrix = build(1, 1, vec![(0, 0, 3.0), (0, 0, 4.0)]).unwrap();

    assert_eq!(matrix.nnz(), 1);
    assert_eq!(matrix.get(0, 0).unwrap(), 7.0);
}

#[test]
fn test_rows_are_sorted_and_unique() {
    let matrix = build(
        2,
        5,
        vec![(1, 4, 1.0), (1, 0, 1.0), (0, 3, 1.0), (1, 4, 1.0), (0, 1, 1.0), (1, 2, 1.0)],
    )
    .unwrap();

    assert_eq!(matrix.row_ptr(), &[0, 2, 5]);
    assert_eq!(matrix.col_idx(), &[1, 3, 0, 2, 4]);
    assert_eq!(matrix.values(), &[1.0, 1.0, 1.0, 1.0, 2.0]);
}

#[test]
fn test_identity_like_multiplication() {
    let matrix = build(2, 2, vec![(0, 0, 1.0), (1, 1, 1.0)]).unwrap();

    assert_eq!(matrix.multiply(&[5.0, -2.0]).unwrap(), vec![5.0, -2.0]);
}

#[test]
fn test_frobenius_norm() {
    let matrix = build(1, 2, vec![(0, 0, 3.0), (0, 1, 4.0)]).unwrap();

    assert_eq!(matrix.norm(NormKind::Frobenius), 5.0);
}

#[test]
fn test_infinity_norm() {
    assert_eq!(mixed_signs().norm(NormKind::Infinity), 3.0);
}

#[test]
fn test_one_norm() {
    assert_eq!(mixed_signs().norm(NormKind::One), 4.0);
}

#[test]
fn test_out_of_range_triplet() {
    let result = build(3, 3, vec![(5, 0, 1.0)]);

    assert!(matches!(result, Err(SparseError::OutOfRangeIndex { row: 5, col: 0, .. })));
}

#[test]
fn test_vector_length_mismatch() {
    let matrix = build(3, 3, vec![(0, 0, 1.0), (2, 2, 1.0)]).unwrap();
    let result = matrix.multiply(&[1.0, 2.0]);

    assert_eq!(
        result.unwrap_err(),
        SparseError::DimensionMismatch { expected: 3, found: 2 }
    );
}

#[test]
fn test_unrecognized_norm_kind() {
    let result = mixed_signs().norm_by_name("spectral");

    assert!(matches!(result, Err(SparseError::UnsupportedNormKind(ref s)) if s == "spectral"));
}

#[test]
fn test_element_access_after_build() {
    let mut matrix = mixed_signs();

    assert_eq!(matrix.get(1, 1).unwrap(), 0.0);
    assert!(matches!(
        matrix.get_mut(1, 1),
        Err(SparseError::EntryNotStored { row: 1, col: 1 })
    ));

    *matrix.get_mut(0, 1).unwrap() = -5.0;
    assert_eq!(matrix.norm(NormKind::Infinity), 6.0);
    assert_eq!(matrix.norm(NormKind::One), 5.0);
}

#[test]
fn test_rectangular_matrix() {
    // [0 0 0 2]
    // [1 0 0 0]
    // [0 0 0 0]
    let matrix = build(3, 4, vec![(0, 3, 2.0), (1, 0, 1.0)]).unwrap();

    assert_eq!(matrix.multiply(&[1.0, 2.0, 3.0, 4.0]).unwrap(), vec![8.0, 1.0, 0.0]);
    assert_eq!(matrix.norm(NormKind::One), 2.0);
    assert_eq!(matrix.norm(NormKind::Infinity), 2.0);
}
