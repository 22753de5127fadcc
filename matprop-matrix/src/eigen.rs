//! Closed-form eigenvalues and eigenvectors for 2×2 matrices
//!
//! The characteristic polynomial is built from `M[0][0]`, `M[0][1]` and
//! `M[1][1]` only, as if the matrix were symmetric: the determinant term is
//! `a·d − b²` and `M[1][0]` is never read. Results are exact for symmetric
//! input. For finite input the discriminant `((a−d)/2)² + b²` cannot be
//! negative, so complex results only surface through overflow or NaN.
//!
//! Everything is rounded to the nearest integer, eigenvalues as they are
//! produced and eigenvector components after normalization.

use matprop_core::{MatpropError, MatrixError, Value};
use matprop_plugin::{ArgMeta, EvalContext, FunctionMeta, FunctionPlugin};
use tracing::debug;
use crate::helpers::{check_two_by_two, extract_matrix, extract_pair, round_half_up};
use crate::types::{Matrix, Vector};

/// Rounded eigenvalues `(λ1, λ2)` with `λ1 >= λ2`
pub fn eigenvalues(m: &Matrix) -> Result<(f64, f64), MatrixError> {
    check_two_by_two(m)?;
    let (a, b, d) = (m[(0, 0)], m[(0, 1)], m[(1, 1)]);

    let trace = a + d;
    let det = a * d - b * b;
    let discriminant = trace * trace / 4.0 - det;
    // NaN fails this test too
    if !(discriminant >= 0.0) {
        debug!(discriminant, "eigenvalues: negative discriminant");
        return Err(MatrixError::ComplexEigenvalues { discriminant });
    }

    let root = discriminant.sqrt();
    Ok((round_half_up(trace / 2.0 + root), round_half_up(trace / 2.0 - root)))
}

/// One integer-rounded unit eigenvector per eigenvalue
///
/// With `[[a, b], [c, d]] = m`: `[λ − d, b]` when `b ≠ 0`, else `[c, λ − a]`
/// when `c ≠ 0`, else `[1, 0]`. Each is divided by its Euclidean norm and
/// its components rounded, which collapses most directions onto an axis or
/// a diagonal.
pub fn eigenvectors(m: &Matrix, eigenvalues: (f64, f64)) -> Result<(Vector, Vector), MatrixError> {
    check_two_by_two(m)?;
    let (a, b, c, d) = (m[(0, 0)], m[(0, 1)], m[(1, 0)], m[(1, 1)]);

    let vector_for = |lambda: f64| {
        let raw = if b != 0.0 {
            [lambda - d, b]
        } else if c != 0.0 {
            [c, lambda - a]
        } else {
            [1.0, 0.0]
        };
        normalize(&raw)
    };

    Ok((vector_for(eigenvalues.0), vector_for(eigenvalues.1)))
}

fn normalize(v: &[f64]) -> Vector {
    let length = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    Vector::from_vec(v.iter().map(|x| round_half_up(x / length)).collect())
}

// ============================================================================
// EIGENVALUES
// ============================================================================

pub struct EigenvaluesFn;

static EIGENVALUES_ARGS: [ArgMeta; 1] = [ArgMeta {
    name: "matrix",
    typ: "Matrix",
    description: "2×2 matrix (read as symmetric)",
    optional: false,
    default: None,
}];
static EIGENVALUES_EXAMPLES: [&str; 2] = [
    "eigenvalues([[2, 0], [0, 3]]) → [3, 2]",
    "eigenvalues([[2, 1], [1, 2]]) → [3, 1]",
];
static EIGENVALUES_RELATED: [&str; 2] = ["eigenvectors", "trace"];

impl FunctionPlugin for EigenvaluesFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "eigenvalues",
            description: "Integer-rounded eigenvalues of a 2×2 matrix",
            usage: "eigenvalues(matrix)",
            args: &EIGENVALUES_ARGS,
            returns: "List",
            examples: &EIGENVALUES_EXAMPLES,
            category: "matrix/eigen",
            related: &EIGENVALUES_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 1 {
            return Value::Error(MatpropError::arg_count("eigenvalues", 1, args.len()));
        }

        let matrix = match extract_matrix(&args[0], "eigenvalues", "matrix") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };

        match eigenvalues(&matrix) {
            Ok((l1, l2)) => Value::from(vec![l1, l2]),
            Err(e) => Value::Error(MatpropError::from_matrix("eigenvalues", e)),
        }
    }
}

// ============================================================================
// EIGENVECTORS
// ============================================================================

pub struct EigenvectorsFn;

static EIGENVECTORS_ARGS: [ArgMeta; 2] = [
    ArgMeta {
        name: "matrix",
        typ: "Matrix",
        description: "2×2 matrix",
        optional: false,
        default: None,
    },
    ArgMeta::optional("eigenvalues", "List", "Pair of eigenvalues", "eigenvalues(matrix)"),
];
static EIGENVECTORS_EXAMPLES: [&str; 2] = [
    "eigenvectors([[2, 1], [1, 2]]) → [[1, 1], [-1, 1]]",
    "eigenvectors([[2, 1], [1, 2]], [3, 1]) → [[1, 1], [-1, 1]]",
];
static EIGENVECTORS_RELATED: [&str; 1] = ["eigenvalues"];

impl FunctionPlugin for EigenvectorsFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "eigenvectors",
            description: "Integer-rounded unit eigenvectors of a 2×2 matrix",
            usage: "eigenvectors(matrix, [eigenvalues])",
            args: &EIGENVECTORS_ARGS,
            returns: "List",
            examples: &EIGENVECTORS_EXAMPLES,
            category: "matrix/eigen",
            related: &EIGENVECTORS_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.is_empty() || args.len() > 2 {
            return Value::Error(MatpropError::arg_count_range("eigenvectors", 1, 2, args.len()));
        }

        let matrix = match extract_matrix(&args[0], "eigenvectors", "matrix") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };

        let values = match args.get(1) {
            Some(v) => extract_pair(v, "eigenvectors", "eigenvalues"),
            None => eigenvalues(&matrix).map_err(|e| MatpropError::from_matrix("eigenvectors", e)),
        };

        match values.and_then(|vals| {
            eigenvectors(&matrix, vals).map_err(|e| MatpropError::from_matrix("eigenvectors", e))
        }) {
            Ok((u, v)) => Value::List(vec![u.into(), v.into()]),
            Err(e) => Value::Error(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matprop_core::codes;
    use matprop_plugin::PluginRegistry;
    use std::sync::Arc;

    fn ctx() -> EvalContext {
        EvalContext::new(Arc::new(PluginRegistry::new()))
    }

    fn m(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    fn pair(v: (Vector, Vector)) -> (Vec<f64>, Vec<f64>) {
        (v.0.to_vec(), v.1.to_vec())
    }

    #[test]
    fn test_eigenvalues_diagonal() {
        assert_eq!(eigenvalues(&m(vec![vec![2.0, 0.0], vec![0.0, 3.0]])), Ok((3.0, 2.0)));
        assert_eq!(eigenvalues(&m(vec![vec![5.0, 0.0], vec![0.0, -1.0]])), Ok((5.0, -1.0)));
    }

    #[test]
    fn test_eigenvalues_symmetric() {
        assert_eq!(eigenvalues(&m(vec![vec![2.0, 1.0], vec![1.0, 2.0]])), Ok((3.0, 1.0)));
    }

    #[test]
    fn test_eigenvalues_ignore_lower_left() {
        // Read as [[4, 1], [1, 3]]: 3.5 ± sqrt(1.25), rounded
        let a = m(vec![vec![4.0, 1.0], vec![2.0, 3.0]]);
        let b = m(vec![vec![4.0, 1.0], vec![-7.0, 3.0]]);
        assert_eq!(eigenvalues(&a), Ok((5.0, 2.0)));
        assert_eq!(eigenvalues(&a), eigenvalues(&b));
    }

    #[test]
    fn test_eigenvalues_overflow_is_complex() {
        let a = m(vec![vec![1e200, 0.0], vec![0.0, 1e200]]);
        assert!(matches!(eigenvalues(&a), Err(MatrixError::ComplexEigenvalues { .. })));
    }

    #[test]
    fn test_eigenvalues_shape_errors() {
        assert_eq!(
            eigenvalues(&m(vec![vec![1.0, 2.0, 3.0]])),
            Err(MatrixError::NonSquare { rows: 1, cols: 3 })
        );
        let three = m(vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0]]);
        assert_eq!(eigenvalues(&three), Err(MatrixError::UnsupportedOrder { order: 3 }));
    }

    #[test]
    fn test_eigenvectors_diagonal_falls_back_to_x_axis() {
        let a = m(vec![vec![2.0, 0.0], vec![0.0, 3.0]]);
        let vals = eigenvalues(&a).unwrap();
        let (u, v) = pair(eigenvectors(&a, vals).unwrap());
        assert_eq!(u, vec![1.0, 0.0]);
        assert_eq!(v, vec![1.0, 0.0]);
    }

    #[test]
    fn test_eigenvectors_upper_right_branch() {
        let a = m(vec![vec![2.0, 1.0], vec![1.0, 2.0]]);
        let (u, v) = pair(eigenvectors(&a, (3.0, 1.0)).unwrap());
        assert_eq!(u, vec![1.0, 1.0]);
        assert_eq!(v, vec![-1.0, 1.0]);
    }

    #[test]
    fn test_eigenvectors_lower_left_branch() {
        // b == 0, c == 1: λ=5 → [1, 5]/√26 → [0, 1]; λ=0 → [1, 0]
        let a = m(vec![vec![0.0, 0.0], vec![1.0, 5.0]]);
        assert_eq!(eigenvalues(&a), Ok((5.0, 0.0)));
        let (u, v) = pair(eigenvectors(&a, (5.0, 0.0)).unwrap());
        assert_eq!(u, vec![0.0, 1.0]);
        assert_eq!(v, vec![1.0, 0.0]);
    }

    #[test]
    fn test_eigenvectors_rounding_collapses_to_axis() {
        // [2, 1]/√5 ≈ [0.894, 0.447] rounds to [1, 0]
        let a = m(vec![vec![4.0, 1.0], vec![2.0, 3.0]]);
        let (u, _) = pair(eigenvectors(&a, (5.0, 2.0)).unwrap());
        assert_eq!(u, vec![1.0, 0.0]);
    }

    #[test]
    fn test_eigenvectors_requires_two_by_two() {
        let one = m(vec![vec![1.0]]);
        assert_eq!(eigenvectors(&one, (1.0, 1.0)), Err(MatrixError::UnsupportedOrder { order: 1 }));
    }

    #[test]
    fn test_eigenvalues_fn() {
        let a = m(vec![vec![2.0, 0.0], vec![0.0, 3.0]]).to_value();
        assert_eq!(EigenvaluesFn.call(&[a], &ctx()), Value::from(vec![3.0, 2.0]));
    }

    #[test]
    fn test_eigenvectors_fn_with_and_without_values() {
        let a = m(vec![vec![2.0, 1.0], vec![1.0, 2.0]]).to_value();
        let expected = Value::List(vec![Value::from(vec![1.0, 1.0]), Value::from(vec![-1.0, 1.0])]);

        assert_eq!(EigenvectorsFn.call(&[a.clone()], &ctx()), expected);
        assert_eq!(EigenvectorsFn.call(&[a, Value::from(vec![3.0, 1.0])], &ctx()), expected);
    }

    #[test]
    fn test_eigenvectors_meta_optional_values() {
        let meta = EigenvectorsFn.meta();
        assert!(!meta.args[0].optional);
        assert!(meta.args[1].optional);
        assert_eq!(meta.args[1].default, Some("eigenvalues(matrix)"));
    }

    #[test]
    fn test_eigen_fn_errors() {
        let rect = m(vec![vec![1.0, 2.0]]).to_value();
        let err = EigenvaluesFn.call(&[rect], &ctx());
        assert_eq!(err.as_error().map(|e| e.code.as_str()), Some(codes::NOT_SQUARE));

        let a = m(vec![vec![2.0, 1.0], vec![1.0, 2.0]]).to_value();
        let err = EigenvectorsFn.call(&[a.clone(), Value::from(vec![1.0])], &ctx());
        assert_eq!(err.as_error().map(|e| e.code.as_str()), Some(codes::DOMAIN_ERROR));

        let extra = Value::from(vec![3.0, 1.0]);
        let err = EigenvectorsFn.call(&[a, extra.clone(), extra], &ctx());
        let err = err.as_error().unwrap();
        assert_eq!(err.code, codes::ARG_COUNT);
        assert!(err.message.contains("1 to 2 arguments"), "{}", err.message);
    }
}
