//! Matrix operations: transpose, inverse

use matprop_core::{MatpropError, MatrixError, Value};
use matprop_plugin::{ArgMeta, EvalContext, FunctionMeta, FunctionPlugin};
use nalgebra::DMatrix;
use tracing::debug;
use crate::helpers::{check_square, extract_matrix, round_half_up};
use crate::types::Matrix;

/// `cols × rows` matrix with `out[j][i] == m[i][j]`
pub fn transpose(m: &Matrix) -> Matrix {
    Matrix::from_storage(m.as_dmatrix().transpose())
}

/// Inverse by Gauss-Jordan elimination against the identity
///
/// Every scaled pivot row is rounded to the nearest integer as it is
/// produced, and the final inverse is rounded again: inputs are assumed to
/// be integer valued. A pivot that is exactly zero makes the matrix
/// singular; no row exchanges are attempted.
pub fn inverse(m: &Matrix) -> Result<Matrix, MatrixError> {
    let n = check_square(m)?;
    let mut a = m.as_dmatrix().clone();
    let mut inv = DMatrix::<f64>::identity(n, n);

    for i in 0..n {
        let factor = a[(i, i)];
        if factor == 0.0 {
            debug!(pivot = i, "inverse: zero pivot, matrix is singular");
            return Err(MatrixError::Singular { pivot: i });
        }

        for j in 0..n {
            a[(i, j)] = round_half_up(a[(i, j)] / factor);
            inv[(i, j)] = round_half_up(inv[(i, j)] / factor);
        }

        for k in (0..n).filter(|&k| k != i) {
            let mult = a[(k, i)];
            for j in 0..n {
                let (da, di) = (mult * a[(i, j)], mult * inv[(i, j)]);
                a[(k, j)] -= da;
                inv[(k, j)] -= di;
            }
        }
    }

    Ok(Matrix::from_storage(inv.map(round_half_up)))
}

// ============ transpose ============

pub struct TransposeFn;

static TRANSPOSE_ARGS: [ArgMeta; 1] = [
    ArgMeta { name: "matrix", typ: "Matrix", description: "Matrix to transpose", optional: false, default: None },
];

static TRANSPOSE_EXAMPLES: [&str; 1] = ["transpose([[1, 2, 3], [4, 5, 6]]) → [[1, 4], [2, 5], [3, 6]]"];
static TRANSPOSE_RELATED: [&str; 1] = ["matrix"];

impl FunctionPlugin for TransposeFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "transpose", description: "Matrix transpose", usage: "transpose(matrix)",
            args: &TRANSPOSE_ARGS, returns: "Matrix", examples: &TRANSPOSE_EXAMPLES,
            category: "matrix/ops", related: &TRANSPOSE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 1 { return Value::Error(MatpropError::arg_count("transpose", 1, args.len())); }

        match extract_matrix(&args[0], "transpose", "matrix") {
            Ok(m) => transpose(&m).into(),
            Err(e) => Value::Error(e),
        }
    }
}

// ============ inverse ============

pub struct InverseFn;

static INVERSE_ARGS: [ArgMeta; 1] = [
    ArgMeta { name: "matrix", typ: "Matrix", description: "Square, integer-valued matrix", optional: false, default: None },
];

static INVERSE_EXAMPLES: [&str; 2] = [
    "inverse([[1, 1], [0, 1]]) → [[1, -1], [0, 1]]",
    "inverse([[1, 2], [2, 4]]) → #ERROR: SINGULAR_MATRIX",
];
static INVERSE_RELATED: [&str; 2] = ["determinant", "rank"];

impl FunctionPlugin for InverseFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "inverse", description: "Integer-rounded matrix inverse (Gauss-Jordan)", usage: "inverse(matrix)",
            args: &INVERSE_ARGS, returns: "Matrix", examples: &INVERSE_EXAMPLES,
            category: "matrix/ops", related: &INVERSE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 1 { return Value::Error(MatpropError::arg_count("inverse", 1, args.len())); }

        let m = match extract_matrix(&args[0], "inverse", "matrix") { Ok(m) => m, Err(e) => return Value::Error(e) };

        match inverse(&m) {
            Ok(inv) => inv.into(),
            Err(e) => Value::Error(MatpropError::from_matrix("inverse", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matprop_core::{codes, Severity};
    use matprop_plugin::PluginRegistry;
    use std::sync::Arc;

    fn ctx() -> EvalContext {
        EvalContext::new(Arc::new(PluginRegistry::new()))
    }

    fn m(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_transpose_rectangular() {
        let a = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let t = transpose(&a);
        assert_eq!(t.rows(), 3);
        assert_eq!(t.cols(), 2);
        assert_eq!(t.to_nested_list(), vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]);
    }

    #[test]
    fn test_double_transpose_is_identity() {
        for a in [
            m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]),
            m(vec![vec![1.5], vec![-2.0]]),
            m(vec![vec![9.0]]),
        ] {
            assert_eq!(transpose(&transpose(&a)), a);
        }
    }

    #[test]
    fn test_inverse_identity() {
        let id = m(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        assert_eq!(inverse(&id), Ok(id));
    }

    #[test]
    fn test_inverse_unimodular() {
        let a = m(vec![vec![1.0, 1.0], vec![0.0, 1.0]]);
        assert_eq!(inverse(&a).unwrap().to_nested_list(), vec![vec![1.0, -1.0], vec![0.0, 1.0]]);

        let b = m(vec![vec![1.0, 2.0, 3.0], vec![0.0, 1.0, 4.0], vec![5.0, 6.0, 0.0]]);
        assert_eq!(
            inverse(&b).unwrap().to_nested_list(),
            vec![vec![-24.0, 18.0, 5.0], vec![20.0, -15.0, -4.0], vec![-5.0, 4.0, 1.0]]
        );
    }

    #[test]
    fn test_inverse_rounds_each_step() {
        // True inverse is 0.5 * I; the scaled pivot rows round 0.5 up to 1
        let a = m(vec![vec![2.0, 0.0], vec![0.0, 2.0]]);
        assert_eq!(inverse(&a).unwrap().to_nested_list(), vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[test]
    fn test_inverse_singular() {
        let a = m(vec![vec![1.0, 2.0], vec![2.0, 4.0]]);
        assert_eq!(inverse(&a), Err(MatrixError::Singular { pivot: 1 }));

        // Zero leading pivot: no row exchange is tried
        let b = m(vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
        assert_eq!(inverse(&b), Err(MatrixError::Singular { pivot: 0 }));
    }

    #[test]
    fn test_inverse_non_square() {
        let a = m(vec![vec![1.0, 2.0]]);
        assert_eq!(inverse(&a), Err(MatrixError::NonSquare { rows: 1, cols: 2 }));
    }

    #[test]
    fn test_inverse_leaves_input_untouched() {
        let a = m(vec![vec![1.0, 1.0], vec![0.0, 1.0]]);
        let copy = a.clone();
        let _ = inverse(&a);
        assert_eq!(a, copy);
    }

    #[test]
    fn test_transpose_fn() {
        let a = m(vec![vec![1.0, 2.0, 3.0]]).to_value();
        let t = TransposeFn.call(&[a], &ctx());
        assert_eq!(t.get("rows"), Value::Number(3.0));
        assert_eq!(t.get("cols"), Value::Number(1.0));
    }

    #[test]
    fn test_inverse_fn_singular_is_warning() {
        let a = m(vec![vec![1.0, 2.0], vec![2.0, 4.0]]).to_value();
        let result = InverseFn.call(&[a], &ctx());
        let err = result.as_error().unwrap();
        assert_eq!(err.code, codes::SINGULAR_MATRIX);
        assert_eq!(err.severity, Severity::Warning);
    }
}
