//! Matrix construction

use matprop_core::{MatpropError, MatrixError, Value};
use matprop_plugin::{ArgMeta, EvalContext, FunctionMeta, FunctionPlugin};
use nalgebra::DMatrix;
use crate::helpers::{extract_matrix, extract_number_list, extract_usize};
use crate::types::Matrix;

/// Build a `rows × cols` matrix from row-major `flat` data
///
/// Fails with `DimensionMismatch` unless `flat.len() == rows * cols`, and with
/// `Empty` when either dimension is zero.
pub fn build_matrix(flat: &[f64], rows: usize, cols: usize) -> Result<Matrix, MatrixError> {
    // Dimensions too large to count can never match the data
    let expected = rows.checked_mul(cols).unwrap_or(usize::MAX);
    if flat.len() != expected {
        return Err(MatrixError::DimensionMismatch { expected, actual: flat.len() });
    }
    Matrix::from_dmatrix(DMatrix::from_row_slice(rows, cols, flat))
}

// ============ matrix ============

pub struct MatrixFn;

static MATRIX_ARGS: [ArgMeta; 3] = [
    ArgMeta {
        name: "data",
        typ: "List",
        description: "Flat list of numbers in row-major order, or nested rows",
        optional: false,
        default: None,
    },
    ArgMeta {
        name: "rows",
        typ: "Number",
        description: "Row count (required with flat data)",
        optional: true,
        default: None,
    },
    ArgMeta {
        name: "cols",
        typ: "Number",
        description: "Column count (required with flat data)",
        optional: true,
        default: None,
    },
];

static MATRIX_EXAMPLES: [&str; 2] = [
    "matrix([1, 2, 3, 4, 5, 6], 2, 3) → [[1, 2, 3], [4, 5, 6]]",
    "matrix([[1, 2], [3, 4]]) → 2×2 matrix",
];

static MATRIX_RELATED: [&str; 2] = ["transpose", "matrixreport"];

impl FunctionPlugin for MatrixFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "matrix",
            description: "Create a matrix from flat data and dimensions, or from nested rows",
            usage: "matrix(data, [rows, cols])",
            args: &MATRIX_ARGS,
            returns: "Matrix",
            examples: &MATRIX_EXAMPLES,
            category: "matrix/construct",
            related: &MATRIX_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        match args.len() {
            1 => match extract_matrix(&args[0], "matrix", "data") {
                Ok(m) => m.into(),
                Err(e) => Value::Error(e),
            },
            3 => {
                let built = extract_number_list(&args[0], "matrix", "data").and_then(|flat| {
                    let rows = extract_usize(&args[1], "matrix", "rows")?;
                    let cols = extract_usize(&args[2], "matrix", "cols")?;
                    build_matrix(&flat, rows, cols).map_err(|e| MatpropError::from_matrix("matrix", e))
                });
                match built {
                    Ok(m) => m.into(),
                    Err(e) => Value::Error(e),
                }
            }
            n => Value::Error(MatpropError::arg_count("matrix", 3, n)),
        }
    }
}
