//! Helper functions for matrix operations

use matprop_core::{MatpropError, MatrixError, Value};
use crate::types::Matrix;

/// Round to the nearest integer with ties toward positive infinity
///
/// `f64::round` sends ties away from zero (-2.5 → -3); the results here are
/// defined with ties going up (-2.5 → -2, 2.5 → 3).
pub fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Order of a square matrix
pub fn check_square(m: &Matrix) -> Result<usize, MatrixError> {
    if !m.is_square() {
        return Err(MatrixError::NonSquare { rows: m.rows(), cols: m.cols() });
    }
    Ok(m.rows())
}

/// Require exactly a 2×2 matrix
pub fn check_two_by_two(m: &Matrix) -> Result<(), MatrixError> {
    match check_square(m)? {
        2 => Ok(()),
        order => Err(MatrixError::UnsupportedOrder { order }),
    }
}

/// Extract an f64 from a Value
pub fn extract_number(value: &Value, func: &str, arg: &str) -> Result<f64, MatpropError> {
    value.as_number()
        .ok_or_else(|| MatpropError::arg_type(func, arg, "Number", value.type_name()))
}

/// Extract a non-negative integer count from a Value
pub fn extract_usize(value: &Value, func: &str, arg: &str) -> Result<usize, MatpropError> {
    let n = extract_number(value, func, arg)?;
    if n < 0.0 || n.fract() != 0.0 || !n.is_finite() {
        return Err(MatpropError::domain_error(format!(
            "{}: {} must be a non-negative integer, got {}", func, arg, n
        )));
    }
    Ok(n as usize)
}

/// Extract a list of numbers from a Value
pub fn extract_number_list(value: &Value, func: &str, arg: &str) -> Result<Vec<f64>, MatpropError> {
    let items = value.as_list()
        .ok_or_else(|| MatpropError::arg_type(func, arg, "List", value.type_name()))?;

    items.iter().enumerate()
        .map(|(i, item)| item.as_number().ok_or_else(|| MatpropError::domain_error(format!(
            "{}: {} element {} must be a Number", func, arg, i
        ))))
        .collect()
}

/// Extract a pair of numbers from a two-element list
pub fn extract_pair(value: &Value, func: &str, arg: &str) -> Result<(f64, f64), MatpropError> {
    match extract_number_list(value, func, arg)?.as_slice() {
        [a, b] => Ok((*a, *b)),
        other => Err(MatpropError::domain_error(format!(
            "{}: {} must hold exactly 2 numbers, got {}", func, arg, other.len()
        ))),
    }
}

/// Extract a matrix from a Value (either a Matrix object or nested list)
pub fn extract_matrix(value: &Value, func: &str, arg: &str) -> Result<Matrix, MatpropError> {
    match value {
        Value::Object(obj) => match (obj.get("type"), obj.get("data")) {
            (Some(Value::Text(t)), Some(Value::List(data))) if t == "Matrix" => {
                extract_matrix_from_nested_list(data, func, arg)
            }
            _ => Err(MatpropError::arg_type(func, arg, "Matrix", "Object")),
        },
        Value::List(rows) => extract_matrix_from_nested_list(rows, func, arg),
        Value::Error(e) => Err(e.clone()),
        _ => Err(MatpropError::arg_type(func, arg, "Matrix", value.type_name())),
    }
}

fn extract_matrix_from_nested_list(rows: &[Value], func: &str, arg: &str) -> Result<Matrix, MatpropError> {
    let mut data = Vec::with_capacity(rows.len());

    for (i, row_val) in rows.iter().enumerate() {
        let cols = row_val.as_list().ok_or_else(|| MatpropError::domain_error(format!(
            "{}: {} row {} must be a list", func, arg, i
        )))?;

        let mut row = Vec::with_capacity(cols.len());
        for (j, col_val) in cols.iter().enumerate() {
            let n = col_val.as_number().ok_or_else(|| MatpropError::domain_error(format!(
                "{}: {}[{}][{}] must be a Number", func, arg, i, j
            )))?;
            row.push(n);
        }
        data.push(row);
    }

    Matrix::from_rows(data).map_err(|e| MatpropError::from_matrix(func, e))
}
