//! Core matrix and vector types

use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

use matprop_core::{MatrixError, Value};
use nalgebra::{DMatrix, DVector};
use serde::{Serialize, Serializer};

/// A rectangular, non-empty grid of f64 values
///
/// Immutable once built; every operation that needs scratch space clones
/// the underlying storage first.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: DMatrix<f64>,
}

/// A dense vector of f64 values
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    data: DVector<f64>,
}

impl Matrix {
    /// Create a matrix from nested rows, rejecting ragged or empty input
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        let n = rows.len();
        let m = rows.first().map_or(0, |r| r.len());
        if n == 0 || m == 0 {
            return Err(MatrixError::Empty);
        }

        // A ragged row is reported as a count mismatch on the flattened data
        let actual: usize = rows.iter().map(|r| r.len()).sum();
        if rows.iter().any(|r| r.len() != m) {
            return Err(MatrixError::DimensionMismatch { expected: n * m, actual });
        }

        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        Ok(Self { data: DMatrix::from_row_slice(n, m, &flat) })
    }

    /// Wrap an nalgebra matrix, rejecting empty input
    pub fn from_dmatrix(data: DMatrix<f64>) -> Result<Self, MatrixError> {
        if data.nrows() == 0 || data.ncols() == 0 {
            return Err(MatrixError::Empty);
        }
        Ok(Self { data })
    }

    /// Wrap storage the caller already knows is non-empty
    pub(crate) fn from_storage(data: DMatrix<f64>) -> Self {
        debug_assert!(data.nrows() > 0 && data.ncols() > 0);
        Self { data }
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Get element at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows() && col < self.cols() {
            Some(self.data[(row, col)])
        } else {
            None
        }
    }

    pub fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    /// Borrow the underlying nalgebra storage
    pub fn as_dmatrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// Row-major nested copy of the data
    pub fn to_nested_list(&self) -> Vec<Vec<f64>> {
        (0..self.rows())
            .map(|i| self.data.row(i).iter().copied().collect())
            .collect()
    }

    pub fn to_value(&self) -> Value {
        Value::from(self.clone())
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, idx: (usize, usize)) -> &f64 {
        &self.data[idx]
    }
}

impl Vector {
    pub fn from_vec(data: Vec<f64>) -> Self {
        Self { data: DVector::from_vec(data) }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.data.get(index).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        self.data.as_slice()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.iter().copied().collect()
    }

    /// Apply `f` to every component
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self { data: self.data.map(f) }
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for i in 0..self.rows() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for j in 0..self.cols() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.data[(i, j)])?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, val) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", val)?;
        }
        write!(f, "]")
    }
}

impl Serialize for Matrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_nested_list().serialize(serializer)
    }
}

impl Serialize for Vector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_slice().serialize(serializer)
    }
}

/// Convert Matrix to Value
impl From<Matrix> for Value {
    fn from(m: Matrix) -> Value {
        let mut obj = HashMap::new();
        obj.insert("type".to_string(), Value::Text("Matrix".to_string()));
        obj.insert("rows".to_string(), Value::from(m.rows()));
        obj.insert("cols".to_string(), Value::from(m.cols()));

        let data: Vec<Value> = m.to_nested_list().into_iter().map(Value::from).collect();
        obj.insert("data".to_string(), Value::List(data));

        Value::Object(obj)
    }
}

/// Convert Vector to Value
impl From<Vector> for Value {
    fn from(v: Vector) -> Value {
        Value::from(v.to_vec())
    }
}
