//! Matrix property functions: trace, determinant, rank

use matprop_core::{MatpropError, MatrixError, Value};
use matprop_plugin::{ArgMeta, EvalContext, FunctionMeta, FunctionPlugin};
use nalgebra::DMatrix;
use tracing::{debug, trace as trace_event};
use crate::helpers::{check_square, extract_matrix};
use crate::types::Matrix;

/// Sum of the diagonal of a square matrix
pub fn trace(m: &Matrix) -> Result<f64, MatrixError> {
    let n = check_square(m)?;
    Ok((0..n).map(|i| m[(i, i)]).sum())
}

/// Determinant by cofactor expansion along the first row
///
/// The raw floating-point value is returned; rounding for display belongs to
/// the caller. Cost is O(n!), so this is only meant for small matrices.
pub fn determinant(m: &Matrix) -> Result<f64, MatrixError> {
    let n = check_square(m)?;
    let mut cols: Vec<usize> = (0..n).collect();
    Ok(cofactor_expansion(m.as_dmatrix(), 0, &mut cols))
}

/// Determinant of the minor made of rows `row..` and the listed `cols`
///
/// Minors are never materialized: each level removes one column index from
/// the shared buffer, recurses one row down, then puts the index back.
fn cofactor_expansion(a: &DMatrix<f64>, row: usize, cols: &mut Vec<usize>) -> f64 {
    match cols.len() {
        1 => a[(row, cols[0])],
        2 => a[(row, cols[0])] * a[(row + 1, cols[1])] - a[(row, cols[1])] * a[(row + 1, cols[0])],
        n => {
            let mut det = 0.0;
            for i in 0..n {
                let col = cols.remove(i);
                let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
                det += a[(row, col)] * cofactor_expansion(a, row + 1, cols) * sign;
                cols.insert(i, col);
            }
            det
        }
    }
}

/// Rank by Gaussian elimination restricted to the leading `min(rows, cols)` columns
///
/// Pivots are tested against exact zero. Columns beyond `min(rows, cols)` are
/// never examined, so a wide matrix whose independence only shows up in its
/// trailing columns reports a lower rank.
pub fn rank(m: &Matrix) -> usize {
    let n = m.rows();
    let mut rank = n.min(m.cols());
    let mut mat = m.as_dmatrix().clone();

    let mut row = 0;
    while row < rank {
        let pivot = mat[(row, row)];
        if pivot != 0.0 {
            for other in (0..n).filter(|&r| r != row) {
                let mult = mat[(other, row)] / pivot;
                for i in 0..rank {
                    let delta = mult * mat[(row, i)];
                    mat[(other, i)] -= delta;
                }
            }
            row += 1;
            continue;
        }

        // Zero pivot: swap in a lower row, or drop the column. Either way the
        // same pivot position is examined again.
        match (row + 1..n).find(|&i| mat[(i, row)] != 0.0) {
            Some(swap) => {
                trace_event!(row, swap, "rank: swapping rows for nonzero pivot");
                mat.swap_rows(row, swap);
            }
            None => {
                rank -= 1;
                debug!(row, rank, "rank: no pivot in column, reducing rank");
                for i in 0..n {
                    mat[(i, row)] = mat[(i, rank)];
                }
            }
        }
    }

    rank
}

// ============================================================================
// RANK - Compute matrix rank
// ============================================================================

pub struct RankFn;

static RANK_ARGS: [ArgMeta; 1] = [ArgMeta {
    name: "matrix",
    typ: "Matrix",
    description: "Matrix to analyze",
    optional: false,
    default: None,
}];
static RANK_EXAMPLES: [&str; 2] = [
    "rank([[1, 0], [0, 1]]) → 2",
    "rank([[1, 2], [2, 4]]) → 1",
];
static RANK_RELATED: [&str; 2] = ["determinant", "inverse"];

impl FunctionPlugin for RankFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "rank",
            description: "Compute the rank of a matrix by Gaussian elimination",
            usage: "rank(matrix)",
            args: &RANK_ARGS,
            returns: "Number",
            examples: &RANK_EXAMPLES,
            category: "matrix/props",
            related: &RANK_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 1 {
            return Value::Error(MatpropError::arg_count("rank", 1, args.len()));
        }

        let matrix = match extract_matrix(&args[0], "rank", "matrix") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };

        Value::from(rank(&matrix))
    }
}

// ============================================================================
// TRACE - Sum of diagonal elements
// ============================================================================

pub struct TraceFn;

static TRACE_ARGS: [ArgMeta; 1] = [ArgMeta {
    name: "matrix",
    typ: "Matrix",
    description: "Square matrix",
    optional: false,
    default: None,
}];
static TRACE_EXAMPLES: [&str; 1] = ["trace([[1, 2], [3, 4]]) → 5"];
static TRACE_RELATED: [&str; 2] = ["determinant", "eigenvalues"];

impl FunctionPlugin for TraceFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "trace",
            description: "Compute the trace (sum of diagonal elements)",
            usage: "trace(matrix)",
            args: &TRACE_ARGS,
            returns: "Number",
            examples: &TRACE_EXAMPLES,
            category: "matrix/props",
            related: &TRACE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 1 {
            return Value::Error(MatpropError::arg_count("trace", 1, args.len()));
        }

        let matrix = match extract_matrix(&args[0], "trace", "matrix") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };

        match trace(&matrix) {
            Ok(t) => Value::Number(t),
            Err(e) => Value::Error(MatpropError::from_matrix("trace", e)),
        }
    }
}

// ============================================================================
// DETERMINANT - Compute matrix determinant
// ============================================================================

pub struct DeterminantFn;

static DET_ARGS: [ArgMeta; 1] = [ArgMeta {
    name: "matrix",
    typ: "Matrix",
    description: "Square matrix",
    optional: false,
    default: None,
}];
static DET_EXAMPLES: [&str; 2] = [
    "determinant([[1, 2], [3, 4]]) → -2",
    "determinant([[2, 0, 0], [0, 3, 0], [0, 0, 4]]) → 24",
];
static DET_RELATED: [&str; 2] = ["inverse", "rank"];

impl FunctionPlugin for DeterminantFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "determinant",
            description: "Compute the determinant of a square matrix by cofactor expansion",
            usage: "determinant(matrix)",
            args: &DET_ARGS,
            returns: "Number",
            examples: &DET_EXAMPLES,
            category: "matrix/props",
            related: &DET_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        if args.len() != 1 {
            return Value::Error(MatpropError::arg_count("determinant", 1, args.len()));
        }

        let matrix = match extract_matrix(&args[0], "determinant", "matrix") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };

        let order = match check_square(&matrix) {
            Ok(n) => n,
            Err(e) => return Value::Error(MatpropError::from_matrix("determinant", e)),
        };

        if let Err(e) = ctx.check_cofactor_order("determinant", order) {
            return Value::Error(e);
        }

        match determinant(&matrix) {
            Ok(det) => Value::Number(det),
            Err(e) => Value::Error(MatpropError::from_matrix("determinant", e)),
        }
    }
}
