//! Full property report for a single matrix
//!
//! One pure request/response call that computes everything a matrix
//! calculator shows: shape, transpose and rank for any matrix, and the
//! square-only properties gated into `Property::Unavailable` when they do
//! not apply. Rendering is left to the caller.

use std::collections::HashMap;

use matprop_core::{MatpropError, MatrixError, Severity, Value};
use matprop_plugin::{ArgMeta, EvalContext, FunctionMeta, FunctionPlugin};
use serde::Serialize;
use tracing::debug;

use crate::construct::build_matrix;
use crate::eigen::{eigenvalues, eigenvectors};
use crate::helpers::{extract_matrix, round_half_up};
use crate::ops::{inverse, transpose};
use crate::props::{determinant, rank, trace};
use crate::types::{Matrix, Vector};

/// A computed property, or the reason it is not available
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Property<T> {
    Available { value: T },
    Unavailable { code: &'static str, reason: String },
}

impl<T> Property<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Property::Available { value } => Some(value),
            Property::Unavailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Property::Available { .. })
    }

    fn to_value_with(&self, f: impl Fn(&T) -> Value) -> Value {
        match self {
            Property::Available { value } => f(value),
            Property::Unavailable { code, reason } => Value::Error(
                MatpropError::new(*code, reason.clone()).with_severity(Severity::Warning),
            ),
        }
    }
}

impl<T> From<Result<T, MatrixError>> for Property<T> {
    fn from(result: Result<T, MatrixError>) -> Self {
        match result {
            Ok(value) => Property::Available { value },
            Err(e) => Property::Unavailable { code: e.code(), reason: e.to_string() },
        }
    }
}

/// Every property of one matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixReport {
    pub rows: usize,
    pub cols: usize,
    pub matrix: Matrix,
    pub transpose: Matrix,
    pub rank: usize,
    /// Rounded to the nearest integer
    pub determinant: Property<f64>,
    /// Rounded to the nearest integer
    pub trace: Property<f64>,
    pub inverse: Property<Matrix>,
    pub eigenvalues: Property<(f64, f64)>,
    pub eigenvectors: Property<(Vector, Vector)>,
}

impl MatrixReport {
    pub fn compute(m: &Matrix) -> Self {
        let values = eigenvalues(m);
        let vectors = values.clone()
            .and_then(|vals| eigenvectors(m, vals))
            .map(|(u, v)| (u.map(round_half_up), v.map(round_half_up)));

        let report = Self {
            rows: m.rows(),
            cols: m.cols(),
            matrix: m.clone(),
            transpose: transpose(m),
            rank: rank(m),
            determinant: determinant(m).map(round_half_up).into(),
            trace: trace(m).map(round_half_up).into(),
            inverse: inverse(m).into(),
            eigenvalues: values.into(),
            eigenvectors: vectors.into(),
        };

        debug!(
            rows = report.rows,
            cols = report.cols,
            rank = report.rank,
            invertible = report.inverse.is_available(),
            "matrix report computed"
        );
        report
    }

    /// Build the matrix from flat row-major data, then report on it
    ///
    /// A count mismatch fails the whole request; there is no partial report.
    pub fn from_flat(flat: &[f64], rows: usize, cols: usize) -> Result<Self, MatrixError> {
        let m = build_matrix(flat, rows, cols)?;
        Ok(Self::compute(&m))
    }

    pub fn to_value(&self) -> Value {
        let mut obj = HashMap::new();
        obj.insert("type".to_string(), Value::Text("MatrixReport".to_string()));
        obj.insert("rows".to_string(), Value::from(self.rows));
        obj.insert("cols".to_string(), Value::from(self.cols));
        obj.insert("matrix".to_string(), self.matrix.to_value());
        obj.insert("transpose".to_string(), self.transpose.to_value());
        obj.insert("rank".to_string(), Value::from(self.rank));
        obj.insert("determinant".to_string(), self.determinant.to_value_with(|d| Value::Number(*d)));
        obj.insert("trace".to_string(), self.trace.to_value_with(|t| Value::Number(*t)));
        obj.insert("inverse".to_string(), self.inverse.to_value_with(Matrix::to_value));
        obj.insert("eigenvalues".to_string(),
            self.eigenvalues.to_value_with(|(a, b)| Value::from(vec![*a, *b])));
        obj.insert("eigenvectors".to_string(), self.eigenvectors.to_value_with(|(u, v)| {
            Value::List(vec![Value::from(u.clone()), Value::from(v.clone())])
        }));
        Value::Object(obj)
    }
}

// ============================================================================
// MATRIXREPORT
// ============================================================================

pub struct MatrixReportFn;

static REPORT_ARGS: [ArgMeta; 1] = [ArgMeta {
    name: "matrix",
    typ: "Matrix",
    description: "Matrix to analyze",
    optional: false,
    default: None,
}];
static REPORT_EXAMPLES: [&str; 1] = [
    "matrixreport([[2, 0], [0, 3]]) → {rank: 2, determinant: 6, trace: 5, ...}",
];
static REPORT_RELATED: [&str; 4] = ["determinant", "rank", "inverse", "eigenvalues"];

impl FunctionPlugin for MatrixReportFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "matrixreport",
            description: "Compute every available property of a matrix",
            usage: "matrixreport(matrix)",
            args: &REPORT_ARGS,
            returns: "Object",
            examples: &REPORT_EXAMPLES,
            category: "matrix/report",
            related: &REPORT_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        if args.len() != 1 {
            return Value::Error(MatpropError::arg_count("matrixreport", 1, args.len()));
        }

        let matrix = match extract_matrix(&args[0], "matrixreport", "matrix") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };

        if matrix.is_square() {
            if let Err(e) = ctx.check_cofactor_order("matrixreport", matrix.rows()) {
                return Value::Error(e);
            }
        }

        MatrixReport::compute(&matrix).to_value()
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

    #[test]
    fn test_report_square() {
        crate::init_test_tracing();
        let report = MatrixReport::from_flat(&[2.0, 0.0, 0.0, 3.0], 2, 2).unwrap();

        assert_eq!(report.rows, 2);
        assert_eq!(report.cols, 2);
        assert_eq!(report.rank, 2);
        assert_eq!(report.determinant.value(), Some(&6.0));
        assert_eq!(report.trace.value(), Some(&5.0));
        assert_eq!(
            report.inverse.value().map(Matrix::to_nested_list),
            Some(vec![vec![1.0, 0.0], vec![0.0, 0.0]])
        );
        assert_eq!(report.eigenvalues.value(), Some(&(3.0, 2.0)));
        let (u, v) = report.eigenvectors.value().unwrap();
        assert_eq!(u.as_slice(), &[1.0, 0.0]);
        assert_eq!(v.as_slice(), &[1.0, 0.0]);
    }

    #[test]
    fn test_report_rounds_determinant_and_trace() {
        let report = MatrixReport::from_flat(&[1.5, 0.0, 0.0, 1.0], 2, 2).unwrap();
        assert_eq!(report.determinant.value(), Some(&2.0));
        assert_eq!(report.trace.value(), Some(&3.0));
    }

    #[test]
    fn test_report_non_square() {
        let report = MatrixReport::from_flat(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();

        assert_eq!(report.rank, 2);
        assert_eq!(report.transpose.rows(), 3);
        for code in [
            match &report.determinant { Property::Unavailable { code, .. } => *code, _ => "" },
            match &report.trace { Property::Unavailable { code, .. } => *code, _ => "" },
            match &report.inverse { Property::Unavailable { code, .. } => *code, _ => "" },
            match &report.eigenvalues { Property::Unavailable { code, .. } => *code, _ => "" },
            match &report.eigenvectors { Property::Unavailable { code, .. } => *code, _ => "" },
        ] {
            assert_eq!(code, codes::NOT_SQUARE);
        }
    }

    #[test]
    fn test_report_singular_keeps_other_properties() {
        let report = MatrixReport::from_flat(&[1.0, 2.0, 2.0, 4.0], 2, 2).unwrap();
        assert_eq!(report.rank, 1);
        assert_eq!(report.determinant.value(), Some(&0.0));
        assert!(matches!(report.inverse, Property::Unavailable { code: codes::SINGULAR_MATRIX, .. }));
        assert_eq!(report.eigenvalues.value(), Some(&(5.0, 0.0)));
    }

    #[test]
    fn test_report_three_by_three_has_no_eigen() {
        let report = MatrixReport::from_flat(&[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0], 3, 3).unwrap();
        assert_eq!(report.determinant.value(), Some(&1.0));
        assert!(report.inverse.is_available());
        assert!(matches!(report.eigenvalues, Property::Unavailable { code: codes::UNSUPPORTED_ORDER, .. }));
        assert!(!report.eigenvectors.is_available());
    }

    #[test]
    fn test_report_dimension_mismatch_is_fatal() {
        assert_eq!(
            MatrixReport::from_flat(&[1.0, 2.0, 3.0], 2, 2).unwrap_err(),
            MatrixError::DimensionMismatch { expected: 4, actual: 3 }
        );
    }

    #[test]
    fn test_report_serializes() {
        let report = MatrixReport::from_flat(&[1.0, 2.0, 2.0, 4.0], 2, 2).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["rank"], 1);
        assert_eq!(json["matrix"], serde_json::json!([[1.0, 2.0], [2.0, 4.0]]));
        assert_eq!(json["determinant"]["status"], "available");
        assert_eq!(json["determinant"]["value"], 0.0);
        assert_eq!(json["inverse"]["status"], "unavailable");
        assert_eq!(json["inverse"]["code"], "SINGULAR_MATRIX");
        assert_eq!(json["eigenvalues"]["value"], serde_json::json!([5.0, 0.0]));
    }

    #[test]
    fn test_report_fn() {
        let m = build_matrix(&[1.0, 2.0, 2.0, 4.0], 2, 2).unwrap();
        let result = MatrixReportFn.call(&[m.to_value()], &ctx());

        assert_eq!(result.get("rank"), Value::Number(1.0));
        assert_eq!(result.get("trace"), Value::Number(5.0));
        let inverse = result.get("inverse");
        let err = inverse.as_error().unwrap();
        assert_eq!(err.code, codes::SINGULAR_MATRIX);
        assert_eq!(err.severity, Severity::Warning);
    }

    #[test]
    fn test_report_fn_limit() {
        let m = build_matrix(&[1.0, 0.0, 0.0, 1.0], 2, 2).unwrap();
        let result = MatrixReportFn.call(&[m.to_value()], &ctx().with_max_cofactor_order(1));
        assert_eq!(result.as_error().map(|e| e.code.as_str()), Some(codes::LIMIT_EXCEEDED));
    }
}
