//! Matprop Matrix - properties of small numeric matrices
//!
//! Pure functions over a rectangular `Matrix`:
//! - Construction from flat row-major data (`build_matrix`)
//! - Transpose and trace
//! - Determinant by cofactor expansion
//! - Rank by Gaussian elimination
//! - Integer-rounded inverse by Gauss-Jordan elimination
//! - Closed-form eigenvalues and eigenvectors of 2×2 matrices
//! - A combined `MatrixReport` with per-property availability
//!
//! Each operation is also registered as a `FunctionPlugin` so it can be
//! called by name over dynamic `Value`s.

mod types;
mod helpers;
mod construct;
mod ops;
mod props;
mod eigen;
mod report;

pub use types::{Matrix, Vector};
pub use helpers::{extract_matrix, round_half_up};
pub use construct::build_matrix;
pub use ops::{inverse, transpose};
pub use props::{determinant, rank, trace};
pub use eigen::{eigenvalues, eigenvectors};
pub use report::{MatrixReport, Property};

use matprop_plugin::PluginRegistry;

/// Load matrix functions into registry
pub fn load_matrix_library(registry: PluginRegistry) -> PluginRegistry {
    registry
        // Construction
        .with_function(construct::MatrixFn)

        // Operations
        .with_function(ops::TransposeFn)
        .with_function(ops::InverseFn)

        // Properties
        .with_function(props::TraceFn)
        .with_function(props::DeterminantFn)
        .with_function(props::RankFn)

        // Eigen (2×2)
        .with_function(eigen::EigenvaluesFn)
        .with_function(eigen::EigenvectorsFn)

        // Report
        .with_function(report::MatrixReportFn)
}

#[cfg(test)]
pub(crate) fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}
