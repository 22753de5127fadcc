//! Evaluation Context

use crate::PluginRegistry;
use matprop_core::MatpropError;
use std::sync::Arc;

/// Largest order the cofactor-expansion plugins accept by default
pub const DEFAULT_COFACTOR_LIMIT: usize = 10;

/// Evaluation context passed to plugins
pub struct EvalContext {
    pub registry: Arc<PluginRegistry>,
    pub max_cofactor_order: usize,
}

impl EvalContext {
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self {
            registry,
            max_cofactor_order: DEFAULT_COFACTOR_LIMIT,
        }
    }

    pub fn with_max_cofactor_order(mut self, order: usize) -> Self {
        self.max_cofactor_order = order;
        self
    }

    /// Refuse cofactor expansion beyond the configured order
    pub fn check_cofactor_order(&self, func: &str, order: usize) -> Result<(), MatpropError> {
        if order > self.max_cofactor_order {
            return Err(MatpropError::limit_exceeded(func, order, self.max_cofactor_order));
        }
        Ok(())
    }
}
