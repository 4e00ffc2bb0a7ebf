//! The plugin API a third-party extension implements.
//!
//! A candidate is inspected only through [`Candidate`]; the validator never
//! owns or mutates it. Every read is fallible so that a plugin whose state
//! cannot be inspected is rejected instead of aborting registration.
//!
//! The complete structural contract, per kind:
//!
//! | kind                          | requirements                                       |
//! |-------------------------------|----------------------------------------------------|
//! | blackbox, greybox, data, perf | matching tag, `explain_<name>` per explanation     |
//! | glassbox                      | as above with tag `model`, plus `fit`, `predict`   |
//! | provider                      | `render` or `parallel`                             |

use crate::extension::identity::{ExplainerType, ExplanationName};

pub const FIT_OPERATION: &str = "fit";
pub const PREDICT_OPERATION: &str = "predict";
pub const RENDER_OPERATION: &str = "render";
pub const PARALLEL_OPERATION: &str = "parallel";

const EXPLAIN_PREFIX: &str = "explain_";

/// Name of the operation that serves a declared explanation.
pub fn explain_operation(explanation: &ExplanationName) -> String {
    format!("{EXPLAIN_PREFIX}{}", explanation.0)
}

/// Fault raised while reading a candidate's declared interface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct InspectError {
    message: String,
}

impl InspectError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Read-only view of a plugin offered for registration.
pub trait Candidate {
    /// Display name used in diagnostics and reports.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Declared category tag, or `None` when the plugin declares none.
    fn explainer_type(&self) -> Result<Option<ExplainerType>, InspectError> {
        Ok(None)
    }

    /// Declared explanation variants.
    fn available_explanations(&self) -> Result<Vec<ExplanationName>, InspectError> {
        Ok(Vec::new())
    }

    /// Whether the plugin exposes an operation with this exact name.
    fn has_operation(&self, operation: &str) -> Result<bool, InspectError>;
}

impl<T: Candidate + ?Sized> Candidate for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn explainer_type(&self) -> Result<Option<ExplainerType>, InspectError> {
        (**self).explainer_type()
    }

    fn available_explanations(&self) -> Result<Vec<ExplanationName>, InspectError> {
        (**self).available_explanations()
    }

    fn has_operation(&self, operation: &str) -> Result<bool, InspectError> {
        (**self).has_operation(operation)
    }
}

impl<T: Candidate + ?Sized> Candidate for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn explainer_type(&self) -> Result<Option<ExplainerType>, InspectError> {
        (**self).explainer_type()
    }

    fn available_explanations(&self) -> Result<Vec<ExplanationName>, InspectError> {
        (**self).available_explanations()
    }

    fn has_operation(&self, operation: &str) -> Result<bool, InspectError> {
        (**self).has_operation(operation)
    }
}
