//! Data-only plugin description.
//!
//! A `PluginDescriptor` states what a plugin declares (tag, explanations)
//! and which operations it exposes, without any behavior behind them. It is
//! what manifests deserialize into and what tests use to model candidates.

use crate::extension::contract::{Candidate, InspectError, explain_operation};
use crate::extension::identity::{ExplainerType, ExplanationName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explainer_type: Option<ExplainerType>,
    #[serde(default)]
    pub available_explanations: Vec<ExplanationName>,
    #[serde(default)]
    pub operations: BTreeSet<String>,
}

impl PluginDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, explainer_type: ExplainerType) -> Self {
        self.explainer_type = Some(explainer_type);
        self
    }

    /// Declare an explanation without exposing its operation.
    pub fn declaring(mut self, explanation: &str) -> Self {
        self.available_explanations.push(explanation.into());
        self
    }

    /// Declare an explanation and expose the matching `explain_<name>`.
    pub fn explaining(self, explanation: &str) -> Self {
        let operation = explain_operation(&explanation.into());
        self.declaring(explanation).with_operation(&operation)
    }

    pub fn with_operation(mut self, operation: &str) -> Self {
        self.operations.insert(operation.to_string());
        self
    }

    pub fn without_operation(mut self, operation: &str) -> Self {
        self.operations.remove(operation);
        self
    }
}

impl Candidate for PluginDescriptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn explainer_type(&self) -> Result<Option<ExplainerType>, InspectError> {
        Ok(self.explainer_type.clone())
    }

    fn available_explanations(&self) -> Result<Vec<ExplanationName>, InspectError> {
        Ok(self.available_explanations.clone())
    }

    fn has_operation(&self, operation: &str) -> Result<bool, InspectError> {
        Ok(self.operations.contains(operation))
    }
}
