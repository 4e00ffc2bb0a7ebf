//! Capability checks run before a plugin is wired into the host.
//!
//! Every entry point returns a `Verdict` and never fails: a plugin that
//! cannot be inspected is rejected like one that lacks an operation. Each
//! rejection reason is also reported to the validator's `DiagnosticSink`, so
//! a single candidate may produce several warnings.

use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::extension::{
    Candidate, ExplainerType, ExplanationName, FIT_OPERATION, InspectError, PARALLEL_OPERATION,
    PREDICT_OPERATION, PluginKind, RENDER_OPERATION, explain_operation,
};
use std::collections::BTreeSet;

/// Why a candidate was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("Proposed explainer is not a {expected} (declared {}).", declared_tag(.declared))]
    WrongType {
        expected: ExplainerType,
        declared: Option<ExplainerType>,
    },
    #[error(
        "Proposed explainer has available explanation {explanation} but has no respective method."
    )]
    MissingExplanation { explanation: ExplanationName },
    #[error("Explainer not valid due to missing fit function.")]
    MissingFit,
    #[error("Explainer not valid due to missing predict function.")]
    MissingPredict,
    #[error("Proposed provider is not valid.")]
    NotAProvider,
    #[error("Validate function threw exception {0}")]
    Inspection(#[from] InspectError),
}

fn declared_tag(declared: &Option<ExplainerType>) -> String {
    match declared {
        Some(tag) => format!("'{tag}'"),
        None => "no explainer_type".to_string(),
    }
}

/// Outcome of one validation call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Verdict {
    Accepted,
    Rejected(Vec<Rejection>),
}

impl Verdict {
    fn from_rejections(rejections: Vec<Rejection>) -> Self {
        if rejections.is_empty() {
            Verdict::Accepted
        } else {
            Verdict::Rejected(rejections)
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    pub fn rejections(&self) -> &[Rejection] {
        match self {
            Verdict::Accepted => &[],
            Verdict::Rejected(rejections) => rejections,
        }
    }
}

/// Stateless capability validator reporting to an injected sink.
#[derive(Debug, Clone, Default)]
pub struct Validator<S = TracingSink> {
    sink: S,
}

impl<S: DiagnosticSink> Validator<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Validate `candidate` as a plugin of `kind`.
    pub fn validate<C: Candidate + ?Sized>(&self, kind: PluginKind, candidate: &C) -> Verdict {
        match kind.expected_type() {
            None => self.validate_provider(candidate),
            Some(ExplainerType::Glassbox) => self.validate_glassbox(candidate),
            Some(expected) => self.validate_explainer(candidate, &expected),
        }
    }

    /// Check the declared tag against `expected` and require an
    /// `explain_<name>` operation for every declared explanation.
    ///
    /// A candidate declaring no explanations passes once its tag matches.
    pub fn validate_explainer<C: Candidate + ?Sized>(
        &self,
        candidate: &C,
        expected: &ExplainerType,
    ) -> Verdict {
        self.conclude(candidate, explainer_rejections(candidate, expected))
    }

    pub fn validate_blackbox<C: Candidate + ?Sized>(&self, candidate: &C) -> Verdict {
        self.validate_explainer(candidate, &ExplainerType::Blackbox)
    }

    pub fn validate_greybox<C: Candidate + ?Sized>(&self, candidate: &C) -> Verdict {
        self.validate_explainer(candidate, &ExplainerType::Greybox)
    }

    pub fn validate_data<C: Candidate + ?Sized>(&self, candidate: &C) -> Verdict {
        self.validate_explainer(candidate, &ExplainerType::Data)
    }

    pub fn validate_perf<C: Candidate + ?Sized>(&self, candidate: &C) -> Verdict {
        self.validate_explainer(candidate, &ExplainerType::Perf)
    }

    /// Glassbox explainers are trainable models: on top of the explainer
    /// check they must expose `fit` and `predict`. The three checks run
    /// independently and each failure is reported on its own.
    pub fn validate_glassbox<C: Candidate + ?Sized>(&self, candidate: &C) -> Verdict {
        let mut rejections = explainer_rejections(candidate, &ExplainerType::Glassbox)
            .unwrap_or_else(|err| vec![Rejection::Inspection(err)]);
        for (operation, missing) in [
            (FIT_OPERATION, Rejection::MissingFit),
            (PREDICT_OPERATION, Rejection::MissingPredict),
        ] {
            match candidate.has_operation(operation) {
                Ok(true) => {}
                Ok(false) => rejections.push(missing),
                Err(err) => rejections.push(Rejection::Inspection(err)),
            }
        }
        self.conclude(candidate, Ok(rejections))
    }

    /// Providers carry no tag; exposing `render` or `parallel` is enough.
    pub fn validate_provider<C: Candidate + ?Sized>(&self, candidate: &C) -> Verdict {
        self.conclude(candidate, provider_rejections(candidate))
    }

    fn conclude<C: Candidate + ?Sized>(
        &self,
        candidate: &C,
        outcome: Result<Vec<Rejection>, InspectError>,
    ) -> Verdict {
        let rejections = outcome.unwrap_or_else(|err| vec![Rejection::Inspection(err)]);
        let plugin = candidate.name();
        if rejections.is_empty() {
            self.sink.accepted(plugin);
        }
        for rejection in &rejections {
            self.sink.warn(plugin, rejection);
        }
        Verdict::from_rejections(rejections)
    }
}

fn explainer_rejections<C: Candidate + ?Sized>(
    candidate: &C,
    expected: &ExplainerType,
) -> Result<Vec<Rejection>, InspectError> {
    let declared = candidate.explainer_type()?;
    let explanations = candidate.available_explanations()?;

    if declared.as_ref().map(ExplainerType::as_str) != Some(expected.as_str()) {
        return Ok(vec![Rejection::WrongType {
            expected: expected.clone(),
            declared,
        }]);
    }

    let mut rejections = Vec::new();
    let mut seen = BTreeSet::new();
    for explanation in explanations {
        // Report each missing explanation once even if declared twice.
        if !seen.insert(explanation.clone()) {
            continue;
        }
        if !candidate.has_operation(&explain_operation(&explanation))? {
            rejections.push(Rejection::MissingExplanation { explanation });
        }
    }
    Ok(rejections)
}

fn provider_rejections<C: Candidate + ?Sized>(
    candidate: &C,
) -> Result<Vec<Rejection>, InspectError> {
    let has_render = candidate.has_operation(RENDER_OPERATION)?;
    let has_parallel = candidate.has_operation(PARALLEL_OPERATION)?;
    if has_render || has_parallel {
        Ok(Vec::new())
    } else {
        Ok(vec![Rejection::NotAProvider])
    }
}
