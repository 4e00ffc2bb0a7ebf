//! Extension validation for the interpretability toolkit.
//!
//! Third-party packages contribute explainers (blackbox, greybox, glassbox,
//! data, perf) and visualization providers. Before a plugin is registered it
//! must satisfy the structural contract of its kind, checked here by
//! [`Validator`]. Validation never fails to the caller: every problem becomes
//! a rejection in the returned [`Verdict`] and a warning on the injected
//! [`DiagnosticSink`].
//!
//! The plugin API itself is the [`Candidate`] trait; [`PluginDescriptor`]
//! implements it from plain data so manifests can describe plugins without
//! code.

pub mod config;
pub mod diagnostics;
pub mod extension;
pub mod logging;
pub mod manifest;
pub mod report;
pub mod validation;

pub use diagnostics::{Diagnostic, DiagnosticSink, MemorySink, TracingSink};
pub use extension::{
    BLACKBOX_EXTENSION_KEY, Candidate, DATA_EXTENSION_KEY, ExplainerType, ExplanationName,
    ExtensionKey, ExtensionRegistry, GLASSBOX_EXTENSION_KEY, GREYBOX_EXTENSION_KEY, InspectError,
    PERF_EXTENSION_KEY, PROVIDER_EXTENSION_KEY, Plugin, PluginDescriptor, PluginKind,
    explain_operation,
};
pub use manifest::{MANIFEST_SCHEMA_VERSION, ManifestEntry, PluginManifest, load_manifests};
pub use report::{KeyReport, RejectedPlugin, ValidationReport, register_and_report};
pub use validation::{Rejection, Validator, Verdict};
