//! Holds validated plugins grouped by extension key.
//!
//! Registration runs the capability validator for the requested kind; a
//! rejected candidate is dropped and the caller continues with the next one.

use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::extension::contract::Candidate;
use crate::extension::identity::{ExtensionKey, PluginKind};
use crate::validation::{Validator, Verdict};
use std::collections::BTreeMap;

/// A registered plugin, boxed behind the contract it was validated against.
pub type Plugin = Box<dyn Candidate + Send + Sync>;

#[derive(Default)]
pub struct ExtensionRegistry<S = TracingSink> {
    validator: Validator<S>,
    plugins: BTreeMap<ExtensionKey, Vec<Plugin>>,
}

impl<S: DiagnosticSink> ExtensionRegistry<S> {
    pub fn new(validator: Validator<S>) -> Self {
        Self {
            validator,
            plugins: BTreeMap::new(),
        }
    }

    pub fn validator(&self) -> &Validator<S> {
        &self.validator
    }

    /// Validate `candidate` as `kind` and keep it when accepted.
    ///
    /// Returns the verdict so callers can report why a plugin was skipped.
    pub fn register<C>(&mut self, kind: PluginKind, candidate: C) -> Verdict
    where
        C: Candidate + Send + Sync + 'static,
    {
        let verdict = self.validator.validate(kind, &candidate);
        if verdict.is_accepted() {
            self.plugins
                .entry(kind.extension_key())
                .or_default()
                .push(Box::new(candidate));
        }
        verdict
    }

    /// Register several candidates of one kind; returns how many were kept.
    pub fn register_all<C, I>(&mut self, kind: PluginKind, candidates: I) -> usize
    where
        C: Candidate + Send + Sync + 'static,
        I: IntoIterator<Item = C>,
    {
        candidates
            .into_iter()
            .map(|candidate| self.register(kind, candidate))
            .filter(Verdict::is_accepted)
            .count()
    }

    /// Registered plugins of one kind, in registration order.
    pub fn plugins(&self, kind: PluginKind) -> &[Plugin] {
        self.plugins
            .get(&kind.extension_key())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Resolve a registered plugin by name.
    pub fn find(&self, kind: PluginKind, name: &str) -> Option<&Plugin> {
        self.plugins(kind)
            .iter()
            .find(|plugin| plugin.name() == name)
    }

    /// Extension keys that hold at least one plugin.
    pub fn keys(&self) -> impl Iterator<Item = &ExtensionKey> {
        self.plugins.keys()
    }

    pub fn len(&self) -> usize {
        self.plugins.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
