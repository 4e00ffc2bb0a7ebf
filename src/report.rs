//! Per-key summary of a validation run.
//!
//! The CLI fills one `ValidationReport` while registering manifest entries
//! and prints it either as text or JSON. Keys are kept in a `BTreeMap` so
//! output is deterministic.

use crate::diagnostics::DiagnosticSink;
use crate::extension::{ExtensionRegistry, PluginDescriptor, PluginKind};
use crate::validation::Verdict;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Accepted plugin names plus rejected plugins with their reasons, in
/// registration order. A name registered twice appears twice.
#[derive(Debug, Clone, Default, Serialize)]
pub struct KeyReport {
    pub accepted: Vec<String>,
    pub rejected: Vec<RejectedPlugin>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedPlugin {
    pub name: String,
    pub reasons: Vec<String>,
}

impl KeyReport {
    /// Reasons recorded for the first rejection of `name`.
    pub fn reasons(&self, name: &str) -> Option<&[String]> {
        self.rejected
            .iter()
            .find(|plugin| plugin.name == name)
            .map(|plugin| plugin.reasons.as_slice())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub extensions: BTreeMap<String, KeyReport>,
}

impl ValidationReport {
    pub fn record(&mut self, kind: PluginKind, plugin: &str, verdict: &Verdict) {
        let entry = self
            .extensions
            .entry(kind.extension_key_str().to_string())
            .or_default();
        if verdict.is_accepted() {
            entry.accepted.push(plugin.to_string());
        } else {
            entry.rejected.push(RejectedPlugin {
                name: plugin.to_string(),
                reasons: verdict
                    .rejections()
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            });
        }
    }

    pub fn accepted_count(&self) -> usize {
        self.extensions.values().map(|key| key.accepted.len()).sum()
    }

    pub fn rejected_count(&self) -> usize {
        self.extensions.values().map(|key| key.rejected.len()).sum()
    }

    pub fn all_accepted(&self) -> bool {
        self.rejected_count() == 0
    }

    /// Human-readable summary, one line per plugin.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for (key, report) in &self.extensions {
            let _ = writeln!(out, "{key}");
            for name in &report.accepted {
                let _ = writeln!(out, "  ok       {name}");
            }
            for plugin in &report.rejected {
                let _ = writeln!(out, "  rejected {}", plugin.name);
                for reason in &plugin.reasons {
                    let _ = writeln!(out, "           - {reason}");
                }
            }
        }
        let _ = writeln!(
            out,
            "{} accepted, {} rejected",
            self.accepted_count(),
            self.rejected_count()
        );
        out
    }
}

/// Register `entries` and record every verdict.
pub fn register_and_report<S, I>(
    registry: &mut ExtensionRegistry<S>,
    entries: I,
) -> ValidationReport
where
    S: DiagnosticSink,
    I: IntoIterator<Item = (PluginKind, PluginDescriptor)>,
{
    let mut report = ValidationReport::default();
    for (kind, descriptor) in entries {
        let name = descriptor.name.clone();
        let verdict = registry.register(kind, descriptor);
        report.record(kind, &name, &verdict);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemorySink;
    use crate::extension::ExplainerType;
    use crate::validation::Validator;

    fn entries() -> Vec<(PluginKind, PluginDescriptor)> {
        vec![
            (
                PluginKind::Glassbox,
                PluginDescriptor::new("ebm")
                    .with_type(ExplainerType::Glassbox)
                    .explaining("global")
                    .with_operation("fit")
                    .with_operation("predict"),
            ),
            (
                PluginKind::Glassbox,
                PluginDescriptor::new("stump")
                    .with_type(ExplainerType::Glassbox)
                    .with_operation("fit"),
            ),
            (PluginKind::Provider, PluginDescriptor::new("silent")),
        ]
    }

    #[test]
    fn report_groups_verdicts_by_extension_key() {
        let mut registry = ExtensionRegistry::new(Validator::new(MemorySink::new()));
        let report = register_and_report(&mut registry, entries());

        assert_eq!(report.accepted_count(), 1);
        assert_eq!(report.rejected_count(), 2);
        assert!(!report.all_accepted());
        assert_eq!(registry.len(), 1);

        let glassbox = &report.extensions["interpret_ext_glassbox"];
        assert_eq!(glassbox.accepted, vec!["ebm".to_string()]);
        assert_eq!(
            glassbox.reasons("stump"),
            Some(&["Explainer not valid due to missing predict function.".to_string()][..])
        );

        let json = serde_json::to_value(&report).unwrap();
        let provider = json.pointer("/extensions/interpret_ext_provider/rejected/0").unwrap();
        assert_eq!(provider["name"], "silent");
        assert_eq!(provider["reasons"][0], "Proposed provider is not valid.");
    }

    #[test]
    fn text_summary_lists_reasons_under_rejected_plugins() {
        let mut registry = ExtensionRegistry::new(Validator::new(MemorySink::new()));
        let text = register_and_report(&mut registry, entries()).render_text();
        assert!(text.contains("  ok       ebm"));
        assert!(text.contains("  rejected stump"));
        assert!(text.contains("- Proposed provider is not valid."));
        assert!(text.ends_with("1 accepted, 2 rejected\n"));
    }

    #[test]
    fn repeated_names_keep_every_verdict() {
        let mut registry = ExtensionRegistry::new(Validator::new(MemorySink::new()));
        let twice = entries().into_iter().chain(entries());
        let report = register_and_report(&mut registry, twice);

        assert_eq!(report.accepted_count(), 2);
        assert_eq!(report.rejected_count(), 4);
        let provider = &report.extensions["interpret_ext_provider"];
        assert_eq!(provider.rejected.len(), 2);
        assert!(
            report
                .render_text()
                .ends_with("2 accepted, 4 rejected\n")
        );
    }
}
