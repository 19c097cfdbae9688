//! Config checks that run before any analysis.
//!
//! Every [`ConfigCheck`] sees the whole [`DensityConfig`] and records what it
//! finds into a shared [`ValidationReport`]. All checks always run, so a
//! broken config file reports every problem in one go.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::DensityConfig;

/// How bad a finding is. Only errors reject a config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// One problem, located by a JSON pointer such as `/weights/body`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub pointer: String,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.pointer, self.message)
    }
}

/// Findings in the order the checks produced them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    pub fn error(&mut self, pointer: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Error, pointer.into(), message.into());
    }

    pub fn warn(&mut self, pointer: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Warning, pointer.into(), message.into());
    }

    fn push(&mut self, severity: Severity, pointer: String, message: String) {
        self.findings.push(Finding {
            severity,
            pointer,
            message,
        });
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.with_severity(Severity::Warning)
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.severity == severity)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

/// A named check over a [`DensityConfig`].
pub trait ConfigCheck: Send + Sync {
    /// Stable identifier used in trace output
    fn name(&self) -> &'static str;

    fn check(&self, config: &DensityConfig, report: &mut ValidationReport);
}

/// Ordered collection of [`ConfigCheck`]s.
pub struct ValidationEngine {
    checks: Vec<Box<dyn ConfigCheck>>,
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ValidationEngine {
    /// An engine with no checks at all.
    pub fn empty() -> Self {
        Self { checks: Vec::new() }
    }

    /// The checks applied to every loaded config.
    pub fn with_defaults() -> Self {
        Self::empty()
            .with_check(PhraseLength)
            .with_check(RankLimits)
            .with_check(FiniteWeights)
            .with_check(FetchTimeout)
            .with_check(UnknownFields)
    }

    pub fn with_check(mut self, check: impl ConfigCheck + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    pub fn validate(&self, config: &DensityConfig) -> ValidationReport {
        let mut report = ValidationReport::default();
        for check in &self.checks {
            let before = report.findings.len();
            check.check(config, &mut report);
            let added = report.findings.len() - before;
            if added > 0 {
                tracing::trace!(check = check.name(), findings = added, "config check fired");
            }
        }
        report
    }
}

struct PhraseLength;

impl ConfigCheck for PhraseLength {
    fn name(&self) -> &'static str {
        "phrase_length"
    }

    fn check(&self, config: &DensityConfig, report: &mut ValidationReport) {
        if config.max_words < 2 {
            report.error(
                "/max_words",
                format!("max_words must be at least 2, got {}", config.max_words),
            );
        }
    }
}

struct RankLimits;

impl ConfigCheck for RankLimits {
    fn name(&self) -> &'static str {
        "rank_limits"
    }

    fn check(&self, config: &DensityConfig, report: &mut ValidationReport) {
        if config.top_n == 0 {
            report.error("/top_n", "top_n must be at least 1");
        }
        if !config.relevance_floor.is_finite() {
            report.error("/relevance_floor", "relevance_floor must be a finite number");
        }
    }
}

/// Non-finite weights poison every total they touch; negative ones only
/// lower scores.
struct FiniteWeights;

impl ConfigCheck for FiniteWeights {
    fn name(&self) -> &'static str {
        "finite_weights"
    }

    fn check(&self, config: &DensityConfig, report: &mut ValidationReport) {
        let w = &config.weights;
        let weights = [
            ("url", w.url),
            ("title", w.title),
            ("metadata", w.metadata),
            ("heading_base", w.heading_base),
            ("body", w.body),
        ];

        for (field, value) in weights {
            let pointer = format!("/weights/{field}");
            if !value.is_finite() {
                report.error(pointer, format!("{field} weight must be a finite number"));
            } else if value < 0.0 {
                report.warn(pointer, format!("{field} weight is negative; scores may decrease"));
            }
        }
    }
}

struct FetchTimeout;

impl ConfigCheck for FetchTimeout {
    fn name(&self) -> &'static str {
        "fetch_timeout"
    }

    fn check(&self, config: &DensityConfig, report: &mut ValidationReport) {
        if config.fetch_timeout_secs == 0 {
            report.error("/fetch_timeout_secs", "fetch_timeout_secs must be greater than 0");
        }
    }
}

struct UnknownFields;

impl UnknownFields {
    fn report_keys(
        prefix: &str,
        fields: &HashMap<String, serde_json::Value>,
        report: &mut ValidationReport,
    ) {
        let mut keys: Vec<&str> = fields.keys().map(String::as_str).collect();
        keys.sort_unstable();
        for key in keys {
            report.warn(format!("{prefix}/{key}"), format!("unrecognized field \"{key}\""));
        }
    }
}

impl ConfigCheck for UnknownFields {
    fn name(&self) -> &'static str {
        "unknown_fields"
    }

    fn check(&self, config: &DensityConfig, report: &mut ValidationReport) {
        Self::report_keys("", &config.unknown_fields, report);
        Self::report_keys("/weights", &config.weights.unknown_fields, report);
    }
}
