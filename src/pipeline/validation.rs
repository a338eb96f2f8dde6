//! Config checks run once, before any note is read.
//!
//! Each [`ValidationRule`] looks at one concern of a
//! [`SummaryConfig`](super::config::SummaryConfig). [`ValidationEngine`] runs
//! all of them and keeps every finding, so a bad config file is reported in
//! one pass. Errors stop the run; warnings are logged and the run goes on.

use serde::Serialize;

use super::config::SummaryConfig;
use super::error_code::ErrorCode;
use super::errors::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// One finding: a [`ConfigError`] tagged with its severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub error: ConfigError,
}

impl ValidationDiagnostic {
    pub fn error(err: ConfigError) -> Self {
        Self {
            severity: Severity::Error,
            error: err,
        }
    }

    pub fn warning(err: ConfigError) -> Self {
        Self {
            severity: Severity::Warning,
            error: err,
        }
    }

    fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Findings from every rule, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &ConfigError> {
        self.diagnostics
            .iter()
            .filter(|d| d.is_error())
            .map(|d| &d.error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ConfigError> {
        self.diagnostics
            .iter()
            .filter(|d| !d.is_error())
            .map(|d| &d.error)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(ValidationDiagnostic::is_error)
    }

    /// A report with only warnings still lets the run proceed.
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// No findings at all, neither errors nor warnings.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// A check over one aspect of a [`SummaryConfig`].
pub trait ValidationRule: Send + Sync {
    /// Stable identifier, e.g. `"positive_limits"`.
    fn name(&self) -> &str;

    fn validate(&self, config: &SummaryConfig) -> Vec<ValidationDiagnostic>;
}

/// Ordered set of rules.
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// The rules every digest run is checked against.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(PositiveLimitsRule));
        engine.add_rule(Box::new(CoreCountRule));
        engine.add_rule(Box::new(StopwordEntriesRule));
        engine.add_rule(Box::new(UnknownFieldsRule));
        engine
    }

    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Rule names in run order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn validate(&self, config: &SummaryConfig) -> ValidationReport {
        ValidationReport {
            diagnostics: self
                .rules
                .iter()
                .flat_map(|rule| rule.validate(config))
                .collect(),
        }
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Caps, chunk size and the keyword length floor must be non-zero.
struct PositiveLimitsRule;

impl ValidationRule for PositiveLimitsRule {
    fn name(&self) -> &str {
        "positive_limits"
    }

    fn validate(&self, config: &SummaryConfig) -> Vec<ValidationDiagnostic> {
        let checks: &[(&str, usize)] = &[
            ("max_keywords", config.max_keywords),
            ("chunk_size", config.chunk_size),
            ("summary_sentences", config.summary_sentences),
            ("min_keyword_chars", config.min_keyword_chars),
        ];

        checks
            .iter()
            .filter(|(_, value)| *value == 0)
            .map(|&(field, _)| {
                ValidationDiagnostic::error(
                    ConfigError::new(
                        ErrorCode::NonPositiveLimit,
                        format!("/{field}"),
                        format!("{field} must be greater than 0"),
                    )
                    .with_hint(format!("Remove {field} to use the default, or set a positive value")),
                )
            })
            .collect()
    }
}

/// More core keywords than kept keywords is allowed but likely a mistake.
struct CoreCountRule;

impl ValidationRule for CoreCountRule {
    fn name(&self) -> &str {
        "core_count"
    }

    fn validate(&self, config: &SummaryConfig) -> Vec<ValidationDiagnostic> {
        if config.max_keywords == 0 || config.core_count <= config.max_keywords {
            return Vec::new();
        }
        vec![ValidationDiagnostic::warning(
            ConfigError::new(
                ErrorCode::InvalidCombo,
                "/core_count",
                format!(
                    "core_count {} exceeds max_keywords {}; every keyword will be core",
                    config.core_count, config.max_keywords
                ),
            )
            .with_hint("Lower core_count or raise max_keywords"),
        )]
    }
}

/// Blank extra stopwords never match a token.
struct StopwordEntriesRule;

impl ValidationRule for StopwordEntriesRule {
    fn name(&self) -> &str {
        "extra_stopwords"
    }

    fn validate(&self, config: &SummaryConfig) -> Vec<ValidationDiagnostic> {
        config
            .extra_stopwords
            .iter()
            .enumerate()
            .filter(|(_, word)| word.trim().is_empty())
            .map(|(i, _)| {
                ValidationDiagnostic::warning(
                    ConfigError::new(
                        ErrorCode::BlankEntry,
                        format!("/extra_stopwords/{i}"),
                        "blank stopword is ignored",
                    )
                    .with_hint("Remove the empty entry"),
                )
            })
            .collect()
    }
}

/// Fields the config does not define: errors under `strict`, else warnings.
struct UnknownFieldsRule;

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(&self, config: &SummaryConfig) -> Vec<ValidationDiagnostic> {
        let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
        keys.sort();

        let diagnostic = if config.strict {
            ValidationDiagnostic::error
        } else {
            ValidationDiagnostic::warning
        };
        keys.into_iter()
            .map(|key| {
                diagnostic(
                    ConfigError::new(
                        ErrorCode::UnknownField,
                        format!("/{key}"),
                        format!("unrecognized field \"{key}\""),
                    )
                    .with_hint("Check spelling or remove this field"),
                )
            })
            .collect()
    }
}
