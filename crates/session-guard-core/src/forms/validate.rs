use regex::Regex;
use serde::Serialize;

use super::Form;

/// Constraints for one form field. Checked in order: required, minimum
/// length, pattern.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub required: bool,
    pub min_length: Option<usize>,
    pub pattern: Option<Regex>,
    /// Human-readable field name used in messages.
    pub label: String,
    /// Replaces the generic message when `pattern` does not match.
    pub message: Option<String>,
}

impl FieldRule {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            required: false,
            min_length: None,
            pattern: None,
            label: label.into(),
            message: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// First violated constraint for an already trimmed value.
    fn check(&self, value: &str) -> Option<String> {
        if self.required && value.is_empty() {
            return Some(format!("{} ist erforderlich.", self.label));
        }

        if let Some(min_length) = self.min_length {
            if value.chars().count() < min_length {
                return Some(format!(
                    "{} muss mindestens {} Zeichen haben.",
                    self.label, min_length
                ));
            }
        }

        if let Some(ref pattern) = self.pattern {
            if !pattern.is_match(value) {
                return Some(
                    self.message
                        .clone()
                        .unwrap_or_else(|| format!("{} hat ein ungültiges Format.", self.label)),
                );
            }
        }

        None
    }
}

/// Field rules in evaluation order.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<(String, FieldRule)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule for `field`. Re-adding a field replaces its rule but keeps
    /// its original position.
    pub fn field(mut self, field: impl Into<String>, rule: FieldRule) -> Self {
        let field = field.into();
        match self.rules.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => *existing = rule,
            None => self.rules.push((field, rule)),
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

/// Check `form` against `rules` in order; the first violation wins.
/// A control missing from the form reads as an empty value.
pub fn validate_form<F: Form + ?Sized>(form: &F, rules: &RuleSet) -> ValidationResult {
    for (field, rule) in rules.iter() {
        let raw = form.field_value(field).unwrap_or_default();
        if let Some(message) = rule.check(raw.trim()) {
            return ValidationResult::invalid(message);
        }
    }
    ValidationResult::ok()
}
