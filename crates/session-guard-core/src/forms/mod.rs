//! Generic HTML form helpers, independent of authentication.
//!
//! `validate_form` checks field values against an ordered rule set and
//! reports the first violation; `get_form_data` collects trimmed values for
//! submission.

pub mod data;
pub mod validate;

use std::collections::HashMap;

pub use data::{get_form_data, FormData};
pub use validate::{validate_form, FieldRule, RuleSet, ValidationResult};

/// A form whose named controls can be read.
pub trait Form {
    /// Raw value of the control `name`, or `None` if the form has no such control.
    fn field_value(&self, name: &str) -> Option<String>;
}

/// In-memory form: control name → current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    fields: HashMap<String, String>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }
}

impl Form for FormFields {
    fn field_value(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }
}

impl Form for HashMap<String, String> {
    fn field_value(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}
