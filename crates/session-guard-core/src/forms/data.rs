use serde::ser::{Serialize, SerializeMap, Serializer};

use super::Form;

/// Collected form values in request order. Empty values are `None` and
/// serialize as JSON `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, Option<String>)>,
}

impl FormData {
    /// `None` if the field was not collected, `Some(None)` if it was empty.
    pub fn get(&self, field: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_deref())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, field: &str, value: Option<String>) {
        match self.entries.iter_mut().find(|(name, _)| name == field) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((field.to_string(), value)),
        }
    }
}

impl Serialize for FormData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Trimmed values of `fields`; controls missing from the form are skipped.
pub fn get_form_data<F, I, S>(form: &F, fields: I) -> FormData
where
    F: Form + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut data = FormData::default();
    for field in fields {
        let field = field.as_ref();
        if let Some(raw) = form.field_value(field) {
            let trimmed = raw.trim();
            let value = (!trimmed.is_empty()).then(|| trimmed.to_string());
            data.insert(field, value);
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FormFields;

    #[test]
    fn test_trims_and_skips_missing() {
        let form = FormFields::new().with("a", "  x ");
        let data = get_form_data(&form, ["a", "b"]);
        assert_eq!(data.len(), 1);
        assert_eq!(data.get("a"), Some(Some("x")));
        assert_eq!(data.get("b"), None);
        assert!(!data.contains("b"));
    }

    #[test]
    fn test_empty_value_becomes_none() {
        let form = FormFields::new().with("title", "Faust").with("notes", "   ");
        let data = get_form_data(&form, vec!["title".to_string(), "notes".to_string()]);
        assert_eq!(data.get("notes"), Some(None));
        assert_eq!(
            serde_json::to_string(&data).unwrap(),
            r#"{"title":"Faust","notes":null}"#
        );
    }

    #[test]
    fn test_keeps_requested_order() {
        let form = FormFields::new().with("a", "1").with("b", "2").with("c", "3");
        let data = get_form_data(&form, ["c", "a", "b"]);
        let names: Vec<_> = data.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_no_fields() {
        let form = FormFields::new().with("a", "1");
        let data = get_form_data(&form, Vec::<&str>::new());
        assert!(data.is_empty());
        assert_eq!(serde_json::to_string(&data).unwrap(), "{}");
    }
}
