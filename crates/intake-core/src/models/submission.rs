use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::constants::FULL_NAME_FIELD;

/// Text fields of one form submission, in the order their names first appeared.
///
/// Values are kept verbatim. A name sent more than once (a checkbox group) keeps every value
/// in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionFields {
    entries: Vec<(String, Vec<String>)>,
}

/// Values submitted under one name.
///
/// Serializes as a plain string for a single value and as an array otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldValues<'a>(pub &'a [String]);

impl Serialize for FieldValues<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            [single] => serializer.serialize_str(single),
            many => many.serialize(serializer),
        }
    }
}

impl SubmissionFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, after any values already submitted under `name`.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((name, vec![value])),
        }
    }

    /// First value submitted under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn get_all(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, FieldValues<'_>)> {
        self.entries
            .iter()
            .map(|(n, values)| (n.as_str(), FieldValues(values)))
    }

    /// Number of distinct field names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for SubmissionFields
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = SubmissionFields::new();
        for (name, value) in iter {
            fields.append(name, value);
        }
        fields
    }
}

impl Serialize for SubmissionFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, values) in self.iter() {
            map.serialize_entry(name, &values)?;
        }
        map.end()
    }
}

/// Submission that passed the intake validator.
///
/// Only [`crate::validation::validate_submission`] constructs this type, so holding one
/// guarantees that the full name and phone are present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedSubmission {
    fields: SubmissionFields,
}

impl AcceptedSubmission {
    pub(crate) fn new(fields: SubmissionFields) -> Self {
        Self { fields }
    }

    pub fn full_name(&self) -> &str {
        self.fields.get(FULL_NAME_FIELD).unwrap_or_default()
    }

    pub fn fields(&self) -> &SubmissionFields {
        &self.fields
    }
}
