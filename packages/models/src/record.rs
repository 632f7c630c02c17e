use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One feed item as a mapping of field name to optional text.
///
/// A field that exists in the feed item but carries no text maps to
/// `None`; a field that does not exist at all is simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    fields: BTreeMap<String, Option<String>>,
}

impl RawRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, replacing any earlier value.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        self.fields.insert(name.into(), value);
    }

    /// Appends text to `name`, creating the field if needed.
    pub fn append_text(&mut self, name: &str, text: &str) {
        let slot = self.fields.entry(name.to_string()).or_insert(None);
        match slot {
            Some(existing) => existing.push_str(text),
            None => *slot = Some(text.to_string()),
        }
    }

    /// Text of `name`, or `None` when the field is absent or empty.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(Option::as_deref)
            .filter(|s| !s.is_empty())
    }

    /// Whether the field exists in the item, with or without text.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (k, v) in iter {
            record.insert(k, Some(v.into()));
        }
        record
    }
}
