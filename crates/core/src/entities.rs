//! Entity maps built fresh for every request

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::intent::Department;

/// Entity kind holding the canonical department key
pub const DEPARTMENT_KEY: &str = "department";

/// Entity kind holding the requested sub-topic (e.g. "payment", "vision")
pub const TOPIC_KEY: &str = "topic";

/// A span reported by an entity tagger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    /// Entity type label (ORG, GPE, PERSON, DATE, CARDINAL)
    pub label: String,
    /// Surface text of the span
    pub text: String,
    /// Byte offset where the span starts
    pub start: usize,
    /// Byte offset where the span ends
    pub end: usize,
}

/// Mapping from entity kind to detected value.
///
/// Ordered so that serialized output and lookups are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityMap(BTreeMap<String, String>);

impl EntityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an entity value
    pub fn insert(&mut self, kind: impl Into<String>, value: impl Into<String>) {
        self.0.insert(kind.into(), value.into());
    }

    pub fn get(&self, kind: &str) -> Option<&str> {
        self.0.get(kind).map(String::as_str)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.0.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Seed the map from tagger spans; later spans with the same label win
    pub fn extend_spans<'a>(&mut self, spans: impl IntoIterator<Item = &'a EntitySpan>) {
        for span in spans {
            self.insert(span.label.clone(), span.text.clone());
        }
    }

    /// Canonical department, if one was extracted
    pub fn department(&self) -> Option<Department> {
        self.get(DEPARTMENT_KEY).and_then(Department::from_key)
    }

    /// Requested sub-topic, if one was extracted
    pub fn topic(&self) -> Option<&str> {
        self.get(TOPIC_KEY)
    }
}

impl FromIterator<(String, String)> for EntityMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_accessor() {
        let mut entities = EntityMap::new();
        assert_eq!(entities.department(), None);

        entities.insert(DEPARTMENT_KEY, "civil");
        assert_eq!(entities.department(), Some(Department::Civil));

        entities.insert(DEPARTMENT_KEY, "chemical");
        assert_eq!(entities.department(), None);
        assert!(entities.contains(DEPARTMENT_KEY));
    }

    #[test]
    fn test_extend_spans_last_wins() {
        let spans = vec![
            EntitySpan { label: "GPE".into(), text: "arvi".into(), start: 0, end: 4 },
            EntitySpan { label: "GPE".into(), text: "wardha".into(), start: 9, end: 15 },
        ];
        let mut entities = EntityMap::new();
        entities.extend_spans(&spans);
        assert_eq!(entities.get("GPE"), Some("wardha"));
        assert_eq!(entities.len(), 1);
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let mut entities = EntityMap::new();
        entities.insert("topic", "vision");
        entities.insert("department", "it");
        let json = serde_json::to_string(&entities).unwrap();
        assert_eq!(json, r#"{"department":"it","topic":"vision"}"#);
    }
}
