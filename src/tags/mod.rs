//! Tag sets and the raw comment format
//!
//! - [`TagSet`]: ordered field name → values mapping, keyed case-insensitively
//! - [`sanitize`]: field-name cleanup
//! - [`raw`]: `NAME=value` line serializer consumed by `vorbiscomment --raw`

pub mod raw;
pub mod sanitize;

pub use raw::{line_count, render_comments, write_comments};
pub use sanitize::{is_allowed_name_byte, sanitize_name, sanitize_name_bytes};

use serde::Deserialize;

use crate::error::{Result, TagWriteError};

/// Ordered mapping from field name to one or more values.
///
/// Names compare ASCII-case-insensitively; the first spelling seen is kept.
/// Iteration follows insertion order, which is also the order lines are
/// written in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    entries: Vec<(String, Vec<String>)>,
}

impl TagSet {
    /// Create an empty tag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The tag set used to clear a file: a single group with no values.
    ///
    /// Serializes to zero lines, which raw write mode treats as
    /// "remove every comment".
    pub fn cleared() -> Self {
        Self {
            entries: vec![(String::new(), Vec::new())],
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(existing, _)| existing.eq_ignore_ascii_case(name))
    }

    /// Append one value to `name`, creating the entry if needed.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        match self.position(&name) {
            Some(idx) => self.entries[idx].1.push(value.into()),
            None => self.entries.push((name, vec![value.into()])),
        }
    }

    /// Replace every value of `name`. An existing entry keeps its position.
    pub fn insert<I, V>(&mut self, name: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let name = name.into();
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        match self.position(&name) {
            Some(idx) => self.entries[idx].1 = values,
            None => self.entries.push((name, values)),
        }
    }

    /// Values stored under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.position(name).map(|idx| self.entries[idx].1.as_slice())
    }

    /// Remove `name` and return its values.
    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.position(name).map(|idx| self.entries.remove(idx).1)
    }

    /// Number of distinct field names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, values)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Add a `NAME=VALUE` argument. Only the first `=` splits.
    pub fn push_assignment(&mut self, arg: &str) -> Result<()> {
        match arg.split_once('=') {
            Some((name, value)) if !name.is_empty() => {
                self.push(name, value);
                Ok(())
            }
            _ => Err(TagWriteError::InvalidTagArgument {
                arg: arg.to_string(),
            }),
        }
    }

    /// Parse a JSON object of name → string or array of strings.
    ///
    /// Keys are taken in document order.
    pub fn from_json(json: &str) -> Result<Self> {
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;

        let mut tags = TagSet::new();
        for (name, value) in object {
            match serde_json::from_value::<JsonValues>(value)? {
                JsonValues::One(value) => tags.push(name, value),
                JsonValues::Many(values) => {
                    if tags.get(&name).is_none() {
                        tags.insert(name.as_str(), Vec::<String>::new());
                    }
                    for value in values {
                        tags.push(name.as_str(), value);
                    }
                }
            }
        }
        Ok(tags)
    }
}

impl<N, V> FromIterator<(N, V)> for TagSet
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut tags = TagSet::new();
        for (name, value) in iter {
            tags.push(name, value);
        }
        tags
    }
}

/// A JSON tag value: one string or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonValues {
    One(String),
    Many(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_merges_case_insensitively() {
        let mut tags = TagSet::new();
        tags.push("Artist", "A");
        tags.push("ARTIST", "B");
        tags.push("title", "T");

        assert_eq!(tags.len(), 2);
        assert_eq!(tags.get("artist").unwrap(), ["A", "B"]);
        let names: Vec<&str> = tags.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["Artist", "title"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut tags = TagSet::new();
        tags.push("ALBUM", "old");
        tags.push("DATE", "2001");
        tags.insert("album", ["new", "newer"]);

        let names: Vec<&str> = tags.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["ALBUM", "DATE"]);
        assert_eq!(tags.get("ALBUM").unwrap(), ["new", "newer"]);
    }

    #[test]
    fn test_remove() {
        let mut tags: TagSet = [("GENRE", "Rock"), ("GENRE", "Pop")].into_iter().collect();
        assert_eq!(tags.remove("genre"), Some(vec!["Rock".to_string(), "Pop".to_string()]));
        assert!(tags.is_empty());
        assert_eq!(tags.remove("genre"), None);
    }

    #[test]
    fn test_cleared_has_one_empty_group() {
        let tags = TagSet::cleared();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags.get("").unwrap().len(), 0);
    }

    #[test]
    fn test_push_assignment() {
        let mut tags = TagSet::new();
        tags.push_assignment("TITLE=a=b").unwrap();
        tags.push_assignment("COMMENT=").unwrap();
        assert_eq!(tags.get("TITLE").unwrap(), ["a=b"]);
        assert_eq!(tags.get("COMMENT").unwrap(), [""]);

        let err = tags.push_assignment("novalue").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_TAG_ARGUMENT");
        assert!(tags.push_assignment("=value").is_err());
    }

    #[test]
    fn test_from_json_keeps_document_order() {
        let tags = TagSet::from_json(r#"{"title": "T", "ARTIST": ["A", "B"], "Title": ["T2"]}"#)
            .unwrap();
        let names: Vec<&str> = tags.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["title", "ARTIST"]);
        assert_eq!(tags.get("TITLE").unwrap(), ["T", "T2"]);
        assert_eq!(tags.get("artist").unwrap(), ["A", "B"]);
    }

    #[test]
    fn test_from_json_rejects_non_string_values() {
        assert!(TagSet::from_json(r#"{"TRACKNUMBER": 3}"#).is_err());
        assert!(TagSet::from_json(r#"["TITLE"]"#).is_err());
    }
}
