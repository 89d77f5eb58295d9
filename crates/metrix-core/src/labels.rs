//! Label canonicalization.
//!
//! A [`LabelSet`] is always kept sorted by label name, so equality, hashing,
//! and the rendered fragment are independent of the order callers supplied
//! the pairs in.

use std::collections::BTreeMap;
use std::fmt::Write;

/// Escape a label value for the text exposition format.
pub(crate) fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Canonical, name-sorted set of label pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LabelSet {
    pairs: Vec<(String, String)>,
}

/// Opaque lookup key for one series of a metric.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesKey(String);

impl LabelSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from borrowed pairs. A repeated name keeps the last value.
    pub fn from_pairs(labels: &[(&str, &str)]) -> Self {
        let map: BTreeMap<String, String> = labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { pairs: map.into_iter().collect() }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .binary_search_by(|(k, _)| k.as_str().cmp(name))
            .ok()
            .map(|i| self.pairs[i].1.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Series identity. Each name and value is length-prefixed, so label
    /// content can never be mistaken for a separator.
    pub fn identity(&self) -> SeriesKey {
        let mut key = String::new();
        for (k, v) in &self.pairs {
            let _ = write!(key, "{}:{}{}:{}", k.len(), k, v.len(), v);
        }
        SeriesKey(key)
    }

    /// `{k1="v1",k2="v2"}`, or an empty string for an empty set.
    pub fn render(&self) -> String {
        self.render_with(None)
    }

    /// Render with one trailing pair appended after the sorted labels
    /// (used for the histogram `le` label). A caller label of the same name
    /// is dropped so the fragment never carries a duplicate.
    pub(crate) fn render_with(&self, extra: Option<(&str, &str)>) -> String {
        let mut parts: Vec<String> = self
            .pairs
            .iter()
            .filter(|(k, _)| extra.map_or(true, |(name, _)| k.as_str() != name))
            .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
            .collect();
        if let Some((k, v)) = extra {
            parts.push(format!("{}=\"{}\"", k, escape_label(v)));
        }
        if parts.is_empty() {
            return String::new();
        }
        format!("{{{}}}", parts.join(","))
    }
}

impl From<&[(&str, &str)]> for LabelSet {
    fn from(labels: &[(&str, &str)]) -> Self {
        Self::from_pairs(labels)
    }
}

impl<const N: usize> From<[(&str, &str); N]> for LabelSet {
    fn from(labels: [(&str, &str); N]) -> Self {
        Self::from_pairs(&labels)
    }
}
