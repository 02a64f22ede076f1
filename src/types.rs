//! Request and response value types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Form fields sent with an analysis request.
///
/// Fields keep insertion order and may repeat, matching what the gateway's
/// form decoder accepts. [`set`](Self::set) replaces every occurrence of a
/// key; [`append`](Self::append) adds another value alongside existing ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    fields: Vec<(String, String)>,
}

impl RequestOptions {
    /// Create an empty set of options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any existing occurrences.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.fields.retain(|(k, _)| *k != key);
        self.fields.push((key, value.into()));
    }

    /// Chainable [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Add another value for `key`, keeping existing occurrences.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.push((key.into(), value.into()));
    }

    /// The first value recorded for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value recorded for `key`, in insertion order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .filter(move |(k, _)| k.as_str() == key)
            .map(|(_, v)| v.as_str())
    }

    /// Number of fields, counting repeats.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields have been recorded.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Borrow the fields as form-encodable pairs.
    pub(crate) fn pairs(&self) -> &[(String, String)] {
        &self.fields
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A decoded API response: an open mapping from field names to JSON values.
///
/// Responses share no schema beyond the `status` / `statusInfo` envelope, so
/// the body is exposed as decoded JSON rather than forced into fixed types.
/// Use [`status`](Self::status) for the envelope and [`get`](Self::get) for
/// everything else.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisResult {
    fields: Map<String, Value>,
}

impl AnalysisResult {
    /// The response `status` field, when present and textual.
    pub fn status(&self) -> Option<&str> {
        self.fields.get("status").and_then(Value::as_str)
    }

    /// The response `statusInfo` field, when present and textual.
    pub fn status_info(&self) -> Option<&str> {
        self.fields.get("statusInfo").and_then(Value::as_str)
    }

    /// Whether the API reported success.
    pub fn is_ok(&self) -> bool {
        self.status() == Some("OK")
    }

    /// Look up a decoded field by name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Iterate over all decoded fields.
    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.fields.iter()
    }

    /// Number of decoded fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the response carried no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Consume the wrapper and return the underlying JSON map.
    pub fn into_inner(self) -> Map<String, Value> {
        self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_replaces_and_append_accumulates() {
        let mut opts = RequestOptions::new();
        opts.set("maxRetrieve", "10");
        opts.set("maxRetrieve", "25");
        assert_eq!(opts.get("maxRetrieve"), Some("25"));
        assert_eq!(opts.len(), 1);

        opts.append("extract", "entity");
        opts.append("extract", "keyword");
        assert_eq!(opts.get_all("extract").collect::<Vec<_>>(), ["entity", "keyword"]);
        assert_eq!(opts.len(), 3);
    }

    #[test]
    fn test_with_is_chainable() {
        let opts = RequestOptions::new()
            .with("showSourceText", "1")
            .with("sentiment", "1");
        assert_eq!(opts.get("showSourceText"), Some("1"));
        assert_eq!(opts.get("sentiment"), Some("1"));
    }

    #[test]
    fn test_from_iterator() {
        let opts: RequestOptions = [("disambiguate", "0"), ("linkedData", "1")]
            .into_iter()
            .collect();
        assert_eq!(opts.get("disambiguate"), Some("0"));
        assert_eq!(opts.len(), 2);
    }

    #[test]
    fn test_result_envelope_accessors() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "status": "OK",
            "language": "english",
            "keywords": [{"text": "rust", "relevance": "0.97"}]
        }))
        .unwrap();

        assert!(result.is_ok());
        assert_eq!(result.status(), Some("OK"));
        assert_eq!(result.status_info(), None);
        assert_eq!(result.get("language"), Some(&json!("english")));
        assert_eq!(result.iter().count(), 3);
    }

    #[test]
    fn test_result_decodes_nested_values() {
        let result: AnalysisResult = serde_json::from_str(
            r#"{"status":"ERROR","statusInfo":"invalid-api-key","usage":null}"#,
        )
        .unwrap();

        assert!(!result.is_ok());
        assert_eq!(result.status_info(), Some("invalid-api-key"));
        assert_eq!(result.get("usage"), Some(&Value::Null));
        assert_eq!(result.get("missing"), None);
    }
}
