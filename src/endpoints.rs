//! The action/flavor endpoint table.
//!
//! Every analysis capability the API serves is described by a relative URL
//! path keyed on (action, flavor). The table is plain data: swapping it out
//! retargets the whole client without touching any request logic.

use std::collections::HashMap;

use crate::error::AlchemyError;

/// The endpoint table shipped with the crate, covering the public gateway.
const BUILTIN_ENDPOINTS: &str = include_str!("endpoints.json");

/// Relative URL paths for every (action, flavor) combination the API serves.
///
/// Read-only after construction. Lookups that miss mean the combination is
/// not available and must fail before any network traffic.
#[derive(Debug, Clone)]
pub struct EndpointTable {
    actions: HashMap<String, HashMap<String, String>>,
}

impl EndpointTable {
    /// Parse the endpoint table embedded in the crate.
    pub fn builtin() -> Result<Self, AlchemyError> {
        Self::from_json(BUILTIN_ENDPOINTS)
    }

    /// Parse a table from a JSON object of objects: `{action: {flavor: path}}`.
    ///
    /// Lets alternative deployments (staging gateways, self-hosted mirrors)
    /// substitute their own paths via
    /// [`AlchemyBuilder::with_endpoints`](crate::AlchemyBuilder::with_endpoints).
    pub fn from_json(json: &str) -> Result<Self, AlchemyError> {
        let actions: HashMap<String, HashMap<String, String>> = serde_json::from_str(json)
            .map_err(|e| AlchemyError::ConfigurationError(format!("Invalid endpoint table: {e}")))?;
        Ok(Self { actions })
    }

    /// The relative URL path serving `action` for `flavor`, if any.
    pub fn path(&self, action: &str, flavor: &str) -> Option<&str> {
        self.actions
            .get(action)
            .and_then(|flavors| flavors.get(flavor))
            .map(String::as_str)
    }

    /// Whether the API serves `action` for `flavor`.
    pub fn supports(&self, action: &str, flavor: &str) -> bool {
        self.path(action, flavor).is_some()
    }

    /// Action names in the table, in no particular order.
    pub fn actions(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_parses() {
        let table = EndpointTable::builtin().unwrap();
        assert_eq!(
            table.path("sentiment", "text"),
            Some("/text/TextGetTextSentiment")
        );
        assert_eq!(
            table.path("entities", "url"),
            Some("/url/URLGetRankedNamedEntities")
        );
        assert_eq!(table.path("text_raw", "html"), Some("/html/HTMLGetRawText"));
        assert_eq!(table.actions().count(), 16);
    }

    #[test]
    fn test_flavor_gaps_are_not_served() {
        let table = EndpointTable::builtin().unwrap();
        // Text extraction needs a document source, and the combined call
        // never accepted raw HTML on the public gateway.
        assert!(!table.supports("text", "text"));
        assert!(!table.supports("title", "text"));
        assert!(!table.supports("combined", "html"));
        assert!(!table.supports("entities", "random"));
        assert!(!table.supports("nonsense", "text"));
    }

    #[test]
    fn test_from_json_accepts_custom_tables() {
        let table = EndpointTable::from_json(r#"{"ping": {"text": "/text/Ping"}}"#).unwrap();
        assert_eq!(table.path("ping", "text"), Some("/text/Ping"));
        assert!(!table.supports("sentiment", "text"));
    }

    #[test]
    fn test_malformed_table_is_a_configuration_error() {
        let err = EndpointTable::from_json("{not json").unwrap_err();
        assert!(matches!(err, AlchemyError::ConfigurationError(_)));

        // Wrong shape: values must be flavor -> path objects.
        let err = EndpointTable::from_json(r#"{"sentiment": "/text/TextGetTextSentiment"}"#)
            .unwrap_err();
        assert!(matches!(err, AlchemyError::ConfigurationError(_)));
    }
}
