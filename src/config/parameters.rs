//! Free-form parameter blocks keyed by adapter identity.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key naming the adapter a parameter block belongs to.
pub const IDENTITY_KEY: &str = "identity";

/// An order-preserving JSON object of adapter- or device-specific settings.
///
/// The bridge core only interprets the [`IDENTITY_KEY`] entry; everything
/// else is forwarded verbatim to the adapter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterBlock(Map<String, Value>);

impl ParameterBlock {
    /// Creates an empty parameter block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a block carrying only an adapter identity.
    #[must_use]
    pub fn for_identity(identity: impl Into<String>) -> Self {
        Self::new().with(IDENTITY_KEY, Value::String(identity.into()))
    }

    /// Adds or replaces a parameter.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Returns the adapter identity, ignoring blank values.
    #[must_use]
    pub fn identity(&self) -> Option<&str> {
        self.get_str(IDENTITY_KEY)
            .map(str::trim)
            .filter(|identity| !identity.is_empty())
    }

    /// Returns a parameter value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a parameter value when it is a JSON string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Returns the underlying JSON object.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Serializes the block to its JSON text form.
    #[must_use]
    pub fn to_json_string(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }
}

impl From<Map<String, Value>> for ParameterBlock {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!({"identity": "serial"}), Some("serial"))]
    #[case(json!({"identity": "  serial  "}), Some("serial"))]
    #[case(json!({"identity": "   "}), None)]
    #[case(json!({"identity": 7}), None)]
    #[case(json!({}), None)]
    fn identity_ignores_blank_and_non_string_values(
        #[case] raw: Value,
        #[case] expected: Option<&str>,
    ) {
        let block: ParameterBlock = serde_json::from_value(raw).expect("object should parse");
        assert_eq!(block.identity(), expected);
    }

    #[test]
    fn json_text_preserves_declaration_order() {
        let block = ParameterBlock::for_identity("serial")
            .with("port", "COM3")
            .with("baudRate", 115_200);

        assert_eq!(
            block.to_json_string(),
            r#"{"identity":"serial","port":"COM3","baudRate":115200}"#
        );
    }
}
