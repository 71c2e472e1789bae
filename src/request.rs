//! Request and result shapes shared by the server, the pipeline and the CLI.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Named string fields describing one outreach scenario.
///
/// Accepts any JSON object. Strings are kept as sent, numbers and booleans are
/// stringified, `null` drops the field. Nested arrays or objects are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GenerationRequest {
    fields: BTreeMap<String, String>,
}

impl GenerationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// A field counts as present only when it is non-empty
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Field value, or `default` when absent
    pub fn get_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get(name).unwrap_or(default)
    }

    /// Required fields from `names` that are absent, in the given order
    pub fn missing(&self, names: &[&'static str]) -> Vec<&'static str> {
        names
            .iter()
            .copied()
            .filter(|n| self.get(n).is_none())
            .collect()
    }

    /// Copy of this request restricted to `names`
    pub fn retain_only(&self, names: &[&str]) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .filter(|(k, v)| names.contains(&k.as_str()) && !v.is_empty())
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn into_fields(self) -> BTreeMap<String, String> {
        self.fields
    }
}

impl From<BTreeMap<String, String>> for GenerationRequest {
    fn from(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }
}

impl<'de> Deserialize<'de> for GenerationRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;
        let map = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut fields = BTreeMap::new();
        for (key, value) in map {
            match value {
                serde_json::Value::Null => {}
                serde_json::Value::String(s) => {
                    fields.insert(key, s);
                }
                serde_json::Value::Number(n) => {
                    fields.insert(key, n.to_string());
                }
                serde_json::Value::Bool(b) => {
                    fields.insert(key, b.to_string());
                }
                serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                    return Err(D::Error::custom(format!(
                        "field '{}' must be a string",
                        key
                    )));
                }
            }
        }
        Ok(Self { fields })
    }
}

/// The two generated alternatives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub output_a: String,
    pub output_b: String,
}

impl GenerationResult {
    pub fn new(output_a: impl Into<String>, output_b: impl Into<String>) -> Self {
        Self {
            output_a: output_a.into(),
            output_b: output_b.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_values_are_accepted() {
        let req: GenerationRequest = serde_json::from_str(
            r#"{"recipientName":"Ada","company":"Analytical","goal":"demo","budget":5000,"urgent":true,"context":null}"#,
        )
        .unwrap();
        assert_eq!(req.get("recipientName"), Some("Ada"));
        assert_eq!(req.get("budget"), Some("5000"));
        assert_eq!(req.get("urgent"), Some("true"));
        assert_eq!(req.get("context"), None);
    }

    #[test]
    fn nested_values_are_rejected() {
        let err = serde_json::from_str::<GenerationRequest>(r#"{"goal":["a","b"]}"#).unwrap_err();
        assert!(err.to_string().contains("goal"));
        assert!(serde_json::from_str::<GenerationRequest>("[1,2]").is_err());
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let req = GenerationRequest::new()
            .with("recipientName", "")
            .with("company", "Acme");
        assert_eq!(req.missing(&["recipientName", "company", "goal"]), vec!["recipientName", "goal"]);
        assert_eq!(req.get_or("recipientName", "there"), "there");
    }

    #[test]
    fn result_serializes_camel_case() {
        let json = serde_json::to_value(GenerationResult::new("a", "b")).unwrap();
        assert_eq!(json, serde_json::json!({"outputA": "a", "outputB": "b"}));
    }
}
