use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Numeric score, or `None` for null, absent or non-numeric values.
fn deserialize_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_f64))
}

/// Candidate document as the backend sends it in
/// `metadata.retriever_resources[]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawResource {
    /// `key: value` segments separated by `;`
    pub content: String,
    /// Relevance score; `null`, absent and non-numeric are all `None`
    #[serde(default, deserialize_with = "deserialize_score")]
    pub score: Option<f64>,
}

impl RawResource {
    /// Decode one entry of `retriever_resources`.
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }
}

/// Validated, display-ready document attached to an assistant message.
///
/// Only produced by [`ResourceExtractor`](crate::resources::ResourceExtractor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub content: String,
    pub slug: String,
    pub created_at: String,
    pub score: f64,
}
