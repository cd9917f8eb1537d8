use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Base URI of the schema.org vocabulary.
pub const SCHEMA_ORG_CONTEXT: &str = "https://schema.org";

/// `@type` written on linked-data temporal documents.
pub const TEMPORAL_VALUE_TYPE: &str = "TemporalValue";

/// Attribute holding the ISO-8601 text inside a linked-data document.
pub const VALUE_ATTRIBUTE: &str = "value";

#[derive(Serialize, Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
// Value of `@context`. Temporal documents always write the bare schema.org
// URI, the other forms exist so a context can be carried through unchanged.
pub enum Context {
    SingleString(String),
    SetOfString(Vec<String>),
    JsonObject(Value),
}

impl Default for Context {
    fn default() -> Self {
        Context::SingleString(SCHEMA_ORG_CONTEXT.to_owned())
    }
}

/// Self-describing form of a temporal value, written at the document root.
///
/// On input only `value` is read; `@context` and `@type` may hold any JSON.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LinkedDataTemporal {
    #[serde(rename = "@context", skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,

    #[serde(rename = "@type", skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub ld_type: Option<String>,

    pub value: String,
}

impl LinkedDataTemporal {
    pub fn new(value: String) -> Self {
        Self {
            context: Some(Context::default()),
            ld_type: Some(TEMPORAL_VALUE_TYPE.to_owned()),
            value,
        }
    }
}

impl From<Context> for Value {
    fn from(context: Context) -> Self {
        match context {
            Context::SingleString(uri) => Value::String(uri),
            Context::SetOfString(uris) => uris.into(),
            Context::JsonObject(value) => value,
        }
    }
}

impl From<LinkedDataTemporal> for Value {
    fn from(doc: LinkedDataTemporal) -> Self {
        let mut object = Map::new();
        if let Some(context) = doc.context {
            object.insert("@context".to_owned(), context.into());
        }
        if let Some(ld_type) = doc.ld_type {
            object.insert("@type".to_owned(), Value::String(ld_type));
        }
        object.insert(VALUE_ATTRIBUTE.to_owned(), Value::String(doc.value));
        Value::Object(object)
    }
}
