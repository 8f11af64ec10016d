// SPDX-License-Identifier: MIT OR Apache-2.0
//! JSON Schema documents for tool parameters.

use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::SchemaError;

/// JSON Schema for a tool's argument payload.
///
/// Wraps one schema document, draft 2020-12 as produced by [`schemars`].
/// The dialect crates render it into whatever shape their vendor expects:
/// most embed it verbatim, the content-block dialect re-renders it through
/// [`ToolSchema::object_schema`]. Dialects whose call events carry
/// serialized argument strings check payloads with [`ToolSchema::validate`]
/// before the tool runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolSchema {
    root: Value,
}

impl ToolSchema {
    /// Derives the schema for a typed parameter struct.
    #[must_use]
    pub fn of<P: JsonSchema>() -> Self {
        let root = serde_json::to_value(schema_for!(P)).unwrap_or_else(|_| json!({}));
        Self { root }
    }

    /// Wraps a hand-written schema document.
    #[must_use]
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// The document as-is.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Whether the document describes a JSON object.
    ///
    /// True for an explicit `"type": "object"` and for documents that
    /// declare `properties` without a type.
    #[must_use]
    pub fn is_object(&self) -> bool {
        match &self.root {
            Value::Object(map) => match map.get("type") {
                Some(Value::String(t)) => t == "object",
                Some(_) => false,
                None => map.contains_key("properties"),
            },
            _ => false,
        }
    }

    /// Renders the document for dialects that mandate a top-level object.
    ///
    /// The returned document carries `"type": "object"` at the top level,
    /// overriding whatever the generator wrote there. Fails when the top
    /// level is not a JSON object and there is nothing to graft onto.
    pub fn object_schema(&self) -> Result<Value, SchemaError> {
        match &self.root {
            Value::Object(map) => {
                let mut out = map.clone();
                out.insert("type".into(), Value::String("object".into()));
                Ok(Value::Object(out))
            }
            other => Err(SchemaError::NotAnObject {
                found: json_kind(other),
            }),
        }
    }

    /// Field map of an object document: property name to field schema.
    #[must_use]
    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.root.get("properties")?.as_object()
    }

    /// Field names the document lists as required.
    #[must_use]
    pub fn required(&self) -> Vec<String> {
        match self.root.get("required").and_then(Value::as_array) {
            Some(items) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Checks one argument payload against the schema.
    ///
    /// Collects every violation rather than stopping at the first.
    pub fn validate(&self, instance: &Value) -> Result<(), SchemaError> {
        let validator = jsonschema::validator_for(&self.root)
            .map_err(|err| SchemaError::Compile {
                detail: err.to_string(),
            })?;
        let reasons: Vec<String> = validator
            .iter_errors(instance)
            .map(|err| err.to_string())
            .collect();
        if reasons.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::Invalid { reasons })
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
