// SPDX-License-Identifier: MIT OR Apache-2.0
//! Simplified wire shapes for the Gemini generateContent API.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tbp_tool::SharedTool;

/// Default model used when none is specified.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Gemini-style function declaration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeminiFunctionDeclaration {
    /// Function name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// JSON Schema for the function parameters, embedded verbatim.
    pub parameters: Value,
}

/// Renders the canonical tools as Gemini function declarations.
#[must_use]
pub fn to_function_declarations(tools: &[SharedTool]) -> Vec<GeminiFunctionDeclaration> {
    tools
        .iter()
        .map(|tool| GeminiFunctionDeclaration {
            name: tool.name().to_string(),
            description: tool.description().to_string(),
            parameters: tool.parameters().as_value().clone(),
        })
        .collect()
}

/// Inline binary data (e.g. images) embedded in a content block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeminiInlineData {
    /// MIME type of the data (e.g. `image/png`).
    pub mime_type: String,
    /// Base64-encoded binary data.
    pub data: String,
}

/// A part within a Gemini content block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum GeminiPart {
    /// Plain text content.
    Text(String),
    /// Inline binary data (e.g. images).
    InlineData(GeminiInlineData),
    /// A function call requested by the model.
    FunctionCall {
        /// Name of the function to invoke.
        name: String,
        /// Arguments as a structured JSON value.
        args: Value,
    },
    /// A function response returned to the model.
    FunctionResponse {
        /// Name of the function that was called.
        name: String,
        /// The function's response payload.
        response: Value,
    },
}

/// A content block in the Gemini API format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeminiContent {
    /// Role of the content author (`user` or `model`).
    pub role: String,
    /// Content parts.
    pub parts: Vec<GeminiPart>,
}

/// A candidate completion in a Gemini response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    /// The generated content.
    pub content: GeminiContent,
    /// Reason the model stopped generating (e.g. `STOP`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Token usage reported by the Gemini API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeminiUsageMetadata {
    /// Tokens consumed by the prompt.
    pub prompt_token_count: u64,
    /// Tokens generated across all candidates.
    pub candidates_token_count: u64,
    /// Total tokens (prompt + candidates).
    pub total_token_count: u64,
}

/// Simplified representation of a Gemini generateContent response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    /// Response candidates from the model.
    pub candidates: Vec<GeminiCandidate>,
    /// Token usage metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<GeminiUsageMetadata>,
}

/// One function call read out of a response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FunctionCallRef<'a> {
    /// Tool name.
    pub name: &'a str,
    /// Structured arguments.
    pub args: &'a Value,
}

impl GeminiResponse {
    /// Ordered function calls of the first candidate.
    ///
    /// Later candidates are alternate generations and carry no work.
    #[must_use]
    pub fn function_calls(&self) -> Vec<FunctionCallRef<'_>> {
        let Some(candidate) = self.candidates.first() else {
            return Vec::new();
        };
        candidate
            .content
            .parts
            .iter()
            .filter_map(|part| match part {
                GeminiPart::FunctionCall { name, args } => Some(FunctionCallRef { name, args }),
                _ => None,
            })
            .collect()
    }
}

/// Function response ready to send back in the next turn.
///
/// This dialect has no correlation id; results are keyed by function name
/// and the tool output travels structured under a `result` key instead of
/// as a serialized string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeminiFunctionResponse {
    /// Name of the function that was called.
    pub name: String,
    /// Response payload, the tool output wrapped under `result`.
    pub response: Value,
}

impl GeminiFunctionResponse {
    /// Wraps one tool output for the named function.
    #[must_use]
    pub fn new(name: impl Into<String>, output: Value) -> Self {
        Self {
            name: name.into(),
            response: json!({ "result": output }),
        }
    }
}

impl From<GeminiFunctionResponse> for GeminiPart {
    fn from(value: GeminiFunctionResponse) -> Self {
        GeminiPart::FunctionResponse {
            name: value.name,
            response: value.response,
        }
    }
}

/// Vendor-specific configuration for the Gemini API.
///
/// Values are opaque strings to this crate; they exist so applications can
/// keep everything a vendor client needs next to the dialect functions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Google AI Studio API key.
    pub api_key: String,

    /// Base URL for API requests.
    pub base_url: String,

    /// Model identifier (e.g. `gemini-2.5-flash`).
    pub model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".into(),
            model: DEFAULT_MODEL.into(),
        }
    }
}

impl GeminiConfig {
    /// Reads the API key from `GOOGLE_API_KEY` when set.
    ///
    /// A missing variable leaves the key empty rather than failing;
    /// credential checks belong to the vendor client.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(key) = std::env::var("GOOGLE_API_KEY") {
            config.api_key = key;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tbp_tool::{FunctionTool, ToolSchema};

    use super::*;

    // -- 1. Part tagging ----------------------------------------------------

    #[test]
    fn parts_serialize_with_camel_case_keys() {
        let part = GeminiPart::FunctionCall {
            name: "get_weather".into(),
            args: json!({ "location": "Lisbon" }),
        };
        assert_eq!(
            serde_json::to_value(&part).unwrap(),
            json!({ "functionCall": { "name": "get_weather", "args": { "location": "Lisbon" } } })
        );
    }

    #[test]
    fn text_part_round_trips() {
        let raw = json!({ "text": "hello" });
        let part: GeminiPart = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(part, GeminiPart::Text("hello".into()));
        assert_eq!(serde_json::to_value(&part).unwrap(), raw);
    }

    // -- 2. Declarations ----------------------------------------------------

    #[test]
    fn declarations_carry_schema_verbatim() {
        let schema = json!({
            "type": "object",
            "properties": { "location": { "type": "string" } },
            "required": ["location"]
        });
        let tool = FunctionTool::untyped(
            "get_weather",
            "Get the current weather for a location",
            ToolSchema::from_value(schema.clone()),
            |args| async move { Ok(args) },
        )
        .shared();
        let decls = to_function_declarations(&[tool]);
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].name, "get_weather");
        assert_eq!(decls[0].parameters, schema);
    }

    // -- 3. Call extraction -------------------------------------------------

    #[test]
    fn function_calls_come_from_the_first_candidate_only() {
        let response = GeminiResponse {
            candidates: vec![
                GeminiCandidate {
                    content: GeminiContent {
                        role: "model".into(),
                        parts: vec![
                            GeminiPart::Text("on it".into()),
                            GeminiPart::FunctionCall {
                                name: "first".into(),
                                args: json!({}),
                            },
                        ],
                    },
                    finish_reason: Some("STOP".into()),
                },
                GeminiCandidate {
                    content: GeminiContent {
                        role: "model".into(),
                        parts: vec![GeminiPart::FunctionCall {
                            name: "alternate".into(),
                            args: json!({}),
                        }],
                    },
                    finish_reason: None,
                },
            ],
            usage_metadata: None,
        };
        let calls = response.function_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "first");
    }

    // -- 4. Function responses ----------------------------------------------

    #[test]
    fn function_response_wraps_output_under_result() {
        let reply = GeminiFunctionResponse::new("get_weather", json!({ "temperature": 20 }));
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            json!({
                "name": "get_weather",
                "response": { "result": { "temperature": 20 } }
            })
        );
    }

    #[test]
    fn function_response_converts_into_a_part() {
        let part: GeminiPart = GeminiFunctionResponse::new("f", json!(1)).into();
        assert_eq!(
            serde_json::to_value(&part).unwrap(),
            json!({ "functionResponse": { "name": "f", "response": { "result": 1 } } })
        );
    }
}
