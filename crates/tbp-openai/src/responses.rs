// SPDX-License-Identifier: MIT OR Apache-2.0
//! Responses API tool dialect: flat strict descriptors, `function_call`
//! output items, results as `function_call_output` items.

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tbp_tool::{DispatchError, SharedTool, ToolMap};
use tracing::debug;

/// Tool descriptor for the Responses API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponsesToolDef {
    /// Always `function`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Tool name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// JSON Schema for the arguments, embedded verbatim.
    pub parameters: Value,
    /// Whether the model must match the schema exactly.
    pub strict: bool,
}

/// Renders the canonical tools as Responses descriptors, strict mode on.
#[must_use]
pub fn to_responses_tools(tools: &[SharedTool]) -> Vec<ResponsesToolDef> {
    tools
        .iter()
        .map(|tool| ResponsesToolDef {
            kind: "function".into(),
            name: tool.name().to_string(),
            description: tool.description().to_string(),
            parameters: tool.parameters().as_value().clone(),
            strict: true,
        })
        .collect()
}

/// One content part of a response message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseContent {
    /// Produced text.
    OutputText {
        /// The text.
        text: String,
    },
    /// Any part kind this crate does not interpret.
    #[serde(other)]
    Unknown,
}

/// One output item of a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseItem {
    /// Assistant message.
    Message {
        /// Item id.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        /// Message role.
        role: String,
        /// Content parts.
        content: Vec<ResponseContent>,
    },
    /// Request to call a function.
    FunctionCall {
        /// Item id.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        /// Correlation id, echoed back on the output item.
        call_id: String,
        /// Tool name.
        name: String,
        /// Arguments as a JSON string.
        arguments: String,
    },
    /// Reasoning trace.
    Reasoning {
        /// Item id.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },
    /// Any item kind this crate does not interpret.
    #[serde(other)]
    Unknown,
}

/// Token usage reported with a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseUsage {
    /// Tokens in the input.
    pub input_tokens: u64,
    /// Tokens generated.
    pub output_tokens: u64,
    /// Input plus generated.
    pub total_tokens: u64,
}

/// Simplified Responses API envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Response {
    /// Response id.
    pub id: String,
    /// Model that produced it.
    pub model: String,
    /// Output items in model order.
    pub output: Vec<ResponseItem>,
    /// Token usage, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<ResponseUsage>,
}

/// Function-call result item for the next request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionCallOutput {
    /// Always `function_call_output`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Id of the call this output answers.
    pub call_id: String,
    /// Serialized JSON of the tool output.
    pub output: String,
}

impl FunctionCallOutput {
    /// Builds the output item answering one function call.
    #[must_use]
    pub fn new(call_id: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            kind: "function_call_output".into(),
            call_id: call_id.into(),
            output: output.into(),
        }
    }
}

/// Runs the tools a response asked for.
///
/// `function_call` items are matched against `tools` by name; unknown names
/// are skipped and leave no result entry. Arguments arrive as JSON strings:
/// each is parsed and checked against the tool's schema before the tool
/// runs, and a string that does not parse or validate rejects the whole
/// batch. Matched executions start concurrently; on success the
/// `function_call_output` items come back in output order.
pub async fn handle_responses_tool_calls(
    response: &Response,
    tools: &[SharedTool],
) -> Result<Vec<FunctionCallOutput>, DispatchError> {
    let map = ToolMap::new(tools);
    let mut pending = Vec::new();
    for item in &response.output {
        let ResponseItem::FunctionCall {
            call_id,
            name,
            arguments,
            ..
        } = item
        else {
            continue;
        };
        let Some(tool) = map.get(name) else {
            debug!(target: "tbp.openai", tool = %name, "skipping unknown tool");
            continue;
        };
        pending.push(async move {
            let args: Value = serde_json::from_str(arguments).map_err(|source| {
                DispatchError::ArgumentsNotJson {
                    tool: name.clone(),
                    source,
                }
            })?;
            tool.parameters()
                .validate(&args)
                .map_err(|source| DispatchError::ArgumentsRejected {
                    tool: name.clone(),
                    source,
                })?;
            let out = tool
                .execute(args)
                .await
                .map_err(|source| DispatchError::Execution {
                    tool: name.clone(),
                    source,
                })?;
            Ok(FunctionCallOutput::new(call_id.clone(), out.to_string()))
        });
    }
    debug!(target: "tbp.openai", calls = pending.len(), "dispatching response tool calls");
    try_join_all(pending).await
}
