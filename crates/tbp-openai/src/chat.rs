// SPDX-License-Identifier: MIT OR Apache-2.0
//! Chat Completions tool dialect: nested function descriptors, tool calls
//! on the assistant message, results as `role: "tool"` messages.

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tbp_tool::{DispatchError, SharedTool, ToolMap};
use tracing::debug;

/// Tool descriptor for the Chat Completions API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatToolDef {
    /// Always `function`.
    #[serde(rename = "type")]
    pub kind: String,
    /// The function being described.
    pub function: ChatFunctionDef,
}

/// Function half of a chat tool descriptor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatFunctionDef {
    /// Tool name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// JSON Schema for the arguments, embedded verbatim.
    pub parameters: Value,
}

/// Renders the canonical tools as chat tool descriptors.
#[must_use]
pub fn to_chat_tools(tools: &[SharedTool]) -> Vec<ChatToolDef> {
    tools
        .iter()
        .map(|tool| ChatToolDef {
            kind: "function".into(),
            function: ChatFunctionDef {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                parameters: tool.parameters().as_value().clone(),
            },
        })
        .collect()
}

/// One tool call requested by an assistant message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatToolCall {
    /// Correlation id, echoed back as `tool_call_id`.
    pub id: String,
    /// Always `function`.
    #[serde(rename = "type")]
    pub kind: String,
    /// What to call and with which arguments.
    pub function: ChatFunctionCall,
}

/// Function half of a chat tool call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatFunctionCall {
    /// Tool name.
    pub name: String,
    /// Arguments as a JSON string, exactly as the model produced them.
    pub arguments: String,
}

/// Simplified Chat Completions message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// Message role.
    pub role: String,
    /// Text content, absent on pure tool-call turns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Tool calls requested by the assistant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ChatToolCall>>,
}

/// One choice of a chat completion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatChoice {
    /// Position in the choice list.
    pub index: u32,
    /// The message produced.
    pub message: ChatMessage,
    /// Why generation stopped, `tool_calls` when tools were requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Token usage reported with a completion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatUsage {
    /// Tokens in the prompt.
    pub prompt_tokens: u64,
    /// Tokens generated.
    pub completion_tokens: u64,
    /// Prompt plus generated.
    pub total_tokens: u64,
}

/// Simplified chat completion envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletion {
    /// Completion id.
    pub id: String,
    /// Model that produced it.
    pub model: String,
    /// Generated choices, first is primary.
    pub choices: Vec<ChatChoice>,
    /// Token usage, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<ChatUsage>,
}

/// Tool-result message for the next request, `role: "tool"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatToolMessage {
    /// Always `tool`.
    pub role: String,
    /// Id of the call this message answers.
    pub tool_call_id: String,
    /// Serialized JSON of the tool output.
    pub content: String,
}

impl ChatToolMessage {
    /// Builds the result message answering one tool call.
    #[must_use]
    pub fn new(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: "tool".into(),
            tool_call_id: tool_call_id.into(),
            content: content.into(),
        }
    }
}

/// Runs the tools an assistant chat message asked for.
///
/// Call entries are matched against `tools` by function name; unknown names
/// are skipped and leave no result entry. Arguments arrive as JSON strings:
/// each is parsed and checked against the tool's schema before the tool
/// runs, and a string that does not parse or validate rejects the whole
/// batch. Matched executions start concurrently; on success the
/// `role: "tool"` messages come back in call order.
pub async fn handle_chat_tool_calls(
    message: &ChatMessage,
    tools: &[SharedTool],
) -> Result<Vec<ChatToolMessage>, DispatchError> {
    let map = ToolMap::new(tools);
    let calls = message.tool_calls.as_deref().unwrap_or_default();
    let mut pending = Vec::new();
    for call in calls {
        let name = &call.function.name;
        let Some(tool) = map.get(name) else {
            debug!(target: "tbp.openai", tool = %name, "skipping unknown tool");
            continue;
        };
        pending.push(async move {
            let args: Value = serde_json::from_str(&call.function.arguments).map_err(|source| {
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
            Ok(ChatToolMessage::new(call.id.clone(), out.to_string()))
        });
    }
    debug!(target: "tbp.openai", calls = pending.len(), "dispatching chat tool calls");
    try_join_all(pending).await
}
