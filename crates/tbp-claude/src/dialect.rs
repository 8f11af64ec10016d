// SPDX-License-Identifier: MIT OR Apache-2.0
//! Simplified wire shapes for the Claude Messages API.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tbp_tool::{DescribeError, SharedTool};

/// Default model used when none is specified.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Tool descriptor in Claude format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClaudeToolDef {
    /// Tool name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// JSON Schema for the tool input, top-level object.
    pub input_schema: Value,
}

/// Renders the canonical tools as Claude tool descriptors.
///
/// Name and description are carried verbatim. The parameter schema is
/// re-rendered with a mandatory top-level `"type": "object"`; a tool whose
/// schema has no object top level cannot be described in this dialect.
pub fn to_claude_tools(tools: &[SharedTool]) -> Result<Vec<ClaudeToolDef>, DescribeError> {
    tools
        .iter()
        .map(|tool| {
            let input_schema = tool
                .parameters()
                .object_schema()
                .map_err(|source| DescribeError {
                    tool: tool.name().to_string(),
                    source,
                })?;
            Ok(ClaudeToolDef {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                input_schema,
            })
        })
        .collect()
}

/// One content block of a Claude response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClaudeContentBlock {
    /// Plain text.
    Text {
        /// The text content.
        text: String,
    },
    /// Request to run a tool.
    ToolUse {
        /// Correlation id, echoed back on the result block.
        id: String,
        /// Tool name.
        name: String,
        /// Structured arguments.
        input: Value,
    },
    /// Extended thinking.
    Thinking {
        /// Thinking content.
        thinking: String,
    },
    /// Any block kind this crate does not interpret.
    #[serde(other)]
    Unknown,
}

/// Token usage reported with a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClaudeUsage {
    /// Tokens in the prompt.
    pub input_tokens: u64,
    /// Tokens generated.
    pub output_tokens: u64,
}

/// Simplified Claude Messages API response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClaudeResponse {
    /// Response id.
    pub id: String,
    /// Model that produced the response.
    pub model: String,
    /// Producer role, `assistant` for model output.
    pub role: String,
    /// Content blocks in model order.
    pub content: Vec<ClaudeContentBlock>,
    /// Why generation stopped, `tool_use` when tools were requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>,
    /// Token usage, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<ClaudeUsage>,
}

/// One `tool_result` block, ready to send back in the next user turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClaudeToolResult {
    /// Always `tool_result`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Id of the `tool_use` block this result answers.
    pub tool_use_id: String,
    /// Serialized JSON of the tool output.
    pub content: String,
}

impl ClaudeToolResult {
    /// Builds a result block answering one tool use.
    #[must_use]
    pub fn new(tool_use_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind: "tool_result".into(),
            tool_use_id: tool_use_id.into(),
            content: content.into(),
        }
    }
}

/// Vendor-specific configuration for the Anthropic Claude API.
///
/// Values are opaque strings to this crate; they exist so applications can
/// keep everything a vendor client needs next to the dialect functions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaudeConfig {
    /// Anthropic API key (e.g. `sk-ant-...`).
    pub api_key: String,

    /// Base URL for the Messages API.
    pub base_url: String,

    /// Model identifier (e.g. `claude-sonnet-4-20250514`).
    pub model: String,
}

impl Default for ClaudeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.anthropic.com/v1".into(),
            model: DEFAULT_MODEL.into(),
        }
    }
}

impl ClaudeConfig {
    /// Reads the API key from `ANTHROPIC_API_KEY` when set.
    ///
    /// A missing variable leaves the key empty rather than failing;
    /// credential checks belong to the vendor client.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(key) = std::env::var("ANTHROPIC_API_KEY") {
            config.api_key = key;
        }
        config
    }
}
