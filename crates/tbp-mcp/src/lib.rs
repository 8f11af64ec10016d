// SPDX-License-Identifier: MIT OR Apache-2.0
//! MCP-style protocol surface for backplane tools.
//!
//! The dialect crates translate tool calls already embedded in a model
//! response. This crate serves the other direction: it exposes a set of
//! [`SharedTool`]s to protocol clients that discover tools by listing and
//! invoke them one at a time by name.
//!
//! - [`ToolRouter::register_tools`] admits a batch of tools. The protocol
//!   requires object-shaped parameter schemas, so one offending schema
//!   rejects the whole batch.
//! - [`ToolRouter::list_tools`] renders the registry as wire-shaped
//!   [`McpTool`] entries, sorted by name.
//! - [`ToolRouter::call_tool`] dispatches one inbound call, checking the
//!   arguments against the registered schema first. Unlike the dialect
//!   pipelines, the router must answer its caller, so an unregistered name
//!   is an error here rather than a skipped event.

#![deny(unsafe_code)]

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tbp_tool::{SchemaError, SharedTool, ToolError, ToolSchema};
use thiserror::Error;
use tracing::debug;

/// One tool listing entry in the wire shape protocol clients expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpTool {
    /// Name clients invoke the tool by.
    pub name: String,
    /// What the tool does.
    pub description: String,
    /// Complete object schema for the call arguments.
    pub input_schema: Value,
}

/// A registration batch the router refused.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// A tool's parameter schema is not an object schema.
    #[error("tool '{tool}': parameter schema is not an object schema")]
    SchemaNotObject {
        /// The offending tool.
        tool: String,
    },
}

/// Failure answering one inbound protocol call.
#[derive(Debug, Error)]
pub enum CallToolError {
    /// No tool is registered under the requested name.
    #[error("unknown tool '{name}'")]
    UnknownTool {
        /// The requested name.
        name: String,
    },
    /// The arguments did not conform to the registered schema.
    #[error("tool '{tool}': arguments did not validate")]
    ArgumentsRejected {
        /// Tool the call named.
        tool: String,
        /// Schema violations.
        #[source]
        source: SchemaError,
    },
    /// The tool ran and failed.
    #[error("tool '{tool}' failed")]
    Execution {
        /// Tool that ran.
        tool: String,
        /// The tool's own failure, unchanged.
        #[source]
        source: ToolError,
    },
}

/// What the router keeps per registered tool.
struct Entry {
    description: String,
    schema: ToolSchema,
    tool: SharedTool,
}

impl Entry {
    /// Schema document advertised in the listing.
    ///
    /// The registered document whole, with `"type": "object"` made explicit
    /// and a `properties` map always present. Everything else, `$defs`
    /// included, is carried through so nested references stay resolvable.
    fn input_schema(&self) -> Value {
        // registration admits object documents only
        let mut doc = self.schema.as_value().as_object().cloned().unwrap_or_default();
        doc.insert("type".to_string(), json!("object"));
        if !doc.contains_key("properties") {
            doc.insert("properties".to_string(), Value::Object(Map::new()));
        }
        Value::Object(doc)
    }
}

/// Owned name-keyed registry answering an MCP-style tool protocol.
#[derive(Default)]
pub struct ToolRouter {
    entries: HashMap<String, Entry>,
}

impl ToolRouter {
    /// Creates an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a batch of tools, all or nothing.
    ///
    /// Every schema is checked before anything is inserted: the first tool
    /// whose parameter schema is not an object schema rejects the batch and
    /// leaves the router untouched. Within an accepted batch a duplicate
    /// name keeps the later entry.
    pub fn register_tools(&mut self, tools: &[SharedTool]) -> Result<(), RegisterError> {
        for tool in tools {
            if !tool.parameters().is_object() {
                return Err(RegisterError::SchemaNotObject {
                    tool: tool.name().to_string(),
                });
            }
        }
        for tool in tools {
            let name = tool.name().to_string();
            if self.entries.contains_key(&name) {
                debug!(target: "tbp.mcp", tool = %name, "duplicate tool name, keeping the later entry");
            }
            let entry = Entry {
                description: tool.description().to_string(),
                schema: tool.parameters().clone(),
                tool: Arc::clone(tool),
            };
            self.entries.insert(name, entry);
        }
        debug!(target: "tbp.mcp", tools = tools.len(), "registered tool batch");
        Ok(())
    }

    /// Lists the registered tools in wire shape, sorted by name.
    #[must_use]
    pub fn list_tools(&self) -> Vec<McpTool> {
        let mut tools: Vec<McpTool> = self
            .entries
            .iter()
            .map(|(name, entry)| McpTool {
                name: name.clone(),
                description: entry.description.clone(),
                input_schema: entry.input_schema(),
            })
            .collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }

    /// Dispatches one inbound call to the tool registered under `name`.
    ///
    /// The arguments are checked against the registered schema before the
    /// tool runs; nonconforming payloads are answered without dispatching.
    pub async fn call_tool(&self, name: &str, args: Value) -> Result<Value, CallToolError> {
        let Some(entry) = self.entries.get(name) else {
            return Err(CallToolError::UnknownTool {
                name: name.to_string(),
            });
        };
        entry
            .schema
            .validate(&args)
            .map_err(|source| CallToolError::ArgumentsRejected {
                tool: name.to_string(),
                source,
            })?;
        debug!(target: "tbp.mcp", tool = %name, "dispatching protocol call");
        entry
            .tool
            .execute(args)
            .await
            .map_err(|source| CallToolError::Execution {
                tool: name.to_string(),
                source,
            })
    }

    /// Whether a tool is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the router holds no tools.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ToolRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRouter")
            .field("tools", &self.entries.len())
            .finish_non_exhaustive()
    }
}
