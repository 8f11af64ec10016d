// SPDX-License-Identifier: MIT OR Apache-2.0
//! Content-block tool dialect for the Anthropic Messages API shape.
//!
//! Claude carries tool traffic inside content blocks: descriptors go up as
//! `tools` entries with a top-level object `input_schema`, the model answers
//! with `tool_use` blocks whose `input` is already structured, and results
//! return as `tool_result` blocks holding serialized JSON. This crate models
//! those shapes without a vendor SDK dependency and wires them to the
//! canonical tools from `tbp-tool`:
//!
//! - [`to_claude_tools`] renders descriptors,
//! - [`handle_claude_tool_calls`] runs the requested tools and builds the
//!   result blocks.
#![deny(unsafe_code)]

pub mod dialect;
pub mod dispatch;

pub use dialect::{
    ClaudeConfig, ClaudeContentBlock, ClaudeResponse, ClaudeToolDef, ClaudeToolResult, ClaudeUsage,
    DEFAULT_MODEL, to_claude_tools,
};
pub use dispatch::handle_claude_tool_calls;
