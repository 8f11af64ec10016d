// SPDX-License-Identifier: MIT OR Apache-2.0
//! OpenAI tool dialects for the tool backplane.
//!
//! OpenAI exposes two wire styles and this crate speaks both:
//!
//! - [`chat`]: the Chat Completions shape. Descriptors nest a function
//!   under a `type: "function"` tag, the assistant message carries
//!   `tool_calls` with serialized argument strings, results go back as
//!   `role: "tool"` messages keyed by `tool_call_id`.
//! - [`responses`]: the Responses shape. Descriptors are flat and strict,
//!   calls arrive as `function_call` output items keyed by `call_id`,
//!   results return as `function_call_output` items.
//!
//! Both dialects parse the argument string and validate it against the
//! tool's schema before anything runs. Shapes are modeled in-crate; no
//! vendor SDK dependency.
#![deny(unsafe_code)]

pub mod chat;
pub mod config;
pub mod responses;

pub use chat::{
    ChatChoice, ChatCompletion, ChatFunctionCall, ChatFunctionDef, ChatMessage, ChatToolCall,
    ChatToolDef, ChatToolMessage, ChatUsage, handle_chat_tool_calls, to_chat_tools,
};
pub use config::{DEFAULT_MODEL, OpenAIConfig};
pub use responses::{
    FunctionCallOutput, Response, ResponseContent, ResponseItem, ResponseUsage, ResponsesToolDef,
    handle_responses_tool_calls, to_responses_tools,
};
