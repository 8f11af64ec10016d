// SPDX-License-Identifier: MIT OR Apache-2.0
//! Function-declaration tool dialect for the Google Gemini API shape.
//!
//! Gemini takes tools as flat function declarations and answers with
//! `functionCall` parts whose `args` are already structured. Results go
//! back as `functionResponse` parts keyed by function name, the one
//! dialect with no correlation id, and the tool output travels as a
//! structured value under `result` rather than as a serialized string.
//! Shapes are modeled in-crate; no vendor SDK dependency.
#![deny(unsafe_code)]

pub mod dialect;
pub mod dispatch;

pub use dialect::{
    DEFAULT_MODEL, FunctionCallRef, GeminiCandidate, GeminiConfig, GeminiContent,
    GeminiFunctionDeclaration, GeminiFunctionResponse, GeminiInlineData, GeminiPart,
    GeminiResponse, GeminiUsageMetadata, to_function_declarations,
};
pub use dispatch::handle_function_calls;
