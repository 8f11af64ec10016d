// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types shared across the backplane crates.

use thiserror::Error;

/// Boxed error a tool body may fail with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Problems with a tool's parameter schema document.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The top level of the document is not a JSON object.
    #[error("schema top level must be a JSON object, got {found}")]
    NotAnObject {
        /// JSON kind found at the top level.
        found: &'static str,
    },
    /// The document did not compile as a JSON Schema.
    #[error("schema did not compile: {detail}")]
    Compile {
        /// Compiler diagnostic.
        detail: String,
    },
    /// An argument payload did not conform to the schema.
    #[error("arguments rejected: {}", .reasons.join("; "))]
    Invalid {
        /// One entry per violation.
        reasons: Vec<String>,
    },
}

/// A tool that could not be described for a dialect.
#[derive(Debug, Error)]
#[error("tool '{tool}' cannot be described in this dialect")]
pub struct DescribeError {
    /// The offending tool.
    pub tool: String,
    /// Why its schema does not fit.
    #[source]
    pub source: SchemaError,
}

/// Failure produced by a tool's execute body.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The payload did not match the tool's parameter contract.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    /// The tool body failed.
    #[error("execution failed: {source}")]
    Execution {
        /// Underlying failure.
        #[from]
        source: BoxError,
    },
}

impl ToolError {
    /// Wraps a plain message as an execution failure.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Execution {
            source: message.into().into(),
        }
    }
}

/// Failure while dispatching the tool calls of one model response.
///
/// Dispatch is all or nothing: the first failing call rejects the whole
/// batch and no partial result list is returned. An unknown tool name is
/// not a failure; its call event is skipped.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A serialized argument string was not valid JSON.
    #[error("tool '{tool}': arguments are not valid JSON")]
    ArgumentsNotJson {
        /// Tool named by the call event.
        tool: String,
        /// Parser failure.
        #[source]
        source: serde_json::Error,
    },
    /// Parsed arguments did not conform to the tool's schema.
    #[error("tool '{tool}': arguments did not validate")]
    ArgumentsRejected {
        /// Tool named by the call event.
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
