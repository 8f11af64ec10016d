// SPDX-License-Identifier: MIT OR Apache-2.0
//! Canonical tool model for the tool backplane.
//!
//! A tool is declared once (name, description, parameter schema, async
//! execute body) and the dialect crates (`tbp-claude`, `tbp-openai`,
//! `tbp-gemini`, `tbp-mcp`) translate slices of [`SharedTool`] into each
//! vendor's wire shape and route the vendor's call events back through
//! [`Tool::execute`].
//!
//! This crate owns everything dialect-independent:
//!
//! - [`ToolSchema`]: the JSON Schema document for a tool's arguments,
//!   derived from a Rust type or hand-written, with validation and the
//!   introspection the dialects render from.
//! - [`Tool`] and [`FunctionTool`]: the object-safe trait and the
//!   struct-plus-closure factory most callers use.
//! - [`ToolMap`]: the per-dispatch name lookup, rebuilt for every handle
//!   call.
//! - [`to_tool_set`]: the canonical set re-keyed by name for frameworks
//!   that take tools directly.
//! - The shared error types dialect pipelines surface.
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod registry;
pub mod schema;
pub mod tool;
pub mod toolset;

pub use error::{BoxError, DescribeError, DispatchError, SchemaError, ToolError};
pub use registry::ToolMap;
pub use schema::ToolSchema;
pub use tool::{FunctionTool, SharedTool, Tool};
pub use toolset::to_tool_set;
