// SPDX-License-Identifier: MIT OR Apache-2.0
//! Name-keyed view for frameworks that accept tools directly.

use std::collections::HashMap;
use std::sync::Arc;

use crate::tool::SharedTool;

/// Re-keys the canonical tools by name, unmodified.
///
/// Some frameworks take a tool map instead of a wire format of their own;
/// this hands them the canonical set as-is. Duplicate names keep the later
/// entry, matching [`ToolMap`].
///
/// [`ToolMap`]: crate::registry::ToolMap
#[must_use]
pub fn to_tool_set(tools: &[SharedTool]) -> HashMap<String, SharedTool> {
    tools
        .iter()
        .map(|tool| (tool.name().to_string(), Arc::clone(tool)))
        .collect()
}
