// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-dispatch tool lookup.

use std::collections::HashMap;

use tracing::debug;

use crate::tool::{SharedTool, Tool};

/// Name-keyed lookup table over a caller's tool slice.
///
/// Built fresh for each dispatch call and dropped with it; nothing is
/// cached or shared across calls. When two tools carry the same name the
/// later entry wins, same as repeated map insertion.
pub struct ToolMap<'a> {
    inner: HashMap<&'a str, &'a dyn Tool>,
}

impl<'a> ToolMap<'a> {
    /// Indexes the slice by tool name, last write wins.
    #[must_use]
    pub fn new(tools: &'a [SharedTool]) -> Self {
        let mut inner: HashMap<&'a str, &'a dyn Tool> = HashMap::with_capacity(tools.len());
        for tool in tools {
            if inner.insert(tool.name(), tool.as_ref()).is_some() {
                debug!(target: "tbp.tool", tool = %tool.name(), "duplicate tool name, keeping the later entry");
            }
        }
        Self { inner }
    }

    /// Looks up the tool a call event names.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a dyn Tool> {
        self.inner.get(name).copied()
    }

    /// Whether a tool of this name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    /// Number of distinct tool names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the map holds no tools.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
