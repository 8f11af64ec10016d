// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tool-call dispatch for Claude responses.

use futures::future::try_join_all;
use tbp_tool::{DispatchError, SharedTool, ToolMap};
use tracing::debug;

use crate::dialect::{ClaudeContentBlock, ClaudeResponse, ClaudeToolResult};

/// Runs the tools a Claude response asked for.
///
/// `tool_use` blocks are matched against `tools` by name; blocks naming a
/// tool that is not in the slice are skipped and leave no result entry.
/// All matched executions start concurrently and the first failure rejects
/// the whole batch. On success the `tool_result` blocks come back in
/// content order.
///
/// Arguments arrive structured in the block's `input` and reach the tool
/// as-is; a payload the tool cannot digest fails inside its execute.
pub async fn handle_claude_tool_calls(
    response: &ClaudeResponse,
    tools: &[SharedTool],
) -> Result<Vec<ClaudeToolResult>, DispatchError> {
    let map = ToolMap::new(tools);
    let mut pending = Vec::new();
    for block in &response.content {
        let ClaudeContentBlock::ToolUse { id, name, input } = block else {
            continue;
        };
        let Some(tool) = map.get(name) else {
            debug!(target: "tbp.claude", tool = %name, "skipping unknown tool");
            continue;
        };
        pending.push(async move {
            let out = tool
                .execute(input.clone())
                .await
                .map_err(|source| DispatchError::Execution {
                    tool: name.clone(),
                    source,
                })?;
            Ok(ClaudeToolResult::new(id.clone(), out.to_string()))
        });
    }
    debug!(target: "tbp.claude", calls = pending.len(), "dispatching tool calls");
    try_join_all(pending).await
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use tbp_tool::{FunctionTool, ToolError, ToolSchema};

    use super::*;

    fn object_schema() -> ToolSchema {
        ToolSchema::from_value(json!({ "type": "object" }))
    }

    fn echo(name: &str) -> SharedTool {
        FunctionTool::untyped(name, "echoes its input", object_schema(), |args| async move {
            Ok(args)
        })
        .shared()
    }

    fn response_with(content: Vec<ClaudeContentBlock>) -> ClaudeResponse {
        ClaudeResponse {
            id: "msg_01".into(),
            model: "claude-sonnet-4-20250514".into(),
            role: "assistant".into(),
            content,
            stop_reason: Some("tool_use".into()),
            usage: None,
        }
    }

    fn tool_use(id: &str, name: &str, input: Value) -> ClaudeContentBlock {
        ClaudeContentBlock::ToolUse {
            id: id.into(),
            name: name.into(),
            input,
        }
    }

    #[tokio::test]
    async fn runs_tool_and_serializes_output() {
        let response = response_with(vec![
            ClaudeContentBlock::Text {
                text: "checking".into(),
            },
            tool_use("toolu_01", "echo", json!({ "n": 1 })),
        ]);
        let results = handle_claude_tool_calls(&response, &[echo("echo")])
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].kind, "tool_result");
        assert_eq!(results[0].tool_use_id, "toolu_01");
        let payload: Value = serde_json::from_str(&results[0].content).unwrap();
        assert_eq!(payload, json!({ "n": 1 }));
    }

    #[tokio::test]
    async fn unknown_tool_is_skipped_not_failed() {
        let response = response_with(vec![
            tool_use("toolu_01", "missing", json!({})),
            tool_use("toolu_02", "echo", json!({ "n": 2 })),
        ]);
        let results = handle_claude_tool_calls(&response, &[echo("echo")])
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].tool_use_id, "toolu_02");
    }

    #[tokio::test]
    async fn results_keep_content_order() {
        let response = response_with(vec![
            tool_use("toolu_a", "echo", json!({ "at": "a" })),
            tool_use("toolu_b", "echo", json!({ "at": "b" })),
            tool_use("toolu_c", "echo", json!({ "at": "c" })),
        ]);
        let results = handle_claude_tool_calls(&response, &[echo("echo")])
            .await
            .unwrap();
        let ids: Vec<&str> = results.iter().map(|r| r.tool_use_id.as_str()).collect();
        assert_eq!(ids, vec!["toolu_a", "toolu_b", "toolu_c"]);
    }

    #[tokio::test]
    async fn execute_failure_rejects_the_batch() {
        let flaky: SharedTool = FunctionTool::untyped(
            "flaky",
            "always fails",
            object_schema(),
            |_| async move { Err::<Value, _>(ToolError::failed("downstream outage")) },
        )
        .shared();
        let response = response_with(vec![
            tool_use("toolu_01", "echo", json!({})),
            tool_use("toolu_02", "flaky", json!({})),
        ]);
        let err = handle_claude_tool_calls(&response, &[echo("echo"), flaky])
            .await
            .unwrap_err();
        match err {
            DispatchError::Execution { tool, .. } => assert_eq!(tool, "flaky"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn response_without_tool_use_yields_no_results() {
        let response = response_with(vec![ClaudeContentBlock::Text {
            text: "plain answer".into(),
        }]);
        let results = handle_claude_tool_calls(&response, &[echo("echo")])
            .await
            .unwrap();
        assert!(results.is_empty());
    }
}
