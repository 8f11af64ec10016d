// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tool-call dispatch for Gemini responses.

use futures::future::try_join_all;
use tbp_tool::{DispatchError, SharedTool, ToolMap};
use tracing::debug;

use crate::dialect::{GeminiFunctionResponse, GeminiResponse};

/// Runs the functions a Gemini response asked for.
///
/// Function-call parts of the first candidate are matched against `tools`
/// by name; calls naming a tool that is not in the slice are skipped and
/// leave no result entry. All matched executions start concurrently and
/// the first failure rejects the whole batch. On success the function
/// responses come back in part order, each output wrapped under `result`.
///
/// Arguments arrive structured in the call's `args` and reach the tool
/// as-is; a payload the tool cannot digest fails inside its execute.
pub async fn handle_function_calls(
    response: &GeminiResponse,
    tools: &[SharedTool],
) -> Result<Vec<GeminiFunctionResponse>, DispatchError> {
    let map = ToolMap::new(tools);
    let mut pending = Vec::new();
    for call in response.function_calls() {
        let Some(tool) = map.get(call.name) else {
            debug!(target: "tbp.gemini", tool = %call.name, "skipping unknown tool");
            continue;
        };
        pending.push(async move {
            let out = tool
                .execute(call.args.clone())
                .await
                .map_err(|source| DispatchError::Execution {
                    tool: call.name.to_string(),
                    source,
                })?;
            Ok(GeminiFunctionResponse::new(call.name, out))
        });
    }
    debug!(target: "tbp.gemini", calls = pending.len(), "dispatching function calls");
    try_join_all(pending).await
}
