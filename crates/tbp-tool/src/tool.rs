// SPDX-License-Identifier: MIT OR Apache-2.0
//! The [`Tool`] trait and the [`FunctionTool`] factory.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{BoxError, ToolError};
use crate::schema::ToolSchema;

/// A provider-neutral tool definition.
///
/// One named operation a model may call: a description shown to the model,
/// a JSON Schema for the argument payload, and an async execute body. The
/// dialect crates translate slices of these into vendor wire shapes and
/// route vendor call events back through [`Tool::execute`].
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name the model calls this tool by.
    fn name(&self) -> &str;

    /// What the tool does, shown to the model.
    fn description(&self) -> &str;

    /// Schema for the argument payload `execute` accepts.
    fn parameters(&self) -> &ToolSchema;

    /// Runs the tool against one argument payload.
    async fn execute(&self, args: Value) -> Result<Value, ToolError>;
}

/// Shared handle the dialect functions accept slices of.
pub type SharedTool = Arc<dyn Tool>;

type Handler = Box<dyn Fn(Value) -> BoxFuture<'static, Result<Value, ToolError>> + Send + Sync>;

/// [`Tool`] assembled from a name, a description and an async closure.
///
/// The plain-struct counterpart of subclassing: everything a tool is lives
/// in one value, and the behavior is a stored closure.
pub struct FunctionTool {
    name: String,
    description: String,
    parameters: ToolSchema,
    handler: Handler,
}

impl FunctionTool {
    /// Builds a tool from a typed async handler.
    ///
    /// The parameter schema is derived from `P`. At execute time the raw
    /// payload is deserialized into `P`; payloads that do not fit fail with
    /// [`ToolError::InvalidArguments`] without reaching the handler, and
    /// the handler result is serialized back to JSON.
    pub fn new<P, R, F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: F,
    ) -> Self
    where
        P: DeserializeOwned + JsonSchema,
        R: Serialize,
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, BoxError>> + Send + 'static,
    {
        let handler = Arc::new(handler);
        let handler: Handler = Box::new(move |args| {
            let handler = Arc::clone(&handler);
            Box::pin(async move {
                let parsed: P = serde_json::from_value(args)
                    .map_err(|err| ToolError::InvalidArguments(err.to_string()))?;
                let out = (*handler)(parsed).await?;
                serde_json::to_value(out).map_err(|err| ToolError::Execution {
                    source: Box::new(err),
                })
            })
        });
        Self {
            name: name.into(),
            description: description.into(),
            parameters: ToolSchema::of::<P>(),
            handler,
        }
    }

    /// Builds a tool whose handler works on raw JSON payloads.
    ///
    /// For parameter shapes that are hand-written schema documents rather
    /// than Rust types. The payload reaches the handler as-is.
    pub fn untyped<F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: ToolSchema,
        handler: F,
    ) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ToolError>> + Send + 'static,
    {
        let handler: Handler = Box::new(move |args| Box::pin(handler(args)));
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            handler,
        }
    }

    /// Wraps the tool in the shared handle the dialect functions take.
    #[must_use]
    pub fn shared(self) -> SharedTool {
        Arc::new(self)
    }
}

#[async_trait]
impl Tool for FunctionTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters(&self) -> &ToolSchema {
        &self.parameters
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        (self.handler)(args).await
    }
}

impl fmt::Debug for FunctionTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionTool")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Deserialize, JsonSchema)]
    struct EchoParams {
        text: String,
    }

    #[derive(Serialize)]
    struct EchoReply {
        echoed: String,
    }

    fn echo_tool() -> FunctionTool {
        FunctionTool::new(
            "echo",
            "Repeats the given text back.",
            |params: EchoParams| async move {
                Ok(EchoReply {
                    echoed: params.text,
                })
            },
        )
    }

    // -- 1. Typed handler ---------------------------------------------------

    #[tokio::test]
    async fn typed_handler_round_trips_json() {
        let tool = echo_tool();
        let out = tool.execute(json!({ "text": "hi" })).await.unwrap();
        assert_eq!(out, json!({ "echoed": "hi" }));
    }

    #[tokio::test]
    async fn typed_handler_rejects_bad_payload_before_running() {
        let tool = echo_tool();
        let err = tool.execute(json!({ "text": 5 })).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn typed_handler_derives_schema() {
        let tool = echo_tool();
        assert!(tool.parameters().is_object());
        assert_eq!(tool.parameters().required(), vec!["text".to_string()]);
    }

    // -- 2. Untyped handler -------------------------------------------------

    #[tokio::test]
    async fn untyped_handler_sees_raw_payload() {
        let tool = FunctionTool::untyped(
            "raw",
            "Echoes raw JSON.",
            ToolSchema::from_value(json!({ "type": "object" })),
            |args| async move { Ok(args) },
        );
        let out = tool.execute(json!({ "anything": [1, 2] })).await.unwrap();
        assert_eq!(out, json!({ "anything": [1, 2] }));
    }

    // -- 3. Failure propagation ---------------------------------------------

    #[tokio::test]
    async fn handler_failure_comes_back_boxed() {
        let tool = FunctionTool::new(
            "flaky",
            "Always fails.",
            |_: EchoParams| async move { Err::<EchoReply, _>("no network".into()) },
        );
        let err = tool.execute(json!({ "text": "x" })).await.unwrap_err();
        assert_eq!(err.to_string(), "execution failed: no network");
    }

    #[test]
    fn shared_handle_is_object_safe() {
        let tool: SharedTool = echo_tool().shared();
        assert_eq!(tool.name(), "echo");
    }
}
