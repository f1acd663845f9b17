// MCP server implementation: JSON-RPC 2.0 over newline-delimited stdio

use crate::dispatcher::Dispatcher;
use crate::protocol::*;
use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec, LinesCodecError};

/// Longest accepted request line.
pub const MAX_LINE_LENGTH: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct McpServer {
    dispatcher: Arc<Dispatcher>,
    server_info: ServerInfo,
}

impl McpServer {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            server_info: ServerInfo::default(),
        }
    }

    /// Serve on the process's stdin and stdout until stdin closes.
    pub async fn start(&self) -> Result<()> {
        tracing::info!(
            tools = self.dispatcher.registry().len(),
            "MCP server listening on stdio"
        );
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Read requests line by line and answer each from its own task.
    ///
    /// Responses go through a single writer so frames never interleave. Returns
    /// once the reader hits EOF and every in-flight response is written.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let mut lines = FramedRead::new(reader, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        let writer_task = tokio::spawn(async move {
            let mut sink = FramedWrite::new(writer, LinesCodec::new());
            while let Some(frame) = rx.recv().await {
                sink.send(frame).await.context("Failed to write response")?;
            }
            SinkExt::<String>::flush(&mut sink)
                .await
                .context("Failed to flush stdout")?;
            Ok::<_, anyhow::Error>(())
        });

        while let Some(next) = lines.next().await {
            let line = match next {
                Ok(line) => line,
                Err(LinesCodecError::MaxLineLengthExceeded) => {
                    tracing::error!(max = MAX_LINE_LENGTH, "Request line too long, closing input");
                    let response = JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error());
                    send(&tx, &response);
                    break;
                }
                Err(LinesCodecError::Io(e)) => {
                    tracing::error!(error = %e, "Failed to read from stdin");
                    break;
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            let server = self.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                if let Some(response) = server.handle_message(&line).await {
                    send(&tx, &response);
                }
            });
        }

        tracing::info!("Input closed, waiting for in-flight requests");
        drop(tx);
        writer_task.await.context("Writer task panicked")??;
        tracing::info!("MCP server stopped");
        Ok(())
    }

    /// Handle one raw JSON-RPC line. `None` means nothing is sent back.
    pub async fn handle_message(&self, line: &str) -> Option<JsonRpcResponse> {
        let raw: Value = match serde_json::from_str(line) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "Unparseable message");
                return Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error()));
            }
        };

        let id = raw.get("id").cloned();
        let request: JsonRpcRequest = match serde_json::from_value(raw) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "Malformed request");
                return Some(JsonRpcResponse::error(
                    id.unwrap_or(Value::Null),
                    JsonRpcError::invalid_request(),
                ));
            }
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                request.id.unwrap_or(Value::Null),
                JsonRpcError::invalid_request(),
            ));
        }

        if request.is_notification() {
            tracing::debug!(method = %request.method, "Notification");
            return None;
        }

        Some(self.handle_request(request).await)
    }

    async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.unwrap_or(Value::Null);
        tracing::debug!(method = %request.method, "Request");

        let result = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.params),
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => serde_json::to_value(self.dispatcher.list_tools())
                .map_err(|e| JsonRpcError::internal_error(e.to_string())),
            "tools/call" => self.handle_tools_call(request.params).await,
            method => Err(JsonRpcError::method_not_found(method)),
        };

        match result {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        }
    }

    fn handle_initialize(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: InitializeParams = match params {
            Some(p) => serde_json::from_value(p)
                .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {}", e)))?,
            None => InitializeParams::default(),
        };

        if let Some(client) = &params.client_info {
            tracing::info!(client = %client.name, version = %client.version, "Client connected");
        }

        let result =
            InitializeResult::negotiate(params.protocol_version.as_deref(), self.server_info.clone());
        serde_json::to_value(result).map_err(|e| JsonRpcError::internal_error(e.to_string()))
    }

    async fn handle_tools_call(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: CallToolParams = params
            .ok_or_else(|| JsonRpcError::invalid_params("Missing params"))
            .and_then(|p| {
                serde_json::from_value(p)
                    .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {}", e)))
            })?;

        let result = self
            .dispatcher
            .handle_call(&params.name, params.arguments)
            .await;
        serde_json::to_value(result).map_err(|e| JsonRpcError::internal_error(e.to_string()))
    }
}

fn send(tx: &mpsc::UnboundedSender<String>, response: &JsonRpcResponse) {
    match serde_json::to_string(response) {
        Ok(frame) => {
            if tx.send(frame).is_err() {
                tracing::warn!("Writer closed, dropping response");
            }
        }
        Err(e) => tracing::error!(error = %e, "Failed to serialize response"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::weather_registry;
    use open_meteo_client::{Endpoints, OpenMeteoClient};
    use serde_json::json;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
    use wiremock::matchers::path;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn server_for(base: &str) -> McpServer {
        let endpoints = Endpoints::all(url::Url::parse(base).unwrap());
        let client = OpenMeteoClient::builder().endpoints(endpoints).build().unwrap();
        McpServer::new(Dispatcher::new(weather_registry(Arc::new(client))))
    }

    fn offline_server() -> McpServer {
        server_for("http://127.0.0.1:9")
    }

    async fn call(server: &McpServer, message: Value) -> JsonRpcResponse {
        server
            .handle_message(&message.to_string())
            .await
            .expect("expected a response")
    }

    #[tokio::test]
    async fn test_initialize() {
        let server = offline_server();
        let response = call(
            &server,
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": {
                    "protocolVersion": "2025-03-26",
                    "capabilities": {},
                    "clientInfo": {"name": "inspector", "version": "0.1"}
                }
            }),
        )
        .await;

        let result = response.result.unwrap();
        assert_eq!(response.id, json!(1));
        assert_eq!(result["protocolVersion"], "2025-03-26");
        assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
        assert_eq!(result["serverInfo"]["name"], "open-meteo-mcp");
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let server = offline_server();
        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_ping() {
        let response = call(
            &offline_server(),
            json!({"jsonrpc": "2.0", "id": "p", "method": "ping"}),
        )
        .await;
        assert_eq!(response.id, json!("p"));
        assert_eq!(response.result, Some(json!({})));
    }

    #[tokio::test]
    async fn test_tools_list() {
        let response = call(
            &offline_server(),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
        )
        .await;

        let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();
        assert_eq!(tools.len(), 17);
        assert_eq!(tools[0]["name"], "weather_forecast");
        assert_eq!(tools[16]["name"], "geocoding");
        assert_eq!(tools[0]["inputSchema"]["type"], "object");
    }

    #[tokio::test]
    async fn test_parse_error() {
        let response = offline_server().handle_message("{not json").await.unwrap();
        assert_eq!(response.id, Value::Null);
        assert_eq!(response.error.unwrap().code, -32700);
    }

    #[tokio::test]
    async fn test_invalid_request() {
        let server = offline_server();

        let wrong_version = call(&server, json!({"jsonrpc": "1.0", "id": 3, "method": "ping"})).await;
        assert_eq!(wrong_version.error.unwrap().code, -32600);
        assert_eq!(wrong_version.id, json!(3));

        let no_method = call(&server, json!({"jsonrpc": "2.0", "id": 4})).await;
        assert_eq!(no_method.error.unwrap().code, -32600);
        assert_eq!(no_method.id, json!(4));
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let response = call(
            &offline_server(),
            json!({"jsonrpc": "2.0", "id": 5, "method": "resources/list"}),
        )
        .await;
        let error = response.error.unwrap();
        assert_eq!(error.code, -32601);
        assert!(error.message.contains("resources/list"));
    }

    #[tokio::test]
    async fn test_tools_call_without_name() {
        let response = call(
            &offline_server(),
            json!({"jsonrpc": "2.0", "id": 6, "method": "tools/call", "params": {"arguments": {}}}),
        )
        .await;
        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn test_tools_call_error_is_a_result() {
        let response = call(
            &offline_server(),
            json!({
                "jsonrpc": "2.0",
                "id": 7,
                "method": "tools/call",
                "params": {"name": "geocoding", "arguments": {"name": "X"}}
            }),
        )
        .await;

        assert!(response.error.is_none());
        let result = response.result.unwrap();
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("Error: Invalid arguments for geocoding"));
        assert!(text.contains("name"));
        assert!(result.get("isError").is_none());
    }

    #[tokio::test]
    async fn test_serve_round_trip() {
        let api = MockServer::start().await;
        Mock::given(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"temperature": 21.5})))
            .expect(1)
            .mount(&api)
            .await;
        let server = server_for(&api.uri());

        let (mut client_io, server_io) = tokio::io::duplex(64 * 1024);
        let (server_read, server_write) = tokio::io::split(server_io);
        let handle = tokio::spawn(async move { server.serve(server_read, server_write).await });

        let input = [
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}).to_string(),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string(),
            String::new(),
            json!({
                "jsonrpc": "2.0",
                "id": 2,
                "method": "tools/call",
                "params": {"name": "weather_forecast", "arguments": {"latitude": 52.5, "longitude": 13.4}}
            })
            .to_string(),
        ]
        .join("\n");
        client_io.write_all(input.as_bytes()).await.unwrap();
        client_io.write_all(b"\n").await.unwrap();

        let (client_read, mut client_write) = tokio::io::split(client_io);
        client_write.shutdown().await.unwrap();

        let mut responses = Vec::new();
        let mut reader = BufReader::new(client_read).lines();
        while let Some(line) = reader.next_line().await.unwrap() {
            responses.push(serde_json::from_str::<JsonRpcResponse>(&line).unwrap());
        }
        handle.await.unwrap().unwrap();

        assert_eq!(responses.len(), 2);
        responses.sort_by_key(|r| r.id.as_i64());
        assert_eq!(responses[0].result.as_ref().unwrap()["serverInfo"]["name"], "open-meteo-mcp");

        let text = responses[1].result.as_ref().unwrap()["content"][0]["text"]
            .as_str()
            .unwrap()
            .to_string();
        let body: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(body, json!({"temperature": 21.5}));
    }
}
