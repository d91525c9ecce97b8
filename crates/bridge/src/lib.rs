//! Tool-server bridge for Notewright.
//!
//! The bridge keeps a catalog of tools exposed by configured tool servers,
//! dispatches invocations over a JSON-RPC HTTP transport, and degrades to
//! direct vault operations when no matching tool is available.
//!
//! Failure handling is per server: a server that cannot be listed stays in
//! the roster with an empty catalog ("connected but toolless") so one bad
//! server never blocks the others.

use notewright_core::error::ToolError;
use notewright_core::vault::Vault;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashMap;
use tracing::{debug, info, warn};

pub mod rpc;

const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Declares an external tool server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolServerConfig {
    pub name: String,
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub env: HashMap<String, String>,
}

/// A tool advertised by a server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "inputSchema")]
    pub input_schema: Value,
}

/// Per-server connection status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerStatus {
    pub name: String,
    /// A catalog entry exists for this server (even if empty).
    pub connected: bool,
    pub tool_count: usize,
}

/// A brokered file operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOperation {
    Read,
    Write,
    List,
}

impl FileOperation {
    /// The canonical tool name resolved for this operation.
    fn tool_name(self) -> &'static str {
        match self {
            Self::Read => "filesystem_read",
            Self::Write => "filesystem_write",
            Self::List => "directory_list",
        }
    }
}

/// Parse a JSON array of server configurations.
///
/// Invalid JSON yields zero servers, not a fatal error.
pub fn parse_server_configs(raw: &str) -> Vec<ToolServerConfig> {
    let text = if raw.trim().is_empty() { "[]" } else { raw };
    match serde_json::from_str(text) {
        Ok(servers) => servers,
        Err(e) => {
            warn!(error = %e, "Malformed tool server configuration, treating as empty");
            Vec::new()
        }
    }
}

/// The tool bridge.
pub struct ToolBridge {
    base_url: String,
    client: reqwest::Client,
    servers: Vec<ToolServerConfig>,
    /// Server name → tools, rebuilt wholesale on each connect cycle.
    catalog: HashMap<String, Vec<ToolDescriptor>>,
    /// Server processes we launched and therefore own.
    processes: HashMap<String, tokio::process::Child>,
}

impl ToolBridge {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            base_url: DEFAULT_BASE_URL.into(),
            client,
            servers: Vec::new(),
            catalog: HashMap::new(),
            processes: HashMap::new(),
        }
    }

    /// Point the transport at a different endpoint (for tests and proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Connect to the configured servers: launch each one best-effort and
    /// request its tool listing. Any failure leaves that server with an
    /// empty catalog; other servers are unaffected.
    pub async fn connect(&mut self, servers: Vec<ToolServerConfig>) {
        self.servers = servers;
        self.catalog.clear();

        for server in self.servers.clone() {
            self.connect_server(&server).await;
        }

        info!(servers = self.servers.len(), "Tool server connect cycle complete");
    }

    async fn connect_server(&mut self, server: &ToolServerConfig) {
        if !server.command.is_empty() {
            match tokio::process::Command::new(&server.command)
                .args(&server.args)
                .envs(&server.env)
                .stdout(std::process::Stdio::null())
                .stderr(std::process::Stdio::null())
                .kill_on_drop(true)
                .spawn()
            {
                Ok(child) => {
                    self.processes.insert(server.name.clone(), child);
                }
                Err(e) => {
                    debug!(server = %server.name, error = %e, "Tool server launch failed, trying listing anyway");
                }
            }
        }

        let tools = match self.request_listing().await {
            Ok(tools) => tools,
            Err(e) => {
                warn!(server = %server.name, error = %e, "Tool listing failed, server is connected but toolless");
                Vec::new()
            }
        };

        debug!(server = %server.name, tools = tools.len(), "Stored tool catalog");
        self.catalog.insert(server.name.clone(), tools);
    }

    async fn request_listing(&self) -> Result<Vec<ToolDescriptor>, ToolError> {
        let url = format!("{}/list", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&rpc::list_request())
            .send()
            .await
            .map_err(|e| ToolError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ToolError::Transport(format!(
                "listing returned status {}",
                response.status().as_u16()
            )));
        }

        let envelope: rpc::RpcResponse = response
            .json()
            .await
            .map_err(|e| ToolError::MalformedReply(e.to_string()))?;

        let result = envelope.result.unwrap_or_else(|| json!({}));
        let list: rpc::ListResult = serde_json::from_value(result)
            .map_err(|e| ToolError::MalformedReply(e.to_string()))?;

        Ok(list.tools)
    }

    /// Invoke a tool. A single attempt; a non-success transport status is
    /// surfaced as `ToolError::CallFailed`.
    pub async fn call_tool(
        &self,
        server_name: &str,
        tool_name: &str,
        arguments: Value,
    ) -> Result<Value, ToolError> {
        debug!(server = %server_name, tool = %tool_name, "Dispatching tool call");

        let url = format!("{}/call", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&rpc::call_request(tool_name, arguments))
            .send()
            .await
            .map_err(|e| ToolError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            return Err(ToolError::CallFailed {
                tool_name: tool_name.to_string(),
                status_code: status,
            });
        }

        let envelope: rpc::RpcResponse = response
            .json()
            .await
            .map_err(|e| ToolError::MalformedReply(e.to_string()))?;

        Ok(envelope.result.unwrap_or(Value::Null))
    }

    /// Execute a file operation through the fallback chain:
    ///
    /// 1. the canonical tool, anywhere in the aggregate catalog;
    /// 2. the first tool of a server named `filesystem` / `filesystem-server`;
    /// 3. a direct vault operation.
    ///
    /// Each tier is tried only when the previous one has no matching
    /// descriptor — a failed call at an available tier propagates its error.
    pub async fn execute_file_operation(
        &self,
        operation: FileOperation,
        path: &str,
        content: Option<&str>,
        vault: &dyn Vault,
    ) -> Result<String, ToolError> {
        let canonical = operation.tool_name();
        let arguments = match content {
            Some(c) => json!({"path": path, "content": c}),
            None => json!({"path": path}),
        };

        if let Some(server) = self.server_with_tool(canonical) {
            let result = self.call_tool(&server, canonical, arguments).await?;
            return Ok(result.to_string());
        }

        if let Some((server, tool)) = self.filesystem_fallback_tool() {
            let result = self.call_tool(&server, &tool, arguments).await?;
            return Ok(result.to_string());
        }

        Ok(self.vault_file_operation(operation, path, content, vault).await)
    }

    /// Find a server advertising the named tool, in roster order.
    fn server_with_tool(&self, tool_name: &str) -> Option<String> {
        self.servers
            .iter()
            .find(|s| {
                self.catalog
                    .get(&s.name)
                    .is_some_and(|tools| tools.iter().any(|t| t.name == tool_name))
            })
            .map(|s| s.name.clone())
    }

    /// First tool under a server named `filesystem` or `filesystem-server`.
    fn filesystem_fallback_tool(&self) -> Option<(String, String)> {
        for name in ["filesystem", "filesystem-server"] {
            if let Some(tool) = self.catalog.get(name).and_then(|tools| tools.first()) {
                return Some((name.to_string(), tool.name.clone()));
            }
        }
        None
    }

    async fn vault_file_operation(
        &self,
        operation: FileOperation,
        path: &str,
        content: Option<&str>,
        vault: &dyn Vault,
    ) -> String {
        debug!(?operation, path, "No tool server available, using vault directly");

        match operation {
            FileOperation::Read => match vault.read_file(path).await {
                Ok(content) => content,
                Err(_) => "File not found".to_string(),
            },
            FileOperation::Write => {
                match vault.write_file(path, content.unwrap_or_default()).await {
                    Ok(()) => "File written".to_string(),
                    Err(e) => format!("Write failed: {e}"),
                }
            }
            FileOperation::List => {
                let files = vault.list_files_with_prefix(path).await;
                serde_json::to_string(&files).unwrap_or_else(|_| "[]".to_string())
            }
        }
    }

    /// Terminate owned server processes and clear the catalog. Idempotent.
    pub async fn disconnect(&mut self) {
        for (name, mut child) in self.processes.drain() {
            debug!(server = %name, "Terminating tool server process");
            let _ = child.kill().await;
        }
        self.catalog.clear();
    }

    /// Status of every configured server. "Connected" means a catalog
    /// entry exists, even an empty one.
    pub fn server_status(&self) -> Vec<ServerStatus> {
        self.servers
            .iter()
            .map(|s| ServerStatus {
                name: s.name.clone(),
                connected: self.catalog.contains_key(&s.name),
                tool_count: self.catalog.get(&s.name).map_or(0, Vec::len),
            })
            .collect()
    }

    /// All tools across all connected servers, in roster order.
    pub fn tools(&self) -> Vec<ToolDescriptor> {
        self.servers
            .iter()
            .filter_map(|s| self.catalog.get(&s.name))
            .flatten()
            .cloned()
            .collect()
    }
}

impl Default for ToolBridge {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notewright_vault::InMemoryVault;

    fn descriptor(name: &str) -> ToolDescriptor {
        ToolDescriptor {
            name: name.into(),
            description: String::new(),
            input_schema: json!({"type": "object"}),
        }
    }

    fn server(name: &str) -> ToolServerConfig {
        ToolServerConfig {
            name: name.into(),
            command: String::new(),
            args: Vec::new(),
            env: HashMap::new(),
        }
    }

    #[test]
    fn parse_valid_server_configs() {
        let configs = parse_server_configs(
            r#"[{"name": "filesystem", "command": "npx", "args": ["-y", "server-filesystem", "."]}]"#,
        );
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].name, "filesystem");
        assert_eq!(configs[0].args.len(), 3);
    }

    #[test]
    fn malformed_config_yields_zero_servers() {
        assert!(parse_server_configs("{not json").is_empty());
        assert!(parse_server_configs("").is_empty());
    }

    #[tokio::test]
    async fn unreachable_server_is_connected_but_toolless() {
        // Nothing listens on this port; listing fails, catalog entry stays empty.
        let mut bridge = ToolBridge::new().with_base_url("http://127.0.0.1:1");
        bridge.connect(vec![server("alpha"), server("beta")]).await;

        let status = bridge.server_status();
        assert_eq!(status.len(), 2);
        for s in &status {
            assert!(s.connected);
            assert_eq!(s.tool_count, 0);
        }
    }

    #[tokio::test]
    async fn partial_availability_is_isolated_per_server() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Answer the first listing request with one tool, then close the
        // second connection without replying.
        let server_task = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let mut read = 0;
            loop {
                let n = socket.read(&mut buf[read..]).await.unwrap();
                read += n;
                if n == 0 || String::from_utf8_lossy(&buf[..read]).contains("tools/list") {
                    break;
                }
            }
            let body = r#"{"jsonrpc":"2.0","id":1,"result":{"tools":[{"name":"filesystem_read","description":"Read a file","inputSchema":{"type":"object"}}]}}"#;
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            if let Ok((socket, _)) = listener.accept().await {
                drop(socket);
            }
        });

        let mut bridge = ToolBridge::new().with_base_url(format!("http://{addr}"));
        bridge.connect(vec![server("good"), server("bad")]).await;
        server_task.await.unwrap();

        let status = bridge.server_status();
        assert!(status.iter().all(|s| s.connected));
        assert_eq!(
            status.iter().find(|s| s.name == "good").unwrap().tool_count,
            1
        );
        assert_eq!(
            status.iter().find(|s| s.name == "bad").unwrap().tool_count,
            0
        );
        assert_eq!(bridge.server_with_tool("filesystem_read").as_deref(), Some("good"));
    }

    #[tokio::test]
    async fn disconnect_is_idempotent() {
        let mut bridge = ToolBridge::new();
        bridge.disconnect().await;
        bridge.disconnect().await;
        assert!(bridge.server_status().is_empty());
    }

    #[tokio::test]
    async fn status_before_connect_reports_disconnected() {
        let mut bridge = ToolBridge::new().with_base_url("http://127.0.0.1:1");
        bridge.connect(vec![server("alpha")]).await;
        bridge.disconnect().await;
        let status = bridge.server_status();
        assert_eq!(status.len(), 1);
        assert!(!status[0].connected);
    }

    #[test]
    fn exact_tool_resolved_in_roster_order() {
        let mut bridge = ToolBridge::new();
        bridge.servers = vec![server("a"), server("b")];
        bridge.catalog.insert("a".into(), vec![]);
        bridge
            .catalog
            .insert("b".into(), vec![descriptor("filesystem_read")]);

        assert_eq!(bridge.server_with_tool("filesystem_read").as_deref(), Some("b"));
        assert!(bridge.server_with_tool("directory_list").is_none());
    }

    #[test]
    fn filesystem_namespace_fallback_prefers_plain_name() {
        let mut bridge = ToolBridge::new();
        bridge.servers = vec![server("filesystem"), server("filesystem-server")];
        bridge
            .catalog
            .insert("filesystem".into(), vec![descriptor("fs_generic")]);
        bridge
            .catalog
            .insert("filesystem-server".into(), vec![descriptor("other")]);

        let (srv, tool) = bridge.filesystem_fallback_tool().unwrap();
        assert_eq!(srv, "filesystem");
        assert_eq!(tool, "fs_generic");
    }

    #[tokio::test]
    async fn read_falls_back_to_vault() {
        let bridge = ToolBridge::new();
        let vault = InMemoryVault::with_files(&[("notes/a.md", "note content")]);

        let result = bridge
            .execute_file_operation(FileOperation::Read, "notes/a.md", None, &vault)
            .await
            .unwrap();
        assert_eq!(result, "note content");
    }

    #[tokio::test]
    async fn read_missing_file_is_literal_not_found() {
        let bridge = ToolBridge::new();
        let vault = InMemoryVault::new();

        let result = bridge
            .execute_file_operation(FileOperation::Read, "missing.md", None, &vault)
            .await
            .unwrap();
        assert_eq!(result, "File not found");
    }

    #[tokio::test]
    async fn write_falls_back_to_vault() {
        let bridge = ToolBridge::new();
        let vault = InMemoryVault::new();

        let result = bridge
            .execute_file_operation(FileOperation::Write, "new.md", Some("body"), &vault)
            .await
            .unwrap();
        assert_eq!(result, "File written");
        assert_eq!(vault.read_file("new.md").await.unwrap(), "body");
    }

    #[tokio::test]
    async fn list_falls_back_to_vault_as_json() {
        let bridge = ToolBridge::new();
        let vault = InMemoryVault::with_files(&[("notes/a.md", ""), ("journal/b.md", "")]);

        let result = bridge
            .execute_file_operation(FileOperation::List, "notes/", None, &vault)
            .await
            .unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0]["path"], "notes/a.md");
        assert_eq!(parsed[0]["name"], "a.md");
    }

    #[tokio::test]
    async fn available_tool_failure_propagates_instead_of_falling_back() {
        // A descriptor exists, so tier 1 is attempted; the dead endpoint
        // makes the call fail, and the error must NOT be swallowed by the
        // vault fallback.
        let mut bridge = ToolBridge::new().with_base_url("http://127.0.0.1:1");
        bridge.servers = vec![server("fs")];
        bridge
            .catalog
            .insert("fs".into(), vec![descriptor("filesystem_read")]);
        let vault = InMemoryVault::with_files(&[("notes/a.md", "should not be returned")]);

        let result = bridge
            .execute_file_operation(FileOperation::Read, "notes/a.md", None, &vault)
            .await;
        assert!(result.is_err());
    }

    #[test]
    fn tools_flattens_in_roster_order() {
        let mut bridge = ToolBridge::new();
        bridge.servers = vec![server("one"), server("two")];
        bridge.catalog.insert("two".into(), vec![descriptor("b")]);
        bridge.catalog.insert("one".into(), vec![descriptor("a")]);

        let names: Vec<String> = bridge.tools().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
