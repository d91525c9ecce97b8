//! JSON-RPC wire shapes for the tool-server protocol.
//!
//! Two methods are spoken: `tools/list` (no params) and `tools/call`
//! (`{name, arguments}`). Both travel as JSON-RPC 2.0 envelopes over HTTP
//! POST to a local endpoint.

use serde::Deserialize;
use serde_json::{Value, json};

/// Build a `tools/list` request body.
pub fn list_request() -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "tools/list",
        "params": {}
    })
}

/// Build a `tools/call` request body.
pub fn call_request(tool_name: &str, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "tools/call",
        "params": {
            "name": tool_name,
            "arguments": arguments,
        }
    })
}

/// A JSON-RPC response envelope. Only `result` is interesting to us.
#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
}

/// The payload of a `tools/list` result.
#[derive(Debug, Deserialize)]
pub struct ListResult {
    #[serde(default)]
    pub tools: Vec<crate::ToolDescriptor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_request_shape() {
        let req = list_request();
        assert_eq!(req["jsonrpc"], "2.0");
        assert_eq!(req["method"], "tools/list");
        assert!(req["params"].is_object());
    }

    #[test]
    fn call_request_carries_name_and_arguments() {
        let req = call_request("filesystem_read", json!({"path": "notes/a.md"}));
        assert_eq!(req["method"], "tools/call");
        assert_eq!(req["params"]["name"], "filesystem_read");
        assert_eq!(req["params"]["arguments"]["path"], "notes/a.md");
    }

    #[test]
    fn parse_list_result() {
        let resp: RpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"result":{"tools":[
                {"name":"filesystem_read","description":"Read a file","inputSchema":{"type":"object"}}
            ]}}"#,
        )
        .unwrap();
        let list: ListResult = serde_json::from_value(resp.result.unwrap()).unwrap();
        assert_eq!(list.tools.len(), 1);
        assert_eq!(list.tools[0].name, "filesystem_read");
    }

    #[test]
    fn missing_result_is_none() {
        let resp: RpcResponse = serde_json::from_str(r#"{"jsonrpc":"2.0","id":1}"#).unwrap();
        assert!(resp.result.is_none());
    }
}
