use crate::error::{Result, ToolError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{BufRead, Write};
use std::sync::{Arc, Mutex};

pub const JSONRPC_VERSION: &str = "2.0";

/// Incoming JSON-RPC envelope. Requests carry an id; notifications do not.
#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    #[serde(default)]
    pub id: Option<i64>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

impl RpcRequest {
    /// The code payload: the host sends either a bare string or a
    /// one-element array.
    pub fn code_param(&self) -> Option<&str> {
        match self.params.as_ref()? {
            Value::String(code) => Some(code),
            Value::Array(items) => items.first().and_then(Value::as_str),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
struct RpcResponse {
    jsonrpc: &'static str,
    id: i64,
    result: String,
}

#[derive(Debug, Serialize)]
struct RpcNotification {
    jsonrpc: &'static str,
    method: &'static str,
    params: String,
}

/// Read one `Content-Length: {n}\r\n\r\n{body}` frame. Returns `None` on a
/// clean EOF before any header.
pub fn read_frame(reader: &mut impl BufRead) -> Result<Option<Vec<u8>>> {
    let mut content_length: usize = 0;
    let mut saw_header = false;

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            if saw_header {
                return Err(ToolError::protocol("stream ended inside frame header"));
            }
            return Ok(None);
        }
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            if saw_header {
                break;
            }
            // Stray blank line between frames.
            continue;
        }
        saw_header = true;
        if let Some(value) = line.strip_prefix("Content-Length:") {
            content_length = value
                .trim()
                .parse()
                .map_err(|_| ToolError::protocol(format!("bad Content-Length: {value}")))?;
        }
    }

    if content_length == 0 {
        return Err(ToolError::protocol("frame without Content-Length header"));
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body)?;
    Ok(Some(body))
}

/// Frame writer shared between the server loop and the worker thread.
#[derive(Clone)]
pub struct MessageWriter {
    out: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl MessageWriter {
    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Arc::new(Mutex::new(out)),
        }
    }

    pub fn respond(&self, id: i64, result: impl Into<String>) -> Result<()> {
        self.send(&RpcResponse {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: result.into(),
        })
    }

    /// Out-of-band diagnostic for the host.
    pub fn log(&self, message: impl Into<String>) -> Result<()> {
        self.send(&RpcNotification {
            jsonrpc: JSONRPC_VERSION,
            method: "log",
            params: message.into(),
        })
    }

    fn send(&self, payload: &impl Serialize) -> Result<()> {
        let body = serde_json::to_string(payload)?;
        let mut out = self
            .out
            .lock()
            .map_err(|_| ToolError::protocol("writer lock poisoned"))?;
        // Content-Length counts bytes, not characters.
        write!(out, "Content-Length: {}\r\n\r\n{}", body.len(), body)?;
        out.flush()?;
        Ok(())
    }
}
