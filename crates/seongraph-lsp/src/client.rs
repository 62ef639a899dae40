//! Blocking JSON-RPC stdio client for an external language server
//!
//! One child process per analyzed language, `Content-Length` framed messages,
//! synchronous round-trips. Server-to-client requests are acknowledged with a
//! null result so servers that ask for configuration keep answering. The
//! process is shut down on drop.

use std::collections::HashSet;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use lsp_types::{GotoDefinitionResponse, Location};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::resolver::{RawLocation, SymbolResolver};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RpcMessage {
    // Order matters for untagged deserialization: a server request carries
    // both `id` and `method`, a response only `id`, a notification only
    // `method`.
    Request {
        id: Value,
        method: String,
        #[serde(default)]
        params: Value,
    },
    Notification {
        method: String,
        #[serde(default)]
        params: Value,
    },
    Response {
        id: Value,
        #[serde(default)]
        result: Option<Value>,
        #[serde(default)]
        error: Option<Value>,
    },
}

struct Connection {
    child: Child,
    stdin: ChildStdin,
    stdout: ChildStdout,
    next_id: u64,
    opened: HashSet<PathBuf>,
}

impl Connection {
    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Sends one JSON-RPC message with a `Content-Length` header.
    fn send(&mut self, message: &Value) -> Result<()> {
        let body = serde_json::to_vec(message)?;
        let header = format!("Content-Length: {}\r\n\r\n", body.len());
        self.stdin.write_all(header.as_bytes())?;
        self.stdin.write_all(&body)?;
        self.stdin.flush()?;
        debug!("LSP → {}", serde_json::to_string(message).unwrap_or_default());
        Ok(())
    }

    /// Receives a single message. Blocks until a complete frame is read.
    fn recv(&mut self) -> Result<RpcMessage> {
        read_frame(&mut self.stdout)
    }

    /// Round-trip: send a request, pump messages until its response arrives.
    fn request(&mut self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id();
        self.send(&json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params}))?;
        loop {
            match self.recv()? {
                RpcMessage::Response { id: rid, result, error } if rid == json!(id) => {
                    return match error {
                        Some(error) => Err(Error::Server(error.to_string())),
                        None => Ok(result.unwrap_or(Value::Null)),
                    };
                }
                RpcMessage::Request { id, .. } => {
                    // Acknowledge configuration/capability requests.
                    self.send(&json!({"jsonrpc": "2.0", "id": id, "result": null}))?;
                }
                _ => continue,
            }
        }
    }

    fn notify(&mut self, method: &str, params: Value) -> Result<()> {
        self.send(&json!({"jsonrpc": "2.0", "method": method, "params": params}))
    }
}

pub struct LspClient {
    inner: Mutex<Connection>,
    root: PathBuf,
}

impl LspClient {
    /// Spawns `program args…` rooted at `root` and performs the
    /// `initialize`/`initialized` handshake.
    pub fn start(program: &str, args: &[String], root: &Path) -> Result<Self> {
        let mut child = Command::new(program)
            .args(args)
            .current_dir(root)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|_| Error::Spawn("failed to spawn language server process"))?;

        let stdin = child.stdin.take().ok_or(Error::Spawn("no stdin"))?;
        let stdout = child.stdout.take().ok_or(Error::Spawn("no stdout"))?;
        let mut connection = Connection {
            child,
            stdin,
            stdout,
            next_id: 1,
            opened: HashSet::new(),
        };

        let root_uri = dir_uri(root)?;
        connection.request(
            "initialize",
            json!({
                "processId": std::process::id(),
                "rootUri": root_uri,
                "capabilities": {},
            }),
        )?;
        connection.notify("initialized", json!({}))?;

        Ok(LspClient {
            inner: Mutex::new(connection),
            root: root.to_path_buf(),
        })
    }

    fn with_connection<T>(&self, f: impl FnOnce(&mut Connection) -> Result<T>) -> Result<T> {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }

    /// Opens the document if this is the first query against it; servers only
    /// answer position requests for files they have seen.
    fn ensure_open(&self, connection: &mut Connection, file: &Path) -> Result<String> {
        let absolute = self.root.join(file);
        let uri = file_uri(&absolute)?;
        if connection.opened.insert(absolute.clone()) {
            let text = std::fs::read_to_string(&absolute).unwrap_or_default();
            connection.notify(
                "textDocument/didOpen",
                json!({
                    "textDocument": {
                        "uri": uri,
                        "languageId": language_id(&absolute),
                        "version": 1,
                        "text": text,
                    }
                }),
            )?;
        }
        Ok(uri)
    }
}

impl SymbolResolver for LspClient {
    fn definition(&self, file: &Path, line: u32, character: u32) -> Result<Vec<RawLocation>> {
        self.with_connection(|connection| {
            let uri = self.ensure_open(connection, file)?;
            let result = connection.request(
                "textDocument/definition",
                json!({
                    "textDocument": {"uri": uri},
                    "position": {"line": line, "character": character},
                }),
            )?;
            let response: Option<GotoDefinitionResponse> = serde_json::from_value(result)?;
            Ok(match response {
                None => Vec::new(),
                Some(GotoDefinitionResponse::Scalar(location)) => vec![raw(&location)],
                Some(GotoDefinitionResponse::Array(locations)) => {
                    locations.iter().map(raw).collect()
                }
                Some(GotoDefinitionResponse::Link(links)) => links
                    .iter()
                    .map(|link| RawLocation {
                        uri: link.target_uri.as_str().to_string(),
                        line: link.target_selection_range.start.line,
                        character: link.target_selection_range.start.character,
                    })
                    .collect(),
            })
        })
    }

    fn references(&self, file: &Path, line: u32, character: u32) -> Result<Vec<RawLocation>> {
        self.with_connection(|connection| {
            let uri = self.ensure_open(connection, file)?;
            let result = connection.request(
                "textDocument/references",
                json!({
                    "textDocument": {"uri": uri},
                    "position": {"line": line, "character": character},
                    "context": {"includeDeclaration": false},
                }),
            )?;
            let locations: Option<Vec<Location>> = serde_json::from_value(result)?;
            Ok(locations.unwrap_or_default().iter().map(raw).collect())
        })
    }
}

impl Drop for LspClient {
    fn drop(&mut self) {
        // Best-effort graceful shutdown.
        let _ = self.with_connection(|connection| {
            let id = connection.next_id();
            connection.send(&json!({"jsonrpc": "2.0", "id": id, "method": "shutdown"}))?;
            let deadline = Instant::now() + Duration::from_millis(400);
            while Instant::now() < deadline {
                match connection.recv() {
                    Ok(RpcMessage::Response { id: rid, .. }) if rid == json!(id) => break,
                    Ok(_) => continue,
                    Err(_) => break,
                }
            }
            connection.notify("exit", json!({}))?;
            let _ = connection.child.wait();
            Ok(())
        });
    }
}

fn raw(location: &Location) -> RawLocation {
    RawLocation {
        uri: location.uri.as_str().to_string(),
        line: location.range.start.line,
        character: location.range.start.character,
    }
}

fn file_uri(path: &Path) -> Result<String> {
    Url::from_file_path(path)
        .map(String::from)
        .map_err(|_| Error::InvalidPath(path.display().to_string()))
}

fn dir_uri(path: &Path) -> Result<String> {
    Url::from_directory_path(path)
        .map(String::from)
        .map_err(|_| Error::InvalidPath(path.display().to_string()))
}

fn language_id(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("java") => "java",
        Some("cpp") | Some("h") | Some("hpp") => "cpp",
        _ => "plaintext",
    }
}

/// Reads one `Content-Length` framed message.
fn read_frame<R: Read>(reader: &mut R) -> Result<RpcMessage> {
    // Read header bytes until CRLFCRLF.
    let mut header = Vec::<u8>::new();
    let mut last4 = [0u8; 4];
    let mut byte = [0u8; 1];
    loop {
        reader.read_exact(&mut byte)?;
        header.push(byte[0]);
        last4.rotate_left(1);
        last4[3] = byte[0];
        if &last4 == b"\r\n\r\n" {
            break;
        }
        if header.len() > 8192 {
            return Err(Error::Protocol("header too large"));
        }
    }

    let header = String::from_utf8_lossy(&header);
    let mut content_length = 0usize;
    for line in header.split("\r\n") {
        if let Some(value) = line.strip_prefix("Content-Length: ") {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }
    if content_length == 0 {
        return Err(Error::Protocol("missing content length"));
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body)?;
    debug!("LSP ← {}", String::from_utf8_lossy(&body));
    Ok(serde_json::from_slice(&body)?)
}
