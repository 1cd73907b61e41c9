use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::thread;
use std::time::{Duration, Instant};

static REQUEST_ID: AtomicI64 = AtomicI64::new(1);

pub struct LspTestClient {
    child: Child,
    stdin: Arc<Mutex<ChildStdin>>,
    pending_responses: Arc<RwLock<HashMap<i64, Value>>>,
    notifications: Arc<RwLock<Vec<JsonRpcNotification>>>,
    _reader_handle: thread::JoinHandle<()>,
    pub root_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: i64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

#[allow(dead_code)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcNotification {
    pub jsonrpc: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

type BoxResult<T> = Result<T, Box<dyn std::error::Error>>;

impl LspTestClient {
    pub fn spawn(workspace_root: PathBuf, root_uri: String) -> BoxResult<Self> {
        let lsp_binary = std::env::var("CSS_MODULES_LSP_BINARY")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(env!("CARGO_BIN_EXE_css-modules-lsp")));

        if !lsp_binary.exists() {
            return Err(format!("LSP binary not found at {:?}", lsp_binary).into());
        }

        let mut child = Command::new(&lsp_binary)
            .current_dir(&workspace_root)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;

        let stdin = child.stdin.take().ok_or("Failed to capture stdin")?;
        let stdout = child.stdout.take().ok_or("Failed to capture stdout")?;

        let stdin = Arc::new(Mutex::new(stdin));
        let pending_responses = Arc::new(RwLock::new(HashMap::new()));
        let notifications = Arc::new(RwLock::new(Vec::new()));

        let pending_clone = Arc::clone(&pending_responses);
        let notifications_clone = Arc::clone(&notifications);
        let stdin_clone = Arc::clone(&stdin);

        let reader_handle = thread::spawn(move || {
            Self::read_messages(stdout, pending_clone, notifications_clone, stdin_clone);
        });

        Ok(Self {
            child,
            stdin,
            pending_responses,
            notifications,
            _reader_handle: reader_handle,
            root_uri,
        })
    }

    fn read_messages(
        stdout: ChildStdout,
        pending: Arc<RwLock<HashMap<i64, Value>>>,
        notifications: Arc<RwLock<Vec<JsonRpcNotification>>>,
        stdin: Arc<Mutex<ChildStdin>>,
    ) {
        let mut reader = BufReader::new(stdout);

        loop {
            let mut content_length: Option<usize> = None;
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap_or(0) == 0 {
                    return;
                }
                let line = line.trim();
                if line.is_empty() {
                    break;
                }
                if let Some(len_str) = line.strip_prefix("Content-Length:") {
                    content_length = len_str.trim().parse().ok();
                }
            }

            let Some(len) = content_length else {
                continue;
            };

            let mut content = vec![0u8; len];
            if reader.read_exact(&mut content).is_err() {
                return;
            }

            let Ok(message): Result<Value, _> = serde_json::from_slice(&content) else {
                continue;
            };

            if let Some(id) = message.get("id").and_then(|v| v.as_i64()) {
                if message.get("result").is_some() || message.get("error").is_some() {
                    pending.write().unwrap().insert(id, message);
                } else if message.get("method").is_some() {
                    // Server-to-client request (watcher registration): acknowledge it.
                    let response = json!({ "jsonrpc": "2.0", "id": id, "result": null });
                    if let Ok(mut stdin) = stdin.lock() {
                        let _ = write_frame(&mut *stdin, &response);
                    }
                }
            } else if message.get("method").is_some() {
                if let Ok(notif) = serde_json::from_value::<JsonRpcNotification>(message) {
                    notifications.write().unwrap().push(notif);
                }
            }
        }
    }

    pub fn request(&self, method: &str, params: Option<Value>) -> BoxResult<Value> {
        let id = REQUEST_ID.fetch_add(1, Ordering::SeqCst);
        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id,
            method: method.to_string(),
            params,
        };
        self.send_message(&serde_json::to_value(&request)?)?;

        let timeout = Duration::from_secs(30);
        let start = Instant::now();
        loop {
            if let Some(response) = self.pending_responses.write().unwrap().remove(&id) {
                if let Some(error) = response.get("error") {
                    return Err(format!("LSP Error: {:?}", error).into());
                }
                return Ok(response.get("result").cloned().unwrap_or(Value::Null));
            }
            if start.elapsed() > timeout {
                return Err(format!("Request '{}' timed out after {:?}", method, timeout).into());
            }
            thread::sleep(Duration::from_millis(10));
        }
    }

    pub fn notify(&self, method: &str, params: Option<Value>) -> BoxResult<()> {
        self.send_message(&json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params
        }))
    }

    fn send_message(&self, message: &Value) -> BoxResult<()> {
        let mut stdin = self.stdin.lock().unwrap();
        write_frame(&mut *stdin, message)?;
        Ok(())
    }

    pub fn clear_notifications(&self) {
        self.notifications.write().unwrap().clear();
    }

    /// Diagnostics from the latest `publishDiagnostics` for `uri`.
    pub fn wait_for_diagnostics(&self, uri: &str, timeout: Duration) -> Option<Vec<Value>> {
        let start = Instant::now();
        loop {
            let latest = self
                .notifications
                .read()
                .unwrap()
                .iter()
                .filter(|n| n.method == "textDocument/publishDiagnostics")
                .filter_map(|n| n.params.as_ref())
                .filter(|p| p.get("uri").and_then(Value::as_str) == Some(uri))
                .last()
                .and_then(|p| p.get("diagnostics")?.as_array().cloned());
            if latest.is_some() {
                return latest;
            }
            if start.elapsed() > timeout {
                return None;
            }
            thread::sleep(Duration::from_millis(50));
        }
    }

    pub fn initialize(&self) -> BoxResult<Value> {
        self.initialize_with_options(None)
    }

    pub fn initialize_with_options(&self, options: Option<Value>) -> BoxResult<Value> {
        let init_params = json!({
            "processId": std::process::id(),
            "rootUri": self.root_uri,
            "initializationOptions": options,
            "capabilities": {
                "textDocument": {
                    "completion": { "completionItem": { "snippetSupport": false } },
                    "publishDiagnostics": {}
                },
                "workspace": {
                    "didChangeWatchedFiles": { "dynamicRegistration": true }
                }
            }
        });

        let result = self.request("initialize", Some(init_params))?;
        self.notify("initialized", Some(json!({})))?;
        thread::sleep(Duration::from_millis(300));

        Ok(result)
    }

    pub fn shutdown(&self) -> BoxResult<()> {
        self.request("shutdown", None)?;
        self.notify("exit", None)?;
        Ok(())
    }

    pub fn open_document(&self, uri: &str, language_id: &str, text: &str) -> BoxResult<()> {
        self.notify(
            "textDocument/didOpen",
            Some(json!({
                "textDocument": {
                    "uri": uri,
                    "languageId": language_id,
                    "version": 1,
                    "text": text
                }
            })),
        )
    }

    pub fn change_document(&self, uri: &str, version: i32, text: &str) -> BoxResult<()> {
        self.notify(
            "textDocument/didChange",
            Some(json!({
                "textDocument": { "uri": uri, "version": version },
                "contentChanges": [{ "text": text }]
            })),
        )
    }

    pub fn close_document(&self, uri: &str) -> BoxResult<()> {
        self.notify(
            "textDocument/didClose",
            Some(json!({ "textDocument": { "uri": uri } })),
        )
    }

    /// `didChangeWatchedFiles` with a single "changed" event.
    pub fn file_changed(&self, uri: &str) -> BoxResult<()> {
        self.notify(
            "workspace/didChangeWatchedFiles",
            Some(json!({ "changes": [{ "uri": uri, "type": 2 }] })),
        )
    }

    pub fn completion(&self, uri: &str, line: u32, character: u32) -> BoxResult<Value> {
        self.request(
            "textDocument/completion",
            Some(json!({
                "textDocument": { "uri": uri },
                "position": { "line": line, "character": character }
            })),
        )
    }
}

impl Drop for LspTestClient {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn write_frame(out: &mut impl Write, message: &Value) -> std::io::Result<()> {
    let content = serde_json::to_string(message)?;
    write!(out, "Content-Length: {}\r\n\r\n{}", content.len(), content)?;
    out.flush()
}
