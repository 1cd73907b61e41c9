#![allow(dead_code)]

use css_modules_lsp::server::state::ServerState;
use css_modules_lsp::server::util::offset_to_position;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tower_lsp::lsp_types::{
    CompletionParams, PartialResultParams, Position, TextDocumentIdentifier,
    TextDocumentPositionParams, Url, WorkDoneProgressParams,
};

// Global atomic counter to ensure unique temp directory names
static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct TestFixture {
    pub temp_dir: PathBuf,
    pub state: ServerState,
}

impl TestFixture {
    pub async fn new() -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let counter = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let temp_dir =
            std::env::temp_dir().join(format!("css_modules_test_{}_{}", timestamp, counter));
        fs::create_dir_all(&temp_dir).unwrap();

        let state = ServerState::with_defaults();
        state.config.set_workspace_root(temp_dir.clone()).await;
        state.config.reload().await.expect("default configuration");

        Self { temp_dir, state }
    }

    pub fn create_file(&self, name: &str, content: &str) -> Url {
        let path = self.temp_dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).ok();
        }
        let mut f = File::create(&path).unwrap();
        write!(f, "{}", content).unwrap();
        Url::from_file_path(&path).unwrap()
    }

    pub fn uri(&self, name: &str) -> Url {
        Url::from_file_path(self.temp_dir.join(name)).unwrap()
    }

    /// Open `name` as an editor buffer without writing it to disk.
    pub fn open(&self, name: &str, content: &str) -> Url {
        let uri = self.uri(name);
        let language_id = match name.rsplit('.').next() {
            Some("tsx") => "typescriptreact",
            Some("ts") => "typescript",
            Some("jsx") => "javascriptreact",
            Some("js") => "javascript",
            Some(other) => other,
            None => "plaintext",
        };
        self.state
            .document_manager
            .open(uri.clone(), language_id.to_string(), content.to_string(), 1);
        uri
    }

    pub fn edit(&self, uri: &Url, content: &str, version: i32) {
        self.state.document_manager.change(
            uri,
            vec![tower_lsp::lsp_types::TextDocumentContentChangeEvent {
                range: None,
                range_length: None,
                text: content.to_string(),
            }],
            version,
        );
    }
}

impl Drop for TestFixture {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.temp_dir);
    }
}

/// Position of the first occurrence of `needle`, shifted by `delta` bytes.
pub fn position_of(content: &str, needle: &str, delta: isize) -> Position {
    let offset = content.find(needle).expect("needle present") as isize + delta;
    offset_to_position(content, offset as usize)
}

pub fn completion_params(uri: &Url, position: Position) -> CompletionParams {
    CompletionParams {
        text_document_position: TextDocumentPositionParams {
            text_document: TextDocumentIdentifier { uri: uri.clone() },
            position,
        },
        work_done_progress_params: WorkDoneProgressParams::default(),
        partial_result_params: PartialResultParams::default(),
        context: None,
    }
}

pub fn labels(items: &Option<Vec<tower_lsp::lsp_types::CompletionItem>>) -> Vec<String> {
    items
        .as_ref()
        .map(|items| items.iter().map(|i| i.label.clone()).collect())
        .unwrap_or_default()
}
