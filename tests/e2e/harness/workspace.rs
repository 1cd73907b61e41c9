use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tower_lsp::lsp_types::Url;

static WORKSPACE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A scratch project directory, removed on drop.
pub struct TempWorkspace {
    pub root: PathBuf,
}

impl TempWorkspace {
    pub fn new() -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let counter = WORKSPACE_COUNTER.fetch_add(1, Ordering::SeqCst);

        let root = std::env::temp_dir().join(format!("css_modules_e2e_{}_{}", timestamp, counter));
        fs::create_dir_all(&root).expect("Failed to create temp workspace");

        Self { root }
    }

    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let path = self.root.join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).ok();
        }
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    pub fn file_uri(&self, relative_path: &str) -> String {
        Url::from_file_path(self.root.join(relative_path))
            .expect("absolute workspace path")
            .to_string()
    }

    pub fn root_uri(&self) -> String {
        Url::from_directory_path(&self.root)
            .expect("absolute workspace path")
            .to_string()
    }

    pub fn create_config(&self, content: &str) {
        self.create_file("cssmodules.toml", content);
    }
}

impl Default for TempWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TempWorkspace {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}
