use crate::analysis::ClassNameTransform;
use crate::constants::{CONFIG_FILE_NAME, DEFAULT_STYLE_PATTERNS};
use crate::server::error::LspError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CssModulesConfig {
    #[serde(default)]
    pub features: FeatureConfig,
    #[serde(default)]
    pub styles: StyleConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeatureConfig {
    #[serde(default = "true_bool")]
    pub completion: bool,
    #[serde(default = "true_bool")]
    pub diagnostics: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            completion: true,
            diagnostics: true,
        }
    }
}

/// Which imports count as style modules and how their class names are exported.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleConfig {
    /// Glob patterns matched against the file name of an import specifier.
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub class_name_transform: ClassNameTransform,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            patterns: default_patterns(),
            class_name_transform: ClassNameTransform::default(),
        }
    }
}

fn default_patterns() -> Vec<String> {
    DEFAULT_STYLE_PATTERNS.iter().map(|p| p.to_string()).collect()
}

/// Layers `initializationOptions` and `cssmodules.toml` over the defaults.
///
/// The TOML file wins over editor settings.
pub struct ConfigManager {
    config: Arc<RwLock<CssModulesConfig>>,

    init_settings: Arc<RwLock<Option<serde_json::Value>>>,

    workspace_root: Arc<RwLock<Option<PathBuf>>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(CssModulesConfig::default())),
            init_settings: Arc::new(RwLock::new(None)),
            workspace_root: Arc::new(RwLock::new(None)),
        }
    }

    pub fn get_config(&self) -> Arc<RwLock<CssModulesConfig>> {
        self.config.clone()
    }

    /// Clone of the current configuration.
    pub async fn snapshot(&self) -> CssModulesConfig {
        self.config.read().await.clone()
    }

    pub async fn set_init_settings(&self, settings: Option<serde_json::Value>) {
        let mut lock = self.init_settings.write().await;
        *lock = settings;
    }

    pub async fn set_workspace_root(&self, root: PathBuf) {
        let mut lock = self.workspace_root.write().await;
        *lock = Some(root);
    }

    pub async fn workspace_root(&self) -> Option<PathBuf> {
        self.workspace_root.read().await.clone()
    }

    /// Whether `path` is the configuration file of the current workspace.
    pub async fn is_config_file(&self, path: &Path) -> bool {
        match self.workspace_root.read().await.as_ref() {
            Some(root) => path == root.join(CONFIG_FILE_NAME).as_path(),
            None => path.file_name().is_some_and(|name| name == CONFIG_FILE_NAME),
        }
    }

    /// Reload from the stored workspace root, or from init settings alone if there is none.
    pub async fn reload(&self) -> Result<CssModulesConfig, LspError> {
        let root = self.workspace_root().await;
        self.load(root.as_deref()).await
    }

    pub async fn load_from_workspace(&self, root: &Path) -> Result<CssModulesConfig, LspError> {
        self.load(Some(root)).await
    }

    async fn load(&self, root: Option<&Path>) -> Result<CssModulesConfig, LspError> {
        let mut config_json = serde_json::to_value(CssModulesConfig::default())
            .map_err(|e| LspError::config(format!("Failed to serialize defaults: {}", e)))?;

        {
            let init_settings = self.init_settings.read().await;
            if let Some(settings) = init_settings.as_ref() {
                merge_json(&mut config_json, settings);
            }
        }

        if let Some(config_path) = root.map(|root| root.join(CONFIG_FILE_NAME)) {
            if config_path.exists() {
                let toml_content = fs::read_to_string(&config_path)
                    .map_err(|e| LspError::config(format!("Failed to read config: {}", e)))?;

                let toml_value: toml::Value = toml::from_str(&toml_content)
                    .map_err(|e| LspError::config(format!("Failed to parse config: {}", e)))?;

                merge_json(&mut config_json, &toml_to_json(&toml_value));
            }
        }

        let config: CssModulesConfig = serde_json::from_value(config_json).map_err(|e| {
            LspError::config(format!("Failed to deserialize merged config: {}", e))
        })?;

        tracing::debug!(
            patterns = ?config.styles.patterns,
            transform = ?config.styles.class_name_transform,
            "Loaded configuration"
        );

        let mut lock = self.config.write().await;
        *lock = config.clone();

        Ok(config)
    }
}

fn toml_to_json(toml: &toml::Value) -> serde_json::Value {
    match toml {
        toml::Value::String(s) => serde_json::Value::String(s.clone()),
        toml::Value::Integer(i) => serde_json::Value::Number((*i).into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        toml::Value::Boolean(b) => serde_json::Value::Bool(*b),
        toml::Value::Array(arr) => serde_json::Value::Array(arr.iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => serde_json::Value::Object(
            table
                .iter()
                .map(|(k, v)| (k.clone(), toml_to_json(v)))
                .collect(),
        ),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
    }
}

/// Objects merge key by key; anything else in `overlay` replaces `base`. Nulls are skipped.
fn merge_json(base: &mut serde_json::Value, overlay: &serde_json::Value) {
    match (base, overlay) {
        (serde_json::Value::Object(base_map), serde_json::Value::Object(overlay_map)) => {
            for (key, overlay_val) in overlay_map {
                if overlay_val.is_null() {
                    continue;
                }
                match base_map.get_mut(key) {
                    Some(base_val) => merge_json(base_val, overlay_val),
                    None => {
                        base_map.insert(key.clone(), overlay_val.clone());
                    }
                }
            }
        }
        (base, overlay) => {
            if !overlay.is_null() {
                *base = overlay.clone();
            }
        }
    }
}

fn true_bool() -> bool {
    true
}
