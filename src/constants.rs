//! Constants used throughout the codebase.

/// Name reported as the `source` of every diagnostic this server publishes.
pub const DIAGNOSTIC_SOURCE: &str = "css-modules-lsp";

/// Diagnostic code reserved for requested class names missing from a stylesheet.
pub const MISSING_IDENTIFIER_CODE: i32 = 9001;

/// Workspace-level configuration file.
pub const CONFIG_FILE_NAME: &str = "cssmodules.toml";

/// File name patterns treated as CSS modules when no configuration says otherwise.
pub const DEFAULT_STYLE_PATTERNS: &[&str] = &["*.module.css", "*.module.scss", "*.module.less"];

/// Extensions watched for stylesheet changes.
pub const STYLE_EXTENSIONS: &[&str] = &["css", "scss", "less"];
