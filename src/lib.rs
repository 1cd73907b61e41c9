pub mod analysis;
pub mod constants;
pub mod error_ext;
pub mod languages;
pub mod server;
pub mod types;

pub use server::config::{CssModulesConfig, FeatureConfig, StyleConfig};
pub use server::LspServer;
