//! Spawns the server and speaks JSON-RPC to it.

pub mod client;
pub mod workspace;

pub use client::LspTestClient;
pub use workspace::TempWorkspace;
