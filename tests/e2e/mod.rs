//! End-to-end protocol tests for css-modules-lsp
//!
//! These tests spawn the server binary and talk JSON-RPC to it over stdio.
//!
//! Run with: `cargo test --test e2e`
//!
//! Set CSS_MODULES_LSP_BINARY to test a different build:
//! `CSS_MODULES_LSP_BINARY=./target/release/css-modules-lsp cargo test --test e2e`

mod harness;

mod completion_test;
mod diagnostics_test;
mod lifecycle_test;
