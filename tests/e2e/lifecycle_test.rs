use crate::harness::{LspTestClient, TempWorkspace};
use serde_json::json;

#[test]
fn test_initialize_response_capabilities() {
    let workspace = TempWorkspace::new();
    let client = LspTestClient::spawn(workspace.root.clone(), workspace.root_uri())
        .expect("Failed to spawn LSP");

    let result = client.initialize().expect("Initialize failed");
    let capabilities = result.get("capabilities").expect("Missing capabilities");

    let triggers = capabilities
        .get("completionProvider")
        .and_then(|c| c.get("triggerCharacters"))
        .and_then(|t| t.as_array())
        .expect("Missing completion trigger characters");
    assert!(triggers.contains(&json!(",")));
    assert!(triggers.contains(&json!("{")));

    assert_eq!(capabilities.get("textDocumentSync"), Some(&json!(1)));
    assert_eq!(capabilities.get("positionEncoding"), Some(&json!("utf-16")));
    assert_eq!(
        result.get("serverInfo").and_then(|s| s.get("name")),
        Some(&json!("css-modules-lsp"))
    );

    client.shutdown().expect("Shutdown failed");
}

#[test]
fn test_shutdown_without_documents() {
    let workspace = TempWorkspace::new();
    let client = LspTestClient::spawn(workspace.root.clone(), workspace.root_uri())
        .expect("Failed to spawn LSP");
    client.initialize().expect("Initialize failed");

    assert!(client.request("shutdown", None).is_ok());
    client.notify("exit", None).expect("Exit failed");
}
