use crate::harness::{LspTestClient, TempWorkspace};
use assert_json_diff::assert_json_include;
use serde_json::json;
use std::time::Duration;

const CARD: &str = "import styles from './card.module.css';\nconst { title, subtitle } = styles;\n";

fn start(workspace: &TempWorkspace) -> LspTestClient {
    let client = LspTestClient::spawn(workspace.root.clone(), workspace.root_uri())
        .expect("Failed to spawn LSP");
    client.initialize().expect("Initialize failed");
    client
}

#[test]
fn test_missing_identifier_published_on_open() {
    let workspace = TempWorkspace::new();
    workspace.create_file("card.module.css", ".title { color: red; }");
    let client = start(&workspace);

    let uri = workspace.file_uri("Card.tsx");
    client
        .open_document(&uri, "typescriptreact", CARD)
        .expect("Failed to open document");

    let diagnostics = client
        .wait_for_diagnostics(&uri, Duration::from_secs(5))
        .expect("Should receive diagnostics");
    assert_eq!(diagnostics.len(), 1);

    assert_json_include!(
        actual: diagnostics[0].clone(),
        expected: json!({
            "range": {
                "start": { "line": 1, "character": 15 },
                "end": { "line": 1, "character": 23 }
            },
            "severity": 1,
            "code": 9001,
            "source": "css-modules-lsp",
            "message": "Identifier \"subtitle\" is missing in corresponding CSS."
        })
    );

    client.shutdown().expect("Shutdown failed");
}

#[test]
fn test_no_diagnostics_when_every_class_exists() {
    let workspace = TempWorkspace::new();
    workspace.create_file("card.module.css", ".title { }\n.subtitle { }");
    let client = start(&workspace);

    let uri = workspace.file_uri("Card.tsx");
    client
        .open_document(&uri, "typescriptreact", CARD)
        .expect("Failed to open document");

    let diagnostics = client
        .wait_for_diagnostics(&uri, Duration::from_secs(5))
        .expect("Should receive diagnostics");
    assert!(diagnostics.is_empty(), "unexpected: {:?}", diagnostics);

    client.shutdown().expect("Shutdown failed");
}

#[test]
fn test_diagnostics_disabled_via_config() {
    let workspace = TempWorkspace::new();
    workspace.create_file("card.module.css", ".title { }");
    workspace.create_config("[features]\ndiagnostics = false\n");
    let client = start(&workspace);

    let uri = workspace.file_uri("Card.tsx");
    client
        .open_document(&uri, "typescriptreact", CARD)
        .expect("Failed to open document");

    let diagnostics = client
        .wait_for_diagnostics(&uri, Duration::from_secs(5))
        .expect("Should receive diagnostics");
    assert!(diagnostics.is_empty());

    client.shutdown().expect("Shutdown failed");
}

#[test]
fn test_config_file_change_republishes() {
    let workspace = TempWorkspace::new();
    workspace.create_file("card.module.css", ".title { }");
    let client = start(&workspace);

    let uri = workspace.file_uri("Card.tsx");
    client
        .open_document(&uri, "typescriptreact", CARD)
        .expect("Failed to open document");
    let diagnostics = client
        .wait_for_diagnostics(&uri, Duration::from_secs(5))
        .expect("Should receive diagnostics");
    assert_eq!(diagnostics.len(), 1);
    client.clear_notifications();

    workspace.create_config("[features]\ndiagnostics = false\n");
    client
        .file_changed(&workspace.file_uri("cssmodules.toml"))
        .expect("Failed to notify");

    let diagnostics = client
        .wait_for_diagnostics(&uri, Duration::from_secs(5))
        .expect("Should republish after config change");
    assert!(diagnostics.is_empty());

    client.shutdown().expect("Shutdown failed");
}
