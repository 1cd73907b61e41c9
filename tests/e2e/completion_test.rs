use crate::harness::{LspTestClient, TempWorkspace};
use serde_json::{json, Value};

fn labels(result: &Value) -> Vec<&str> {
    result
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("label")?.as_str())
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn test_completion_offers_unused_classes() {
    let workspace = TempWorkspace::new();
    workspace.create_file("card.module.css", ".title { }\n.subtitle { }\n.footer { }");
    let client = LspTestClient::spawn(workspace.root.clone(), workspace.root_uri())
        .expect("Failed to spawn LSP");
    client.initialize().expect("Initialize failed");

    let uri = workspace.file_uri("Card.tsx");
    let content = "import styles from './card.module.css';\nconst { title,  } = styles;\n";
    client
        .open_document(&uri, "typescriptreact", content)
        .expect("Failed to open document");

    let result = client.completion(&uri, 1, 15).expect("Completion failed");
    assert_eq!(labels(&result), vec!["subtitle", "footer"]);

    let first = &result[0];
    assert_eq!(first.get("kind"), Some(&json!(5)));
    assert_eq!(first.get("insertText"), Some(&json!("subtitle")));
    assert_eq!(first.get("preselect"), Some(&json!(true)));

    client.shutdown().expect("Shutdown failed");
}

#[test]
fn test_no_completion_outside_binding() {
    let workspace = TempWorkspace::new();
    workspace.create_file("card.module.css", ".title { }");
    let client = LspTestClient::spawn(workspace.root.clone(), workspace.root_uri())
        .expect("Failed to spawn LSP");
    client.initialize().expect("Initialize failed");

    let uri = workspace.file_uri("Card.tsx");
    let content = "import styles from './card.module.css';\nconst { } = styles;\n";
    client
        .open_document(&uri, "typescriptreact", content)
        .expect("Failed to open document");

    let result = client.completion(&uri, 0, 0).expect("Completion failed");
    assert!(result.is_null());

    client.shutdown().expect("Shutdown failed");
}
