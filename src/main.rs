use css_modules_lsp::server::state::ServerState;
use css_modules_lsp::server::LspServer;
use tower_lsp::{LspService, Server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries JSON-RPC.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let state = ServerState::with_defaults();

    // Used until the client reports a workspace folder.
    let root = std::env::current_dir()?;
    state.config.set_workspace_root(root).await;

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(|client| LspServer::new_with_state(client, state));
    Server::new(stdin, stdout, socket).serve(service).await;

    Ok(())
}
