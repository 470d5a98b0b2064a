//! Language server for the Luanti Lua scripting API, speaking LSP over
//! stdio.
//!
//! Provides snippet completions for the engine API, project skeleton
//! commands, and a launcher for the bundled engine executable.

mod commands;
mod config;
mod documents;
mod server;

use async_lsp::client_monitor::ClientProcessMonitorLayer;
use async_lsp::concurrency::ConcurrencyLayer;
use async_lsp::panic::CatchUnwindLayer;
use async_lsp::router::Router;
use async_lsp::server::LifecycleLayer;
use async_lsp::tracing::TracingLayer;
use tower::ServiceBuilder;
use tracing::Level;

use crate::server::ServerState;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
	tracing_subscriber::fmt()
		.with_max_level(Level::INFO)
		.with_ansi(false)
		.with_writer(std::io::stderr)
		.init();

	let (server, _) = async_lsp::MainLoop::new_server(|client| {
		ServiceBuilder::new()
			.layer(TracingLayer::default())
			.layer(LifecycleLayer::default())
			.layer(CatchUnwindLayer::default())
			.layer(ConcurrencyLayer::default())
			.layer(ClientProcessMonitorLayer::new(client.clone()))
			.service(Router::from_language_server(ServerState::new(client.clone())))
	});

	let stdin = async_lsp::stdio::PipeStdin::lock_tokio()?;
	let stdout = async_lsp::stdio::PipeStdout::lock_tokio()?;
	server.run_buffered(stdin, stdout).await?;
	Ok(())
}
