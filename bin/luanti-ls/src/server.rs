//! Server state and LSP request/notification handlers.

use std::ops::ControlFlow;
use std::path::PathBuf;
use std::sync::Arc;

use async_lsp::{ClientSocket, LanguageServer, ResponseError};
use futures::future::BoxFuture;
use lsp_types::notification::ShowMessage;
use lsp_types::{
	CompletionOptions, CompletionParams, CompletionResponse, DidChangeConfigurationParams,
	DidChangeTextDocumentParams, DidCloseTextDocumentParams, DidOpenTextDocumentParams,
	ExecuteCommandOptions, ExecuteCommandParams, InitializeParams, InitializeResult,
	InitializedParams, MessageType, ServerCapabilities, ServerInfo, ShowMessageParams,
	TextDocumentSyncCapability, TextDocumentSyncKind,
};
use luanti_catalog::{Catalog, DocLink};
use luanti_completion::{CompletionContext, SnippetProvider};
use tracing::info;

use crate::commands;
use crate::config::ServerConfig;
use crate::documents::DocumentStore;

/// Characters that ask the client to re-query completions while typing.
const TRIGGER_CHARACTERS: [&str; 3] = [":", ".", "["];

/// All state of a running server.
pub struct ServerState {
	client: ClientSocket,
	documents: DocumentStore,
	provider: SnippetProvider,
	pub(crate) config: ServerConfig,
	root: Option<PathBuf>,
}

impl ServerState {
	/// Create the state for a fresh connection, serving the bundled
	/// catalog.
	pub fn new(client: ClientSocket) -> Self {
		Self {
			client,
			documents: DocumentStore::default(),
			provider: SnippetProvider::new(
				Arc::new(Catalog::bundled().clone()),
				DocLink::default(),
			),
			config: ServerConfig::default(),
			root: None,
		}
	}

	/// The workspace root captured at initialization.
	pub(crate) fn root(&self) -> Option<PathBuf> {
		self.root.clone()
	}

	/// Notify the user through the client.
	pub(crate) fn show_message(&mut self, typ: MessageType, message: impl Into<String>) {
		let _ = self.client.notify::<ShowMessage>(ShowMessageParams {
			typ,
			message: message.into(),
		});
	}

	fn apply_config(&mut self, config: ServerConfig) {
		if config.api_version != self.config.api_version {
			self.provider.set_doc_link(DocLink::new(&config.api_version));
		}
		self.config = config;
	}

	/// Workspace guard: with `workspaceOnly` off everything passes; with it
	/// on, the root must carry a Luanti marker. Probe failures and a
	/// missing root fail closed.
	fn workspace_ok(&self) -> bool {
		if !self.config.workspace_only {
			return true;
		}
		self.root.as_deref().is_some_and(luanti_project::is_luanti_workspace)
	}

	fn completions(&self, params: &CompletionParams) -> Option<CompletionResponse> {
		let uri = &params.text_document_position.text_document.uri;
		let position = params.text_document_position.position;
		let doc = self.documents.get(uri)?;
		let line_prefix = doc.line_prefix(position);
		let items = self.provider.complete(&CompletionContext {
			line_prefix: &line_prefix,
			after: doc.char_after(position),
			position,
			workspace_ok: self.workspace_ok(),
		});
		Some(CompletionResponse::Array(items))
	}
}

impl LanguageServer for ServerState {
	type Error = ResponseError;
	type NotifyResult = ControlFlow<async_lsp::Result<()>>;

	// root_uri is deprecated in the protocol but still what most clients
	// send; keep it as the fallback behind workspace_folders.
	#[allow(deprecated)]
	fn initialize(
		&mut self,
		params: InitializeParams,
	) -> BoxFuture<'static, Result<InitializeResult, Self::Error>> {
		self.root = params
			.workspace_folders
			.as_ref()
			.and_then(|folders| folders.first())
			.and_then(|folder| folder.uri.to_file_path().ok())
			.or_else(|| params.root_uri.as_ref().and_then(|uri| uri.to_file_path().ok()));
		if let Some(options) = &params.initialization_options {
			self.apply_config(ServerConfig::from_settings(options));
		}
		info!(root = ?self.root, "initializing");

		let result = InitializeResult {
			capabilities: ServerCapabilities {
				text_document_sync: Some(TextDocumentSyncCapability::Kind(
					TextDocumentSyncKind::FULL,
				)),
				completion_provider: Some(CompletionOptions {
					trigger_characters: Some(
						TRIGGER_CHARACTERS.iter().map(ToString::to_string).collect(),
					),
					..CompletionOptions::default()
				}),
				execute_command_provider: Some(ExecuteCommandOptions {
					commands: commands::ALL.iter().map(ToString::to_string).collect(),
					..ExecuteCommandOptions::default()
				}),
				..ServerCapabilities::default()
			},
			server_info: Some(ServerInfo {
				name: env!("CARGO_PKG_NAME").into(),
				version: Some(env!("CARGO_PKG_VERSION").into()),
			}),
		};
		Box::pin(async move { Ok(result) })
	}

	fn completion(
		&mut self,
		params: CompletionParams,
	) -> BoxFuture<'static, Result<Option<CompletionResponse>, Self::Error>> {
		let response = self.completions(&params);
		Box::pin(async move { Ok(response) })
	}

	fn execute_command(
		&mut self,
		params: ExecuteCommandParams,
	) -> BoxFuture<'static, Result<Option<serde_json::Value>, Self::Error>> {
		let result = commands::execute(self, &params);
		Box::pin(async move { result })
	}

	fn shutdown(&mut self, _: ()) -> BoxFuture<'static, Result<(), Self::Error>> {
		Box::pin(async move { Ok(()) })
	}

	fn initialized(&mut self, _params: InitializedParams) -> Self::NotifyResult {
		ControlFlow::Continue(())
	}

	fn did_open(&mut self, params: DidOpenTextDocumentParams) -> Self::NotifyResult {
		self.documents.open(params.text_document.uri, &params.text_document.text);
		ControlFlow::Continue(())
	}

	fn did_change(&mut self, params: DidChangeTextDocumentParams) -> Self::NotifyResult {
		self.documents.change(&params.text_document.uri, params.content_changes);
		ControlFlow::Continue(())
	}

	fn did_close(&mut self, params: DidCloseTextDocumentParams) -> Self::NotifyResult {
		self.documents.close(&params.text_document.uri);
		ControlFlow::Continue(())
	}

	fn did_change_configuration(
		&mut self,
		params: DidChangeConfigurationParams,
	) -> Self::NotifyResult {
		self.apply_config(ServerConfig::from_settings(&params.settings));
		ControlFlow::Continue(())
	}
}
