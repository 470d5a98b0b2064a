//! The `workspace/executeCommand` surface.
//!
//! Each command is fire-and-forget from the client's point of view: outcomes
//! are reported through `window/showMessage`, and only malformed arguments
//! or an unknown command become protocol errors. UI prompting stays in the
//! client; a command invoked without enough arguments returns the available
//! choices instead of failing.

use async_lsp::{ErrorCode, ResponseError};
use lsp_types::{ExecuteCommandParams, MessageType};
use luanti_project::Scaffold;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::error;

use crate::server::ServerState;

/// Create a mod skeleton.
pub const CREATE_MOD_PROJECT: &str = "luanti-tools.createModProject";
/// Create a game skeleton.
pub const CREATE_GAME_PROJECT: &str = "luanti-tools.createGameProject";
/// (Re)generate `.luacheckrc` at the workspace root.
pub const GENERATE_LUACHECKRC: &str = "luanti-tools.generateLuacheckrc";
/// Toggle workspace-restricted completions.
pub const TOGGLE_WORKSPACE_ONLY: &str = "luanti-tools.toggleWorkspaceOnly";
/// Launch the bundled engine.
pub const START_GAME: &str = "luanti-tools.startGame";

/// Commands advertised in the server capabilities.
pub const ALL: [&str; 5] = [
	CREATE_MOD_PROJECT,
	CREATE_GAME_PROJECT,
	GENERATE_LUACHECKRC,
	TOGGLE_WORKSPACE_ONLY,
	START_GAME,
];

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ModProjectArgs {
	name: Option<String>,
	subfolder: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct GameProjectArgs {
	name: Option<String>,
	folder: Option<String>,
}

/// Dispatch an executeCommand request.
pub fn execute(
	state: &mut ServerState,
	params: &ExecuteCommandParams,
) -> Result<Option<Value>, ResponseError> {
	match params.command.as_str() {
		CREATE_MOD_PROJECT => create_mod_project(state, &params.arguments),
		CREATE_GAME_PROJECT => create_game_project(state, &params.arguments),
		GENERATE_LUACHECKRC => generate_luacheckrc(state),
		TOGGLE_WORKSPACE_ONLY => toggle_workspace_only(state),
		START_GAME => start_game(state),
		unknown => Err(ResponseError::new(
			ErrorCode::INVALID_PARAMS,
			format!("unknown command: {unknown}"),
		)),
	}
}

/// First positional argument, deserialized; defaults when absent.
fn parse_args<T: Default + DeserializeOwned>(arguments: &[Value]) -> Result<T, ResponseError> {
	match arguments.first() {
		None => Ok(T::default()),
		Some(value) => serde_json::from_value(value.clone()).map_err(|error| {
			ResponseError::new(
				ErrorCode::INVALID_PARAMS,
				format!("malformed command arguments: {error}"),
			)
		}),
	}
}

/// Fallback project name: the workspace directory name.
fn default_name(root: &std::path::Path) -> String {
	root.file_name().map_or_else(|| "untitled".to_string(), |n| n.to_string_lossy().into_owned())
}

fn apply_scaffold(
	state: &mut ServerState,
	scaffold: &Scaffold,
	target: &std::path::Path,
	done: String,
) -> Result<Option<Value>, ResponseError> {
	match scaffold.apply(target) {
		Ok(()) => {
			state.show_message(MessageType::INFO, done);
			Ok(None)
		}
		Err(err) => {
			error!(target_dir = %target.display(), %err, "scaffolding failed");
			state.show_message(MessageType::ERROR, err.to_string());
			Ok(None)
		}
	}
}

fn create_mod_project(
	state: &mut ServerState,
	arguments: &[Value],
) -> Result<Option<Value>, ResponseError> {
	let args: ModProjectArgs = parse_args(arguments)?;
	let Some(root) = state.root() else {
		return Ok(None);
	};

	// A game distribution hosts mods per game; without an explicit target
	// the client gets the candidate locations back to prompt with.
	if args.subfolder.is_none() && luanti_project::is_game_root(&root) {
		let mut locations: Vec<String> = luanti_project::game_dirs(&root)
			.into_iter()
			.map(|game| format!("{game}/mods"))
			.collect();
		locations.push("mods".to_string());
		return Ok(Some(json!({ "locations": locations })));
	}

	let name = args.name.unwrap_or_else(|| default_name(&root));
	let target = match &args.subfolder {
		Some(subfolder) => root.join(subfolder).join(&name),
		None => root,
	};
	apply_scaffold(
		state,
		&Scaffold::mod_project(&name),
		&target,
		format!("Created mod skeleton for '{name}'"),
	)
}

fn create_game_project(
	state: &mut ServerState,
	arguments: &[Value],
) -> Result<Option<Value>, ResponseError> {
	let args: GameProjectArgs = parse_args(arguments)?;
	let Some(root) = state.root() else {
		return Ok(None);
	};

	let name = args.name.unwrap_or_else(|| default_name(&root));
	let target = match args.folder.as_deref() {
		None | Some("") => root,
		Some(folder) => root.join(folder).join(&name),
	};
	apply_scaffold(
		state,
		&Scaffold::game_project(&name),
		&target,
		format!("Created game skeleton for '{name}'"),
	)
}

fn generate_luacheckrc(state: &mut ServerState) -> Result<Option<Value>, ResponseError> {
	let Some(root) = state.root() else {
		return Ok(None);
	};
	apply_scaffold(state, &Scaffold::luacheckrc(), &root, "Generated .luacheckrc".to_string())
}

fn toggle_workspace_only(state: &mut ServerState) -> Result<Option<Value>, ResponseError> {
	let enabled = !state.config.workspace_only;
	state.config.workspace_only = enabled;
	state.show_message(
		MessageType::INFO,
		if enabled {
			"Luanti completions active in recognized workspaces only."
		} else {
			"Luanti completions active for all Lua files."
		},
	);
	// The new value goes back so the client can persist its setting.
	Ok(Some(Value::Bool(enabled)))
}

fn start_game(state: &mut ServerState) -> Result<Option<Value>, ResponseError> {
	let Some(root) = state.root() else {
		return Ok(None);
	};
	match luanti_project::launch_engine(&root) {
		Ok(pid) => {
			state.show_message(MessageType::INFO, "Starting Luanti game");
			Ok(pid.map(Value::from))
		}
		Err(err) => {
			error!(%err, "engine launch failed");
			state.show_message(MessageType::ERROR, err.to_string());
			Ok(None)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_all_commands_are_distinct() {
		let mut names = ALL.to_vec();
		names.sort_unstable();
		names.dedup();
		assert_eq!(names.len(), ALL.len());
	}

	#[test]
	fn test_parse_args_defaults_when_absent() {
		let args: ModProjectArgs = parse_args(&[]).unwrap();
		assert_eq!(args.name, None);
		assert_eq!(args.subfolder, None);
	}

	#[test]
	fn test_parse_args_reads_first_positional() {
		let args: GameProjectArgs =
			parse_args(&[json!({"name": "voxel_garden", "folder": "games"})]).unwrap();
		assert_eq!(args.name.as_deref(), Some("voxel_garden"));
		assert_eq!(args.folder.as_deref(), Some("games"));
	}

	#[test]
	fn test_parse_args_rejects_malformed() {
		let err = parse_args::<ModProjectArgs>(&[json!(42)]).unwrap_err();
		assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
	}

	#[test]
	fn test_default_name_is_the_directory_name() {
		assert_eq!(default_name(std::path::Path::new("/work/torches")), "torches");
	}
}
