//! Luanti project detection and tooling.
//!
//! Everything here is filesystem glue around a project root: recognizing
//! Luanti workspaces and game distributions, generating project skeletons,
//! and launching the bundled engine. Probe failures are treated as "not
//! present" so callers on the completion path fail closed instead of
//! erroring out of a request.

mod error;
mod launch;
mod scaffold;

use std::path::{Path, PathBuf};

pub use error::{ProjectError, Result};
pub use launch::launch_engine;
pub use scaffold::{FileTemplate, LUACHECKRC, Scaffold};

/// Marker files and directories identifying a Luanti project root.
pub const WORKSPACE_MARKERS: [&str; 3] = ["init.lua", "mods", "modpack.txt"];

/// Candidate names of the bundled engine executable under `bin/`.
const ENGINE_EXECUTABLES: [&str; 2] = ["luanti.exe", "luanti"];

/// Whether the root contains at least one workspace marker.
///
/// Any I/O failure while probing counts as "marker absent".
pub fn is_luanti_workspace(root: &Path) -> bool {
	WORKSPACE_MARKERS
		.iter()
		.any(|marker| root.join(marker).try_exists().unwrap_or(false))
}

/// Locate the bundled engine executable under the root, if present.
pub fn engine_executable(root: &Path) -> Option<PathBuf> {
	ENGINE_EXECUTABLES
		.iter()
		.map(|name| root.join("bin").join(name))
		.find(|path| path.try_exists().unwrap_or(false))
}

/// Whether the root is a game distribution with a bundled engine.
pub fn is_game_root(root: &Path) -> bool {
	engine_executable(root).is_some()
}

/// Subdirectories of `<root>/games`, as `games/<name>` relative paths.
///
/// Sorted for stable presentation; empty when the directory is missing or
/// unreadable.
pub fn game_dirs(root: &Path) -> Vec<String> {
	let Ok(entries) = std::fs::read_dir(root.join("games")) else {
		return Vec::new();
	};
	let mut dirs: Vec<String> = entries
		.filter_map(|entry| {
			let entry = entry.ok()?;
			entry.file_type().ok()?.is_dir().then(|| {
				format!("games/{}", entry.file_name().to_string_lossy())
			})
		})
		.collect();
	dirs.sort();
	dirs
}
