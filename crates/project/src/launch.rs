//! Launching the bundled engine executable.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::info;

use crate::engine_executable;
use crate::error::{ProjectError, Result};

/// Spawn the bundled engine executable.
///
/// The child runs detached with its stdio closed; it is not awaited and
/// outlives the server if the server exits first. Returns the OS process
/// id when the platform reports one.
pub fn launch_engine(root: &Path) -> Result<Option<u32>> {
	let exe = engine_executable(root)
		.ok_or_else(|| ProjectError::EngineNotFound(root.to_path_buf()))?;
	info!(path = %exe.display(), "starting engine");
	let child = Command::new(&exe)
		.current_dir(root)
		.stdin(Stdio::null())
		.stdout(Stdio::null())
		.stderr(Stdio::null())
		.spawn()
		.map_err(|error| ProjectError::Launch {
			path: exe.clone(),
			error,
		})?;
	Ok(child.id())
}
