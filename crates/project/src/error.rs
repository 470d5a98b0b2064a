//! Error types for project tooling.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during project operations.
#[derive(Debug, Error)]
pub enum ProjectError {
	/// Error creating a directory or writing a file.
	#[error("I/O error at {path}: {error}")]
	Io {
		/// Path the operation failed on.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// No bundled engine executable was found.
	#[error("engine executable not found under {0}")]
	EngineNotFound(PathBuf),

	/// The engine executable could not be started.
	#[error("failed to start {path}: {error}")]
	Launch {
		/// Path to the executable.
		path: PathBuf,
		/// The underlying spawn error.
		error: std::io::Error,
	},
}

/// Result type for project operations.
pub type Result<T> = std::result::Result<T, ProjectError>;
