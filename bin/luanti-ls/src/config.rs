//! Server configuration.

use luanti_catalog::DEFAULT_API_VERSION;
use serde::Deserialize;
use serde_json::Value;

/// Settings controlling the server, mirrored from the client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerConfig {
	/// Restrict completions to recognized Luanti workspaces.
	pub workspace_only: bool,
	/// Engine version used for documentation links.
	pub api_version: String,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			workspace_only: false,
			api_version: DEFAULT_API_VERSION.to_string(),
		}
	}
}

impl ServerConfig {
	/// Read the configuration from a settings blob.
	///
	/// Accepts either the bare settings object or one nested under a
	/// `minetest-tools` section, the historical configuration namespace.
	/// A malformed blob yields the defaults.
	pub fn from_settings(settings: &Value) -> Self {
		let section = settings.get("minetest-tools").unwrap_or(settings);
		serde_json::from_value(section.clone()).unwrap_or_default()
	}
}
