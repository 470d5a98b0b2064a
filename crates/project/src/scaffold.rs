//! Project skeleton generation.
//!
//! A [`Scaffold`] is a set of file templates and directories applied under a
//! target root. Application never overwrites: existing files are left
//! untouched, existing directories are reused. Re-applying a scaffold is a
//! no-op on anything already present, so a partially failed run is repaired
//! by running it again.

use std::path::{Path, PathBuf};

use heck::ToTitleCase;
use tracing::debug;

use crate::error::{ProjectError, Result};

/// Contents of the generated `.luacheckrc`: the engine's global surface as
/// read-only globals for luacheck.
pub const LUACHECKRC: &str = r#"read_globals = {
    "DIR_DELIM", "INIT",

    "minetest", "core",
    "dump", "dump2",

    "Raycast",
    "Settings",
    "PseudoRandom",
    "PerlinNoise",
    "VoxelManip",
    "SecureRandom",
    "VoxelArea",
    "PerlinNoiseMap",
    "PcgRandom",
    "ItemStack",
    "AreaStore",

    "vector",

    table = {
        fields = {
            "copy",
            "indexof",
            "insert_all",
            "key_value_swap",
            "shuffle",
        }
    },

    string = {
        fields = {
            "split",
            "trim",
        }
    },

    math = {
        fields = {
            "hypot",
            "sign",
            "factorial"
        }
    },
}"#;

/// One file of a skeleton: a path relative to the target root plus its
/// initial content.
#[derive(Debug, Clone)]
pub struct FileTemplate {
	/// Relative path of the file.
	pub path: PathBuf,
	/// Initial file content.
	pub content: String,
}

impl FileTemplate {
	fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			content: content.into(),
		}
	}
}

/// A project skeleton: file templates plus directories to create.
#[derive(Debug, Clone, Default)]
pub struct Scaffold {
	files: Vec<FileTemplate>,
	dirs: Vec<PathBuf>,
}

impl Scaffold {
	/// Skeleton for a new mod.
	pub fn mod_project(name: &str) -> Self {
		Self {
			files: vec![
				FileTemplate::new("init.lua", ""),
				FileTemplate::new(
					"mod.conf",
					format!("name = {name}\ndescription = \ndepends = \noptional_depends = "),
				),
				FileTemplate::new("README.md", ""),
				FileTemplate::new("LICENSE.txt", ""),
				FileTemplate::new(".luacheckrc", LUACHECKRC),
			],
			dirs: vec!["textures".into(), "models".into(), "sounds".into()],
		}
	}

	/// Skeleton for a new game.
	///
	/// The display name in `game.conf` is the given name with `_`/`-`
	/// turned into spaces and word initials uppercased.
	pub fn game_project(name: &str) -> Self {
		Self {
			files: vec![
				FileTemplate::new(
					"game.conf",
					format!("name = {}\nauthor = \ndescription = ", name.to_title_case()),
				),
				FileTemplate::new("README.md", ""),
				FileTemplate::new("LICENSE.txt", ""),
				FileTemplate::new(".luacheckrc", LUACHECKRC),
			],
			dirs: vec!["menu".into(), "mods".into()],
		}
	}

	/// Just the `.luacheckrc` file.
	pub fn luacheckrc() -> Self {
		Self {
			files: vec![FileTemplate::new(".luacheckrc", LUACHECKRC)],
			dirs: Vec::new(),
		}
	}

	/// The file templates of this skeleton.
	pub fn files(&self) -> &[FileTemplate] {
		&self.files
	}

	/// The directories of this skeleton.
	pub fn dirs(&self) -> &[PathBuf] {
		&self.dirs
	}

	/// Apply the skeleton under `root`.
	///
	/// Directories are created with intermediate segments; files are
	/// written only if absent. Already-written files stay on error, the
	/// recovery path is to apply again.
	pub fn apply(&self, root: &Path) -> Result<()> {
		for dir in &self.dirs {
			let full = root.join(dir);
			std::fs::create_dir_all(&full).map_err(|error| ProjectError::Io {
				path: full.clone(),
				error,
			})?;
		}
		for file in &self.files {
			let full = root.join(&file.path);
			if full.try_exists().unwrap_or(false) {
				debug!(path = %full.display(), "skipping existing file");
				continue;
			}
			if let Some(parent) = full.parent() {
				std::fs::create_dir_all(parent).map_err(|error| ProjectError::Io {
					path: parent.to_path_buf(),
					error,
				})?;
			}
			std::fs::write(&full, &file.content).map_err(|error| ProjectError::Io {
				path: full.clone(),
				error,
			})?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_mod_skeleton_layout() {
		let dir = tempfile::tempdir().unwrap();
		Scaffold::mod_project("torches").apply(dir.path()).unwrap();

		for file in ["init.lua", "mod.conf", "README.md", "LICENSE.txt", ".luacheckrc"] {
			assert!(dir.path().join(file).is_file(), "missing {file}");
		}
		for sub in ["textures", "models", "sounds"] {
			assert!(dir.path().join(sub).is_dir(), "missing {sub}/");
		}
		let conf = std::fs::read_to_string(dir.path().join("mod.conf")).unwrap();
		assert!(conf.starts_with("name = torches\n"));
	}

	#[test]
	fn test_game_skeleton_title_cases_the_name() {
		let dir = tempfile::tempdir().unwrap();
		Scaffold::game_project("voxel_garden").apply(dir.path()).unwrap();

		let conf = std::fs::read_to_string(dir.path().join("game.conf")).unwrap();
		assert!(conf.starts_with("name = Voxel Garden\n"), "got: {conf}");
		assert!(dir.path().join("menu").is_dir());
		assert!(dir.path().join("mods").is_dir());
	}

	#[test]
	fn test_apply_never_overwrites() {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(dir.path().join("init.lua"), "-- my code").unwrap();

		Scaffold::mod_project("torches").apply(dir.path()).unwrap();
		let kept = std::fs::read_to_string(dir.path().join("init.lua")).unwrap();
		assert_eq!(kept, "-- my code");
	}

	#[test]
	fn test_apply_is_idempotent() {
		let dir = tempfile::tempdir().unwrap();
		let scaffold = Scaffold::mod_project("torches");
		scaffold.apply(dir.path()).unwrap();
		scaffold.apply(dir.path()).unwrap();
		let conf = std::fs::read_to_string(dir.path().join("mod.conf")).unwrap();
		assert!(conf.starts_with("name = torches\n"));
	}

	#[test]
	fn test_apply_creates_nested_target() {
		let dir = tempfile::tempdir().unwrap();
		let target = dir.path().join("games/voxelgarden/mods/torches");
		Scaffold::mod_project("torches").apply(&target).unwrap();
		assert!(target.join("mod.conf").is_file());
	}

	#[test]
	fn test_luacheckrc_scaffold_writes_globals() {
		let dir = tempfile::tempdir().unwrap();
		Scaffold::luacheckrc().apply(dir.path()).unwrap();
		let rc = std::fs::read_to_string(dir.path().join(".luacheckrc")).unwrap();
		assert!(rc.starts_with("read_globals = {"));
		assert!(rc.contains("\"minetest\", \"core\""));
	}
}
