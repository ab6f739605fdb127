use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
	pub host: String,
	pub port: u16,
}

impl Default for ServerSettings {
	fn default() -> Self {
		Self {
			host: "127.0.0.1".to_string(),
			port: 8080,
		}
	}
}

/// Contents of `settings.toml`. Missing tables fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	pub server: ServerSettings,
}

impl Settings {
	pub fn load(path: &Path) -> crate::error::Result<Self> {
		if !path.exists() {
			tracing::debug!("No settings file at {:?}, using defaults", path);
			return Ok(Self::default());
		}

		let content = fs::read_to_string(path)?;
		let settings: Settings = toml::from_str(&content)?;
		Ok(settings)
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
	pub data_dir: PathBuf,
	pub settings_path: PathBuf,
	pub settings: Settings,
}

impl Config {
	pub fn new() -> crate::error::Result<Self> {
		let project_dirs = ProjectDirs::from("", "", "liteguard")
			.ok_or_else(|| crate::error::Error::ConfigError("Could not determine config directory".to_string()))?;

		Self::with_data_dir(project_dirs.data_dir())
	}

	pub fn from_env() -> crate::error::Result<Self> {
		if let Ok(data_dir) = std::env::var("LITEGUARD_DATA_DIR") {
			Self::with_data_dir(data_dir)
		} else {
			Self::new()
		}
	}

	pub fn with_data_dir(data_dir: impl AsRef<Path>) -> crate::error::Result<Self> {
		let data_dir = data_dir.as_ref().to_path_buf();
		let settings_path = data_dir.join("settings.toml");

		fs::create_dir_all(&data_dir)?;
		let settings = Settings::load(&settings_path)?;

		Ok(Self {
			data_dir,
			settings_path,
			settings,
		})
	}
}
