//! Dashboard settings persisted as TOML under the app directory.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs;

/// File name used for the settings file.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Backend used when nothing is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000/";
/// Default number of prediction history rows requested per machine.
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;
const MAX_HISTORY_LIMIT: u32 = 100;

/// Errors that may occur while loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to create the config directory.
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to read the config file.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to write the config file.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The config file is not valid TOML for [`AppSettings`].
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Settings could not be serialized.
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
    /// No usable config directory found.
    #[error("No suitable config directory found")]
    NoConfigDir,
}

/// Settings that control where the dashboard talks to and how it renders.
///
/// Config keys (TOML): `backend_url`, `models_dir`, `history_limit`,
/// `[scene] auto_rotate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// Directory holding `motor.glb` and `blade.glb`. Relative paths resolve
    /// against the working directory.
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,
    #[serde(default = "default_history_limit")]
    pub history_limit: u32,
    #[serde(default)]
    pub scene: SceneSettings,
}

/// Scene preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSettings {
    /// Apply the per-frame rotation to the resident model.
    #[serde(default = "default_true")]
    pub auto_rotate: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            models_dir: default_models_dir(),
            history_limit: default_history_limit(),
            scene: SceneSettings::default(),
        }
    }
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self { auto_rotate: true }
    }
}

impl AppSettings {
    /// Clamp out-of-range values loaded from disk.
    pub fn normalized(mut self) -> Self {
        self.history_limit = self.history_limit.clamp(1, MAX_HISTORY_LIMIT);
        let trimmed = self.backend_url.trim();
        self.backend_url = if trimmed.is_empty() {
            default_backend_url()
        } else {
            trimmed.to_string()
        };
        self
    }
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_models_dir() -> PathBuf {
    PathBuf::from("models")
}

fn default_history_limit() -> u32 {
    DEFAULT_HISTORY_LIMIT
}

fn default_true() -> bool {
    true
}

/// Resolve the settings file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load settings from disk, writing defaults when the file is missing.
///
/// A failure to write the default file is logged and the defaults are still
/// returned.
pub fn load_or_default() -> Result<AppSettings, ConfigError> {
    let path = config_path()?;
    if path.exists() {
        return load_from_path(&path);
    }
    let settings = AppSettings::default();
    match save_to_path(&settings, &path) {
        Ok(()) => tracing::info!("Wrote default settings to {}", path.display()),
        Err(err) => tracing::warn!("Could not write default settings: {err}"),
    }
    Ok(settings)
}

/// Load settings from a specific path; missing files yield defaults.
pub fn load_from_path(path: &Path) -> Result<AppSettings, ConfigError> {
    if !path.exists() {
        return Ok(AppSettings::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<AppSettings>(&text)
        .map(AppSettings::normalized)
        .map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
}

/// Save settings to a specific path, creating parent directories as needed.
pub fn save_to_path(settings: &AppSettings, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let data = toml::to_string_pretty(settings).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    atomic_write(path, data.as_bytes())
}

/// Write via a uniquely named sibling temp file, then rename over the target.
fn atomic_write(path: &Path, data: &[u8]) -> Result<(), ConfigError> {
    let write_err = |path: &Path, source: std::io::Error| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = path
        .parent()
        .ok_or_else(|| write_err(path, other_io("config path has no parent directory")))?;
    let file_name = path
        .file_name()
        .ok_or_else(|| write_err(path, other_io("config path has no file name")))?;

    let mut last_err = None;
    for _ in 0..5 {
        let suffix = temp_suffix().map_err(|source| write_err(path, source))?;
        let tmp_path = dir.join(format!("{}.tmp-{suffix}", file_name.to_string_lossy()));
        let mut file = match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
        {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                last_err = Some(err);
                continue;
            }
            Err(err) => return Err(write_err(&tmp_path, err)),
        };
        let written = file.write_all(data).and_then(|()| file.sync_all());
        drop(file);
        if let Err(err) = written.and_then(|()| replace_file(&tmp_path, path)) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(write_err(path, err));
        }
        return Ok(());
    }
    Err(write_err(
        path,
        std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!(
                "failed to create temporary file: {}",
                last_err
                    .map(|err| err.to_string())
                    .unwrap_or_else(|| "unknown error".into())
            ),
        ),
    ))
}

fn temp_suffix() -> Result<String, std::io::Error> {
    use rand::TryRngCore;
    let mut bytes = [0u8; 6];
    rand::rngs::OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|err| other_io(&format!("failed to generate temporary file suffix: {err}")))?;
    Ok(bytes.iter().map(|b| format!("{b:02x}")).collect())
}

fn replace_file(temp_path: &Path, path: &Path) -> Result<(), std::io::Error> {
    match std::fs::rename(temp_path, path) {
        Ok(()) => Ok(()),
        #[cfg(target_os = "windows")]
        Err(err)
            if err.kind() == std::io::ErrorKind::AlreadyExists
                || err.kind() == std::io::ErrorKind::PermissionDenied =>
        {
            if let Err(inner) = std::fs::remove_file(path) {
                if inner.kind() != std::io::ErrorKind::NotFound {
                    return Err(inner);
                }
            }
            std::fs::rename(temp_path, path)
        }
        Err(err) => Err(err),
    }
}

fn other_io(message: &str) -> std::io::Error {
    std::io::Error::other(message.to_string())
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => ConfigError::CreateDir { path, source },
    }
}
