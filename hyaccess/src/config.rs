use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    error::{AccessError, AccessResult},
    magic::{DEFAULT_LOAD_INTRINSIC, DEFAULT_STORE_INTRINSIC, ENV_EMITTER_CONFIG_PATH},
};

/// Presentation settings of [`crate::emit::TraceEmitter`].
///
/// The configuration only changes how resolved accesses are printed; hint
/// codes themselves are fixed at compile time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Intrinsic name printed for loads.
    pub load_intrinsic: String,
    /// Intrinsic name printed for stores.
    pub store_intrinsic: String,
    /// Append a note when an access carries the default hint.
    pub annotate_defaults: bool,
    /// Append the decoded hint fields to every line.
    pub decode_fields: bool,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            load_intrinsic: DEFAULT_LOAD_INTRINSIC.to_string(),
            store_intrinsic: DEFAULT_STORE_INTRINSIC.to_string(),
            annotate_defaults: true,
            decode_fields: false,
        }
    }
}

const CONFIG_DIR_NAME: &str = "hyaccess";
const CONFIG_FILE_NAME: &str = "emitter.toml";

/// Per-user configuration directory: `%APPDATA%` on Windows,
/// `$XDG_CONFIG_HOME` or `$HOME/.config` elsewhere.
fn user_config_dir() -> Option<PathBuf> {
    let from_env = |name: &str| std::env::var_os(name).filter(|v| !v.is_empty()).map(PathBuf::from);

    if cfg!(target_os = "windows") {
        from_env("APPDATA")
    } else {
        from_env("XDG_CONFIG_HOME").or_else(|| from_env("HOME").map(|home| home.join(".config")))
    }
}

impl EmitterConfig {
    /// Where the emitter configuration is looked up.
    ///
    /// [`ENV_EMITTER_CONFIG_PATH`] wins when set; otherwise the file is
    /// `hyaccess/emitter.toml` under the user configuration directory, or
    /// under the working directory when none is known.
    pub fn default_path() -> PathBuf {
        match std::env::var_os(ENV_EMITTER_CONFIG_PATH) {
            Some(explicit) => PathBuf::from(explicit),
            None => user_config_dir()
                .unwrap_or_default()
                .join(CONFIG_DIR_NAME)
                .join(CONFIG_FILE_NAME),
        }
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(toml_str: &str) -> AccessResult<Self> {
        toml::from_str(toml_str).map_err(|e| AccessError::ConfigParseError {
            source: e,
            file: toml_str.to_string(),
        })
    }

    /// Load the configuration from a TOML file.
    pub fn load_from_toml(path: &Path) -> AccessResult<Self> {
        let toml_str = std::fs::read_to_string(path)?;

        toml::from_str(&toml_str).map_err(|e| AccessError::ConfigParseError {
            source: e,
            file: path.display().to_string(),
        })
    }

    /// Load the configuration from [`Self::default_path`], or fall back to
    /// the defaults when no file exists there.
    pub fn load_or_default() -> AccessResult<Self> {
        let path = Self::default_path();
        if !path.exists() {
            log::debug!(
                "no emitter configuration at `{}`, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_toml(&path)
    }

    /// Save the configuration to a TOML file.
    pub fn save_to_toml(&self, path: &Path) -> AccessResult<()> {
        let toml_str = toml::to_string(self).map_err(|e| AccessError::ConfigSerializeError {
            source: e,
            path: path.display().to_string(),
        })?;

        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, toml_str)?;
        log::debug!("emitter configuration written to `{}`", path.display());
        Ok(())
    }
}
