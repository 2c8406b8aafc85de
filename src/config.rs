//! Tool configuration for the `narrec` binary.
//!
//! Settings come from four layers, highest priority first:
//!
//! 1. command-line flags
//! 2. environment (`NARREC_SCHEMA_DIR`, `NARREC_LOG`, optionally from `.env`)
//! 3. the `narrec.yaml` config file
//! 4. built-in defaults
//!
//! ```yaml
//! schema_dirs:
//!   - schemas/extra
//! builtin: true
//! log_filter: narrec=debug
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "narrec.yaml";

/// Extra schema directories, separated like `PATH`.
pub const ENV_SCHEMA_DIR: &str = "NARREC_SCHEMA_DIR";

/// Log filter directive.
pub const ENV_LOG: &str = "NARREC_LOG";

pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, error: std::io::Error },
    Parse { path: PathBuf, error: serde_yaml::Error },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, error } => {
                write!(f, "Failed to read {}: {}", path.display(), error)
            }
            ConfigError::Parse { path, error } => {
                write!(f, "Failed to parse {}: {}", path.display(), error)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Contents of `narrec.yaml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub schema_dirs: Vec<PathBuf>,
    #[serde(default)]
    pub builtin: Option<bool>,
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl ConfigFile {
    /// Load a config file. Relative schema directories are resolved against
    /// the file's own directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        let mut config: ConfigFile = if contents.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(&contents).map_err(|error| ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            })?
        };

        if let Some(base) = path.parent() {
            for dir in &mut config.schema_dirs {
                if dir.is_relative() {
                    *dir = base.join(&*dir);
                }
            }
        }
        Ok(config)
    }

    /// Load the explicit config file, or `narrec.yaml` from the working
    /// directory if it exists.
    pub fn discover(explicit: Option<&Path>) -> Result<Option<Self>, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path).map(Some),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default).map(Some)
                } else {
                    Ok(None)
                }
            }
        }
    }
}

/// Values read from the environment.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub schema_dirs: Option<Vec<PathBuf>>,
    pub log_filter: Option<String>,
}

impl EnvOverrides {
    /// Read `NARREC_*` variables from the process environment, loading `.env`
    /// first if present.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through an arbitrary lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            schema_dirs: non_empty(ENV_SCHEMA_DIR)
                .map(|value| std::env::split_paths(&value).collect()),
            log_filter: non_empty(ENV_LOG),
        }
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub schema_dirs: Vec<PathBuf>,
    pub no_builtin: bool,
}

/// Effective settings after merging every layer.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrecConfig {
    /// Directories of schema documents loaded on top of the built-in catalog
    pub schema_dirs: Vec<PathBuf>,
    /// Whether the built-in NarrativeService catalog is loaded
    pub builtin: bool,
    /// `tracing-subscriber` filter directive
    pub log_filter: String,
}

impl Default for NarrecConfig {
    fn default() -> Self {
        Self {
            schema_dirs: Vec::new(),
            builtin: true,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl NarrecConfig {
    /// Merge the layers with precedence CLI > ENV > file > default.
    pub fn resolve(cli: CliOverrides, env: EnvOverrides, file: Option<ConfigFile>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = NarrecConfig::default();

        let schema_dirs = if !cli.schema_dirs.is_empty() {
            cli.schema_dirs
        } else if let Some(dirs) = env.schema_dirs {
            dirs
        } else if !file.schema_dirs.is_empty() {
            file.schema_dirs
        } else {
            defaults.schema_dirs
        };

        let builtin = if cli.no_builtin {
            false
        } else {
            file.builtin.unwrap_or(defaults.builtin)
        };

        let log_filter = env
            .log_filter
            .or(file.log_filter)
            .unwrap_or(defaults.log_filter);

        Self {
            schema_dirs,
            builtin,
            log_filter,
        }
    }

    /// Resolve from the real environment and config file.
    pub fn load(cli: CliOverrides, config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let env = EnvOverrides::from_env();
        let file = ConfigFile::discover(config_path)?;
        Ok(Self::resolve(cli, env, file))
    }
}
