use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::errors::{DevcaError, Result};
use crate::core::models::keystore::StoreType;
use crate::core::models::signing_strategy::SigningStrategy;

/// File looked up in the root directory when no `--config` is given.
pub const ROOT_CONFIG_FILE: &str = "devca.toml";

pub const DEFAULT_PASSWORD: &str = "password";
pub const DEFAULT_DAYS: u32 = 90;

/// Top-level devca configuration, read from `devca.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub devca: DevcaSection,
}

/// The `[devca]` section. Every key is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DevcaSection {
    #[serde(default = "default_password")]
    pub password: String,
    #[serde(default = "default_days")]
    pub default_days: u32,
    #[serde(default = "default_key_algorithm")]
    pub key_algorithm: String,
    pub key_size: Option<u32>,
    #[serde(default)]
    pub store_type: StoreType,
    #[serde(default)]
    pub signing: SigningStrategy,
    #[serde(default = "default_keytool")]
    pub keytool: PathBuf,
}

impl Default for DevcaSection {
    fn default() -> Self {
        Self {
            password: default_password(),
            default_days: default_days(),
            key_algorithm: default_key_algorithm(),
            key_size: None,
            store_type: StoreType::default(),
            signing: SigningStrategy::default(),
            keytool: default_keytool(),
        }
    }
}

fn default_password() -> String {
    DEFAULT_PASSWORD.into()
}

fn default_days() -> u32 {
    DEFAULT_DAYS
}

fn default_key_algorithm() -> String {
    "RSA".into()
}

fn default_keytool() -> PathBuf {
    PathBuf::from("keytool")
}

impl AppConfig {
    /// Resolve the configuration for an invocation.
    ///
    /// An explicit path must exist. Otherwise `<root>/devca.toml` is used,
    /// then the per-user `devca/config.toml`, then built-in defaults.
    pub fn load(explicit: Option<&Path>, root: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(DevcaError::InvalidConfig {
                    detail: format!("config file not found: {}", path.display()),
                });
            }
            return Self::load_file(path);
        }

        let candidates = [Some(root.join(ROOT_CONFIG_FILE)), user_config_path()];
        for path in candidates.into_iter().flatten() {
            if path.is_file() {
                return Self::load_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Parse and validate one config file.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| match e {
            DevcaError::InvalidConfig { detail } => DevcaError::InvalidConfig {
                detail: format!("{}: {detail}", path.display()),
            },
            other => other,
        })
    }

    fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| DevcaError::InvalidConfig {
            detail: format!("failed to parse: {e}"),
        })?;

        if config.devca.default_days == 0 {
            return Err(DevcaError::InvalidConfig {
                detail: "default_days must be at least 1".into(),
            });
        }
        if config.devca.key_algorithm.trim().is_empty() {
            return Err(DevcaError::InvalidConfig {
                detail: "key_algorithm must not be empty".into(),
            });
        }

        Ok(config)
    }
}

/// `<config dir>/devca/config.toml`, if the platform has a config dir.
fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("devca").join("config.toml"))
}
