use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::errors::{DevcaError, Result};

const MAX_NAME_LEN: usize = 128;

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_@+-][A-Za-z0-9_.@+-]*$").expect("keystore name pattern is valid")
    })
}

/// Name of a keystore in the root directory.
///
/// The name is the file stem of the backing file and the default alias of
/// the key pair, so it is restricted to characters that cannot leave the
/// root directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeystoreName(String);

impl KeystoreName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();

        if name.is_empty() {
            return Err(DevcaError::InvalidName {
                name,
                reason: "name is empty".into(),
            });
        }
        if name.len() > MAX_NAME_LEN {
            return Err(DevcaError::InvalidName {
                reason: format!("longer than {MAX_NAME_LEN} characters"),
                name,
            });
        }
        if !name_pattern().is_match(&name) {
            return Err(DevcaError::InvalidName {
                name,
                reason: "contains characters that are not allowed".into(),
            });
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeystoreName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for KeystoreName {
    type Err = DevcaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for KeystoreName {
    type Error = DevcaError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<KeystoreName> for String {
    fn from(name: KeystoreName) -> Self {
        name.0
    }
}

impl AsRef<str> for KeystoreName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// On-disk keystore format. Selects the file extension and `-storetype`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreType {
    #[default]
    Jks,
    Pkcs12,
}

impl StoreType {
    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            StoreType::Jks => "jks",
            StoreType::Pkcs12 => "p12",
        }
    }

    /// Value for keytool's `-storetype`.
    pub fn keytool_name(&self) -> &'static str {
        match self {
            StoreType::Jks => "JKS",
            StoreType::Pkcs12 => "PKCS12",
        }
    }
}

impl FromStr for StoreType {
    type Err = DevcaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "jks" => Ok(StoreType::Jks),
            "pkcs12" | "p12" => Ok(StoreType::Pkcs12),
            other => Err(DevcaError::InvalidConfig {
                detail: format!("unknown store type '{other}' (expected 'jks' or 'pkcs12')"),
            }),
        }
    }
}
