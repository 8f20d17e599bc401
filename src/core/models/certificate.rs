use std::fmt;

use crate::core::errors::{DevcaError, Result};

/// Key usage bits devca knows how to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyUsage {
    DigitalSignature,
    KeyCertSign,
}

impl KeyUsage {
    fn keytool_name(&self) -> &'static str {
        match self {
            KeyUsage::DigitalSignature => "digitalSignature",
            KeyUsage::KeyCertSign => "keyCertSign",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneralName {
    Dns(String),
}

/// A certificate extension, rendered in keytool `-ext` syntax by `Display`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extension {
    KeyUsage { critical: bool, usages: Vec<KeyUsage> },
    BasicConstraints { critical: bool, ca: bool },
    SubjectAlternativeName(Vec<GeneralName>),
}

impl Extension {
    /// Extensions every devca certificate carries: it may sign children.
    pub fn ca_profile() -> Vec<Extension> {
        vec![
            Extension::KeyUsage {
                critical: true,
                usages: vec![KeyUsage::KeyCertSign, KeyUsage::DigitalSignature],
            },
            Extension::BasicConstraints {
                critical: true,
                ca: true,
            },
        ]
    }

    pub fn dns_name(name: &str) -> Extension {
        Extension::SubjectAlternativeName(vec![GeneralName::Dns(name.to_string())])
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let critical = |c: &bool| if *c { ":critical" } else { "" };
        match self {
            Extension::KeyUsage { critical: c, usages } => {
                let names: Vec<&str> = usages.iter().map(KeyUsage::keytool_name).collect();
                write!(f, "KeyUsage{}={}", critical(c), names.join(","))
            }
            Extension::BasicConstraints { critical: c, ca } => {
                write!(f, "BasicConstraints{}=ca:{ca}", critical(c))
            }
            Extension::SubjectAlternativeName(names) => {
                let names: Vec<String> = names
                    .iter()
                    .map(|n| match n {
                        GeneralName::Dns(d) => format!("dns:{d}"),
                    })
                    .collect();
                write!(f, "SubjectAlternativeName={}", names.join(","))
            }
        }
    }
}

/// Subject of a generated certificate. Only the CN is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistinguishedName {
    common_name: String,
}

impl DistinguishedName {
    pub fn common_name(cn: &str) -> Result<Self> {
        if cn.trim().is_empty() {
            return Err(DevcaError::InvalidCommonName {
                detail: "common name is empty".into(),
            });
        }
        if cn.chars().any(char::is_control) {
            return Err(DevcaError::InvalidCommonName {
                detail: format!("'{}' contains control characters", cn.escape_debug()),
            });
        }
        Ok(Self {
            common_name: cn.to_string(),
        })
    }

    pub fn cn(&self) -> &str {
        &self.common_name
    }
}

/// RFC 2253 string form, e.g. `CN=example\, inc`.
impl fmt::Display for DistinguishedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CN=")?;
        let last = self.common_name.chars().count().saturating_sub(1);
        for (i, ch) in self.common_name.chars().enumerate() {
            let escape = matches!(ch, ',' | '+' | '"' | '\\' | '<' | '>' | ';' | '=')
                || (i == 0 && (ch == '#' || ch == ' '))
                || (i == last && ch == ' ');
            if escape {
                f.write_str("\\")?;
            }
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}
