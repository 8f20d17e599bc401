use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::errors::{DevcaError, Result};

/// How the signing protocol treats the signer's certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SigningStrategy {
    /// Import the signer's certificate into the signee under the signer's
    /// alias before requesting the signature. The signee ends up trusting
    /// its parent as a side effect.
    #[default]
    ImplicitTrust,
    /// Only request and import the signature. The signee must already
    /// trust the signer (`devca trust`), or keytool cannot build the chain.
    ExplicitTrust,
}

impl SigningStrategy {
    pub fn imports_signer_certificate(&self) -> bool {
        matches!(self, SigningStrategy::ImplicitTrust)
    }
}

impl fmt::Display for SigningStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SigningStrategy::ImplicitTrust => f.write_str("implicit-trust"),
            SigningStrategy::ExplicitTrust => f.write_str("explicit-trust"),
        }
    }
}

impl FromStr for SigningStrategy {
    type Err = DevcaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "implicit-trust" => Ok(SigningStrategy::ImplicitTrust),
            "explicit-trust" => Ok(SigningStrategy::ExplicitTrust),
            other => Err(DevcaError::InvalidConfig {
                detail: format!(
                    "unknown signing strategy '{other}' (expected 'implicit-trust' or 'explicit-trust')"
                ),
            }),
        }
    }
}
