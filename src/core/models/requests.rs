use std::path::Path;

use crate::core::errors::{DevcaError, Result};
use crate::core::models::certificate::{DistinguishedName, Extension};
use crate::core::models::validity::ValidityWindow;

/// Where an operation happens: a keystore file and the entry inside it.
#[derive(Debug, Clone, Copy)]
pub struct KeystoreEntry<'a> {
    pub location: &'a Path,
    pub alias: &'a str,
}

impl KeystoreEntry<'_> {
    fn validate(&self) -> Result<()> {
        if self.alias.trim().is_empty() {
            return Err(DevcaError::InvalidName {
                name: self.alias.to_string(),
                reason: "alias is empty".into(),
            });
        }
        if self.location.as_os_str().is_empty() {
            return Err(DevcaError::InvalidConfig {
                detail: "keystore location is empty".into(),
            });
        }
        Ok(())
    }
}

fn validate_pem(label: &str, pem: &str) -> Result<()> {
    if pem.trim().is_empty() {
        return Err(DevcaError::InvalidConfig {
            detail: format!("{label} is empty"),
        });
    }
    Ok(())
}

/// Create (or overwrite) a key pair with a self-signed certificate.
#[derive(Debug, Clone)]
pub struct GenerateKeyPair<'a> {
    pub entry: KeystoreEntry<'a>,
    pub subject: &'a DistinguishedName,
    pub key_algorithm: &'a str,
    pub key_size: Option<u32>,
    pub extensions: &'a [Extension],
    pub window: ValidityWindow,
    pub password: &'a str,
}

impl GenerateKeyPair<'_> {
    pub fn validate(&self) -> Result<()> {
        self.entry.validate()?;
        if self.key_algorithm.trim().is_empty() {
            return Err(DevcaError::InvalidConfig {
                detail: "key algorithm is empty".into(),
            });
        }
        if self.window.validity_days == 0 {
            return Err(DevcaError::InvalidValidity {
                detail: "validity window has zero days".into(),
            });
        }
        Ok(())
    }
}

/// Export the certificate stored under an alias, PEM encoded.
#[derive(Debug, Clone)]
pub struct ExportCertificate<'a> {
    pub entry: KeystoreEntry<'a>,
    pub password: &'a str,
}

impl ExportCertificate<'_> {
    pub fn validate(&self) -> Result<()> {
        self.entry.validate()
    }
}

/// Create a PKCS#10 request for the key pair under an alias.
#[derive(Debug, Clone)]
pub struct CreateCertificateRequest<'a> {
    pub entry: KeystoreEntry<'a>,
    pub password: &'a str,
}

impl CreateCertificateRequest<'_> {
    pub fn validate(&self) -> Result<()> {
        self.entry.validate()
    }
}

/// Answer a certificate request with the signer's key pair.
#[derive(Debug, Clone)]
pub struct SignCertificateRequest<'a> {
    pub request: &'a str,
    pub signer: KeystoreEntry<'a>,
    pub extensions: &'a [Extension],
    pub window: ValidityWindow,
    pub password: &'a str,
}

impl SignCertificateRequest<'_> {
    pub fn validate(&self) -> Result<()> {
        self.signer.validate()?;
        validate_pem("certificate request", self.request)?;
        if self.window.validity_days == 0 {
            return Err(DevcaError::InvalidValidity {
                detail: "validity window has zero days".into(),
            });
        }
        Ok(())
    }
}

/// Add or replace a certificate entry without asking for confirmation.
#[derive(Debug, Clone)]
pub struct ImportCertificate<'a> {
    pub entry: KeystoreEntry<'a>,
    pub certificate: &'a str,
    pub password: &'a str,
}

impl ImportCertificate<'_> {
    pub fn validate(&self) -> Result<()> {
        self.entry.validate()?;
        validate_pem("certificate", self.certificate)
    }
}

/// Verbose listing of every entry in a keystore.
#[derive(Debug, Clone)]
pub struct DescribeKeystore<'a> {
    pub location: &'a Path,
    pub password: &'a str,
}

impl DescribeKeystore<'_> {
    pub fn validate(&self) -> Result<()> {
        if self.location.as_os_str().is_empty() {
            return Err(DevcaError::InvalidConfig {
                detail: "keystore location is empty".into(),
            });
        }
        Ok(())
    }
}
