//! In-memory stand-in for keytool used by the service tests.
//!
//! Keystore files hold one `alias=certificate` line per imported entry and
//! a `KEYPAIR <alias>` line for a generated key pair.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::core::errors::{DevcaError, Result};
use crate::core::models::keystore::KeystoreName;
use crate::core::models::requests::{
    CreateCertificateRequest, DescribeKeystore, ExportCertificate, GenerateKeyPair,
    ImportCertificate, SignCertificateRequest,
};
use crate::core::traits::toolkit::CertToolkit;

pub fn name(s: &str) -> KeystoreName {
    KeystoreName::new(s).unwrap()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Generate {
        location: PathBuf,
        alias: String,
        subject: String,
        extensions: Vec<String>,
        validity_days: u32,
        start_offset: Option<String>,
    },
    Export {
        location: PathBuf,
        alias: String,
    },
    CertReq {
        location: PathBuf,
        alias: String,
    },
    Sign {
        signer: PathBuf,
        alias: String,
        request: String,
        extensions: Vec<String>,
        validity_days: u32,
    },
    Import {
        location: PathBuf,
        alias: String,
        certificate: String,
    },
    Describe {
        location: PathBuf,
    },
}

impl Call {
    fn operation(&self) -> &'static str {
        match self {
            Call::Generate { .. } => "generate",
            Call::Export { .. } => "export",
            Call::CertReq { .. } => "certreq",
            Call::Sign { .. } => "sign",
            Call::Import { .. } => "import",
            Call::Describe { .. } => "describe",
        }
    }
}

#[derive(Debug, Default)]
pub struct FakeToolkit {
    calls: Mutex<Vec<Call>>,
    fail_on: Option<&'static str>,
}

impl FakeToolkit {
    /// A toolkit on which every call of `operation` fails.
    pub fn failing_on(operation: &'static str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on: Some(operation),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn operations(&self) -> Vec<&'static str> {
        self.calls().iter().map(Call::operation).collect()
    }

    /// Aliases imported into the keystore at `location`, in call order.
    pub fn imports_into(&self, location: &Path) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Import {
                    location: l, alias, ..
                } if l == location => Some(alias),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) -> Result<()> {
        let op = call.operation();
        self.calls.lock().unwrap().push(call);
        if self.fail_on == Some(op) {
            return Err(DevcaError::ToolkitFailed {
                operation: format!("fake {op} failed"),
                stdout: String::new(),
                stderr: format!("injected {op} failure"),
            });
        }
        Ok(())
    }

    fn require_file(location: &Path) -> Result<String> {
        std::fs::read_to_string(location).map_err(|e| DevcaError::ToolkitFailed {
            operation: format!("no keystore at {}", location.display()),
            stdout: String::new(),
            stderr: e.to_string(),
        })
    }
}

impl CertToolkit for FakeToolkit {
    fn probe(&self) -> Result<()> {
        Ok(())
    }

    fn generate_key_pair(&self, req: &GenerateKeyPair<'_>) -> Result<()> {
        req.validate()?;
        self.record(Call::Generate {
            location: req.entry.location.to_path_buf(),
            alias: req.entry.alias.to_string(),
            subject: req.subject.to_string(),
            extensions: req.extensions.iter().map(|e| e.to_string()).collect(),
            validity_days: req.window.validity_days,
            start_offset: req.window.start_offset.map(|o| o.to_string()),
        })?;
        std::fs::write(req.entry.location, format!("KEYPAIR {}\n", req.entry.alias))?;
        Ok(())
    }

    fn export_certificate(&self, req: &ExportCertificate<'_>) -> Result<String> {
        req.validate()?;
        self.record(Call::Export {
            location: req.entry.location.to_path_buf(),
            alias: req.entry.alias.to_string(),
        })?;
        Self::require_file(req.entry.location)?;
        Ok(format!("CERT[{}]", req.entry.alias))
    }

    fn create_certificate_request(&self, req: &CreateCertificateRequest<'_>) -> Result<String> {
        req.validate()?;
        self.record(Call::CertReq {
            location: req.entry.location.to_path_buf(),
            alias: req.entry.alias.to_string(),
        })?;
        Self::require_file(req.entry.location)?;
        Ok(format!("CSR[{}]", req.entry.alias))
    }

    fn sign_certificate_request(&self, req: &SignCertificateRequest<'_>) -> Result<String> {
        req.validate()?;
        self.record(Call::Sign {
            signer: req.signer.location.to_path_buf(),
            alias: req.signer.alias.to_string(),
            request: req.request.to_string(),
            extensions: req.extensions.iter().map(|e| e.to_string()).collect(),
            validity_days: req.window.validity_days,
        })?;
        Self::require_file(req.signer.location)?;
        Ok(format!("SIGNED[{} by {}]", req.request, req.signer.alias))
    }

    fn import_certificate(&self, req: &ImportCertificate<'_>) -> Result<()> {
        req.validate()?;
        self.record(Call::Import {
            location: req.entry.location.to_path_buf(),
            alias: req.entry.alias.to_string(),
            certificate: req.certificate.to_string(),
        })?;

        let existing = std::fs::read_to_string(req.entry.location).unwrap_or_default();
        let prefix = format!("{}=", req.entry.alias);
        let mut lines: Vec<String> = existing
            .lines()
            .filter(|l| !l.starts_with(&prefix))
            .map(str::to_string)
            .collect();
        lines.push(format!("{prefix}{}", req.certificate));
        std::fs::write(req.entry.location, lines.join("\n") + "\n")?;
        Ok(())
    }

    fn describe(&self, req: &DescribeKeystore<'_>) -> Result<String> {
        req.validate()?;
        self.record(Call::Describe {
            location: req.location.to_path_buf(),
        })?;
        Self::require_file(req.location)
    }
}
