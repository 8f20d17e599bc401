use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use colored::Colorize;

use crate::core::errors::{DevcaError, Result};
use crate::core::models::certificate::Extension;
use crate::core::models::keystore::StoreType;
use crate::core::models::requests::{
    CreateCertificateRequest, DescribeKeystore, ExportCertificate, GenerateKeyPair,
    ImportCertificate, KeystoreEntry, SignCertificateRequest,
};
use crate::core::models::validity::ValidityWindow;
use crate::core::traits::toolkit::CertToolkit;

const PASSWORD_FLAGS: [&str; 2] = ["-storepass", "-keypass"];

/// Toolkit backend that shells out to the JDK `keytool` binary.
#[derive(Debug, Clone)]
pub struct KeytoolBackend {
    /// Path to the keytool binary (defaults to "keytool").
    keytool_path: PathBuf,
    store_type: StoreType,
    /// Echo every invocation to stderr.
    verbose: bool,
}

impl KeytoolBackend {
    pub fn new(keytool_path: PathBuf, store_type: StoreType, verbose: bool) -> Self {
        Self {
            keytool_path,
            store_type,
            verbose,
        }
    }

    /// Run keytool and return stdout on success.
    ///
    /// `operation` is the message reported if keytool exits nonzero.
    fn run_keytool(&self, args: &[String], stdin_data: Option<&str>, operation: &str) -> Result<String> {
        if self.verbose {
            eprintln!(
                "  {} {} {}",
                "Executing".dimmed(),
                self.keytool_path.display(),
                masked(args).join(" ")
            );
        }

        let mut cmd = Command::new(&self.keytool_path);
        cmd.args(args)
            .stdin(if stdin_data.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| DevcaError::ToolkitUnavailable {
            program: self.keytool_path.clone(),
            reason: e.to_string(),
        })?;

        if let Some(data) = stdin_data
            && let Some(mut stdin) = child.stdin.take()
        {
            // keytool may exit before reading; its own diagnostics matter more.
            if let Err(e) = stdin.write_all(data.as_bytes())
                && e.kind() != std::io::ErrorKind::BrokenPipe
            {
                drop(stdin);
                reap(&mut child);
                return Err(e.into());
            }
        }

        let output = child.wait_with_output()?;

        if !output.status.success() {
            return Err(DevcaError::ToolkitFailed {
                operation: operation.to_string(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn store_args(&self, location: &Path) -> Vec<String> {
        vec![
            "-keystore".into(),
            location.display().to_string(),
            "-storetype".into(),
            self.store_type.keytool_name().into(),
        ]
    }

    fn entry_args(&self, entry: &KeystoreEntry<'_>) -> Vec<String> {
        let mut args = vec!["-alias".to_string(), entry.alias.to_string()];
        args.extend(self.store_args(entry.location));
        args
    }

    fn genkeypair_args(&self, req: &GenerateKeyPair<'_>) -> Vec<String> {
        let mut args = vec!["-genkeypair".to_string()];
        args.extend(self.entry_args(&req.entry));
        args.extend([
            "-dname".into(),
            req.subject.to_string(),
            "-keyalg".into(),
            req.key_algorithm.to_string(),
        ]);
        if let Some(size) = req.key_size {
            args.extend(["-keysize".into(), size.to_string()]);
        }
        args.extend(extension_args(req.extensions));
        args.extend(password_args(req.password));
        args.extend(window_args(&req.window));
        args
    }

    fn exportcert_args(&self, req: &ExportCertificate<'_>) -> Vec<String> {
        let mut args = vec!["-exportcert".to_string()];
        args.extend(self.entry_args(&req.entry));
        args.push("-rfc".into());
        args.extend(password_args(req.password));
        args
    }

    fn certreq_args(&self, req: &CreateCertificateRequest<'_>) -> Vec<String> {
        let mut args = vec!["-certreq".to_string()];
        args.extend(self.entry_args(&req.entry));
        args.extend(password_args(req.password));
        args
    }

    fn gencert_args(&self, req: &SignCertificateRequest<'_>) -> Vec<String> {
        let mut args = vec!["-gencert".to_string()];
        args.extend(self.entry_args(&req.signer));
        args.extend(extension_args(req.extensions));
        args.push("-rfc".into());
        args.extend(password_args(req.password));
        args.extend(window_args(&req.window));
        args
    }

    fn importcert_args(&self, req: &ImportCertificate<'_>) -> Vec<String> {
        let mut args = vec!["-importcert".to_string(), "-noprompt".to_string()];
        args.extend(self.entry_args(&req.entry));
        args.extend(password_args(req.password));
        args
    }

    fn list_args(&self, req: &DescribeKeystore<'_>) -> Vec<String> {
        let mut args = vec!["-list".to_string(), "-v".to_string()];
        args.extend(self.store_args(req.location));
        args.extend(password_args(req.password));
        args
    }
}

impl Default for KeytoolBackend {
    fn default() -> Self {
        Self::new(PathBuf::from("keytool"), StoreType::default(), false)
    }
}

fn extension_args(extensions: &[Extension]) -> Vec<String> {
    extensions
        .iter()
        .flat_map(|e| ["-ext".to_string(), e.to_string()])
        .collect()
}

fn password_args(password: &str) -> Vec<String> {
    PASSWORD_FLAGS
        .iter()
        .flat_map(|flag| [flag.to_string(), password.to_string()])
        .collect()
}

fn window_args(window: &ValidityWindow) -> Vec<String> {
    let mut args = Vec::new();
    if let Some(offset) = window.start_offset {
        args.extend(["-startdate".to_string(), offset.to_string()]);
    }
    args.extend(["-validity".to_string(), window.validity_days.to_string()]);
    args
}

/// Stop a child we are abandoning and collect its exit status.
fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

/// Copy of `args` with password values replaced, for echoing.
fn masked(args: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len());
    let mut hide_next = false;
    for arg in args {
        if hide_next {
            out.push("****".to_string());
        } else {
            out.push(arg.clone());
        }
        hide_next = PASSWORD_FLAGS.contains(&arg.as_str());
    }
    out
}

impl CertToolkit for KeytoolBackend {
    fn probe(&self) -> Result<()> {
        match self.run_keytool(&[], None, "The keytool binary is not installed.") {
            Ok(_) => Ok(()),
            Err(DevcaError::ToolkitFailed { stderr, .. }) => Err(DevcaError::ToolkitUnavailable {
                program: self.keytool_path.clone(),
                reason: stderr.trim().to_string(),
            }),
            Err(e) => Err(e),
        }
    }

    fn generate_key_pair(&self, req: &GenerateKeyPair<'_>) -> Result<()> {
        req.validate()?;
        self.run_keytool(&self.genkeypair_args(req), None, "Failed to create keystore.")?;
        Ok(())
    }

    fn export_certificate(&self, req: &ExportCertificate<'_>) -> Result<String> {
        req.validate()?;
        self.run_keytool(&self.exportcert_args(req), None, "Failed to get certificate.")
    }

    fn create_certificate_request(&self, req: &CreateCertificateRequest<'_>) -> Result<String> {
        req.validate()?;
        self.run_keytool(
            &self.certreq_args(req),
            None,
            "Failed to create certificate request.",
        )
    }

    fn sign_certificate_request(&self, req: &SignCertificateRequest<'_>) -> Result<String> {
        req.validate()?;
        self.run_keytool(
            &self.gencert_args(req),
            Some(req.request),
            "Failed to sign certificate request.",
        )
    }

    fn import_certificate(&self, req: &ImportCertificate<'_>) -> Result<()> {
        req.validate()?;
        self.run_keytool(
            &self.importcert_args(req),
            Some(req.certificate),
            "Failed to import certificate.",
        )?;
        Ok(())
    }

    fn describe(&self, req: &DescribeKeystore<'_>) -> Result<String> {
        req.validate()?;
        self.run_keytool(&self.list_args(req), None, "Failed to describe keystore.")
    }
}
