use crate::core::errors::{DevcaError, Result};
use crate::core::models::certificate::{DistinguishedName, Extension};
use crate::core::models::keystore::KeystoreName;
use crate::core::models::requests::{
    CreateCertificateRequest, DescribeKeystore, GenerateKeyPair, ImportCertificate,
    KeystoreEntry, SignCertificateRequest,
};
use crate::core::models::signing_strategy::SigningStrategy;
use crate::core::models::validity::Validity;
use crate::core::services::truststore_service::import_trusted_certificate;
use crate::core::traits::registry::KeystoreRegistry;
use crate::core::traits::toolkit::CertToolkit;

/// Values shared by every toolkit call in one invocation.
#[derive(Debug, Clone)]
pub struct IssuanceSettings {
    pub password: String,
    pub key_algorithm: String,
    pub key_size: Option<u32>,
    pub strategy: SigningStrategy,
}

/// Creates keystores and drives the signing protocol that chains them.
///
/// Nothing here is transactional. If a step fails the keystore is left as
/// the previous step wrote it; running `create_keystore` again repairs it.
pub struct KeystoreService<T: CertToolkit, R: KeystoreRegistry> {
    pub toolkit: T,
    pub registry: R,
    pub settings: IssuanceSettings,
}

impl<T: CertToolkit, R: KeystoreRegistry> KeystoreService<T, R> {
    /// (Re)create `name` with a fresh CA-capable key pair, then have
    /// `parent` sign it if given. An existing keystore is destroyed first.
    pub fn create_keystore(
        &self,
        name: &KeystoreName,
        cn: Option<&str>,
        validity: Validity,
        parent: Option<&KeystoreName>,
    ) -> Result<()> {
        let subject = DistinguishedName::common_name(cn.unwrap_or(name.as_str()))?;
        if let Some(parent) = parent {
            if parent == name {
                return Err(DevcaError::InvalidName {
                    name: name.to_string(),
                    reason: "a keystore cannot be its own parent".into(),
                });
            }
            self.require(parent)?;
        }

        self.registry.remove(name)?;

        let location = self.registry.location(name);
        let extensions = Extension::ca_profile();
        self.toolkit.generate_key_pair(&GenerateKeyPair {
            entry: KeystoreEntry {
                location: &location,
                alias: name.as_str(),
            },
            subject: &subject,
            key_algorithm: &self.settings.key_algorithm,
            key_size: self.settings.key_size,
            extensions: &extensions,
            window: validity.window(),
            password: &self.settings.password,
        })?;

        match parent {
            Some(parent) => self.run_signing_protocol(name, parent, subject.cn(), validity),
            None => Ok(()),
        }
    }

    /// Create the root keystore `name` unless it already exists.
    ///
    /// Returns whether a keystore was created.
    pub fn ensure_created(
        &self,
        name: &KeystoreName,
        cn: Option<&str>,
        validity: Validity,
    ) -> Result<bool> {
        if self.registry.exists(name) {
            return Ok(false);
        }
        self.create_keystore(name, cn, validity, None)?;
        Ok(true)
    }

    /// Have `signer` sign the existing keystore `signee`.
    pub fn sign(
        &self,
        signee: &KeystoreName,
        signer: &KeystoreName,
        cn: Option<&str>,
        validity: Validity,
    ) -> Result<()> {
        if signee == signer {
            return Err(DevcaError::InvalidName {
                name: signee.to_string(),
                reason: "a keystore cannot sign itself".into(),
            });
        }
        let subject = DistinguishedName::common_name(cn.unwrap_or(signee.as_str()))?;
        self.require(signee)?;
        self.require(signer)?;
        self.run_signing_protocol(signee, signer, subject.cn(), validity)
    }

    /// Verbose toolkit listing of `name`.
    pub fn describe(&self, name: &KeystoreName) -> Result<String> {
        self.require(name)?;
        let location = self.registry.location(name);
        self.toolkit.describe(&DescribeKeystore {
            location: &location,
            password: &self.settings.password,
        })
    }

    pub fn exists(&self, name: &KeystoreName) -> bool {
        self.registry.exists(name)
    }

    pub fn list(&self) -> Result<Vec<KeystoreName>> {
        self.registry.list()
    }

    pub fn remove(&self, name: &KeystoreName) -> Result<()> {
        self.registry.remove(name)
    }

    pub fn nuke(&self) -> Result<Vec<KeystoreName>> {
        self.registry.nuke()
    }

    /// The four ordered protocol steps; each consumes the previous output.
    fn run_signing_protocol(
        &self,
        signee: &KeystoreName,
        signer: &KeystoreName,
        cn: &str,
        validity: Validity,
    ) -> Result<()> {
        let password = self.settings.password.as_str();

        // 1. signee learns the signer's certificate
        if self.settings.strategy.imports_signer_certificate() {
            import_trusted_certificate(&self.toolkit, &self.registry, password, signee, signer)?;
        }

        // 2. request
        let signee_location = self.registry.location(signee);
        let signee_entry = KeystoreEntry {
            location: &signee_location,
            alias: signee.as_str(),
        };
        let request = self.toolkit.create_certificate_request(&CreateCertificateRequest {
            entry: signee_entry,
            password,
        })?;

        // 3. signer answers it
        let signer_location = self.registry.location(signer);
        let mut extensions = Extension::ca_profile();
        extensions.push(Extension::dns_name(cn));
        let certificate = self.toolkit.sign_certificate_request(&SignCertificateRequest {
            request: &request,
            signer: KeystoreEntry {
                location: &signer_location,
                alias: signer.as_str(),
            },
            extensions: &extensions,
            window: validity.window(),
            password,
        })?;

        // 4. signed certificate replaces the self-signed one
        self.toolkit.import_certificate(&ImportCertificate {
            entry: signee_entry,
            certificate: &certificate,
            password,
        })
    }

    fn require(&self, name: &KeystoreName) -> Result<()> {
        if self.registry.exists(name) {
            Ok(())
        } else {
            Err(DevcaError::KeystoreNotFound {
                name: name.to_string(),
            })
        }
    }
}
