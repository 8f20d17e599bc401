use crate::core::errors::{DevcaError, Result};
use crate::core::models::keystore::KeystoreName;
use crate::core::models::requests::{ExportCertificate, ImportCertificate, KeystoreEntry};
use crate::core::traits::registry::KeystoreRegistry;
use crate::core::traits::toolkit::CertToolkit;

/// Export `trusted`'s certificate and import it into `into` under the
/// alias `trusted`. Importing into a missing keystore creates it.
pub(crate) fn import_trusted_certificate<T: CertToolkit, R: KeystoreRegistry>(
    toolkit: &T,
    registry: &R,
    password: &str,
    into: &KeystoreName,
    trusted: &KeystoreName,
) -> Result<()> {
    let trusted_location = registry.location(trusted);
    let certificate = toolkit.export_certificate(&ExportCertificate {
        entry: KeystoreEntry {
            location: &trusted_location,
            alias: trusted.as_str(),
        },
        password,
    })?;

    let into_location = registry.location(into);
    toolkit.import_certificate(&ImportCertificate {
        entry: KeystoreEntry {
            location: &into_location,
            alias: trusted.as_str(),
        },
        certificate: &certificate,
        password,
    })
}

/// Builds keystores that hold trusted certificates and no key pair.
pub struct TruststoreService<T: CertToolkit, R: KeystoreRegistry> {
    pub toolkit: T,
    pub registry: R,
    pub password: String,
}

impl<T: CertToolkit, R: KeystoreRegistry> TruststoreService<T, R> {
    /// Make `name` trust `to_trust`. Trust is one-way and does not sign.
    pub fn trust(&self, name: &KeystoreName, to_trust: &KeystoreName) -> Result<()> {
        if name == to_trust {
            return Err(DevcaError::InvalidName {
                name: name.to_string(),
                reason: "a keystore cannot trust itself".into(),
            });
        }
        self.require(to_trust)?;
        import_trusted_certificate(&self.toolkit, &self.registry, &self.password, name, to_trust)
    }

    /// Recreate `name` as a truststore holding the certificates of
    /// `trusted`, imported in order. Repeated names overwrite one alias.
    /// An empty list only removes the old truststore.
    pub fn create_truststore(&self, name: &KeystoreName, trusted: &[KeystoreName]) -> Result<()> {
        if trusted.contains(name) {
            return Err(DevcaError::InvalidName {
                name: name.to_string(),
                reason: "a truststore cannot trust the keystore it replaces".into(),
            });
        }
        for t in trusted {
            self.require(t)?;
        }

        self.registry.remove(name)?;
        for t in trusted {
            import_trusted_certificate(&self.toolkit, &self.registry, &self.password, name, t)?;
        }
        Ok(())
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::registry::file_registry::FileRegistry;
    use crate::core::models::keystore::StoreType;
    use crate::core::services::test_support::{Call, FakeToolkit, name};

    fn service() -> (tempfile::TempDir, TruststoreService<FakeToolkit, FileRegistry>) {
        let dir = tempfile::tempdir().unwrap();
        let service = TruststoreService {
            toolkit: FakeToolkit::default(),
            registry: FileRegistry::new(dir.path().to_path_buf(), StoreType::Jks),
            password: "password".into(),
        };
        (dir, service)
    }

    fn seed(service: &TruststoreService<FakeToolkit, FileRegistry>, names: &[&str]) {
        for n in names {
            std::fs::write(service.registry.location(&name(n)), "KEYPAIR").unwrap();
        }
    }

    #[test]
    fn truststore_imports_each_certificate_under_its_name() {
        let (_dir, service) = service();
        seed(&service, &["ca", "ca2"]);

        service
            .create_truststore(&name("bundle"), &[name("ca"), name("ca2")])
            .unwrap();

        let listed: Vec<String> = service
            .registry
            .list()
            .unwrap()
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(listed, ["bundle", "ca", "ca2"]);

        let imports = service.toolkit.imports_into(&service.registry.location(&name("bundle")));
        assert_eq!(imports, ["ca", "ca2"]);
    }

    #[test]
    fn truststore_holds_no_key_pair() {
        let (_dir, service) = service();
        seed(&service, &["ca"]);

        service.create_truststore(&name("bundle"), &[name("ca")]).unwrap();

        let calls = service.toolkit.calls();
        assert!(!calls.iter().any(|c| matches!(c, Call::Generate { .. })));
        assert!(!calls.iter().any(|c| matches!(c, Call::CertReq { .. })));
    }

    #[test]
    fn truststore_replaces_previous_contents() {
        let (_dir, service) = service();
        seed(&service, &["ca", "bundle"]);

        service.create_truststore(&name("bundle"), &[name("ca")]).unwrap();

        let content = std::fs::read_to_string(service.registry.location(&name("bundle"))).unwrap();
        assert!(!content.contains("KEYPAIR"));
        assert!(content.contains("ca="));
    }

    #[test]
    fn duplicate_names_overwrite_one_alias() {
        let (_dir, service) = service();
        seed(&service, &["ca"]);

        service
            .create_truststore(&name("bundle"), &[name("ca"), name("ca")])
            .unwrap();

        let content = std::fs::read_to_string(service.registry.location(&name("bundle"))).unwrap();
        assert_eq!(content.matches("ca=").count(), 1);
    }

    #[test]
    fn missing_trusted_keystore_leaves_existing_truststore_alone() {
        let (_dir, service) = service();
        seed(&service, &["ca", "bundle"]);

        let result = service.create_truststore(&name("bundle"), &[name("ca"), name("ghost")]);

        assert!(matches!(result, Err(DevcaError::KeystoreNotFound { .. })));
        assert!(service.registry.exists(&name("bundle")));
        assert!(service.toolkit.calls().is_empty());
    }

    #[test]
    fn empty_trust_list_only_removes_the_old_truststore() {
        let (_dir, service) = service();
        seed(&service, &["bundle"]);

        service.create_truststore(&name("bundle"), &[]).unwrap();

        assert!(!service.registry.exists(&name("bundle")));
        assert!(service.toolkit.calls().is_empty());
    }

    #[test]
    fn trust_is_one_way() {
        let (_dir, service) = service();
        seed(&service, &["server", "client"]);

        service.trust(&name("client"), &name("server")).unwrap();

        let client = service.registry.location(&name("client"));
        let server = service.registry.location(&name("server"));
        assert_eq!(service.toolkit.imports_into(&client), ["server"]);
        assert!(service.toolkit.imports_into(&server).is_empty());
    }

    #[test]
    fn trusting_self_is_rejected() {
        let (_dir, service) = service();
        seed(&service, &["ca"]);
        assert!(service.trust(&name("ca"), &name("ca")).is_err());
    }

    #[test]
    fn export_failure_propagates_unmodified() {
        let (_dir, mut service) = service();
        seed(&service, &["ca"]);
        service.toolkit = FakeToolkit::failing_on("export");

        let err = service.trust(&name("client"), &name("ca")).unwrap_err();
        match err {
            DevcaError::ToolkitFailed { stderr, .. } => assert!(stderr.contains("export")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
