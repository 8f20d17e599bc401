use std::path::PathBuf;

use crate::core::errors::Result;
use crate::core::models::keystore::{KeystoreName, StoreType};
use crate::core::traits::registry::KeystoreRegistry;

/// Registry backed by `<root>/<name>.<ext>` files.
///
/// Files whose stem is not a valid keystore name are ignored, as is
/// anything that is not a regular file.
#[derive(Debug, Clone)]
pub struct FileRegistry {
    root: PathBuf,
    store_type: StoreType,
}

impl FileRegistry {
    pub fn new(root: PathBuf, store_type: StoreType) -> Self {
        Self { root, store_type }
    }

    /// Name of the keystore a directory entry represents, if any.
    fn name_of(&self, file_name: &str) -> Option<KeystoreName> {
        let stem = file_name.strip_suffix(self.store_type.extension())?;
        let stem = stem.strip_suffix('.')?;
        KeystoreName::new(stem).ok()
    }
}

impl KeystoreRegistry for FileRegistry {
    fn location(&self, name: &KeystoreName) -> PathBuf {
        self.root
            .join(format!("{}.{}", name, self.store_type.extension()))
    }

    fn exists(&self, name: &KeystoreName) -> bool {
        self.location(name).is_file()
    }

    fn list(&self) -> Result<Vec<KeystoreName>> {
        let mut file_names = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(file_name) = entry.file_name().to_str() {
                file_names.push(file_name.to_string());
            }
        }
        file_names.sort();

        Ok(file_names
            .iter()
            .filter_map(|f| self.name_of(f))
            .collect())
    }

    fn remove(&self, name: &KeystoreName) -> Result<()> {
        match std::fs::remove_file(self.location(name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_registry() -> (tempfile::TempDir, FileRegistry) {
        let dir = tempfile::tempdir().unwrap();
        let registry = FileRegistry::new(dir.path().to_path_buf(), StoreType::Jks);
        (dir, registry)
    }

    fn name(s: &str) -> KeystoreName {
        KeystoreName::new(s).unwrap()
    }

    fn touch(registry: &FileRegistry, s: &str) {
        std::fs::write(registry.location(&name(s)), b"").unwrap();
    }

    fn listed(registry: &FileRegistry) -> Vec<String> {
        registry
            .list()
            .unwrap()
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn empty_root_lists_nothing() {
        let (_dir, registry) = temp_registry();
        assert!(registry.list().unwrap().is_empty());
    }

    #[test]
    fn location_uses_store_extension() {
        let (dir, registry) = temp_registry();
        assert_eq!(registry.location(&name("ca")), dir.path().join("ca.jks"));

        let p12 = FileRegistry::new(dir.path().to_path_buf(), StoreType::Pkcs12);
        assert_eq!(p12.location(&name("ca")), dir.path().join("ca.p12"));
    }

    #[test]
    fn list_is_sorted_and_strips_extension() {
        let (_dir, registry) = temp_registry();
        touch(&registry, "server");
        touch(&registry, "ca2");
        touch(&registry, "ca");
        touch(&registry, "client.truststore");

        assert_eq!(listed(&registry), ["ca", "ca2", "client.truststore", "server"]);
    }

    #[test]
    fn list_ignores_other_files_and_directories() {
        let (dir, registry) = temp_registry();
        touch(&registry, "ca");
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();
        std::fs::write(dir.path().join(".jks"), "x").unwrap();
        std::fs::write(dir.path().join("cajks"), "x").unwrap();
        std::fs::create_dir(dir.path().join("sub.jks")).unwrap();

        assert_eq!(listed(&registry), ["ca"]);
    }

    #[test]
    fn exists_tracks_the_file() {
        let (_dir, registry) = temp_registry();
        assert!(!registry.exists(&name("ca")));
        touch(&registry, "ca");
        assert!(registry.exists(&name("ca")));
    }

    #[test]
    fn remove_deletes_only_the_named_keystore() {
        let (_dir, registry) = temp_registry();
        touch(&registry, "ca");
        touch(&registry, "ca2");

        registry.remove(&name("ca2")).unwrap();

        assert_eq!(listed(&registry), ["ca"]);
    }

    #[test]
    fn remove_missing_is_a_no_op() {
        let (_dir, registry) = temp_registry();
        assert!(registry.remove(&name("never-created")).is_ok());
    }

    #[test]
    fn nuke_removes_everything_and_reports_it() {
        let (_dir, registry) = temp_registry();
        for n in ["a", "b", "c"] {
            touch(&registry, n);
        }

        let removed = registry.nuke().unwrap();

        assert_eq!(removed.len(), 3);
        assert!(registry.list().unwrap().is_empty());
    }

    #[test]
    fn missing_root_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let registry = FileRegistry::new(dir.path().join("nope"), StoreType::Jks);
        assert!(registry.list().is_err());
    }
}
