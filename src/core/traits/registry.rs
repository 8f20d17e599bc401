use std::path::PathBuf;

use crate::core::errors::Result;
use crate::core::models::keystore::KeystoreName;

/// Port for the set of keystore files in the root directory.
///
/// Nothing is cached: every call looks at the file system.
pub trait KeystoreRegistry: Send + Sync {
    /// Path of the file backing `name`, whether or not it exists.
    fn location(&self, name: &KeystoreName) -> PathBuf;

    /// True iff the backing file is present.
    fn exists(&self, name: &KeystoreName) -> bool;

    /// All keystores, sorted by file name.
    fn list(&self) -> Result<Vec<KeystoreName>>;

    /// Delete the backing file. Absent keystores are not an error.
    fn remove(&self, name: &KeystoreName) -> Result<()>;

    /// Remove every keystore present when the call starts.
    ///
    /// Returns the names that were removed.
    fn nuke(&self) -> Result<Vec<KeystoreName>> {
        let snapshot = self.list()?;
        for name in &snapshot {
            self.remove(name)?;
        }
        Ok(snapshot)
    }
}
