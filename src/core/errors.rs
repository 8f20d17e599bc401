use std::path::PathBuf;

/// All domain errors for devca.
///
/// Toolkit failures keep the raw captured output so the user can see
/// exactly what keytool complained about.
#[derive(Debug, thiserror::Error)]
pub enum DevcaError {
    #[error(
        "The keytool binary is not installed or cannot be run ({program}): {reason}\n\n  \
         Solutions:\n    \
         → Install a JDK and make sure 'keytool' is on your PATH\n    \
         → Point devca at it: devca --keytool /path/to/keytool ...\n    \
         → Or set DEVCA_KEYTOOL / the 'keytool' key in devca.toml"
    )]
    ToolkitUnavailable { program: PathBuf, reason: String },

    #[error("{operation}\nstdout:\n{stdout}\nstderr:\n{stderr}")]
    ToolkitFailed {
        operation: String,
        stdout: String,
        stderr: String,
    },

    #[error(
        "Invalid validity: {detail}\n\n  \
         Use -d/--expiry-days and -s/--expiry-seconds with a positive total."
    )]
    InvalidValidity { detail: String },

    #[error(
        "Invalid keystore name '{name}': {reason}\n\n  \
         Names may contain letters, digits and . _ @ + -, and must not start with '.'."
    )]
    InvalidName { name: String, reason: String },

    #[error("Invalid common name: {detail}")]
    InvalidCommonName { detail: String },

    #[error(
        "Keystore '{name}' not found\n\n  \
         Run 'devca ls' to see available keystores."
    )]
    KeystoreNotFound { name: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error("Failed to serialize output: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DevcaError>;
