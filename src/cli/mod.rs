pub mod commands;
pub mod context;
pub mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::models::keystore::KeystoreName;
use crate::core::models::signing_strategy::SigningStrategy;

/// A `keytool` frontend for development certificate authorities.
#[derive(Parser, Debug)]
#[command(name = "devca", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// The root folder to perform operations in (default: current directory)
    #[arg(short, long, global = true, env = "DEVCA_ROOT")]
    pub root: Option<PathBuf>,

    /// The password protecting every keystore (default: 'password')
    #[arg(short, long, global = true, env = "DEVCA_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Print the keytool commands being run
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to alternative config file
    #[arg(long, global = true, env = "DEVCA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the keytool binary
    #[arg(long, global = true, env = "DEVCA_KEYTOOL")]
    pub keytool: Option<PathBuf>,

    /// How signing treats the parent certificate (implicit-trust, explicit-trust)
    #[arg(long, global = true)]
    pub signing: Option<SigningStrategy>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Describe a keystore
    Describe {
        /// The name of the keystore to describe
        name: KeystoreName,
    },

    /// List all keystores
    Ls {
        /// Print the names as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Create a keystore or truststore
    New {
        #[command(subcommand)]
        kind: NewKind,
    },

    /// Remove all keystores
    Nuke,

    /// Remove a keystore if it exists
    Rm {
        /// The name of the keystore to remove
        name: KeystoreName,
    },

    /// Sign an existing keystore with another one
    Sign {
        /// The keystore to sign
        name: KeystoreName,
        /// The keystore whose key pair signs it
        signer: KeystoreName,
        #[command(flatten)]
        issue: IssueArgs,
    },

    /// Make a keystore trust another keystore. This does not sign either keystore.
    Trust {
        /// The keystore that should trust the other certificate
        name: KeystoreName,
        /// The keystore to trust
        to_trust: KeystoreName,
    },
}

#[derive(Subcommand, Debug)]
pub enum NewKind {
    /// Create a root certificate
    Root {
        /// The keystore to create. An existing one with this name is overwritten.
        name: KeystoreName,
        #[command(flatten)]
        issue: IssueArgs,
        /// Keep an existing keystore instead of overwriting it
        #[arg(long)]
        if_absent: bool,
    },

    /// Create a child certificate signed by a parent
    Child {
        /// The keystore to create. An existing one with this name is overwritten.
        name: KeystoreName,
        /// The keystore to create this one as a child of
        parent: KeystoreName,
        #[command(flatten)]
        issue: IssueArgs,
    },

    /// Create a truststore
    Truststore {
        /// The truststore to create. An existing one with this name is overwritten.
        name: KeystoreName,
        /// The keystores to put in the truststore
        #[arg(required = true)]
        to_trust: Vec<KeystoreName>,
    },
}

/// Validity and subject options shared by every issuing command.
#[derive(Args, Debug, Clone, Default)]
pub struct IssueArgs {
    /// Days to expiration, added to --expiry-seconds (default: 90, or 0 when seconds are given)
    #[arg(short = 'd', long = "expiry-days")]
    pub days: Option<u32>,

    /// Seconds to expiration, added to --expiry-days
    #[arg(short = 's', long = "expiry-seconds", default_value_t = 0)]
    pub seconds: u32,

    /// The CN of the certificate (default: the keystore name)
    #[arg(short = 'c', long = "cn")]
    pub cn: Option<String>,
}
