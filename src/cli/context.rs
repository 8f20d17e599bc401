use std::path::{Path, PathBuf};

use chrono::TimeDelta;

use crate::adapters::registry::file_registry::FileRegistry;
use crate::adapters::toolkit::keytool_backend::KeytoolBackend;
use crate::cli::{Cli, IssueArgs};
use crate::config::app_config::AppConfig;
use crate::core::errors::{DevcaError, Result};
use crate::core::models::validity::Validity;
use crate::core::services::keystore_service::{IssuanceSettings, KeystoreService};
use crate::core::services::truststore_service::TruststoreService;
use crate::core::traits::toolkit::CertToolkit;

/// Everything one invocation needs, resolved from flags, environment and
/// config file in that order of precedence.
pub struct Context {
    root: PathBuf,
    default_days: u32,
    pub keystores: KeystoreService<KeytoolBackend, FileRegistry>,
    pub truststores: TruststoreService<KeytoolBackend, FileRegistry>,
}

impl Context {
    /// Resolve settings and make sure keytool can be run at all.
    pub fn init(cli: &Cli) -> Result<Self> {
        let root = cli.root.clone().unwrap_or_else(|| PathBuf::from("."));
        if !root.is_dir() {
            return Err(DevcaError::InvalidConfig {
                detail: format!("root directory does not exist: {}", root.display()),
            });
        }

        let config = AppConfig::load(cli.config.as_deref(), &root)?.devca;

        let password = cli.password.clone().unwrap_or(config.password);
        let keytool = cli.keytool.clone().unwrap_or(config.keytool);
        let strategy = cli.signing.unwrap_or(config.signing);

        let toolkit = KeytoolBackend::new(keytool, config.store_type, cli.verbose);
        toolkit.probe()?;

        let registry = FileRegistry::new(root.clone(), config.store_type);

        Ok(Self {
            keystores: KeystoreService {
                toolkit: toolkit.clone(),
                registry: registry.clone(),
                settings: IssuanceSettings {
                    password: password.clone(),
                    key_algorithm: config.key_algorithm,
                    key_size: config.key_size,
                    strategy,
                },
            },
            truststores: TruststoreService {
                toolkit,
                registry,
                password,
            },
            root,
            default_days: config.default_days,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Turn `-d`/`-s` into a validity. Without `-d`, seconds alone mean
    /// zero days; with neither, the configured default applies.
    pub fn validity(&self, args: &IssueArgs) -> Result<Validity> {
        resolve_validity(self.default_days, args)
    }
}

fn resolve_validity(default_days: u32, args: &IssueArgs) -> Result<Validity> {
    let days = match args.days {
        Some(d) => d,
        None if args.seconds > 0 => 0,
        None => default_days,
    };
    let span = TimeDelta::days(i64::from(days)) + TimeDelta::seconds(i64::from(args.seconds));
    Validity::from_duration(span)
}
