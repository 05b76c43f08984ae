//! Deployment configuration with TOML file support.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use skillrep_crypto::derive_address;
use skillrep_ledger::LedgerConfig;
use skillrep_privacy::PrivacyEndorserConfig;
use skillrep_types::{Address, ConfigId, LedgerParams, ScopeId};
use skillrep_utils::LogFormat;
use std::path::{Path, PathBuf};

/// Configuration for one deployment: a profile ledger plus the privacy
/// endorser it trusts.
///
/// Can be loaded from a TOML file via [`DeploymentConfig::from_toml_file`]
/// or built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    /// Administrator of both components.
    #[serde(default = "default_admin")]
    pub admin: Address,

    /// Callback address of the verification hub.
    #[serde(default = "default_hub")]
    pub hub: Address,

    /// Verification scope.
    #[serde(default)]
    pub scope: ScopeId,

    /// Configuration id installed on both components at deploy time.
    #[serde(default)]
    pub config_id: ConfigId,

    /// Address the privacy endorser forwards under.
    #[serde(default = "default_privacy_endorser")]
    pub privacy_endorser: Address,

    /// Directory for the ledger snapshot and endorser state.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Ledger parameters. Kept last so it serializes as a trailing table.
    #[serde(default)]
    pub params: LedgerParams,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_admin() -> Address {
    derive_address(b"admin")
}

fn default_hub() -> Address {
    derive_address(b"hub")
}

fn default_privacy_endorser() -> Address {
    derive_address(b"privacy-endorser")
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./skillrep_data")
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl DeploymentConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn ledger_config(&self) -> LedgerConfig {
        LedgerConfig::new(self.admin, self.hub)
            .with_scope(self.scope)
            .with_params(self.params.clone())
    }

    pub fn endorser_config(&self) -> PrivacyEndorserConfig {
        PrivacyEndorserConfig {
            address: self.privacy_endorser,
            admin: self.admin,
            hub: self.hub,
        }
    }
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            admin: default_admin(),
            hub: default_hub(),
            scope: ScopeId::ZERO,
            config_id: ConfigId::ZERO,
            privacy_endorser: default_privacy_endorser(),
            params: LedgerParams::default(),
            data_dir: default_data_dir(),
            log_format: LogFormat::Human,
            log_level: default_log_level(),
        }
    }
}
