//! Configuration management.
//!
//! [`Settings`] is assembled once at startup from an optional
//! `.mfdeploy.toml` and a snapshot of the process environment, then passed
//! explicitly to every component. Nothing below the CLI layer reads the
//! environment on its own.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Contents of `.mfdeploy.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// External binaries
    pub tools: Tools,
    /// Deployment tuning
    pub deploy: DeployConfig,
}

/// Names or paths of the external binaries mfdeploy drives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tools {
    pub az: String,
    pub azcopy: String,
    pub git: String,
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            az: "az".to_string(),
            azcopy: "azcopy".to_string(),
            git: "git".to_string(),
        }
    }
}

/// `[deploy]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    /// Per-command timeout in seconds
    pub timeout_secs: u64,
    /// File share that mirrors blob content
    pub file_share: String,
    /// Git remote holding the version tags
    pub tag_remote: String,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            timeout_secs: constants::DEFAULT_TIMEOUT_SECS,
            file_share: constants::DEFAULT_FILE_SHARE.to_string(),
            tag_remote: constants::DEFAULT_TAG_REMOTE.to_string(),
        }
    }
}

impl FileConfig {
    /// Load `path`, or the default file in the current directory.
    ///
    /// A missing default file yields the defaults; a missing explicit path is
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile`, `ConfigError::Parse` or
    /// `ConfigError::InvalidValue`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(constants::CONFIG_FILE), false),
        };

        if !explicit && !path.exists() {
            debug!("no config file, using defaults");
            return Ok(Self::default());
        }

        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for empty tool names, a zero
    /// timeout or an empty share or remote name.
    pub fn validate(&self) -> Result<()> {
        let checks: [(&'static str, bool); 6] = [
            ("tools.az", self.tools.az.trim().is_empty()),
            ("tools.azcopy", self.tools.azcopy.trim().is_empty()),
            ("tools.git", self.tools.git.trim().is_empty()),
            ("deploy.timeout_secs", self.deploy.timeout_secs == 0),
            ("deploy.file_share", self.deploy.file_share.trim().is_empty()),
            ("deploy.tag_remote", self.deploy.tag_remote.trim().is_empty()),
        ];
        for (field, invalid) in checks {
            if invalid {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must not be empty or zero".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// Azure service principal credentials.
pub struct ServicePrincipal {
    pub client_id: String,
    pub client_secret: Zeroizing<String>,
    pub tenant_id: String,
    pub subscription_id: Option<String>,
}

impl std::fmt::Debug for ServicePrincipal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServicePrincipal")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("tenant_id", &self.tenant_id)
            .field("subscription_id", &self.subscription_id)
            .finish()
    }
}

/// Everything a run needs to know about its surroundings.
#[derive(Debug)]
pub struct Settings {
    pub tools: Tools,
    pub timeout: Duration,
    pub file_share: String,
    pub tag_remote: String,
    /// `None` means rely on an existing `az`/`azcopy` login
    pub credentials: Option<ServicePrincipal>,
    /// `owner/name` of the repository being deployed
    pub repository: Option<String>,
    /// Commit that version tags point at; `HEAD` when unset
    pub commit: Option<String>,
    /// File that step outputs are appended to
    pub output_file: Option<PathBuf>,
    /// Non-empty GitHub Actions inputs, keyed by upper-cased input name
    pub inputs: HashMap<String, String>,
}

impl Settings {
    /// Build settings from the config file and the current process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let file = FileConfig::load(config_path)?;
        let vars: HashMap<String, String> = std::env::vars().collect();
        Ok(Self::from_parts(file, &vars))
    }

    /// Build settings from a config and an explicit variable map.
    pub fn from_parts(file: FileConfig, vars: &HashMap<String, String>) -> Self {
        let get = |key: &str| {
            vars.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let credentials = match (
            get("ARM_CLIENT_ID"),
            get("ARM_CLIENT_SECRET"),
            get("ARM_TENANT_ID"),
        ) {
            (Some(client_id), Some(secret), Some(tenant_id)) => Some(ServicePrincipal {
                client_id,
                client_secret: Zeroizing::new(secret),
                tenant_id,
                subscription_id: get("ARM_SUBSCRIPTION_ID"),
            }),
            _ => None,
        };

        Self {
            tools: file.tools,
            timeout: Duration::from_secs(file.deploy.timeout_secs),
            file_share: file.deploy.file_share,
            tag_remote: file.deploy.tag_remote,
            credentials,
            repository: get("GITHUB_REPOSITORY"),
            commit: get("GITHUB_SHA"),
            output_file: get("GITHUB_OUTPUT").map(PathBuf::from),
            inputs: vars
                .iter()
                .filter_map(|(k, v)| {
                    let name = k.strip_prefix("INPUT_")?;
                    let value = v.trim();
                    (!value.is_empty()).then(|| (name.to_string(), value.to_string()))
                })
                .collect(),
        }
    }

    /// Value of the GitHub Actions input `name` (e.g. `branch-name`).
    pub fn input(&self, name: &str) -> Option<&str> {
        self.inputs
            .get(&name.to_ascii_uppercase())
            .map(String::as_str)
    }

    /// Check that the container is named after the repository being deployed.
    ///
    /// Skipped when the repository is unknown (local runs).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ContainerMismatch` when the names differ.
    pub fn validate_container(&self, container: &str) -> Result<()> {
        let Some(repository) = &self.repository else {
            return Ok(());
        };
        let name = repository.rsplit('/').next().unwrap_or(repository);
        if name == container {
            Ok(())
        } else {
            Err(ConfigError::ContainerMismatch {
                container: container.to_string(),
                repository: repository.clone(),
            }
            .into())
        }
    }
}
