//! Azure storage backend.
//!
//! Drives the `az` CLI for control-plane queries and SAS issuance, and
//! `azcopy` for data transfers.
//!
//! ## Requirements
//!
//! - `az` and `azcopy` installed (paths configurable in `.mfdeploy.toml`)
//! - A service principal in `ARM_CLIENT_ID` / `ARM_CLIENT_SECRET` /
//!   `ARM_TENANT_ID`, or an existing login for both tools

use chrono::{Duration as ChronoDuration, Utc};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{Endpoint, Remote, SasToken, SyncOptions};
use crate::core::config::{ServicePrincipal, Settings, Tools};
use crate::core::constants;
use crate::core::process::Invocation;
use crate::error::{ConfigError, RemoteError, Result};

/// Remote backed by the Azure CLIs.
pub struct Azure<'a> {
    tools: &'a Tools,
    timeout: Duration,
    credentials: Option<&'a ServicePrincipal>,
}

#[derive(Deserialize)]
struct ContainerExists {
    exists: bool,
}

impl<'a> Azure<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            tools: &settings.tools,
            timeout: settings.timeout,
            credentials: settings.credentials.as_ref(),
        }
    }

    /// Check both CLIs are installed.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ToolNotFound` naming the first missing tool.
    pub fn check_tools(&self) -> Result<()> {
        for tool in [&self.tools.az, &self.tools.azcopy] {
            which::which(tool).map_err(|_| ConfigError::ToolNotFound(tool.clone()))?;
        }
        Ok(())
    }

    fn az(&self) -> Invocation {
        Invocation::new(&self.tools.az)
    }

    fn azcopy(&self) -> Invocation {
        Invocation::new(&self.tools.azcopy)
    }
}

impl Remote for Azure<'_> {
    fn login(&self) -> Result<()> {
        let Some(sp) = self.credentials else {
            warn!("no service principal configured, relying on existing az/azcopy login");
            return Ok(());
        };

        info!(client_id = %sp.client_id, "logging in with service principal");
        self.az()
            .args(["login", "--service-principal", "--username"])
            .arg(&sp.client_id)
            .arg("--password")
            .secret_arg(sp.client_secret.as_str())
            .arg("--tenant")
            .arg(&sp.tenant_id)
            .args(["--output", "none"])
            .run_checked(self.timeout)?;

        if let Some(subscription) = &sp.subscription_id {
            self.az()
                .args(["account", "set", "--subscription"])
                .arg(subscription)
                .run_checked(self.timeout)?;
        }

        self.azcopy()
            .args(["login", "--service-principal", "--application-id"])
            .arg(&sp.client_id)
            .arg("--tenant-id")
            .arg(&sp.tenant_id)
            .env(constants::AZCOPY_SECRET_VAR, sp.client_secret.as_str())
            .run_checked(self.timeout)?;

        Ok(())
    }

    fn account_exists(&self, account: &str) -> Result<bool> {
        let captured = self
            .az()
            .args(["storage", "account", "show", "--name"])
            .arg(account)
            .args(["--output", "none"])
            .run(self.timeout)?;
        if !captured.success() {
            debug!(account, stderr = %captured.stderr.trim(), "account lookup failed");
        }
        Ok(captured.success())
    }

    fn container_exists(&self, account: &str, container: &str) -> Result<bool> {
        let captured = self
            .az()
            .args(["storage", "container", "exists", "--account-name"])
            .arg(account)
            .arg("--name")
            .arg(container)
            .args(["--auth-mode", "login", "--output", "json"])
            .run_checked(self.timeout)?;
        let parsed: ContainerExists =
            serde_json::from_str(&captured.stdout).map_err(|source| RemoteError::Json {
                what: "az storage container exists",
                source,
            })?;
        Ok(parsed.exists)
    }

    fn issue_sas(&self, account: &str) -> Result<SasToken> {
        let expires = Utc::now() + ChronoDuration::hours(constants::SAS_VALIDITY_HOURS);
        let captured = self
            .az()
            .args(["storage", "account", "generate-sas", "--account-name"])
            .arg(account)
            .args(["--services", "f", "--resource-types", "o", "--permissions"])
            .arg(constants::SAS_PERMISSIONS)
            .arg("--expiry")
            .arg(expires.format("%Y-%m-%dT%H:%MZ").to_string())
            .args(["--https-only", "--output", "json"])
            .run_checked(self.timeout)?;
        let token: String =
            serde_json::from_str(&captured.stdout).map_err(|source| RemoteError::Json {
                what: "az storage account generate-sas",
                source,
            })?;
        Ok(SasToken::new(token, expires))
    }

    fn sync(&self, source: &Path, dest: &Endpoint, options: &SyncOptions) -> Result<()> {
        let mut inv = self
            .azcopy()
            .arg("sync")
            .arg(source.to_string_lossy())
            .arg(dest.url())
            .args(["--recursive", "--delete-destination"])
            .arg(options.delete_destination.to_string());
        if options.delete_destination {
            if let Some(tracked) = &options.preserve_backups {
                inv = inv.arg("--exclude-regex").arg(tracked.backup_pattern());
            }
        }
        inv.run_checked(self.timeout)?;
        Ok(())
    }

    fn upload(&self, file: &Path, dest: &Endpoint) -> Result<()> {
        self.azcopy()
            .arg("copy")
            .arg(file.to_string_lossy())
            .arg(dest.url())
            .args(["--overwrite", "true"])
            .run_checked(self.timeout)?;
        Ok(())
    }

    fn download(&self, src: &Endpoint, file: &Path) -> Result<()> {
        self.azcopy()
            .arg("copy")
            .arg(src.url())
            .arg(file.to_string_lossy())
            .args(["--overwrite", "true"])
            .run_checked(self.timeout)?;
        Ok(())
    }
}
