//! Publishing a build to one storage account.

use std::path::Path;
use tracing::{debug, info, warn};

use crate::core::domain::TrackedFiles;
use crate::core::remote::{Endpoint, Remote, SyncOptions};
use crate::error::{ConfigError, Result};

/// Everything needed to publish to a single storage account.
#[derive(Debug, Clone)]
pub struct DeployRequest<'a> {
    /// Local build output
    pub source: &'a Path,
    pub account: &'a str,
    pub container: &'a str,
    /// Remove remote objects missing locally (backups are always kept)
    pub delete_destination: bool,
    /// Release number for backups; `None` skips them
    pub version: Option<u64>,
    pub tracked: &'a TrackedFiles,
    /// File share to mirror into; `None` skips file storage
    pub file_share: Option<&'a str>,
}

/// Publish `request.source` to blob storage and, best-effort, file storage.
///
/// Returns `false` without touching anything when the account or container
/// does not exist.
///
/// # Errors
///
/// Returns `ConfigError` for a missing source directory and `RemoteError`
/// when the blob sync or a blob backup fails. File-storage failures are
/// logged and ignored.
pub fn deploy(remote: &dyn Remote, request: &DeployRequest<'_>) -> Result<bool> {
    let DeployRequest {
        source,
        account,
        container,
        ..
    } = *request;

    if !remote.account_exists(account)? {
        info!(account, "storage account does not exist, skipping");
        return Ok(false);
    }
    if !remote.container_exists(account, container)? {
        info!(account, container, "container does not exist, skipping");
        return Ok(false);
    }

    if source.as_os_str().is_empty() {
        return Err(ConfigError::MissingInput("source-directory").into());
    }
    if !source.is_dir() {
        return Err(ConfigError::SourceNotFound(source.display().to_string()).into());
    }

    let options = SyncOptions {
        delete_destination: request.delete_destination,
        preserve_backups: Some(request.tracked.clone()),
    };

    let blob = Endpoint::blob(account, container);
    remote.sync(source, &blob, &options)?;

    let file = request
        .file_share
        .and_then(|share| file_endpoint(remote, account, share, container));
    if let Some(file) = &file {
        if let Err(e) = remote.sync(source, file, &options) {
            warn!(account, error = %e, "file share sync failed");
        }
    }

    if let Some(version) = request.version {
        for tracked in request.tracked.iter() {
            let local = source.join(tracked.live_path());
            if !local.is_file() {
                debug!(file = %tracked.live_path(), "not in build, no backup");
                continue;
            }

            let backup = tracked.backup_path(version);
            remote.upload(&local, &blob.join(&backup))?;
            debug!(backup = %backup, "backed up");

            if let Some(file) = &file {
                if let Err(e) = remote.upload(&local, &file.join(&backup)) {
                    warn!(backup = %backup, error = %e, "file share backup failed");
                }
            }
        }
    }

    Ok(true)
}

/// File-share endpoint for a container, or `None` when no SAS token can be issued.
pub(crate) fn file_endpoint(
    remote: &dyn Remote,
    account: &str,
    share: &str,
    container: &str,
) -> Option<Endpoint> {
    match remote.issue_sas(account) {
        Ok(sas) => {
            debug!(account, expires = %sas.expires(), "issued SAS token");
            Some(Endpoint::file(account, share, container, sas))
        }
        Err(e) => {
            warn!(account, error = %e, "could not issue SAS token, skipping file storage");
            None
        }
    }
}
