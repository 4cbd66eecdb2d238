//! Restoring entry points from versioned backups.
//!
//! Each tracked file is restored on its own: a missing backup is reported
//! and skipped, it never aborts the other files.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::core::deploy::file_endpoint;
use crate::core::domain::TrackedFiles;
use crate::core::remote::{Endpoint, Remote};
use crate::error::Result;

/// Everything needed to roll back a single storage account.
#[derive(Debug, Clone)]
pub struct RollbackRequest<'a> {
    pub account: &'a str,
    pub container: &'a str,
    /// Release to restore
    pub version: u64,
    pub tracked: &'a TrackedFiles,
    /// File share to restore as well; `None` skips file storage
    pub file_share: Option<&'a str>,
}

/// What a rollback of one account did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollbackReport {
    /// Live blob paths restored from their backup
    pub restored: Vec<String>,
    /// Live paths with no backup at the requested version
    pub missing: Vec<String>,
    /// Live file-share paths restored
    pub file_share_restored: Vec<String>,
}

/// Restore the tracked files of `request.version` as the live files.
///
/// Backups are staged under `staging`. Returns `None` when the account does
/// not exist.
///
/// # Errors
///
/// Returns `RemoteError` if a downloaded backup cannot be written back to
/// blob storage. Missing backups and file-storage failures are not errors.
pub fn rollback(
    remote: &dyn Remote,
    request: &RollbackRequest<'_>,
    staging: &Path,
) -> Result<Option<RollbackReport>> {
    if !remote.account_exists(request.account)? {
        info!(account = request.account, "storage account does not exist, skipping");
        return Ok(None);
    }

    let mut report = RollbackReport::default();

    let blob = Endpoint::blob(request.account, request.container);
    for tracked in request.tracked.iter() {
        let backup = tracked.backup_path(request.version);
        let staged = stage(staging, "blob", &backup)?;

        if let Err(e) = remote.download(&blob.join(&backup), &staged) {
            warn!(backup = %backup, error = %e, "backup not available");
            report.missing.push(tracked.live_path());
            continue;
        }
        remote.upload(&staged, &blob.join(&tracked.live_path()))?;
        debug!(file = %tracked.live_path(), "restored");
        report.restored.push(tracked.live_path());
    }

    let file = request
        .file_share
        .and_then(|share| file_endpoint(remote, request.account, share, request.container));
    if let Some(file) = file {
        for tracked in request.tracked.iter() {
            let backup = tracked.backup_path(request.version);
            let staged = stage(staging, "file", &backup)?;

            if let Err(e) = remote.download(&file.join(&backup), &staged) {
                warn!(backup = %backup, error = %e, "file share backup not available");
                continue;
            }
            match remote.upload(&staged, &file.join(&tracked.live_path())) {
                Ok(()) => report.file_share_restored.push(tracked.live_path()),
                Err(e) => warn!(file = %tracked.live_path(), error = %e, "file share restore failed"),
            }
        }
    }

    Ok(Some(report))
}

/// Local path a backup is downloaded to, with parent directories created.
fn stage(staging: &Path, service: &str, backup: &str) -> Result<PathBuf> {
    let path = staging.join(service).join(backup);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(path)
}
