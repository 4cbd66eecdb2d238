//! Remote storage operations.
//!
//! Deploy and rollback talk to storage only through the [`Remote`] trait.
//! Production uses [`Azure`], which drives the `az` and `azcopy` CLIs; the
//! test suite substitutes a filesystem-backed fake.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Remote` trait
//! 2. Add the implementation in a new file next to `azure.rs`
//! 3. Re-export from this module

use chrono::{DateTime, Utc};
use std::fmt;
use std::path::Path;

use crate::core::domain::TrackedFiles;
use crate::error::Result;

mod azure;

pub use azure::Azure;

/// Storage operations needed by deploy and rollback.
pub trait Remote {
    /// Authenticate the underlying tools.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if login fails.
    fn login(&self) -> Result<()>;

    /// Whether the storage account exists. Absence is not an error.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` only if the check itself cannot run.
    fn account_exists(&self, account: &str) -> Result<bool>;

    /// Whether a blob container exists in the account.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the check fails or its answer is malformed.
    fn container_exists(&self, account: &str, container: &str) -> Result<bool>;

    /// Issue a file-storage SAS token for the account.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if no token could be issued.
    fn issue_sas(&self, account: &str) -> Result<SasToken>;

    /// Recursively synchronize a local directory to `dest`.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the transfer fails.
    fn sync(&self, source: &Path, dest: &Endpoint, options: &SyncOptions) -> Result<()>;

    /// Upload a single local file to `dest`, overwriting it.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the transfer fails.
    fn upload(&self, file: &Path, dest: &Endpoint) -> Result<()>;

    /// Download `src` into a local file.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the object is missing or the transfer fails.
    fn download(&self, src: &Endpoint, file: &Path) -> Result<()>;
}

/// Options for [`Remote::sync`].
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Remove remote objects that are absent locally
    pub delete_destination: bool,
    /// Backups of these files are never deleted by the sync
    pub preserve_backups: Option<TrackedFiles>,
}

/// The storage service an [`Endpoint`] lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Service {
    Blob,
    File { share: String, sas: SasToken },
}

/// A location in blob or file storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub account: String,
    pub container: String,
    pub service: Service,
    /// Object path relative to the container, empty for the container root
    pub path: String,
}

impl Endpoint {
    /// Root of a blob container.
    pub fn blob(account: &str, container: &str) -> Self {
        Self {
            account: account.to_string(),
            container: container.to_string(),
            service: Service::Blob,
            path: String::new(),
        }
    }

    /// Root of the container's directory inside a file share.
    pub fn file(account: &str, share: &str, container: &str, sas: SasToken) -> Self {
        Self {
            account: account.to_string(),
            container: container.to_string(),
            service: Service::File {
                share: share.to_string(),
                sas,
            },
            path: String::new(),
        }
    }

    /// The same endpoint pointing at a relative object path.
    pub fn join(&self, path: &str) -> Self {
        let mut joined = self.clone();
        joined.path = path.trim_start_matches('/').to_string();
        joined
    }

    /// Full URL, including the SAS token for file endpoints.
    pub fn url(&self) -> String {
        match &self.service {
            Service::Blob => format!(
                "https://{}.blob.core.windows.net/{}/{}",
                self.account, self.container, self.path
            ),
            Service::File { share, sas } => format!(
                "https://{}.file.core.windows.net/{}/{}/{}?{}",
                self.account,
                share,
                self.container,
                self.path,
                sas.secret()
            ),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.service {
            Service::Blob => write!(f, "blob:{}/{}/{}", self.account, self.container, self.path),
            Service::File { share, .. } => write!(
                f,
                "file:{}/{}/{}/{}",
                self.account, share, self.container, self.path
            ),
        }
    }
}

/// A time-limited shared access signature for file storage.
#[derive(Clone, PartialEq, Eq)]
pub struct SasToken {
    token: String,
    expires: DateTime<Utc>,
}

impl SasToken {
    pub fn new(token: impl Into<String>, expires: DateTime<Utc>) -> Self {
        Self {
            token: token.into().trim_start_matches('?').to_string(),
            expires,
        }
    }

    /// The raw query string. Never log this.
    pub fn secret(&self) -> &str {
        &self.token
    }

    pub fn expires(&self) -> DateTime<Utc> {
        self.expires
    }
}

impl fmt::Debug for SasToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SasToken")
            .field("token", &"<redacted>")
            .field("expires", &self.expires)
            .finish()
    }
}
