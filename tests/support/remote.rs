//! Filesystem-backed stand-in for Azure storage.
//!
//! Blob objects live at `<root>/blob/<account>/<container>/<path>` and file
//! share objects at `<root>/file/<account>/<share>/<container>/<path>`.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{Duration, Utc};
use mfdeploy::core::remote::{Endpoint, Remote, SasToken, Service, SyncOptions};
use mfdeploy::error::{RemoteError, Result};

pub struct FakeRemote {
    root: PathBuf,
    accounts: HashSet<String>,
    containers: HashSet<(String, String)>,
    /// `issue_sas` fails
    pub failing_sas: Cell<bool>,
    /// Every file share operation fails
    pub failing_file_share: Cell<bool>,
    calls: RefCell<Vec<String>>,
}

impl FakeRemote {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            accounts: HashSet::new(),
            containers: HashSet::new(),
            failing_sas: Cell::new(false),
            failing_file_share: Cell::new(false),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Register an account and a container inside it.
    pub fn with_container(mut self, account: &str, container: &str) -> Self {
        self.accounts.insert(account.to_string());
        self.containers
            .insert((account.to_string(), container.to_string()));
        self
    }

    /// Register an account with no containers.
    pub fn with_account(mut self, account: &str) -> Self {
        self.accounts.insert(account.to_string());
        self
    }

    /// Operations performed so far, e.g. `sync blob:acct/app/`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Local directory backing a blob container.
    pub fn blob_dir(&self, account: &str, container: &str) -> PathBuf {
        self.root.join("blob").join(account).join(container)
    }

    /// Local directory backing a container inside a file share.
    pub fn file_dir(&self, account: &str, share: &str, container: &str) -> PathBuf {
        self.root
            .join("file")
            .join(account)
            .join(share)
            .join(container)
    }

    /// Read a blob object, `None` if absent.
    pub fn blob(&self, account: &str, container: &str, path: &str) -> Option<String> {
        std::fs::read_to_string(self.blob_dir(account, container).join(path)).ok()
    }

    /// Read a file share object, `None` if absent.
    pub fn file(&self, account: &str, share: &str, container: &str, path: &str) -> Option<String> {
        std::fs::read_to_string(self.file_dir(account, share, container).join(path)).ok()
    }

    /// Put an object directly into blob storage.
    pub fn put_blob(&self, account: &str, container: &str, path: &str, contents: &str) {
        super::write_file(&self.blob_dir(account, container).join(path), contents);
    }

    /// Relative paths of every object in a blob container, sorted.
    pub fn blob_paths(&self, account: &str, container: &str) -> Vec<String> {
        let mut paths = list_files(&self.blob_dir(account, container));
        paths.sort();
        paths
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn location(&self, endpoint: &Endpoint) -> Result<PathBuf> {
        let dir = match &endpoint.service {
            Service::Blob => self.blob_dir(&endpoint.account, &endpoint.container),
            Service::File { share, .. } => {
                if self.failing_file_share.get() {
                    return Err(failed(&format!("file share unavailable: {}", endpoint)));
                }
                self.file_dir(&endpoint.account, share, &endpoint.container)
            }
        };
        Ok(if endpoint.path.is_empty() {
            dir
        } else {
            dir.join(&endpoint.path)
        })
    }
}

impl Remote for FakeRemote {
    fn login(&self) -> Result<()> {
        self.record("login".to_string());
        Ok(())
    }

    fn account_exists(&self, account: &str) -> Result<bool> {
        Ok(self.accounts.contains(account))
    }

    fn container_exists(&self, account: &str, container: &str) -> Result<bool> {
        Ok(self
            .containers
            .contains(&(account.to_string(), container.to_string())))
    }

    fn issue_sas(&self, account: &str) -> Result<SasToken> {
        if self.failing_sas.get() {
            return Err(failed(&format!("cannot issue SAS for {}", account)));
        }
        Ok(SasToken::new("sv=fake&sig=fake", Utc::now() + Duration::hours(2)))
    }

    fn sync(&self, source: &Path, dest: &Endpoint, options: &SyncOptions) -> Result<()> {
        self.record(format!("sync {}", dest));
        let target = self.location(dest)?;
        let local = list_files(source);

        for rel in &local {
            copy(&source.join(rel), &target.join(rel))?;
        }

        if options.delete_destination {
            for rel in list_files(&target) {
                let preserved = options
                    .preserve_backups
                    .as_ref()
                    .is_some_and(|tracked| tracked.is_backup(&rel));
                if !preserved && !local.contains(&rel) {
                    std::fs::remove_file(target.join(&rel))?;
                }
            }
        }
        Ok(())
    }

    fn upload(&self, file: &Path, dest: &Endpoint) -> Result<()> {
        self.record(format!("upload {}", dest));
        copy(file, &self.location(dest)?)
    }

    fn download(&self, src: &Endpoint, file: &Path) -> Result<()> {
        self.record(format!("download {}", src));
        let from = self.location(src)?;
        if !from.is_file() {
            return Err(failed(&format!("object not found: {}", src)));
        }
        copy(&from, file)
    }
}

fn failed(stderr: &str) -> mfdeploy::error::Error {
    RemoteError::Failed {
        command: "fake".to_string(),
        code: Some(1),
        stderr: stderr.to_string(),
    }
    .into()
}

fn copy(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::copy(from, to)?;
    Ok(())
}

/// Relative `/`-separated paths of all files below `root`.
fn list_files(root: &Path) -> Vec<String> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if let Ok(rel) = path.strip_prefix(root) {
                let rel: Vec<_> = rel
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().to_string())
                    .collect();
                out.push(rel.join("/"));
            }
        }
    }
    out
}
