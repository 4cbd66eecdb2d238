//! Git-backed tag store.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::config::Settings;
use crate::core::process::Invocation;
use crate::core::version::TagStore;
use crate::error::Result;

/// Tag store driving the `git` CLI inside a working copy.
#[derive(Debug, Clone)]
pub struct Git {
    program: String,
    workdir: PathBuf,
    remote: String,
    commit: String,
    timeout: Duration,
}

impl Git {
    /// Git store for the repository at `workdir`, configured from settings.
    pub fn new(settings: &Settings, workdir: impl AsRef<Path>) -> Self {
        Self {
            program: settings.tools.git.clone(),
            workdir: workdir.as_ref().to_path_buf(),
            remote: settings.tag_remote.clone(),
            commit: settings
                .commit
                .clone()
                .unwrap_or_else(|| "HEAD".to_string()),
            timeout: settings.timeout,
        }
    }

    fn git(&self) -> Invocation {
        Invocation::new(&self.program).current_dir(&self.workdir)
    }

    fn list(&self, inv: Invocation) -> Result<Vec<String>> {
        let captured = inv.run_checked(self.timeout)?;
        Ok(captured
            .stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect())
    }
}

impl TagStore for Git {
    fn fetch(&self) -> Result<()> {
        self.git()
            .args(["fetch", "--tags", "--force"])
            .arg(&self.remote)
            .run_checked(self.timeout)?;
        Ok(())
    }

    fn tags_at_head(&self, prefix: &str) -> Result<Vec<String>> {
        self.list(
            self.git()
                .args(["tag", "--list"])
                .arg(format!("{}*", prefix))
                .arg("--points-at")
                .arg(&self.commit),
        )
    }

    fn tags(&self, prefix: &str) -> Result<Vec<String>> {
        self.list(self.git().args(["tag", "--list"]).arg(format!("{}*", prefix)))
    }

    fn create(&self, tag: &str) -> Result<()> {
        self.git()
            .arg("tag")
            .arg(tag)
            .arg(&self.commit)
            .run_checked(self.timeout)?;
        Ok(())
    }

    fn push(&self, tag: &str) -> Result<()> {
        self.git()
            .arg("push")
            .arg(&self.remote)
            .arg(format!("refs/tags/{}", tag))
            .run_checked(self.timeout)?;
        Ok(())
    }
}
