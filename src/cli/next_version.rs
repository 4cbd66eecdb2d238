//! Next-version command - run the version tagger on its own.

use std::path::PathBuf;

use crate::cli::target::non_empty;
use crate::cli::{output, VersionArgs};
use crate::core::config::Settings;
use crate::core::domain::Release;
use crate::core::git::Git;
use crate::core::validation;
use crate::core::version;
use crate::error::{ConfigError, Result, VersionError};

/// Validated version-tagging inputs.
#[derive(Debug, Clone)]
pub struct VersionInputs {
    pub branch: String,
    pub microfrontend: String,
    pub repository_path: PathBuf,
}

impl VersionInputs {
    /// The `branch-name` and `app-name` action inputs stand in for
    /// `branch` and `microfrontend` when those are unset.
    ///
    /// # Errors
    ///
    /// Returns `VersionError::EmptyBranch` without a branch and
    /// `ConfigError::InvalidLabel` for an unusable microfrontend label.
    pub fn resolve(args: &VersionArgs, settings: &Settings) -> Result<Self> {
        let branch = non_empty(&args.branch)
            .or_else(|| settings.input("branch-name"))
            .ok_or(VersionError::EmptyBranch)?;
        let microfrontend = non_empty(&args.microfrontend)
            .or_else(|| settings.input("app-name"))
            .unwrap_or("");
        validation::validate_label(microfrontend)?;
        Ok(Self {
            branch: branch.to_string(),
            microfrontend: microfrontend.to_string(),
            repository_path: args.repository_path.clone(),
        })
    }
}

/// Compute the release number, tagging and pushing when needed.
pub(crate) fn tag(inputs: &VersionInputs, settings: &Settings) -> Result<Release> {
    which::which(&settings.tools.git)
        .map_err(|_| ConfigError::ToolNotFound(settings.tools.git.clone()))?;
    let git = Git::new(settings, &inputs.repository_path);
    version::next_version(&git, &inputs.branch, &inputs.microfrontend)
}

/// Print the release number for the current commit.
pub fn execute(args: VersionArgs, settings: &Settings) -> Result<()> {
    let inputs = VersionInputs::resolve(&args, settings)?;
    let release = tag(&inputs, settings)?;

    if release.created {
        output::success(&format!("tagged {}", release.tag));
    } else {
        output::dimmed(&format!("commit already tagged {}", release.tag));
    }
    output::set_output("version", release.version, settings.output_file.as_deref())?;
    Ok(())
}
