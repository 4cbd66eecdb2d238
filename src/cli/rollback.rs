//! Rollback command - restore entry points from an earlier release.

use tempfile::TempDir;
use tracing::info;

use crate::cli::target::non_empty;
use crate::cli::{output, RollbackArgs};
use crate::core::config::Settings;
use crate::core::fanout;
use crate::core::remote::{Azure, Remote};
use crate::core::rollback::{self, RollbackRequest};
use crate::core::validation;
use crate::error::{ConfigError, Result};

/// Roll back all selected regions to `args.rollback_version`.
pub fn execute(args: RollbackArgs, settings: &Settings) -> Result<()> {
    let target = args.target.resolve(settings)?;
    let version = non_empty(&args.rollback_version)
        .ok_or(ConfigError::MissingInput("rollback-version"))?;
    let version = validation::parse_version(version)?;

    info!(container = %target.container, version, "running rollback");

    let azure = Azure::new(settings);
    azure.check_tools()?;
    azure.login()?;

    let staging = TempDir::new()?;

    fanout::for_each_region(target.region, target.environment, "rollback", |region, account| {
        let request = RollbackRequest {
            account,
            container: &target.container,
            version,
            tracked: &target.tracked,
            file_share: target.file_share.as_deref(),
        };
        let Some(report) = rollback::rollback(&azure, &request, staging.path())? else {
            output::dimmed(&format!("skipped {} ({} not found)", region, account));
            return Ok(false);
        };

        output::success(&format!(
            "rolled back {} ({}) to version {}",
            region,
            output::account(account),
            version
        ));
        for file in &report.restored {
            output::list_item(file);
        }
        if !report.missing.is_empty() {
            output::warn(&format!(
                "no backup at version {} for: {}",
                version,
                report.missing.join(", ")
            ));
        }
        Ok(true)
    })?;

    Ok(())
}
