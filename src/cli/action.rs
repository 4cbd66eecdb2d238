//! Action command - GitHub Actions entry point.
//!
//! Inputs arrive as `INPUT_<NAME>` environment variables; `rollback-mode`
//! picks between a rollback and a regular deploy.

use tracing::debug;

use crate::cli::{deploy, rollback, ActionArgs, RollbackArgs};
use crate::core::config::Settings;
use crate::error::Result;

/// Dispatch to deploy or rollback.
pub fn execute(args: ActionArgs, settings: &Settings) -> Result<()> {
    debug!(rollback_mode = args.rollback_mode, "running action");

    if args.rollback_mode {
        rollback::execute(
            RollbackArgs {
                target: args.deploy.target,
                rollback_version: args.rollback_version,
            },
            settings,
        )
    } else {
        deploy::execute(args.deploy, settings)
    }
}
