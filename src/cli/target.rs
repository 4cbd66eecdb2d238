//! Resolution of the shared target inputs.

use crate::cli::TargetArgs;
use crate::core::config::Settings;
use crate::core::domain::{Environment, Region, TrackedFiles};
use crate::core::validation;
use crate::error::Result;

/// Validated target of a deploy or rollback.
#[derive(Debug, Clone)]
pub struct Target {
    pub container: String,
    /// `None` selects every region
    pub region: Option<Region>,
    pub environment: Environment,
    pub tracked: TrackedFiles,
    /// File share to mirror, `None` when disabled
    pub file_share: Option<String>,
}

impl TargetArgs {
    /// Validate the inputs. Runs before any external tool is touched.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for a missing container, an unknown region or
    /// environment, or a container that does not match the repository.
    pub fn resolve(&self, settings: &Settings) -> Result<Target> {
        let container = validation::require(self.container.as_deref(), "container")?.to_string();
        let environment = match non_empty(&self.environment) {
            Some(env) => validation::validate_environment(env)?,
            None => Environment::default(),
        };
        let region = validation::validate_region(non_empty(&self.region).unwrap_or(""))?;
        settings.validate_container(&container)?;

        Ok(Target {
            container,
            region,
            environment,
            tracked: TrackedFiles::new(self.versioned_prefix.as_deref().unwrap_or("")),
            file_share: (!self.skip_file_share).then(|| settings.file_share.clone()),
        })
    }
}

/// Treat blank inputs (as GitHub Actions passes unset ones) as absent.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
