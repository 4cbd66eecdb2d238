//! Deploy command - publish a build to every selected region.

use tracing::info;

use crate::cli::next_version::{self, VersionInputs};
use crate::cli::{output, DeployArgs};
use crate::core::config::Settings;
use crate::core::deploy::{self, DeployRequest};
use crate::core::fanout;
use crate::core::remote::{Azure, Remote};
use crate::error::{ConfigError, Result};

/// Deploy to all selected regions.
pub fn execute(args: DeployArgs, settings: &Settings) -> Result<()> {
    let target = args.target.resolve(settings)?;
    let source = args
        .source_directory
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or(ConfigError::MissingInput("source-directory"))?;
    if !source.is_dir() {
        return Err(ConfigError::SourceNotFound(source.display().to_string()).into());
    }
    let versioning = if args.version_deployment {
        Some(VersionInputs::resolve(&args.versioning, settings)?)
    } else {
        None
    };

    info!(
        container = %target.container,
        environment = %target.environment,
        delete_destination = args.delete_destination,
        versioned = versioning.is_some(),
        "running deploy"
    );

    let azure = Azure::new(settings);
    azure.check_tools()?;
    azure.login()?;

    // One release number for all regions, fixed before the first upload.
    let release = match &versioning {
        Some(inputs) => Some(next_version::tag(inputs, settings)?),
        None => None,
    };
    if let Some(release) = &release {
        output::kv("version", release.version);
        output::kv("tag", &release.tag);
    }

    fanout::for_each_region(
        target.region,
        target.environment,
        "deployment",
        |region, account| {
            let request = DeployRequest {
                source: &source,
                account,
                container: &target.container,
                delete_destination: args.delete_destination,
                version: release.as_ref().map(|r| r.version),
                tracked: &target.tracked,
                file_share: target.file_share.as_deref(),
            };
            let deployed = deploy::deploy(&azure, &request)?;
            if deployed {
                output::success(&format!(
                    "deployed to {} ({})",
                    region,
                    output::account(account)
                ));
            } else {
                output::dimmed(&format!(
                    "skipped {} ({} or container {} not found)",
                    region, account, target.container
                ));
            }
            Ok(deployed)
        },
    )?;

    if let Some(release) = &release {
        output::set_output("version", release.version, settings.output_file.as_deref())?;
    }

    Ok(())
}
