//! Command-line interface.

pub mod account;
pub mod action;
pub mod completions;
pub mod deploy;
pub mod next_version;
pub mod output;
pub mod rollback;
pub mod target;

use clap::builder::FalseyValueParser;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::config::Settings;
use crate::error::Result;

/// mfdeploy - versioned microfrontend deployments to Azure storage.
#[derive(Parser)]
#[command(
    name = "mfdeploy",
    about = "Publish microfrontends to Azure storage with versioned rollback",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a config file (default: .mfdeploy.toml if present)
    #[arg(long, global = true, env = "MFDEPLOY_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Publish a build to every selected region
    Deploy(DeployArgs),

    /// Restore tracked entry points from an earlier release
    Rollback(RollbackArgs),

    /// Run as a GitHub Action, reading INPUT_* variables
    Action(ActionArgs),

    /// Compute (and tag) the next release number
    NextVersion(VersionArgs),

    /// Print the storage account name of each selected region
    Account {
        /// Only this region
        #[arg(long, env = "INPUT_REGION")]
        region: Option<String>,
        /// Target environment: test or prod
        #[arg(long, env = "INPUT_ENVIRONMENT")]
        environment: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Where to publish.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Blob container (named after the repository)
    #[arg(long, env = "INPUT_CONTAINER")]
    pub container: Option<String>,

    /// Only this region (default: all regions)
    #[arg(long, env = "INPUT_REGION")]
    pub region: Option<String>,

    /// Target environment: test or prod (default: test)
    #[arg(long, env = "INPUT_ENVIRONMENT")]
    pub environment: Option<String>,

    /// Directory prefix of the versioned entry points
    #[arg(long, env = "INPUT_VERSIONED-PREFIX")]
    pub versioned_prefix: Option<String>,

    /// Do not mirror to Azure File Storage
    #[arg(long, env = "INPUT_SKIP-FILE-SHARE", value_parser = FalseyValueParser::new())]
    pub skip_file_share: bool,
}

/// Release numbering inputs.
#[derive(Args, Debug, Clone)]
pub struct VersionArgs {
    /// Branch the release is built from
    #[arg(long, visible_alias = "branch-name", env = "INPUT_BRANCH")]
    pub branch: Option<String>,

    /// Microfrontend label included in the version tag
    #[arg(long, visible_alias = "app-name", env = "INPUT_MICROFRONTEND")]
    pub microfrontend: Option<String>,

    /// Git working copy holding the version tags
    #[arg(long, env = "INPUT_REPOSITORY-PATH", default_value = ".")]
    pub repository_path: PathBuf,
}

/// Inputs of `deploy`.
#[derive(Args, Debug, Clone)]
pub struct DeployArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Local build output to publish
    #[arg(long, env = "INPUT_SOURCE-DIRECTORY")]
    pub source_directory: Option<PathBuf>,

    /// Delete remote objects that no longer exist locally
    #[arg(long, env = "INPUT_DELETE-DESTINATION", value_parser = FalseyValueParser::new())]
    pub delete_destination: bool,

    /// Number this release and back up its entry points
    #[arg(long, env = "INPUT_VERSION-DEPLOYMENT", value_parser = FalseyValueParser::new())]
    pub version_deployment: bool,

    #[command(flatten)]
    pub versioning: VersionArgs,
}

/// Inputs of `rollback`.
#[derive(Args, Debug, Clone)]
pub struct RollbackArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Release number to restore
    #[arg(long, env = "INPUT_ROLLBACK-VERSION")]
    pub rollback_version: Option<String>,
}

/// Inputs of `action`: deploy inputs plus the rollback switch.
#[derive(Args, Debug, Clone)]
pub struct ActionArgs {
    /// Roll back instead of deploying
    #[arg(long, env = "INPUT_ROLLBACK-MODE", value_parser = FalseyValueParser::new())]
    pub rollback_mode: bool,

    /// Release number to restore in rollback mode
    #[arg(long, env = "INPUT_ROLLBACK-VERSION")]
    pub rollback_version: Option<String>,

    #[command(flatten)]
    pub deploy: DeployArgs,
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
///
/// Settings are loaded lazily so `completions` and `account` work without a
/// readable config file.
pub fn execute(command: Command, config: Option<PathBuf>) -> Result<()> {
    use Command::*;

    match command {
        Deploy(args) => deploy::execute(args, &Settings::load(config.as_deref())?),
        Rollback(args) => rollback::execute(args, &Settings::load(config.as_deref())?),
        Action(args) => action::execute(args, &Settings::load(config.as_deref())?),
        NextVersion(args) => next_version::execute(args, &Settings::load(config.as_deref())?),
        Account {
            region,
            environment,
        } => account::execute(region.as_deref(), environment.as_deref()),
        Completions { shell } => completions::execute(shell),
    }
}
