//! mfdeploy - versioned microfrontend deployments to Azure storage.

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mfdeploy::cli::output;
use mfdeploy::cli::{execute, Cli};
use mfdeploy::error::{ConfigError, Error, RemoteError, VersionError};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => usage_error(e),
    };

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("MFDEPLOY_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("mfdeploy=debug")
        } else {
            EnvFilter::new("mfdeploy=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .init();

    if let Err(e) = execute(cli.command, cli.config) {
        let error_msg = e.to_string();
        let suggestion = match &e {
            Error::Config(ConfigError::ToolNotFound(_)) => {
                Some("install the Azure CLI and azcopy, or set their paths in .mfdeploy.toml")
            }
            Error::Config(ConfigError::ContainerMismatch { .. }) => {
                Some("the container must be named after the repository")
            }
            Error::Config(ConfigError::InvalidLabel(_)) => {
                Some("labels may use letters, digits, '_', '-' and single inner dots")
            }
            Error::Version(VersionError::EmptyBranch) => {
                Some("pass --branch or set the branch (or branch-name) action input")
            }
            Error::Version(VersionError::CorruptTag(_)) => {
                Some("delete or rename the malformed tag on the remote")
            }
            Error::Remote(RemoteError::Timeout { .. }) => {
                Some("raise deploy.timeout_secs in .mfdeploy.toml")
            }
            Error::NothingDone(_) => {
                Some("check that the storage accounts and container exist for this environment")
            }
            _ => None,
        };

        fail(&error_msg, suggestion);
    }
}

/// Report a failure and exit 1.
fn fail(msg: &str, hint: Option<&str>) -> ! {
    if std::env::var("GITHUB_ACTIONS").as_deref() == Ok("true") {
        output::annotate_error(msg);
    }
    output::error(msg);
    if let Some(hint) = hint {
        output::hint(hint);
    }
    std::process::exit(1);
}

/// Exit on a command-line parse failure. Only `--help` and `--version`
/// exit successfully; every other outcome is a plain failure.
fn usage_error(e: clap::Error) -> ! {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
        ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            eprint!("{}", e.render());
            std::process::exit(1);
        }
        _ => {
            let rendered = e.render().to_string();
            let mut lines = rendered.lines();
            let message = lines
                .next()
                .unwrap_or_default()
                .trim_start_matches("error: ")
                .to_string();
            for line in lines.filter(|l| !l.trim().is_empty()) {
                eprintln!("{}", line);
            }
            fail(&message, None)
        }
    }
}
