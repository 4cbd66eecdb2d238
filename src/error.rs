//! Error types for mfdeploy.
//!
//! Errors are grouped by where they come from: bad inputs (`ConfigError`),
//! external tools (`RemoteError`) and the tag ledger (`VersionError`).

use thiserror::Error;

/// Top-level error returned by every fallible operation.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Version(#[from] VersionError),

    /// No region accepted the operation.
    #[error("no region accepted the {0}")]
    NothingDone(&'static str),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Invalid or missing inputs. Always raised before any remote call.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown environment '{0}', must be 'test' or 'prod'")]
    UnknownEnvironment(String),

    #[error("unknown region '{0}'")]
    UnknownRegion(String),

    #[error("missing required input: {0}")]
    MissingInput(&'static str),

    #[error("container '{container}' does not match repository '{repository}'")]
    ContainerMismatch {
        container: String,
        repository: String,
    },

    #[error("invalid rollback version '{0}', expected a positive integer")]
    InvalidVersion(String),

    #[error("invalid microfrontend label '{0}'")]
    InvalidLabel(String),

    #[error("source directory not found: {0}")]
    SourceNotFound(String),

    #[error("required tool not found on PATH: {0}")]
    ToolNotFound(String),

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Failures talking to `az`, `azcopy` or `git`.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} timed out after {secs}s")]
    Timeout { program: String, secs: u64 },

    #[error("command failed ({}): {command}\n{stderr}", code.map(|c| c.to_string()).unwrap_or_else(|| "signal".to_string()))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("unexpected output from {what}: {source}")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Problems with the version tag ledger.
#[derive(Error, Debug)]
pub enum VersionError {
    #[error("branch name is required for versioned deployments")]
    EmptyBranch,

    #[error("corrupt version tag '{0}'")]
    CorruptTag(String),
}

pub type Result<T> = std::result::Result<T, Error>;
