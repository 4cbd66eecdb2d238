//! Input validation for mfdeploy operations.
//!
//! Validates environments, regions, labels and other user inputs. All of
//! these run before any remote call is made.

use crate::core::domain::{Environment, Region};
use crate::error::{ConfigError, Result};

/// Validate an environment name.
///
/// # Errors
///
/// Returns `ConfigError::UnknownEnvironment` for anything but `test` or `prod`.
pub fn validate_environment(environment: &str) -> Result<Environment> {
    environment.parse()
}

/// Validate an optional region filter.
///
/// An empty value selects every region and yields `None`.
///
/// # Errors
///
/// Returns `ConfigError::UnknownRegion` if a non-empty name is not in the
/// region list.
pub fn validate_region(region: &str) -> Result<Option<Region>> {
    if region.is_empty() {
        return Ok(None);
    }
    Region::find(region)
        .map(Some)
        .ok_or_else(|| ConfigError::UnknownRegion(region.to_string()).into())
}

/// Validate a microfrontend label used inside version tags.
///
/// Labels may be empty. Otherwise only ASCII letters, digits, `_`, `-` and
/// `.` are allowed, and dots may not lead, trail or repeat, so the resulting
/// tag is a valid git ref.
///
/// # Errors
///
/// Returns `ConfigError::InvalidLabel` if the label has other characters.
pub fn validate_label(label: &str) -> Result<()> {
    let allowed = label
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    let dots_ok = !label.starts_with('.') && !label.ends_with('.') && !label.contains("..");
    if allowed && dots_ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidLabel(label.to_string()).into())
    }
}

/// Parse the version number given for a rollback.
///
/// # Errors
///
/// Returns `ConfigError::InvalidVersion` unless the value is a positive integer.
pub fn parse_version(version: &str) -> Result<u64> {
    match version.trim().parse::<u64>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(ConfigError::InvalidVersion(version.to_string()).into()),
    }
}

/// Require a non-empty input value.
///
/// # Errors
///
/// Returns `ConfigError::MissingInput` naming the input when it is absent or blank.
pub fn require<'a>(value: Option<&'a str>, input: &'static str) -> Result<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::MissingInput(input).into()),
    }
}
