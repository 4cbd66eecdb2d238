//! Release numbering from git tags.
//!
//! Tags named `VERSION-[<MFE>-]<BRANCH>-<N>` are the only persistent record
//! of past releases. A run reuses the number of a tag already on the current
//! commit; otherwise it takes the highest existing number plus one (or 1),
//! tags the commit and pushes that single tag.

use tracing::{debug, info};

use crate::core::constants::TAG_PREFIX;
use crate::core::domain::Release;
use crate::core::validation;
use crate::error::{Result, VersionError};

/// Access to the tag namespace of a repository.
pub trait TagStore {
    /// Fetch tags from the remote so other runs' tags are visible.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the fetch fails.
    fn fetch(&self) -> Result<()>;

    /// Tags starting with `prefix` that point at the current commit.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if tags cannot be listed.
    fn tags_at_head(&self, prefix: &str) -> Result<Vec<String>>;

    /// All tags starting with `prefix`.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if tags cannot be listed.
    fn tags(&self, prefix: &str) -> Result<Vec<String>>;

    /// Create `tag` on the current commit.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the tag cannot be created.
    fn create(&self, tag: &str) -> Result<()>;

    /// Push `tag`, and nothing else, to the remote.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the push fails.
    fn push(&self, tag: &str) -> Result<()>;
}

/// Replace each run of non-word characters with `-` and uppercase.
///
/// `feature/login page` becomes `FEATURE-LOGIN-PAGE`.
pub fn normalize_branch(branch: &str) -> String {
    let mut out = String::with_capacity(branch.len());
    let mut in_run = false;
    for ch in branch.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            out.push(ch.to_ascii_uppercase());
            in_run = false;
        } else if !in_run {
            out.push('-');
            in_run = true;
        }
    }
    out
}

/// Tag prefix for a branch and optional microfrontend label.
///
/// # Errors
///
/// Returns `VersionError::EmptyBranch` for an empty branch and
/// `ConfigError::InvalidLabel` for a label that cannot appear in a tag.
pub fn tag_prefix(branch: &str, microfrontend: &str) -> Result<String> {
    if branch.trim().is_empty() {
        return Err(VersionError::EmptyBranch.into());
    }
    validation::validate_label(microfrontend)?;

    let mut prefix = String::from(TAG_PREFIX);
    if !microfrontend.is_empty() {
        prefix.push_str(&microfrontend.to_ascii_uppercase());
        prefix.push('-');
    }
    prefix.push_str(&normalize_branch(branch));
    prefix.push('-');
    Ok(prefix)
}

/// Version number carried by `tag`, if it belongs to `prefix`.
///
/// Returns `Ok(None)` for tags of a longer branch name that happens to share
/// the prefix (`VERSION-MAIN-` vs `VERSION-MAIN-FIX-1`).
///
/// # Errors
///
/// Returns `VersionError::CorruptTag` when the suffix cannot be a version
/// or belong to another branch.
pub fn parse_version(prefix: &str, tag: &str) -> Result<Option<u64>> {
    let Some(suffix) = tag.strip_prefix(prefix) else {
        return Ok(None);
    };
    let corrupt = || VersionError::CorruptTag(tag.to_string());

    if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) {
        return suffix.parse::<u64>().map(Some).map_err(|_| corrupt().into());
    }
    let other_branch = suffix.contains('-')
        && suffix
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_' || b == b'-');
    if other_branch {
        return Ok(None);
    }
    Err(corrupt().into())
}

/// Highest version among `tags` for `prefix`.
fn highest(prefix: &str, tags: &[String]) -> Result<Option<u64>> {
    let mut max = None;
    for tag in tags {
        match parse_version(prefix, tag)? {
            Some(v) => max = max.max(Some(v)),
            None => debug!(tag = %tag, "ignoring tag of another branch"),
        }
    }
    Ok(max)
}

/// Compute the release number for this run, tagging the commit if needed.
///
/// # Errors
///
/// Returns `VersionError` for an empty branch or corrupt tags, and
/// `RemoteError` if git fails.
pub fn next_version(store: &dyn TagStore, branch: &str, microfrontend: &str) -> Result<Release> {
    let prefix = tag_prefix(branch, microfrontend)?;
    store.fetch()?;

    if let Some(version) = highest(&prefix, &store.tags_at_head(&prefix)?)? {
        let tag = format!("{}{}", prefix, version);
        info!(tag = %tag, "commit already tagged");
        return Ok(Release {
            version,
            tag,
            created: false,
        });
    }

    let version = match highest(&prefix, &store.tags(&prefix)?)? {
        Some(v) => v.checked_add(1).ok_or_else(|| {
            VersionError::CorruptTag(format!("{}{}", prefix, v))
        })?,
        None => 1,
    };

    let tag = format!("{}{}", prefix, version);
    store.create(&tag)?;
    store.push(&tag)?;
    info!(tag = %tag, "created version tag");

    Ok(Release {
        version,
        tag,
        created: true,
    })
}
