//! Entry-point files that receive versioned backups.
//!
//! A tracked file `index.html` deployed as version 3 gets a sibling copy
//! `index_3.html`. Rollback copies that sibling back over the live name.

use crate::core::constants;

/// One tracked file, resolved against the configured path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedFile {
    dir: String,
    stem: String,
    ext: String,
}

impl TrackedFile {
    fn new(dir: &str, name: &str) -> Self {
        let (stem, ext) = split_name(name);
        Self {
            dir: dir.to_string(),
            stem: stem.to_string(),
            ext: ext.to_string(),
        }
    }

    /// Relative path of the live object, e.g. `app/index.html`.
    pub fn live_path(&self) -> String {
        format!("{}{}{}", self.dir, self.stem, self.ext)
    }

    /// Relative path of the backup for `version`, e.g. `app/index_3.html`.
    pub fn backup_path(&self, version: u64) -> String {
        format!("{}{}_{}{}", self.dir, self.stem, version, self.ext)
    }

    fn matches_backup(&self, path: &str) -> bool {
        let Some(rest) = path
            .strip_prefix(self.dir.as_str())
            .and_then(|p| p.strip_prefix(self.stem.as_str()))
            .and_then(|p| p.strip_prefix('_'))
            .and_then(|p| p.strip_suffix(self.ext.as_str()))
        else {
            return false;
        };
        !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit())
    }

    fn backup_regex(&self) -> String {
        format!(
            "{}{}_[0-9]+{}",
            escape_regex(&self.dir),
            escape_regex(&self.stem),
            escape_regex(&self.ext)
        )
    }
}

/// The set of tracked files for one deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedFiles {
    files: Vec<TrackedFile>,
}

impl TrackedFiles {
    /// The standard web-bundle entry points under `prefix`.
    pub fn new(prefix: &str) -> Self {
        Self::with_names(prefix, constants::TRACKED_FILES)
    }

    /// An explicit set of file names under `prefix`.
    pub fn with_names(prefix: &str, names: &[&str]) -> Self {
        let dir = normalize_prefix(prefix);
        Self {
            files: names.iter().map(|n| TrackedFile::new(&dir, n)).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackedFile> {
        self.files.iter()
    }

    /// Whether a relative object path is a backup of one of the tracked files.
    pub fn is_backup(&self, path: &str) -> bool {
        self.files.iter().any(|f| f.matches_backup(path))
    }

    /// Anchored regular expression matching every backup path.
    ///
    /// Passed to `azcopy sync --exclude-regex` so a deleting sync leaves
    /// earlier backups in place.
    pub fn backup_pattern(&self) -> String {
        let alternatives: Vec<String> = self.files.iter().map(|f| f.backup_regex()).collect();
        format!("^(?:{})$", alternatives.join("|"))
    }
}

/// Split `index.html` into (`index`, `.html`). Dotfiles and names without a
/// dot have an empty extension.
fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}/", trimmed)
    }
}

fn escape_regex(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if "\\.+*?()|[]{}^$".contains(ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
