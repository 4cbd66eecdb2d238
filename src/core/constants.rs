//! Constants used throughout mfdeploy.
//!
//! Centralizes magic strings and configuration values.

/// Optional configuration file name (.mfdeploy.toml).
pub const CONFIG_FILE: &str = ".mfdeploy.toml";

/// Prefix shared by every storage account name.
pub const ACCOUNT_PREFIX: &str = "leanix";

/// Azure's upper bound on storage account name length.
pub const MAX_ACCOUNT_NAME_LEN: usize = 24;

/// Regions in deployment order, as `(name, short code)`.
pub const REGIONS: &[(&str, &str)] = &[
    ("westeurope", "eu"),
    ("eastus", "us"),
    ("canadacentral", "ca"),
    ("australiaeast", "au"),
    ("germanywestcentral", "de"),
];

/// Entry points that receive a versioned backup on every versioned deploy.
pub const TRACKED_FILES: &[&str] = &[
    "index.html",
    "main.js",
    "polyfills.js",
    "styles.css",
    "logout.html",
];

/// Every version tag starts with this.
pub const TAG_PREFIX: &str = "VERSION-";

/// Default file share mirrored alongside blob storage.
pub const DEFAULT_FILE_SHARE: &str = "microfrontends";

/// Default git remote that version tags are fetched from and pushed to.
pub const DEFAULT_TAG_REMOTE: &str = "origin";

/// Default timeout for a single external command (30 minutes).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30 * 60;

/// Lifetime of an issued SAS token, in hours.
pub const SAS_VALIDITY_HOURS: i64 = 2;

/// SAS permissions: read, add, create, write.
pub const SAS_PERMISSIONS: &str = "racw";

/// Environment variable azcopy reads the service principal secret from.
pub const AZCOPY_SECRET_VAR: &str = "AZCOPY_SPA_CLIENT_SECRET";
