//! mfdeploy - versioned microfrontend deployments to Azure storage.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── deploy        # Publish a build to every selected region
//! │   ├── rollback      # Restore entry points from a release
//! │   ├── action        # GitHub Actions entry point (INPUT_* variables)
//! │   ├── next_version  # Run the version tagger alone
//! │   ├── account       # Print storage account names
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # .mfdeploy.toml + environment snapshot
//!     ├── domain/       # Region, Environment, TrackedFiles, Release
//!     ├── naming        # Storage account names
//!     ├── process       # Typed external command runner
//!     ├── remote/       # Remote trait and the az/azcopy backend
//!     ├── version       # Tag-based release numbering
//!     ├── git           # Git tag store
//!     ├── deploy        # Publish to one account
//!     ├── rollback      # Restore one account
//!     └── fanout        # Sequential region iteration
//! ```
//!
//! # Features
//!
//! - Blob sync with optional deletion, file-share mirroring
//! - Monotonic release numbers stored as git tags
//! - Versioned backups of entry points and per-file rollback
//! - Injectable remote and tag store for testing

pub mod cli;
pub mod core;
pub mod error;
