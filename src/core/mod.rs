//! Core library components.
//!
//! This module contains the reusable deployment logic: naming, version
//! tagging, deploy and rollback, plus the seams (`Remote`, `TagStore`) that
//! isolate them from the external tools.

pub mod config;
pub mod constants;
pub mod deploy;
pub mod domain;
pub mod fanout;
pub mod git;
pub mod naming;
pub mod process;
pub mod remote;
pub mod rollback;
pub mod validation;
pub mod version;
