//! Account command - print storage account names.

use crate::cli::output;
use crate::core::domain::{Environment, Region};
use crate::core::naming::storage_account_name;
use crate::core::validation;
use crate::error::Result;

/// Print `<region> <account>` for each selected region.
pub fn execute(region: Option<&str>, environment: Option<&str>) -> Result<()> {
    let environment = match environment.map(str::trim).filter(|e| !e.is_empty()) {
        Some(env) => validation::validate_environment(env)?,
        None => Environment::default(),
    };
    let selected = validation::validate_region(region.map(str::trim).unwrap_or(""))?;

    for region in Region::all().filter(|r| selected.map_or(true, |s| s == *r)) {
        println!(
            "{:<20} {}",
            region.name(),
            output::account(&storage_account_name(region, environment))
        );
    }
    Ok(())
}
