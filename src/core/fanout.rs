//! Sequential iteration over deployment regions.

use tracing::info;

use crate::core::domain::{Environment, Region};
use crate::core::naming::storage_account_name;
use crate::error::{Error, Result};

/// Run `f` for each selected region, in region order, one at a time.
///
/// `f` receives the region and its storage account name and reports whether
/// it did anything there. Regions other than `selected` are skipped.
///
/// # Errors
///
/// Propagates the first error from `f`, and returns `Error::NothingDone`
/// when no region reported `true`.
pub fn for_each_region<F>(
    selected: Option<Region>,
    environment: Environment,
    action: &'static str,
    mut f: F,
) -> Result<Vec<Region>>
where
    F: FnMut(Region, &str) -> Result<bool>,
{
    let mut done = Vec::new();
    for region in Region::all() {
        if selected.is_some_and(|s| s != region) {
            info!(region = %region, "not selected, skipping");
            continue;
        }
        let account = storage_account_name(region, environment);
        if f(region, &account)? {
            done.push(region);
        }
    }

    if done.is_empty() {
        return Err(Error::NothingDone(action));
    }
    Ok(done)
}
