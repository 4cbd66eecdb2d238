//! Storage account naming.

use crate::core::constants::{ACCOUNT_PREFIX, MAX_ACCOUNT_NAME_LEN};
use crate::core::domain::{Environment, Region};

/// Storage account name for a region and environment.
///
/// `leanix<region><env>`, falling back to the region's short code when the
/// full name would exceed Azure's 24 character limit.
pub fn storage_account_name(region: Region, environment: Environment) -> String {
    let primary = format!("{}{}{}", ACCOUNT_PREFIX, region.name(), environment);
    if primary.len() <= MAX_ACCOUNT_NAME_LEN {
        return primary;
    }
    format!("{}{}{}", ACCOUNT_PREFIX, region.short_code(), environment)
}
