//! Deployment regions and environments.

use std::fmt;
use std::str::FromStr;

use crate::core::constants;
use crate::error::{ConfigError, Error};

/// An Azure region mfdeploy can publish to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    name: &'static str,
    short_code: &'static str,
}

impl Region {
    /// All regions, in deployment order.
    pub fn all() -> impl Iterator<Item = Region> {
        constants::REGIONS
            .iter()
            .map(|&(name, short_code)| Region { name, short_code })
    }

    /// Look up a region by its full name (e.g. `westeurope`).
    pub fn find(name: &str) -> Option<Region> {
        Self::all().find(|r| r.name == name)
    }

    /// Full Azure region name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Two-letter code used when the full name makes an account name too long.
    pub fn short_code(&self) -> &'static str {
        self.short_code
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Deployment tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Test,
    Prod,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::Prod => "prod",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "test" => Ok(Self::Test),
            "prod" => Ok(Self::Prod),
            other => Err(ConfigError::UnknownEnvironment(other.to_string()).into()),
        }
    }
}
