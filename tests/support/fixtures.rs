//! Test fixtures and constants.

/// Container used across deploy and rollback tests.
pub const CONTAINER: &str = "checkout";

/// Storage account of eastus/test.
pub const ACCOUNT: &str = "leanixeastustest";

/// A build with both entry points and some assets.
pub const BUILD_V3: &[(&str, &str)] = &[
    ("index.html", "<html>release 3</html>"),
    ("main.js", "console.log('release 3');"),
    ("assets/logo.svg", "<svg/>"),
];

/// The following release, with different entry points.
pub const BUILD_V4: &[(&str, &str)] = &[
    ("index.html", "<html>release 4</html>"),
    ("main.js", "console.log('release 4');"),
    ("assets/logo.svg", "<svg/>"),
];

/// Config pointing at tools that cannot exist.
pub const MISSING_TOOLS_CONFIG: &str = "[tools]\naz = \"mfdeploy-missing-az\"\nazcopy = \"mfdeploy-missing-azcopy\"\ngit = \"mfdeploy-missing-git\"\n";
