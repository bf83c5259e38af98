use std::sync::OnceLock;

use regex::Regex;

pub const NAME: &str = "cloudtrail-cli";

/// Git description injected at build time (`git describe --tags`).
pub const GIT_VERSION: Option<&str> = option_env!("CLOUDTRAIL_CLI_GIT_VERSION");

/// Toolchain used for the build.
pub const RUSTC_VERSION: Option<&str> = option_env!("CLOUDTRAIL_CLI_RUSTC_VERSION");

pub const BUILD_TIME: Option<&str> = option_env!("CLOUDTRAIL_CLI_BUILD_TIME");

/// Version of the running binary, from Cargo.toml.
pub fn current_version() -> semver::Version {
    semver::Version::parse(env!("CARGO_PKG_VERSION"))
        .unwrap_or_else(|_| semver::Version::new(0, 0, 0))
}

fn release_tag_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"v[0-9]+\.[0-9]+\.[0-9]+").ok())
        .as_ref()
}

/// The `vX.Y.Z` tag embedded in a git description, if there is one.
pub fn release_tag(git_version: &str) -> Option<&str> {
    release_tag_pattern()?.find(git_version).map(|m| m.as_str())
}

/// Display version: the git tag when available, else the package version.
pub fn display_version() -> String {
    GIT_VERSION
        .and_then(release_tag)
        .map(str::to_string)
        .unwrap_or_else(|| format!("v{}", current_version()))
}
