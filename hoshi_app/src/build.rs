//! Constants describing the build.

/// The package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The commit the binary was built from, or `<unknown>` if git wasn't
/// available to the build script. Display only.
pub const GIT_HASH: &str = match option_env!("GIT_HASH") {
    Some(hash) => hash,
    None => "<unknown>",
};
