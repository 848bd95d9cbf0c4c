use std::io;
use std::path::PathBuf;

/// Failure to load or reload the resource file.
///
/// This is the only error the localization core raises at runtime. Lookups
/// never fail; absent content is an empty result instead.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ResourceLoadError {
    /// The resource file could not be read.
    #[error("cannot read resource file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The file is not JSON or doesn't have the resource file shape.
    #[error("resource file is invalid")]
    Parse(#[source] serde_json::Error),
    /// A locale table doesn't have the expected shape.
    #[error("resource table for locale `{locale}` is invalid")]
    ParseTable {
        locale: String,
        #[source]
        source: serde_json::Error,
    },
    /// The manifest lists a locale that has no table.
    #[error("locale `{0}` is listed in the manifest but has no table")]
    MissingLocaleTable(String),
    /// The default locale is not part of the manifest.
    #[error("default locale `{0}` is not listed in the manifest")]
    MissingDefaultLocale(String),
    /// A table contains a key that isn't a valid [`ResourceKey`].
    ///
    /// [`ResourceKey`]: crate::ResourceKey
    #[error("resource table for locale `{locale}` has an invalid key")]
    InvalidKey {
        locale: String,
        #[source]
        source: InvalidKey,
    },
    /// [`reload`](crate::ResourceStore::reload) was called on a store that
    /// wasn't loaded from a file.
    #[error("resource store has no file to reload from")]
    NoSource,
}

/// A string that is not a valid [`ResourceKey`](crate::ResourceKey).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid resource key {key:?}: {reason}")]
pub struct InvalidKey {
    pub(crate) key: String,
    pub(crate) reason: &'static str,
}

impl InvalidKey {
    /// The rejected key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Why the key was rejected.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        self.reason
    }
}
