//! Localized resources for the Hoshi bot.
//!
//! The crate is split into three cooperating parts:
//!
//! - [`ResourceStore`] holds one flattened [`ResourceValue`] table per locale
//!   and answers lookups, falling back to the default locale.
//! - [`Templater`] substitutes `{TOKEN}` placeholders and formats lists,
//!   numbers and dates per locale.
//! - [`AutocompleteIndex`] searches `<db key>.search` entries for autocomplete
//!   and resolves a selection to its `<db key>.content.<id>` value.
//!
//! [`L10n`] bundles all three around one shared store. Construct it once at
//! startup and pass it to whatever needs it.
//!
//! The [`compile`] module implements the offline step that turns nested
//! per-locale source files into the single resource file the store loads.

use std::path::PathBuf;
use std::sync::Arc;

pub mod compile;
mod error;
pub mod format;
mod key;
pub mod search;
mod store;
mod template;
mod value;

pub use error::{InvalidKey, ResourceLoadError};
pub use key::ResourceKey;
pub use search::{AutocompleteIndex, MatchType, Resolved, SearchEntry, SearchMatch};
pub use store::{ResourceFile, ResourceStore, Resources};
pub use template::{Arg, Templater};
pub use value::ResourceValue;

/// The localization service.
///
/// Cloning is cheap; every clone shares the same [`ResourceStore`], so a
/// reload through any of them is visible to all.
#[derive(Debug, Clone)]
pub struct L10n {
    store: Arc<ResourceStore>,
    templater: Templater,
    autocomplete: AutocompleteIndex,
}

impl L10n {
    /// Loads the resource file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid resource
    /// file. See [`ResourceStore::load`].
    pub fn load(
        path: impl Into<PathBuf>,
        default_locale: impl Into<String>,
    ) -> Result<Self, ResourceLoadError> {
        ResourceStore::load(path, default_locale).map(Self::new)
    }

    /// Wraps an existing store.
    #[must_use]
    pub fn new(store: ResourceStore) -> Self {
        let store = Arc::new(store);
        Self {
            templater: Templater::new(Arc::clone(&store)),
            autocomplete: AutocompleteIndex::new(Arc::clone(&store)),
            store,
        }
    }

    /// The shared resource store.
    #[must_use]
    pub fn store(&self) -> &ResourceStore {
        &self.store
    }

    /// The templater over the shared store.
    #[must_use]
    pub fn templater(&self) -> &Templater {
        &self.templater
    }

    /// The autocomplete index over the shared store.
    #[must_use]
    pub fn autocomplete(&self) -> &AutocompleteIndex {
        &self.autocomplete
    }
}
