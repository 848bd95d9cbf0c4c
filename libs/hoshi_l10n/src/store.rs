use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ResourceLoadError;
use crate::key::ResourceKey;
use crate::search::SearchEntry;
use crate::value::ResourceValue;

/// The on-disk shape of the pre-built resource file.
///
/// Besides `version` and `locales`, every top-level key names a locale and
/// holds that locale's flattened table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceFile {
    /// Version stamp of the build that produced this file.
    pub version: String,
    /// The locales present in this file, in manifest order.
    pub locales: Vec<String>,
    /// The locale tables by locale code.
    #[serde(flatten)]
    pub tables: IndexMap<String, serde_json::Value>,
}

/// One fully loaded set of resource tables.
///
/// This is an immutable snapshot. [`ResourceStore::reload`] builds a new one
/// and swaps it in; it never modifies an existing one.
#[derive(Debug)]
pub struct Resources {
    version: String,
    default_locale: String,
    locales: Vec<String>,
    tables: HashMap<String, LocaleTable>,
}

#[derive(Debug, Default)]
struct LocaleTable {
    values: HashMap<ResourceKey, ResourceValue>,
    /// Search entries by db key, i.e. without the trailing `.search`.
    search: HashMap<ResourceKey, Vec<SearchEntry>>,
}

impl Resources {
    /// Parses the text of a resource file.
    ///
    /// # Errors
    ///
    /// Returns an error if the text isn't a valid resource file or it doesn't
    /// include the default locale.
    pub fn parse(text: &str, default_locale: &str) -> Result<Self, ResourceLoadError> {
        let file: ResourceFile = serde_json::from_str(text).map_err(ResourceLoadError::Parse)?;
        Self::from_file(file, default_locale)
    }

    /// Builds the resources from an already parsed file.
    ///
    /// # Errors
    ///
    /// Returns an error if a manifest locale has no valid table, a key is
    /// invalid, or the default locale is missing from the manifest.
    pub fn from_file(mut file: ResourceFile, default_locale: &str) -> Result<Self, ResourceLoadError> {
        if !file.locales.iter().any(|l| l == default_locale) {
            return Err(ResourceLoadError::MissingDefaultLocale(default_locale.to_owned()));
        }

        let mut locales = Vec::with_capacity(file.locales.len());
        let mut tables = HashMap::with_capacity(file.locales.len());

        for locale in file.locales {
            if tables.contains_key(&locale) {
                log::warn!("Locale `{locale}` is listed in the resource manifest twice.");
                continue;
            }

            let raw = file
                .tables
                .shift_remove(&locale)
                .ok_or_else(|| ResourceLoadError::MissingLocaleTable(locale.clone()))?;

            let table = LocaleTable::build(&locale, raw)?;
            tables.insert(locale.clone(), table);
            locales.push(locale);
        }

        for locale in file.tables.keys() {
            log::warn!("Resource table `{locale}` is not listed in the manifest and is ignored.");
        }

        Ok(Self {
            version: file.version,
            default_locale: default_locale.to_owned(),
            locales,
            tables,
        })
    }

    /// The version stamp of the loaded file.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The loaded locales in manifest order.
    #[must_use]
    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    /// The locale used when a key is missing in the requested one.
    #[must_use]
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Whether `locale` has a table.
    #[must_use]
    pub fn has_locale(&self, locale: &str) -> bool {
        self.tables.contains_key(locale)
    }

    /// The amount of keys in the given locale, not counting fallbacks.
    #[must_use]
    pub fn key_count(&self, locale: &str) -> usize {
        self.tables.get(locale).map_or(0, |t| t.values.len())
    }

    /// Gets a value from `locale`, falling back to the default locale.
    #[must_use]
    pub fn get(&self, locale: &str, key: &ResourceKey) -> Option<&ResourceValue> {
        self.get_exact(locale, key).or_else(|| self.get_exact(&self.default_locale, key))
    }

    /// Gets a value from exactly `locale`, without fallback.
    #[must_use]
    pub fn get_exact(&self, locale: &str, key: &ResourceKey) -> Option<&ResourceValue> {
        self.tables.get(locale)?.values.get(key.as_str())
    }

    /// Gets every locale's non-empty value for `key`, in manifest order.
    #[must_use]
    pub fn get_all_localizations(&self, key: &ResourceKey) -> IndexMap<&str, &ResourceValue> {
        self.locales
            .iter()
            .filter_map(|locale| {
                let value = self.get_exact(locale, key)?;
                (!value.is_empty()).then_some((locale.as_str(), value))
            })
            .collect()
    }

    /// Gets the search entries for `db_key` in exactly `locale`.
    #[must_use]
    pub fn search_entries(&self, locale: &str, db_key: &ResourceKey) -> &[SearchEntry] {
        self.tables
            .get(locale)
            .and_then(|t| t.search.get(db_key.as_str()))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl LocaleTable {
    fn build(locale: &str, raw: serde_json::Value) -> Result<Self, ResourceLoadError> {
        let raw: IndexMap<String, ResourceValue> = serde_json::from_value(raw)
            .map_err(|source| ResourceLoadError::ParseTable {
                locale: locale.to_owned(),
                source,
            })?;

        let mut this = Self {
            values: HashMap::with_capacity(raw.len()),
            search: HashMap::new(),
        };

        for (key, value) in raw {
            let key = ResourceKey::try_from(key).map_err(|source| ResourceLoadError::InvalidKey {
                locale: locale.to_owned(),
                source,
            })?;

            if key.last_segment() == "search" {
                if let (Some(db_key), Some(list)) = (key.parent(), value.as_list()) {
                    let entries = parse_search_entries(locale, &key, list);
                    this.search.insert(db_key, entries);
                }
            }

            this.values.insert(key, value);
        }

        Ok(this)
    }
}

fn parse_search_entries(locale: &str, key: &ResourceKey, list: &[ResourceValue]) -> Vec<SearchEntry> {
    list.iter()
        .enumerate()
        .filter_map(|(index, value)| {
            SearchEntry::from_value(value)
                .inspect_err(|why| {
                    log::warn!("Skipping search entry {index} of `{key}` in `{locale}`: {why}");
                })
                .ok()
        })
        .collect()
}

/// Holds the current [`Resources`] snapshot and reloads it on request.
///
/// Readers always observe one complete snapshot: a reload only swaps the
/// reference once the replacement has fully loaded.
#[derive(Debug)]
pub struct ResourceStore {
    path: Option<PathBuf>,
    default_locale: String,
    current: ArcSwap<Resources>,
}

impl ResourceStore {
    /// Loads the resource file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or invalid.
    pub fn load(
        path: impl Into<PathBuf>,
        default_locale: impl Into<String>,
    ) -> Result<Self, ResourceLoadError> {
        let path = path.into();
        let default_locale = default_locale.into();
        let resources = read_resources(&path, &default_locale)?;

        Ok(Self {
            path: Some(path),
            default_locale,
            current: ArcSwap::from_pointee(resources),
        })
    }

    /// Creates a store over already built resources.
    ///
    /// Such a store has no file to [`reload`](Self::reload) from, but new
    /// resources can still be installed with [`replace`](Self::replace).
    #[must_use]
    pub fn with_resources(resources: Resources) -> Self {
        Self {
            path: None,
            default_locale: resources.default_locale.clone(),
            current: ArcSwap::from_pointee(resources),
        }
    }

    /// Discards the current tables and loads the file again.
    ///
    /// On failure, the previous tables stay in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or invalid, or if
    /// this store wasn't loaded from a file.
    pub fn reload(&self) -> Result<(), ResourceLoadError> {
        let path = self.path.as_deref().ok_or(ResourceLoadError::NoSource)?;
        let resources = read_resources(path, &self.default_locale)?;
        self.replace(resources);
        Ok(())
    }

    /// Installs new resources, replacing the current snapshot.
    pub fn replace(&self, resources: Resources) {
        self.current.store(Arc::new(resources));
    }

    /// Gets the current snapshot.
    ///
    /// Use this when several lookups must see the same tables.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Resources> {
        self.current.load_full()
    }

    /// Gets a value from `locale`, falling back to the default locale.
    #[must_use]
    pub fn get(&self, locale: &str, key: &ResourceKey) -> Option<ResourceValue> {
        self.current.load().get(locale, key).cloned()
    }

    /// Gets a string value from `locale`, falling back to the default locale.
    ///
    /// Non-string values are treated as absent.
    #[must_use]
    pub fn get_str(&self, locale: &str, key: &ResourceKey) -> Option<String> {
        self.current
            .load()
            .get(locale, key)
            .and_then(ResourceValue::as_str)
            .map(str::to_owned)
    }

    /// Gets every locale's non-empty value for `key`, in manifest order.
    #[must_use]
    pub fn get_all_localizations(&self, key: &ResourceKey) -> IndexMap<String, ResourceValue> {
        self.current
            .load()
            .get_all_localizations(key)
            .into_iter()
            .map(|(locale, value)| (locale.to_owned(), value.clone()))
            .collect()
    }

    /// The version stamp of the current snapshot.
    #[must_use]
    pub fn version(&self) -> String {
        self.current.load().version.clone()
    }

    /// The locales of the current snapshot.
    #[must_use]
    pub fn locales(&self) -> Vec<String> {
        self.current.load().locales.clone()
    }

    /// The default locale.
    #[must_use]
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }
}

fn read_resources(path: &Path, default_locale: &str) -> Result<Resources, ResourceLoadError> {
    let text = fs::read_to_string(path).map_err(|source| ResourceLoadError::Read {
        path: path.to_owned(),
        source,
    })?;

    let resources = Resources::parse(&text, default_locale)?;
    log::info!(
        "Loaded resources v{} from {path:?} with locales [{}].",
        resources.version,
        resources.locales.join(", "),
    );

    Ok(resources)
}
