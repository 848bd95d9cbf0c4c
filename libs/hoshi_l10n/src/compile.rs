//! Builds the resource file from per-locale source files.
//!
//! Sources are JSON objects whose nesting is flattened into dotted keys:
//!
//! ```json
//! { "cmd": { "guide": { "name": "guide" } } }
//! ```
//!
//! becomes `cmd.guide.name`. An object under a key starting with `@` is kept
//! as a single record value instead, with the `@` removed from its key.
//! Arrays are kept as lists.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::{fs, io};

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::InvalidKey;
use crate::key::ResourceKey;
use crate::store::ResourceFile;
use crate::value::ResourceValue;

/// Failure to build the resource file.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CompileError {
    #[error("cannot read source file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("source file {path:?} is not valid json")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("source file {0:?} is not a json object")]
    NotAnObject(PathBuf),
    #[error("key `{key}` for locale `{locale}` is defined in both {first:?} and {second:?}")]
    DuplicateKey {
        locale: String,
        key: String,
        first: PathBuf,
        second: PathBuf,
    },
    #[error("key `{key}` in {path:?} has an invalid value")]
    InvalidValue {
        key: String,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid key in {path:?}")]
    InvalidKey {
        path: PathBuf,
        #[source]
        source: InvalidKey,
    },
    #[error("default locale `{0}` has no sources")]
    MissingDefaultLocale(String),
    #[error("cannot serialize the resource file")]
    Serialize(#[source] serde_json::Error),
}

#[derive(Debug)]
struct Entry {
    value: ResourceValue,
    /// Index into [`Compiler::origins`].
    origin: usize,
}

/// Collects sources per locale and merges them into a [`ResourceFile`].
#[derive(Debug)]
pub struct Compiler {
    default_locale: String,
    origins: Vec<PathBuf>,
    locales: BTreeMap<String, IndexMap<String, Entry>>,
}

impl Compiler {
    #[must_use]
    pub fn new(default_locale: impl Into<String>) -> Self {
        Self {
            default_locale: default_locale.into(),
            origins: Vec::new(),
            locales: BTreeMap::new(),
        }
    }

    /// The locales with at least one source, sorted.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    /// Reads and adds one source file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or parsed, or for the same
    /// reasons as [`Compiler::add_source`].
    pub fn add_file(&mut self, locale: &str, path: &Path) -> Result<(), CompileError> {
        let text = fs::read_to_string(path).map_err(|source| CompileError::Read {
            path: path.to_owned(),
            source,
        })?;

        let value = serde_json::from_str(&text).map_err(|source| CompileError::Parse {
            path: path.to_owned(),
            source,
        })?;

        self.add_source(locale, path, value)
    }

    /// Flattens and adds one parsed source. `origin` is only used in errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the source isn't an object, it defines a key that
    /// was already defined for this locale, a key is invalid, or a value is
    /// or contains `null`.
    pub fn add_source(
        &mut self,
        locale: &str,
        origin: impl Into<PathBuf>,
        source: Value,
    ) -> Result<(), CompileError> {
        let origin = origin.into();
        let Value::Object(map) = source else {
            return Err(CompileError::NotAnObject(origin));
        };

        let origin_index = self.origins.len();
        self.origins.push(origin);

        let mut flat = Flattener {
            locale,
            origin: origin_index,
            origins: &self.origins,
            table: self.locales.entry(locale.to_owned()).or_default(),
        };

        flat.object("", map)
    }

    /// Gets the keys of the default locale each other locale lacks.
    ///
    /// Locales without missing keys are omitted.
    #[must_use]
    pub fn missing_translations(&self) -> BTreeMap<&str, Vec<&str>> {
        let Some(default) = self.locales.get(&self.default_locale) else {
            return BTreeMap::new();
        };

        self.locales
            .iter()
            .filter(|(locale, _)| **locale != self.default_locale)
            .filter_map(|(locale, table)| {
                let missing: Vec<&str> = default
                    .keys()
                    .filter(|k| !table.contains_key(*k))
                    .map(String::as_str)
                    .collect();

                (!missing.is_empty()).then_some((locale.as_str(), missing))
            })
            .collect()
    }

    /// Merges everything added so far into a resource file.
    ///
    /// Locales are sorted and each table's keys are sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the default locale has no sources.
    pub fn finish(self, version: impl Into<String>) -> Result<ResourceFile, CompileError> {
        if !self.locales.contains_key(&self.default_locale) {
            return Err(CompileError::MissingDefaultLocale(self.default_locale));
        }

        let mut locales = Vec::with_capacity(self.locales.len());
        let mut tables = IndexMap::with_capacity(self.locales.len());

        for (locale, table) in self.locales {
            let mut entries: Vec<_> = table.into_iter().collect();
            entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));

            let mut map = Map::with_capacity(entries.len());
            for (key, entry) in entries {
                let value = serde_json::to_value(entry.value).map_err(CompileError::Serialize)?;
                map.insert(key, value);
            }

            tables.insert(locale.clone(), Value::Object(map));
            locales.push(locale);
        }

        Ok(ResourceFile {
            version: version.into(),
            locales,
            tables,
        })
    }
}

/// Serializes a resource file, pretty-printed unless `minimize` is set.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(file: &ResourceFile, minimize: bool) -> Result<String, CompileError> {
    let text = if minimize {
        serde_json::to_string(file)
    } else {
        serde_json::to_string_pretty(file)
    };

    text.map_err(CompileError::Serialize)
}

struct Flattener<'a> {
    locale: &'a str,
    origin: usize,
    origins: &'a [PathBuf],
    table: &'a mut IndexMap<String, Entry>,
}

impl Flattener<'_> {
    fn path(&self, index: usize) -> PathBuf {
        self.origins.get(index).cloned().unwrap_or_default()
    }

    fn object(&mut self, prefix: &str, map: Map<String, Value>) -> Result<(), CompileError> {
        for (name, value) in map {
            let (record, name) = match name.strip_prefix('@') {
                Some(rest) => (true, rest),
                None => (false, name.as_str()),
            };

            let key = if prefix.is_empty() {
                name.to_owned()
            } else {
                format!("{prefix}.{name}")
            };

            match value {
                Value::Object(inner) if !record => self.object(&key, inner)?,
                value => self.insert(key, value)?,
            }
        }

        Ok(())
    }

    fn insert(&mut self, key: String, value: Value) -> Result<(), CompileError> {
        ResourceKey::new(&key).map_err(|source| CompileError::InvalidKey {
            path: self.path(self.origin),
            source,
        })?;

        let value: ResourceValue = serde_json::from_value(value).map_err(|source| CompileError::InvalidValue {
            key: key.clone(),
            path: self.path(self.origin),
            source,
        })?;

        if let Some(existing) = self.table.get(&key) {
            return Err(CompileError::DuplicateKey {
                locale: self.locale.to_owned(),
                key,
                first: self.path(existing.origin),
                second: self.path(self.origin),
            });
        }

        self.table.insert(key, Entry {
            value,
            origin: self.origin,
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::store::Resources;

    #[test]
    fn flattens_nesting() {
        let mut c = Compiler::new("en-US");
        c.add_source("en-US", "a.json", json!({
            "cmd": { "guide": { "name": "guide", "description": "Shows a guide." } },
            "plain": 5,
        }))
        .expect("source must be valid");

        let file = c.finish("1").expect("compile must succeed");
        assert_eq!(file.locales, ["en-US"]);
        assert_eq!(file.tables["en-US"], json!({
            "cmd.guide.description": "Shows a guide.",
            "cmd.guide.name": "guide",
            "plain": 5,
        }));
    }

    #[test]
    fn keeps_records_and_lists() {
        let mut c = Compiler::new("en-US");
        c.add_source("en-US", "guide.json", json!({
            "guide": {
                "search": [{ "id": "a", "title": "Alpha", "keywordSets": [["a"]] }],
                "content": { "@a": { "title": "Alpha", "description": "First" } },
            },
        }))
        .expect("source must be valid");

        let file = c.finish("1").expect("compile must succeed");
        let table = &file.tables["en-US"];
        assert_eq!(table["guide.content.a"], json!({ "title": "Alpha", "description": "First" }));
        assert!(table["guide.search"].is_array(), "lists must be kept");
    }

    #[test]
    fn duplicate_across_files() {
        let mut c = Compiler::new("en-US");
        c.add_source("en-US", "a.json", json!({ "x": { "y": "1" } }))
            .expect("first source must be valid");

        let err = c
            .add_source("en-US", "b.json", json!({ "x.y": "2" }))
            .expect_err("duplicate must be rejected");

        let CompileError::DuplicateKey { key, first, second, .. } = err else {
            panic!("expected duplicate key error, got {err:?}");
        };

        assert_eq!(key, "x.y");
        assert_eq!(first, Path::new("a.json"));
        assert_eq!(second, Path::new("b.json"));
    }

    #[test]
    fn duplicate_within_file() {
        let mut c = Compiler::new("en-US");
        let err = c
            .add_source("en-US", "a.json", json!({ "x": { "y": "1" }, "x.y": "2" }))
            .expect_err("duplicate must be rejected");

        assert!(matches!(err, CompileError::DuplicateKey { .. }), "got {err:?}");
    }

    #[test]
    fn same_key_in_other_locale() {
        let mut c = Compiler::new("en-US");
        c.add_source("en-US", "en.json", json!({ "x": "1" }))
            .expect("source must be valid");
        c.add_source("de", "de.json", json!({ "x": "2" }))
            .expect("other locales may repeat keys");
    }

    #[test]
    fn rejects_bad_input() {
        let mut c = Compiler::new("en-US");

        let err = c.add_source("en-US", "a.json", json!(["x"])).expect_err("arrays aren't sources");
        assert!(matches!(err, CompileError::NotAnObject(_)), "got {err:?}");

        let err = c.add_source("en-US", "a.json", json!({ "x": null })).expect_err("null values are rejected");
        assert!(matches!(err, CompileError::InvalidValue { .. }), "got {err:?}");

        let err = c
            .add_source("en-US", "a.json", json!({ "l": ["a", null] }))
            .expect_err("nested null values are rejected");
        assert!(matches!(err, CompileError::InvalidValue { .. }), "got {err:?}");

        let err = c
            .add_source("en-US", "a.json", json!({ "bad key": "x" }))
            .expect_err("whitespace keys are rejected");
        assert!(matches!(err, CompileError::InvalidKey { .. }), "got {err:?}");
    }

    #[test]
    fn missing_default_locale() {
        let mut c = Compiler::new("en-US");
        c.add_source("de", "de.json", json!({ "x": "1" }))
            .expect("source must be valid");

        let err = c.finish("1").expect_err("default locale is required");
        assert!(matches!(err, CompileError::MissingDefaultLocale(_)), "got {err:?}");
    }

    #[test]
    fn reports_missing_translations() {
        let mut c = Compiler::new("en-US");
        c.add_source("en-US", "en.json", json!({ "a": "1", "b": "2", "c": "3" }))
            .expect("source must be valid");
        c.add_source("de", "de.json", json!({ "a": "1" }))
            .expect("source must be valid");
        c.add_source("ja", "ja.json", json!({ "a": "1", "b": "2", "c": "3" }))
            .expect("source must be valid");

        let missing = c.missing_translations();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing["de"], ["b", "c"]);
    }

    #[test]
    fn output_loads() {
        let mut c = Compiler::new("en-US");
        c.add_source("ja", "ja.json", json!({ "greeting": "こんにちは" }))
            .expect("source must be valid");
        c.add_source("en-US", "en.json", json!({ "greeting": "Hello" }))
            .expect("source must be valid");

        let file = c.finish("2024.1").expect("compile must succeed");
        assert_eq!(file.locales, ["en-US", "ja"]);

        for minimize in [false, true] {
            let text = to_json(&file, minimize).expect("serialization must succeed");
            assert_eq!(text.contains('\n'), !minimize);

            let res = Resources::parse(&text, "en-US").expect("output must load");
            assert_eq!(res.version(), "2024.1");
            assert_eq!(res.locales(), ["en-US", "ja"]);
        }
    }
}
