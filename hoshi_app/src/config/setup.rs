//! Layered loading of the TOML configuration.
//!
//! Every layer is merged into one table, with later layers overriding
//! earlier ones key by key. Nested tables are merged recursively. The final
//! table is then deserialized into the requested type.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use anyhow::{Context as _, Result};
use serde::de::DeserializeOwned;
use smallvec::SmallVec;
use toml::map::Entry;
use toml::{Table, Value};

/// Separates nesting levels in environment variable names.
const ENV_SEPARATOR: &str = "__";

/// Collects configuration layers.
#[must_use]
pub struct Builder<'a> {
    layers: Vec<Box<dyn Layer + 'a>>,
}

impl<'a> Builder<'a> {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Adds a layer on top of the previous ones.
    pub fn add_layer<L: Layer + 'a>(mut self, layer: L) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    /// Merges all layers and deserializes the result.
    ///
    /// The first failing layer aborts the build.
    pub fn build<T: DeserializeOwned>(self) -> Result<T> {
        let mut table = Table::new();
        for layer in &self.layers {
            layer.apply(&mut table)?;
        }

        T::deserialize(table).context("configuration is invalid")
    }
}

/// A source of configuration values.
pub trait Layer {
    /// Merges this layer's values into `table`.
    fn apply(&self, table: &mut Table) -> Result<()>;
}

/// TOML source text, i.e. embedded defaults.
#[must_use]
pub struct TomlText<'a> {
    text: &'a str,
}

impl<'a> TomlText<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}

impl Layer for TomlText<'_> {
    fn apply(&self, table: &mut Table) -> Result<()> {
        let layer = parse(self.text).context("embedded config is invalid")?;
        merge(table, layer);
        Ok(())
    }
}

/// A TOML file.
#[must_use]
pub struct File {
    path: PathBuf,
    required: bool,
}

impl File {
    /// Creates a layer for the file at `path`. The file is required unless
    /// [`File::required`] says otherwise.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_owned(),
            required: true,
        }
    }

    /// Sets whether a missing file is an error or just an empty layer.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

impl Layer for File {
    fn apply(&self, table: &mut Table) -> Result<()> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(why) if !self.required && why.kind() == io::ErrorKind::NotFound => {
                log::trace!("optional config {:?} not found", self.path);
                return Ok(());
            },
            Err(why) => {
                return Err(why).with_context(|| format!("cannot read config {:?}", self.path));
            },
        };

        let layer = parse(&text).with_context(|| format!("config {:?} is invalid", self.path))?;
        merge(table, layer);
        Ok(())
    }
}

/// Environment variables whose name contains `__`.
///
/// Names are lowercased and split on `__`, so `BOT__L10N__DEFAULT_LOCALE`
/// sets `bot.l10n.default_locale`. Values are always strings; non-UTF-8
/// values are converted lossily.
#[must_use]
pub struct Env(());

impl Env {
    pub fn new() -> Self {
        Self(())
    }
}

impl Layer for Env {
    fn apply(&self, table: &mut Table) -> Result<()> {
        apply_vars(table, env::vars_os());
        Ok(())
    }
}

fn apply_vars(table: &mut Table, vars: impl IntoIterator<Item = (OsString, OsString)>) {
    for (name, value) in vars {
        // no config key can be non-utf8
        let Some(name) = name.to_str() else {
            continue;
        };

        if !name.contains(ENV_SEPARATOR) {
            continue;
        }

        let name = name.to_ascii_lowercase();
        let path: SmallVec<[&str; 8]> = name.split(ENV_SEPARATOR).collect();
        if path.iter().any(|s| s.is_empty()) {
            continue;
        }

        let value = match value.into_string() {
            Ok(value) => value,
            Err(value) => value.to_string_lossy().into_owned(),
        };

        set_path(table, &path, Value::String(value));
    }
}

fn parse(text: &str) -> Result<Table> {
    Ok(toml::from_str(text)?)
}

fn merge(target: &mut Table, layer: Table) {
    for (key, value) in layer {
        match target.entry(key) {
            Entry::Vacant(slot) => _ = slot.insert(value),
            Entry::Occupied(mut slot) => match (slot.get_mut(), value) {
                (Value::Table(current), Value::Table(value)) => merge(current, value),
                (current, value) => *current = value,
            },
        }
    }
}

/// Sets the value at `path`, replacing anything that isn't a table on the
/// way with one.
fn set_path(table: &mut Table, path: &[&str], value: Value) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };

    let mut current = table;
    for segment in parents {
        let entry = current
            .entry((*segment).to_owned())
            .or_insert_with(|| Value::Table(Table::new()));

        if !entry.is_table() {
            *entry = Value::Table(Table::new());
        }

        let Some(next) = entry.as_table_mut() else {
            return;
        };

        current = next;
    }

    current.insert((*last).to_owned(), value);
}
