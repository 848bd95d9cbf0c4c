use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use walkdir::WalkDir;

/// The source files of one locale.
#[derive(Debug)]
pub struct LocaleSources {
    pub locale: String,
    pub files: Vec<PathBuf>,
}

/// Finds the sources under `root`.
///
/// Every directory directly under `root` is one locale, named after the
/// directory. Within it, every `.json` file at any depth is a source.
/// Locales and files are sorted by name.
pub fn discover(root: &Path) -> anyhow::Result<Vec<LocaleSources>> {
    let entries = fs::read_dir(root).with_context(|| format!("cannot read input directory {root:?}"))?;

    let mut locales = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("cannot read input directory {root:?}"))?;
        if !entry.file_type()?.is_dir() {
            continue;
        }

        let Ok(locale) = entry.file_name().into_string() else {
            anyhow::bail!("locale directory name {:?} is not utf-8", entry.file_name());
        };

        let files = json_files(&entry.path())?;
        locales.push(LocaleSources { locale, files });
    }

    locales.sort_unstable_by(|a, b| a.locale.cmp(&b.locale));
    Ok(locales)
}

fn json_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("cannot walk {dir:?}"))?;
        let is_json = entry.path().extension().is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if entry.file_type().is_file() && is_json {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
