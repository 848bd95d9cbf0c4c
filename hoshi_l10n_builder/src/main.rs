use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

use anyhow::Context as _;
use clap::Parser;
use hoshi_l10n::compile::{self, Compiler};

mod log;
mod sources;

/// How many missing keys to list per locale.
const MISSING_PREVIEW: usize = 5;

#[derive(Debug, Parser)]
struct Cli {
    /// The directory holding the resource sources.
    ///
    /// Every directory directly inside it is one locale, i.e. `en-US`, and
    /// holds any amount of `.json` files, in any nested directories.
    #[arg(short, long, default_value = "resources")]
    input: PathBuf,

    /// The output file.
    ///
    /// Its directory is created if it's missing.
    #[arg(short, long, default_value = "resources.json")]
    out: PathBuf,

    /// The locale the bot falls back to. It must have sources.
    #[arg(long, default_value = "en-US")]
    default_locale: String,

    /// The version stamp to write into the file.
    ///
    /// If not specified, the current time is used.
    #[arg(long)]
    build_version: Option<String>,

    /// Minimize the output JSON file.
    #[arg(short, long)]
    minimize: bool,

    /// Override whether this program outputs color.
    ///
    /// Auto-detection is performed, but in case it is wrong, you may use this
    /// to override the default.
    #[arg(long)]
    color: Option<bool>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    log::use_color(cli.color);

    log::info!("Hoshi L10n Builder v{}", env!("CARGO_PKG_VERSION"));

    let mut compiler = Compiler::new(&cli.default_locale);

    let locales = sources::discover(&cli.input)?;
    for locale in &locales {
        let mut action = log::action!("Reading `{}`.", locale.locale);
        for file in &locale.files {
            compiler
                .add_file(&locale.locale, file)
                .with_context(|| format!("cannot compile locale `{}`", locale.locale))?;
        }

        action.set_count(locale.files.len());
        action.finish();
    }

    report_missing(&compiler);

    let version = cli
        .build_version
        .unwrap_or_else(|| humantime::format_rfc3339_seconds(SystemTime::now()).to_string());

    let file = compiler.finish(version)?;

    {
        let action = log::action!("Writing `{}`.", cli.out.display());
        let text = compile::to_json(&file, cli.minimize)?;

        if let Some(parent) = cli.out.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| format!("cannot create {parent:?}"))?;
        }

        fs::write(&cli.out, text).with_context(|| format!("cannot write {:?}", cli.out))?;
        action.finish();
    }

    log::info!("Built version `{}` with {} locale(s).", file.version, file.locales.len());
    Ok(())
}

fn report_missing(compiler: &Compiler) {
    for (locale, keys) in compiler.missing_translations() {
        let preview = keys[..keys.len().min(MISSING_PREVIEW)].join(", ");
        let more = keys.len().saturating_sub(MISSING_PREVIEW);

        if more == 0 {
            log::warning!("`{locale}` is missing {} key(s): {preview}", keys.len());
        } else {
            log::warning!("`{locale}` is missing {} key(s): {preview}, and {more} more", keys.len());
        }
    }
}
