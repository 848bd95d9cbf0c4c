//! Applies command name and description translations from the resources.
//!
//! For a command `guide` with a parameter `topic`, these keys are used:
//!
//! - `cmd.guide.name`, `cmd.guide.description`
//! - `cmd.guide.topic.name`, `cmd.guide.topic.description`
//!
//! Subcommands nest below their parent, i.e. `cmd.<parent>.<sub>.name`.
//! The default locale's text replaces the built-in text. Every other locale
//! becomes a Discord localization.
//!
//! Parameter names are the exception: poise parses options by the built-in
//! name, so the default locale's parameter name only becomes a localization.

use std::collections::HashMap;

use hoshi_l10n::{ResourceKey, Resources};

use crate::data::HCommand;

/// Localizes all commands from a resource snapshot.
pub fn apply(commands: &mut [HCommand], res: &Resources) {
    for command in commands {
        apply_command(command, "cmd", res);
    }
}

fn apply_command(command: &mut HCommand, prefix: &str, res: &Resources) {
    let base = format!("{prefix}.{}", command.name);

    for parameter in &mut command.parameters {
        let param_base = format!("{base}.{}", parameter.name);
        if let Some(text) = Localized::find(res, &param_base, "description") {
            text.apply_opt(&mut parameter.description, &mut parameter.description_localizations);
        }
        if let Some(text) = Localized::find(res, &param_base, "name") {
            text.apply_as_localizations(res.default_locale(), &mut parameter.name_localizations);
        }
    }

    for subcommand in &mut command.subcommands {
        apply_command(subcommand, &base, res);
    }

    if let Some(text) = Localized::find(res, &base, "description") {
        text.apply_opt(&mut command.description, &mut command.description_localizations);
    }
    if let Some(text) = Localized::find(res, &base, "name") {
        text.apply(&mut command.name, &mut command.name_localizations);
    }
}

/// One translated text across all locales.
#[derive(Debug, Default, PartialEq, Eq)]
struct Localized {
    /// The default locale's text.
    base: Option<String>,
    /// Texts of the other locales by locale code.
    translations: HashMap<String, String>,
}

impl Localized {
    /// Collects `<base>.<field>` from every locale. [`None`] if no locale has
    /// a string for it.
    fn find(res: &Resources, base: &str, field: &str) -> Option<Self> {
        let key = match ResourceKey::new(&format!("{base}.{field}")) {
            Ok(key) => key,
            Err(why) => {
                log::warn!("Cannot localize `{base}`: {why}");
                return None;
            },
        };

        let mut out = Self::default();
        for (locale, value) in res.get_all_localizations(&key) {
            let Some(text) = value.as_str() else {
                log::warn!("Localization `{key}` in `{locale}` is not a string.");
                continue;
            };

            if locale == res.default_locale() {
                out.base = Some(text.to_owned());
            } else {
                out.translations.insert(locale.to_owned(), text.to_owned());
            }
        }

        (out.base.is_some() || !out.translations.is_empty()).then_some(out)
    }

    fn apply(self, base: &mut String, localizations: &mut HashMap<String, String>) {
        if let Some(text) = self.base {
            *base = text;
        }

        localizations.extend(self.translations);
    }

    /// Adds every text, including the default locale's, as a localization.
    fn apply_as_localizations(
        self,
        default_locale: &str,
        localizations: &mut HashMap<String, String>,
    ) {
        if let Some(text) = self.base {
            localizations.insert(default_locale.to_owned(), text);
        }

        localizations.extend(self.translations);
    }

    fn apply_opt(self, base: &mut Option<String>, localizations: &mut HashMap<String, String>) {
        if let Some(text) = self.base {
            *base = Some(text);
        }

        localizations.extend(self.translations);
    }
}
