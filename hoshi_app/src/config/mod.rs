use std::env::{self, VarError};
use std::path::PathBuf;

use anyhow::Context as _;
use serde::Deserialize;
use serenity::model::Colour;

pub mod setup;

/// Selects the `hoshi_app.<profile>.toml` layer. Defaults to `release`.
const PROFILE_VAR: &str = "HOSHI_PROFILE";
const DEFAULT_CONFIG: &str = include_str!("../../assets/default_config.toml");

#[derive(Debug, Deserialize)]
pub struct HConfig {
    pub discord: HDiscordConfig,
    pub bot: HBotConfig,
    #[serde(default)]
    pub log: HLogConfig,
}

#[derive(Debug, Deserialize)]
pub struct HDiscordConfig {
    pub token: String,
    pub status: Option<String>,
}

const fn default_embed_color() -> Colour {
    Colour::new(0x7B_68_EE)
}

#[derive(Debug, Deserialize)]
pub struct HBotConfig {
    #[serde(default = "default_embed_color")]
    pub embed_color: Colour,
    /// Guide ids suggested while the query is still empty.
    #[serde(default)]
    pub default_guides: Vec<String>,
    pub l10n: HL10nConfig,
}

#[derive(Debug, Deserialize)]
pub struct HL10nConfig {
    pub resource_path: PathBuf,
    #[serde(default = "default_locale")]
    pub default_locale: String,
}

fn default_locale() -> String {
    "en-US".to_owned()
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct HLogConfig {
    /// Whether to route panics through the logger.
    #[serde(default = "default_true")]
    pub panic: bool,
    #[serde(default)]
    pub log4rs: log4rs::config::RawConfig,
}

impl Default for HLogConfig {
    fn default() -> Self {
        Self {
            panic: true,
            log4rs: log4rs::config::RawConfig::default(),
        }
    }
}

impl HConfig {
    /// Loads the configuration.
    ///
    /// Layers, each overriding the previous: the embedded defaults,
    /// `hoshi_app.toml`, `hoshi_app.<profile>.toml` and finally environment
    /// variables like `DISCORD__TOKEN`. Both files are optional.
    pub fn load() -> anyhow::Result<Self> {
        use setup::{Builder, Env, File, TomlText};

        let profile = match env::var(PROFILE_VAR) {
            Ok(profile) => profile,
            Err(VarError::NotPresent) => "release".to_owned(),
            Err(err) => return Err(err).with_context(|| format!("cannot read {PROFILE_VAR}")),
        };

        Builder::new()
            .add_layer(TomlText::new(DEFAULT_CONFIG))
            .add_layer(File::new("hoshi_app.toml").required(false))
            .add_layer(File::new(format!("hoshi_app.{profile}.toml")).required(false))
            .add_layer(Env::new())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::setup::{Builder, TomlText};
    use super::{DEFAULT_CONFIG as DEFAULT, HConfig};

    #[test]
    fn default_config_with_token() {
        let config: HConfig = Builder::new()
            .add_layer(TomlText::new(DEFAULT))
            .add_layer(TomlText::new("discord.token = \"abc\""))
            .build()
            .expect("default config must be valid");

        assert_eq!(config.discord.token, "abc");
        assert_eq!(config.bot.l10n.default_locale, "en-US");
        assert!(config.bot.default_guides.is_empty(), "no default guides by default");
        assert!(config.log.panic, "panic hook is on by default");
    }

    #[test]
    fn default_config_needs_token() {
        let config = Builder::new()
            .add_layer(TomlText::new(DEFAULT))
            .build::<HConfig>();

        assert!(config.is_err(), "missing token must be an error");
    }

    #[test]
    fn overrides() {
        let config: HConfig = Builder::new()
            .add_layer(TomlText::new(DEFAULT))
            .add_layer(TomlText::new(
                r#"
                [discord]
                token = "abc"
                status = "Reading guides"

                [bot]
                embed_color = 0xFF0000
                default_guides = ["getting-started", "faq"]

                [bot.l10n]
                resource_path = "data/resources.json"
                "#,
            ))
            .build()
            .expect("config must be valid");

        assert_eq!(config.discord.status.as_deref(), Some("Reading guides"));
        assert_eq!(config.bot.embed_color.0, 0xFF_00_00);
        assert_eq!(config.bot.default_guides, ["getting-started", "faq"]);
        assert_eq!(config.bot.l10n.resource_path.to_str(), Some("data/resources.json"));
        assert_eq!(config.bot.l10n.default_locale, "en-US");
    }
}
