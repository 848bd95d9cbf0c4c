use std::borrow::Cow;
use std::sync::atomic::{AtomicI64, Ordering};

use hoshi_l10n::L10n;
use serenity::model::Colour;
use time::OffsetDateTime;

use crate::config::HBotConfig;

/// A general color that can be used for embeds indicating errors.
pub const ERROR_EMBED_COLOR: Colour = Colour::new(0xCF_00_25);

pub type HError = anyhow::Error;
pub type HResult<T = ()> = Result<T, HError>;
pub type HContext<'a> = poise::Context<'a, HBotData, HError>;
pub type HFrameworkError<'a> = poise::FrameworkError<'a, HBotData, HError>;
pub type HCommand = poise::Command<HBotData, HError>;

/// A simple error that can return any error message.
///
/// Its message is shown to the user as is.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{msg}")]
#[must_use]
pub struct HArgError {
    /// The error message
    pub msg: Cow<'static, str>,
}

impl HArgError {
    pub fn new(msg: impl Into<Cow<'static, str>>) -> Self {
        Self { msg: msg.into() }
    }
}

/// The global bot data. Only one instance exists per bot.
#[derive(Debug)]
pub struct HBotData {
    /// The bot configuration.
    config: HBotConfig,
    /// The localization service.
    l10n: L10n,
    /// Unix time of the last successful resource load.
    loaded_at: AtomicI64,
}

impl HBotData {
    /// Creates a new instance with the resources loaded just now.
    #[must_use]
    pub fn new(config: HBotConfig, l10n: L10n) -> Self {
        Self {
            config,
            l10n,
            loaded_at: AtomicI64::new(OffsetDateTime::now_utc().unix_timestamp()),
        }
    }

    /// Gets the bot configuration.
    #[must_use]
    pub fn config(&self) -> &HBotConfig {
        &self.config
    }

    /// Gets the localization service.
    #[must_use]
    pub fn l10n(&self) -> &L10n {
        &self.l10n
    }

    /// When the resources were last loaded.
    #[must_use]
    pub fn loaded_at(&self) -> OffsetDateTime {
        let unix = self.loaded_at.load(Ordering::Relaxed);
        OffsetDateTime::from_unix_timestamp(unix).unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }

    /// Records that the resources were reloaded just now.
    pub fn mark_loaded(&self) {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        self.loaded_at.store(now, Ordering::Relaxed);
    }

    /// The locale to answer a request in.
    ///
    /// This is the user's Discord locale, or the default locale outside of
    /// interactions.
    #[must_use]
    pub fn request_locale(&self, ctx: HContext<'_>) -> String {
        match ctx.locale() {
            Some(locale) => locale.to_owned(),
            None => self.l10n.store().default_locale().to_owned(),
        }
    }
}
