mod build;
mod config;
mod data;
mod fmt;
mod logging;
mod slashies;

use anyhow::Context as _;
use hoshi_l10n::L10n;
use serenity::gateway::ActivityData;
use serenity::prelude::{Client, GatewayIntents};

use crate::build::{GIT_HASH, VERSION};
use crate::config::HConfig;
use crate::data::*;

fn main() -> HResult {
    return inner();

    // keeps the runtime out of the panic and exit handling
    #[tokio::main]
    async fn inner() -> HResult {
        let res = run().await;
        if let Err(why) = &res {
            log::error!("Exiting due to error: {why:?}");
        }

        log::logger().flush();
        res
    }
}

async fn run() -> HResult {
    let config = HConfig::load()?;
    logging::init(config.log.log4rs)?;

    if config.log.panic {
        logging::install_panic_hook();
    }

    log::info!(target: "hoshi_app::version", "Hoshi v{VERSION} - {GIT_HASH}");

    let l10n = load_l10n(&config.bot.l10n)?;
    let mut commands = slashies::commands();
    slashies::localize::apply(&mut commands, &l10n.store().snapshot());

    let bot_data = HBotData::new(config.bot, l10n);
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands,
            pre_command: |ctx| Box::pin(slashies::pre_command(ctx)),
            on_error: |error| Box::pin(slashies::error_handler(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                let commands = &framework.options().commands;
                poise::builtins::register_globally(ctx, commands).await?;
                log::info!("Logged in as {}, registered {} commands.", ready.user.name, commands.len());
                Ok(bot_data)
            })
        })
        .build();

    let status = config.discord.status.unwrap_or_else(|| VERSION.to_owned());
    let mut client = Client::builder(config.discord.token, GatewayIntents::non_privileged())
        .activity(ActivityData::custom(status))
        .framework(framework)
        .await
        .context("failed to init discord client")?;

    client
        .start()
        .await
        .context("discord client shut down unexpectedly")
}

fn load_l10n(config: &config::HL10nConfig) -> HResult<L10n> {
    let path = &config.resource_path;
    let l10n = L10n::load(path, config.default_locale.as_str())
        .with_context(|| format!("failed to load resources from {}", path.display()))?;

    let store = l10n.store();
    log::info!(
        "Loaded resources {} for {} locales from {}.",
        store.version(),
        store.locales().len(),
        path.display(),
    );

    Ok(l10n)
}
