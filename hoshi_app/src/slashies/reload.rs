use anyhow::Context as _;
use hoshi_l10n::ResourceKey;
use poise::CreateReply;
use serenity::builder::CreateEmbed;

use crate::data::*;

const RELOAD_SUCCESS: ResourceKey = ResourceKey::from_static("reload.success");
const RELOAD_FAILURE: ResourceKey = ResourceKey::from_static("reload.failure");

/// Reloads the localized resources from disk.
///
/// Command names and descriptions stay as they were registered.
#[poise::command(slash_command, owners_only)]
pub async fn reload(ctx: HContext<'_>) -> HResult {
    ctx.defer_ephemeral().await?;

    let data = ctx.data();
    let l10n = data.l10n().clone();
    let result = tokio::task::spawn_blocking(move || l10n.store().reload())
        .await
        .context("resource reload task failed")?;

    let locale = data.request_locale(ctx);
    let t = data.l10n().templater();

    let (description, color) = match result {
        Ok(()) => {
            data.mark_loaded();
            let version = data.l10n().store().version();
            log::info!("Reloaded resources, now at version {version}.");

            let text = t.format(&locale, &RELOAD_SUCCESS, &[("{VERSION}", version.into())]);
            (text, data.config().embed_color)
        },
        Err(why) => {
            let why = anyhow::Error::new(why);
            log::warn!("Resource reload failed: {why:?}");

            let text = t.format(&locale, &RELOAD_FAILURE, &[("{ERROR}", format!("{why:#}").into())]);
            (text, ERROR_EMBED_COLOR)
        },
    };

    let embed = CreateEmbed::new().description(description).color(color);
    ctx.send(CreateReply::default().embed(embed).ephemeral(true)).await?;
    Ok(())
}
