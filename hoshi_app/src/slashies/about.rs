use hoshi_l10n::ResourceKey;
use poise::CreateReply;
use serenity::builder::{CreateEmbed, CreateEmbedFooter};

use crate::build::{GIT_HASH, VERSION};
use crate::data::*;

const ABOUT_TITLE: ResourceKey = ResourceKey::from_static("about.title");
const ABOUT_DESCRIPTION: ResourceKey = ResourceKey::from_static("about.description");
const ABOUT_FOOTER: ResourceKey = ResourceKey::from_static("about.footer");

/// Shows information about the bot and its loaded resources.
#[poise::command(slash_command)]
pub async fn about(ctx: HContext<'_>) -> HResult {
    let data = ctx.data();
    let locale = data.request_locale(ctx);
    let l10n = data.l10n();
    let t = l10n.templater();
    let res = l10n.store().snapshot();

    let key_locale = if res.has_locale(&locale) { locale.as_str() } else { res.default_locale() };
    let locales = t.format_list(&locale, res.locales(), None);
    let loaded_at = t.format_date(&locale, data.loaded_at());

    let description = t.format(&locale, &ABOUT_DESCRIPTION, &[
        ("{VERSION}", VERSION.into()),
        ("{GIT_HASH}", GIT_HASH.into()),
        ("{RESOURCE_VERSION}", res.version().into()),
        ("{LOCALES}", locales.into()),
        ("{KEY_COUNT}", res.key_count(key_locale).into()),
    ]);

    let footer = t.format(&locale, &ABOUT_FOOTER, &[("{LOADED_AT}", loaded_at.into())]);

    let mut embed = CreateEmbed::new()
        .title(t.format(&locale, &ABOUT_TITLE, &[]))
        .description(description)
        .color(data.config().embed_color);

    if !footer.is_empty() {
        embed = embed.footer(CreateEmbedFooter::new(footer));
    }

    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}
