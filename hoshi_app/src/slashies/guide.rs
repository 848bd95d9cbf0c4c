use hoshi_l10n::{MatchType, ResourceKey};
use serenity::builder::AutocompleteChoice;

use super::content;
use crate::data::*;

const GUIDE: ResourceKey = ResourceKey::from_static("guide");

/// Shows a guide on a topic.
#[poise::command(slash_command)]
pub async fn guide(
    ctx: HContext<'_>,
    #[description = "The topic to show the guide for."]
    #[autocomplete = "autocomplete_topic"]
    topic: String,
) -> HResult {
    content::show(ctx, &GUIDE, MatchType::Keywords, &topic).await
}

async fn autocomplete_topic<'a>(
    ctx: HContext<'a>,
    partial: &'a str,
) -> impl Iterator<Item = AutocompleteChoice> {
    let data = ctx.data();
    let locale = data.request_locale(ctx);
    let search = data.l10n().autocomplete();

    let matches = if partial.trim().is_empty() {
        search.default_suggestions(&locale, &GUIDE, &data.config().default_guides)
    } else {
        search.suggest(&locale, partial, &GUIDE, MatchType::Keywords)
    };

    content::choices(matches)
}
