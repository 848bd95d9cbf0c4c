use hoshi_l10n::{MatchType, ResourceKey};
use serenity::builder::AutocompleteChoice;

use super::content;
use crate::data::*;

const GLOSSARY: ResourceKey = ResourceKey::from_static("glossary");

/// Looks up a term in the glossary.
#[poise::command(slash_command)]
pub async fn glossary(
    ctx: HContext<'_>,
    #[description = "The term to look up."]
    #[autocomplete = "autocomplete_term"]
    term: String,
) -> HResult {
    content::show(ctx, &GLOSSARY, MatchType::PartOf, &term).await
}

async fn autocomplete_term<'a>(
    ctx: HContext<'a>,
    partial: &'a str,
) -> impl Iterator<Item = AutocompleteChoice> {
    let data = ctx.data();
    let locale = data.request_locale(ctx);
    let matches = data
        .l10n()
        .autocomplete()
        .suggest(&locale, partial, &GLOSSARY, MatchType::PartOf);

    content::choices(matches)
}
