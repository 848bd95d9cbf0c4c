//! Shared logic for commands that show searchable content.

use std::borrow::Cow;

use hoshi_l10n::{MatchType, ResourceKey, SearchMatch};
use poise::CreateReply;
use serenity::builder::AutocompleteChoice;

use crate::data::*;
use crate::fmt::content::EmbedContent;
use crate::fmt::truncate;

const ERROR_NOT_FOUND: ResourceKey = ResourceKey::from_static("error.not-found");

/// Discord's limit for choice names.
const CHOICE_NAME_LEN: usize = 100;

/// Turns matches into autocomplete choices selecting exactly that match.
pub fn choices(matches: Vec<SearchMatch>) -> impl Iterator<Item = AutocompleteChoice> {
    matches.into_iter().map(|m| {
        let (name, value) = choice_parts(&m);
        AutocompleteChoice::new(name, value)
    })
}

/// The display name and the `<locale>:<id>` value of a choice.
fn choice_parts(m: &SearchMatch) -> (Cow<'_, str>, String) {
    (truncate(&m.title, CHOICE_NAME_LEN), m.reference())
}

/// Resolves `query` and replies with the content, or with an ephemeral
/// not-found message.
pub async fn show(ctx: HContext<'_>, db_key: &ResourceKey, match_type: MatchType, query: &str) -> HResult {
    let data = ctx.data();
    let locale = data.request_locale(ctx);
    let l10n = data.l10n();

    let content = l10n
        .autocomplete()
        .resolve(&locale, query, db_key, match_type)
        .and_then(|r| EmbedContent::from_value(&r.content));

    let Some(content) = content else {
        log::debug!("No {db_key} content for {query:?} in {locale}.");
        let message = l10n
            .templater()
            .format(&locale, &ERROR_NOT_FOUND, &[("{QUERY}", query.into())]);

        let message = if message.is_empty() {
            format!("Nothing found for `{query}`.")
        } else {
            message
        };

        return Err(HArgError::new(message).into());
    };

    let embed = content.into_embed(data.config().embed_color);
    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}
