//! Autocomplete search over localized content.
//!
//! Every searchable collection lives under a db key, i.e. `guide`:
//!
//! - `guide.search` is a list of [`SearchEntry`] records.
//! - `guide.content.<id>` holds the content for each entry.
//!
//! Search entries are per locale. A search runs on the requested locale
//! first, then fills up the remaining slots from the default locale.

use std::collections::HashSet;
use std::sync::Arc;

use crate::key::ResourceKey;
use crate::store::{ResourceStore, Resources};
use crate::value::ResourceValue;

mod entry;
mod normalize;
mod strategy;
#[cfg(test)]
mod tests;

pub use entry::{KeywordSet, SearchEntry};
pub use normalize::normalize;
pub use strategy::{Candidate, ContentSearch, Hit, KeywordOverlap, PartOf, RESOLVE_MIN_SCORE};

/// The most suggestions Discord will show.
pub const MAX_SUGGESTIONS: usize = 25;

/// Selects the [`ContentSearch`] algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchType {
    /// [`KeywordOverlap`]: scored and ranked.
    #[default]
    Keywords,
    /// [`PartOf`]: unscored, in entry order.
    PartOf,
}

impl MatchType {
    /// Gets the algorithm for this match type.
    #[must_use]
    pub fn strategy(self) -> &'static dyn ContentSearch {
        match self {
            Self::Keywords => &KeywordOverlap,
            Self::PartOf => &PartOf,
        }
    }
}

/// A suggestion for a query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchMatch {
    pub id: String,
    pub title: String,
    /// The locale whose search entries produced this match.
    pub locale: String,
    /// The relevance score, if the match type scores.
    pub score: Option<f64>,
}

impl SearchMatch {
    /// The `<locale>:<id>` reference that [`AutocompleteIndex::resolve`]
    /// accepts to select exactly this match.
    #[must_use]
    pub fn reference(&self) -> String {
        format!("{}:{}", self.locale, self.id)
    }
}

/// Content resolved from a query or reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub id: String,
    /// The locale the content was requested in. The content itself may come
    /// from the default locale.
    pub locale: String,
    pub content: ResourceValue,
}

/// Searches and resolves content for autocomplete.
///
/// Every call reads the store's current snapshot, so reloads are picked up
/// immediately.
#[derive(Debug, Clone)]
pub struct AutocompleteIndex {
    store: Arc<ResourceStore>,
}

impl AutocompleteIndex {
    /// Creates an index over the store.
    #[must_use]
    pub fn new(store: Arc<ResourceStore>) -> Self {
        Self { store }
    }

    /// Gets up to [`MAX_SUGGESTIONS`] suggestions for a partial query.
    #[must_use]
    pub fn suggest(
        &self,
        locale: &str,
        query: &str,
        db_key: &ResourceKey,
        match_type: MatchType,
    ) -> Vec<SearchMatch> {
        let res = self.store.snapshot();
        let query = normalize(query);
        candidates(&res, locale, &query, db_key, match_type.strategy())
            .into_iter()
            .map(Candidate::to_match)
            .collect()
    }

    /// Resolves a `<locale>:<id>` reference or a free-text query to content.
    ///
    /// References are looked up directly if their locale is loaded. Queries
    /// resolve to the best suggestion, but a [`MatchType::Keywords`] match
    /// must score at least [`RESOLVE_MIN_SCORE`].
    #[must_use]
    pub fn resolve(
        &self,
        locale: &str,
        query_or_id: &str,
        db_key: &ResourceKey,
        match_type: MatchType,
    ) -> Option<Resolved> {
        let res = self.store.snapshot();

        if let Some((ref_locale, id)) = query_or_id.split_once(':') {
            if res.has_locale(ref_locale) {
                return content(&res, ref_locale, id, db_key);
            }
        }

        let query = normalize(query_or_id);
        let strategy = match_type.strategy();
        let best = candidates(&res, locale, &query, db_key, strategy)
            .into_iter()
            .next()?;

        if !strategy.accepts(&best) {
            return None;
        }

        content(&res, best.locale, &best.hit.entry.id, db_key)
    }

    /// Gets the suggestions for a fixed list of ids, i.e. to show for an empty
    /// query.
    ///
    /// Titles come from the requested locale or the default locale. Unknown
    /// ids are skipped. The input order is preserved.
    #[must_use]
    pub fn default_suggestions<S>(&self, locale: &str, db_key: &ResourceKey, ids: &[S]) -> Vec<SearchMatch>
    where
        S: AsRef<str>,
    {
        let res = self.store.snapshot();
        let find = |locale: &str, id: &str| {
            res.search_entries(locale, db_key)
                .iter()
                .find(|e| e.id == id)
                .map(|e| SearchMatch {
                    id: e.id.clone(),
                    title: e.title.clone(),
                    locale: locale.to_owned(),
                    score: None,
                })
        };

        ids.iter()
            .filter_map(|id| {
                let id = id.as_ref();
                find(locale, id).or_else(|| find(res.default_locale(), id))
            })
            .collect()
    }
}

/// Runs `strategy` on the requested locale, then extends the results from the
/// default locale with ids not seen yet.
fn candidates<'a>(
    res: &'a Resources,
    locale: &'a str,
    query: &str,
    db_key: &ResourceKey,
    strategy: &dyn ContentSearch,
) -> Vec<Candidate<'a>> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    let mut extend = |out: &mut Vec<Candidate<'a>>, locale: &'a str, native: bool| {
        let hits = strategy.find(query, res.search_entries(locale, db_key));
        for hit in hits {
            if out.len() >= MAX_SUGGESTIONS {
                break;
            }

            if seen.insert(hit.entry.id.as_str()) {
                out.push(Candidate { hit, locale, native });
            }
        }
    };

    extend(&mut out, locale, true);

    let default = res.default_locale();
    if out.len() < MAX_SUGGESTIONS && locale != default {
        extend(&mut out, default, false);
    }

    strategy.rank(&mut out);
    out
}

fn content(res: &Resources, locale: &str, id: &str, db_key: &ResourceKey) -> Option<Resolved> {
    let key = db_key.join("content").and_then(|k| k.join(id)).ok()?;
    let content = res.get(locale, &key)?;

    Some(Resolved {
        id: id.to_owned(),
        locale: locale.to_owned(),
        content: content.clone(),
    })
}
