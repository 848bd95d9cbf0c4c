use std::cmp::Ordering;

use super::entry::SearchEntry;
use super::SearchMatch;

/// The minimum score a keyword match needs to be resolved without the user
/// explicitly selecting it.
pub const RESOLVE_MIN_SCORE: f64 = 0.5;

/// An entry found by a [`ContentSearch`].
#[derive(Debug, Clone, Copy)]
pub struct Hit<'e> {
    pub entry: &'e SearchEntry,
    /// The relevance score, if the strategy scores at all.
    pub score: Option<f64>,
    /// The amount of keyword groups of the entry.
    pub total: usize,
}

/// A [`Hit`] tagged with the locale whose entries it came from.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'e> {
    pub hit: Hit<'e>,
    pub locale: &'e str,
    /// Whether `locale` is the locale that was requested.
    pub native: bool,
}

impl Candidate<'_> {
    pub(super) fn to_match(self) -> SearchMatch {
        SearchMatch {
            id: self.hit.entry.id.clone(),
            title: self.hit.entry.title.clone(),
            locale: self.locale.to_owned(),
            score: self.hit.score,
        }
    }
}

/// A content search algorithm.
pub trait ContentSearch: Sync {
    /// Finds the entries matching an already normalized `query`, in the order
    /// they should be suggested.
    fn find<'e>(&self, query: &str, entries: &'e [SearchEntry]) -> Vec<Hit<'e>>;

    /// Orders candidates merged from several locales.
    fn rank(&self, candidates: &mut [Candidate<'_>]);

    /// Whether the best candidate of a free-text query may be resolved.
    fn accepts(&self, best: &Candidate<'_>) -> bool;
}

/// Scores entries by the fraction of their keyword groups the query hits.
///
/// A group is hit if the query contains any of its keywords. Entries without
/// any hit are excluded. Results are ranked by score, then by the amount of
/// groups, then by whether they come from the requested locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordOverlap;

/// Matches entries where the query is part of one of their substrings.
///
/// Matches are not scored and keep their entry order.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartOf;

impl ContentSearch for KeywordOverlap {
    fn find<'e>(&self, query: &str, entries: &'e [SearchEntry]) -> Vec<Hit<'e>> {
        let mut hits: Vec<_> = entries
            .iter()
            .filter_map(|entry| {
                let total = entry.keyword_sets.len();
                let count = entry
                    .keyword_sets
                    .iter()
                    .filter(|set| set.iter().any(|k| query.contains(k.as_str())))
                    .count();

                (count != 0).then(|| Hit {
                    entry,
                    score: Some(count as f64 / total as f64),
                    total,
                })
            })
            .collect();

        hits.sort_by(|a, b| cmp_hits(b, a));
        hits
    }

    fn rank(&self, candidates: &mut [Candidate<'_>]) {
        candidates.sort_by(|a, b| cmp_hits(&b.hit, &a.hit).then(b.native.cmp(&a.native)));
    }

    fn accepts(&self, best: &Candidate<'_>) -> bool {
        best.hit.score.is_some_and(|s| s >= RESOLVE_MIN_SCORE)
    }
}

fn cmp_hits(a: &Hit<'_>, b: &Hit<'_>) -> Ordering {
    let a_score = a.score.unwrap_or_default();
    let b_score = b.score.unwrap_or_default();
    a_score.total_cmp(&b_score).then(a.total.cmp(&b.total))
}

impl ContentSearch for PartOf {
    fn find<'e>(&self, query: &str, entries: &'e [SearchEntry]) -> Vec<Hit<'e>> {
        entries
            .iter()
            .filter(|entry| entry.match_substrings.iter().any(|s| s.contains(query)))
            .map(|entry| Hit {
                entry,
                score: None,
                total: 0,
            })
            .collect()
    }

    fn rank(&self, _candidates: &mut [Candidate<'_>]) {}

    fn accepts(&self, _best: &Candidate<'_>) -> bool {
        true
    }
}
