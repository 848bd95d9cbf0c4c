use smallvec::SmallVec;

use super::normalize::normalize;
use crate::value::ResourceValue;

/// A group of synonymous keywords.
pub type KeywordSet = SmallVec<[String; 4]>;

/// One searchable content item, as stored in a `<db key>.search` list.
///
/// Keywords and substrings are normalized when the entry is built, so they
/// can be compared directly with a normalized query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchEntry {
    /// The content id, addressing `<db key>.content.<id>`.
    pub id: String,
    /// The display title.
    pub title: String,
    /// Synonym groups for keyword matching.
    pub keyword_sets: Vec<KeywordSet>,
    /// Substrings for part-of matching.
    pub match_substrings: Vec<String>,
}

impl SearchEntry {
    /// Reads an entry from a record value.
    ///
    /// Expects the fields `id` and `title`, and optionally `keywordSets` (a
    /// list of string lists) and `matchSubstrings` (a list of strings).
    /// Empty keywords are dropped, as are keyword groups without any keyword.
    ///
    /// # Errors
    ///
    /// Returns a short description of the problem if the value doesn't have
    /// that shape.
    pub fn from_value(value: &ResourceValue) -> Result<Self, &'static str> {
        let record = value.as_record().ok_or("entry is not a record")?;

        let id = record
            .get("id")
            .and_then(ResourceValue::as_str)
            .filter(|id| !id.is_empty())
            .ok_or("entry has no `id` string")?;

        let title = record
            .get("title")
            .and_then(ResourceValue::as_str)
            .ok_or("entry has no `title` string")?;

        let keyword_sets = match record.get("keywordSets") {
            None => Vec::new(),
            Some(sets) => {
                let sets = sets.as_list().ok_or("`keywordSets` is not a list")?;
                let mut out = Vec::with_capacity(sets.len());
                for set in sets {
                    let set = set.as_list().ok_or("`keywordSets` item is not a list")?;
                    let set: KeywordSet = normalized_strings(set).ok_or("keyword is not a string")?;
                    if !set.is_empty() {
                        out.push(set);
                    }
                }

                out
            },
        };

        let match_substrings = match record.get("matchSubstrings") {
            None => Vec::new(),
            Some(list) => {
                let list = list.as_list().ok_or("`matchSubstrings` is not a list")?;
                normalized_strings(list).ok_or("match substring is not a string")?
            },
        };

        Ok(Self {
            id: id.to_owned(),
            title: title.to_owned(),
            keyword_sets,
            match_substrings,
        })
    }
}

fn normalized_strings<C>(list: &[ResourceValue]) -> Option<C>
where
    C: FromIterator<String>,
{
    list.iter()
        .map(|v| v.as_str().map(normalize))
        .filter(|s| s.as_ref().is_none_or(|s| !s.is_empty()))
        .collect()
}
