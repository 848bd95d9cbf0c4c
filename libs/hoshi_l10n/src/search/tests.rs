use std::fmt::Write as _;
use std::sync::Arc;

use super::*;

const GUIDE: ResourceKey = ResourceKey::from_static("guide");
const GLOSSARY: ResourceKey = ResourceKey::from_static("glossary");

fn index(json: &str) -> (Arc<ResourceStore>, AutocompleteIndex) {
    let res = Resources::parse(json, "en-US").expect("test resources must be valid");
    let store = Arc::new(ResourceStore::with_resources(res));
    let index = AutocompleteIndex::new(Arc::clone(&store));
    (store, index)
}

fn sample() -> (Arc<ResourceStore>, AutocompleteIndex) {
    index(
        r#"{
            "version": "1",
            "locales": ["en-US", "de"],
            "en-US": {
                "guide.search": [
                    { "id": "a", "title": "Alpha", "keywordSets": [["foo", "bar"], ["baz"]] },
                    { "id": "b", "title": "Beta", "keywordSets": [["bar"], ["qux"], ["quux"], ["corge"]] },
                    { "id": "c", "title": "Gamma", "keywordSets": [["bar"], ["baz"], ["qux"], ["quux"]] },
                    { "id": "only-en", "title": "English Only", "keywordSets": [["bar"], ["nope"]] }
                ],
                "guide.content.a": { "title": "Alpha", "description": "The first." },
                "guide.content.b": "Beta content",
                "guide.content.c": "Gamma content",
                "guide.content.only-en": "English content",
                "guide.content.widget-7": "Widget content",
                "glossary.search": [
                    { "id": "atk", "title": "Attack", "matchSubstrings": ["attack", "atk"] },
                    { "id": "atk-dup", "title": "Attack Again", "matchSubstrings": ["attack speed"] },
                    { "id": "def", "title": "Defense", "matchSubstrings": ["defense"] }
                ],
                "glossary.content.atk": "Attack content",
                "glossary.content.atk-dup": "Attack speed content",
                "glossary.content.def": "Defense content"
            },
            "de": {
                "guide.search": [
                    { "id": "a", "title": "Alpha (de)", "keywordSets": [["foo", "bar"], ["baz"]] },
                    { "id": "de-only", "title": "Nur Deutsch", "keywordSets": [["bar"], ["baz"]] }
                ],
                "guide.content.a": "Alpha Inhalt",
                "guide.content.de-only": "Deutscher Inhalt"
            }
        }"#,
    )
}

fn ids(matches: &[SearchMatch]) -> Vec<&str> {
    matches.iter().map(|m| m.id.as_str()).collect()
}

fn score_of(matches: &[SearchMatch], id: &str) -> Option<f64> {
    matches.iter().find(|m| m.id == id).and_then(|m| m.score)
}

#[test]
fn keyword_scores() {
    let (_store, index) = sample();

    let bar = index.suggest("en-US", "bar", &GUIDE, MatchType::Keywords);
    assert_eq!(score_of(&bar, "a"), Some(0.5));
    assert_eq!(score_of(&bar, "b"), Some(0.25));

    let bar_baz = index.suggest("en-US", "bar baz", &GUIDE, MatchType::Keywords);
    assert_eq!(score_of(&bar_baz, "a"), Some(1.0));
    assert_eq!(score_of(&bar_baz, "c"), Some(0.5));
}

#[test]
fn keyword_query_is_normalized() {
    let (_store, index) = sample();
    let upper = index.suggest("en-US", "  BAR BAZ ", &GUIDE, MatchType::Keywords);
    assert_eq!(score_of(&upper, "a"), Some(1.0));

    let fullwidth = index.suggest("en-US", "ｂａｒ", &GUIDE, MatchType::Keywords);
    assert_eq!(score_of(&fullwidth, "a"), Some(0.5));
}

#[test]
fn keyword_zero_score_excluded() {
    let (_store, index) = sample();
    let qux = index.suggest("en-US", "qux", &GUIDE, MatchType::Keywords);
    assert_eq!(ids(&qux), ["b", "c"]);
    assert!(
        index.suggest("en-US", "nothing here", &GUIDE, MatchType::Keywords).is_empty(),
        "no keyword hit means no suggestion"
    );
}

#[test]
fn keyword_ranking() {
    let (_store, index) = sample();

    // a: 1/2, only-en: 1/2, c: 1/4, b: 1/4
    // ties are broken by the total amount of groups, then input order
    let bar = index.suggest("en-US", "bar", &GUIDE, MatchType::Keywords);
    assert_eq!(ids(&bar), ["a", "only-en", "b", "c"]);

    // c: 2/4 beats a: 1/2 on the group count
    let baz_qux = index.suggest("en-US", "baz qux", &GUIDE, MatchType::Keywords);
    assert_eq!(ids(&baz_qux)[..2], ["c", "a"]);
    assert_eq!(score_of(&baz_qux, "a"), Some(0.5));
    assert_eq!(score_of(&baz_qux, "c"), Some(0.5));

    let bar_qux = index.suggest("en-US", "bar qux", &GUIDE, MatchType::Keywords);
    assert_eq!(ids(&bar_qux)[..2], ["b", "c"]);
}

#[test]
fn keyword_prefers_native_locale() {
    let (_store, index) = sample();

    let bar = index.suggest("de", "bar", &GUIDE, MatchType::Keywords);
    // de: a 1/2, de-only 1/2; en fallback: only-en 1/2, b 1/4, c 1/4
    assert_eq!(ids(&bar), ["a", "de-only", "only-en", "b", "c"]);
    assert_eq!(bar[0].locale, "de");
    assert_eq!(bar[0].title, "Alpha (de)");
    assert_eq!(bar[2].locale, "en-US");
}

#[test]
fn cross_locale_extension_skips_known_ids() {
    let (_store, index) = sample();
    let bar = index.suggest("de", "bar", &GUIDE, MatchType::Keywords);
    assert_eq!(bar.iter().filter(|m| m.id == "a").count(), 1, "ids must be unique");
}

#[test]
fn unknown_locale_uses_default_entries() {
    let (_store, index) = sample();
    let bar = index.suggest("fr", "bar baz", &GUIDE, MatchType::Keywords);
    assert_eq!(bar.first().map(|m| m.locale.as_str()), Some("en-US"));
    assert_eq!(score_of(&bar, "a"), Some(1.0));
}

#[test]
fn part_of_keeps_order() {
    let (_store, index) = sample();

    let att = index.suggest("en-US", "att", &GLOSSARY, MatchType::PartOf);
    assert_eq!(ids(&att), ["atk", "atk-dup"]);
    assert!(att.iter().all(|m| m.score.is_none()), "part-of doesn't score");

    let speed = index.suggest("en-US", "Attack Speed", &GLOSSARY, MatchType::PartOf);
    assert_eq!(ids(&speed), ["atk-dup"]);

    assert!(
        index.suggest("en-US", "attack!", &GLOSSARY, MatchType::PartOf).is_empty(),
        "the query must be a part of a substring, not the other way around"
    );
}

#[test]
fn part_of_extends_from_default_locale() {
    let (_store, index) = sample();
    let def = index.suggest("de", "def", &GLOSSARY, MatchType::PartOf);
    assert_eq!(ids(&def), ["def"]);
    assert_eq!(def[0].locale, "en-US");
}

#[test]
fn suggestions_are_capped() {
    let mut json = String::from(r#"{ "version": "1", "locales": ["en-US", "de"], "en-US": { "big.search": ["#);
    for i in 0..40 {
        if i != 0 {
            json.push(',');
        }

        write!(json, r#"{{ "id": "en{i}", "title": "T", "keywordSets": [["item"]], "matchSubstrings": ["item"] }}"#)
            .expect("writing to a string cannot fail");
    }

    json.push_str(r#"] }, "de": { "big.search": ["#);
    for i in 0..10 {
        if i != 0 {
            json.push(',');
        }

        write!(json, r#"{{ "id": "de{i}", "title": "T", "keywordSets": [["item"]], "matchSubstrings": ["item"] }}"#)
            .expect("writing to a string cannot fail");
    }

    json.push_str("] } }");

    let (_store, index) = index(&json);
    let big = ResourceKey::from_static("big");

    for match_type in [MatchType::Keywords, MatchType::PartOf] {
        let en = index.suggest("en-US", "item", &big, match_type);
        assert_eq!(en.len(), MAX_SUGGESTIONS);

        let de = index.suggest("de", "item", &big, match_type);
        assert_eq!(de.len(), MAX_SUGGESTIONS);
        assert!(de[..10].iter().all(|m| m.locale == "de"), "native entries come first");
        assert!(de[10..].iter().all(|m| m.locale == "en-US"), "fallback fills the rest");
    }
}

#[test]
fn resolve_reference() {
    let (_store, index) = sample();

    // widget-7 isn't searchable, but a reference addresses it directly
    let resolved = index.resolve("de", "en-US:widget-7", &GUIDE, MatchType::Keywords);
    assert_eq!(
        resolved.map(|r| r.content),
        Some(ResourceValue::from("Widget content"))
    );

    let de = index.resolve("en-US", "de:a", &GUIDE, MatchType::Keywords);
    assert_eq!(de.map(|r| r.content), Some(ResourceValue::from("Alpha Inhalt")));

    // reference for a locale that doesn't exist is treated as a query
    assert_eq!(index.resolve("en-US", "xx:a", &GUIDE, MatchType::Keywords), None);
}

#[test]
fn resolve_reference_falls_back() {
    let (_store, index) = sample();
    let resolved = index.resolve("de", "de:b", &GUIDE, MatchType::Keywords);
    assert_eq!(resolved.map(|r| r.content), Some(ResourceValue::from("Beta content")));
}

#[test]
fn resolve_keyword_quality_gate() {
    let (_store, index) = sample();

    // "qux" only reaches 1/4 for c and b; suggested but not resolved
    assert!(
        !index.suggest("en-US", "qux", &GUIDE, MatchType::Keywords).is_empty(),
        "low scores are still suggested"
    );
    assert_eq!(index.resolve("en-US", "qux", &GUIDE, MatchType::Keywords), None);

    let resolved = index.resolve("en-US", "bar", &GUIDE, MatchType::Keywords);
    assert_eq!(resolved.as_ref().map(|r| r.id.as_str()), Some("a"));
    assert_eq!(
        resolved.and_then(|r| r.content.str_field("description").map(str::to_owned)),
        Some("The first.".to_owned())
    );
}

#[test]
fn resolve_part_of_takes_first() {
    let (_store, index) = sample();
    let resolved = index.resolve("en-US", "a", &GLOSSARY, MatchType::PartOf);
    assert_eq!(resolved.map(|r| r.id), Some("atk".to_owned()));
    assert_eq!(index.resolve("en-US", "zzz", &GLOSSARY, MatchType::PartOf), None);
}

#[test]
fn default_suggestions_keep_order() {
    let (_store, index) = sample();
    let defaults = index.default_suggestions("de", &GUIDE, &["c", "missing", "a", "de-only"]);
    assert_eq!(ids(&defaults), ["c", "a", "de-only"]);
    assert_eq!(defaults[0].locale, "en-US");
    assert_eq!(defaults[1].title, "Alpha (de)");
    assert!(defaults.iter().all(|m| m.score.is_none()), "defaults aren't scored");
}

#[test]
fn reload_is_visible() {
    let (store, index) = sample();
    assert!(
        !index.suggest("en-US", "bar", &GUIDE, MatchType::Keywords).is_empty(),
        "initial data must match"
    );

    let text = r#"{ "version": "2", "locales": ["en-US"], "en-US": {
        "guide.search": [{ "id": "z", "title": "Zeta", "keywordSets": [["zeta"]] }]
    } }"#;
    store.replace(Resources::parse(text, "en-US").expect("test resources must be valid"));

    assert!(
        index.suggest("en-US", "bar", &GUIDE, MatchType::Keywords).is_empty(),
        "old entries must be gone"
    );
    assert_eq!(ids(&index.suggest("en-US", "zeta", &GUIDE, MatchType::Keywords)), ["z"]);
}
