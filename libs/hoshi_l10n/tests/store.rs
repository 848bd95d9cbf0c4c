use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use hoshi_l10n::{L10n, MatchType, ResourceKey, ResourceLoadError, ResourceStore};

const GREETING: ResourceKey = ResourceKey::from_static("greeting");
const STAMP: ResourceKey = ResourceKey::from_static("stamp");
const GUIDE: ResourceKey = ResourceKey::from_static("guide");

fn resource_text(version: &str) -> String {
    format!(
        r#"{{
            "version": "{version}",
            "locales": ["en-US", "de"],
            "en-US": {{
                "greeting": "Hello v{version}",
                "stamp": "{version}",
                "guide.search": [{{ "id": "g{version}", "title": "Guide {version}", "keywordSets": [["guide"]] }}],
                "guide.content.g{version}": "Content {version}"
            }},
            "de": {{
                "greeting": "Hallo v{version}",
                "stamp": "{version}"
            }}
        }}"#
    )
}

fn write(path: &Path, text: &str) {
    fs::write(path, text).expect("temp file must be writable");
}

#[test]
fn load_from_file() {
    let dir = tempfile::tempdir().expect("temp dir must be creatable");
    let path = dir.path().join("resources.json");
    write(&path, &resource_text("1"));

    let store = ResourceStore::load(&path, "en-US").expect("resources must load");
    assert_eq!(store.version(), "1");
    assert_eq!(store.locales(), ["en-US", "de"]);
    assert_eq!(store.get_str("de", &GREETING).as_deref(), Some("Hallo v1"));
    assert_eq!(store.get_str("fr", &GREETING).as_deref(), Some("Hello v1"));
}

#[test]
fn load_missing_file() {
    let dir = tempfile::tempdir().expect("temp dir must be creatable");
    let err = ResourceStore::load(dir.path().join("nope.json"), "en-US").expect_err("file doesn't exist");
    assert!(matches!(err, ResourceLoadError::Read { .. }), "got {err:?}");
}

#[test]
fn reload_swaps_data() {
    let dir = tempfile::tempdir().expect("temp dir must be creatable");
    let path = dir.path().join("resources.json");
    write(&path, &resource_text("1"));

    let l10n = L10n::load(&path, "en-US").expect("resources must load");
    let old = l10n.store().snapshot();

    write(&path, &resource_text("2"));
    l10n.store().reload().expect("reload must succeed");

    assert_eq!(l10n.store().version(), "2");
    assert_eq!(l10n.templater().format("en-US", &GREETING, &[]), "Hello v2");

    let guides = l10n.autocomplete().suggest("en-US", "guide", &GUIDE, MatchType::Keywords);
    assert_eq!(guides.len(), 1);
    assert_eq!(guides[0].id, "g2");

    // a snapshot taken before the reload stays intact
    assert_eq!(old.version(), "1");
    assert_eq!(
        old.get("en-US", &GREETING).and_then(|v| v.as_str()),
        Some("Hello v1")
    );
}

#[test]
fn failed_reload_keeps_data() {
    let dir = tempfile::tempdir().expect("temp dir must be creatable");
    let path = dir.path().join("resources.json");
    write(&path, &resource_text("1"));

    let store = ResourceStore::load(&path, "en-US").expect("resources must load");

    write(&path, "{ not json");
    let err = store.reload().expect_err("broken file must fail");
    assert!(matches!(err, ResourceLoadError::Parse(_)), "got {err:?}");
    assert_eq!(store.version(), "1");

    write(&path, r#"{ "version": "3", "locales": ["de"], "de": {} }"#);
    let err = store.reload().expect_err("default locale is required");
    assert!(matches!(err, ResourceLoadError::MissingDefaultLocale(_)), "got {err:?}");
    assert_eq!(store.get_str("en-US", &GREETING).as_deref(), Some("Hello v1"));

    fs::remove_file(&path).expect("temp file must be removable");
    let err = store.reload().expect_err("missing file must fail");
    assert!(matches!(err, ResourceLoadError::Read { .. }), "got {err:?}");
    assert_eq!(store.version(), "1");
}

#[test]
fn readers_never_see_mixed_data() {
    let dir = tempfile::tempdir().expect("temp dir must be creatable");
    let path = dir.path().join("resources.json");
    write(&path, &resource_text("0"));

    let store = Arc::new(ResourceStore::load(&path, "en-US").expect("resources must load"));
    let done = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut reads = 0_u32;
                while !done.load(Ordering::Relaxed) || reads == 0 {
                    let snapshot = store.snapshot();
                    let version = snapshot.version();

                    for locale in ["en-US", "de"] {
                        let stamp = snapshot.get(locale, &STAMP).and_then(|v| v.as_str());
                        assert_eq!(stamp, Some(version), "stamp must match the snapshot version");
                    }

                    reads += 1;
                }
            })
        })
        .collect();

    for version in 1..=20 {
        write(&path, &resource_text(&version.to_string()));
        store.reload().expect("reload must succeed");
    }

    done.store(true, Ordering::Relaxed);
    for reader in readers {
        reader.join().expect("reader must not panic");
    }

    assert_eq!(store.version(), "20");
}
