//! Tests for preference persistence through a file store.

use nextoe::{
    FileStore, Outcome, PreferenceStore, Preferences, SCORES_KEY, Scoreboard, SharedPreferences,
    THEME_KEY, Theme,
};
use serde_json::json;

#[test]
fn test_scores_and_theme_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");

    {
        let prefs = SharedPreferences::new(Preferences::load(FileStore::open(&path).unwrap()));
        prefs.record_outcome(Outcome::PlayerWin).unwrap();
        prefs.record_outcome(Outcome::Draw).unwrap();
        prefs.record_outcome(Outcome::Draw).unwrap();
        assert_eq!(prefs.toggle_theme().unwrap(), Theme::Light);
    }

    let prefs = Preferences::load(FileStore::open(&path).unwrap());
    assert_eq!(prefs.scores(), Scoreboard::new(1, 0, 2));
    assert_eq!(prefs.theme(), Theme::Light);
}

#[test]
fn test_file_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("prefs.json");

    let mut prefs = Preferences::load(FileStore::open(&path).unwrap());
    prefs.record_outcome(Outcome::AiWin).unwrap();

    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(stored[SCORES_KEY], json!({"player": 0, "ai": 1, "draws": 0}));
    assert!(stored.get(THEME_KEY).is_none());
}

#[test]
fn test_reset_scores_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");

    let mut prefs = Preferences::load(FileStore::open(&path).unwrap());
    prefs.record_outcome(Outcome::AiWin).unwrap();
    prefs.reset_scores().unwrap();

    let store = FileStore::open(&path).unwrap();
    assert_eq!(
        store.read(SCORES_KEY).unwrap(),
        Some(json!({"player": 0, "ai": 0, "draws": 0}))
    );
}

#[test]
fn test_unknown_keys_are_kept() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    std::fs::write(&path, r#"{"other-app": true, "nextoe-theme": "light"}"#).unwrap();

    let mut prefs = Preferences::load(FileStore::open(&path).unwrap());
    assert_eq!(prefs.theme(), Theme::Light);
    prefs.toggle_theme().unwrap();

    let store = FileStore::open(&path).unwrap();
    assert_eq!(store.read("other-app").unwrap(), Some(json!(true)));
    assert_eq!(store.read(THEME_KEY).unwrap(), Some(json!("dark")));
}

#[test]
fn test_truncated_file_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    std::fs::write(&path, r#"{"nextoe-scores": {"player": 4, "ai""#).unwrap();

    let mut prefs = Preferences::load(FileStore::open(&path).unwrap());
    assert_eq!(prefs.scores(), Scoreboard::default());
    assert_eq!(prefs.theme(), Theme::Dark);

    prefs.record_outcome(Outcome::Draw).unwrap();
    let prefs = Preferences::load(FileStore::open(&path).unwrap());
    assert_eq!(prefs.scores(), Scoreboard::new(0, 0, 1));
}
