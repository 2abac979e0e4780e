use std::path::PathBuf;

use nonpb_terminal::hierarchy::{Category, LoadError, load, load_from_path};

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

#[test]
fn loads_pitch_fixture_in_file_order() {
    let hierarchy = load(&fixture_dir(), Category::Pitch).expect("fixture should load");
    assert_eq!(hierarchy.years().collect::<Vec<_>>(), vec!["2023", "2019"]);

    let leagues = hierarchy.year("2023").expect("2023 exists");
    assert_eq!(leagues.keys().collect::<Vec<_>>(), vec!["Central", "Pacific"]);

    let roster = hierarchy
        .roster("2023", "Central", "Giants")
        .expect("roster exists");
    assert_eq!(roster.len(), 3);
    assert_eq!(roster[0].local_name, "山田");
    assert_eq!(roster[0].romanized_name, "Yamada");
    assert_eq!(roster[0].image_ids, vec!["id1", "id2"]);
    // Short id lists are kept as-is.
    assert_eq!(roster[1].image_ids, vec!["id3"]);
}

#[test]
fn missing_category_file_is_not_found() {
    let err = load(&fixture_dir(), Category::Bat).expect_err("bat.json is absent");
    match err {
        LoadError::NotFound { path } => assert!(path.ends_with("bat.json")),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn nonexistent_path_is_not_found() {
    let err = load_from_path(&fixture_path("nope/never.json")).expect_err("missing");
    assert!(matches!(err, LoadError::NotFound { .. }));
    assert!(err.to_string().contains("never.json"));
}

#[test]
fn truncated_json_is_malformed() {
    let err = load_from_path(&fixture_path("malformed.json")).expect_err("truncated");
    assert!(matches!(err, LoadError::MalformedData { .. }));
}

#[test]
fn wrong_nesting_is_malformed() {
    let err = load_from_path(&fixture_path("wrong_shape.json")).expect_err("list instead of map");
    match err {
        LoadError::MalformedData { detail, .. } => assert!(!detail.is_empty()),
        other => panic!("expected MalformedData, got {other:?}"),
    }
}

#[test]
fn non_utf8_content_is_malformed() {
    let err = load_from_path(&fixture_path("not_utf8.json")).expect_err("invalid utf-8");
    match err {
        LoadError::MalformedData { path, .. } => assert!(path.ends_with("not_utf8.json")),
        other => panic!("expected MalformedData, got {other:?}"),
    }
}
