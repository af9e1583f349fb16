use std::path::PathBuf;

use gams_catalog::{EditError, Game, parse_catalog, render_document};

const DOC: &str = r#"var gamsList = [
  {title: "Custom", type: "section"},
  {name: "Slope"},
  {name: "Drive Mad"},
  {title: "Unity", type: "section"},
  {name: "Cookie Clicker", href: "g/g/cookie/index.html", img: "img/cookie.jpg"},
  {title: "Empty", type: "section"},
];"#;

#[test]
fn insert_into_missing_section_fails() {
    let mut catalog = parse_catalog(DOC).unwrap();
    let before = catalog.clone();
    let err = catalog.insert_game("Nope", Game::new("X")).unwrap_err();
    assert_eq!(err, EditError::SectionNotFound("Nope".to_string()));
    assert_eq!(catalog, before);
}

#[test]
fn insert_reports_position_and_slug_collisions() {
    let mut catalog = parse_catalog(DOC).unwrap();
    let report = catalog.insert_game("Unity", Game::new("DriveMad")).unwrap();
    assert_eq!(report.section, 1);
    assert_eq!(report.position, 1);
    assert_eq!(report.slug_collisions.len(), 1);
    assert_eq!(report.slug_collisions[0].name, "Drive Mad");
    assert_eq!(report.slug_collisions[0].section, "Custom");
}

#[test]
fn insert_into_empty_section() {
    let mut catalog = parse_catalog(DOC).unwrap();
    let report = catalog.insert_game("Empty", Game::new("Tetris")).unwrap();
    assert_eq!((report.section, report.position), (2, 0));
    assert!(report.slug_collisions.is_empty());
    let out = render_document(&catalog, DOC).unwrap();
    assert!(out.ends_with("{title: \"Empty\", type: \"section\"},\n  {name: \"Tetris\"},\n];"));
}

#[test]
fn duplicate_names_are_not_rejected() {
    let mut catalog = parse_catalog(DOC).unwrap();
    catalog.insert_game("Unity", Game::new("Slope")).unwrap();
    assert_eq!(catalog.game_count(), 4);
}

#[test]
fn create_section_rejects_existing_title() {
    let mut catalog = parse_catalog(DOC).unwrap();
    assert_eq!(
        catalog.create_section("Unity").unwrap_err(),
        EditError::DuplicateSection("Unity".to_string())
    );
    assert_eq!(catalog.create_section("unity").unwrap(), 3);
    assert!(catalog.section("unity").unwrap().is_empty());
}

#[test]
fn remove_returns_resolved_paths() {
    let mut catalog = parse_catalog(DOC).unwrap();
    let removed = catalog.remove_game("Cookie Clicker").unwrap();
    assert_eq!(removed.section, "Unity");
    assert_eq!(removed.position, 0);
    assert_eq!(removed.file_path, "g/g/cookie/index.html");
    assert_eq!(removed.image_path, "img/cookie.jpg");

    // The section survives even though it is now empty.
    assert!(catalog.section("Unity").unwrap().is_empty());
}

#[test]
fn remove_default_paths() {
    let mut catalog = parse_catalog(DOC).unwrap();
    let removed = catalog.remove_game("Drive Mad").unwrap();
    assert_eq!(removed.file_path, "g/g/drivemad.html");
    assert_eq!(removed.image_path, "img/drivemad.png");
}

#[test]
fn remove_is_case_sensitive_and_first_match() {
    let mut catalog = parse_catalog(DOC).unwrap();
    assert_eq!(
        catalog.remove_game("slope").unwrap_err(),
        EditError::GameNotFound("slope".to_string())
    );

    catalog.insert_game("Unity", Game::new("Slope")).unwrap();
    let removed = catalog.remove_game("Slope").unwrap();
    assert_eq!(removed.section, "Custom");
    assert!(catalog.section("Unity").unwrap().games().iter().any(|g| g.name() == "Slope"));
}

#[test]
fn remove_leaves_other_entries_untouched() {
    let mut catalog = parse_catalog(DOC).unwrap();
    catalog.remove_game("Slope").unwrap();
    let out = render_document(&catalog, DOC).unwrap();
    assert_eq!(out, DOC.replace("\n  {name: \"Slope\"},", ""));
}

#[test]
fn remove_at_position() {
    let mut catalog = parse_catalog(DOC).unwrap();
    assert_eq!(
        catalog.remove_game_at(2, 0).unwrap_err(),
        EditError::PositionOutOfRange {
            section: 2,
            position: 0
        }
    );
    let removed = catalog.remove_game_at(0, 1).unwrap();
    assert_eq!(removed.game.name(), "Drive Mad");
}

#[test]
fn unreferenced_candidate_paths() {
    let catalog = parse_catalog(DOC).unwrap();
    let candidates = [
        "g/g/slope.html",
        "g/g/drivemad.html",
        "g/g/cookie",
        "g/g/old.html",
        "g/g/slope",
    ];
    assert_eq!(
        catalog.unreferenced_paths(&candidates),
        vec![PathBuf::from("g/g/old.html"), PathBuf::from("g/g/slope")]
    );
    assert_eq!(catalog.unreferenced_paths(&[""]), vec![PathBuf::from("")]);
}

#[test]
fn removing_entry_takes_its_inline_comment() {
    let doc = "var gamsList = [\n  {title: \"A\"}, // arcade\n  {name: \"X\"}, // X is great\n  {name: \"Y\"},\n];";
    let mut catalog = parse_catalog(doc).unwrap();
    catalog.remove_game("X").unwrap();
    let out = render_document(&catalog, doc).unwrap();
    assert_eq!(
        out,
        "var gamsList = [\n  {title: \"A\"}, // arcade\n  {name: \"Y\"},\n];"
    );
    assert_eq!(render_document(&parse_catalog(doc).unwrap(), doc).unwrap(), doc);
}
