//! Level loading end to end: JSON files on disk through to a playable board.

use std::fs;

use serde_json::json;

use kali_crush::core::{create_initial_board, first_legal_move, validate_board_invariants};
use kali_crush::level::{default_level, load_level, parse_level};
use kali_crush::types::{Color, Coord, Objective};

#[test]
fn test_load_level_from_disk() {
    let dir = std::env::temp_dir().join("kali-crush-level-test");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("level.json");
    let fixture = json!({
        "id": 3,
        "rows": 7,
        "cols": 7,
        "moves": 15,
        "colors": ["aurora", "solstice", "abyss", "ion"],
        "objectives": [
            { "kind": "score", "target": 800 },
            { "kind": "clearIce", "target": 1 }
        ],
        "ice": [[3, 3]]
    });
    fs::write(&path, fixture.to_string()).unwrap();

    let level = load_level(&path).unwrap();
    assert_eq!(level.id, 3);
    assert_eq!(level.colors.len(), 4);
    assert_eq!(level.ice, vec![(Coord::new(3, 3), 1)]);

    let board = create_initial_board(&level, 5);
    assert!(board.candy(Coord::new(3, 3)).is_none());
    assert!(first_legal_move(&board).is_some());
    assert!(validate_board_invariants(&board).is_empty());
}

#[test]
fn test_load_level_missing_file() {
    let err = load_level("/nonexistent/level.json").unwrap_err();
    assert!(format!("{:#}", err).contains("level.json"));
}

#[test]
fn test_parse_rejects_malformed_json() {
    assert!(parse_level("{ not json").is_err());
    assert!(parse_level("{}").is_err());
}

#[test]
fn test_parse_rejects_unknown_objective_kind() {
    assert!(parse_level(
        r#"{
            "id": 1, "rows": 4, "cols": 4, "moves": 5,
            "colors": ["aurora"],
            "objectives": [{ "kind": "collectStars", "target": 3 }]
        }"#,
    )
    .is_err());
}

#[test]
fn test_default_level_produces_playable_board() {
    let level = default_level();
    let board = create_initial_board(&level, 1);

    assert!(first_legal_move(&board).is_some());
    assert!(validate_board_invariants(&board).is_empty());
    // The built-in jelly patch survives board generation
    assert!(board.cell(Coord::new(3, 3)).unwrap().jelly > 0);
    assert!(level
        .objectives
        .iter()
        .any(|o| matches!(o, Objective::ClearJelly { .. })));
    assert_eq!(level.colors, Color::ALL.to_vec());
}
