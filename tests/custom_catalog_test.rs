//! Loading emotion catalogs from JSON files

mod common;

use std::fs;

use common::{play_matching_perfectly, seeded_rng};
use emozion::Tier;
use emozion::catalog::{CatalogError, EmotionCatalog};
use emozion::game::MatchingEngine;
use tempfile::TempDir;

const SMALL_CATALOG: &str = r#"[
    {"id": "joy", "name": "Joy", "image_path": "faces/joy.png", "tiers": ["easy", "medium", "hard"]},
    {"id": "fear", "name": "Fear", "image_path": "faces/fear.png", "tiers": ["easy", "medium", "hard"]},
    {"id": "anger", "name": "Anger", "image_path": "faces/anger.png", "tiers": ["medium", "hard"]},
    {"id": "disgust", "name": "Disgust", "image_path": "faces/disgust.png", "tiers": ["hard"]}
]"#;

#[test]
fn test_custom_catalog_drives_a_board() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    fs::write(&path, SMALL_CATALOG).unwrap();

    let catalog = EmotionCatalog::from_file(&path).unwrap();
    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog.emotions_for_tier(Tier::Medium).len(), 3);

    let mut engine = MatchingEngine::start(Tier::Hard, &catalog, &mut seeded_rng(11));
    assert_eq!(engine.total_pairs(), 4);
    let record = play_matching_perfectly(&mut engine);
    assert_eq!(record.attempts, Some(4));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = EmotionCatalog::from_file(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, CatalogError::IoError(_)));
}

#[test]
fn test_three_emotions_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    let trimmed: Vec<serde_json::Value> = serde_json::from_str::<Vec<serde_json::Value>>(SMALL_CATALOG)
        .unwrap()
        .into_iter()
        .take(3)
        .collect();
    fs::write(&path, serde_json::to_string(&trimmed).unwrap()).unwrap();

    let err = EmotionCatalog::from_file(&path).unwrap_err();
    assert!(matches!(err, CatalogError::TooSmall { found: 3 }));
}
