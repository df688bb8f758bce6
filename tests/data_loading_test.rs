//! Integration test: Content directory loading
//!
//! Writes content files to a scratch directory and loads them the way the
//! binary does, through `GameConfig`.

use std::fs;
use std::path::{Path, PathBuf};
use textcraft::core::{DataError, GameConfig};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("textcraft-test-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn config_for(dir: &Path) -> GameConfig {
    GameConfig {
        data_dir: Some(dir.to_path_buf()),
        ..Default::default()
    }
}

// =========================================================================
// Overrides
// =========================================================================

#[test]
fn test_override_replaces_only_that_file() {
    let dir = scratch_dir("override");
    fs::write(
        dir.join("foods.json"),
        r#"{"Golden Carrot": {"hunger": 6, "saturation": 14.4}}"#,
    )
    .unwrap();

    let data = config_for(&dir).load_data().unwrap();
    assert_eq!(data.foods.len(), 1);
    assert!(data.foods.contains("Golden Carrot"));
    assert!(!data.foods.contains("Bread"));
    // Untouched files come from the built-in content
    assert!(data.mobs.contains("Zombie"));
    assert!(data.recipes.get("Planks").is_ok());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_custom_bestiary_drives_spawns() {
    let dir = scratch_dir("bestiary");
    fs::write(
        dir.join("mobs.json"),
        r#"[
            {"name": "Slime", "weight": 3, "HP": 4, "behavior": "hostile", "attack_strength": 1},
            {"name": "Bat", "weight": 1, "HP": 6, "behavior": "passive"}
        ]"#,
    )
    .unwrap();

    let data = config_for(&dir).load_data().unwrap();
    assert_eq!(data.mobs.len(), 2);
    assert_eq!(data.mobs.spawn_table().total_weight(), 4.0);

    fs::remove_dir_all(&dir).unwrap();
}

// =========================================================================
// Configuration errors are fatal and name the field
// =========================================================================

#[test]
fn test_bad_enum_value_names_record_and_field() {
    let dir = scratch_dir("bad-enum");
    fs::write(
        dir.join("mobs.json"),
        r#"[{"name": "Ghast", "weight": 1, "HP": 10, "behavior": "angry", "attack_strength": 3}]"#,
    )
    .unwrap();

    let err = config_for(&dir).load_data().unwrap_err();
    assert_eq!(err.record(), Some("Ghast"));
    assert_eq!(err.field(), Some("behavior"));
    let message = err.to_string();
    assert!(message.contains("mobs.json"), "{message}");
    assert!(message.contains("angry"), "{message}");

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_malformed_range_in_recipe_tool_data() {
    let dir = scratch_dir("bad-tier");
    fs::write(
        dir.join("recipes.json"),
        r#"{"Netherite Pickaxe": {
            "components": [["Netherite Ingot", 1]],
            "tool_data": {"damage": 6, "durability": 2031, "mining_tier": 5}
        }}"#,
    )
    .unwrap();

    let err = config_for(&dir).load_data().unwrap_err();
    assert_eq!(err.record(), Some("Netherite Pickaxe"));
    assert_eq!(err.field(), Some("tool_data.mining_tier"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_invalid_json_is_reported() {
    let dir = scratch_dir("bad-json");
    fs::write(dir.join("foods.json"), "{ not json").unwrap();

    let err = config_for(&dir).load_data().unwrap_err();
    assert!(matches!(err, DataError::Json { .. }));
    assert_eq!(err.field(), None);

    fs::remove_dir_all(&dir).unwrap();
}
