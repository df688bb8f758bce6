//! Integration test: Encounter state machine end to end
//!
//! Drives whole encounters through the public API with a rigged random
//! source, from spawn to resolution.

use textcraft::character::Player;
use textcraft::combat::{run_encounter, EncounterOutcome, Location, Mob};
use textcraft::core::chance::Rigged;
use textcraft::core::constants::EXPLOSION_DEATH_CAUSE;
use textcraft::core::{Dialogue, Frontend, GameEvent, Menu};
use textcraft::data::{parse_mobs, GameData};
use textcraft::items::{Tool, ToolData};

/// Always answers with the first option and keeps everything it is shown.
#[derive(Default)]
struct Eager {
    shown: Vec<GameEvent>,
    asked: usize,
}

impl Frontend for Eager {
    fn present(&mut self, events: &[GameEvent]) {
        self.shown.extend_from_slice(events);
    }

    fn choose(&mut self, _menu: &Menu) -> usize {
        self.asked += 1;
        0
    }
}

fn fight(player: &mut Player, mob: Mob<'_>, location: Location) -> (EncounterOutcome, Eager) {
    let mut frontend = Eager::default();
    let outcome = {
        let mut dialogue = Dialogue::new(&mut frontend);
        let outcome = run_encounter(player, mob, location, &mut dialogue, &mut Rigged::lucky())
            .expect("encounter should not error");
        dialogue.flush();
        outcome
    };
    (outcome, frontend)
}

fn sword(damage: i32) -> Tool {
    Tool::new(
        "Test Sword",
        &ToolData {
            damage,
            durability: 100,
            attack_speed: 1.6,
            ..Default::default()
        },
    )
}

// =========================================================================
// Hostile mob dies in the expected number of turns
// =========================================================================

const TEST_MOBS: &str = r#"[
    {
        "name": "Training Dummy",
        "weight": 1,
        "HP": 6,
        "behavior": "hostile",
        "attack_strength": 4,
        "death_drops": [
            {"item": "Rotten Flesh", "quantity": 5, "chance": [1, 1]}
        ]
    }
]"#;

#[test]
fn test_mob_with_6_hp_dies_in_two_hits_of_3() {
    let mobs = parse_mobs("mobs.json", TEST_MOBS).unwrap();
    let mut player = Player::new();
    player.add_tool(sword(3));
    player.equip(Some(0)).unwrap();

    let (outcome, frontend) = fight(
        &mut player,
        mobs.new_mob("Training Dummy").unwrap(),
        Location::Exploring,
    );

    assert_eq!(outcome, EncounterOutcome::MobDied);
    let hits = frontend
        .shown
        .iter()
        .filter(|e| matches!(e, GameEvent::PlayerHit { .. }))
        .count();
    assert_eq!(hits, 2, "6 HP at 3 damage per hit is exactly two turns");
    assert!(frontend.shown.contains(&GameEvent::MobDied {
        mob: "Training Dummy".to_string()
    }));
}

#[test]
fn test_certain_death_drop_grants_exact_quantity() {
    let mobs = parse_mobs("mobs.json", TEST_MOBS).unwrap();
    for _ in 0..20 {
        let mut player = Player::new();
        player.add_tool(sword(3));
        player.equip(Some(0)).unwrap();
        fight(
            &mut player,
            mobs.new_mob("Training Dummy").unwrap(),
            Location::Exploring,
        );
        assert_eq!(player.inventory.count("Rotten Flesh"), 5);
    }
}

#[test]
fn test_mob_retaliates_once_before_dying() {
    let mobs = parse_mobs("mobs.json", TEST_MOBS).unwrap();
    let mut player = Player::new();
    player.add_tool(sword(3));
    player.equip(Some(0)).unwrap();
    fight(
        &mut player,
        mobs.new_mob("Training Dummy").unwrap(),
        Location::Exploring,
    );
    // One retaliation of strength 4 between the two hits
    assert_eq!(player.hp, 16);
    assert_eq!(player.tools[0].durability, 98);
}

// =========================================================================
// Exploding mobs
// =========================================================================

#[test]
fn test_creeper_explodes_without_death_loot() {
    let data = GameData::builtin().unwrap();
    let mut player = Player::new();

    let (outcome, frontend) = fight(
        &mut player,
        data.mobs.new_mob("Creeper").unwrap(),
        Location::Exploring,
    );

    assert_eq!(outcome, EncounterOutcome::Exploded);
    assert!(frontend.shown.contains(&GameEvent::Explodes {
        mob: "Creeper".to_string()
    }));
    assert!(!frontend
        .shown
        .iter()
        .any(|e| matches!(e, GameEvent::MobDied { .. })));
    assert_eq!(player.inventory.count("Gunpowder"), 0);
    // Maximum of the damage draws with integers pinned high
    assert_eq!(player.hp, 5);
}

#[test]
fn test_charged_creeper_kills_weakened_player() {
    let data = GameData::builtin().unwrap();
    let mut player = Player::new();
    player.hp = 10;

    let (outcome, _) = fight(
        &mut player,
        data.mobs.new_mob("Charged Creeper").unwrap(),
        Location::Mining,
    );

    assert_eq!(outcome, EncounterOutcome::PlayerDied);
    assert!(player.is_dead());
    assert_eq!(player.death_cause(), Some(EXPLOSION_DEATH_CAUSE));
}

// =========================================================================
// Builtin bestiary
// =========================================================================

#[test]
fn test_every_builtin_mob_resolves() {
    let data = GameData::builtin().unwrap();
    for kind in data.mobs.iter() {
        let mut player = Player::new();
        player.add_tool(sword(50));
        player.equip(Some(0)).unwrap();
        let (outcome, frontend) = fight(&mut player, Mob::new(kind), Location::Exploring);
        assert_ne!(
            outcome,
            EncounterOutcome::Disengaged,
            "{} should not end with the player walking away",
            kind.name
        );
        assert!(frontend.asked >= 1, "{} never asked for a decision", kind.name);
    }
}
