//! The encounter state machine.
//!
//! An encounter runs from the moment a mob is sampled until one side is
//! dead, the player walks away, or an exploding mob goes off:
//!
//! ```text
//! start -> [pre-emptive strike] -> choice -> turn loop -> outcome
//! ```
//!
//! Each turn the player swings (miss, fleeing miss or hit), a passive mob
//! may start running, an exploding mob may go off, any other mob may hit
//! back, and the player's clock ticks once.

use super::explosion::explosion_loot;
use super::mob::{Bestiary, Mob};
use crate::character::Player;
use crate::core::chance::{int_range, one_in, round_stochastic, x_in_y, RandomSource};
use crate::core::constants::*;
use crate::core::error::GameError;
use crate::core::events::{Dialogue, Durability, GameEvent, Menu, MenuOption, FLEEING_MISS_STYLES};
use crate::items::{roll_drops, Loot};
use serde::{Deserialize, Serialize};

/// Where the player was when the mob turned up. Decides what an explosion
/// breaks loose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    Exploring,
    Mining,
}

impl Location {
    pub fn verb(&self) -> &'static str {
        match self {
            Location::Exploring => "exploring",
            Location::Mining => "mining",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterOutcome {
    MobDied,
    /// The player fled or ignored the mob.
    Disengaged,
    Exploded,
    PlayerDied,
}

/// Adds loot to the player and reports it.
pub fn grant_loot(
    player: &mut Player,
    loot: Loot,
    rng: &mut impl RandomSource,
    log: &mut Vec<GameEvent>,
) {
    for amount in loot.exp {
        player.gain_exp(amount as f64, rng, log);
    }
    if loot.items.is_empty() {
        return;
    }
    for (item, amount) in &loot.items {
        player.add_item(item, *amount);
    }
    log.push(GameEvent::ItemsGained { items: loot.items });
}

/// Offers the weapon list and equips the pick. Cancel keeps the current
/// weapon.
pub fn switch_weapon(player: &mut Player, dialogue: &mut Dialogue<'_>) -> Result<(), GameError> {
    if player.tools.is_empty() {
        return Ok(());
    }
    let mut options: Vec<MenuOption> = player
        .tools
        .iter()
        .map(|t| MenuOption::Tool {
            name: t.name.clone(),
            durability: Durability {
                current: t.durability,
                max: t.max_durability,
            },
        })
        .collect();
    options.push(MenuOption::Unarmed);
    options.push(MenuOption::Cancel);
    let menu = Menu::with_prompt("Which weapon would you like to switch to?", options);
    let slot = match dialogue.ask(&menu)? {
        MenuOption::Tool { name, .. } => player.tools.iter().position(|t| t.name == name),
        MenuOption::Unarmed => None,
        _ => return Ok(()),
    };
    player.equip(slot)?;
    dialogue.emit(GameEvent::Switched {
        weapon: player.weapon().map(|t| t.name.clone()),
    });
    Ok(())
}

struct Battle<'a> {
    mob: Mob<'a>,
    location: Location,
    /// Turns left before a fleeing passive mob stops running.
    fleeing: u32,
    /// Turns the exploding mob has been fighting.
    fuse: u32,
}

impl<'a> Battle<'a> {
    fn name(&self) -> String {
        self.mob.name().to_string()
    }

    fn disengage_option(&self) -> MenuOption {
        if self.mob.is_hostile() {
            MenuOption::Flee
        } else {
            MenuOption::Ignore
        }
    }

    fn keep_fighting(&self, dialogue: &mut Dialogue<'_>) -> Result<bool, GameError> {
        let menu = Menu::new(vec![MenuOption::Attack, self.disengage_option()]);
        Ok(dialogue.ask(&menu)? == MenuOption::Attack)
    }

    /// One pass through the turn loop. `Some` ends the encounter.
    fn turn(
        &mut self,
        player: &mut Player,
        rng: &mut impl RandomSource,
        log: &mut Vec<GameEvent>,
    ) -> Result<Option<EncounterOutcome>, GameError> {
        if self.fleeing > 0 {
            self.fleeing -= 1;
            if self.fleeing == 0 {
                log.push(GameEvent::MobStopsRunning { mob: self.name() });
            }
        }

        let evasive = self.mob.kind.evasive;
        let miss_odds = if evasive { EVASIVE_MISS_ONE_IN } else { MISS_ONE_IN };
        if one_in(rng, miss_odds) {
            if evasive {
                log.push(GameEvent::MobTeleported { mob: self.name() });
            } else {
                log.push(GameEvent::PlayerMissed { mob: self.name() });
            }
        } else if self.fleeing > 0
            && !one_in(rng, FLEEING_CONNECT_ONE_IN)
            && x_in_y(rng, 1.0, player.attack_speed() + 1.0)
        {
            let style = int_range(rng, 0, FLEEING_MISS_STYLES as i64 - 1) as usize;
            log.push(GameEvent::FleeingMiss {
                mob: self.name(),
                style,
            });
        } else {
            let base = player.attack_damage();
            let mut damage = base;
            if one_in(rng, CRIT_ONE_IN) {
                damage = (damage as f64 * CRIT_MULTIPLIER) as i32;
            }
            log.push(GameEvent::PlayerHit {
                mob: self.name(),
                critical: damage > base,
            });
            player.decrement_tool_durability(log);
            if self.mob.take_damage(damage) {
                log.push(GameEvent::MobDied { mob: self.name() });
                let loot = roll_drops(&self.mob.kind.death_drops, rng);
                grant_loot(player, loot, rng, log);
                return Ok(Some(EncounterOutcome::MobDied));
            }
            if self.mob.is_passive()
                && self.fleeing == 0
                && !one_in(rng, (damage.max(0) as u32).saturating_add(1))
            {
                log.push(GameEvent::MobFlees { mob: self.name() });
                self.fleeing = int_range(rng, FLEE_TURNS_MIN, FLEE_TURNS_MAX) as u32;
            }
        }

        if self.mob.kind.explodes {
            self.fuse += 1;
            if self.fuse > EXPLOSION_GRACE_TURNS && !one_in(rng, self.fuse) {
                return self.explode(player, rng, log).map(Some);
            }
            log.push(GameEvent::Flashes { mob: self.name() });
        } else if !self.mob.is_passive()
            && x_in_y(rng, 1.0, player.attack_speed())
            && !one_in(rng, RETALIATE_MISS_ONE_IN)
        {
            log.push(GameEvent::MobAttacks { mob: self.name() });
            let damage = round_stochastic(rng, self.mob.attack_strength()) as i32;
            if player.damage(damage, None, true, log) {
                return Ok(Some(EncounterOutcome::PlayerDied));
            }
        }

        player.tick(true, rng, log);
        player.add_exhaustion(EXHAUSTION_BATTLE_TURN);
        if player.is_dead() {
            return Ok(Some(EncounterOutcome::PlayerDied));
        }
        Ok(None)
    }

    fn explode(
        &mut self,
        player: &mut Player,
        rng: &mut impl RandomSource,
        log: &mut Vec<GameEvent>,
    ) -> Result<EncounterOutcome, GameError> {
        let strength = (self.mob.attack_strength().floor() as i64).max(1);
        let damage = (0..EXPLOSION_DAMAGE_DRAWS)
            .map(|_| int_range(rng, 1, strength))
            .max()
            .unwrap_or(1) as i32;
        log.push(GameEvent::Explodes { mob: self.name() });
        log::debug!("{} exploded for {} after {} turns", self.name(), damage, self.fuse);
        if player.damage(damage, Some(EXPLOSION_DEATH_CAUSE), true, log) {
            return Ok(EncounterOutcome::PlayerDied);
        }
        let items = explosion_loot(self.mob.kind.explosion_power, self.location, rng)?;
        if !items.is_empty() {
            for (item, amount) in &items {
                player.add_item(item, *amount);
            }
            log.push(GameEvent::ExplosionLoot { items });
        }
        Ok(EncounterOutcome::Exploded)
    }
}

/// Runs one encounter with a mob sampled from the spawn table.
pub fn random_encounter(
    player: &mut Player,
    bestiary: &Bestiary,
    location: Location,
    dialogue: &mut Dialogue<'_>,
    rng: &mut impl RandomSource,
) -> Result<EncounterOutcome, GameError> {
    let mob = bestiary.spawn(rng)?;
    run_encounter(player, mob, location, dialogue, rng)
}

/// Runs one encounter against `mob` until it resolves.
pub fn run_encounter(
    player: &mut Player,
    mob: Mob<'_>,
    location: Location,
    dialogue: &mut Dialogue<'_>,
    rng: &mut impl RandomSource,
) -> Result<EncounterOutcome, GameError> {
    let mut battle = Battle {
        mob,
        location,
        fleeing: 0,
        fuse: 0,
    };
    log::debug!("encounter: {} while {}", battle.name(), location.verb());
    dialogue.emit(GameEvent::Encounter {
        mob: battle.name(),
        location,
        hostile: battle.mob.is_hostile(),
    });

    if battle.mob.is_hostile() && !battle.mob.kind.explodes && one_in(rng, PRE_EMPTIVE_STRIKE_ONE_IN) {
        dialogue.emit(GameEvent::MobAttacks { mob: battle.name() });
        let damage = round_stochastic(rng, battle.mob.attack_strength()) as i32;
        if player.damage(damage, None, true, &mut dialogue.log) {
            return Ok(EncounterOutcome::PlayerDied);
        }
    }

    let found = roll_drops(&battle.mob.kind.encounter_drops, rng);
    grant_loot(player, found, rng, &mut dialogue.log);

    if !battle.keep_fighting(dialogue)? {
        return Ok(EncounterOutcome::Disengaged);
    }
    if !player.tools.is_empty()
        && dialogue.ask(&Menu::yes_no("Would you like to switch weapons?"))? == MenuOption::Yes
    {
        switch_weapon(player, dialogue)?;
    }

    loop {
        if let Some(outcome) = battle.turn(player, rng, &mut dialogue.log)? {
            log::debug!("encounter with {} ended: {:?}", battle.name(), outcome);
            return Ok(outcome);
        }
        if !battle.keep_fighting(dialogue)? {
            return Ok(EncounterOutcome::Disengaged);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::mob::tests::mob_type;
    use crate::combat::mob::{MobBehavior, MobType};
    use crate::core::chance::{Chance, Pin, Rigged};
    use crate::core::events::Frontend;
    use crate::items::{DeathDrop, Quantity, Tool, ToolData};

    /// Always picks the first option: Attack, Yes, the first tool.
    struct AlwaysFirst;

    impl Frontend for AlwaysFirst {
        fn present(&mut self, _events: &[GameEvent]) {}

        fn choose(&mut self, _menu: &Menu) -> usize {
            0
        }
    }

    struct AlwaysSecond;

    impl Frontend for AlwaysSecond {
        fn present(&mut self, _events: &[GameEvent]) {}

        fn choose(&mut self, _menu: &Menu) -> usize {
            1
        }
    }

    struct AlwaysLast;

    impl Frontend for AlwaysLast {
        fn present(&mut self, _events: &[GameEvent]) {}

        fn choose(&mut self, menu: &Menu) -> usize {
            menu.options.len() - 1
        }
    }

    /// Integer draws come from `ints` in order, then pin high. Float draws
    /// are always `float`.
    struct Sequence {
        ints: Vec<i64>,
        float: f64,
    }

    impl Sequence {
        fn new(ints: &[i64], float: f64) -> Self {
            Self {
                ints: ints.iter().rev().copied().collect(),
                float,
            }
        }
    }

    impl RandomSource for Sequence {
        fn next_f64(&mut self) -> f64 {
            self.float
        }

        fn int_inclusive(&mut self, lo: i64, hi: i64) -> i64 {
            self.ints.pop().unwrap_or(hi).clamp(lo, hi)
        }
    }

    fn battle(kind: &MobType, fleeing: u32) -> Battle<'_> {
        Battle {
            mob: Mob::new(kind),
            location: Location::Exploring,
            fleeing,
            fuse: 0,
        }
    }

    fn sturdy(name: &str, behavior: MobBehavior) -> MobType {
        let mut kind = mob_type(name, 10.0, behavior);
        kind.max_hp = 100;
        kind
    }

    fn armed_player(damage: i32) -> Player {
        let mut p = Player::new();
        p.add_tool(Tool::new(
            "Stone Sword",
            &ToolData {
                damage,
                durability: 131,
                attack_speed: 1.6,
                ..Default::default()
            },
        ));
        p.equip(Some(0)).unwrap();
        p
    }

    #[test]
    fn test_disengage_ends_encounter() {
        let kind = mob_type("Zombie", 10.0, MobBehavior::Hostile);
        let mut player = Player::new();
        let mut fe = AlwaysSecond;
        let mut d = Dialogue::new(&mut fe);
        let outcome = run_encounter(
            &mut player,
            Mob::new(&kind),
            Location::Exploring,
            &mut d,
            &mut Rigged::lucky(),
        )
        .unwrap();
        assert_eq!(outcome, EncounterOutcome::Disengaged);
        assert_eq!(player.hp, 20);
    }

    #[test]
    fn test_preemptive_strike_on_unlucky_roll() {
        let kind = mob_type("Zombie", 10.0, MobBehavior::Hostile);
        let mut player = Player::new();
        let mut fe = AlwaysSecond;
        let mut d = Dialogue::new(&mut fe);
        run_encounter(
            &mut player,
            Mob::new(&kind),
            Location::Exploring,
            &mut d,
            &mut Rigged::unlucky(),
        )
        .unwrap();
        assert_eq!(player.hp, 17);
    }

    #[test]
    fn test_mob_dies_and_drops() {
        let mut kind = mob_type("Zombie", 10.0, MobBehavior::Hostile);
        kind.max_hp = 6;
        kind.attack_strength = Some(4.0);
        kind.death_drops = vec![DeathDrop::new("Rotten Flesh", Quantity::Fixed(5), Chance::CERTAIN)];
        let mut player = armed_player(3);
        let mut fe = AlwaysFirst;
        let mut d = Dialogue::new(&mut fe);
        let outcome = run_encounter(
            &mut player,
            Mob::new(&kind),
            Location::Exploring,
            &mut d,
            &mut Rigged::lucky(),
        )
        .unwrap();
        assert_eq!(outcome, EncounterOutcome::MobDied);
        assert_eq!(player.inventory.count("Rotten Flesh"), 5);
        assert_eq!(player.hp, 16);
    }

    #[test]
    fn test_passive_mob_starts_fleeing() {
        let mut kind = mob_type("Cow", 10.0, MobBehavior::Passive);
        kind.max_hp = 100;
        let mut battle = Battle {
            mob: Mob::new(&kind),
            location: Location::Exploring,
            fleeing: 0,
            fuse: 0,
        };
        let mut player = Player::new();
        let mut log = Vec::new();
        battle.turn(&mut player, &mut Rigged::lucky(), &mut log).unwrap();
        assert_eq!(battle.fleeing, FLEE_TURNS_MAX as u32);
        assert!(log.contains(&GameEvent::MobFlees {
            mob: "Cow".to_string()
        }));
        assert_eq!(player.hp, 20);
    }

    #[test]
    fn test_evasive_mob_teleports_on_miss() {
        let mut kind = mob_type("Enderman", 10.0, MobBehavior::Neutral);
        kind.evasive = true;
        let mut battle = Battle {
            mob: Mob::new(&kind),
            location: Location::Exploring,
            fleeing: 0,
            fuse: 0,
        };
        let mut player = Player::new();
        let mut log = Vec::new();
        battle
            .turn(&mut player, &mut Rigged::new(1.0, Pin::Low), &mut log)
            .unwrap();
        assert_eq!(
            log[0],
            GameEvent::MobTeleported {
                mob: "Enderman".to_string()
            }
        );
        assert_eq!(battle.mob.hp, 10);
    }

    #[test]
    fn test_creeper_flashes_during_grace_turns() {
        let mut kind = mob_type("Creeper", 10.0, MobBehavior::Hostile);
        kind.explodes = true;
        kind.max_hp = 100;
        let mut battle = Battle {
            mob: Mob::new(&kind),
            location: Location::Exploring,
            fleeing: 0,
            fuse: 0,
        };
        let mut player = Player::new();
        let mut log = Vec::new();
        for _ in 0..EXPLOSION_GRACE_TURNS {
            let outcome = battle.turn(&mut player, &mut Rigged::lucky(), &mut log).unwrap();
            assert_eq!(outcome, None);
        }
        let outcome = battle.turn(&mut player, &mut Rigged::lucky(), &mut log).unwrap();
        assert_eq!(outcome, Some(EncounterOutcome::Exploded));
        assert_eq!(player.hp, 17);
    }

    #[test]
    fn test_unarmed_crit_is_not_reported() {
        // 1 * 1.5 truncates back to 1
        let kind = sturdy("Zombie", MobBehavior::Hostile);
        let mut battle = battle(&kind, 0);
        let mut player = Player::new();
        let mut log = Vec::new();
        // No miss, then a crit. A high float keeps the zombie from swinging.
        let mut rng = Sequence::new(&[2, 1], 0.99);
        battle.turn(&mut player, &mut rng, &mut log).unwrap();
        assert_eq!(
            log[0],
            GameEvent::PlayerHit {
                mob: "Zombie".to_string(),
                critical: false
            }
        );
        assert_eq!(battle.mob.hp, 99);
        assert_eq!(player.hp, 20);
    }

    #[test]
    fn test_armed_crit_multiplies_damage() {
        let kind = sturdy("Zombie", MobBehavior::Hostile);
        let mut battle = battle(&kind, 0);
        let mut player = armed_player(4);
        let mut log = Vec::new();
        let mut rng = Sequence::new(&[2, 1], 0.99);
        battle.turn(&mut player, &mut rng, &mut log).unwrap();
        assert_eq!(
            log[0],
            GameEvent::PlayerHit {
                mob: "Zombie".to_string(),
                critical: true
            }
        );
        assert_eq!(battle.mob.hp, 94);
    }

    #[test]
    fn test_fleeing_mob_dodges() {
        let kind = sturdy("Cow", MobBehavior::Passive);
        let mut battle = battle(&kind, 2);
        let mut player = Player::new();
        let mut log = Vec::new();
        // No miss, no connect, first miss style. Float 0 wins the speed roll.
        let mut rng = Sequence::new(&[2, 3, 0], 0.0);
        battle.turn(&mut player, &mut rng, &mut log).unwrap();
        assert_eq!(
            log[0],
            GameEvent::FleeingMiss {
                mob: "Cow".to_string(),
                style: 0
            }
        );
        assert_eq!(battle.fleeing, 1);
        assert_eq!(battle.mob.hp, 100);
    }

    #[test]
    fn test_fleeing_countdown_ends() {
        let kind = sturdy("Cow", MobBehavior::Passive);
        let mut battle = battle(&kind, 1);
        let mut player = Player::new();
        let mut log = Vec::new();
        // No miss, no crit, starts running again for 4 turns
        let mut rng = Sequence::new(&[2, 2, 2, 4], 0.0);
        battle.turn(&mut player, &mut rng, &mut log).unwrap();
        assert_eq!(
            log[0],
            GameEvent::MobStopsRunning {
                mob: "Cow".to_string()
            }
        );
        assert_eq!(
            log[1],
            GameEvent::PlayerHit {
                mob: "Cow".to_string(),
                critical: false
            }
        );
        assert!(log.contains(&GameEvent::MobFlees {
            mob: "Cow".to_string()
        }));
        assert_eq!(battle.fleeing, 4);
    }

    #[test]
    fn test_cancelled_switch_keeps_weapon() {
        let mut player = armed_player(5);
        let mut fe = AlwaysLast;
        let mut d = Dialogue::new(&mut fe);
        switch_weapon(&mut player, &mut d).unwrap();
        assert_eq!(player.equipped, Some(0));
        assert!(d.log.is_empty());
    }
}
