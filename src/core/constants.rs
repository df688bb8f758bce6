// Player vitals
pub const MAX_HP: i32 = 20;
pub const MAX_HUNGER: i32 = 20;
pub const STARTING_SATURATION: f64 = 5.0;
pub const EXHAUSTION_PER_POINT: f64 = 4.0;

// Unarmed combat
pub const UNARMED_DAMAGE: i32 = 1;
pub const UNARMED_ATTACK_SPEED: f64 = 4.0;

// Ticks and time
pub const TICK_SECONDS: f64 = 0.5;
pub const REGEN_TICK_INTERVAL: u64 = 4;
pub const STARVE_TICK_INTERVAL: u64 = 4;
pub const DAY_LENGTH_MINUTES: u32 = 40;

// Exhaustion sources
pub const EXHAUSTION_PHYSICAL_DAMAGE: f64 = 0.1;
pub const EXHAUSTION_BATTLE_TURN: f64 = 0.1;
pub const EXHAUSTION_EXPLORE_PER_SECOND: f64 = 0.001;
pub const EXHAUSTION_MINE: f64 = 0.005;
pub const EXHAUSTION_HUNGER_EFFECT_PER_LEVEL: f64 = 0.05;

// Encounter odds
pub const EXPLORE_MOB_ONE_IN: u32 = 3;
pub const PRE_EMPTIVE_STRIKE_ONE_IN: u32 = 2;
pub const MISS_ONE_IN: u32 = 10;
pub const EVASIVE_MISS_ONE_IN: u32 = 5;
pub const FLEEING_CONNECT_ONE_IN: u32 = 3;
pub const CRIT_ONE_IN: u32 = 10;
pub const CRIT_MULTIPLIER: f64 = 1.5;
pub const RETALIATE_MISS_ONE_IN: u32 = 8;
pub const FLEE_TURNS_MIN: i64 = 3;
pub const FLEE_TURNS_MAX: i64 = 5;

// Exploding mobs
pub const EXPLOSION_GRACE_TURNS: u32 = 2;
pub const EXPLOSION_DAMAGE_DRAWS: usize = 3;
pub const DEFAULT_EXPLOSION_POWER: u32 = 3;
pub const EXPLOSION_SPREAD_MIN: f64 = 0.75;
pub const EXPLOSION_SPREAD_MAX: f64 = 1.25;
pub const EXPLOSION_DEATH_CAUSE: &str = "Killed by a creeper's explosion";

// Exploring
pub const EXPLORE_SECONDS_MIN: i64 = 15;
pub const EXPLORE_SECONDS_MAX: i64 = 20;
pub const EXPLORE_FIND_X: f64 = 3.0;
pub const EXPLORE_FIND_Y: f64 = 5.0;
pub const EXPLORE_FINDS: [(&str, f64); 3] = [("Grass", 8.0), ("Dirt", 1.0), ("Wood", 4.0)];

// Mining
pub const MINE_MOB_BASE_ONE_IN: f64 = 10.0;
pub const MINE_STONE_DUD_ONE_IN: u32 = 3;
pub const MINE_DUD_SECONDS: f64 = 3.0;
pub const MINE_STONE_SECONDS: f64 = 1.5;
pub const MINE_ORE_SECONDS: f64 = 3.0;

// Status effects
pub const INSTANT_DAMAGE: &str = "Instant Damage";
pub const INSTANT_HEALTH: &str = "Instant Health";
pub const POISON: &str = "Poison";
/// Poison damage per tick is this divided by the poison rate.
pub const POISON_DAMAGE: f64 = 20.0;
pub const HUNGER_EFFECT: &str = "Hunger";
pub const MAGIC_DEATH_CAUSE: &str = "Killed by magic";

// Items
pub const EXP_ITEM: &str = "EXP";
