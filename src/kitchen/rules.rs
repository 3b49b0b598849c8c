//! Game balance constants and storage keys.
//!
//! Everything that tunes the kitchen lives here so the logic modules read as
//! plain rules.

// ── Clock ───────────────────────────────────────────────────────

/// Engine ticks per real-time second.
pub const TICKS_PER_SEC: u32 = 10;
/// Milliseconds covered by one engine tick.
pub const TICK_MS: u32 = 1000 / TICKS_PER_SEC;

// ── Economy ─────────────────────────────────────────────────────

pub const STARTING_MONEY: u64 = 100;
/// Units of every catalog ingredient in a fresh pantry.
pub const STARTING_STOCK: u32 = 20;
/// Flat price per ingredient unit charged by the ledger.
pub const INGREDIENT_UNIT_PRICE: u64 = 5;
/// Units bought per shop click.
pub const SHOP_BATCH: u32 = 10;

// ── Customers ───────────────────────────────────────────────────

/// Queue capacity is `level + BASE_QUEUE_SIZE`.
pub const BASE_QUEUE_SIZE: usize = 4;
pub const CUSTOMER_PATIENCE: u32 = 100;
pub const CUSTOMER_WAIT_SECS: u32 = 30;
/// Patience lost per decay tick while the customer still has time.
pub const PATIENCE_DECAY: u32 = 2;
/// Base spawn period; divided by the current level.
pub const SPAWN_PERIOD_BASE_MS: u32 = 1000;
pub const DECAY_PERIOD_MS: u32 = 1000;

pub const RUSH_HOUR_PERIOD_MS: u32 = 30_000;
pub const RUSH_HOUR_CHANCE: f64 = 0.2;
pub const RUSH_HOUR_MAX_BURST: usize = 3;

/// Remaining seconds at or below which an order is urgent.
pub const URGENCY_HIGH_SECS: u32 = 10;
pub const URGENCY_MEDIUM_SECS: u32 = 20;

// ── Cooking ─────────────────────────────────────────────────────

pub const COOKING_PERIOD_MS: u32 = 1000;

// ── Progression ─────────────────────────────────────────────────

/// Average satisfaction that must be exceeded to earn a recipe unlock.
pub const UNLOCK_SATISFACTION: f64 = 80.0;
/// Unlocks are only evaluated on days divisible by this.
pub const UNLOCK_DAY_INTERVAL: u32 = 3;
/// Days per level step.
pub const DAYS_PER_LEVEL: u32 = 5;

// ── Presentation ────────────────────────────────────────────────

/// Unserved customers needed to raise the rush-hour banner.
pub const RUSH_BANNER_THRESHOLD: usize = 3;
pub const RUSH_BANNER_TICKS: u32 = 5 * TICKS_PER_SEC;
pub const DAY_BANNER_TICKS: u32 = 2 * TICKS_PER_SEC;

// ── Persistence ─────────────────────────────────────────────────

pub const GAME_STATE_KEY: &str = "gameState";
pub const LEADERBOARD_KEY: &str = "leaderboard";
pub const LEADERBOARD_SIZE: usize = 10;
