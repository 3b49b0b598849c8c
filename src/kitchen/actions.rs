//! Semantic action IDs for Silog Kitchen click targets.

// ── Kitchen ─────────────────────────────────────────────────────
pub const SELECT_RECIPE_BASE: u16 = 10; // + catalog index
pub const INGREDIENT_BASE: u16 = 20; // + catalog index; press to drag, tap to add
pub const START_COOKING: u16 = 60;
pub const RESET_COOKING: u16 = 61;
pub const SERVE_BASE: u16 = 70; // + index among waiting customers

// ── Navigation ──────────────────────────────────────────────────
pub const END_DAY: u16 = 80;
pub const TOGGLE_SHOP: u16 = 81;
pub const TOGGLE_LEADERBOARD: u16 = 82;
pub const TOGGLE_MUTE: u16 = 83;
pub const NEW_GAME: u16 = 84;

// ── Shop ────────────────────────────────────────────────────────
pub const BUY_INGREDIENT_BASE: u16 = 100; // + catalog index
pub const BUY_EQUIPMENT_BASE: u16 = 120; // + catalog index

// ── Pan ─────────────────────────────────────────────────────────
pub const PAN_INGREDIENT_BASE: u16 = 1000; // + pan index; tap to take back
/// Pan entries past this index get no click target.
pub const MAX_PAN_TARGETS: u16 = 1000;

/// Drop zone id of the pan.
pub const PAN_ZONE: u16 = 1;

/// Up to eight entries are addressable by letter.
pub const MAX_LETTERED: usize = 8;
