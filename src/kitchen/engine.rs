//! The kitchen engine: both aggregates, the timers and the event queue.
//!
//! Every gameplay operation goes through [`Kitchen`]. Operations return
//! `true` when they changed something; a `false` means the call was invalid
//! and nothing happened.

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::catalog;
use super::cooking;
use super::customers;
use super::economy;
use super::events::{EventQueue, KitchenEvent};
use super::progression;
use super::rules::{COOKING_PERIOD_MS, DECAY_PERIOD_MS, RUSH_HOUR_PERIOD_MS, TICK_MS};
use super::scheduler::{Scheduler, TimerKind};
use super::state::{CookingState, GameState, Ingredient, PanPosition};

pub struct Kitchen {
    game: GameState,
    cooking: CookingState,
    scheduler: Scheduler,
    rng: SmallRng,
    events: EventQueue,
    session_active: bool,
    /// Set on every GameState change; cleared by the saver.
    dirty: bool,
}

impl Kitchen {
    /// Fresh game. No session yet: call [`Kitchen::start_game`] to run timers.
    pub fn new(seed: u64) -> Self {
        Self::from_state(GameState::new(), seed)
    }

    /// Wrap a loaded snapshot. Call [`Kitchen::resume`] to run timers.
    pub fn from_state(game: GameState, seed: u64) -> Self {
        Self {
            game,
            cooking: CookingState::new(),
            scheduler: Scheduler::new(),
            rng: SmallRng::seed_from_u64(seed),
            events: EventQueue::new(),
            session_active: false,
            dirty: false,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn cooking(&self) -> &CookingState {
        &self.cooking
    }

    pub fn session_active(&self) -> bool {
        self.session_active
    }

    /// Whether the timer for `kind` is currently running.
    pub fn timer_armed(&self, kind: TimerKind) -> bool {
        self.scheduler.is_armed(kind)
    }

    // ── Session ────────────────────────────────────────────────

    /// Reset everything to a new game and start the timers.
    pub fn start_game(&mut self) {
        self.game = GameState::new();
        self.cooking = CookingState::new();
        self.scheduler.disarm_all();
        self.session_active = true;
        self.dirty = true;
        self.sync_timers();
        debug!("new game started");
    }

    /// Start the timers on whatever state is loaded.
    pub fn resume(&mut self) {
        self.session_active = true;
        self.sync_timers();
    }

    /// Stop every timer.
    pub fn end_session(&mut self) {
        self.session_active = false;
        self.scheduler.disarm_all();
    }

    // ── Cooking ────────────────────────────────────────────────

    pub fn select_recipe(&mut self, recipe_id: &str) -> bool {
        let ok = cooking::select_recipe(&self.game, &mut self.cooking, recipe_id);
        self.sync_timers();
        ok
    }

    /// Click-to-add: one unit at a random spot in the pan.
    pub fn add_ingredient(&mut self, ingredient_id: &str) -> bool {
        let ingredient = catalog::ingredient_or_placeholder(ingredient_id);
        let position = PanPosition {
            x: self.rng.gen_range(0.0..100.0),
            y: self.rng.gen_range(0.0..100.0),
        };
        let ok = cooking::add_ingredient(&mut self.game, &mut self.cooking, &ingredient, position);
        self.mark(ok);
        ok
    }

    pub fn start_cooking(&mut self) -> bool {
        let ok = cooking::start_cooking(&mut self.cooking, &mut self.events);
        self.sync_timers();
        ok
    }

    pub fn reset_cooking(&mut self) {
        cooking::reset_cooking(&mut self.cooking);
        self.sync_timers();
    }

    pub fn start_dragging(&mut self, ingredient: Ingredient) -> bool {
        cooking::start_dragging(&self.game, &mut self.cooking, ingredient)
    }

    pub fn stop_dragging(&mut self) {
        cooking::stop_dragging(&mut self.cooking);
    }

    pub fn move_ingredient(&mut self, x: f64, y: f64) -> bool {
        cooking::move_ingredient(&mut self.cooking, x, y)
    }

    /// Drop the dragged ingredient at a pan-relative percentage.
    pub fn drop_ingredient_in_pan(&mut self, x: f64, y: f64) -> bool {
        let ok = cooking::drop_ingredient_in_pan(
            &mut self.game,
            &mut self.cooking,
            x,
            y,
            &mut self.events,
        );
        self.mark(ok);
        ok
    }

    pub fn remove_ingredient_from_pan(&mut self, ingredient_id: &str) -> bool {
        let ok = cooking::remove_ingredient_from_pan(&mut self.game, &mut self.cooking, ingredient_id);
        self.mark(ok);
        ok
    }

    // ── Customers ──────────────────────────────────────────────

    pub fn serve_dish(&mut self, customer_id: &str) -> bool {
        let ok = customers::serve_dish(
            &mut self.game,
            &mut self.cooking,
            customer_id,
            &mut self.events,
        );
        self.mark(ok);
        self.sync_timers();
        ok
    }

    // ── Shop ───────────────────────────────────────────────────

    pub fn buy_ingredient(&mut self, ingredient_id: &str, quantity: u32) -> bool {
        let ok = economy::buy_ingredient(&mut self.game, ingredient_id, quantity);
        self.mark(ok);
        ok
    }

    pub fn buy_equipment(&mut self, equipment_id: &str) -> bool {
        let ok = economy::buy_equipment(&mut self.game, equipment_id);
        self.mark(ok);
        ok
    }

    // ── Day ────────────────────────────────────────────────────

    pub fn can_end_day(&self) -> bool {
        progression::can_end_day(&self.game)
    }

    /// Close the day. Returns the newly unlocked recipe id, if any.
    pub fn end_day(&mut self) -> Option<String> {
        let unlocked = progression::end_day(&mut self.game, &mut self.cooking);
        self.dirty = true;
        self.sync_timers();
        unlocked
    }

    /// Plain button press; only produces a click sound.
    pub fn ui_click(&mut self) {
        self.events.emit(KitchenEvent::UiClick);
    }

    // ── Clock ──────────────────────────────────────────────────

    /// Advance the clock by `delta_ticks` ticks of [`TICK_MS`] each.
    pub fn tick(&mut self, delta_ticks: u32) {
        if !self.session_active {
            return;
        }
        for _ in 0..delta_ticks {
            self.sync_timers();
            for kind in self.scheduler.advance(TICK_MS) {
                self.fire(kind);
                self.sync_timers();
            }
        }
    }

    fn fire(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::PatienceDecay => {
                if self.game.waiting_count() > 0 {
                    customers::decay_patience(&mut self.game);
                    self.dirty = true;
                }
            }
            TimerKind::CustomerSpawn => {
                let ok = customers::spawn_customer(&mut self.game, &mut self.rng, &mut self.events);
                self.mark(ok);
            }
            TimerKind::RushHour => {
                let arrived = customers::rush_hour(&mut self.game, &mut self.rng, &mut self.events);
                self.mark(arrived > 0);
            }
            TimerKind::CookingProgress => {
                cooking::tick_cooking(&mut self.cooking, &mut self.events);
            }
        }
    }

    /// Bring each timer in line with the current state.
    fn sync_timers(&mut self) {
        if !self.session_active {
            return;
        }
        self.scheduler.arm(TimerKind::PatienceDecay, DECAY_PERIOD_MS);
        self.scheduler.arm(TimerKind::RushHour, RUSH_HOUR_PERIOD_MS);

        if customers::has_room(&self.game) {
            self.scheduler.arm(
                TimerKind::CustomerSpawn,
                customers::spawn_period_ms(self.game.level),
            );
        } else {
            self.scheduler.disarm(TimerKind::CustomerSpawn);
        }

        if self.cooking.is_cooking() {
            self.scheduler.arm(TimerKind::CookingProgress, COOKING_PERIOD_MS);
        } else {
            self.scheduler.disarm(TimerKind::CookingProgress);
        }
    }

    fn mark(&mut self, changed: bool) {
        self.dirty |= changed;
    }

    // ── Outputs ────────────────────────────────────────────────

    /// Take every event raised since the last drain.
    pub fn drain_events(&mut self) -> Vec<KitchenEvent> {
        self.events.drain()
    }

    /// True once after each GameState change.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
