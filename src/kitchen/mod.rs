//! Silog Kitchen: a cooking time-management game.
//!
//! Pick a recipe, drag ingredients into the pan, cook, and serve the dish
//! before the customer's patience runs out. The engine lives in
//! [`engine::Kitchen`]; [`KitchenGame`] adds input mapping, banners,
//! persistence and rendering on top.

pub mod actions;
pub mod catalog;
pub mod cooking;
pub mod customers;
pub mod economy;
pub mod engine;
pub mod events;
pub mod leaderboard;
pub mod progression;
pub mod render;
pub mod rules;
pub mod save;
pub mod scheduler;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use log::{info, warn};
use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};

use actions::*;
use engine::Kitchen;
use leaderboard::{Leaderboard, LeaderboardEntry};
use rules::{DAY_BANNER_TICKS, RUSH_BANNER_THRESHOLD, RUSH_BANNER_TICKS, SHOP_BATCH};
use save::KeyValueStore;

/// Which panel covers the kitchen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Kitchen,
    Shop,
    Leaderboard,
}

/// Presentation-only state. Never saved.
#[derive(Debug)]
pub struct UiState {
    pub screen: Screen,
    pub muted: bool,
    /// Ticks left on the rush-hour banner.
    pub rush_banner: u32,
    /// Ticks left on the "Day N" banner.
    pub day_banner: u32,
    /// Recipe unlocked by the last day change, shown in the day banner.
    pub last_unlock: Option<String>,
    /// Button the current drag started from.
    pub drag_source: Option<u16>,
    /// Last pointer cell while dragging.
    pub pointer: Option<(u16, u16)>,
    /// `YYYY-MM-DD` stamped on leaderboard entries.
    pub today: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            screen: Screen::Kitchen,
            muted: false,
            rush_banner: 0,
            day_banner: DAY_BANNER_TICKS,
            last_unlock: None,
            drag_source: None,
            pointer: None,
            today: String::new(),
        }
    }
}

pub struct KitchenGame {
    pub kitchen: Kitchen,
    pub ui: UiState,
    pub leaderboard: Leaderboard,
    store: Box<dyn KeyValueStore>,
}

impl KitchenGame {
    /// Load the saved game (or start fresh) and begin the session.
    pub fn new(mut store: Box<dyn KeyValueStore>, seed: u64) -> Self {
        let game = save::load_or_default(&mut *store);
        let leaderboard = Leaderboard::load_or_default(&mut *store);
        info!("day {} loaded, money {}", game.day, game.money);

        let mut kitchen = Kitchen::from_state(game, seed);
        kitchen.resume();
        Self {
            kitchen,
            ui: UiState::default(),
            leaderboard,
            store,
        }
    }

    /// Handle an input event. Returns true if the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        let consumed = match event {
            InputEvent::Key(c) => self.handle_key(*c),
            InputEvent::Click(id) => self.handle_click(*id),
            InputEvent::Press(id) => self.handle_press(*id),
            InputEvent::Move { col, row } => self.handle_move(*col, *row),
            InputEvent::Release { target, drop } => self.handle_release(*target, *drop),
        };
        self.autosave();
        consumed
    }

    /// Advance the game by `delta_ticks` ticks.
    pub fn tick(&mut self, delta_ticks: u32) {
        self.kitchen.tick(delta_ticks);

        if self.kitchen.game().waiting_count() >= RUSH_BANNER_THRESHOLD {
            self.ui.rush_banner = RUSH_BANNER_TICKS;
        } else {
            self.ui.rush_banner = self.ui.rush_banner.saturating_sub(delta_ticks);
        }
        self.ui.day_banner = self.ui.day_banner.saturating_sub(delta_ticks);

        self.autosave();
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(self, f, area, click_state);
    }

    fn autosave(&mut self) {
        if self.kitchen.take_dirty() {
            if let Err(e) = save::save_game(&mut *self.store, self.kitchen.game()) {
                warn!("Silog Kitchen: セーブに失敗: {e}");
            }
        }
    }

    fn handle_key(&mut self, key: char) -> bool {
        match self.ui.screen {
            Screen::Kitchen => match key {
                '1'..='4' => self.handle_click(SELECT_RECIPE_BASE + digit_index(key)),
                'a'..='h' => self.handle_click(SERVE_BASE + letter_index(key)),
                // Shift+letter adds the n-th ingredient
                'A'..='H' => self.handle_click(INGREDIENT_BASE + (key as u8 - b'A') as u16),
                'c' => self.handle_click(START_COOKING),
                'x' => self.handle_click(RESET_COOKING),
                'e' => self.handle_click(END_DAY),
                'p' => self.handle_click(TOGGLE_SHOP),
                'l' => self.handle_click(TOGGLE_LEADERBOARD),
                'm' => self.handle_click(TOGGLE_MUTE),
                'n' => self.handle_click(NEW_GAME),
                _ => false,
            },
            Screen::Shop => match key {
                'a'..='h' => self.handle_click(BUY_INGREDIENT_BASE + letter_index(key)),
                '1'..='4' => self.handle_click(BUY_EQUIPMENT_BASE + digit_index(key)),
                'p' | 'q' => self.handle_click(TOGGLE_SHOP),
                'm' => self.handle_click(TOGGLE_MUTE),
                _ => false,
            },
            Screen::Leaderboard => match key {
                'l' | 'q' => self.handle_click(TOGGLE_LEADERBOARD),
                'm' => self.handle_click(TOGGLE_MUTE),
                _ => false,
            },
        }
    }

    fn handle_click(&mut self, action_id: u16) -> bool {
        match action_id {
            id if (SELECT_RECIPE_BASE..SELECT_RECIPE_BASE + 10).contains(&id) => {
                let idx = (id - SELECT_RECIPE_BASE) as usize;
                match self.kitchen.game().recipes.get(idx).map(|r| r.id.clone()) {
                    Some(recipe_id) => self.kitchen.select_recipe(&recipe_id),
                    None => false,
                }
            }
            id if (INGREDIENT_BASE..INGREDIENT_BASE + 20).contains(&id) => {
                let idx = (id - INGREDIENT_BASE) as usize;
                match catalog::ingredients().get(idx) {
                    Some(ingredient) => self.kitchen.add_ingredient(&ingredient.id),
                    None => false,
                }
            }
            id if (PAN_INGREDIENT_BASE..PAN_INGREDIENT_BASE + MAX_PAN_TARGETS).contains(&id) => {
                let idx = (id - PAN_INGREDIENT_BASE) as usize;
                let ingredient_id = self
                    .kitchen
                    .cooking()
                    .ingredients_in_pan
                    .get(idx)
                    .map(|i| i.id.clone());
                match ingredient_id {
                    Some(ingredient_id) => self.kitchen.remove_ingredient_from_pan(&ingredient_id),
                    None => false,
                }
            }
            START_COOKING => self.kitchen.start_cooking(),
            RESET_COOKING => {
                self.kitchen.reset_cooking();
                true
            }
            id if (SERVE_BASE..SERVE_BASE + MAX_LETTERED as u16).contains(&id) => {
                let idx = (id - SERVE_BASE) as usize;
                let customer_id = self.kitchen.game().waiting().nth(idx).map(|c| c.id.clone());
                match customer_id {
                    Some(customer_id) => self.kitchen.serve_dish(&customer_id),
                    None => false,
                }
            }
            END_DAY => {
                if !self.kitchen.can_end_day() {
                    return false;
                }
                self.kitchen.ui_click();
                self.ui.last_unlock = self.kitchen.end_day();
                self.ui.day_banner = DAY_BANNER_TICKS;
                self.ui.rush_banner = 0;
                true
            }
            TOGGLE_SHOP => {
                self.kitchen.ui_click();
                self.ui.screen = match self.ui.screen {
                    Screen::Shop => Screen::Kitchen,
                    _ => Screen::Shop,
                };
                true
            }
            TOGGLE_LEADERBOARD => {
                self.kitchen.ui_click();
                self.ui.screen = match self.ui.screen {
                    Screen::Leaderboard => Screen::Kitchen,
                    _ => Screen::Leaderboard,
                };
                true
            }
            TOGGLE_MUTE => {
                self.ui.muted = !self.ui.muted;
                true
            }
            NEW_GAME => {
                self.kitchen.ui_click();
                self.new_game();
                true
            }
            id if (BUY_INGREDIENT_BASE..BUY_INGREDIENT_BASE + 20).contains(&id) => {
                let idx = (id - BUY_INGREDIENT_BASE) as usize;
                match catalog::ingredients().get(idx) {
                    Some(ingredient) => self.kitchen.buy_ingredient(&ingredient.id, SHOP_BATCH),
                    None => false,
                }
            }
            id if (BUY_EQUIPMENT_BASE..BUY_EQUIPMENT_BASE + 10).contains(&id) => {
                let idx = (id - BUY_EQUIPMENT_BASE) as usize;
                match self.kitchen.game().equipment.get(idx).map(|e| e.id.clone()) {
                    Some(equipment_id) => self.kitchen.buy_equipment(&equipment_id),
                    None => false,
                }
            }
            _ => false,
        }
    }

    fn handle_press(&mut self, action_id: u16) -> bool {
        if !(INGREDIENT_BASE..INGREDIENT_BASE + 20).contains(&action_id) {
            return false;
        }
        let idx = (action_id - INGREDIENT_BASE) as usize;
        let ingredient = match catalog::ingredients().into_iter().nth(idx) {
            Some(i) => i,
            None => return false,
        };
        if self.kitchen.start_dragging(ingredient) {
            self.ui.drag_source = Some(action_id);
            true
        } else {
            false
        }
    }

    fn handle_move(&mut self, col: u16, row: u16) -> bool {
        if !self.kitchen.cooking().is_dragging {
            return false;
        }
        self.ui.pointer = Some((col, row));
        self.kitchen.move_ingredient(col as f64, row as f64)
    }

    fn handle_release(&mut self, target: Option<u16>, drop: Option<(u16, f64, f64)>) -> bool {
        if !self.kitchen.cooking().is_dragging {
            return match target {
                Some(id) => self.handle_click(id),
                None => false,
            };
        }

        let source = self.ui.drag_source.take();
        self.ui.pointer = None;
        if let Some((PAN_ZONE, x, y)) = drop {
            if self.kitchen.drop_ingredient_in_pan(x, y) {
                return true;
            }
        }
        self.kitchen.stop_dragging();
        // press and release on the same button is a tap
        match (source, target) {
            (Some(s), Some(t)) if s == t => self.handle_click(t),
            _ => true,
        }
    }

    /// Put the current run on the leaderboard and start over.
    fn new_game(&mut self) {
        let score = self.kitchen.game().score;
        if score > 0 {
            let entry = LeaderboardEntry::new("Chef", score, &self.ui.today);
            if let Some(rank) = self.leaderboard.submit(entry) {
                info!("run scored {score}, rank {rank}");
                if let Err(e) = self.leaderboard.save(&mut *self.store) {
                    warn!("Silog Kitchen: ランキングの保存に失敗: {e}");
                }
            }
        }
        self.kitchen.start_game();
        self.ui.screen = Screen::Kitchen;
        self.ui.day_banner = DAY_BANNER_TICKS;
        self.ui.rush_banner = 0;
        self.ui.last_unlock = None;
    }
}

fn digit_index(key: char) -> u16 {
    (key as u8 - b'1') as u16
}

fn letter_index(key: char) -> u16 {
    (key as u8 - b'a') as u16
}
