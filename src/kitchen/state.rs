/// Silog Kitchen state definitions.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::catalog;
use super::rules::{
    BASE_QUEUE_SIZE, CUSTOMER_PATIENCE, CUSTOMER_WAIT_SECS, STARTING_MONEY, STARTING_STOCK,
};

/// A point inside the pan, as percentages (0–100) of its bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanPosition {
    pub x: f64,
    pub y: f64,
}

impl PanPosition {
    /// Clamp both axes into the pan. Non-finite input lands on the edge.
    pub fn clamped(x: f64, y: f64) -> Self {
        Self {
            x: clamp_percent(x),
            y: clamp_percent(y),
        }
    }
}

fn clamp_percent(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 100.0)
    }
}

/// A catalog ingredient, optionally placed somewhere in the pan.
#[derive(Clone, Debug, PartialEq)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub image: String,
    /// Fallback swatch colour for ingredients without artwork.
    pub color: Option<String>,
    /// Only meaningful while dragged or once dropped in the pan.
    pub position: Option<PanPosition>,
}

impl Ingredient {
    /// Copy of this ingredient placed at `position`.
    pub fn placed(&self, position: PanPosition) -> Self {
        Self {
            position: Some(position),
            ..self.clone()
        }
    }
}

/// A dish the kitchen can cook.
#[derive(Clone, Debug, PartialEq)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub image: String,
    pub description: Option<String>,
    pub unlocked: bool,
    /// Required ingredient ids. Duplicates mean more than one unit.
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    /// Seconds on the stove.
    pub cooking_time: u32,
    pub price: u64,
}

impl Recipe {
    /// How many units of `ingredient_id` the recipe calls for.
    pub fn required(&self, ingredient_id: &str) -> usize {
        self.ingredients
            .iter()
            .filter(|id| id.as_str() == ingredient_id)
            .count()
    }
}

/// A stove upgrade. `speed_boost` is a percentage that nothing consumes yet.
#[derive(Clone, Debug, PartialEq)]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub image: String,
    pub level: u32,
    pub speed_boost: u32,
    pub unlocked: bool,
    pub price: u64,
}

/// A waiting (or already served) customer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    /// Recipe id of the order.
    pub order: String,
    pub patience: u32,
    pub satisfaction: u32,
    pub time_remaining: u32,
    pub served: bool,
}

impl Customer {
    pub fn new(id: String, order: String) -> Self {
        Self {
            id,
            order,
            patience: CUSTOMER_PATIENCE,
            satisfaction: 100,
            time_remaining: CUSTOMER_WAIT_SECS,
            served: false,
        }
    }
}

/// Persistent game progress.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub money: u64,
    pub score: u64,
    pub day: u32,
    pub level: u32,
    pub customers: Vec<Customer>,
    /// Stock per ingredient id. Unsigned, so it can never go negative.
    pub inventory: BTreeMap<String, u32>,
    /// Catalog order matters: unlocks pick the first locked recipe.
    pub recipes: Vec<Recipe>,
    pub unlocked_recipes: BTreeSet<String>,
    pub equipment: Vec<Equipment>,
}

impl GameState {
    pub fn new() -> Self {
        let recipes = catalog::recipes();
        let unlocked_recipes = recipes
            .iter()
            .filter(|r| r.unlocked)
            .map(|r| r.id.clone())
            .collect();
        let inventory = catalog::ingredients()
            .into_iter()
            .map(|i| (i.id, STARTING_STOCK))
            .collect();

        Self {
            money: STARTING_MONEY,
            score: 0,
            day: 1,
            level: 1,
            customers: Vec::new(),
            inventory,
            recipes,
            unlocked_recipes,
            equipment: catalog::equipment(),
        }
    }

    /// Units in stock (0 for ingredients never stocked).
    pub fn stock(&self, ingredient_id: &str) -> u32 {
        self.inventory.get(ingredient_id).copied().unwrap_or(0)
    }

    pub fn recipe(&self, recipe_id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == recipe_id)
    }

    pub fn is_unlocked(&self, recipe_id: &str) -> bool {
        self.unlocked_recipes.contains(recipe_id)
    }

    /// Unlocked recipes in catalog order.
    pub fn unlocked(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter().filter(|r| self.is_unlocked(&r.id))
    }

    /// Maximum number of customers in today's list.
    pub fn queue_capacity(&self) -> usize {
        self.level as usize + BASE_QUEUE_SIZE
    }

    pub fn customer(&self, customer_id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == customer_id)
    }

    /// Customers still waiting, in arrival order.
    pub fn waiting(&self) -> impl Iterator<Item = &Customer> {
        self.customers.iter().filter(|c| !c.served)
    }

    pub fn waiting_count(&self) -> usize {
        self.waiting().count()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// The dish currently on the stove. Reset on every selection, serve or abandon.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CookingState {
    pub current_recipe: Option<Recipe>,
    /// One id per consumed unit, in the order they went in.
    pub added_ingredients: Vec<String>,
    /// Parallel to `added_ingredients`, with drop positions.
    pub ingredients_in_pan: Vec<Ingredient>,
    /// 0–100.
    pub cooking_progress: f64,
    pub cooking_started: bool,
    pub cooking_complete: bool,
    /// Seconds left on the stove.
    pub remaining_time: u32,
    pub is_dragging: bool,
    pub dragged_ingredient: Option<Ingredient>,
}

impl CookingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh state with `recipe` on the board.
    pub fn for_recipe(recipe: Recipe) -> Self {
        Self {
            remaining_time: recipe.cooking_time,
            current_recipe: Some(recipe),
            ..Self::default()
        }
    }

    /// True once the stove is on (or done). The pan is locked from then on.
    pub fn is_busy(&self) -> bool {
        self.cooking_started || self.cooking_complete
    }

    /// True while the cooking timer should be running.
    pub fn is_cooking(&self) -> bool {
        self.cooking_started && !self.cooking_complete
    }

    /// Units of `ingredient_id` already in the pan.
    pub fn added_count(&self, ingredient_id: &str) -> usize {
        self.added_ingredients
            .iter()
            .filter(|id| id.as_str() == ingredient_id)
            .count()
    }
}
