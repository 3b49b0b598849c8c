//! Cooking state machine: pick a recipe, fill the pan, cook, finish.
//!
//! Pure functions over the two aggregates. Every operation reports whether
//! it changed anything; a `false` return means the call was a no-op and
//! nothing was touched.

use log::debug;

use super::events::{EventQueue, KitchenEvent};
use super::state::{CookingState, GameState, Ingredient, PanPosition};

/// Progress within this distance of 100 counts as done (float drift guard).
const COMPLETION_EPSILON: f64 = 1e-6;

/// Put an unlocked recipe on the board, discarding whatever was in progress.
pub fn select_recipe(gs: &GameState, cs: &mut CookingState, recipe_id: &str) -> bool {
    let recipe = match gs.recipe(recipe_id) {
        Some(r) if gs.is_unlocked(recipe_id) => r.clone(),
        _ => return false,
    };
    *cs = CookingState::for_recipe(recipe);
    true
}

/// Drop the current dish. Pan contents are not refunded.
pub fn reset_cooking(cs: &mut CookingState) {
    *cs = CookingState::new();
}

/// Add one unit straight into the pan at `position` (click-to-add path).
pub fn add_ingredient(
    gs: &mut GameState,
    cs: &mut CookingState,
    ingredient: &Ingredient,
    position: PanPosition,
) -> bool {
    if cs.current_recipe.is_none() || cs.is_busy() {
        return false;
    }
    if !consume_one(gs, &ingredient.id) {
        return false;
    }
    cs.added_ingredients.push(ingredient.id.clone());
    cs.ingredients_in_pan.push(ingredient.placed(position));
    true
}

/// Pick an ingredient up off the shelf.
pub fn start_dragging(gs: &GameState, cs: &mut CookingState, ingredient: Ingredient) -> bool {
    if gs.stock(&ingredient.id) == 0 || cs.is_busy() {
        return false;
    }
    cs.is_dragging = true;
    cs.dragged_ingredient = Some(ingredient);
    true
}

/// Let go without dropping into the pan.
pub fn stop_dragging(cs: &mut CookingState) {
    cs.is_dragging = false;
    cs.dragged_ingredient = None;
}

/// Track the pointer while dragging. Cosmetic only.
pub fn move_ingredient(cs: &mut CookingState, x: f64, y: f64) -> bool {
    match cs.dragged_ingredient.as_mut() {
        Some(ingredient) => {
            ingredient.position = Some(PanPosition { x, y });
            true
        }
        None => false,
    }
}

/// Drop the dragged ingredient into the pan at a pan-relative position.
pub fn drop_ingredient_in_pan(
    gs: &mut GameState,
    cs: &mut CookingState,
    rel_x: f64,
    rel_y: f64,
    events: &mut EventQueue,
) -> bool {
    if !cs.is_dragging {
        return false;
    }
    let ingredient = match cs.dragged_ingredient.as_ref() {
        Some(i) => i.clone(),
        None => return false,
    };
    if !consume_one(gs, &ingredient.id) {
        return false;
    }

    let placed = ingredient.placed(PanPosition::clamped(rel_x, rel_y));
    cs.added_ingredients.push(placed.id.clone());
    cs.ingredients_in_pan.push(placed);
    stop_dragging(cs);
    events.emit(KitchenEvent::IngredientDropped);
    true
}

/// Take the first `ingredient_id` back out of the pan and refund one unit.
pub fn remove_ingredient_from_pan(
    gs: &mut GameState,
    cs: &mut CookingState,
    ingredient_id: &str,
) -> bool {
    if cs.is_busy() {
        return false;
    }
    let pan_idx = cs.ingredients_in_pan.iter().position(|i| i.id == ingredient_id);
    let added_idx = cs.added_ingredients.iter().position(|id| id == ingredient_id);
    let (pan_idx, added_idx) = match (pan_idx, added_idx) {
        (Some(p), Some(a)) => (p, a),
        _ => return false,
    };

    cs.ingredients_in_pan.remove(pan_idx);
    cs.added_ingredients.remove(added_idx);
    *gs.inventory.entry(ingredient_id.to_string()).or_insert(0) += 1;
    true
}

/// Whether the pan holds at least the recipe's ingredients (duplicates count).
pub fn has_all_ingredients(cs: &CookingState) -> bool {
    match &cs.current_recipe {
        Some(recipe) => recipe
            .ingredients
            .iter()
            .all(|id| cs.added_count(id) >= recipe.required(id)),
        None => false,
    }
}

/// Ingredient ids still owed to the recipe, one entry per missing unit.
pub fn missing_ingredients(cs: &CookingState) -> Vec<String> {
    let recipe = match &cs.current_recipe {
        Some(r) => r,
        None => return Vec::new(),
    };
    let mut missing = Vec::new();
    let mut seen: Vec<&str> = Vec::new();
    for id in &recipe.ingredients {
        if seen.contains(&id.as_str()) {
            continue;
        }
        seen.push(id);
        let short = recipe.required(id).saturating_sub(cs.added_count(id));
        missing.extend(std::iter::repeat(id.clone()).take(short));
    }
    missing
}

/// Turn the stove on once the pan is complete.
pub fn start_cooking(cs: &mut CookingState, events: &mut EventQueue) -> bool {
    if cs.is_busy() || !has_all_ingredients(cs) {
        return false;
    }
    cs.cooking_started = true;
    events.emit(KitchenEvent::CookingStarted);
    true
}

/// One second on the stove. Returns true on the tick that finishes the dish.
///
/// Safe to call on a finished or idle stove: it does nothing, so a stale
/// timer can never complete a dish twice.
pub fn tick_cooking(cs: &mut CookingState, events: &mut EventQueue) -> bool {
    if !cs.is_cooking() {
        return false;
    }
    let cooking_time = match &cs.current_recipe {
        Some(r) => r.cooking_time,
        None => return false,
    };

    let step = if cooking_time == 0 {
        100.0
    } else {
        100.0 / cooking_time as f64
    };
    let progress = cs.cooking_progress + step;
    cs.remaining_time = cs.remaining_time.saturating_sub(1);

    if progress >= 100.0 - COMPLETION_EPSILON {
        cs.cooking_progress = 100.0;
        cs.cooking_complete = true;
        events.emit(KitchenEvent::CookingComplete);
        debug!("cooking complete");
        true
    } else {
        cs.cooking_progress = progress;
        false
    }
}

/// Whether the shelf button for `ingredient_id` should be live.
pub fn ingredient_available(gs: &GameState, cs: &CookingState, ingredient_id: &str) -> bool {
    let recipe = match &cs.current_recipe {
        Some(r) => r,
        None => return false,
    };
    gs.stock(ingredient_id) > 0
        && recipe.ingredients.iter().any(|id| id == ingredient_id)
        && cs.added_count(ingredient_id) < recipe.required(ingredient_id)
}

fn consume_one(gs: &mut GameState, ingredient_id: &str) -> bool {
    match gs.inventory.get_mut(ingredient_id) {
        Some(count) if *count > 0 => {
            *count -= 1;
            true
        }
        _ => false,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::kitchen::catalog;
    use proptest::prelude::*;

    #[derive(Clone, Debug)]
    enum Op {
        Drag(usize),
        Drop(f64, f64),
        Remove(usize),
        Stop,
        Start,
        Tick,
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..8).prop_map(Op::Drag),
            (-50.0f64..150.0, -50.0f64..150.0).prop_map(|(x, y)| Op::Drop(x, y)),
            (0usize..8).prop_map(Op::Remove),
            Just(Op::Stop),
            Just(Op::Start),
            Just(Op::Tick),
        ]
    }

    proptest! {
        #[test]
        fn prop_pan_lists_stay_parallel(
            stock in 0u32..4,
            ops in proptest::collection::vec(arb_op(), 0..60),
        ) {
            let mut gs = GameState::new();
            for count in gs.inventory.values_mut() {
                *count = stock;
            }
            let total_before: u32 = gs.inventory.values().sum();
            let mut cs = CookingState::new();
            let mut q = EventQueue::new();
            select_recipe(&gs, &mut cs, "yangChow");
            let shelf = catalog::ingredients();

            for op in ops {
                match op {
                    Op::Drag(i) => { start_dragging(&gs, &mut cs, shelf[i].clone()); }
                    Op::Drop(x, y) => { drop_ingredient_in_pan(&mut gs, &mut cs, x, y, &mut q); }
                    Op::Remove(i) => { remove_ingredient_from_pan(&mut gs, &mut cs, &shelf[i].id); }
                    Op::Stop => stop_dragging(&mut cs),
                    Op::Start => { start_cooking(&mut cs, &mut q); }
                    Op::Tick => { tick_cooking(&mut cs, &mut q); }
                }
                prop_assert_eq!(cs.added_ingredients.len(), cs.ingredients_in_pan.len());
                let total_now: u32 = gs.inventory.values().sum();
                prop_assert_eq!(total_now as usize + cs.added_ingredients.len(), total_before as usize);
                if cs.cooking_complete {
                    prop_assert_eq!(cs.cooking_progress, 100.0);
                }
                if cs.cooking_started {
                    prop_assert!(cs.current_recipe.is_some());
                }
                for p in &cs.ingredients_in_pan {
                    let pos = p.position.unwrap();
                    prop_assert!((0.0..=100.0).contains(&pos.x));
                    prop_assert!((0.0..=100.0).contains(&pos.y));
                }
            }
            prop_assert!(q.count(KitchenEvent::CookingComplete) <= 1);
        }
    }
}
