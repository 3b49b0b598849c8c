//! Inventory and money ledger.

use log::debug;

use super::rules::INGREDIENT_UNIT_PRICE;
use super::state::GameState;

/// Total price of `quantity` units at the flat unit price.
pub fn ingredient_cost(quantity: u32) -> u64 {
    INGREDIENT_UNIT_PRICE * quantity as u64
}

/// Buy `quantity` units of an ingredient. Returns true if successful.
pub fn buy_ingredient(gs: &mut GameState, ingredient_id: &str, quantity: u32) -> bool {
    let cost = ingredient_cost(quantity);
    if gs.money < cost {
        return false;
    }
    gs.money -= cost;
    *gs.inventory.entry(ingredient_id.to_string()).or_insert(0) += quantity;
    debug!("bought {} x{} for {}", ingredient_id, quantity, cost);
    true
}

/// Buy a piece of equipment once. Returns true if successful.
pub fn buy_equipment(gs: &mut GameState, equipment_id: &str) -> bool {
    let idx = match gs.equipment.iter().position(|e| e.id == equipment_id) {
        Some(i) => i,
        None => return false,
    };
    let item = &gs.equipment[idx];
    if item.unlocked || gs.money < item.price {
        return false;
    }
    gs.money -= item.price;
    gs.equipment[idx].unlocked = true;
    debug!("bought equipment {}", equipment_id);
    true
}

/// Whether the shop button for `equipment_id` should be enabled.
pub fn can_afford_equipment(gs: &GameState, equipment_id: &str) -> bool {
    gs.equipment
        .iter()
        .find(|e| e.id == equipment_id)
        .is_some_and(|e| !e.unlocked && gs.money >= e.price)
}
