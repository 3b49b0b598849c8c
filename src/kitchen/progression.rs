//! Day rollover: recipe unlocks, level, queue reset.

use log::info;

use super::cooking;
use super::rules::{DAYS_PER_LEVEL, UNLOCK_DAY_INTERVAL, UNLOCK_SATISFACTION};
use super::state::{CookingState, GameState};

/// Mean satisfaction of today's served customers (0 when nobody was served).
pub fn average_satisfaction(gs: &GameState) -> f64 {
    let served: Vec<u32> = gs
        .customers
        .iter()
        .filter(|c| c.served)
        .map(|c| c.satisfaction)
        .collect();
    if served.is_empty() {
        0.0
    } else {
        served.iter().map(|&s| s as f64).sum::<f64>() / served.len() as f64
    }
}

/// Level for a given day: one step every five days.
pub fn level_for_day(day: u32) -> u32 {
    day / DAYS_PER_LEVEL + 1
}

/// True when there is a day to close: someone came and everyone was served.
pub fn can_end_day(gs: &GameState) -> bool {
    !gs.customers.is_empty() && gs.customers.iter().all(|c| c.served)
}

/// Unlock the first locked recipe in catalog order. Returns its id.
fn unlock_next_recipe(gs: &mut GameState) -> Option<String> {
    let next = gs
        .recipes
        .iter_mut()
        .find(|r| !gs.unlocked_recipes.contains(&r.id))?;
    next.unlocked = true;
    let id = next.id.clone();
    gs.unlocked_recipes.insert(id.clone());
    Some(id)
}

/// Close the day. Returns the id of a newly unlocked recipe, if any.
///
/// A good day (average above 80) on every third day earns one recipe.
/// Waiting customers leave without penalty and the stove is cleared.
pub fn end_day(gs: &mut GameState, cs: &mut CookingState) -> Option<String> {
    let average = average_satisfaction(gs);
    let unlocked = if average > UNLOCK_SATISFACTION && gs.day % UNLOCK_DAY_INTERVAL == 0 {
        unlock_next_recipe(gs)
    } else {
        None
    };
    if let Some(id) = &unlocked {
        info!("day {}: unlocked {} (avg satisfaction {:.1})", gs.day, id, average);
    }

    // level comes from the day being closed
    gs.level = level_for_day(gs.day);
    gs.day += 1;
    gs.customers.clear();
    cooking::reset_cooking(cs);
    info!("day {} begins at level {}", gs.day, gs.level);
    unlocked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kitchen::state::Customer;

    fn served(id: &str, satisfaction: u32) -> Customer {
        let mut c = Customer::new(id.into(), "yangChow".into());
        c.served = true;
        c.satisfaction = satisfaction;
        c
    }

    #[test]
    fn average_ignores_unserved() {
        let mut gs = GameState::new();
        gs.customers.push(served("a", 90));
        gs.customers.push(served("b", 70));
        gs.customers.push(Customer::new("c".into(), "yangChow".into()));
        assert_eq!(average_satisfaction(&gs), 80.0);
    }

    #[test]
    fn average_is_zero_without_served() {
        let gs = GameState::new();
        assert_eq!(average_satisfaction(&gs), 0.0);
    }

    #[test]
    fn good_third_day_unlocks_first_locked() {
        let mut gs = GameState::new();
        gs.day = 3;
        gs.customers.push(served("a", 90));
        let mut cs = CookingState::new();
        cooking::select_recipe(&gs, &mut cs, "yangChow");

        assert_eq!(end_day(&mut gs, &mut cs), Some("hamSilog".to_string()));
        assert!(gs.is_unlocked("hamSilog"));
        assert!(gs.recipe("hamSilog").unwrap().unlocked);
        assert!(!gs.is_unlocked("burgerSilog"));
        assert_eq!(gs.day, 4);
        assert!(gs.customers.is_empty());
        assert_eq!(cs, CookingState::new());
    }

    #[test]
    fn second_unlock_takes_next_recipe() {
        let mut gs = GameState::new();
        gs.day = 3;
        gs.customers.push(served("a", 95));
        end_day(&mut gs, &mut CookingState::new());
        gs.day = 6;
        gs.customers.push(served("b", 95));
        assert_eq!(
            end_day(&mut gs, &mut CookingState::new()),
            Some("burgerSilog".to_string())
        );
        gs.day = 9;
        gs.customers.push(served("c", 95));
        assert_eq!(end_day(&mut gs, &mut CookingState::new()), None);
    }

    #[test]
    fn no_unlock_at_exactly_eighty_or_off_day() {
        let mut gs = GameState::new();
        gs.day = 3;
        gs.customers.push(served("a", 80));
        assert_eq!(end_day(&mut gs, &mut CookingState::new()), None);

        gs.day = 4;
        gs.customers.push(served("b", 100));
        assert_eq!(end_day(&mut gs, &mut CookingState::new()), None);
        assert!(!gs.is_unlocked("hamSilog"));
    }

    #[test]
    fn level_follows_closed_day() {
        let mut gs = GameState::new();
        gs.day = 4;
        end_day(&mut gs, &mut CookingState::new());
        assert_eq!(gs.day, 5);
        assert_eq!(gs.level, 1);

        end_day(&mut gs, &mut CookingState::new());
        assert_eq!(gs.day, 6);
        assert_eq!(gs.level, 2);
        assert_eq!(level_for_day(1), 1);
        assert_eq!(level_for_day(9), 2);
        assert_eq!(level_for_day(10), 3);
    }

    #[test]
    fn can_end_day_needs_everyone_served() {
        let mut gs = GameState::new();
        assert!(!can_end_day(&gs));
        gs.customers.push(served("a", 50));
        assert!(can_end_day(&gs));
        gs.customers.push(Customer::new("b".into(), "yangChow".into()));
        assert!(!can_end_day(&gs));
    }
}
