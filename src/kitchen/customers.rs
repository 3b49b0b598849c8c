//! Customer queue: arrivals, rush hours, patience decay and serving.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use super::cooking;
use super::events::{EventQueue, KitchenEvent};
use super::rules::{
    PATIENCE_DECAY, RUSH_HOUR_CHANCE, RUSH_HOUR_MAX_BURST, SPAWN_PERIOD_BASE_MS,
    URGENCY_HIGH_SECS, URGENCY_MEDIUM_SECS,
};
use super::state::{CookingState, Customer, GameState};

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 7;

/// How worried the UI should look about an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub fn from_time_remaining(secs: u32) -> Self {
        if secs <= URGENCY_HIGH_SECS {
            Urgency::High
        } else if secs <= URGENCY_MEDIUM_SECS {
            Urgency::Medium
        } else {
            Urgency::Low
        }
    }
}

/// Milliseconds between arrivals at `level`. Higher levels spawn faster.
pub fn spawn_period_ms(level: u32) -> u32 {
    (SPAWN_PERIOD_BASE_MS / level.max(1)).max(1)
}

/// Whether today's list still has room.
pub fn has_room(gs: &GameState) -> bool {
    gs.customers.len() < gs.queue_capacity()
}

/// Random short id not used by anyone in today's list.
fn new_customer_id<R: Rng>(gs: &GameState, rng: &mut R) -> String {
    loop {
        let id: String = (0..ID_LEN)
            .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
            .collect();
        if gs.customer(&id).is_none() {
            return id;
        }
    }
}

/// Build a customer with a random unlocked order. None if nothing is unlocked.
fn generate_customer<R: Rng>(gs: &GameState, rng: &mut R) -> Option<Customer> {
    let menu: Vec<&str> = gs.unlocked().map(|r| r.id.as_str()).collect();
    let order = menu.choose(rng)?.to_string();
    Some(Customer::new(new_customer_id(gs, rng), order))
}

/// Regular arrival: one customer if the list has room.
pub fn spawn_customer<R: Rng>(gs: &mut GameState, rng: &mut R, events: &mut EventQueue) -> bool {
    if !has_room(gs) {
        return false;
    }
    match generate_customer(gs, rng) {
        Some(customer) => {
            debug!("customer {} arrived for {}", customer.id, customer.order);
            gs.customers.push(customer);
            events.emit(KitchenEvent::CustomerArrived);
            true
        }
        None => false,
    }
}

/// Rush-hour check. From day 2 on, a 20% draw lets up to three customers in
/// at once, ignoring the regular pacing. Returns how many arrived.
pub fn rush_hour<R: Rng>(gs: &mut GameState, rng: &mut R, events: &mut EventQueue) -> usize {
    if gs.day <= 1 || !rng.gen_bool(RUSH_HOUR_CHANCE) {
        return 0;
    }
    let burst = RUSH_HOUR_MAX_BURST.min(gs.queue_capacity().saturating_sub(gs.customers.len()));
    let mut arrived = 0;
    for _ in 0..burst {
        match generate_customer(gs, rng) {
            Some(customer) => {
                gs.customers.push(customer);
                arrived += 1;
            }
            None => break,
        }
    }
    if arrived > 0 {
        debug!("rush hour: {} customers", arrived);
        events.emit(KitchenEvent::RushHour);
    }
    arrived
}

/// One second of waiting for every unserved customer.
///
/// Touches only `time_remaining` and `patience`. Customers who run out of
/// time stay in the list, servable for nothing.
pub fn decay_patience(gs: &mut GameState) {
    for c in gs.customers.iter_mut().filter(|c| !c.served) {
        let had_time = c.time_remaining > 0;
        c.time_remaining = c.time_remaining.saturating_sub(1);
        c.patience = if had_time {
            c.patience.saturating_sub(PATIENCE_DECAY)
        } else {
            0
        };
    }
}

/// Hand the finished dish to `customer_id`.
///
/// The right dish pays the recipe price and scores the customer's patience;
/// the wrong one pays nothing and scores zero. Either way the customer is
/// done and the stove is cleared.
pub fn serve_dish(
    gs: &mut GameState,
    cs: &mut CookingState,
    customer_id: &str,
    events: &mut EventQueue,
) -> bool {
    if !cs.cooking_complete {
        return false;
    }
    let (recipe_id, price) = match &cs.current_recipe {
        Some(r) => (r.id.clone(), r.price),
        None => return false,
    };
    let customer = match gs
        .customers
        .iter_mut()
        .find(|c| c.id == customer_id && !c.served)
    {
        Some(c) => c,
        None => return false,
    };

    let correct = customer.order == recipe_id;
    let satisfaction = if correct { customer.patience } else { 0 };
    customer.served = true;
    customer.satisfaction = satisfaction;

    if correct {
        gs.money += price;
    }
    gs.score += satisfaction as u64;

    cooking::reset_cooking(cs);
    events.emit(KitchenEvent::CustomerServed);
    debug!(
        "served {} ({}), satisfaction {}",
        customer_id,
        if correct { "correct" } else { "wrong dish" },
        satisfaction
    );
    true
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_patience_and_time_never_increase(
            patience in 0u32..=100,
            time_remaining in 0u32..=30,
            ticks in 0usize..50,
        ) {
            let mut gs = GameState::new();
            let mut c = Customer::new("x".into(), "yangChow".into());
            c.patience = patience;
            c.time_remaining = time_remaining;
            gs.customers.push(c);
            let mut prev = (patience, time_remaining);
            for _ in 0..ticks {
                decay_patience(&mut gs);
                let c = &gs.customers[0];
                prop_assert!(c.patience <= prev.0);
                prop_assert!(c.time_remaining <= prev.1);
                prop_assert!(c.patience <= 100);
                prev = (c.patience, c.time_remaining);
            }
        }
    }
}
