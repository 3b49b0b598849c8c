//! Notifications the engine raises for the audio layer.
//!
//! Events carry nothing beyond the fact that they happened. The engine
//! queues them; the shell drains the queue after each update and decides
//! what to play.

/// Something worth a sound effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KitchenEvent {
    IngredientDropped,
    CookingStarted,
    CookingComplete,
    CustomerArrived,
    RushHour,
    CustomerServed,
    UiClick,
}

impl KitchenEvent {
    /// Sound file played for this event.
    pub fn sound_path(&self) -> &'static str {
        match self {
            KitchenEvent::IngredientDropped => "/sounds/ingredient_drop.mp3",
            KitchenEvent::CookingStarted => "/sounds/cooking_start.wav",
            KitchenEvent::CookingComplete => "/sounds/cooking_complete.mp3",
            KitchenEvent::CustomerArrived => "/sounds/customer_arrive.mp3",
            KitchenEvent::RushHour => "/sounds/rush_hour.mp3",
            KitchenEvent::CustomerServed => "/sounds/customer_served.wav",
            KitchenEvent::UiClick => "/sounds/click.mp3",
        }
    }

    /// Playback volume (0.0–1.0).
    pub fn volume(&self) -> f64 {
        match self {
            KitchenEvent::IngredientDropped => 0.6,
            KitchenEvent::CookingStarted
            | KitchenEvent::CustomerArrived
            | KitchenEvent::CustomerServed => 0.7,
            KitchenEvent::CookingComplete | KitchenEvent::RushHour => 0.8,
            KitchenEvent::UiClick => 1.0,
        }
    }
}

/// Pending events, oldest first.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: Vec<KitchenEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: KitchenEvent) {
        self.pending.push(event);
    }

    /// Take every pending event.
    pub fn drain(&mut self) -> Vec<KitchenEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// How many times `event` is waiting in the queue.
    pub fn count(&self, event: KitchenEvent) -> usize {
        self.pending.iter().filter(|e| **e == event).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_queue_in_order() {
        let mut q = EventQueue::new();
        q.emit(KitchenEvent::CustomerArrived);
        q.emit(KitchenEvent::UiClick);
        assert_eq!(
            q.drain(),
            vec![KitchenEvent::CustomerArrived, KitchenEvent::UiClick]
        );
        assert!(q.is_empty());
        assert!(q.drain().is_empty());
    }

    #[test]
    fn count_matches_only_that_event() {
        let mut q = EventQueue::new();
        q.emit(KitchenEvent::CustomerArrived);
        q.emit(KitchenEvent::CustomerArrived);
        q.emit(KitchenEvent::RushHour);
        assert_eq!(q.count(KitchenEvent::CustomerArrived), 2);
        assert_eq!(q.count(KitchenEvent::CookingComplete), 0);
    }

    #[test]
    fn volumes_in_range() {
        for e in [
            KitchenEvent::IngredientDropped,
            KitchenEvent::CookingStarted,
            KitchenEvent::CookingComplete,
            KitchenEvent::CustomerArrived,
            KitchenEvent::RushHour,
            KitchenEvent::CustomerServed,
            KitchenEvent::UiClick,
        ] {
            assert!((0.0..=1.0).contains(&e.volume()));
            assert!(e.sound_path().starts_with("/sounds/"));
        }
    }
}
