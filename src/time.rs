//! Fixed-timestep clock.
//!
//! The browser calls the draw callback at its own frame rate. `GameTime`
//! turns those irregular timestamps into whole ticks so the kitchen only
//! ever advances in fixed steps.

/// Longest frame gap counted, in ms. A backgrounded tab resumes with at
/// most this much catch-up.
const MAX_FRAME_MS: f64 = 500.0;

pub struct GameTime {
    ms_per_tick: f64,
    /// Milliseconds not yet turned into ticks.
    accumulator: f64,
    pub total_ticks: u64,
    /// None until the first frame.
    last_timestamp: Option<f64>,
}

impl GameTime {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec.max(1) as f64,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
        }
    }

    /// Feed a `performance.now()` timestamp. Returns the ticks to run.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = self
            .last_timestamp
            .map_or(0.0, |prev| (now_ms - prev).clamp(0.0, MAX_FRAME_MS));
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kitchen::rules::TICKS_PER_SEC;

    #[test]
    fn first_frame_returns_zero_ticks() {
        let mut gt = GameTime::new(TICKS_PER_SEC);
        assert_eq!(gt.update(12_345.0), 0);
    }

    #[test]
    fn one_tick_per_100ms() {
        let mut gt = GameTime::new(TICKS_PER_SEC);
        gt.update(0.0);
        assert_eq!(gt.update(100.0), 1);
        assert_eq!(gt.update(350.0), 2);
        assert_eq!(gt.total_ticks, 3);
    }

    #[test]
    fn remainder_carried_over() {
        let mut gt = GameTime::new(TICKS_PER_SEC);
        gt.update(0.0);
        assert_eq!(gt.update(150.0), 1);
        // 50ms left over + 50ms
        assert_eq!(gt.update(200.0), 1);
    }

    #[test]
    fn long_gap_is_clamped() {
        let mut gt = GameTime::new(TICKS_PER_SEC);
        gt.update(0.0);
        assert_eq!(gt.update(10_000.0), 5);
    }

    #[test]
    fn clock_going_backwards_is_ignored() {
        let mut gt = GameTime::new(TICKS_PER_SEC);
        gt.update(1000.0);
        assert_eq!(gt.update(900.0), 0);
        assert_eq!(gt.update(1000.0), 1);
    }

    #[test]
    fn one_second_at_60fps_is_about_ten_ticks() {
        let mut gt = GameTime::new(TICKS_PER_SEC);
        gt.update(0.0);
        let total: u32 = (1..=60).map(|i| gt.update(i as f64 * 16.667)).sum();
        assert!((9..=11).contains(&total), "expected ~10 ticks, got {total}");
    }
}
