//! Periodic timers driven by one tick source.
//!
//! The kitchen has four recurring jobs (arrivals, rush-hour checks, patience
//! decay, the cooking timer). Instead of each owning a wall-clock interval,
//! they are timers on one scheduler that is advanced by the game clock, so
//! tests can step time by hand and the firing order is fixed.

/// The recurring jobs, in the order they fire within one advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    PatienceDecay,
    CustomerSpawn,
    RushHour,
    CookingProgress,
}

impl TimerKind {
    pub fn all() -> &'static [TimerKind] {
        &[
            TimerKind::PatienceDecay,
            TimerKind::CustomerSpawn,
            TimerKind::RushHour,
            TimerKind::CookingProgress,
        ]
    }

    fn index(&self) -> usize {
        match self {
            TimerKind::PatienceDecay => 0,
            TimerKind::CustomerSpawn => 1,
            TimerKind::RushHour => 2,
            TimerKind::CookingProgress => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Timer {
    /// None while torn down.
    period_ms: Option<u32>,
    elapsed_ms: u32,
}

/// Fixed set of repeating timers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scheduler {
    timers: [Timer; 4],
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `kind` with a fresh countdown. Re-arming a running timer with
    /// the same period keeps its progress; a new period restarts it.
    pub fn arm(&mut self, kind: TimerKind, period_ms: u32) {
        let timer = &mut self.timers[kind.index()];
        let period_ms = period_ms.max(1);
        if timer.period_ms != Some(period_ms) {
            *timer = Timer {
                period_ms: Some(period_ms),
                elapsed_ms: 0,
            };
        }
    }

    /// Tear `kind` down. Its partial countdown is discarded.
    pub fn disarm(&mut self, kind: TimerKind) {
        self.timers[kind.index()] = Timer::default();
    }

    pub fn disarm_all(&mut self) {
        self.timers = Default::default();
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.timers[kind.index()].period_ms.is_some()
    }

    pub fn period_ms(&self, kind: TimerKind) -> Option<u32> {
        self.timers[kind.index()].period_ms
    }

    /// Move every armed timer forward by `delta_ms` and list the firings,
    /// grouped by kind in [`TimerKind::all`] order. A timer whose period is
    /// shorter than `delta_ms` fires more than once.
    pub fn advance(&mut self, delta_ms: u32) -> Vec<TimerKind> {
        let mut fired = Vec::new();
        for &kind in TimerKind::all() {
            let timer = &mut self.timers[kind.index()];
            let period = match timer.period_ms {
                Some(p) => p,
                None => continue,
            };
            timer.elapsed_ms += delta_ms;
            let count = timer.elapsed_ms / period;
            timer.elapsed_ms %= period;
            fired.extend(std::iter::repeat(kind).take(count as usize));
        }
        fired
    }
}
