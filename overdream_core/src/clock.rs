//! Slip clock - turns elapsed wall time into slip tension.

use overdream_rules::{ContentBundle, EngineTuning, Layer, LocationId, SlipRules};
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::state::{GameState, GameStore};
use crate::store::Store;

/// Monotonic time since an arbitrary origin.
pub trait TimeSource {
    fn now(&self) -> Duration;
}

/// Wall-clock time measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemTimeSource {
    origin: Instant,
}

impl SystemTimeSource {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven time. Clones share the same reading.
#[derive(Debug, Clone, Default)]
pub struct ManualTimeSource {
    now: Rc<Cell<Duration>>,
}

impl ManualTimeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_secs(&self, secs: f64) {
        self.advance(Duration::from_secs_f64(secs));
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Tension gained over `delta_secs` at a location, before layer scaling.
pub fn tension_delta(delta_secs: f64, slip: &SlipRules, location: &LocationId) -> f64 {
    if slip.base_interval_sec <= 0.0 {
        return 0.0;
    }
    (delta_secs / slip.base_interval_sec) * 100.0 * slip.multiplier_for(location)
}

/// Tracks the previous tick and applies tension for the time since.
#[derive(Debug, Clone, Default)]
pub struct SlipClock {
    last_tick: Option<Duration>,
}

impl SlipClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `now` the reference point for the next tick.
    pub fn reset(&mut self, now: Duration) {
        self.last_tick = Some(now);
    }

    /// Seconds since the previous tick, capped at `max_secs`. The first
    /// reading after construction is zero.
    pub fn elapsed_secs(&mut self, now: Duration, max_secs: f64) -> f64 {
        let delta = self
            .last_tick
            .map(|last| now.saturating_sub(last).as_secs_f64())
            .unwrap_or(0.0);
        self.last_tick = Some(now);
        delta.min(max_secs.max(0.0))
    }

    /// Advance tension for the time since the previous tick.
    ///
    /// Waking accrues tension, dreaming relieves it at `dream_relief_factor`
    /// of the rate, menu and meta are frozen. Returns the signed change
    /// requested before clamping.
    pub fn tick(
        &mut self,
        now: Duration,
        store: &mut GameStore,
        content: &ContentBundle,
        tuning: &EngineTuning,
    ) -> f64 {
        let delta_secs = self.elapsed_secs(now, tuning.max_tick_delta_secs);
        let state = store.state();
        let gain = tension_delta(
            delta_secs,
            &content.dream_rules.slip,
            state.player().location(),
        );
        let change = match state.layer() {
            Layer::Waking => gain,
            Layer::Dream => -gain * tuning.dream_relief_factor,
            Layer::Menu | Layer::Meta => return 0.0,
        };
        store.mutate(|s| s.player.adjust_slip_tension(change));
        change
    }
}

impl GameState {
    pub(crate) fn apply_action_tension(&mut self, action: &str, amount: f64) {
        let calm = self
            .content()
            .and_then(|content| content.dream_rules.slip.calm_action(action));
        self.player.adjust_slip_tension(calm.unwrap_or(amount));
    }
}

impl Store<GameState> {
    /// Add tension for a player action. Calm actions listed in the slip
    /// rules replace `amount` with their own adjustment.
    pub fn apply_action_tension(&mut self, action: &str, amount: f64) {
        self.mutate(|s| s.apply_action_tension(action, amount));
    }
}
