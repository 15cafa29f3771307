//! Layer state machine - the per-frame tick that drives slips and intrusions.
//!
//! Order within one tick:
//! 1. drop the tick if content has not loaded;
//! 2. fire a due meta-dream exit;
//! 3. advance the slip clock;
//! 4. waking -> dream or dream -> waking on tension thresholds;
//! 5. intrusion check, after 4 so instability reflects the latest slip.

use overdream_rules::{EngineTuning, IntrusionRules, Layer, VisualCue};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

use crate::clock::{SlipClock, TimeSource};
use crate::ecology::EcologyOutcome;
use crate::state::{GameState, GameStore};
use crate::worldgen::{generate_meta_room, MetaRoom};

/// One layer change made during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerTransition {
    pub from: Layer,
    pub to: Layer,
    /// `None` when the target layer has no cue (the menu).
    pub cue: Option<VisualCue>,
}

/// What a tick did.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickReport {
    /// Content was missing; nothing ran.
    pub content_pending: bool,
    pub transitions: Vec<LayerTransition>,
    /// Outcome of the ecology run when a dream began this tick.
    pub ecology: Option<EcologyOutcome>,
    /// Room generated for a meta-dream entered this tick.
    pub meta_room: Option<MetaRoom>,
}

impl TickReport {
    fn pending() -> Self {
        Self {
            content_pending: true,
            ..Self::default()
        }
    }

    pub fn entered(&self, layer: Layer) -> bool {
        self.transitions.iter().any(|t| t.to == layer)
    }
}

/// A scheduled return from the meta layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MetaExit {
    due: Duration,
    /// Layer generation right after entering meta.
    generation: u64,
}

/// Drives the menu/waking/dream/meta machine from a time source.
pub struct GameLoop<T: TimeSource> {
    time: T,
    tuning: EngineTuning,
    clock: SlipClock,
    last_intrusion: Option<Duration>,
    meta_exit: Option<MetaExit>,
    rng: StdRng,
}

impl<T: TimeSource> GameLoop<T> {
    pub fn new(time: T, tuning: EngineTuning) -> Self {
        let mut clock = SlipClock::new();
        clock.reset(time.now());
        Self {
            time,
            tuning,
            clock,
            last_intrusion: None,
            meta_exit: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Seed the meta room generator for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn tuning(&self) -> &EngineTuning {
        &self.tuning
    }

    pub fn time(&self) -> &T {
        &self.time
    }

    /// Restart the clock reference, e.g. after the host was suspended.
    pub fn reset_clock(&mut self) {
        self.clock.reset(self.time.now());
    }

    /// Deadline of the pending meta exit, if one is scheduled.
    pub fn meta_exit_due(&self) -> Option<Duration> {
        self.meta_exit.map(|exit| exit.due)
    }

    /// Run one frame.
    pub fn tick(&mut self, store: &mut GameStore) -> TickReport {
        let Some(content) = store.state().content_handle() else {
            return TickReport::pending();
        };
        let now = self.time.now();
        let mut report = TickReport::default();

        self.fire_meta_exit(now, store, &mut report);
        self.clock.tick(now, store, &content, &self.tuning);
        self.evaluate_slip(store, &mut report);
        self.check_intrusion(now, store, &content.dream_rules.intrusion, &mut report);

        report
    }

    fn evaluate_slip(&mut self, store: &mut GameStore, report: &mut TickReport) {
        let state = store.state();
        let tension = state.player().slip_tension();
        match state.layer() {
            Layer::Waking if tension >= self.tuning.dream_threshold => {
                self.enter_dream(store, report);
            }
            Layer::Dream if tension <= self.tuning.wake_threshold => {
                let transition = store.mutate(|s| {
                    let transition = s.transition(Layer::Waking);
                    s.player.set_slip_tension(0.0);
                    s.flags.last_ecology_hash = Some(s.ecology_fingerprint());
                    transition
                });
                report.transitions.push(transition);
            }
            _ => {}
        }
    }

    fn enter_dream(&mut self, store: &mut GameStore, report: &mut TickReport) {
        let Some(content) = store.state().content_handle() else {
            return;
        };
        let tuning = &self.tuning;
        let rules = &content.dream_rules;
        let (transition, outcome) = store.mutate(|s| {
            let transition = s.transition(Layer::Dream);
            s.player.set_slip_tension(tuning.dream_entry_tension);
            s.player.increment_slip_count();
            s.player.adjust_instability(rules.intrusion.instability_per_slip);
            let outcome = s.apply_dream_ecology(rules, tuning.motif_feedback);
            (transition, outcome)
        });
        tracing::debug!(
            slip_count = store.state().player().slip_count(),
            instability = store.state().player().instability(),
            "Slipped into dream"
        );
        report.transitions.push(transition);
        report.ecology = Some(outcome);
    }

    fn check_intrusion(
        &mut self,
        now: Duration,
        store: &mut GameStore,
        rules: &IntrusionRules,
        report: &mut TickReport,
    ) {
        let state = store.state();
        if !state.layer().is_playing() {
            return;
        }
        if state.player().instability() < rules.meta_dream_threshold {
            return;
        }
        // A cooldown too large for a Duration never elapses.
        let cooldown = secs_to_duration(rules.cooldown_sec).unwrap_or(Duration::MAX);
        if let Some(last) = self.last_intrusion {
            if now.saturating_sub(last) <= cooldown {
                return;
            }
        }

        let tuning = &self.tuning;
        let (transition, generation) = store.mutate(|s| {
            let transition = s.transition(Layer::Meta);
            s.player.adjust_instability(-rules.meta_dream_threshold / 2.0);
            s.player.set_slip_tension(tuning.meta_entry_tension);
            (transition, s.layer_generation)
        });
        self.last_intrusion = Some(now);
        // Replaces any exit still pending from an earlier intrusion. A
        // duration that cannot be represented schedules no exit at all.
        self.meta_exit = secs_to_duration(self.tuning.meta_dream_duration_secs)
            .and_then(|duration| now.checked_add(duration))
            .map(|due| MetaExit { due, generation });
        let room = generate_meta_room(&mut self.rng);
        tracing::debug!(
            due_secs = self.meta_exit.map(|exit| exit.due.as_secs_f64()),
            rule = %room.rule,
            "Meta-dream intrusion"
        );
        report.transitions.push(transition);
        report.meta_room = Some(room);
    }

    fn fire_meta_exit(&mut self, now: Duration, store: &mut GameStore, report: &mut TickReport) {
        let Some(exit) = self.meta_exit else {
            return;
        };
        if now < exit.due {
            return;
        }
        self.meta_exit = None;

        let state = store.state();
        if state.layer() != Layer::Meta || state.layer_generation() != exit.generation {
            tracing::debug!("Discarding stale meta-dream exit");
            return;
        }
        let transition = store.mutate(|s| {
            let transition = s.transition(Layer::Waking);
            s.player.set_slip_tension(0.0);
            transition
        });
        report.transitions.push(transition);
    }
}

/// Seconds from tuning or content as a `Duration`. Negative and NaN values
/// count as zero; `None` when the value is too large to represent.
fn secs_to_duration(secs: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(secs.max(0.0)).ok()
}

impl GameState {
    fn transition(&mut self, to: Layer) -> LayerTransition {
        let from = self.layer;
        self.set_layer(to);
        LayerTransition {
            from,
            to,
            cue: VisualCue::for_layer(to),
        }
    }
}
