use std::collections::HashMap;
use tracing::{debug, info};

use super::clock::{Clock, MonotonicClock};
use super::event::{AmbianceEvent, EmittedReaction};
use super::lifecycle::{EngineState, LifecycleGraph, LifecycleRequest};
use super::profile::{AudienceProfile, AudienceProfileConfig};
use super::trigger::{detect_triggers, SpeechMetricsSample, TriggerKind};
use crate::config::AmbianceConfig;

/// Recovery amounts are scaled by `recovery_rate * RECOVERY_SCALE`.
/// The profiles were tuned against this factor.
const RECOVERY_SCALE: f32 = 10.0;
const POSITIVE_REACTION_RECOVERY: f32 = 0.1;
const ENERGY_RECOVERY: f32 = 0.02;
const MELODY_RECOVERY: f32 = 0.03;
const HESITATION_PENALTY: f32 = 0.02;

/// Simulated audience: attention dynamics plus cooldown-gated reactions.
///
/// The engine is synchronous and never schedules anything itself. Every
/// mutating call returns the ordered notifications it produced; timing
/// (the decay period, the stop grace delay) belongs to the driver in
/// [`crate::ambiance::runtime`].
pub struct AmbianceEngine<C: Clock = MonotonicClock> {
    config: AmbianceConfig,
    clock: C,
    profile: AudienceProfile,
    state: EngineState,
    attention: f32,
    last_fired: HashMap<TriggerKind, u64>,
}

impl AmbianceEngine<MonotonicClock> {
    pub fn new(profile: AudienceProfile) -> Self {
        Self::with_clock(profile, AmbianceConfig::default(), MonotonicClock::new())
    }
}

impl<C: Clock> AmbianceEngine<C> {
    pub fn with_clock(profile: AudienceProfile, config: AmbianceConfig, clock: C) -> Self {
        let mut engine = Self {
            config,
            clock,
            profile,
            state: EngineState::Stopped,
            attention: 0.0,
            last_fired: HashMap::new(),
        };
        engine.attention = engine.base_attention();
        engine
    }

    pub fn attention(&self) -> f32 {
        self.attention
    }

    pub fn profile(&self) -> AudienceProfile {
        self.profile
    }

    pub fn profile_config(&self) -> &'static AudienceProfileConfig {
        self.profile.config()
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_active()
    }

    pub fn config(&self) -> &AmbianceConfig {
        &self.config
    }

    /// Loads `profile`, resets attention and cooldowns, and plays the
    /// profile's opening reaction if it has one. Calling it while already
    /// active restarts the session with a fresh audience.
    pub fn start(&mut self, profile: AudienceProfile) -> Vec<AmbianceEvent> {
        let mut events = Vec::new();
        let Some(next) = LifecycleGraph::transition(self.state, LifecycleRequest::Start) else {
            return events;
        };

        info!(from = ?self.state, %profile, "Ambiance engine starting");
        self.profile = profile;
        self.state = next;
        self.attention = self.base_attention();
        self.last_fired.clear();

        events.push(AmbianceEvent::AttentionChanged(self.attention));
        self.fire_into(TriggerKind::SessionStart, &mut events);
        events
    }

    /// Swaps the audience. Attention does not carry over: a new audience
    /// walks in at its own base level.
    pub fn set_profile(&mut self, profile: AudienceProfile) -> Vec<AmbianceEvent> {
        debug!(from = %self.profile, to = %profile, "Audience profile changed");
        self.profile = profile;
        self.attention = self.base_attention();
        vec![AmbianceEvent::AttentionChanged(self.attention)]
    }

    /// Runs trigger detection on one sample, fires every detected trigger,
    /// then applies the continuous attention adjustment. No-op when stopped.
    pub fn process_metrics(&mut self, sample: &SpeechMetricsSample) -> Vec<AmbianceEvent> {
        let mut events = Vec::new();
        if !self.state.is_active() {
            return events;
        }

        for trigger in detect_triggers(sample) {
            self.fire_into(trigger, &mut events);
        }
        self.adjust_attention(sample, &mut events);
        events
    }

    /// Fires a trigger the host detected itself (e.g. `StrongPhrase`).
    pub fn fire(&mut self, trigger: TriggerKind) -> Vec<AmbianceEvent> {
        let mut events = Vec::new();
        if self.state.is_active() {
            self.fire_into(trigger, &mut events);
        }
        events
    }

    /// One period of natural decay, floored so the room never fully checks out.
    pub fn decay_tick(&mut self) -> Vec<AmbianceEvent> {
        if !self.state.is_active() {
            return Vec::new();
        }
        let rate = self.profile.config().attention_decay_rate;
        self.attention = (self.attention - rate).max(self.config.attention_floor);
        vec![AmbianceEvent::AttentionChanged(self.attention)]
    }

    /// Additive recovery of `amount` (0-1), scaled by the profile's recovery rate.
    pub fn recover_attention(&mut self, amount: f32) -> Vec<AmbianceEvent> {
        let mut events = Vec::new();
        if self.state.is_active() {
            self.recover_into(amount, &mut events);
        }
        events
    }

    /// Plays the closing reaction and enters `Draining`. The driver calls
    /// [`halt`](Self::halt) once the grace delay is over. Repeated calls
    /// are ignored.
    pub fn stop(&mut self) -> Vec<AmbianceEvent> {
        let mut events = Vec::new();
        let Some(next) = LifecycleGraph::transition(self.state, LifecycleRequest::Stop) else {
            debug!(state = ?self.state, "Stop ignored");
            return events;
        };

        self.fire_into(TriggerKind::SessionEnd, &mut events);
        info!(profile = %self.profile, attention = self.attention, "Ambiance engine draining");
        self.state = next;
        events
    }

    /// Ends a drain. Returns false when there was nothing to halt.
    pub fn halt(&mut self) -> bool {
        match LifecycleGraph::transition(self.state, LifecycleRequest::Halt) {
            Some(next) => {
                self.state = next;
                self.last_fired.clear();
                info!("Ambiance engine stopped");
                true
            }
            None => false,
        }
    }

    fn base_attention(&self) -> f32 {
        self.profile
            .config()
            .base_attention
            .clamp(self.config.attention_floor, 1.0)
    }

    fn fire_into(&mut self, trigger: TriggerKind, events: &mut Vec<AmbianceEvent>) -> bool {
        let now = self.clock.now_ms();
        if let Some(&last) = self.last_fired.get(&trigger) {
            if now.saturating_sub(last) < self.config.cooldown_ms {
                debug!(%trigger, since_ms = now.saturating_sub(last), "Reaction suppressed (cooldown)");
                return false;
            }
        }

        let config = self.profile.config();
        let Some(template) = config.reactions.get(trigger) else {
            return false;
        };

        let reaction = EmittedReaction::from_template(template, config.reactivity_level, self.attention);
        self.last_fired.insert(trigger, now);
        debug!(%trigger, sound = ?reaction.sound, intensity = reaction.intensity, "Reaction emitted");
        events.push(AmbianceEvent::Reaction { reaction, trigger });

        if trigger.recovers_attention() {
            self.recover_into(POSITIVE_REACTION_RECOVERY, events);
        }
        true
    }

    fn recover_into(&mut self, amount: f32, events: &mut Vec<AmbianceEvent>) {
        let rate = self.profile.config().attention_recovery_rate;
        let gain = amount.clamp(0.0, 1.0) * rate * RECOVERY_SCALE;
        self.attention = (self.attention + gain).min(1.0);
        events.push(AmbianceEvent::AttentionChanged(self.attention));
    }

    fn adjust_attention(&mut self, sample: &SpeechMetricsSample, events: &mut Vec<AmbianceEvent>) {
        if sample.energy_level > 0.5 {
            self.recover_into(ENERGY_RECOVERY, events);
        }
        if sample.melodic_variation > 0.3 {
            self.recover_into(MELODY_RECOVERY, events);
        }
        if sample.hesitation_count > 2 {
            self.attention = (self.attention - HESITATION_PENALTY).max(self.config.attention_floor);
        }
        events.push(AmbianceEvent::AttentionChanged(self.attention));
    }
}
