//! Breathing pacer: a tick-driven inhale/hold/exhale/rest cycle.
//!
//! Time is tracked in whole milliseconds so phase boundaries land exactly on
//! tick boundaries.

use mindplay_core::{ActivityKind, BreathPhase, BreathingStats, Phase, Tier};
use mindplay_timing::Scheduler;
use serde::Serialize;
use tracing::{debug, info};

use crate::activity::{Activity, Outcome};
use crate::config::BreathingProfile;

pub const TICK_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PacerState {
    Idle,
    Running,
    Paused,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PacerTimer {
    Tick,
}

pub struct BreathingPacer {
    tier: Tier,
    profile: BreathingProfile,
    state: PacerState,
    phase: BreathPhase,
    time_in_phase_ms: u64,
    elapsed_ms: u64,
    cycles: u32,
    scheduler: Scheduler<PacerTimer>,
    result: Option<BreathingStats>,
}

impl BreathingPacer {
    pub fn new(tier: Tier) -> Self {
        Self {
            tier,
            profile: BreathingProfile::for_tier(tier),
            state: PacerState::Idle,
            phase: BreathPhase::default(),
            time_in_phase_ms: 0,
            elapsed_ms: 0,
            cycles: 0,
            scheduler: Scheduler::new(),
            result: None,
        }
    }

    /// Ticks due by `now_ms` still count before the pacer stops.
    pub fn pause(&mut self, now_ms: u64) -> Outcome<PacerState, BreathingStats> {
        if let Some(stats) = self.advance(now_ms) {
            return Outcome::finished_before(stats);
        }
        if self.state != PacerState::Running {
            return Outcome::ignored();
        }
        self.scheduler.invalidate();
        self.state = PacerState::Paused;
        debug!(phase = self.phase.label(), elapsed_ms = self.elapsed_ms, "pacer paused");
        Outcome::accepted(self.state)
    }

    pub fn resume(&mut self, now_ms: u64) -> Outcome<PacerState, BreathingStats> {
        if self.state != PacerState::Paused {
            return Outcome::ignored();
        }
        self.state = PacerState::Running;
        self.scheduler.schedule_after(now_ms, TICK_MS, PacerTimer::Tick);
        debug!(phase = self.phase.label(), "pacer resumed");
        Outcome::accepted(self.state)
    }

    /// Pause button behaviour: pauses when running, resumes when paused.
    pub fn toggle_pause(&mut self, now_ms: u64) -> Outcome<PacerState, BreathingStats> {
        match self.state {
            PacerState::Running => self.pause(now_ms),
            PacerState::Paused => self.resume(now_ms),
            _ => Outcome::ignored(),
        }
    }

    fn tick(&mut self) -> Option<BreathingStats> {
        self.time_in_phase_ms += TICK_MS;
        self.elapsed_ms += TICK_MS;

        if self.time_in_phase_ms >= self.profile.pattern.duration_ms(self.phase) {
            self.time_in_phase_ms = 0;
            let from = self.phase;
            self.phase = from.next().unwrap_or_default();
            if from == BreathPhase::Rest {
                self.cycles += 1;
                debug!(cycles = self.cycles, "breathing cycle completed");
            }
        }

        if self.cycles >= self.profile.target_cycles {
            return Some(self.finish());
        }
        None
    }

    fn finish(&mut self) -> BreathingStats {
        self.scheduler.invalidate();
        self.state = PacerState::Finished;

        let elapsed_secs = self.elapsed_ms as f64 / 1000.0;
        let nominal = self.profile.nominal_duration_secs as f64;
        let consistency = (100.0 - (elapsed_secs - nominal).abs() / nominal * 100.0).max(0.0);
        let relaxation =
            (70.0 + self.cycles as f64 / self.profile.target_cycles as f64 * 30.0).min(100.0);

        let stats = BreathingStats {
            duration_secs: elapsed_secs.round() as u32,
            cycles: self.cycles,
            consistency: consistency.round() as u32,
            relaxation_score: relaxation.round() as u32,
        };
        info!(
            tier = %self.tier,
            duration_secs = stats.duration_secs,
            cycles = stats.cycles,
            consistency = stats.consistency,
            "breathing exercise complete"
        );
        self.result = Some(stats);
        stats
    }

    pub fn state(&self) -> PacerState {
        self.state
    }

    pub fn phase(&self) -> BreathPhase {
        self.phase
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn time_in_phase_ms(&self) -> u64 {
        self.time_in_phase_ms
    }

    /// Fraction of the current phase already spent, 0.0..=1.0.
    pub fn phase_progress(&self) -> f64 {
        let total = self.profile.pattern.duration_ms(self.phase);
        if total == 0 {
            return 0.0;
        }
        (self.time_in_phase_ms as f64 / total as f64).min(1.0)
    }

    /// Whole seconds left in the current phase, rounded up.
    pub fn seconds_remaining(&self) -> u32 {
        let left = self
            .profile
            .pattern
            .duration_ms(self.phase)
            .saturating_sub(self.time_in_phase_ms);
        left.div_ceil(1000) as u32
    }

    pub fn profile(&self) -> BreathingProfile {
        self.profile
    }
}

impl Activity for BreathingPacer {
    type Stats = BreathingStats;

    const KIND: ActivityKind = ActivityKind::Breathing;

    fn tier(&self) -> Tier {
        self.tier
    }

    fn start(&mut self, now_ms: u64) {
        self.reset();
        self.state = PacerState::Running;
        self.scheduler.schedule_after(now_ms, TICK_MS, PacerTimer::Tick);
        debug!(tier = %self.tier, "pacer started");
    }

    fn reset(&mut self) {
        self.scheduler.invalidate();
        self.state = PacerState::Idle;
        self.phase = BreathPhase::default();
        self.time_in_phase_ms = 0;
        self.elapsed_ms = 0;
        self.cycles = 0;
        self.result = None;
    }

    fn advance(&mut self, now_ms: u64) -> Option<BreathingStats> {
        while let Some(fired) = self.scheduler.pop_due(now_ms) {
            match fired.event {
                PacerTimer::Tick => {
                    if self.state != PacerState::Running {
                        continue;
                    }
                    if let Some(stats) = self.tick() {
                        return Some(stats);
                    }
                    self.scheduler
                        .schedule_after(fired.due_ms, TICK_MS, PacerTimer::Tick);
                }
            }
        }
        None
    }

    fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_deadline()
    }

    fn result(&self) -> Option<BreathingStats> {
        self.result
    }
}
