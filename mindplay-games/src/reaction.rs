//! Reaction time: wait for the stimulus, then respond as fast as possible.
//!
//! ```text
//! Idle -> Armed -> Active -> Reported -> (Armed | Finished)
//!           \_____ false start ___/
//! ```

use mindplay_core::{ActivityKind, ReactionStats, RoundRecord, Tier, mean_ms, percent};
use mindplay_timing::{Scheduler, TimerToken};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::activity::{Activity, Outcome};
use crate::config::ReactionProfile;

/// How long a round's outcome is shown before the next round arms.
pub const RESULT_DISPLAY_MS: u64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReactionState {
    Idle,
    /// Waiting for the stimulus; input now is a false start.
    Armed { since_ms: u64, wait_ms: u64 },
    /// Stimulus showing since `since_ms`.
    Active { since_ms: u64 },
    Reported(RoundRecord),
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReactionTimer {
    Stimulus,
    NextRound,
}

pub struct ReactionTime<R: Rng> {
    tier: Tier,
    profile: ReactionProfile,
    rng: R,
    state: ReactionState,
    round: u32,
    samples: Vec<u64>,
    false_starts: u32,
    history: Vec<RoundRecord>,
    stimulus: Option<TimerToken>,
    scheduler: Scheduler<ReactionTimer>,
    result: Option<ReactionStats>,
}

impl<R: Rng> ReactionTime<R> {
    pub fn new(tier: Tier, rng: R) -> Self {
        Self {
            tier,
            profile: ReactionProfile::for_tier(tier),
            rng,
            state: ReactionState::Idle,
            round: 0,
            samples: Vec::new(),
            false_starts: 0,
            history: Vec::new(),
            stimulus: None,
            scheduler: Scheduler::new(),
            result: None,
        }
    }

    fn clear(&mut self) {
        self.scheduler.invalidate();
        self.state = ReactionState::Idle;
        self.round = 0;
        self.samples.clear();
        self.false_starts = 0;
        self.history.clear();
        self.stimulus = None;
        self.result = None;
    }

    fn begin_round(&mut self, at_ms: u64) -> Option<ReactionStats> {
        if self.round >= self.profile.rounds {
            return Some(self.finish());
        }
        let (min, max) = self.profile.wait_range_ms;
        let wait_ms = self.rng.random_range(min..=max);
        self.state = ReactionState::Armed {
            since_ms: at_ms,
            wait_ms,
        };
        self.stimulus = Some(
            self.scheduler
                .schedule_after(at_ms, wait_ms, ReactionTimer::Stimulus),
        );
        debug!(round = self.round, wait_ms, "round armed");
        None
    }

    /// Handles a click/keypress. The input carries the round record when
    /// it was scored.
    pub fn respond(&mut self, now_ms: u64) -> Outcome<RoundRecord, ReactionStats> {
        if let Some(stats) = self.advance(now_ms) {
            return Outcome::finished_before(stats);
        }
        let record = match self.state {
            ReactionState::Armed { .. } => {
                if let Some(token) = self.stimulus.take() {
                    self.scheduler.cancel(token);
                }
                self.false_starts += 1;
                RoundRecord {
                    round: self.round,
                    reaction_ms: None,
                    false_start: true,
                }
            }
            ReactionState::Active { since_ms } => {
                let rt = now_ms.saturating_sub(since_ms);
                self.samples.push(rt);
                RoundRecord {
                    round: self.round,
                    reaction_ms: Some(rt),
                    false_start: false,
                }
            }
            _ => return Outcome::ignored(),
        };
        debug!(
            round = record.round,
            reaction_ms = ?record.reaction_ms,
            false_start = record.false_start,
            "round reported"
        );
        self.history.push(record);
        self.state = ReactionState::Reported(record);
        self.scheduler
            .schedule_after(now_ms, RESULT_DISPLAY_MS, ReactionTimer::NextRound);
        Outcome::accepted(record)
    }

    fn finish(&mut self) -> ReactionStats {
        self.scheduler.invalidate();
        self.state = ReactionState::Finished;
        let rounds = self.profile.rounds;
        let stats = ReactionStats {
            average_time_ms: mean_ms(&self.samples),
            best_time_ms: self.samples.iter().copied().min().unwrap_or(0),
            attempts: rounds,
            accuracy: percent(rounds.saturating_sub(self.false_starts), rounds),
        };
        info!(
            tier = %self.tier,
            average_ms = stats.average_time_ms,
            best_ms = stats.best_time_ms,
            false_starts = self.false_starts,
            accuracy = stats.accuracy,
            "reaction test complete"
        );
        self.result = Some(stats);
        stats
    }

    pub fn state(&self) -> ReactionState {
        self.state
    }

    /// Rounds already reported.
    pub fn rounds_completed(&self) -> u32 {
        self.history.len() as u32
    }

    pub fn samples(&self) -> &[u64] {
        &self.samples
    }

    pub fn false_starts(&self) -> u32 {
        self.false_starts
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    pub fn profile(&self) -> ReactionProfile {
        self.profile
    }
}

impl<R: Rng> Activity for ReactionTime<R> {
    type Stats = ReactionStats;

    const KIND: ActivityKind = ActivityKind::Reaction;

    fn tier(&self) -> Tier {
        self.tier
    }

    fn start(&mut self, now_ms: u64) {
        self.clear();
        self.begin_round(now_ms);
    }

    fn reset(&mut self) {
        self.clear();
    }

    fn advance(&mut self, now_ms: u64) -> Option<ReactionStats> {
        while let Some(fired) = self.scheduler.pop_due(now_ms) {
            match fired.event {
                ReactionTimer::Stimulus => {
                    self.stimulus = None;
                    if let ReactionState::Armed { .. } = self.state {
                        self.state = ReactionState::Active {
                            since_ms: fired.due_ms,
                        };
                    }
                }
                ReactionTimer::NextRound => {
                    self.round += 1;
                    if let Some(stats) = self.begin_round(fired.due_ms) {
                        return Some(stats);
                    }
                }
            }
        }
        None
    }

    fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_deadline()
    }

    fn result(&self) -> Option<ReactionStats> {
        self.result
    }
}
