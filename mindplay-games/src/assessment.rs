//! Onboarding skill assessment: three timed rounds of dropping items onto
//! their slots.

use mindplay_core::{ActivityKind, AssessmentScore, Point, Tier};
use mindplay_timing::Scheduler;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::activity::{Activity, Outcome};

pub const TOTAL_ROUNDS: u32 = 3;
pub const ROUND_SECS: u32 = 30;
pub const POINTS_PER_ITEM: u32 = 10;
/// Score that maps to 100%.
pub const MAX_POINTS: u32 = TOTAL_ROUNDS * 60;
pub const SKIP_SCORE: u32 = 50;
/// Drops closer than this to the slot count as correct.
pub const SNAP_RADIUS: f32 = 50.0;
pub const INTERMISSION_MS: u64 = 1000;
pub const AREA_WIDTH: f32 = 300.0;
pub const AREA_HEIGHT: f32 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AssessmentItem {
    pub id: u32,
    pub position: Point,
    pub slot: Point,
    pub correct: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssessmentState {
    /// Items laid out, waiting for `begin_round`.
    Ready,
    Active,
    /// Between rounds; the next layout appears after [`INTERMISSION_MS`].
    Intermission,
    /// Last round over; the score is emitted after [`INTERMISSION_MS`].
    Finalizing,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssessmentTimer {
    Countdown,
    NextLayout,
    Finalize,
}

pub struct SkillAssessment<R: Rng> {
    rng: R,
    round: u32,
    time_left_secs: u32,
    points: u32,
    items: Vec<AssessmentItem>,
    state: AssessmentState,
    scheduler: Scheduler<AssessmentTimer>,
    result: Option<AssessmentScore>,
}

impl<R: Rng> SkillAssessment<R> {
    pub fn new(rng: R) -> Self {
        let mut a = Self {
            rng,
            round: 1,
            time_left_secs: ROUND_SECS,
            points: 0,
            items: Vec::new(),
            state: AssessmentState::Ready,
            scheduler: Scheduler::new(),
            result: None,
        };
        a.layout();
        a
    }

    pub fn item_count(round: u32) -> u32 {
        (3 + round).min(6)
    }

    fn layout(&mut self) {
        let count = Self::item_count(self.round);
        self.items = (0..count)
            .map(|id| AssessmentItem {
                id,
                position: Point::new(
                    self.rng.random_range(0.0..=AREA_WIDTH),
                    self.rng.random_range(0.0..=AREA_HEIGHT),
                ),
                slot: Point::new(50.0 + id as f32 * 60.0, 300.0),
                correct: false,
            })
            .collect();
    }

    /// Starts the countdown for the current round. The input is the round
    /// number.
    pub fn begin_round(&mut self, now_ms: u64) -> Outcome<u32, AssessmentScore> {
        if let Some(score) = self.advance(now_ms) {
            return Outcome::finished_before(score);
        }
        if self.state != AssessmentState::Ready {
            return Outcome::ignored();
        }
        self.state = AssessmentState::Active;
        self.time_left_secs = ROUND_SECS;
        self.scheduler
            .schedule_after(now_ms, 1000, AssessmentTimer::Countdown);
        debug!(round = self.round, items = self.items.len(), "assessment round started");
        Outcome::accepted(self.round)
    }

    /// Drops item `id` at `at`. The input is whether it landed on its slot.
    pub fn drop_item(
        &mut self,
        id: u32,
        at: Point,
        now_ms: u64,
    ) -> Outcome<bool, AssessmentScore> {
        if let Some(score) = self.advance(now_ms) {
            return Outcome::finished_before(score);
        }
        if self.state != AssessmentState::Active {
            return Outcome::ignored();
        }
        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            return Outcome::ignored();
        };
        if item.correct {
            return Outcome::ignored();
        }
        if at.distance(item.slot) < SNAP_RADIUS {
            item.correct = true;
            item.position = item.slot;
            self.points += POINTS_PER_ITEM;
            Outcome::accepted(true)
        } else {
            item.position = at;
            Outcome::accepted(false)
        }
    }

    /// Ends the assessment immediately with the default score.
    pub fn skip(&mut self) -> AssessmentScore {
        self.scheduler.invalidate();
        self.complete(SKIP_SCORE)
    }

    fn complete(&mut self, score: u32) -> AssessmentScore {
        self.state = AssessmentState::Finished;
        let result = AssessmentScore { score };
        info!(score, points = self.points, "skill assessment complete");
        self.result = Some(result);
        result
    }

    pub fn final_score(&self) -> u32 {
        ((self.points as f64 / MAX_POINTS as f64 * 100.0).round() as u32).min(100)
    }

    fn end_round(&mut self, at_ms: u64) {
        debug!(round = self.round, points = self.points, "assessment round over");
        if self.round < TOTAL_ROUNDS {
            self.state = AssessmentState::Intermission;
            self.scheduler
                .schedule_after(at_ms, INTERMISSION_MS, AssessmentTimer::NextLayout);
        } else {
            self.state = AssessmentState::Finalizing;
            self.scheduler
                .schedule_after(at_ms, INTERMISSION_MS, AssessmentTimer::Finalize);
        }
    }

    pub fn items(&self) -> &[AssessmentItem] {
        &self.items
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn time_left_secs(&self) -> u32 {
        self.time_left_secs
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn state(&self) -> AssessmentState {
        self.state
    }
}

impl<R: Rng> Activity for SkillAssessment<R> {
    type Stats = AssessmentScore;

    const KIND: ActivityKind = ActivityKind::Assessment;

    /// The assessment is not tiered; it calibrates the user's starting tier.
    fn tier(&self) -> Tier {
        Tier::Easy
    }

    fn start(&mut self, now_ms: u64) {
        self.reset();
        self.begin_round(now_ms);
    }

    fn reset(&mut self) {
        self.scheduler.invalidate();
        self.round = 1;
        self.time_left_secs = ROUND_SECS;
        self.points = 0;
        self.state = AssessmentState::Ready;
        self.result = None;
        self.layout();
    }

    fn advance(&mut self, now_ms: u64) -> Option<AssessmentScore> {
        while let Some(fired) = self.scheduler.pop_due(now_ms) {
            match fired.event {
                AssessmentTimer::Countdown => {
                    self.time_left_secs = self.time_left_secs.saturating_sub(1);
                    if self.time_left_secs == 0 {
                        self.end_round(fired.due_ms);
                    } else {
                        self.scheduler
                            .schedule_after(fired.due_ms, 1000, AssessmentTimer::Countdown);
                    }
                }
                AssessmentTimer::NextLayout => {
                    self.round += 1;
                    self.layout();
                    self.state = AssessmentState::Ready;
                }
                AssessmentTimer::Finalize => {
                    let score = self.final_score();
                    return Some(self.complete(score));
                }
            }
        }
        None
    }

    fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_deadline()
    }

    fn result(&self) -> Option<AssessmentScore> {
        self.result
    }
}
