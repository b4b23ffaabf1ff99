//! Drag-to-target: drag the cursor onto each highlighted circle in turn.

use mindplay_core::{ActivityKind, Point, TargetStats, Tier, mean_ms, percent};
use mindplay_timing::Scheduler;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::activity::{Activity, Outcome};
use crate::config::TargetProfile;

pub const CANVAS_WIDTH: f32 = 500.0;
pub const CANVAS_HEIGHT: f32 = 300.0;
pub const CURSOR_RADIUS: f32 = 15.0;
pub const CURSOR_START: Point = Point::new(50.0, 50.0);
/// Pause between resolving a target and presenting the next one.
pub const RESOLVE_DELAY_MS: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Target {
    pub id: u32,
    pub center: Point,
    pub size: f32,
    /// `None` until resolved.
    pub hit: Option<bool>,
}

impl Target {
    /// Inclusive: touching the boundary counts.
    pub fn is_hit_by(&self, cursor: Point) -> bool {
        cursor.distance(self.center) <= self.size / 2.0 + CURSOR_RADIUS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TargetState {
    Ready,
    Tracking,
    Resolving,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TargetTimer {
    Advance,
}

pub struct TargetAcquisition<R: Rng> {
    tier: Tier,
    profile: TargetProfile,
    rng: R,
    targets: Vec<Target>,
    current: usize,
    cursor: Point,
    dragging: bool,
    state: TargetState,
    current_since_ms: u64,
    hit_times: Vec<u64>,
    hits: u32,
    scheduler: Scheduler<TargetTimer>,
    result: Option<TargetStats>,
}

impl<R: Rng> TargetAcquisition<R> {
    pub fn new(tier: Tier, rng: R) -> Self {
        let mut game = Self {
            tier,
            profile: TargetProfile::for_tier(tier),
            rng,
            targets: Vec::new(),
            current: 0,
            cursor: CURSOR_START,
            dragging: false,
            state: TargetState::Ready,
            current_since_ms: 0,
            hit_times: Vec::new(),
            hits: 0,
            scheduler: Scheduler::new(),
            result: None,
        };
        game.generate();
        game
    }

    /// Lays out a fresh set of targets. Positions are not checked for
    /// overlap.
    pub fn generate(&mut self) {
        self.scheduler.invalidate();
        let size = self.profile.target_size;
        let r = self.profile.target_radius();
        self.targets = (0..self.profile.target_count as u32)
            .map(|id| Target {
                id,
                center: Point::new(
                    self.rng.random_range(r..=CANVAS_WIDTH - r),
                    self.rng.random_range(r..=CANVAS_HEIGHT - r),
                ),
                size,
                hit: None,
            })
            .collect();
        self.current = 0;
        self.cursor = CURSOR_START;
        self.dragging = false;
        self.state = TargetState::Ready;
        self.current_since_ms = 0;
        self.hit_times.clear();
        self.hits = 0;
        self.result = None;
    }

    fn clamp(p: Point) -> Point {
        p.clamp(
            Point::new(CURSOR_RADIUS, CURSOR_RADIUS),
            Point::new(CANVAS_WIDTH - CURSOR_RADIUS, CANVAS_HEIGHT - CURSOR_RADIUS),
        )
    }

    /// Starts a drag on the active target. The input is the clamped cursor.
    pub fn pointer_down(&mut self, at: Point, now_ms: u64) -> Outcome<Point, TargetStats> {
        if let Some(stats) = self.advance(now_ms) {
            return Outcome::finished_before(stats);
        }
        if self.state != TargetState::Tracking {
            return Outcome::ignored();
        }
        self.dragging = true;
        self.cursor = Self::clamp(at);
        Outcome::accepted(self.cursor)
    }

    pub fn pointer_move(&mut self, at: Point) {
        if self.dragging {
            self.cursor = Self::clamp(at);
        }
    }

    /// Pointer left the canvas: the drag ends without resolving.
    pub fn pointer_leave(&mut self) {
        self.dragging = false;
    }

    /// Ends the drag and resolves the active target. The input is whether it
    /// was hit; ignored if no drag was in progress.
    pub fn pointer_up(&mut self, now_ms: u64) -> Outcome<bool, TargetStats> {
        if let Some(stats) = self.advance(now_ms) {
            return Outcome::finished_before(stats);
        }
        if !self.dragging || self.state != TargetState::Tracking {
            return Outcome::ignored();
        }
        self.dragging = false;

        let cursor = self.cursor;
        let Some(target) = self.targets.get_mut(self.current) else {
            return Outcome::ignored();
        };
        let hit = target.is_hit_by(cursor);
        target.hit = Some(hit);

        let elapsed = now_ms.saturating_sub(self.current_since_ms);
        if hit {
            self.hits += 1;
            self.hit_times.push(elapsed);
        }
        debug!(target = self.current, hit, elapsed_ms = elapsed, "target resolved");

        self.state = TargetState::Resolving;
        self.scheduler
            .schedule_after(now_ms, RESOLVE_DELAY_MS, TargetTimer::Advance);
        Outcome::accepted(hit)
    }

    fn finish(&mut self) -> TargetStats {
        self.scheduler.invalidate();
        self.state = TargetState::Finished;
        let total = self.targets.len() as u32;
        let stats = TargetStats {
            accuracy: percent(self.hits, total),
            average_time_ms: mean_ms(&self.hit_times),
            total_targets: total,
            hits: self.hits,
        };
        info!(
            tier = %self.tier,
            hits = stats.hits,
            total = stats.total_targets,
            average_ms = stats.average_time_ms,
            "target game complete"
        );
        self.result = Some(stats);
        stats
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn active_target(&self) -> Option<&Target> {
        match self.state {
            TargetState::Tracking | TargetState::Resolving => self.targets.get(self.current),
            _ => None,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn state(&self) -> TargetState {
        self.state
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn profile(&self) -> TargetProfile {
        self.profile
    }
}

impl<R: Rng> Activity for TargetAcquisition<R> {
    type Stats = TargetStats;

    const KIND: ActivityKind = ActivityKind::Target;

    fn tier(&self) -> Tier {
        self.tier
    }

    fn start(&mut self, now_ms: u64) {
        self.generate();
        self.state = TargetState::Tracking;
        self.current_since_ms = now_ms;
        debug!(tier = %self.tier, targets = self.targets.len(), "target game started");
    }

    fn reset(&mut self) {
        self.generate();
    }

    fn advance(&mut self, now_ms: u64) -> Option<TargetStats> {
        while let Some(fired) = self.scheduler.pop_due(now_ms) {
            match fired.event {
                TargetTimer::Advance => {
                    if self.current + 1 >= self.targets.len() {
                        return Some(self.finish());
                    }
                    self.current += 1;
                    self.current_since_ms = fired.due_ms;
                    self.state = TargetState::Tracking;
                }
            }
        }
        None
    }

    fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_deadline()
    }

    fn result(&self) -> Option<TargetStats> {
        self.result
    }
}
