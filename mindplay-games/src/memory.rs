//! Memory-match: flip two cards at a time and find every pair before the
//! countdown runs out.

use mindplay_core::{ActivityKind, MemoryStats, Tier, percent};
use mindplay_timing::Scheduler;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use tracing::{debug, info};

use crate::activity::{Activity, Outcome};
use crate::config::MemoryProfile;

pub const SYMBOLS: [&str; 12] = [
    "🎯", "🌟", "🎨", "🎵", "🌈", "⚡", "🔥", "💎", "🌸", "🎪", "🎭", "🍀",
];

/// How long a mismatched pair stays face up.
pub const FLIP_BACK_DELAY_MS: u64 = 1000;
pub const COUNTDOWN_TICK_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub symbol: &'static str,
    pub face_up: bool,
    pub matched: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MemoryState {
    Ready,
    Playing,
    Finished,
}

/// Outcome of a card selection that was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// First card of a pair turned over.
    Revealed,
    Matched,
    /// Both cards flip back after [`FLIP_BACK_DELAY_MS`].
    Mismatched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemoryTimer {
    Countdown,
    FlipBack(usize, usize),
}

pub struct MemoryMatch<R: Rng> {
    tier: Tier,
    profile: MemoryProfile,
    rng: R,
    cards: Vec<Card>,
    face_up: Vec<usize>,
    state: MemoryState,
    moves: u32,
    matches: u32,
    elapsed_secs: u32,
    scheduler: Scheduler<MemoryTimer>,
    result: Option<MemoryStats>,
}

impl<R: Rng> MemoryMatch<R> {
    pub fn new(tier: Tier, rng: R) -> Self {
        let mut game = Self {
            tier,
            profile: MemoryProfile::for_tier(tier),
            rng,
            cards: Vec::new(),
            face_up: Vec::with_capacity(2),
            state: MemoryState::Ready,
            moves: 0,
            matches: 0,
            elapsed_secs: 0,
            scheduler: Scheduler::new(),
            result: None,
        };
        game.deal();
        game
    }

    fn deal(&mut self) {
        self.scheduler.invalidate();
        let mut symbols: Vec<&'static str> = SYMBOLS
            .iter()
            .copied()
            .cycle()
            .take(self.profile.pairs)
            .collect();
        symbols.extend_from_within(..);
        symbols.shuffle(&mut self.rng);

        self.cards = symbols
            .into_iter()
            .map(|symbol| Card {
                symbol,
                face_up: false,
                matched: false,
            })
            .collect();
        self.face_up.clear();
        self.state = MemoryState::Ready;
        self.moves = 0;
        self.matches = 0;
        self.elapsed_secs = 0;
        self.result = None;
    }

    /// Turns over the card at `index`.
    ///
    /// The selection is ignored when the run is not in progress, the index
    /// is out of range, the card is already face up or matched, or a
    /// mismatched pair is still showing. Matching the last pair completes
    /// the run.
    pub fn select_card(&mut self, index: usize, now_ms: u64) -> Outcome<Selection, MemoryStats> {
        if let Some(stats) = self.advance(now_ms) {
            return Outcome::finished_before(stats);
        }
        if self.state != MemoryState::Playing || self.face_up.len() == 2 {
            return Outcome::ignored();
        }
        let Some(card) = self.cards.get_mut(index) else {
            return Outcome::ignored();
        };
        if card.face_up || card.matched {
            return Outcome::ignored();
        }
        card.face_up = true;
        self.face_up.push(index);

        let [first, second] = self.face_up[..] else {
            return Outcome::accepted(Selection::Revealed);
        };

        self.moves += 1;
        let is_match = self.cards[first].symbol == self.cards[second].symbol;
        if is_match {
            self.matches += 1;
            self.cards[first].matched = true;
            self.cards[second].matched = true;
            self.face_up.clear();
            debug!(first, second, moves = self.moves, matches = self.matches, "pair matched");
            Outcome {
                input: Some(Selection::Matched),
                completed: (self.matches as usize == self.profile.pairs).then(|| self.finish()),
            }
        } else {
            self.scheduler.schedule_after(
                now_ms,
                FLIP_BACK_DELAY_MS,
                MemoryTimer::FlipBack(first, second),
            );
            debug!(first, second, moves = self.moves, "pair mismatched");
            Outcome::accepted(Selection::Mismatched)
        }
    }

    fn finish(&mut self) -> MemoryStats {
        self.scheduler.invalidate();
        self.state = MemoryState::Finished;
        let stats = self.stats();
        info!(
            tier = %self.tier,
            moves = stats.moves,
            matches = stats.matches,
            elapsed_secs = stats.time_elapsed_secs,
            accuracy = stats.accuracy,
            "memory match complete"
        );
        self.result = Some(stats);
        stats
    }

    /// Live counters; equal to the final result once finished.
    pub fn stats(&self) -> MemoryStats {
        MemoryStats {
            moves: self.moves,
            matches: self.matches,
            time_elapsed_secs: self.elapsed_secs,
            accuracy: percent(self.matches, self.moves),
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn state(&self) -> MemoryState {
        self.state
    }

    pub fn profile(&self) -> MemoryProfile {
        self.profile
    }
}

impl<R: Rng> Activity for MemoryMatch<R> {
    type Stats = MemoryStats;

    const KIND: ActivityKind = ActivityKind::Memory;

    fn tier(&self) -> Tier {
        self.tier
    }

    fn start(&mut self, now_ms: u64) {
        self.deal();
        self.state = MemoryState::Playing;
        self.scheduler
            .schedule_after(now_ms, COUNTDOWN_TICK_MS, MemoryTimer::Countdown);
        debug!(tier = %self.tier, cards = self.cards.len(), "memory match started");
    }

    fn reset(&mut self) {
        self.deal();
    }

    fn advance(&mut self, now_ms: u64) -> Option<MemoryStats> {
        while let Some(fired) = self.scheduler.pop_due(now_ms) {
            match fired.event {
                MemoryTimer::Countdown => {
                    self.elapsed_secs += 1;
                    if self.elapsed_secs >= self.profile.time_limit_secs {
                        return Some(self.finish());
                    }
                    self.scheduler.schedule_after(
                        fired.due_ms,
                        COUNTDOWN_TICK_MS,
                        MemoryTimer::Countdown,
                    );
                }
                MemoryTimer::FlipBack(a, b) => {
                    for idx in [a, b] {
                        self.cards[idx].face_up = false;
                    }
                    self.face_up.clear();
                }
            }
        }
        None
    }

    fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_deadline()
    }

    fn result(&self) -> Option<MemoryStats> {
        self.result
    }
}
