//! Cancellable delayed events keyed to a run generation.
//!
//! Every scheduled event remembers the generation it was scheduled in.
//! [`Scheduler::invalidate`] bumps the generation, after which older events
//! are stale: they are dropped when they come due and never returned from
//! [`Scheduler::pop_due`].

use std::collections::VecDeque;

use tracing::trace;

/// Handle to one scheduled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    generation: u64,
    seq: u64,
}

/// An event whose deadline has passed.
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<E> {
    pub token: TimerToken,
    pub due_ms: u64,
    pub event: E,
}

#[derive(Debug, Clone)]
struct Pending<E> {
    due_ms: u64,
    token: TimerToken,
    event: E,
}

#[derive(Debug, Clone)]
pub struct Scheduler<E> {
    generation: u64,
    next_seq: u64,
    // Sorted by (due_ms, seq).
    pending: VecDeque<Pending<E>>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            generation: 0,
            next_seq: 0,
            pending: VecDeque::new(),
        }
    }

    pub fn is_current(&self, token: TimerToken) -> bool {
        token.generation == self.generation
    }

    pub fn schedule_at(&mut self, due_ms: u64, event: E) -> TimerToken {
        let token = TimerToken {
            generation: self.generation,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        let idx = self
            .pending
            .partition_point(|p| (p.due_ms, p.token.seq) <= (due_ms, token.seq));
        self.pending.insert(
            idx,
            Pending {
                due_ms,
                token,
                event,
            },
        );
        token
    }

    pub fn schedule_after(&mut self, now_ms: u64, delay_ms: u64, event: E) -> TimerToken {
        self.schedule_at(now_ms.saturating_add(delay_ms), event)
    }

    /// Removes a single pending event. Returns `false` if it already fired
    /// or was never scheduled.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        match self.pending.iter().position(|p| p.token == token) {
            Some(idx) => {
                self.pending.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Starts a new generation. Everything scheduled so far becomes stale.
    pub fn invalidate(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Deadline of the earliest live event.
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending
            .iter()
            .find(|p| p.token.generation == self.generation)
            .map(|p| p.due_ms)
    }

    /// Pops the earliest live event due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Fired<E>> {
        while let Some(front) = self.pending.front() {
            if front.due_ms > now_ms {
                return None;
            }
            let Some(p) = self.pending.pop_front() else {
                return None;
            };
            if p.token.generation != self.generation {
                trace!(
                    due_ms = p.due_ms,
                    generation = p.token.generation,
                    current = self.generation,
                    "dropping stale timer"
                );
                continue;
            }
            return Some(Fired {
                token: p.token,
                due_ms: p.due_ms,
                event: p.event,
            });
        }
        None
    }

    /// Number of live (non-stale) pending events.
    pub fn live_count(&self) -> usize {
        self.pending
            .iter()
            .filter(|p| p.token.generation == self.generation)
            .count()
    }

    pub fn is_idle(&self) -> bool {
        self.live_count() == 0
    }
}
