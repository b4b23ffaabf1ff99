use mindplay_core::{ActivityKind, Tier, TrialResult};

/// Lifecycle shared by every activity engine.
///
/// Engines are single-owner state machines. The host supplies `now_ms` on a
/// monotonic millisecond axis; pending delays only take effect through
/// [`Activity::advance`].
pub trait Activity {
    type Stats: Copy + Into<TrialResult>;

    const KIND: ActivityKind;

    fn tier(&self) -> Tier;

    /// Begins a fresh run, discarding any previous run state.
    fn start(&mut self, now_ms: u64);

    /// Abandons the current run and cancels every pending timer.
    fn reset(&mut self);

    /// Fires every timer due at or before `now_ms`. Returns the stats if
    /// this call completed the run.
    fn advance(&mut self, now_ms: u64) -> Option<Self::Stats>;

    /// Earliest pending timer deadline, if any.
    fn next_deadline(&self) -> Option<u64>;

    /// The stats emitted by the last completed run.
    fn result(&self) -> Option<Self::Stats>;

    fn is_finished(&self) -> bool {
        self.result().is_some()
    }
}

/// What one input transition produced.
///
/// Input methods first fire every timer already due at the input's
/// timestamp, then apply the input to the resulting state. Either step may
/// complete the run; `completed` carries the stats in that case, exactly
/// once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome<T, S> {
    /// What the input did, `None` if it was ignored.
    pub input: Option<T>,
    pub completed: Option<S>,
}

impl<T, S> Outcome<T, S> {
    pub fn ignored() -> Self {
        Self {
            input: None,
            completed: None,
        }
    }

    pub fn accepted(input: T) -> Self {
        Self {
            input: Some(input),
            completed: None,
        }
    }

    /// Timers due before the input finished the run; the input is dropped.
    pub fn finished_before(stats: S) -> Self {
        Self {
            input: None,
            completed: Some(stats),
        }
    }
}
