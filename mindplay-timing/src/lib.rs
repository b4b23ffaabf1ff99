//! Clocks and cancellable timers for the activity engines.
//!
//! Engines never read a clock themselves. The host passes `now` (milliseconds
//! on some monotonic axis) into every transition, and each engine keeps its
//! pending delays in a [`Scheduler`]. A [`Clock`] is what the host uses to
//! produce those timestamps and to wait for the next deadline.

pub mod scheduler;
pub mod timer;

pub use scheduler::{Fired, Scheduler, TimerToken};
pub use timer::{Clock, HighPrecisionTimer, JitterStats, ManualClock};
