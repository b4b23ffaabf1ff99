use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Source of millisecond timestamps for driving activity engines.
pub trait Clock: Clone + Send + Sync {
    fn now_ms(&self) -> u64;

    fn elapsed(&self, since_ms: u64) -> Duration {
        Duration::from_millis(self.now_ms().saturating_sub(since_ms))
    }

    /// Blocks (or, for virtual clocks, advances) for `d`.
    fn sleep(&self, d: Duration);

    /// Waits until `deadline_ms`; no-op if it already passed.
    fn sleep_until(&self, deadline_ms: u64) {
        let now = self.now_ms();
        if deadline_ms > now {
            self.sleep(Duration::from_millis(deadline_ms - now));
        }
    }

    /// Records how far past its deadline a wake-up landed. Virtual clocks
    /// never run late and ignore this.
    fn record_lateness(&mut self, _d: Duration) {}

    fn jitter_stats(&self) -> Option<JitterStats> {
        None
    }
}

/// Distribution of how late timer wake-ups landed.
#[derive(Debug, Clone, PartialEq)]
pub struct JitterStats {
    pub samples: usize,
    pub average_lateness_ms: f64,
    pub jitter_ms: f64,
    pub max_lateness_ms: f64,
}

/// Wall-clock timer with sub-millisecond sleep on Linux.
#[derive(Debug, Clone)]
pub struct HighPrecisionTimer {
    pub start: Instant,
    pub lateness: Vec<Duration>,
    pub max_samples: usize,
}

impl Clock for HighPrecisionTimer {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn sleep(&self, d: Duration) {
        self.high_precision_sleep(d)
    }

    fn record_lateness(&mut self, d: Duration) {
        if self.lateness.len() >= self.max_samples {
            self.lateness.remove(0);
        }
        self.lateness.push(d);
    }

    fn jitter_stats(&self) -> Option<JitterStats> {
        Some(self.lateness_stats())
    }
}

impl HighPrecisionTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            lateness: Vec::with_capacity(1000),
            max_samples: 1000,
        }
    }

    pub fn lateness_stats(&self) -> JitterStats {
        let times: Vec<f64> = self
            .lateness
            .iter()
            .map(|d| d.as_secs_f64() * 1000.0)
            .collect();
        if times.is_empty() {
            return JitterStats {
                samples: 0,
                average_lateness_ms: 0.0,
                jitter_ms: 0.0,
                max_lateness_ms: 0.0,
            };
        }
        let avg = times.iter().sum::<f64>() / times.len() as f64;
        let var = times.iter().map(|x| (x - avg).powi(2)).sum::<f64>() / times.len() as f64;
        let max = times.iter().copied().fold(0.0_f64, f64::max);
        JitterStats {
            samples: times.len(),
            average_lateness_ms: avg,
            jitter_ms: var.sqrt(),
            max_lateness_ms: max,
        }
    }

    pub fn high_precision_sleep(&self, duration: Duration) {
        #[cfg(target_os = "linux")]
        self.linux_sleep(duration);
        #[cfg(not(target_os = "linux"))]
        std::thread::sleep(duration);
    }

    #[cfg(target_os = "linux")]
    fn linux_sleep(&self, duration: Duration) {
        use libc::{CLOCK_MONOTONIC, clock_nanosleep, timespec};

        let req = timespec {
            tv_sec: duration.as_secs() as libc::time_t,
            tv_nsec: duration.subsec_nanos() as libc::c_long,
        };

        // SAFETY: `req` is a valid timespec and the remainder pointer may be null.
        unsafe {
            clock_nanosleep(CLOCK_MONOTONIC, 0, &req, std::ptr::null_mut());
        }
    }
}

impl Default for HighPrecisionTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Virtual clock; `sleep` advances time instantly.
///
/// Clones share the same time source.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(ms)),
        }
    }

    pub fn advance(&self, ms: u64) -> u64 {
        self.now.fetch_add(ms, Ordering::SeqCst) + ms
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }

    fn sleep(&self, d: Duration) {
        self.advance(d.as_millis() as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_shares_time_between_clones() {
        let mut clock = ManualClock::new();
        clock.record_lateness(Duration::from_millis(5));
        let other = clock.clone();
        clock.sleep(Duration::from_millis(250));
        assert_eq!(other.now_ms(), 250);
        other.sleep_until(1000);
        assert_eq!(clock.now_ms(), 1000);
        clock.sleep_until(400);
        assert_eq!(clock.now_ms(), 1000);
        assert_eq!(clock.elapsed(600), Duration::from_millis(400));
        assert!(clock.jitter_stats().is_none());
    }

    #[test]
    fn jitter_stats_over_samples() {
        let mut timer = HighPrecisionTimer::new();
        assert_eq!(timer.lateness_stats().samples, 0);
        timer.record_lateness(Duration::from_millis(1));
        timer.record_lateness(Duration::from_millis(3));
        let stats = timer.jitter_stats().unwrap();
        assert_eq!(stats.samples, 2);
        assert!((stats.average_lateness_ms - 2.0).abs() < 1e-9);
        assert!((stats.jitter_ms - 1.0).abs() < 1e-9);
        assert!((stats.max_lateness_ms - 3.0).abs() < 1e-9);
    }

    #[test]
    fn lateness_buffer_is_bounded() {
        let mut timer = HighPrecisionTimer::new();
        timer.max_samples = 3;
        for ms in 0..5 {
            timer.record_lateness(Duration::from_millis(ms));
        }
        assert_eq!(timer.lateness.len(), 3);
        assert_eq!(timer.lateness[0], Duration::from_millis(2));
    }
}
