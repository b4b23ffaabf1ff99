pub mod error;
pub mod geometry;
pub mod phase;
pub mod tier;
pub mod trial;

pub use error::CoreError;
pub use geometry::Point;
pub use phase::{ActivityKind, BreathPhase, Phase};
pub use tier::Tier;
pub use trial::{
    AssessmentScore, BreathingStats, MemoryStats, ReactionStats, RoundRecord, TargetStats,
    TrialResult,
};

/// Integer percentage of `part / whole`, rounded half away from zero.
///
/// Returns 0 when `whole` is 0.
pub fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

/// Rounded mean of millisecond samples, 0 for an empty slice.
pub fn mean_ms(samples: &[u64]) -> u64 {
    if samples.is_empty() {
        return 0;
    }
    let sum: u64 = samples.iter().sum();
    (sum as f64 / samples.len() as f64).round() as u64
}
