use serde::{Deserialize, Serialize};

use crate::phase::ActivityKind;

/// Summary of one memory-match run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub moves: u32,
    pub matches: u32,
    pub time_elapsed_secs: u32,
    pub accuracy: u32,
}

/// Summary of one reaction-time run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionStats {
    pub average_time_ms: u64,
    pub best_time_ms: u64,
    /// Always the configured round count.
    pub attempts: u32,
    pub accuracy: u32,
}

/// Summary of one drag-to-target run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetStats {
    pub accuracy: u32,
    pub average_time_ms: u64,
    pub total_targets: u32,
    pub hits: u32,
}

/// Summary of one breathing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathingStats {
    pub duration_secs: u32,
    pub cycles: u32,
    pub consistency: u32,
    pub relaxation_score: u32,
}

/// Final skill assessment score, 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentScore {
    pub score: u32,
}

/// Outcome of a single reaction-time round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u32,
    pub reaction_ms: Option<u64>,
    pub false_start: bool,
}

/// Result emitted once per completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "activity", rename_all = "lowercase")]
pub enum TrialResult {
    Assessment(AssessmentScore),
    Memory(MemoryStats),
    Reaction(ReactionStats),
    Target(TargetStats),
    Breathing(BreathingStats),
}

impl TrialResult {
    pub fn kind(&self) -> ActivityKind {
        match self {
            TrialResult::Assessment(_) => ActivityKind::Assessment,
            TrialResult::Memory(_) => ActivityKind::Memory,
            TrialResult::Reaction(_) => ActivityKind::Reaction,
            TrialResult::Target(_) => ActivityKind::Target,
            TrialResult::Breathing(_) => ActivityKind::Breathing,
        }
    }

    /// Headline percentage for summary displays.
    pub fn headline_score(&self) -> u32 {
        match self {
            TrialResult::Assessment(s) => s.score,
            TrialResult::Memory(s) => s.accuracy,
            TrialResult::Reaction(s) => s.accuracy,
            TrialResult::Target(s) => s.accuracy,
            TrialResult::Breathing(s) => s.relaxation_score,
        }
    }
}

impl From<MemoryStats> for TrialResult {
    fn from(s: MemoryStats) -> Self {
        TrialResult::Memory(s)
    }
}

impl From<ReactionStats> for TrialResult {
    fn from(s: ReactionStats) -> Self {
        TrialResult::Reaction(s)
    }
}

impl From<TargetStats> for TrialResult {
    fn from(s: TargetStats) -> Self {
        TrialResult::Target(s)
    }
}

impl From<BreathingStats> for TrialResult {
    fn from(s: BreathingStats) -> Self {
        TrialResult::Breathing(s)
    }
}

impl From<AssessmentScore> for TrialResult {
    fn from(s: AssessmentScore) -> Self {
        TrialResult::Assessment(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_activity_tag() {
        let result: TrialResult = MemoryStats {
            moves: 4,
            matches: 2,
            time_elapsed_secs: 17,
            accuracy: 50,
        }
        .into();
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["activity"], "memory");
        assert_eq!(json["moves"], 4);
        assert_eq!(result.kind(), ActivityKind::Memory);
    }
}
