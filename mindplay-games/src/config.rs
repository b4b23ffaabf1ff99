//! Per-tier difficulty profiles.
//!
//! Every lookup is a total `match` over [`Tier`], so each tier always
//! resolves to a profile.

use mindplay_core::{BreathPhase, Tier};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryProfile {
    pub pairs: usize,
    pub time_limit_secs: u32,
}

impl MemoryProfile {
    pub fn for_tier(tier: Tier) -> Self {
        let (pairs, time_limit_secs) = match tier {
            Tier::Easy => (6, 120),
            Tier::Medium => (8, 90),
            Tier::Hard => (12, 60),
        };
        Self {
            pairs,
            time_limit_secs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionProfile {
    pub rounds: u32,
    /// Inclusive bounds of the random pre-stimulus wait.
    pub wait_range_ms: (u64, u64),
}

impl ReactionProfile {
    pub fn for_tier(tier: Tier) -> Self {
        let (rounds, wait_range_ms) = match tier {
            Tier::Easy => (5, (2000, 5000)),
            Tier::Medium => (8, (1500, 4000)),
            Tier::Hard => (10, (1000, 3000)),
        };
        Self {
            rounds,
            wait_range_ms,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetProfile {
    pub target_count: usize,
    /// Target diameter in canvas pixels.
    pub target_size: f32,
}

impl TargetProfile {
    pub fn for_tier(tier: Tier) -> Self {
        let (target_count, target_size) = match tier {
            Tier::Easy => (8, 60.0),
            Tier::Medium => (12, 45.0),
            Tier::Hard => (16, 30.0),
        };
        Self {
            target_count,
            target_size,
        }
    }

    pub fn target_radius(&self) -> f32 {
        self.target_size / 2.0
    }
}

/// Seconds spent in each breathing phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathingPattern {
    pub inhale: u32,
    pub hold: u32,
    pub exhale: u32,
    pub rest: u32,
}

impl BreathingPattern {
    pub fn duration_secs(&self, phase: BreathPhase) -> u32 {
        match phase {
            BreathPhase::Inhale => self.inhale,
            BreathPhase::Hold => self.hold,
            BreathPhase::Exhale => self.exhale,
            BreathPhase::Rest => self.rest,
        }
    }

    pub fn duration_ms(&self, phase: BreathPhase) -> u64 {
        self.duration_secs(phase) as u64 * 1000
    }

    pub fn cycle_secs(&self) -> u32 {
        self.inhale + self.hold + self.exhale + self.rest
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathingProfile {
    pub pattern: BreathingPattern,
    pub target_cycles: u32,
    /// Nominal run length used for the consistency score.
    pub nominal_duration_secs: u32,
}

impl BreathingProfile {
    pub fn for_tier(tier: Tier) -> Self {
        let (inhale, hold, exhale, rest, target_cycles, nominal_duration_secs) = match tier {
            Tier::Easy => (4, 2, 4, 2, 5, 60),
            Tier::Medium => (4, 4, 4, 2, 8, 120),
            Tier::Hard => (6, 6, 6, 2, 10, 180),
        };
        Self {
            pattern: BreathingPattern {
                inhale,
                hold,
                exhale,
                rest,
            },
            target_cycles,
            nominal_duration_secs,
        }
    }
}

/// Every profile for one tier, as printed by `mindplay profiles`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierProfiles {
    pub tier: Tier,
    pub memory: MemoryProfile,
    pub reaction: ReactionProfile,
    pub target: TargetProfile,
    pub breathing: BreathingProfile,
}

impl TierProfiles {
    pub fn for_tier(tier: Tier) -> Self {
        Self {
            tier,
            memory: MemoryProfile::for_tier(tier),
            reaction: ReactionProfile::for_tier(tier),
            target: TargetProfile::for_tier(tier),
            breathing: BreathingProfile::for_tier(tier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tier_resolves() {
        for tier in Tier::ALL {
            let p = TierProfiles::for_tier(tier);
            assert!(p.memory.pairs > 0);
            assert!(p.reaction.wait_range_ms.0 <= p.reaction.wait_range_ms.1);
            assert!(p.target.target_count > 0);
            assert!(p.breathing.target_cycles > 0);
        }
    }

    #[test]
    fn easy_breathing_matches_nominal_duration() {
        let p = BreathingProfile::for_tier(Tier::Easy);
        assert_eq!(p.pattern.cycle_secs() * p.target_cycles, p.nominal_duration_secs);
    }

    #[test]
    fn hard_target_radius() {
        assert_eq!(TargetProfile::for_tier(Tier::Hard).target_radius(), 15.0);
    }
}
