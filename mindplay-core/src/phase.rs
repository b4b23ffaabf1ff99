use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Ordered sub-states that advance in a fixed sequence.
pub trait Phase: Copy + Clone + PartialEq + Send + Sync + std::fmt::Debug + Default {
    /// The phase that follows this one, or `None` if the sequence ends here.
    fn next(&self) -> Option<Self>;

    fn label(&self) -> &'static str;

    fn is_terminal(&self) -> bool {
        self.next().is_none()
    }
}

/// One step of the breathing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreathPhase {
    #[default]
    Inhale,
    Hold,
    Exhale,
    Rest,
}

impl BreathPhase {
    pub const CYCLE: [BreathPhase; 4] = [
        BreathPhase::Inhale,
        BreathPhase::Hold,
        BreathPhase::Exhale,
        BreathPhase::Rest,
    ];

}

impl Phase for BreathPhase {
    // The cycle never terminates; `Rest` wraps around to `Inhale`.
    fn next(&self) -> Option<Self> {
        use BreathPhase::*;
        Some(match self {
            Inhale => Hold,
            Hold => Exhale,
            Exhale => Rest,
            Rest => Inhale,
        })
    }

    fn label(&self) -> &'static str {
        match self {
            BreathPhase::Inhale => "inhale",
            BreathPhase::Hold => "hold",
            BreathPhase::Exhale => "exhale",
            BreathPhase::Rest => "rest",
        }
    }
}

/// Identity of an activity engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Assessment,
    #[default]
    Memory,
    Reaction,
    Target,
    Breathing,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Assessment => "assessment",
            ActivityKind::Memory => "memory",
            ActivityKind::Reaction => "reaction",
            ActivityKind::Target => "target",
            ActivityKind::Breathing => "breathing",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "assessment" => Ok(ActivityKind::Assessment),
            "memory" => Ok(ActivityKind::Memory),
            "reaction" => Ok(ActivityKind::Reaction),
            "target" | "drag" => Ok(ActivityKind::Target),
            "breathing" => Ok(ActivityKind::Breathing),
            _ => Err(CoreError::UnknownActivity(s.to_string())),
        }
    }
}
