//! Activity engines for therapy sessions.
//!
//! Each engine is a single-owner state machine configured by a [`Tier`]
//! and driven through the [`Activity`] lifecycle. Engines hold no clock;
//! the host passes millisecond timestamps into every transition.
//!
//! [`Tier`]: mindplay_core::Tier

pub mod activity;
pub mod assessment;
pub mod breathing;
pub mod config;
pub mod memory;
pub mod reaction;
pub mod session;
pub mod target;

pub use activity::{Activity, Outcome};
pub use assessment::{AssessmentItem, AssessmentState, SkillAssessment};
pub use breathing::{BreathingPacer, PacerState};
pub use config::{
    BreathingPattern, BreathingProfile, MemoryProfile, ReactionProfile, TargetProfile,
    TierProfiles,
};
pub use memory::{Card, MemoryMatch, MemoryState, Selection};
pub use reaction::{ReactionState, ReactionTime};
pub use session::{Session, SessionEntry, SessionPlan, SessionStep};
pub use target::{Target, TargetAcquisition, TargetState};
