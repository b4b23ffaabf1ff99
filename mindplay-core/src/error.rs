use thiserror::Error;

use crate::phase::ActivityKind;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown difficulty tier `{0}` (expected easy, medium or hard)")]
    UnknownTier(String),

    #[error("unknown activity `{0}` (expected memory, reaction, target or breathing)")]
    UnknownActivity(String),

    #[error("result for {got} recorded while the session expects {expected}")]
    ActivityMismatch {
        expected: ActivityKind,
        got: ActivityKind,
    },

    #[error("session is already complete")]
    SessionComplete,
}
