use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Difficulty tier selecting an engine profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Easy, Tier::Medium, Tier::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Easy => "easy",
            Tier::Medium => "medium",
            Tier::Hard => "hard",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Tier::Easy),
            "medium" => Ok(Tier::Medium),
            "hard" => Ok(Tier::Hard),
            _ => Err(CoreError::UnknownTier(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Hard".parse::<Tier>(), Ok(Tier::Hard));
        assert_eq!(" medium ".parse::<Tier>(), Ok(Tier::Medium));
    }

    #[test]
    fn rejects_unknown_tier() {
        let err = "extreme".parse::<Tier>().unwrap_err();
        assert_eq!(err, CoreError::UnknownTier("extreme".into()));
    }

    #[test]
    fn serde_rejects_unknown_tier() {
        assert!(serde_json::from_str::<Tier>("\"insane\"").is_err());
        assert_eq!(serde_json::from_str::<Tier>("\"easy\"").unwrap(), Tier::Easy);
    }
}
