//! Session configuration: JSON file, then CLI overrides.

use std::path::Path;

use anyhow::{Context, Result, ensure};
use mindplay_core::{ActivityKind, Tier};
use mindplay_games::{SessionPlan, SessionStep};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SKILL: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Seed for every random choice in the run. Drawn fresh when absent.
    pub seed: Option<u64>,
    /// Simulated player ability in `0.0..=1.0`.
    pub skill: f64,
    /// Sleep on the wall clock instead of advancing a virtual one.
    pub realtime: bool,
    pub plan: SessionPlan,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            skill: DEFAULT_SKILL,
            realtime: false,
            plan: SessionPlan::default(),
        }
    }
}

impl SessionConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            (0.0..=1.0).contains(&self.skill),
            "skill must be within 0.0..=1.0, got {}",
            self.skill
        );
        ensure!(!self.plan.steps.is_empty(), "session plan has no steps");
        Ok(())
    }
}

/// Parses `activity[:tier]`; the tier defaults to easy.
pub fn parse_step(raw: &str) -> Result<SessionStep> {
    let (activity, tier) = match raw.split_once(':') {
        Some((activity, tier)) => (activity, Some(tier)),
        None => (raw, None),
    };
    let activity: ActivityKind = activity
        .trim()
        .parse()
        .with_context(|| format!("in plan step {raw:?}"))?;
    let tier = match tier {
        Some(t) => t
            .trim()
            .parse()
            .with_context(|| format!("in plan step {raw:?}"))?,
        None => Tier::default(),
    };
    Ok(SessionStep { activity, tier })
}

/// Parses a comma-separated plan such as `memory:hard,breathing`.
pub fn parse_plan(raw: &str) -> Result<SessionPlan> {
    let steps = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_step)
        .collect::<Result<Vec<_>>>()?;
    ensure!(!steps.is_empty(), "session plan has no steps");
    Ok(SessionPlan { steps })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: SessionConfig = serde_json::from_str(r#"{"seed": 4}"#).unwrap();
        assert_eq!(config.seed, Some(4));
        assert_eq!(config.skill, DEFAULT_SKILL);
        assert_eq!(config.plan, SessionPlan::default());
        assert!(!config.realtime);
    }

    #[test]
    fn unknown_fields_and_tiers_are_rejected() {
        assert!(serde_json::from_str::<SessionConfig>(r#"{"speed": 2}"#).is_err());
        assert!(
            serde_json::from_str::<SessionConfig>(
                r#"{"plan":{"steps":[{"activity":"memory","tier":"extreme"}]}}"#
            )
            .is_err()
        );
    }

    #[test]
    fn load_reads_and_validates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"skill": 0.5, "plan": {{"steps": [{{"activity": "reaction", "tier": "hard"}}]}}}}"#
        )
        .unwrap();
        let config = SessionConfig::load(file.path()).unwrap();
        assert_eq!(config.skill, 0.5);
        assert_eq!(config.plan.steps[0].tier, Tier::Hard);

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        write!(bad, r#"{{"skill": 1.5}}"#).unwrap();
        let err = SessionConfig::load(bad.path()).unwrap_err();
        assert!(err.to_string().contains("skill"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = SessionConfig::load(Path::new("/nonexistent/mindplay.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/mindplay.json"));
    }

    #[test]
    fn plan_strings() {
        let plan = parse_plan("assessment, memory:Hard ,drag:medium,breathing").unwrap();
        let steps: Vec<_> = plan.steps.iter().map(|s| (s.activity, s.tier)).collect();
        assert_eq!(
            steps,
            vec![
                (ActivityKind::Assessment, Tier::Easy),
                (ActivityKind::Memory, Tier::Hard),
                (ActivityKind::Target, Tier::Medium),
                (ActivityKind::Breathing, Tier::Easy),
            ]
        );
        assert!(parse_plan(" , ").is_err());
        assert!(parse_step("juggling:easy").is_err());
        assert!(parse_step("memory:nightmare").is_err());
    }
}
