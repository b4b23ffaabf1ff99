use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use mindplay_core::Tier;
use tracing::Level;

use crate::config::{SessionConfig, parse_plan};

#[derive(Debug, Parser)]
#[command(name = "mindplay")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Runs therapy mini-game sessions with a simulated player", long_about = None)]
pub struct Cli {
    /// Default log verbosity when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info", env = "MINDPLAY_LOG_LEVEL")]
    pub log_level: Level,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Play a session and print the results as JSON
    Run(RunArgs),

    /// Print the tier profiles as JSON
    Profiles {
        /// Only this tier
        #[arg(long)]
        tier: Option<Tier>,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// JSON session config
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pace the session on the wall clock
    #[arg(long)]
    pub realtime: bool,

    /// Simulated player skill, 0.0 to 1.0
    #[arg(long)]
    pub skill: Option<f64>,

    /// Comma-separated steps, e.g. "assessment,memory:hard,breathing:easy"
    #[arg(long)]
    pub plan: Option<String>,
}

impl RunArgs {
    /// Loads the config file (or defaults) and applies flag overrides.
    pub fn resolve(&self) -> Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::load(path)?,
            None => SessionConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(skill) = self.skill {
            config.skill = skill;
        }
        if self.realtime {
            config.realtime = true;
        }
        if let Some(plan) = &self.plan {
            config.plan = parse_plan(plan)?;
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use mindplay_core::ActivityKind;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "mindplay",
            "--log-level",
            "debug",
            "run",
            "--seed",
            "9",
            "--skill",
            "0.3",
            "--plan",
            "reaction:hard",
        ])
        .unwrap();
        assert_eq!(cli.log_level, Level::DEBUG);
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.skill, 0.3);
        assert_eq!(config.plan.steps.len(), 1);
        assert_eq!(config.plan.steps[0].activity, ActivityKind::Reaction);
    }

    #[test]
    fn out_of_range_skill_fails_resolution() {
        let args = RunArgs {
            skill: Some(-0.1),
            ..RunArgs::default()
        };
        assert!(args.resolve().is_err());
    }

    #[test]
    fn profiles_accepts_tier() {
        let cli = Cli::try_parse_from(["mindplay", "profiles", "--tier", "hard"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Profiles {
                tier: Some(Tier::Hard)
            }
        ));
        assert!(Cli::try_parse_from(["mindplay", "profiles", "--tier", "max"]).is_err());
    }
}
