use anyhow::Result;
use clap::Parser;
use mindplay_app::cli::{Cli, Command};
use mindplay_app::{App, telemetry};
use mindplay_core::Tier;
use mindplay_games::TierProfiles;
use mindplay_timing::{HighPrecisionTimer, ManualClock};

fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing(cli.json_logs, cli.log_level);

    match cli.command {
        Command::Run(args) => {
            let config = args.resolve()?;
            let report = if config.realtime {
                App::new(config, HighPrecisionTimer::new()).run()?
            } else {
                App::new(config, ManualClock::new()).run()?
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Profiles { tier } => {
            let profiles: Vec<TierProfiles> = match tier {
                Some(tier) => vec![TierProfiles::for_tier(tier)],
                None => Tier::ALL.into_iter().map(TierProfiles::for_tier).collect(),
            };
            println!("{}", serde_json::to_string_pretty(&profiles)?);
        }
    }

    Ok(())
}
