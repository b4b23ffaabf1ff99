use anyhow::{Context, Result};
use mindplay_core::{ActivityKind, TrialResult};
use mindplay_games::{
    BreathingPacer, MemoryMatch, ReactionTime, Session, SessionEntry, SessionStep,
    SkillAssessment, TargetAcquisition,
};
use mindplay_timing::Clock;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::SessionConfig;
use crate::driver::drive;
use crate::player::{
    AssessmentPlayer, BreathingPlayer, MemoryPlayer, ReactionPlayer, TargetPlayer,
};

/// What a finished session prints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub seed: u64,
    pub skill: f64,
    pub duration_ms: u64,
    pub progress_percent: u32,
    pub entries: Vec<SessionEntry>,
}

/// Plays a configured session plan with simulated players.
pub struct App<C: Clock> {
    config: SessionConfig,
    clock: C,
    seed: u64,
    rng: StdRng,
}

impl<C: Clock> App<C> {
    pub fn new(config: SessionConfig, clock: C) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self {
            config,
            clock,
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn run(mut self) -> Result<SessionReport> {
        let started = self.clock.now_ms();
        info!(
            seed = self.seed,
            skill = self.config.skill,
            steps = self.config.plan.steps.len(),
            realtime = self.config.realtime,
            "session starting"
        );

        let mut session = Session::new(self.config.plan.clone()).on_complete(|kind, result| {
            info!(activity = %kind, score = result.headline_score(), "activity finished");
        });

        while let Some(step) = session.current_step() {
            let result = self
                .play(step)
                .with_context(|| format!("playing {} ({})", step.activity, step.tier))?;
            session.record(result)?;
        }

        if let Some(jitter) = self.clock.jitter_stats() {
            if jitter.max_lateness_ms > 5.0 {
                warn!(
                    max_ms = jitter.max_lateness_ms,
                    jitter_ms = jitter.jitter_ms,
                    "timer wake-ups ran late"
                );
            }
            info!(
                samples = jitter.samples,
                average_ms = jitter.average_lateness_ms,
                jitter_ms = jitter.jitter_ms,
                "timer lateness"
            );
        }

        Ok(SessionReport {
            seed: self.seed,
            skill: self.config.skill,
            duration_ms: self.clock.now_ms().saturating_sub(started),
            progress_percent: session.progress_percent(),
            entries: session.entries().to_vec(),
        })
    }

    fn play(&mut self, step: SessionStep) -> Result<TrialResult> {
        let skill = self.config.skill;
        let game_rng = StdRng::seed_from_u64(self.rng.random());
        let player_rng = StdRng::seed_from_u64(self.rng.random());
        let clock = &mut self.clock;

        let result: TrialResult = match step.activity {
            ActivityKind::Assessment => {
                let mut game = SkillAssessment::new(game_rng);
                drive(&mut game, &mut AssessmentPlayer::new(skill, player_rng), clock)?.into()
            }
            ActivityKind::Memory => {
                let mut game = MemoryMatch::new(step.tier, game_rng);
                drive(&mut game, &mut MemoryPlayer::new(skill, player_rng), clock)?.into()
            }
            ActivityKind::Reaction => {
                let mut game = ReactionTime::new(step.tier, game_rng);
                drive(&mut game, &mut ReactionPlayer::new(skill, player_rng), clock)?.into()
            }
            ActivityKind::Target => {
                let mut game = TargetAcquisition::new(step.tier, game_rng);
                drive(&mut game, &mut TargetPlayer::new(skill, player_rng), clock)?.into()
            }
            ActivityKind::Breathing => {
                let mut game = BreathingPacer::new(step.tier);
                drive(&mut game, &mut BreathingPlayer::new(skill, player_rng), clock)?.into()
            }
        };
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindplay_timing::ManualClock;

    fn config(seed: u64) -> SessionConfig {
        SessionConfig {
            seed: Some(seed),
            ..SessionConfig::default()
        }
    }

    #[test]
    fn explicit_seed_is_kept() {
        let app = App::new(config(42), ManualClock::new());
        assert_eq!(app.seed(), 42);
    }

    #[test]
    fn same_seed_same_report() {
        let a = App::new(config(7), ManualClock::new()).run().unwrap();
        let b = App::new(config(7), ManualClock::new()).run().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.progress_percent, 100);
    }
}
