use mindplay_core::{BreathPhase, Phase, Point, Tier};
use mindplay_games::{
    Activity, BreathingPacer, MemoryMatch, MemoryState, ReactionTime, TargetAcquisition,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn tier_strategy() -> impl Strategy<Value = Tier> {
    prop_oneof![Just(Tier::Easy), Just(Tier::Medium), Just(Tier::Hard)]
}

proptest! {
    #[test]
    fn memory_counters_stay_consistent(
        seed in any::<u64>(),
        tier in tier_strategy(),
        clicks in prop::collection::vec((0usize..24, 0u64..1500), 0..200),
    ) {
        let mut game = MemoryMatch::new(tier, StdRng::seed_from_u64(seed));
        game.start(0);
        let mut now = 0;
        let mut completions = 0;
        for (index, delay) in clicks {
            now += delay;
            // Clicks alone drive the clock; due timers fire inside select_card.
            if game.select_card(index, now).completed.is_some() {
                completions += 1;
            }

            let stats = game.stats();
            prop_assert!(stats.matches <= stats.moves);
            prop_assert!(stats.accuracy <= 100);
            let face_up = game.cards().iter().filter(|c| c.face_up && !c.matched).count();
            prop_assert!(face_up <= 2);
        }
        if game.advance(now).is_some() {
            completions += 1;
        }
        prop_assert_eq!(completions, u32::from(game.state() == MemoryState::Finished));
        if game.state() == MemoryState::Finished {
            let stats = game.result().unwrap();
            let all_matched = stats.matches as usize == game.profile().pairs;
            prop_assert!(all_matched || stats.time_elapsed_secs >= game.profile().time_limit_secs);
        }
    }

    #[test]
    fn reaction_rounds_partition_into_samples_and_false_starts(
        seed in any::<u64>(),
        tier in tier_strategy(),
        inputs in prop::collection::vec(0u64..6000, 0..40),
    ) {
        let mut game = ReactionTime::new(tier, StdRng::seed_from_u64(seed));
        game.start(0);
        let mut now = 0;
        let mut completions = 0;
        for delay in inputs {
            now += delay;
            if game.respond(now).completed.is_some() {
                completions += 1;
            }
            prop_assert_eq!(
                game.samples().len() as u32 + game.false_starts(),
                game.rounds_completed()
            );
            prop_assert!(game.rounds_completed() <= game.profile().rounds);
        }
        if game.advance(now).is_some() {
            completions += 1;
        }
        prop_assert_eq!(completions, u32::from(game.result().is_some()));
        if let Some(stats) = game.result() {
            prop_assert_eq!(stats.attempts, game.profile().rounds);
            prop_assert!(stats.accuracy <= 100);
            prop_assert!(stats.best_time_ms <= stats.average_time_ms || game.samples().is_empty());
        }
    }

    #[test]
    fn target_hits_never_exceed_count(
        seed in any::<u64>(),
        tier in tier_strategy(),
        drops in prop::collection::vec((0f32..500.0, 0f32..300.0), 0..40),
    ) {
        let mut game = TargetAcquisition::new(tier, StdRng::seed_from_u64(seed));
        game.start(0);
        let mut now = 0;
        for (x, y) in drops {
            now += 600;
            game.advance(now);
            game.pointer_down(Point::new(x, y), now);
            game.pointer_up(now);
            prop_assert!(game.hits() as usize <= game.targets().len());
        }
        now += 600;
        game.advance(now);
        if let Some(stats) = game.result() {
            prop_assert!(stats.hits <= stats.total_targets);
            prop_assert!(stats.accuracy <= 100);
        }
    }

    #[test]
    fn cursor_on_center_always_hits(seed in any::<u64>(), tier in tier_strategy()) {
        let mut game = TargetAcquisition::new(tier, StdRng::seed_from_u64(seed));
        game.start(0);
        let center = game.targets()[0].center;
        game.pointer_down(center, 50);
        prop_assert_eq!(game.pointer_up(100).input, Some(true));
    }
}

#[test]
fn breathing_phases_cycle_in_fixed_order() {
    for tier in Tier::ALL {
        let mut pacer = BreathingPacer::new(tier);
        pacer.start(0);
        let mut now = 0;
        let mut last = pacer.phase();
        let mut last_cycles = 0;
        while pacer.result().is_none() {
            now += 100;
            pacer.advance(now);
            let phase = pacer.phase();
            if phase != last {
                assert_eq!(last.next(), Some(phase));
                if pacer.cycles() != last_cycles {
                    assert_eq!((last, phase), (BreathPhase::Rest, BreathPhase::Inhale));
                    last_cycles = pacer.cycles();
                }
                last = phase;
            } else {
                assert_eq!(pacer.cycles(), last_cycles);
            }
        }
        assert_eq!(pacer.cycles(), pacer.profile().target_cycles);
    }
}
