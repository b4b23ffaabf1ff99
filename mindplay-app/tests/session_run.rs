//! Whole sessions on a virtual clock.

use mindplay_app::config::parse_plan;
use mindplay_app::{App, SessionConfig};
use mindplay_core::{ActivityKind, TrialResult};
use mindplay_timing::{Clock, ManualClock};

fn run(seed: u64, skill: f64, plan: &str) -> mindplay_app::SessionReport {
    let config = SessionConfig {
        seed: Some(seed),
        skill,
        plan: parse_plan(plan).unwrap(),
        ..SessionConfig::default()
    };
    App::new(config, ManualClock::new()).run().unwrap()
}

#[test]
fn default_plan_runs_in_order() {
    let config = SessionConfig {
        seed: Some(1),
        ..SessionConfig::default()
    };
    let clock = ManualClock::new();
    let report = App::new(config, clock.clone()).run().unwrap();

    let kinds: Vec<ActivityKind> = report.entries.iter().map(|e| e.activity).collect();
    assert_eq!(
        kinds,
        [
            ActivityKind::Memory,
            ActivityKind::Reaction,
            ActivityKind::Target,
            ActivityKind::Breathing,
        ]
    );
    for entry in &report.entries {
        assert_eq!(entry.result.kind(), entry.activity);
    }
    assert_eq!(report.progress_percent, 100);
    assert_eq!(report.duration_ms, clock.now_ms());
}

#[test]
fn every_activity_reports_sane_stats() {
    for skill in [0.0, 0.5, 1.0] {
        let report = run(
            21,
            skill,
            "assessment,memory:hard,reaction:hard,target:hard,breathing:hard",
        );
        for entry in &report.entries {
            match entry.result {
                TrialResult::Assessment(s) => assert!(s.score <= 100),
                TrialResult::Memory(s) => {
                    assert!(s.matches <= s.moves);
                    assert!(s.matches <= 12);
                    assert!(s.time_elapsed_secs <= 60);
                }
                TrialResult::Reaction(s) => assert_eq!(s.attempts, 10),
                TrialResult::Target(s) => {
                    assert_eq!(s.total_targets, 16);
                    assert!(s.hits <= 16);
                }
                TrialResult::Breathing(s) => {
                    assert_eq!(s.cycles, 10);
                    assert_eq!(s.duration_secs, 200);
                }
            }
        }
    }
}

#[test]
fn perfect_player_aces_targets_and_assessment() {
    let report = run(5, 1.0, "assessment,target:medium");
    assert_eq!(report.entries[0].result.headline_score(), 83);
    let TrialResult::Target(target) = report.entries[1].result else {
        panic!("expected target result");
    };
    assert_eq!(target.hits, 12);
    assert_eq!(target.accuracy, 100);
}

#[test]
fn skill_shows_in_reaction_times() {
    let fast = run(8, 1.0, "reaction:medium");
    let slow = run(8, 0.0, "reaction:medium");
    let (TrialResult::Reaction(fast), TrialResult::Reaction(slow)) =
        (fast.entries[0].result, slow.entries[0].result)
    else {
        panic!("expected reaction results");
    };
    assert_eq!(fast.accuracy, 100);
    assert!(fast.average_time_ms < 330);
    assert!(slow.average_time_ms == 0 || slow.average_time_ms >= 550);
}
