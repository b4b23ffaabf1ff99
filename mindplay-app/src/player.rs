//! Simulated participants.
//!
//! A player watches an engine and decides when to act next. `skill` in
//! `0.0..=1.0` scales think time, recall and aim; all randomness comes from
//! the player's own seeded rng so a run replays exactly.

use std::collections::HashMap;

use mindplay_core::{
    AssessmentScore, BreathingStats, MemoryStats, Point, ReactionStats, TargetStats,
};
use mindplay_games::{
    Activity, AssessmentState, BreathingPacer, MemoryMatch, MemoryState, PacerState,
    ReactionState, ReactionTime, SkillAssessment, TargetAcquisition, TargetState,
};
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

/// Decides and performs inputs for one engine type.
pub trait Player<A: Activity> {
    /// When the next input is due, or `None` while waiting on the engine.
    ///
    /// Repeated calls without an intervening [`Player::act`] return the
    /// same time.
    fn next_move_at(&mut self, game: &A, now_ms: u64) -> Option<u64>;

    /// Performs the due input and clears the plan. Returns the stats when
    /// the input, or a timer due at `now_ms`, completed the run.
    fn act(&mut self, game: &mut A, now_ms: u64) -> Option<A::Stats>;
}

/// `slow` at skill 0, `fast` at skill 1.
fn lerp_ms(skill: f64, slow: u64, fast: u64) -> u64 {
    (slow as f64 + (fast as f64 - slow as f64) * skill).round() as u64
}

pub struct MemoryPlayer {
    skill: f64,
    rng: StdRng,
    planned: Option<u64>,
    seen: HashMap<usize, &'static str>,
}

impl MemoryPlayer {
    pub fn new(skill: f64, rng: StdRng) -> Self {
        Self {
            skill,
            rng,
            planned: None,
            seen: HashMap::new(),
        }
    }

    fn observe<R: Rng>(&mut self, game: &MemoryMatch<R>) {
        for (i, card) in game.cards().iter().enumerate() {
            if card.face_up {
                self.seen.insert(i, card.symbol);
            }
        }
    }

    fn recall(&mut self) -> bool {
        self.rng.random_bool(self.skill)
    }

    fn choose<R: Rng>(&mut self, game: &MemoryMatch<R>) -> Option<usize> {
        let cards = game.cards();
        let open: Vec<usize> = (0..cards.len())
            .filter(|&i| cards[i].face_up && !cards[i].matched)
            .collect();
        let hidden: Vec<usize> = (0..cards.len())
            .filter(|&i| !cards[i].face_up && !cards[i].matched)
            .collect();

        let partner_of = |first: usize, symbol: &str| {
            hidden
                .iter()
                .copied()
                .find(|&i| i != first && self.seen.get(&i).is_some_and(|s| *s == symbol))
        };

        if let Some(&first) = open.first() {
            if let Some(partner) = partner_of(first, cards[first].symbol) {
                if self.recall() {
                    return Some(partner);
                }
            }
        } else {
            let known_pair = hidden.iter().copied().find_map(|i| {
                let symbol = self.seen.get(&i)?;
                partner_of(i, *symbol).map(|_| i)
            });
            if let Some(index) = known_pair {
                if self.recall() {
                    return Some(index);
                }
            }
        }

        let unseen: Vec<usize> = hidden
            .iter()
            .copied()
            .filter(|i| !self.seen.contains_key(i))
            .collect();
        let pool = if unseen.is_empty() { &hidden } else { &unseen };
        pool.choose(&mut self.rng).copied()
    }
}

impl<R: Rng> Player<MemoryMatch<R>> for MemoryPlayer {
    fn next_move_at(&mut self, game: &MemoryMatch<R>, now_ms: u64) -> Option<u64> {
        if game.state() != MemoryState::Playing {
            self.planned = None;
            return None;
        }
        let open = game
            .cards()
            .iter()
            .filter(|c| c.face_up && !c.matched)
            .count();
        if open >= 2 {
            // Mismatch on display; the engine flips it back.
            return None;
        }
        if self.planned.is_none() {
            let think = lerp_ms(self.skill, 1500, 400) + self.rng.random_range(0..=300);
            self.planned = Some(now_ms + think);
        }
        self.planned
    }

    fn act(&mut self, game: &mut MemoryMatch<R>, now_ms: u64) -> Option<MemoryStats> {
        self.planned = None;
        self.observe(game);
        let index = self.choose(game)?;
        let outcome = game.select_card(index, now_ms);
        self.observe(game);
        outcome.completed
    }
}

pub struct ReactionPlayer {
    skill: f64,
    rng: StdRng,
    planned: Option<u64>,
    /// `since_ms` of the armed round already planned for.
    decided: Option<u64>,
}

impl ReactionPlayer {
    pub fn new(skill: f64, rng: StdRng) -> Self {
        Self {
            skill,
            rng,
            planned: None,
            decided: None,
        }
    }
}

impl<R: Rng> Player<ReactionTime<R>> for ReactionPlayer {
    fn next_move_at(&mut self, game: &ReactionTime<R>, now_ms: u64) -> Option<u64> {
        match game.state() {
            ReactionState::Armed { since_ms, wait_ms } => {
                if self.decided != Some(since_ms) {
                    self.decided = Some(since_ms);
                    let jumpy = (1.0 - self.skill) * 0.25;
                    self.planned = if self.rng.random_bool(jumpy) && wait_ms > 0 {
                        Some((since_ms + self.rng.random_range(0..wait_ms)).max(now_ms))
                    } else {
                        None
                    };
                }
                self.planned
            }
            ReactionState::Active { since_ms } => {
                if self.planned.is_none() {
                    let reaction = lerp_ms(self.skill, 550, 200) + self.rng.random_range(0..=120);
                    self.planned = Some(since_ms + reaction);
                }
                self.planned
            }
            _ => {
                self.planned = None;
                None
            }
        }
    }

    fn act(&mut self, game: &mut ReactionTime<R>, now_ms: u64) -> Option<ReactionStats> {
        self.planned = None;
        game.respond(now_ms).completed
    }
}

pub struct TargetPlayer {
    skill: f64,
    rng: StdRng,
    planned: Option<u64>,
}

impl TargetPlayer {
    pub fn new(skill: f64, rng: StdRng) -> Self {
        Self {
            skill,
            rng,
            planned: None,
        }
    }
}

impl<R: Rng> Player<TargetAcquisition<R>> for TargetPlayer {
    fn next_move_at(&mut self, game: &TargetAcquisition<R>, now_ms: u64) -> Option<u64> {
        if game.state() != TargetState::Tracking {
            self.planned = None;
            return None;
        }
        if self.planned.is_none() {
            let drag = lerp_ms(self.skill, 1200, 350) + self.rng.random_range(0..=250);
            self.planned = Some(now_ms + drag);
        }
        self.planned
    }

    fn act(&mut self, game: &mut TargetAcquisition<R>, now_ms: u64) -> Option<TargetStats> {
        self.planned = None;
        let down = game.pointer_down(game.cursor(), now_ms);
        if down.completed.is_some() {
            return down.completed;
        }
        let target = game.active_target().copied()?;
        let spread = (1.0 - self.skill as f32) * game.profile().target_radius() * 2.5;
        let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
        let offset = self.rng.random_range(0.0f32..=1.0) * spread;
        let aim = Point::new(
            target.center.x + offset * angle.cos(),
            target.center.y + offset * angle.sin(),
        );
        game.pointer_move(aim);
        game.pointer_up(now_ms).completed
    }
}

/// Breathing runs by itself; a less settled player takes one short break.
pub struct BreathingPlayer {
    skill: f64,
    rng: StdRng,
    planned: Option<u64>,
    decided: bool,
}

pub const BREAK_MS: u64 = 2000;

impl BreathingPlayer {
    pub fn new(skill: f64, rng: StdRng) -> Self {
        Self {
            skill,
            rng,
            planned: None,
            decided: false,
        }
    }
}

impl Player<BreathingPacer> for BreathingPlayer {
    fn next_move_at(&mut self, game: &BreathingPacer, now_ms: u64) -> Option<u64> {
        match game.state() {
            PacerState::Running if !self.decided => {
                self.decided = true;
                if self.rng.random_bool((1.0 - self.skill) * 0.5) {
                    let nominal_ms = game.profile().nominal_duration_secs as u64 * 1000;
                    self.planned = Some(now_ms + self.rng.random_range(0..nominal_ms / 2));
                }
                self.planned
            }
            PacerState::Running | PacerState::Paused => self.planned,
            _ => None,
        }
    }

    fn act(&mut self, game: &mut BreathingPacer, now_ms: u64) -> Option<BreathingStats> {
        self.planned = None;
        match game.state() {
            PacerState::Running => {
                let outcome = game.pause(now_ms);
                if outcome.input.is_some() {
                    self.planned = Some(now_ms + BREAK_MS);
                }
                outcome.completed
            }
            PacerState::Paused => game.resume(now_ms).completed,
            _ => None,
        }
    }
}

pub struct AssessmentPlayer {
    skill: f64,
    rng: StdRng,
    planned: Option<u64>,
}

impl AssessmentPlayer {
    pub fn new(skill: f64, rng: StdRng) -> Self {
        Self {
            skill,
            rng,
            planned: None,
        }
    }
}

impl<R: Rng> Player<SkillAssessment<R>> for AssessmentPlayer {
    fn next_move_at(&mut self, game: &SkillAssessment<R>, now_ms: u64) -> Option<u64> {
        match game.state() {
            AssessmentState::Ready => Some(*self.planned.get_or_insert(now_ms)),
            AssessmentState::Active if game.items().iter().any(|i| !i.correct) => {
                if self.planned.is_none() {
                    let think = lerp_ms(self.skill, 6000, 1500) + self.rng.random_range(0..=800);
                    self.planned = Some(now_ms + think);
                }
                self.planned
            }
            _ => {
                self.planned = None;
                None
            }
        }
    }

    fn act(&mut self, game: &mut SkillAssessment<R>, now_ms: u64) -> Option<AssessmentScore> {
        self.planned = None;
        match game.state() {
            AssessmentState::Ready => game.begin_round(now_ms).completed,
            AssessmentState::Active => {
                let item = game.items().iter().find(|i| !i.correct).copied()?;
                let miss = (1.0 - self.skill as f32) * 90.0;
                let dx = self.rng.random_range(-miss..=miss);
                let dy = self.rng.random_range(-miss..=miss);
                let at = Point::new(item.slot.x + dx, item.slot.y + dy);
                game.drop_item(item.id, at, now_ms).completed
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindplay_core::Tier;
    use rand::SeedableRng;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp_ms(0.0, 1500, 400), 1500);
        assert_eq!(lerp_ms(1.0, 1500, 400), 400);
        assert_eq!(lerp_ms(0.5, 1000, 0), 500);
    }

    #[test]
    fn plan_is_stable_until_acted() {
        let mut game = MemoryMatch::new(Tier::Easy, rng(1));
        game.start(0);
        let mut player = MemoryPlayer::new(0.8, rng(2));
        let first = player.next_move_at(&game, 0);
        assert!(first.is_some());
        assert_eq!(player.next_move_at(&game, 50), first);
    }

    #[test]
    fn perfect_memory_player_never_mismatches_a_seen_pair() {
        let mut game = MemoryMatch::new(Tier::Easy, rng(3));
        game.start(0);
        let mut player = MemoryPlayer::new(1.0, rng(4));
        for (i, card) in game.cards().iter().enumerate() {
            player.seen.insert(i, card.symbol);
        }
        let mut now = 0;
        while game.state() == MemoryState::Playing {
            match player.next_move_at(&game, now) {
                Some(at) => {
                    now = at;
                    game.advance(now);
                    player.act(&mut game, now);
                }
                None => {
                    now = game.next_deadline().unwrap();
                    game.advance(now);
                }
            }
        }
        let stats = game.result().unwrap();
        assert_eq!(stats.matches, 6);
        assert_eq!(stats.moves, 6);
        assert_eq!(stats.accuracy, 100);
    }

    #[test]
    fn skilled_reaction_player_waits_for_stimulus() {
        let mut game = ReactionTime::new(Tier::Easy, rng(5));
        game.start(0);
        let mut player = ReactionPlayer::new(1.0, rng(6));
        assert_eq!(player.next_move_at(&game, 0), None);

        let stimulus = game.next_deadline().unwrap();
        game.advance(stimulus);
        let at = player.next_move_at(&game, stimulus).unwrap();
        assert!((200..=320).contains(&(at - stimulus)));
        player.act(&mut game, at);
        assert_eq!(game.samples(), &[at - stimulus]);
    }

    #[test]
    fn skilled_target_player_hits() {
        let mut game = TargetAcquisition::new(Tier::Hard, rng(7));
        game.start(0);
        let mut player = TargetPlayer::new(1.0, rng(8));
        let at = player.next_move_at(&game, 0).unwrap();
        player.act(&mut game, at);
        assert_eq!(game.hits(), 1);
        assert_eq!(game.state(), TargetState::Resolving);
        assert_eq!(player.next_move_at(&game, at), None);
    }

    #[test]
    fn unsettled_breather_pauses_then_resumes() {
        let mut game = BreathingPacer::new(Tier::Easy);
        game.start(0);
        let mut player = BreathingPlayer::new(0.0, rng(9));
        player.decided = true;
        player.planned = Some(1_000);

        game.advance(1_000);
        player.act(&mut game, 1_000);
        assert_eq!(game.state(), PacerState::Paused);
        assert_eq!(player.next_move_at(&game, 1_000), Some(1_000 + BREAK_MS));

        player.act(&mut game, 1_000 + BREAK_MS);
        assert_eq!(game.state(), PacerState::Running);
        assert_eq!(player.next_move_at(&game, 1_000 + BREAK_MS), None);
    }

    #[test]
    fn exact_assessment_drops_score() {
        let mut game = SkillAssessment::new(rng(10));
        game.start(0);
        let mut player = AssessmentPlayer::new(1.0, rng(11));
        let at = player.next_move_at(&game, 0).unwrap();
        player.act(&mut game, at);
        assert_eq!(game.points(), 10);
        assert!(game.items()[0].correct);
    }
}
