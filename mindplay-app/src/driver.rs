//! Runs one activity to completion against a clock.
//!
//! The loop wakes at whichever comes first, the engine's next timer or the
//! player's next move, and sleeps on the clock in between.

use std::time::Duration;

use anyhow::{Result, bail};
use mindplay_games::Activity;
use mindplay_timing::Clock;
use tracing::{debug, trace};

use crate::player::Player;

/// Upper bound on a single activity. Every engine finishes well inside it.
pub const MAX_ACTIVITY_MS: u64 = 30 * 60 * 1000;

pub fn drive<A, P, C>(game: &mut A, player: &mut P, clock: &mut C) -> Result<A::Stats>
where
    A: Activity,
    P: Player<A>,
    C: Clock,
{
    let started = clock.now_ms();
    game.start(started);
    debug!(activity = %A::KIND, tier = %game.tier(), "activity started");

    loop {
        let now = clock.now_ms();
        if let Some(stats) = game.advance(now) {
            return Ok(stats);
        }
        if now.saturating_sub(started) > MAX_ACTIVITY_MS {
            game.reset();
            bail!("{} did not finish within {} ms", A::KIND, MAX_ACTIVITY_MS);
        }

        let move_at = player.next_move_at(game, now);
        if move_at.is_some_and(|at| at <= now) {
            if let Some(stats) = player.act(game, now) {
                return Ok(stats);
            }
            continue;
        }

        let wake = match (game.next_deadline(), move_at) {
            (Some(a), Some(b)) => a.min(b),
            (Some(a), None) | (None, Some(a)) => a,
            (None, None) => {
                game.reset();
                bail!("{} stalled at {} ms with nothing pending", A::KIND, now);
            }
        };
        trace!(now, wake, "sleeping");
        clock.sleep_until(wake);
        let late = clock.now_ms().saturating_sub(wake);
        clock.record_lateness(Duration::from_millis(late));
    }
}
