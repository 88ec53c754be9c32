//! Bot decision policy
//!
//! Each live bot, each tick, in order:
//! 1. Fire-roll: when the player is in range, an independent trial per frame
//!    (no cooldown) decides whether to shoot straight at the player.
//! 2. Retarget: pick a new random wander point on arrival (or on first tick).
//! 3. Move straight toward the wander point.

use glam::DVec2;
use rand::Rng;

use super::movement::{needs_new_target, steer_bot};
use super::projectile::fire_from_bot;
use super::state::MatchState;
use crate::config::MatchConfig;

/// Roll whether a bot at `bot_pos` shoots this tick.
///
/// Out-of-range bots don't consume a roll.
pub fn fire_roll<R: Rng>(
    rng: &mut R,
    bot_pos: DVec2,
    player_pos: DVec2,
    config: &MatchConfig,
) -> bool {
    if bot_pos.distance(player_pos) >= config.bot_fire_range {
        return false;
    }
    rng.random_range(0..=100u32) > config.bot_fire_roll_threshold
}

/// Run the decision policy for every live bot
pub fn update_bots(state: &mut MatchState, dt: f64) {
    for index in 0..state.bots.len() {
        update_bot(state, index, dt);
    }
}

/// Fire-roll, retarget and move a single bot
pub fn update_bot(state: &mut MatchState, index: usize, dt: f64) {
    if !state.bots[index].body.alive {
        return;
    }

    let bot_pos = state.bots[index].body.pos;
    let player_pos = state.player.body.pos;
    if fire_roll(&mut state.rng, bot_pos, player_pos, &state.config) {
        fire_from_bot(state, bot_pos, player_pos);
    }

    if needs_new_target(&state.bots[index], state.config.bot_retarget_distance) {
        let target = state.random_point_in_spawn_area();
        state.bots[index].target = Some(target);
    }

    let map = state.config.map_size();
    steer_bot(&mut state.bots[index], map, dt);
}
