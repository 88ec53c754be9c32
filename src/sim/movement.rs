//! Entity movement
//!
//! Player velocity comes straight from the stick with no smoothing. Bots home
//! in a straight line on their wander target, recomputed every frame.

use glam::DVec2;

use super::state::{Body, Bot, Player};
use crate::{clamp_circle_to_box, direction_to, heading};

/// Set player velocity from the stick, then integrate and keep inside the map
pub fn move_player(player: &mut Player, direction: DVec2, active: bool, map: DVec2, dt: f64) {
    player.body.vel = if active {
        direction * player.speed
    } else {
        DVec2::ZERO
    };

    // Facing persists while standing still
    if player.body.vel != DVec2::ZERO {
        player.body.rotation = heading(player.body.vel);
    }

    player.body.integrate(dt);
    player.body.pos = clamp_circle_to_box(player.body.pos, player.body.radius, map);
}

/// Whether a bot needs a fresh wander target before moving
pub fn needs_new_target(bot: &Bot, retarget_distance: f64) -> bool {
    match bot.target {
        None => true,
        Some(target) => bot.body.pos.distance(target) < retarget_distance,
    }
}

/// Home toward the current target at constant speed
pub fn steer_bot(bot: &mut Bot, map: DVec2, dt: f64) {
    let Some(target) = bot.target else {
        bot.body.vel = DVec2::ZERO;
        return;
    };

    bot.body.vel = direction_to(bot.body.pos, target) * bot.speed;
    if bot.body.vel != DVec2::ZERO {
        bot.body.rotation = heading(bot.body.vel);
    }
    bot.body.integrate(dt);

    if clamp_body(&mut bot.body, map) {
        log::warn!("Bot {} left the map, clamped to {:?}", bot.id, bot.body.pos);
    }
}

/// Clamp a body into the map. Returns true if it had to be moved.
pub fn clamp_body(body: &mut Body, map: DVec2) -> bool {
    let clamped = clamp_circle_to_box(body.pos, body.radius, map);
    let moved = clamped != body.pos;
    body.pos = clamped;
    moved
}
