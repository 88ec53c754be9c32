//! Storm controller
//!
//! The safe zone shrinks by a fixed step every interval of simulated time,
//! never below its floor. Time is banked in an accumulator, so shrink timing
//! depends only on the sum of frame deltas, never on how frames line up with
//! wall-clock seconds.

use super::state::{GameEvent, MatchState, Storm};

/// Bank `delta_ms` and apply every shrink it pays for. Returns the shrink count.
///
/// Cost is constant in the size of the delta: all elapsed intervals are
/// applied at once and the remainder stays banked.
pub fn advance(storm: &mut Storm, delta_ms: f64) -> u32 {
    let interval = storm.shrink_interval_ms;
    if !(delta_ms.is_finite() && delta_ms > 0.0) || !(interval.is_finite() && interval > 0.0) {
        return 0;
    }

    storm.accum_ms = (storm.accum_ms + delta_ms).min(f64::MAX);
    if storm.accum_ms < interval {
        return 0;
    }

    let shrinks = (storm.accum_ms / interval).floor();
    storm.accum_ms %= interval;

    // Shrinks past the floor change nothing
    let room = ((storm.radius - storm.min_radius) / storm.shrink_step).ceil();
    let applied = shrinks.min(room.max(0.0));
    storm.radius = (storm.radius - storm.shrink_step * applied).max(storm.min_radius);

    shrinks.min(f64::from(u32::MAX)) as u32
}

/// Shrink the storm, then damage everything caught outside it
pub fn update(state: &mut MatchState, delta_ms: f64) {
    if advance(&mut state.storm, delta_ms) > 0 {
        log::debug!("Storm radius now {}", state.storm.radius);
        state.events.push(GameEvent::StormShrunk {
            radius: state.storm.radius,
        });
    }

    let damage = state.config.storm_damage;
    if state.storm.is_outside(state.player.body.pos) {
        state.player.take_damage(damage);
    }

    if state.config.storm_hits_bots {
        for bot in &mut state.bots {
            let outside = state.storm.is_outside(bot.body.pos);
            if bot.body.alive && outside && bot.take_damage(damage) {
                log::debug!("Bot {} destroyed by the storm", bot.id);
                state.events.push(GameEvent::BotDestroyed { bot_id: bot.id });
            }
        }
        state.remove_dead();
    }
}
