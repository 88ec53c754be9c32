//! Collision detection and damage resolution
//!
//! Everything in the arena is a circle, so overlap is a squared-distance test.
//! Three independent passes run in a fixed order each tick:
//! 1. projectile vs bot
//! 2. projectile vs player (bot shots only)
//! 3. player vs bot contact
//!
//! A projectile is consumed by the first thing it damages.

use super::state::{Body, GameEvent, MatchState};

/// Circle-circle overlap (touching edges don't count)
#[inline]
pub fn circles_overlap(a: &Body, b: &Body) -> bool {
    let reach = a.radius + b.radius;
    a.pos.distance_squared(b.pos) < reach * reach
}

/// Result counts from a single resolve pass, mostly for tests and logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub bot_hits: u32,
    pub bots_destroyed: u32,
    pub player_hits: u32,
    pub contacts: u32,
}

/// Run every overlap check and apply damage
pub fn resolve(state: &mut MatchState) -> CollisionReport {
    let mut report = CollisionReport::default();
    projectiles_vs_bots(state, &mut report);
    projectiles_vs_player(state, &mut report);
    player_vs_bots(state, &mut report);
    state.remove_dead();
    report
}

fn projectiles_vs_bots(state: &mut MatchState, report: &mut CollisionReport) {
    let damage = state.config.projectile_bot_damage;
    let friendly_fire = state.config.friendly_fire;

    for projectile in &mut state.projectiles {
        if !projectile.body.alive || !(projectile.from_player || friendly_fire) {
            continue;
        }

        let hit = state
            .bots
            .iter_mut()
            .find(|bot| bot.body.alive && circles_overlap(&projectile.body, &bot.body));
        if let Some(bot) = hit {
            projectile.body.alive = false;
            report.bot_hits += 1;
            if bot.take_damage(damage) {
                report.bots_destroyed += 1;
                log::debug!("Bot {} destroyed by projectile {}", bot.id, projectile.id);
                state.events.push(GameEvent::BotDestroyed { bot_id: bot.id });
            }
        }
    }
}

fn projectiles_vs_player(state: &mut MatchState, report: &mut CollisionReport) {
    let damage = state.config.projectile_player_damage;
    let player = &mut state.player;

    for projectile in &mut state.projectiles {
        // Player shots pass through their owner
        if !projectile.body.alive || projectile.from_player {
            continue;
        }
        if circles_overlap(&projectile.body, &player.body) {
            projectile.body.alive = false;
            player.take_damage(damage);
            report.player_hits += 1;
            state.events.push(GameEvent::PlayerHit { damage });
        }
    }
}

fn player_vs_bots(state: &mut MatchState, report: &mut CollisionReport) {
    let damage = state.config.contact_damage;
    for bot in &state.bots {
        if bot.body.alive && circles_overlap(&state.player.body, &bot.body) {
            state.player.take_damage(damage);
            report.contacts += 1;
        }
    }
}
