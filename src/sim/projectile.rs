//! Projectile spawning and flight
//!
//! Shots spawn a fixed muzzle distance in front of the shooter, fly in a
//! straight line at constant speed, and vanish once they leave the map.

use glam::DVec2;

use super::state::MatchState;
use crate::{direction_to, heading_to_vec, in_bounds};

/// Fire a player shot along `aim`, falling back to the player's facing when
/// `aim` is zero. Returns None (and changes nothing) when out of ammo.
///
/// `aim` is the raw stick deflection, so a partly tilted stick fires a slower
/// shot from closer in. The facing fallback is unit length.
pub fn fire_from_player(state: &mut MatchState, aim: DVec2) -> Option<u32> {
    if !state.player.consume_ammo() {
        return None;
    }

    let dir = if aim.is_finite() && aim != DVec2::ZERO {
        aim
    } else {
        heading_to_vec(state.player.body.rotation)
    };

    let pos = state.player.body.pos + dir * state.config.player_muzzle_offset;
    let vel = dir * state.config.player_shot_speed;
    Some(state.insert_projectile(pos, vel, true))
}

/// Fire a bot shot at the target's current position (no lead)
///
/// A shooter sitting exactly on its target has no direction, so nothing fires.
pub fn fire_from_bot(state: &mut MatchState, origin: DVec2, target: DVec2) -> Option<u32> {
    let dir = direction_to(origin, target);
    if dir == DVec2::ZERO {
        return None;
    }

    let pos = origin + dir * state.config.bot_muzzle_offset;
    let vel = dir * state.config.bot_shot_speed;
    Some(state.insert_projectile(pos, vel, false))
}

/// Move every projectile and drop the ones that left the map
pub fn advance(state: &mut MatchState, dt: f64) {
    let map = state.config.map_size();
    for projectile in &mut state.projectiles {
        projectile.body.integrate(dt);
        if !in_bounds(projectile.body.pos, map) {
            projectile.body.alive = false;
        }
    }
    state.projectiles.retain(|p| p.body.alive);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchConfig;
    use crate::sim::state::GameEvent;

    fn empty_match() -> MatchState {
        MatchState::new(MatchConfig {
            bot_count: 0,
            ..MatchConfig::with_seed(5)
        })
        .unwrap()
    }

    #[test]
    fn test_player_shot_spawns_at_muzzle() {
        let mut state = empty_match();
        let id = fire_from_player(&mut state, DVec2::new(0.0, 0.5)).unwrap();
        let shot = &state.projectiles[0];
        assert_eq!(shot.id, id);
        assert!(shot.from_player);
        assert_eq!(shot.body.pos, DVec2::new(1500.0, 1515.0));
        assert_eq!(shot.body.vel, DVec2::new(0.0, 300.0));
        assert_eq!(state.player.ammo, 9);
        assert!(state.events.contains(&GameEvent::ShotFired {
            projectile_id: id,
            from_player: true
        }));
    }

    #[test]
    fn test_full_diagonal_stick_fires_faster() {
        let mut state = empty_match();
        fire_from_player(&mut state, DVec2::new(1.0, -1.0)).unwrap();
        let shot = &state.projectiles[0];
        assert_eq!(shot.body.vel, DVec2::new(600.0, -600.0));
        assert_eq!(shot.body.pos, DVec2::new(1530.0, 1470.0));
    }

    #[test]
    fn test_player_shot_uses_facing_without_aim() {
        let mut state = empty_match();
        state.player.body.rotation = std::f64::consts::PI;
        fire_from_player(&mut state, DVec2::ZERO).unwrap();
        let shot = &state.projectiles[0];
        assert!((shot.body.pos - DVec2::new(1470.0, 1500.0)).length() < 1e-9);
        assert!((shot.body.vel - DVec2::new(-600.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_empty_magazine_is_noop() {
        let mut state = empty_match();
        state.player.ammo = 0;
        assert!(fire_from_player(&mut state, DVec2::X).is_none());
        assert_eq!(state.player.ammo, 0);
        assert!(state.projectiles.is_empty());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_bot_shot_aims_at_target() {
        let mut state = empty_match();
        let origin = DVec2::new(1000.0, 1000.0);
        fire_from_bot(&mut state, origin, DVec2::new(1000.0, 1300.0)).unwrap();
        let shot = &state.projectiles[0];
        assert!(!shot.from_player);
        assert_eq!(shot.body.pos, DVec2::new(1000.0, 1028.0));
        assert_eq!(shot.body.vel, DVec2::new(0.0, 520.0));
    }

    #[test]
    fn test_bot_shot_needs_direction() {
        let mut state = empty_match();
        let p = DVec2::new(700.0, 700.0);
        assert!(fire_from_bot(&mut state, p, p).is_none());
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_advance_culls_out_of_bounds() {
        let mut state = empty_match();
        state.insert_projectile(DVec2::new(2990.0, 100.0), DVec2::new(600.0, 0.0), true);
        state.insert_projectile(DVec2::new(1500.0, 100.0), DVec2::new(600.0, 0.0), true);
        advance(&mut state, 0.1);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].body.pos, DVec2::new(1560.0, 100.0));
    }
}
