//! Storm Arena - A top-down arena shooter with a shrinking storm
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, AI, projectiles, collisions, storm)
//! - `platform`: Input adapter boundary (joystick/pointer → direction vector)
//! - `config`: Match configuration and validation

pub mod config;
pub mod error;
pub mod platform;
pub mod sim;

pub use config::MatchConfig;
pub use error::ConfigError;

use glam::DVec2;

/// Default match constants
pub mod consts {
    /// Map dimensions
    pub const MAP_WIDTH: f64 = 3000.0;
    pub const MAP_HEIGHT: f64 = 3000.0;
    /// Minimum distance from the map edge for spawns and wander targets
    pub const SPAWN_MARGIN: f64 = 200.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f64 = 20.0;
    pub const PLAYER_SPEED: f64 = 220.0;
    pub const PLAYER_HEALTH: f64 = 100.0;
    pub const PLAYER_AMMO: u32 = 10;

    /// Bot defaults
    pub const BOT_COUNT: usize = 6;
    /// Largest bot count a config may ask for
    pub const MAX_BOT_COUNT: usize = 1000;
    pub const BOT_RADIUS: f64 = 18.0;
    pub const BOT_HEALTH: f64 = 100.0;
    /// Bot speed is drawn from [MIN, MAX)
    pub const BOT_SPEED_MIN: f64 = 80.0;
    pub const BOT_SPEED_MAX: f64 = 140.0;
    /// Bots pick a new wander target once closer than this
    pub const BOT_RETARGET_DISTANCE: f64 = 20.0;
    /// Bots only shoot at a player closer than this
    pub const BOT_FIRE_RANGE: f64 = 400.0;
    /// Fire-roll draws from 0..=100 and shoots above this (~5% per tick)
    pub const BOT_FIRE_ROLL_THRESHOLD: u32 = 95;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f64 = 6.0;
    pub const PLAYER_SHOT_SPEED: f64 = 600.0;
    pub const BOT_SHOT_SPEED: f64 = 520.0;
    pub const PLAYER_MUZZLE_OFFSET: f64 = 30.0;
    pub const BOT_MUZZLE_OFFSET: f64 = 28.0;

    /// Damage
    pub const PROJECTILE_BOT_DAMAGE: f64 = 25.0;
    pub const PROJECTILE_PLAYER_DAMAGE: f64 = 15.0;
    /// Applied per tick while touching a bot
    pub const CONTACT_DAMAGE: f64 = 0.2;
    /// Applied per tick while outside the storm
    pub const STORM_DAMAGE: f64 = 0.2;

    /// Storm starts at this fraction of the larger map dimension
    pub const STORM_RADIUS_FACTOR: f64 = 0.6;
    pub const STORM_SHRINK_STEP: f64 = 6.0;
    pub const STORM_SHRINK_INTERVAL_MS: f64 = 1000.0;
    pub const STORM_MIN_RADIUS: f64 = 150.0;
}

/// Unit vector pointing from `from` toward `to`, or zero when they coincide
#[inline]
pub fn direction_to(from: DVec2, to: DVec2) -> DVec2 {
    (to - from).normalize_or_zero()
}

/// Facing angle of a vector (radians, `atan2(y, x)`)
#[inline]
pub fn heading(v: DVec2) -> f64 {
    v.y.atan2(v.x)
}

/// Unit vector for a facing angle
#[inline]
pub fn heading_to_vec(angle: f64) -> DVec2 {
    DVec2::new(angle.cos(), angle.sin())
}

/// Clamp each axis of `v` into [-1, 1]
#[inline]
pub fn clamp_unit_axes(v: DVec2) -> DVec2 {
    v.clamp(DVec2::splat(-1.0), DVec2::splat(1.0))
}

/// Clamp a circle's center so the circle stays inside `[0, size]`
///
/// Falls back to the box center on an axis narrower than the circle.
#[inline]
pub fn clamp_circle_to_box(pos: DVec2, radius: f64, size: DVec2) -> DVec2 {
    let axis = |p: f64, extent: f64| {
        if extent < radius * 2.0 {
            extent / 2.0
        } else {
            p.clamp(radius, extent - radius)
        }
    };
    DVec2::new(axis(pos.x, size.x), axis(pos.y, size.y))
}

/// Whether a point lies inside the closed rectangle `[0, size]`
#[inline]
pub fn in_bounds(pos: DVec2, size: DVec2) -> bool {
    pos.x >= 0.0 && pos.x <= size.x && pos.y >= 0.0 && pos.y <= size.y
}
