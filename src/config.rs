//! Match configuration
//!
//! Every constant the simulation uses is overridable at match start. Values are
//! validated once up front; a running match never sees a nonsensical config.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, ConfigResult};

/// Tunable match parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// RNG seed for bot spawns, wander targets and fire-rolls
    pub seed: u64,

    // === Map ===
    pub map_width: f64,
    pub map_height: f64,
    /// Spawns and wander targets stay this far from the edges
    pub spawn_margin: f64,

    // === Player ===
    pub player_radius: f64,
    pub player_speed: f64,
    pub player_health: f64,
    /// Starting ammo (no regeneration)
    pub player_ammo: u32,

    // === Bots ===
    pub bot_count: usize,
    pub bot_radius: f64,
    pub bot_health: f64,
    /// Per-bot speed is drawn from [min, max)
    pub bot_speed_min: f64,
    pub bot_speed_max: f64,
    pub bot_retarget_distance: f64,
    pub bot_fire_range: f64,
    /// Fire when a 0..=100 roll exceeds this
    pub bot_fire_roll_threshold: u32,

    // === Projectiles ===
    pub projectile_radius: f64,
    pub player_shot_speed: f64,
    pub bot_shot_speed: f64,
    pub player_muzzle_offset: f64,
    pub bot_muzzle_offset: f64,

    // === Damage ===
    pub projectile_bot_damage: f64,
    pub projectile_player_damage: f64,
    /// Per tick while the player touches a bot
    pub contact_damage: f64,
    /// Per tick while outside the storm
    pub storm_damage: f64,
    /// Bot-fired projectiles can hit other bots
    pub friendly_fire: bool,

    // === Storm ===
    /// Defaults to a fraction of the larger map dimension when unset
    pub storm_initial_radius: Option<f64>,
    pub storm_shrink_step: f64,
    pub storm_shrink_interval_ms: f64,
    pub storm_min_radius: f64,
    /// Storm damage also applies to bots
    pub storm_hits_bots: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 0,

            map_width: MAP_WIDTH,
            map_height: MAP_HEIGHT,
            spawn_margin: SPAWN_MARGIN,

            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,
            player_health: PLAYER_HEALTH,
            player_ammo: PLAYER_AMMO,

            bot_count: BOT_COUNT,
            bot_radius: BOT_RADIUS,
            bot_health: BOT_HEALTH,
            bot_speed_min: BOT_SPEED_MIN,
            bot_speed_max: BOT_SPEED_MAX,
            bot_retarget_distance: BOT_RETARGET_DISTANCE,
            bot_fire_range: BOT_FIRE_RANGE,
            bot_fire_roll_threshold: BOT_FIRE_ROLL_THRESHOLD,

            projectile_radius: PROJECTILE_RADIUS,
            player_shot_speed: PLAYER_SHOT_SPEED,
            bot_shot_speed: BOT_SHOT_SPEED,
            player_muzzle_offset: PLAYER_MUZZLE_OFFSET,
            bot_muzzle_offset: BOT_MUZZLE_OFFSET,

            projectile_bot_damage: PROJECTILE_BOT_DAMAGE,
            projectile_player_damage: PROJECTILE_PLAYER_DAMAGE,
            contact_damage: CONTACT_DAMAGE,
            storm_damage: STORM_DAMAGE,
            friendly_fire: true,

            storm_initial_radius: None,
            storm_shrink_step: STORM_SHRINK_STEP,
            storm_shrink_interval_ms: STORM_SHRINK_INTERVAL_MS,
            storm_min_radius: STORM_MIN_RADIUS,
            storm_hits_bots: false,
        }
    }
}

impl MatchConfig {
    /// Default config with a specific seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON override document and validate it
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Map size as a vector
    pub fn map_size(&self) -> DVec2 {
        DVec2::new(self.map_width, self.map_height)
    }

    pub fn map_center(&self) -> DVec2 {
        self.map_size() / 2.0
    }

    /// Effective starting storm radius
    pub fn effective_storm_radius(&self) -> f64 {
        self.storm_initial_radius
            .unwrap_or_else(|| self.map_width.max(self.map_height) * STORM_RADIUS_FACTOR)
    }

    /// Inclusive box that spawns and wander targets are drawn from
    pub fn spawn_area(&self) -> (DVec2, DVec2) {
        let margin = DVec2::splat(self.spawn_margin);
        (margin, self.map_size() - margin)
    }

    /// Reject configurations that would put the match in a nonsensical state
    pub fn validate(&self) -> ConfigResult<()> {
        let map_ok = |v: f64| v.is_finite() && v > 0.0;
        if !map_ok(self.map_width) || !map_ok(self.map_height) {
            return Err(ConfigError::InvalidMapSize {
                width: self.map_width,
                height: self.map_height,
            });
        }

        if self.bot_count > MAX_BOT_COUNT {
            return Err(ConfigError::TooManyBots {
                count: self.bot_count,
                max: MAX_BOT_COUNT,
            });
        }

        non_negative("spawn_margin", self.spawn_margin)?;
        if self.map_width - 2.0 * self.spawn_margin < 0.0
            || self.map_height - 2.0 * self.spawn_margin < 0.0
        {
            return Err(ConfigError::MapTooSmallForMargin {
                width: self.map_width,
                height: self.map_height,
                margin: self.spawn_margin,
            });
        }

        for (field, value) in [
            ("player_radius", self.player_radius),
            ("player_speed", self.player_speed),
            ("player_health", self.player_health),
            ("bot_radius", self.bot_radius),
            ("bot_health", self.bot_health),
            ("bot_speed_min", self.bot_speed_min),
            ("projectile_radius", self.projectile_radius),
            ("player_shot_speed", self.player_shot_speed),
            ("bot_shot_speed", self.bot_shot_speed),
            ("storm_shrink_interval_ms", self.storm_shrink_interval_ms),
        ] {
            positive(field, value)?;
        }

        for (field, value) in [
            ("bot_retarget_distance", self.bot_retarget_distance),
            ("bot_fire_range", self.bot_fire_range),
            ("player_muzzle_offset", self.player_muzzle_offset),
            ("bot_muzzle_offset", self.bot_muzzle_offset),
            ("projectile_bot_damage", self.projectile_bot_damage),
            ("projectile_player_damage", self.projectile_player_damage),
            ("contact_damage", self.contact_damage),
            ("storm_damage", self.storm_damage),
            ("storm_shrink_step", self.storm_shrink_step),
            ("storm_min_radius", self.storm_min_radius),
        ] {
            non_negative(field, value)?;
        }

        if !self.bot_speed_max.is_finite() || self.bot_speed_max <= self.bot_speed_min {
            return Err(ConfigError::EmptyBotSpeedRange {
                min: self.bot_speed_min,
                max: self.bot_speed_max,
            });
        }

        if self.bot_fire_roll_threshold >= 100 {
            return Err(ConfigError::FireRollThreshold(self.bot_fire_roll_threshold));
        }

        let initial = self.effective_storm_radius();
        positive("storm_initial_radius", initial)?;
        if self.storm_min_radius > initial {
            return Err(ConfigError::StormFloorAboveInitial {
                floor: self.storm_min_radius,
                initial,
            });
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
