//! Match state and core simulation types
//!
//! All state that a running match carries between frames lives here.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::MatchConfig;
use crate::error::ConfigResult;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Active gameplay
    Running,
    /// Externally paused; steps are ignored
    Paused,
    /// Match over, simulation frozen
    Ended { won: bool },
}

/// Something that happened during a tick, for presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired { projectile_id: u32, from_player: bool },
    BotDestroyed { bot_id: u32 },
    PlayerHit { damage: f64 },
    StormShrunk { radius: f64 },
    /// Terminal signal, emitted exactly once per match
    MatchEnded { won: bool },
}

/// Spatial state shared by every entity kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: DVec2,
    pub vel: DVec2,
    /// Facing (radians)
    pub rotation: f64,
    /// Collision/draw radius
    pub radius: f64,
    /// Dead entities are removed and never revived
    pub alive: bool,
}

impl Body {
    pub fn new(pos: DVec2, radius: f64) -> Self {
        Self {
            pos,
            vel: DVec2::ZERO,
            rotation: 0.0,
            radius,
            alive: true,
        }
    }

    /// Move by velocity over `dt` seconds
    #[inline]
    pub fn integrate(&mut self, dt: f64) {
        self.pos += self.vel * dt;
    }
}

/// Subtract damage, flooring at zero. Returns true when health is exhausted.
#[inline]
fn apply_damage(health: &mut f64, amount: f64) -> bool {
    *health = (*health - amount).max(0.0);
    *health <= 0.0
}

/// The player's avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub body: Body,
    pub health: f64,
    pub ammo: u32,
    /// Units per second at full stick deflection
    pub speed: f64,
}

impl Player {
    /// Returns true if this hit brought health to zero
    pub fn take_damage(&mut self, amount: f64) -> bool {
        apply_damage(&mut self.health, amount)
    }

    /// Spend one round. Returns false (and changes nothing) when empty.
    pub fn consume_ammo(&mut self) -> bool {
        match self.ammo.checked_sub(1) {
            Some(left) => {
                self.ammo = left;
                true
            }
            None => false,
        }
    }
}

/// An AI-controlled opponent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bot {
    pub id: u32,
    pub body: Body,
    pub health: f64,
    /// Fixed at spawn
    pub speed: f64,
    /// Current wander destination (None until the first update)
    pub target: Option<DVec2>,
}

impl Bot {
    /// Returns true if this hit killed the bot
    pub fn take_damage(&mut self, amount: f64) -> bool {
        let dead = apply_damage(&mut self.health, amount);
        if dead {
            self.body.alive = false;
        }
        dead
    }
}

/// A shot in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub body: Body,
    /// Player shots can only hurt bots, bot shots are the only ones that hurt the player
    pub from_player: bool,
}

/// The shrinking safe zone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Storm {
    pub center: DVec2,
    pub radius: f64,
    pub min_radius: f64,
    pub shrink_step: f64,
    pub shrink_interval_ms: f64,
    /// Time banked toward the next shrink
    pub accum_ms: f64,
}

impl Storm {
    pub fn from_config(config: &MatchConfig) -> Self {
        Self {
            center: config.map_center(),
            radius: config.effective_storm_radius(),
            min_radius: config.storm_min_radius,
            shrink_step: config.storm_shrink_step,
            shrink_interval_ms: config.storm_shrink_interval_ms,
            accum_ms: 0.0,
        }
    }

    /// Whether a point lies outside the safe zone
    pub fn is_outside(&self, pos: DVec2) -> bool {
        pos.distance(self.center) > self.radius
    }
}

/// Complete match state (deterministic for a given config and input sequence)
#[derive(Debug, Clone)]
pub struct MatchState {
    pub config: MatchConfig,
    /// Single shared generator for spawns, wander targets and fire-rolls
    pub rng: Pcg32,
    /// Last frame clock reported by the driver
    pub elapsed_ms: f64,
    /// Ticks processed while running
    pub ticks: u64,
    pub phase: MatchPhase,
    pub player: Player,
    /// Live bots, in spawn (id) order
    pub bots: Vec<Bot>,
    /// Live projectiles, in spawn (id) order
    pub projectiles: Vec<Projectile>,
    pub storm: Storm,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl MatchState {
    /// Validate the config and set up a fresh match
    pub fn new(config: MatchConfig) -> ConfigResult<Self> {
        config.validate()?;

        let player = Player {
            id: 1,
            body: Body::new(config.map_center(), config.player_radius),
            health: config.player_health,
            ammo: config.player_ammo,
            speed: config.player_speed,
        };

        let mut state = Self {
            rng: Pcg32::seed_from_u64(config.seed),
            storm: Storm::from_config(&config),
            elapsed_ms: 0.0,
            ticks: 0,
            phase: MatchPhase::Running,
            player,
            bots: Vec::with_capacity(config.bot_count),
            projectiles: Vec::new(),
            events: Vec::new(),
            next_id: 2,
            config,
        };

        for _ in 0..state.config.bot_count {
            state.spawn_bot();
        }

        log::info!(
            "Match started: seed={} map={}x{} bots={} storm={}",
            state.config.seed,
            state.config.map_width,
            state.config.map_height,
            state.bots.len(),
            state.storm.radius
        );

        Ok(state)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Uniform point inside the spawn margin box
    pub fn random_point_in_spawn_area(&mut self) -> DVec2 {
        let (min, max) = self.config.spawn_area();
        DVec2::new(
            self.rng.random_range(min.x..=max.x),
            self.rng.random_range(min.y..=max.y),
        )
    }

    /// Spawn a bot at a random position with a randomized speed
    pub fn spawn_bot(&mut self) -> u32 {
        let pos = self.random_point_in_spawn_area();
        let speed = self
            .rng
            .random_range(self.config.bot_speed_min..self.config.bot_speed_max);
        self.insert_bot(pos, speed)
    }

    /// Place a bot at an exact position
    pub fn insert_bot(&mut self, pos: DVec2, speed: f64) -> u32 {
        let id = self.next_entity_id();
        self.bots.push(Bot {
            id,
            body: Body::new(pos, self.config.bot_radius),
            health: self.config.bot_health,
            speed,
            target: None,
        });
        id
    }

    /// Add a projectile at `pos` moving with `vel`
    pub fn insert_projectile(&mut self, pos: DVec2, vel: DVec2, from_player: bool) -> u32 {
        let id = self.next_entity_id();
        let mut body = Body::new(pos, self.config.projectile_radius);
        body.vel = vel;
        body.rotation = crate::heading(vel);
        self.projectiles.push(Projectile {
            id,
            body,
            from_player,
        });
        self.events.push(GameEvent::ShotFired {
            projectile_id: id,
            from_player,
        });
        id
    }

    pub fn live_bot_count(&self) -> usize {
        self.bots.iter().filter(|b| b.body.alive).count()
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, MatchPhase::Ended { .. })
    }

    /// Drop dead bots and spent projectiles
    pub fn remove_dead(&mut self) {
        self.bots.retain(|b| b.body.alive);
        self.projectiles.retain(|p| p.body.alive);
    }
}
