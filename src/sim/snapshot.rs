//! Read-only view of a match for renderers and HUDs
//!
//! Captured after each step. Holds only live entities.

use glam::DVec2;
use serde::Serialize;

use super::state::{Body, MatchPhase, MatchState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityKind {
    Player,
    Bot,
    PlayerShot,
    BotShot,
}

/// What a renderer needs to draw one entity
#[derive(Debug, Clone, Serialize)]
pub struct EntityView {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: DVec2,
    pub rotation: f64,
    pub radius: f64,
}

impl EntityView {
    fn new(id: u32, kind: EntityKind, body: &Body) -> Self {
        Self {
            id,
            kind,
            pos: body.pos,
            rotation: body.rotation,
            radius: body.radius,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HudView {
    pub health: f64,
    /// Health rounded for display, never below zero
    pub health_display: u32,
    pub ammo: u32,
    pub bots_left: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StormView {
    pub center: DVec2,
    pub radius: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub elapsed_ms: f64,
    pub phase: MatchPhase,
    /// None once the player is dead
    pub player: Option<EntityView>,
    pub bots: Vec<EntityView>,
    pub projectiles: Vec<EntityView>,
    pub hud: HudView,
    pub storm: StormView,
}

impl Snapshot {
    pub fn capture(state: &MatchState) -> Self {
        let player = &state.player;
        Self {
            tick: state.ticks,
            elapsed_ms: state.elapsed_ms,
            phase: state.phase,
            player: player
                .body
                .alive
                .then(|| EntityView::new(player.id, EntityKind::Player, &player.body)),
            bots: state
                .bots
                .iter()
                .filter(|b| b.body.alive)
                .map(|b| EntityView::new(b.id, EntityKind::Bot, &b.body))
                .collect(),
            projectiles: state
                .projectiles
                .iter()
                .filter(|p| p.body.alive)
                .map(|p| {
                    let kind = if p.from_player {
                        EntityKind::PlayerShot
                    } else {
                        EntityKind::BotShot
                    };
                    EntityView::new(p.id, kind, &p.body)
                })
                .collect(),
            hud: HudView {
                health: player.health,
                health_display: player.health.max(0.0).round() as u32,
                ammo: player.ammo,
                bots_left: state.live_bot_count(),
            },
            storm: StormView {
                center: state.storm.center,
                radius: state.storm.radius,
            },
        }
    }

    /// Every drawable entity, player first
    pub fn entities(&self) -> impl Iterator<Item = &EntityView> {
        self.player
            .iter()
            .chain(self.bots.iter())
            .chain(self.projectiles.iter())
    }
}
