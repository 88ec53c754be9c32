//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through the frame delta handed to `step`
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod movement;
pub mod projectile;
pub mod snapshot;
pub mod state;
pub mod storm;
pub mod tick;

pub use collision::{CollisionReport, circles_overlap};
pub use snapshot::{EntityKind, EntityView, HudView, Snapshot, StormView};
pub use state::{Body, Bot, GameEvent, MatchPhase, MatchState, Player, Projectile, Storm};
pub use tick::{Simulation, TickInput, tick};
