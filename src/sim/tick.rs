//! Per-frame simulation step
//!
//! Core game loop that advances the match by one rendered frame. The order of
//! the phases is fixed:
//! 1. input → player velocity, facing and shots
//! 2. bots: fire-roll, retarget, move
//! 3. projectiles: advance, cull out-of-bounds
//! 4. collisions and damage
//! 5. storm shrink and storm damage
//! 6. terminal check (loss before win)

use glam::DVec2;

use super::snapshot::Snapshot;
use super::state::{GameEvent, MatchPhase, MatchState};
use super::{ai, collision, movement, projectile, storm};
use crate::config::MatchConfig;
use crate::error::ConfigResult;
use crate::platform::InputSource;

/// Input sampled once at the start of a tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Normalized stick direction in [-1, 1]²
    pub direction: DVec2,
    /// Stick held
    pub active: bool,
    /// Fire pressed since the last tick
    pub fire: bool,
}

impl TickInput {
    /// Sample an input source, consuming its pending fire press
    pub fn poll(source: &mut impl InputSource) -> Self {
        let (direction, active) = source.direction();
        let fire = source.consume_fire();
        Self {
            direction,
            active,
            fire,
        }
        .sanitized()
    }

    /// Malformed vectors degrade to an idle stick instead of poisoning state
    pub fn sanitized(mut self) -> Self {
        if !self.direction.is_finite() {
            self.direction = DVec2::ZERO;
            self.active = false;
        }
        self.direction = crate::clamp_unit_axes(self.direction);
        if !self.active {
            self.direction = DVec2::ZERO;
        }
        self
    }
}

/// Advance the match by one frame of `delta_ms` milliseconds
pub fn tick(state: &mut MatchState, input: &TickInput, delta_ms: f64) {
    if state.phase != MatchPhase::Running {
        return;
    }

    let delta_ms = if delta_ms.is_finite() {
        delta_ms.max(0.0)
    } else {
        0.0
    };
    let dt = delta_ms / 1000.0;
    state.ticks += 1;

    // 1. Player
    let map = state.config.map_size();
    movement::move_player(&mut state.player, input.direction, input.active, map, dt);
    if input.fire {
        let aim = if input.active {
            input.direction
        } else {
            DVec2::ZERO
        };
        projectile::fire_from_player(state, aim);
    }

    // 2. Bots
    ai::update_bots(state, dt);

    // 3. Projectiles
    projectile::advance(state, dt);

    // 4. Collisions
    collision::resolve(state);

    // 5. Storm
    storm::update(state, delta_ms);

    // 6. Terminal conditions
    check_match_end(state);
}

/// End the match on the first true condition: player dead, then no bots left
fn check_match_end(state: &mut MatchState) {
    let won = if state.player.health <= 0.0 {
        state.player.body.alive = false;
        false
    } else if state.live_bot_count() == 0 {
        true
    } else {
        return;
    };

    state.phase = MatchPhase::Ended { won };
    state.events.push(GameEvent::MatchEnded { won });
    log::info!(
        "Match ended after {} ticks: {}",
        state.ticks,
        if won { "win" } else { "loss" }
    );
}

/// Owns a match and drives it from an external frame clock
#[derive(Debug, Clone)]
pub struct Simulation {
    state: MatchState,
}

impl Simulation {
    pub fn new(config: MatchConfig) -> ConfigResult<Self> {
        Ok(Self {
            state: MatchState::new(config)?,
        })
    }

    pub fn from_state(state: MatchState) -> Self {
        Self { state }
    }

    /// Run one frame. Returns `Some(won)` on the frame the match ends, and
    /// `None` on every other frame, including all frames after the end.
    pub fn step(
        &mut self,
        input: &mut impl InputSource,
        elapsed_ms: f64,
        delta_ms: f64,
    ) -> Option<bool> {
        if self.state.phase != MatchPhase::Running {
            return None;
        }

        self.state.elapsed_ms = elapsed_ms;
        let input = TickInput::poll(input);
        tick(&mut self.state, &input, delta_ms);

        match self.state.phase {
            MatchPhase::Ended { won } => Some(won),
            _ => None,
        }
    }

    /// Freeze the match until [`Simulation::resume`]
    pub fn pause(&mut self) {
        if self.state.phase == MatchPhase::Running {
            self.state.phase = MatchPhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state.phase == MatchPhase::Paused {
            self.state.phase = MatchPhase::Running;
        }
    }

    /// `Some(won)` once the match is over
    pub fn outcome(&self) -> Option<bool> {
        match self.state.phase {
            MatchPhase::Ended { won } => Some(won),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// Take every event raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut MatchState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Joystick;
    use proptest::prelude::*;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Config with bots that never shoot, so outcomes are scripted
    fn quiet(bot_count: usize) -> MatchConfig {
        MatchConfig {
            bot_count,
            bot_fire_range: 0.0,
            ..MatchConfig::with_seed(77)
        }
    }

    fn ended_events(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::MatchEnded { .. }))
            .count()
    }

    #[test]
    fn test_idle_tick_advances() {
        let mut sim = Simulation::new(quiet(6)).unwrap();
        let mut joy = Joystick::default();
        assert_eq!(sim.step(&mut joy, FRAME_MS, FRAME_MS), None);
        assert_eq!(sim.state().ticks, 1);
        assert_eq!(sim.state().player.body.pos, DVec2::new(1500.0, 1500.0));
        assert!(sim.state().bots.iter().all(|b| b.target.is_some()));
    }

    #[test]
    fn test_stick_moves_player() {
        let mut sim = Simulation::new(quiet(6)).unwrap();
        let mut joy = Joystick::new(DVec2::ZERO, 10.0);
        joy.press(DVec2::new(10.0, 0.0));
        sim.step(&mut joy, 500.0, 500.0);
        assert_eq!(sim.state().player.body.pos, DVec2::new(1610.0, 1500.0));
    }

    #[test]
    fn test_fire_press_spawns_one_shot() {
        let mut sim = Simulation::new(quiet(6)).unwrap();
        let mut joy = Joystick::default();
        joy.trigger_fire();
        sim.step(&mut joy, FRAME_MS, FRAME_MS);
        sim.step(&mut joy, 2.0 * FRAME_MS, FRAME_MS);
        assert_eq!(sim.state().player.ammo, 9);
        let shots = sim
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::ShotFired { from_player: true, .. }))
            .count();
        assert_eq!(shots, 1);
    }

    #[test]
    fn test_two_fire_presses_fire_two_shots() {
        let mut sim = Simulation::new(quiet(6)).unwrap();
        let mut joy = Joystick::default();
        joy.trigger_fire();
        joy.trigger_fire();
        for frame in 1..=3 {
            sim.step(&mut joy, frame as f64 * FRAME_MS, FRAME_MS);
        }
        assert_eq!(sim.state().player.ammo, 8);
        let shots = sim
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::ShotFired { from_player: true, .. }))
            .count();
        assert_eq!(shots, 2);
    }

    #[test]
    fn test_huge_delta_does_not_stall() {
        let mut sim = Simulation::new(quiet(6)).unwrap();
        let mut joy = Joystick::default();
        sim.step(&mut joy, 1e20, 1e20);
        assert_eq!(sim.state().ticks, 1);
        assert_eq!(sim.state().storm.radius, 150.0);
        assert!(sim.state().storm.accum_ms < 1000.0);
    }

    #[test]
    fn test_fired_shots_kill_bot() {
        let mut sim = Simulation::new(quiet(0)).unwrap();
        let target = sim.state().player.body.pos + DVec2::new(40.0, 0.0);
        let bot_id = sim.state_mut().insert_bot(target, 100.0);

        let mut joy = Joystick::default();
        let mut outcome = None;
        for frame in 0..4 {
            assert!(outcome.is_none());
            joy.trigger_fire();
            outcome = sim.step(&mut joy, frame as f64 * FRAME_MS, FRAME_MS);
            if frame == 2 {
                assert_eq!(sim.state().bots[0].health, 25.0);
            }
        }

        assert_eq!(outcome, Some(true));
        let events = sim.drain_events();
        assert!(events.contains(&GameEvent::BotDestroyed { bot_id }));
        assert_eq!(ended_events(&events), 1);
    }

    #[test]
    fn test_win_fires_once() {
        let mut sim = Simulation::new(quiet(1)).unwrap();
        sim.state_mut().bots[0].body.alive = false;
        let mut joy = Joystick::default();

        assert_eq!(sim.step(&mut joy, 0.0, FRAME_MS), Some(true));
        for _ in 0..10 {
            assert_eq!(sim.step(&mut joy, 0.0, FRAME_MS), None);
        }
        assert_eq!(sim.outcome(), Some(true));
        assert_eq!(ended_events(&sim.drain_events()), 1);
        assert_eq!(sim.state().ticks, 1);
    }

    #[test]
    fn test_loss_fires_once() {
        let mut sim = Simulation::new(quiet(6)).unwrap();
        sim.state_mut().player.health = 0.1;
        sim.state_mut().player.body.pos = DVec2::new(30.0, 30.0);
        let mut joy = Joystick::default();

        // Storm damage finishes the player
        assert_eq!(sim.step(&mut joy, 0.0, FRAME_MS), Some(false));
        assert_eq!(sim.step(&mut joy, 0.0, FRAME_MS), None);
        assert_eq!(sim.state().player.health, 0.0);
        assert!(sim.snapshot().player.is_none());
        assert_eq!(ended_events(&sim.drain_events()), 1);
    }

    #[test]
    fn test_loss_beats_win_on_same_tick() {
        let mut sim = Simulation::new(quiet(1)).unwrap();
        sim.state_mut().bots[0].body.alive = false;
        sim.state_mut().player.health = 0.1;
        sim.state_mut().player.body.pos = DVec2::new(30.0, 30.0);
        let mut joy = Joystick::default();

        assert_eq!(sim.step(&mut joy, 0.0, FRAME_MS), Some(false));
        let events = sim.drain_events();
        assert_eq!(events, vec![GameEvent::MatchEnded { won: false }]);
    }

    #[test]
    fn test_paused_match_ignores_steps() {
        let mut sim = Simulation::new(quiet(6)).unwrap();
        let mut joy = Joystick::default();
        sim.pause();
        joy.trigger_fire();
        sim.step(&mut joy, 0.0, 5000.0);
        assert_eq!(sim.state().ticks, 0);
        assert_eq!(sim.state().storm.radius, 1800.0);

        sim.resume();
        sim.step(&mut joy, 0.0, 1000.0);
        assert_eq!(sim.state().ticks, 1);
        assert_eq!(sim.state().storm.radius, 1794.0);
        // The press survived the pause
        assert_eq!(sim.state().player.ammo, 9);
    }

    #[test]
    fn test_bad_delta_is_ignored() {
        let mut sim = Simulation::new(quiet(6)).unwrap();
        let mut joy = Joystick::new(DVec2::ZERO, 1.0);
        joy.press(DVec2::X);
        sim.step(&mut joy, 0.0, f64::NAN);
        sim.step(&mut joy, 0.0, -50.0);
        assert_eq!(sim.state().player.body.pos, DVec2::new(1500.0, 1500.0));
        assert_eq!(sim.state().storm.accum_ms, 0.0);
    }

    #[test]
    fn test_sanitized_input() {
        let input = TickInput {
            direction: DVec2::new(f64::INFINITY, 0.0),
            active: true,
            fire: true,
        }
        .sanitized();
        assert_eq!(input.direction, DVec2::ZERO);
        assert!(!input.active);
        assert!(input.fire);
    }

    #[test]
    fn test_determinism() {
        let run = || {
            let mut sim = Simulation::new(MatchConfig::with_seed(99_999)).unwrap();
            let mut joy = Joystick::new(DVec2::ZERO, 1.0);
            joy.press(DVec2::new(0.3, -0.8));
            for frame in 0..600 {
                if frame % 45 == 0 {
                    joy.trigger_fire();
                }
                sim.step(&mut joy, frame as f64 * FRAME_MS, FRAME_MS);
            }
            sim.snapshot()
        };

        let a = run();
        let b = run();
        assert_eq!(a.tick, b.tick);
        assert_eq!(a.hud.health, b.hud.health);
        assert_eq!(a.bots.len(), b.bots.len());
        for (x, y) in a.bots.iter().zip(&b.bots) {
            assert_eq!(x.pos, y.pos);
        }
        assert_eq!(a.projectiles.len(), b.projectiles.len());
    }

    /// Scripted input for property tests
    struct Scripted {
        direction: DVec2,
        active: bool,
        fire: bool,
    }

    impl InputSource for Scripted {
        fn direction(&self) -> (DVec2, bool) {
            (self.direction, self.active)
        }

        fn consume_fire(&mut self) -> bool {
            std::mem::take(&mut self.fire)
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_health_and_storm_invariants(
            seed in any::<u64>(),
            frames in prop::collection::vec(
                (-1.5f64..1.5, -1.5f64..1.5, any::<bool>(), any::<bool>(), 0.0f64..100.0),
                1..300,
            ),
        ) {
            let mut sim = Simulation::new(MatchConfig {
                bot_fire_roll_threshold: 50,
                ..MatchConfig::with_seed(seed)
            }).unwrap();
            let mut last_radius = sim.state().storm.radius;
            let mut last_ammo = sim.state().player.ammo;
            let mut elapsed = 0.0;
            let mut ended = 0;

            for (x, y, active, fire, delta) in frames {
                elapsed += delta;
                let mut input = Scripted { direction: DVec2::new(x, y), active, fire };
                if sim.step(&mut input, elapsed, delta).is_some() {
                    ended += 1;
                }

                let state = sim.state();
                prop_assert!(state.player.health >= 0.0);
                prop_assert!(state.bots.iter().all(|b| b.health >= 0.0));
                prop_assert!(state.player.ammo <= last_ammo);
                prop_assert!(state.storm.radius <= last_radius);
                prop_assert!(state.storm.radius >= 150.0);
                last_radius = state.storm.radius;
                last_ammo = state.player.ammo;
            }
            prop_assert!(ended <= 1);
        }
    }
}
