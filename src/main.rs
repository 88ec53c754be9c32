//! Storm Arena headless runner
//!
//! Drives a match from a fixed 60 Hz frame clock with a scripted autopilot in
//! place of a human, then prints the final snapshot as JSON.
//!
//! Usage: `storm-arena [seed]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use glam::DVec2;

    use storm_arena::MatchConfig;
    use storm_arena::platform::InputSource;
    use storm_arena::sim::{GameEvent, Simulation, Snapshot};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after ten minutes of match time
    const MAX_FRAMES: u64 = 60 * 60 * 10;
    /// Frames between autopilot shots
    const FIRE_INTERVAL: u32 = 40;
    /// Keep this fraction of the storm radius as a safety buffer
    const STORM_BUFFER: f64 = 0.85;
    const ENGAGE_RANGE: f64 = 350.0;

    /// Idle/demo player: stays inside the storm, hunts the nearest bot
    #[derive(Debug, Default)]
    struct Autopilot {
        direction: DVec2,
        active: bool,
        fire: bool,
        cooldown: u32,
    }

    impl Autopilot {
        fn plan(&mut self, snap: &Snapshot) {
            self.cooldown = self.cooldown.saturating_sub(1);
            let Some(player) = &snap.player else {
                self.active = false;
                return;
            };

            let to_center = snap.storm.center - player.pos;
            if to_center.length() > snap.storm.radius * STORM_BUFFER {
                self.steer(to_center);
                return;
            }

            let nearest = snap
                .bots
                .iter()
                .map(|bot| bot.pos - player.pos)
                .min_by(|a, b| a.length().total_cmp(&b.length()));

            match nearest {
                Some(offset) => {
                    self.steer(offset);
                    if offset.length() < ENGAGE_RANGE && self.cooldown == 0 && snap.hud.ammo > 0 {
                        self.fire = true;
                        self.cooldown = FIRE_INTERVAL;
                    }
                }
                None => self.active = false,
            }
        }

        fn steer(&mut self, toward: DVec2) {
            self.direction = toward.normalize_or_zero();
            self.active = self.direction != DVec2::ZERO;
        }
    }

    impl InputSource for Autopilot {
        fn direction(&self) -> (DVec2, bool) {
            (self.direction, self.active)
        }

        fn consume_fire(&mut self) -> bool {
            std::mem::take(&mut self.fire)
        }
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        env_logger::init();

        let seed = std::env::args()
            .nth(1)
            .map(|arg| arg.parse::<u64>())
            .transpose()?
            .unwrap_or(0);
        log::info!("Storm Arena (headless) starting with seed {seed}");

        let mut sim = Simulation::new(MatchConfig::with_seed(seed))?;
        let mut pilot = Autopilot::default();
        let mut elapsed = 0.0;

        for _ in 0..MAX_FRAMES {
            pilot.plan(&sim.snapshot());
            elapsed += FRAME_MS;
            let ended = sim.step(&mut pilot, elapsed, FRAME_MS);

            for event in sim.drain_events() {
                match event {
                    GameEvent::BotDestroyed { bot_id } => log::info!("Bot {bot_id} down"),
                    GameEvent::StormShrunk { radius } => log::trace!("Storm at {radius}"),
                    _ => {}
                }
            }

            if let Some(won) = ended {
                log::info!("{}", if won { "YOU WIN" } else { "YOU LOSE" });
                break;
            }
        }

        if sim.outcome().is_none() {
            log::warn!("No result after {MAX_FRAMES} frames");
        }

        println!("{}", serde_json::to_string_pretty(&sim.snapshot())?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end; the library is driven by the host page
}
