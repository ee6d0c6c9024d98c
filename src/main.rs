//! Parkour Run entry point
//!
//! The web build is driven from JS through `parkour_run::platform::web::WebGame`.
//! Natively this runs a scripted headless session and reports the result.
//!
//! Usage: `parkour-run [level-id] [seed] [seconds]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use parkour_run::consts::TICK_RATE;
    use parkour_run::sim::{InputState, Landing, Platform, PlayerState};
    use parkour_run::{Session, SessionConfig, level};

    const DEFAULT_LEVEL: &str = "moscow-winter";
    const DEFAULT_SECONDS: u32 = 30;

    /// How close to the front edge of a platform before jumping
    const TAKEOFF_MARGIN: f32 = 0.3;
    /// Sideways dead zone when lining up with the next platform
    const STEER_DEAD_ZONE: f32 = 0.15;

    /// Scripted runner: line up with the platform after `current`, run to the
    /// front edge of the one underfoot, jump.
    fn autopilot(
        player: &PlayerState,
        platforms: &[Platform],
        current: usize,
        landing: Option<Landing>,
    ) -> InputState {
        let Some(next) = platforms.get(current + 1) else {
            return InputState::default();
        };

        let mut input = InputState {
            forward: player.pos.z > next.center.z,
            ..Default::default()
        };
        let dx = next.center.x - player.pos.x;
        if dx > STEER_DEAD_ZONE {
            input.right = true;
        } else if dx < -STEER_DEAD_ZONE {
            input.left = true;
        }

        if let Some(l) = landing {
            let here = &platforms[l.index];
            input.jump = player.pos.z < here.center.z - here.half_depth + TAKEOFF_MARGIN;
        }
        input
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let mut args = std::env::args().skip(1);
        let level_id = args.next().unwrap_or_else(|| DEFAULT_LEVEL.to_string());
        let seed = args.next().map(|s| s.parse::<u64>()).transpose()?;
        let seconds = args
            .next()
            .map(|s| s.parse::<u32>())
            .transpose()?
            .unwrap_or(DEFAULT_SECONDS);

        let level = level::find(&level_id)?;
        let mut session = Session::start(
            &level,
            SessionConfig {
                seed,
                ..Default::default()
            },
        )?;
        log::info!(
            "Running '{}' headless for {}s (seed {})",
            level.name,
            seconds,
            session.seed()
        );

        let mut landing = None;
        let mut current = 0;
        for frame in 1..=seconds * TICK_RATE {
            let input = autopilot(session.player(), session.platforms(), current, landing);
            if let Some(outcome) = session.tick(&input) {
                landing = outcome.landing;
                if let Some(l) = landing {
                    current = l.index;
                }
                if outcome.respawned {
                    current = 0;
                }
            }
            if frame % TICK_RATE == 0 {
                session.second();
            }
        }

        let stats = session.stop();
        println!(
            "{}: {} m in {} ({} respawns, seed {})",
            level.name,
            stats.score,
            stats.clock_label(),
            session.respawns(),
            session.seed()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Parkour Run (native) starting...");

    if let Err(e) = headless::run() {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_start in the library, this is just to satisfy the compiler
}
