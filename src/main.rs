//! Vegan Blaster headless entry point
//!
//! Plays one level with a scripted autopilot, drawing every frame into a
//! recording surface, then prints the final grid and a JSON report.
//!
//! Usage: `vegan-blaster [seed] [tuning.json]`

use serde::Serialize;

use vegan_blaster::consts::*;
use vegan_blaster::renderer::DrawList;
use vegan_blaster::sim::{GamePhase, GameState, Session, TickInput, tick};
use vegan_blaster::{Tuning, TuningError};

/// Longest run before giving up on the level (seconds of game time)
const MAX_RUN_SECONDS: f32 = 240.0;

/// Host frame deltas, cycled; uneven on purpose to exercise the accumulator
const FRAME_DELTAS: [f32; 3] = [1.0 / 60.0, 1.0 / 24.0, 1.0 / 45.0];

/// Autopilot script: held keys and how many ticks to hold them
const SCRIPT: [(TickInput, u32); 6] = [
    (keys(true, false, false, false, false), 20),
    (keys(false, false, false, false, true), 1),
    (keys(false, true, false, false, false), 20),
    (keys(false, false, false, true, false), 40),
    (keys(false, false, true, false, false), 40),
    (keys(false, false, false, false, false), 60),
];

const fn keys(right: bool, left: bool, up: bool, down: bool, action: bool) -> TickInput {
    TickInput {
        right,
        left,
        up,
        down,
        action,
    }
}

/// End-of-run summary printed as JSON
#[derive(Serialize)]
struct Report<'a> {
    seed: u64,
    phase: GamePhase,
    ticks: u64,
    session: &'a Session,
}

/// Driver holding the state and the frame loop bookkeeping
struct Game {
    state: GameState,
    accumulator: f32,
    input: TickInput,
    script_step: usize,
    script_ticks: u32,
    frame: DrawList,
    frames_drawn: u64,
}

impl Game {
    fn new(state: GameState) -> Self {
        Self {
            state,
            accumulator: 0.0,
            input: SCRIPT[0].0,
            script_step: 0,
            script_ticks: 0,
            frame: DrawList::default(),
            frames_drawn: 0,
        }
    }

    /// Advance the autopilot by one tick
    fn next_input(&mut self) {
        self.script_ticks += 1;
        if self.script_ticks >= SCRIPT[self.script_step].1 {
            self.script_ticks = 0;
            self.script_step = (self.script_step + 1) % SCRIPT.len();
            self.input = SCRIPT[self.script_step].0;
        }
    }

    /// Run simulation ticks
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
            self.next_input();
        }
    }

    /// Render the current frame
    fn render(&mut self) {
        self.frame.clear();
        self.state.render(&mut self.frame);
        self.frames_drawn += 1;
    }
}

fn load_tuning(path: &str) -> Result<Tuning, TuningError> {
    let text = std::fs::read_to_string(path)?;
    Tuning::from_json(&text)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        None => 12345,
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::error!("Seed must be an unsigned integer: {}", e);
            std::process::exit(2);
        }
    };
    let tuning = match args.next() {
        None => Tuning::default(),
        Some(path) => match load_tuning(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Bad tuning file: {}", e);
                std::process::exit(2);
            }
        },
    };

    log::info!("Vegan Blaster (headless) starting with seed {}", seed);
    let state = match GameState::with_tuning(seed, tuning) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Cannot start level: {}", e);
            std::process::exit(2);
        }
    };

    let mut game = Game::new(state);
    let mut elapsed = 0.0;
    let mut deltas = FRAME_DELTAS.iter().cycle();

    while game.state.phase == GamePhase::Playing && elapsed < MAX_RUN_SECONDS {
        let dt = deltas.next().copied().unwrap_or(SIM_DT);
        elapsed += dt;
        game.update(dt);
        game.render();
    }

    log::info!(
        "Stopped after {} ticks and {} frames ({} draw calls in the last one), phase {:?}",
        game.state.time_ticks,
        game.frames_drawn,
        game.frame.commands().len(),
        game.state.phase
    );

    print!("{}", game.state.tilemap);
    let report = Report {
        seed: game.state.seed,
        phase: game.state.phase,
        ticks: game.state.time_ticks,
        session: &game.state.session,
    };
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Cannot serialize report: {}", e),
    }
}
