//! Snap Pong entry point
//!
//! Runs a headless demonstration match: one idle player versus the AI,
//! driven through the same `Runner` a real front-end would use, with the
//! final state dumped as JSON. A front-end supplies its own
//! `InputSource`/`FrameSink` pair in place of the demo ones.

use snap_pong::consts::TICK_RATE;
use snap_pong::runner::{FrameSink, InputSource, Runner};
use snap_pong::settings::MatchSettings;
use snap_pong::sim::{Command, GamePhase, MatchState, TickInput};

/// Issues a single start command, then leaves every key idle
#[derive(Default)]
struct DemoInput {
    started: bool,
}

impl InputSource for DemoInput {
    fn poll(&mut self) -> TickInput {
        if self.started {
            return TickInput::default();
        }
        self.started = true;
        TickInput {
            commands: vec![Command::Start],
            ..Default::default()
        }
    }
}

/// Logs phase transitions instead of drawing
#[derive(Default)]
struct LogSink {
    last_phase: GamePhase,
}

impl FrameSink for LogSink {
    fn present(&mut self, state: &MatchState) {
        if state.phase != self.last_phase {
            log::info!("phase: {:?} -> {:?}", self.last_phase, state.phase);
            self.last_phase = state.phase;
        }
    }
}

fn main() {
    env_logger::init();

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0x5eed);
    log::info!("Snap Pong (headless demo) starting with seed {seed}");

    let mut runner = Runner::new(
        MatchSettings::default(),
        seed,
        DemoInput::default(),
        LogSink::default(),
    );

    // Cap at two minutes of simulated play in case the rally never ends
    let max_ticks = TICK_RATE as u64 * 120;
    for _ in 0..max_ticks {
        if !runner.step() || runner.state().phase == GamePhase::GameOver {
            break;
        }
    }

    match serde_json::to_string_pretty(runner.state()) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("failed to serialize final state: {err}"),
    }
}
