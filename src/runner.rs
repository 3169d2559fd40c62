//! Fixed-rate frame orchestration
//!
//! The core never polls devices or draws. Each step it consumes one
//! `InputSource` snapshot, advances the simulation one tick, and hands the
//! finished state to a `FrameSink`. Pacing is the caller's job; `step`
//! never sleeps.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::settings::MatchSettings;
use crate::sim::{Command, MatchState, TickInput, tick};

/// Per-tick input provider: a snapshot of currently held movement keys
/// plus the one-shot commands queued since the last tick
pub trait InputSource {
    fn poll(&mut self) -> TickInput;
}

/// Receives the full read-only match state once per tick, after the update
/// completes. The core does not care how (or whether) it is drawn.
pub trait FrameSink {
    fn present(&mut self, state: &MatchState);
}

/// Discards every frame. For tests and headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _state: &MatchState) {}
}

/// Owns the match state, the seeded RNG, and the two external interfaces
pub struct Runner<I, S> {
    state: MatchState,
    rng: Pcg32,
    input: I,
    sink: S,
}

impl<I: InputSource, S: FrameSink> Runner<I, S> {
    pub fn new(settings: MatchSettings, seed: u64, input: I, sink: S) -> Self {
        log::info!("match runner initialized with seed {seed}");
        Self {
            state: MatchState::new(settings),
            rng: Pcg32::seed_from_u64(seed),
            input,
            sink,
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// One fixed-rate step: poll, simulate, present. Returns `false` once
    /// a quit command arrives; that tick is neither simulated nor
    /// presented.
    pub fn step(&mut self) -> bool {
        let input = self.input.poll();
        if input.commands.contains(&Command::Quit) {
            log::info!("quit requested");
            return false;
        }
        tick(&mut self.state, &input, &mut self.rng);
        self.sink.present(&self.state);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;
    use std::collections::VecDeque;

    /// Replays a fixed input script, then goes idle
    struct Script(VecDeque<TickInput>);

    impl InputSource for Script {
        fn poll(&mut self) -> TickInput {
            self.0.pop_front().unwrap_or_default()
        }
    }

    struct CountingSink {
        frames: usize,
        last_ticks: u64,
    }

    impl FrameSink for CountingSink {
        fn present(&mut self, state: &MatchState) {
            self.frames += 1;
            self.last_ticks = state.time_ticks;
        }
    }

    #[test]
    fn test_presents_once_per_step() {
        let script = Script(VecDeque::from([TickInput {
            commands: vec![Command::Start],
            ..Default::default()
        }]));
        let sink = CountingSink {
            frames: 0,
            last_ticks: 0,
        };
        let mut runner = Runner::new(MatchSettings::default(), 7, script, sink);

        for _ in 0..10 {
            assert!(runner.step());
        }
        assert_eq!(runner.sink.frames, 10);
        // The start tick already simulates, so every step advanced once
        assert_eq!(runner.sink.last_ticks, 10);
        assert_eq!(runner.state().phase, GamePhase::Playing);
    }

    #[test]
    fn test_quit_stops_without_presenting() {
        let script = Script(VecDeque::from([TickInput {
            commands: vec![Command::Quit],
            ..Default::default()
        }]));
        let sink = CountingSink {
            frames: 0,
            last_ticks: 0,
        };
        let mut runner = Runner::new(MatchSettings::default(), 7, script, sink);

        assert!(!runner.step());
        assert_eq!(runner.sink.frames, 0);
    }
}
