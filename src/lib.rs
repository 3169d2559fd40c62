//! Snap Pong - a two-paddle arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, AI, power-ups, match state)
//! - `settings`: Match configuration (mode, difficulty, win target)
//! - `runner`: Fixed-rate frame orchestration over external input/render traits

pub mod runner;
pub mod settings;
pub mod sim;

pub use runner::{FrameSink, InputSource, Runner};
pub use settings::{Difficulty, GameMode, MatchSettings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (steps per second)
    pub const TICK_RATE: u32 = 60;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 500.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 80.0;
    pub const PADDLE_SPEED: f32 = 10.0;
    pub const LEFT_PADDLE_X: f32 = 30.0;
    pub const RIGHT_PADDLE_X: f32 = FIELD_WIDTH - 40.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 15.0;
    pub const BALL_INITIAL_SPEED: f32 = 8.0;
    /// Speed magnitude cap (rescaled, never clamped per axis)
    pub const MAX_BALL_SPEED: f32 = 15.0;

    /// Win target bounds and default
    pub const DEFAULT_WIN_SCORE: u32 = 5;
    pub const WIN_SCORE_MIN: u32 = 1;
    pub const WIN_SCORE_MAX: u32 = 20;

    /// Power-up tuning
    pub const POWERUP_SPAWN_CHANCE: f32 = 0.02;
    pub const POWERUP_SIZE: f32 = 15.0;
    /// Effect lifetime in ticks (3 seconds at 60 Hz)
    pub const POWERUP_DURATION_TICKS: u32 = 180;
    /// Fall rate in pixels per tick
    pub const POWERUP_FALL_SPEED: f32 = 2.0;
}
