//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, injected as a parameter
//! - No rendering or platform dependencies

pub mod ai;
pub mod physics;
pub mod powerups;
pub mod rect;
pub mod state;
pub mod tick;

pub use physics::{BallStep, step_ball};
pub use powerups::{ActiveEffects, Activation, PowerUp, PowerUpKind};
pub use rect::Rect;
pub use state::{Ball, GamePhase, MatchState, Paddle, RallyStats, Side};
pub use tick::{Command, TickInput, tick};
