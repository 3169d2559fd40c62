//! Fixed timestep match tick
//!
//! Advances the match deterministically: commands, paddle movement, ball
//! physics, power-ups, win check. One call = one tick; nothing here blocks
//! or self-throttles.

use rand_pcg::Pcg32;

use super::powerups::{self, PowerUpKind};
use super::state::{GamePhase, MatchState, Side};
use super::{ai, physics};
use crate::consts::PADDLE_SPEED;
use crate::settings::{Difficulty, GameMode};

/// Discrete one-shot commands, edge-triggered from the event queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Reset and enter `Playing` (from the start screen or game over)
    Start,
    /// `Playing` ⇄ `Paused`
    PauseToggle,
    /// One-player ↔ two-player (start screen only)
    ToggleMode,
    /// AI preset (start screen only)
    SetDifficulty(Difficulty),
    /// Win target + 1, clamped (start screen only)
    IncrementWinTarget,
    /// Win target - 1, clamped (start screen only)
    DecrementWinTarget,
    /// Ends the drive loop; the simulation itself ignores it
    Quit,
}

/// Input for a single tick: a held-key snapshot plus the commands drained
/// from the event queue this tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left_up: bool,
    pub left_down: bool,
    /// Right-side held keys; only honored in two-player mode
    pub right_up: bool,
    pub right_down: bool,
    pub commands: Vec<Command>,
}

/// Advance the match by one fixed timestep
pub fn tick(state: &mut MatchState, input: &TickInput, rng: &mut Pcg32) {
    for command in &input.commands {
        apply_command(state, *command, rng);
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    // Countdowns run before anything can be collected this tick, so an
    // effect activated at tick T is removed exactly at tick T + duration
    for (side, kind) in powerups::expire_finished(&mut state.effects, &mut state.paddles) {
        log::debug!("{} expired for {}", kind.as_str(), side.as_str());
    }

    move_paddles(state, input);

    let step = physics::step_ball(
        &mut state.ball,
        &state.paddles[Side::Left.index()],
        &state.paddles[Side::Right.index()],
        &mut state.powerups,
    );

    state.stats.current += step.rally_hits;

    for (side, kind) in step.collected {
        powerups::activate(
            kind,
            side,
            &mut state.paddles,
            &mut state.ball,
            &mut state.effects,
        );
    }

    if let Some(side) = step.scored {
        state.record_point(side);
        log::info!(
            "point for {} ({} - {})",
            side.as_str(),
            state.score(Side::Left),
            state.score(Side::Right),
        );
        state.ball.reset(rng);

        if let Some(winner) = state.winner() {
            state.phase = GamePhase::GameOver;
            log::info!(
                "{} wins {} - {} (longest rally: {})",
                winner.as_str(),
                state.score(Side::Left),
                state.score(Side::Right),
                state.stats.longest,
            );
        }
    }

    if let Some(powerup) = powerups::maybe_spawn(rng, state.ball.pos) {
        log::debug!("{} spawned at {}", powerup.kind.as_str(), powerup.pos);
        state.powerups.push(powerup);
    }
    powerups::update_falling(&mut state.powerups);
}

/// Held-key movement for the players, tracking policy for the AI slot
fn move_paddles(state: &mut MatchState, input: &TickInput) {
    if input.left_up {
        state.paddles[Side::Left.index()].move_by(-PADDLE_SPEED);
    }
    if input.left_down {
        state.paddles[Side::Left.index()].move_by(PADDLE_SPEED);
    }

    match state.settings.mode {
        GameMode::TwoPlayer => {
            if input.right_up {
                state.paddles[Side::Right.index()].move_by(-PADDLE_SPEED);
            }
            if input.right_down {
                state.paddles[Side::Right.index()].move_by(PADDLE_SPEED);
            }
        }
        GameMode::OnePlayer => {
            let slowed = state.effects.is_active(Side::Right, PowerUpKind::SlowAi);
            let paddle = &state.paddles[Side::Right.index()];
            let y = ai::step(
                paddle,
                &state.ball,
                state.settings.difficulty.ai_speed(),
                slowed,
            );
            state.paddles[Side::Right.index()].y = y;
        }
    }
}

fn apply_command(state: &mut MatchState, command: Command, rng: &mut Pcg32) {
    match command {
        Command::Start => match state.phase {
            GamePhase::Start | GamePhase::GameOver => {
                state.reset_match(rng);
                log::info!(
                    "match started: {}, {} AI, first to {}",
                    state.settings.mode.as_str(),
                    state.settings.difficulty.as_str(),
                    state.settings.win_score,
                );
            }
            GamePhase::Playing | GamePhase::Paused => {}
        },
        Command::PauseToggle => match state.phase {
            GamePhase::Playing => state.phase = GamePhase::Paused,
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        },
        Command::ToggleMode if state.phase == GamePhase::Start => {
            state.settings.mode = state.settings.mode.toggled();
            log::info!("mode: {}", state.settings.mode.as_str());
        }
        Command::SetDifficulty(difficulty) if state.phase == GamePhase::Start => {
            state.settings.difficulty = difficulty;
            log::info!("difficulty: {}", difficulty.as_str());
        }
        Command::IncrementWinTarget if state.phase == GamePhase::Start => {
            state.settings.increment_win_score();
            log::info!("win score: {}", state.settings.win_score);
        }
        Command::DecrementWinTarget if state.phase == GamePhase::Start => {
            state.settings.decrement_win_score();
            log::info!("win score: {}", state.settings.win_score);
        }
        // Quit is the drive loop's business; config commands outside the
        // start screen fall through here too
        _ => {}
    }
}
