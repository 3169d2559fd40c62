//! Ball integration, collision resolution, and scoring
//!
//! One call advances the ball by exactly one tick. Randomness never enters
//! here; respawning the ball after a point is the caller's job so the
//! injected RNG stays at the orchestration layer.

use super::powerups::{PowerUp, PowerUpKind};
use super::state::{Ball, Paddle, Side};
use crate::consts::*;

/// What one tick of ball movement produced
#[derive(Debug, Clone, Default)]
pub struct BallStep {
    /// Side that won a point this tick, if any
    pub scored: Option<Side>,
    /// Paddle-ball exchanges this tick
    pub rally_hits: u32,
    /// Power-ups picked up this tick, with the receiving side
    pub collected: Vec<(Side, PowerUpKind)>,
}

/// Rescale velocity onto the speed cap, preserving direction
pub fn clamp_speed(ball: &mut Ball) {
    let speed = ball.speed();
    if speed > MAX_BALL_SPEED {
        ball.vel *= MAX_BALL_SPEED / speed;
    }
}

/// Advance the ball one tick: integrate, cap speed, bounce off walls and
/// paddles, pick up power-ups, and detect scoring
pub fn step_ball(
    ball: &mut Ball,
    left: &Paddle,
    right: &Paddle,
    powerups: &mut [PowerUp],
) -> BallStep {
    let mut step = BallStep::default();

    ball.pos += ball.vel;
    clamp_speed(ball);

    // Top/bottom walls: reposition flush, force the sign away from the wall
    if ball.pos.y <= 0.0 {
        ball.pos.y = 0.0;
        ball.vel.y = ball.vel.y.abs();
    } else if ball.rect().bottom() >= FIELD_HEIGHT {
        ball.pos.y = FIELD_HEIGHT - ball.size;
        ball.vel.y = -ball.vel.y.abs();
    }

    // Paddles: only when moving toward them, so an overlap left over from
    // the previous bounce cannot re-trigger
    if ball.vel.x < 0.0 && ball.rect().intersects(&left.rect()) {
        ball.pos.x = left.rect().right();
        ball.vel.x = ball.vel.x.abs();
        apply_spin(ball, left);
        step.rally_hits += 1;
    }
    if ball.vel.x > 0.0 && ball.rect().intersects(&right.rect()) {
        ball.pos.x = right.x - ball.size;
        ball.vel.x = -ball.vel.x.abs();
        apply_spin(ball, right);
        step.rally_hits += 1;
    }

    // Power-ups go to the side the ball is heading toward
    for powerup in powerups.iter_mut() {
        if !powerup.collected && ball.rect().intersects(&powerup.rect()) {
            let receiver = if ball.vel.x < 0.0 {
                Side::Left
            } else {
                Side::Right
            };
            powerup.collected = true;
            step.collected.push((receiver, powerup.kind));
        }
    }

    // Crossing a goal line scores for the opposite side
    if ball.pos.x <= 0.0 {
        step.scored = Some(Side::Right);
    } else if ball.rect().right() >= FIELD_WIDTH {
        step.scored = Some(Side::Left);
    }

    step
}

/// Bias the rebound by contact point: 0 at the paddle top, 1 at the bottom,
/// centered hits add nothing
fn apply_spin(ball: &mut Ball, paddle: &Paddle) {
    let hit_fraction = (ball.pos.y - paddle.y) / paddle.height;
    ball.vel.y += (hit_fraction - 0.5) * 2.0;
}
