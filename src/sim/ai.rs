//! AI paddle control
//!
//! Pure proportional tracking: chase the ball's vertical center one step
//! per tick, no prediction, no randomness. Difficulty is just the step size.

use super::state::{Ball, Paddle};
use crate::consts::FIELD_HEIGHT;

/// One tick of AI movement. Returns the paddle's new vertical position,
/// clamped to the playfield. A slow effect halves the speed (integer
/// semantics, floor of 1) so easy presets still move.
pub fn step(paddle: &Paddle, ball: &Ball, base_speed: f32, slowed: bool) -> f32 {
    let speed = if slowed {
        (base_speed / 2.0).floor().max(1.0)
    } else {
        base_speed
    };

    let paddle_center = paddle.center_y();
    let ball_center = ball.pos.y + ball.size / 2.0;

    let y = if paddle_center < ball_center {
        paddle.y + speed
    } else if paddle_center > ball_center {
        paddle.y - speed
    } else {
        paddle.y
    };

    y.clamp(0.0, FIELD_HEIGHT - paddle.height)
}
