//! Match state and core simulation types

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::powerups::{ActiveEffects, PowerUp};
use super::rect::Rect;
use crate::consts::*;
use crate::settings::MatchSettings;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Start screen; configuration is only mutable here
    #[default]
    Start,
    /// Active gameplay
    Playing,
    /// Simulation suspended, state untouched
    Paused,
    /// Match ended; frozen until restart
    GameOver,
}

/// Paddle/player/AI slot identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// Index into per-side arrays
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// A player or AI paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    /// Mutable under power-up effects; base is `PADDLE_HEIGHT`
    pub height: f32,
}

impl Paddle {
    pub fn new(side: Side) -> Self {
        let x = match side {
            Side::Left => LEFT_PADDLE_X,
            Side::Right => RIGHT_PADDLE_X,
        };
        Self {
            side,
            x,
            y: FIELD_HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Move vertically, clamped to the playfield
    pub fn move_by(&mut self, dy: f32) {
        self.y = (self.y + dy).clamp(0.0, FIELD_HEIGHT - self.height);
    }

    /// Change height keeping the top edge fixed, then re-clamp to the field
    pub fn set_height(&mut self, height: f32) {
        self.height = height;
        self.y = self.y.clamp(0.0, FIELD_HEIGHT - self.height);
    }

    pub fn reset_height(&mut self) {
        self.set_height(PADDLE_HEIGHT);
    }
}

/// The ball. Singleton per match, recreated on score or reset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::new(
                (FIELD_WIDTH - BALL_SIZE) / 2.0,
                (FIELD_HEIGHT - BALL_SIZE) / 2.0,
            ),
            vel: Vec2::ZERO,
            size: BALL_SIZE,
        }
    }
}

impl Ball {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Recenter with freshly randomized velocity: two independent sign
    /// choices at the initial speed
    pub fn reset(&mut self, rng: &mut Pcg32) {
        self.pos = Vec2::new(
            (FIELD_WIDTH - BALL_SIZE) / 2.0,
            (FIELD_HEIGHT - BALL_SIZE) / 2.0,
        );
        let sign = |up: bool| if up { BALL_INITIAL_SPEED } else { -BALL_INITIAL_SPEED };
        let sx = sign(rng.random::<bool>());
        let sy = sign(rng.random::<bool>());
        self.vel = Vec2::new(sx, sy);
    }
}

/// Rally bookkeeping for the current match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RallyStats {
    /// Paddle-ball exchanges since the last score
    pub current: u32,
    pub longest: u32,
    /// Rallies won, indexed by scoring side
    pub won: [u32; 2],
}

/// Complete match state. The single context object every update function
/// receives; there are no hidden singletons behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub phase: GamePhase,
    pub settings: MatchSettings,
    /// Points, indexed by side
    pub scores: [u32; 2],
    pub stats: RallyStats,
    /// Indexed by side
    pub paddles: [Paddle; 2],
    pub ball: Ball,
    /// Live falling power-ups
    pub powerups: Vec<PowerUp>,
    /// Collected-effect countdowns
    pub effects: ActiveEffects,
    /// Simulation tick counter; does not advance outside `Playing`
    pub time_ticks: u64,
}

impl MatchState {
    /// Fresh state on the start screen. The ball stays inert until the
    /// first reset puts it in play.
    pub fn new(settings: MatchSettings) -> Self {
        Self {
            phase: GamePhase::Start,
            settings,
            scores: [0, 0],
            stats: RallyStats::default(),
            paddles: [Paddle::new(Side::Left), Paddle::new(Side::Right)],
            ball: Ball::default(),
            powerups: Vec::new(),
            effects: ActiveEffects::default(),
            time_ticks: 0,
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        &self.paddles[side.index()]
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        &mut self.paddles[side.index()]
    }

    pub fn score(&self, side: Side) -> u32 {
        self.scores[side.index()]
    }

    /// Record a point: fold the rally into the stats, then bump the score
    pub fn record_point(&mut self, side: Side) {
        self.scores[side.index()] += 1;
        self.stats.longest = self.stats.longest.max(self.stats.current);
        self.stats.won[side.index()] += 1;
        self.stats.current = 0;
    }

    /// Side that reached the win target, if any
    pub fn winner(&self) -> Option<Side> {
        Side::BOTH
            .into_iter()
            .find(|side| self.score(*side) >= self.settings.win_score)
    }

    /// Full reset used for both "start" and "play again": clears scores,
    /// rallies, power-ups and effects, restores paddle heights, and puts
    /// the ball in play
    pub fn reset_match(&mut self, rng: &mut Pcg32) {
        self.scores = [0, 0];
        self.stats = RallyStats::default();
        self.powerups.clear();
        self.effects = ActiveEffects::default();
        for paddle in &mut self.paddles {
            paddle.reset_height();
        }
        self.ball.reset(rng);
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_paddle_move_clamps_to_field() {
        let mut paddle = Paddle::new(Side::Left);
        paddle.move_by(-1000.0);
        assert_eq!(paddle.y, 0.0);
        paddle.move_by(1000.0);
        assert_eq!(paddle.y, FIELD_HEIGHT - paddle.height);
    }

    #[test]
    fn test_paddle_growth_at_bottom_stays_on_field() {
        let mut paddle = Paddle::new(Side::Right);
        paddle.move_by(1000.0);
        paddle.set_height(PADDLE_HEIGHT * 1.5);
        assert!(paddle.rect().bottom() <= FIELD_HEIGHT);
    }

    #[test]
    fn test_ball_reset_randomizes_direction() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut ball = Ball::default();
        ball.reset(&mut rng);
        assert_eq!(ball.vel.x.abs(), BALL_INITIAL_SPEED);
        assert_eq!(ball.vel.y.abs(), BALL_INITIAL_SPEED);
        assert_eq!(ball.pos.x, (FIELD_WIDTH - BALL_SIZE) / 2.0);
    }

    #[test]
    fn test_record_point_folds_rally() {
        let mut state = MatchState::new(MatchSettings::default());
        state.stats.current = 7;
        state.record_point(Side::Right);
        assert_eq!(state.score(Side::Right), 1);
        assert_eq!(state.stats.longest, 7);
        assert_eq!(state.stats.won[Side::Right.index()], 1);
        assert_eq!(state.stats.current, 0);

        // A shorter rally must not shrink the record
        state.stats.current = 3;
        state.record_point(Side::Left);
        assert_eq!(state.stats.longest, 7);
    }

    #[test]
    fn test_reset_match_clears_everything() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = MatchState::new(MatchSettings::default());
        state.scores = [3, 4];
        state.stats.current = 5;
        state.paddle_mut(Side::Left).set_height(104.0);
        state.reset_match(&mut rng);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.scores, [0, 0]);
        assert_eq!(state.stats, RallyStats::default());
        assert_eq!(state.paddle(Side::Left).height, PADDLE_HEIGHT);
        assert!(state.powerups.is_empty());
        assert_ne!(state.ball.vel, Vec2::ZERO);
    }
}
