//! Match settings
//!
//! Mode, AI difficulty, and win target. All three are only adjustable from
//! the start screen; bounds are enforced here at the mutation site.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// One player versus the AI, or two players on one keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    #[default]
    OnePlayer,
    TwoPlayer,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::OnePlayer => "1 Player (vs AI)",
            GameMode::TwoPlayer => "2 Players",
        }
    }

    /// The other mode (for the toggle command)
    pub fn toggled(&self) -> Self {
        match self {
            GameMode::OnePlayer => GameMode::TwoPlayer,
            GameMode::TwoPlayer => GameMode::OnePlayer,
        }
    }
}

/// AI difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Preset from the 1/2/3 key row; out-of-range levels are rejected
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Medium),
            3 => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// AI paddle speed in pixels per tick
    pub fn ai_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 3.0,
            Difficulty::Medium => 4.0,
            Difficulty::Hard => 6.0,
        }
    }
}

/// Configuration selected on the start screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSettings {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    /// First side to reach this score wins
    pub win_score: u32,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            difficulty: Difficulty::default(),
            win_score: DEFAULT_WIN_SCORE,
        }
    }
}

impl MatchSettings {
    /// Raise the win target, saturating at the upper bound
    pub fn increment_win_score(&mut self) {
        self.win_score = (self.win_score + 1).min(WIN_SCORE_MAX);
    }

    /// Lower the win target, saturating at the lower bound
    pub fn decrement_win_score(&mut self) {
        self.win_score = self.win_score.saturating_sub(1).max(WIN_SCORE_MIN);
    }
}
