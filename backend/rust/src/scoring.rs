// scoring.rs - Level presets and the move/time score formula built on the optimal route

use serde::{Deserialize, Serialize};

/// Size and time limit of one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelConfig {
    pub level: u32,
    pub name: &'static str,
    /// Mazes are square: `size x size`
    pub size: usize,
    pub time_limit_secs: u32,
}

pub const LEVELS: [LevelConfig; 3] = [
    LevelConfig {
        level: 1,
        name: "Novice",
        size: 5,
        time_limit_secs: 60,
    },
    LevelConfig {
        level: 2,
        name: "Explorer",
        size: 8,
        time_limit_secs: 90,
    },
    LevelConfig {
        level: 3,
        name: "Master",
        size: 12,
        time_limit_secs: 120,
    },
];

impl LevelConfig {
    pub fn for_level(level: u32) -> Option<&'static LevelConfig> {
        LEVELS.iter().find(|l| l.level == level)
    }

    pub fn is_last(&self) -> bool {
        LEVELS.last().is_some_and(|last| last.level == self.level)
    }
}

/// `score = base + seconds_left * time_bonus_per_sec - max(0, moves - optimal) * penalty_per_move`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoreRules {
    pub base: i64,
    pub time_bonus_per_sec: i64,
    pub penalty_per_move: i64,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self {
            base: 500,
            time_bonus_per_sec: 5,
            penalty_per_move: 10,
        }
    }
}

impl ScoreRules {
    pub fn time_bonus(&self, seconds_left: u32) -> i64 {
        i64::from(seconds_left) * self.time_bonus_per_sec
    }

    /// Zero when the player needed no more moves than the optimal route.
    pub fn move_penalty(&self, moves: usize, optimal_moves: usize) -> i64 {
        let extra = moves.saturating_sub(optimal_moves);
        i64::try_from(extra)
            .unwrap_or(i64::MAX)
            .saturating_mul(self.penalty_per_move)
    }

    pub fn level_score(&self, seconds_left: u32, moves: usize, optimal_moves: usize) -> i64 {
        self.base
            .saturating_add(self.time_bonus(seconds_left))
            .saturating_sub(self.move_penalty(moves, optimal_moves))
    }
}
