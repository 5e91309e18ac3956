use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Difficulty level of a mini-game round. The per-level parameter tables
/// below are configuration data consumed by the engine as plain integers;
/// they shape the difficulty curve but are not part of the hard contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameLevel {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
}

impl GameLevel {
    pub const ALL: [GameLevel; 5] = [
        GameLevel::First,
        GameLevel::Second,
        GameLevel::Third,
        GameLevel::Fourth,
        GameLevel::Fifth,
    ];

    /// 1-based level number used in client payloads.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }
}

/// Crossword sizing for one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrosswordParams {
    pub grid_size: usize,
    pub max_word_len: usize,
    pub target_word_count: usize,
}

/// Maze sizing for one level. Dimensions are odd so carving fills the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeParams {
    pub rows: usize,
    pub cols: usize,
    pub trap_count: usize,
}

/// Callers should over-fetch word candidates by this factor; placement drops
/// candidates that fail to cross anything.
pub const CANDIDATE_OVERFETCH_FACTOR: usize = 3;

pub static CROSSWORD_LEVELS: Lazy<HashMap<GameLevel, CrosswordParams>> = Lazy::new(|| {
    HashMap::from([
        (
            GameLevel::First,
            CrosswordParams { grid_size: 5, max_word_len: 5, target_word_count: 5 },
        ),
        (
            GameLevel::Second,
            CrosswordParams { grid_size: 7, max_word_len: 7, target_word_count: 7 },
        ),
        (
            GameLevel::Third,
            CrosswordParams { grid_size: 9, max_word_len: 7, target_word_count: 8 },
        ),
        (
            GameLevel::Fourth,
            CrosswordParams { grid_size: 11, max_word_len: 9, target_word_count: 9 },
        ),
        (
            GameLevel::Fifth,
            CrosswordParams { grid_size: 13, max_word_len: 10, target_word_count: 10 },
        ),
    ])
});

pub static MAZE_LEVELS: Lazy<HashMap<GameLevel, MazeParams>> = Lazy::new(|| {
    HashMap::from([
        (GameLevel::First, MazeParams { rows: 9, cols: 9, trap_count: 1 }),
        (GameLevel::Second, MazeParams { rows: 11, cols: 11, trap_count: 2 }),
        (GameLevel::Third, MazeParams { rows: 13, cols: 13, trap_count: 3 }),
        (GameLevel::Fourth, MazeParams { rows: 15, cols: 15, trap_count: 4 }),
        (GameLevel::Fifth, MazeParams { rows: 21, cols: 21, trap_count: 5 }),
    ])
});

pub fn crossword_params(level: GameLevel) -> CrosswordParams {
    CROSSWORD_LEVELS[&level]
}

pub fn maze_params(level: GameLevel) -> MazeParams {
    MAZE_LEVELS[&level]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_cover_every_level() {
        for level in GameLevel::ALL {
            let _ = crossword_params(level);
            let _ = maze_params(level);
        }
    }

    #[test]
    fn test_level_numbers() {
        let numbers: Vec<u8> = GameLevel::ALL.iter().map(|l| l.number()).collect();
        assert_eq!(numbers, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_crossword_table_values() {
        let first = crossword_params(GameLevel::First);
        assert_eq!((first.grid_size, first.max_word_len, first.target_word_count), (5, 5, 5));

        let fifth = crossword_params(GameLevel::Fifth);
        assert_eq!((fifth.grid_size, fifth.max_word_len, fifth.target_word_count), (13, 10, 10));
    }

    #[test]
    fn test_maze_dimensions_are_odd_and_carveable() {
        for level in GameLevel::ALL {
            let params = maze_params(level);
            assert!(params.rows >= 5 && params.cols >= 5);
            assert_eq!(params.rows % 2, 1, "even row counts leave an uncarved band");
            assert_eq!(params.cols % 2, 1, "even col counts leave an uncarved band");
        }
    }

    #[test]
    fn test_level_wire_names() {
        let json = serde_json::to_value(GameLevel::Third).unwrap();
        assert_eq!(json, "THIRD");
    }
}
