use serde::{Deserialize, Serialize};

/// A word/clue record supplied by the caller. Content is assumed
/// pre-validated upstream: non-empty alphabetic token, length already
/// filtered by the caller's query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordCandidate {
    pub word_id: i64,
    pub content: String,
    pub clue: String,
}

/// Orientation of a placed word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    /// A new word always crosses an existing one at 90 degrees.
    pub fn perpendicular(self) -> Self {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }
}

/// A word seated on the grid. Any two placed words sharing a cell hold the
/// same character there (true crossing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedWord {
    pub word_id: i64,
    /// Upper-cased form as written into the grid.
    pub word: String,
    pub clue: String,
    pub start_row: usize,
    pub start_col: usize,
    pub direction: Direction,
}

impl PlacedWord {
    /// Grid cells covered by this word, in letter order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (row, col, dir) = (self.start_row, self.start_col, self.direction);
        (0..self.word.chars().count()).map(move |i| match dir {
            Direction::Across => (row, col + i),
            Direction::Down => (row + i, col),
        })
    }
}

/// Placement counts for one generation attempt, so callers can decide to
/// retry instead of inferring degradation from output size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleReport {
    pub requested_words: usize,
    pub placed_words: usize,
    /// Whole-puzzle regeneration rounds consumed by the level wrapper.
    pub retries: usize,
}

/// Core generation result: the filled letter grid, the seated words and the
/// placement report. Returned together as one immutable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPuzzle {
    pub grid: Vec<Vec<char>>,
    pub words: Vec<PlacedWord>,
    pub report: PuzzleReport,
}

/// Client-facing aggregate built by the level wrapper; every cell holds one
/// uppercase letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordPuzzle {
    pub level: u8,
    pub grid_size: usize,
    pub words: Vec<PlacedWord>,
    pub grid: Vec<Vec<char>>,
}

/// Level-wrapper result: the client aggregate plus its placement report,
/// mirroring [`GeneratedMaze`](crate::models::maze::GeneratedMaze).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedWordPuzzle {
    pub puzzle: WordPuzzle,
    pub report: PuzzleReport,
}
