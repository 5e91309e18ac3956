//! Puzzle content generation for the learning platform's two mini-games:
//! the maze adventure and the crossword-style word puzzle.
//!
//! Both pipelines follow the same design: generate, then prove correctness
//! before returning. The maze generator carves a perfect maze and gates the
//! exit behind a key/door pair seated on the guaranteed solution path; the
//! [`MazeValidator`] independently re-proves completability from the output
//! alone. The word-puzzle generator seats candidates by intersecting each
//! new word with an already-placed one at a matching letter.
//!
//! The engine performs no I/O and holds no shared state; each call owns its
//! buffers and its random source, so independent calls may run concurrently.
//! Pass a seeded `StdRng` to the `_with_rng` entry points for reproducible
//! output.

pub mod error;
pub mod game;
pub mod levels;
pub mod models;

pub use error::EngineError;
pub use game::{MazeGenerator, MazeValidator, WordPuzzleGenerator};
pub use levels::GameLevel;
pub use models::{
    GeneratedMaze, GeneratedPuzzle, GeneratedWordPuzzle, MazeAdventure, MazeReport,
    MazeValidation, PuzzleReport, WordCandidate, WordPuzzle,
};
