pub mod maze;
pub mod puzzle;

pub use maze::{
    // Maze output aggregate and its parts
    GeneratedMaze, MazeAdventure, MazeCellType, MazeGrid, MazeItem, MazeItemType, Position,
    // Generation/validation reporting
    MazeReport, MazeValidation,
};
pub use puzzle::{
    Direction, GeneratedPuzzle, GeneratedWordPuzzle, PlacedWord, PuzzleReport, WordCandidate,
    WordPuzzle,
};
