// Content generation engines

pub mod maze_generator;
pub mod maze_validator;
pub mod word_puzzle;

pub use maze_generator::MazeGenerator;
pub use maze_validator::MazeValidator;
pub use word_puzzle::WordPuzzleGenerator;
