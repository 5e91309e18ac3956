use thiserror::Error;

/// The engine degrades gracefully everywhere it can; this covers the one
/// precondition violation it must report outward.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Word-puzzle generation needs at least two candidates to have anything
    /// to cross.
    #[error("fewer than two usable word candidates were supplied (got {0})")]
    InsufficientCandidates(usize),
}
