//! Errors surfaced to callers of the reduced model

/// A request that would move past either end of the document.
///
/// These are contract violations by the caller, which is expected to check
/// offsets against the document length. The model is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("cannot move {requested} characters back from offset {position}")]
    BeforeStart { requested: usize, position: usize },

    #[error("cannot move {requested} characters forward: only {available} remain")]
    PastEnd { requested: usize, available: usize },
}
