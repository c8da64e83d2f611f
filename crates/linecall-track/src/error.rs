use thiserror::Error;

/// Lifecycle errors from the bounce detector.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum DetectorError {
    /// `on_push` (or a second `finalize`) arrived after finalization: a
    /// programming error in the calling code, not a data problem.
    #[error("detector already finalized; no further observations accepted")]
    AlreadyFinalized,
}
