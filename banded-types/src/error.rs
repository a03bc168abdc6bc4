use thiserror::Error;

/// Failure conditions surfaced by the DP engine.
///
/// These are the conditions named by the error-handling design: each is
/// reported by a public entry point without mutating context state, except
/// where noted on the variant itself.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignError {
    /// A required argument was missing or the score matrix cannot be
    /// represented in the engine's fixed-width encoding.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Arena allocation failed. The context is left flushed; a retry after
    /// the caller releases memory is sound.
    #[error("out of memory while growing the block arena")]
    OutOfMemory,

    /// Traceback found a cell whose stored masks are inconsistent with the
    /// located maximum. Indicates a structural bug, not a caller error.
    #[error("traceback is out of band")]
    OutOfBand,

    /// A diff or offset computation would not fit its fixed-width
    /// representation. Guarded by `debug_assert!` at the arithmetic sites;
    /// this variant exists for the rare release-mode check.
    #[error("score arithmetic overflowed its fixed-width representation")]
    Overflow,
}
