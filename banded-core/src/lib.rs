//! Banded, difference-encoded, X-drop, section-chained pairwise DP engine.
//!
//! [`context::DpContext`] is the façade most callers want: it owns the
//! block arena and score vectors for one DP run and exposes `fill_root`,
//! `fill`, and `trace`. The other modules are the engine's internals,
//! public so a caller who needs to drive the block fill loop directly
//! (e.g. a custom chain-orchestration policy) can do so without going
//! through the façade.

pub mod arena;
pub mod block;
pub mod chain;
pub mod constants;
pub mod context;
pub mod direction;
pub mod fill;
pub mod max_localize;
pub mod path_parser;
pub mod score_vectors;
pub mod tail;
pub mod trace;
pub mod window;

/// Naive reference aligner and a small sequence corpus, shared by this
/// crate's own unit tests and by the integration tests under `tests/`.
/// Not `cfg(test)`-gated because integration test binaries link against
/// the compiled library and can't see items gated that way; kept `#[doc(
/// hidden)]` since it isn't part of the crate's real public API.
#[doc(hidden)]
pub mod test_support;

pub use context::{DpContext, Section};
pub use score_vectors::{MiddleDelta, ScoreVectors};
