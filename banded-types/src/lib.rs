//! Shared types for the banded, difference-encoded, X-drop pairwise aligner.
//!
//! Sequence/score/path primitives only; no DP logic lives here. See
//! `banded-core` for the fill engine, arena, traceback, and façade.

pub mod cigar;
pub mod config;
pub mod error;
pub mod score;
pub mod seq;
pub mod status;

pub use cigar::{AlignmentResult, Cigar, CigarElem, CigarOp, Path, PathSection};
pub use config::{AlignParams, BandType, ClipParams, ClipType};
pub use error::AlignError;
pub use score::ScoreMatrix;
pub use seq::{FetchDirection, SeqDirection, SeqFormat};
