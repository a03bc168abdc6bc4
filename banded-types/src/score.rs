use crate::error::AlignError;
use serde::{Deserialize, Serialize};

/// A 4x4 substitution table plus two independent affine gap regimes (one
/// for gaps in A, one for gaps in B).
///
/// `sub` holds the flattened 4x4 table over the four canonical bases, in
/// `(a_index, b_index)` row-major order where `a_index`/`b_index` are the
/// trailing-zero-count of the 4-bit base code (`A=1,C=2,G=4,T=8` ->
/// `0,1,2,3`). That index scheme is what lets the block fill engine address
/// the table with a single shuffle keyed directly off the packed 4-bit
/// sequence bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreMatrix {
    pub sub: [i8; 16],
    pub gi_a: i8,
    pub ge_a: i8,
    pub gi_b: i8,
    pub ge_b: i8,
}

impl ScoreMatrix {
    /// A uniform match/mismatch scheme with one linear gap regime, shared
    /// by A and B.
    pub fn simple(match_score: i8, mismatch_score: i8, gap: i8) -> Result<Self, AlignError> {
        let mut sub = [mismatch_score; 16];
        for i in 0..4 {
            sub[i * 4 + i] = match_score;
        }
        Self::new(sub, 0, gap, 0, gap)
    }

    /// Validates that `gi + ge <= -1` for both regimes, i.e. every gap
    /// step (open or extend) is strictly penalised.
    pub fn new(sub: [i8; 16], gi_a: i8, ge_a: i8, gi_b: i8, ge_b: i8) -> Result<Self, AlignError> {
        if gi_a as i32 + ge_a as i32 > -1 || gi_b as i32 + ge_b as i32 > -1 {
            return Err(AlignError::InvalidArgument(
                "gap open + gap extend must be <= -1",
            ));
        }
        Ok(ScoreMatrix {
            sub,
            gi_a,
            ge_a,
            gi_b,
            ge_b,
        })
    }

    /// Score of aligning 4-bit encoded base `a` against base `b`. Only
    /// defined for the four unambiguous codes; the caller's sequence window
    /// never presents anything else in the core engine (ambiguity-code
    /// scoring is a format-specific concern left to the external
    /// sequence-reader).
    #[inline]
    pub fn score(&self, a: u8, b: u8) -> i8 {
        let ai = a.trailing_zeros() as usize;
        let bi = b.trailing_zeros() as usize;
        self.sub[ai * 4 + bi]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seq::four_bit;

    #[test]
    fn simple_scores_match_and_mismatch() {
        let matrix = ScoreMatrix::simple(2, -3, -5).unwrap();
        assert_eq!(matrix.score(four_bit::A, four_bit::A), 2);
        assert_eq!(matrix.score(four_bit::C, four_bit::C), 2);
        assert_eq!(matrix.score(four_bit::A, four_bit::G), -3);
    }

    #[test]
    fn new_rejects_underpenalised_gaps() {
        assert!(ScoreMatrix::new([0i8; 16], 0, 0, -1, -1).is_err());
        assert!(ScoreMatrix::new([0i8; 16], -1, -1, 0, 0).is_err());
    }

    #[test]
    fn new_accepts_boundary_case() {
        assert!(ScoreMatrix::new([0i8; 16], -1, 0, -1, 0).is_ok());
    }
}
