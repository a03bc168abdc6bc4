use crate::constants::BW;
use banded_types::error::AlignError;
use banded_types::score::ScoreMatrix;

/// SIMD-broadcast-shaped score vectors derived once per context from a
/// user score matrix.
///
/// `sb` is the substitution table itself (already in the broadcast-ready
/// 4x4 layout `ScoreMatrix` uses). `adjh`/`ofsh` are the affine gap-open and
/// gap-extend costs for a horizontal step (a gap charged against sequence
/// A — see the step-direction convention documented on `fill::fill_block`);
/// `adjv`/`ofsv` are the same for a vertical step (gap charged against B).
#[derive(Debug, Clone, Copy)]
pub struct ScoreVectors {
    pub sb: [i8; 16],
    pub adjh: i8,
    pub ofsh: i8,
    pub adjv: i8,
    pub ofsv: i8,
    /// Lowest entry in `sb`, used as a guaranteed-mismatch score when
    /// either base is the sequence window's past-the-end sentinel (`0`),
    /// which has no slot of its own in the 4x4 table.
    worst_mismatch: i8,
}

impl ScoreVectors {
    pub fn build(matrix: &ScoreMatrix) -> Result<Self, AlignError> {
        Ok(ScoreVectors {
            sb: matrix.sub,
            adjh: matrix.gi_a,
            ofsh: matrix.ge_a,
            adjv: matrix.gi_b,
            ofsv: matrix.ge_b,
            worst_mismatch: matrix.sub.iter().copied().min().unwrap_or(i8::MIN),
        })
    }

    /// Score of aligning 4-bit base `a` against `b`. Either may be the
    /// sequence window's past-the-end sentinel (`0`): its
    /// `trailing_zeros()` is `8`, which would index `sb` out of bounds, so
    /// that case is special-cased to a guaranteed mismatch instead.
    #[inline]
    pub fn sub(&self, a: u8, b: u8) -> i64 {
        let ai = a.trailing_zeros();
        let bi = b.trailing_zeros();
        if ai >= 4 || bi >= 4 {
            return self.worst_mismatch as i64;
        }
        self.sb[ai as usize * 4 + bi as usize] as i64
    }

    /// Cost of the first character of a new horizontal (A-side) gap.
    #[inline]
    pub fn gap_open_h(&self) -> i64 {
        self.adjh as i64 + self.ofsh as i64
    }

    /// Cost of extending an already-open horizontal gap by one character.
    #[inline]
    pub fn gap_extend_h(&self) -> i64 {
        self.ofsh as i64
    }

    #[inline]
    pub fn gap_open_v(&self) -> i64 {
        self.adjv as i64 + self.ofsv as i64
    }

    #[inline]
    pub fn gap_extend_v(&self) -> i64 {
        self.ofsv as i64
    }
}

/// The initial band at a chain root: the literal Needleman-Wunsch first
/// row, `dp[0][j]` for `j = 0..BW`. A chain root's lane `r` always
/// addresses column `r` directly (see `fill::fill_block`), so lane 0 (no
/// `B` consumed) is the true alignment origin and must carry score `0`;
/// every lane after it is the usual affine run of gaps charged against `A`
/// (consuming only `B`). Shared read-only across every context built from
/// the same `ScoreVectors`.
#[derive(Debug, Clone)]
pub struct MiddleDelta {
    pub shape: [i64; BW],
}

impl MiddleDelta {
    pub fn build(vectors: &ScoreVectors) -> Self {
        let mut shape = [0i64; BW];
        for q in 1..BW {
            shape[q] = vectors.gap_open_h() + (q as i64 - 1) * vectors.gap_extend_h();
        }
        MiddleDelta { shape }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use banded_types::seq::four_bit;

    #[test]
    fn build_copies_matrix_fields() {
        let matrix = ScoreMatrix::simple(2, -3, -5).unwrap();
        let vectors = ScoreVectors::build(&matrix).unwrap();
        assert_eq!(vectors.sb, matrix.sub);
        assert_eq!(vectors.adjh, matrix.gi_a);
        assert_eq!(vectors.ofsh, matrix.ge_a);
        assert_eq!(vectors.adjv, matrix.gi_b);
        assert_eq!(vectors.ofsv, matrix.ge_b);
    }

    #[test]
    fn sub_matches_score_matrix_lookup() {
        let matrix = ScoreMatrix::simple(2, -3, -5).unwrap();
        let vectors = ScoreVectors::build(&matrix).unwrap();
        assert_eq!(vectors.sub(four_bit::A, four_bit::A), 2);
        assert_eq!(vectors.sub(four_bit::A, four_bit::C), -3);
        assert_eq!(vectors.sub(four_bit::G, four_bit::T), -3);
    }

    #[test]
    fn linear_gap_has_equal_open_and_extend_cost() {
        // `simple()` wires gi=0, ge=gap, so opening and extending both cost
        // exactly one gap step.
        let matrix = ScoreMatrix::simple(2, -3, -5).unwrap();
        let vectors = ScoreVectors::build(&matrix).unwrap();
        assert_eq!(vectors.gap_open_h(), -5);
        assert_eq!(vectors.gap_extend_h(), -5);
        assert_eq!(vectors.gap_open_v(), -5);
        assert_eq!(vectors.gap_extend_v(), -5);
    }

    #[test]
    fn affine_gap_open_costs_more_than_extend() {
        let matrix = ScoreMatrix::new([0i8; 16], -4, -1, -4, -1).unwrap();
        let vectors = ScoreVectors::build(&matrix).unwrap();
        assert_eq!(vectors.gap_open_h(), -5);
        assert_eq!(vectors.gap_extend_h(), -1);
    }

    #[test]
    fn middle_delta_is_the_nw_first_row_boundary() {
        let matrix = ScoreMatrix::simple(2, -3, -5).unwrap();
        let vectors = ScoreVectors::build(&matrix).unwrap();
        let delta = MiddleDelta::build(&vectors);
        assert_eq!(delta.shape[0], 0);
        for q in 1..BW {
            let expected = vectors.gap_open_h() + (q as i64 - 1) * vectors.gap_extend_h();
            assert_eq!(delta.shape[q], expected);
        }
    }

    #[test]
    fn sub_treats_sentinel_base_as_guaranteed_mismatch() {
        let matrix = ScoreMatrix::simple(2, -3, -5).unwrap();
        let vectors = ScoreVectors::build(&matrix).unwrap();
        let worst = *matrix.sub.iter().min().unwrap() as i64;
        assert_eq!(vectors.sub(four_bit::G, 0), worst);
        assert_eq!(vectors.sub(0, four_bit::T), worst);
        assert_eq!(vectors.sub(0, 0), worst);
    }
}
