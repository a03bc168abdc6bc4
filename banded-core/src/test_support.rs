//! Test-only support: a naive cubic-time semi-global reference aligner and
//! ASCII<->4-bit conversion helpers, shared by the unit tests colocated in
//! each module and by the integration tests under `tests/`.

use banded_types::cigar::CigarOp;
use banded_types::score::ScoreMatrix;
use banded_types::seq::four_bit;

/// Encodes an ASCII `ACGT` string into the 4-bit codes the fill engine
/// expects (`A=1,C=2,G=4,T=8`).
pub fn encode(seq: &[u8]) -> Vec<u8> {
    seq.iter()
        .map(|&b| match b {
            b'A' | b'a' => four_bit::A,
            b'C' | b'c' => four_bit::C,
            b'G' | b'g' => four_bit::G,
            b'T' | b't' => four_bit::T,
            other => panic!("non-ACGT base {other}"),
        })
        .collect()
}

/// Naive O(|a|*|b|) reference matching `DpContext`'s actual scoring
/// regime: the alignment is anchored at `(0,0)` (row 0 / column 0 still
/// carry the usual affine run-of-gaps boundary, so neither sequence gets a
/// free *leading* end), but the *trailing* end of either sequence is free —
/// the score is the best value anywhere in the table, not forced into the
/// bottom-right corner. This is the fixed-start, X-drop-terminated
/// extension alignment the engine computes via block max-localization, not
/// plain global Needleman-Wunsch (which would return `dp[n][m]`).
pub fn naive_nw_score(a: &[u8], b: &[u8], matrix: &ScoreMatrix) -> i64 {
    let n = a.len();
    let m = b.len();
    // dp[i][0]: i characters of `a` consumed against none of `b`, i.e. a
    // run charged against B (vertical steps); dp[0][j] is the symmetric
    // run charged against A (horizontal steps).
    let mut dp = vec![vec![0i64; m + 1]; n + 1];
    for i in 1..=n {
        dp[i][0] = gap_cost_b(matrix, true) + gap_cost_b(matrix, false) * (i as i64 - 1);
    }
    for j in 1..=m {
        dp[0][j] = gap_cost_a(matrix, true) + gap_cost_a(matrix, false) * (j as i64 - 1);
    }
    for i in 1..=n {
        for j in 1..=m {
            let diag = dp[i - 1][j - 1] + matrix.score(a[i - 1], b[j - 1]) as i64;
            dp[i][j] = diag
                .max(naive_gap_a(&dp, i, j, matrix))
                .max(naive_gap_b(&dp, i, j, matrix));
        }
    }
    dp.iter().flatten().copied().max().unwrap_or(0)
}

/// Recomputes a `CigarOp` path's score directly from the two sequences and
/// the score matrix, independent of whatever internal offset/diff encoding
/// produced it (`spec.md` §8 invariant 3, "path <-> score correspondence").
/// The path may legitimately stop before consuming all of `a`/`b`: the
/// engine's fixed-start, free-trailing-end semantics means the optimal
/// endpoint isn't always the full corner, so callers that expect full
/// consumption should check that separately.
pub fn score_from_path(ops: &[CigarOp], a: &[u8], b: &[u8], matrix: &ScoreMatrix) -> i64 {
    let mut ai = 0usize;
    let mut bi = 0usize;
    let mut score = 0i64;
    let mut prev_was_a_gap = false;
    let mut prev_was_b_gap = false;
    for op in ops {
        match op {
            CigarOp::Match => {
                score += matrix.score(a[ai], b[bi]) as i64;
                ai += 1;
                bi += 1;
                prev_was_a_gap = false;
                prev_was_b_gap = false;
            }
            CigarOp::Ins => {
                score += if prev_was_a_gap {
                    matrix.ge_b as i64
                } else {
                    matrix.gi_b as i64 + matrix.ge_b as i64
                };
                ai += 1;
                prev_was_a_gap = true;
                prev_was_b_gap = false;
            }
            CigarOp::Del => {
                score += if prev_was_b_gap {
                    matrix.ge_a as i64
                } else {
                    matrix.gi_a as i64 + matrix.ge_a as i64
                };
                bi += 1;
                prev_was_b_gap = true;
                prev_was_a_gap = false;
            }
        }
    }
    score
}

fn gap_cost_a(matrix: &ScoreMatrix, opening: bool) -> i64 {
    if opening {
        matrix.gi_a as i64 + matrix.ge_a as i64
    } else {
        matrix.ge_a as i64
    }
}

fn gap_cost_b(matrix: &ScoreMatrix, opening: bool) -> i64 {
    if opening {
        matrix.gi_b as i64 + matrix.ge_b as i64
    } else {
        matrix.ge_b as i64
    }
}

/// Best score reaching `(i, j)` via a (possibly multi-step) gap in A,
/// i.e. consuming only B characters on the final run into this cell.
fn naive_gap_a(dp: &[Vec<i64>], i: usize, j: usize, matrix: &ScoreMatrix) -> i64 {
    let mut best = i64::MIN;
    let mut k = 1;
    while k <= j {
        let cost = gap_cost_a(matrix, true) + gap_cost_a(matrix, false) * (k as i64 - 1);
        best = best.max(dp[i][j - k] + cost);
        k += 1;
    }
    best
}

/// Symmetric counterpart: a run of A-only steps (gap in B) into `(i, j)`.
fn naive_gap_b(dp: &[Vec<i64>], i: usize, j: usize, matrix: &ScoreMatrix) -> i64 {
    let mut best = i64::MIN;
    let mut k = 1;
    while k <= i {
        let cost = gap_cost_b(matrix, true) + gap_cost_b(matrix, false) * (k as i64 - 1);
        best = best.max(dp[i - k][j] + cost);
        k += 1;
    }
    best
}

/// A small fixed corpus of hand-written sequence pairs spanning matches,
/// mismatches, and indels of varying length.
pub fn test_sequences() -> Vec<(&'static [u8], &'static [u8])> {
    vec![
        (b"A", b"A"),
        (b"ACGTACGTACGT", b"ACGTACGTACGT"),
        (b"GAAAAAAAA", b"AAAAAAAA"),
        (b"GACGTACGT", b"ACGTACGT"),
        (b"ACGTACGT", b"GACGTACGT"),
        (b"ACGTACGTGGCCAATT", b"ACGTCCGTGGCAATT"),
        (b"TTGGGTCAATCAGCCAGTTTTTA", b"TTTGAGTGGGTCATCACCGATTTTAT"),
    ]
}

/// Deterministically mutates `seq` with the given substitution and indel
/// rates, using a seeded RNG so the resulting corpus is reproducible.
pub fn mutate(seq: &[u8], sub_rate: f64, indel_rate: f64, seed: u64) -> Vec<u8> {
    use rand::{Rng, SeedableRng};
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
    let alphabet = [b'A', b'C', b'G', b'T'];
    let mut out = Vec::with_capacity(seq.len());
    for &base in seq {
        let r: f64 = rng.gen();
        if r < indel_rate / 2.0 {
            // Deletion: drop this base entirely.
            continue;
        } else if r < indel_rate {
            // Insertion: emit a random base before keeping the original.
            out.push(alphabet[rng.gen_range(0..4)]);
            out.push(base);
        } else if r < indel_rate + sub_rate {
            let mut sub = alphabet[rng.gen_range(0..4)];
            while sub == base {
                sub = alphabet[rng.gen_range(0..4)];
            }
            out.push(sub);
        } else {
            out.push(base);
        }
    }
    out
}
