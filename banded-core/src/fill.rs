//! The block fill engine: produces up to `BLK` consecutive anti-diagonal
//! vectors of packed diffs per block.
//!
//! Implemented as a row-major, adaptively-banded Gotoh recurrence: each of
//! the `BLK` steps in a block consumes exactly one character of sequence A
//! and computes a `BW`-wide band of `B`-offsets; the direction oracle
//! decides, once per step, whether the band's `B`-origin also advances by
//! one this step ("right") or holds ("down"). That single per-step choice
//! is the direction-word bit — it steers which absolute `(i, j)` window the
//! fixed-width band covers, and traceback uses it to correct lane indices
//! for the band's drift between steps. The *per-cell* operation (diagonal /
//! horizontal-gap / vertical-gap) is tracked independently for every lane,
//! every step, as a mask pair, and that per-lane record is what traceback
//! actually replays into a CIGAR.
//!
//! Step-direction convention used throughout this module: a step that
//! advances only the A index is "down" and charges the B-gap regime
//! (`gi_b`/`ge_b`, i.e. `ScoreVectors::gap_*_v`) to cells that chose the
//! vertical-gap path; a band shift that additionally advances the B
//! origin is "right" and its in-band horizontal-gap path charges the
//! A-gap regime (`gi_a`/`ge_a`, `ScoreVectors::gap_*_h`).

use crate::arena::ArenaId;
use crate::block::{Block, DiffVector, PhantomBlock, SmallDelta, StepMask};
use crate::constants::{BLK, BW, NEG_INF};
use crate::direction::{Direction, DirectionOracle};
use crate::score_vectors::{MiddleDelta, ScoreVectors};
use crate::window::SeqWindow;
use banded_types::status::fill_status;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    /// No per-step section bound check; caller has already verified both
    /// windows have `>= BW + BLK` real bases remaining.
    Bulk,
    /// Per-step section bound check; may truncate the block short.
    Cap,
}

/// Result of filling one block.
pub struct FillOutcome {
    pub block: Block,
    pub stat: u32,
    /// Score of the centre lane at block-end, used to drive the X-drop
    /// check on the *next* block.
    pub centre_score: i64,
    /// Best score seen anywhere in this block, across every lane and step.
    pub block_max: i64,
}

#[allow(clippy::too_many_arguments)]
pub fn fill_block(
    phantom: &PhantomBlock,
    a_window: &mut SeqWindow,
    b_window: &mut SeqWindow,
    vectors: &ScoreVectors,
    middle_delta: &MiddleDelta,
    oracle: &mut dyn DirectionOracle,
    affine: bool,
    mode: FillMode,
    xdrop_floor: i64,
    prev_block: Option<ArenaId<Block>>,
) -> FillOutcome {
    let mut h_row = phantom.band;
    let mut e_row = phantom.e_band;
    let mut f_row = phantom.f_band;
    let mut aridx = phantom.aridx;
    let mut bridx = phantom.bridx;

    let mut masks = Vec::with_capacity(BLK);
    let mut step_best = Vec::with_capacity(BLK);
    let mut dir_word: u32 = 0;
    let mut ch = [0u8; BW];
    let mut filled: u8 = 0;
    let mut stat = 0u32;
    let mut centre_score = h_row[BW / 2];

    for step in 0..BLK {
        if mode == FillMode::Cap && a_window.remaining() == 0 {
            stat |= fill_status::UPDATE_A;
            break;
        }

        let shift = match oracle.decide(h_row[0], h_row[BW - 1]) {
            Direction::Down => 0i64,
            Direction::Right => 1i64,
        };

        if mode == FillMode::Cap && shift == 1 && b_window.remaining() == 0 {
            // Can't bring a new real B base into the band; fall back to
            // holding the band instead of manufacturing a sentinel step.
            stat |= fill_status::UPDATE_B;
            break;
        }

        let a_char = a_window.base_at(0);

        let mut new_h = [NEG_INF; BW];
        let mut new_e = [NEG_INF; BW];
        let mut new_f = [NEG_INF; BW];
        let mut step_mask = StepMask::default();

        for r in 0..BW {
            // Column entering lane `r` of the new row, expressed as an
            // offset from the window's current (pre-advance) cursor: the
            // new row's lane `r` sits at absolute column `shift + r`, and
            // the base consumed to reach it is one to the left of that.
            let j = shift + r as i64 - 1;
            let b_char = b_window.base_at(j.max(0) as usize);

            let diag_src = r as i64 - 1 + shift;
            let diag = if (0..BW as i64).contains(&diag_src) {
                h_row[diag_src as usize] + vectors.sub(a_char, b_char)
            } else {
                NEG_INF
            };

            // E: gap charged to A, extends within this row (same step).
            let (h_prev_same_row, e_prev_same_row) = if r == 0 {
                (NEG_INF, NEG_INF)
            } else {
                (new_h[r - 1], new_e[r - 1])
            };
            let e_val = (h_prev_same_row + vectors.gap_open_h())
                .max(e_prev_same_row + vectors.gap_extend_h());

            // F: gap charged to B, carried from the previous row.
            let f_src = r as i64 + shift;
            let (h_prev_row, f_prev_row) = if (0..BW as i64).contains(&f_src) {
                (h_row[f_src as usize], f_row[f_src as usize])
            } else {
                (NEG_INF, NEG_INF)
            };
            let f_val =
                (h_prev_row + vectors.gap_open_v()).max(f_prev_row + vectors.gap_extend_v());

            let (e_val, f_val) = if affine {
                (e_val, f_val)
            } else {
                // Linear mode: a single extend-only cost, no separate open.
                let e_lin = h_prev_same_row + vectors.gap_extend_h();
                let f_lin = h_prev_row + vectors.gap_extend_v();
                (e_lin, f_lin)
            };

            let best = diag.max(e_val).max(f_val);
            if best == e_val && best != diag {
                step_mask.h_mask |= 1 << r;
            } else if best == f_val && best != diag {
                step_mask.v_mask |= 1 << r;
            }

            new_h[r] = best;
            new_e[r] = e_val;
            new_f[r] = f_val;

            if r == BW / 2 {
                ch[r] = a_char | (b_char << 4);
            }
        }

        h_row = new_h;
        e_row = new_e;
        f_row = new_f;
        masks.push(step_mask);
        if shift == 0 {
            dir_word |= 1 << step;
        }
        filled += 1;
        aridx += 1;
        bridx += shift as i32;
        a_window.advance(1);
        if shift == 1 {
            b_window.advance(1);
        }

        let mut best_lane = 0u8;
        let mut best_score = h_row[0];
        for (lane, &score) in h_row.iter().enumerate() {
            if score > best_score {
                best_score = score;
                best_lane = lane as u8;
            }
        }
        step_best.push((best_score, best_lane));

        centre_score = h_row[BW / 2];
        if centre_score < xdrop_floor {
            stat |= fill_status::TERM;
            break;
        }
    }

    let center = BW / 2;
    let mut raw = [0i64; BW];
    for q in 0..BW {
        raw[q] = h_row[q] - middle_delta.shape[q];
    }
    let offset = raw[center];
    let mut diff = DiffVector::default();
    let mut sd = SmallDelta::default();
    for q in 0..BW {
        let d = raw[q] - offset;
        debug_assert!(
            d >= i8::MIN as i64 && d <= i8::MAX as i64,
            "block diff exceeds i8 range; score matrix magnitude too large for this band width"
        );
        sd.delta[q] = d as i8;
        diff.dh[q] = (h_row[q] - e_row[q]).clamp(i8::MIN as i64, i8::MAX as i64) as i8;
        diff.dv[q] = (h_row[q] - f_row[q]).clamp(i8::MIN as i64, i8::MAX as i64) as i8;
        sd.max[q] = sd.delta[q].max(sd.max[q]);
    }

    let block_max = step_best.iter().map(|&(s, _)| s).max().unwrap_or(NEG_INF);

    let block = Block {
        masks,
        step_best,
        dir_word,
        filled,
        diff,
        sd,
        offset,
        aridx,
        bridx,
        ch,
        band: h_row,
        e_band: e_row,
        f_band: f_row,
        prev_block,
    };

    FillOutcome {
        block,
        stat,
        centre_score,
        block_max,
    }
}
