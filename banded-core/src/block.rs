use crate::arena::ArenaId;
use crate::constants::BW;

/// Diagonal-relative diff encoding for one block-end band: `dh[q] = S[i,j]
/// - S[i-1,j]`, `dv[q]` symmetric. Kept alongside the absolute `band` array
/// in [`Block`] for structural fidelity with the packed on-disk form; the
/// engine itself carries on with `band` rather than re-deriving scores from
/// these on every step.
#[derive(Debug, Clone, Copy)]
pub struct DiffVector {
    pub dh: [i8; BW],
    pub dv: [i8; BW],
}

impl Default for DiffVector {
    fn default() -> Self {
        DiffVector {
            dh: [0; BW],
            dv: [0; BW],
        }
    }
}

/// Per-block small delta + running max: `delta[q]` is the signed offset
/// from the block's `offset` to the absolute score at lane `q`; `max[q]`
/// is the largest `delta` seen at lane `q` across the block.
#[derive(Debug, Clone, Copy)]
pub struct SmallDelta {
    pub delta: [i8; BW],
    pub max: [i8; BW],
}

impl Default for SmallDelta {
    fn default() -> Self {
        SmallDelta {
            delta: [0; BW],
            max: [i8::MIN; BW],
        }
    }
}

/// Bitmask pair recorded for one intra-block step. Bit `q` of `h_mask` set
/// means lane `q` took the
/// horizontal-gap path into its updated cell this step; `v_mask`
/// symmetric for the vertical-gap path. Neither bit set means a diagonal
/// (match/mismatch) step.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepMask {
    pub h_mask: u32,
    pub v_mask: u32,
}

/// A filled block: `BLK` anti-diagonal steps, their per-step masks, and the
/// block-end band state in both absolute and diff-encoded form.
///
/// `filled` is `< BLK` only for a capped (section-bounded) block; entries
/// at indices `>= filled` in `masks`/`ch` are unused.
#[derive(Debug, Clone)]
pub struct Block {
    pub masks: Vec<StepMask>,
    /// `(best score, lane)` across the whole band at each step, used by
    /// max localization to pinpoint where a new overall maximum was first
    /// reached without needing to re-fill the block.
    pub step_best: Vec<(i64, u8)>,
    pub dir_word: u32,
    pub filled: u8,
    pub diff: DiffVector,
    pub sd: SmallDelta,
    pub offset: i64,
    pub aridx: i32,
    pub bridx: i32,
    /// Byte `q`: `(a_nibble | b_nibble << 4)` of the two characters that
    /// met at band offset `q` at block-end.
    pub ch: [u8; BW],
    /// Authoritative absolute score at each lane at block-end. Kept
    /// alongside the diff encoding so the engine never needs to reverse
    /// the (potentially lossy, see `offset`) 8-bit encoding to keep
    /// computing.
    pub band: [i64; BW],
    /// Affine gap-state bands (E = open gap charged to A, F = open gap
    /// charged to B). Unused and left at their default in linear mode.
    pub e_band: [i64; BW],
    pub f_band: [i64; BW],
    /// Predecessor block within the same fill fragment, or `None` if this
    /// is the fragment's first block (in which case traceback continues
    /// into the predecessor tail's fragment instead).
    pub prev_block: Option<ArenaId<Block>>,
}

impl Block {
    pub fn masks_for_step(&self, step: usize) -> StepMask {
        self.masks[step]
    }
}

/// A synthetic leading block carrying state from a previous tail into a
/// fresh fill. Same shape as [`Block`] minus the per-step mask array.
#[derive(Debug, Clone)]
pub struct PhantomBlock {
    pub dir_word: u32,
    pub diff: DiffVector,
    pub sd: SmallDelta,
    pub offset: i64,
    pub aridx: i32,
    pub bridx: i32,
    pub ch: [u8; BW],
    pub band: [i64; BW],
    pub e_band: [i64; BW],
    pub f_band: [i64; BW],
}

impl PhantomBlock {
    /// The phantom block seeded at a chain root: direction word
    /// `0x8000_0000` means "came from above" for the first real step.
    pub fn root(band: [i64; BW], aridx: i32, bridx: i32, neg_inf: i64) -> Self {
        PhantomBlock {
            dir_word: 0x8000_0000,
            diff: DiffVector::default(),
            sd: SmallDelta::default(),
            offset: 0,
            aridx,
            bridx,
            ch: [0; BW],
            band,
            e_band: [neg_inf; BW],
            f_band: [neg_inf; BW],
        }
    }

    pub fn from_block(block: &Block) -> Self {
        PhantomBlock {
            dir_word: block.dir_word,
            diff: block.diff,
            sd: block.sd,
            offset: block.offset,
            aridx: block.aridx,
            bridx: block.bridx,
            ch: block.ch,
            band: block.band,
            e_band: block.e_band,
            f_band: block.f_band,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NEG_INF;

    #[test]
    fn small_delta_default_has_sentinel_max() {
        let sd = SmallDelta::default();
        assert_eq!(sd.delta, [0; BW]);
        assert_eq!(sd.max, [i8::MIN; BW]);
    }

    #[test]
    fn diff_vector_default_is_zeroed() {
        let diff = DiffVector::default();
        assert_eq!(diff.dh, [0; BW]);
        assert_eq!(diff.dv, [0; BW]);
    }

    #[test]
    fn step_mask_default_has_no_bits_set() {
        let mask = StepMask::default();
        assert_eq!(mask.h_mask, 0);
        assert_eq!(mask.v_mask, 0);
    }

    #[test]
    fn phantom_root_carries_the_given_band_and_position() {
        let band = [5i64; BW];
        let phantom = PhantomBlock::root(band, 3, 7, NEG_INF);
        assert_eq!(phantom.band, band);
        assert_eq!(phantom.aridx, 3);
        assert_eq!(phantom.bridx, 7);
        assert_eq!(phantom.e_band, [NEG_INF; BW]);
        assert_eq!(phantom.f_band, [NEG_INF; BW]);
        assert_eq!(phantom.dir_word, 0x8000_0000);
    }

    #[test]
    fn phantom_from_block_copies_block_end_state() {
        let block = Block {
            masks: vec![StepMask::default()],
            step_best: vec![(42, 5)],
            dir_word: 0b101,
            filled: 1,
            diff: DiffVector::default(),
            sd: SmallDelta::default(),
            offset: 11,
            aridx: 9,
            bridx: 4,
            ch: [1; BW],
            band: [2i64; BW],
            e_band: [3i64; BW],
            f_band: [4i64; BW],
            prev_block: None,
        };
        let phantom = PhantomBlock::from_block(&block);
        assert_eq!(phantom.dir_word, block.dir_word);
        assert_eq!(phantom.offset, block.offset);
        assert_eq!(phantom.aridx, block.aridx);
        assert_eq!(phantom.bridx, block.bridx);
        assert_eq!(phantom.ch, block.ch);
        assert_eq!(phantom.band, block.band);
        assert_eq!(phantom.e_band, block.e_band);
        assert_eq!(phantom.f_band, block.f_band);
    }

    #[test]
    fn masks_for_step_indexes_directly() {
        let mut masks = vec![StepMask::default(); 3];
        masks[1].h_mask = 0xff;
        let block = Block {
            masks,
            step_best: vec![(0, 0); 3],
            dir_word: 0,
            filled: 3,
            diff: DiffVector::default(),
            sd: SmallDelta::default(),
            offset: 0,
            aridx: 0,
            bridx: 0,
            ch: [0; BW],
            band: [0; BW],
            e_band: [0; BW],
            f_band: [0; BW],
            prev_block: None,
        };
        assert_eq!(block.masks_for_step(1).h_mask, 0xff);
    }
}
