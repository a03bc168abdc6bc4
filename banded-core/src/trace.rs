//! Traceback: bidirectional path reconstruction from a located maximum.
//!
//! Walks backward from a located maximum to the chain root, replaying the
//! per-lane mask pair recorded at every step to recover the exact sequence
//! of diagonal / horizontal-gap / vertical-gap moves, and the per-step
//! direction-word bit to correct the lane index across a step where the
//! band shifted. A "section push" happens once per traversed chain
//! fragment: crossing from a block with no predecessor block into the
//! previous `JointTail`'s fragment closes out one [`PathSection`].

use crate::arena::{Arena, ArenaId};
use crate::block::Block;
use crate::max_localize::MaxLocation;
use crate::tail::JointTail;
use banded_types::cigar::{Cigar, CigarOp, Path, PathSection};
use banded_types::error::AlignError;

struct SegmentMeta {
    aid: u32,
    apos: u32,
    alen: u32,
    bid: u32,
    bpos: u32,
    blen: u32,
    /// Range into the backward-order `ops` vector, `[start, end)`.
    range: (usize, usize),
}

/// Replays one fragment chain backward from `start` to the chain root
/// (the tail with `prev_tail == None`). Returns the alignment's ops in
/// forward (root-to-`start`) order plus one [`PathSection`] per traversed
/// fragment, also in forward order.
pub fn trace_one_sided(
    tails: &Arena<JointTail>,
    blocks: &Arena<Block>,
    start: MaxLocation,
) -> Result<(Vec<CigarOp>, Vec<PathSection>), AlignError> {
    let mut ops_backward: Vec<CigarOp> = Vec::new();
    let mut segments: Vec<SegmentMeta> = Vec::new();

    let mut cur_tail = start.tail;
    let mut cur_block = start.block;
    let mut cur_step = start.step;
    let mut cur_lane = start.lane;
    let mut segment_start = 0usize;

    loop {
        let block = blocks.get(cur_block);
        if cur_step >= block.filled as usize || cur_lane as usize >= crate::constants::BW {
            return Err(AlignError::OutOfBand);
        }
        let mask = block.masks_for_step(cur_step);
        let bit = 1u32 << cur_lane;
        let shift: i32 = if (block.dir_word >> cur_step) & 1 == 1 {
            0
        } else {
            1
        };

        let (op, next_lane, crosses_step) = if mask.h_mask & bit != 0 {
            // Horizontal-gap (E) path: predecessor is the same step, one
            // lane to the left. Consumes a B character only.
            if cur_lane == 0 {
                return Err(AlignError::OutOfBand);
            }
            (CigarOp::Del, cur_lane - 1, false)
        } else if mask.v_mask & bit != 0 {
            // Vertical-gap (F) path: predecessor is the previous step,
            // corrected for this step's band shift. Consumes an A
            // character only.
            let prev_lane = cur_lane as i32 + shift;
            if !(0..crate::constants::BW as i32).contains(&prev_lane) {
                return Err(AlignError::OutOfBand);
            }
            (CigarOp::Ins, prev_lane as u8, true)
        } else {
            // Diagonal: predecessor is the previous step, corrected for
            // shift and one lane left. Consumes one of each.
            let prev_lane = cur_lane as i32 - 1 + shift;
            if !(0..crate::constants::BW as i32).contains(&prev_lane) {
                return Err(AlignError::OutOfBand);
            }
            (CigarOp::Match, prev_lane as u8, true)
        };

        ops_backward.push(op);

        if !crosses_step || cur_step > 0 {
            if crosses_step {
                cur_step -= 1;
            }
            cur_lane = next_lane;
            continue;
        }

        // cur_step == 0 and the predecessor lives in the previous block.
        cur_lane = next_lane;
        if let Some(prev_block_id) = block.prev_block {
            let prev_block = blocks.get(prev_block_id);
            if prev_block.filled == 0 {
                return Err(AlignError::OutOfBand);
            }
            cur_block = prev_block_id;
            cur_step = prev_block.filled as usize - 1;
            continue;
        }

        // No predecessor block in this fragment: close out the current
        // fragment's section and cross into the previous tail.
        let tail = tails.get(cur_tail);
        segments.push(SegmentMeta {
            aid: tail.aid,
            apos: tail.apos,
            alen: tail.alen,
            bid: tail.bid,
            bpos: tail.bpos,
            blen: tail.blen,
            range: (segment_start, ops_backward.len()),
        });
        segment_start = ops_backward.len();

        match tail.prev_tail {
            None => break,
            Some(prev_tail_id) => {
                let prev_tail = tails.get(prev_tail_id);
                match prev_tail.last_block {
                    None => {
                        // Zero-length fragment with no cells of its own;
                        // keep walking up the chain.
                        cur_tail = prev_tail_id;
                        continue;
                    }
                    Some(prev_block_id) => {
                        let prev_block = blocks.get(prev_block_id);
                        if prev_block.filled == 0 {
                            return Err(AlignError::OutOfBand);
                        }
                        cur_tail = prev_tail_id;
                        cur_block = prev_block_id;
                        cur_step = prev_block.filled as usize - 1;
                    }
                }
            }
        }
    }

    // `ops_backward` holds ops newest-first; reverse for forward order.
    let total = ops_backward.len();
    let mut ops_forward = ops_backward;
    ops_forward.reverse();

    // `segments` was built newest-fragment-first; reverse for forward
    // chronological order and translate backward-order ranges into
    // forward bit positions.
    segments.reverse();
    let mut sections = Vec::with_capacity(segments.len());
    let mut ppos = 0u32;
    for seg in &segments {
        let (lo, hi) = seg.range;
        debug_assert!(lo <= hi && hi <= total);
        let plen: u32 = ops_forward[total - hi..total - lo]
            .iter()
            .map(op_bit_len)
            .sum();
        sections.push(PathSection {
            aid: seg.aid,
            apos: seg.apos,
            alen: seg.alen,
            bid: seg.bid,
            bpos: seg.bpos,
            blen: seg.blen,
            ppos,
            plen,
        });
        ppos += plen;
    }

    Ok((ops_forward, sections))
}

fn op_bit_len(op: &CigarOp) -> u32 {
    match op {
        CigarOp::Match => 2,
        CigarOp::Ins | CigarOp::Del => 1,
    }
}

/// Packs a forward-order op sequence into the bit-packed [`Path`] format:
/// `1` = down/insertion, `0` = right/deletion, a match emits one bit of
/// each so the path parser can recover it as an alternating run. See
/// `path_parser` for the decoder.
pub fn ops_to_path(ops: &[CigarOp]) -> Path {
    let mut bits: Vec<bool> = Vec::with_capacity(ops.len() * 2);
    for op in ops {
        match op {
            CigarOp::Ins => bits.push(true),
            CigarOp::Del => bits.push(false),
            CigarOp::Match => {
                let prev = bits.last().copied().unwrap_or(false);
                bits.push(!prev);
                bits.push(prev);
            }
        }
    }
    pack_bits(&bits)
}

fn pack_bits(bits: &[bool]) -> Path {
    let len = bits.len() as u32;
    let words = (bits.len() + 31) / 32;
    let mut array = vec![0u32; words.max(1)];
    for (i, &bit) in bits.iter().enumerate() {
        if bit {
            let word = i / 32;
            let bit_in_word = 31 - (i % 32);
            array[word] |= 1 << bit_in_word;
        }
    }
    Path {
        len,
        offset: 0,
        array,
    }
}

/// Convenience wrapper collapsing an op sequence straight into a [`Cigar`]
/// without going through the bit-packed format, for callers that only
/// need the run-length summary.
pub fn ops_to_cigar(ops: &[CigarOp]) -> Cigar {
    let mut cigar = Cigar::default();
    for op in ops {
        cigar.push(*op, 1);
    }
    cigar
}
