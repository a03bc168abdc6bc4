//! Max localization: pinpoints the block/step/lane where the chain's
//! overall maximum score was first reached.
//!
//! A from-scratch re-fill-and-intersect pass only exists to recover a
//! maximum's location when nothing but the block-end band was kept in
//! memory. Every stored [`Block`] here already carries a `step_best`
//! record (best score and lane per step, see `fill::fill_block`), so
//! localization is a direct backward scan instead.

use crate::arena::{Arena, ArenaId};
use crate::block::Block;
use crate::tail::JointTail;

/// Absolute location of the overall maximum within a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxLocation {
    pub tail: ArenaId<JointTail>,
    pub block: ArenaId<Block>,
    /// Index of the step within that block (`0..block.filled`).
    pub step: usize,
    /// Band lane at which the maximum occurred.
    pub lane: u8,
    pub score: i64,
}

/// Walks the tail chain backward from `from` looking for the block/step/
/// lane that first produced `target`. Returns `None` if no stored block
/// ever reached it (e.g. `target` came from before the chain root).
pub fn locate_max(
    tails: &Arena<JointTail>,
    blocks: &Arena<Block>,
    from: ArenaId<JointTail>,
    target: i64,
) -> Option<MaxLocation> {
    let mut cursor = Some(from);
    while let Some(tail_id) = cursor {
        let tail = tails.get(tail_id);
        if let Some(block_id) = tail.last_block {
            let block = blocks.get(block_id);
            for step in (0..block.filled as usize).rev() {
                let (score, lane) = block.step_best[step];
                if score == target {
                    return Some(MaxLocation {
                        tail: tail_id,
                        block: block_id,
                        step,
                        lane,
                        score,
                    });
                }
            }
        }
        cursor = tail.prev_tail;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{DiffVector, SmallDelta, StepMask};
    use crate::constants::BW;

    fn dummy_block(filled: u8, step_best: Vec<(i64, u8)>) -> Block {
        Block {
            masks: vec![StepMask::default(); filled as usize],
            step_best,
            dir_word: 0,
            filled,
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
        }
    }

    #[test]
    fn finds_max_in_most_recent_block() {
        let mut blocks: Arena<Block> = Arena::new();
        let mut tails: Arena<JointTail> = Arena::new();

        let block_id = blocks.alloc(dummy_block(3, vec![(1, 0), (9, 4), (5, 2)]));
        let mut tail = JointTail::root(0, 0, 10, 10);
        tail.last_block = Some(block_id);
        tail.max = 9;
        let tail_id = tails.alloc(tail);

        let loc = locate_max(&tails, &blocks, tail_id, 9).unwrap();
        assert_eq!(loc.step, 1);
        assert_eq!(loc.lane, 4);
        assert_eq!(loc.score, 9);
    }

    #[test]
    fn walks_back_through_tail_chain_when_not_in_latest_block() {
        let mut blocks: Arena<Block> = Arena::new();
        let mut tails: Arena<JointTail> = Arena::new();

        let root_block = blocks.alloc(dummy_block(2, vec![(3, 0), (7, 1)]));
        let mut root_tail = JointTail::root(0, 0, 10, 10);
        root_tail.last_block = Some(root_block);
        root_tail.max = 7;
        let root_id = tails.alloc(root_tail);

        let next_block = blocks.alloc(dummy_block(2, vec![(2, 0), (4, 1)]));
        let mut next_tail = JointTail::root(0, 0, 10, 10);
        next_tail.prev_tail = Some(root_id);
        next_tail.last_block = Some(next_block);
        next_tail.max = 7;
        let next_id = tails.alloc(next_tail);

        let loc = locate_max(&tails, &blocks, next_id, 7).unwrap();
        assert_eq!(loc.tail, root_id);
        assert_eq!(loc.block, root_block);
        assert_eq!(loc.step, 1);
    }

    #[test]
    fn returns_none_when_target_never_reached() {
        let mut blocks: Arena<Block> = Arena::new();
        let mut tails: Arena<JointTail> = Arena::new();

        let block_id = blocks.alloc(dummy_block(1, vec![(3, 0)]));
        let mut tail = JointTail::root(0, 0, 10, 10);
        tail.last_block = Some(block_id);
        let tail_id = tails.alloc(tail);

        assert!(locate_max(&tails, &blocks, tail_id, 99).is_none());
    }

    #[test]
    fn skips_tails_with_no_block() {
        let mut blocks: Arena<Block> = Arena::new();
        let mut tails: Arena<JointTail> = Arena::new();

        let root_block = blocks.alloc(dummy_block(1, vec![(5, 3)]));
        let mut root_tail = JointTail::root(0, 0, 10, 10);
        root_tail.last_block = Some(root_block);
        let root_id = tails.alloc(root_tail);

        // A zero-length-section fragment produces a tail with no block.
        let mut empty_tail = JointTail::root(1, 1, 0, 0);
        empty_tail.prev_tail = Some(root_id);
        empty_tail.last_block = None;
        let empty_id = tails.alloc(empty_tail);

        let loc = locate_max(&tails, &blocks, empty_id, 5).unwrap();
        assert_eq!(loc.block, root_block);
        assert_eq!(loc.lane, 3);
    }
}
