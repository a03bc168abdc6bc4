use crate::arena::ArenaId;
use crate::block::Block;

/// Fixed-size record at the end of every fill fragment. `prev_tail` forms
/// a singly-linked chain of arena-owned nodes back to the root; no
/// reference counting or back-pointers are needed since traceback only
/// ever walks from newest to oldest.
#[derive(Debug, Clone, Copy)]
pub struct JointTail {
    /// Total anti-diagonal steps since the chain root.
    pub psum: i64,
    /// Steps taken in this fragment.
    pub p: i32,
    /// Running checksum of consumed bases (diagnostic only).
    pub ssum: u32,
    /// Maximum cell value ever seen from the chain root to this tail's
    /// last anti-diagonal, inclusive. Non-decreasing along the chain.
    pub max: i64,
    pub stat: u32,
    pub rem_len: u32,
    pub prev_tail: Option<ArenaId<JointTail>>,
    /// The block this tail's final band state lives in, if any was filled
    /// in this fragment (a zero-length-section fill may produce none).
    pub last_block: Option<ArenaId<Block>>,
    pub apos: u32,
    pub bpos: u32,
    pub alen: u32,
    pub blen: u32,
    pub aid: u32,
    pub bid: u32,
}

impl JointTail {
    pub fn root(aid: u32, bid: u32, alen: u32, blen: u32) -> Self {
        JointTail {
            psum: -1,
            p: 0,
            ssum: 0,
            max: i64::MIN,
            stat: 0,
            rem_len: 0,
            prev_tail: None,
            last_block: None,
            apos: 0,
            bpos: 0,
            alen,
            blen,
            aid,
            bid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_has_no_predecessor_and_sentinel_max() {
        let tail = JointTail::root(1, 2, 10, 20);
        assert!(tail.prev_tail.is_none());
        assert!(tail.last_block.is_none());
        assert_eq!(tail.max, i64::MIN);
        assert_eq!(tail.psum, -1);
        assert_eq!(tail.alen, 10);
        assert_eq!(tail.blen, 20);
        assert_eq!(tail.aid, 1);
        assert_eq!(tail.bid, 2);
    }
}
