//! The chaining façade: owns one DP run's arena and score vectors, and
//! exposes the three public entry points a caller drives a chain through —
//! [`DpContext::fill_root`], [`DpContext::fill`], and [`DpContext::trace`].

use crate::arena::{Arena, ArenaId};
use crate::block::{Block, PhantomBlock};
use crate::constants::{BW, NEG_INF};
use crate::direction::DynamicOracle;
use crate::fill::{fill_block, FillMode};
use crate::max_localize::locate_max;
use crate::score_vectors::{MiddleDelta, ScoreVectors};
use crate::tail::JointTail;
use crate::trace;
use crate::window::{SeqWindow, SequenceView};
use banded_types::cigar::{AlignmentResult, CigarOp, PathSection};
use banded_types::config::{AlignParams, ClipParams};
use banded_types::error::AlignError;
use banded_types::seq::FetchDirection;
use banded_types::status::fill_status;
use std::cell::Cell;

/// One contiguous chunk of one input sequence, already decoded to 4-bit
/// base codes by an external sequence reader. `direction` selects whether
/// this context reads it forward or as its reverse complement — callers
/// doing bidirectional (meet-in-the-middle) alignment pass the same
/// underlying bytes to both a forward and a reverse-complement `Section`.
#[derive(Debug, Clone, Copy)]
pub struct Section<'a> {
    pub id: u32,
    pub bases: &'a [u8],
    pub direction: FetchDirection,
}

impl<'a> Section<'a> {
    pub fn forward(id: u32, bases: &'a [u8]) -> Self {
        Section {
            id,
            bases,
            direction: FetchDirection::Forward,
        }
    }

    pub fn reverse_complement(id: u32, bases: &'a [u8]) -> Self {
        Section {
            id,
            bases,
            direction: FetchDirection::ReverseComplement,
        }
    }

    pub fn len(&self) -> u32 {
        self.bases.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}

/// Running counters for one [`DpContext`]'s lifetime, logged at `flush` and
/// otherwise left for a caller to inspect directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stats {
    pub blocks_filled: u64,
    pub fragments_filled: u64,
    pub fill_time: std::time::Duration,
}

/// Owns the block arena, tail chain, and score vectors for one DP run.
///
/// Not safe to mutate from two threads at once: a caller running several
/// alignments concurrently constructs one `DpContext` per thread from the
/// same [`AlignParams`], matching the single-threaded-per-context
/// concurrency model this engine is built around.
pub struct DpContext {
    params: AlignParams,
    vectors: ScoreVectors,
    middle_delta: MiddleDelta,
    blocks: Arena<Block>,
    tails: Arena<JointTail>,
    last_error: Cell<Option<AlignError>>,
    stats: Stats,
}

impl DpContext {
    /// `dp_init`: derives score vectors and the middle-delta template from
    /// `params`, and allocates the first (empty) arena chunk.
    pub fn new(params: AlignParams) -> Result<Self, AlignError> {
        let vectors = ScoreVectors::build(&params.score_matrix)?;
        let middle_delta = MiddleDelta::build(&vectors);
        let mut blocks = Arena::new();
        blocks.mark_root();
        let mut tails = Arena::new();
        tails.mark_root();
        Ok(DpContext {
            params,
            vectors,
            middle_delta,
            blocks,
            tails,
            last_error: Cell::new(None),
            stats: Stats::default(),
        })
    }

    pub fn params(&self) -> &AlignParams {
        &self.params
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// The last error kind recorded by a public entry point on this
    /// context, per the accessor the error-handling design calls for.
    pub fn last_error(&self) -> Option<AlignError> {
        self.last_error.get()
    }

    /// The status bits `spec.md` §4.4 says fully describe which bounds a
    /// fill hit (`UPDATE_A`/`UPDATE_B`/`TERM`, plus the caller's own low
    /// byte). A chain orchestrator driving `fill`/`fill_root` in a loop
    /// reads this to decide whether to supply a new section or stop.
    pub fn tail_stat(&self, tail: ArenaId<JointTail>) -> u32 {
        self.tails.get(tail).stat
    }

    /// The maximum cell value seen anywhere from the chain root through
    /// this tail, inclusive (non-decreasing along the chain, per
    /// `spec.md` §8 invariant 2).
    pub fn tail_max(&self, tail: ArenaId<JointTail>) -> i64 {
        self.tails.get(tail).max
    }

    /// Total anti-diagonal steps filled since the chain root.
    pub fn tail_psum(&self, tail: ArenaId<JointTail>) -> i64 {
        self.tails.get(tail).psum
    }

    fn fail(&self, err: AlignError) -> AlignError {
        self.last_error.set(Some(err));
        err
    }

    /// Resets the arena to just past its last marked root, invalidating
    /// every `ArenaId` allocated since. Slabs already obtained are kept for
    /// reuse by the next chain.
    pub fn flush(&mut self) {
        self.blocks.flush();
        self.tails.flush();
        log::debug!(
            "dp_flush: {} fragments, {} blocks, {:?} spent filling",
            self.stats.fragments_filled,
            self.stats.blocks_filled,
            self.stats.fill_time,
        );
    }

    /// `dp_fill_root`: seeds a fresh chain at `(apos, bpos)` in the given
    /// sections.
    pub fn fill_root(
        &mut self,
        a: Section<'_>,
        apos: u32,
        b: Section<'_>,
        bpos: u32,
    ) -> ArenaId<JointTail> {
        let root = JointTail::root(a.id, b.id, a.len(), b.len());
        let root_id = self.tails.alloc(root);
        self.fill_fragment(root_id, a, apos, b, bpos)
    }

    /// `dp_fill`: extends an existing chain into a new section pair,
    /// starting at the head of each new section.
    pub fn fill(
        &mut self,
        prev: ArenaId<JointTail>,
        a: Section<'_>,
        b: Section<'_>,
    ) -> ArenaId<JointTail> {
        self.fill_fragment(prev, a, 0, b, 0)
    }

    fn fill_fragment(
        &mut self,
        prev_tail_id: ArenaId<JointTail>,
        a: Section<'_>,
        start_apos: u32,
        b: Section<'_>,
        start_bpos: u32,
    ) -> ArenaId<JointTail> {
        let prev = *self.tails.get(prev_tail_id);

        if a.is_empty() && b.is_empty() {
            let tail = JointTail {
                psum: prev.psum.max(0),
                p: 0,
                ssum: prev.ssum,
                max: prev.max,
                stat: fill_status::UPDATE_A | fill_status::UPDATE_B,
                rem_len: 0,
                prev_tail: Some(prev_tail_id),
                last_block: None,
                apos: start_apos,
                bpos: start_bpos,
                alen: a.len(),
                blen: b.len(),
                aid: a.id,
                bid: b.id,
            };
            return self.tails.alloc(tail);
        }

        let mut phantom = match prev.last_block {
            Some(id) => {
                let mut p = PhantomBlock::from_block(self.blocks.get(id));
                // Position counters are local to the section being filled;
                // only the band/gap state carries across a section
                // boundary.
                p.aridx = start_apos as i32;
                p.bridx = start_bpos as i32;
                p
            }
            None => {
                let mut band = [0i64; BW];
                band.copy_from_slice(&self.middle_delta.shape);
                PhantomBlock::root(band, start_apos as i32, start_bpos as i32, NEG_INF)
            }
        };

        let mut a_window = SeqWindow::new(
            SequenceView::new(a.bases, a.direction),
            start_apos as usize,
        );
        let mut b_window = SeqWindow::new(
            SequenceView::new(b.bases, b.direction),
            start_bpos as usize,
        );

        let mut running_max = prev.max;
        let mut psum = prev.psum.max(0);
        let mut p = 0i32;
        let mut last_block_id: Option<ArenaId<Block>> = None;
        let mut stat_acc = 0u32;

        loop {
            if a_window.remaining() == 0 && b_window.remaining() == 0 {
                stat_acc |= fill_status::UPDATE_A | fill_status::UPDATE_B;
                break;
            }
            let mode = if a_window.needs_cap() || b_window.needs_cap() {
                FillMode::Cap
            } else {
                FillMode::Bulk
            };
            let mut oracle = DynamicOracle::new();
            let xdrop_floor = running_max.saturating_sub(self.params.effective_xdrop() as i64);

            // Always drive the affine recurrence: with `gi == 0` its gap-open
            // cost collapses to the extend cost, reproducing linear-gap
            // scoring exactly, so one code path covers both regimes here.
            let outcome = fill_block(
                &phantom,
                &mut a_window,
                &mut b_window,
                &self.vectors,
                &self.middle_delta,
                &mut oracle,
                true,
                mode,
                xdrop_floor,
                last_block_id,
            );

            let filled = outcome.block.filled;
            let term = outcome.stat & fill_status::TERM != 0;
            let update_a = outcome.stat & fill_status::UPDATE_A != 0;
            let update_b = outcome.stat & fill_status::UPDATE_B != 0;

            if filled > 0 {
                running_max = running_max.max(outcome.block_max);
                psum += filled as i64;
                p += filled as i32;
                phantom = PhantomBlock::from_block(&outcome.block);
                last_block_id = Some(self.blocks.alloc(outcome.block));
            }

            if term {
                stat_acc |= fill_status::TERM;
                break;
            }
            if update_a || update_b {
                stat_acc |= outcome.stat;
                break;
            }
            if filled == 0 {
                // Neither a terminal bit nor forward progress: both windows
                // are exhausted of real bases without the earlier check
                // catching it (can only happen for a malformed section).
                stat_acc |= fill_status::UPDATE_A | fill_status::UPDATE_B;
                break;
            }
        }

        let tail = JointTail {
            psum,
            p,
            ssum: prev.ssum.wrapping_add(p as u32),
            max: running_max,
            stat: stat_acc,
            rem_len: 0,
            prev_tail: Some(prev_tail_id),
            last_block: last_block_id,
            apos: a_window.cursor() as u32,
            bpos: b_window.cursor() as u32,
            alen: a.len(),
            blen: b.len(),
            aid: a.id,
            bid: b.id,
        };
        self.tails.alloc(tail)
    }

    /// `dp_trace`: concludes a chain into an [`AlignmentResult`]. Either
    /// `fw_tail` or `rv_tail` may be omitted to request a one-sided trace;
    /// supplying both splices a bidirectional alignment that met in the
    /// middle, per the forward/reverse half-chain model.
    pub fn trace(
        &self,
        fw_tail: Option<ArenaId<JointTail>>,
        rv_tail: Option<ArenaId<JointTail>>,
        _clip: ClipParams,
    ) -> Result<AlignmentResult, AlignError> {
        let fw_half = fw_tail.map(|t| self.trace_half(t)).transpose()?;
        let rv_half = rv_tail.map(|t| self.trace_half(t)).transpose()?;

        let (score, ops, sections) = match (fw_half, rv_half) {
            (Some((fs, fops, fsecs)), Some((rs, rops, rsecs))) => {
                let mut ops = fops;
                let mut rv_ops = rops;
                rv_ops.reverse();
                ops.extend(rv_ops);

                let mut sections = fsecs;
                let fw_plen: u32 = sections.iter().map(|s| s.plen).sum();
                let mut rv_sections = rsecs;
                rv_sections.reverse();
                let mut ppos = fw_plen;
                for mut sec in rv_sections {
                    sec.ppos = ppos;
                    ppos += sec.plen;
                    sections.push(sec);
                }
                (fs + rs, ops, sections)
            }
            (Some(half), None) | (None, Some(half)) => half,
            (None, None) => {
                return Err(self.fail(AlignError::InvalidArgument(
                    "dp_trace requires at least one of fw_tail/rv_tail",
                )))
            }
        };

        let path = trace::ops_to_path(&ops);
        Ok(AlignmentResult {
            score,
            path,
            sections,
            qual: 0,
        })
    }

    #[allow(clippy::type_complexity)]
    fn trace_half(
        &self,
        tail_id: ArenaId<JointTail>,
    ) -> Result<(i64, Vec<CigarOp>, Vec<PathSection>), AlignError> {
        let tail = self.tails.get(tail_id);
        let score = tail.max;
        let loc = locate_max(&self.tails, &self.blocks, tail_id, score)
            .ok_or_else(|| self.fail(AlignError::OutOfBand))?;
        let (ops, sections) =
            trace::trace_one_sided(&self.tails, &self.blocks, loc).map_err(|e| self.fail(e))?;
        Ok((score, ops, sections))
    }
}
