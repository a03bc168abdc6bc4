use crate::constants::{BLK, BW};
use banded_types::seq::{four_bit, FetchDirection};

/// A single input sequence as 4-bit base codes (`A=1,C=2,G=4,T=8`), with a
/// fetch direction. Sequences arrive already decoded to this representation
/// by an external sequence-reader; this type only applies the
/// reverse-complement transform.
#[derive(Debug, Clone)]
pub struct SequenceView<'a> {
    bases: &'a [u8],
    direction: FetchDirection,
}

impl<'a> SequenceView<'a> {
    pub fn new(bases: &'a [u8], direction: FetchDirection) -> Self {
        SequenceView { bases, direction }
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Fetches the base at `idx`, applying the reverse-complement transform
    /// when configured. Past the end of the real sequence, returns a
    /// sentinel base (`0`, which scores as mismatch against everything and
    /// can never be an ambiguity match) so a rolling window can always be
    /// filled `BW + BLK` bases deep even close to a sequence boundary.
    pub fn fetch(&self, idx: usize) -> u8 {
        if idx >= self.bases.len() {
            return 0;
        }
        let raw = match self.direction {
            FetchDirection::Forward => self.bases[idx],
            FetchDirection::ReverseComplement => {
                four_bit::complement(self.bases[self.bases.len() - 1 - idx])
            }
        };
        raw
    }
}

/// Rolling window of `BW + BLK` fetched bases ahead of a cursor, refetched
/// in bulk at block boundaries. A direct `SequenceView::fetch` is already
/// O(1), so this type's job is purely to keep the "look `BW+BLK` bases
/// ahead" contract explicit and cheap to re-check at each block boundary
/// rather than to cache anything a slice index wouldn't give for free.
#[derive(Debug, Clone)]
pub struct SeqWindow<'a> {
    view: SequenceView<'a>,
    cursor: usize,
}

impl<'a> SeqWindow<'a> {
    pub fn new(view: SequenceView<'a>, cursor: usize) -> Self {
        SeqWindow { view, cursor }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.view.len()
    }

    /// Number of real (non-sentinel) bases still ahead of the cursor.
    pub fn remaining(&self) -> usize {
        self.view.len().saturating_sub(self.cursor)
    }

    /// `true` when fewer than `BW + BLK` real bases remain, i.e. a bulk
    /// fill is no longer safe and the engine must fall back to cap mode.
    pub fn needs_cap(&self) -> bool {
        self.remaining() < BW + BLK
    }

    pub fn base_at(&self, offset: usize) -> u8 {
        self.view.fetch(self.cursor + offset)
    }

    pub fn advance(&mut self, n: usize) {
        self.cursor += n;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_fetch_returns_bases_in_order() {
        let bases = [four_bit::A, four_bit::C, four_bit::G, four_bit::T];
        let view = SequenceView::new(&bases, FetchDirection::Forward);
        assert_eq!(view.fetch(0), four_bit::A);
        assert_eq!(view.fetch(3), four_bit::T);
    }

    #[test]
    fn fetch_past_end_returns_sentinel() {
        let bases = [four_bit::A];
        let view = SequenceView::new(&bases, FetchDirection::Forward);
        assert_eq!(view.fetch(1), 0);
        assert_eq!(view.fetch(1000), 0);
    }

    #[test]
    fn reverse_complement_reads_from_the_tail_and_complements() {
        let bases = [four_bit::A, four_bit::C, four_bit::G, four_bit::T];
        let view = SequenceView::new(&bases, FetchDirection::ReverseComplement);
        // idx 0 maps to the last base (T), complemented to A.
        assert_eq!(view.fetch(0), four_bit::complement(four_bit::T));
        assert_eq!(view.fetch(0), four_bit::A);
        // idx 3 maps to the first base (A), complemented to T.
        assert_eq!(view.fetch(3), four_bit::complement(four_bit::A));
        assert_eq!(view.fetch(3), four_bit::T);
    }

    #[test]
    fn needs_cap_true_near_sequence_end() {
        let bases = vec![four_bit::A; BW + BLK - 1];
        let window = SeqWindow::new(SequenceView::new(&bases, FetchDirection::Forward), 0);
        assert!(window.needs_cap());
    }

    #[test]
    fn needs_cap_false_with_enough_remaining() {
        let bases = vec![four_bit::A; BW + BLK];
        let window = SeqWindow::new(SequenceView::new(&bases, FetchDirection::Forward), 0);
        assert!(!window.needs_cap());
    }

    #[test]
    fn advance_moves_cursor_and_remaining_shrinks() {
        let bases = vec![four_bit::A; 10];
        let mut window = SeqWindow::new(SequenceView::new(&bases, FetchDirection::Forward), 0);
        assert_eq!(window.remaining(), 10);
        window.advance(3);
        assert_eq!(window.cursor(), 3);
        assert_eq!(window.remaining(), 7);
        window.advance(7);
        assert_eq!(window.remaining(), 0);
    }

    #[test]
    fn base_at_is_relative_to_cursor() {
        let bases = [four_bit::A, four_bit::C, four_bit::G, four_bit::T];
        let mut window = SeqWindow::new(SequenceView::new(&bases, FetchDirection::Forward), 0);
        window.advance(2);
        assert_eq!(window.base_at(0), four_bit::G);
        assert_eq!(window.base_at(1), four_bit::T);
    }
}
