//! Parses the bit-packed [`Path`] into a [`Cigar`].
//!
//! The path alternates `10`/`01` pairs for a diagonal step (match or
//! mismatch; the two are indistinguishable without the original sequences)
//! and runs of a single repeated bit for a gap: a run of `1`s is an
//! insertion (down/A-only steps), a run of `0`s is a deletion
//! (right/B-only steps). Decoding is therefore two interleaved run-length
//! scans: a scan for maximal *alternating* stretches (emitted as `M`, one
//! run every two bits) and a scan for maximal *constant* stretches
//! (emitted as `I`/`D`).
//!
//! Both a forward (head-to-tail) and reverse (tail-to-head) scan order are
//! exposed, so a caller holding an un-spliced reverse-traceback path can
//! decode it directly without first reversing the bit array.

use banded_types::cigar::{Cigar, CigarOp, Path};

/// Walks `len` bits, addressed through `bit_at`, and calls `emit` once per
/// maximal run with the run's `(op, length)`. `bit_at(0)` is the first bit
/// visited; scan order (and therefore which physical bit is "first") is
/// entirely up to the caller's `bit_at`.
fn emit_runs(len: u32, bit_at: impl Fn(u32) -> bool, mut emit: impl FnMut(CigarOp, u32)) {
    let mut i = 0u32;
    while i < len {
        if i + 1 < len && bit_at(i) != bit_at(i + 1) {
            // Maximal alternating stretch starting at i.
            let mut j = i + 1;
            while j + 1 < len && bit_at(j + 1) != bit_at(j) {
                j += 1;
            }
            let run_len = j - i + 1;
            let pairs = run_len / 2;
            if pairs > 0 {
                emit(CigarOp::Match, pairs);
            }
            if run_len % 2 == 1 {
                // Odd tail bit didn't pair up; re-visit it as the start of
                // a constant run (guaranteed not to alternate with its
                // neighbour, since that's why the loop above stopped).
                i = j;
            } else {
                i = j + 1;
            }
        } else {
            let val = bit_at(i);
            let mut j = i;
            while j + 1 < len && bit_at(j + 1) == val {
                j += 1;
            }
            let run_len = j - i + 1;
            emit(if val { CigarOp::Ins } else { CigarOp::Del }, run_len);
            i = j + 1;
        }
    }
}

/// Decodes `path` into a [`Cigar`], scanning head-to-tail (the order
/// produced by `trace::ops_to_path`).
pub fn to_cigar(path: &Path) -> Cigar {
    let mut cigar = Cigar::default();
    emit_runs(path.len, |i| path.bit(i), |op, len| cigar.push(op, len));
    cigar
}

/// Decodes `path` scanning tail-to-head, as a caller holding a
/// reverse-traceback path (bits emitted from the located maximum back
/// toward the chain root, never re-reversed into forward order) would
/// want. The resulting [`Cigar`] reads in the same tail-to-head order.
pub fn to_cigar_reverse(path: &Path) -> Cigar {
    let mut cigar = Cigar::default();
    let len = path.len;
    emit_runs(
        len,
        |i| path.bit(len - 1 - i),
        |op, run_len| cigar.push(op, run_len),
    );
    cigar
}

/// Streams `path`'s decoded runs to an arbitrary sink instead of building a
/// [`Cigar`] — the "printf-callback" emitter variant, for a caller that
/// wants to print `<n><op>` runs directly without an intermediate
/// allocation.
pub fn write_cigar(path: &Path, mut sink: impl FnMut(CigarOp, u32)) {
    emit_runs(path.len, |i| path.bit(i), |op, len| sink(op, len));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::ops_to_path;

    fn cigar_ops(cigar: &Cigar) -> Vec<(CigarOp, u32)> {
        cigar.ops.iter().map(|e| (e.op, e.len)).collect()
    }

    #[test]
    fn decodes_pure_match_run() {
        let path = ops_to_path(&[CigarOp::Match; 6]);
        let cigar = to_cigar(&path);
        assert_eq!(cigar_ops(&cigar), vec![(CigarOp::Match, 6)]);
    }

    #[test]
    fn decodes_mixed_runs() {
        let ops = [
            CigarOp::Match,
            CigarOp::Match,
            CigarOp::Ins,
            CigarOp::Ins,
            CigarOp::Ins,
            CigarOp::Match,
        ];
        let path = ops_to_path(&ops);
        let cigar = to_cigar(&path);
        assert_eq!(
            cigar_ops(&cigar),
            vec![(CigarOp::Match, 2), (CigarOp::Ins, 3), (CigarOp::Match, 1)]
        );
    }

    #[test]
    fn decodes_leading_deletion_then_match_then_insertion() {
        let ops = [
            CigarOp::Del,
            CigarOp::Del,
            CigarOp::Match,
            CigarOp::Ins,
            CigarOp::Ins,
        ];
        let path = ops_to_path(&ops);
        let cigar = to_cigar(&path);
        assert_eq!(
            cigar_ops(&cigar),
            vec![(CigarOp::Del, 2), (CigarOp::Match, 1), (CigarOp::Ins, 2)]
        );
    }

    #[test]
    fn reverse_scan_reverses_pure_indel_run_order() {
        let ops = [
            CigarOp::Del,
            CigarOp::Del,
            CigarOp::Del,
            CigarOp::Ins,
            CigarOp::Ins,
        ];
        let path = ops_to_path(&ops);
        let forward = cigar_ops(&to_cigar(&path));
        let reverse = cigar_ops(&to_cigar_reverse(&path));
        assert_eq!(forward, vec![(CigarOp::Del, 3), (CigarOp::Ins, 2)]);
        assert_eq!(reverse, vec![(CigarOp::Ins, 2), (CigarOp::Del, 3)]);
    }

    #[test]
    fn write_cigar_streams_same_runs_as_to_cigar() {
        let ops = [
            CigarOp::Match,
            CigarOp::Match,
            CigarOp::Del,
            CigarOp::Match,
            CigarOp::Match,
            CigarOp::Match,
        ];
        let path = ops_to_path(&ops);
        let mut streamed = Vec::new();
        write_cigar(&path, |op, len| streamed.push((op, len)));
        assert_eq!(streamed, cigar_ops(&to_cigar(&path)));
    }

    #[test]
    fn empty_path_decodes_to_no_runs() {
        let path = ops_to_path(&[]);
        assert_eq!(path.len, 0);
        let cigar = to_cigar(&path);
        assert!(cigar.ops.is_empty());
    }

    #[test]
    fn single_match_decodes_as_one_base_match() {
        let path = ops_to_path(&[CigarOp::Match]);
        let cigar = to_cigar(&path);
        assert_eq!(cigar_ops(&cigar), vec![(CigarOp::Match, 1)]);
    }
}
