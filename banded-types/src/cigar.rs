use serde::{Deserialize, Serialize};
use std::fmt;

/// One CIGAR operator. The path parser never distinguishes match from
/// mismatch (that needs the original sequences), so both collapse to
/// `Match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CigarOp {
    Match,
    Ins,
    Del,
}

impl fmt::Display for CigarOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            CigarOp::Match => 'M',
            CigarOp::Ins => 'I',
            CigarOp::Del => 'D',
        };
        write!(f, "{c}")
    }
}

/// A single run in a CIGAR string, e.g. `24M`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CigarElem {
    pub op: CigarOp,
    pub len: u32,
}

/// A full CIGAR string as a sequence of runs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cigar {
    pub ops: Vec<CigarElem>,
}

impl Cigar {
    pub fn push(&mut self, op: CigarOp, len: u32) {
        if len == 0 {
            return;
        }
        if let Some(last) = self.ops.last_mut() {
            if last.op == op {
                last.len += len;
                return;
            }
        }
        self.ops.push(CigarElem { op, len });
    }

    /// Total path length (anti-diagonal steps) this CIGAR covers.
    pub fn path_len(&self) -> u64 {
        self.ops.iter().map(|e| e.len as u64).sum()
    }
}

impl fmt::Display for Cigar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for elem in &self.ops {
            write!(f, "{}{}", elem.len, elem.op)?;
        }
        Ok(())
    }
}


/// Bit-packed path: `{len; offset; array}`, MSB-first within each `u32`,
/// `1` = down (insertion on B), `0` = right (deletion on B). `offset`
/// counts leading ignored bits in `array[0]` so partial words can be
/// spliced without reallocation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Path {
    pub len: u32,
    pub offset: u32,
    pub array: Vec<u32>,
}

impl Path {
    pub fn bit(&self, index: u32) -> bool {
        debug_assert!(index < self.len);
        let global = self.offset as u64 + index as u64;
        let word = (global / 32) as usize;
        let bit_in_word = 31 - (global % 32) as u32;
        (self.array[word] >> bit_in_word) & 1 == 1
    }
}

/// Per-section record, monotonic in `ppos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSection {
    pub aid: u32,
    pub apos: u32,
    pub alen: u32,
    pub bid: u32,
    pub bpos: u32,
    pub blen: u32,
    pub ppos: u32,
    pub plen: u32,
}

/// `{score, path, sections, qual}` result of a completed trace.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AlignmentResult {
    pub score: i64,
    pub path: Path,
    pub sections: Vec<PathSection>,
    /// Reserved for a future quality metric; always `0` today (no quality
    /// model is specified).
    pub qual: u32,
}
