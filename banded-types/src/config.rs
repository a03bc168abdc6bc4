use crate::score::ScoreMatrix;
use crate::seq::{SeqDirection, SeqFormat};
use clap::Parser;
use serde::{Deserialize, Serialize};

/// Selects the direction-oracle variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum BandType {
    Dynamic,
    Guided,
}

impl Default for BandType {
    fn default() -> Self {
        BandType::Dynamic
    }
}

/// Soft/hard clip tag for a sequence end. Only affects whether the path
/// parser reports a clipped prefix/suffix as a CIGAR `S`/`H` op; alignment
/// scoring never penalises clipped ends either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClipType {
    Soft,
    Hard,
}

impl Default for ClipType {
    fn default() -> Self {
        ClipType::Soft
    }
}

/// Clip tags for all four sequence ends, passed to `dp_trace`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClipParams {
    pub a_head: ClipType,
    pub a_tail: ClipType,
    pub b_head: ClipType,
    pub b_tail: ClipType,
}

/// Flat, serializable, CLI-flattenable parameter set for one `DpContext`.
///
/// Every tunable lives here as a plain field with a `Default` impl, and the
/// struct derives `clap::Parser` so an external CLI driver can
/// `#[clap(flatten)]` it directly into its own argument struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Parser)]
#[serde(deny_unknown_fields)]
pub struct AlignParams {
    /// X-drop threshold. `0` means "use the default of 100".
    #[clap(long, default_value_t = 0)]
    #[serde(default)]
    pub xdrop: u16,

    /// Substitution and gap costs. Not exposed via `clap` directly (a CLI
    /// driver is expected to build this from its own flags); defaults to a
    /// `+2/-3` match/mismatch scheme with a linear `-5` gap.
    #[clap(skip = default_score_matrix())]
    #[serde(default = "default_score_matrix")]
    pub score_matrix: ScoreMatrix,

    /// Extra bytes reserved before the result header.
    #[clap(long, default_value_t = 0)]
    #[serde(default)]
    pub head_margin: u16,

    /// Extra bytes reserved after the result header.
    #[clap(long, default_value_t = 0)]
    #[serde(default)]
    pub tail_margin: u16,

    #[clap(skip)]
    #[serde(default)]
    pub seq_a_format: SeqFormat,

    #[clap(skip)]
    #[serde(default)]
    pub seq_b_format: SeqFormat,

    #[clap(skip)]
    #[serde(default)]
    pub seq_a_direction: SeqDirection,

    #[clap(skip)]
    #[serde(default)]
    pub seq_b_direction: SeqDirection,

    #[clap(value_enum, long, default_value_t = BandType::Dynamic)]
    #[serde(default)]
    pub band_type: BandType,
}

fn default_score_matrix() -> ScoreMatrix {
    ScoreMatrix::simple(2, -3, -5).expect("default score matrix satisfies gi+ge <= -1")
}

impl Default for AlignParams {
    fn default() -> Self {
        AlignParams {
            xdrop: 0,
            score_matrix: default_score_matrix(),
            head_margin: 0,
            tail_margin: 0,
            seq_a_format: SeqFormat::default(),
            seq_b_format: SeqFormat::default(),
            seq_a_direction: SeqDirection::default(),
            seq_b_direction: SeqDirection::default(),
            band_type: BandType::default(),
        }
    }
}

impl AlignParams {
    /// Resolves `xdrop == 0` to the documented default of 100.
    pub fn effective_xdrop(&self) -> u16 {
        if self.xdrop == 0 {
            100
        } else {
            self.xdrop
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_xdrop_resolves_to_one_hundred() {
        let params = AlignParams::default();
        assert_eq!(params.xdrop, 0);
        assert_eq!(params.effective_xdrop(), 100);
    }

    #[test]
    fn explicit_xdrop_is_used_as_is() {
        let mut params = AlignParams::default();
        params.xdrop = 42;
        assert_eq!(params.effective_xdrop(), 42);
    }

    #[test]
    fn default_score_matrix_is_the_documented_scheme() {
        let params = AlignParams::default();
        assert_eq!(params.score_matrix, ScoreMatrix::simple(2, -3, -5).unwrap());
    }

    #[test]
    fn default_band_type_is_dynamic() {
        assert_eq!(AlignParams::default().band_type, BandType::Dynamic);
        assert_eq!(ClipType::default(), ClipType::Soft);
    }

    #[test]
    fn clip_params_default_all_soft() {
        let clip = ClipParams::default();
        assert_eq!(clip.a_head, ClipType::Soft);
        assert_eq!(clip.a_tail, ClipType::Soft);
        assert_eq!(clip.b_head, ClipType::Soft);
        assert_eq!(clip.b_tail, ClipType::Soft);
    }
}
