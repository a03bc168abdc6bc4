/// Band width: number of parallel lanes tracked at any anti-diagonal.
pub const BW: usize = 32;
/// Block size: anti-diagonal steps fused into one storage record.
pub const BLK: usize = 32;
pub const MAX_BW: usize = BW;
pub const MAX_BLK: usize = BLK;

/// Clamp value for a lane that has fallen off the sequence end or off the
/// edge of the band. Chosen so it never wins a `max` against any reachable
/// score, yet stays far from `i64::MIN` so repeated additions cannot wrap.
pub const NEG_INF: i64 = i64::MIN / 4;

/// Default X-drop threshold used when a caller passes `xdrop == 0`.
pub const DEFAULT_XDROP: i64 = 100;
