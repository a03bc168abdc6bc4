/// One band-recentring decision: did this step advance along B ("down")
/// or along A ("right")? `1` = down, `0` = right in the packed direction
/// word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Right,
}

impl Direction {
    pub fn as_bit(self) -> bool {
        matches!(self, Direction::Down)
    }
}

/// Decides, for each anti-diagonal step, whether the band recentres down
/// or right. Two interchangeable variants exist: [`DynamicOracle`], which
/// steers off an edge-cell accumulator, and [`GuidedOracle`], which
/// replays a precomputed tape.
pub trait DirectionOracle {
    /// `top`/`bottom` are the current scores at band lanes `0` and
    /// `BW - 1`; the dynamic variant uses their difference to steer the
    /// band toward whichever edge is falling behind.
    fn decide(&mut self, top: i64, bottom: i64) -> Direction;
}

/// Accumulator-driven oracle: an 8-bit running sum of edge-lane deltas.
/// "Down" is the default when the accumulator is negative.
#[derive(Debug, Clone, Copy)]
pub struct DynamicOracle {
    acc: i8,
}

impl DynamicOracle {
    pub fn new() -> Self {
        DynamicOracle { acc: 0 }
    }
}

impl Default for DynamicOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectionOracle for DynamicOracle {
    fn decide(&mut self, top: i64, bottom: i64) -> Direction {
        // Decide before updating: the direction for *this* step reflects
        // the accumulator state carried over from the previous one.
        let dir = if self.acc < 0 {
            Direction::Down
        } else {
            Direction::Right
        };
        let delta = (top - bottom).clamp(i8::MIN as i64, i8::MAX as i64) as i8;
        self.acc = self.acc.saturating_add(delta);
        dir
    }
}

/// Tape-driven oracle: replays a caller-supplied sequence of decisions
/// (e.g. one computed offline, or one being replayed from a previous run).
#[derive(Debug, Clone)]
pub struct GuidedOracle<'a> {
    tape: &'a [bool],
    pos: usize,
}

impl<'a> GuidedOracle<'a> {
    pub fn new(tape: &'a [bool]) -> Self {
        GuidedOracle { tape, pos: 0 }
    }
}

impl<'a> DirectionOracle for GuidedOracle<'a> {
    fn decide(&mut self, _top: i64, _bottom: i64) -> Direction {
        let bit = self.tape.get(self.pos).copied().unwrap_or(false);
        self.pos += 1;
        if bit {
            Direction::Down
        } else {
            Direction::Right
        }
    }
}
