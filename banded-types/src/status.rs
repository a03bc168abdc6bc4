/// Status bits returned alongside a fill's tail.
pub mod fill_status {
    /// Caller-defined low byte; the engine never reads or writes it beyond
    /// carrying it through unchanged.
    pub const USER_MASK: u32 = 0x00ff;
    /// Reached the end of the A section.
    pub const UPDATE_A: u32 = 0x0100;
    /// Reached the end of the B section.
    pub const UPDATE_B: u32 = 0x0200;
    /// X-drop, p-limit, or other internal termination; further fills on
    /// this chain are no-ops.
    pub const TERM: u32 = 0x0400;
}
