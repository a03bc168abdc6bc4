//! Chain orchestrator: selects among fill modes so that filling always
//! terminates on X-drop, section end, p-limit, or arena growth.

use banded_types::status::fill_status;

/// Where a chain currently stands. One `fill` call is one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainState {
    Continuing,
    AwaitingSectionA,
    AwaitingSectionB,
    AwaitingBothSections,
    Terminated,
}

impl ChainState {
    /// Folds a fill's returned `stat` bits into the next chain state. The
    /// tail's `stat` fully describes which bounds were hit, so the next
    /// state is a pure function of the previous state and that bitset.
    pub fn advance(prev: ChainState, stat: u32) -> ChainState {
        if prev == ChainState::Terminated {
            return ChainState::Terminated;
        }
        if stat & fill_status::TERM != 0 {
            return ChainState::Terminated;
        }
        let a = stat & fill_status::UPDATE_A != 0;
        let b = stat & fill_status::UPDATE_B != 0;
        match (a, b) {
            (true, true) => ChainState::AwaitingBothSections,
            (true, false) => ChainState::AwaitingSectionA,
            (false, true) => ChainState::AwaitingSectionB,
            (false, false) => ChainState::Continuing,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == ChainState::Terminated
    }

    pub fn awaits_new_section(self) -> bool {
        matches!(
            self,
            ChainState::AwaitingSectionA
                | ChainState::AwaitingSectionB
                | ChainState::AwaitingBothSections
        )
    }
}
