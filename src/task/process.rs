use crate::mm::PageNum;
use crate::trap::TrapFrame;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ProcessState {
    Available,
    Ready,
    Running,
    Sleeping,
}

/// One fixed entry of the process table.
///
/// Slot-level exclusion is subsumed by the table lock: on a single hart
/// every mutation happens under the held table guard, in table-then-slot
/// order, so a separate per-slot mutex would never be contended.
#[derive(Clone, Copy)]
pub struct ProcessSlot {
    /// 0 while the slot is Available; live pids are unique and never reused.
    pub pid: usize,
    pub state: ProcessState,
    /// Borrowed from the static programs table.
    pub name: &'static str,
    /// Parent pid, not a reference: children never keep a parent slot alive.
    pub parent: Option<usize>,
    /// Register file as of the last time this process left the trap frame.
    pub context: TrapFrame,
    /// The one stack frame this slot owns while live.
    pub stack_page: Option<PageNum>,
    /// Absolute mtime deadline. Meaningful only while Sleeping; 0 means
    /// blocked in wait rather than a timed sleep.
    pub wakeup_time: u64,
}

impl ProcessSlot {
    pub const fn vacant() -> Self {
        Self {
            pid: 0,
            state: ProcessState::Available,
            name: "",
            parent: None,
            context: TrapFrame::zeroed(),
            stack_page: None,
            wakeup_time: 0,
        }
    }

    pub fn is_live(&self) -> bool {
        self.state != ProcessState::Available
    }
}
