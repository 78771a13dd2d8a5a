//! The process table and the selection half of the scheduler.

use lazy_static::lazy_static;
use spin::Mutex;

use super::process::{ProcessSlot, ProcessState};
use crate::config::MAX_PROCS;
use crate::trap::TrapFrame;

/// What one selection-and-switch step did.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SwitchOutcome {
    /// The trap frame now holds the context of the named pid.
    Switched(usize),
    /// Processes exist but every one of them is sleeping.
    Idle,
    /// The table is empty; the caller parks the hart.
    NoProcesses,
}

pub struct ProcessTable {
    pub procs: [ProcessSlot; MAX_PROCS],
    /// Index of the slot occupying the trap frame. None until the first
    /// switch, so the first tick knows to discard the kernel's own saved
    /// pc. Meaningful only together with `is_idle`: after a revolution that
    /// found nothing runnable the cursor rests on the last examined slot.
    pub curr_proc: Option<usize>,
    pub pid_counter: usize,
    /// Slots in any non-Available state.
    pub num_procs: usize,
    /// True while no user context is installed in the trap frame.
    pub is_idle: bool,
}

impl ProcessTable {
    pub const fn new() -> Self {
        Self {
            procs: [ProcessSlot::vacant(); MAX_PROCS],
            curr_proc: None,
            pid_counter: 0,
            num_procs: 0,
            is_idle: true,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Pids increase monotonically and are never reused within a boot; the
    /// first one handed out is 1 so that 0 can keep meaning "none".
    pub fn alloc_pid(&mut self) -> usize {
        self.pid_counter += 1;
        self.pid_counter
    }

    /// Claim the first Available slot, skipping the cursor, and move it to
    /// Ready. The caller finishes initializing the slot under the same
    /// table guard.
    pub fn alloc_process(&mut self) -> Option<usize> {
        for index in 0..MAX_PROCS {
            if Some(index) == self.curr_proc {
                continue;
            }
            if self.procs[index].state == ProcessState::Available {
                self.procs[index].state = ProcessState::Ready;
                self.num_procs += 1;
                return Some(index);
            }
        }
        None
    }

    /// Index of the slot occupying the trap frame, or None when the table
    /// is empty.
    pub fn current(&self) -> Option<usize> {
        if self.num_procs == 0 {
            None
        } else {
            self.curr_proc
        }
    }

    pub fn slot_by_pid(&mut self, pid: usize) -> Option<&mut ProcessSlot> {
        self.procs
            .iter_mut()
            .find(|slot| slot.is_live() && slot.pid == pid)
    }

    pub fn has_child_of(&self, pid: usize) -> bool {
        self.procs
            .iter()
            .any(|slot| slot.is_live() && slot.parent == Some(pid))
    }

    /// Scan ascending from `start + 1`, wrapping, for a runnable slot:
    /// Ready, or Sleeping with a due deadline (promoted in place). A
    /// deadline of 0 means blocked in wait, which only a child's exit can
    /// clear. The cursor follows every examined index, even on a failed
    /// revolution.
    fn find_ready_proc(&mut self, start: usize, now: u64) -> Option<usize> {
        for step in 1..=MAX_PROCS {
            let index = (start + step) % MAX_PROCS;
            self.curr_proc = Some(index);
            let slot = &mut self.procs[index];
            match slot.state {
                ProcessState::Ready => return Some(index),
                ProcessState::Sleeping if slot.wakeup_time != 0 && slot.wakeup_time <= now => {
                    slot.state = ProcessState::Ready;
                    return Some(index);
                }
                _ => {}
            }
        }
        None
    }

    /// One selection-and-switch step of the round-robin scheduler.
    ///
    /// Rewriting `frame` IS the context switch: the trap epilogue restores
    /// whatever this leaves behind. The outgoing context is discarded when
    /// there is no outgoing process — on the very first tick (the frame
    /// holds kernel state), after the current slot exited, or when the hart
    /// was parked idle.
    pub fn switch_to_next(&mut self, frame: &mut TrapFrame, now: u64) -> SwitchOutcome {
        let mut last_proc = self.curr_proc;
        if let Some(index) = last_proc {
            if self.procs[index].state == ProcessState::Available || self.is_idle {
                last_proc = None;
            }
        }
        if self.num_procs == 0 {
            return SwitchOutcome::NoProcesses;
        }
        // The outgoing slot competes again on equal footing. A slot that
        // just put itself to sleep keeps its state and saved context.
        if let Some(index) = last_proc {
            if self.procs[index].state == ProcessState::Running {
                self.procs[index].state = ProcessState::Ready;
            }
        }
        let start = self.curr_proc.unwrap_or(0);
        let next = match self.find_ready_proc(start, now) {
            Some(index) => index,
            None => {
                self.is_idle = true;
                return SwitchOutcome::Idle;
            }
        };
        match last_proc {
            Some(last) if self.procs[last].pid == self.procs[next].pid => {
                // Re-elected; the trap frame already holds this context.
            }
            Some(last) => {
                self.procs[last].context = *frame;
                *frame = self.procs[next].context;
            }
            None => {
                *frame = self.procs[next].context;
            }
        }
        self.procs[next].state = ProcessState::Running;
        self.is_idle = false;
        SwitchOutcome::Switched(self.procs[next].pid)
    }
}

lazy_static! {
    pub static ref PROCESS_TABLE: Mutex<ProcessTable> = Mutex::new(ProcessTable::new());
}
