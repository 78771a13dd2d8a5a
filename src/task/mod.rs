pub mod process;
pub mod scheduler;
pub mod table;

pub use process::{ProcessSlot, ProcessState};
pub use scheduler::schedule_user_process;
pub use table::{ProcessTable, SwitchOutcome, PROCESS_TABLE};

use crate::mm::FRAME_ALLOCATOR;
use crate::trap::{TrapFrame, REG_A0};

/// Empty the table and seed the boot-time processes.
pub fn init_process_table() {
    let mut table = PROCESS_TABLE.lock();
    table.reset();
    crate::programs::spawn_initial(&mut table);
}

/// Tear down the current process and hand the processor to the next one.
/// Shared between `sys_exit` and the fault path: the stack page goes back
/// to the allocator, the slot becomes Available, and a parent blocked in
/// `wait` is woken with this pid as its return value.
pub fn exit_current(frame: &mut TrapFrame) {
    {
        let mut table = PROCESS_TABLE.lock();
        if let Some(index) = table.current() {
            let slot = &mut table.procs[index];
            let pid = slot.pid;
            let parent = slot.parent;
            if let Some(page) = slot.stack_page.take() {
                FRAME_ALLOCATOR.lock().dealloc(page);
            }
            *slot = ProcessSlot::vacant();
            table.num_procs -= 1;
            if let Some(parent_pid) = parent {
                if let Some(parent_slot) = table.slot_by_pid(parent_pid) {
                    if parent_slot.state == ProcessState::Sleeping
                        && parent_slot.wakeup_time == 0
                    {
                        parent_slot.state = ProcessState::Ready;
                        parent_slot.context.x[REG_A0] = pid;
                    }
                }
            }
        }
    }
    schedule_user_process(frame);
}
