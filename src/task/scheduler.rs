//! The kernel-facing half of the scheduler: runs selection steps against
//! the shared trap frame and handles the idle park.

use super::table::{SwitchOutcome, PROCESS_TABLE};
use crate::config::SCHEDULER_TICK;
use crate::timer;
use crate::trap::TrapFrame;

/// One selection step with the timer re-armed, whatever the outcome.
fn try_switch(frame: &mut TrapFrame) -> SwitchOutcome {
    let outcome = {
        let mut table = PROCESS_TABLE.lock();
        table.switch_to_next(frame, timer::get_time())
    };
    timer::set_timer_after(SCHEDULER_TICK);
    outcome
}

/// Select the next runnable process and install its context in the trap
/// frame. Called from the timer tick and from every syscall that gives up
/// the processor (`exit`, `wait`, `sleep`).
///
/// When nothing is runnable the hart parks in `wfi` with the timer armed
/// and interrupts enabled; the nested timer trap performs the real switch
/// and `mret`s straight to user mode, abandoning the parked kernel stack
/// (the trap prologue resets it on every entry). The host build returns
/// after one step instead, so tests can observe the idle state.
#[cfg(target_arch = "riscv64")]
pub fn schedule_user_process(frame: &mut TrapFrame) {
    loop {
        match try_switch(frame) {
            SwitchOutcome::Switched(_) => {
                // mret must drop to U-mode no matter which mode trapped.
                unsafe {
                    riscv::register::mstatus::set_mpp(riscv::register::mstatus::MPP::User);
                }
                return;
            }
            SwitchOutcome::Idle | SwitchOutcome::NoProcesses => unsafe {
                riscv::register::mstatus::set_mie();
                riscv::asm::wfi();
            },
        }
    }
}

#[cfg(not(target_arch = "riscv64"))]
pub fn schedule_user_process(frame: &mut TrapFrame) {
    try_switch(frame);
}
