//! Trap plumbing: the shared trap frame and the mcause dispatcher.
//!
//! The low-level vector in `trap.S` saves all user registers into the frame
//! published through `mscratch`, then calls [`kernel_trap_handler`]. Whatever
//! the frame holds when the handler returns is what `mret` resumes — the
//! scheduler switches processes by rewriting it.

mod context;

pub use context::{TrapFrame, REG_A0, REG_A1, REG_A7, REG_FP, REG_RA, REG_SP};

#[cfg(target_arch = "riscv64")]
core::arch::global_asm!(include_str!("trap.S"));

/// The single register save area, shared between the trap vector, the
/// scheduler and the syscall layer. Only ever touched with interrupts off,
/// between trap entry and `mret`.
#[cfg(target_arch = "riscv64")]
static mut TRAP_FRAME: TrapFrame = TrapFrame::zeroed();

/// Install the trap vector and publish the trap frame address.
#[cfg(target_arch = "riscv64")]
pub fn init() {
    use riscv::register::{mscratch, mtvec, utvec::TrapMode};
    extern "C" {
        fn __trap_vector();
    }
    unsafe {
        mscratch::write(core::ptr::addr_of_mut!(TRAP_FRAME) as usize);
        mtvec::write(__trap_vector as usize, TrapMode::Direct);
    }
}

/// Rust half of the trap vector. `frame` is the shared trap frame with the
/// interrupted context already saved into it.
#[cfg(target_arch = "riscv64")]
#[no_mangle]
extern "C" fn kernel_trap_handler(frame: &mut TrapFrame) {
    use riscv::register::mcause::{self, Exception, Interrupt, Trap};

    match mcause::read().cause() {
        Trap::Interrupt(Interrupt::MachineTimer) => {
            // Acknowledge by moving the compare ahead, then hand the tick
            // to the scheduler.
            crate::timer::set_timer_after(crate::config::SCHEDULER_TICK);
            crate::task::schedule_user_process(frame);
        }
        Trap::Exception(Exception::UserEnvCall) => {
            frame.pc += 4;
            crate::syscall::dispatch(frame);
        }
        cause => {
            log::error!(
                "[kernel] process fault {:?} at {:#x}, killing it",
                cause,
                frame.pc
            );
            crate::task::exit_current(frame);
        }
    }
}
