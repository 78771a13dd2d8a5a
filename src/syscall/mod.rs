// Stable syscall numbers, shared with the user-side wrappers.
pub const SYS_RESTART: usize = 0;
pub const SYS_EXIT: usize = 1;
pub const SYS_FORK: usize = 2;
pub const SYS_READ: usize = 3;
pub const SYS_WRITE: usize = 4;
pub const SYS_WAIT: usize = 5;
pub const SYS_EXECV: usize = 6;
pub const SYS_GETPID: usize = 7;
pub const SYS_SYSINFO: usize = 8;
pub const SYS_SLEEP: usize = 9;

mod fs;
mod process;

pub use process::SysInfo;

use crate::trap::TrapFrame;

/// Decode one environment call from the trap frame and route it.
///
/// The result lands in the frame's `a0` slot — except for the handlers that
/// rewrite the visible context themselves (`exit`, `wait` and `sleep` hand
/// the frame to the scheduler; a successful `execv` resets it), where
/// writing `a0` afterwards would corrupt the incoming context.
pub fn dispatch(frame: &mut TrapFrame) {
    let args = frame.syscall_args();
    let ret = match frame.syscall_id() {
        SYS_RESTART => crate::platform::soft_reset(),
        SYS_EXIT => {
            process::sys_exit(frame);
            None
        }
        SYS_FORK => Some(process::sys_fork(frame)),
        SYS_READ => Some(fs::sys_read(args[0], args[1] as *mut u8, args[2])),
        SYS_WRITE => Some(fs::sys_write(args[0], args[1] as *const u8, args[2])),
        SYS_WAIT => {
            process::sys_wait(frame);
            None
        }
        SYS_EXECV => process::sys_execv(frame, args[0] as *const u8, args[1] as *const usize),
        SYS_GETPID => Some(process::sys_getpid()),
        SYS_SYSINFO => Some(process::sys_sysinfo(args[0] as *mut SysInfo)),
        SYS_SLEEP => {
            process::sys_sleep(frame, args[0] as u64);
            None
        }
        id => {
            log::warn!("unsupported syscall {}", id);
            Some(-1)
        }
    };
    if let Some(value) = ret {
        frame.set_return(value);
    }
}
