// process manage syscalls

use crate::config::PAGE_SIZE;
use crate::mm::FRAME_ALLOCATOR;
use crate::task::{schedule_user_process, ProcessState, PROCESS_TABLE};
use crate::timer;
use crate::trap::{TrapFrame, REG_A0, REG_A1, REG_FP, REG_SP};

/// Mirrors the user-visible layout: little-endian u32 fields.
/// `totalram` and `freeram` are in pages, `procs` in processes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SysInfo {
    pub totalram: u32,
    pub freeram: u32,
    pub procs: u32,
}

/// Duplicate the calling process. The child gets a byte-for-byte copy of
/// the parent's stack in a fresh page, with `sp` and `fp` rebased to the
/// same offset, and sees 0 in `a0`; the parent sees the child's pid.
pub fn sys_fork(frame: &mut TrapFrame) -> isize {
    let mut table = PROCESS_TABLE.lock();
    let mut frames = FRAME_ALLOCATOR.lock();
    let Some(child_page) = frames.alloc_zeroed() else {
        return -1;
    };
    let Some(child_index) = table.alloc_process() else {
        frames.dealloc(child_page);
        return -1;
    };
    let parent_index = table.current().unwrap();
    let parent = table.procs[parent_index];
    let parent_page = parent.stack_page.unwrap();

    // The child resumes from the same register file the parent trapped
    // with, pc already past the ecall.
    let mut context = *frame;
    context.x[REG_A0] = 0;
    let old_base = frames.page_address(parent_page);
    let new_base = frames.page_address(child_page);
    unsafe {
        core::ptr::copy_nonoverlapping(old_base as *const u8, new_base as *mut u8, PAGE_SIZE);
    }
    // An untouched stack still has sp and fp parked one past the page end,
    // so the top boundary belongs to the stack too.
    for reg in [REG_SP, REG_FP] {
        let value = context.x[reg];
        if (old_base..=old_base + PAGE_SIZE).contains(&value) {
            context.x[reg] = new_base + (value - old_base);
        }
    }

    let child_pid = table.alloc_pid();
    let child = &mut table.procs[child_index];
    child.pid = child_pid;
    child.name = parent.name;
    child.parent = Some(parent.pid);
    child.context = context;
    child.stack_page = Some(child_page);
    child.wakeup_time = 0;
    child_pid as isize
}

/// Replace the calling process with the named program on a fresh stack.
/// On success the trap frame is the new context (`a0` = argc computed from
/// the null-terminated argv vector, `a1` = argv) and there is nothing to
/// return to; failures leave the caller untouched and report -1.
pub fn sys_execv(frame: &mut TrapFrame, path: *const u8, argv: *const usize) -> Option<isize> {
    let mut name_buf = [0u8; 64];
    let Some(name) = copy_user_str(path, &mut name_buf) else {
        return Some(-1);
    };
    let Some(program) = crate::programs::find(name) else {
        return Some(-1);
    };
    let mut table = PROCESS_TABLE.lock();
    let mut frames = FRAME_ALLOCATOR.lock();
    let Some(new_page) = frames.alloc_zeroed() else {
        return Some(-1);
    };
    let index = table.current().unwrap();
    let slot = &mut table.procs[index];
    if let Some(old_page) = slot.stack_page.replace(new_page) {
        frames.dealloc(old_page);
    }
    slot.name = program.name;
    let stack_top = frames.page_address(new_page) + PAGE_SIZE;
    *frame = TrapFrame::user_init(program.entry_address(), stack_top);
    frame.x[REG_A0] = count_args(argv);
    frame.x[REG_A1] = argv as usize;
    None
}

/// Release everything the caller owns and run someone else. The only way a
/// slot returns to Available.
pub fn sys_exit(frame: &mut TrapFrame) {
    crate::task::exit_current(frame);
}

/// Block until one of the caller's children exits; that child's pid becomes
/// the return value. A caller with no live children gets -1 immediately
/// instead of sleeping forever.
pub fn sys_wait(frame: &mut TrapFrame) {
    {
        let mut table = PROCESS_TABLE.lock();
        let Some(index) = table.current() else {
            return;
        };
        let pid = table.procs[index].pid;
        if !table.has_child_of(pid) {
            frame.set_return(-1);
            return;
        }
        // a0 in the saved context is filled in by the exiting child.
        frame.set_return(0);
        let slot = &mut table.procs[index];
        slot.state = ProcessState::Sleeping;
        slot.wakeup_time = 0;
        slot.context = *frame;
    }
    schedule_user_process(frame);
}

/// Park the caller until `ms` milliseconds from now. The deadline is
/// absolute mtime; the scheduler will not re-elect the slot any earlier.
pub fn sys_sleep(frame: &mut TrapFrame, ms: u64) {
    {
        let mut table = PROCESS_TABLE.lock();
        let Some(index) = table.current() else {
            return;
        };
        frame.set_return(0);
        let slot = &mut table.procs[index];
        slot.state = ProcessState::Sleeping;
        // A deadline of 0 would read as wait-blocked, keep it at least 1.
        slot.wakeup_time = (timer::get_time() + timer::ms_to_ticks(ms)).max(1);
        slot.context = *frame;
    }
    schedule_user_process(frame);
}

pub fn sys_getpid() -> isize {
    let table = PROCESS_TABLE.lock();
    match table.current() {
        Some(index) => table.procs[index].pid as isize,
        None => -1,
    }
}

pub fn sys_sysinfo(buf: *mut SysInfo) -> isize {
    if buf.is_null() {
        return -1;
    }
    let table = PROCESS_TABLE.lock();
    let frames = FRAME_ALLOCATOR.lock();
    let info = SysInfo {
        totalram: frames.total_frames() as u32,
        freeram: frames.free_frames() as u32,
        procs: table.num_procs as u32,
    };
    unsafe { buf.write(info) };
    0
}

/// Copy a NUL-terminated user string into `buf`; None for a null pointer,
/// an overlong name or invalid UTF-8.
fn copy_user_str<'a>(ptr: *const u8, buf: &'a mut [u8]) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    let mut len = 0;
    loop {
        if len >= buf.len() {
            return None;
        }
        let byte = unsafe { ptr.add(len).read() };
        if byte == 0 {
            break;
        }
        buf[len] = byte;
        len += 1;
    }
    core::str::from_utf8(&buf[..len]).ok()
}

/// argc is the number of argv entries before the terminating null.
fn count_args(argv: *const usize) -> usize {
    if argv.is_null() {
        return 0;
    }
    let mut argc = 0;
    while unsafe { argv.add(argc).read() } != 0 {
        argc += 1;
    }
    argc
}
