//! Shared scaffolding for the host-side kernel tests: a real memory region
//! behind the page allocator, a driveable clock, and helpers that play the
//! role of the trap vector.

#![allow(dead_code)]

use mos_core::config::PAGE_SIZE;
use mos_core::mm::FRAME_ALLOCATOR;
use mos_core::syscall;
use mos_core::task::{ProcessState, PROCESS_TABLE};
use mos_core::trap::TrapFrame;
use spin::{Mutex, MutexGuard};

static LOCK: Mutex<()> = Mutex::new(());

/// Serialize tests against the kernel globals and reset them: empty process
/// table, clock at zero, drained console, and `frames` real pages of
/// backing memory for the allocator.
pub fn setup(frames: usize) -> MutexGuard<'static, ()> {
    let guard = LOCK.lock();
    mos_core::timer::set_time(0);
    mos_core::console::take_output();
    let backing = vec![0u8; (frames + 1) * PAGE_SIZE].leak();
    let base = backing.as_ptr() as usize;
    let aligned = (base + PAGE_SIZE - 1) & !(PAGE_SIZE - 1);
    FRAME_ALLOCATOR.lock().init(aligned, aligned + frames * PAGE_SIZE);
    PROCESS_TABLE.lock().reset();
    guard
}

pub fn spawn(name: &str) -> usize {
    let mut table = PROCESS_TABLE.lock();
    mos_core::programs::spawn(&mut table, name).expect("spawn failed")
}

/// Install a specific slot as the running process, the way a switch would.
pub fn make_current(index: usize, frame: &mut TrapFrame) {
    let mut table = PROCESS_TABLE.lock();
    for slot in table.procs.iter_mut() {
        if slot.state == ProcessState::Running {
            slot.state = ProcessState::Ready;
        }
    }
    table.curr_proc = Some(index);
    table.procs[index].state = ProcessState::Running;
    table.is_idle = false;
    *frame = table.procs[index].context;
}

/// Issue one environment call the way the trap dispatcher would.
pub fn ecall(frame: &mut TrapFrame, id: usize, args: [usize; 3]) {
    frame.x[17] = id;
    frame.x[10] = args[0];
    frame.x[11] = args[1];
    frame.x[12] = args[2];
    syscall::dispatch(frame);
}

pub fn current_pid() -> Option<usize> {
    let table = PROCESS_TABLE.lock();
    table.current().map(|index| table.procs[index].pid)
}

pub fn slot_index_of(pid: usize) -> Option<usize> {
    let table = PROCESS_TABLE.lock();
    table
        .procs
        .iter()
        .position(|slot| slot.is_live() && slot.pid == pid)
}

pub fn free_frames() -> usize {
    FRAME_ALLOCATOR.lock().free_frames()
}

pub fn total_frames() -> usize {
    FRAME_ALLOCATOR.lock().total_frames()
}

pub fn num_procs() -> usize {
    PROCESS_TABLE.lock().num_procs
}

pub fn is_idle() -> bool {
    PROCESS_TABLE.lock().is_idle
}

pub fn stack_page_address(index: usize) -> usize {
    let table = PROCESS_TABLE.lock();
    let page = table.procs[index].stack_page.expect("slot owns no page");
    FRAME_ALLOCATOR.lock().page_address(page)
}
