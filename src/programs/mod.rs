//! The statically linked user programs and their name → entry table.
//!
//! There is no loader: a "program" is a function compiled into the kernel
//! image that runs in U-mode on its own stack page and talks to the kernel
//! only through `ecall`.

mod bin;
#[cfg(target_arch = "riscv64")]
pub mod usys;

use crate::mm::FRAME_ALLOCATOR;
use crate::trap::TrapFrame;

pub type EntryPoint = extern "C" fn(argc: usize, argv: usize) -> !;

pub struct Program {
    pub name: &'static str,
    pub entry: EntryPoint,
}

impl Program {
    pub fn entry_address(&self) -> usize {
        self.entry as usize
    }
}

pub static PROGRAMS: &[Program] = &[
    Program {
        name: "init",
        entry: bin::init,
    },
    Program {
        name: "shell",
        entry: bin::shell,
    },
    Program {
        name: "ticker",
        entry: bin::ticker,
    },
    Program {
        name: "hello",
        entry: bin::hello,
    },
    Program {
        name: "free",
        entry: bin::free,
    },
];

/// Exact-match lookup, the only resolution `execv` does.
pub fn find(name: &str) -> Option<&'static Program> {
    PROGRAMS.iter().find(|program| program.name == name)
}

/// Install a program into a fresh slot with a fresh stack page. Called with
/// the table guard held; used for the boot-time processes and by tests.
pub fn spawn(table: &mut crate::task::ProcessTable, name: &str) -> Option<usize> {
    let program = find(name)?;
    let mut frames = FRAME_ALLOCATOR.lock();
    let page = frames.alloc_zeroed()?;
    let Some(index) = table.alloc_process() else {
        frames.dealloc(page);
        return None;
    };
    let pid = table.alloc_pid();
    let stack_top = frames.page_address(page) + crate::config::PAGE_SIZE;
    let slot = &mut table.procs[index];
    slot.pid = pid;
    slot.name = program.name;
    slot.parent = None;
    slot.context = TrapFrame::user_init(program.entry_address(), stack_top);
    slot.stack_page = Some(page);
    slot.wakeup_time = 0;
    Some(index)
}

/// Seed the boot-time processes.
pub fn spawn_initial(table: &mut crate::task::ProcessTable) {
    if spawn(table, "init").is_none() {
        log::error!("could not seed the init process");
    }
}
