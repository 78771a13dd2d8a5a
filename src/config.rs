//! Tunable constants of the kernel core.

use crate::platform::CLOCK_FREQ;

/// Capacity of the process table.
pub const MAX_PROCS: usize = 16;

pub const PAGE_SIZE_BITS: usize = 12;
pub const PAGE_SIZE: usize = 1 << PAGE_SIZE_BITS;

/// Frames the allocator bitmap can track; the managed region may be smaller.
pub const MAX_FRAMES: usize = 1024;

pub const BOOT_STACK_SIZE: usize = 4096 * 16; //64K

pub const TICKS_PER_SEC: u64 = 100;

/// One scheduler quantum, in mtime ticks.
pub const SCHEDULER_TICK: u64 = CLOCK_FREQ / TICKS_PER_SEC;

/// mtime ticks per millisecond, for sleep deadlines.
pub const TICKS_PER_MS: u64 = CLOCK_FREQ / 1000;

pub const USABLE_MEMORY_END: usize = 0x8080_0000;
