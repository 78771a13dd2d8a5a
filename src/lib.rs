//! Machine-mode kernel core: a fixed pool of user processes time-sliced by
//! the machine timer, a shared trap frame for context switches, and a page
//! allocator backing the per-process stacks.
//!
//! The crate is freestanding on the target. On the host it compiles against
//! std with the hardware touchpoints swapped for driveable stand-ins, which
//! is what the test suite runs on.

#![cfg_attr(not(test), no_std)]

#[cfg(not(target_arch = "riscv64"))]
extern crate alloc;

#[macro_use]
pub mod console;

pub mod config;
pub mod drivers;
mod lang_items;
pub mod logging;
pub mod mm;
pub mod mmio;
pub mod platform;
pub mod programs;
pub mod syscall;
pub mod task;
pub mod timer;
pub mod trap;
