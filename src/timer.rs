//! Machine timer access.
//!
//! `mtime` is the monotonic clock everything in the kernel is ordered by;
//! `mtimecmp` raises the next machine timer interrupt. The host build swaps
//! the hardware counter for a clock the tests drive explicitly.

use crate::config::TICKS_PER_MS;

#[cfg(target_arch = "riscv64")]
mod clock {
    use crate::mmio;
    use crate::platform::{MTIME, MTIMECMP};

    pub fn get_time() -> u64 {
        unsafe { mmio::read64(MTIME) }
    }

    pub fn set_timer_after(delta: u64) {
        unsafe { mmio::write64(MTIMECMP, get_time() + delta) }
    }
}

#[cfg(not(target_arch = "riscv64"))]
mod clock {
    use core::sync::atomic::{AtomicU64, Ordering};

    static NOW: AtomicU64 = AtomicU64::new(0);

    pub fn get_time() -> u64 {
        NOW.load(Ordering::Relaxed)
    }

    pub fn set_timer_after(_delta: u64) {}

    pub fn set_time(now: u64) {
        NOW.store(now, Ordering::Relaxed);
    }

    pub fn advance_time(delta: u64) {
        NOW.fetch_add(delta, Ordering::Relaxed);
    }
}

/// Current mtime value.
pub fn get_time() -> u64 {
    clock::get_time()
}

/// Arm the machine timer `delta` ticks from now.
pub fn set_timer_after(delta: u64) {
    clock::set_timer_after(delta)
}

#[cfg(not(target_arch = "riscv64"))]
pub fn set_time(now: u64) {
    clock::set_time(now)
}

#[cfg(not(target_arch = "riscv64"))]
pub fn advance_time(delta: u64) {
    clock::advance_time(delta)
}

pub const fn ms_to_ticks(ms: u64) -> u64 {
    ms * TICKS_PER_MS
}
