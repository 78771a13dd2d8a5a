//! Kernel entry point: bring the machine up, seed the process table, arm
//! the timer and park. The first timer tick performs the drop to user mode.

#![cfg_attr(target_arch = "riscv64", no_std)]
#![cfg_attr(target_arch = "riscv64", no_main)]

#[cfg(target_arch = "riscv64")]
core::arch::global_asm!(include_str!("entry.asm"));

#[cfg(target_arch = "riscv64")]
#[no_mangle]
pub fn rust_main() -> ! {
    use mos_core::{config, drivers, logging, mm, task, timer, trap};

    clean_bss();
    drivers::uart::init();
    logging::init();
    log::info!("mOS core starting");
    mm::init();
    task::init_process_table();
    trap::init();
    timer::set_timer_after(config::SCHEDULER_TICK);
    unsafe {
        riscv::register::mie::set_mtimer();
        riscv::register::mstatus::set_mie();
    }
    log::info!("waiting for the first tick");
    // The scheduler discards this kernel context on the first switch.
    loop {
        unsafe { riscv::asm::wfi() }
    }
}

#[cfg(target_arch = "riscv64")]
fn clean_bss() {
    extern "C" {
        fn sbss();
        fn ebss();
    }
    for c in sbss as usize..ebss as usize {
        unsafe { (c as *mut u8).write_volatile(0) }
    }
}

#[cfg(not(target_arch = "riscv64"))]
fn main() {}
