//! Runtime hooks for the freestanding build.

/// Report the panic over the console and halt through the test device. The
/// host build keeps std's unwinding handler instead.
#[cfg(all(target_arch = "riscv64", not(test)))]
#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    log::error!("kernel panic: {}", info);
    crate::platform::halt_failure()
}
