//! Memory map of the target SoC (SiFive FE310-class, matched by QEMU).

/// Timebase of the machine timer. Based on SIFIVE_CLINT_TIMEBASE_FREQ from
/// the QEMU SiFive CLINT implementation.
pub const CLOCK_FREQ: u64 = 10_000_000;

// These addresses are taken from the SiFive E31 core manual,
// Chapter 8: Core Local Interruptor (CLINT).
pub const MTIME: usize = 0x0200_bff8;
pub const MTIMECMP: usize = 0x0200_4000;

pub const UART_BASE: usize = 0x1001_3000;
pub const UART_TXDATA: usize = 0x00;
pub const UART_RXDATA: usize = 0x04;
pub const UART_TXCTRL: usize = 0x08;
pub const UART_RXCTRL: usize = 0x0c;
pub const UART_BAUD_RATE_DIVISOR: usize = 0x18;

// SiFive test device. Writing a finisher code resets or halts the machine.
pub const TEST_DEVICE: usize = 0x0010_0000;
pub const FINISHER_RESET: u32 = 0x7777;
pub const FINISHER_PASS: u32 = 0x5555;
pub const FINISHER_FAIL: u32 = 0x3333;

/// Unconditional soft reset through the test device.
#[cfg(target_arch = "riscv64")]
pub fn soft_reset() -> ! {
    unsafe {
        crate::mmio::write32(TEST_DEVICE, FINISHER_RESET);
    }
    unreachable!("reset write did not take effect")
}

#[cfg(not(target_arch = "riscv64"))]
pub fn soft_reset() -> ! {
    panic!("soft reset requested");
}

/// Halt after a kernel panic.
#[cfg(target_arch = "riscv64")]
pub fn halt_failure() -> ! {
    unsafe {
        crate::mmio::write32(TEST_DEVICE, FINISHER_FAIL);
    }
    loop {
        unsafe { riscv::asm::wfi() }
    }
}
