//! Polled driver for the SiFive UART.

use bitflags::bitflags;

use crate::mmio;
use crate::platform::{
    UART_BASE, UART_BAUD_RATE_DIVISOR, UART_RXCTRL, UART_RXDATA, UART_TXCTRL, UART_TXDATA,
};

bitflags! {
    struct TxCtrl: u32 {
        const TXEN = 1 << 0;
    }
}

bitflags! {
    struct RxCtrl: u32 {
        const RXEN = 1 << 0;
    }
}

pub fn init() {
    unsafe {
        mmio::write32(UART_BASE + UART_TXCTRL, TxCtrl::TXEN.bits());
        mmio::write32(UART_BASE + UART_RXCTRL, RxCtrl::RXEN.bits());
        // The SiFive FE310-G002 manual lists a table of possible values in
        // Section 18.9; this one is the default on the HiFive1 rev B board.
        mmio::write32(UART_BASE + UART_BAUD_RATE_DIVISOR, 138);
    }
}

/// Busy-waits while the TX FIFO is full (sign bit set), then queues the byte.
pub fn write_byte(byte: u8) {
    unsafe {
        while (mmio::read32(UART_BASE + UART_TXDATA) as i32) < 0 {}
        mmio::write32(UART_BASE + UART_TXDATA, byte as u32);
    }
}

/// Busy-waits for a byte; the sign bit is set while the RX FIFO is empty.
pub fn read_byte() -> u8 {
    loop {
        let word = unsafe { mmio::read32(UART_BASE + UART_RXDATA) } as i32;
        if word >= 0 {
            return word as u8;
        }
    }
}
