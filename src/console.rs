//! Console byte channel and the `print!`/`println!` macros.
//!
//! On the target every byte goes through the polled UART. The host build
//! (used by the test suite) captures output in memory and replays input fed
//! by the tests, so console-visible behavior stays assertable.

use core::fmt::{self, Write};

#[cfg(target_arch = "riscv64")]
mod backend {
    use crate::drivers::uart;

    pub fn put_byte(byte: u8) {
        uart::write_byte(byte);
    }

    pub fn get_byte() -> u8 {
        uart::read_byte()
    }
}

#[cfg(not(target_arch = "riscv64"))]
mod backend {
    use alloc::collections::VecDeque;
    use alloc::vec::Vec;
    use lazy_static::lazy_static;
    use spin::Mutex;

    lazy_static! {
        static ref OUTPUT: Mutex<Vec<u8>> = Mutex::new(Vec::new());
        static ref INPUT: Mutex<VecDeque<u8>> = Mutex::new(VecDeque::new());
    }

    pub fn put_byte(byte: u8) {
        OUTPUT.lock().push(byte);
    }

    /// Returns 0 once the fed input runs dry, where the UART would block.
    pub fn get_byte() -> u8 {
        INPUT.lock().pop_front().unwrap_or(0)
    }

    pub fn take_output() -> Vec<u8> {
        core::mem::take(&mut *OUTPUT.lock())
    }

    pub fn feed_input(bytes: &[u8]) {
        INPUT.lock().extend(bytes.iter().copied());
    }
}

pub fn put_byte(byte: u8) {
    backend::put_byte(byte);
}

pub fn get_byte() -> u8 {
    backend::get_byte()
}

/// Drain everything printed so far (host builds only).
#[cfg(not(target_arch = "riscv64"))]
pub fn take_output() -> alloc::vec::Vec<u8> {
    backend::take_output()
}

/// Queue bytes for `get_byte` to return (host builds only).
#[cfg(not(target_arch = "riscv64"))]
pub fn feed_input(bytes: &[u8]) {
    backend::feed_input(bytes);
}

struct Console;

impl Write for Console {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            backend::put_byte(byte);
        }
        Ok(())
    }
}

pub fn print(args: fmt::Arguments) {
    Console.write_fmt(args).unwrap();
}

#[macro_export]
macro_rules! print {
    ($fmt: literal $(, $($arg: tt)+)?) => {
        $crate::console::print(format_args!($fmt $(, $($arg)+)?))
    };
}

#[macro_export]
macro_rules! println {
    ($fmt: literal $(, $($arg: tt)+)?) => {
        $crate::console::print(format_args!(concat!($fmt, "\n") $(, $($arg)+)?))
    };
}
