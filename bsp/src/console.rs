//! Diagnostic console used by the logger.
//!
//! The platform installs its own sink once with [set_console]; until then output is dropped.

use core::fmt::{Arguments, Write};
use spin::Once;

/// A byte sink the platform provides for early diagnostics, usually the debug UART.
pub trait Console: Sync {
    fn put_str(&self, s: &str);
}

static CONSOLE: Once<&'static dyn Console> = Once::new();

/// Install the console sink. Only the first call has an effect.
pub fn set_console(console: &'static dyn Console) {
    CONSOLE.call_once(|| console);
}

struct ConsoleOut;

impl Write for ConsoleOut {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        if let Some(console) = CONSOLE.get() {
            console.put_str(s);
        }
        Ok(())
    }
}

pub fn console_print(args: Arguments) {
    // ConsoleOut never reports an error.
    let _ = ConsoleOut.write_fmt(args);
}

#[macro_export]
/// print string macro
macro_rules! bsp_print {
    ($fmt: literal $(, $($arg: tt)+)?) => {
        $crate::console::console_print(format_args!($fmt $(, $($arg)+)?));
    }
}

#[macro_export]
macro_rules! bsp_println {
    ($fmt: literal $(, $($arg: tt)+)?) => {
        $crate::console::console_print(format_args!(concat!($fmt, "\n") $(, $($arg)+)?));   // Use LF instead of CR-LF
    }
}
