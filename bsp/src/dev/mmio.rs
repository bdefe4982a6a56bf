//! Memory-mapped register windows.
//!
//! [ControlRegisters] is the seam between the bring-up callbacks and the hardware: the
//! board uses [MmioWindow] over the system control module, tests substitute a fake.

use core::{
    cell::UnsafeCell,
    ops::Range,
    ptr::{read_volatile, write_volatile},
};
use spin::Mutex;

#[repr(transparent)]
pub struct Register<T: Sized + Copy> {
    inner: UnsafeCell<T>,
}

impl<T: Sized + Copy> Register<T> {
    #[inline(always)]
    pub fn read(&self) -> T {
        unsafe { read_volatile(self.inner.get()) }
    }
    #[inline(always)]
    pub fn write(&self, value: T) {
        unsafe {
            write_volatile(self.inner.get(), value);
        }
    }
}

/// 32-bit register file addressed by byte offset.
///
/// Accesses are synchronous and complete immediately. Implementations never fail:
/// an access the hardware cannot serve is a platform-fatal condition.
pub trait ControlRegisters: Sync {
    fn read(&self, offset: usize) -> u32;
    fn write(&self, offset: usize, value: u32);

    /// Clear `clear`, then set `set`, in the register at `offset`.
    ///
    /// Return the value read back after the write. The read-back is kept even though
    /// callers only use it for diagnostics, since some blocks latch writes lazily.
    fn update(&self, offset: usize, clear: u32, set: u32) -> u32 {
        let value = (self.read(offset) & !clear) | set;
        self.write(offset, value);
        self.read(offset)
    }
}

/// A mapped window of 32-bit registers.
pub struct MmioWindow {
    range: Range<usize>,
    /// Serialises read-modify-write cycles on registers shared between peripherals.
    rmw: Mutex<()>,
}

impl MmioWindow {
    /// Create a window over `len` bytes starting at virtual address `base`.
    ///
    /// # Safety
    /// The range must be mapped as device memory for the lifetime of the window, and no
    /// other code may treat it as ordinary memory.
    pub const unsafe fn new(base: usize, len: usize) -> MmioWindow {
        MmioWindow {
            range: base..base + len,
            rmw: Mutex::new(()),
        }
    }

    pub fn base(&self) -> usize {
        self.range.start
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    fn register(&self, offset: usize) -> &Register<u32> {
        let size = size_of::<u32>();
        if offset % size != 0 || offset + size > self.len() {
            platform_fatal!(
                "Register offset {:#x} outside window [{:#x},{:#x}).",
                offset,
                self.range.start,
                self.range.end
            );
        }
        unsafe { &*((self.range.start + offset) as *const Register<u32>) }
    }
}

impl ControlRegisters for MmioWindow {
    fn read(&self, offset: usize) -> u32 {
        self.register(offset).read()
    }

    fn write(&self, offset: usize, value: u32) {
        self.register(offset).write(value);
    }

    fn update(&self, offset: usize, clear: u32, set: u32) -> u32 {
        let reg = self.register(offset);
        let _guard = self.rmw.lock();
        reg.write((reg.read() & !clear) | set);
        reg.read()
    }
}
