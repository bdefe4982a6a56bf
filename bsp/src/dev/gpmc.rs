//! General-purpose memory controller (GPMC) chip-select configuration space.
//!
//! Each chip-select owns a block of configuration registers starting at
//! `GPMC_CS0_BASE + cs * GPMC_CS_SIZE`; CONFIG1 carries the attached device type.

use super::{
    ChipSelect, PhysAddr,
    mmio::{ControlRegisters, MmioWindow},
};
use config::build_flags::{GPMC_CS_CONFIG1, GPMC_CS_NUM, GPMC_CS0_BASE, GPMC_CS_SIZE};

/// Read-only view of the chip-select configuration registers.
pub trait GpmcConfig {
    /// Number of chip-select lines the controller drives.
    fn cs_count(&self) -> usize;
    fn read_cs_config1(&self, cs: ChipSelect) -> u32;
    /// Physical base of the controller handed to the NAND driver.
    fn physical_base(&self) -> PhysAddr;
}

/// Byte offset of a chip-select register inside the GPMC window.
pub const fn cs_reg_offset(cs: ChipSelect, reg: usize) -> usize {
    GPMC_CS0_BASE + cs.into_const() as usize * GPMC_CS_SIZE + reg
}

pub struct GpmcWindow {
    regs: MmioWindow,
    phys_base: PhysAddr,
}

impl GpmcWindow {
    /// # Safety
    /// `virt_base` must map the GPMC register block located at `phys_base`, see
    /// [MmioWindow::new].
    pub const unsafe fn new(virt_base: usize, len: usize, phys_base: PhysAddr) -> GpmcWindow {
        GpmcWindow {
            regs: unsafe { MmioWindow::new(virt_base, len) },
            phys_base,
        }
    }
}

impl GpmcConfig for GpmcWindow {
    fn cs_count(&self) -> usize {
        GPMC_CS_NUM
    }

    fn read_cs_config1(&self, cs: ChipSelect) -> u32 {
        self.regs.read(cs_reg_offset(cs, GPMC_CS_CONFIG1))
    }

    fn physical_base(&self) -> PhysAddr {
        self.phys_base
    }
}
