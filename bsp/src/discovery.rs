//! NAND chip-select discovery.
//!
//! The boot loader programs the GPMC before handing over, so the chip-select wired to
//! NAND is found by reading each chip-select's CONFIG1 and checking its device-type field.

use crate::dev::{ChipSelect, PhysAddr, gpmc::GpmcConfig};
use log::{trace, warn};

/// CONFIG1 DEVICETYPE field, bits `[11:10]`.
pub const DEVICETYPE_MASK: u32 = 0x0000_0c00;
/// DEVICETYPE value for NAND-like devices.
pub const NAND_SIGNATURE: u32 = 0x0000_0800;

/// Outcome of a chip-select scan. When nothing matched, `chip_select` holds the
/// one-past-the-end index and must not be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipSelectProbeResult {
    pub found: bool,
    pub chip_select: ChipSelect,
    pub physical_base: PhysAddr,
}

impl ChipSelectProbeResult {
    pub const fn found(cs: ChipSelect, physical_base: PhysAddr) -> ChipSelectProbeResult {
        ChipSelectProbeResult {
            found: true,
            chip_select: cs,
            physical_base,
        }
    }

    pub const fn not_found(cs_count: u8, physical_base: PhysAddr) -> ChipSelectProbeResult {
        ChipSelectProbeResult {
            found: false,
            chip_select: ChipSelect::from_const(cs_count),
            physical_base,
        }
    }

    pub const fn chip_select(&self) -> Option<ChipSelect> {
        if self.found {
            Some(self.chip_select)
        } else {
            None
        }
    }
}

pub const fn is_nand(config1: u32) -> bool {
    (config1 & DEVICETYPE_MASK) == NAND_SIGNATURE
}

/// Find the chip-select NAND is wired to.
///
/// Every chip-select is read, but only the lowest matching one is kept; later matches are
/// traced and otherwise ignored. Reads have no side effects.
pub fn discover_nand_chip_select(gpmc: &impl GpmcConfig) -> ChipSelectProbeResult {
    let count = gpmc.cs_count().min(u8::MAX as usize) as u8;
    let mut nand_cs: Option<ChipSelect> = None;
    for cs in (0..count).map(ChipSelect::from) {
        let config1 = gpmc.read_cs_config1(cs);
        if !is_nand(config1) {
            continue;
        }
        match nand_cs {
            None => nand_cs = Some(cs),
            Some(first) => trace!(
                "GPMC CS{} also tagged NAND (CONFIG1 {:#x}), keeping CS{}.",
                *cs,
                config1,
                *first
            ),
        }
    }
    match nand_cs {
        Some(cs) => ChipSelectProbeResult::found(cs, gpmc.physical_base()),
        None => {
            warn!("NAND: unable to find configuration in GPMC.");
            ChipSelectProbeResult::not_found(count, gpmc.physical_base())
        }
    }
}
