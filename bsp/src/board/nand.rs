//! NAND flash on the GPMC: partition layout and the platform data handed to the
//! `omap2-nand` driver.

use super::resource::ResourceSpan;
use crate::dev::{ChipSelect, PhysAddr};
use crate::discovery::ChipSelectProbeResult;
use alloc::vec::Vec;
use config::build_flags::{GPMC_BASE, GPMC_SIZE, NAND_BLOCK_SIZE};

const BLOCK: u64 = NAND_BLOCK_SIZE as u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionOffset {
    Absolute(u64),
    /// Start where the previous partition ends.
    Append,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionSize {
    Bytes(u64),
    /// Everything up to the end of the device. Only valid on the last partition.
    Remainder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionEntry {
    pub name: &'static str,
    pub offset: PartitionOffset,
    pub size: PartitionSize,
    pub writable: bool,
}

/// A partition placed on a device of known capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPartition {
    pub name: &'static str,
    pub offset: u64,
    pub size: u64,
    pub writable: bool,
}

impl ResolvedPartition {
    pub const fn end(&self) -> u64 {
        self.offset + self.size
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionError {
    /// A `Remainder` partition is followed by another entry.
    RemainderNotLast { name: &'static str },
    /// An absolute offset points inside the previous partition.
    Overlap { name: &'static str },
    /// The partition does not fit on the device.
    ExceedsCapacity { name: &'static str },
    /// The partition has no bytes.
    Empty { name: &'static str },
}

/// Check the layout without a device: a `Remainder` entry may only appear last, which
/// also rules out more than one of them.
pub fn validate_layout(parts: &[PartitionEntry]) -> Result<(), PartitionError> {
    let last = parts.len().saturating_sub(1);
    for (i, part) in parts.iter().enumerate() {
        match part.size {
            PartitionSize::Remainder if i != last => {
                return Err(PartitionError::RemainderNotLast { name: part.name });
            }
            PartitionSize::Bytes(0) => return Err(PartitionError::Empty { name: part.name }),
            _ => {}
        }
    }
    Ok(())
}

/// Place every partition on a device of `capacity` bytes.
pub fn resolve_partitions(
    parts: &[PartitionEntry],
    capacity: u64,
) -> Result<Vec<ResolvedPartition>, PartitionError> {
    validate_layout(parts)?;
    let mut res = Vec::with_capacity(parts.len());
    let mut cursor = 0u64;
    for part in parts {
        let offset = match part.offset {
            PartitionOffset::Append => cursor,
            PartitionOffset::Absolute(offset) if offset < cursor => {
                return Err(PartitionError::Overlap { name: part.name });
            }
            PartitionOffset::Absolute(offset) => offset,
        };
        if offset >= capacity {
            return Err(PartitionError::ExceedsCapacity { name: part.name });
        }
        let size = match part.size {
            PartitionSize::Bytes(size) => size,
            PartitionSize::Remainder => capacity - offset,
        };
        if size > capacity - offset {
            return Err(PartitionError::ExceedsCapacity { name: part.name });
        }
        res.push(ResolvedPartition {
            name: part.name,
            offset,
            size,
            writable: part.writable,
        });
        cursor = offset + size;
    }
    Ok(res)
}

/// Partition sizes are whole erase blocks.
pub const RHINO_NAND_PARTITIONS: [PartitionEntry; 5] = [
    PartitionEntry {
        name: "xloader-nand",
        offset: PartitionOffset::Absolute(0),
        size: PartitionSize::Bytes(4 * BLOCK),
        writable: false,
    },
    PartitionEntry {
        name: "uboot-nand",
        offset: PartitionOffset::Append,
        size: PartitionSize::Bytes(14 * BLOCK),
        writable: false,
    },
    PartitionEntry {
        name: "params-nand",
        offset: PartitionOffset::Append,
        size: PartitionSize::Bytes(2 * BLOCK),
        writable: true,
    },
    PartitionEntry {
        name: "linux-nand",
        offset: PartitionOffset::Append,
        size: PartitionSize::Bytes(40 * BLOCK),
        writable: true,
    },
    PartitionEntry {
        name: "jffs2-nand",
        offset: PartitionOffset::Append,
        size: PartitionSize::Remainder,
        writable: true,
    },
];

/// Platform data for the NAND driver. The chip-select and base stay empty until
/// discovery fills them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NandConfig {
    pub parts: &'static [PartitionEntry],
    pub chip_select: Option<ChipSelect>,
    pub phys_base: Option<PhysAddr>,
    /// `None` disables DMA in the driver.
    pub dma_channel: Option<u8>,
}

impl NandConfig {
    /// Copy of the config bound to the probed chip-select, or `None` when nothing was found.
    pub fn bind(&self, probe: &ChipSelectProbeResult) -> Option<NandConfig> {
        let cs = probe.chip_select()?;
        Some(NandConfig {
            chip_select: Some(cs),
            phys_base: Some(probe.physical_base),
            ..*self
        })
    }
}

pub const RHINO_NAND_CONFIG: NandConfig = NandConfig {
    parts: &RHINO_NAND_PARTITIONS,
    chip_select: None,
    phys_base: None,
    dma_channel: None,
};

pub static NAND_RESOURCES: [ResourceSpan; 1] = [ResourceSpan::memory(GPMC_BASE, GPMC_SIZE)];
