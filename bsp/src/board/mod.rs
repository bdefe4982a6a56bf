//! Resource descriptor registry for the RHINO board.
//!
//! Every table here is immutable `'static` data. [BoardConfiguration] gathers them into the
//! single aggregate the sequencer walks, and [RHINO] holds the one instance built for this
//! board. Nothing mutates the tables after construction; the NAND descriptor is bound to
//! its chip-select by copying, see [nand::NandConfig::bind].

pub mod can;
pub mod descriptor;
pub mod display;
pub mod emac;
pub mod i2c;
pub mod mux;
pub mod nand;
pub mod regulator;
pub mod resource;
pub mod usb;

use alloc::{vec, vec::Vec};
use config::build_flags::{BOOT_PARAMS, NAND_CAPACITY};
use descriptor::{
    DSS_DESCRIPTOR, EHCI_DESCRIPTOR, EMAC_DESCRIPTOR, HECC_DESCRIPTOR, MDIO_DESCRIPTOR,
    MUSB_DESCRIPTOR, NAND_DESCRIPTOR, Payload, PeripheralDescriptor, PeripheralKind,
};
use i2c::{I2cBus, RHINO_I2C_BUSES};
use lazy_static::lazy_static;
use mux::{PinMux, RHINO_BOARD_MUX};
use nand::PartitionError;
use regulator::{RHINO_REGULATORS, RegulatorSpec, find_supply};

#[derive(Debug)]
pub struct BoardConfiguration {
    pub machine: &'static str,
    /// Physical address of the boot parameter block.
    pub boot_params: usize,
    pub mux: &'static [PinMux],
    pub i2c_buses: &'static [I2cBus],
    pub regulators: &'static [RegulatorSpec],
    /// Capacity of the NAND part, used when laying out the remainder partition.
    pub nand_capacity: u64,
    /// Descriptors ordered by rank.
    pub devices: Vec<PeripheralDescriptor>,
}

/// A board table that breaks one of the registry invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// A resource span has `end < start`, or an interrupt span covers more than one line.
    InvalidSpan { peripheral: &'static str },
    /// Two descriptors claim overlapping spans.
    SpanConflict {
        peripheral: &'static str,
        other: &'static str,
    },
    Partition(PartitionError),
    /// A rail with `min_uv != max_uv`; this board only has fixed rails.
    VariableRail { rail: &'static str },
    /// A descriptor names a supply no rail provides.
    UnknownSupply { peripheral: &'static str },
    DuplicateI2cAddress { bus: u8 },
    DuplicateRank { peripheral: &'static str },
}

impl From<PartitionError> for BoardError {
    fn from(value: PartitionError) -> Self {
        BoardError::Partition(value)
    }
}

impl BoardConfiguration {
    pub fn rhino() -> BoardConfiguration {
        let mut devices = vec![
            DSS_DESCRIPTOR,
            NAND_DESCRIPTOR,
            EHCI_DESCRIPTOR,
            HECC_DESCRIPTOR,
            EMAC_DESCRIPTOR,
            MDIO_DESCRIPTOR,
            MUSB_DESCRIPTOR,
        ];
        devices.sort_by_key(|dev| dev.rank);
        BoardConfiguration {
            machine: "RHINO v1",
            boot_params: BOOT_PARAMS,
            mux: &RHINO_BOARD_MUX,
            i2c_buses: &RHINO_I2C_BUSES,
            regulators: &RHINO_REGULATORS,
            nand_capacity: NAND_CAPACITY as u64,
            devices,
        }
    }

    pub fn descriptor(&self, kind: PeripheralKind) -> Option<&PeripheralDescriptor> {
        self.devices.iter().find(|dev| dev.kind == kind)
    }

    /// Rail powering `dev`, if it names a supply.
    pub fn regulator_for(&self, dev: &PeripheralDescriptor) -> Option<&RegulatorSpec> {
        find_supply(self.regulators, dev.supply?)
    }

    /// Check every registry invariant. Run before bring-up; the tables are never
    /// modified afterwards.
    pub fn validate(&self) -> Result<(), BoardError> {
        for (i, dev) in self.devices.iter().enumerate() {
            if !dev.resources.iter().all(|span| span.is_valid()) {
                return Err(BoardError::InvalidSpan {
                    peripheral: dev.name,
                });
            }
            for other in &self.devices[i + 1..] {
                if other.rank == dev.rank {
                    return Err(BoardError::DuplicateRank {
                        peripheral: other.name,
                    });
                }
                let conflict = dev
                    .resources
                    .iter()
                    .any(|a| other.resources.iter().any(|b| a.overlaps(b)));
                if conflict {
                    return Err(BoardError::SpanConflict {
                        peripheral: dev.name,
                        other: other.name,
                    });
                }
            }
            if dev.supply.is_some() && self.regulator_for(dev).is_none() {
                return Err(BoardError::UnknownSupply {
                    peripheral: dev.name,
                });
            }
            if let Payload::Nand(cfg) = dev.payload {
                nand::resolve_partitions(cfg.parts, self.nand_capacity)?;
            }
        }
        if let Some(rail) = self.regulators.iter().find(|rail| !rail.is_fixed()) {
            return Err(BoardError::VariableRail { rail: rail.name });
        }
        if let Some(bus) = self.i2c_buses.iter().find(|bus| !bus.has_unique_addresses()) {
            return Err(BoardError::DuplicateI2cAddress { bus: bus.id });
        }
        Ok(())
    }
}

lazy_static! {
    pub static ref RHINO: BoardConfiguration = BoardConfiguration::rhino();
}
