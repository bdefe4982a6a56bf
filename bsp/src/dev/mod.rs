//! Register access for the on-chip blocks the bring-up engine touches directly.

pub mod gpmc;
pub mod mmio;

use utils::define_struct;

define_struct!(addr, PhysAddr, usize);
define_struct!(id, ChipSelect, u8);
