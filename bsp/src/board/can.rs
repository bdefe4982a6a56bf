//! CAN: the high-end CAN controller (HECC).

use super::resource::ResourceSpan;
use config::build_flags::{
    HECC_INT_LINE, HECC_MBOX_OFFSET, HECC_RAM_OFFSET, HECC_SCC_HECC_OFFSET, HECC_SCC_RAM_OFFSET,
    HECC_VERSION, IPSS_HECC_BASE, IRQ_HECC0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeccConfig {
    pub scc_hecc_offset: usize,
    pub scc_ram_offset: usize,
    pub hecc_ram_offset: usize,
    pub mbx_offset: usize,
    pub int_line: u8,
    pub version: u8,
}

pub static RHINO_HECC_CONFIG: HeccConfig = HeccConfig {
    scc_hecc_offset: HECC_SCC_HECC_OFFSET,
    scc_ram_offset: HECC_SCC_RAM_OFFSET,
    hecc_ram_offset: HECC_RAM_OFFSET,
    mbx_offset: HECC_MBOX_OFFSET,
    int_line: HECC_INT_LINE as u8,
    version: HECC_VERSION as u8,
};

pub static HECC_RESOURCES: [ResourceSpan; 2] = [
    ResourceSpan::memory(IPSS_HECC_BASE, 0x4000),
    ResourceSpan::irq(IRQ_HECC0),
];
