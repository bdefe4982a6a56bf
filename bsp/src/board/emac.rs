//! Ethernet: the EMAC controller and its MDIO bus.

use super::resource::ResourceSpan;
use crate::callbacks::BringUp;
use config::build_flags::{
    EMAC_CNTRL_MOD_OFFSET, EMAC_CNTRL_OFFSET, EMAC_CNTRL_RAM_OFFSET, EMAC_CNTRL_RAM_SIZE,
    EMAC_HW_RAM_ADDR, EMAC_MDIO_OFFSET, IPSS_EMAC_BASE, IRQ_EMAC_MISC_PULSE, IRQ_EMAC_RX_PULSE,
    IRQ_EMAC_RXTHRESH, IRQ_EMAC_TX_PULSE, MDIO_FREQUENCY,
};
use num_enum::IntoPrimitive;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MdioConfig {
    pub bus_freq_hz: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(u8)]
pub enum EmacVersion {
    V1 = 1,
    V2 = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmacConfig {
    pub rmii: bool,
    pub ctrl_reg_offset: usize,
    pub ctrl_mod_reg_offset: usize,
    pub ctrl_ram_offset: usize,
    pub ctrl_ram_size: usize,
    pub version: EmacVersion,
    pub hw_ram_addr: usize,
    /// Hooks the driver runs to unmask and mask its interrupt pulses.
    pub interrupt_enable: BringUp,
    pub interrupt_disable: BringUp,
}

pub static RHINO_MDIO_CONFIG: MdioConfig = MdioConfig {
    bus_freq_hz: MDIO_FREQUENCY as u32,
};

pub static RHINO_EMAC_CONFIG: EmacConfig = EmacConfig {
    rmii: true,
    ctrl_reg_offset: EMAC_CNTRL_OFFSET,
    ctrl_mod_reg_offset: EMAC_CNTRL_MOD_OFFSET,
    ctrl_ram_offset: EMAC_CNTRL_RAM_OFFSET,
    ctrl_ram_size: EMAC_CNTRL_RAM_SIZE,
    version: EmacVersion::V2,
    hw_ram_addr: EMAC_HW_RAM_ADDR,
    interrupt_enable: BringUp::EmacInterruptEnable,
    interrupt_disable: BringUp::EmacInterruptDisable,
};

pub static MDIO_RESOURCES: [ResourceSpan; 1] =
    [ResourceSpan::memory(IPSS_EMAC_BASE + EMAC_MDIO_OFFSET, 0x1000)];

pub static EMAC_RESOURCES: [ResourceSpan; 5] = [
    ResourceSpan::memory(IPSS_EMAC_BASE, 0x30000),
    ResourceSpan::irq(IRQ_EMAC_RXTHRESH),
    ResourceSpan::irq(IRQ_EMAC_RX_PULSE),
    ResourceSpan::irq(IRQ_EMAC_TX_PULSE),
    ResourceSpan::irq(IRQ_EMAC_MISC_PULSE),
];
