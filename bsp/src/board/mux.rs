//! Pad multiplexing applied before any bus is touched.

use bitflags::bitflags;

bitflags! {
    /// Pad configuration register value.
    pub struct PadConfig: u16 {
        const MODE_MASK     = 0x0007;
        /// GPIO function on most pads.
        const MODE4         = 0x0004;
        const PULL_ENA      = 0x0008;
        const PULL_UP       = 0x0010;
        const INPUT_EN      = 0x0100;
        const OFF_EN        = 0x0200;
        const WAKEUP_EN     = 0x4000;
    }
}

impl PadConfig {
    pub const MODE0: PadConfig = PadConfig::empty();
    pub const OUTPUT: PadConfig = PadConfig::empty();
    pub const INPUT_PULLDOWN: PadConfig =
        PadConfig::from_bits_truncate(PadConfig::PULL_ENA.bits() | PadConfig::INPUT_EN.bits());

    pub const fn with(self, other: PadConfig) -> PadConfig {
        PadConfig::from_bits_truncate(self.bits() | other.bits())
    }

    pub const fn mode(&self) -> u16 {
        self.bits() & PadConfig::MODE_MASK.bits()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinMux {
    pub name: &'static str,
    /// Offset of the pad register in the control module.
    pub reg_offset: u16,
    pub config: PadConfig,
}

pub static RHINO_BOARD_MUX: [PinMux; 1] = [
    // USB OTG DRVVBUS
    PinMux {
        name: "sad2d_mcad23",
        reg_offset: 0x212,
        config: PadConfig::MODE0.with(PadConfig::INPUT_PULLDOWN),
    },
];
