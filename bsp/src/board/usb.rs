//! USB: EHCI host ports and the MUSB OTG controller.

use config::build_flags::{EHCI_PHY_RESET_GPIO, MUSB_POWER_MA};
use num_enum::IntoPrimitive;

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(u8)]
pub enum EhciPortMode {
    Unknown = 0,
    Phy = 1,
    Tll = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EhciConfig {
    pub port_mode: [EhciPortMode; 3],
    /// Pulse the PHY reset lines before the controller starts.
    pub phy_reset: bool,
    pub reset_gpio_port: [Option<u16>; 3],
}

impl EhciConfig {
    /// GPIOs that must be muxed as outputs before the controller is registered.
    pub fn reset_gpios(&self) -> impl Iterator<Item = u16> + '_ {
        self.reset_gpio_port.iter().flatten().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(u8)]
pub enum MusbInterface {
    Phy = 0,
    Ulpi = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(u8)]
pub enum MusbMode {
    Undefined = 0,
    Host = 1,
    Peripheral = 2,
    Otg = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MusbConfig {
    pub interface: MusbInterface,
    pub mode: MusbMode,
    /// VBUS budget in mA.
    pub power_ma: u16,
}

pub static RHINO_EHCI_CONFIG: EhciConfig = EhciConfig {
    port_mode: [EhciPortMode::Phy, EhciPortMode::Phy, EhciPortMode::Unknown],
    phy_reset: true,
    reset_gpio_port: [Some(EHCI_PHY_RESET_GPIO as u16), None, None],
};

pub static RHINO_MUSB_CONFIG: MusbConfig = MusbConfig {
    interface: MusbInterface::Ulpi,
    mode: MusbMode::Otg,
    power_ma: MUSB_POWER_MA as u16,
};
