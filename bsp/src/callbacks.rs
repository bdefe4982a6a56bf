//! Bring-up callbacks.
//!
//! Each [BringUp] variant is a short read-modify-write sequence on the system control
//! module, or a panel hook. Callbacks never block and never fail, and applying one twice
//! leaves the register as applying it once did. Callbacks of different peripherals touch
//! disjoint bit fields, so they may run in any order relative to each other.

use crate::{board::display::Panel, dev::mmio::ControlRegisters};
use bitflags::bitflags;
use config::build_flags::{CONTROL_DEVCONF2, CONTROL_IP_SW_RESET, CONTROL_LVL_INTR_CLEAR};

bitflags! {
    /// CONTROL_LVL_INTR_CLEAR: writing 1 clears a latched level interrupt.
    pub struct LvlIntrClear: u32 {
        const CPGMAC_C0_MISC_PULSE  = 1 << 0;
        const CPGMAC_C0_RX_PULSE    = 1 << 1;
        const CPGMAC_C0_RX_THRESH   = 1 << 2;
        const CPGMAC_C0_TX_PULSE    = 1 << 3;
        const USBOTGSS_INT          = 1 << 4;
        const VPFE_CCDC_VD0_INT     = 1 << 5;
        const VPFE_CCDC_VD1_INT     = 1 << 6;
        const VPFE_CCDC_VD2_INT     = 1 << 7;
    }
}

bitflags! {
    /// CONTROL_IP_SW_RESET: a set bit holds the subsystem in reset.
    pub struct IpSwReset: u32 {
        const USBOTGSS  = 1 << 0;
        const CPGMACSS  = 1 << 1;
        const VPFE      = 1 << 2;
        const HECC      = 1 << 3;
    }
}

bitflags! {
    /// CONTROL_DEVCONF2: USB PHY and OTG configuration.
    pub struct Devconf2: u32 {
        const DATPOL        = 1 << 1;
        const OTGMODE       = 0b11 << 4;
        const REFFREQ       = 0xf << 8;
        const REFFREQ_13MHZ = 0x6 << 8;
        const VBDTCTEN      = 1 << 12;
        const SESENDEN      = 1 << 13;
        const PHY_PLLON     = 1 << 14;
        const PHY_GPIOMODE  = 1 << 23;
    }
}

bitflags! {
    /// Callbacks already run in the current bring-up pass.
    pub struct CallbackSet: u8 {
        const EMAC_INT_ENABLE       = 1 << 0;
        const EMAC_INT_DISABLE      = 1 << 1;
        const EMAC_SOFT_RESET       = 1 << 2;
        const USB_PHY_MODE          = 1 << 3;
        const DVI_ENABLE            = 1 << 4;
        const DVI_DISABLE           = 1 << 5;
        const TV_ENABLE             = 1 << 6;
        const TV_DISABLE            = 1 << 7;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BringUp {
    /// Clear all four EMAC level interrupts so the MAC can raise new ones.
    EmacInterruptEnable,
    /// Clear the RX and TX pulse interrupts only.
    EmacInterruptDisable,
    /// Take the EMAC subsystem out of software reset.
    EmacSoftResetRelease,
    /// Select the 13 MHz PHY reference clock and OTG session/VBUS detection.
    UsbPhyClockMode,
    DisplayEnable(Panel),
    DisplayDisable(Panel),
}

impl BringUp {
    pub const fn name(&self) -> &'static str {
        match self {
            BringUp::EmacInterruptEnable => "emac-int-enable",
            BringUp::EmacInterruptDisable => "emac-int-disable",
            BringUp::EmacSoftResetRelease => "emac-soft-reset",
            BringUp::UsbPhyClockMode => "usb-phy-mode",
            BringUp::DisplayEnable(Panel::Dvi) => "dvi-enable",
            BringUp::DisplayDisable(Panel::Dvi) => "dvi-disable",
            BringUp::DisplayEnable(Panel::Tv) => "tv-enable",
            BringUp::DisplayDisable(Panel::Tv) => "tv-disable",
        }
    }

    pub const fn flag(&self) -> CallbackSet {
        match self {
            BringUp::EmacInterruptEnable => CallbackSet::EMAC_INT_ENABLE,
            BringUp::EmacInterruptDisable => CallbackSet::EMAC_INT_DISABLE,
            BringUp::EmacSoftResetRelease => CallbackSet::EMAC_SOFT_RESET,
            BringUp::UsbPhyClockMode => CallbackSet::USB_PHY_MODE,
            BringUp::DisplayEnable(Panel::Dvi) => CallbackSet::DVI_ENABLE,
            BringUp::DisplayDisable(Panel::Dvi) => CallbackSet::DVI_DISABLE,
            BringUp::DisplayEnable(Panel::Tv) => CallbackSet::TV_ENABLE,
            BringUp::DisplayDisable(Panel::Tv) => CallbackSet::TV_DISABLE,
        }
    }

    /// Run the callback against the control module.
    ///
    /// Return the register value read back after the write, or `None` for hooks that
    /// touch no register.
    pub fn apply<C: ControlRegisters + ?Sized>(&self, ctrl: &C) -> Option<u32> {
        let readback = match self {
            BringUp::EmacInterruptEnable => ctrl.update(
                CONTROL_LVL_INTR_CLEAR,
                0,
                (LvlIntrClear::CPGMAC_C0_RX_PULSE
                    | LvlIntrClear::CPGMAC_C0_TX_PULSE
                    | LvlIntrClear::CPGMAC_C0_MISC_PULSE
                    | LvlIntrClear::CPGMAC_C0_RX_THRESH)
                    .bits(),
            ),
            BringUp::EmacInterruptDisable => ctrl.update(
                CONTROL_LVL_INTR_CLEAR,
                0,
                (LvlIntrClear::CPGMAC_C0_RX_PULSE | LvlIntrClear::CPGMAC_C0_TX_PULSE).bits(),
            ),
            BringUp::EmacSoftResetRelease => {
                ctrl.update(CONTROL_IP_SW_RESET, IpSwReset::CPGMACSS.bits(), 0)
            }
            BringUp::UsbPhyClockMode => ctrl.update(
                CONTROL_DEVCONF2,
                (Devconf2::REFFREQ | Devconf2::OTGMODE | Devconf2::PHY_GPIOMODE).bits(),
                (Devconf2::REFFREQ_13MHZ
                    | Devconf2::SESENDEN
                    | Devconf2::VBDTCTEN
                    | Devconf2::DATPOL)
                    .bits(),
            ),
            BringUp::DisplayEnable(_) | BringUp::DisplayDisable(_) => {
                debug_ex!("Panel hook '{}'.", self.name());
                return None;
            }
        };
        debug_ex!("Callback '{}' read back {:#010x}.", self.name(), readback);
        Some(readback)
    }
}
