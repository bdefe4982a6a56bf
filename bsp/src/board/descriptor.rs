//! Peripheral descriptors handed to the platform for driver binding.

use super::{
    can::{HECC_RESOURCES, HeccConfig, RHINO_HECC_CONFIG},
    display::{DisplayBoard, RHINO_DSS_BOARD},
    emac::{
        EMAC_RESOURCES, EmacConfig, MDIO_RESOURCES, MdioConfig, RHINO_EMAC_CONFIG,
        RHINO_MDIO_CONFIG,
    },
    nand::{NAND_RESOURCES, NandConfig, RHINO_NAND_CONFIG},
    resource::ResourceSpan,
    usb::{EhciConfig, MusbConfig, RHINO_EHCI_CONFIG, RHINO_MUSB_CONFIG},
};
use alloc::{format, string::String};
use core::fmt::Display;

/// Instance number of a device; `Single` marks the only instance of its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceId {
    Single,
    Index(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PeripheralKind {
    Display,
    Nand,
    UsbHost,
    Can,
    EthernetMac,
    EthernetMdio,
    UsbOtg,
}

impl PeripheralKind {
    pub const fn label(&self) -> &'static str {
        match self {
            PeripheralKind::Display => "display",
            PeripheralKind::Nand => "nand",
            PeripheralKind::UsbHost => "usb-host",
            PeripheralKind::Can => "can",
            PeripheralKind::EthernetMac => "ethernet-mac",
            PeripheralKind::EthernetMdio => "ethernet-mdio",
            PeripheralKind::UsbOtg => "usb-otg",
        }
    }
}

/// Driver-specific configuration attached to a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    None,
    Display(&'static DisplayBoard),
    Nand(NandConfig),
    Ehci(&'static EhciConfig),
    Can(&'static HeccConfig),
    Emac(&'static EmacConfig),
    Mdio(&'static MdioConfig),
    Musb(&'static MusbConfig),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeripheralDescriptor {
    /// Driver name the platform binds against.
    pub name: &'static str,
    pub id: InstanceId,
    pub kind: PeripheralKind,
    pub resources: &'static [ResourceSpan],
    pub payload: Payload,
    /// Regulator consumer supply powering the peripheral, if it has a dedicated one.
    pub supply: Option<&'static str>,
    /// Position in the registration order; lower registers first.
    pub rank: u8,
}

impl PeripheralDescriptor {
    /// Device name as the platform reports it: `name` or `name.id`.
    pub fn dev_name(&self) -> String {
        match self.id {
            InstanceId::Single => String::from(self.name),
            InstanceId::Index(id) => format!("{}.{}", self.name, id),
        }
    }

    pub fn with_payload(&self, payload: Payload) -> PeripheralDescriptor {
        PeripheralDescriptor { payload, ..*self }
    }
}

impl Display for PeripheralDescriptor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.id {
            InstanceId::Single => f.write_str(self.name),
            InstanceId::Index(id) => f.write_fmt(format_args!("{}.{}", self.name, id)),
        }
    }
}

pub static DSS_DESCRIPTOR: PeripheralDescriptor = PeripheralDescriptor {
    name: "omapdss",
    id: InstanceId::Single,
    kind: PeripheralKind::Display,
    resources: &[],
    payload: Payload::Display(&RHINO_DSS_BOARD),
    supply: Some("vdda_dac"),
    rank: 0,
};

pub static NAND_DESCRIPTOR: PeripheralDescriptor = PeripheralDescriptor {
    name: "omap2-nand",
    id: InstanceId::Index(0),
    kind: PeripheralKind::Nand,
    resources: &NAND_RESOURCES,
    payload: Payload::Nand(RHINO_NAND_CONFIG),
    supply: None,
    rank: 1,
};

pub static EHCI_DESCRIPTOR: PeripheralDescriptor = PeripheralDescriptor {
    name: "ehci-omap",
    id: InstanceId::Index(0),
    kind: PeripheralKind::UsbHost,
    resources: &[],
    payload: Payload::Ehci(&RHINO_EHCI_CONFIG),
    supply: Some("vdda1p8v_usbphy"),
    rank: 2,
};

pub static HECC_DESCRIPTOR: PeripheralDescriptor = PeripheralDescriptor {
    name: "ti_hecc",
    id: InstanceId::Single,
    kind: PeripheralKind::Can,
    resources: &HECC_RESOURCES,
    payload: Payload::Can(&RHINO_HECC_CONFIG),
    supply: None,
    rank: 3,
};

pub static EMAC_DESCRIPTOR: PeripheralDescriptor = PeripheralDescriptor {
    name: "davinci_emac",
    id: InstanceId::Single,
    kind: PeripheralKind::EthernetMac,
    resources: &EMAC_RESOURCES,
    payload: Payload::Emac(&RHINO_EMAC_CONFIG),
    supply: None,
    rank: 4,
};

pub static MDIO_DESCRIPTOR: PeripheralDescriptor = PeripheralDescriptor {
    name: "davinci_mdio",
    id: InstanceId::Index(0),
    kind: PeripheralKind::EthernetMdio,
    resources: &MDIO_RESOURCES,
    payload: Payload::Mdio(&RHINO_MDIO_CONFIG),
    supply: None,
    rank: 5,
};

pub static MUSB_DESCRIPTOR: PeripheralDescriptor = PeripheralDescriptor {
    name: "musb-am35x",
    id: InstanceId::Single,
    kind: PeripheralKind::UsbOtg,
    resources: &[],
    payload: Payload::Musb(&RHINO_MUSB_CONFIG),
    supply: Some("vdda3p3v_usbphy"),
    rank: 6,
};
