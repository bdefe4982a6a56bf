//! Display subsystem (DSS) panels.

use num_enum::IntoPrimitive;

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(u8)]
pub enum DisplayType {
    Dpi = 1 << 0,
    Dbi = 1 << 1,
    Sdi = 1 << 2,
    Dsi = 1 << 3,
    Venc = 1 << 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(u8)]
pub enum VencType {
    Composite = 0,
    SVideo = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPhy {
    Dpi { data_lines: u8 },
    Venc { kind: VencType },
}

/// Panels wired on the board, each with its own enable/disable hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Dvi,
    Tv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayDevice {
    pub panel: Panel,
    pub kind: DisplayType,
    pub name: &'static str,
    pub driver_name: &'static str,
    pub phy: DisplayPhy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayBoard {
    pub devices: &'static [DisplayDevice],
    pub default_device: &'static DisplayDevice,
}

/// S-Video output. Defined for completeness, not listed on this board.
pub const RHINO_TV_DEVICE: DisplayDevice = DisplayDevice {
    panel: Panel::Tv,
    kind: DisplayType::Venc,
    name: "tv",
    driver_name: "venc",
    phy: DisplayPhy::Venc {
        kind: VencType::SVideo,
    },
};

pub const RHINO_DVI_DEVICE: DisplayDevice = DisplayDevice {
    panel: Panel::Dvi,
    kind: DisplayType::Dpi,
    name: "dvi",
    driver_name: "generic_panel",
    phy: DisplayPhy::Dpi { data_lines: 24 },
};

pub static RHINO_DSS_DEVICES: [DisplayDevice; 1] = [RHINO_DVI_DEVICE];

pub static RHINO_DSS_BOARD: DisplayBoard = DisplayBoard {
    devices: &RHINO_DSS_DEVICES,
    default_device: &RHINO_DVI_DEVICE,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dvi_is_the_only_and_default_panel() {
        assert_eq!(RHINO_DSS_BOARD.devices.len(), 1);
        assert_eq!(RHINO_DSS_BOARD.devices[0], RHINO_DVI_DEVICE);
        assert_eq!(RHINO_DSS_BOARD.default_device.panel, Panel::Dvi);
        assert_eq!(
            RHINO_DSS_BOARD.default_device.phy,
            DisplayPhy::Dpi { data_lines: 24 }
        );
        assert_eq!(u8::from(RHINO_TV_DEVICE.kind), 0x10);
    }
}
