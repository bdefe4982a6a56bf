//! TPS65023 power rails and the supplies they feed.

use bitflags::bitflags;

bitflags! {
    /// Operating modes a rail may be switched to.
    pub struct RegulatorModes: u32 {
        const FAST      = 0x1;
        const NORMAL    = 0x2;
        const IDLE      = 0x4;
        const STANDBY   = 0x8;
    }
}

bitflags! {
    /// Operations consumers may perform on a rail.
    pub struct RegulatorOps: u32 {
        const CHANGE_VOLTAGE    = 0x01;
        const CHANGE_CURRENT    = 0x02;
        const CHANGE_MODE       = 0x04;
        const CHANGE_STATUS     = 0x08;
        const CHANGE_DRMS       = 0x10;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegulatorSpec {
    pub name: &'static str,
    pub min_uv: u32,
    pub max_uv: u32,
    pub valid_modes: RegulatorModes,
    pub valid_ops: RegulatorOps,
    pub always_on: bool,
    /// Apply the voltage at registration time instead of keeping the boot setting.
    pub apply_uv: bool,
    /// Consumer supply names bound to this rail, in binding order.
    pub consumers: &'static [&'static str],
}

impl RegulatorSpec {
    /// Fixed-output rails have no voltage range.
    pub const fn is_fixed(&self) -> bool {
        self.min_uv == self.max_uv
    }

    pub fn supplies(&self, supply: &str) -> bool {
        self.consumers.iter().any(|c| *c == supply)
    }
}

/// Find the rail feeding `supply`.
pub fn find_supply<'a>(rails: &'a [RegulatorSpec], supply: &str) -> Option<&'a RegulatorSpec> {
    rails.iter().find(|rail| rail.supplies(supply))
}

const fn fixed_rail(
    name: &'static str,
    uv: u32,
    always_on: bool,
    consumers: &'static [&'static str],
) -> RegulatorSpec {
    RegulatorSpec {
        name,
        min_uv: uv,
        max_uv: uv,
        valid_modes: RegulatorModes::NORMAL,
        valid_ops: RegulatorOps::CHANGE_STATUS,
        always_on,
        apply_uv: false,
        consumers,
    }
}

/// Rails in PMIC output order; the PMIC driver receives them as one table.
pub static RHINO_REGULATORS: [RegulatorSpec; 5] = [
    // VDCDC1 -> VDD_CORE
    fixed_rail("DCDC1", 1_200_000, true, &["vdd_core"]),
    // VDCDC2 -> VDDSHV
    fixed_rail("DCDC2", 3_300_000, true, &["vddshv"]),
    fixed_rail(
        "DCDC3",
        1_800_000,
        true,
        &["vdds", "vdds_sram_core_bg", "vdds_sram_mpu"],
    ),
    fixed_rail("LDO1", 1_800_000, false, &["vdda1p8v_usbphy", "vdda_dac"]),
    fixed_rail("LDO2", 3_300_000, false, &["vdda3p3v_usbphy"]),
];
