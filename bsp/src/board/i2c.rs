//! I2C buses and the devices attached to them.

use super::regulator::{RHINO_REGULATORS, RegulatorSpec};
use config::build_flags::I2C_BUS_KHZ;

const BUS_HZ: u32 = I2C_BUS_KHZ as u32 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum I2cPlatformData {
    None,
    /// PMIC rails, passed to the regulator driver.
    Regulators(&'static [RegulatorSpec]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I2cBoardInfo {
    pub type_name: &'static str,
    pub addr: u16,
    /// The device may wake the system.
    pub wake: bool,
    pub platform_data: I2cPlatformData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I2cBus {
    pub name: &'static str,
    pub id: u8,
    pub frequency_hz: u32,
    pub devices: &'static [I2cBoardInfo],
}

impl I2cBus {
    /// Whether each 7-bit address appears at most once on the bus.
    pub fn has_unique_addresses(&self) -> bool {
        self.devices
            .iter()
            .enumerate()
            .all(|(i, dev)| self.devices[i + 1..].iter().all(|other| other.addr != dev.addr))
    }
}

pub static RHINO_I2C1_DEVICES: [I2cBoardInfo; 3] = [
    // fan controller
    I2cBoardInfo {
        type_name: "tc654",
        addr: 0x15,
        wake: false,
        platform_data: I2cPlatformData::None,
    },
    I2cBoardInfo {
        type_name: "ina219",
        addr: 0x20,
        wake: false,
        platform_data: I2cPlatformData::None,
    },
    I2cBoardInfo {
        type_name: "tps65023",
        addr: 0x48,
        wake: true,
        platform_data: I2cPlatformData::Regulators(&RHINO_REGULATORS),
    },
];

pub static RHINO_I2C_BUSES: [I2cBus; 3] = [
    I2cBus {
        name: "omap_i2c.1",
        id: 1,
        frequency_hz: BUS_HZ,
        devices: &RHINO_I2C1_DEVICES,
    },
    I2cBus {
        name: "omap_i2c.2",
        id: 2,
        frequency_hz: BUS_HZ,
        devices: &[],
    },
    I2cBus {
        name: "omap_i2c.3",
        id: 3,
        frequency_hz: BUS_HZ,
        devices: &[],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn bus1_carries_three_fixed_addresses() {
        let bus = &RHINO_I2C_BUSES[0];
        assert_eq!(bus.id, 1);
        assert_eq!(bus.frequency_hz, 400_000);
        let addrs: Vec<u16> = bus.devices.iter().map(|d| d.addr).collect();
        assert_eq!(addrs, [0x15, 0x20, 0x48]);
        assert!(bus.has_unique_addresses());
    }

    #[test]
    fn pmic_gets_regulator_table() {
        let pmic = &RHINO_I2C1_DEVICES[2];
        assert_eq!(pmic.type_name, "tps65023");
        assert!(pmic.wake);
        match pmic.platform_data {
            I2cPlatformData::Regulators(rails) => assert_eq!(rails.len(), 5),
            I2cPlatformData::None => panic!("pmic without regulator data"),
        }
    }

    #[test]
    fn duplicate_address_is_detected() {
        static DUP: [I2cBoardInfo; 2] = [
            I2cBoardInfo {
                type_name: "a",
                addr: 0x20,
                wake: false,
                platform_data: I2cPlatformData::None,
            },
            I2cBoardInfo {
                type_name: "b",
                addr: 0x20,
                wake: false,
                platform_data: I2cPlatformData::None,
            },
        ];
        let bus = I2cBus {
            name: "dup",
            id: 9,
            frequency_hz: 100_000,
            devices: &DUP,
        };
        assert!(!bus.has_unique_addresses());
    }
}
