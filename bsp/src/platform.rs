//! The platform framework as seen from the bring-up engine.
//!
//! The platform owns memory mapping, interrupt dispatch and driver binding. The engine
//! only hands it tables and descriptors through [Platform], in a fixed order.

use crate::{
    board::{descriptor::PeripheralDescriptor, i2c::I2cBus, mux::PadConfig, mux::PinMux},
    error::PlatformError,
};
use alloc::string::String;
use utils::define_struct;

define_struct!(id, DeviceHandle, u32);

/// Clock lookup entry: when `alias_dev` asks for clock `alias`, give it the clock
/// `id` of `dev`. `None` matches any connection id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockAlias {
    pub alias: Option<&'static str>,
    pub alias_dev: String,
    pub id: Option<&'static str>,
    pub dev: String,
}

pub trait Platform {
    /// Program the pad configuration table. Must run before any bus is touched.
    fn apply_pin_mux(&mut self, table: &'static [PinMux]);

    /// Register an I2C bus together with the devices attached to it.
    fn register_bus(&mut self, bus: &'static I2cBus) -> Result<(), PlatformError>;

    fn init_serial(&mut self);

    /// Mux a pad to its GPIO function with `config`.
    fn mux_gpio(&mut self, gpio: u16, config: PadConfig) -> Result<(), PlatformError>;

    /// Hand a descriptor to the driver core.
    fn register_device(
        &mut self,
        descriptor: &PeripheralDescriptor,
    ) -> Result<DeviceHandle, PlatformError>;

    /// Add an entry to the clock lookup table, resolved when the consumer probes.
    fn add_clock_alias(&mut self, alias: ClockAlias) -> Result<(), PlatformError>;
}
