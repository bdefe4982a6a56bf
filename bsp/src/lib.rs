//! RHINO v1 board bring-up.
//!
//! Brings the on-board peripherals into a known state at power-on: pads are muxed, buses
//! registered, NAND located on the GPMC, device descriptors handed to the platform and the
//! vendor-specific register sequences applied. See [sequencer] for the order.
//!
//! The platform framework, the peripheral drivers and pad mux programming live outside this
//! crate and are reached through [platform::Platform], [dev::mmio::ControlRegisters] and
//! [dev::gpmc::GpmcConfig].
#![cfg_attr(not(test), no_std)]

extern crate alloc;

#[macro_use]
pub mod console;
#[macro_use]
pub mod logging;
#[macro_use]
mod panic;

pub mod board;
pub mod callbacks;
pub mod dev;
pub mod discovery;
pub mod error;
pub mod platform;
pub mod sequencer;

#[cfg(test)]
mod testing;

use board::BoardConfiguration;
use dev::{gpmc::GpmcConfig, mmio::ControlRegisters};
use platform::Platform;
use sequencer::{BringUpReport, Sequencer};

/// Bring up every peripheral of `board` in one forward pass.
///
/// Individual failures are logged and recorded in the returned report; they never stop
/// the pass.
pub fn bring_up<P, C, G>(
    board: &BoardConfiguration,
    platform: &mut P,
    control: &C,
    gpmc: &G,
) -> BringUpReport
where
    P: Platform,
    C: ControlRegisters,
    G: GpmcConfig,
{
    bsp_println!("Bringing up {}...", board.machine);
    if let Err(err) = board.validate() {
        log::error!("Board tables are inconsistent: {:?}.", err);
    }
    Sequencer::new(board, platform, control, gpmc).run()
}
