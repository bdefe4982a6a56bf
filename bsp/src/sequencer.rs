//! Bring-up sequencing.
//!
//! The board comes up through a fixed chain of states:
//!
//! ```text
//! Reset -> MuxApplied -> BusReady -> DiscoveryDone -> DevicesRegistered -> PeripheralsConfigured
//! ```
//!
//! - `MuxApplied`: pad mux table programmed.
//! - `BusReady`: I2C buses registered with their devices, serial ports up.
//! - `DiscoveryDone`: display devices registered, NAND chip-select probed.
//! - `DevicesRegistered`: NAND (when found), EHCI after its PHY reset GPIO is muxed, CAN.
//! - `PeripheralsConfigured`: Ethernet MAC and MDIO with their clock alias, soft reset and
//!   interrupt callbacks, then the USB PHY mode and the OTG controller last.
//!
//! The sequence only moves forward. A peripheral that fails is recorded in the
//! [BringUpReport] and left unavailable; the rest of the board still comes up.

use crate::{
    board::{
        BoardConfiguration,
        descriptor::{Payload, PeripheralDescriptor, PeripheralKind},
        mux::PadConfig,
        nand::{NandConfig, resolve_partitions},
    },
    callbacks::{BringUp, CallbackSet},
    dev::{gpmc::GpmcConfig, mmio::ControlRegisters},
    discovery::{ChipSelectProbeResult, discover_nand_chip_select},
    error::BringUpError,
    platform::{ClockAlias, DeviceHandle, Platform},
};
use alloc::{vec, vec::Vec};
use log::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BringUpState {
    Reset,
    MuxApplied,
    BusReady,
    DiscoveryDone,
    DevicesRegistered,
    PeripheralsConfigured,
}

impl BringUpState {
    pub const fn next(self) -> Option<BringUpState> {
        match self {
            BringUpState::Reset => Some(BringUpState::MuxApplied),
            BringUpState::MuxApplied => Some(BringUpState::BusReady),
            BringUpState::BusReady => Some(BringUpState::DiscoveryDone),
            BringUpState::DiscoveryDone => Some(BringUpState::DevicesRegistered),
            BringUpState::DevicesRegistered => Some(BringUpState::PeripheralsConfigured),
            BringUpState::PeripheralsConfigured => None,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, BringUpState::PeripheralsConfigured)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The platform accepted the descriptor.
    Registered(DeviceHandle),
    /// A bus came up; buses have no device handle.
    Ready,
    Unavailable(BringUpError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeripheralOutcome {
    pub name: &'static str,
    pub outcome: Outcome,
}

/// What one bring-up pass did, in order.
#[derive(Debug, Default)]
pub struct BringUpReport {
    pub trace: Vec<BringUpState>,
    pub peripherals: Vec<PeripheralOutcome>,
    pub nand_probe: Option<ChipSelectProbeResult>,
    /// Register values read back after each callback, for diagnostics.
    pub readbacks: Vec<(BringUp, u32)>,
}

impl BringUpReport {
    pub fn outcome(&self, name: &str) -> Option<Outcome> {
        self.peripherals
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.outcome)
    }

    pub fn is_available(&self, name: &str) -> bool {
        matches!(
            self.outcome(name),
            Some(Outcome::Registered(_)) | Some(Outcome::Ready)
        )
    }

    pub fn failures(&self) -> impl Iterator<Item = &BringUpError> {
        self.peripherals.iter().filter_map(|p| match &p.outcome {
            Outcome::Unavailable(err) => Some(err),
            _ => None,
        })
    }

    pub fn readback(&self, cb: BringUp) -> Option<u32> {
        self.readbacks
            .iter()
            .find(|(done, _)| *done == cb)
            .map(|(_, value)| *value)
    }
}

pub struct Sequencer<'a, P: Platform, C: ControlRegisters, G: GpmcConfig> {
    board: &'a BoardConfiguration,
    platform: &'a mut P,
    control: &'a C,
    gpmc: &'a G,
    state: BringUpState,
    invoked: CallbackSet,
    report: BringUpReport,
}

impl<'a, P: Platform, C: ControlRegisters, G: GpmcConfig> Sequencer<'a, P, C, G> {
    pub fn new(
        board: &'a BoardConfiguration,
        platform: &'a mut P,
        control: &'a C,
        gpmc: &'a G,
    ) -> Sequencer<'a, P, C, G> {
        Sequencer {
            board,
            platform,
            control,
            gpmc,
            state: BringUpState::Reset,
            invoked: CallbackSet::empty(),
            report: BringUpReport {
                trace: vec![BringUpState::Reset],
                ..BringUpReport::default()
            },
        }
    }

    pub fn state(&self) -> BringUpState {
        self.state
    }

    pub fn report(&self) -> &BringUpReport {
        &self.report
    }

    /// Do the work of the next transition and advance.
    ///
    /// Return the state reached, or `None` if the sequence had already finished.
    pub fn step(&mut self) -> Option<BringUpState> {
        let next = self.state.next()?;
        match self.state {
            BringUpState::Reset => self.apply_mux(),
            BringUpState::MuxApplied => self.init_buses(),
            BringUpState::BusReady => self.discover_storage(),
            BringUpState::DiscoveryDone => self.register_devices(),
            BringUpState::DevicesRegistered => self.configure_peripherals(),
            BringUpState::PeripheralsConfigured => return None,
        }
        debug_ex!("Bring-up: {:?} -> {:?}.", self.state, next);
        self.state = next;
        self.report.trace.push(next);
        Some(next)
    }

    /// Run the remaining transitions and hand back the report.
    pub fn run(mut self) -> BringUpReport {
        while self.step().is_some() {}
        let failed = self.report.failures().count();
        info!(
            "{} bring-up finished: {} peripherals up, {} unavailable.",
            self.board.machine,
            self.report.peripherals.len() - failed,
            failed
        );
        self.report
    }

    /// Run a bring-up callback unless it already ran in this pass.
    ///
    /// Return the diagnostic read-back, or `None` for register-less hooks and refused
    /// repeat invocations.
    pub fn invoke(&mut self, cb: BringUp) -> Option<u32> {
        if self.invoked.contains(cb.flag()) {
            warn!("Callback '{}' already ran in this pass, skipped.", cb.name());
            return None;
        }
        self.invoked.insert(cb.flag());
        let readback = cb.apply(self.control)?;
        self.report.readbacks.push((cb, readback));
        Some(readback)
    }

    fn record(&mut self, name: &'static str, outcome: Outcome) {
        self.report
            .peripherals
            .push(PeripheralOutcome { name, outcome });
    }

    fn fail(&mut self, err: BringUpError) {
        match err {
            BringUpError::ConfigurationNotFound { .. } => warn!("{}, skipped.", err),
            BringUpError::RegistrationFailed { .. } => error!("{}.", err),
        }
        self.record(err.peripheral(), Outcome::Unavailable(err));
    }

    fn descriptor(&mut self, kind: PeripheralKind) -> Option<&'a PeripheralDescriptor> {
        let board = self.board;
        let res = board.descriptor(kind);
        if res.is_none() {
            self.fail(BringUpError::ConfigurationNotFound {
                peripheral: kind.label(),
            });
        }
        res
    }

    fn register(&mut self, desc: &PeripheralDescriptor) -> Option<DeviceHandle> {
        match self.platform.register_device(desc) {
            Ok(handle) => {
                info!("Registered {} as device #{}.", desc, *handle);
                self.record(desc.name, Outcome::Registered(handle));
                Some(handle)
            }
            Err(cause) => {
                self.fail(BringUpError::RegistrationFailed {
                    peripheral: desc.name,
                    cause,
                });
                None
            }
        }
    }

    fn register_kind(&mut self, kind: PeripheralKind) -> Option<&'a PeripheralDescriptor> {
        let desc = self.descriptor(kind)?;
        self.register(desc).map(|_| desc)
    }

    fn apply_mux(&mut self) {
        debug_ex!("Applying {} pad mux entries.", self.board.mux.len());
        self.platform.apply_pin_mux(self.board.mux);
    }

    fn init_buses(&mut self) {
        let board = self.board;
        for bus in board.i2c_buses {
            match self.platform.register_bus(bus) {
                Ok(()) => {
                    info!(
                        "Registered I2C bus {} at {} kHz with {} devices.",
                        bus.id,
                        bus.frequency_hz / 1000,
                        bus.devices.len()
                    );
                    self.record(bus.name, Outcome::Ready);
                }
                Err(cause) => self.fail(BringUpError::RegistrationFailed {
                    peripheral: bus.name,
                    cause,
                }),
            }
        }
        self.platform.init_serial();
    }

    fn discover_storage(&mut self) {
        if let Some(dss) = self.register_kind(PeripheralKind::Display) {
            if let Payload::Display(dss_board) = dss.payload {
                self.invoke(BringUp::DisplayEnable(dss_board.default_device.panel));
            }
        }
        let probe = discover_nand_chip_select(self.gpmc);
        if let Some(cs) = probe.chip_select() {
            info!(
                "NAND found on GPMC CS{} (base {}).",
                *cs, probe.physical_base
            );
        }
        self.report.nand_probe = Some(probe);
    }

    fn register_devices(&mut self) {
        self.register_nand();
        self.register_usb_host();
        self.register_kind(PeripheralKind::Can);
    }

    fn register_nand(&mut self) {
        let Some(desc) = self.descriptor(PeripheralKind::Nand) else {
            return;
        };
        let bound = match (desc.payload, self.report.nand_probe) {
            (Payload::Nand(cfg), Some(probe)) => cfg.bind(&probe),
            _ => None,
        };
        match bound {
            Some(cfg) => {
                if self.register(&desc.with_payload(Payload::Nand(cfg))).is_some() {
                    self.log_partitions(&cfg);
                }
            }
            None => self.fail(BringUpError::ConfigurationNotFound {
                peripheral: desc.name,
            }),
        }
    }

    fn log_partitions(&self, cfg: &NandConfig) {
        match resolve_partitions(cfg.parts, self.board.nand_capacity) {
            Ok(parts) => {
                for part in parts {
                    debug_ex!(
                        "\t{:<14} {:#010x}..{:#010x}{}",
                        part.name,
                        part.offset,
                        part.end(),
                        if part.writable { "" } else { " (ro)" }
                    );
                }
            }
            Err(err) => warn!("NAND partition table does not fit the device: {:?}.", err),
        }
    }

    fn register_usb_host(&mut self) {
        let Some(desc) = self.descriptor(PeripheralKind::UsbHost) else {
            return;
        };
        if let Payload::Ehci(ehci) = desc.payload {
            for gpio in ehci.reset_gpios() {
                let pad = PadConfig::MODE4.with(PadConfig::OUTPUT);
                if let Err(cause) = self.platform.mux_gpio(gpio, pad) {
                    // The PHY reset line cannot be driven, so the host controller would
                    // come up with its PHY stuck.
                    self.fail(BringUpError::RegistrationFailed {
                        peripheral: desc.name,
                        cause,
                    });
                    return;
                }
            }
        }
        self.register(desc);
    }

    fn configure_peripherals(&mut self) {
        self.configure_ethernet();
        self.configure_usb_otg();
    }

    fn configure_ethernet(&mut self) {
        let emac = self.register_kind(PeripheralKind::EthernetMac);
        let mdio = self.register_kind(PeripheralKind::EthernetMdio);
        let Some(emac) = emac else {
            return;
        };
        if let Some(mdio) = mdio {
            let alias = ClockAlias {
                alias: None,
                alias_dev: mdio.dev_name(),
                id: None,
                dev: emac.dev_name(),
            };
            if let Err(cause) = self.platform.add_clock_alias(alias) {
                error!("Unable to alias {} clock to {}: {}.", mdio, emac, cause);
            }
        }
        self.invoke(BringUp::EmacSoftResetRelease);
        if let Payload::Emac(cfg) = emac.payload {
            self.invoke(cfg.interrupt_enable);
        }
    }

    fn configure_usb_otg(&mut self) {
        if self.board.descriptor(PeripheralKind::UsbOtg).is_some() {
            self.invoke(BringUp::UsbPhyClockMode);
        }
        self.register_kind(PeripheralKind::UsbOtg);
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        board::{RHINO, resource::ResourceSpan},
        dev::ChipSelect,
        error::PlatformError,
        testing::{Call, FakeControl, FakeGpmc, Journal, RecordingPlatform},
    };
    use alloc::string::String;
    use config::build_flags::{CONTROL_DEVCONF2, CONTROL_IP_SW_RESET, CONTROL_LVL_INTR_CLEAR};

    const NAND_ON_CS1: [u32; 3] = [0x000, 0x800, 0x400];
    const NO_NAND: [u32; 8] = [0x000, 0x400, 0xc00, 0x1000, 0, 0, 0x400, 0];

    struct Pass {
        report: BringUpReport,
        journal: Journal,
        control: FakeControl,
    }

    fn run_pass(
        config1: &[u32],
        setup: impl FnOnce(RecordingPlatform) -> RecordingPlatform,
    ) -> Pass {
        let journal = Journal::new();
        let mut platform = setup(RecordingPlatform::new(journal.clone()));
        let control = FakeControl::with_journal(journal.clone());
        let gpmc = FakeGpmc::with_journal(config1, journal.clone());
        let report = Sequencer::new(&RHINO, &mut platform, &control, &gpmc).run();
        Pass {
            report,
            journal,
            control,
        }
    }

    #[test]
    fn full_pass_follows_dependency_order() {
        let pass = run_pass(&NAND_ON_CS1, |p| p);
        assert_eq!(
            pass.journal.calls(),
            [
                Call::PinMux(1),
                Call::Bus(1),
                Call::Bus(2),
                Call::Bus(3),
                Call::Serial,
                Call::Device("omapdss"),
                Call::ReadCs(0),
                Call::ReadCs(1),
                Call::ReadCs(2),
                Call::Device("omap2-nand"),
                Call::Gpio(57, 0x4),
                Call::Device("ehci-omap"),
                Call::Device("ti_hecc"),
                Call::Device("davinci_emac"),
                Call::Device("davinci_mdio"),
                Call::ClockAlias(String::from("davinci_mdio.0"), String::from("davinci_emac")),
                Call::Write(CONTROL_IP_SW_RESET, 0),
                Call::Write(CONTROL_LVL_INTR_CLEAR, 0xf),
                Call::Write(CONTROL_DEVCONF2, 0x3602),
                Call::Device("musb-am35x"),
            ]
        );
        assert_eq!(pass.report.failures().count(), 0);
    }

    #[test]
    fn pass_visits_every_state_once() {
        let pass = run_pass(&NAND_ON_CS1, |p| p);
        assert_eq!(
            pass.report.trace,
            [
                BringUpState::Reset,
                BringUpState::MuxApplied,
                BringUpState::BusReady,
                BringUpState::DiscoveryDone,
                BringUpState::DevicesRegistered,
                BringUpState::PeripheralsConfigured,
            ]
        );
    }

    #[test]
    fn step_stops_at_terminal_state() {
        let journal = Journal::new();
        let mut platform = RecordingPlatform::new(journal.clone());
        let control = FakeControl::new();
        let gpmc = FakeGpmc::new(&NAND_ON_CS1);
        let mut seq = Sequencer::new(&RHINO, &mut platform, &control, &gpmc);
        assert_eq!(seq.step(), Some(BringUpState::MuxApplied));
        assert_eq!(journal.calls(), [Call::PinMux(1)]);
        assert_eq!(seq.step(), Some(BringUpState::BusReady));
        assert_eq!(seq.step(), Some(BringUpState::DiscoveryDone));
        assert_eq!(seq.step(), Some(BringUpState::DevicesRegistered));
        assert_eq!(seq.step(), Some(BringUpState::PeripheralsConfigured));
        assert!(seq.state().is_terminal());
        assert_eq!(seq.step(), None);
        assert_eq!(seq.report().trace.len(), 6);
    }

    #[test]
    fn pin_mux_precedes_every_bus() {
        let pass = run_pass(&NAND_ON_CS1, |p| p);
        let mux = pass.journal.position(&Call::PinMux(1)).unwrap();
        for id in 1..=3 {
            assert!(mux < pass.journal.position(&Call::Bus(id)).unwrap());
        }
    }

    #[test]
    fn discovery_precedes_nand_registration() {
        let pass = run_pass(&NAND_ON_CS1, |p| p);
        let nand = pass.journal.position(&Call::Device("omap2-nand")).unwrap();
        let last_read = pass
            .journal
            .calls()
            .iter()
            .rposition(|c| matches!(c, Call::ReadCs(_)))
            .unwrap();
        assert!(last_read < nand);
        let probe = pass.report.nand_probe.unwrap();
        assert_eq!(probe.chip_select(), Some(ChipSelect::from(1)));
    }

    #[test]
    fn missing_nand_does_not_stop_the_board() {
        let pass = run_pass(&NO_NAND, |p| p);
        assert_eq!(
            pass.report.outcome("omap2-nand"),
            Some(Outcome::Unavailable(BringUpError::ConfigurationNotFound {
                peripheral: "omap2-nand"
            }))
        );
        assert_eq!(pass.journal.position(&Call::Device("omap2-nand")), None);
        for name in [
            "omapdss",
            "ehci-omap",
            "ti_hecc",
            "davinci_emac",
            "davinci_mdio",
            "musb-am35x",
            "omap_i2c.1",
        ] {
            assert!(pass.report.is_available(name), "{} unavailable", name);
        }
        assert_eq!(pass.report.failures().count(), 1);
    }

    #[test]
    fn rejected_can_controller_is_skipped() {
        let pass = run_pass(&NAND_ON_CS1, |p| p.refusing("ti_hecc"));
        assert_eq!(
            pass.report.outcome("ti_hecc"),
            Some(Outcome::Unavailable(BringUpError::RegistrationFailed {
                peripheral: "ti_hecc",
                cause: PlatformError::Rejected {
                    info: "refused by test"
                },
            }))
        );
        assert!(pass.report.is_available("davinci_emac"));
        assert!(pass.report.is_available("musb-am35x"));
    }

    #[test]
    fn rejected_mac_skips_its_callbacks_only() {
        let pass = run_pass(&NAND_ON_CS1, |p| p.refusing("davinci_emac"));
        assert!(!pass.report.is_available("davinci_emac"));
        assert!(pass.report.is_available("davinci_mdio"));
        assert!(
            !pass
                .journal
                .calls()
                .iter()
                .any(|c| matches!(c, Call::ClockAlias(..)))
        );
        assert_eq!(pass.control.writes(), [(CONTROL_DEVCONF2, 0x3602)]);
        assert!(pass.report.is_available("musb-am35x"));
    }

    #[test]
    fn resource_conflict_is_reported() {
        let pass = run_pass(&NAND_ON_CS1, |p| {
            p.claiming(ResourceSpan::irq(24))
        });
        assert_eq!(
            pass.report.outcome("ti_hecc"),
            Some(Outcome::Unavailable(BringUpError::RegistrationFailed {
                peripheral: "ti_hecc",
                cause: PlatformError::ResourceConflict,
            }))
        );
    }

    #[test]
    fn unmuxable_reset_gpio_keeps_ehci_down() {
        let pass = run_pass(&NAND_ON_CS1, |p| p.refusing_gpio());
        assert!(!pass.report.is_available("ehci-omap"));
        assert_eq!(pass.journal.position(&Call::Device("ehci-omap")), None);
        assert!(pass.report.is_available("ti_hecc"));
    }

    #[test]
    fn failed_bus_does_not_stop_the_board() {
        let pass = run_pass(&NAND_ON_CS1, |p| p.refusing("omap_i2c.2"));
        assert!(!pass.report.is_available("omap_i2c.2"));
        assert!(pass.report.is_available("omap_i2c.3"));
        assert_eq!(pass.report.failures().count(), 1);
    }

    #[test]
    fn callbacks_run_at_most_once_per_pass() {
        let mut platform = RecordingPlatform::new(Journal::new());
        let control = FakeControl::new();
        let gpmc = FakeGpmc::new(&NAND_ON_CS1);
        let mut seq = Sequencer::new(&RHINO, &mut platform, &control, &gpmc);
        assert_eq!(seq.invoke(BringUp::EmacInterruptEnable), Some(0xf));
        assert_eq!(seq.invoke(BringUp::EmacInterruptEnable), None);
        assert_eq!(control.writes().len(), 1);
        assert_eq!(seq.report().readbacks.len(), 1);
    }

    #[test]
    fn readbacks_are_kept_for_diagnostics() {
        let pass = run_pass(&NAND_ON_CS1, |p| p);
        assert_eq!(pass.report.readback(BringUp::EmacInterruptEnable), Some(0xf));
        assert_eq!(pass.report.readback(BringUp::UsbPhyClockMode), Some(0x3602));
        assert_eq!(pass.report.readback(BringUp::EmacInterruptDisable), None);
    }

    #[test]
    fn registrations_follow_rank_order() {
        let pass = run_pass(&NAND_ON_CS1, |p| p);
        let ranks: Vec<u8> = pass
            .journal
            .calls()
            .iter()
            .filter_map(|c| match c {
                Call::Device(name) => RHINO.devices.iter().find(|d| d.name == *name),
                _ => None,
            })
            .map(|d| d.rank)
            .collect();
        assert_eq!(ranks, [0, 1, 2, 3, 4, 5, 6]);
    }
}
