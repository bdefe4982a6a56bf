//! Fakes for the platform collaborators. Platform calls, register writes and
//! chip-select reads all land in one shared [Journal] so tests can check their order.

use crate::{
    board::{
        descriptor::PeripheralDescriptor,
        i2c::I2cBus,
        mux::{PadConfig, PinMux},
        resource::ResourceSpan,
    },
    dev::{ChipSelect, PhysAddr, gpmc::GpmcConfig, mmio::ControlRegisters},
    error::PlatformError,
    platform::{ClockAlias, DeviceHandle, Platform},
};
use alloc::{collections::btree_map::BTreeMap, string::String, sync::Arc, vec, vec::Vec};
use config::build_flags::GPMC_BASE;
use core::{
    cell::Cell,
    sync::atomic::{AtomicUsize, Ordering},
};
use spin::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    PinMux(usize),
    Bus(u8),
    Serial,
    Gpio(u16, u16),
    Device(&'static str),
    Refused(&'static str),
    ClockAlias(String, String),
    Write(usize, u32),
    ReadCs(u8),
}

#[derive(Clone, Default)]
pub struct Journal {
    inner: Arc<Mutex<Vec<Call>>>,
}

impl Journal {
    pub fn new() -> Journal {
        Journal::default()
    }

    pub fn push(&self, call: Call) {
        self.inner.lock().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().clone()
    }

    pub fn position(&self, call: &Call) -> Option<usize> {
        self.inner.lock().iter().position(|c| c == call)
    }
}

pub struct FakeControl {
    regs: Mutex<BTreeMap<usize, u32>>,
    reads: AtomicUsize,
    journal: Journal,
}

impl FakeControl {
    pub fn new() -> FakeControl {
        FakeControl::with_journal(Journal::new())
    }

    pub fn with_journal(journal: Journal) -> FakeControl {
        FakeControl {
            regs: Mutex::new(BTreeMap::new()),
            reads: AtomicUsize::new(0),
            journal,
        }
    }

    /// Set a register without journaling it.
    pub fn preset(&self, offset: usize, value: u32) {
        self.regs.lock().insert(offset, value);
    }

    pub fn value(&self, offset: usize) -> u32 {
        self.regs.lock().get(&offset).copied().unwrap_or(0)
    }

    pub fn snapshot(&self) -> BTreeMap<usize, u32> {
        self.regs.lock().clone()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }

    pub fn writes(&self) -> Vec<(usize, u32)> {
        self.journal
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Write(offset, value) => Some((offset, value)),
                _ => None,
            })
            .collect()
    }
}

impl ControlRegisters for FakeControl {
    fn read(&self, offset: usize) -> u32 {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.value(offset)
    }

    fn write(&self, offset: usize, value: u32) {
        self.journal.push(Call::Write(offset, value));
        self.preset(offset, value);
    }
}

pub struct FakeGpmc {
    config1: Vec<u32>,
    reads: Cell<usize>,
    journal: Journal,
}

impl FakeGpmc {
    pub fn new(config1: &[u32]) -> FakeGpmc {
        FakeGpmc::with_journal(config1, Journal::new())
    }

    pub fn with_journal(config1: &[u32], journal: Journal) -> FakeGpmc {
        FakeGpmc {
            config1: config1.to_vec(),
            reads: Cell::new(0),
            journal,
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl GpmcConfig for FakeGpmc {
    fn cs_count(&self) -> usize {
        self.config1.len()
    }

    fn read_cs_config1(&self, cs: ChipSelect) -> u32 {
        self.reads.set(self.reads.get() + 1);
        self.journal.push(Call::ReadCs(*cs));
        self.config1[*cs as usize]
    }

    fn physical_base(&self) -> PhysAddr {
        PhysAddr::from(GPMC_BASE)
    }
}

/// Platform that accepts everything except the names it was told to refuse, and
/// rejects spans that collide with ones already claimed.
pub struct RecordingPlatform {
    journal: Journal,
    refuse: Vec<&'static str>,
    refuse_gpio: bool,
    claimed: Vec<ResourceSpan>,
    next_handle: u32,
}

impl RecordingPlatform {
    pub fn new(journal: Journal) -> RecordingPlatform {
        RecordingPlatform {
            journal,
            refuse: vec![],
            refuse_gpio: false,
            claimed: vec![],
            next_handle: 1,
        }
    }

    pub fn refusing(mut self, name: &'static str) -> RecordingPlatform {
        self.refuse.push(name);
        self
    }

    pub fn refusing_gpio(mut self) -> RecordingPlatform {
        self.refuse_gpio = true;
        self
    }

    /// Pretend another device already owns `span`.
    pub fn claiming(mut self, span: ResourceSpan) -> RecordingPlatform {
        self.claimed.push(span);
        self
    }
}

impl Platform for RecordingPlatform {
    fn apply_pin_mux(&mut self, table: &'static [PinMux]) {
        self.journal.push(Call::PinMux(table.len()));
    }

    fn register_bus(&mut self, bus: &'static I2cBus) -> Result<(), PlatformError> {
        if self.refuse.contains(&bus.name) {
            self.journal.push(Call::Refused(bus.name));
            return Err(PlatformError::Busy);
        }
        self.journal.push(Call::Bus(bus.id));
        Ok(())
    }

    fn init_serial(&mut self) {
        self.journal.push(Call::Serial);
    }

    fn mux_gpio(&mut self, gpio: u16, config: PadConfig) -> Result<(), PlatformError> {
        if self.refuse_gpio {
            return Err(PlatformError::Rejected { info: "pad locked" });
        }
        self.journal.push(Call::Gpio(gpio, config.bits()));
        Ok(())
    }

    fn register_device(
        &mut self,
        descriptor: &PeripheralDescriptor,
    ) -> Result<DeviceHandle, PlatformError> {
        if self.refuse.contains(&descriptor.name) {
            self.journal.push(Call::Refused(descriptor.name));
            return Err(PlatformError::Rejected { info: "refused by test" });
        }
        let conflict = descriptor
            .resources
            .iter()
            .any(|span| self.claimed.iter().any(|owned| owned.overlaps(span)));
        if conflict {
            self.journal.push(Call::Refused(descriptor.name));
            return Err(PlatformError::ResourceConflict);
        }
        self.claimed.extend_from_slice(descriptor.resources);
        self.journal.push(Call::Device(descriptor.name));
        let handle = DeviceHandle::from(self.next_handle);
        self.next_handle += 1;
        Ok(handle)
    }

    fn add_clock_alias(&mut self, alias: ClockAlias) -> Result<(), PlatformError> {
        self.journal.push(Call::ClockAlias(alias.alias_dev, alias.dev));
        Ok(())
    }
}
