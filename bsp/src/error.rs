//! Error types reported by the bring-up engine.
//!
//! Everything here is a soft failure: the sequencer records it against the affected
//! peripheral and keeps going. Register access faults are not represented, they go
//! through [crate::platform_fatal] instead.

use core::fmt::{Debug, Display, Write};

/// An error that can be printed to a string device
pub trait MessageError: Debug {
    /// Print the error message to a writer
    fn print_to_writer(&self, f: &mut dyn Write) -> core::fmt::Result {
        f.write_fmt(format_args!("{:?}", self))
    }
}

impl Display for dyn MessageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.print_to_writer(f)
    }
}

/// Reasons the platform collaborator may refuse a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformError {
    /// A memory or interrupt span is already claimed by another device.
    ResourceConflict,
    /// The platform could not allocate bookkeeping for the device.
    OutOfMemory,
    /// The bus or device id is already registered.
    Busy,
    /// Custom platform-specific information.
    Rejected { info: &'static str },
}

impl MessageError for PlatformError {
    fn print_to_writer(&self, f: &mut dyn Write) -> core::fmt::Result {
        match self {
            PlatformError::ResourceConflict => f.write_str("resource conflict"),
            PlatformError::OutOfMemory => f.write_str("out of memory"),
            PlatformError::Busy => f.write_str("already registered"),
            PlatformError::Rejected { info } => f.write_fmt(format_args!("rejected: {}", info)),
        }
    }
}

/// Per-peripheral failure recorded in the bring-up report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BringUpError {
    /// Discovery found no hardware configuration for the peripheral.
    ConfigurationNotFound { peripheral: &'static str },
    /// The platform rejected the peripheral's descriptor.
    RegistrationFailed {
        peripheral: &'static str,
        cause: PlatformError,
    },
}

impl BringUpError {
    pub fn peripheral(&self) -> &'static str {
        match self {
            BringUpError::ConfigurationNotFound { peripheral } => peripheral,
            BringUpError::RegistrationFailed { peripheral, .. } => peripheral,
        }
    }
}

impl MessageError for BringUpError {
    fn print_to_writer(&self, f: &mut dyn Write) -> core::fmt::Result {
        match self {
            BringUpError::ConfigurationNotFound { peripheral } => {
                f.write_fmt(format_args!("{}: configuration not found", peripheral))
            }
            BringUpError::RegistrationFailed { peripheral, cause } => {
                f.write_fmt(format_args!("{}: registration failed (", peripheral))?;
                cause.print_to_writer(f)?;
                f.write_str(")")
            }
        }
    }
}

impl Display for BringUpError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.print_to_writer(f)
    }
}

impl Display for PlatformError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.print_to_writer(f)
    }
}
