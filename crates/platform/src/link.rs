//! Command/pixel transport to a panel controller
//!
//! A [`PanelLink`] is the narrow "send bytes" boundary below the pipeline.
//! Implementations are blocking and ordered: a call returns only after its
//! bytes have left the host, and a command always precedes its payload.
//! Nothing is retried here; retry policy belongs to the caller.

use core::fmt;

/// Transport to a MIPI-DBI style panel controller.
pub trait PanelLink {
    /// Send `code` as a command byte followed by `args` as parameter data.
    fn send_command(&mut self, code: u8, args: &[u8]) -> Result<(), LinkError>;

    /// Send a pixel payload as data, following a RAMWR command.
    fn send_pixels(&mut self, bytes: &[u8]) -> Result<(), LinkError>;
}

impl<L: PanelLink + ?Sized> PanelLink for &mut L {
    fn send_command(&mut self, code: u8, args: &[u8]) -> Result<(), LinkError> {
        (**self).send_command(code, args)
    }

    fn send_pixels(&mut self, bytes: &[u8]) -> Result<(), LinkError> {
        (**self).send_pixels(bytes)
    }
}

/// Category of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkErrorKind {
    /// Bus-level fault (overrun, mode fault, framing).
    Bus,
    /// The bus is held by another device.
    Busy,
    /// The device is gone (unplugged, driver unbound).
    Disconnected,
    /// The transfer did not complete in time.
    Timeout,
    /// Driving the D/C line failed.
    Gpio,
    /// Anything else the bus reported.
    Other,
}

/// A failed [`PanelLink`] operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkError {
    /// What went wrong.
    pub reason: LinkErrorKind,
}

impl LinkError {
    /// Error of the given kind.
    pub const fn new(reason: LinkErrorKind) -> Self {
        Self { reason }
    }

    /// What went wrong.
    pub const fn kind(&self) -> LinkErrorKind {
        self.reason
    }
}

impl From<LinkErrorKind> for LinkError {
    fn from(reason: LinkErrorKind) -> Self {
        Self { reason }
    }
}

impl fmt::Display for LinkErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Bus => "bus fault",
            Self::Busy => "bus busy",
            Self::Disconnected => "device disconnected",
            Self::Timeout => "transfer timed out",
            Self::Gpio => "D/C line error",
            Self::Other => "transport error",
        };
        f.write_str(s)
    }
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel link: {}", self.reason)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LinkError {}
