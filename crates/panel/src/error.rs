//! Panel error type

use core::fmt;

use platform::{LinkError, PanelPowerState};

use crate::convert::ConvertError;

/// Errors returned by the panel state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// A bring-up command failed; the panel is back in `Off`.
    ///
    /// `step` indexes the profile's init sequence. The address-mode command
    /// sent after the sequence reports `step == init_sequence.len()`.
    Init {
        /// Index of the failing step.
        step: usize,
        /// Command byte of the failing step.
        command: u8,
        /// Transport error.
        source: LinkError,
    },
    /// Sending a window or pixels failed; pending damage is kept.
    Link(LinkError),
    /// The framebuffer could not be converted; pending damage is kept.
    Convert(ConvertError),
    /// The operation is not allowed in the current state.
    InvalidState(PanelPowerState),
    /// The transmit buffer cannot hold a full frame.
    BufferTooSmall {
        /// Bytes a full frame needs.
        needed: usize,
        /// Bytes provided.
        available: usize,
    },
    /// Driving the reset line failed.
    Gpio,
}

impl fmt::Display for PanelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init {
                step,
                command,
                source,
            } => write!(f, "init step {step} (command {command:#04x}) failed: {source}"),
            Self::Link(e) => write!(f, "flush failed: {e}"),
            Self::Convert(e) => write!(f, "flush skipped: {e}"),
            Self::InvalidState(state) => write!(f, "not allowed while panel is {state}"),
            Self::BufferTooSmall { needed, available } => write!(
                f,
                "transmit buffer too small: need {needed} bytes, have {available}"
            ),
            Self::Gpio => write!(f, "reset line error"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PanelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Init { source, .. } | Self::Link(source) => Some(source),
            Self::Convert(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LinkError> for PanelError {
    fn from(e: LinkError) -> Self {
        Self::Link(e)
    }
}

impl From<ConvertError> for PanelError {
    fn from(e: ConvertError) -> Self {
        Self::Convert(e)
    }
}
