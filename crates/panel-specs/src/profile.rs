//! Panel profile types
//!
//! Everything the driver state machine needs to know about one panel
//! module, expressed as data.

use crate::rotation::{ColorOrder, MadctlTable};

/// Complete description of a panel module
///
/// Contains:
/// - Native (unrotated) resolution
/// - Reset pulse timing
/// - Init command sequence
/// - Rotation table and subpixel order
/// - Pixel format the init sequence leaves the controller in
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PanelProfile {
    /// Profile name (e.g., "SX035HV006 (ILI9488)")
    pub name: &'static str,

    /// Controller chip
    pub controller: Controller,

    /// Native width in pixels
    pub native_width: u16,

    /// Native height in pixels
    pub native_height: u16,

    /// Reset line timing
    pub reset: ResetTiming,

    /// Commands sent after reset, in order
    pub init_sequence: &'static [InitStep],

    /// MADCTL values per rotation
    pub madctl: MadctlTable,

    /// Subpixel order of the glass
    pub color_order: ColorOrder,

    /// COLMOD format in effect once `init_sequence` has run
    pub wire_format: WireFormat,

    /// Largest single SPI transfer in bytes
    pub max_transfer: usize,

    /// Nominal SPI clock in Hz (informational; the bus owner sets the clock)
    pub spi_hz: u32,
}

impl PanelProfile {
    /// Bytes of one full 18-bit frame at native resolution.
    pub const fn frame_bytes(&self) -> usize {
        (self.native_width as usize)
            .saturating_mul(self.native_height as usize)
            .saturating_mul(3)
    }

    /// Sum of all post-command delays in the init sequence.
    pub fn init_delay_ms(&self) -> u32 {
        self.init_sequence
            .iter()
            .fold(0u32, |acc, step| acc.saturating_add(step.delay_ms))
    }
}

/// Display controller chip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Controller {
    /// Ilitek ILI9488, 320×480, 18-bit over SPI
    ILI9488,
}

/// One command of an init sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InitStep {
    /// Command byte
    pub command: u8,
    /// Parameter bytes
    pub args: &'static [u8],
    /// Delay after the command, in milliseconds
    pub delay_ms: u32,
}

impl InitStep {
    /// Command without parameters or delay.
    pub const fn cmd(command: u8) -> Self {
        Self {
            command,
            args: &[],
            delay_ms: 0,
        }
    }

    /// Command with parameters.
    pub const fn with_args(command: u8, args: &'static [u8]) -> Self {
        Self {
            command,
            args,
            delay_ms: 0,
        }
    }

    /// Same step followed by a delay.
    pub const fn then_wait(self, delay_ms: u32) -> Self {
        Self { delay_ms, ..self }
    }
}

/// Reset line timing in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ResetTiming {
    /// Time held high before the pulse (0 = no pre-pulse high phase)
    pub idle_high_ms: u32,
    /// Time held low
    pub pulse_ms: u32,
    /// Time after release before the first command
    pub settle_ms: u32,
}

impl ResetTiming {
    /// ILI9488 datasheet-safe timing: 20 ms low, 120 ms settle.
    pub const ILI9488: Self = Self {
        idle_high_ms: 0,
        pulse_ms: 20,
        settle_ms: 120,
    };
}

/// Interface pixel format (COLMOD parameter)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum WireFormat {
    /// 16 bits per pixel
    Rgb565,
    /// 18 bits per pixel, sent as 3 bytes
    Rgb666,
}

impl WireFormat {
    /// COLMOD parameter byte (DPI and DBI fields set alike).
    pub const fn colmod(self) -> u8 {
        match self {
            Self::Rgb565 => 0x55,
            Self::Rgb666 => 0x66,
        }
    }

    /// Bytes per pixel on the wire.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgb565 => 2,
            Self::Rgb666 => 3,
        }
    }
}
