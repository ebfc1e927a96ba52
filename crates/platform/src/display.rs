//! Display pipeline lifecycle
//!
//! The host drives a panel through three notifications: the output was
//! enabled, the output was disabled, and part of the framebuffer changed.

use core::fmt;

use crate::pixel::{PixelSource, Rect};

/// Lifecycle hooks a host calls on a panel pipeline.
pub trait DisplayPipeline {
    /// Error type
    type Error;

    /// The output was enabled: bring the panel up (or back) and show `source`.
    fn on_enable<S: PixelSource + ?Sized>(&mut self, source: &S) -> Result<(), Self::Error>;

    /// The output was disabled.
    fn on_disable(&mut self) -> Result<(), Self::Error>;

    /// `hint` of `source` changed since the last notification.
    fn on_damage<S: PixelSource + ?Sized>(
        &mut self,
        source: &S,
        hint: Rect,
    ) -> Result<FlushOutcome, Self::Error>;
}

/// What a damage notification did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlushOutcome {
    /// The rectangle was written to the panel.
    Flushed(Rect),
    /// Nothing was pending; no traffic.
    NoDamage,
    /// The panel is not accepting pixels; the damage was kept for later.
    Deferred,
}

/// Power/enable state of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelPowerState {
    /// Not initialised (or powered down).
    Off,
    /// Reset pulse in progress.
    Resetting,
    /// Running the init sequence and first flush.
    Initializing,
    /// Accepting flushes.
    Ready,
    /// Initialised but dark; damage accumulates.
    Disabled,
}

impl fmt::Display for PanelPowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Off => "off",
            Self::Resetting => "resetting",
            Self::Initializing => "initializing",
            Self::Ready => "ready",
            Self::Disabled => "disabled",
        };
        f.write_str(s)
    }
}

/// Whether what the panel shows matches the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelHealth {
    /// Never brought up, or powered off on purpose.
    Dark,
    /// The last bring-up failed; the panel stays off until retried.
    InitFailed,
    /// The last flush failed; damage is pending.
    Stale,
    /// The last flush (or bring-up) succeeded.
    Current,
}

impl fmt::Display for PanelHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Dark => "dark",
            Self::InitFailed => "init failed",
            Self::Stale => "stale",
            Self::Current => "current",
        };
        f.write_str(s)
    }
}
