//! Panel power detection
//!
//! A panel whose supply stayed up across a host restart keeps its
//! controller configuration. [`PowerProbe`] lets the platform report that,
//! so bring-up can skip the reset pulse and init sequence.

use embedded_hal::digital::InputPin;

/// Reports whether the panel is already powered and configured.
pub trait PowerProbe {
    /// True when the panel kept power since it was last initialised.
    fn is_powered(&mut self) -> bool;
}

/// Probe for platforms that cannot tell: every bring-up is a cold boot.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColdBoot;

impl PowerProbe for ColdBoot {
    fn is_powered(&mut self) -> bool {
        false
    }
}

impl<F: FnMut() -> bool> PowerProbe for F {
    fn is_powered(&mut self) -> bool {
        self()
    }
}

/// Probe reading a "panel supply good" input line.
#[derive(Debug)]
pub struct PinProbe<P> {
    pin: P,
}

impl<P: InputPin> PinProbe<P> {
    /// Probe that treats a high level as "powered".
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: InputPin> PowerProbe for PinProbe<P> {
    fn is_powered(&mut self) -> bool {
        // An unreadable line is treated as unpowered: full init is always safe.
        self.pin.is_high().unwrap_or(false)
    }
}
