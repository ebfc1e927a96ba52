//! Backlight control
//!
//! Backlight calls are best-effort: a failing GPIO write is dropped, the
//! panel state machine never fails because of the backlight.

use embedded_hal::digital::OutputPin;

/// Panel backlight.
pub trait Backlight {
    /// Turn the backlight on.
    fn enable(&mut self);

    /// Turn the backlight off.
    fn disable(&mut self);

    /// False when the panel has no controllable backlight. Disabling such a
    /// panel blanks its contents instead.
    fn is_present(&self) -> bool {
        true
    }
}

impl<B: Backlight + ?Sized> Backlight for &mut B {
    fn enable(&mut self) {
        (**self).enable();
    }

    fn disable(&mut self) {
        (**self).disable();
    }

    fn is_present(&self) -> bool {
        (**self).is_present()
    }
}

/// Backlight switched by a single GPIO line.
#[derive(Debug)]
pub struct GpioBacklight<P> {
    pin: P,
    active_low: bool,
    lit: bool,
}

impl<P: OutputPin> GpioBacklight<P> {
    /// Backlight that lights when the pin is driven high.
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            active_low: false,
            lit: false,
        }
    }

    /// Backlight that lights when the pin is driven low.
    pub fn active_low(pin: P) -> Self {
        Self {
            pin,
            active_low: true,
            lit: false,
        }
    }

    /// Last state the pin was successfully driven to.
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    /// Give the pin back.
    pub fn release(self) -> P {
        self.pin
    }

    fn drive(&mut self, on: bool) {
        // Best-effort; a stuck backlight pin must not take the panel down.
        let driven = if on != self.active_low {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if driven.is_ok() {
            self.lit = on;
        }
    }
}

impl<P: OutputPin> Backlight for GpioBacklight<P> {
    fn enable(&mut self) {
        self.drive(true);
    }

    fn disable(&mut self) {
        self.drive(false);
    }
}

/// Panel without a controllable backlight.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBacklight;

impl Backlight for NoBacklight {
    fn enable(&mut self) {}

    fn disable(&mut self) {}

    fn is_present(&self) -> bool {
        false
    }
}
