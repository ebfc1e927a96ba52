//! Mock implementations for testing
//!
//! Recording doubles for the platform traits, with failure injection, for
//! use in unit and integration tests of the panel pipeline.

#![cfg(any(test, feature = "std"))]
#![allow(clippy::arithmetic_side_effects)] // counters in test doubles

use crate::*;

/// One operation observed by a [`RecordingLink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    /// `send_command(code, args)`
    Command {
        /// Command byte
        code: u8,
        /// Parameter bytes
        args: Vec<u8>,
    },
    /// `send_pixels(bytes)`
    Pixels(Vec<u8>),
}

/// Mock panel link recording every successful operation.
///
/// Failed operations are not recorded; they are counted in
/// [`RecordingLink::failures`].
#[derive(Debug, Default)]
pub struct RecordingLink {
    events: Vec<LinkEvent>,
    failing_command: Option<(u8, LinkErrorKind)>,
    failing_pixels: Option<LinkErrorKind>,
    pixel_failures_left: usize,
    unplugged: bool,
    failures: usize,
}

impl RecordingLink {
    /// Create a link that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `send_command(code, ..)` fails with `kind` until cleared.
    pub fn fail_command(&mut self, code: u8, kind: LinkErrorKind) {
        self.failing_command = Some((code, kind));
    }

    /// The next `count` pixel payloads fail with `kind`.
    pub fn fail_next_pixels(&mut self, count: usize, kind: LinkErrorKind) {
        self.failing_pixels = Some(kind);
        self.pixel_failures_left = count;
    }

    /// Every operation fails with [`LinkErrorKind::Disconnected`] until cleared.
    pub fn unplug(&mut self) {
        self.unplugged = true;
    }

    /// Remove all injected failures.
    pub fn clear_failures(&mut self) {
        self.failing_command = None;
        self.failing_pixels = None;
        self.pixel_failures_left = 0;
        self.unplugged = false;
    }

    /// Recorded operations, oldest first.
    pub fn events(&self) -> &[LinkEvent] {
        &self.events
    }

    /// Command bytes of recorded commands, oldest first.
    pub fn command_codes(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                LinkEvent::Command { code, .. } => Some(*code),
                LinkEvent::Pixels(_) => None,
            })
            .collect()
    }

    /// Arguments of the most recent `code` command.
    pub fn last_args(&self, code: u8) -> Option<&[u8]> {
        self.events.iter().rev().find_map(|e| match e {
            LinkEvent::Command { code: c, args } if *c == code => Some(args.as_slice()),
            _ => None,
        })
    }

    /// Total pixel bytes recorded.
    pub fn pixel_bytes(&self) -> usize {
        self.events
            .iter()
            .map(|e| match e {
                LinkEvent::Pixels(p) => p.len(),
                LinkEvent::Command { .. } => 0,
            })
            .sum()
    }

    /// Number of operations that were rejected.
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Forget recorded operations.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    fn reject(&mut self, kind: LinkErrorKind) -> Result<(), LinkError> {
        self.failures += 1;
        Err(LinkError::new(kind))
    }
}

impl PanelLink for RecordingLink {
    fn send_command(&mut self, code: u8, args: &[u8]) -> Result<(), LinkError> {
        if self.unplugged {
            return self.reject(LinkErrorKind::Disconnected);
        }
        if let Some((failing, kind)) = self.failing_command {
            if failing == code {
                return self.reject(kind);
            }
        }
        self.events.push(LinkEvent::Command {
            code,
            args: args.to_vec(),
        });
        Ok(())
    }

    fn send_pixels(&mut self, bytes: &[u8]) -> Result<(), LinkError> {
        if self.unplugged {
            return self.reject(LinkErrorKind::Disconnected);
        }
        if let Some(kind) = self.failing_pixels {
            if self.pixel_failures_left > 0 {
                self.pixel_failures_left -= 1;
                if self.pixel_failures_left == 0 {
                    self.failing_pixels = None;
                }
                return self.reject(kind);
            }
        }
        self.events.push(LinkEvent::Pixels(bytes.to_vec()));
        Ok(())
    }
}

/// Mock backlight counting calls.
#[derive(Debug)]
pub struct MockBacklight {
    present: bool,
    lit: bool,
    enables: usize,
    disables: usize,
}

impl MockBacklight {
    /// A present, unlit backlight.
    pub fn new() -> Self {
        Self {
            present: true,
            lit: false,
            enables: 0,
            disables: 0,
        }
    }

    /// A panel without backlight control.
    pub fn absent() -> Self {
        Self {
            present: false,
            ..Self::new()
        }
    }

    /// Last requested state.
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    /// Number of `enable` calls.
    pub fn enable_count(&self) -> usize {
        self.enables
    }

    /// Number of `disable` calls.
    pub fn disable_count(&self) -> usize {
        self.disables
    }
}

impl Default for MockBacklight {
    fn default() -> Self {
        Self::new()
    }
}

impl Backlight for MockBacklight {
    fn enable(&mut self) {
        self.enables += 1;
        self.lit = true;
    }

    fn disable(&mut self) {
        self.disables += 1;
        self.lit = false;
    }

    fn is_present(&self) -> bool {
        self.present
    }
}

/// Power probe with a fixed answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedProbe(pub bool);

impl PowerProbe for FixedProbe {
    fn is_powered(&mut self) -> bool {
        self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn recording_link_records_in_order() {
        let mut link = RecordingLink::new();
        link.send_command(0x2A, &[0, 0, 1, 63]).unwrap();
        link.send_pixels(&[1, 2, 3]).unwrap();
        assert_eq!(link.command_codes(), vec![0x2A]);
        assert_eq!(link.pixel_bytes(), 3);
        assert_eq!(link.last_args(0x2A), Some(&[0, 0, 1, 63][..]));
    }

    #[test]
    fn pixel_failures_expire() {
        let mut link = RecordingLink::new();
        link.fail_next_pixels(1, LinkErrorKind::Timeout);
        assert_eq!(
            link.send_pixels(&[0]).unwrap_err().kind(),
            LinkErrorKind::Timeout
        );
        assert!(link.send_pixels(&[0]).is_ok());
        assert_eq!(link.failures(), 1);
    }

    #[test]
    fn unplugged_link_rejects_everything() {
        let mut link = RecordingLink::new();
        link.unplug();
        assert!(link.send_command(0x11, &[]).is_err());
        assert!(link.send_pixels(&[]).is_err());
        assert!(link.events().is_empty());
        link.clear_failures();
        assert!(link.send_command(0x11, &[]).is_ok());
    }

    #[test]
    fn mock_backlight_counts() {
        let mut bl = MockBacklight::new();
        bl.enable();
        bl.disable();
        bl.enable();
        assert!(bl.is_lit());
        assert_eq!((bl.enable_count(), bl.disable_count()), (2, 1));
        assert!(!MockBacklight::absent().is_present());
    }
}
