//! Transmit scratch buffer
//!
//! One full frame at the widest wire format (3 bytes per pixel). The
//! storage is lent by the caller so it can live in a `static` or a DMA
//! capable region; the panel reuses it for every flush.

use crate::error::PanelError;
use crate::window::PanelGeometry;

/// Bytes per pixel of the widest wire format.
pub const MAX_WIRE_BPP: usize = 3;

/// Bytes a transmit buffer for `geometry` must hold.
pub const fn required_len(geometry: &PanelGeometry) -> usize {
    geometry.pixel_count().saturating_mul(MAX_WIRE_BPP)
}

/// Scratch space for converted pixels, owned by one panel.
#[derive(Debug)]
pub struct TransmitBuffer<'buf> {
    bytes: &'buf mut [u8],
}

impl<'buf> TransmitBuffer<'buf> {
    /// Wrap `bytes`, which must hold a full frame for `geometry`.
    pub fn new(bytes: &'buf mut [u8], geometry: &PanelGeometry) -> Result<Self, PanelError> {
        let needed = required_len(geometry);
        if bytes.len() < needed {
            return Err(PanelError::BufferTooSmall {
                needed,
                available: bytes.len(),
            });
        }
        Ok(Self { bytes })
    }

    /// Writable scratch space.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut *self.bytes
    }

    /// The first `len` bytes, after a conversion filled them.
    pub fn filled(&self, len: usize) -> &[u8] {
        self.bytes.get(..len).unwrap_or(&*self.bytes)
    }

    /// Fill the first `len` bytes with `value` and return them.
    pub fn fill(&mut self, len: usize, value: u8) -> &[u8] {
        let len = len.min(self.bytes.len());
        let (head, _) = (*self.bytes).split_at_mut(len);
        head.fill(value);
        head
    }

    /// Capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }
}
