//! Window addressing
//!
//! Maps a damage rectangle to the controller's column/page address window.
//! Panel glass is often smaller than controller RAM; the offsets say where
//! the visible area starts.

// Coordinates are u16; overflow would need offsets past the controller's
// 16-bit address space, which `compute_window` asserts against in debug.
#![allow(clippy::arithmetic_side_effects)]

use panel_specs::Rotation;
use platform::Rect;

/// Logical panel geometry after rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelGeometry {
    /// Logical width in pixels.
    pub width: u16,
    /// Logical height in pixels.
    pub height: u16,
    /// First visible controller column.
    pub left_offset: u16,
    /// First visible controller row.
    pub top_offset: u16,
    /// Rotation the logical size was derived with.
    pub rotation: Rotation,
}

impl PanelGeometry {
    /// Geometry from a native size; quarter turns swap the axes.
    pub const fn rotated(native_width: u16, native_height: u16, rotation: Rotation) -> Self {
        let (width, height) = if rotation.swaps_axes() {
            (native_height, native_width)
        } else {
            (native_width, native_height)
        };
        Self {
            width,
            height,
            left_offset: 0,
            top_offset: 0,
            rotation,
        }
    }

    /// The whole logical surface.
    pub const fn bounds(&self) -> Rect {
        Rect::full(self.width, self.height)
    }

    /// Pixels on the whole surface.
    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Inclusive controller address window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WindowAddress {
    /// First column (CASET start).
    pub col_start: u16,
    /// Last column (CASET end).
    pub col_end: u16,
    /// First row (PASET start).
    pub row_start: u16,
    /// Last row (PASET end).
    pub row_end: u16,
}

impl WindowAddress {
    /// CASET arguments: start and end column, big-endian.
    pub const fn column_args(&self) -> [u8; 4] {
        be_pair(self.col_start, self.col_end)
    }

    /// PASET arguments: start and end row, big-endian.
    pub const fn page_args(&self) -> [u8; 4] {
        be_pair(self.row_start, self.row_end)
    }
}

const fn be_pair(start: u16, end: u16) -> [u8; 4] {
    let [s1, s0] = start.to_be_bytes();
    let [e1, e0] = end.to_be_bytes();
    [s1, s0, e1, e0]
}

/// Window for a non-empty `rect` on `geometry`.
///
/// No bounds checking beyond debug assertions: the caller clips the
/// rectangle to the panel first.
pub fn compute_window(rect: Rect, geometry: &PanelGeometry) -> WindowAddress {
    debug_assert!(!rect.is_empty(), "window for an empty rectangle");
    debug_assert!(
        geometry.bounds().contains_rect(&rect),
        "window outside the panel"
    );
    debug_assert!(
        u32::from(rect.x2) + u32::from(geometry.left_offset) <= 0x1_0000
            && u32::from(rect.y2) + u32::from(geometry.top_offset) <= 0x1_0000,
        "window past the 16-bit address space"
    );

    let col_start = rect.x1.wrapping_add(geometry.left_offset);
    let row_start = rect.y1.wrapping_add(geometry.top_offset);
    WindowAddress {
        col_start,
        col_end: col_start.wrapping_add(rect.width()).wrapping_sub(1),
        row_start,
        row_end: row_start.wrapping_add(rect.height()).wrapping_sub(1),
    }
}
