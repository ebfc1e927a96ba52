//! Pixel format conversion
//!
//! Turns a damaged region of a framebuffer into the byte stream the panel
//! expects after RAMWR:
//!
//! | Source     | Wire      | Per pixel                          |
//! |------------|-----------|------------------------------------|
//! | XRGB8888   | RGB666    | `R, G, B` (X dropped), 3 bytes     |
//! | RGB565     | RGB565    | 2 bytes verbatim, or byte-swapped  |
//!
//! Output is row-major with no padding. The source is read only while a
//! [`SourceReadGuard`] is held.

// Region sizes are bounded by u16 width × u16 height × 4 bytes, which fits
// in usize on every supported target (32-bit and up).
#![allow(clippy::arithmetic_side_effects)]

use core::fmt;

use panel_specs::WireFormat;
use platform::{PixelFormat, PixelSource, Rect, SourceError, SourceReadGuard};

/// Conversion failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConvertError {
    /// The source format has no conversion; skip this flush.
    UnsupportedFormat(PixelFormat),
    /// The source refused CPU read access or its bytes are short.
    SourceAccess(SourceError),
    /// The destination cannot hold the converted region.
    BufferTooSmall {
        /// Bytes the region converts to.
        needed: usize,
        /// Bytes available in the destination.
        available: usize,
    },
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat(format) => write!(f, "unsupported pixel format {format}"),
            Self::SourceAccess(e) => write!(f, "framebuffer access failed: {e}"),
            Self::BufferTooSmall { needed, available } => write!(
                f,
                "transmit buffer too small: need {needed} bytes, have {available}"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConvertError {}

impl From<SourceError> for ConvertError {
    fn from(e: SourceError) -> Self {
        Self::SourceAccess(e)
    }
}

/// Interface pixel format a converted payload of `format` needs.
pub const fn wire_format(format: PixelFormat) -> Option<WireFormat> {
    match format {
        PixelFormat::Xrgb8888 => Some(WireFormat::Rgb666),
        PixelFormat::Rgb565 => Some(WireFormat::Rgb565),
        PixelFormat::Other(_) => None,
    }
}

/// Bytes a conversion of `rect` from `format` produces.
pub fn transmit_len(format: PixelFormat, rect: Rect) -> Option<usize> {
    let bpp = wire_format(format)?.bytes_per_pixel();
    Some(usize::from(rect.width()) * usize::from(rect.height()) * bpp)
}

/// Convert `rect` of `source` into `dst`, returning the bytes written.
///
/// `swap` exchanges the two bytes of every RGB565 pixel; it has no effect
/// on XRGB8888. A rectangle reaching past the source is a caller bug; in
/// release builds it is clipped to the source.
pub fn convert<S: PixelSource + ?Sized>(
    source: &S,
    rect: Rect,
    swap: bool,
    dst: &mut [u8],
) -> Result<usize, ConvertError> {
    let guard = SourceReadGuard::acquire(source)?;
    let format = guard.format();

    debug_assert!(
        Rect::full(guard.width(), guard.height()).contains_rect(&rect),
        "damage rectangle outside the framebuffer"
    );
    let rect = rect.clamp_to(guard.width(), guard.height());

    let needed = transmit_len(format, rect).ok_or(ConvertError::UnsupportedFormat(format))?;
    if dst.len() < needed {
        return Err(ConvertError::BufferTooSmall {
            needed,
            available: dst.len(),
        });
    }
    if rect.is_empty() {
        return Ok(0);
    }

    match format {
        PixelFormat::Xrgb8888 => xrgb8888_to_rgb888(&guard, rect, dst),
        PixelFormat::Rgb565 => copy_rgb565(&guard, rect, swap, dst),
        PixelFormat::Other(_) => Err(ConvertError::UnsupportedFormat(format)),
    }?;
    Ok(needed)
}

/// Source bytes of `rect` on row `y`.
fn row_span<'a, S: PixelSource + ?Sized>(
    guard: &SourceReadGuard<'a, S>,
    y: u16,
    rect: Rect,
    bpp: usize,
) -> Result<&'a [u8], ConvertError> {
    let start = usize::from(rect.x1) * bpp;
    let end = usize::from(rect.x2) * bpp;
    let row = guard.row(y).ok_or(SourceError::Unmapped)?;
    row.get(start..end).ok_or(ConvertError::SourceAccess(SourceError::Truncated {
        needed: end,
        available: row.len(),
    }))
}

fn xrgb8888_to_rgb888<S: PixelSource + ?Sized>(
    guard: &SourceReadGuard<'_, S>,
    rect: Rect,
    dst: &mut [u8],
) -> Result<(), ConvertError> {
    let out_row = usize::from(rect.width()) * 3;
    for (y, out) in (rect.y1..rect.y2).zip(dst.chunks_exact_mut(out_row)) {
        let src = row_span(guard, y, rect, 4)?;
        for (px, rgb) in src.chunks_exact(4).zip(out.chunks_exact_mut(3)) {
            // Little-endian 0xXXRRGGBB is stored B, G, R, X.
            if let ([b, g, r, _], [dr, dg, db]) = (px, rgb) {
                *dr = *r;
                *dg = *g;
                *db = *b;
            }
        }
    }
    Ok(())
}

fn copy_rgb565<S: PixelSource + ?Sized>(
    guard: &SourceReadGuard<'_, S>,
    rect: Rect,
    swap: bool,
    dst: &mut [u8],
) -> Result<(), ConvertError> {
    let out_row = usize::from(rect.width()) * 2;
    for (y, out) in (rect.y1..rect.y2).zip(dst.chunks_exact_mut(out_row)) {
        let src = row_span(guard, y, rect, 2)?;
        out.copy_from_slice(src);
        if swap {
            for px in out.chunks_exact_mut(2) {
                px.swap(0, 1);
            }
        }
    }
    Ok(())
}
