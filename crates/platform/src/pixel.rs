//! Pixel data model
//!
//! Formats, damage rectangles and borrowed framebuffers. Framebuffer bytes
//! are only ever read through a [`SourceReadGuard`], which brackets the read
//! with the source's `begin_read` / `end_read` hooks.

// Rect arithmetic is on u16 coordinates with `x1 <= x2` and `y1 <= y2`;
// products are widened to u32/usize before multiplying.
#![allow(clippy::arithmetic_side_effects)]

use core::fmt;

/// Build a DRM-style fourcc code from four ASCII bytes.
const fn fourcc(a: u8, b: u8, c: u8, d: u8) -> u32 {
    (a as u32) | ((b as u32) << 8) | ((c as u32) << 16) | ((d as u32) << 24)
}

/// Pixel format of a framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelFormat {
    /// 32-bit little-endian words `0xXXRRGGBB`; the X byte is ignored.
    Xrgb8888,
    /// 16-bit pixels, 5-6-5 bits, stored in host byte order.
    Rgb565,
    /// Any other format, identified by its fourcc code. Not convertible.
    Other(u32),
}

impl PixelFormat {
    /// Fourcc of [`PixelFormat::Xrgb8888`] (`XR24`).
    pub const FOURCC_XRGB8888: u32 = fourcc(b'X', b'R', b'2', b'4');
    /// Fourcc of [`PixelFormat::Rgb565`] (`RG16`).
    pub const FOURCC_RGB565: u32 = fourcc(b'R', b'G', b'1', b'6');

    /// Map a fourcc code to a format.
    pub const fn from_fourcc(code: u32) -> Self {
        match code {
            Self::FOURCC_XRGB8888 => Self::Xrgb8888,
            Self::FOURCC_RGB565 => Self::Rgb565,
            other => Self::Other(other),
        }
    }

    /// Fourcc code of this format.
    pub const fn fourcc(self) -> u32 {
        match self {
            Self::Xrgb8888 => Self::FOURCC_XRGB8888,
            Self::Rgb565 => Self::FOURCC_RGB565,
            Self::Other(code) => code,
        }
    }

    /// Bytes per source pixel, if the format is known.
    pub const fn bytes_per_pixel(self) -> Option<usize> {
        match self {
            Self::Xrgb8888 => Some(4),
            Self::Rgb565 => Some(2),
            Self::Other(_) => None,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xrgb8888 => write!(f, "XRGB8888"),
            Self::Rgb565 => write!(f, "RGB565"),
            Self::Other(code) => write!(f, "fourcc {code:#010x}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// Half-open rectangle `[x1, x2) × [y1, y2)` in panel pixel coordinates.
///
/// Invariant: `x1 <= x2` and `y1 <= y2`. Constructors uphold it; the fields
/// are public for pattern matching and literal construction in tests.
/// A rectangle with zero area means "no damage".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    /// Left edge (inclusive).
    pub x1: u16,
    /// Top edge (inclusive).
    pub y1: u16,
    /// Right edge (exclusive).
    pub x2: u16,
    /// Bottom edge (exclusive).
    pub y2: u16,
}

impl Rect {
    /// Rectangle from two corners; swapped corners are normalised.
    pub fn new(x1: u16, y1: u16, x2: u16, y2: u16) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    /// Rectangle from an origin and a size, saturating at `u16::MAX`.
    pub fn from_origin_size(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x.saturating_add(width),
            y2: y.saturating_add(height),
        }
    }

    /// The whole `width × height` surface.
    pub const fn full(width: u16, height: u16) -> Self {
        Self {
            x1: 0,
            y1: 0,
            x2: width,
            y2: height,
        }
    }

    /// Width in pixels.
    pub const fn width(&self) -> u16 {
        self.x2.saturating_sub(self.x1)
    }

    /// Height in pixels.
    pub const fn height(&self) -> u16 {
        self.y2.saturating_sub(self.y1)
    }

    /// Number of pixels covered.
    pub const fn area(&self) -> u32 {
        self.width() as u32 * self.height() as u32
    }

    /// True when the rectangle covers no pixels.
    pub const fn is_empty(&self) -> bool {
        self.x1 >= self.x2 || self.y1 >= self.y2
    }

    /// True when the corner ordering invariant holds.
    pub const fn is_well_formed(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    /// True when every pixel of `other` lies inside `self`.
    ///
    /// An empty `other` is contained in anything.
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        other.is_empty()
            || (other.x1 >= self.x1
                && other.y1 >= self.y1
                && other.x2 <= self.x2
                && other.y2 <= self.y2)
    }

    /// Smallest rectangle containing both operands (plain bounding box).
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }

    /// Intersection with `[0, width) × [0, height)`.
    ///
    /// A rectangle fully outside collapses to an empty one.
    pub fn clamp_to(&self, width: u16, height: u16) -> Rect {
        let x2 = self.x2.min(width);
        let y2 = self.y2.min(height);
        Rect {
            x1: self.x1.min(x2),
            y1: self.y1.min(y2),
            x2,
            y2,
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width(), self.height(), self.x1, self.y1)
    }
}

// ---------------------------------------------------------------------------
// Pixel sources
// ---------------------------------------------------------------------------

/// Why a framebuffer could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SourceError {
    /// The owner is writing to the buffer; try again on the next damage event.
    Busy,
    /// The backing memory is not mapped for CPU access.
    Unmapped,
    /// The byte slice is shorter than `pitch * height`.
    Truncated {
        /// Bytes required by the declared geometry.
        needed: usize,
        /// Bytes actually provided.
        available: usize,
    },
    /// The pitch is smaller than one row of pixels.
    PitchTooSmall,
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy => write!(f, "framebuffer busy"),
            Self::Unmapped => write!(f, "framebuffer not mapped for CPU access"),
            Self::Truncated { needed, available } => write!(
                f,
                "framebuffer truncated: need {needed} bytes, have {available}"
            ),
            Self::PitchTooSmall => write!(f, "pitch smaller than one row"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SourceError {}

/// Anything that can lend framebuffer bytes to the pipeline.
///
/// `begin_read` / `end_read` bracket CPU access to the bytes (cache
/// maintenance, locking against a producer). The pipeline never calls
/// them directly; it goes through [`SourceReadGuard`].
pub trait PixelSource {
    /// Pixel format of the bytes.
    fn format(&self) -> PixelFormat;
    /// Width in pixels.
    fn width(&self) -> u16;
    /// Height in pixels.
    fn height(&self) -> u16;
    /// Bytes per row, at least `width * bytes_per_pixel`.
    fn pitch(&self) -> usize;
    /// Raw pixel bytes, at least `pitch * height` long.
    fn bytes(&self) -> &[u8];

    /// Prepare the bytes for CPU reads.
    fn begin_read(&self) -> Result<(), SourceError> {
        Ok(())
    }

    /// Release CPU read access taken by a successful `begin_read`.
    fn end_read(&self) {}
}

impl<S: PixelSource + ?Sized> PixelSource for &S {
    fn format(&self) -> PixelFormat {
        (**self).format()
    }
    fn width(&self) -> u16 {
        (**self).width()
    }
    fn height(&self) -> u16 {
        (**self).height()
    }
    fn pitch(&self) -> usize {
        (**self).pitch()
    }
    fn bytes(&self) -> &[u8] {
        (**self).bytes()
    }
    fn begin_read(&self) -> Result<(), SourceError> {
        (**self).begin_read()
    }
    fn end_read(&self) {
        (**self).end_read();
    }
}

/// Scoped read access to a [`PixelSource`].
///
/// `acquire` calls `begin_read`; dropping the guard calls `end_read`. A
/// failed acquisition produces no guard and therefore no `end_read`.
pub struct SourceReadGuard<'a, S: PixelSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: PixelSource + ?Sized> SourceReadGuard<'a, S> {
    /// Begin a read of `source`.
    pub fn acquire(source: &'a S) -> Result<Self, SourceError> {
        source.begin_read()?;
        Ok(Self { source })
    }

    /// Pixel format of the source.
    pub fn format(&self) -> PixelFormat {
        self.source.format()
    }

    /// Width in pixels.
    pub fn width(&self) -> u16 {
        self.source.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u16 {
        self.source.height()
    }

    /// Bytes per row.
    pub fn pitch(&self) -> usize {
        self.source.pitch()
    }

    /// All source bytes.
    pub fn bytes(&self) -> &'a [u8] {
        self.source.bytes()
    }

    /// Bytes of row `y`, `pitch` long (shorter only for a truncated last row).
    pub fn row(&self, y: u16) -> Option<&'a [u8]> {
        let pitch = self.source.pitch();
        let start = usize::from(y).checked_mul(pitch)?;
        if y >= self.source.height() {
            return None;
        }
        let bytes = self.source.bytes();
        let end = start.saturating_add(pitch).min(bytes.len());
        bytes.get(start..end)
    }
}

impl<S: PixelSource + ?Sized> Drop for SourceReadGuard<'_, S> {
    fn drop(&mut self) {
        self.source.end_read();
    }
}

/// A plain borrowed framebuffer with no access hooks.
#[derive(Debug, Clone, Copy)]
pub struct PixelBuffer<'a> {
    data: &'a [u8],
    width: u16,
    height: u16,
    pitch: usize,
    format: PixelFormat,
}

impl<'a> PixelBuffer<'a> {
    /// Tightly packed buffer: `pitch = width * bytes_per_pixel`.
    ///
    /// Formats without a known pixel size are assumed to be 4 bytes wide.
    pub fn new(
        data: &'a [u8],
        width: u16,
        height: u16,
        format: PixelFormat,
    ) -> Result<Self, SourceError> {
        let bpp = format.bytes_per_pixel().unwrap_or(4);
        Self::with_pitch(data, width, height, usize::from(width) * bpp, format)
    }

    /// Buffer with an explicit row pitch in bytes.
    pub fn with_pitch(
        data: &'a [u8],
        width: u16,
        height: u16,
        pitch: usize,
        format: PixelFormat,
    ) -> Result<Self, SourceError> {
        if let Some(bpp) = format.bytes_per_pixel() {
            if pitch < usize::from(width) * bpp {
                return Err(SourceError::PitchTooSmall);
            }
        }
        let needed = pitch
            .checked_mul(usize::from(height))
            .ok_or(SourceError::PitchTooSmall)?;
        if data.len() < needed {
            return Err(SourceError::Truncated {
                needed,
                available: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            pitch,
            format,
        })
    }

    /// Bounds of the whole buffer.
    pub const fn bounds(&self) -> Rect {
        Rect::full(self.width, self.height)
    }
}

impl PixelSource for PixelBuffer<'_> {
    fn format(&self) -> PixelFormat {
        self.format
    }
    fn width(&self) -> u16 {
        self.width
    }
    fn height(&self) -> u16 {
        self.height
    }
    fn pitch(&self) -> usize {
        self.pitch
    }
    fn bytes(&self) -> &[u8] {
        self.data
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[test]
    fn new_normalises_swapped_corners() {
        let r = Rect::new(10, 20, 2, 4);
        assert_eq!(r, Rect { x1: 2, y1: 4, x2: 10, y2: 20 });
        assert!(r.is_well_formed());
    }

    #[test]
    fn zero_width_rect_is_empty() {
        let r = Rect::new(5, 0, 5, 100);
        assert!(r.is_empty());
        assert_eq!(r.area(), 0);
    }

    #[test]
    fn union_is_bounding_box() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(20, 5, 30, 40);
        assert_eq!(a.union(&b), Rect::new(0, 0, 30, 40));
    }

    #[test]
    fn empty_rect_is_contained_anywhere() {
        let outer = Rect::new(10, 10, 20, 20);
        assert!(outer.contains_rect(&Rect::new(100, 100, 100, 200)));
        assert!(!outer.contains_rect(&Rect::new(0, 0, 11, 11)));
    }

    #[test]
    fn clamp_to_collapses_outside_rect() {
        let r = Rect::new(400, 500, 410, 520).clamp_to(320, 480);
        assert!(r.is_empty());
        assert!(r.is_well_formed());
        assert_eq!(
            Rect::new(300, 470, 330, 490).clamp_to(320, 480),
            Rect::new(300, 470, 320, 480)
        );
    }

    #[test]
    fn from_origin_size_saturates() {
        let r = Rect::from_origin_size(u16::MAX - 1, 0, 10, 1);
        assert_eq!(r.x2, u16::MAX);
    }

    #[test]
    fn display_uses_size_and_origin() {
        let s = std::format!("{}", Rect::new(4, 8, 14, 10));
        assert_eq!(s, "10x2+4+8");
    }

    #[test]
    fn fourcc_round_trip() {
        assert_eq!(PixelFormat::from_fourcc(PixelFormat::FOURCC_XRGB8888), PixelFormat::Xrgb8888);
        assert_eq!(PixelFormat::from_fourcc(PixelFormat::FOURCC_RGB565), PixelFormat::Rgb565);
        let yuv = u32::from_le_bytes(*b"YUYV");
        assert_eq!(PixelFormat::from_fourcc(yuv), PixelFormat::Other(yuv));
        assert_eq!(PixelFormat::Other(yuv).bytes_per_pixel(), None);
    }

    #[test]
    fn pixel_buffer_rejects_short_data() {
        let data = [0u8; 15];
        let err = PixelBuffer::new(&data, 2, 2, PixelFormat::Xrgb8888).unwrap_err();
        assert_eq!(err, SourceError::Truncated { needed: 16, available: 15 });
    }

    #[test]
    fn pixel_buffer_rejects_narrow_pitch() {
        let data = [0u8; 64];
        let err = PixelBuffer::with_pitch(&data, 4, 2, 6, PixelFormat::Rgb565).unwrap_err();
        assert_eq!(err, SourceError::PitchTooSmall);
    }

    #[test]
    fn guard_rows_respect_pitch() {
        let data: std::vec::Vec<u8> = (0u8..24).collect();
        let fb = PixelBuffer::with_pitch(&data, 2, 3, 8, PixelFormat::Rgb565).unwrap();
        let guard = SourceReadGuard::acquire(&fb).unwrap();
        assert_eq!(guard.row(1).unwrap(), &[8, 9, 10, 11, 12, 13, 14, 15]);
        assert!(guard.row(3).is_none());
    }

    struct CountingSource {
        begins: Cell<u32>,
        ends: Cell<u32>,
        refuse: bool,
    }

    impl PixelSource for CountingSource {
        fn format(&self) -> PixelFormat {
            PixelFormat::Rgb565
        }
        fn width(&self) -> u16 {
            0
        }
        fn height(&self) -> u16 {
            0
        }
        fn pitch(&self) -> usize {
            0
        }
        fn bytes(&self) -> &[u8] {
            &[]
        }
        fn begin_read(&self) -> Result<(), SourceError> {
            self.begins.set(self.begins.get() + 1);
            if self.refuse {
                Err(SourceError::Busy)
            } else {
                Ok(())
            }
        }
        fn end_read(&self) {
            self.ends.set(self.ends.get() + 1);
        }
    }

    #[test]
    fn guard_drop_ends_read() {
        let src = CountingSource { begins: Cell::new(0), ends: Cell::new(0), refuse: false };
        {
            let _guard = SourceReadGuard::acquire(&src).unwrap();
            assert_eq!(src.ends.get(), 0);
        }
        assert_eq!((src.begins.get(), src.ends.get()), (1, 1));
    }

    #[test]
    fn failed_acquire_never_ends_read() {
        let src = CountingSource { begins: Cell::new(0), ends: Cell::new(0), refuse: true };
        assert!(matches!(SourceReadGuard::acquire(&src), Err(SourceError::Busy)));
        assert_eq!((src.begins.get(), src.ends.get()), (1, 0));
    }
}
