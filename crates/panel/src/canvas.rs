//! XRGB8888 drawing surface with damage tracking
//!
//! An `embedded-graphics` [`DrawTarget`] that renders into a borrowed
//! XRGB8888 framebuffer and remembers the bounding box of everything
//! drawn since the last [`Canvas::take_damage`]. The same canvas is the
//! [`PixelSource`] handed to the panel, so a render loop is:
//!
//! ```
//! use embedded_graphics::{pixelcolor::Rgb888, prelude::*, primitives::{PrimitiveStyle, Rectangle}};
//! use panel::Canvas;
//!
//! let mut fb = vec![0u8; 64 * 32 * 4];
//! let mut canvas = Canvas::new(&mut fb, 64, 32).unwrap();
//! Rectangle::new(Point::new(4, 4), Size::new(8, 2))
//!     .into_styled(PrimitiveStyle::with_fill(Rgb888::RED))
//!     .draw(&mut canvas)
//!     .unwrap();
//! let damage = canvas.take_damage().unwrap();
//! assert_eq!((damage.x1, damage.y1, damage.x2, damage.y2), (4, 4, 12, 6));
//! // panel.on_damage(&canvas, damage)
//! ```

// Offsets are bounded by width * height * 4, checked in `new`.
#![allow(clippy::arithmetic_side_effects)]

use core::convert::Infallible;

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::{Dimensions, DrawTarget, OriginDimensions, Pixel, Size};
use embedded_graphics::primitives::Rectangle;
use platform::{PixelFormat, PixelSource, Rect, SourceError};

use crate::damage::merge;

const BPP: usize = 4;

/// Borrowed XRGB8888 framebuffer implementing [`DrawTarget`].
pub struct Canvas<'a> {
    buf: &'a mut [u8],
    width: u16,
    height: u16,
    dirty: Option<Rect>,
}

impl<'a> Canvas<'a> {
    /// Wrap `buf` as a tightly packed `width × height` surface.
    pub fn new(buf: &'a mut [u8], width: u16, height: u16) -> Result<Self, SourceError> {
        let needed = usize::from(width)
            .saturating_mul(usize::from(height))
            .saturating_mul(BPP);
        if buf.len() < needed {
            return Err(SourceError::Truncated {
                needed,
                available: buf.len(),
            });
        }
        Ok(Self {
            buf,
            width,
            height,
            dirty: None,
        })
    }

    /// Bounding box drawn since the last call, then reset.
    pub fn take_damage(&mut self) -> Option<Rect> {
        self.dirty.take().filter(|r| !r.is_empty())
    }

    /// Bounding box drawn since the last [`Canvas::take_damage`].
    pub fn damage(&self) -> Option<Rect> {
        self.dirty.filter(|r| !r.is_empty())
    }

    fn mark(&mut self, rect: Rect) {
        self.dirty = Some(merge(self.dirty, rect));
    }

    fn put(&mut self, x: u16, y: u16, color: Rgb888) {
        let offset = (usize::from(y) * usize::from(self.width) + usize::from(x)) * BPP;
        if let Some(px) = self.buf.get_mut(offset..offset + BPP) {
            px.copy_from_slice(&[color.b(), color.g(), color.r(), 0xFF]);
        }
    }

    fn point(&self, p: embedded_graphics::prelude::Point) -> Option<(u16, u16)> {
        let x = u16::try_from(p.x).ok()?;
        let y = u16::try_from(p.y).ok()?;
        (x < self.width && y < self.height).then_some((x, y))
    }
}

impl DrawTarget for Canvas<'_> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let Some((x, y)) = self.point(point) else {
                continue;
            };
            self.put(x, y, color);
            self.mark(Rect::from_origin_size(x, y, 1, 1));
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };
        let (Some((x1, y1)), Some((x2, y2))) =
            (self.point(area.top_left), self.point(bottom_right))
        else {
            return Ok(());
        };
        for y in y1..=y2 {
            for x in x1..=x2 {
                self.put(x, y, color);
            }
        }
        self.mark(Rect::new(x1, y1, x2 + 1, y2 + 1));
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let len = usize::from(self.width) * usize::from(self.height) * BPP;
        if let Some(frame) = self.buf.get_mut(..len) {
            for px in frame.chunks_exact_mut(BPP) {
                px.copy_from_slice(&[color.b(), color.g(), color.r(), 0xFF]);
            }
        }
        self.mark(Rect::full(self.width, self.height));
        Ok(())
    }
}

impl OriginDimensions for Canvas<'_> {
    fn size(&self) -> Size {
        Size::new(u32::from(self.width), u32::from(self.height))
    }
}

impl PixelSource for Canvas<'_> {
    fn format(&self) -> PixelFormat {
        PixelFormat::Xrgb8888
    }
    fn width(&self) -> u16 {
        self.width
    }
    fn height(&self) -> u16 {
        self.height
    }
    fn pitch(&self) -> usize {
        usize::from(self.width) * BPP
    }
    fn bytes(&self) -> &[u8] {
        &*self.buf
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::*;

    #[test]
    fn pixels_are_stored_little_endian_xrgb() {
        let mut fb = [0u8; 2 * 2 * 4];
        let mut canvas = Canvas::new(&mut fb, 2, 2).unwrap();
        Pixel(Point::new(1, 1), Rgb888::new(0x11, 0x22, 0x33))
            .draw(&mut canvas)
            .unwrap();
        assert_eq!(canvas.take_damage(), Some(Rect::new(1, 1, 2, 2)));
        assert_eq!(canvas.take_damage(), None);
        assert_eq!(&fb[12..16], &[0x33, 0x22, 0x11, 0xFF]);
    }

    #[test]
    fn off_surface_pixels_are_ignored() {
        let mut fb = [0u8; 2 * 2 * 4];
        let mut canvas = Canvas::new(&mut fb, 2, 2).unwrap();
        Pixel(Point::new(-1, 0), Rgb888::WHITE).draw(&mut canvas).unwrap();
        Pixel(Point::new(2, 0), Rgb888::WHITE).draw(&mut canvas).unwrap();
        assert_eq!(canvas.damage(), None);
    }

    #[test]
    fn fill_solid_is_clipped() {
        let mut fb = [0u8; 4 * 4 * 4];
        let mut canvas = Canvas::new(&mut fb, 4, 4).unwrap();
        canvas
            .fill_solid(&Rectangle::new(Point::new(2, 2), Size::new(10, 10)), Rgb888::BLUE)
            .unwrap();
        assert_eq!(canvas.take_damage(), Some(Rect::new(2, 2, 4, 4)));
        canvas
            .fill_solid(&Rectangle::new(Point::new(8, 8), Size::new(2, 2)), Rgb888::BLUE)
            .unwrap();
        assert_eq!(canvas.take_damage(), None);
    }

    #[test]
    fn clear_damages_everything() {
        let mut fb = [0u8; 3 * 2 * 4];
        let mut canvas = Canvas::new(&mut fb, 3, 2).unwrap();
        canvas.clear(Rgb888::RED).unwrap();
        assert_eq!(canvas.take_damage(), Some(Rect::full(3, 2)));
        assert!(fb.chunks(4).all(|px| px == [0x00, 0x00, 0xFF, 0xFF]));
    }

    #[test]
    fn short_buffer_is_rejected() {
        let mut fb = [0u8; 15];
        assert!(matches!(
            Canvas::new(&mut fb, 2, 2),
            Err(SourceError::Truncated { needed: 16, available: 15 })
        ));
    }
}
