//! Framebuffer model
//!
//! A 1-bit-per-pixel grid holding exactly what the panel shows next. It knows
//! nothing about time, animation or hardware.
//!
//! Pixels are stored in SH1106 page order so a presenter can stream pages
//! straight to the controller: byte `page * width + x` holds the eight
//! vertical pixels `y = page * 8 .. page * 8 + 8`, least significant bit on
//! top.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use core::fmt;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

/// Pixel rows per page
pub const PAGE_HEIGHT: u16 = 8;

/// Fixed-size monochrome framebuffer
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: u16,
    height: u16,
    /// Page-ordered pixel bytes, `pages * width` long
    buffer: Vec<u8>,
}

impl Framebuffer {
    /// Create a blank framebuffer
    pub fn new(width: u16, height: u16) -> Self {
        let pages = height.div_ceil(PAGE_HEIGHT) as usize;
        Self {
            width,
            height,
            buffer: vec![0; pages * width as usize],
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Number of 8-pixel pages
    pub fn page_count(&self) -> usize {
        self.height.div_ceil(PAGE_HEIGHT) as usize
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    /// Byte index and bit mask for a pixel, `None` when out of bounds
    fn locate(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some(((y / 8) * self.width as usize + x, 1 << (y % 8)))
    }

    /// Set a single pixel
    ///
    /// Writes outside the buffer are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some((index, mask)) = self.locate(x, y) {
            if on {
                self.buffer[index] |= mask;
            } else {
                self.buffer[index] &= !mask;
            }
        }
    }

    /// Read a single pixel (`false` outside the buffer)
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        self.locate(x, y)
            .map(|(index, mask)| self.buffer[index] & mask != 0)
            .unwrap_or(false)
    }

    /// Copy `region` into this buffer with its top-left corner at (`x`, `y`)
    ///
    /// Both lit and dark pixels are copied. Whatever falls outside this
    /// buffer is clipped.
    pub fn blit(&mut self, region: &Framebuffer, x: i32, y: i32) {
        let (rx_start, rx_end) = clip_span(x, region.width, self.width);
        let (ry_start, ry_end) = clip_span(y, region.height, self.height);

        for ry in ry_start..ry_end {
            for rx in rx_start..rx_end {
                // In range by construction, so the sums cannot overflow
                self.set_pixel(x + rx, y + ry, region.pixel(rx, ry));
            }
        }
    }

    /// Replace the contents with `other`
    ///
    /// Same-sized buffers are copied wholesale; anything else is cleared and
    /// blitted at the origin.
    pub fn copy_from(&mut self, other: &Framebuffer) {
        if self.width == other.width && self.height == other.height {
            self.buffer.copy_from_slice(&other.buffer);
        } else {
            self.clear();
            self.blit(other, 0, 0);
        }
    }

    /// Bytes of one page (`width` bytes), if it exists
    pub fn page(&self, page: usize) -> Option<&[u8]> {
        let width = self.width as usize;
        self.buffer.get(page * width..(page + 1) * width)
    }

    /// Iterate over all pages, top to bottom
    pub fn pages(&self) -> impl Iterator<Item = &[u8]> {
        self.buffer.chunks_exact(usize::from(self.width.max(1)))
    }

    /// Raw page-ordered bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Number of lit pixels
    pub fn lit_pixels(&self) -> u32 {
        self.buffer.iter().map(|b| b.count_ones()).sum()
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(u32::from(self.width), u32::from(self.height))
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }
}

/// Source coordinates `start..end` of a `len` span placed at `offset` that
/// land inside `0..limit`
fn clip_span(offset: i32, len: u16, limit: u16) -> (i32, i32) {
    let len = i64::from(len);
    let offset = i64::from(offset);
    let start = (-offset).clamp(0, len);
    let end = (i64::from(limit) - offset).clamp(start, len);
    // Both bounded by `len`, a u16
    (start as i32, end as i32)
}

impl fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Framebuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("lit", &self.lit_pixels())
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Framebuffer {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Framebuffer[{}x{}, {} lit]",
            self.width,
            self.height,
            self.lit_pixels()
        );
    }
}
