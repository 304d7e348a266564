//! Static text placement

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::FONT;
use crate::framebuffer::Framebuffer;

/// Horizontal placement of text that fits its window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Alignment {
    /// Flush with the left edge
    Left,
    /// Centred in the window
    #[default]
    Center,
}

/// Where a line of text goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Placement {
    /// Fits: drawn at a fixed x
    Static { x: i32 },
    /// Too wide: scrolls through the window
    Scrolling,
}

/// Rendered width of `text` in pixels
pub fn text_width(text: &str) -> u32 {
    let glyphs = text.chars().count() as u32;
    if glyphs == 0 {
        return 0;
    }
    glyphs * FONT.character_size.width + (glyphs - 1) * FONT.character_spacing
}

/// Draw `text` with its top-left corner at (`x`, `y`)
///
/// Anything outside the framebuffer is clipped.
pub fn draw_text(fb: &mut Framebuffer, text: &str, x: i32, y: i32) {
    let style = MonoTextStyle::new(FONT, BinaryColor::On);
    let _ = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(fb);
}

/// Decides between static and scrolling placement for a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLayout {
    window: u32,
    alignment: Alignment,
}

impl TextLayout {
    pub fn new(window: u32, alignment: Alignment) -> Self {
        Self { window, alignment }
    }

    /// Window width in pixels
    pub fn window(&self) -> u32 {
        self.window
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Place `text` in the window
    pub fn place(&self, text: &str) -> Placement {
        let width = text_width(text);
        if width > self.window {
            return Placement::Scrolling;
        }

        let x = match self.alignment {
            Alignment::Left => 0,
            Alignment::Center => ((self.window - width) / 2) as i32,
        };
        Placement::Static { x }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width() {
        assert_eq!(text_width(""), 0);
        assert_eq!(text_width("A"), 6);
        assert_eq!(text_width("Order #1001"), 66);
    }

    #[test]
    fn test_fitting_text_is_static() {
        let layout = TextLayout::new(128, Alignment::Left);
        assert_eq!(layout.place("Qty: 2"), Placement::Static { x: 0 });

        let layout = TextLayout::new(128, Alignment::Center);
        // 36 px wide, (128 - 36) / 2
        assert_eq!(layout.place("Qty: 2"), Placement::Static { x: 46 });
    }

    #[test]
    fn test_exact_fit_does_not_scroll() {
        // 21 glyphs * 6 px = 126, 22 glyphs = 132
        let layout = TextLayout::new(126, Alignment::Center);
        assert_eq!(
            layout.place("abcdefghijklmnopqrstu"),
            Placement::Static { x: 0 }
        );
        assert_eq!(layout.place("abcdefghijklmnopqrstuv"), Placement::Scrolling);
    }

    #[test]
    fn test_draw_text_lights_pixels() {
        let mut fb = Framebuffer::new(32, 16);
        draw_text(&mut fb, "Hi", 0, 0);
        assert!(fb.lit_pixels() > 0);

        let mut clipped = Framebuffer::new(32, 16);
        draw_text(&mut clipped, "Hi", 40, 0);
        assert_eq!(clipped.lit_pixels(), 0);
    }
}
