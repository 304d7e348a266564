//! Horizontal scroll state for one line of text
//!
//! The offset is never accumulated: every tick it is recomputed from the
//! tick count, so fractional speeds cannot drift.

use alloc::string::String;

use super::layout::{draw_text, text_width, Alignment, Placement, TextLayout};
use super::SUBPIXELS_PER_PIXEL;
use crate::framebuffer::Framebuffer;

/// What happens when the text has fully left the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollMode {
    /// Count a completed pass and restart from the right edge
    Once,
    /// Wrap around continuously
    Loop,
}

/// Pixels scrolled after `tick` ticks, wrapped to `rendered + window`
pub fn scroll_offset(tick: u32, speed: u16, rendered: u32, window: u32) -> u32 {
    let span = u64::from(rendered) + u64::from(window);
    if span == 0 {
        return 0;
    }
    let pixels = u64::from(tick) * u64::from(speed) / u64::from(SUBPIXELS_PER_PIXEL);
    (pixels % span) as u32
}

/// Scroll progress of one text region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollState {
    text: String,
    rendered: u32,
    window: u32,
    speed: u16,
    mode: ScrollMode,
    placement: Placement,
    /// Ticks into the current pass (`Once`) or since start (`Loop`)
    ticks: u32,
    passes: u32,
}

impl ScrollState {
    pub fn new(text: &str, window: u32, speed: u16, alignment: Alignment, mode: ScrollMode) -> Self {
        Self {
            text: String::from(text),
            rendered: text_width(text),
            window,
            speed,
            mode,
            placement: TextLayout::new(window, alignment).place(text),
            ticks: 0,
            passes: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Rendered width R in pixels
    pub fn rendered_width(&self) -> u32 {
        self.rendered
    }

    /// Window width W in pixels
    pub fn window(&self) -> u32 {
        self.window
    }

    pub fn mode(&self) -> ScrollMode {
        self.mode
    }

    /// Whether the text is wider than its window and moves
    pub fn is_scrolling(&self) -> bool {
        self.placement == Placement::Scrolling && self.speed > 0
    }

    fn span(&self) -> u64 {
        u64::from(self.rendered) + u64::from(self.window)
    }

    fn raw_pixels(&self) -> u64 {
        u64::from(self.ticks) * u64::from(self.speed) / u64::from(SUBPIXELS_PER_PIXEL)
    }

    /// Advance by one tick
    pub fn advance(&mut self) {
        if !self.is_scrolling() {
            return;
        }
        self.ticks = self.ticks.saturating_add(1);

        match self.mode {
            ScrollMode::Once => {
                if self.raw_pixels() >= self.span() {
                    self.passes = self.passes.saturating_add(1);
                    self.ticks = 0;
                }
            }
            ScrollMode::Loop => {
                self.passes = (self.raw_pixels() / self.span()) as u32;
            }
        }
    }

    /// Pixels scrolled in the current pass
    pub fn offset(&self) -> u32 {
        if !self.is_scrolling() {
            return 0;
        }
        match self.mode {
            ScrollMode::Loop => scroll_offset(self.ticks, self.speed, self.rendered, self.window),
            ScrollMode::Once => self.raw_pixels().min(self.span()) as u32,
        }
    }

    /// Left edge to draw the text at
    pub fn x(&self) -> i32 {
        match self.placement {
            Placement::Static { x } => x,
            Placement::Scrolling => self.window as i32 - self.offset() as i32,
        }
    }

    /// Completed passes
    pub fn passes(&self) -> u32 {
        self.passes
    }

    /// At least one full pass done, or nothing to scroll
    pub fn is_complete(&self) -> bool {
        !self.is_scrolling() || self.passes > 0
    }

    /// Ticks needed for one full pass (0 when nothing scrolls)
    pub fn pass_ticks(&self) -> u32 {
        if !self.is_scrolling() {
            return 0;
        }
        let subpixels = self.span() * u64::from(SUBPIXELS_PER_PIXEL);
        subpixels.div_ceil(u64::from(self.speed)) as u32
    }

    /// Draw at the current position with the top edge at `y`
    pub fn draw(&self, fb: &mut Framebuffer, y: i32) {
        if self.text.is_empty() {
            return;
        }
        draw_text(fb, &self.text, self.x(), y);
    }
}
