//! Text layout and sub-pixel scroll engine
//!
//! Turns strings into pixel spans with a fixed monospace font and works out
//! where a line of text sits on each tick. Text that fits its window is placed
//! statically; wider text scrolls right-to-left through the window.

pub mod layout;
pub mod scroll;

pub use layout::{draw_text, text_width, Alignment, Placement, TextLayout};
pub use scroll::{scroll_offset, ScrollMode, ScrollState};

use embedded_graphics::mono_font::{ascii::FONT_6X10, MonoFont};

/// Font used for every line of text on the panel
pub const FONT: &MonoFont<'static> = &FONT_6X10;

/// Vertical distance between consecutive text lines
pub const LINE_PITCH: i32 = 14;

/// Scroll speeds are expressed in sixteenths of a pixel
pub const SUBPIXELS_PER_PIXEL: u32 = 16;

/// 1.5 px per tick, 15 px/s at 10 Hz
pub const DEFAULT_SCROLL_SPEED: u16 = 24;
