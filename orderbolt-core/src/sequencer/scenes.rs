//! Scenes rendered by the sequencer
//!
//! Every state draws through one scene. A scene renders its current progress
//! into the framebuffer on `tick()` and then moves on by one tick; the
//! sequencer asks `is_complete()` afterwards to decide whether to transition.

use alloc::vec::Vec;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use fastrand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ScrollConfig;
use crate::framebuffer::Framebuffer;
use crate::text::{
    draw_text, Alignment, Placement, ScrollMode, ScrollState, TextLayout, FONT, LINE_PITCH,
};

/// Number of pre-rendered lightning frames per order
pub const BOLT_FRAMES: usize = 4;

/// Flash rhythm: bolt ticks followed by one card tick
const FLASH_RHYTHM: u32 = 3;

/// Top margin of the first text line
const TEXT_TOP: i32 = 2;

/// Text on the alert card
const CARD_MESSAGE: &str = "New Order!";

/// How long a text screen stays up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DwellPolicy {
    /// Configured number of ticks; wide lines loop meanwhile
    #[default]
    Fixed,
    /// Until every wide line has scrolled through once
    ///
    /// Screens with nothing to scroll fall back to the fixed dwell.
    ScrollPass,
}

/// Seed for an order's lightning frames
///
/// FNV-1a over the order id, so the same order always flashes the same way.
pub fn flash_seed(order_id: &str) -> u64 {
    order_id.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
    })
}

/// Vertical position that centres one line of text
fn centred_text_y(height: u16) -> i32 {
    (i32::from(height) - FONT.character_size.height as i32) / 2
}

/// Constant idle frame: blank, or a centred banner
#[derive(Debug, Clone)]
pub struct IdleScene {
    frame: Framebuffer,
}

impl IdleScene {
    pub fn new(width: u16, height: u16, banner: Option<&str>) -> Self {
        let mut frame = Framebuffer::new(width, height);
        if let Some(banner) = banner.filter(|b| !b.is_empty()) {
            let x = match TextLayout::new(u32::from(width), Alignment::Center).place(banner) {
                Placement::Static { x } => x,
                Placement::Scrolling => 0,
            };
            draw_text(&mut frame, banner, x, centred_text_y(height));
        }
        Self { frame }
    }

    pub fn tick(&mut self, fb: &mut Framebuffer) {
        fb.copy_from(&self.frame);
    }

    /// Idle lasts until an order arrives
    pub fn is_complete(&self) -> bool {
        false
    }

    pub fn frame(&self) -> &Framebuffer {
        &self.frame
    }
}

/// Lightning alert
#[derive(Debug, Clone)]
pub struct FlashScene {
    bolts: Vec<Framebuffer>,
    card: Framebuffer,
    tick: u32,
    duration: u32,
}

impl FlashScene {
    pub fn new(width: u16, height: u16, seed: u64, duration: u32) -> Self {
        let mut rng = Rng::with_seed(seed);
        let bolts = (0..BOLT_FRAMES)
            .map(|_| render_bolt(&mut rng, width, height))
            .collect();

        Self {
            bolts,
            card: render_card(width, height),
            tick: 0,
            duration,
        }
    }

    /// Which pre-rendered frame a tick shows
    fn frame_at(&self, tick: u32) -> &Framebuffer {
        if tick % FLASH_RHYTHM == FLASH_RHYTHM - 1 {
            return &self.card;
        }
        let index = (tick / FLASH_RHYTHM) as usize % self.bolts.len().max(1);
        self.bolts.get(index).unwrap_or(&self.card)
    }

    pub fn tick(&mut self, fb: &mut Framebuffer) {
        fb.copy_from(self.frame_at(self.tick));
        self.tick = self.tick.saturating_add(1);
    }

    pub fn is_complete(&self) -> bool {
        self.tick >= self.duration
    }

    pub fn bolts(&self) -> &[Framebuffer] {
        &self.bolts
    }
}

/// A jagged bolt from the top edge downwards
fn render_bolt(rng: &mut Rng, width: u16, height: u16) -> Framebuffer {
    let mut frame = Framebuffer::new(width, height);
    let w = i32::from(width.max(1));
    let h = i32::from(height.max(1));

    let swing = w / 4;
    let step_min = (h / 8).max(1);
    let step_max = (h / 6).max(step_min);
    let style = PrimitiveStyle::with_stroke(BinaryColor::On, 1);

    let mut x = rng.i32(w / 4..=(w / 4) * 3);
    let mut y = 0;
    for _ in 0..rng.u8(5..=8) {
        let next_x = (x + rng.i32(-swing..=swing)).clamp(0, w - 1);
        let next_y = (y + rng.i32(step_min..=step_max)).clamp(0, h - 1);
        let _ = Line::new(Point::new(x, y), Point::new(next_x, next_y))
            .into_styled(style)
            .draw(&mut frame);
        x = next_x;
        y = next_y;
    }
    frame
}

/// Bordered "New Order!" card
fn render_card(width: u16, height: u16) -> Framebuffer {
    let mut frame = Framebuffer::new(width, height);
    let _ = Rectangle::new(Point::zero(), Size::new(u32::from(width), u32::from(height)))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(&mut frame);

    let x = match TextLayout::new(u32::from(width), Alignment::Center).place(CARD_MESSAGE) {
        Placement::Static { x } => x,
        Placement::Scrolling => 0,
    };
    draw_text(&mut frame, CARD_MESSAGE, x, centred_text_y(height));
    frame
}

/// Lines of text, one per row, any of which may scroll
#[derive(Debug, Clone)]
pub struct TextScene {
    lines: Vec<ScrollState>,
    tick: u32,
    duration: u32,
}

impl TextScene {
    pub fn new<S: AsRef<str>>(
        lines: &[S],
        width: u16,
        scroll: &ScrollConfig,
        policy: DwellPolicy,
        dwell: u32,
    ) -> Self {
        let mode = match policy {
            DwellPolicy::Fixed => ScrollMode::Loop,
            DwellPolicy::ScrollPass => ScrollMode::Once,
        };
        let lines: Vec<ScrollState> = lines
            .iter()
            .map(|line| {
                ScrollState::new(
                    line.as_ref(),
                    u32::from(width),
                    scroll.speed,
                    scroll.alignment,
                    mode,
                )
            })
            .collect();

        let duration = match policy {
            DwellPolicy::Fixed => dwell,
            DwellPolicy::ScrollPass => {
                let longest = lines.iter().map(ScrollState::pass_ticks).max().unwrap_or(0);
                if longest == 0 {
                    dwell
                } else {
                    longest
                }
            }
        };

        Self {
            lines,
            tick: 0,
            duration,
        }
    }

    pub fn tick(&mut self, fb: &mut Framebuffer) {
        fb.clear();
        let mut y = TEXT_TOP;
        for line in &mut self.lines {
            line.draw(fb, y);
            line.advance();
            y += LINE_PITCH;
        }
        self.tick = self.tick.saturating_add(1);
    }

    pub fn is_complete(&self) -> bool {
        self.tick >= self.duration
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn lines(&self) -> &[ScrollState] {
        &self.lines
    }
}

/// Centred bar shrinking to nothing
#[derive(Debug, Clone)]
pub struct ReturnScene {
    tick: u32,
    duration: u32,
}

impl ReturnScene {
    pub fn new(duration: u32) -> Self {
        Self { tick: 0, duration }
    }

    /// Bar width at `tick`
    fn bar_width(&self, width: u16, tick: u32) -> u32 {
        let remaining = self.duration.saturating_sub(tick);
        (u64::from(width) * u64::from(remaining) / u64::from(self.duration.max(1))) as u32
    }

    pub fn tick(&mut self, fb: &mut Framebuffer) {
        fb.clear();
        let bar = self.bar_width(fb.width(), self.tick);
        if bar > 0 {
            let x = (u32::from(fb.width()) - bar) / 2;
            let y = (i32::from(fb.height()) / 2 - 1).max(0);
            let _ = Rectangle::new(Point::new(x as i32, y), Size::new(bar, 2))
                .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
                .draw(fb);
        }
        self.tick = self.tick.saturating_add(1);
    }

    pub fn is_complete(&self) -> bool {
        self.tick >= self.duration
    }
}

/// The scene behind a non-idle state
#[derive(Debug, Clone)]
pub enum ActiveScene {
    Flash(FlashScene),
    Text(TextScene),
    Return(ReturnScene),
}

impl ActiveScene {
    pub fn tick(&mut self, fb: &mut Framebuffer) {
        match self {
            ActiveScene::Flash(scene) => scene.tick(fb),
            ActiveScene::Text(scene) => scene.tick(fb),
            ActiveScene::Return(scene) => scene.tick(fb),
        }
    }

    pub fn is_complete(&self) -> bool {
        match self {
            ActiveScene::Flash(scene) => scene.is_complete(),
            ActiveScene::Text(scene) => scene.is_complete(),
            ActiveScene::Return(scene) => scene.is_complete(),
        }
    }

    /// Ticks this scene runs for
    pub fn duration(&self) -> u32 {
        match self {
            ActiveScene::Flash(scene) => scene.duration,
            ActiveScene::Text(scene) => scene.duration,
            ActiveScene::Return(scene) => scene.duration,
        }
    }
}
