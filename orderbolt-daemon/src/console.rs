//! Terminal stand-ins for the panel and the indicator
//!
//! Used with `--panel console` to run the full display cycle on a machine
//! with no OLED attached. Frames are drawn with half-block characters, two
//! pixel rows per text row, and only when the picture changes.

use std::io::Write;

use log::{debug, info};
use orderbolt_core::traits::{FramePresenter, IndicatorError, IndicatorLine, PresentError};
use orderbolt_core::Framebuffer;

/// Move the cursor home so successive frames overwrite each other
const CURSOR_HOME: &str = "\x1b[H";

/// Render a frame as text, two pixel rows per line
pub fn render_frame(frame: &Framebuffer) -> String {
    let width = i32::from(frame.width());
    let height = i32::from(frame.height());
    let mut out = String::with_capacity(((width + 3) * (height / 2 + 3)) as usize);

    let border = "-".repeat(width as usize);
    out.push('+');
    out.push_str(&border);
    out.push_str("+\n");

    for y in (0..height).step_by(2) {
        out.push('|');
        for x in 0..width {
            let top = frame.pixel(x, y);
            let bottom = frame.pixel(x, y + 1);
            out.push(match (top, bottom) {
                (false, false) => ' ',
                (true, false) => '▀',
                (false, true) => '▄',
                (true, true) => '█',
            });
        }
        out.push_str("|\n");
    }

    out.push('+');
    out.push_str(&border);
    out.push_str("+\n");
    out
}

/// Frame presenter writing to a terminal
pub struct ConsolePanel<W> {
    out: W,
    /// Bytes of the last frame drawn
    last: Option<Vec<u8>>,
    /// Prefix each frame with a cursor-home escape
    ansi: bool,
    frames_drawn: u64,
}

impl<W: Write> ConsolePanel<W> {
    pub fn new(out: W, ansi: bool) -> Self {
        Self {
            out,
            last: None,
            ansi,
            frames_drawn: 0,
        }
    }

    /// Frames actually written (unchanged frames are skipped)
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FramePresenter for ConsolePanel<W> {
    fn present(&mut self, frame: &Framebuffer) -> Result<(), PresentError> {
        if self.last.as_deref() == Some(frame.as_bytes()) {
            return Ok(());
        }

        let text = render_frame(frame);
        let prefix = if self.ansi { CURSOR_HOME } else { "" };
        write!(self.out, "{}{}", prefix, text).map_err(|_| PresentError::Communication)?;
        self.out.flush().map_err(|_| PresentError::Communication)?;

        self.last = Some(frame.as_bytes().to_vec());
        self.frames_drawn += 1;
        Ok(())
    }
}

/// Indicator that only logs level changes
#[derive(Debug, Default)]
pub struct LogIndicator {
    on: bool,
    switches: u32,
}

impl LogIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Number of off-to-on transitions seen
    pub fn blinks(&self) -> u32 {
        self.switches
    }
}

impl IndicatorLine for LogIndicator {
    fn set_level(&mut self, on: bool) -> Result<(), IndicatorError> {
        if on && !self.on {
            self.switches += 1;
            if self.switches == 1 {
                info!("Indicator: first blink");
            }
        }
        debug!("Indicator {}", if on { "on" } else { "off" });
        self.on = on;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Writer that refuses everything
    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_render_half_blocks() {
        let mut frame = Framebuffer::new(4, 4);
        frame.set_pixel(0, 0, true);
        frame.set_pixel(1, 1, true);
        frame.set_pixel(2, 0, true);
        frame.set_pixel(2, 1, true);

        let text = render_frame(&frame);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "+----+");
        assert_eq!(lines[1], "|▀▄█ |");
        assert_eq!(lines[2], "|    |");
        assert_eq!(lines[3], "+----+");
    }

    #[test]
    fn test_unchanged_frames_are_skipped() {
        let mut panel = ConsolePanel::new(Vec::new(), false);
        let mut frame = Framebuffer::new(8, 8);
        panel.present(&frame).unwrap();
        panel.present(&frame).unwrap();
        assert_eq!(panel.frames_drawn(), 1);

        frame.set_pixel(3, 3, true);
        panel.present(&frame).unwrap();
        assert_eq!(panel.frames_drawn(), 2);

        let out = String::from_utf8(panel.into_inner()).unwrap();
        assert_eq!(out.matches("+--------+\n").count(), 4);
    }

    #[test]
    fn test_ansi_prefix() {
        let mut panel = ConsolePanel::new(Vec::new(), true);
        panel.present(&Framebuffer::new(2, 2)).unwrap();
        let out = panel.into_inner();
        assert!(out.starts_with(CURSOR_HOME.as_bytes()));
    }

    #[test]
    fn test_write_failure_is_communication_error() {
        let mut panel = ConsolePanel::new(Closed, false);
        let frame = Framebuffer::new(8, 8);
        assert_eq!(panel.present(&frame), Err(PresentError::Communication));
        // Not remembered, so the next tick tries again
        assert_eq!(panel.present(&frame), Err(PresentError::Communication));
        assert_eq!(panel.frames_drawn(), 0);
    }

    #[test]
    fn test_log_indicator_counts_blinks() {
        let mut led = LogIndicator::new();
        for level in [true, false, true, true, false] {
            led.set_level(level).unwrap();
        }
        assert_eq!(led.blinks(), 2);
        assert!(!led.is_on());
    }
}
