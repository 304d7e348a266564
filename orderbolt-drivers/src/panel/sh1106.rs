//! SH1106 OLED panel driver
//!
//! Driver for SH1106-based monochrome OLEDs over I2C, as found on the common
//! 1.3" 128x64 modules. The controller has 132 columns of RAM; a 128 pixel
//! panel is wired to the middle 128, hence the 2 column offset.
//!
//! The framebuffer is already stored in page order, so presenting a frame is
//! one address setup and one data write per page.

use heapless::Vec;
use orderbolt_core::traits::{FramePresenter, PresentError};
use orderbolt_core::Framebuffer;
use orderbolt_hal::I2cBus;

/// Default I2C address (0x3D on modules with the address jumper moved)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Columns of display RAM
pub const RAM_COLUMNS: u16 = 132;

/// Rows the controller can drive
pub const MAX_ROWS: u16 = 64;

/// Control byte prefixes
const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

/// SH1106 commands
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0xAD;
}

/// SH1106 panel driver
pub struct Sh1106<I2C> {
    i2c: I2C,
    address: u8,
    contrast: u8,
    initialized: bool,
    /// Control byte plus one page of column data
    page_buf: Vec<u8, { RAM_COLUMNS as usize + 1 }>,
}

impl<I2C: I2cBus> Sh1106<I2C> {
    /// Create a new driver; call `init()` before presenting frames
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            contrast: 0xCF,
            initialized: false,
            page_buf: Vec::new(),
        }
    }

    /// Contrast applied by `init()`
    pub fn with_contrast(mut self, contrast: u8) -> Self {
        self.contrast = contrast;
        self
    }

    /// Run the power-up sequence and switch the panel on
    pub fn init(&mut self) -> Result<(), I2C::Error> {
        self.initialized = false;

        let init_cmds: &[u8] = &[
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80,
            cmd::SET_MUX_RATIO,
            (MAX_ROWS - 1) as u8,
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE,
            cmd::SET_CHARGE_PUMP,
            0x8B, // DC-DC on
            cmd::SET_SEG_REMAP,
            cmd::SET_COM_SCAN_DEC,
            cmd::SET_COM_PINS,
            0x12,
            cmd::SET_CONTRAST,
            self.contrast,
            cmd::SET_PRECHARGE,
            0x22,
            cmd::SET_VCOM_DETECT,
            0x35,
            cmd::SET_NORMAL,
        ];
        for &c in init_cmds {
            self.command(c)?;
        }

        // Blank RAM before the panel lights up
        for page in 0..(MAX_ROWS / 8) as u8 {
            self.set_address(page, 0)?;
            self.page_buf.clear();
            let _ = self.page_buf.push(CONTROL_DATA);
            let _ = self
                .page_buf
                .extend_from_slice(&[0; RAM_COLUMNS as usize]);
            self.i2c.write(self.address, &self.page_buf)?;
        }

        self.command(cmd::DISPLAY_ON)?;
        self.initialized = true;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Turn the panel off (RAM is kept)
    pub fn sleep(&mut self) -> Result<(), I2C::Error> {
        self.command(cmd::DISPLAY_OFF)
    }

    /// Give back the bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn command(&mut self, cmd: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[CONTROL_COMMAND, cmd])
    }

    fn set_address(&mut self, page: u8, column: u8) -> Result<(), I2C::Error> {
        self.command(cmd::SET_PAGE_ADDR | (page & 0x0F))?;
        self.command(cmd::SET_LOW_COLUMN | (column & 0x0F))?;
        self.command(cmd::SET_HIGH_COLUMN | (column >> 4))
    }

    /// Column where a frame of `width` pixels starts in RAM
    fn column_offset(width: u16) -> u8 {
        ((RAM_COLUMNS - width) / 2) as u8
    }
}

impl<I2C: I2cBus> FramePresenter for Sh1106<I2C> {
    fn present(&mut self, frame: &Framebuffer) -> Result<(), PresentError> {
        if !self.initialized {
            return Err(PresentError::NotInitialized);
        }
        if frame.width() == 0 || frame.width() > RAM_COLUMNS || frame.height() > MAX_ROWS {
            return Err(PresentError::SizeMismatch);
        }

        let column = Self::column_offset(frame.width());
        for (page, bytes) in frame.pages().enumerate() {
            self.set_address(page as u8, column)
                .map_err(|_| PresentError::Communication)?;

            self.page_buf.clear();
            let _ = self.page_buf.push(CONTROL_DATA);
            self.page_buf
                .extend_from_slice(bytes)
                .map_err(|_| PresentError::SizeMismatch)?;
            self.i2c
                .write(self.address, &self.page_buf)
                .map_err(|_| PresentError::Communication)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::vec::Vec as StdVec;

    /// Records every write; fails once `fail_after` writes have gone through
    #[derive(Default)]
    struct FakeBus {
        writes: StdVec<(u8, StdVec<u8>)>,
        fail_after: Option<usize>,
    }

    impl I2cBus for FakeBus {
        type Error = ();

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), ()> {
            if self.fail_after.is_some_and(|n| self.writes.len() >= n) {
                return Err(());
            }
            self.writes.push((address, data.to_vec()));
            Ok(())
        }
    }

    fn ready_panel() -> Sh1106<FakeBus> {
        let mut panel = Sh1106::new(FakeBus::default(), DEFAULT_ADDRESS);
        panel.init().unwrap();
        panel.i2c.writes.clear();
        panel
    }

    #[test]
    fn test_present_before_init() {
        let mut panel = Sh1106::new(FakeBus::default(), DEFAULT_ADDRESS);
        let frame = Framebuffer::new(128, 64);
        assert_eq!(panel.present(&frame), Err(PresentError::NotInitialized));
        assert!(panel.i2c.writes.is_empty());
    }

    #[test]
    fn test_init_ends_display_on() {
        let mut panel = Sh1106::new(FakeBus::default(), 0x3D).with_contrast(0x40);
        panel.init().unwrap();
        assert!(panel.is_initialized());

        let writes = &panel.i2c.writes;
        assert!(writes.iter().all(|(addr, _)| *addr == 0x3D));
        assert_eq!(writes.last().unwrap().1, [CONTROL_COMMAND, cmd::DISPLAY_ON]);
        // Contrast follows its command byte
        let contrast = writes
            .windows(2)
            .find(|w| w[0].1 == [CONTROL_COMMAND, cmd::SET_CONTRAST])
            .map(|w| w[1].1.clone());
        assert_eq!(contrast, Some(std::vec![CONTROL_COMMAND, 0x40]));
    }

    #[test]
    fn test_present_streams_pages_with_offset() {
        let mut panel = ready_panel();
        let mut frame = Framebuffer::new(128, 64);
        frame.set_pixel(0, 9, true);
        panel.present(&frame).unwrap();

        // 8 pages x (3 address commands + 1 data write)
        let writes = &panel.i2c.writes;
        assert_eq!(writes.len(), 32);

        let page1 = &writes[4..8];
        assert_eq!(page1[0].1, [CONTROL_COMMAND, cmd::SET_PAGE_ADDR | 1]);
        assert_eq!(page1[1].1, [CONTROL_COMMAND, cmd::SET_LOW_COLUMN | 2]);
        assert_eq!(page1[2].1, [CONTROL_COMMAND, cmd::SET_HIGH_COLUMN]);

        let data = &page1[3].1;
        assert_eq!(data.len(), 129);
        assert_eq!(data[0], CONTROL_DATA);
        assert_eq!(data[1], 0b0000_0010);
    }

    #[test]
    fn test_rejects_oversized_frame() {
        let mut panel = ready_panel();
        let frame = Framebuffer::new(140, 64);
        assert_eq!(panel.present(&frame), Err(PresentError::SizeMismatch));
        let frame = Framebuffer::new(128, 72);
        assert_eq!(panel.present(&frame), Err(PresentError::SizeMismatch));
    }

    #[test]
    fn test_bus_failure_is_communication_error() {
        let mut panel = ready_panel();
        panel.i2c.fail_after = Some(5);
        let frame = Framebuffer::new(128, 64);
        assert_eq!(panel.present(&frame), Err(PresentError::Communication));

        // Bus recovers, next frame goes through
        panel.i2c.fail_after = None;
        panel.i2c.writes.clear();
        assert_eq!(panel.present(&frame), Ok(()));
    }

    #[test]
    fn test_full_ram_width_has_no_offset() {
        let mut panel = ready_panel();
        let frame = Framebuffer::new(132, 64);
        panel.present(&frame).unwrap();
        assert_eq!(
            panel.i2c.writes[1].1,
            [CONTROL_COMMAND, cmd::SET_LOW_COLUMN]
        );
    }
}
