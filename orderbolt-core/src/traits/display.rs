//! Frame presenter trait for the pixel panel

use core::fmt;

use crate::framebuffer::Framebuffer;

/// Errors that can occur while pushing a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PresentError {
    /// Bus write failed or was not acknowledged
    Communication,
    /// Panel has not been initialized
    NotInitialized,
    /// Frame does not fit the panel
    SizeMismatch,
}

impl fmt::Display for PresentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresentError::Communication => write!(f, "panel communication failed"),
            PresentError::NotInitialized => write!(f, "panel not initialized"),
            PresentError::SizeMismatch => write!(f, "frame size does not match panel"),
        }
    }
}

/// Trait for showing a finished frame
///
/// Called once per tick with the frame the sequencer just rendered. The
/// presenter only reads the framebuffer. A failed call is reported and the
/// next tick tries again with the next frame.
pub trait FramePresenter {
    /// Push `frame` to the panel
    fn present(&mut self, frame: &Framebuffer) -> Result<(), PresentError>;
}

impl<T: FramePresenter + ?Sized> FramePresenter for &mut T {
    fn present(&mut self, frame: &Framebuffer) -> Result<(), PresentError> {
        (**self).present(frame)
    }
}
