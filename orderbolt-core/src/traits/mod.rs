//! Collaborator traits
//!
//! The engine talks to hardware only through these. Implementations live in
//! `orderbolt-drivers` (real panel and LED) and in the daemon (console panel).

pub mod display;
pub mod indicator;

pub use display::{FramePresenter, PresentError};
pub use indicator::{IndicatorError, IndicatorLine};
