//! Payload errors

use core::fmt;

use orderbolt_core::OrderError;

/// Reasons a webhook body cannot become an order
#[derive(Debug)]
pub enum PayloadError {
    /// Body is not JSON of the expected shape
    Json(serde_json::Error),
    /// Neither `name` nor `id` is present
    MissingIdentifier,
    /// Fields parsed but the order is invalid
    Order(OrderError),
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadError::Json(e) => write!(f, "malformed payload: {}", e),
            PayloadError::MissingIdentifier => write!(f, "payload has no order name or id"),
            PayloadError::Order(e) => write!(f, "invalid order: {}", e),
        }
    }
}

impl From<serde_json::Error> for PayloadError {
    fn from(e: serde_json::Error) -> Self {
        PayloadError::Json(e)
    }
}

impl From<OrderError> for PayloadError {
    fn from(e: OrderError) -> Self {
        PayloadError::Order(e)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PayloadError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            PayloadError::Json(_) => defmt::write!(f, "malformed payload"),
            PayloadError::MissingIdentifier => defmt::write!(f, "missing order identifier"),
            PayloadError::Order(e) => defmt::write!(f, "invalid order: {}", e),
        }
    }
}
