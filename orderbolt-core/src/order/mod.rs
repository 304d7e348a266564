//! Order model
//!
//! An `Order` is validated when it is built, so anything that reaches the
//! queue can be displayed without further checks.

pub mod queue;

pub use queue::{OrderInbox, OrderQueue};

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// One product line of an order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    /// Product name as shown on the panel
    pub name: String,
    /// Units ordered, at least 1
    pub quantity: u32,
}

impl LineItem {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// Reasons an order is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OrderError {
    /// The order has no line items
    NoLineItems,
    /// Line item `index` has a quantity of zero
    ZeroQuantity { index: usize },
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderError::NoLineItems => write!(f, "order has no line items"),
            OrderError::ZeroQuantity { index } => {
                write!(f, "line item {} has zero quantity", index)
            }
        }
    }
}

/// A validated order, immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: String,
    items: Vec<LineItem>,
    total: String,
    currency: String,
    customer: Option<String>,
}

impl Order {
    /// Build an order, rejecting empty item lists and zero quantities
    pub fn new(
        id: impl Into<String>,
        items: Vec<LineItem>,
        total: impl Into<String>,
        currency: impl Into<String>,
    ) -> Result<Self, OrderError> {
        if items.is_empty() {
            return Err(OrderError::NoLineItems);
        }
        if let Some(index) = items.iter().position(|item| item.quantity == 0) {
            return Err(OrderError::ZeroQuantity { index });
        }

        Ok(Self {
            id: id.into(),
            items,
            total: total.into(),
            currency: currency.into(),
            customer: None,
        })
    }

    /// Attach the customer's first name
    pub fn with_customer(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.customer = (!name.is_empty()).then_some(name);
        self
    }

    /// Display identifier, e.g. `#1001`
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Total amount as a display string
    pub fn total(&self) -> &str {
        &self.total
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn customer(&self) -> Option<&str> {
        self.customer.as_deref()
    }

    /// Sum of all quantities
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |sum, item| sum.saturating_add(item.quantity))
    }
}
