//! Webhook payload shape and conversion

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use orderbolt_core::{LineItem, Order};
use serde::Deserialize;

use crate::error::PayloadError;

/// Money amount as sent by the platform: usually a decimal string, sometimes
/// a bare number
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Text(String),
    Number(f64),
}

impl Amount {
    /// Display form of the amount
    pub fn to_display(&self) -> String {
        match self {
            Amount::Text(text) => text.clone(),
            Amount::Number(value) => format!("{:.2}", value),
        }
    }
}

/// Customer block (only the first name is shown)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CustomerPayload {
    #[serde(default)]
    pub first_name: Option<String>,
}

/// One entry of `line_items`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LineItemPayload {
    #[serde(default)]
    pub name: Option<String>,
    /// Used when `name` is missing
    #[serde(default)]
    pub title: Option<String>,
    pub quantity: u32,
}

/// The subset of the order webhook the display uses
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderPayload {
    #[serde(default)]
    pub id: Option<u64>,
    /// Human-facing order name, e.g. `#1001`
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub total_price: Option<Amount>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub customer: Option<CustomerPayload>,
    #[serde(default)]
    pub line_items: Vec<LineItemPayload>,
}

impl OrderPayload {
    /// Display identifier: `name`, else `#<id>`
    pub fn identifier(&self) -> Option<String> {
        match (&self.name, self.id) {
            (Some(name), _) if !name.trim().is_empty() => Some(String::from(name.trim())),
            (_, Some(id)) => Some(format!("#{}", id)),
            _ => None,
        }
    }

    /// Validate into an `Order`
    pub fn into_order(self) -> Result<Order, PayloadError> {
        let id = self.identifier().ok_or(PayloadError::MissingIdentifier)?;

        let items = self
            .line_items
            .into_iter()
            .map(|item| {
                let name = item.name.or(item.title).unwrap_or_default();
                LineItem::new(name, item.quantity)
            })
            .collect();
        let total = self
            .total_price
            .as_ref()
            .map(Amount::to_display)
            .unwrap_or_default();

        let order = Order::new(id, items, total, self.currency.unwrap_or_default())?;
        Ok(match self.customer.and_then(|c| c.first_name) {
            Some(name) => order.with_customer(name),
            None => order,
        })
    }
}

/// Parse a raw webhook body into a validated order
pub fn parse_order(body: &[u8]) -> Result<Order, PayloadError> {
    let payload: OrderPayload = serde_json::from_slice(body)?;
    payload.into_order()
}
