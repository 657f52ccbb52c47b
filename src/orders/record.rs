//! Order record model

use crate::error::{OrdersError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One row of the orders table
///
/// Field names map to the CSV column headers. Records are immutable once
/// read; the robot never edits an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Order identifier, also used in artifact file names
    #[serde(rename = "Order number")]
    pub order_number: String,
    /// Head part number (select value)
    #[serde(rename = "Head")]
    pub head: String,
    /// Body part number (radio option suffix)
    #[serde(rename = "Body")]
    pub body: String,
    /// Legs part number (free-form field)
    #[serde(rename = "Legs")]
    pub legs: String,
    /// Shipping address
    #[serde(rename = "Address")]
    pub address: String,
}

impl OrderRecord {
    /// Check the record is usable
    ///
    /// The order number becomes part of receipt and screenshot file names,
    /// so it must be non-empty and free of path separators.
    pub fn validate(&self) -> Result<()> {
        let safe = Regex::new(r"^[A-Za-z0-9_-]+$").unwrap();
        if !safe.is_match(&self.order_number) {
            return Err(OrdersError::InvalidOrderNumber(self.order_number.clone()).into());
        }
        Ok(())
    }
}
