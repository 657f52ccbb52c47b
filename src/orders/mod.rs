//! Orders feed
//!
//! This module downloads the published orders CSV and turns it into
//! validated order records, preserving file order.

pub mod record;
pub mod source;

pub use record::OrderRecord;
pub use source::{read_orders_file, OrdersSource, EXPECTED_COLUMNS};
