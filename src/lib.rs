//! SpareBin Orderbot - RobotSpareBin Order Entry Automation
//!
//! This crate drives a Chrome session over CDP to submit robot orders on
//! the RobotSpareBin Industries web store and collect the paperwork for
//! each one.
//!
//! # Features
//!
//! - **Orders Feed**: Downloads and validates the published orders CSV
//! - **Browser Automation**: Headless form driving via ChromiumOxide (CDP)
//! - **Receipt Capture**: Receipt HTML printed to PDF, robot preview as PNG
//! - **PDF Composition**: Preview screenshot appended as a trailing PDF page
//! - **Archive**: All receipts zipped into a single deliverable
//!
//! # Architecture
//!
//! ```text
//! Orders CSV ──▶ Robot ──▶ Browser Controller (CDP)
//!                  │              │
//!                  ▼              ▼
//!           ┌────────────┐  ┌──────────────┐
//!           │ Submitter  │  │ Receipt      │
//!           │ (retries)  │  │ Printer      │
//!           └─────┬──────┘  └──────┬───────┘
//!                 │                │
//!                 ▼                ▼
//!            Screenshots      Receipt PDFs ──▶ receipts.zip
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sparebin_orderbot::{Robot, RobotConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let robot = Robot::initialize(RobotConfig::default()).await?;
//!     let summary = robot.run().await?;
//!
//!     println!(
//!         "Submitted {}/{} orders, archive at {:?}",
//!         summary.submitted, summary.total, summary.archive
//!     );
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod archive;
pub mod browser;
pub mod config;
pub mod error;
pub mod orders;
pub mod pdf;
pub mod receipt;
pub mod robot;

// Re-exports for convenience
pub use browser::{BrowserController, PageDriver, ReceiptRenderer};
pub use config::{OutputLayout, RobotConfig};
pub use error::{Error, Result};
pub use orders::{OrderRecord, OrdersSource};
pub use receipt::ReceiptFragment;
pub use robot::{Robot, RunSummary, SubmitOptions};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
