//! Run configuration
//!
//! This module holds the robot's run configuration (site endpoints, retry
//! budget, failure policy) and the on-disk layout of run artifacts.

use crate::browser::BrowserConfig;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use url::Url;

/// Order form page on the RobotSpareBin site
pub const ORDER_FORM_URL: &str = "https://robotsparebinindustries.com/#/robot-order";

/// Published orders CSV feed
pub const ORDERS_CSV_URL: &str = "https://robotsparebinindustries.com/orders.csv";

/// Local file name the orders feed is downloaded to
pub const ORDERS_CSV_FILE: &str = "orders.csv";

/// Default root directory for run artifacts
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Default number of times a rejected submission is re-tried
pub const DEFAULT_MAX_SUBMIT_RETRIES: u32 = 10;

/// Configuration for a full robot run
#[derive(Debug, Clone)]
pub struct RobotConfig {
    /// URL of the order form page
    pub order_form_url: String,
    /// URL of the orders CSV feed
    pub orders_csv_url: String,
    /// Local path the orders CSV is downloaded to
    pub orders_csv_path: PathBuf,
    /// Root directory for receipts, screenshots, and the archive
    pub output_dir: PathBuf,
    /// How many times a rejected submission is re-tried before giving up
    pub max_submit_retries: u32,
    /// Keep processing remaining orders when one fails (default: false)
    pub continue_on_error: bool,
    /// Browser launch configuration
    pub browser: BrowserConfig,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            order_form_url: ORDER_FORM_URL.to_string(),
            orders_csv_url: ORDERS_CSV_URL.to_string(),
            orders_csv_path: PathBuf::from(ORDERS_CSV_FILE),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            max_submit_retries: DEFAULT_MAX_SUBMIT_RETRIES,
            continue_on_error: false,
            browser: BrowserConfig::default(),
        }
    }
}

impl RobotConfig {
    /// Validate the configuration before launching anything
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.order_form_url)
            .map_err(|e| Error::Config(format!("order form URL: {}", e)))?;
        Url::parse(&self.orders_csv_url)
            .map_err(|e| Error::Config(format!("orders CSV URL: {}", e)))?;

        if self.orders_csv_path.as_os_str().is_empty() {
            return Err(Error::Config("orders CSV path is empty".to_string()));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::Config("output directory is empty".to_string()));
        }

        Ok(())
    }

    /// Artifact layout rooted at this config's output directory
    pub fn layout(&self) -> OutputLayout {
        OutputLayout::new(&self.output_dir)
    }
}

/// On-disk layout of run artifacts
///
/// All paths are derived from the output root:
/// `<root>/receipts/order_<n>.pdf`, `<root>/screenshots/order_<n>.png`,
/// and `<root>/receipts.zip`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    /// Root artifact directory
    pub output_dir: PathBuf,
    /// Directory holding per-order receipt PDFs
    pub receipts_dir: PathBuf,
    /// Directory holding per-order robot preview screenshots
    pub screenshots_dir: PathBuf,
    /// Path of the receipts ZIP archive
    pub archive_path: PathBuf,
}

impl OutputLayout {
    /// Derive the layout from an output root
    pub fn new(root: &Path) -> Self {
        let receipts_dir = root.join("receipts");
        let archive_path = receipts_dir.with_extension("zip");
        Self {
            output_dir: root.to_path_buf(),
            receipts_dir,
            screenshots_dir: root.join("screenshots"),
            archive_path,
        }
    }

    /// Create the artifact directories
    ///
    /// Idempotent: existing directories and their contents are left alone.
    pub fn prepare(&self) -> Result<()> {
        std::fs::create_dir_all(&self.receipts_dir)?;
        std::fs::create_dir_all(&self.screenshots_dir)?;
        Ok(())
    }

    /// Receipt PDF path for an order number
    pub fn receipt_path(&self, order_number: &str) -> PathBuf {
        self.receipts_dir.join(format!("order_{}.pdf", order_number))
    }

    /// Robot preview screenshot path for an order number
    pub fn screenshot_path(&self, order_number: &str) -> PathBuf {
        self.screenshots_dir.join(format!("order_{}.png", order_number))
    }
}
