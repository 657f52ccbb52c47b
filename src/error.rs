//! Error types for the SpareBin order robot
//!
//! This module provides a comprehensive error type hierarchy using `thiserror`
//! for proper error handling across all components.

use thiserror::Error;

/// The main error type for order robot operations
#[derive(Error, Debug)]
pub enum Error {
    /// Browser-related errors
    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    /// Navigation errors
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// Page interaction errors
    #[error("Page error: {0}")]
    Page(#[from] PageError),

    /// Orders feed errors
    #[error("Orders error: {0}")]
    Orders(#[from] OrdersError),

    /// Order submission errors
    #[error("Submit error: {0}")]
    Submit(#[from] SubmitError),

    /// Receipt capture errors (HTML, PDF, screenshot)
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    /// PDF composition errors
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Receipts archive errors
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// Invalid run configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// ChromiumOxide errors
    #[error("CDP error: {0}")]
    Cdp(String),
}

/// Browser lifecycle and control errors
#[derive(Error, Debug)]
pub enum BrowserError {
    /// Failed to launch browser
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Browser configuration error
    #[error("Invalid browser configuration: {0}")]
    ConfigError(String),

    /// Failed to create new page/tab
    #[error("Failed to create page: {0}")]
    PageCreationFailed(String),

    /// Timeout waiting for browser
    #[error("Browser operation timed out after {0}ms")]
    Timeout(u64),
}

/// Navigation errors
#[derive(Error, Debug)]
pub enum NavigationError {
    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Navigation timeout
    #[error("Navigation timed out after {0}ms")]
    Timeout(u64),

    /// Page load failed
    #[error("Page load failed: {0}")]
    LoadFailed(String),
}

/// Page interaction errors (clicks, form input, element queries)
#[derive(Error, Debug)]
pub enum PageError {
    /// Element not found
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Click or form input failed
    #[error("Interaction failed: {0}")]
    InteractionFailed(String),

    /// JavaScript execution failed
    #[error("JavaScript execution failed: {0}")]
    EvalFailed(String),

    /// Element screenshot failed
    #[error("Screenshot capture failed: {0}")]
    ScreenshotFailed(String),
}

/// Orders feed errors (download, parsing, validation)
#[derive(Error, Debug)]
pub enum OrdersError {
    /// Orders file download failed
    #[error("Orders download failed: {0}")]
    DownloadFailed(String),

    /// Required column missing from the orders table
    #[error("Orders table is missing required column: {0}")]
    MissingColumn(String),

    /// Orders table could not be parsed
    #[error("Malformed orders table: {0}")]
    Malformed(String),

    /// Order number unusable as a file name component
    #[error("Invalid order number: {0:?}")]
    InvalidOrderNumber(String),
}

/// Order submission errors
#[derive(Error, Debug)]
pub enum SubmitError {
    /// Server kept rejecting the order past the configured retry budget
    #[error("Submission rejected after {attempts} retries")]
    RetryBudgetExhausted {
        /// Number of re-submissions attempted before giving up
        attempts: u32,
    },

    /// Neither a receipt nor a rejection alert appeared after submitting
    #[error("No submission outcome after {waited_ms}ms")]
    NoOutcome {
        /// How long the robot polled for an outcome
        waited_ms: u64,
    },
}

/// Receipt capture errors (receipt HTML, rendered PDF, preview screenshot)
#[derive(Error, Debug)]
pub enum CaptureError {
    /// Receipt region could not be read from the page
    #[error("Receipt unavailable: {0}")]
    ReceiptUnavailable(String),

    /// Receipt region was present but empty
    #[error("Receipt region is empty")]
    EmptyReceipt,

    /// Robot preview image could not be captured
    #[error("Robot preview unavailable: {0}")]
    PreviewUnavailable(String),

    /// PDF generation failed
    #[error("PDF generation failed: {0}")]
    PdfFailed(String),
}

/// PDF composition errors
#[derive(Error, Debug)]
pub enum PdfError {
    /// Screenshot image could not be decoded
    #[error("Image decode failed: {0}")]
    ImageDecode(String),

    /// PDF document could not be loaded, edited, or saved
    #[error("PDF document error: {0}")]
    Document(String),
}

/// Receipts archive errors
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Archive file could not be created or finalized
    #[error("Failed to create archive: {0}")]
    Create(String),

    /// A receipt could not be added to the archive
    #[error("Failed to add archive entry: {0}")]
    Append(String),
}

/// Result type alias for order robot operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a CDP error from a string
    pub fn cdp<S: Into<String>>(msg: S) -> Self {
        Error::Cdp(msg.into())
    }
}

/// Convert chromiumoxide errors
impl From<chromiumoxide::error::CdpError> for Error {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Error::Cdp(err.to_string())
    }
}
