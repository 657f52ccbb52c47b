//! Receipt rendering
//!
//! This module turns receipt HTML fragments into PDF documents by printing
//! them on a dedicated Chrome scratch page.

use crate::browser::navigation::{NavigationOptions, PageNavigator, WaitUntil};
use crate::browser::PageHandle;
use crate::error::{CaptureError, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use tracing::{debug, instrument};

/// Renders receipt HTML into PDF bytes
#[async_trait]
pub trait ReceiptRenderer: Send + Sync {
    /// Render an HTML fragment as a single-document PDF
    async fn render_pdf(&self, html: &str) -> Result<Vec<u8>>;
}

/// Receipt renderer backed by a Chrome scratch page
///
/// The printer navigates its own page to a `data:` URL carrying the receipt
/// markup and asks Chrome to print it. The order form page is never touched,
/// so printing cannot disturb an in-flight order.
pub struct CdpReceiptPrinter {
    page: PageHandle,
}

impl CdpReceiptPrinter {
    /// Wrap a page for receipt printing
    ///
    /// The page is owned exclusively by this printer for the rest of the run.
    pub fn new(page: PageHandle) -> Self {
        Self { page }
    }
}

/// Wrap a receipt fragment in a minimal printable document
fn wrap_fragment(html: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"></head><body>{}</body></html>",
        html
    )
}

/// Encode a document as a base64 `data:` URL
fn data_url(document: &str) -> String {
    format!("data:text/html;base64,{}", BASE64.encode(document))
}

#[async_trait]
impl ReceiptRenderer for CdpReceiptPrinter {
    #[instrument(skip(self, html))]
    async fn render_pdf(&self, html: &str) -> Result<Vec<u8>> {
        let url = data_url(&wrap_fragment(html));

        self.page
            .page
            .goto(url)
            .await
            .map_err(|e| CaptureError::PdfFailed(e.to_string()))?;

        let opts = NavigationOptions {
            wait_until: WaitUntil::Load,
            ..Default::default()
        };
        PageNavigator::wait_for_ready(&self.page.page, &opts).await?;

        let params = PrintToPdfParams::builder()
            .print_background(true)
            .prefer_css_page_size(true)
            .build();

        let data = self
            .page
            .page
            .pdf(params)
            .await
            .map_err(|e| CaptureError::PdfFailed(e.to_string()))?;

        debug!("Receipt PDF generated: {} bytes", data.len());
        Ok(data)
    }
}
