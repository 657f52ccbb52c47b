//! Per-order processing loop
//!
//! Walks the orders list against a single form session: submit, capture
//! receipt and preview, merge them into one PDF, advance to the next form.
//! Archives the receipts folder once the loop is done.

use crate::archive;
use crate::browser::{PageDriver, ReceiptRenderer};
use crate::config::OutputLayout;
use crate::error::{CaptureError, Result};
use crate::orders::OrderRecord;
use crate::pdf;
use crate::receipt::ReceiptFragment;
use crate::robot::selectors;
use crate::robot::submitter::{FormSubmitter, SubmitOptions, SubmitReport};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

/// A failed order kept aside in continue-on-error mode
#[derive(Debug, Clone, Serialize)]
pub struct OrderFailure {
    /// Order number from the feed
    pub order_number: String,
    /// Error that stopped the order
    pub reason: String,
}

/// Tallies for a completed run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Orders read from the feed
    pub total: usize,
    /// Orders submitted with all artifacts captured
    pub submitted: usize,
    /// Orders that failed (continue-on-error mode only)
    pub failed: Vec<OrderFailure>,
    /// Rejected submissions re-tried across the whole run
    pub alert_retries: u32,
    /// Path of the receipts archive, when the run got that far
    pub archive: Option<PathBuf>,
    /// Wall-clock duration of the processing loop in milliseconds
    pub duration_ms: u64,
}

/// Processes orders one at a time against a single form session
pub struct OrderProcessor<'a> {
    driver: &'a dyn PageDriver,
    renderer: &'a dyn ReceiptRenderer,
    layout: &'a OutputLayout,
    submitter: FormSubmitter,
    continue_on_error: bool,
}

impl<'a> OrderProcessor<'a> {
    /// Assemble a processor over an open form page and a receipt renderer
    pub fn new(
        driver: &'a dyn PageDriver,
        renderer: &'a dyn ReceiptRenderer,
        layout: &'a OutputLayout,
        options: SubmitOptions,
        continue_on_error: bool,
    ) -> Self {
        Self {
            driver,
            renderer,
            layout,
            submitter: FormSubmitter::new(options),
            continue_on_error,
        }
    }

    /// Run the full order loop, then archive the receipts folder
    ///
    /// The default policy is fail-fast: the first order error aborts the
    /// run and nothing is archived. In continue-on-error mode failed orders
    /// are recorded in the summary and the loop keeps going.
    #[instrument(skip_all)]
    pub async fn run(&self, orders: &[OrderRecord]) -> Result<RunSummary> {
        let start = std::time::Instant::now();
        let mut summary = RunSummary {
            total: orders.len(),
            ..Default::default()
        };

        for (index, order) in orders.iter().enumerate() {
            info!(
                "Processing order {} ({}/{})",
                order.order_number,
                index + 1,
                orders.len()
            );
            match self.process_order(order).await {
                Ok(report) => {
                    summary.submitted += 1;
                    summary.alert_retries += report.alert_retries;
                }
                Err(e) if self.continue_on_error => {
                    warn!("Order {} failed: {}", order.order_number, e);
                    summary.failed.push(OrderFailure {
                        order_number: order.order_number.clone(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        archive::zip_folder(&self.layout.receipts_dir, &self.layout.archive_path)?;
        summary.archive = Some(self.layout.archive_path.clone());
        summary.duration_ms = start.elapsed().as_millis() as u64;
        Ok(summary)
    }

    /// Submit one order, capture its artifacts, and advance to a fresh form
    async fn process_order(&self, order: &OrderRecord) -> Result<SubmitReport> {
        let report = self.submitter.submit(self.driver, order).await?;
        self.capture_artifacts(order).await?;

        // Always advance, even after the last order, leaving the form ready
        self.driver.click(selectors::ORDER_ANOTHER).await?;
        Ok(report)
    }

    /// Capture receipt PDF and preview screenshot, then merge them
    async fn capture_artifacts(&self, order: &OrderRecord) -> Result<()> {
        let html = self
            .driver
            .inner_html(selectors::RECEIPT)
            .await
            .map_err(|e| CaptureError::ReceiptUnavailable(e.to_string()))?;
        let fragment = ReceiptFragment::new(html)?;
        match fragment.badge_id() {
            Some(badge) => debug!("Receipt badge for order {}: {}", order.order_number, badge),
            None => debug!("Receipt for order {} carries no badge", order.order_number),
        }

        let pdf_bytes = self.renderer.render_pdf(fragment.html()).await?;
        let receipt_path = self.layout.receipt_path(&order.order_number);
        tokio::fs::write(&receipt_path, &pdf_bytes).await?;

        let png = self
            .driver
            .capture_element(selectors::ROBOT_PREVIEW)
            .await
            .map_err(|e| CaptureError::PreviewUnavailable(e.to_string()))?;
        let screenshot_path = self.layout.screenshot_path(&order.order_number);
        tokio::fs::write(&screenshot_path, &png).await?;

        // One merge per order: the screenshot becomes the trailing page
        pdf::append_image_page(&receipt_path, &screenshot_path)?;

        info!(
            "Captured {} and {}",
            receipt_path.display(),
            screenshot_path.display()
        );
        Ok(())
    }
}
