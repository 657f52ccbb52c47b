//! Order form submission
//!
//! Drives one order through the form: dismiss the consent modal, fill the
//! part fields, submit, and re-click submit while the server rejects, up to
//! a bounded retry budget.

use crate::browser::PageDriver;
use crate::error::{Result, SubmitError};
use crate::orders::OrderRecord;
use crate::robot::selectors;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Tuning knobs for form submission
#[derive(Debug, Clone)]
pub struct SubmitOptions {
    /// How many times a rejected submission is re-tried (default: 10)
    pub max_alert_retries: u32,
    /// How long to wait for a receipt or rejection after submitting
    /// (default: 10000ms)
    pub outcome_timeout_ms: u64,
    /// Poll interval while waiting for an outcome (default: 100ms)
    pub poll_interval_ms: u64,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        Self {
            max_alert_retries: 10,
            outcome_timeout_ms: 10_000,
            poll_interval_ms: 100,
        }
    }
}

/// What the robot observed while submitting one order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReport {
    /// Rejected submissions re-tried before the receipt appeared
    pub alert_retries: u32,
}

/// What the page showed after a submit click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubmitOutcome {
    Receipt,
    Rejected,
}

/// Submits a single order through the form
pub struct FormSubmitter {
    options: SubmitOptions,
}

impl FormSubmitter {
    /// Create a submitter with the given options
    pub fn new(options: SubmitOptions) -> Self {
        Self { options }
    }

    /// Submit one order and wait for its receipt
    #[instrument(skip(self, driver, order), fields(order = %order.order_number))]
    pub async fn submit(
        &self,
        driver: &dyn PageDriver,
        order: &OrderRecord,
    ) -> Result<SubmitReport> {
        self.dismiss_modal(driver).await?;
        self.fill_form(driver, order).await?;

        driver.click(selectors::PREVIEW).await?;
        driver.click(selectors::ORDER).await?;

        let alert_retries = self.resolve_submission(driver).await?;
        info!(
            "Order {} accepted after {} retries",
            order.order_number, alert_retries
        );
        Ok(SubmitReport { alert_retries })
    }

    /// Close the consent modal if it is showing
    async fn dismiss_modal(&self, driver: &dyn PageDriver) -> Result<()> {
        if driver.is_visible(selectors::MODAL_OK).await? {
            driver.click(selectors::MODAL_OK).await?;
            debug!("Dismissed consent modal");
        } else {
            debug!("No consent modal present");
        }
        Ok(())
    }

    /// Fill the part fields and shipping address for an order
    async fn fill_form(&self, driver: &dyn PageDriver, order: &OrderRecord) -> Result<()> {
        driver.select_option(selectors::HEAD, &order.head).await?;
        driver.click(&selectors::body_option(&order.body)).await?;
        driver.fill(selectors::LEGS, &order.legs).await?;
        driver.fill(selectors::ADDRESS, &order.address).await?;
        Ok(())
    }

    /// Re-click submit while the server rejects, up to the retry budget
    async fn resolve_submission(&self, driver: &dyn PageDriver) -> Result<u32> {
        let mut retries = 0u32;
        loop {
            match self.wait_for_outcome(driver).await? {
                SubmitOutcome::Receipt => return Ok(retries),
                SubmitOutcome::Rejected => {
                    if retries >= self.options.max_alert_retries {
                        return Err(SubmitError::RetryBudgetExhausted { attempts: retries }.into());
                    }
                    retries += 1;
                    warn!(
                        "Submission rejected, retry {}/{}",
                        retries, self.options.max_alert_retries
                    );
                    driver.click(selectors::ORDER).await?;
                }
            }
        }
    }

    /// Poll until the page shows either a receipt or a rejection banner
    ///
    /// The rejection banner wins when both checks would match; a stale
    /// banner means the submission has not gone through yet.
    async fn wait_for_outcome(&self, driver: &dyn PageDriver) -> Result<SubmitOutcome> {
        let deadline = Instant::now() + Duration::from_millis(self.options.outcome_timeout_ms);
        loop {
            if driver.exists(selectors::ALERT_DANGER).await? {
                return Ok(SubmitOutcome::Rejected);
            }
            if driver.exists(selectors::RECEIPT).await? {
                return Ok(SubmitOutcome::Receipt);
            }
            if Instant::now() >= deadline {
                return Err(SubmitError::NoOutcome {
                    waited_ms: self.options.outcome_timeout_ms,
                }
                .into());
            }
            tokio::time::sleep(Duration::from_millis(self.options.poll_interval_ms)).await;
        }
    }
}
