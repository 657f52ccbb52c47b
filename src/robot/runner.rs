//! Top-level robot lifecycle
//!
//! Owns the browser session for a run: launch, open the order form, process
//! every order, and close the browser whatever happened.

use crate::browser::{
    BrowserController, CdpReceiptPrinter, NavigationOptions, PageHandle, PageNavigator,
};
use crate::config::RobotConfig;
use crate::error::Result;
use crate::orders::OrdersSource;
use crate::robot::processor::{OrderProcessor, RunSummary};
use crate::robot::selectors;
use crate::robot::submitter::SubmitOptions;
use tracing::{info, instrument, warn};

/// The assembled robot: one browser, one form session, one receipt printer
pub struct Robot {
    config: RobotConfig,
    controller: BrowserController,
    order_page: PageHandle,
    printer: CdpReceiptPrinter,
}

impl Robot {
    /// Launch the browser, open the order form, and prepare output folders
    #[instrument(skip(config))]
    pub async fn initialize(config: RobotConfig) -> Result<Self> {
        config.validate()?;
        config.layout().prepare()?;

        let controller = BrowserController::with_config(config.browser.clone()).await?;

        let order_page = controller.new_page().await?;
        let nav = NavigationOptions {
            timeout_ms: config.browser.timeout_ms,
            ..Default::default()
        };
        PageNavigator::goto(&order_page, &config.order_form_url, Some(nav)).await?;
        PageNavigator::wait_for_selector(&order_page, selectors::HEAD, config.browser.timeout_ms)
            .await?;

        // The printer keeps its own page so printing never touches the form
        let printer_page = controller.new_page().await?;
        let printer = CdpReceiptPrinter::new(printer_page);

        info!("Robot ready on {}", config.order_form_url);
        Ok(Self {
            config,
            controller,
            order_page,
            printer,
        })
    }

    /// Download the orders feed, process every order, and archive receipts
    ///
    /// The browser is closed on the way out in both success and failure.
    #[instrument(skip(self))]
    pub async fn run(self) -> Result<RunSummary> {
        let Robot {
            config,
            controller,
            order_page,
            printer,
        } = self;

        let started = chrono::Local::now();
        info!("Run started at {}", started.format("%Y-%m-%d %H:%M:%S"));

        let outcome = Self::run_orders(&config, &order_page, &printer).await;

        if let Err(e) = controller.close().await {
            warn!("Browser close failed: {}", e);
        }

        let summary = outcome?;
        info!(
            "Run finished at {}: {}/{} orders submitted, {} rejection retries",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            summary.submitted,
            summary.total,
            summary.alert_retries
        );
        Ok(summary)
    }

    async fn run_orders(
        config: &RobotConfig,
        order_page: &PageHandle,
        printer: &CdpReceiptPrinter,
    ) -> Result<RunSummary> {
        let source = OrdersSource::new(
            config.orders_csv_url.clone(),
            config.orders_csv_path.clone(),
        );
        let orders = source.fetch().await?;
        if orders.is_empty() {
            warn!("Orders feed is empty; archiving an empty receipts folder");
        }

        let layout = config.layout();
        let options = SubmitOptions {
            max_alert_retries: config.max_submit_retries,
            ..Default::default()
        };
        let processor = OrderProcessor::new(
            order_page,
            printer,
            &layout,
            options,
            config.continue_on_error,
        );
        processor.run(&orders).await
    }
}
