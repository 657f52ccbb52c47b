//! Order robot workflow
//!
//! This module ties the browser layer to the RobotSpareBin order form:
//! per-order form submission with rejection retries, receipt and preview
//! capture, and the top-level run lifecycle.

pub mod processor;
pub mod runner;
pub mod selectors;
pub mod submitter;

pub use processor::{OrderFailure, OrderProcessor, RunSummary};
pub use runner::Robot;
pub use submitter::{FormSubmitter, SubmitOptions, SubmitReport};
