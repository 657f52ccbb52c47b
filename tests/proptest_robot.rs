//! Property-based tests for order validation, artifact naming, and the
//! submission retry loop.

mod common;

use common::FakePage;
use proptest::prelude::*;
use sparebin_orderbot::config::OutputLayout;
use sparebin_orderbot::error::{Error, SubmitError};
use sparebin_orderbot::orders::OrderRecord;
use sparebin_orderbot::robot::{selectors, FormSubmitter, SubmitOptions};
use std::path::Path;

// ============================================================================
// Strategies
// ============================================================================

/// Order numbers in the shape the feed actually uses
pub fn arb_order_number() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]{1,20}"
}

/// Part numbers offered by the order form
pub fn arb_part() -> impl Strategy<Value = String> {
    "[1-6]"
}

/// A complete order record
pub fn arb_order() -> impl Strategy<Value = OrderRecord> {
    (
        arb_order_number(),
        arb_part(),
        arb_part(),
        "[0-9]{2,4}",
        "[A-Za-z0-9 ]{1,40}",
    )
        .prop_map(|(order_number, head, body, legs, address)| OrderRecord {
            order_number,
            head,
            body,
            legs,
            address,
        })
}

fn submit_options(max_alert_retries: u32) -> SubmitOptions {
    SubmitOptions {
        max_alert_retries,
        outcome_timeout_ms: 500,
        poll_interval_ms: 1,
    }
}

// ============================================================================
// Order validation properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_feed_shaped_order_numbers_validate(order in arb_order()) {
        prop_assert!(order.validate().is_ok());
    }

    #[test]
    fn prop_order_numbers_with_separators_are_rejected(
        prefix in "[A-Za-z0-9]{0,8}",
        sep in "[/\\\\. ]",
        suffix in "[A-Za-z0-9]{0,8}",
    ) {
        let order = OrderRecord {
            order_number: format!("{prefix}{sep}{suffix}"),
            head: "1".to_string(),
            body: "1".to_string(),
            legs: "1".to_string(),
            address: "A".to_string(),
        };
        prop_assert!(order.validate().is_err());
    }
}

// ============================================================================
// Artifact naming properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_receipt_paths_embed_the_order_number(number in arb_order_number()) {
        let layout = OutputLayout::new(Path::new("out"));

        let receipt = layout.receipt_path(&number);
        prop_assert_eq!(
            receipt.file_name().unwrap().to_str().unwrap(),
            format!("order_{number}.pdf")
        );
        prop_assert!(receipt.starts_with(&layout.receipts_dir));

        let screenshot = layout.screenshot_path(&number);
        prop_assert_eq!(
            screenshot.file_name().unwrap().to_str().unwrap(),
            format!("order_{number}.png")
        );
        prop_assert!(screenshot.starts_with(&layout.screenshots_dir));
    }

    #[test]
    fn prop_body_selectors_are_id_selectors(part in arb_part()) {
        let selector = selectors::body_option(&part);
        prop_assert!(selector.starts_with('#'));
        prop_assert!(selector.ends_with(&part));
    }
}

// ============================================================================
// Submission retry properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// One resubmission per rejection banner, nothing more
    #[test]
    fn prop_retries_match_rejection_count(rejections in 0usize..8, order in arb_order()) {
        let (retries, clicks) = tokio_test::block_on(async {
            let page = FakePage::new().with_alert_script(&vec![true; rejections]);
            let submitter = FormSubmitter::new(submit_options(8));
            let report = submitter.submit(&page, &order).await.unwrap();
            (report.alert_retries, page.clicks_on(selectors::ORDER))
        });
        prop_assert_eq!(retries as usize, rejections);
        prop_assert_eq!(clicks, rejections + 1);
    }

    /// A form that never accepts stops exactly at the budget
    #[test]
    fn prop_budget_bounds_submit_attempts(budget in 0u32..5, order in arb_order()) {
        let (err, clicks) = tokio_test::block_on(async {
            let page = FakePage::new().with_alert_script(&[true; 8]);
            let submitter = FormSubmitter::new(submit_options(budget));
            let err = submitter.submit(&page, &order).await.unwrap_err();
            (err, page.clicks_on(selectors::ORDER))
        });
        match err {
            Error::Submit(SubmitError::RetryBudgetExhausted { attempts }) => {
                prop_assert_eq!(attempts, budget);
            }
            other => prop_assert!(false, "unexpected error: {}", other),
        }
        prop_assert_eq!(clicks, budget as usize + 1);
    }
}

// ============================================================================
// Edge cases
// ============================================================================

mod edge_cases {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_single_character_order_numbers_validate(number in "[A-Za-z0-9]") {
            let order = OrderRecord {
                order_number: number,
                head: "1".to_string(),
                body: "1".to_string(),
                legs: "1".to_string(),
                address: "A".to_string(),
            };
            prop_assert!(order.validate().is_ok());
        }

        #[test]
        fn prop_non_ascii_order_numbers_are_rejected(number in "[\\u{00C0}-\\u{00FF}]{1,4}") {
            let order = OrderRecord {
                order_number: number,
                head: "1".to_string(),
                body: "1".to_string(),
                legs: "1".to_string(),
                address: "A".to_string(),
            };
            prop_assert!(order.validate().is_err());
        }
    }
}

// ============================================================================
// Deterministic spot checks
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_order_number_is_invalid() {
        let order = OrderRecord {
            order_number: String::new(),
            head: "1".to_string(),
            body: "1".to_string(),
            legs: "1".to_string(),
            address: "A".to_string(),
        };
        assert!(order.validate().is_err());
    }

    #[test]
    fn test_body_option_formats_the_part_number() {
        assert_eq!(selectors::body_option("3"), "#id-body-3");
    }

    #[test]
    fn test_archive_sits_next_to_the_receipts_folder() {
        let layout = OutputLayout::new(Path::new("out"));
        assert_eq!(layout.archive_path, Path::new("out").join("receipts.zip"));
        assert_eq!(layout.receipts_dir, Path::new("out").join("receipts"));
    }
}
