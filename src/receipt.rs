//! Receipt fragment handling
//!
//! The order confirmation page carries the receipt as an HTML region. This
//! module validates the captured fragment and pulls out the order badge id
//! the site stamps on it.

use crate::error::{CaptureError, Result};
use scraper::{Html, Selector};

/// Captured receipt markup for one order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptFragment {
    html: String,
}

impl ReceiptFragment {
    /// Wrap captured receipt HTML
    ///
    /// An empty or whitespace-only fragment means the confirmation never
    /// rendered, so it is rejected here rather than producing a blank PDF.
    pub fn new<S: Into<String>>(html: S) -> Result<Self> {
        let html = html.into();
        if html.trim().is_empty() {
            return Err(CaptureError::EmptyReceipt.into());
        }
        Ok(Self { html })
    }

    /// The raw receipt markup
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Order badge id stamped on the receipt, if present
    pub fn badge_id(&self) -> Option<String> {
        let fragment = Html::parse_fragment(&self.html);
        let selector = Selector::parse(".badge-success").ok()?;
        let badge = fragment.select(&selector).next()?;

        let text = badge.text().collect::<String>().trim().to_string();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECEIPT: &str = r#"
        <h3>Receipt</h3>
        <div>2023-11-04T09:11:32.183Z</div>
        <p class="badge badge-success">RSB-ROBO-ORDER-018b96f9e1</p>
        <p>Thank you for your order!</p>
        <div id="parts" class="alert alert-light">
            <div>Head: 2</div>
            <div>Body: 1</div>
            <div>Legs: 380</div>
        </div>
    "#;

    #[test]
    fn test_badge_id() {
        let fragment = ReceiptFragment::new(RECEIPT).unwrap();
        assert_eq!(
            fragment.badge_id(),
            Some("RSB-ROBO-ORDER-018b96f9e1".to_string())
        );
    }

    #[test]
    fn test_badge_id_absent() {
        let fragment = ReceiptFragment::new("<h3>Receipt</h3>").unwrap();
        assert_eq!(fragment.badge_id(), None);
    }

    #[test]
    fn test_html_preserved() {
        let fragment = ReceiptFragment::new("<p>ok</p>").unwrap();
        assert_eq!(fragment.html(), "<p>ok</p>");
    }

    #[test]
    fn test_empty_fragment_rejected() {
        assert!(ReceiptFragment::new("").is_err());
        assert!(ReceiptFragment::new("   \n\t ").is_err());
    }
}
