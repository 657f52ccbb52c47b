//! Shared test doubles: a scripted order form page and a stub receipt
//! renderer producing real PDFs.

#![allow(dead_code)]

use async_trait::async_trait;
use lopdf::{dictionary, Document, Object, Stream};
use sparebin_orderbot::error::{PageError, Result};
use sparebin_orderbot::orders::OrderRecord;
use sparebin_orderbot::robot::selectors;
use sparebin_orderbot::{PageDriver, ReceiptRenderer};
use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

/// Receipt markup in the shape the confirmation page renders
pub const RECEIPT_HTML: &str = r#"
    <h3>Receipt</h3>
    <div>2023-11-04T09:11:32.183Z</div>
    <p class="badge badge-success">RSB-ROBO-ORDER-018b96f9e1</p>
    <p>Thank you for your order!</p>
"#;

/// Scripted stand-in for the order form page
///
/// `alert_script` holds the rejection banner's successive existence
/// answers; once the script runs out the banner reads as absent. The
/// receipt region exists whenever `receipt_present` is set, which models
/// the form right after a submission went through.
pub struct FakePage {
    alert_script: Mutex<VecDeque<bool>>,
    receipt_present: bool,
    modal_visible: bool,
    missing: HashSet<String>,
    receipt_html: String,
    screenshot_png: Vec<u8>,
    clicks: Mutex<Vec<String>>,
    fills: Mutex<Vec<(String, String)>>,
    selections: Mutex<Vec<(String, String)>>,
}

impl FakePage {
    /// A form that accepts every submission on the first try
    pub fn new() -> Self {
        Self {
            alert_script: Mutex::new(VecDeque::new()),
            receipt_present: true,
            modal_visible: true,
            missing: HashSet::new(),
            receipt_html: RECEIPT_HTML.to_string(),
            screenshot_png: png_bytes(8, 6),
            clicks: Mutex::new(Vec::new()),
            fills: Mutex::new(Vec::new()),
            selections: Mutex::new(Vec::new()),
        }
    }

    /// Script the rejection banner's next appearances
    pub fn with_alert_script(self, script: &[bool]) -> Self {
        *self.alert_script.lock().unwrap() = script.iter().copied().collect();
        self
    }

    /// Make interactions with `selector` fail as not-found
    pub fn with_missing(mut self, selector: &str) -> Self {
        self.missing.insert(selector.to_string());
        self
    }

    /// Load a fresh form with no consent modal showing
    pub fn with_modal_hidden(mut self) -> Self {
        self.modal_visible = false;
        self
    }

    /// Never show a receipt, as if the submission went nowhere
    pub fn without_receipt(mut self) -> Self {
        self.receipt_present = false;
        self
    }

    /// How many times `selector` was clicked
    pub fn clicks_on(&self, selector: &str) -> usize {
        self.clicks
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.as_str() == selector)
            .count()
    }

    /// All recorded (selector, text) fills
    pub fn fills(&self) -> Vec<(String, String)> {
        self.fills.lock().unwrap().clone()
    }

    /// All recorded (selector, value) select-option calls
    pub fn selections(&self) -> Vec<(String, String)> {
        self.selections.lock().unwrap().clone()
    }

    fn check_present(&self, selector: &str) -> Result<()> {
        if self.missing.contains(selector) {
            return Err(PageError::ElementNotFound(selector.to_string()).into());
        }
        Ok(())
    }
}

#[async_trait]
impl PageDriver for FakePage {
    async fn click(&self, selector: &str) -> Result<()> {
        self.check_present(selector)?;
        self.clicks.lock().unwrap().push(selector.to_string());
        Ok(())
    }

    async fn fill(&self, selector: &str, text: &str) -> Result<()> {
        self.check_present(selector)?;
        self.fills
            .lock()
            .unwrap()
            .push((selector.to_string(), text.to_string()));
        Ok(())
    }

    async fn select_option(&self, selector: &str, value: &str) -> Result<()> {
        self.check_present(selector)?;
        self.selections
            .lock()
            .unwrap()
            .push((selector.to_string(), value.to_string()));
        Ok(())
    }

    async fn exists(&self, selector: &str) -> Result<bool> {
        if selector == selectors::ALERT_DANGER {
            return Ok(self.alert_script.lock().unwrap().pop_front().unwrap_or(false));
        }
        if selector == selectors::RECEIPT {
            return Ok(self.receipt_present);
        }
        Ok(false)
    }

    async fn is_visible(&self, selector: &str) -> Result<bool> {
        if selector == selectors::MODAL_OK {
            return Ok(self.modal_visible);
        }
        Ok(true)
    }

    async fn inner_html(&self, selector: &str) -> Result<String> {
        self.check_present(selector)?;
        Ok(self.receipt_html.clone())
    }

    async fn capture_element(&self, selector: &str) -> Result<Vec<u8>> {
        self.check_present(selector)?;
        Ok(self.screenshot_png.clone())
    }
}

/// Stub renderer producing a real single-page PDF for any fragment
pub struct PdfStubRenderer;

#[async_trait]
impl ReceiptRenderer for PdfStubRenderer {
    async fn render_pdf(&self, _html: &str) -> Result<Vec<u8>> {
        Ok(single_page_pdf())
    }
}

/// Minimal valid one-page PDF
pub fn single_page_pdf() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// In-memory PNG fixture
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([64, 128, 255, 255]));
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

/// Order record fixture
pub fn order(order_number: &str, body: &str) -> OrderRecord {
    OrderRecord {
        order_number: order_number.to_string(),
        head: "2".to_string(),
        body: body.to_string(),
        legs: "380".to_string(),
        address: "Address A".to_string(),
    }
}
