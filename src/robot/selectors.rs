//! Order form selectors
//!
//! Stable element selectors on the RobotSpareBin order page. Kept in one
//! place so a site markup change is a one-file fix.

/// OK button of the consent modal shown when a fresh form loads
pub const MODAL_OK: &str = "div.modal button.btn-dark";

/// Head part dropdown
pub const HEAD: &str = "#head";

/// Legs part number input (the field has no id)
pub const LEGS: &str = r#"input[placeholder="Enter the part number for the legs"]"#;

/// Shipping address field
pub const ADDRESS: &str = "#address";

/// Preview button, renders the robot image
pub const PREVIEW: &str = "#preview";

/// Order submit button
pub const ORDER: &str = "#order";

/// Server rejection banner
pub const ALERT_DANGER: &str = ".alert.alert-danger";

/// Receipt region on the confirmation view
pub const RECEIPT: &str = "#receipt";

/// Rendered robot preview image
pub const ROBOT_PREVIEW: &str = "#robot-preview-image";

/// Button that starts the next order
pub const ORDER_ANOTHER: &str = "#order-another";

/// Radio option selector for a body part number
pub fn body_option(body: &str) -> String {
    format!("#id-body-{}", body)
}
