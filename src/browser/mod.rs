//! Browser automation module
//!
//! This module provides high-level browser control through ChromiumOxide,
//! including lifecycle management, navigation, form interaction, and
//! receipt rendering.

pub mod capture;
pub mod controller;
pub mod interaction;
pub mod navigation;

pub use capture::{CdpReceiptPrinter, ReceiptRenderer};
pub use controller::{BrowserConfig, BrowserController, PageHandle};
pub use interaction::PageDriver;
pub use navigation::{NavigationOptions, NavigationResult, PageNavigator, WaitUntil};
