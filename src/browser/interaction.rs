//! Form interaction primitives
//!
//! This module defines the capability surface the robot needs from an open
//! page (clicks, form input, element queries) and implements it for live
//! CDP pages. Workflow code depends on the [`PageDriver`] trait rather than
//! on chromiumoxide directly, so submission logic can be exercised against
//! scripted pages in tests.

use crate::browser::PageHandle;
use crate::error::{PageError, Result};
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use tracing::debug;

/// Page operations used by the order workflow
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Click the element matching `selector`
    async fn click(&self, selector: &str) -> Result<()>;

    /// Focus the element matching `selector` and type `text` into it
    async fn fill(&self, selector: &str, text: &str) -> Result<()>;

    /// Set the value of the `<select>` matching `selector` and fire its
    /// change events
    async fn select_option(&self, selector: &str, value: &str) -> Result<()>;

    /// Whether any element matches `selector`, visible or not
    async fn exists(&self, selector: &str) -> Result<bool>;

    /// Whether an element matches `selector` and is rendered with a
    /// non-empty box
    async fn is_visible(&self, selector: &str) -> Result<bool>;

    /// Inner HTML of the element matching `selector`
    async fn inner_html(&self, selector: &str) -> Result<String>;

    /// PNG screenshot of the element matching `selector`
    async fn capture_element(&self, selector: &str) -> Result<Vec<u8>>;
}

#[async_trait]
impl PageDriver for PageHandle {
    async fn click(&self, selector: &str) -> Result<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| PageError::ElementNotFound(selector.to_string()))?;

        element
            .click()
            .await
            .map_err(|e| PageError::InteractionFailed(format!("click {}: {}", selector, e)))?;

        debug!("Clicked: {}", selector);
        Ok(())
    }

    async fn fill(&self, selector: &str, text: &str) -> Result<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| PageError::ElementNotFound(selector.to_string()))?;

        element
            .click()
            .await
            .map_err(|e| PageError::InteractionFailed(format!("focus {}: {}", selector, e)))?;

        element
            .type_str(text)
            .await
            .map_err(|e| PageError::InteractionFailed(format!("type into {}: {}", selector, e)))?;

        debug!("Filled: {}", selector);
        Ok(())
    }

    async fn select_option(&self, selector: &str, value: &str) -> Result<()> {
        // Set the value through the native setter so framework listeners
        // (the order form is a React app) observe the change
        let script = format!(
            r#"
            (() => {{
                const el = document.querySelector('{}');
                if (!el) return false;
                const setter = Object.getOwnPropertyDescriptor(
                    window.HTMLSelectElement.prototype, 'value'
                ).set;
                setter.call(el, '{}');
                el.dispatchEvent(new Event('input', {{ bubbles: true }}));
                el.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return true;
            }})()
            "#,
            selector.replace('\'', "\\'"),
            value.replace('\'', "\\'")
        );

        let found: bool = self
            .page
            .evaluate(script.as_str())
            .await
            .map_err(|e| PageError::EvalFailed(e.to_string()))?
            .into_value()
            .map_err(|e| PageError::EvalFailed(e.to_string()))?;

        if !found {
            return Err(PageError::ElementNotFound(selector.to_string()).into());
        }

        debug!("Selected {:?} in {}", value, selector);
        Ok(())
    }

    async fn exists(&self, selector: &str) -> Result<bool> {
        let script = format!(
            "!!document.querySelector('{}')",
            selector.replace('\'', "\\'")
        );

        let present: bool = self
            .page
            .evaluate(script.as_str())
            .await
            .map_err(|e| PageError::EvalFailed(e.to_string()))?
            .into_value()
            .map_err(|e| PageError::EvalFailed(e.to_string()))?;

        Ok(present)
    }

    async fn is_visible(&self, selector: &str) -> Result<bool> {
        let script = format!(
            r#"
            (() => {{
                const el = document.querySelector('{}');
                if (!el) return false;
                const style = window.getComputedStyle(el);
                if (style.display === 'none' || style.visibility === 'hidden') return false;
                const rect = el.getBoundingClientRect();
                return rect.width > 0 && rect.height > 0;
            }})()
            "#,
            selector.replace('\'', "\\'")
        );

        let visible: bool = self
            .page
            .evaluate(script.as_str())
            .await
            .map_err(|e| PageError::EvalFailed(e.to_string()))?
            .into_value()
            .map_err(|e| PageError::EvalFailed(e.to_string()))?;

        Ok(visible)
    }

    async fn inner_html(&self, selector: &str) -> Result<String> {
        let script = format!(
            r#"
            (() => {{
                const el = document.querySelector('{}');
                return el ? el.innerHTML : null;
            }})()
            "#,
            selector.replace('\'', "\\'")
        );

        let html: Option<String> = self
            .page
            .evaluate(script.as_str())
            .await
            .map_err(|e| PageError::EvalFailed(e.to_string()))?
            .into_value()
            .map_err(|e| PageError::EvalFailed(e.to_string()))?;

        html.ok_or_else(|| PageError::ElementNotFound(selector.to_string()).into())
    }

    async fn capture_element(&self, selector: &str) -> Result<Vec<u8>> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| PageError::ElementNotFound(selector.to_string()))?;

        let data = element
            .screenshot(CaptureScreenshotFormat::Png)
            .await
            .map_err(|e| PageError::ScreenshotFailed(e.to_string()))?;

        debug!("Captured element screenshot: {} ({} bytes)", selector, data.len());
        Ok(data)
    }
}
