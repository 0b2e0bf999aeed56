//! Browser DOM binding

use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::host::{HostDocument, ReadyState};

/// [`HostDocument`] over the page's `window.document`
#[derive(Debug, Clone)]
pub struct BrowserDocument {
    document: Document,
}

impl BrowserDocument {
    /// The current window's document, if running in a browser context
    pub fn current() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }

    fn replace_children(&self, container_id: &str, message: &str) -> Result<(), JsValue> {
        let Some(container) = self.document.get_element_by_id(container_id) else {
            return Ok(());
        };

        let fallback = self.document.create_element("div")?;
        fallback.set_text_content(Some(message));

        container.set_text_content(None);
        container.append_child(&fallback)?;
        Ok(())
    }
}

impl HostDocument for BrowserDocument {
    fn ready_state(&self) -> ReadyState {
        ReadyState::parse(&self.document.ready_state())
    }

    fn text_content(&self, id: &str) -> Option<String> {
        self.document.get_element_by_id(id)?.text_content()
    }

    fn has_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn render_fallback(&self, container_id: &str, message: &str) {
        if let Err(err) = self.replace_children(container_id, message) {
            tracing::error!("[Client] Failed to render fallback: {:?}", err);
        }
    }
}
