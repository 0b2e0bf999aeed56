//! Seams between the bootstrap and its environment

use async_trait::async_trait;

use crate::ModuleLoadError;
use unnexted_router::Props;

/// Loading state of the host document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

impl ReadyState {
    /// Maps `document.readyState`; unknown values count as complete
    pub fn parse(state: &str) -> Self {
        match state {
            "loading" => ReadyState::Loading,
            "interactive" => ReadyState::Interactive,
            _ => ReadyState::Complete,
        }
    }
}

/// The parts of the DOM the bootstrap reads and writes
pub trait HostDocument {
    fn ready_state(&self) -> ReadyState;

    /// Text content of the element with `id`, if present
    fn text_content(&self, id: &str) -> Option<String>;

    fn has_element(&self, id: &str) -> bool;

    /// Replace the container's children with an inline error element
    fn render_fallback(&self, container_id: &str, message: &str);
}

/// Loads page modules by `sourceRef`
#[async_trait(?Send)]
pub trait ClientModules {
    type Component;

    async fn resolve(&self, source_ref: &str) -> Result<Self::Component, ModuleLoadError>;
}

/// Attaches a component to existing server-rendered markup
pub trait Hydrator<C> {
    fn hydrate(&self, container_id: &str, component: &C, props: &Props);
}
