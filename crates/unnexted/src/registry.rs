// File: src/registry.rs
// Purpose: Resolve a route's sourceRef to its page module

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::page::PageModule;
use unnexted_router::RouteTable;

/// A page module could not be produced for a route
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModuleResolutionError {
    #[error("no page module registered for '{0}'")]
    NotRegistered(String),
}

/// Turns a `sourceRef` into a page module
///
/// The renderer's only injected capability; [`PageRegistry`] is the
/// production implementation.
#[async_trait]
pub trait ModuleResolver: Send + Sync {
    async fn resolve(&self, source_ref: &str) -> Result<PageModule, ModuleResolutionError>;
}

/// Page modules keyed by `sourceRef`, built once at startup
#[derive(Clone, Default)]
pub struct PageRegistry {
    pages: HashMap<String, PageModule>,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page (functional builder pattern)
    pub fn with_page(mut self, source_ref: impl Into<String>, page: PageModule) -> Self {
        self.pages.insert(source_ref.into(), page);
        self
    }

    pub fn register(&mut self, source_ref: impl Into<String>, page: PageModule) {
        self.pages.insert(source_ref.into(), page);
    }

    pub fn get(&self, source_ref: &str) -> Option<&PageModule> {
        self.pages.get(source_ref)
    }

    pub fn contains(&self, source_ref: &str) -> bool {
        self.pages.contains_key(source_ref)
    }

    /// Registered source refs, sorted
    pub fn source_refs(&self) -> Vec<&str> {
        let mut refs: Vec<&str> = self.pages.keys().map(String::as_str).collect();
        refs.sort_unstable();
        refs
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Routes in `table` with no registered module
    ///
    /// Those routes still match at request time and answer 500, so a
    /// non-empty result is logged as a warning.
    pub fn verify(&self, table: &RouteTable) -> Vec<String> {
        let missing: Vec<String> = table
            .routes()
            .iter()
            .filter(|route| !self.contains(&route.source_ref))
            .map(|route| route.source_ref.clone())
            .collect();

        for source_ref in &missing {
            warn!("[Pages] Route file has no registered page module: {}", source_ref);
        }

        missing
    }
}

impl std::fmt::Debug for PageRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageRegistry")
            .field("pages", &self.source_refs())
            .finish()
    }
}

#[async_trait]
impl ModuleResolver for PageRegistry {
    async fn resolve(&self, source_ref: &str) -> Result<PageModule, ModuleResolutionError> {
        self.pages
            .get(source_ref)
            .cloned()
            .ok_or_else(|| ModuleResolutionError::NotRegistered(source_ref.to_string()))
    }
}
