use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, error, info, warn};

use crate::error::{DecodeError, ModuleLoadError};
use crate::host::{ClientModules, HostDocument, Hydrator, ReadyState};
use crate::FALLBACK_MESSAGE;
use unnexted_router::protocol::decode_embedded;
use unnexted_router::{
    PageData, RouteDescriptor, RouteTable, DATA_SCRIPT_ID, DEFAULT_EXTENSION, ROUTES_SCRIPT_ID,
};

/// Document-level settings shared with the server
#[derive(Debug, Clone)]
pub struct BootstrapOptions {
    /// Id of the server-rendered container
    pub root_id: String,
    /// Page file extension used by the default pathname mapping
    pub page_extension: String,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            root_id: "root".to_string(),
            page_extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

/// What a bootstrap attempt did
#[derive(Debug)]
pub enum HydrationOutcome {
    /// The page module was attached to the server markup
    Hydrated { source_ref: String },
    /// The module failed to load; an inline error element replaced the page
    Fallback { source_ref: String, error: ModuleLoadError },
    /// Page data was missing or malformed; the static markup is left as is
    Aborted(DecodeError),
    /// The container element is not in the document
    MissingContainer,
    /// Hydration already ran (or is running) for this page load
    AlreadyStarted,
    /// The document is still loading; call [`Bootstrap::on_load`] once it is ready
    Deferred,
}

/// Module a pathname maps to when no route descriptor claims it
///
/// ```
/// use unnexted_client::default_source_ref;
///
/// assert_eq!(default_source_ref("/", "rs"), "index.rs");
/// assert_eq!(default_source_ref("/about", "rs"), "about.rs");
/// ```
pub fn default_source_ref(pathname: &str, extension: &str) -> String {
    let stem = match pathname.trim_start_matches('/') {
        "" => "index",
        stem => stem,
    };
    format!("{}.{}", stem, extension)
}

/// One-shot hydration entry point for a page load
pub struct Bootstrap<D, M, H> {
    document: D,
    modules: M,
    hydrator: H,
    options: BootstrapOptions,
    started: AtomicBool,
}

impl<D, M, H> Bootstrap<D, M, H>
where
    D: HostDocument,
    M: ClientModules,
    H: Hydrator<M::Component>,
{
    pub fn new(document: D, modules: M, hydrator: H) -> Self {
        Self {
            document,
            modules,
            hydrator,
            options: BootstrapOptions::default(),
            started: AtomicBool::new(false),
        }
    }

    pub fn with_options(mut self, options: BootstrapOptions) -> Self {
        self.options = options;
        self
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    /// Hydrate now if the document is ready, otherwise report `Deferred`
    pub async fn start(&self) -> HydrationOutcome {
        if self.document.ready_state() == ReadyState::Loading {
            debug!("[Client] Document still loading, deferring hydration");
            return HydrationOutcome::Deferred;
        }
        self.run().await
    }

    /// Load-event entry point
    pub async fn on_load(&self) -> HydrationOutcome {
        self.run().await
    }

    /// Hydrate unless a previous call already did
    pub async fn run(&self) -> HydrationOutcome {
        if self.started.swap(true, Ordering::SeqCst) {
            return HydrationOutcome::AlreadyStarted;
        }
        self.hydrate().await
    }

    async fn hydrate(&self) -> HydrationOutcome {
        info!("[Client] Starting hydration...");

        let data = match self.page_data() {
            Ok(data) => data,
            Err(err) => {
                error!("[Client] No server data available, cannot hydrate: {}", err);
                return HydrationOutcome::Aborted(err);
            }
        };

        let source_ref = self.owning_source_ref(&data.pathname);
        debug!("[Client] Hydrating {} with {}", data.pathname, source_ref);

        let component = self.modules.resolve(&source_ref).await;

        let root_id = self.options.root_id.as_str();
        if !self.document.has_element(root_id) {
            error!("[Client] Root element '{}' not found", root_id);
            return HydrationOutcome::MissingContainer;
        }

        match component {
            Ok(component) => {
                self.hydrator.hydrate(root_id, &component, &data.props);
                info!("[Client] Hydration complete!");
                HydrationOutcome::Hydrated { source_ref }
            }
            Err(err) => {
                error!("[Client] {}", err);
                self.document.render_fallback(root_id, FALLBACK_MESSAGE);
                HydrationOutcome::Fallback { source_ref, error: err }
            }
        }
    }

    fn page_data(&self) -> Result<PageData, DecodeError> {
        let text = self
            .document
            .text_content(DATA_SCRIPT_ID)
            .ok_or_else(|| DecodeError::Missing(DATA_SCRIPT_ID.to_string()))?;

        Ok(decode_embedded(&text)?)
    }

    /// First descriptor matching `pathname`, else the default mapping.
    /// A missing or malformed route block only costs the lookup.
    fn owning_source_ref(&self, pathname: &str) -> String {
        let fallback = || default_source_ref(pathname, &self.options.page_extension);

        let Some(text) = self.document.text_content(ROUTES_SCRIPT_ID) else {
            return fallback();
        };

        let descriptors: Vec<RouteDescriptor> = match decode_embedded(&text) {
            Ok(descriptors) => descriptors,
            Err(err) => {
                warn!("[Client] Failed to parse routes: {}", err);
                return fallback();
            }
        };

        let table = match RouteTable::from_descriptors(&descriptors) {
            Ok(table) => table,
            Err(err) => {
                warn!("[Client] Failed to compile routes: {}", err);
                return fallback();
            }
        };

        table
            .lookup(pathname)
            .map(|m| m.route.source_ref.clone())
            .unwrap_or_else(fallback)
    }
}
