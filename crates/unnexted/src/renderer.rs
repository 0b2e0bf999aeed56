// File: src/renderer.rs
// Purpose: Render a pathname into a complete HTML document with hydration data

use std::sync::Arc;

use maud::{html, Markup};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::document::{resolve_title, DocumentShell};
use crate::page::{PageKind, PageModule, ServerPropsContext};
use crate::registry::{ModuleResolutionError, ModuleResolver};
use unnexted_router::protocol::encode_embedded;
use unnexted_router::{PageData, Params, Props, Route, RouteMatch, RouteTable};

const NOT_FOUND_TITLE: &str = "404 - Not Found";
const ERROR_TITLE: &str = "Error";

/// Result of a rendering operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub html: String,
    pub status: u16,
}

/// A matched route could not be rendered; always answered with a 500 document
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    ModuleResolution(#[from] ModuleResolutionError),

    #[error("server data hook failed: {0:#}")]
    ServerData(anyhow::Error),

    #[error("page render failed: {0:#}")]
    Render(anyhow::Error),
}

impl RenderError {
    /// Heading shown to the visitor; the underlying error is only logged
    pub fn public_message(&self) -> &'static str {
        match self {
            RenderError::ModuleResolution(_) => "Failed to load page",
            RenderError::ServerData(_) => "Error loading data",
            RenderError::Render(_) => "Failed to render page",
        }
    }
}

/// Server-side renderer over an immutable route table
///
/// Holds no per-request state: every call builds its props from scratch, so
/// one renderer serves any number of concurrent requests.
pub struct SsrRenderer {
    routes: Arc<RouteTable>,
    resolver: Arc<dyn ModuleResolver>,
    shell: DocumentShell,
    not_found_page: Option<String>,
    routes_json: String,
}

impl SsrRenderer {
    pub fn new(routes: Arc<RouteTable>, resolver: Arc<dyn ModuleResolver>) -> Self {
        let routes_json = encode_embedded(&routes.to_serializable()).unwrap_or_else(|err| {
            error!("[Server] Failed to encode route descriptors: {}", err);
            "[]".to_string()
        });

        Self {
            routes,
            resolver,
            shell: DocumentShell::default(),
            not_found_page: None,
            routes_json,
        }
    }

    /// Use a custom document shell (functional builder pattern)
    pub fn with_shell(mut self, shell: DocumentShell) -> Self {
        self.shell = shell;
        self
    }

    /// Page module rendered for unmatched paths, by `sourceRef`
    pub fn with_not_found_page(mut self, source_ref: Option<impl Into<String>>) -> Self {
        self.not_found_page = source_ref.map(Into::into);
        self
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn shell(&self) -> &DocumentShell {
        &self.shell
    }

    /// Render `pathname` to a full document and status code
    ///
    /// Never fails: unmatched paths produce a 404 document and every failure
    /// after a match produces a 500 document. Neither embeds page data.
    pub async fn render_page(&self, pathname: &str) -> RenderedPage {
        debug!("[Server] Rendering: {}", pathname);

        let Some(RouteMatch { route, params }) = self.routes.lookup(pathname) else {
            debug!("[Server] No route matched: {}", pathname);
            return self.render_not_found(pathname).await;
        };

        debug!("[Server] Matched route: {} -> {}", route.pattern, route.source_ref);

        match self.render_route(route, params, pathname).await {
            Ok(page) => page,
            Err(err) => {
                error!("[Server] {} ({}): {}", pathname, route.source_ref, err);
                self.render_error(&err)
            }
        }
    }

    async fn render_route(
        &self,
        route: &Route,
        params: Params,
        pathname: &str,
    ) -> Result<RenderedPage, RenderError> {
        let module = self.resolver.resolve(&route.source_ref).await?;
        let props = load_props(&module, params, pathname).await?;

        let body = module.component.render(&props).map_err(RenderError::Render)?;
        let title = resolve_title(&props, &self.shell.default_title).to_string();

        let data = PageData::new(pathname, props);
        Ok(self.document(200, &title, body, Some(&data)))
    }

    async fn render_not_found(&self, pathname: &str) -> RenderedPage {
        let mut props = Props::new();
        props.insert("pathname".to_string(), Value::String(pathname.to_string()));

        let body = match self.not_found_body(&props).await {
            Some(body) => body,
            None => html! { div { h1 { "404 - Page Not Found" } } },
        };

        self.document(404, NOT_FOUND_TITLE, body, None)
    }

    async fn not_found_body(&self, props: &Props) -> Option<Markup> {
        let source_ref = self.not_found_page.as_deref()?;

        let module = match self.resolver.resolve(source_ref).await {
            Ok(module) => module,
            Err(err) => {
                warn!("[Server] Not-found page unavailable, using fallback: {}", err);
                return None;
            }
        };

        match module.component.render(props) {
            Ok(body) => Some(body),
            Err(err) => {
                error!("[Server] Not-found page failed to render: {:#}", err);
                None
            }
        }
    }

    fn render_error(&self, err: &RenderError) -> RenderedPage {
        let body = html! { div { h1 { (err.public_message()) } } };
        self.document(500, ERROR_TITLE, body, None)
    }

    /// Error documents pass no page data: no page module produced their
    /// markup, so there is nothing for the client to hydrate.
    fn document(
        &self,
        status: u16,
        title: &str,
        body: Markup,
        data: Option<&PageData>,
    ) -> RenderedPage {
        let data_json = data.map(|data| {
            encode_embedded(data).unwrap_or_else(|err| {
                error!("[Server] Failed to encode page data for {}: {}", data.pathname, err);
                "null".to_string()
            })
        });

        RenderedPage {
            html: self.shell.render(title, body, data_json.as_deref(), &self.routes_json),
            status,
        }
    }
}

/// `{ params }` merged with the hook output; hook keys win on collision
async fn load_props(
    module: &PageModule,
    params: Params,
    pathname: &str,
) -> Result<Props, RenderError> {
    let mut props = Props::new();
    props.insert("params".to_string(), params_value(&params));

    if let PageKind::ServerRendered(hook) = &module.kind {
        debug!("[Server] Calling server data hook for {}", pathname);

        let ctx = ServerPropsContext {
            params,
            pathname: pathname.to_string(),
        };
        let loaded = hook(ctx).await.map_err(RenderError::ServerData)?;
        props.extend(loaded.props);
    }

    Ok(props)
}

fn params_value(params: &Params) -> Value {
    Value::Object(
        params
            .iter()
            .map(|(name, value)| (name.clone(), Value::String(value.clone())))
            .collect(),
    )
}
