// File: src/page.rs
// Purpose: The page module contract: a component plus an optional server-data hook

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use anyhow::{bail, Result};
use futures::future::{BoxFuture, FutureExt};
use maud::Markup;
use serde_json::Value;

use unnexted_router::{Params, Props};

/// Renders page markup from props
pub trait Component: Send + Sync {
    fn render(&self, props: &Props) -> Result<Markup>;
}

impl<F> Component for F
where
    F: Fn(&Props) -> Result<Markup> + Send + Sync,
{
    fn render(&self, props: &Props) -> Result<Markup> {
        self(props)
    }
}

/// Input handed to a server-data hook
#[derive(Debug, Clone, PartialEq)]
pub struct ServerPropsContext {
    pub params: Params,
    pub pathname: String,
}

/// Output of a server-data hook, merged over `{ params }`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerProps {
    pub props: Props,
}

impl ServerProps {
    pub fn new(props: Props) -> Self {
        Self { props }
    }

    /// Builds props from a JSON object; any other JSON value is rejected
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(props) => Ok(Self { props }),
            other => bail!("server props must be a JSON object, got {}", other),
        }
    }

    /// Adds one prop (functional builder pattern)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }
}

/// Asynchronous server-data hook
pub type DataHook =
    Arc<dyn Fn(ServerPropsContext) -> BoxFuture<'static, Result<ServerProps>> + Send + Sync>;

/// Whether a page loads server data, fixed when the page is registered
#[derive(Clone)]
pub enum PageKind {
    Static,
    ServerRendered(DataHook),
}

impl fmt::Debug for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageKind::Static => f.write_str("Static"),
            PageKind::ServerRendered(_) => f.write_str("ServerRendered(..)"),
        }
    }
}

/// A resolved page: what the renderer needs to produce a document
#[derive(Clone)]
pub struct PageModule {
    pub component: Arc<dyn Component>,
    pub kind: PageKind,
}

impl PageModule {
    /// A page rendered from its route params alone
    pub fn page(component: impl Component + 'static) -> Self {
        Self {
            component: Arc::new(component),
            kind: PageKind::Static,
        }
    }

    /// A page whose props are loaded by `hook` before every render
    ///
    /// ```
    /// use unnexted::{html, PageModule, ServerProps};
    ///
    /// let page = PageModule::with_server_props(
    ///     |props: &unnexted::Props| -> anyhow::Result<unnexted::Markup> {
    ///         Ok(html! { p { (props.len()) } })
    ///     },
    ///     |ctx: unnexted::ServerPropsContext| async move {
    ///         Ok::<_, anyhow::Error>(ServerProps::default().with("path", ctx.pathname))
    ///     },
    /// );
    /// assert!(page.has_server_props());
    /// ```
    pub fn with_server_props<F, Fut>(component: impl Component + 'static, hook: F) -> Self
    where
        F: Fn(ServerPropsContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ServerProps>> + Send + 'static,
    {
        let hook: DataHook = Arc::new(move |ctx| hook(ctx).boxed());

        Self {
            component: Arc::new(component),
            kind: PageKind::ServerRendered(hook),
        }
    }

    pub fn has_server_props(&self) -> bool {
        matches!(self.kind, PageKind::ServerRendered(_))
    }
}

impl fmt::Debug for PageModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageModule")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
