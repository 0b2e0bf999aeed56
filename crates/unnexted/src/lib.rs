// Unnexted - file-system routing + server-side rendering with hydration data
// Pages are registered once at startup; every request renders from a clean props computation

pub mod config;
pub mod document;
pub mod page;
pub mod registry;
pub mod renderer;

// Re-export Maud for page components
pub use maud::{html, Markup, PreEscaped, DOCTYPE};

// Re-export framework types
pub use config::{Config, Mode};
pub use document::{resolve_title, DocumentShell};
pub use page::{Component, DataHook, PageKind, PageModule, ServerProps, ServerPropsContext};
pub use registry::{ModuleResolutionError, ModuleResolver, PageRegistry};
pub use renderer::{RenderError, RenderedPage, SsrRenderer};

// Re-export routing and the embedded page protocol
pub use unnexted_router as router;
pub use unnexted_router::{PageData, Params, Props, RouteDescriptor, RouteTable, TableOptions};
