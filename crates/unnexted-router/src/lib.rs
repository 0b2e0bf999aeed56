//! # Unnexted Router
//!
//! File-system based routing shared by the server renderer and the client
//! hydration bootstrap:
//! - Static routes (`about.rs` → `/about`)
//! - Index routes (`index.rs` → `/`, `docs/index.rs` → `/docs/`)
//! - Dynamic segments (`blog/[slug].rs` → `/blog/[slug]`)
//!
//! Both sides compile matchers with the same rule ([`Matcher::from_pattern`]),
//! so a route table shipped to the browser as [`RouteDescriptor`]s resolves a
//! pathname to the same page module the server rendered.
//!
//! ## Example
//!
//! ```
//! use unnexted_router::{Route, RouteTable};
//!
//! let table = RouteTable::from_routes(vec![
//!     Route::compile("pages/about.rs", "pages").unwrap(),
//!     Route::compile("pages/blog/[slug].rs", "pages").unwrap(),
//! ]);
//!
//! let route_match = table.lookup("/blog/hello-world").unwrap();
//! assert_eq!(route_match.route.pattern, "/blog/[slug]");
//! assert_eq!(route_match.params.get("slug"), Some(&"hello-world".to_string()));
//! ```

mod error;
pub mod protocol;
pub mod route;
mod table;

pub use error::{RouteCompileError, RouteTableError};
pub use protocol::{PageData, Props, RouteDescriptor, DATA_SCRIPT_ID, ROUTES_SCRIPT_ID};
pub use route::matcher::Matcher;
pub use route::pattern::{pattern_from_file, tokenize, Token};
pub use route::{is_reserved, Params, Route, RouteMatch, DEFAULT_EXTENSION};
pub use table::{RouteTable, TableOptions};
