//! Route module for file-based routing
//!
//! Contains the compiled [`Route`] and the pure helpers it is built from:
//! - [`pattern`]: page file path → canonical pattern, pattern → tokens
//! - [`matcher`]: pattern → anchored regex + positional extractor

pub mod matcher;
pub mod pattern;

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::Path;

use crate::{RouteCompileError, RouteDescriptor};
use matcher::Matcher;
use pattern::{pattern_from_file, tokenize, Token};

/// Page file extension used when none is configured
pub const DEFAULT_EXTENSION: &str = "rs";

/// Extracted parameters, keyed by dynamic segment name
pub type Params = BTreeMap<String, String>;

/// A compiled route: canonical pattern, the page module that implements it,
/// and the matcher derived from the pattern.
#[derive(Debug, Clone)]
pub struct Route {
    /// URL pattern like `/blog/[slug]`
    pub pattern: String,
    /// Page module identifier, the file path relative to the pages root
    pub source_ref: String,
    /// Dynamic segment names in left-to-right order
    pub param_names: Vec<String>,
    matcher: Matcher,
}

/// Result of resolving a pathname against a route table
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    /// The matched route
    pub route: &'a Route,
    /// One entry per `route.param_names` entry, values taken from the URL
    pub params: Params,
}

impl Route {
    /// Compiles a route from a page file using the default `.rs` extension.
    ///
    /// `file_path` may be given relative to `pages_root` or with the root as
    /// a prefix; the stored `source_ref` is always the relative form.
    ///
    /// # Examples
    ///
    /// ```
    /// use unnexted_router::Route;
    ///
    /// let route = Route::compile("pages/blog/[slug].rs", "pages").unwrap();
    /// assert_eq!(route.pattern, "/blog/[slug]");
    /// assert_eq!(route.source_ref, "blog/[slug].rs");
    /// assert_eq!(route.param_names, vec!["slug"]);
    /// ```
    pub fn compile(file_path: &str, pages_root: &str) -> Result<Self, RouteCompileError> {
        Self::compile_with_extension(file_path, pages_root, DEFAULT_EXTENSION)
    }

    /// Compiles a route from a page file with an explicit page extension
    pub fn compile_with_extension(
        file_path: &str,
        pages_root: &str,
        extension: &str,
    ) -> Result<Self, RouteCompileError> {
        let normalized = file_path.replace('\\', "/");
        let root = pages_root.replace('\\', "/");
        let root = root.trim_end_matches('/');

        let relative = if root.is_empty() {
            normalized.as_str()
        } else {
            normalized
                .strip_prefix(root)
                .filter(|rest| rest.starts_with('/'))
                .unwrap_or(normalized.as_str())
        };
        let relative = relative.trim_start_matches("./").trim_start_matches('/');

        let pattern = pattern_from_file(relative, extension)?;
        Self::from_pattern(pattern, relative)
    }

    /// Builds a route straight from a canonical pattern.
    ///
    /// Used when the pattern comes from somewhere other than a file scan,
    /// such as route descriptors shipped to the client.
    pub fn from_pattern(
        pattern: impl Into<String>,
        source_ref: impl Into<String>,
    ) -> Result<Self, RouteCompileError> {
        let pattern = pattern.into();
        let matcher = Matcher::from_pattern(&pattern)?;

        Ok(Self {
            param_names: matcher.param_names().to_vec(),
            pattern,
            source_ref: source_ref.into(),
            matcher,
        })
    }

    /// Matches this route against a pathname
    ///
    /// Returns the extracted parameters keyed by name, or `None`.
    pub fn matches(&self, pathname: &str) -> Option<Params> {
        let values = self.matcher.captures(pathname)?;

        Some(self.param_names.iter().cloned().zip(values).collect())
    }

    /// The compiled matcher
    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// True when the pattern has no dynamic segments
    pub fn is_static(&self) -> bool {
        self.param_names.is_empty()
    }

    /// Sort key for precedence: static routes first, then fewer dynamic
    /// segments. Lower ranks are tried first.
    pub fn rank(&self) -> usize {
        self.param_names.len()
    }

    /// Substitutes percent-encoded parameter values into the pattern
    ///
    /// Returns `None` if a parameter is missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use unnexted_router::{Params, Route};
    ///
    /// let route = Route::compile("blog/[slug].rs", "").unwrap();
    ///
    /// let mut params = Params::new();
    /// params.insert("slug".to_string(), "hello-world".to_string());
    ///
    /// assert_eq!(route.to_path(&params).unwrap(), "/blog/hello-world");
    /// ```
    pub fn to_path(&self, params: &Params) -> Option<String> {
        // The pattern was already validated when the route was built
        let tokens = tokenize(&self.pattern).ok()?;

        // Param values are stored decoded, so they are re-encoded here
        tokens
            .iter()
            .map(|token| match token {
                Token::Literal(text) => Some(Cow::Borrowed(text.as_str())),
                Token::Param(name) => params.get(name).map(|value| urlencoding::encode(value)),
            })
            .collect::<Option<Vec<Cow<'_, str>>>>()
            .map(|parts| parts.concat())
    }

    /// The serializable view of this route
    pub fn descriptor(&self) -> RouteDescriptor {
        RouteDescriptor {
            pattern: self.pattern.clone(),
            source_ref: self.source_ref.clone(),
        }
    }
}

/// Whether a page file is private to the framework and never routed.
///
/// Any path segment starting with `_` (`_app.rs`, `_document.rs`,
/// `blog/_draft.rs`, `_components/card.rs`) and `mod.<ext>` module glue.
///
/// # Examples
///
/// ```
/// use unnexted_router::is_reserved;
///
/// assert!(is_reserved("_app.rs", "rs"));
/// assert!(is_reserved("blog/_draft.rs", "rs"));
/// assert!(is_reserved("mod.rs", "rs"));
/// assert!(!is_reserved("about.rs", "rs"));
/// ```
pub fn is_reserved(relative_path: impl AsRef<Path>, extension: &str) -> bool {
    let path = relative_path.as_ref();
    let module_glue = format!("mod.{}", extension);

    let private_segment = path
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .any(|segment| segment.starts_with('_'));

    let is_glue = path
        .file_name()
        .and_then(|name| name.to_str())
        .map_or(false, |name| name == module_glue);

    private_segment || is_glue
}
