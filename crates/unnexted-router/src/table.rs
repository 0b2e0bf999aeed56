//! The route table: compiled routes in lookup order
//!
//! Built once at startup and never mutated afterwards, so it can be shared
//! between concurrent requests behind an `Arc` without locking.

use std::path::Path;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::route::{is_reserved, Route, RouteMatch, DEFAULT_EXTENSION};
use crate::{RouteCompileError, RouteDescriptor, RouteTableError};

/// How a table is built from a pages directory
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// Page file extension without the dot
    pub extension: String,
    /// Stable-sort routes so static patterns precede dynamic ones
    pub rank_static_first: bool,
    /// Page files (relative to the root) rendered only on demand, such as
    /// the not-found page; a scan never routes them
    pub excluded: Vec<String>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            rank_static_first: true,
            excluded: Vec::new(),
        }
    }
}

/// Ordered, immutable collection of routes. Lookup is first-match-wins.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Scans `pages_root` with default options.
    pub fn build(pages_root: impl AsRef<Path>) -> Result<Self, RouteTableError> {
        Self::build_with(pages_root, &TableOptions::default())
    }

    /// Scans `pages_root` recursively and compiles every page file.
    ///
    /// Entries are visited sorted by file name, so the scan order is the
    /// same on every platform. Reserved, excluded and non-UTF-8 paths are
    /// skipped. A missing root yields an empty table.
    pub fn build_with(
        pages_root: impl AsRef<Path>,
        options: &TableOptions,
    ) -> Result<Self, RouteTableError> {
        let root = pages_root.as_ref();

        if !root.exists() {
            warn!("[Router] No pages directory found at {}", root.display());
            return Ok(Self::default());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|source| RouteTableError::Scan {
                root: root.to_path_buf(),
                source,
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            if relative.extension().and_then(|e| e.to_str()) != Some(options.extension.as_str()) {
                continue;
            }
            if is_reserved(relative, &options.extension) {
                continue;
            }

            let Some(relative) = source_ref(relative) else {
                warn!("[Router] Skipping non-UTF-8 page path {}", entry.path().display());
                continue;
            };
            if options.excluded.iter().any(|file| *file == relative) {
                debug!("[Router] Not routing excluded page {}", relative);
                continue;
            }
            files.push(relative);
        }

        let table = Self::from_files(files, options)?;
        table.log_routes();
        Ok(table)
    }

    /// Compiles a list of page files (relative to the pages root) in the
    /// given order, applying the ranking option.
    pub fn from_files<I, S>(files: I, options: &TableOptions) -> Result<Self, RouteTableError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut routes = files
            .into_iter()
            .map(|file| {
                let file = file.as_ref();
                Route::compile_with_extension(file, "", &options.extension).map_err(|source| {
                    RouteTableError::Compile {
                        file: file.to_string(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if options.rank_static_first {
            // Stable: ties keep scan order
            routes.sort_by_key(Route::rank);
        }

        Ok(Self { routes })
    }

    /// Wraps routes in exactly the order given
    pub fn from_routes(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Rebuilds a table from shipped descriptors, keeping their order.
    pub fn from_descriptors(descriptors: &[RouteDescriptor]) -> Result<Self, RouteCompileError> {
        let routes = descriptors
            .iter()
            .map(|d| Route::from_pattern(d.pattern.clone(), d.source_ref.clone()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { routes })
    }

    /// Finds the first route accepting `pathname`
    ///
    /// `None` means not found; the table never synthesizes a 404 route.
    pub fn lookup(&self, pathname: &str) -> Option<RouteMatch<'_>> {
        self.routes.iter().find_map(|route| {
            route
                .matches(pathname)
                .map(|params| RouteMatch { route, params })
        })
    }

    /// Pattern + source for every route, in table order
    pub fn to_serializable(&self) -> Vec<RouteDescriptor> {
        self.routes.iter().map(Route::descriptor).collect()
    }

    /// All routes in lookup order
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    fn log_routes(&self) {
        info!("[Router] Registered {} routes:", self.routes.len());
        for route in &self.routes {
            info!("  {:<30} -> {}", route.pattern, route.source_ref);
        }
    }
}

/// `/`-joined relative path, or `None` if any component is not UTF-8
fn source_ref(relative: &Path) -> Option<String> {
    relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()
        .map(|parts| parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(patterns: &[(&str, &str)]) -> RouteTable {
        RouteTable::from_routes(
            patterns
                .iter()
                .map(|(pattern, source)| Route::from_pattern(*pattern, *source).unwrap())
                .collect(),
        )
    }

    #[test]
    fn test_lookup_first_match_wins() {
        let table = table(&[("/blog/[slug]", "blog/[slug].rs"), ("/blog/new", "blog/new.rs")]);

        let m = table.lookup("/blog/new").unwrap();
        assert_eq!(m.route.source_ref, "blog/[slug].rs");
        assert_eq!(m.params.get("slug"), Some(&"new".to_string()));
    }

    #[test]
    fn test_lookup_none() {
        let table = table(&[("/", "index.rs")]);
        assert!(table.lookup("/missing").is_none());
    }

    #[test]
    fn test_from_files_ranks_static_first() {
        let table = RouteTable::from_files(
            ["blog/[slug].rs", "blog/new.rs", "[a]/[b].rs", "about.rs"],
            &TableOptions::default(),
        )
        .unwrap();

        let patterns: Vec<_> = table.routes().iter().map(|r| r.pattern.as_str()).collect();
        assert_eq!(patterns, vec!["/blog/new", "/about", "/blog/[slug]", "/[a]/[b]"]);
    }

    #[test]
    fn test_from_files_keeps_order_without_ranking() {
        let options = TableOptions {
            rank_static_first: false,
            ..TableOptions::default()
        };
        let table = RouteTable::from_files(["blog/[slug].rs", "blog/new.rs"], &options).unwrap();

        assert_eq!(table.lookup("/blog/new").unwrap().route.pattern, "/blog/[slug]");
    }

    #[test]
    fn test_from_files_reports_bad_file() {
        let err = RouteTable::from_files(["ok.rs", "blog/[slug.rs"], &TableOptions::default())
            .unwrap_err();
        assert!(matches!(err, RouteTableError::Compile { ref file, .. } if file == "blog/[slug.rs"));
    }

    #[test]
    fn test_descriptors_round_trip_order() {
        let table = table(&[("/", "index.rs"), ("/blog/[slug]", "blog/[slug].rs")]);
        let rebuilt = RouteTable::from_descriptors(&table.to_serializable()).unwrap();

        assert_eq!(rebuilt.to_serializable(), table.to_serializable());
        assert_eq!(
            rebuilt.lookup("/blog/x").unwrap().route.source_ref,
            table.lookup("/blog/x").unwrap().route.source_ref
        );
    }

    #[test]
    fn test_source_ref_joins_components() {
        assert_eq!(source_ref(Path::new("blog/[slug].rs")).as_deref(), Some("blog/[slug].rs"));
    }

    #[cfg(unix)]
    #[test]
    fn test_source_ref_rejects_non_utf8() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = Path::new(OsStr::from_bytes(b"bl\xffog"));
        assert_eq!(source_ref(&dir.join("post.rs")), None);
    }

    #[test]
    fn test_table_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RouteTable>();
    }
}
