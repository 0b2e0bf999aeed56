//! Integration tests for unnexted-router
//!
//! Covers:
//! - Pattern derivation from page files
//! - Matcher/parameter alignment and round-tripping
//! - Lookup precedence (table order, static-first ranking)
//! - Scanning a pages directory (reserved files, tie-breaks, failures)

use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::PathBuf;
use unnexted_router::*;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn patterns(table: &RouteTable) -> Vec<String> {
    table.routes().iter().map(|r| r.pattern.clone()).collect()
}

// ============================================================================
// Compilation
// ============================================================================

#[rstest]
#[case("index.rs", "/", &[])]
#[case("about.rs", "/about", &[])]
#[case("docs/index.rs", "/docs/", &[])]
#[case("blog/[slug].rs", "/blog/[slug]", &["slug"])]
#[case("[org]/[repo]/issues/[number].rs", "/[org]/[repo]/issues/[number]", &["org", "repo", "number"])]
#[case("shop/item-[sku].rs", "/shop/item-[sku]", &["sku"])]
fn test_compile_pattern_and_params(
    #[case] file: &str,
    #[case] pattern: &str,
    #[case] params: &[&str],
) {
    let route = Route::compile(file, "").unwrap();
    assert_eq!(route.pattern, pattern);
    assert_eq!(route.param_names, params);
    assert_eq!(route.source_ref, file);
}

#[test]
fn test_compile_is_deterministic() {
    for file in ["index.rs", "blog/[slug].rs", "[a]/x/[b]/[c].rs", "docs/index.rs"] {
        let first = Route::compile(file, "pages").unwrap();
        let second = Route::compile(file, "pages").unwrap();
        assert_eq!(first.pattern, second.pattern);
        assert_eq!(first.param_names, second.param_names);
        assert_eq!(first.matcher().as_str(), second.matcher().as_str());
    }
}

#[test]
fn test_only_index_files_drop_index() {
    assert_eq!(Route::compile("index.rs", "").unwrap().pattern, "/");
    assert_eq!(Route::compile("a/index.rs", "").unwrap().pattern, "/a/");
    assert_eq!(Route::compile("a/b/index.rs", "").unwrap().pattern, "/a/b/");

    for file in ["index.rs", "a/index.rs", "a/b/index.rs", "indexes.rs", "a/reindex.rs"] {
        let route = Route::compile(file, "").unwrap();
        let last_segment = route.pattern.rsplit('/').next().unwrap_or_default();
        assert_ne!(last_segment, "index", "{file} kept its index segment");
    }
}

#[rstest]
#[case("blog/[slug.rs")]
#[case("blog/slug].rs")]
#[case("blog/[1st].rs")]
#[case("blog/[...rest].rs")]
#[case("blog/[[opt]].rs")]
#[case("blog/[my-slug].rs")]
fn test_compile_rejects_malformed_segments(#[case] file: &str) {
    assert!(Route::compile(file, "").is_err(), "{file} should be rejected");
}

// ============================================================================
// Matching
// ============================================================================

#[test]
fn test_param_count_matches_capture_groups() {
    for pattern in ["/", "/a", "/[a]", "/[a]/[b]", "/x-[a]-[b]/y/[c]"] {
        let route = Route::from_pattern(pattern, "page.rs").unwrap();
        let brackets = pattern.matches('[').count();
        assert_eq!(route.param_names.len(), brackets);
        assert_eq!(route.matcher().param_names().len(), brackets);
    }
}

#[test]
fn test_extracted_values_align_with_names() {
    let route = Route::from_pattern("/[org]/[repo]/issues/[number]", "p.rs").unwrap();
    let values = route.matcher().captures("/rust-lang/cargo/issues/42").unwrap();

    let paired: Vec<(&str, &str)> = route
        .param_names
        .iter()
        .map(String::as_str)
        .zip(values.iter().map(String::as_str))
        .collect();
    assert_eq!(paired, vec![("org", "rust-lang"), ("repo", "cargo"), ("number", "42")]);
}

#[rstest]
#[case("/blog/[slug]", "/blog/hello-world")]
#[case("/[org]/[repo]", "/tokio-rs/axum")]
#[case("/shop/item-[sku]", "/shop/item-A12")]
#[case("/docs/", "/docs/")]
#[case("/about", "/about")]
#[case("/blog/[slug]", "/blog/a%2Fb")]
#[case("/blog/[slug]", "/blog/two%20words")]
fn test_round_trip_reconstructs_path(#[case] pattern: &str, #[case] path: &str) {
    let route = Route::from_pattern(pattern, "p.rs").unwrap();
    let params = route.matches(path).unwrap();

    let rebuilt = route.to_path(&params).unwrap();
    assert_eq!(rebuilt, path);
    assert!(route.matches(&rebuilt).is_some());
}

#[test]
fn test_trailing_slash_is_optional() {
    let route = Route::from_pattern("/blog/[slug]", "p.rs").unwrap();
    let params = route.matches("/blog/hello/").unwrap();
    assert_eq!(params.get("slug"), Some(&"hello".to_string()));
}

// ============================================================================
// Precedence
// ============================================================================

#[test]
fn test_lookup_returns_first_of_two_matches() {
    let r1 = Route::from_pattern("/items/[id]", "items/[id].rs").unwrap();
    let r2 = Route::from_pattern("/items/[sku]", "items/by-sku.rs").unwrap();
    let table = RouteTable::from_routes(vec![r1, r2]);

    assert_eq!(table.lookup("/items/7").unwrap().route.source_ref, "items/[id].rs");
}

#[test]
fn test_static_segment_wins_with_ranking() {
    let table =
        RouteTable::from_files(["blog/[slug].rs", "blog/new.rs"], &TableOptions::default()).unwrap();

    let m = table.lookup("/blog/new").unwrap();
    assert_eq!(m.route.pattern, "/blog/new");
    assert!(m.params.is_empty());

    let m = table.lookup("/blog/other").unwrap();
    assert_eq!(m.route.pattern, "/blog/[slug]");
}

// ============================================================================
// Scanning
// ============================================================================

#[test]
fn test_build_scans_in_file_name_order() {
    let options = TableOptions {
        rank_static_first: false,
        ..TableOptions::default()
    };
    let table = RouteTable::build_with(fixture("pages"), &options).unwrap();

    // `[` sorts before letters, so the dynamic route shadows `new.rs`
    assert_eq!(
        patterns(&table),
        vec!["/about", "/blog/[slug]", "/blog/new", "/docs/", "/"]
    );
    assert_eq!(table.lookup("/blog/new").unwrap().route.pattern, "/blog/[slug]");
}

#[test]
fn test_build_ranks_static_first_by_default() {
    let table = RouteTable::build(fixture("pages")).unwrap();

    assert_eq!(
        patterns(&table),
        vec!["/about", "/blog/new", "/docs/", "/", "/blog/[slug]"]
    );
    assert_eq!(table.lookup("/blog/new").unwrap().route.pattern, "/blog/new");
}

#[test]
fn test_build_skips_reserved_and_foreign_files() {
    let table = RouteTable::build(fixture("pages")).unwrap();
    let sources: Vec<_> = table.routes().iter().map(|r| r.source_ref.as_str()).collect();

    assert!(!sources.iter().any(|s| s.contains('_')));
    assert!(!sources.contains(&"mod.rs"));
    assert!(!sources.contains(&"notes.txt"));
    assert_eq!(table.len(), 5);
}

#[test]
fn test_build_uses_relative_source_refs() {
    let table = RouteTable::build(fixture("pages")).unwrap();
    let descriptors = table.to_serializable();

    assert!(descriptors.contains(&RouteDescriptor {
        pattern: "/blog/[slug]".to_string(),
        source_ref: "blog/[slug].rs".to_string(),
    }));
}

#[test]
fn test_build_rejects_malformed_page() {
    let err = RouteTable::build(fixture("bad_pages")).unwrap_err();
    match err {
        RouteTableError::Compile { file, source } => {
            assert_eq!(file, "blog/[slug.rs");
            assert!(matches!(source, RouteCompileError::UnbalancedBracket { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_build_skips_excluded_pages() {
    let options = TableOptions {
        excluded: vec!["about.rs".to_string(), "blog/new.rs".to_string()],
        ..TableOptions::default()
    };
    let table = RouteTable::build_with(fixture("pages"), &options).unwrap();

    assert_eq!(patterns(&table), vec!["/docs/", "/", "/blog/[slug]"]);
    assert!(table.lookup("/about").is_none());
}

#[cfg(target_os = "linux")]
#[test]
fn test_build_skips_non_utf8_paths() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let root = std::env::temp_dir().join(format!("unnexted-router-{}", std::process::id()));
    let odd = root.join(OsStr::from_bytes(b"bl\xffog"));
    std::fs::create_dir_all(&odd).unwrap();
    std::fs::write(odd.join("post.rs"), "").unwrap();
    std::fs::write(root.join("about.rs"), "").unwrap();

    let table = RouteTable::build(&root);
    std::fs::remove_dir_all(&root).unwrap();

    let table = table.unwrap();
    assert_eq!(patterns(&table), vec!["/about"]);
    assert!(table.lookup("/post").is_none());
}

#[test]
fn test_build_missing_root_is_empty() {
    let table = RouteTable::build(fixture("does-not-exist")).unwrap();
    assert!(table.is_empty());
}

#[test]
fn test_scenario_blog_lookup() {
    let table = RouteTable::from_files(
        ["index.rs", "about.rs", "blog/[slug].rs"],
        &TableOptions::default(),
    )
    .unwrap();

    let m = table.lookup("/blog/hello-world").unwrap();
    assert_eq!(m.route.pattern, "/blog/[slug]");
    assert_eq!(m.params.get("slug").map(String::as_str), Some("hello-world"));
    assert_eq!(m.params.len(), 1);

    assert!(table.lookup("/nope").is_none());
}
