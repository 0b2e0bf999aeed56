//! Demo pages, compiled into the server binary
//!
//! The route table is still built by scanning this directory; every scanned
//! file needs a matching entry in [`registry`].

mod about;
#[path = "blog/[slug].rs"]
mod blog_slug;
mod index;
#[path = "404.rs"]
mod not_found;
mod users;

use maud::{html, Markup};
use unnexted::{PageRegistry, Props};

/// Every page keyed by its path relative to the pages directory
pub fn registry() -> PageRegistry {
    PageRegistry::new()
        .with_page("index.rs", index::page())
        .with_page("about.rs", about::page())
        .with_page("blog/[slug].rs", blog_slug::page())
        .with_page("users.rs", users::page())
        .with_page("404.rs", not_found::page())
}

/// Links shared by the demo pages
fn nav() -> Markup {
    html! {
        nav {
            a href="/" { "Home" } " "
            a href="/about" { "About" } " "
            a href="/blog/hello-world" { "Blog Post" } " "
            a href="/users" { "Users (SSP)" }
        }
    }
}

/// String prop with a fallback
fn str_prop<'a>(props: &'a Props, key: &str, default: &'a str) -> &'a str {
    props.get(key).and_then(|v| v.as_str()).unwrap_or(default)
}
