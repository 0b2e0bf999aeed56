// File: src/document.rs
// Purpose: Assemble the full HTML document around rendered page markup

use maud::{html, Markup, PreEscaped, DOCTYPE};
use serde_json::Value;

use unnexted_router::{Props, DATA_SCRIPT_ID, ROUTES_SCRIPT_ID};

/// The fixed document frame every page is rendered into
#[derive(Debug, Clone)]
pub struct DocumentShell {
    pub default_title: String,
    /// Id of the container the page markup is placed in
    pub root_id: String,
    pub lang: String,
    /// URL of the hydration bootstrap script
    pub script_path: String,
}

impl Default for DocumentShell {
    fn default() -> Self {
        Self {
            default_title: "Unnexted App".to_string(),
            root_id: "root".to_string(),
            lang: "en".to_string(),
            script_path: "/client.js".to_string(),
        }
    }
}

impl DocumentShell {
    /// Wrap page markup with the embedded data blocks and the script tag
    ///
    /// `data_json` and `routes_json` must already be encoded for embedding
    /// (see [`unnexted_router::protocol::encode_embedded`]). Without
    /// `data_json` the page data block is left out and the client keeps the
    /// static markup.
    pub fn render(
        &self,
        title: &str,
        body: Markup,
        data_json: Option<&str>,
        routes_json: &str,
    ) -> String {
        html! {
            (DOCTYPE)
            html lang=(self.lang) {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (title) }
                }
                body {
                    div id=(self.root_id) { (body) }
                    @if let Some(data_json) = data_json {
                        script id=(DATA_SCRIPT_ID) type="application/json" { (PreEscaped(data_json)) }
                    }
                    script id=(ROUTES_SCRIPT_ID) type="application/json" { (PreEscaped(routes_json)) }
                    script src=(self.script_path) {}
                }
            }
        }
        .into_string()
    }
}

/// Picks the document title from props
///
/// A non-empty string `title`, else `metadata.title`, else `default`.
pub fn resolve_title<'a>(props: &'a Props, default: &'a str) -> &'a str {
    fn non_empty(value: Option<&Value>) -> Option<&str> {
        value.and_then(Value::as_str).filter(|s| !s.is_empty())
    }

    non_empty(props.get("title"))
        .or_else(|| non_empty(props.get("metadata").and_then(|m| m.get("title"))))
        .unwrap_or(default)
}
