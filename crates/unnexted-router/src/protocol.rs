//! Embedded page protocol
//!
//! The server writes two JSON blocks into every document and the client reads
//! them back. Both sides go through these types so the encoding stays
//! byte-for-byte identical.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

/// Element id of the page data block
pub const DATA_SCRIPT_ID: &str = "__UNNEXTED_DATA__";

/// Element id of the route descriptor block
pub const ROUTES_SCRIPT_ID: &str = "__UNNEXTED_ROUTES__";

/// Render props: a JSON object
pub type Props = Map<String, Value>;

/// Server → client payload: the props the page was rendered with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageData {
    pub pathname: String,
    pub props: Props,
}

impl PageData {
    pub fn new(pathname: impl Into<String>, props: Props) -> Self {
        Self {
            pathname: pathname.into(),
            props,
        }
    }
}

/// The part of a route shipped to the client; the matcher is rebuilt there
/// from `pattern`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    pub pattern: String,
    #[serde(rename = "sourceRef")]
    pub source_ref: String,
}

/// Serializes a value for an inline `<script type="application/json">` block.
///
/// Every `<` becomes `\u003c` so string content can never close the tag.
///
/// # Examples
///
/// ```
/// use unnexted_router::protocol::encode_embedded;
///
/// let json = encode_embedded(&"</script>").unwrap();
/// assert_eq!(json, r#""\u003c/script>""#);
/// ```
pub fn encode_embedded<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
}

/// Parses the text content of an embedded block
pub fn decode_embedded<T: DeserializeOwned>(text: &str) -> serde_json::Result<T> {
    serde_json::from_str(text)
}
