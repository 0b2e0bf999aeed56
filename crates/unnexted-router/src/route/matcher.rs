//! Regex matchers compiled from route patterns
//!
//! The same compilation runs on the server (from page files) and on the
//! client (from shipped pattern strings), so it must stay a pure function of
//! the pattern text.

use std::borrow::Cow;

use regex::Regex;

use super::pattern::{tokenize, Token};
use crate::RouteCompileError;

/// Capturing group a dynamic segment expands to
const PARAM_GROUP: &str = "([^/]+)";

/// Compiled predicate + extractor for one route pattern
///
/// # Examples
///
/// ```
/// use unnexted_router::Matcher;
///
/// let matcher = Matcher::from_pattern("/blog/[slug]").unwrap();
/// assert!(matcher.is_match("/blog/hello"));
/// assert!(matcher.is_match("/blog/hello/"));
/// assert!(!matcher.is_match("/blog/hello/comments"));
/// assert_eq!(matcher.captures("/blog/hello").unwrap(), vec!["hello".to_string()]);
/// ```
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
    param_names: Vec<String>,
}

impl Matcher {
    /// Compiles a matcher from a canonical pattern such as `/blog/[slug]`.
    ///
    /// Literal text is escaped, each `[name]` becomes one capturing group of
    /// non-slash characters, a single trailing slash is optional and the
    /// expression is anchored at both ends.
    pub fn from_pattern(pattern: &str) -> Result<Self, RouteCompileError> {
        let tokens = tokenize(pattern)?;
        let mut source = String::from("^");
        let mut param_names = Vec::new();

        let last = tokens.len().saturating_sub(1);
        for (idx, token) in tokens.iter().enumerate() {
            match token {
                Token::Literal(text) => {
                    let text = if idx == last {
                        text.strip_suffix('/').unwrap_or(text)
                    } else {
                        text.as_str()
                    };
                    source.push_str(&regex::escape(text));
                }
                Token::Param(name) => {
                    source.push_str(PARAM_GROUP);
                    param_names.push(name.clone());
                }
            }
        }
        source.push_str("/?$");

        let regex = Regex::new(&source).map_err(|source| RouteCompileError::Regex {
            pattern: pattern.to_string(),
            source,
        })?;

        debug_assert_eq!(regex.captures_len() - 1, param_names.len());

        Ok(Self { regex, param_names })
    }

    /// Whether the whole pathname is accepted
    pub fn is_match(&self, pathname: &str) -> bool {
        self.regex.is_match(pathname)
    }

    /// Extracts parameter values in `param_names` order, percent-decoded.
    ///
    /// Returns `None` when the pathname does not match.
    pub fn captures(&self, pathname: &str) -> Option<Vec<String>> {
        let caps = self.regex.captures(pathname)?;

        Some(
            caps.iter()
                .skip(1)
                .map(|group| group.map(|m| decode_segment(m.as_str())).unwrap_or_default())
                .collect(),
        )
    }

    /// Dynamic segment names in left-to-right order
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// The generated regular expression
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Percent-decodes a captured segment, keeping the raw text when the
/// escapes do not form valid UTF-8.
fn decode_segment(raw: &str) -> String {
    match urlencoding::decode(raw) {
        Ok(Cow::Borrowed(s)) => s.to_string(),
        Ok(Cow::Owned(s)) => s,
        Err(_) => raw.to_string(),
    }
}
