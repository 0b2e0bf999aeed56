//! Pattern derivation for page files
//!
//! Pure parsing of page file paths into canonical URL patterns, and of
//! patterns into literal/parameter tokens.
//! All functions are **pure**: same input → same output, no side effects.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::RouteCompileError;

static IDENT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// A piece of a route pattern
///
/// # Examples
///
/// ```
/// use unnexted_router::{tokenize, Token};
///
/// let tokens = tokenize("/blog/[slug]").unwrap();
/// assert_eq!(
///     tokens,
///     vec![Token::Literal("/blog/".to_string()), Token::Param("slug".to_string())]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Text matched verbatim
    Literal(String),
    /// Dynamic segment `[name]`, matches one or more non-slash characters
    Param(String),
}

/// Splits a pattern into literal and parameter tokens.
///
/// Rejects unbalanced brackets, bracket contents that are not identifiers
/// (which also rules out `[...rest]` and `[[optional]]` forms) and parameter
/// names used twice.
pub fn tokenize(pattern: &str) -> Result<Vec<Token>, RouteCompileError> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut names: Vec<&str> = Vec::new();
    let mut chars = pattern.char_indices();

    while let Some((start, ch)) = chars.next() {
        match ch {
            '[' => {
                let close = pattern[start + 1..]
                    .find(|c: char| c == ']' || c == '[' || c == '/')
                    .map(|offset| start + 1 + offset)
                    .filter(|&end| pattern[end..].starts_with(']'))
                    .ok_or_else(|| RouteCompileError::UnbalancedBracket {
                        pattern: pattern.to_string(),
                        position: start,
                    })?;

                let name = &pattern[start + 1..close];
                if !IDENT_REGEX.is_match(name) {
                    return Err(RouteCompileError::InvalidParamName {
                        pattern: pattern.to_string(),
                        name: name.to_string(),
                    });
                }
                if names.contains(&name) {
                    return Err(RouteCompileError::DuplicateParam {
                        pattern: pattern.to_string(),
                        name: name.to_string(),
                    });
                }
                names.push(name);

                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }
                tokens.push(Token::Param(name.to_string()));

                // Skip past the closing bracket
                for (idx, _) in chars.by_ref() {
                    if idx == close {
                        break;
                    }
                }
            }
            ']' => {
                return Err(RouteCompileError::UnbalancedBracket {
                    pattern: pattern.to_string(),
                    position: start,
                })
            }
            other => literal.push(other),
        }
    }

    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }

    Ok(tokens)
}

/// Derives the canonical URL pattern for a page file.
///
/// `relative_path` is relative to the pages root and uses `/` or `\`
/// separators.
///
/// - `index.rs` → `/`
/// - `docs/index.rs` → `/docs/`
/// - `blog/[slug].rs` → `/blog/[slug]`
///
/// # Examples
///
/// ```
/// use unnexted_router::pattern_from_file;
///
/// assert_eq!(pattern_from_file("index.rs", "rs").unwrap(), "/");
/// assert_eq!(pattern_from_file("docs/index.rs", "rs").unwrap(), "/docs/");
/// assert_eq!(pattern_from_file("about.rs", "rs").unwrap(), "/about");
/// ```
pub fn pattern_from_file(relative_path: &str, extension: &str) -> Result<String, RouteCompileError> {
    let normalized = relative_path.replace('\\', "/");
    let normalized = normalized
        .trim_start_matches("./")
        .trim_start_matches('/');

    let invalid = || RouteCompileError::InvalidPagePath {
        path: relative_path.to_string(),
        extension: extension.to_string(),
    };

    let without_ext = normalized
        .strip_suffix(extension)
        .and_then(|s| s.strip_suffix('.'))
        .filter(|s| !s.is_empty() && !s.ends_with('/'))
        .ok_or_else(invalid)?;

    let pattern = if without_ext == "index" {
        "/".to_string()
    } else if let Some(parent) = without_ext.strip_suffix("/index") {
        format!("/{}/", parent)
    } else {
        format!("/{}", without_ext)
    };

    // Validate dynamic segments up front so bad files fail here
    tokenize(&pattern)?;

    Ok(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_static() {
        let tokens = tokenize("/about").unwrap();
        assert_eq!(tokens, vec![Token::Literal("/about".to_string())]);
    }

    #[test]
    fn test_tokenize_param_inside_segment() {
        let tokens = tokenize("/posts/post-[id].html").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Literal("/posts/post-".to_string()),
                Token::Param("id".to_string()),
                Token::Literal(".html".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_multiple_params() {
        let tokens = tokenize("/[org]/[repo]").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Literal("/".to_string()),
                Token::Param("org".to_string()),
                Token::Literal("/".to_string()),
                Token::Param("repo".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_rejects_unclosed_bracket() {
        let err = tokenize("/blog/[slug").unwrap_err();
        assert!(matches!(err, RouteCompileError::UnbalancedBracket { position: 6, .. }));
    }

    #[test]
    fn test_tokenize_rejects_stray_close() {
        let err = tokenize("/blog/slug]").unwrap_err();
        assert!(matches!(err, RouteCompileError::UnbalancedBracket { .. }));
    }

    #[test]
    fn test_tokenize_rejects_bracket_spanning_segments() {
        let err = tokenize("/[blog/slug]").unwrap_err();
        assert!(matches!(err, RouteCompileError::UnbalancedBracket { .. }));
    }

    #[test]
    fn test_tokenize_rejects_nested_brackets() {
        let err = tokenize("/docs/[[slug]]").unwrap_err();
        assert!(matches!(err, RouteCompileError::UnbalancedBracket { .. }));
    }

    #[test]
    fn test_tokenize_rejects_catch_all() {
        let err = tokenize("/docs/[...slug]").unwrap_err();
        assert!(matches!(err, RouteCompileError::InvalidParamName { ref name, .. } if name == "...slug"));
    }

    #[test]
    fn test_tokenize_rejects_leading_digit() {
        let err = tokenize("/items/[1id]").unwrap_err();
        assert!(matches!(err, RouteCompileError::InvalidParamName { .. }));
    }

    #[test]
    fn test_tokenize_rejects_empty_name() {
        let err = tokenize("/items/[]").unwrap_err();
        assert!(matches!(err, RouteCompileError::InvalidParamName { .. }));
    }

    #[test]
    fn test_tokenize_rejects_duplicate_name() {
        let err = tokenize("/[id]/edit/[id]").unwrap_err();
        assert!(matches!(err, RouteCompileError::DuplicateParam { .. }));
    }

    #[test]
    fn test_pattern_from_file() {
        assert_eq!(pattern_from_file("index.rs", "rs").unwrap(), "/");
        assert_eq!(pattern_from_file("about.rs", "rs").unwrap(), "/about");
        assert_eq!(pattern_from_file("blog/index.rs", "rs").unwrap(), "/blog/");
        assert_eq!(pattern_from_file("blog/[slug].rs", "rs").unwrap(), "/blog/[slug]");
        assert_eq!(pattern_from_file("blog\\[slug].rs", "rs").unwrap(), "/blog/[slug]");
        assert_eq!(pattern_from_file("./about.rs", "rs").unwrap(), "/about");
    }

    #[test]
    fn test_pattern_from_file_keeps_index_like_names() {
        assert_eq!(pattern_from_file("reindex.rs", "rs").unwrap(), "/reindex");
        assert_eq!(pattern_from_file("docs/myindex.rs", "rs").unwrap(), "/docs/myindex");
    }

    #[test]
    fn test_pattern_from_file_rejects_wrong_extension() {
        let err = pattern_from_file("about.tsx", "rs").unwrap_err();
        assert!(matches!(err, RouteCompileError::InvalidPagePath { .. }));
        assert!(pattern_from_file(".rs", "rs").is_err());
        assert!(pattern_from_file("aboutrs", "rs").is_err());
    }
}
