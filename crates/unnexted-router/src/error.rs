use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning a page file or a pattern into a [`crate::Route`].
///
/// These are fatal at startup: a table with a malformed route is never built.
#[derive(Debug, Error)]
pub enum RouteCompileError {
    #[error("unbalanced bracket at byte {position} in `{pattern}`")]
    UnbalancedBracket { pattern: String, position: usize },

    #[error("invalid parameter name `{name}` in `{pattern}`")]
    InvalidParamName { pattern: String, name: String },

    #[error("parameter `{name}` appears more than once in `{pattern}`")]
    DuplicateParam { pattern: String, name: String },

    #[error("`{path}` is not a page file (expected a `.{extension}` file)")]
    InvalidPagePath { path: String, extension: String },

    #[error("failed to build matcher for `{pattern}`: {source}")]
    Regex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Errors raised while building a [`crate::RouteTable`] from a pages directory.
#[derive(Debug, Error)]
pub enum RouteTableError {
    #[error("failed to compile route for `{file}`: {source}")]
    Compile {
        file: String,
        #[source]
        source: RouteCompileError,
    },

    #[error("failed to scan pages directory {}: {source}", .root.display())]
    Scan {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}
