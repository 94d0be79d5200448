use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the OHT routing library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A route was requested before any layout was loaded.
    #[error("layout not loaded; call load_layout first")]
    LayoutNotLoaded,

    /// Raised when the layout description cannot be turned into a graph.
    #[error("invalid layout: {message}")]
    LayoutInvalid { message: String },

    /// Raised when a start or end node id is absent from the layout.
    #[error("node '{id}' not found in layout")]
    NodeNotFound { id: String },

    /// Raised when the search exhausted its frontier without reaching the goal.
    #[error("no route found from '{start}' to '{end}'")]
    NoRouteFound { start: String, end: String },

    /// Raised when a caller cancelled an in-flight search.
    #[error("route search was cancelled")]
    SearchCancelled,

    /// Raised when a search ran past its deadline.
    #[error("route search from '{start}' to '{end}' exceeded its deadline")]
    SearchTimedOut { start: String, end: String },

    /// Raised when a layout file could not be opened.
    #[error("failed to read layout from {path}")]
    LayoutFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Wrapper for layout JSON decoding errors.
    #[error("failed to parse layout: {0}")]
    LayoutParse(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_layout(message: impl Into<String>) -> Self {
        Error::LayoutInvalid {
            message: message.into(),
        }
    }

    pub(crate) fn node_not_found(id: &str) -> Self {
        Error::NodeNotFound { id: id.to_string() }
    }

    pub(crate) fn no_route(start: &str, end: &str) -> Self {
        Error::NoRouteFound {
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}
