//! Span definitions for the query path: whole query, one retrieval path, fusion.

/// Create a span covering one query from admission to response.
#[macro_export]
macro_rules! query_span {
    ($query_id:expr, $strategy:expr) => {
        tracing::info_span!("lodestone.query", query_id = %$query_id, strategy = %$strategy)
    };
}

/// Create a span for one retrieval path.
#[macro_export]
macro_rules! path_span {
    ($path:expr) => {
        tracing::info_span!("lodestone.path", path = %$path)
    };
}

/// Create a fusion span.
#[macro_export]
macro_rules! fusion_span {
    ($strategy:expr) => {
        tracing::info_span!("lodestone.fusion", strategy = %$strategy)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const QUERY: &str = "lodestone.query";
    pub const PATH: &str = "lodestone.path";
    pub const FUSION: &str = "lodestone.fusion";
}
