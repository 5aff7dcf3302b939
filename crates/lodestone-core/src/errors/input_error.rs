/// Caller mistakes detected at the boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("query text is empty")]
    EmptyQuery,

    #[error("query text too long: {len} characters, maximum {max}")]
    QueryTooLong { len: usize, max: usize },

    #[error("unknown template type: {name}")]
    UnknownTemplate { name: String },

    #[error("malformed request body: {reason}")]
    MalformedBody { reason: String },
}
