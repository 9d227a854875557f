//! Schema construction errors.

/// Errors raised while building a schema.
///
/// These are programmer errors: they are returned by the builder call that
/// introduced them, before any value is validated.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `match_` was given something other than `all`, `one` or `any`.
    #[error("Mode must be all, one or any, got '{0}'")]
    InvalidMode(String),

    /// A string pattern failed to compile.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
