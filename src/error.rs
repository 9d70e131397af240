use http::header::InvalidHeaderValue;
use thiserror::Error;

/// Error type throughout the ssr-cookie stack
///
/// Composing a fragment never fails; only handing the result back to the
/// host's header map can.
#[derive(Error, Debug)]
pub enum CookieError {
    /// The composed string was refused as a header value, usually because an
    /// attribute carried a control character
    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] InvalidHeaderValue),
}
