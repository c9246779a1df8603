//! Internal error helpers for mapping HTTP/reqwest errors to [`LookupError`].

use scout_proto::LookupError;

/// Map a non-success HTTP status from the users endpoint to a [`LookupError`].
///
/// Reference: <https://docs.github.com/en/rest/users/users#get-a-user>
pub(crate) fn map_http_status(status: reqwest::StatusCode, body: &str, login: &str) -> LookupError {
    match status.as_u16() {
        404 => LookupError::NotFound(login.to_string()),
        code => LookupError::Status {
            status: code,
            body: body.to_string(),
        },
    }
}

/// Map a [`reqwest::Error`] to a [`LookupError`].
pub(crate) fn map_reqwest_error(err: reqwest::Error) -> LookupError {
    if err.is_timeout() {
        LookupError::Timeout
    } else {
        LookupError::Network(err.to_string())
    }
}
