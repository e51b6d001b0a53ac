use crate::Result;
use ohno::app_err;

/// Result of an analytics API call
#[derive(Debug)]
pub enum ApiResult<T> {
    /// Request succeeded
    Success(T),

    /// The token was rejected (HTTP 401/403, or reported invalid)
    Unauthorized(String),

    /// The API could not deliver data: transport failures, other HTTP errors, or error bodies
    Unavailable(ohno::AppError),
}

impl<T> ApiResult<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResult<U> {
        match self {
            Self::Success(value) => ApiResult::Success(f(value)),
            Self::Unauthorized(message) => ApiResult::Unauthorized(message),
            Self::Unavailable(error) => ApiResult::Unavailable(error),
        }
    }

    /// Collapse into the single user-facing error of a failed call
    ///
    /// # Errors
    ///
    /// Returns `authorization failed: ...` or `data unavailable: ...` for the failure variants
    pub fn into_result(self) -> Result<T> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Unauthorized(message) => Err(app_err!("authorization failed: {message}")),
            Self::Unavailable(error) => Err(app_err!("data unavailable: {error}")),
        }
    }
}
