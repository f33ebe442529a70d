//! Mapping of crate errors onto HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::Error;

/// Handler error; not-found answers carry no body
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match status {
            StatusCode::NOT_FOUND => {
                tracing::debug!(error = %self.0, "Lookup missed");
                status.into_response()
            }
            StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!(error = %self.0, "Request failed");
                (status, self.0.to_string()).into_response()
            }
            _ => (status, self.0.to_string()).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError(Error::not_found("X")).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError(Error::conflict("X")).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError(Error::invalid_request("bad")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(Error::storage("disk")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
