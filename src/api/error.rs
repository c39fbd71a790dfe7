//! Transport error types.
//!
//! Each operation collapses its failures into one fixed, user-facing message.
//! The underlying cause is still reachable through `source()` and
//! [`ApiError::status`] so it can be logged.

/// Low-level cause of a failed round trip.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection, TLS, timeout or body read failure.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The service answered with a non-2xx status.
    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },
    /// The body was not the JSON shape we expected.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    /// The base URL cannot carry path segments.
    #[error("base URL cannot be extended with a path: {0}")]
    BaseUrl(String),
}

/// Failure of one `/clients` operation.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Failed to load clients")]
    List(#[source] TransportError),
    #[error("Failed to load client")]
    Get(#[source] TransportError),
    #[error("No data received from the API")]
    NoData,
    #[error("Failed to create client")]
    Create(#[source] TransportError),
    #[error("Failed to update client")]
    Update(#[source] TransportError),
    #[error("Failed to delete client")]
    Delete(#[source] TransportError),
}

impl ApiError {
    /// HTTP status of the failed response, when the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self.transport() {
            Some(TransportError::Status { status, .. }) => Some(*status),
            Some(TransportError::Request(e)) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The underlying transport failure, if any.
    pub fn transport(&self) -> Option<&TransportError> {
        match self {
            Self::List(t) | Self::Get(t) | Self::Create(t) | Self::Update(t) | Self::Delete(t) => {
                Some(t)
            }
            Self::Client(_) | Self::NoData => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_hides_status_but_status_is_kept() {
        let err = ApiError::Delete(TransportError::Status {
            status: 404,
            body: "not found".into(),
        });
        assert_eq!(err.to_string(), "Failed to delete client");
        assert_eq!(err.status(), Some(404));
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("service returned 404: not found"));
    }

    #[test]
    fn no_data_has_no_status() {
        assert_eq!(ApiError::NoData.status(), None);
        assert_eq!(ApiError::NoData.to_string(), "No data received from the API");
    }
}
