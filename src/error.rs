//! Crate-wide error plumbing for start-up, configuration and file access.
//!
//! Transport failures have their own typed error in [`crate::api::ApiError`];
//! everything that happens before the event loop runs goes through the boxed
//! [`DynError`] defined here.

pub type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type Result<T> = std::result::Result<T, DynError>;

/// Names the start-up step that failed, e.g. opening the log file or
/// starting the runtime, so `main` can report it after the terminal is
/// restored.
pub trait Context<T> {
    fn with_ctx<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

/// A start-up failure together with the step that was being attempted.
#[derive(Debug, thiserror::Error)]
#[error("{context}: {source}")]
pub struct WithContextError {
    pub context: String,
    #[source]
    pub source: DynError,
}

impl<T, E> Context<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_ctx<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let err = WithContextError {
                context: f(),
                source: Box::new(e),
            };
            Box::new(err) as DynError
        })
    }
}

/// A rejected command-line or `api.conf` value, such as an unknown CPF wire
/// format or a base URL that cannot carry the `/clients` path.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct SimpleError(pub String);

impl SimpleError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

pub fn simple_error(msg: impl Into<String>) -> DynError {
    Box::new(SimpleError::new(msg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_names_the_failed_step() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = res
            .with_ctx(|| "open log file clients-admin.log".to_string())
            .unwrap_err();
        assert_eq!(err.to_string(), "open log file clients-admin.log: denied");
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("denied"));
    }

    #[test]
    fn config_rejection_is_shown_verbatim() {
        let err = simple_error("unknown cpf wire format 'hex', expected digits or masked");
        assert_eq!(
            err.to_string(),
            "unknown cpf wire format 'hex', expected digits or masked"
        );
    }
}
