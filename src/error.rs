//! Engine error types.
//!
//! Error definitions with benign-condition classification for gateway
//! boundary translation.

use thiserror::Error;

use crate::ident::MonitorIdent;

/// Error that can occur while reconciling a monitor.
#[derive(Debug, Error)]
pub enum MonitorError {
    // Validation errors (raised before any mutating gateway call)
    /// A field's raw value failed type or range validation.
    #[error("invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// A cross-field rule failed (ordering constraint, immutable field).
    #[error("constraint violation: {message}")]
    ConstraintViolation { message: String },

    // Gateway boundary conditions
    /// The gateway reported the named monitor absent.
    #[error("monitor not found: {identifier}")]
    RemoteNotFound { identifier: MonitorIdent },

    /// The gateway reported the monitor already present during creation.
    #[error("monitor already exists: {identifier}")]
    RemoteAlreadyExists { identifier: MonitorIdent },

    /// The gateway rejected the submitted field set.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// A delete succeeded but the monitor is still present on the device.
    #[error("postcondition failed for {identifier}: {message}")]
    PostconditionFailed {
        identifier: MonitorIdent,
        message: String,
    },

    /// Any other gateway failure, wrapped with operation context.
    #[error("gateway operation '{operation}' failed for {identifier}: {message}")]
    Gateway {
        operation: String,
        identifier: MonitorIdent,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl MonitorError {
    /// Get an error code for classification.
    pub fn error_code(&self) -> &'static str {
        match self {
            MonitorError::InvalidValue { .. } => "INVALID_VALUE",
            MonitorError::ConstraintViolation { .. } => "CONSTRAINT_VIOLATION",
            MonitorError::RemoteNotFound { .. } => "REMOTE_NOT_FOUND",
            MonitorError::RemoteAlreadyExists { .. } => "REMOTE_ALREADY_EXISTS",
            MonitorError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            MonitorError::PostconditionFailed { .. } => "POSTCONDITION_FAILED",
            MonitorError::Gateway { .. } => "GATEWAY_ERROR",
        }
    }

    /// Check if this error is a validation failure surfaced before any
    /// mutating call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MonitorError::InvalidValue { .. } | MonitorError::ConstraintViolation { .. }
        )
    }

    /// Check if this is a documented benign gateway condition that call
    /// sites translate into a boolean outcome instead of propagating.
    pub fn is_benign(&self) -> bool {
        matches!(
            self,
            MonitorError::RemoteNotFound { .. } | MonitorError::RemoteAlreadyExists { .. }
        )
    }

    // Convenience constructors

    /// Create an invalid value error for a named field.
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        MonitorError::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a constraint violation error.
    pub fn constraint(message: impl Into<String>) -> Self {
        MonitorError::ConstraintViolation {
            message: message.into(),
        }
    }

    /// Create a not-found error for the given identity.
    pub fn not_found(identifier: MonitorIdent) -> Self {
        MonitorError::RemoteNotFound { identifier }
    }

    /// Create an already-exists error for the given identity.
    pub fn already_exists(identifier: MonitorIdent) -> Self {
        MonitorError::RemoteAlreadyExists { identifier }
    }

    /// Create an invalid configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        MonitorError::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create a postcondition failure for the given identity.
    pub fn postcondition(identifier: MonitorIdent, message: impl Into<String>) -> Self {
        MonitorError::PostconditionFailed {
            identifier,
            message: message.into(),
        }
    }

    /// Create a gateway error with operation context.
    pub fn gateway(
        operation: impl Into<String>,
        identifier: MonitorIdent,
        message: impl Into<String>,
    ) -> Self {
        MonitorError::Gateway {
            operation: operation.into(),
            identifier,
            message: message.into(),
            source: None,
        }
    }

    /// Create a gateway error with operation context and source.
    pub fn gateway_with_source(
        operation: impl Into<String>,
        identifier: MonitorIdent,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        MonitorError::Gateway {
            operation: operation.into(),
            identifier,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Result type for engine operations.
pub type MonitorResult<T> = Result<T, MonitorError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn ident() -> MonitorIdent {
        MonitorIdent::new("snmp_mon", "Common")
    }

    #[test]
    fn test_validation_errors() {
        let errors = vec![
            MonitorError::invalid_value("interval", "must be between 1 and 86400"),
            MonitorError::constraint("'interval' must be less than 'timeout'"),
        ];

        for err in errors {
            assert!(
                err.is_validation(),
                "Expected {} to be a validation error",
                err.error_code()
            );
            assert!(!err.is_benign());
        }
    }

    #[test]
    fn test_benign_conditions() {
        assert!(MonitorError::not_found(ident()).is_benign());
        assert!(MonitorError::already_exists(ident()).is_benign());
        assert!(!MonitorError::postcondition(ident(), "still present").is_benign());
        assert!(!MonitorError::gateway("modify", ident(), "HTTP 500").is_benign());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            MonitorError::invalid_value("timeout", "must be a valid integer").error_code(),
            "INVALID_VALUE"
        );
        assert_eq!(
            MonitorError::gateway("create", ident(), "boom").error_code(),
            "GATEWAY_ERROR"
        );
    }

    #[test]
    fn test_error_display() {
        let err = MonitorError::invalid_value("interval", "must be between 1 and 86400");
        assert_eq!(
            err.to_string(),
            "invalid value for 'interval': must be between 1 and 86400"
        );

        let err = MonitorError::not_found(ident());
        assert_eq!(err.to_string(), "monitor not found: /Common/snmp_mon");
    }

    #[test]
    fn test_gateway_error_with_source() {
        let source = std::io::Error::other("connection reset");
        let err = MonitorError::gateway_with_source("load", ident(), "transport failure", source);

        if let MonitorError::Gateway { source, .. } = &err {
            assert!(source.is_some());
        } else {
            panic!("Expected Gateway variant");
        }
    }
}
