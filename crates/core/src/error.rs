//! Error types for cfos-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.
//! Transport failures reported by a storage backend are wrapped in
//! [`Error::Remote`] together with the action and entity that failed, and are
//! only turned into text when displayed.

use std::fmt;

use thiserror::Error;

/// Result type alias for cfos-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Remote action that was being performed when an error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ListContainers,
    GetContainer,
    CreateContainer,
    DeleteContainer,
    ListObjects,
    DeleteObject,
    MoveObject,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Action::ListContainers => "list containers in",
            Action::GetContainer => "get container",
            Action::CreateContainer => "create container",
            Action::DeleteContainer => "delete container",
            Action::ListObjects => "list objects in container",
            Action::DeleteObject => "delete object",
            Action::MoveObject => "move object",
        };
        f.write_str(verb)
    }
}

/// Error types for cfos-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Header token without a `name:value` separator
    #[error("Unable to parse header '{header}' (must use format header-name:header-value)")]
    HeaderParse { header: String },

    /// Required positional argument is absent
    #[error("Missing required argument: {name}")]
    MissingArgument { name: &'static str },

    /// Name that cannot be expressed as a request path
    #[error("Invalid name '{name}': '.' and '..' cannot be used as a path segment")]
    InvalidName { name: String },

    /// Service not found in the configuration
    #[error("Service not found: {0}")]
    ServiceNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Authentication error
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Conflict error, e.g. deleting a container that still holds objects
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A remote call failed while performing `action` on `target`
    #[error("Failed to {action} {target}: {source}")]
    Remote {
        action: Action,
        target: String,
        #[source]
        source: Box<Error>,
    },

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Wrap a backend error with the action and entity it concerns
    pub fn remote(action: Action, target: impl Into<String>, source: Error) -> Self {
        Error::Remote {
            action,
            target: target.into(),
            source: Box::new(source),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::HeaderParse { .. }
            | Error::MissingArgument { .. }
            | Error::InvalidName { .. } => 2, // UsageError
            Error::Config(_) | Error::TomlParse(_) => 2,                    // UsageError
            Error::Network(_) => 3,                                         // NetworkError
            Error::Auth(_) => 4,                                            // AuthError
            Error::NotFound(_) | Error::ServiceNotFound(_) => 5,            // NotFound
            Error::Conflict(_) => 6,                                        // Conflict
            Error::Remote { source, .. } => source.exit_code(),
            _ => 1, // GeneralError
        }
    }
}

/// Extension for attaching remote context to backend results
pub trait RemoteContext<T> {
    /// Wrap the error, if any, as [`Error::Remote`]
    fn remote_context(self, action: Action, target: &str) -> Result<T>;
}

impl<T> RemoteContext<T> for Result<T> {
    fn remote_context(self, action: Action, target: &str) -> Result<T> {
        self.map_err(|e| Error::remote(action, target, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(
            Error::HeaderParse {
                header: "bad".into()
            }
            .exit_code(),
            2
        );
        assert_eq!(Error::MissingArgument { name: "container" }.exit_code(), 2);
        assert_eq!(Error::InvalidName { name: "..".into() }.exit_code(), 2);
        assert_eq!(Error::Config("test".into()).exit_code(), 2);
        assert_eq!(Error::Network("test".into()).exit_code(), 3);
        assert_eq!(Error::Auth("test".into()).exit_code(), 4);
        assert_eq!(Error::NotFound("test".into()).exit_code(), 5);
        assert_eq!(Error::ServiceNotFound("test".into()).exit_code(), 5);
        assert_eq!(Error::Conflict("test".into()).exit_code(), 6);
        assert_eq!(Error::General("test".into()).exit_code(), 1);
    }

    #[test]
    fn test_remote_error_inherits_exit_code() {
        let err = Error::remote(
            Action::DeleteContainer,
            "photos",
            Error::Conflict("409 Conflict".into()),
        );
        assert_eq!(err.exit_code(), 6);

        let err = Error::remote(
            Action::GetContainer,
            "photos",
            Error::NotFound("photos".into()),
        );
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn test_error_display() {
        let err = Error::ServiceNotFound("object-storage".into());
        assert_eq!(err.to_string(), "Service not found: object-storage");

        let err = Error::HeaderParse {
            header: "badheader".into(),
        };
        assert!(err
            .to_string()
            .contains("must use format header-name:header-value"));

        let err = Error::remote(
            Action::MoveObject,
            "x.txt",
            Error::Network("connection reset".into()),
        );
        assert_eq!(
            err.to_string(),
            "Failed to move object x.txt: Network error: connection reset"
        );
    }

    #[test]
    fn test_remote_context() {
        let result: Result<()> = Err(Error::Auth("token expired".into()));
        let err = result
            .remote_context(Action::ListContainers, "svcA")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Remote {
                action: Action::ListContainers,
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "Failed to list containers in svcA: Authentication failed: token expired"
        );
        assert_eq!(err.exit_code(), 4);
    }
}
