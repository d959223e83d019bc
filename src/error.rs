//! Error types for config generation.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Everything that can abort a generation run. None of these are retried.
#[derive(Error, Debug)]
pub enum GenCfgError {
    #[error("invalid {param}: {reason}")]
    InvalidParameter {
        param: &'static str,
        reason: &'static str,
    },

    #[error("malformed descriptor {}: {reason}", .path.display())]
    MalformedDescriptor { path: PathBuf, reason: String },

    #[error(
        "no corresponding value for token {token} ({}:{line})",
        .template.display()
    )]
    MissingToken {
        token: String,
        template: PathBuf,
        line: usize,
    },

    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type GenCfgResult<T> = Result<T, GenCfgError>;

impl GenCfgError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Raised by the line engine; the orchestrator attaches the template location.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no corresponding value for token {0}")]
pub struct MissingToken(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_names_the_parameter() {
        let err = GenCfgError::InvalidParameter {
            param: "target path",
            reason: "not an absolute path",
        };
        assert_eq!(err.to_string(), "invalid target path: not an absolute path");
    }

    #[test]
    fn missing_token_carries_location() {
        let err = GenCfgError::MissingToken {
            token: "host".to_string(),
            template: PathBuf::from("/tpl/app.properties"),
            line: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("host"));
        assert!(msg.contains("/tpl/app.properties:3"));
    }

    #[test]
    fn io_error_keeps_source() {
        let err = GenCfgError::io(
            "/nope",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, GenCfgError::Io { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }
}
