//! Server startup and runtime errors.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = std::result::Result<T, ServerError>;

/// Errors raised while starting or running the HTTP server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// HOST, PORT or a timeout is out of range.
    #[error("invalid server configuration: {0}")]
    InvalidConfig(String),

    /// The listener could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// The server failed while accepting or serving connections.
    #[error("server error: {0}")]
    Runtime(#[source] io::Error),
}

impl ServerError {
    /// Creates an invalid configuration error from a validation failure.
    pub fn invalid_config(err: &anyhow::Error) -> Self {
        Self::InvalidConfig(format!("{err:#}"))
    }

    /// Returns a hint logged next to the error, if one applies.
    pub fn hint(&self) -> Option<&'static str> {
        let kind = match self {
            Self::InvalidConfig(_) => {
                return Some("Run `furnai serve --help` for the accepted values");
            }
            Self::Bind { source, .. } | Self::Runtime(source) => source.kind(),
        };

        match kind {
            io::ErrorKind::PermissionDenied => {
                Some("Ports below 1024 need elevated privileges; set PORT to a higher port")
            }
            io::ErrorKind::AddrInUse => {
                Some("Another process holds this port; stop it or set a different PORT")
            }
            io::ErrorKind::AddrNotAvailable => {
                Some("HOST is not an address of this machine; try 127.0.0.1 or 0.0.0.0")
            }
            _ => None,
        }
    }
}
