use std::net::SocketAddr;

/// Errors that may occur while emitting check events.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to open UDP socket for `{addr}`: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode event `{name}`: {source}")]
    Encode {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to send event `{name}` to `{addr}`: {source}")]
    Send {
        name: String,
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write event `{name}`: {source}")]
    Write {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
