use std::path::PathBuf;

use thiserror::Error;

use crate::remote::osc_sender::Protocol;

/// A token could not be turned into the argument its type tag asks for.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConversionError {
    #[error("could not cast '{token}' to '{tag}': {reason}")]
    Cast {
        token: String,
        tag: char,
        reason: String,
    },
    #[error("unsupported type tag '{0}'")]
    UnsupportedTag(char),
}

#[derive(Debug, Error)]
pub enum OscSendError {
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("got {tags} type tags for {tokens} values")]
    ArityMismatch { tags: usize, tokens: usize },

    #[error("{0} transport is not implemented")]
    UnimplementedProtocol(Protocol),

    #[error("OSC address must not be empty")]
    EmptyAddress,

    #[error("failed to read config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not resolve {host}:{port}")]
    Resolve { host: String, port: u16 },

    #[error("failed to encode OSC packet: {0}")]
    Encode(#[from] rosc::OscError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("scheduled call was cancelled")]
    Cancelled,
}

pub type Result<T, E = OscSendError> = std::result::Result<T, E>;
