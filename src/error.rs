// Copyright (c) 2024-2026, Daily
// SPDX-License-Identifier: BSD-2-Clause

//! Error types for the Ivona client.
//!
//! Every fallible operation in this crate returns [`IvonaError`]. Errors are
//! always propagated to the caller; nothing is retried or swallowed
//! internally, and logging never replaces returning the error.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, IvonaError>;

/// All failure modes of the Ivona client.
#[derive(Debug, Error)]
pub enum IvonaError {
    /// Invalid configuration: malformed credentials or an unsupported codec.
    /// Raised synchronously at the point of mutation, before any request is
    /// attempted.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The transport collaborator failed to deliver the request or receive a
    /// response. Propagated unchanged; retry policy belongs to the caller or
    /// the transport, not to this crate.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The service rejected the request or returned a JSON error envelope.
    /// Carries the raw response body for diagnostics.
    #[error("service error (HTTP {status}): {body}")]
    Service {
        /// HTTP status code reported by the transport.
        status: u16,
        /// Raw response body as received from the service.
        body: String,
    },

    /// Playback was requested but no audio player is configured.
    #[error("audio playback requested but no player is configured")]
    PlaybackUnavailable,

    /// The configured audio player failed to play the buffer.
    #[error("audio playback failed: {0}")]
    Playback(String),

    /// Reading or writing an audio file or the cache directory failed.
    #[error("filesystem error at {}: {source}", path.display())]
    Filesystem {
        /// The path that could not be read or written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl IvonaError {
    /// Wrap a filesystem error together with the path it occurred on.
    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IvonaError::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Build a service error from a transport response.
    pub(crate) fn service(status: u16, body: &[u8]) -> Self {
        IvonaError::Service {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }
}
