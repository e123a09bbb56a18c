// Copyright (c) 2024-2026, Daily
//
// SPDX-License-Identifier: BSD-2-Clause

//! On-disk cache for synthesized speech.
//!
//! Entries are keyed by the SHA-256 of the literal text, with the codec's
//! file extension appended. The cache directory is created on demand.
//!
//! Known staleness caveat: the key covers the text only. Changing the voice,
//! rate, or break configuration does not invalidate entries, so a cached
//! fetch after a configuration change replays audio synthesized under the
//! old configuration. Callers who need freshness after reconfiguring should
//! bypass the cache or clear the directory.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::debug;

use crate::error::{IvonaError, Result};
use crate::voice::Codec;

/// File cache for synthesized audio, keyed by a content hash of the text.
#[derive(Debug, Clone)]
pub struct SpeechCache {
    dir: PathBuf,
}

impl SpeechCache {
    /// Cache rooted at the given directory. The directory is not created
    /// until the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default cache location under the system temp directory.
    pub fn default_dir() -> PathBuf {
        std::env::temp_dir().join("ivona-speech-cache")
    }

    /// The cache root.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Cache key for a text: hex-encoded SHA-256 of the literal bytes.
    pub fn key(text: &str) -> String {
        hex::encode(Sha256::digest(text.as_bytes()))
    }

    /// Where audio for this text and codec lives (whether or not it exists).
    pub fn entry_path(&self, text: &str, codec: Codec) -> PathBuf {
        self.dir
            .join(format!("{}.{}", Self::key(text), codec.extension()))
    }

    /// Read a cached entry. `None` when the entry does not exist.
    pub async fn read(&self, text: &str, codec: Codec) -> Result<Option<Vec<u8>>> {
        let path = self.entry_path(text, codec);
        match fs::read(&path).await {
            Ok(bytes) => {
                debug!(path = %path.display(), bytes = bytes.len(), "Speech cache hit");
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(IvonaError::filesystem(path, e)),
        }
    }

    /// Store audio for a text, creating the cache directory if needed.
    /// Returns the entry path.
    pub async fn write(&self, text: &str, codec: Codec, audio: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| IvonaError::filesystem(&self.dir, e))?;
        let path = self.entry_path(text, codec);
        fs::write(&path, audio)
            .await
            .map_err(|e| IvonaError::filesystem(&path, e))?;
        debug!(path = %path.display(), bytes = audio.len(), "Cached synthesized speech");
        Ok(path)
    }
}

impl Default for SpeechCache {
    fn default() -> Self {
        Self::new(Self::default_dir())
    }
}
