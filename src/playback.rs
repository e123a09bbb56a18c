// Copyright (c) 2024-2026, Daily
//
// SPDX-License-Identifier: BSD-2-Clause

//! Local audio playback collaborator.
//!
//! Playback is an optional capability injected at client construction. When
//! no player is configured, synthesis and file retrieval still work; only
//! `speak` fails, with [`crate::error::IvonaError::PlaybackUnavailable`].
//!
//! [`AudioPlayer::play`] blocks until the sound has finished. Cancellation is
//! not supported at this layer; a caller wanting cancellable playback must
//! build it on top.

use crate::error::Result;

#[cfg(feature = "playback")]
use crate::error::IvonaError;

/// A collaborator able to play one in-memory audio buffer to completion.
pub trait AudioPlayer: Send + Sync {
    /// Play the buffer and return once playback has finished.
    fn play(&self, audio: &[u8]) -> Result<()>;
}

/// Audio player backed by rodio and the system's default output device.
///
/// Decodes Ogg Vorbis or MP3 buffers and blocks on the sink until the sound
/// drains.
#[cfg(feature = "playback")]
#[derive(Debug, Default)]
pub struct RodioPlayer;

#[cfg(feature = "playback")]
impl RodioPlayer {
    /// Create a player for the system default output device. The device is
    /// opened per call, not held open between sounds.
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "playback")]
impl AudioPlayer for RodioPlayer {
    fn play(&self, audio: &[u8]) -> Result<()> {
        let stream = rodio::OutputStreamBuilder::open_default_stream()
            .map_err(|e| IvonaError::Playback(format!("no output device: {e}")))?;
        let sink = rodio::Sink::connect_new(stream.mixer());
        let source = rodio::Decoder::new(std::io::Cursor::new(audio.to_vec()))
            .map_err(|e| IvonaError::Playback(format!("undecodable audio: {e}")))?;
        sink.append(source);
        sink.sleep_until_end();
        Ok(())
    }
}
