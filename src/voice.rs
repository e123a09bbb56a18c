// Copyright (c) 2024-2026, Daily
//
// SPDX-License-Identifier: BSD-2-Clause

//! Codec selection and the JSON wire types of the Ivona Speech Cloud API.
//!
//! Request bodies are serialized with `PascalCase` keys to match the service
//! convention. The `/CreateSpeech` payload has the shape
//! `{Input, OutputFormat, Parameters, Voice}`; `/ListVoices` answers with
//! `{"Voices": [...]}`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{IvonaError, Result};

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

/// Audio encoding requested from the service.
///
/// Only Ogg Vorbis and MP3 are offered; every other name is rejected as a
/// configuration error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Codec {
    /// Ogg Vorbis. The default, and the format used for local playback.
    #[default]
    Ogg,
    /// MP3.
    Mp3,
}

impl Codec {
    /// Parse a codec name ("ogg" or "mp3", case-insensitive).
    pub fn from_name(name: &str) -> Result<Codec> {
        match name.to_ascii_lowercase().as_str() {
            "ogg" => Ok(Codec::Ogg),
            "mp3" => Ok(Codec::Mp3),
            other => Err(IvonaError::Configuration(format!(
                "unsupported codec {other:?}: expected \"ogg\" or \"mp3\""
            ))),
        }
    }

    /// The codec name as the wire format expects it.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Codec::Ogg => "OGG",
            Codec::Mp3 => "MP3",
        }
    }

    /// File extension for audio saved in this codec.
    pub fn extension(&self) -> &'static str {
        match self {
            Codec::Ogg => "ogg",
            Codec::Mp3 => "mp3",
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

// ---------------------------------------------------------------------------
// /CreateSpeech request types
// ---------------------------------------------------------------------------

/// Request body for the `/CreateSpeech` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateSpeechRequest {
    /// The text to synthesize.
    pub input: SpeechInput,
    /// Requested audio encoding.
    pub output_format: OutputFormat,
    /// Prosody parameters: rate and break timings.
    pub parameters: SpeechParameters,
    /// Voice selection.
    pub voice: VoiceSelector,
}

/// The input text and its content type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechInput {
    /// Input content type; this client always sends plain text.
    #[serde(rename = "Type")]
    pub kind: String,
    /// The text to speak.
    #[serde(rename = "Data")]
    pub data: String,
}

impl SpeechInput {
    /// Plain-text input.
    pub fn text(data: impl Into<String>) -> Self {
        Self {
            kind: "text/plain".to_string(),
            data: data.into(),
        }
    }
}

/// Requested output encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutputFormat {
    /// Wire codec name ("OGG" or "MP3").
    pub codec: String,
}

/// Prosody parameters: timing and delivery controls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SpeechParameters {
    /// Speech rate, e.g. "slow", "medium", "fast".
    pub rate: String,
    /// Pause between sentences, in milliseconds.
    pub sentence_break: u32,
    /// Pause between paragraphs, in milliseconds.
    pub paragraph_break: u32,
}

/// Voice selection by name, optionally narrowed by language and gender.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VoiceSelector {
    /// Voice name, e.g. "Brian".
    pub name: String,
    /// BCP-47-ish language code, e.g. "en-GB".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// "Male" or "Female".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

// ---------------------------------------------------------------------------
// /ListVoices response types
// ---------------------------------------------------------------------------

/// Response body of the `/ListVoices` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ListVoicesResponse {
    /// The voices offered by the service.
    #[serde(rename = "Voices", default)]
    pub voices: Vec<VoiceDescriptor>,
}

/// One voice as described by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VoiceDescriptor {
    /// Voice name, e.g. "Brian".
    pub name: String,
    /// Language code, e.g. "en-GB".
    #[serde(default)]
    pub language: Option<String>,
    /// "Male" or "Female".
    #[serde(default)]
    pub gender: Option<String>,
}
