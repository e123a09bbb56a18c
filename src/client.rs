// Copyright (c) 2024-2026, Daily
//
// SPDX-License-Identifier: BSD-2-Clause

//! Ivona Speech Cloud client.
//!
//! This module provides [`SpeechClient`] -- an HTTP client for the Ivona
//! Speech Cloud API that signs each request, lists the available voices
//! (`/ListVoices`), and synthesizes speech (`/CreateSpeech`) into an
//! in-memory buffer, a file, or local playback.
//!
//! # Dependencies
//!
//! Uses the same crates as the rest of the crate: `reqwest` (behind the
//! [`Transport`] trait), `serde` / `serde_json`, `tokio`, `tracing`,
//! `chrono`.
//!
//! # Example
//!
//! ```no_run
//! use ivona::client::SpeechClient;
//!
//! # async fn example() -> ivona::error::Result<()> {
//! let client = SpeechClient::new("ACCESS_KEY", "SECRET_KEY")?
//!     .with_region_name("eu-west")
//!     .with_voice("Emma")
//!     .with_speech_rate("slow");
//!
//! let audio = client.synthesize("Hello, world!").await?;
//! client.fetch_voice_ogg("Hello again", "greeting").await?;
//! # Ok(())
//! # }
//! ```
//!
//! One client is created per set of credentials and reused across requests.
//! Mutating configuration takes `&mut self`; do not mutate a shared client
//! concurrently with an in-flight call -- each call snapshots the
//! configuration when it builds its payload.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error};

use crate::auth::{self, Credentials, SignRequestParams, SignedRequest};
use crate::cache::SpeechCache;
use crate::error::{IvonaError, Result};
use crate::playback::AudioPlayer;
use crate::region::Region;
use crate::transport::{ReqwestTransport, Transport, TransportResponse};
use crate::voice::{
    Codec, CreateSpeechRequest, ListVoicesResponse, OutputFormat, SpeechInput, SpeechParameters,
    VoiceDescriptor, VoiceSelector,
};

// ---------------------------------------------------------------------------
// SpeechClient
// ---------------------------------------------------------------------------

/// Client for the Ivona Speech Cloud text-to-speech API.
///
/// Holds credentials and voice configuration, and turns synthesis calls into
/// signed POST requests. Transport and playback are injected collaborators;
/// synthesis and file retrieval work without a player.
pub struct SpeechClient {
    credentials: Credentials,
    region: Region,
    voice_name: String,
    language: Option<String>,
    gender: Option<String>,
    speech_rate: String,
    sentence_break_ms: u32,
    paragraph_break_ms: u32,
    codec: Codec,
    cache: SpeechCache,
    transport: Arc<dyn Transport>,
    player: Option<Arc<dyn AudioPlayer>>,
}

impl SpeechClient {
    /// Default voice name.
    pub const DEFAULT_VOICE: &'static str = "Brian";
    /// Default speech rate.
    pub const DEFAULT_SPEECH_RATE: &'static str = "medium";
    /// Default pause between sentences, in milliseconds.
    pub const DEFAULT_SENTENCE_BREAK_MS: u32 = 400;
    /// Default pause between paragraphs, in milliseconds.
    pub const DEFAULT_PARAGRAPH_BREAK_MS: u32 = 650;

    /// Service name bound into the credential scope.
    const SERVICE: &'static str = "tts";
    /// Content type of every request.
    const CONTENT_TYPE: &'static str = "application/json";
    /// Synthesis endpoint path.
    const CREATE_SPEECH_PATH: &'static str = "/CreateSpeech";
    /// Voice listing endpoint path.
    const LIST_VOICES_PATH: &'static str = "/ListVoices";

    /// Create a client with the given credentials and default configuration
    /// (us-east, voice "Brian", medium rate, ogg).
    ///
    /// Empty credentials are rejected here, before any request is attempted.
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            credentials: Credentials::new(access_key, secret_key)?,
            region: Region::default(),
            voice_name: Self::DEFAULT_VOICE.to_string(),
            language: None,
            gender: None,
            speech_rate: Self::DEFAULT_SPEECH_RATE.to_string(),
            sentence_break_ms: Self::DEFAULT_SENTENCE_BREAK_MS,
            paragraph_break_ms: Self::DEFAULT_PARAGRAPH_BREAK_MS,
            codec: Codec::default(),
            cache: SpeechCache::default(),
            transport: Arc::new(ReqwestTransport::new()),
            player: None,
        })
    }

    // -----------------------------------------------------------------------
    // Builder methods
    // -----------------------------------------------------------------------

    /// Builder method: set the region.
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    /// Builder method: set the region by short name ("us-east", "us-west",
    /// "eu-west"). Unrecognized names fall back to us-east-1.
    pub fn with_region_name(mut self, name: &str) -> Self {
        self.region = Region::from_name(name);
        self
    }

    /// Builder method: set the voice name (e.g. "Brian", "Emma", "Salli").
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice_name = voice.into();
        self
    }

    /// Builder method: narrow voice selection by language code (e.g. "en-GB").
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Builder method: narrow voice selection by gender ("Male" / "Female").
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Builder method: set the speech rate ("x-slow" through "x-fast").
    pub fn with_speech_rate(mut self, rate: impl Into<String>) -> Self {
        self.speech_rate = rate.into();
        self
    }

    /// Builder method: set the pause between sentences, in milliseconds.
    pub fn with_sentence_break(mut self, ms: u32) -> Self {
        self.sentence_break_ms = ms;
        self
    }

    /// Builder method: set the pause between paragraphs, in milliseconds.
    pub fn with_paragraph_break(mut self, ms: u32) -> Self {
        self.paragraph_break_ms = ms;
        self
    }

    /// Builder method: set the output codec.
    pub fn with_codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }

    /// Builder method: set the speech cache directory.
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache = SpeechCache::new(dir);
        self
    }

    /// Builder method: provide a custom transport (testing, proxies).
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Builder method: inject an audio player for [`SpeechClient::speak`].
    pub fn with_player(mut self, player: Arc<dyn AudioPlayer>) -> Self {
        self.player = Some(player);
        self
    }

    // -----------------------------------------------------------------------
    // Configuration accessors and setters
    // -----------------------------------------------------------------------

    /// The configured region.
    pub fn region(&self) -> Region {
        self.region
    }

    /// The service host, derived from the region.
    pub fn host(&self) -> String {
        self.region.host()
    }

    /// The configured output codec.
    pub fn codec(&self) -> Codec {
        self.codec
    }

    /// The configured voice name.
    pub fn voice(&self) -> &str {
        &self.voice_name
    }

    /// Set the region by short name. Unrecognized names fall back to
    /// us-east-1; the host follows the region automatically, so the two can
    /// never disagree.
    pub fn set_region(&mut self, name: &str) {
        self.region = Region::from_name(name);
    }

    /// Set the output codec by name. Only "ogg" and "mp3" are accepted; on
    /// any other name the previous codec stays configured and a
    /// configuration error is returned.
    pub fn set_codec(&mut self, name: &str) -> Result<()> {
        self.codec = Codec::from_name(name)?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Request building
    // -----------------------------------------------------------------------

    /// Build the `/CreateSpeech` payload for the given text, snapshotting
    /// the current configuration.
    pub fn build_request(&self, text: &str) -> CreateSpeechRequest {
        self.build_request_with_codec(text, self.codec)
    }

    fn build_request_with_codec(&self, text: &str, codec: Codec) -> CreateSpeechRequest {
        CreateSpeechRequest {
            input: SpeechInput::text(text),
            output_format: OutputFormat {
                codec: codec.wire_name().to_string(),
            },
            parameters: SpeechParameters {
                rate: self.speech_rate.clone(),
                sentence_break: self.sentence_break_ms,
                paragraph_break: self.paragraph_break_ms,
            },
            voice: VoiceSelector {
                name: self.voice_name.clone(),
                language: self.language.clone(),
                gender: self.gender.clone(),
            },
        }
    }

    /// Sign a POST to `path` at the current instant. The signing context is
    /// rebuilt per call; nothing about it is cached.
    fn signed_request(&self, path: &str, body: &[u8]) -> SignedRequest {
        let host = self.region.host();
        auth::sign_request(
            &self.credentials,
            &SignRequestParams {
                method: "POST",
                service: Self::SERVICE,
                content_type: Self::CONTENT_TYPE,
                uri_path: path,
                query_string: "",
                body,
                region: self.region.id(),
                host: &host,
            },
            Utc::now(),
        )
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// List the voices offered by the service in the configured region.
    pub async fn list_voices(&self) -> Result<Vec<VoiceDescriptor>> {
        let signed = self.signed_request(Self::LIST_VOICES_PATH, b"");
        debug!(region = %self.region, "Listing available voices");

        let response = self
            .transport
            .post(&signed.endpoint, &signed.headers, Vec::new())
            .await?;
        if !success(response.status) {
            error!(status = response.status, "Voice listing rejected");
            return Err(IvonaError::service(response.status, &response.body));
        }

        let parsed: ListVoicesResponse = serde_json::from_slice(&response.body)
            .map_err(|_| IvonaError::service(response.status, &response.body))?;
        debug!(voices = parsed.voices.len(), "Voice listing complete");
        Ok(parsed.voices)
    }

    /// Synthesize speech for `text` with the configured codec, returning the
    /// raw audio bytes.
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        self.synthesize_with_codec(text, self.codec).await
    }

    /// Synthesize speech with a per-call codec override. The configured
    /// codec is untouched.
    pub async fn synthesize_with_codec(&self, text: &str, codec: Codec) -> Result<Vec<u8>> {
        let request = self.build_request_with_codec(text, codec);
        let body = serde_json::to_vec(&request)
            .map_err(|e| IvonaError::Configuration(format!("failed to encode request: {e}")))?;
        let signed = self.signed_request(Self::CREATE_SPEECH_PATH, &body);

        debug!(
            voice = %self.voice_name,
            codec = %codec,
            text_len = text.len(),
            "Requesting speech synthesis"
        );

        let response = self.transport.post(&signed.endpoint, &signed.headers, body).await?;
        Self::audio_from_response(response)
    }

    /// Pull the audio payload out of a `/CreateSpeech` response. A body that
    /// begins with `{` is a JSON error envelope from the service -- whatever
    /// the HTTP status says -- and is never treated as audio.
    fn audio_from_response(response: TransportResponse) -> Result<Vec<u8>> {
        if response.body.first() == Some(&b'{') {
            error!(status = response.status, "Service returned an error envelope");
            return Err(IvonaError::service(response.status, &response.body));
        }
        if !success(response.status) {
            error!(status = response.status, "Speech synthesis rejected");
            return Err(IvonaError::service(response.status, &response.body));
        }
        debug!(bytes = response.body.len(), "Received synthesized audio");
        Ok(response.body)
    }

    /// Synthesize `text` and write the audio to `path` with the configured
    /// codec, appending the codec extension when missing. Returns the final
    /// path. The written bytes are exactly the service response.
    pub async fn fetch_voice(&self, text: &str, path: impl AsRef<Path>) -> Result<PathBuf> {
        self.fetch_voice_as(text, path.as_ref(), self.codec).await
    }

    /// Synthesize `text` as Ogg Vorbis and write it to `path`
    /// (".ogg" appended when missing), regardless of the configured codec.
    pub async fn fetch_voice_ogg(&self, text: &str, path: impl AsRef<Path>) -> Result<PathBuf> {
        self.fetch_voice_as(text, path.as_ref(), Codec::Ogg).await
    }

    async fn fetch_voice_as(&self, text: &str, path: &Path, codec: Codec) -> Result<PathBuf> {
        let path = ensure_extension(path, codec.extension());
        let audio = self.synthesize_with_codec(text, codec).await?;
        tokio::fs::write(&path, &audio)
            .await
            .map_err(|e| IvonaError::filesystem(&path, e))?;
        debug!(path = %path.display(), bytes = audio.len(), "Wrote synthesized audio");
        Ok(path)
    }

    /// Speak `text` through the injected audio player, blocking until the
    /// sound has finished.
    ///
    /// Playback always uses Ogg Vorbis; the configured codec is overridden
    /// for the duration of the call and restored on every exit path. With
    /// `use_cache`, audio is reused from the speech cache when the same text
    /// was spoken before (see `crate::cache` for the staleness caveat) and
    /// cached after a fresh fetch.
    pub async fn speak(&mut self, text: &str, use_cache: bool) -> Result<()> {
        if self.player.is_none() {
            return Err(IvonaError::PlaybackUnavailable);
        }

        // Scoped codec override: playback needs ogg, but the caller's codec
        // choice must survive this call even when it fails.
        let previous = self.codec;
        self.codec = Codec::Ogg;
        let result = self.speak_with_current_codec(text, use_cache).await;
        self.codec = previous;
        result
    }

    async fn speak_with_current_codec(&self, text: &str, use_cache: bool) -> Result<()> {
        let audio = if use_cache {
            match self.cache.read(text, self.codec).await? {
                Some(bytes) => bytes,
                None => {
                    let bytes = self.synthesize(text).await?;
                    self.cache.write(text, self.codec, &bytes).await?;
                    bytes
                }
            }
        } else {
            self.synthesize(text).await?
        };

        let player = self.player.as_ref().ok_or(IvonaError::PlaybackUnavailable)?;
        debug!(bytes = audio.len(), "Starting playback");
        player.play(&audio)
    }
}

impl fmt::Debug for SpeechClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechClient")
            .field("region", &self.region)
            .field("voice", &self.voice_name)
            .field("language", &self.language)
            .field("gender", &self.gender)
            .field("speech_rate", &self.speech_rate)
            .field("sentence_break_ms", &self.sentence_break_ms)
            .field("paragraph_break_ms", &self.paragraph_break_ms)
            .field("codec", &self.codec)
            .field("cache_dir", &self.cache.dir())
            .finish()
    }
}

/// 2xx check; everything else is a service rejection.
fn success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Append `extension` to `path` unless it already ends with it. Mirrors the
/// historical behavior of appending rather than replacing, so "take.mp3"
/// fetched as ogg becomes "take.mp3.ogg".
fn ensure_extension(path: &Path, extension: &str) -> PathBuf {
    if path.extension().and_then(|e| e.to_str()) == Some(extension) {
        return path.to_path_buf();
    }
    let mut os = path.to_path_buf().into_os_string();
    os.push(".");
    os.push(extension);
    PathBuf::from(os)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SpeechClient {
        SpeechClient::new("AKIDEXAMPLE", "secret").unwrap()
    }

    // -----------------------------------------------------------------------
    // Construction tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_client_defaults() {
        let client = client();
        assert_eq!(client.region(), Region::UsEast);
        assert_eq!(client.voice(), "Brian");
        assert_eq!(client.codec(), Codec::Ogg);
        assert_eq!(client.speech_rate, "medium");
        assert_eq!(client.sentence_break_ms, 400);
        assert_eq!(client.paragraph_break_ms, 650);
        assert!(client.language.is_none());
        assert!(client.gender.is_none());
        assert!(client.player.is_none());
    }

    #[test]
    fn test_new_rejects_empty_credentials() {
        assert!(matches!(
            SpeechClient::new("", "secret").unwrap_err(),
            IvonaError::Configuration(_)
        ));
        assert!(matches!(
            SpeechClient::new("AKID", "").unwrap_err(),
            IvonaError::Configuration(_)
        ));
    }

    // -----------------------------------------------------------------------
    // Builder tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_builder_chaining() {
        let client = client()
            .with_region(Region::EuWest)
            .with_voice("Emma")
            .with_language("en-GB")
            .with_gender("Female")
            .with_speech_rate("slow")
            .with_sentence_break(200)
            .with_paragraph_break(500)
            .with_codec(Codec::Mp3);
        assert_eq!(client.region(), Region::EuWest);
        assert_eq!(client.voice(), "Emma");
        assert_eq!(client.language.as_deref(), Some("en-GB"));
        assert_eq!(client.gender.as_deref(), Some("Female"));
        assert_eq!(client.speech_rate, "slow");
        assert_eq!(client.sentence_break_ms, 200);
        assert_eq!(client.paragraph_break_ms, 500);
        assert_eq!(client.codec(), Codec::Mp3);
    }

    #[test]
    fn test_builder_region_name_fallback() {
        let client = client().with_region_name("somewhere-else");
        assert_eq!(client.region(), Region::UsEast);
    }

    // -----------------------------------------------------------------------
    // Region / host coupling tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_set_region_updates_host_atomically() {
        let mut client = client();
        client.set_region("eu-west");
        assert_eq!(client.region(), Region::EuWest);
        assert_eq!(client.host(), "tts.eu-west-1.ivonacloud.com");
    }

    #[test]
    fn test_set_region_unknown_falls_back_to_us_east() {
        let mut client = client().with_region(Region::EuWest);
        client.set_region("unknown-region");
        assert_eq!(client.host(), "tts.us-east-1.ivonacloud.com");
    }

    // -----------------------------------------------------------------------
    // Codec setter tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_set_codec_accepts_supported() {
        let mut client = client();
        client.set_codec("mp3").unwrap();
        assert_eq!(client.codec(), Codec::Mp3);
        client.set_codec("ogg").unwrap();
        assert_eq!(client.codec(), Codec::Ogg);
    }

    #[test]
    fn test_set_codec_invalid_keeps_previous() {
        let mut client = client();
        client.set_codec("mp3").unwrap();
        let err = client.set_codec("wav").unwrap_err();
        assert!(matches!(err, IvonaError::Configuration(_)));
        assert_eq!(client.codec(), Codec::Mp3);
    }

    // -----------------------------------------------------------------------
    // Request building tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_build_request_snapshots_configuration() {
        let client = client()
            .with_voice("Emma")
            .with_language("en-GB")
            .with_speech_rate("fast")
            .with_codec(Codec::Mp3);
        let request = client.build_request("Hello world");
        assert_eq!(request.input.data, "Hello world");
        assert_eq!(request.input.kind, "text/plain");
        assert_eq!(request.output_format.codec, "MP3");
        assert_eq!(request.parameters.rate, "fast");
        assert_eq!(request.parameters.sentence_break, 400);
        assert_eq!(request.parameters.paragraph_break, 650);
        assert_eq!(request.voice.name, "Emma");
        assert_eq!(request.voice.language.as_deref(), Some("en-GB"));
        assert!(request.voice.gender.is_none());
    }

    #[test]
    fn test_signed_request_targets_regional_host() {
        let client = client().with_region(Region::UsWest);
        let signed = client.signed_request("/CreateSpeech", b"{}");
        assert_eq!(
            signed.endpoint,
            "https://tts.us-west-2.ivonacloud.com/CreateSpeech"
        );
    }

    #[test]
    fn test_debug_omits_credentials() {
        let debug = format!("{:?}", client());
        assert!(debug.contains("Brian"));
        assert!(!debug.contains("AKIDEXAMPLE"));
    }

    // -----------------------------------------------------------------------
    // Response handling tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_audio_from_response_passes_audio_through() {
        let audio = vec![0x4f, 0x67, 0x67, 0x53, 0x00];
        let response = TransportResponse {
            status: 200,
            body: audio.clone(),
        };
        assert_eq!(SpeechClient::audio_from_response(response).unwrap(), audio);
    }

    #[test]
    fn test_audio_from_response_error_envelope_wins_over_status() {
        // A JSON envelope is a service error even under HTTP 200.
        let response = TransportResponse {
            status: 200,
            body: br#"{"message":"throttled"}"#.to_vec(),
        };
        let err = SpeechClient::audio_from_response(response).unwrap_err();
        match err {
            IvonaError::Service { status, body } => {
                assert_eq!(status, 200);
                assert!(body.contains("throttled"));
            }
            other => panic!("expected Service, got {other:?}"),
        }
    }

    #[test]
    fn test_audio_from_response_non_success_status() {
        let response = TransportResponse {
            status: 500,
            body: b"internal error".to_vec(),
        };
        let err = SpeechClient::audio_from_response(response).unwrap_err();
        assert!(matches!(err, IvonaError::Service { status: 500, .. }));
    }

    // -----------------------------------------------------------------------
    // Extension handling tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_ensure_extension_appends_when_missing() {
        assert_eq!(
            ensure_extension(Path::new("greeting"), "ogg"),
            PathBuf::from("greeting.ogg")
        );
    }

    #[test]
    fn test_ensure_extension_keeps_matching() {
        assert_eq!(
            ensure_extension(Path::new("greeting.ogg"), "ogg"),
            PathBuf::from("greeting.ogg")
        );
    }

    #[test]
    fn test_ensure_extension_appends_over_other_extension() {
        assert_eq!(
            ensure_extension(Path::new("take.mp3"), "ogg"),
            PathBuf::from("take.mp3.ogg")
        );
    }
}
