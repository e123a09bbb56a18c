// Copyright (c) 2024-2026, Daily
// SPDX-License-Identifier: BSD-2-Clause

//! Ivona - client for the Ivona Speech Cloud text-to-speech API.
//!
//! The crate signs each request with the service's chained-HMAC (Signature
//! V4 style) authentication scheme, retrieves synthesized audio as Ogg
//! Vorbis or MP3, and can cache and play the result locally. Transport and
//! playback are injected collaborators, so the core works against any HTTP
//! stack and without an audio device.
//!
//! ```no_run
//! use ivona::prelude::*;
//!
//! # async fn example() -> ivona::error::Result<()> {
//! let client = SpeechClient::new("ACCESS_KEY", "SECRET_KEY")?
//!     .with_region_name("eu-west")
//!     .with_voice("Emma");
//!
//! for voice in client.list_voices().await? {
//!     println!("{}", voice.name);
//! }
//! client.fetch_voice_ogg("Hello, world!", "hello").await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod cache;
pub mod client;
pub mod error;
pub mod playback;
pub mod prelude;
pub mod region;
pub mod transport;
pub mod voice;

pub use client::SpeechClient;
pub use error::{IvonaError, Result};
