// Copyright (c) 2024-2026, Daily
// SPDX-License-Identifier: BSD-2-Clause

//! Common re-exports for convenient use of the Ivona client.
//!
//! ```
//! use ivona::prelude::*;
//! ```

pub use std::sync::Arc;

pub use crate::auth::Credentials;
pub use crate::cache::SpeechCache;
pub use crate::client::SpeechClient;
pub use crate::error::{IvonaError, Result};
pub use crate::playback::AudioPlayer;
pub use crate::region::Region;
pub use crate::transport::{ReqwestTransport, Transport, TransportResponse};
pub use crate::voice::{Codec, VoiceDescriptor};

#[cfg(feature = "playback")]
pub use crate::playback::RodioPlayer;
