// Copyright (c) 2024-2026, Daily
// SPDX-License-Identifier: BSD-2-Clause

//! Ivona Speech Cloud regions.
//!
//! The service runs in three regions. Each region maps to a canonical region
//! identifier, and the service host is derived from that identifier -- the
//! host is never stored independently, so region and host can never disagree.

use std::fmt;

/// Domain suffix shared by every regional endpoint.
const CLOUD_DOMAIN: &str = "ivonacloud.com";

/// A region hosting the Ivona Speech Cloud API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Region {
    /// US East (N. Virginia), `us-east-1`. The default.
    #[default]
    UsEast,
    /// US West (Oregon), `us-west-2`.
    UsWest,
    /// EU West (Dublin), `eu-west-1`.
    EuWest,
}

impl Region {
    /// Resolve a short region name ("us-east", "us-west", "eu-west").
    ///
    /// Unrecognized names fall back to [`Region::UsEast`]. This is a
    /// documented fallback, not an error.
    pub fn from_name(name: &str) -> Region {
        match name {
            "us-east" => Region::UsEast,
            "us-west" => Region::UsWest,
            "eu-west" => Region::EuWest,
            _ => Region::UsEast,
        }
    }

    /// The canonical region identifier used in hosts and credential scopes.
    pub fn id(&self) -> &'static str {
        match self {
            Region::UsEast => "us-east-1",
            Region::UsWest => "us-west-2",
            Region::EuWest => "eu-west-1",
        }
    }

    /// The TTS service host for this region.
    pub fn host(&self) -> String {
        format!("tts.{}.{}", self.id(), CLOUD_DOMAIN)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}
