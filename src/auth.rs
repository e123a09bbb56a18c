// Copyright (c) 2024-2026, Daily
//
// SPDX-License-Identifier: BSD-2-Clause

//! Request signing for the Ivona Speech Cloud API.
//!
//! The service authenticates requests with the AWS Signature Version 4
//! scheme: a canonical serialization of the request is hashed, bound to a
//! date/region/service credential scope, and signed with a key derived from
//! the secret key by chained HMAC-SHA256 operations.
//!
//! Signing is a pure function of (credentials, timestamp, request fields);
//! nothing is cached between calls. Callers capture the timestamp at send
//! time -- the service only accepts signatures whose timestamp is within a
//! few minutes of the actual request.
//!
//! # Dependencies
//!
//! Uses `sha2`, `hmac`, and `hex` for the cryptography and `chrono` for the
//! UTC date stamps.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::error::{IvonaError, Result};

type HmacSha256 = Hmac<Sha256>;

/// The fixed list of headers covered by the signature, in canonical order.
const SIGNED_HEADERS: &str = "content-type;host;x-amz-content-sha256;x-amz-date";

/// Signature scheme identifier.
const ALGORITHM: &str = "AWS4-HMAC-SHA256";

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// API credentials, immutable for the lifetime of a client.
#[derive(Clone)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
}

impl Credentials {
    /// Create credentials, rejecting empty keys up front so that a
    /// misconfigured client fails at construction rather than on the first
    /// request.
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
        let access_key = access_key.into();
        let secret_key = secret_key.into();
        if access_key.is_empty() {
            return Err(IvonaError::Configuration(
                "access key must not be empty".to_string(),
            ));
        }
        if secret_key.is_empty() {
            return Err(IvonaError::Configuration(
                "secret key must not be empty".to_string(),
            ));
        }
        Ok(Self {
            access_key,
            secret_key,
        })
    }

    /// The public access key, as it appears in the Authorization header.
    pub fn access_key(&self) -> &str {
        &self.access_key
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Signing
// ---------------------------------------------------------------------------

/// The request fields covered by a signature.
pub struct SignRequestParams<'a> {
    /// HTTP method, e.g. "POST".
    pub method: &'a str,
    /// Service name bound into the credential scope, e.g. "tts".
    pub service: &'a str,
    /// Content type sent with the request body.
    pub content_type: &'a str,
    /// URI path, e.g. "/CreateSpeech".
    pub uri_path: &'a str,
    /// Canonical query string ("" when there is none).
    pub query_string: &'a str,
    /// Raw request body.
    pub body: &'a [u8],
    /// Canonical region identifier, e.g. "us-east-1".
    pub region: &'a str,
    /// Service host the request is sent to.
    pub host: &'a str,
}

/// A signed request descriptor: where to send it and which headers to attach.
///
/// The body is not retained here; the caller hands the same bytes it signed
/// to the transport.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    /// Full endpoint URL (`https://<host><uri_path>`).
    pub endpoint: String,
    /// Complete header set including Authorization.
    pub headers: Vec<(String, String)>,
}

/// Sign a request at the given instant.
///
/// Deterministic: identical inputs at the same second produce an identical
/// Authorization header. Malformed inputs (an empty host) are programming
/// errors, not recoverable failures.
pub fn sign_request(
    credentials: &Credentials,
    params: &SignRequestParams<'_>,
    timestamp: DateTime<Utc>,
) -> SignedRequest {
    debug_assert!(!params.host.is_empty(), "signing requires a host");

    let amz_date = timestamp.format("%Y%m%dT%H%M%SZ").to_string();
    let date_stamp = timestamp.format("%Y%m%d").to_string();

    // Step 1: canonical request. The header list is fixed; it is already in
    // canonical (lexicographic) order.
    let payload_hash = hex::encode(Sha256::digest(params.body));
    let canonical_headers = format!(
        "content-type:{}\nhost:{}\nx-amz-content-sha256:{}\nx-amz-date:{}\n",
        params.content_type, params.host, payload_hash, amz_date
    );
    let canonical_request = format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        params.method,
        params.uri_path,
        params.query_string,
        canonical_headers,
        SIGNED_HEADERS,
        payload_hash
    );

    // Step 2: string to sign, binding the request to a credential scope.
    let credential_scope = format!(
        "{}/{}/{}/aws4_request",
        date_stamp, params.region, params.service
    );
    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        amz_date,
        credential_scope,
        hex::encode(Sha256::digest(canonical_request.as_bytes()))
    );

    // Step 3: signature from the scoped signing key.
    let signing_key = derive_signing_key(
        &credentials.secret_key,
        &date_stamp,
        params.region,
        params.service,
    );
    let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes()));

    // Step 4: authorization header and the final header set.
    let authorization = format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        ALGORITHM, credentials.access_key, credential_scope, SIGNED_HEADERS, signature
    );

    let headers = vec![
        ("Host".to_string(), params.host.to_string()),
        ("Content-Type".to_string(), params.content_type.to_string()),
        ("X-Amz-Date".to_string(), amz_date),
        ("Authorization".to_string(), authorization),
        ("X-Amz-Content-Sha256".to_string(), payload_hash),
        ("Content-Length".to_string(), params.body.len().to_string()),
    ];

    SignedRequest {
        endpoint: format!("https://{}{}", params.host, params.uri_path),
        headers,
    }
}

/// Derive the scoped signing key by chaining HMAC-SHA256:
/// secret → date → region → service → "aws4_request".
fn derive_signing_key(secret: &str, date_stamp: &str, region: &str, service: &str) -> Vec<u8> {
    let k_date = hmac_sha256(format!("AWS4{secret}").as_bytes(), date_stamp.as_bytes());
    let k_region = hmac_sha256(&k_date, region.as_bytes());
    let k_service = hmac_sha256(&k_region, service.as_bytes());
    hmac_sha256(&k_service, b"aws4_request")
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
