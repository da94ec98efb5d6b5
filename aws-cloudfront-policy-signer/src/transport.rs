/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! CloudFront transport encoding.
//!
//! CloudFront expects standard, padded base64 with three characters swapped
//! for ones that survive a URL query string untouched: `+` → `-`, `=` → `_`
//! and `/` → `~`. This is not the RFC 4648 URL-safe alphabet (which maps `/`
//! to `_` and drops padding) and the two must not be mixed.

use crate::error::SigningError;
use base64_simd::STANDARD;

/// Encodes `data` with the CloudFront transport alphabet.
pub fn to_url_safe(data: impl AsRef<[u8]>) -> String {
    STANDARD
        .encode_to_string(data.as_ref())
        .chars()
        .map(|c| match c {
            '+' => '-',
            '=' => '_',
            '/' => '~',
            other => other,
        })
        .collect()
}

/// Reverses [`to_url_safe`].
///
/// Fails when the input, once mapped back to the standard alphabet, is not valid base64.
pub fn from_url_safe(encoded: impl AsRef<str>) -> Result<Vec<u8>, SigningError> {
    let standard: String = encoded
        .as_ref()
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '=',
            '~' => '/',
            other => other,
        })
        .collect();
    STANDARD
        .decode_to_vec(standard.as_bytes())
        .map_err(|_| SigningError::invalid_input("not a valid CloudFront base64 string"))
}
