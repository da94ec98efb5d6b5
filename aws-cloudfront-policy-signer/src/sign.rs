/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::borrow::Cow;
use std::fmt;

const PARAM_POLICY: &str = "Policy";
const PARAM_SIGNATURE: &str = "Signature";
const PARAM_KEY_PAIR_ID: &str = "Key-Pair-Id";

const COOKIE_POLICY: &str = "CloudFront-Policy";
const COOKIE_SIGNATURE: &str = "CloudFront-Signature";
const COOKIE_KEY_PAIR_ID: &str = "CloudFront-Key-Pair-Id";

/// A signed policy: everything a verifier needs, already in transport encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPolicy {
    policy: String,
    signature: String,
    key_pair_id: String,
}

impl SignedPolicy {
    pub(crate) fn new(policy: String, signature: String, key_pair_id: String) -> Self {
        Self {
            policy,
            signature,
            key_pair_id,
        }
    }

    /// The encoded policy document.
    pub fn policy(&self) -> &str {
        &self.policy
    }

    /// The encoded RSA-SHA1 signature over the policy document.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The key pair ID, passed through from the issuer.
    pub fn key_pair_id(&self) -> &str {
        &self.key_pair_id
    }

    /// The three query parameters to append to the protected resource's URL.
    pub fn query_params(&self) -> [(&'static str, &str); 3] {
        [
            (PARAM_POLICY, self.policy.as_str()),
            (PARAM_SIGNATURE, self.signature.as_str()),
            (PARAM_KEY_PAIR_ID, self.key_pair_id.as_str()),
        ]
    }

    /// Appends the query parameters to `resource_url`.
    ///
    /// All three values only ever contain URL-safe characters, so no percent-encoding is applied.
    pub fn to_url(&self, resource_url: &str) -> SignedUrl {
        let separator = if resource_url.contains('?') { "&" } else { "?" };
        let query = self
            .query_params()
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        SignedUrl::new(format!("{resource_url}{separator}{query}"))
    }

    /// The signed policy as CloudFront cookies.
    pub fn to_cookies(&self) -> SignedCookies {
        SignedCookies::new(vec![
            (Cow::Borrowed(COOKIE_POLICY), self.policy.clone()),
            (Cow::Borrowed(COOKIE_SIGNATURE), self.signature.clone()),
            (Cow::Borrowed(COOKIE_KEY_PAIR_ID), self.key_pair_id.clone()),
        ])
    }
}

/// A signed CloudFront URL.
#[derive(Debug, Clone)]
pub struct SignedUrl {
    url: String,
}

impl SignedUrl {
    pub(crate) fn new(url: String) -> Self {
        Self { url }
    }

    /// Returns the complete signed URL as a string.
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for SignedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

impl AsRef<str> for SignedUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

/// Signed cookies for CloudFront.
#[derive(Debug, Clone)]
pub struct SignedCookies {
    cookies: Vec<(Cow<'static, str>, String)>,
}

impl SignedCookies {
    pub(crate) fn new(cookies: Vec<(Cow<'static, str>, String)>) -> Self {
        Self { cookies }
    }

    /// Returns all cookies as name-value pairs.
    pub fn cookies(&self) -> &[(Cow<'static, str>, String)] {
        &self.cookies
    }

    /// Gets a specific cookie value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns an iterator over cookies.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cookies.iter().map(|(n, v)| (n.as_ref(), v.as_str()))
    }
}
