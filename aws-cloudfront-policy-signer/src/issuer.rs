/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::conditions::Conditions;
use crate::error::SigningError;
use crate::key::PrivateKey;
use crate::policy::Policy;
use crate::sign::SignedPolicy;
use crate::transport;
use aws_smithy_async::time::{SharedTimeSource, TimeSource};
use aws_smithy_types::DateTime;
use std::time::Duration;

#[derive(Debug, Clone)]
enum Expiration {
    DateTime(DateTime),
    Duration(Duration),
}

/// Signs CloudFront policies on behalf of one key pair.
///
/// An issuer is immutable once built. It can be cloned or shared across threads
/// and every signing call is independent of every other.
#[derive(Debug, Clone)]
pub struct Issuer {
    private_key: PrivateKey,
    key_pair_id: String,
    base_url: Option<String>,
    time_source: SharedTimeSource,
}

impl Issuer {
    /// Creates an issuer for `key_pair_id` signing with `private_key`.
    ///
    /// The key pair ID is taken as given. Use [`Issuer::builder`] to have an empty ID rejected.
    pub fn new(private_key: PrivateKey, key_pair_id: impl Into<String>) -> Self {
        Self {
            private_key,
            key_pair_id: key_pair_id.into(),
            base_url: None,
            time_source: SharedTimeSource::default(),
        }
    }

    /// Creates a new builder for an issuer.
    pub fn builder() -> IssuerBuilder {
        IssuerBuilder::default()
    }

    /// The CloudFront key pair ID that verifiers use to find the public key.
    pub fn key_pair_id(&self) -> &str {
        &self.key_pair_id
    }

    /// The base URL prepended by [`Issuer::resource`], if one was configured.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Joins `path` onto the configured base URL.
    ///
    /// This is plain concatenation. Without a base URL, `path` is returned as is.
    pub fn resource(&self, path: &str) -> String {
        match &self.base_url {
            Some(base) => format!("{base}{path}"),
            None => path.to_string(),
        }
    }

    /// Builds the canonical policy for `request`.
    pub fn create_policy(&self, request: PolicyRequest) -> Result<Policy, SigningError> {
        let expires_at = request
            .expiration
            .map(|expiration| self.resolve(expiration))
            .transpose()?;

        let conditions = Conditions::builder()
            .set_expires_at(expires_at)
            .set_active_at(request.active_at)
            .set_source_ip(request.source_ip)
            .build()?;

        let resource = request.resource.unwrap_or_default();
        let policy = Policy::new(&resource, &conditions)?;
        tracing::debug!(
            resource = %resource,
            canned = policy.is_canned(),
            expires_at = conditions.expires_at(),
            "created CloudFront policy"
        );
        Ok(policy)
    }

    /// Signs `policy` and returns it together with its signature and this issuer's key pair ID.
    pub fn sign(&self, policy: &Policy) -> Result<SignedPolicy, SigningError> {
        let signature = self.private_key.sign(policy.as_bytes())?;
        tracing::debug!(key_pair_id = %self.key_pair_id, "signed CloudFront policy");
        Ok(SignedPolicy::new(
            policy.encode(),
            transport::to_url_safe(signature),
            self.key_pair_id.clone(),
        ))
    }

    /// Builds and signs the policy for `request` in one step.
    pub fn sign_policy(&self, request: PolicyRequest) -> Result<SignedPolicy, SigningError> {
        let policy = self.create_policy(request)?;
        self.sign(&policy)
    }

    fn resolve(&self, expiration: Expiration) -> Result<DateTime, SigningError> {
        match expiration {
            Expiration::DateTime(time) => Ok(time),
            Expiration::Duration(duration) => self
                .time_source
                .now()
                .checked_add(duration)
                .map(DateTime::from)
                .ok_or_else(|| SigningError::invalid_input("expires_in is too far in the future")),
        }
    }
}

/// Builder for [`Issuer`].
#[derive(Debug, Default)]
pub struct IssuerBuilder {
    private_key: Option<PrivateKey>,
    key_pair_id: Option<String>,
    base_url: Option<String>,
    time_source: Option<SharedTimeSource>,
}

impl IssuerBuilder {
    /// Sets the private key for signing.
    pub fn private_key(mut self, key: PrivateKey) -> Self {
        self.private_key = Some(key);
        self
    }

    /// Sets the CloudFront key pair ID.
    pub fn key_pair_id(mut self, id: impl Into<String>) -> Self {
        self.key_pair_id = Some(id.into());
        self
    }

    /// Sets a base URL, such as `https://d111111abcdef8.cloudfront.net`, for [`Issuer::resource`].
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Overrides the clock used to resolve [`PolicyRequestBuilder::expires_in`].
    pub fn time_source(mut self, time_source: impl TimeSource + 'static) -> Self {
        self.time_source = Some(SharedTimeSource::new(time_source));
        self
    }

    /// Builds the issuer.
    pub fn build(self) -> Result<Issuer, SigningError> {
        let private_key = self
            .private_key
            .ok_or_else(|| SigningError::invalid_input("private_key is required"))?;

        let key_pair_id = self
            .key_pair_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| SigningError::invalid_input("key_pair_id is required"))?;

        Ok(Issuer {
            private_key,
            key_pair_id,
            base_url: self.base_url,
            time_source: self.time_source.unwrap_or_default(),
        })
    }
}

/// The resource and access conditions to put in a policy.
#[derive(Debug, Clone)]
pub struct PolicyRequest {
    resource: Option<String>,
    expiration: Option<Expiration>,
    active_at: Option<DateTime>,
    source_ip: Option<String>,
}

impl PolicyRequest {
    /// Creates a new builder for a policy request.
    pub fn builder() -> PolicyRequestBuilder {
        PolicyRequestBuilder::default()
    }
}

/// Builder for [`PolicyRequest`].
///
/// Validation happens when the request is turned into a [`Policy`], not here.
#[derive(Debug, Default)]
pub struct PolicyRequestBuilder {
    resource: Option<String>,
    expiration: Option<Expiration>,
    active_at: Option<DateTime>,
    source_ip: Option<String>,
}

impl PolicyRequestBuilder {
    /// Sets the resource the policy grants access to. May contain `*` and `?` wildcards.
    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Sets an absolute expiration time.
    pub fn expires_at(mut self, time: impl Into<DateTime>) -> Self {
        self.expiration = Some(Expiration::DateTime(time.into()));
        self
    }

    /// Sets an expiration relative to the issuer's clock at signing time.
    pub fn expires_in(mut self, duration: Duration) -> Self {
        self.expiration = Some(Expiration::Duration(duration));
        self
    }

    /// Sets an activation time (not-before date).
    pub fn active_at(mut self, time: impl Into<DateTime>) -> Self {
        self.active_at = Some(time.into());
        self
    }

    /// Restricts access to a source IP address or CIDR range.
    pub fn source_ip(mut self, ip: impl Into<String>) -> Self {
        self.source_ip = Some(ip.into());
        self
    }

    /// Builds the request.
    pub fn build(self) -> PolicyRequest {
        PolicyRequest {
            resource: self.resource,
            expiration: self.expiration,
            active_at: self.active_at,
            source_ip: self.source_ip,
        }
    }
}
