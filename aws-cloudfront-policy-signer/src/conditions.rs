/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::error::SigningError;
use aws_smithy_types::DateTime;

const NANOS_PER_MILLI: u32 = 1_000_000;

/// Access conditions attached to a single policy statement.
///
/// Times are whole-second Unix epoch values, which is the only resolution
/// CloudFront understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conditions {
    pub(crate) expires_at: i64,
    pub(crate) active_at: Option<i64>,
    pub(crate) source_ip: Option<String>,
}

impl Conditions {
    /// Creates a new builder for constructing access conditions.
    pub fn builder() -> ConditionsBuilder {
        ConditionsBuilder::default()
    }

    /// Epoch seconds after which access is denied (`DateLessThan`).
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    /// Epoch seconds before which access is denied (`DateGreaterThan`), if any.
    pub fn active_at(&self) -> Option<i64> {
        self.active_at
    }

    /// The source IP address or CIDR range (`IpAddress`), if any.
    pub fn source_ip(&self) -> Option<&str> {
        self.source_ip.as_deref()
    }

    /// True when only the expiry is set, i.e. the policy could be expressed as a canned policy.
    pub fn is_canned(&self) -> bool {
        self.active_at.is_none() && self.source_ip.is_none()
    }
}

/// Builder for [`Conditions`].
#[derive(Debug, Default)]
pub struct ConditionsBuilder {
    expires_at: Option<DateTime>,
    active_at: Option<DateTime>,
    source_ip: Option<String>,
}

impl ConditionsBuilder {
    /// Sets the expiry instant. Required.
    pub fn expires_at(mut self, time: impl Into<DateTime>) -> Self {
        self.expires_at = Some(time.into());
        self
    }

    /// Sets the activation (not-before) instant.
    pub fn active_at(mut self, time: impl Into<DateTime>) -> Self {
        self.active_at = Some(time.into());
        self
    }

    /// Restricts access to a source IP address or CIDR range.
    ///
    /// The value is embedded verbatim; it is not parsed or validated.
    pub fn source_ip(mut self, ip: impl Into<String>) -> Self {
        self.source_ip = Some(ip.into());
        self
    }

    pub(crate) fn set_expires_at(mut self, time: Option<DateTime>) -> Self {
        self.expires_at = time;
        self
    }

    pub(crate) fn set_active_at(mut self, time: Option<DateTime>) -> Self {
        self.active_at = time;
        self
    }

    pub(crate) fn set_source_ip(mut self, ip: Option<String>) -> Self {
        self.source_ip = ip;
        self
    }

    /// Builds the conditions.
    ///
    /// Fails with [`ErrorKind::MissingRequiredParameter`](crate::error::ErrorKind::MissingRequiredParameter)
    /// when the expiry is unset or zero, and with
    /// [`ErrorKind::InvalidInput`](crate::error::ErrorKind::InvalidInput) when the activation
    /// instant is after the expiry. The two instants are compared at full precision,
    /// before either is truncated to whole seconds.
    pub fn build(self) -> Result<Conditions, SigningError> {
        let expiry = self
            .expires_at
            .filter(|time| epoch_seconds(*time) != 0)
            .ok_or_else(|| SigningError::missing_required_parameter("expires_at"))?;

        if let Some(active) = self.active_at {
            if instant(active) > instant(expiry) {
                return Err(SigningError::invalid_input(
                    "active_at must not be after expires_at",
                ));
            }
        }

        Ok(Conditions {
            expires_at: epoch_seconds(expiry),
            active_at: self.active_at.map(epoch_seconds),
            source_ip: self.source_ip,
        })
    }
}

fn instant(time: DateTime) -> (i64, u32) {
    (time.secs(), time.subsec_nanos())
}

/// Truncates `time` to whole milliseconds, then to whole epoch seconds.
///
/// Both steps truncate toward negative infinity; nothing is rounded.
fn epoch_seconds(time: DateTime) -> i64 {
    let millis_only = time.subsec_nanos() / NANOS_PER_MILLI * NANOS_PER_MILLI;
    DateTime::from_secs_and_nanos(time.secs(), millis_only).secs()
}
