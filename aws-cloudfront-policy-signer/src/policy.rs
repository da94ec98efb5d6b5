/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::conditions::Conditions;
use crate::error::SigningError;
use crate::transport;
use serde::Serialize;

// Field declaration order is the wire order. Optional conditions must be
// omitted rather than serialized as `null`.

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct PolicyDocument<'a> {
    statement: [Statement<'a>; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Statement<'a> {
    resource: &'a str,
    condition: Condition<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Condition<'a> {
    date_less_than: EpochTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_greater_than: Option<EpochTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ip_address: Option<SourceIp<'a>>,
}

#[derive(Serialize)]
struct EpochTime {
    #[serde(rename = "AWS:EpochTime")]
    epoch_time: i64,
}

#[derive(Serialize)]
struct SourceIp<'a> {
    #[serde(rename = "AWS:SourceIp")]
    source_ip: &'a str,
}

/// A serialized CloudFront policy.
///
/// Holds the canonical JSON bytes that get signed. Two policies built from the
/// same resource and conditions are byte-for-byte identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    canonical: String,
    canned: bool,
}

impl Policy {
    /// Serializes a single-statement policy for `resource` under `conditions`.
    pub fn new(resource: impl AsRef<str>, conditions: &Conditions) -> Result<Self, SigningError> {
        let resource = resource.as_ref();
        if resource.is_empty() {
            return Err(SigningError::invalid_input("resource must not be empty"));
        }

        let document = PolicyDocument {
            statement: [Statement {
                resource,
                condition: Condition {
                    date_less_than: EpochTime {
                        epoch_time: conditions.expires_at,
                    },
                    date_greater_than: conditions
                        .active_at
                        .map(|epoch_time| EpochTime { epoch_time }),
                    ip_address: conditions
                        .source_ip
                        .as_deref()
                        .map(|source_ip| SourceIp { source_ip }),
                },
            }],
        };

        let canonical = serde_json::to_string(&document).map_err(SigningError::encoding_failure)?;
        Ok(Self {
            canonical,
            canned: conditions.is_canned(),
        })
    }

    /// The canonical JSON bytes. These are what gets signed.
    pub fn as_bytes(&self) -> &[u8] {
        self.canonical.as_bytes()
    }

    /// The canonical JSON document.
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// The policy in CloudFront transport encoding, ready for a `Policy` query parameter.
    pub fn encode(&self) -> String {
        transport::to_url_safe(self.as_bytes())
    }

    /// True when the policy carries no activation or IP condition.
    pub fn is_canned(&self) -> bool {
        self.canned
    }
}
