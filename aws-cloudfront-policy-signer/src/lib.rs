/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/* Automatically managed default lints */
#![cfg_attr(docsrs, feature(doc_cfg))]
/* End of automatically managed default lints */
//! Signed access policies for CloudFront URLs and cookies.
//!
//! An [`Issuer`] holds an RSA private key and the key pair ID CloudFront uses to
//! look up the matching public key. For each request it builds a canonical JSON
//! policy (resource, expiry, optional activation time, optional source IP),
//! signs it with RSA-SHA1, and hands back the encoded policy, the encoded
//! signature, and the key pair ID. Those three values are the complete set of
//! query parameters a CloudFront edge needs to authorize the request.
//!
//! ```no_run
//! use aws_cloudfront_policy_signer::{Issuer, PolicyRequest, PrivateKey};
//! use std::time::Duration;
//!
//! # fn example(pem: &[u8]) -> Result<(), aws_cloudfront_policy_signer::error::SigningError> {
//! let issuer = Issuer::builder()
//!     .private_key(PrivateKey::from_pem(pem)?)
//!     .key_pair_id("APKAEXAMPLE")
//!     .base_url("https://d111111abcdef8.cloudfront.net")
//!     .build()?;
//!
//! let resource = issuer.resource("/videos/intro.mp4");
//! let signed = issuer.sign_policy(
//!     PolicyRequest::builder()
//!         .resource(&resource)
//!         .expires_in(Duration::from_secs(3600))
//!         .source_ip("192.0.2.0/24")
//!         .build(),
//! )?;
//!
//! println!("{}", signed.to_url(&resource));
//! # Ok(())
//! # }
//! ```

#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

mod conditions;
/// Error types for policy construction and signing.
pub mod error;
mod issuer;
mod key;
mod policy;
mod sign;
pub mod transport;

pub use conditions::{Conditions, ConditionsBuilder};
pub use issuer::{Issuer, IssuerBuilder, PolicyRequest, PolicyRequestBuilder};
pub use key::PrivateKey;
pub use policy::Policy;
pub use sign::{SignedCookies, SignedPolicy, SignedUrl};
