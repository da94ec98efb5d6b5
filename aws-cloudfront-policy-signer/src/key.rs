/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::error::SigningError;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Sign, RsaPrivateKey};
use sha1::{Digest, Sha1};
use std::fmt;

/// RSA private key used to sign CloudFront policies.
#[derive(Clone)]
pub struct PrivateKey {
    inner: RsaPrivateKey,
}

impl PrivateKey {
    /// Loads a private key from PEM-encoded bytes.
    ///
    /// Accepts RSA keys in PKCS#1 (`BEGIN RSA PRIVATE KEY`) or PKCS#8 (`BEGIN PRIVATE KEY`) form.
    pub fn from_pem(bytes: &[u8]) -> Result<Self, SigningError> {
        let pem_str = std::str::from_utf8(bytes).map_err(SigningError::invalid_key)?;

        let inner = if pem_str.contains("BEGIN RSA PRIVATE KEY") {
            RsaPrivateKey::from_pkcs1_pem(pem_str).map_err(SigningError::invalid_key)?
        } else if pem_str.contains("BEGIN PRIVATE KEY") {
            RsaPrivateKey::from_pkcs8_pem(pem_str).map_err(SigningError::invalid_key)?
        } else {
            return Err(SigningError::invalid_key(
                "unsupported key format, expected an RSA key in PKCS#1 or PKCS#8 PEM",
            ));
        };

        Ok(Self { inner })
    }

    /// Signs `message` with RSA PKCS#1 v1.5 over its SHA-1 digest.
    ///
    /// CloudFront only verifies SHA-1 signatures, so the digest cannot be swapped out.
    pub(crate) fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SigningError> {
        let digest = Sha1::digest(message);
        self.inner
            .sign(Pkcs1v15Sign::new::<Sha1>(), &digest)
            .map_err(SigningError::signing_failure)
    }

    #[cfg(test)]
    pub(crate) fn public_key(&self) -> rsa::RsaPublicKey {
        self.inner.to_public_key()
    }
}

impl From<RsaPrivateKey> for PrivateKey {
    fn from(inner: RsaPrivateKey) -> Self {
        Self { inner }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("bits", &(self.inner.size() * 8))
            .finish_non_exhaustive()
    }
}
