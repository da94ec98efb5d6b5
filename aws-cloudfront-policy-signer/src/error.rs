/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

/// The category of a [`SigningError`].
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required parameter (the expiry) was not provided or was zero.
    MissingRequiredParameter,
    /// An input value was rejected before any encoding or signing took place.
    InvalidInput,
    /// The private key could not be parsed.
    InvalidKey,
    /// The policy document could not be serialized.
    EncodingFailure,
    /// The cryptographic signing operation failed.
    SigningFailure,
}

/// Error type for policy construction and signing.
#[derive(Debug)]
pub struct SigningError {
    kind: ErrorKind,
    source: Option<Box<dyn StdError + Send + Sync>>,
    message: Option<Cow<'static, str>>,
}

impl SigningError {
    pub(crate) fn new(
        kind: ErrorKind,
        source: Option<Box<dyn StdError + Send + Sync>>,
        message: Option<Cow<'static, str>>,
    ) -> Self {
        Self {
            kind,
            source,
            message,
        }
    }

    pub(crate) fn missing_required_parameter(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::MissingRequiredParameter, None, Some(name.into()))
    }

    pub(crate) fn invalid_input(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidInput, None, Some(message.into()))
    }

    pub(crate) fn invalid_key(source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::new(ErrorKind::InvalidKey, Some(source.into()), None)
    }

    pub(crate) fn encoding_failure(source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::new(ErrorKind::EncodingFailure, Some(source.into()), None)
    }

    pub(crate) fn signing_failure(source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::new(ErrorKind::SigningFailure, Some(source.into()), None)
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for SigningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::MissingRequiredParameter => write!(f, "missing required parameter")?,
            ErrorKind::InvalidInput => write!(f, "invalid input")?,
            ErrorKind::InvalidKey => write!(f, "invalid private key")?,
            ErrorKind::EncodingFailure => write!(f, "failed to encode policy")?,
            ErrorKind::SigningFailure => write!(f, "signing operation failed")?,
        }
        if let Some(ref msg) = self.message {
            write!(f, ": {msg}")?;
        }
        Ok(())
    }
}

impl StdError for SigningError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as _)
    }
}

impl From<ErrorKind> for SigningError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind, None, None)
    }
}
