//! Error types.
//!
//! [`LocationError`] is raised while composing a chain and always indicates a
//! caller bug. [`DecodeError`] is raised while turning persisted data back
//! into a chain; the persistence layer decides whether to skip the affected
//! dockable or abort the whole restore.

use std::fmt;

use dockloc_core::FractionError;

use crate::property::Encoding;
use crate::root::{Capabilities, RootKind};

/// Invalid argument while building a location chain.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationError {
    /// A fraction or rectangle field is NaN or outside `[0, 1]`.
    Fraction {
        operation: &'static str,
        source: FractionError,
    },
    /// The chain head does not offer this operation.
    Unsupported {
        operation: &'static str,
        available: Capabilities,
    },
    /// `leaf` was called on a head that is not a split step.
    LeafWithoutSplit,
    /// A root kind that must be bound to a container was left unnamed.
    MissingOwner { kind: RootKind },
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fraction { operation, source } => {
                write!(f, "invalid argument to `{operation}`: {source}")
            }
            Self::Unsupported {
                operation,
                available,
            } => write!(
                f,
                "`{operation}` is not available on this location (accepts {available:?})"
            ),
            Self::LeafWithoutSplit => {
                write!(f, "`leaf` must directly follow a directional split")
            }
            Self::MissingOwner { kind } => write!(f, "{kind} root requires an owner id"),
        }
    }
}

impl std::error::Error for LocationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Fraction { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Malformed persisted location data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The encoding cannot be placed on the area it is expanded against.
    IncompatibleArea {
        encoding: Encoding,
        available: Capabilities,
    },
    /// Successor nesting exceeds the configured limit.
    SuccessorTooDeep { depth: usize, limit: usize },
    /// Envelope schema version is not supported.
    UnsupportedVersion { found: u16, expected: u16 },
    /// A placeholder token is empty.
    EmptyPlaceholder,
    /// The catalog has no root for the persisted root reference.
    UnknownRoot {
        kind: RootKind,
        owner: Option<String>,
    },
    /// Expansion options are unusable.
    InvalidOptions { reason: &'static str },
    /// The payload is not valid JSON or carries an unknown encoding tag.
    Json(String),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncompatibleArea {
                encoding,
                available,
            } => write!(
                f,
                "{encoding} property cannot be expanded here (area accepts {available:?})"
            ),
            Self::SuccessorTooDeep { depth, limit } => write!(
                f,
                "successor chain depth {depth} exceeds limit {limit}"
            ),
            Self::UnsupportedVersion { found, expected } => write!(
                f,
                "unsupported location schema version {found} (expected {expected})"
            ),
            Self::EmptyPlaceholder => write!(f, "placeholder token must not be empty"),
            Self::UnknownRoot { kind, owner } => match owner {
                Some(owner) => write!(f, "no {kind} root registered for owner {owner:?}"),
                None => write!(f, "no {kind} root registered"),
            },
            Self::InvalidOptions { reason } => write!(f, "invalid expand options: {reason}"),
            Self::Json(message) => write!(f, "malformed location payload: {message}"),
        }
    }
}

impl std::error::Error for DecodeError {}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
