//! Stable identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a split node or a leaf slot.
///
/// Unassigned ids are modelled as `Option<NodeId>::None`; the legacy `-1`
/// sentinel is accepted through [`NodeId::from_legacy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Decode a legacy signed id where any negative value means "unassigned".
    #[must_use]
    pub fn from_legacy(raw: i64) -> Option<Self> {
        u64::try_from(raw).ok().map(Self)
    }

    /// Get the raw numeric value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Return the next ID, or an error on overflow.
    pub fn checked_next(self) -> Result<Self, NodeIdError> {
        let Some(next) = self.0.checked_add(1) else {
            return Err(NodeIdError::Overflow { current: self });
        };
        Ok(Self(next))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Deterministic allocator for node ids the framework assigns itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeIdAllocator {
    next: NodeId,
}

impl NodeIdAllocator {
    /// Start allocating from a known ID.
    #[must_use]
    pub const fn with_next(next: NodeId) -> Self {
        Self { next }
    }

    /// Start allocating after the largest id already in use.
    pub fn after<I>(used: I) -> Result<Self, NodeIdError>
    where
        I: IntoIterator<Item = NodeId>,
    {
        match used.into_iter().max() {
            Some(max) => Ok(Self::with_next(max.checked_next()?)),
            None => Ok(Self::default()),
        }
    }

    /// Peek at the next ID without consuming.
    #[must_use]
    pub const fn peek(&self) -> NodeId {
        self.next
    }

    /// Allocate the next ID and advance.
    pub fn allocate(&mut self) -> Result<NodeId, NodeIdError> {
        let current = self.next;
        self.next = self.next.checked_next()?;
        Ok(current)
    }
}

impl Default for NodeIdAllocator {
    fn default() -> Self {
        Self { next: NodeId(0) }
    }
}

/// Errors from id allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeIdError {
    Overflow { current: NodeId },
}

impl fmt::Display for NodeIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overflow { current } => {
                write!(f, "node id space exhausted after {current}")
            }
        }
    }
}

impl std::error::Error for NodeIdError {}

/// Opaque stable token for a dockable that may not exist at restore time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Placeholder(String);

impl Placeholder {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Empty tokens can never match a registered dockable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Placeholder {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}
