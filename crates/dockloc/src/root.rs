//! Root areas and the capabilities they grant.
//!
//! Every location chain starts at a [`RootArea`]. The root's [`AreaKind`]
//! decides which builder operations are legal on the bare root; every step
//! appended after it addresses a nested slot, which always accepts the
//! split-tree operations.

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;
use dockloc_core::Side;
use serde::{Deserialize, Serialize};

use crate::error::LocationError;

/// The top-level region a chain is anchored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootKind {
    /// The main split area of a content area.
    Center,
    /// A named working area nested in the center.
    WorkingArea,
    /// Floating windows outside the main frame.
    Externalized,
    /// The flap area along one border of the window.
    Minimized(Side),
    /// The single maximized slot.
    Maximized,
}

impl RootKind {
    /// Structural flavor of the area.
    #[must_use]
    pub const fn area(self) -> AreaKind {
        match self {
            Self::Center | Self::WorkingArea => AreaKind::SplitTree,
            Self::Minimized(_) => AreaKind::Linear,
            Self::Externalized => AreaKind::Screen,
            Self::Maximized => AreaKind::Fixed,
        }
    }

    /// Mode a dockable enters when placed in this area.
    #[must_use]
    pub const fn mode(self) -> ExtendedMode {
        match self {
            Self::Center | Self::WorkingArea => ExtendedMode::Normal,
            Self::Minimized(_) => ExtendedMode::Minimized,
            Self::Externalized => ExtendedMode::Externalized,
            Self::Maximized => ExtendedMode::Maximized,
        }
    }
}

impl fmt::Display for RootKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Center => f.write_str("center"),
            Self::WorkingArea => f.write_str("working_area"),
            Self::Externalized => f.write_str("externalized"),
            Self::Minimized(side) => write!(f, "minimized_{side}"),
            Self::Maximized => f.write_str("maximized"),
        }
    }
}

/// Structural flavor of an addressable area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaKind {
    /// Recursively split rectangle.
    SplitTree,
    /// Ordered list of slots.
    Linear,
    /// Free placement in screen pixels.
    Screen,
    /// A single slot that cannot be subdivided.
    Fixed,
}

impl AreaKind {
    #[must_use]
    pub const fn capabilities(self) -> Capabilities {
        match self {
            Self::SplitTree => Capabilities::SPLIT_TREE,
            Self::Linear => Capabilities::INSERT,
            Self::Screen => Capabilities::SCREEN,
            Self::Fixed => Capabilities::STACK,
        }
    }
}

impl fmt::Display for AreaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SplitTree => "split-tree",
            Self::Linear => "linear",
            Self::Screen => "screen",
            Self::Fixed => "fixed",
        })
    }
}

bitflags! {
    /// Builder operations a chain head accepts.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// `north`/`south`/`east`/`west`.
        const SPLIT = 1 << 0;
        /// `rectangle`.
        const RECTANGLE = 1 << 1;
        /// `stack`.
        const STACK = 1 << 2;
        /// `insert` into an ordered list.
        const INSERT = 1 << 3;
        /// `screen`/`maximized_screen`.
        const SCREEN = 1 << 4;

        const SPLIT_TREE = Self::SPLIT.bits() | Self::RECTANGLE.bits() | Self::STACK.bits();
    }
}

/// Docking mode implied by a root area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtendedMode {
    Normal,
    Minimized,
    Maximized,
    Externalized,
}

/// A root kind bound to the container that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RootArea {
    kind: RootKind,
    owner: Option<Arc<str>>,
}

impl RootArea {
    #[must_use]
    pub fn new(kind: RootKind) -> Self {
        Self { kind, owner: None }
    }

    #[must_use]
    pub fn center() -> Self {
        Self::new(RootKind::Center)
    }

    /// Working areas are always named by the station that owns them.
    pub fn working_area(id: &str) -> Result<Self, LocationError> {
        if id.is_empty() {
            return Err(LocationError::MissingOwner {
                kind: RootKind::WorkingArea,
            });
        }
        Ok(Self::new(RootKind::WorkingArea).with_owner(id))
    }

    #[must_use]
    pub fn externalized() -> Self {
        Self::new(RootKind::Externalized)
    }

    #[must_use]
    pub fn minimized(side: Side) -> Self {
        Self::new(RootKind::Minimized(side))
    }

    #[must_use]
    pub fn maximized() -> Self {
        Self::new(RootKind::Maximized)
    }

    /// Bind the area to a content area or station id.
    #[must_use]
    pub fn with_owner(mut self, owner: &str) -> Self {
        self.owner = Some(Arc::from(owner));
        self
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> RootKind {
        self.kind
    }

    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    #[inline]
    #[must_use]
    pub const fn area(&self) -> AreaKind {
        self.kind.area()
    }
}

impl fmt::Display for RootArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.owner {
            Some(owner) => write!(f, "{}[{owner}]", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}
