//! Location chains and the fluent builder.
//!
//! A [`Location`] is a handle on the terminal node of a chain; each node
//! holds a handle on its parent, ending at a root area. Nodes are immutable
//! and shared, so branching off an intermediate chain never affects the
//! chains already built from it:
//!
//! ```
//! use dockloc::Location;
//!
//! let top = Location::center().north(0.3)?;
//! let top_right = top.east(0.5)?;
//! let top_left = top.west(0.5)?.stack_append()?;
//!
//! assert_eq!(top_right.to_string(), "center.north(0.3).east(0.5)");
//! assert_eq!(top_left.to_string(), "center.north(0.3).west(0.5).stack(append)");
//! # Ok::<(), dockloc::LocationError>(())
//! ```

use std::fmt;
use std::mem;
use std::sync::{Arc, OnceLock};

use dockloc_core::{Fraction, NodeId, NormRect, ScreenRect, Side};
use serde::{Deserialize, Serialize};

use crate::error::LocationError;
use crate::root::{AreaKind, Capabilities, ExtendedMode, RootArea};

/// Position in an ordered list of slots.
///
/// [`SlotIndex::APPEND`] addresses the position after the last element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotIndex(u32);

impl SlotIndex {
    pub const FIRST: Self = Self(0);
    pub const APPEND: Self = Self(u32::MAX);

    #[inline]
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_append(self) -> bool {
        self.0 == u32::MAX
    }

    /// The following slot. Saturates into [`SlotIndex::APPEND`].
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Concrete position, or `None` for append.
    #[must_use]
    pub const fn position(self) -> Option<u32> {
        if self.is_append() { None } else { Some(self.0) }
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position() {
            Some(index) => write!(f, "{index}"),
            None => f.write_str("append"),
        }
    }
}

/// One non-root step of a location chain.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Directional split of the parent area.
    Split {
        side: Side,
        fraction: Fraction,
        id: Option<NodeId>,
    },
    /// Leaf id of the slot the preceding splits describe.
    Leaf(NodeId),
    /// Absolute rectangle relative to the parent area.
    Rectangle(NormRect),
    /// Position in a flap list or a tab stack.
    Index(SlotIndex),
    /// Floating placement in screen pixels.
    Screen { rect: ScreenRect, fullscreen: bool },
}

#[derive(Debug)]
enum Node {
    Root(RootArea),
    Step { parent: Location, step: Step },
}

/// Shared stand-in parked in a node's parent slot while it is being dropped.
fn detached() -> Location {
    static DETACHED: OnceLock<Location> = OnceLock::new();
    DETACHED
        .get_or_init(|| Location::new(RootArea::center()))
        .clone()
}

impl Drop for Node {
    // Unlinks uniquely owned ancestors one at a time; dropping them through
    // the parent field would recurse once per node.
    fn drop(&mut self) {
        let Node::Step { parent, .. } = self else {
            return;
        };
        let mut next = mem::replace(parent, detached());
        while let Some(mut node) = Arc::into_inner(next.0) {
            match &mut node {
                Node::Step { parent, .. } => next = mem::replace(parent, detached()),
                Node::Root(_) => break,
            }
        }
    }
}

/// Immutable handle on a location chain.
///
/// Cloning is cheap and shares every node.
#[derive(Clone)]
pub struct Location(Arc<Node>);

impl Location {
    /// The bare root of an area.
    #[must_use]
    pub fn new(area: RootArea) -> Self {
        Self(Arc::new(Node::Root(area)))
    }

    #[must_use]
    pub fn center() -> Self {
        Self::new(RootArea::center())
    }

    pub fn working_area(id: &str) -> Result<Self, LocationError> {
        RootArea::working_area(id).map(Self::new)
    }

    #[must_use]
    pub fn externalized() -> Self {
        Self::new(RootArea::externalized())
    }

    #[must_use]
    pub fn minimized(side: Side) -> Self {
        Self::new(RootArea::minimized(side))
    }

    #[must_use]
    pub fn maximized() -> Self {
        Self::new(RootArea::maximized())
    }

    // ---------------------------------------------------------------------
    // Structure
    // ---------------------------------------------------------------------

    /// The step this node adds, or `None` for a bare root.
    #[must_use]
    pub fn step(&self) -> Option<&Step> {
        match &*self.0 {
            Node::Root(_) => None,
            Node::Step { step, .. } => Some(step),
        }
    }

    #[must_use]
    pub fn parent(&self) -> Option<&Location> {
        match &*self.0 {
            Node::Root(_) => None,
            Node::Step { parent, .. } => Some(parent),
        }
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        matches!(&*self.0, Node::Root(_))
    }

    /// This node followed by each of its ancestors, ending at the root.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// The root node of the chain.
    #[must_use]
    pub fn root(&self) -> &Location {
        let mut current = self;
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    #[must_use]
    pub fn root_area(&self) -> &RootArea {
        let mut current = self;
        loop {
            match &*current.0 {
                Node::Root(area) => return area,
                Node::Step { parent, .. } => current = parent,
            }
        }
    }

    /// Number of steps below the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.ancestors().count() - 1
    }

    /// Steps in root-to-leaf order.
    #[must_use]
    pub fn steps(&self) -> Vec<&Step> {
        let mut steps: Vec<&Step> = self.ancestors().filter_map(Location::step).collect();
        steps.reverse();
        steps
    }

    /// Operations the head of this chain accepts.
    ///
    /// Roots are restricted by their area flavor; every other node addresses
    /// a nested slot that can be split, covered by a rectangle, or stacked.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        match &*self.0 {
            Node::Root(area) => area.area().capabilities(),
            Node::Step { .. } => Capabilities::SPLIT_TREE,
        }
    }

    /// Docking mode a dockable placed here ends up in.
    #[must_use]
    pub fn mode(&self) -> ExtendedMode {
        let fullscreen = self
            .ancestors()
            .any(|node| matches!(node.step(), Some(Step::Screen { fullscreen: true, .. })));
        if fullscreen {
            ExtendedMode::Maximized
        } else {
            self.root_area().kind().mode()
        }
    }

    // ---------------------------------------------------------------------
    // Builder
    // ---------------------------------------------------------------------

    pub(crate) fn push(&self, step: Step) -> Self {
        Self(Arc::new(Node::Step {
            parent: self.clone(),
            step,
        }))
    }

    fn require(&self, operation: &'static str, needed: Capabilities) -> Result<(), LocationError> {
        let available = self.capabilities();
        if available.contains(needed) {
            Ok(())
        } else {
            Err(LocationError::Unsupported {
                operation,
                available,
            })
        }
    }

    /// Occupy `side` of a split of this area, taking `fraction` of it.
    pub fn split(&self, side: Side, fraction: f64, id: Option<NodeId>) -> Result<Self, LocationError> {
        let operation = side.as_str();
        self.require(operation, Capabilities::SPLIT)?;
        let fraction = Fraction::new(fraction)
            .map_err(|source| LocationError::Fraction { operation, source })?;
        Ok(self.push(Step::Split { side, fraction, id }))
    }

    pub fn north(&self, fraction: f64) -> Result<Self, LocationError> {
        self.split(Side::North, fraction, None)
    }

    pub fn south(&self, fraction: f64) -> Result<Self, LocationError> {
        self.split(Side::South, fraction, None)
    }

    pub fn east(&self, fraction: f64) -> Result<Self, LocationError> {
        self.split(Side::East, fraction, None)
    }

    pub fn west(&self, fraction: f64) -> Result<Self, LocationError> {
        self.split(Side::West, fraction, None)
    }

    pub fn north_with_id(&self, fraction: f64, id: NodeId) -> Result<Self, LocationError> {
        self.split(Side::North, fraction, Some(id))
    }

    pub fn south_with_id(&self, fraction: f64, id: NodeId) -> Result<Self, LocationError> {
        self.split(Side::South, fraction, Some(id))
    }

    pub fn east_with_id(&self, fraction: f64, id: NodeId) -> Result<Self, LocationError> {
        self.split(Side::East, fraction, Some(id))
    }

    pub fn west_with_id(&self, fraction: f64, id: NodeId) -> Result<Self, LocationError> {
        self.split(Side::West, fraction, Some(id))
    }

    /// Address a rectangle of this area directly, in relative coordinates.
    pub fn rectangle(&self, x: f64, y: f64, width: f64, height: f64) -> Result<Self, LocationError> {
        const OPERATION: &str = "rectangle";
        self.require(OPERATION, Capabilities::RECTANGLE)?;
        let rect = NormRect::new(x, y, width, height);
        rect.validate().map_err(|source| LocationError::Fraction {
            operation: OPERATION,
            source,
        })?;
        Ok(self.push(Step::Rectangle(rect)))
    }

    /// Tag the slot described by the preceding splits with its leaf id.
    pub fn leaf(&self, id: NodeId) -> Result<Self, LocationError> {
        if !matches!(self.step(), Some(Step::Split { .. })) {
            return Err(LocationError::LeafWithoutSplit);
        }
        Ok(self.push(Step::Leaf(id)))
    }

    /// The tab at `index` of a stack occupying this slot.
    pub fn stack(&self, index: SlotIndex) -> Result<Self, LocationError> {
        self.require("stack", Capabilities::STACK)?;
        Ok(self.push(Step::Index(index)))
    }

    /// A new last tab of a stack occupying this slot.
    pub fn stack_append(&self) -> Result<Self, LocationError> {
        self.stack(SlotIndex::APPEND)
    }

    /// Insertion point in an ordered list area.
    pub fn insert(&self, index: SlotIndex) -> Result<Self, LocationError> {
        self.require("insert", Capabilities::INSERT)?;
        Ok(self.push(Step::Index(index)))
    }

    /// A floating window at `rect`.
    pub fn screen(&self, rect: ScreenRect) -> Result<Self, LocationError> {
        self.require("screen", Capabilities::SCREEN)?;
        Ok(self.push(Step::Screen {
            rect,
            fullscreen: false,
        }))
    }

    /// A floating window maximized on the screen whose bounds are `rect`.
    pub fn maximized_screen(&self, rect: ScreenRect) -> Result<Self, LocationError> {
        self.require("maximized_screen", Capabilities::SCREEN)?;
        Ok(self.push(Step::Screen {
            rect,
            fullscreen: true,
        }))
    }

    /// The slot right next to this one.
    ///
    /// Inserting a dockable there leaves the dockable at this location where
    /// it is. Stack and list positions advance by one (append stays append);
    /// every other location becomes the second tab of a stack on its slot.
    #[must_use]
    pub fn aside(&self) -> Self {
        match &*self.0 {
            Node::Step {
                parent,
                step: Step::Index(index),
            } => {
                if index.is_append() {
                    self.clone()
                } else {
                    parent.push(Step::Index(index.next()))
                }
            }
            Node::Root(area) => match area.area() {
                AreaKind::Linear => self.push(Step::Index(SlotIndex::APPEND)),
                AreaKind::Screen => self.clone(),
                AreaKind::SplitTree | AreaKind::Fixed => self.push(Step::Index(SlotIndex::new(1))),
            },
            Node::Step { .. } => self.push(Step::Index(SlotIndex::new(1))),
        }
    }
}

/// Iterator from a chain head to its root.
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    next: Option<&'a Location>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Location;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        let mut left = self.ancestors();
        let mut right = other.ancestors();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) => {
                    if Arc::ptr_eq(&a.0, &b.0) {
                        return true;
                    }
                    let same = match (&*a.0, &*b.0) {
                        (Node::Root(x), Node::Root(y)) => x == y,
                        (Node::Step { step: x, .. }, Node::Step { step: y, .. }) => x == y,
                        _ => false,
                    };
                    if !same {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Location({self})")
    }
}

/// Renders the chain the way it would be built, e.g.
/// `center.north(0.3).east(0.5).stack(2)`.
impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nodes: Vec<&Location> = self.ancestors().collect();
        for node in nodes.iter().rev() {
            match &*node.0 {
                Node::Root(area) => write!(f, "{area}")?,
                Node::Step { parent, step } => {
                    f.write_str(".")?;
                    fmt_step(f, parent, step)?;
                }
            }
        }
        Ok(())
    }
}

fn fmt_step(f: &mut fmt::Formatter<'_>, parent: &Location, step: &Step) -> fmt::Result {
    match step {
        Step::Split { side, fraction, id } => match id {
            Some(id) => write!(f, "{side}({fraction}, #{id})"),
            None => write!(f, "{side}({fraction})"),
        },
        Step::Leaf(id) => write!(f, "leaf(#{id})"),
        Step::Rectangle(rect) => write!(
            f,
            "rectangle({}, {}, {}, {})",
            rect.x, rect.y, rect.width, rect.height
        ),
        Step::Index(index) => {
            let linear = parent.is_root() && parent.root_area().area() == AreaKind::Linear;
            if linear {
                write!(f, "insert({index})")
            } else {
                write!(f, "stack({index})")
            }
        }
        Step::Screen { rect, fullscreen } => {
            let name = if *fullscreen { "maximized_screen" } else { "screen" };
            write!(
                f,
                "{name}({}, {}, {}, {})",
                rect.x, rect.y, rect.width, rect.height
            )
        }
    }
}

impl From<RootArea> for Location {
    fn from(area: RootArea) -> Self {
        Self::new(area)
    }
}
