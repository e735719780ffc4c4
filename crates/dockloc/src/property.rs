//! Flat, persistable location properties.
//!
//! A [`LocationProperty`] is one of four encodings. Each encoding may carry a
//! successor that addresses a slot nested inside the one it describes, so a
//! complete address is a short list of properties, outer container first.
//!
//! Decoding is permissive: fractions and rectangle fields keep whatever
//! values were stored, even out of range, so that layouts written by older or
//! foreign versions still load. Range checks happen at chain construction and
//! at layout time, not here.

use std::convert::Infallible;
use std::fmt;

use dockloc_core::{NodeId, NodeIdAllocator, NodeIdError, NormRect, PathSide, Placeholder, ScreenRect, Side};
use serde::{Deserialize, Serialize};

use crate::location::SlotIndex;

/// Tag naming one of the four encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    Path,
    Rectangle,
    Index,
    Screen,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Path => "path",
            Self::Rectangle => "rectangle",
            Self::Index => "index",
            Self::Screen => "screen",
        })
    }
}

/// One split on the way from a root to a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathNode {
    pub side: PathSide,
    pub fraction: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
}

impl PathNode {
    /// Build a node from the compass vocabulary.
    #[must_use]
    pub fn new(side: Side, fraction: f64, id: Option<NodeId>) -> Self {
        Self {
            side: side.into(),
            fraction,
            id,
        }
    }

    /// Compass form of the stored side.
    #[must_use]
    pub fn compass(&self) -> Side {
        self.side.into()
    }
}

/// Ordered splits from the root to a leaf; empty means the undivided root.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathProperty {
    #[serde(default)]
    pub nodes: Vec<PathNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leaf: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successor: Option<Box<LocationProperty>>,
}

impl PathProperty {
    #[must_use]
    pub fn new(nodes: Vec<PathNode>, leaf: Option<NodeId>) -> Self {
        Self {
            nodes,
            leaf,
            successor: None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Absolute rectangle relative to the containing area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleProperty {
    pub rect: NormRect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successor: Option<Box<LocationProperty>>,
}

impl RectangleProperty {
    #[must_use]
    pub fn new(rect: NormRect) -> Self {
        Self {
            rect,
            successor: None,
        }
    }
}

/// Position in an ordered list: a flap slot or a tab in a stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexProperty {
    pub index: SlotIndex,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successor: Option<Box<LocationProperty>>,
}

impl IndexProperty {
    #[must_use]
    pub fn new(index: SlotIndex) -> Self {
        Self {
            index,
            successor: None,
        }
    }

    #[must_use]
    pub fn append() -> Self {
        Self::new(SlotIndex::APPEND)
    }
}

/// Floating placement in screen pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenProperty {
    pub rect: ScreenRect,
    #[serde(default)]
    pub fullscreen: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successor: Option<Box<LocationProperty>>,
}

impl ScreenProperty {
    #[must_use]
    pub fn new(rect: ScreenRect, fullscreen: bool) -> Self {
        Self {
            rect,
            fullscreen,
            successor: None,
        }
    }
}

/// A location in one of the four flat encodings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocationProperty {
    Path(PathProperty),
    Rectangle(RectangleProperty),
    Index(IndexProperty),
    Screen(ScreenProperty),
}

impl LocationProperty {
    #[must_use]
    pub fn encoding(&self) -> Encoding {
        match self {
            Self::Path(_) => Encoding::Path,
            Self::Rectangle(_) => Encoding::Rectangle,
            Self::Index(_) => Encoding::Index,
            Self::Screen(_) => Encoding::Screen,
        }
    }

    /// Property addressing a slot nested inside this one.
    #[must_use]
    pub fn successor(&self) -> Option<&LocationProperty> {
        let slot = match self {
            Self::Path(p) => &p.successor,
            Self::Rectangle(p) => &p.successor,
            Self::Index(p) => &p.successor,
            Self::Screen(p) => &p.successor,
        };
        slot.as_deref()
    }

    fn successor_slot(&mut self) -> &mut Option<Box<LocationProperty>> {
        match self {
            Self::Path(p) => &mut p.successor,
            Self::Rectangle(p) => &mut p.successor,
            Self::Index(p) => &mut p.successor,
            Self::Screen(p) => &mut p.successor,
        }
    }

    /// Replace the successor.
    #[must_use]
    pub fn with_successor(mut self, successor: Option<LocationProperty>) -> Self {
        *self.successor_slot() = successor.map(Box::new);
        self
    }

    /// Detach and return the successor.
    pub fn take_successor(&mut self) -> Option<LocationProperty> {
        self.successor_slot().take().map(|boxed| *boxed)
    }

    /// Attach `inner` as the successor of the innermost level.
    pub fn push_innermost(&mut self, inner: LocationProperty) {
        let slot = self.successor_slot();
        match *slot {
            Some(ref mut next) => next.push_innermost(inner),
            None => *slot = Some(Box::new(inner)),
        }
    }

    /// This property followed by each nested successor.
    pub fn levels(&self) -> Levels<'_> {
        Levels { next: Some(self) }
    }

    /// Number of levels, counting this one.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.levels().count()
    }

    /// The most deeply nested level.
    #[must_use]
    pub fn innermost(&self) -> &LocationProperty {
        let mut current = self;
        while let Some(next) = current.successor() {
            current = next;
        }
        current
    }

    fn try_for_each_level_mut<E, F>(&mut self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&mut LocationProperty) -> Result<(), E>,
    {
        let mut current = Some(self);
        while let Some(level) = current {
            visit(&mut *level)?;
            current = level.successor_slot().as_deref_mut();
        }
        Ok(())
    }

    fn for_each_level_mut<F>(&mut self, mut visit: F)
    where
        F: FnMut(&mut LocationProperty),
    {
        let result = self.try_for_each_level_mut(|level| {
            visit(level);
            Ok::<(), Infallible>(())
        });
        match result {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    /// Copy with every split node id cleared.
    ///
    /// Two properties that differ only in framework-assigned node ids compare
    /// equal after normalization.
    #[must_use]
    pub fn without_node_ids(&self) -> Self {
        let mut normalized = self.clone();
        normalized.for_each_level_mut(|level| {
            if let Self::Path(path) = level {
                for node in &mut path.nodes {
                    node.id = None;
                }
            }
        });
        normalized
    }

    /// Every split and leaf id present at any level.
    #[must_use]
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::new();
        for level in self.levels() {
            if let Self::Path(path) = level {
                ids.extend(path.nodes.iter().filter_map(|node| node.id));
                ids.extend(path.leaf);
            }
        }
        ids
    }

    /// Give every unassigned split node a fresh id.
    pub fn assign_node_ids(&mut self, allocator: &mut NodeIdAllocator) -> Result<(), NodeIdError> {
        self.try_for_each_level_mut(|level| -> Result<(), NodeIdError> {
            if let Self::Path(path) = level {
                for node in path.nodes.iter_mut().filter(|node| node.id.is_none()) {
                    node.id = Some(allocator.allocate()?);
                }
            }
            Ok(())
        })
    }
}

impl From<PathProperty> for LocationProperty {
    fn from(property: PathProperty) -> Self {
        Self::Path(property)
    }
}

impl From<RectangleProperty> for LocationProperty {
    fn from(property: RectangleProperty) -> Self {
        Self::Rectangle(property)
    }
}

impl From<IndexProperty> for LocationProperty {
    fn from(property: IndexProperty) -> Self {
        Self::Index(property)
    }
}

impl From<ScreenProperty> for LocationProperty {
    fn from(property: ScreenProperty) -> Self {
        Self::Screen(property)
    }
}

/// Iterator over the nesting levels of a property, outer first.
#[derive(Debug, Clone)]
pub struct Levels<'a> {
    next: Option<&'a LocationProperty>,
}

impl<'a> Iterator for Levels<'a> {
    type Item = &'a LocationProperty;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.successor();
        Some(current)
    }
}

/// A placeholder token plus the structural location to use when the token
/// no longer names a live dockable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderProperty {
    pub placeholder: Placeholder,
    pub backup: LocationProperty,
}

impl PlaceholderProperty {
    #[must_use]
    pub fn new(placeholder: Placeholder, backup: LocationProperty) -> Self {
        Self {
            placeholder,
            backup,
        }
    }
}

/// What a layout stores for one dockable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistedProperty {
    Direct(LocationProperty),
    Placeholder(PlaceholderProperty),
}

impl PersistedProperty {
    /// The structural property, ignoring any placeholder.
    #[must_use]
    pub fn structural(&self) -> &LocationProperty {
        match self {
            Self::Direct(property) => property,
            Self::Placeholder(wrapper) => &wrapper.backup,
        }
    }
}

impl From<LocationProperty> for PersistedProperty {
    fn from(property: LocationProperty) -> Self {
        Self::Direct(property)
    }
}

impl From<PlaceholderProperty> for PersistedProperty {
    fn from(wrapper: PlaceholderProperty) -> Self {
        Self::Placeholder(wrapper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(nodes: &[(Side, f64, Option<u64>)], leaf: Option<u64>) -> LocationProperty {
        PathProperty::new(
            nodes
                .iter()
                .map(|&(side, fraction, id)| PathNode::new(side, fraction, id.map(NodeId::new)))
                .collect(),
            leaf.map(NodeId::new),
        )
        .into()
    }

    #[test]
    fn path_nodes_store_positional_sides() {
        let node = PathNode::new(Side::North, 0.3, None);
        assert_eq!(node.side, PathSide::Top);
        assert_eq!(node.compass(), Side::North);
    }

    #[test]
    fn push_innermost_appends_at_deepest_level() {
        let mut outer: LocationProperty = IndexProperty::new(SlotIndex::new(2)).into();
        outer.push_innermost(RectangleProperty::new(NormRect::FULL).into());
        outer.push_innermost(IndexProperty::append().into());
        let encodings: Vec<Encoding> = outer.levels().map(LocationProperty::encoding).collect();
        assert_eq!(
            encodings,
            vec![Encoding::Index, Encoding::Rectangle, Encoding::Index]
        );
        assert_eq!(outer.depth(), 3);
        assert_eq!(outer.innermost().encoding(), Encoding::Index);
    }

    #[test]
    fn take_successor_detaches_nested_levels() {
        let mut outer: LocationProperty = ScreenProperty::new(ScreenRect::new(1, 2, 3, 4), false).into();
        outer = outer.with_successor(Some(IndexProperty::new(SlotIndex::FIRST).into()));
        let inner = outer.take_successor().expect("successor present");
        assert_eq!(inner.encoding(), Encoding::Index);
        assert!(outer.successor().is_none());
    }

    #[test]
    fn without_node_ids_clears_split_ids_at_every_level() {
        let mut property = path(&[(Side::North, 0.3, Some(7))], Some(8));
        property.push_innermost(path(&[(Side::West, 0.5, Some(11))], None));
        let normalized = property.without_node_ids();
        assert_eq!(normalized.node_ids(), vec![NodeId::new(8)]);
        assert_eq!(property.node_ids().len(), 3);
    }

    #[test]
    fn assign_node_ids_fills_only_missing_ids() {
        let mut property = path(&[(Side::North, 0.3, Some(5)), (Side::East, 0.5, None)], None);
        property.push_innermost(IndexProperty::append().into());
        property.push_innermost(path(&[(Side::South, 0.2, None)], None));
        let mut allocator = NodeIdAllocator::after(property.node_ids()).expect("allocator");
        property
            .assign_node_ids(&mut allocator)
            .expect("ids available");
        assert_eq!(
            property.node_ids(),
            vec![NodeId::new(5), NodeId::new(6), NodeId::new(7)]
        );
    }

    #[test]
    fn json_shape_is_tagged_by_kind() {
        let mut property = path(&[(Side::South, 0.25, None)], Some(3));
        property.push_innermost(IndexProperty::new(SlotIndex::new(1)).into());
        let json = serde_json::to_value(&property).expect("encode");
        assert_eq!(json["kind"], serde_json::json!("path"));
        assert_eq!(json["nodes"][0]["side"], serde_json::json!("bottom"));
        assert_eq!(json["leaf"], serde_json::json!(3));
        assert_eq!(json["successor"]["kind"], serde_json::json!("index"));
        assert_eq!(json["successor"]["index"], serde_json::json!(1));
        assert!(json["successor"].get("successor").is_none());
    }

    #[test]
    fn out_of_range_values_decode_unchanged() {
        let json = r#"{"kind":"rectangle","rect":{"x":-0.5,"y":0.0,"width":1.75,"height":1.0}}"#;
        let property: LocationProperty = serde_json::from_str(json).expect("permissive decode");
        let LocationProperty::Rectangle(rect) = property else {
            unreachable!("rectangle expected");
        };
        assert_eq!(rect.rect, NormRect::new(-0.5, 0.0, 1.75, 1.0));
    }

    #[test]
    fn unknown_encoding_tag_is_rejected() {
        let json = r#"{"kind":"spiral","turns":3}"#;
        assert!(serde_json::from_str::<LocationProperty>(json).is_err());
    }

    #[test]
    fn persisted_placeholder_exposes_backup() {
        let backup: LocationProperty = ScreenProperty::new(ScreenRect::new(10, 20, 300, 200), false).into();
        let persisted: PersistedProperty =
            PlaceholderProperty::new(Placeholder::new("editor"), backup.clone()).into();
        assert_eq!(persisted.structural(), &backup);
        let encoded = serde_json::to_string(&persisted).expect("encode");
        let decoded: PersistedProperty = serde_json::from_str(&encoded).expect("decode");
        assert_eq!(decoded, persisted);
    }
}
