//! Conversion between location chains and flat properties.
//!
//! [`collapse`] walks a chain from its head back to the root and emits one
//! property per encoding boundary, outer level first. [`expand`] folds a
//! property back into builder steps on top of a given anchor, one level at a
//! time, each level anchored at the chain the previous one produced.
//!
//! Segments are cut as follows: a run of directional splits, optionally
//! closed by a leaf tag, is one path level; each rectangle, index, and screen
//! step is a level of its own.

use dockloc_core::{Fraction, NormRect};
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::location::{Location, Step};
use crate::property::{
    IndexProperty, LocationProperty, PathNode, PathProperty, RectangleProperty, ScreenProperty,
};
use crate::root::{AreaKind, Capabilities, RootArea};

/// Default limit on successor nesting accepted by [`expand`].
pub const DEFAULT_MAX_SUCCESSOR_DEPTH: usize = 32;

/// Tuning for decoding persisted properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpandOptions {
    /// Maximum number of levels (outer property plus successors).
    pub max_successor_depth: usize,
}

impl ExpandOptions {
    pub fn new(max_successor_depth: usize) -> Result<Self, DecodeError> {
        let options = Self {
            max_successor_depth,
        };
        options.validate()?;
        Ok(options)
    }

    pub fn validate(self) -> Result<(), DecodeError> {
        if self.max_successor_depth == 0 {
            return Err(DecodeError::InvalidOptions {
                reason: "max_successor_depth must be at least 1",
            });
        }
        Ok(())
    }

    /// Reject properties nested deeper than the limit.
    pub fn check_depth(self, property: &LocationProperty) -> Result<(), DecodeError> {
        let limit = self.max_successor_depth;
        // Stop counting one past the limit; the exact depth of an oversized
        // payload does not matter.
        let depth = property.levels().take(limit.saturating_add(1)).count();
        if depth > limit {
            return Err(DecodeError::SuccessorTooDeep { depth, limit });
        }
        Ok(())
    }
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            max_successor_depth: DEFAULT_MAX_SUCCESSOR_DEPTH,
        }
    }
}

// =========================================================================
// Collapse
// =========================================================================

/// Flatten a chain into its property encoding.
///
/// Total over every chain the builder can produce.
#[must_use]
pub fn collapse(location: &Location) -> LocationProperty {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("collapse", depth = location.depth()).entered();

    let mut levels: Vec<LocationProperty> = Vec::new();
    let mut open_path: Option<PathProperty> = None;

    for step in location.steps() {
        match step {
            Step::Split { side, fraction, id } => {
                open_path
                    .get_or_insert_with(PathProperty::default)
                    .nodes
                    .push(PathNode::new(*side, fraction.get(), *id));
            }
            Step::Leaf(id) => {
                let mut path = open_path.take().unwrap_or_default();
                path.leaf = Some(*id);
                levels.push(path.into());
            }
            Step::Rectangle(rect) => {
                close_path(&mut open_path, &mut levels);
                levels.push(RectangleProperty::new(*rect).into());
            }
            Step::Index(index) => {
                close_path(&mut open_path, &mut levels);
                levels.push(IndexProperty::new(*index).into());
            }
            Step::Screen { rect, fullscreen } => {
                close_path(&mut open_path, &mut levels);
                levels.push(ScreenProperty::new(*rect, *fullscreen).into());
            }
        }
    }
    close_path(&mut open_path, &mut levels);

    #[cfg(feature = "tracing")]
    tracing::trace!(levels = levels.len(), "collapsed location");

    let mut folded: Option<LocationProperty> = None;
    for level in levels.into_iter().rev() {
        folded = Some(level.with_successor(folded));
    }
    folded.unwrap_or_else(|| bare_root_property(location.root_area()))
}

fn close_path(open_path: &mut Option<PathProperty>, levels: &mut Vec<LocationProperty>) {
    if let Some(path) = open_path.take() {
        levels.push(path.into());
    }
}

/// Property of a chain that consists of its root alone.
fn bare_root_property(area: &RootArea) -> LocationProperty {
    match area.area() {
        AreaKind::SplitTree => PathProperty::default().into(),
        AreaKind::Linear | AreaKind::Fixed => IndexProperty::append().into(),
        AreaKind::Screen => ScreenProperty::new(Default::default(), false).into(),
    }
}

// =========================================================================
// Expand
// =========================================================================

/// Rebuild a chain from `property`, anchored at `anchor`.
pub fn expand(property: &LocationProperty, anchor: &Location) -> Result<Location, DecodeError> {
    expand_with(property, anchor, &ExpandOptions::default())
}

/// [`expand`] with explicit options.
pub fn expand_with(
    property: &LocationProperty,
    anchor: &Location,
    options: &ExpandOptions,
) -> Result<Location, DecodeError> {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("expand", encoding = %property.encoding(), anchor = %anchor)
        .entered();

    options.check_depth(property)?;
    let mut current = anchor.clone();
    for level in property.levels() {
        current = expand_level(level, &current)?;
    }
    Ok(current)
}

fn expand_level(level: &LocationProperty, anchor: &Location) -> Result<Location, DecodeError> {
    let available = anchor.capabilities();
    let require = |needed: Capabilities| {
        if available.intersects(needed) {
            Ok(())
        } else {
            Err(DecodeError::IncompatibleArea {
                encoding: level.encoding(),
                available,
            })
        }
    };

    match level {
        LocationProperty::Path(path) => {
            if path.nodes.is_empty() {
                require(Capabilities::RECTANGLE)?;
                #[cfg(feature = "tracing")]
                {
                    if path.leaf.is_some() {
                        tracing::debug!("empty path addresses the whole area; leaf id dropped");
                    }
                }
                return Ok(anchor.push(Step::Rectangle(NormRect::FULL)));
            }
            require(Capabilities::SPLIT)?;
            let mut chain = anchor.clone();
            for node in &path.nodes {
                chain = chain.push(Step::Split {
                    side: node.compass(),
                    fraction: decode_fraction(node.fraction),
                    id: node.id,
                });
            }
            if let Some(leaf) = path.leaf {
                chain = chain.push(Step::Leaf(leaf));
            }
            Ok(chain)
        }
        LocationProperty::Rectangle(rect) => {
            require(Capabilities::RECTANGLE)?;
            Ok(anchor.push(Step::Rectangle(rect.rect)))
        }
        LocationProperty::Index(index) => {
            require(Capabilities::INSERT | Capabilities::STACK)?;
            Ok(anchor.push(Step::Index(index.index)))
        }
        LocationProperty::Screen(screen) => {
            require(Capabilities::SCREEN)?;
            Ok(anchor.push(Step::Screen {
                rect: screen.rect,
                fullscreen: screen.fullscreen,
            }))
        }
    }
}

fn decode_fraction(value: f64) -> Fraction {
    match Fraction::new(value) {
        Ok(fraction) => fraction,
        Err(_err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(value, error = %_err, "clamping persisted split fraction");
            Fraction::saturating(value)
        }
    }
}

impl Location {
    /// Shorthand for [`collapse`].
    #[must_use]
    pub fn to_property(&self) -> LocationProperty {
        collapse(self)
    }
}

impl LocationProperty {
    /// Shorthand for [`expand`].
    pub fn expand_onto(&self, anchor: &Location) -> Result<Location, DecodeError> {
        expand(self, anchor)
    }
}
