//! Root-area catalog.
//!
//! Persisted locations name their root by kind and owner; the catalog turns
//! that reference back into the root chain to expand onto.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::location::Location;
use crate::root::{RootArea, RootKind};

/// Factory for the root chains a host currently offers.
pub trait RootCatalog {
    /// The root of `kind` owned by `owner`, or `None` if no such area exists.
    fn root(&self, kind: RootKind, owner: Option<&str>) -> Option<Location>;
}

impl<C: RootCatalog + ?Sized> RootCatalog for &C {
    fn root(&self, kind: RootKind, owner: Option<&str>) -> Option<Location> {
        (**self).root(kind, owner)
    }
}

/// Catalog for a single content area and its registered working areas.
#[derive(Debug, Clone, Default)]
pub struct StandardRoots {
    content: Option<Arc<str>>,
    working_areas: FxHashSet<Arc<str>>,
}

impl StandardRoots {
    /// Catalog for an anonymous content area.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog for the content area named `id`.
    #[must_use]
    pub fn for_content(id: &str) -> Self {
        Self {
            content: Some(Arc::from(id)),
            working_areas: FxHashSet::default(),
        }
    }

    /// Make the working area `id` addressable.
    #[must_use]
    pub fn with_working_area(mut self, id: &str) -> Self {
        self.register_working_area(id);
        self
    }

    /// Returns `false` if the id was already registered or is empty.
    pub fn register_working_area(&mut self, id: &str) -> bool {
        !id.is_empty() && self.working_areas.insert(Arc::from(id))
    }

    pub fn unregister_working_area(&mut self, id: &str) -> bool {
        self.working_areas.remove(id)
    }

    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    fn content_root(&self, kind: RootKind) -> Location {
        let area = RootArea::new(kind);
        match self.content.as_deref() {
            Some(owner) => Location::new(area.with_owner(owner)),
            None => Location::new(area),
        }
    }
}

impl RootCatalog for StandardRoots {
    fn root(&self, kind: RootKind, owner: Option<&str>) -> Option<Location> {
        match kind {
            RootKind::WorkingArea => {
                let id = owner?;
                self.working_areas.contains(id).then(|| {
                    Location::new(RootArea::new(RootKind::WorkingArea).with_owner(id))
                })
            }
            _ => (owner == self.content.as_deref()).then(|| self.content_root(kind)),
        }
    }
}
