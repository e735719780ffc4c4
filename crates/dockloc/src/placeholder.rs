//! Placeholder resolution.
//!
//! A persisted placeholder names a dockable by a stable token and carries a
//! backup property. Restoring it asks the host's registry first; only when the
//! token is unknown does the backup get expanded structurally. A miss is an
//! expected outcome, not an error.

use dockloc_core::Placeholder;
use rustc_hash::FxHashMap;

use crate::convert::{ExpandOptions, expand_with};
use crate::error::DecodeError;
use crate::location::Location;
use crate::property::{PersistedProperty, PlaceholderProperty};

/// Lookup from stable tokens to live targets, owned by the host framework.
///
/// Implementations must be non-blocking and free of side effects.
pub trait StableIdRegistry {
    type Target;

    fn resolve(&self, placeholder: &Placeholder) -> Option<Self::Target>;
}

impl<R: StableIdRegistry + ?Sized> StableIdRegistry for &R {
    type Target = R::Target;

    fn resolve(&self, placeholder: &Placeholder) -> Option<Self::Target> {
        (**self).resolve(placeholder)
    }
}

/// In-memory registry keyed by placeholder token.
#[derive(Debug, Clone)]
pub struct MapRegistry<T> {
    entries: FxHashMap<Placeholder, T>,
}

impl<T> MapRegistry<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Register a live target, returning the one it replaces.
    pub fn insert(&mut self, placeholder: Placeholder, target: T) -> Option<T> {
        self.entries.insert(placeholder, target)
    }

    pub fn remove(&mut self, placeholder: &Placeholder) -> Option<T> {
        self.entries.remove(placeholder)
    }

    #[must_use]
    pub fn contains(&self, placeholder: &Placeholder) -> bool {
        self.entries.contains_key(placeholder)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for MapRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> StableIdRegistry for MapRegistry<T> {
    type Target = T;

    fn resolve(&self, placeholder: &Placeholder) -> Option<T> {
        self.entries.get(placeholder).cloned()
    }
}

impl<T> FromIterator<(Placeholder, T)> for MapRegistry<T> {
    fn from_iter<I: IntoIterator<Item = (Placeholder, T)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Outcome of restoring a persisted property.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<T> {
    /// The placeholder named a live target.
    Live(T),
    /// The structural location to place the dockable at.
    Fallback(Location),
}

impl<T> Resolution<T> {
    #[must_use]
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live(_))
    }

    #[must_use]
    pub fn location(&self) -> Option<&Location> {
        match self {
            Self::Live(_) => None,
            Self::Fallback(location) => Some(location),
        }
    }
}

/// Resolve a placeholder against the registry, expanding the backup on a miss.
pub fn resolve<R>(
    wrapper: &PlaceholderProperty,
    registry: &R,
    anchor: &Location,
) -> Result<Resolution<R::Target>, DecodeError>
where
    R: StableIdRegistry + ?Sized,
{
    resolve_with(wrapper, registry, anchor, &ExpandOptions::default())
}

/// [`resolve`] with explicit expansion options.
pub fn resolve_with<R>(
    wrapper: &PlaceholderProperty,
    registry: &R,
    anchor: &Location,
    options: &ExpandOptions,
) -> Result<Resolution<R::Target>, DecodeError>
where
    R: StableIdRegistry + ?Sized,
{
    match live_target(wrapper, registry) {
        Some(target) => Ok(Resolution::Live(target)),
        None => expand_backup(wrapper, anchor, options),
    }
}

/// Registry lookup; empty tokens never reach the registry.
pub(crate) fn live_target<R>(wrapper: &PlaceholderProperty, registry: &R) -> Option<R::Target>
where
    R: StableIdRegistry + ?Sized,
{
    if wrapper.placeholder.is_empty() {
        return None;
    }
    registry.resolve(&wrapper.placeholder)
}

pub(crate) fn expand_backup<T>(
    wrapper: &PlaceholderProperty,
    anchor: &Location,
    options: &ExpandOptions,
) -> Result<Resolution<T>, DecodeError> {
    #[cfg(feature = "tracing")]
    tracing::debug!(
        placeholder = %wrapper.placeholder,
        encoding = %wrapper.backup.encoding(),
        "placeholder unresolved; expanding backup"
    );

    expand_with(&wrapper.backup, anchor, options).map(Resolution::Fallback)
}

impl PersistedProperty {
    /// Restore onto `anchor`: registry first for placeholders, structure otherwise.
    pub fn resolve<R>(
        &self,
        registry: &R,
        anchor: &Location,
        options: &ExpandOptions,
    ) -> Result<Resolution<R::Target>, DecodeError>
    where
        R: StableIdRegistry + ?Sized,
    {
        match self {
            Self::Direct(property) => expand_with(property, anchor, options).map(Resolution::Fallback),
            Self::Placeholder(wrapper) => resolve_with(wrapper, registry, anchor, options),
        }
    }
}

/// A placeholder that either still waits for its target or has found it.
///
/// The transition is one-way: once resolved, the structural backup is gone.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceholderSlot<T> {
    Unresolved(PlaceholderProperty),
    Resolved(T),
}

impl<T> PlaceholderSlot<T> {
    #[must_use]
    pub fn new(wrapper: PlaceholderProperty) -> Self {
        Self::Unresolved(wrapper)
    }

    /// Move to [`PlaceholderSlot::Resolved`] if the registry knows the token.
    #[must_use]
    pub fn try_resolve<R>(self, registry: &R) -> Self
    where
        R: StableIdRegistry<Target = T> + ?Sized,
    {
        match self {
            Self::Unresolved(wrapper) if !wrapper.placeholder.is_empty() => {
                match registry.resolve(&wrapper.placeholder) {
                    Some(target) => Self::Resolved(target),
                    None => Self::Unresolved(wrapper),
                }
            }
            other => other,
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    #[must_use]
    pub fn target(&self) -> Option<&T> {
        match self {
            Self::Resolved(target) => Some(target),
            Self::Unresolved(_) => None,
        }
    }

    #[must_use]
    pub fn into_target(self) -> Option<T> {
        match self {
            Self::Resolved(target) => Some(target),
            Self::Unresolved(_) => None,
        }
    }

    /// Structural location for a slot that is still unresolved.
    pub fn fallback(&self, anchor: &Location) -> Result<Option<Location>, DecodeError> {
        match self {
            Self::Unresolved(wrapper) => {
                expand_with(&wrapper.backup, anchor, &ExpandOptions::default()).map(Some)
            }
            Self::Resolved(_) => Ok(None),
        }
    }
}

impl<T> From<PlaceholderProperty> for PlaceholderSlot<T> {
    fn from(wrapper: PlaceholderProperty) -> Self {
        Self::new(wrapper)
    }
}
