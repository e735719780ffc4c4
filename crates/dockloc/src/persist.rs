//! Persisted location envelope with schema versioning.
//!
//! A [`PersistedLocation`] records which root a location was captured from
//! and the property describing where inside that root it sits, optionally
//! behind a placeholder.
//!
//! # Schema Versioning Policy
//!
//! - **Additive fields** may be carried in `extensions` without a version bump.
//! - **Breaking changes** require incrementing [`LOCATION_SCHEMA_VERSION`].
//! - Loaders reject unknown versions with [`DecodeError::UnsupportedVersion`].
//!
//! # Usage
//!
//! ```
//! use dockloc::{Location, MapRegistry, ExpandOptions, StandardRoots};
//! use dockloc::persist::PersistedLocation;
//!
//! let location = Location::center().north(0.3)?.east(0.5)?.stack_append()?;
//! let json = PersistedLocation::capture(&location).to_json()?;
//!
//! let restored = PersistedLocation::from_json(&json)?.restore(
//!     &StandardRoots::new(),
//!     &MapRegistry::<()>::new(),
//!     &ExpandOptions::default(),
//! )?;
//! assert_eq!(restored.location(), Some(&location));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::BTreeMap;

use dockloc_core::Placeholder;
use serde::{Deserialize, Serialize};

use crate::catalog::RootCatalog;
use crate::convert::{ExpandOptions, collapse, expand_with};
use crate::error::DecodeError;
use crate::location::Location;
use crate::placeholder::{Resolution, StableIdRegistry, expand_backup, live_target};
use crate::property::{PersistedProperty, PlaceholderProperty};
use crate::root::{RootArea, RootKind};

/// Current persisted location schema version.
pub const LOCATION_SCHEMA_VERSION: u16 = 1;

fn default_location_version() -> u16 {
    LOCATION_SCHEMA_VERSION
}

/// Serializable reference to a root area.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RootRef {
    pub kind: RootKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl RootRef {
    #[must_use]
    pub fn of(area: &RootArea) -> Self {
        Self {
            kind: area.kind(),
            owner: area.owner().map(str::to_owned),
        }
    }

    /// Look the root up in `catalog`.
    pub fn locate<C>(&self, catalog: &C) -> Result<Location, DecodeError>
    where
        C: RootCatalog + ?Sized,
    {
        catalog
            .root(self.kind, self.owner.as_deref())
            .ok_or_else(|| DecodeError::UnknownRoot {
                kind: self.kind,
                owner: self.owner.clone(),
            })
    }
}

/// Where one dockable sat when its layout was saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedLocation {
    /// Schema version for migration detection.
    #[serde(default = "default_location_version")]
    pub schema_version: u16,
    /// Root the property is relative to.
    pub root: RootRef,
    /// Structural address, possibly behind a placeholder.
    pub property: PersistedProperty,
    /// Forward-compatible extension bag.
    #[serde(default)]
    pub extensions: BTreeMap<String, String>,
}

impl PersistedLocation {
    /// Record a location as a plain structural property.
    #[must_use]
    pub fn capture(location: &Location) -> Self {
        Self {
            schema_version: LOCATION_SCHEMA_VERSION,
            root: RootRef::of(location.root_area()),
            property: PersistedProperty::Direct(collapse(location)),
            extensions: BTreeMap::new(),
        }
    }

    /// Record a location behind a placeholder for a dockable that may be
    /// gone when the layout is restored.
    #[must_use]
    pub fn capture_with_placeholder(location: &Location, placeholder: Placeholder) -> Self {
        let backup = collapse(location);
        Self {
            property: PersistedProperty::Placeholder(PlaceholderProperty::new(placeholder, backup)),
            ..Self::capture(location)
        }
    }

    /// Validate version, nesting depth, and placeholder tokens.
    pub fn validate(&self, options: &ExpandOptions) -> Result<(), DecodeError> {
        if self.schema_version != LOCATION_SCHEMA_VERSION {
            return Err(DecodeError::UnsupportedVersion {
                found: self.schema_version,
                expected: LOCATION_SCHEMA_VERSION,
            });
        }
        options.validate()?;
        if let PersistedProperty::Placeholder(wrapper) = &self.property
            && wrapper.placeholder.is_empty()
        {
            return Err(DecodeError::EmptyPlaceholder);
        }
        options.check_depth(self.property.structural())
    }

    /// Validate, then resolve the property.
    ///
    /// A placeholder naming a live target resolves without consulting the
    /// catalog, so a dockable whose root area has gone is still found. The
    /// root is looked up only when a structural expansion is needed.
    pub fn restore<C, R>(
        &self,
        catalog: &C,
        registry: &R,
        options: &ExpandOptions,
    ) -> Result<Resolution<R::Target>, DecodeError>
    where
        C: RootCatalog + ?Sized,
        R: StableIdRegistry + ?Sized,
    {
        self.validate(options)?;
        match &self.property {
            PersistedProperty::Direct(property) => {
                let anchor = self.root.locate(catalog)?;
                expand_with(property, &anchor, options).map(Resolution::Fallback)
            }
            PersistedProperty::Placeholder(wrapper) => match live_target(wrapper, registry) {
                Some(target) => Ok(Resolution::Live(target)),
                None => expand_backup(wrapper, &self.root.locate(catalog)?, options),
            },
        }
    }

    pub fn to_json(&self) -> Result<String, DecodeError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StandardRoots;
    use crate::location::SlotIndex;
    use crate::placeholder::MapRegistry;
    use crate::property::{IndexProperty, LocationProperty};
    use dockloc_core::{ScreenRect, Side};

    fn options() -> ExpandOptions {
        ExpandOptions::default()
    }

    #[test]
    fn capture_records_root_and_property() {
        let location = Location::minimized(Side::South)
            .insert(SlotIndex::new(1))
            .expect("insert");
        let persisted = PersistedLocation::capture(&location);
        assert_eq!(persisted.schema_version, LOCATION_SCHEMA_VERSION);
        assert_eq!(persisted.root.kind, RootKind::Minimized(Side::South));
        assert_eq!(
            persisted.property,
            PersistedProperty::Direct(LocationProperty::Index(IndexProperty::new(SlotIndex::new(1))))
        );
        assert!(persisted.validate(&options()).is_ok());
    }

    #[test]
    fn json_round_trip_restores_same_chain() {
        let location = Location::working_area("editors")
            .and_then(|c| c.west(0.125))
            .and_then(|c| c.south(0.6))
            .and_then(|c| c.stack(SlotIndex::new(3)))
            .expect("chain");
        let json = PersistedLocation::capture(&location).to_json().expect("encode");
        let decoded = PersistedLocation::from_json(&json).expect("decode");
        let catalog = StandardRoots::new().with_working_area("editors");
        let registry: MapRegistry<()> = MapRegistry::new();
        let restored = decoded
            .restore(&catalog, &registry, &options())
            .expect("restore");
        assert_eq!(restored.location(), Some(&location));
    }

    #[test]
    fn placeholder_capture_prefers_live_target() {
        let location = Location::externalized()
            .screen(ScreenRect::new(-1600, 100, 640, 480))
            .expect("screen");
        let persisted =
            PersistedLocation::capture_with_placeholder(&location, Placeholder::new("dock:console"));
        let catalog = StandardRoots::new();

        let empty: MapRegistry<&str> = MapRegistry::new();
        let fallback = persisted.restore(&catalog, &empty, &options()).expect("fallback");
        assert_eq!(fallback.location(), Some(&location));

        let live: MapRegistry<&str> = [(Placeholder::new("dock:console"), "console")]
            .into_iter()
            .collect();
        let resolved = persisted.restore(&catalog, &live, &options()).expect("live");
        assert_eq!(resolved, Resolution::Live("console"));
    }

    #[test]
    fn validate_rejects_future_version_and_empty_placeholder() {
        let mut persisted = PersistedLocation::capture(&Location::center());
        persisted.schema_version = 9;
        assert_eq!(
            persisted.validate(&options()),
            Err(DecodeError::UnsupportedVersion {
                found: 9,
                expected: LOCATION_SCHEMA_VERSION
            })
        );

        let persisted =
            PersistedLocation::capture_with_placeholder(&Location::center(), Placeholder::new(""));
        assert_eq!(persisted.validate(&options()), Err(DecodeError::EmptyPlaceholder));
    }

    #[test]
    fn restore_reports_unknown_root() {
        let location = Location::working_area("gone").expect("root");
        let persisted = PersistedLocation::capture(&location);
        let registry: MapRegistry<()> = MapRegistry::new();
        assert_eq!(
            persisted.restore(&StandardRoots::new(), &registry, &options()),
            Err(DecodeError::UnknownRoot {
                kind: RootKind::WorkingArea,
                owner: Some("gone".to_owned()),
            })
        );
    }

    #[test]
    fn live_placeholder_survives_a_vanished_root() {
        let location = Location::working_area("gone")
            .and_then(|c| c.north(0.5))
            .expect("chain");
        let persisted =
            PersistedLocation::capture_with_placeholder(&location, Placeholder::new("dock:a"));
        let catalog = StandardRoots::new();

        let live: MapRegistry<&str> = [(Placeholder::new("dock:a"), "live")].into_iter().collect();
        assert_eq!(
            persisted.restore(&catalog, &live, &options()),
            Ok(Resolution::Live("live"))
        );

        let empty: MapRegistry<&str> = MapRegistry::new();
        assert_eq!(
            persisted.restore(&catalog, &empty, &options()),
            Err(DecodeError::UnknownRoot {
                kind: RootKind::WorkingArea,
                owner: Some("gone".to_owned()),
            })
        );
    }

    #[test]
    fn missing_version_defaults_to_current() {
        let json = r#"{"root":{"kind":"center"},"property":{"direct":{"kind":"path","nodes":[]}}}"#;
        let decoded = PersistedLocation::from_json(json).expect("decode");
        assert_eq!(decoded.schema_version, LOCATION_SCHEMA_VERSION);
        let registry: MapRegistry<()> = MapRegistry::new();
        let restored = decoded
            .restore(&StandardRoots::new(), &registry, &options())
            .expect("restore");
        assert_eq!(
            restored.location().map(ToString::to_string).as_deref(),
            Some("center.rectangle(0, 0, 1, 1)")
        );
    }

    #[test]
    fn unknown_encoding_surfaces_as_json_error() {
        let json = r#"{"root":{"kind":"center"},"property":{"direct":{"kind":"hexagon"}}}"#;
        assert!(matches!(
            PersistedLocation::from_json(json),
            Err(DecodeError::Json(_))
        ));
    }
}
