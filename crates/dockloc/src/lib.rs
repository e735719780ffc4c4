#![forbid(unsafe_code)]

//! Docking-location addressing: chains, flat properties, and conversion.
//!
//! # Role in dockloc
//! `dockloc` describes *where* a dockable sits inside a docking layout
//! without holding on to the live layout itself. A [`Location`] is an
//! immutable chain of steps starting at a root area; a [`LocationProperty`]
//! is the flat, serializable encoding of the same address.
//!
//! # Primary responsibilities
//! - **Roots**: [`RootArea`] names the region a chain starts in, and its
//!   [`AreaKind`] decides which [`Capabilities`] the next step may use.
//! - **Builder**: fluent, fallible steps (`north`, `stack`, `screen`, ...)
//!   plus [`Location::aside`] for "next to this one".
//! - **Conversion**: [`collapse`] flattens a chain into a property with
//!   successor links; [`expand`] rebuilds it onto an anchor chain.
//! - **Placeholders**: [`PersistedProperty`] may wrap a property behind a
//!   stable token that a [`StableIdRegistry`] resolves to a live target.
//! - **Persistence**: [`persist::PersistedLocation`] is the versioned
//!   envelope a layout file stores per dockable.
//!
//! # Example
//! ```
//! use dockloc::{Location, collapse, expand};
//!
//! let location = Location::center().west(0.25)?.stack_append()?;
//! let property = collapse(&location);
//! assert_eq!(expand(&property, &Location::center())?, location);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod catalog;
pub mod convert;
pub mod error;
pub mod location;
pub mod persist;
pub mod placeholder;
pub mod property;
pub mod root;

pub use catalog::{RootCatalog, StandardRoots};
pub use convert::{DEFAULT_MAX_SUCCESSOR_DEPTH, ExpandOptions, collapse, expand, expand_with};
pub use error::{DecodeError, LocationError};
pub use location::{Ancestors, Location, SlotIndex, Step};
pub use persist::{LOCATION_SCHEMA_VERSION, PersistedLocation, RootRef};
pub use placeholder::{
    MapRegistry, PlaceholderSlot, Resolution, StableIdRegistry, resolve, resolve_with,
};
pub use property::{
    Encoding, IndexProperty, Levels, LocationProperty, PathNode, PathProperty, PersistedProperty,
    PlaceholderProperty, RectangleProperty, ScreenProperty,
};
pub use root::{AreaKind, Capabilities, ExtendedMode, RootArea, RootKind};

pub use dockloc_core::{
    Fraction, FractionError, NodeId, NodeIdAllocator, NodeIdError, NormRect, PathSide, Placeholder,
    ScreenRect, Side,
};
