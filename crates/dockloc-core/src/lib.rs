#![forbid(unsafe_code)]

//! Core: value primitives for docking-location addressing.
//!
//! # Role in dockloc
//! `dockloc-core` holds the leaf types every location chain and persisted
//! property is made of. Nothing here knows about chains, roots, or
//! conversion; those live in the `dockloc` crate.
//!
//! # Primary types
//! - [`Side`] and [`PathSide`]: the compass vocabulary used by the builder
//!   and the positional vocabulary used by the flat path encoding.
//! - [`Fraction`]: a validated split size in `[0, 1]`.
//! - [`NodeId`] and [`NodeIdAllocator`]: stable ids for split nodes and leaves.
//! - [`Placeholder`]: opaque token standing in for a dockable that may be absent.
//! - [`NormRect`] and [`ScreenRect`]: normalized and pixel rectangles.

pub mod fraction;
pub mod geometry;
pub mod id;
pub mod side;

pub use fraction::{Fraction, FractionError};
pub use geometry::{NormRect, ScreenRect};
pub use id::{NodeId, NodeIdAllocator, NodeIdError, Placeholder};
pub use side::{PathSide, Side};
