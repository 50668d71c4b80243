//! Utilities for ghost-lang.

mod join;
mod location;
mod macros;

pub(crate) use join::Join;
pub use location::Location;
pub(crate) use macros::impl_enum_from;
