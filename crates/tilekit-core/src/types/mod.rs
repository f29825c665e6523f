//! Value types shared by the document and the property model.
//!
//! ## Modules
//!
//! - [`geometry`]: integer `Point` and `Size` used for tile offsets and tile sizes.
//! - [`color`]: RGB `Color` used for the tileset transparent color.

pub mod color;
pub mod geometry;

pub use color::Color;
pub use geometry::{Point, Size};
