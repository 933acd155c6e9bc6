//! Exact integer geometry on the grid.
//!
//! - [`Point`] - positions, offsets and sizes
//! - [`Rotation`] - the four rotation states and their group law
//! - [`Rectangle`] - half-open axis-aligned cell rectangles
//! - [`Region`] / [`PointSetRegion`] - arbitrary non-empty cell sets

pub use self::{point::*, rectangle::*, region::*, rotation::*};

pub(crate) mod point;
pub(crate) mod rectangle;
pub(crate) mod region;
pub(crate) mod rotation;
