use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::rotation::Rotation;

/// A discrete point on the grid.
///
/// The same type is used for positions, offsets and sizes. Arithmetic is exact:
/// `+`, `-` and unary `-` work component-wise, and [`Point::rotate`] turns a
/// point by quarter turns without any floating point.
///
/// Components follow plain `i32` arithmetic and overflow is not checked. Cells
/// of regions and rectangles must stay strictly below `i32::MAX` on both axes,
/// since a bounding rectangle stores its maximum one past the last cell.
///
/// # Coordinate System
///
/// - X increases rightward (columns)
/// - Y increases upward (rows), so [`Point::DOWN`] is `(0, -1)`
///
/// Points order row-major: by `y` first, then by `x`. Sets of points therefore
/// iterate from the bottom row upward, left to right within a row.
///
/// # Example
///
/// ```
/// use ztrix_engine::{Point, Rotation};
///
/// let p = Point::new(2, 1);
/// assert_eq!(p + Point::new(1, 1), Point::new(3, 2));
/// assert_eq!(p.rotate(Rotation::Cw, Point::ORIGIN), Point::new(1, -2));
/// ```
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::Add,
    derive_more::Sub,
    derive_more::Neg,
)]
#[display("({x}, {y})")]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Self = Self::new(0, 0);
    pub const DOWN: Self = Self::new(0, -1);
    pub const LEFT: Self = Self::new(-1, 0);
    pub const RIGHT: Self = Self::new(1, 0);

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Rotates the point about `center` by `direction`.
    ///
    /// Each quarter turn maps the offset `(rx, ry)` from the center to
    /// `(ry, -rx)`, which is a clockwise turn when Y points up.
    #[must_use]
    pub const fn rotate(self, direction: Rotation, center: Point) -> Self {
        let mut rx = self.x - center.x;
        let mut ry = self.y - center.y;
        let mut i = 0;
        while i < direction.quarter_turns() {
            let tmp = rx;
            rx = ry;
            ry = -tmp;
            i += 1;
        }
        Self::new(center.x + rx, center.y + ry)
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
