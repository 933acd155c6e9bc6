use std::iter::FusedIterator;

use crate::GeometryError;

use super::{point::Point, region::Region, rotation::Rotation};

/// An axis-aligned rectangle of grid cells.
///
/// The minimum corner is inclusive and the maximum corner is exclusive, so
/// `Rectangle::new((0, 0), (10, 20))` covers columns `0..10` and rows `0..20`.
/// A rectangle always covers at least one cell.
///
/// # Example
///
/// ```
/// use ztrix_engine::{Point, Rectangle, Region as _};
///
/// let rect = Rectangle::from_coords(-1, -1, 2, 2)?;
/// assert!(rect.contains(Point::ORIGIN));
/// assert!(!rect.contains(Point::new(2, 0)));
/// assert_eq!(rect.points().count(), 9);
/// # Ok::<(), ztrix_engine::GeometryError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("[{minimum} - {maximum})")]
pub struct Rectangle {
    minimum: Point,
    maximum: Point,
}

impl Rectangle {
    /// Creates a rectangle from its inclusive minimum and exclusive maximum.
    ///
    /// Fails unless `maximum` is strictly greater than `minimum` on both axes.
    pub const fn new(minimum: Point, maximum: Point) -> Result<Self, GeometryError> {
        if maximum.x <= minimum.x || maximum.y <= minimum.y {
            return Err(GeometryError::EmptyRectangle { minimum, maximum });
        }
        Ok(Self { minimum, maximum })
    }

    pub const fn from_coords(
        min_x: i32,
        min_y: i32,
        max_x: i32,
        max_y: i32,
    ) -> Result<Self, GeometryError> {
        Self::new(Point::new(min_x, min_y), Point::new(max_x, max_y))
    }

    /// Smallest rectangle covering both cells `a` and `b`.
    ///
    /// Fails if the exclusive maximum would exceed `i32::MAX`.
    pub(crate) fn checked_spanning(a: Point, b: Point) -> Result<Self, GeometryError> {
        let corner = Point::new(a.x.max(b.x), a.y.max(b.y));
        let (Some(max_x), Some(max_y)) = (corner.x.checked_add(1), corner.y.checked_add(1)) else {
            return Err(GeometryError::CoordinateOverflow { point: corner });
        };
        Ok(Self {
            minimum: Point::new(a.x.min(b.x), a.y.min(b.y)),
            maximum: Point::new(max_x, max_y),
        })
    }

    /// Smallest rectangle covering both cells `a` and `b`.
    ///
    /// Both cells must lie below `i32::MAX` on each axis.
    #[must_use]
    pub(crate) fn spanning(a: Point, b: Point) -> Self {
        Self {
            minimum: Point::new(a.x.min(b.x), a.y.min(b.y)),
            maximum: Point::new(a.x.max(b.x) + 1, a.y.max(b.y) + 1),
        }
    }

    #[must_use]
    pub const fn minimum(&self) -> Point {
        self.minimum
    }

    #[must_use]
    pub const fn maximum(&self) -> Point {
        self.maximum
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        (self.maximum.x - self.minimum.x).unsigned_abs()
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        (self.maximum.y - self.minimum.y).unsigned_abs()
    }

    /// Number of cells covered by the rectangle.
    #[must_use]
    pub fn area(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    #[must_use]
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.minimum.x
            && point.y >= self.minimum.y
            && point.x < self.maximum.x
            && point.y < self.maximum.y
    }

    /// Checks whether the bounding box of `region` lies within this rectangle.
    ///
    /// This compares bounding boxes only. Exact per-cell checks are left to
    /// [`Board::is_region_empty`](crate::Board::is_region_empty).
    #[must_use]
    pub fn contains_region<R>(&self, region: &R) -> bool
    where
        R: Region + ?Sized,
    {
        let bounds = region.bounds();
        bounds.minimum.x >= self.minimum.x
            && bounds.minimum.y >= self.minimum.y
            && bounds.maximum.x <= self.maximum.x
            && bounds.maximum.y <= self.maximum.y
    }

    #[must_use]
    pub fn translated(self, offset: Point) -> Self {
        Self {
            minimum: self.minimum + offset,
            maximum: self.maximum + offset,
        }
    }

    /// Rotates the rectangle about `center`.
    ///
    /// The two corner cells are rotated and the result re-normalized, since a
    /// rotation does not keep the minimum corner at the minimum.
    #[must_use]
    pub fn rotated(self, direction: Rotation, center: Point) -> Self {
        let first = self.minimum.rotate(direction, center);
        let last = (self.maximum - Point::new(1, 1)).rotate(direction, center);
        Self::spanning(first, last)
    }
}

impl Region for Rectangle {
    fn bounds(&self) -> Rectangle {
        *self
    }

    fn points(&self) -> impl Iterator<Item = Point> + '_ {
        RectanglePoints {
            rect: *self,
            next: self.minimum,
        }
    }

    fn len(&self) -> usize {
        self.area()
    }
}

/// Row-major iterator over the cells of a [`Rectangle`].
#[derive(Debug, Clone)]
struct RectanglePoints {
    rect: Rectangle,
    next: Point,
}

impl Iterator for RectanglePoints {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.next.y >= self.rect.maximum.y {
            return None;
        }
        let point = self.next;
        self.next.x += 1;
        if self.next.x >= self.rect.maximum.x {
            self.next.x = self.rect.minimum.x;
            self.next.y += 1;
        }
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.next.y >= self.rect.maximum.y {
            0
        } else {
            let full_rows = (self.rect.maximum.y - self.next.y - 1).unsigned_abs() as usize;
            let in_row = (self.rect.maximum.x - self.next.x).unsigned_abs() as usize;
            full_rows * self.rect.width() as usize + in_row
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RectanglePoints {}

impl FusedIterator for RectanglePoints {}
