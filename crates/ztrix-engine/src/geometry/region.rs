use std::collections::BTreeSet;

use crate::GeometryError;

use super::{point::Point, rectangle::Rectangle, rotation::Rotation};

/// A non-empty set of grid cells.
///
/// A region knows its bounding rectangle and can enumerate its points. The
/// board relies on exactly these two capabilities: the bounding box for a
/// quick containment test, and the points for exact per-cell occupancy.
///
/// Implementors must uphold:
///
/// - the region contains at least one point,
/// - [`bounds`](Region::bounds) is the smallest rectangle covering every point,
/// - [`points`](Region::points) yields each point once, in the same order on
///   every call.
pub trait Region {
    /// Returns the smallest rectangle containing every point of the region.
    fn bounds(&self) -> Rectangle;

    /// Returns the points of the region in a stable order.
    fn points(&self) -> impl Iterator<Item = Point> + '_;

    /// Returns the number of points in the region.
    fn len(&self) -> usize {
        self.points().count()
    }

    /// Always `false`: a region has at least one point.
    fn is_empty(&self) -> bool {
        false
    }

    /// Creates a new region by translating every point by `offset`.
    ///
    /// The translated cells must stay within the range documented on [`Point`].
    fn translate(&self, offset: Point) -> PointSetRegion {
        PointSetRegion::from_parts(
            self.points().map(|p| p + offset).collect(),
            self.bounds().translated(offset),
        )
    }

    /// Creates a new region by rotating every point about `center`.
    ///
    /// The rotated cells must stay within the range documented on [`Point`].
    fn rotate(&self, direction: Rotation, center: Point) -> PointSetRegion {
        PointSetRegion::from_parts(
            self.points().map(|p| p.rotate(direction, center)).collect(),
            self.bounds().rotated(direction, center),
        )
    }
}

/// A region backed by an ordered set of distinct points.
///
/// Points iterate in row-major order (see [`Point`]'s ordering), so repeated
/// traversals always agree. The bounding rectangle is computed once.
///
/// # Example
///
/// ```
/// use ztrix_engine::{Point, PointSetRegion, Region as _};
///
/// let region = PointSetRegion::new([Point::new(1, 1), Point::new(0, 0), Point::new(1, 1)])?;
/// assert_eq!(region.len(), 2);
/// assert_eq!(region.bounds().maximum(), Point::new(2, 2));
/// # Ok::<(), ztrix_engine::GeometryError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PointSetRegion {
    points: BTreeSet<Point>,
    bounds: Rectangle,
}

impl PointSetRegion {
    /// Creates a region from a collection of points, dropping duplicates.
    ///
    /// Fails if the collection is empty, or if a point lies on `i32::MAX` so
    /// that the bounding rectangle cannot be represented.
    pub fn new<I>(points: I) -> Result<Self, GeometryError>
    where
        I: IntoIterator<Item = Point>,
    {
        let points: BTreeSet<Point> = points.into_iter().collect();
        let mut iter = points.iter().copied();
        let first = iter.next().ok_or(GeometryError::EmptyRegion)?;
        let (min, max) = iter.fold((first, first), |(min, max), p| {
            (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        Ok(Self {
            bounds: Rectangle::checked_spanning(min, max)?,
            points,
        })
    }

    fn from_parts(points: BTreeSet<Point>, bounds: Rectangle) -> Self {
        debug_assert!(!points.is_empty());
        Self { points, bounds }
    }

    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.points.contains(&point)
    }
}

impl Region for PointSetRegion {
    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().copied()
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}
