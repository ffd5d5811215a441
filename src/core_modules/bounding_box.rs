// THEORY:
// A `BoundingBox` (a "Dot" on the device) is the tracker's whole notion of a marker:
// an anchor corner plus extents. Extents follow the inclusive convention used
// throughout the tracker: `w` and `h` are `max - min`, so a single pixel is a box of
// size zero and the box covers columns `x..=x + w` and rows `y..=y + h`.
//
// Coordinates are 0-based. `one_based` converts once for consumers that still expect
// the device's 1-based convention.

/// A simple struct to represent a 2D pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// The rectangle believed to enclose one reflective marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BoundingBox {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl BoundingBox {
    pub fn new(x: usize, y: usize, w: usize, h: usize) -> Self {
        Self { x, y, w, h }
    }

    /// A zero-sized box at a single pixel.
    pub fn at(point: Point) -> Self {
        Self::new(point.x, point.y, 0, 0)
    }

    /// The box spanning two inclusive corners.
    pub fn from_corners(min: Point, max: Point) -> Self {
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    pub fn min(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The bottom-right corner, inclusive.
    pub fn max(&self) -> Point {
        Point::new(self.x + self.w, self.y + self.h)
    }

    /// Integer midpoint of the box.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn contains(&self, point: Point) -> bool {
        let max = self.max();
        point.x >= self.x && point.x <= max.x && point.y >= self.y && point.y <= max.y
    }

    /// Grows the box by `margin` on every side, clamped to a `width x height` frame.
    pub fn expanded(&self, margin: usize, width: usize, height: usize) -> BoundingBox {
        let min_x = self.x.saturating_sub(margin);
        let min_y = self.y.saturating_sub(margin);
        let max_x = (self.x + self.w + margin).min(width - 1);
        let max_y = (self.y + self.h + margin).min(height - 1);
        BoundingBox::from_corners(Point::new(min_x, min_y), Point::new(max_x, max_y))
    }

    /// True when every covered pixel lies inside a `width x height` frame.
    pub fn fits_within(&self, width: usize, height: usize) -> bool {
        self.x + self.w < width && self.y + self.h < height
    }

    /// The same box in 1-based coordinates.
    pub fn one_based(&self) -> BoundingBox {
        BoundingBox::new(self.x + 1, self.y + 1, self.w, self.h)
    }
}

/// Accumulates the extent of a set of pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct Extent {
    bounds: Option<(Point, Point)>,
}

impl Extent {
    pub fn include(&mut self, point: Point) {
        self.bounds = Some(match self.bounds {
            None => (point, point),
            Some((min, max)) => (
                Point::new(min.x.min(point.x), min.y.min(point.y)),
                Point::new(max.x.max(point.x), max.y.max(point.y)),
            ),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    pub fn to_box(&self) -> Option<BoundingBox> {
        self.bounds
            .map(|(min, max)| BoundingBox::from_corners(min, max))
    }
}
