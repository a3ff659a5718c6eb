use crate::Float;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: Float,
    pub y: Float,
}

impl Default for Point {
    fn default() -> Self {
        Self { x: 0., y: 0. }
    }
}

impl Point {
    pub fn new(x: Float, y: Float) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(&self, other: &Self) -> Float {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: &Self) -> Float {
        self.distance_squared(other).sqrt()
    }

    /// whether two points are within `tolerance` on both axes
    pub fn approx_eq(&self, other: &Self, tolerance: Float) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl From<(Float, Float)> for Point {
    fn from((x, y): (Float, Float)) -> Self {
        Self { x, y }
    }
}

/// Axis aligned clip region of the diagram.
///
/// Edges that go to infinity are finished far outside of it, so every edge crossing the
/// box is fully represented inside it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub fn new(min: Point, max: Point) -> Self {
        Self {
            min: Point::new(min.x.min(max.x), min.y.min(max.y)),
            max: Point::new(min.x.max(max.x), min.y.max(max.y)),
        }
    }

    /// Tight box around `points`, None if there is no point
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = *points.next()?;

        let mut bbox = Self {
            min: first,
            max: first,
        };
        for p in points {
            bbox.min.x = bbox.min.x.min(p.x);
            bbox.min.y = bbox.min.y.min(p.y);
            bbox.max.x = bbox.max.x.max(p.x);
            bbox.max.y = bbox.max.y.max(p.y);
        }
        Some(bbox)
    }

    /// Grow by a fifth of the span on each side. The `+ 1` keeps a margin even when all
    /// sites share an x or a y.
    pub fn padded(&self) -> Self {
        let dx = (self.width() + 1.) / 5.;
        let dy = (self.height() + 1.) / 5.;
        self.expanded(dx, dy)
    }

    pub fn expanded(&self, dx: Float, dy: Float) -> Self {
        Self {
            min: Point::new(self.min.x - dx, self.min.y - dy),
            max: Point::new(self.max.x + dx, self.max.y + dy),
        }
    }

    /// smallest box holding both
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    pub fn width(&self) -> Float {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> Float {
        self.max.y - self.min.y
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// An x coordinate no parabola of a site inside the box can reach the box from.
    /// Breakpoints evaluated against this directrix are well outside the box.
    pub fn far_directrix(&self) -> Float {
        self.max.x + 2. * (self.width() + self.height())
    }

    /// An x coordinate well to the left of the box
    pub fn far_left(&self) -> Float {
        self.min.x - 2. * (self.width() + self.height())
    }
}
