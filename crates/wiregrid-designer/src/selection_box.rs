//! Rubber-band selection rectangle.

use wiregrid_core::{Bounds, Point};

/// Rectangle spanned by a fixed start corner and a moving last corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SelectionBox {
    start: Point,
    end: Point,
}

impl SelectionBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// Top-left corner.
    pub fn min(&self) -> Point {
        Point::new(self.start.x.min(self.end.x), self.start.y.min(self.end.y))
    }

    /// Bottom-right corner.
    pub fn max(&self) -> Point {
        Point::new(self.start.x.max(self.end.x), self.start.y.max(self.end.y))
    }

    /// Anchors both corners at `p`.
    pub fn set_start(&mut self, p: Point) {
        self.start = p;
        self.end = p;
    }

    pub fn set_last(&mut self, p: Point) {
        self.end = p;
    }

    pub fn fit(&mut self, bounds: &Bounds) {
        self.start = Point::new(bounds.min_x, bounds.min_y);
        self.end = Point::new(bounds.max_x, bounds.max_y);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn drag(&mut self, dx: f64, dy: f64) {
        self.start = self.start.translated(dx, dy);
        self.end = self.end.translated(dx, dy);
    }

    /// True when `other` lies strictly inside the box.
    pub fn collide(&self, other: &Bounds) -> bool {
        self.as_bounds().strictly_contains(other)
    }

    pub fn inside(&self, x: f64, y: f64) -> bool {
        self.as_bounds().contains_point(x, y)
    }

    pub fn is_empty(&self) -> bool {
        self.as_bounds().is_empty()
    }

    /// Box extent, or `None` while it has no area.
    pub fn bounds(&self) -> Option<Bounds> {
        let b = self.as_bounds();
        (!b.is_empty()).then_some(b)
    }

    fn as_bounds(&self) -> Bounds {
        Bounds::new(self.start.x, self.start.y, self.end.x, self.end.y)
    }
}
