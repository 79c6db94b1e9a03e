// Shared geometry and boundary types for the simulation.

/// A position in field pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned bounding box, stored as top-left corner plus extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Builds a rect of the given extent centered on `center`.
    pub fn centered(center: Point, width: f64, height: f64) -> Self {
        Rect {
            x: center.x - width / 2.0,
            y: center.y - height / 2.0,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// AABB overlap check. Touching edges do not count as overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}

/// Discriminates the two damageable entity kinds for snapshot consumers, so
/// renderers never have to sniff concrete types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Defender,
    Adversary,
}

/// Commands the input collaborator may feed into the simulation between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimCommand {
    PlaceDefender { row: usize, col: usize },
    RemoveDefender { row: usize, col: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_centered_edges() {
        let r = Rect::centered(Point { x: 100.0, y: 50.0 }, 60.0, 80.0);
        assert_eq!(r.left(), 70.0);
        assert_eq!(r.right(), 130.0);
        assert_eq!(r.top(), 10.0);
        assert_eq!(r.bottom(), 90.0);
        let c = r.center();
        assert_eq!(c.x, 100.0);
        assert_eq!(c.y, 50.0);
    }

    #[test]
    fn test_rect_intersects() {
        let a = Rect::centered(Point { x: 0.0, y: 0.0 }, 10.0, 10.0);
        let b = Rect::centered(Point { x: 8.0, y: 0.0 }, 10.0, 10.0);
        let c = Rect::centered(Point { x: 20.0, y: 0.0 }, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));

        // Exactly touching edges are not an overlap.
        let d = Rect::centered(Point { x: 10.0, y: 0.0 }, 10.0, 10.0);
        assert!(!a.intersects(&d));
    }

    #[test]
    fn test_rect_contains() {
        let r = Rect {
            x: 50.0,
            y: 50.0,
            width: 80.0,
            height: 80.0,
        };
        assert!(r.contains(Point { x: 50.0, y: 50.0 }));
        assert!(r.contains(Point { x: 129.9, y: 129.9 }));
        assert!(!r.contains(Point { x: 130.0, y: 90.0 }));
        assert!(!r.contains(Point { x: 49.9, y: 90.0 }));
    }
}
