use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// A point in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance, kept in i64 so large layouts cannot overflow.
    pub fn distance_sq(self, other: Point) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Axis-aligned rectangle in layout pixels. Containment is half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn with_origin(self, origin: Point) -> Self {
        Self { x: origin.x, y: origin.y, ..self }
    }

    /// Point inside (or on the border of) the rectangle closest to `p`.
    pub fn clamp_point(&self, p: Point) -> Point {
        let max_x = (self.right() - 1).max(self.x);
        let max_y = (self.bottom() - 1).max(self.y);
        Point::new(p.x.clamp(self.x, max_x), p.y.clamp(self.y, max_y))
    }

    /// Squared distance from `p` to the nearest point of the rectangle; zero when inside.
    pub fn distance_sq(&self, p: Point) -> i64 {
        self.clamp_point(p).distance_sq(p)
    }

    /// True when the half-open spans `[a0, a1)` and `[b0, b1)` share at least one pixel.
    pub fn spans_overlap(a0: i32, a1: i32, b0: i32, b1: i32) -> bool {
        a0 < b1 && b0 < a1
    }
}

bitflags! {
    /// Set of rectangle edges. Used for tiling, resize grips and snap directions.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Edges: u8 {
        const TOP    = 0b0001;
        const BOTTOM = 0b0010;
        const LEFT   = 0b0100;
        const RIGHT  = 0b1000;
    }
}

impl Edges {
    pub const TOP_LEFT: Edges = Edges::TOP.union(Edges::LEFT);
    pub const TOP_RIGHT: Edges = Edges::TOP.union(Edges::RIGHT);
    pub const BOTTOM_LEFT: Edges = Edges::BOTTOM.union(Edges::LEFT);
    pub const BOTTOM_RIGHT: Edges = Edges::BOTTOM.union(Edges::RIGHT);

    /// Axes touched by these edges.
    pub fn axes(self) -> Axes {
        let mut axes = Axes::empty();
        if self.intersects(Edges::LEFT | Edges::RIGHT) {
            axes |= Axes::HORIZONTAL;
        }
        if self.intersects(Edges::TOP | Edges::BOTTOM) {
            axes |= Axes::VERTICAL;
        }
        axes
    }

    /// Neither opposite pair is set together.
    pub fn is_consistent(self) -> bool {
        !self.contains(Edges::LEFT | Edges::RIGHT) && !self.contains(Edges::TOP | Edges::BOTTOM)
    }
}

bitflags! {
    /// Maximization axes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Axes: u8 {
        const HORIZONTAL = 0b01;
        const VERTICAL   = 0b10;
    }
}

bitflags! {
    /// Keyboard modifiers as reported by the seat.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const SUPER = 0b1000;
    }
}

/// Cardinal direction in the output layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn edge(self) -> Edges {
        match self {
            Direction::Up => Edges::TOP,
            Direction::Down => Edges::BOTTOM,
            Direction::Left => Edges::LEFT,
            Direction::Right => Edges::RIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_is_half_open() {
        let r = Rect::new(0, 0, 10, 10);
        assert!(r.contains(Point::new(0, 0)));
        assert!(r.contains(Point::new(9, 9)));
        assert!(!r.contains(Point::new(10, 5)));
        assert!(!r.contains(Point::new(5, 10)));
    }

    #[test]
    fn test_distance_to_rect() {
        let r = Rect::new(100, 100, 50, 50);
        assert_eq!(r.distance_sq(Point::new(120, 120)), 0);
        assert_eq!(r.distance_sq(Point::new(97, 120)), 9);
        assert_eq!(r.distance_sq(Point::new(152, 153)), 9 + 16);
    }

    #[test]
    fn test_edges_axes() {
        assert_eq!(Edges::LEFT.axes(), Axes::HORIZONTAL);
        assert_eq!(Edges::BOTTOM_RIGHT.axes(), Axes::all());
        assert!(Edges::TOP_LEFT.is_consistent());
        assert!(!(Edges::LEFT | Edges::RIGHT).is_consistent());
    }
}
