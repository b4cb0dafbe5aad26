use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self { Self { x, y } }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self { Self { width, height } }

    pub fn area(self) -> i64 { i64::from(self.width) * i64::from(self.height) }
}

/// Axis-aligned rectangle in monitor pixel coordinates. The origin is the
/// top-left corner and y grows downwards.
///
/// Serialized flat, as `{ x, y, width, height }`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "FlatRect", into = "FlatRect")]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct FlatRect {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl From<FlatRect> for Rect {
    fn from(r: FlatRect) -> Self { Rect::new(r.x, r.y, r.width, r.height) }
}

impl From<Rect> for FlatRect {
    fn from(r: Rect) -> Self {
        FlatRect {
            x: r.origin.x,
            y: r.origin.y,
            width: r.size.width,
            height: r.size.height,
        }
    }
}

/// The usable region of a monitor once panels and reserved edges are removed.
pub type WorkArea = Rect;

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn x(&self) -> i32 { self.origin.x }

    pub fn y(&self) -> i32 { self.origin.y }

    pub fn width(&self) -> i32 { self.size.width }

    pub fn height(&self) -> i32 { self.size.height }

    pub fn max_x(&self) -> i32 { self.origin.x + self.size.width }

    pub fn max_y(&self) -> i32 { self.origin.y + self.size.height }

    pub fn mid_x(&self) -> i32 { self.origin.x + self.size.width / 2 }

    pub fn mid_y(&self) -> i32 { self.origin.y + self.size.height / 2 }

    pub fn is_empty(&self) -> bool { self.size.width <= 0 || self.size.height <= 0 }

    /// True when the interiors overlap. Rectangles that merely share an edge
    /// do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.origin.x < other.max_x()
            && other.origin.x < self.max_x()
            && self.origin.y < other.max_y()
            && other.origin.y < self.max_y()
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.origin.x >= self.origin.x
            && other.origin.y >= self.origin.y
            && other.max_x() <= self.max_x()
            && other.max_y() <= self.max_y()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(100, 0, 100, 100);
        let c = Rect::new(99, 99, 10, 10);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
        assert!(b.intersects(&c));
    }

    #[test]
    fn containment_is_inclusive_of_edges() {
        let area = Rect::new(10, 20, 1000, 600);
        assert!(area.contains_rect(&Rect::new(10, 20, 1000, 600)));
        assert!(area.contains_rect(&Rect::new(500, 300, 510, 320)));
        assert!(!area.contains_rect(&Rect::new(500, 300, 511, 320)));
        assert!(!area.contains_rect(&Rect::new(9, 20, 10, 10)));
    }

    #[test]
    fn serializes_flat() {
        let rect: Rect = toml::from_str("x = 5\ny = 6\nwidth = 70\nheight = 80").unwrap();
        assert_eq!(rect, Rect::new(5, 6, 70, 80));
        assert_eq!(
            serde_json::to_string(&rect).unwrap(),
            r#"{"x":5,"y":6,"width":70,"height":80}"#
        );
    }

    #[test]
    fn degenerate_rects_are_empty() {
        assert!(Rect::new(0, 0, 0, 10).is_empty());
        assert!(Rect::new(0, 0, 10, -1).is_empty());
        assert!(!Rect::new(0, 0, 1, 1).is_empty());
    }
}
