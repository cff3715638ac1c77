//! Collision detection for axis-aligned boxes and circles
//!
//! All tests are pure functions over immutable inputs. Overlap is strict:
//! shapes that only share an edge, a corner or a tangent point do not
//! collide.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected geometric input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("{what} must not be negative (got {value})")]
    NegativeExtent { what: &'static str, value: i64 },
}

fn non_negative(what: &'static str, value: i32) -> Result<u32, GeometryError> {
    u32::try_from(value).map_err(|_| GeometryError::NegativeExtent {
        what,
        value: i64::from(value),
    })
}

/// Signed form a rectangle is deserialized through, so negative extents are rejected
#[derive(Debug, Clone, Copy, Deserialize)]
struct RawRect {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

/// An axis-aligned rectangle with its origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawRect")]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl TryFrom<RawRect> for Rect {
    type Error = GeometryError;

    fn try_from(raw: RawRect) -> Result<Self, Self::Error> {
        Self::from_signed(raw.x, raw.y, raw.w, raw.h)
    }
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Build a rectangle from signed extents, rejecting negative width or height
    pub fn from_signed(x: i32, y: i32, w: i32, h: i32) -> Result<Self, GeometryError> {
        Ok(Self {
            x,
            y,
            w: non_negative("width", w)?,
            h: non_negative("height", h)?,
        })
    }

    #[inline]
    pub fn left(&self) -> i64 {
        i64::from(self.x)
    }

    #[inline]
    pub fn top(&self) -> i64 {
        i64::from(self.y)
    }

    #[inline]
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.w)
    }

    #[inline]
    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.h)
    }

    /// Same rectangle moved by (dx, dy), clamped to the `i32` range
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..*self
        }
    }
}

/// A circle given by its integer center and radius
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Circle {
    pub x: i32,
    pub y: i32,
    pub r: u32,
}

impl Circle {
    pub const fn new(x: i32, y: i32, r: u32) -> Self {
        Self { x, y, r }
    }

    /// Build a circle from a signed radius, rejecting negative values
    pub fn from_signed(x: i32, y: i32, r: i32) -> Result<Self, GeometryError> {
        Ok(Self {
            x,
            y,
            r: non_negative("radius", r)?,
        })
    }
}

/// Squared euclidean distance between two points.
///
/// Computed in 128 bits so any pair of `i32` coordinates is exact.
#[inline]
pub fn distance_squared(x1: i32, y1: i32, x2: i32, y2: i32) -> i128 {
    let dx = i128::from(x2) - i128::from(x1);
    let dy = i128::from(y2) - i128::from(y1);
    dx * dx + dy * dy
}

/// Strict overlap test for a single pair of rectangles
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    !(a.bottom() <= b.top() || a.top() >= b.bottom() || a.right() <= b.left() || a.left() >= b.right())
}

/// Returns true if any rectangle of `a` overlaps any rectangle of `b`.
///
/// Collider sets are small (a sprite silhouette is a dozen strips at most),
/// so every pair is tested. Either set being empty means no collision.
pub fn rect_sets_collide(a: &[Rect], b: &[Rect]) -> bool {
    a.iter()
        .any(|box_a| b.iter().any(|box_b| rects_overlap(box_a, box_b)))
}

/// Returns true if the two circles overlap.
///
/// Circles whose centers are exactly `a.r + b.r` apart are touching and do
/// not collide.
pub fn circles_collide(a: &Circle, b: &Circle) -> bool {
    let total_radius = i128::from(a.r) + i128::from(b.r);
    distance_squared(a.x, a.y, b.x, b.y) < total_radius * total_radius
}

/// Point of `r` closest to `(x, y)`
pub fn closest_point(x: i32, y: i32, r: &Rect) -> (i64, i64) {
    let cx = i64::from(x).clamp(r.left(), r.right());
    let cy = i64::from(y).clamp(r.top(), r.bottom());
    (cx, cy)
}

/// Returns true if the circle overlaps the rectangle.
///
/// A zero-radius circle never collides: the squared distance to the
/// closest point can never be below zero.
pub fn circle_rect_collides(c: &Circle, r: &Rect) -> bool {
    let (cx, cy) = closest_point(c.x, c.y, r);
    let dx = i128::from(cx - i64::from(c.x));
    let dy = i128::from(cy - i64::from(c.y));
    let radius = i128::from(c.r);
    dx * dx + dy * dy < radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disjoint_rects_do_not_collide() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(50, 50, 10, 10);
        assert!(!rect_sets_collide(&[a], &[b]));
        assert!(!rect_sets_collide(&[b], &[a]));
    }

    #[test]
    fn test_overlapping_rects_collide() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert!(rect_sets_collide(&[a], &[b]));

        // Containment is overlap too
        let inner = Rect::new(2, 2, 3, 3);
        assert!(rect_sets_collide(&[a], &[inner]));
    }

    #[test]
    fn test_edge_touching_rects_do_not_collide() {
        let a = Rect::new(0, 0, 10, 10);
        let right = Rect::new(10, 0, 10, 10);
        let below = Rect::new(0, 10, 10, 10);
        let corner = Rect::new(10, 10, 10, 10);
        assert!(!rect_sets_collide(&[a], &[right]));
        assert!(!rect_sets_collide(&[a], &[below]));
        assert!(!rect_sets_collide(&[a], &[corner]));

        // One pixel further in and they overlap
        assert!(rect_sets_collide(&[a], &[right.offset(-1, 0)]));
    }

    #[test]
    fn test_empty_sets_never_collide() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(!rect_sets_collide(&[], &[a]));
        assert!(!rect_sets_collide(&[a], &[]));
        assert!(!rect_sets_collide(&[], &[]));
    }

    #[test]
    fn test_any_pair_in_sets_counts() {
        let a = [Rect::new(0, 0, 4, 1), Rect::new(0, 1, 4, 1), Rect::new(0, 2, 4, 1)];
        let b = [Rect::new(100, 100, 5, 5), Rect::new(3, 2, 5, 5)];
        assert!(rect_sets_collide(&a, &b));
        assert!(!rect_sets_collide(&a[..2], &b));
    }

    #[test]
    fn test_zero_height_strip() {
        let block = Rect::new(0, 0, 10, 10);
        // Lying on an edge: no overlap
        assert!(!rect_sets_collide(&[Rect::new(0, 0, 10, 0)], &[block]));
        assert!(!rect_sets_collide(&[Rect::new(0, 10, 10, 0)], &[block]));
        // Strictly inside the block still counts
        assert!(rect_sets_collide(&[Rect::new(0, 5, 10, 0)], &[block]));
    }

    #[test]
    fn test_proper_overlap_matches_interval_test() {
        // Sweep b across a and compare against the interval formulation
        let a = Rect::new(10, 10, 8, 6);
        for bx in 0..30 {
            for by in 0..30 {
                let b = Rect::new(bx, by, 5, 4);
                let expected = i64::from(a.x) < b.right()
                    && a.right() > i64::from(b.x)
                    && i64::from(a.y) < b.bottom()
                    && a.bottom() > i64::from(b.y);
                assert_eq!(rect_sets_collide(&[a], &[b]), expected, "b at ({}, {})", bx, by);
            }
        }
    }

    #[test]
    fn test_touching_circles_do_not_collide() {
        let a = Circle::new(0, 0, 5);
        let b = Circle::new(10, 0, 5);
        assert!(!circles_collide(&a, &b));
    }

    #[test]
    fn test_overlapping_circles_collide() {
        let a = Circle::new(0, 0, 5);
        let b = Circle::new(9, 0, 5);
        assert!(circles_collide(&a, &b));
    }

    #[test]
    fn test_circles_collide_is_symmetric() {
        let circles = [
            Circle::new(0, 0, 5),
            Circle::new(9, 0, 5),
            Circle::new(10, 0, 5),
            Circle::new(-3, 4, 0),
            Circle::new(100, -100, 150),
            Circle::new(7, 7, 1),
        ];
        for a in &circles {
            for b in &circles {
                assert_eq!(circles_collide(a, b), circles_collide(b, a));
            }
        }
    }

    #[test]
    fn test_large_coordinates_do_not_overflow() {
        let a = Circle::new(i32::MIN, i32::MIN, u32::MAX);
        let b = Circle::new(i32::MAX, i32::MAX, u32::MAX);
        // Distance ~6.07e9, radius sum ~8.59e9
        assert!(circles_collide(&a, &b));

        let wide = Rect::new(i32::MAX - 1, 0, u32::MAX, 1);
        assert_eq!(wide.right(), i64::from(i32::MAX) - 1 + i64::from(u32::MAX));
    }

    #[test]
    fn test_circle_rect_far_corner() {
        let rect = Rect::new(5, 5, 10, 10);
        // Closest point (5, 5): squared distance 50
        assert!(!circle_rect_collides(&Circle::new(0, 0, 3), &rect));
        assert!(circle_rect_collides(&Circle::new(0, 0, 10), &rect));
    }

    #[test]
    fn test_circle_rect_center_inside() {
        let rect = Rect::new(0, 0, 20, 20);
        assert!(circle_rect_collides(&Circle::new(10, 10, 1), &rect));
    }

    #[test]
    fn test_circle_rect_tangent_edge() {
        let rect = Rect::new(10, 0, 10, 10);
        // Center 5 px left of the edge, radius 5: tangent, not colliding
        assert!(!circle_rect_collides(&Circle::new(5, 5, 5), &rect));
        assert!(circle_rect_collides(&Circle::new(5, 5, 6), &rect));
    }

    #[test]
    fn test_zero_radius_never_collides() {
        let rect = Rect::new(0, 0, 20, 20);
        assert!(!circle_rect_collides(&Circle::new(10, 10, 0), &rect));
        assert!(!circle_rect_collides(&Circle::new(0, 0, 0), &rect));
        assert!(!circles_collide(&Circle::new(1, 1, 0), &Circle::new(1, 1, 0)));
    }

    #[test]
    fn test_circle_vs_zero_area_rect() {
        let point = Rect::new(3, 0, 0, 0);
        assert!(circle_rect_collides(&Circle::new(0, 0, 5), &point));
        // Radius 3 reaches the point exactly: tangent
        assert!(!circle_rect_collides(&Circle::new(0, 0, 3), &point));
        assert!(!circle_rect_collides(&Circle::new(0, 0, 0), &Rect::new(0, 0, 0, 0)));

        let segment = Rect::new(10, 0, 0, 20);
        assert!(circle_rect_collides(&Circle::new(8, 10, 3), &segment));
        assert!(!circle_rect_collides(&Circle::new(8, 10, 2), &segment));
    }

    #[test]
    fn test_offset_saturates() {
        let rect = Rect::new(i32::MAX - 1, i32::MIN + 1, 4, 4);
        assert_eq!(rect.offset(5, -5), Rect::new(i32::MAX, i32::MIN, 4, 4));
        assert_eq!(rect.offset(-1, 1), Rect::new(i32::MAX - 2, i32::MIN + 2, 4, 4));
    }

    #[test]
    fn test_closest_point_clamps() {
        let rect = Rect::new(5, 5, 10, 10);
        assert_eq!(closest_point(0, 0, &rect), (5, 5));
        assert_eq!(closest_point(30, 8, &rect), (15, 8));
        assert_eq!(closest_point(8, 9, &rect), (8, 9));
    }

    #[test]
    fn test_negative_extents_rejected() {
        assert_eq!(
            Rect::from_signed(0, 0, -1, 5),
            Err(GeometryError::NegativeExtent {
                what: "width",
                value: -1
            })
        );
        assert!(Rect::from_signed(0, 0, 5, -3).is_err());
        assert!(Circle::from_signed(0, 0, -2).is_err());
        assert_eq!(Rect::from_signed(-4, -4, 0, 0), Ok(Rect::new(-4, -4, 0, 0)));
    }

    #[test]
    fn test_rect_deserialize_validates() {
        let rect: Rect = serde_json::from_str(r#"{"x": 300, "y": 40, "w": 40, "h": 400}"#).unwrap();
        assert_eq!(rect, Rect::new(300, 40, 40, 400));

        let bad: Result<Rect, _> = serde_json::from_str(r#"{"x": 0, "y": 0, "w": -40, "h": 4}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_distance_squared() {
        assert_eq!(distance_squared(0, 0, 3, 4), 25);
        assert_eq!(distance_squared(3, 4, 0, 0), 25);
        assert_eq!(distance_squared(-1, -1, -1, -1), 0);
    }
}
