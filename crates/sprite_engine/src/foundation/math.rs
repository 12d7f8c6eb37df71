//! Math utilities and types
//!
//! Provides the 2D math types used by sprites: vectors, the integer pixel
//! rectangle used for texture regions and bounding boxes, and RGBA tints.

use serde::{Deserialize, Serialize};

pub use nalgebra::{Matrix4, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Integer rectangle in pixel space
///
/// `(x, y)` is the top-left corner. Used both as a texture source region and
/// as a sprite's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl Rect {
    /// All-zero rectangle
    pub const EMPTY: Self = Self::new(0, 0, 0, 0);

    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Left edge (same as `x`)
    pub const fn left(&self) -> i32 {
        self.x
    }

    /// Right edge, exclusive; saturates at `i32::MAX`
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Top edge (same as `y`)
    pub const fn top(&self) -> i32 {
        self.y
    }

    /// Bottom edge, exclusive; saturates at `i32::MAX`
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Whether every field is zero
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Same size, moved so the top-left corner sits at `(x, y)`
    pub const fn at(&self, x: i32, y: i32) -> Self {
        Self::new(x, y, self.width, self.height)
    }

    /// Strict overlap test
    ///
    /// Rectangles that only share an edge do not intersect. The test is
    /// symmetric in its arguments. Edges are computed in `i64`, so rectangles
    /// near the ends of the `i32` range compare exactly.
    pub fn intersects(&self, other: &Self) -> bool {
        let [left, right, top, bottom] = self.wide_edges();
        let [other_left, other_right, other_top, other_bottom] = other.wide_edges();
        other_left < right && left < other_right && other_top < bottom && top < other_bottom
    }

    /// Whether the point lies inside the rectangle (right/bottom exclusive)
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let [left, right, top, bottom] = self.wide_edges();
        let (x, y) = (i64::from(x), i64::from(y));
        left <= x && x < right && top <= y && y < bottom
    }

    /// `[left, right, top, bottom]` without overflow
    fn wide_edges(&self) -> [i64; 4] {
        let (x, y) = (i64::from(self.x), i64::from(self.y));
        [x, x + i64::from(self.width), y, y + i64::from(self.height)]
    }
}

/// RGBA tint with 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Color {
    /// Opaque white, the neutral tint
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    /// Opaque black
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    /// Opaque red
    pub const RED: Self = Self::rgba(255, 0, 0, 255);
    /// Opaque yellow
    pub const YELLOW: Self = Self::rgba(255, 255, 0, 255);
    /// Fully transparent black
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Create a color from its four channels
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Channels normalized to `[0, 1]`, in RGBA order
    pub fn to_normalized(self) -> [f32; 4] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            f32::from(self.a) / 255.0,
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Math utility functions
pub mod utils {
    use super::{Mat4, Vec2, Vec3};

    /// Translation matrix moving the whole 2D scene by `offset`
    pub fn translation_2d(offset: Vec2) -> Mat4 {
        Mat4::new_translation(&Vec3::new(offset.x, offset.y, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10, 20, 30, 40);
        assert_eq!(rect.left(), 10);
        assert_eq!(rect.right(), 40);
        assert_eq!(rect.top(), 20);
        assert_eq!(rect.bottom(), 60);
        assert!(!rect.is_empty());
        assert!(Rect::EMPTY.is_empty());
    }

    #[test]
    fn test_rect_intersection_is_strict() {
        let a = Rect::new(0, 0, 10, 10);
        let touching = Rect::new(10, 0, 10, 10);
        let overlapping = Rect::new(9, 9, 10, 10);

        assert!(!a.intersects(&touching));
        assert!(!touching.intersects(&a));
        assert!(a.intersects(&overlapping));
        assert!(overlapping.intersects(&a));
    }

    #[test]
    fn test_rect_at_i32_limits() {
        let far = Rect::new(i32::MAX, 0, 16, 16);
        let near = Rect::new(0, 0, 16, 16);
        let also_far = Rect::new(i32::MAX - 8, 0, 16, 16);

        assert_eq!(far.right(), i32::MAX);
        assert!(!far.intersects(&near));
        assert!(!near.intersects(&far));
        assert!(far.intersects(&also_far));
        assert!(also_far.intersects(&far));
        assert!(!Rect::new(i32::MIN, i32::MIN, 4, 4).intersects(&near));
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(0, 0, 4, 4);
        assert!(rect.contains(0, 0));
        assert!(rect.contains(3, 3));
        assert!(!rect.contains(4, 0));
    }

    #[test]
    fn test_color_default_is_white() {
        assert_eq!(Color::default(), Color::WHITE);
        assert_eq!(Color::WHITE.to_normalized(), [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_translation_2d() {
        let m = utils::translation_2d(Vec2::new(-5.0, 3.0));
        let p = m.transform_point(&nalgebra::Point3::new(1.0, 1.0, 0.0));
        assert_relative_eq!(p.x, -4.0);
        assert_relative_eq!(p.y, 4.0);
        assert_relative_eq!(p.z, 0.0);
    }
}
