//! Fixed-shape values returned by geometry queries
//!
//! Each query builds a fresh value; nothing here is shared with the native
//! layer after the call returns.

use serde::{Deserialize, Serialize};

/// Two-dimensional position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position<T> {
    /// Horizontal coordinate
    pub x: T,
    /// Vertical coordinate
    pub y: T,
}

impl<T: Copy> Position<T> {
    /// Create a position
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate
    pub const fn x(&self) -> T {
        self.x
    }

    /// Vertical coordinate
    pub const fn y(&self) -> T {
        self.y
    }
}

impl<T> From<(T, T)> for Position<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

/// Two-dimensional extent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size<T> {
    /// Horizontal extent
    pub width: T,
    /// Vertical extent
    pub height: T,
}

impl<T: Copy> Size<T> {
    /// Create a size
    pub const fn new(width: T, height: T) -> Self {
        Self { width, height }
    }

    /// Horizontal extent
    pub const fn width(&self) -> T {
        self.width
    }

    /// Vertical extent
    pub const fn height(&self) -> T {
        self.height
    }
}

impl<T> From<(T, T)> for Size<T> {
    fn from((width, height): (T, T)) -> Self {
        Self { width, height }
    }
}

/// Position and size of a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Geometry<T> {
    /// Upper-left corner
    pub position: Position<T>,
    /// Extent from the corner
    pub size: Size<T>,
}

impl<T: Copy> Geometry<T> {
    /// Create a geometry from its four components
    pub const fn new(x: T, y: T, width: T, height: T) -> Self {
        Self {
            position: Position::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Compose a geometry from a position and a size
    pub const fn from_parts(position: Position<T>, size: Size<T>) -> Self {
        Self { position, size }
    }

    /// Upper-left corner
    pub const fn position(&self) -> Position<T> {
        self.position
    }

    /// Extent
    pub const fn size(&self) -> Size<T> {
        self.size
    }

    /// Horizontal coordinate of the corner
    pub const fn x(&self) -> T {
        self.position.x
    }

    /// Vertical coordinate of the corner
    pub const fn y(&self) -> T {
        self.position.y
    }

    /// Horizontal extent
    pub const fn width(&self) -> T {
        self.size.width
    }

    /// Vertical extent
    pub const fn height(&self) -> T {
        self.size.height
    }
}

impl<T> From<(T, T, T, T)> for Geometry<T> {
    fn from((x, y, width, height): (T, T, T, T)) -> Self {
        Self {
            position: Position { x, y },
            size: Size { width, height },
        }
    }
}

/// Ratio between the current DPI and the platform default, per axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContentScale {
    /// Horizontal scale
    pub x_scale: f32,
    /// Vertical scale
    pub y_scale: f32,
}

impl ContentScale {
    /// Create a content scale
    pub const fn new(x_scale: f32, y_scale: f32) -> Self {
        Self { x_scale, y_scale }
    }
}

impl Default for ContentScale {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl From<(f32, f32)> for ContentScale {
    fn from((x_scale, y_scale): (f32, f32)) -> Self {
        Self { x_scale, y_scale }
    }
}

/// Size of each edge of a window frame, in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameSize {
    /// Left edge
    pub left: i32,
    /// Top edge, usually the title bar
    pub top: i32,
    /// Right edge
    pub right: i32,
    /// Bottom edge
    pub bottom: i32,
}

impl FrameSize {
    /// Create a frame size
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }
}

impl From<(i32, i32, i32, i32)> for FrameSize {
    fn from((left, top, right, bottom): (i32, i32, i32, i32)) -> Self {
        Self { left, top, right, bottom }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_shortcuts_match_parts() {
        let geometry = Geometry::new(100, 120, 640, 480);

        assert_eq!(geometry.position(), Position::new(100, 120));
        assert_eq!(geometry.size(), Size::new(640, 480));
        assert_eq!((geometry.x(), geometry.y()), (100, 120));
        assert_eq!((geometry.width(), geometry.height()), (640, 480));
    }

    #[test]
    fn test_geometry_from_parts() {
        let geometry = Geometry::from_parts(Position::new(-5, 3), Size::new(10, 20));
        assert_eq!(geometry, Geometry::from((-5, 3, 10, 20)));
    }

    #[test]
    fn test_tuple_conversions() {
        assert_eq!(Position::from((1.5, 2.5)), Position::new(1.5, 2.5));
        assert_eq!(Size::from((3u32, 4u32)).height(), 4);
        assert_eq!(FrameSize::from((1, 30, 1, 1)).top, 30);
        assert_eq!(ContentScale::default(), ContentScale::new(1.0, 1.0));
    }

    #[test]
    fn test_geometry_serializes_to_toml() {
        let geometry = Geometry::new(0, 0, 800, 600);
        let text = toml::to_string(&geometry).unwrap();
        let parsed: Geometry<i32> = toml::from_str(&text).unwrap();
        assert_eq!(parsed, geometry);
    }
}
