//! Geometric primitives for canvas positioning and link label placement.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate on a canvas
//! - [`Size`] - Width and height dimensions
//! - [`Line`] - A segment between two points with derived angle and slope
//!
//! # Coordinate System
//!
//! Both EVE-NG and GNS3 use screen coordinates:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! EVE-NG places the origin at the top-left corner of the lab canvas, while
//! GNS3 places it at the center of the scene. The conversion between the two
//! lives in the converter crate; this module only provides the arithmetic.

use std::ops::{Add, Div, Mul, Sub};

/// Fraction of a line's length at which link labels are anchored.
pub const LABEL_ANCHOR_FRACTION: f64 = 0.15;

/// A 2D point.
///
/// # Examples
///
/// ```
/// # use eve2gns_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1 + p2;
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Multiplies both coordinates by the given factor.
    pub fn scale(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Rounds both coordinates to the nearest integer, half away from zero.
    pub fn round(self) -> Self {
        Self {
            x: self.x.round(),
            y: self.y.round(),
        }
    }

    /// Returns the rounded coordinates as an integer pair.
    pub fn to_int_pair(self) -> (i64, i64) {
        let rounded = self.round();
        (rounded.x as i64, rounded.y as i64)
    }

    /// Euclidean distance from the origin
    pub fn hypot(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance between this point and another point
    pub fn distance(self, other: Point) -> f64 {
        (self - other).hypot()
    }

    /// Linear interpolation towards `other`.
    ///
    /// `t = 0.0` yields `self`, `t = 1.0` yields `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use eve2gns_core::geometry::Point;
    /// let a = Point::new(0.0, 0.0);
    /// let b = Point::new(100.0, 20.0);
    /// assert_eq!(a.lerp(b, 0.25), Point::new(25.0, 5.0));
    /// ```
    pub fn lerp(self, other: Point, t: f64) -> Self {
        self + (other - self).scale(t)
    }

    /// Reinterprets the point as a size
    pub fn to_size(self) -> Size {
        Size::new(self.x, self.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Add<Size> for Point {
    type Output = Point;

    fn add(self, size: Size) -> Point {
        Point::new(self.x + size.width, self.y + size.height)
    }
}

impl Sub<Size> for Point {
    type Output = Point;

    fn sub(self, size: Size) -> Point {
        Point::new(self.x - size.width, self.y - size.height)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, factor: f64) -> Point {
        self.scale(factor)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, divisor: f64) -> Point {
        Point::new(self.x / divisor, self.y / divisor)
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f64 {
        self.height
    }

    /// Returns half of this size, used for centering
    pub fn half(self) -> Self {
        self / 2.0
    }

    /// Multiplies both dimensions by the given factor
    pub fn scale(self, factor: f64) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    /// Returns a new Size with the maximum width and height between this size and another
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Rounds both dimensions to the nearest integer.
    pub fn round(self) -> Self {
        Self {
            width: self.width.round(),
            height: self.height.round(),
        }
    }

    /// Reinterprets the size as a point
    pub fn to_point(self) -> Point {
        Point::new(self.width, self.height)
    }
}

impl Add for Size {
    type Output = Size;

    fn add(self, other: Size) -> Size {
        Size::new(self.width + other.width, self.height + other.height)
    }
}

impl Sub for Size {
    type Output = Size;

    fn sub(self, other: Size) -> Size {
        Size::new(self.width - other.width, self.height - other.height)
    }
}

impl Mul<f64> for Size {
    type Output = Size;

    fn mul(self, factor: f64) -> Size {
        self.scale(factor)
    }
}

impl Div<f64> for Size {
    type Output = Size;

    fn div(self, divisor: f64) -> Size {
        Size::new(self.width / divisor, self.height / divisor)
    }
}

impl From<Point> for Size {
    fn from(point: Point) -> Self {
        point.to_size()
    }
}

/// A straight segment between two points.
///
/// Used to orient link labels: [`Line::rotation`] gives an angle that keeps
/// text upright, and [`Line::equidistant_points`] gives label anchors close
/// to each end without touching the endpoint icons.
///
/// # Examples
///
/// ```
/// # use eve2gns_core::geometry::{Line, Point};
/// let line = Line::new(Point::new(0.0, 0.0), Point::new(-10.0, 0.0));
///
/// // Pointing left is 180 degrees, folded so that the label stays upright.
/// assert_eq!(line.rotation(), 0.0);
/// assert_eq!(line.distance(), 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    point1: Point,
    point2: Point,
}

impl Line {
    pub fn new(point1: Point, point2: Point) -> Self {
        Self { point1, point2 }
    }

    pub fn point1(self) -> Point {
        self.point1
    }

    pub fn point2(self) -> Point {
        self.point2
    }

    /// Angle of the direction `point1 -> point2` in radians, in `[-π, π]`.
    pub fn theta(self) -> f64 {
        let delta = self.point2 - self.point1;
        delta.y().atan2(delta.x())
    }

    /// Label rotation in degrees, always within `[-90, 90]`.
    ///
    /// Angles beyond a quarter turn are folded by half a turn towards zero.
    pub fn rotation(self) -> f64 {
        let mut theta = self.theta();
        if theta.abs() > std::f64::consts::FRAC_PI_2 {
            theta -= theta.signum() * std::f64::consts::PI;
        }
        theta.to_degrees()
    }

    /// Slope of the line, or `None` for a vertical line.
    pub fn slope(self) -> Option<f64> {
        let delta = self.point2 - self.point1;
        if delta.x() == 0.0 {
            None
        } else {
            Some(delta.y() / delta.x())
        }
    }

    /// Length of the segment
    pub fn distance(self) -> f64 {
        self.point1.distance(self.point2)
    }

    /// Returns the pair of rounded points at `fraction` and `1 - fraction`
    /// along the segment, nearest to `point1` and `point2` respectively.
    ///
    /// Vertical and degenerate lines need no special casing since the points
    /// are interpolated rather than derived from the slope.
    pub fn equidistant_points(self, fraction: f64) -> (Point, Point) {
        let near_first = self.point1.lerp(self.point2, fraction);
        let near_second = self.point1.lerp(self.point2, 1.0 - fraction);
        (near_first.round(), near_second.round())
    }

    /// [`Line::equidistant_points`] at the default [`LABEL_ANCHOR_FRACTION`].
    pub fn label_points(self) -> (Point, Point) {
        self.equidistant_points(LABEL_ANCHOR_FRACTION)
    }
}
