//! Layout geometry for diagram nodes.
//!
//! Positions use layout units with the y axis growing upward: the bottom row
//! of a tree has the smallest y. Rows are formed from nodes whose y values lie
//! within a [`RowTolerance`] of each other.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A 2D position of a diagram node.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Moves the point by the given offsets, as a drag does.
    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Maximum vertical distance between two nodes that share a row.
///
/// # Examples
///
/// ```
/// # use logicpad_core::geometry::RowTolerance;
/// use std::cmp::Ordering;
///
/// let tolerance = RowTolerance::default();
/// assert_eq!(tolerance.compare(100.0, 108.0), Ordering::Equal);
/// assert_eq!(tolerance.compare(100.0, 111.0), Ordering::Less);
/// assert_eq!(tolerance.compare(140.0, 100.0), Ordering::Greater);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowTolerance(f32);

impl RowTolerance {
    /// Tolerance used by the editor's default zoom level.
    pub const DEFAULT: f32 = 10.0;

    /// Creates a tolerance; negative values are treated as zero.
    pub fn new(epsilon: f32) -> Self {
        Self(epsilon.max(0.0))
    }

    /// Returns the tolerance in layout units.
    pub fn epsilon(self) -> f32 {
        self.0
    }

    /// Compares two y values, treating values within the tolerance as equal.
    pub fn compare(self, a: f32, b: f32) -> Ordering {
        if (a - b).abs() <= self.0 {
            Ordering::Equal
        } else if a < b {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    /// Returns `true` if both y values fall in the same row.
    pub fn same_row(self, a: f32, b: f32) -> bool {
        self.compare(a, b) == Ordering::Equal
    }
}

impl Default for RowTolerance {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}
