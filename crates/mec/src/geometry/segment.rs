use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::ObjectId;

use super::{GeometryError, Point, Vector};

/// Part of an outline, going from `start` to `end`.
// TODO: Segments are always straight lines. Arcs need a way to describe the path between the
// two ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub(super) id: ObjectId,
    pub(super) name: String,
    start: Point,
    end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self::named(start, end, "")
    }

    pub fn named(start: Point, end: Point, name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::generate(),
            name: name.into(),
            start,
            end,
        }
    }

    pub fn start(&self) -> &Point {
        &self.start
    }

    pub fn set_start(&mut self, point: Point) {
        self.start = point;
    }

    pub fn end(&self) -> &Point {
        &self.end
    }

    pub fn set_end(&mut self, point: Point) {
        self.end = point;
    }

    /// Direction of the segment, from start to end.
    pub fn vector(&self) -> Result<Vector, GeometryError> {
        self.start.vector_to(&self.end)
    }

    pub fn length(&self) -> Result<f64, GeometryError> {
        Ok(self.vector()?.norm())
    }

    pub fn midpoint(&self) -> Result<Point, GeometryError> {
        self.start.translate(&(self.vector()? / 2.0))
    }

    pub fn is_finite(&self) -> bool {
        self.start.is_finite() && self.end.is_finite()
    }
}

impl Default for Segment {
    fn default() -> Self {
        Self::new(Point::default(), Point::default())
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}--{}", self.name, self.start, self.end)
    }
}
