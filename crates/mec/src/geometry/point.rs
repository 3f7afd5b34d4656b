use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::ObjectId;

use super::{vector::write_coordinates, GeometryError, Vector};

/// A location, given by its position vector in the standard frame of reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Point {
    pub(super) id: ObjectId,
    pub(super) name: String,
    position: Vector,
}

impl Point {
    pub fn new(position: Vector) -> Self {
        Self::named(position, "")
    }

    pub fn named(position: Vector, name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::generate(),
            name: name.into(),
            position,
        }
    }

    pub fn at(coordinates: impl Into<Vec<f64>>) -> Self {
        Self::new(Vector::new(coordinates))
    }

    pub fn position(&self) -> &Vector {
        &self.position
    }

    pub fn set_position(&mut self, position: Vector) {
        self.position = position;
    }

    pub fn dim(&self) -> usize {
        self.position.dim()
    }

    /// Returns a new, unnamed point moved by `offset`.
    pub fn translate(&self, offset: &Vector) -> Result<Point, GeometryError> {
        Ok(Point::new(self.position.checked_add(offset)?))
    }

    /// The vector going from `other` to `self`.
    pub fn offset_from(&self, other: &Point) -> Result<Vector, GeometryError> {
        self.position.checked_sub(&other.position)
    }

    /// The vector going from `self` to `other`.
    pub fn vector_to(&self, other: &Point) -> Result<Vector, GeometryError> {
        other.offset_from(self)
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
    }

    /// Whether both points sit at exactly the same position.
    pub fn coincides(&self, other: &Point) -> bool {
        self.position == other.position
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(Vector::default())
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        write_coordinates(f, &self.position.coordinates)
    }
}
