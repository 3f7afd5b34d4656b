use std::{
    fmt,
    ops::{Div, Mul},
};

use serde::{Deserialize, Serialize};

use crate::id::ObjectId;

use super::GeometryError;

/// A vector in a space of any dimension.
///
/// Equality only looks at the coordinates. Two vectors with different names or IDs are equal
/// as long as they point at the same place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vector {
    pub(super) id: ObjectId,
    pub(super) name: String,
    pub coordinates: Vec<f64>,
}

impl Vector {
    pub fn new(coordinates: impl Into<Vec<f64>>) -> Self {
        Self::named(coordinates, "")
    }

    pub fn named(coordinates: impl Into<Vec<f64>>, name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::generate(),
            name: name.into(),
            coordinates: coordinates.into(),
        }
    }

    pub fn zero(dim: usize) -> Self {
        Self::new(vec![0.0; dim])
    }

    /// Dimension of the space the vector lives in.
    pub fn dim(&self) -> usize {
        self.coordinates.len()
    }

    pub fn len(&self) -> usize {
        self.dim()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    pub fn check_dim(&self, other: &Vector) -> Result<(), GeometryError> {
        if self.dim() != other.dim() {
            return Err(GeometryError::DimensionMismatch {
                left: self.dim(),
                right: other.dim(),
            });
        }
        Ok(())
    }

    fn zip_with(&self, other: &Vector, f: impl Fn(f64, f64) -> f64) -> Result<Vector, GeometryError> {
        self.check_dim(other)?;
        Ok(Vector::new(
            self.coordinates
                .iter()
                .zip(&other.coordinates)
                .map(|(&a, &b)| f(a, b))
                .collect::<Vec<_>>(),
        ))
    }

    pub fn checked_add(&self, other: &Vector) -> Result<Vector, GeometryError> {
        self.zip_with(other, |a, b| a + b)
    }

    pub fn checked_sub(&self, other: &Vector) -> Result<Vector, GeometryError> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Whether no coordinate is infinite or NaN.
    pub fn is_finite(&self) -> bool {
        self.coordinates.iter().all(|x| x.is_finite())
    }

    /// Euclidean length of the vector.
    pub fn norm(&self) -> f64 {
        self.coordinates.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    pub fn dot_product(&self, other: &Vector) -> Result<f64, GeometryError> {
        self.check_dim(other)?;
        Ok(self
            .coordinates
            .iter()
            .zip(&other.coordinates)
            .map(|(a, b)| a * b)
            .sum())
    }

    pub fn cross_product(&self, other: &Vector) -> Result<Vector, GeometryError> {
        self.check_dim(other)?;
        self.require_dim(3, "cross product")?;

        let a = &self.coordinates;
        let b = &other.coordinates;
        Ok(Vector::new(
            (0..3)
                .map(|i| a[(i + 1) % 3] * b[(i + 2) % 3] - a[(i + 2) % 3] * b[(i + 1) % 3])
                .collect::<Vec<_>>(),
        ))
    }

    /// `self · (b × c)`: the signed volume of the parallelepiped spanned by the three vectors.
    pub fn triple_product(&self, b: &Vector, c: &Vector) -> Result<f64, GeometryError> {
        self.check_dim(b)?;
        self.check_dim(c)?;
        self.require_dim(3, "triple product")?;
        self.dot_product(&b.cross_product(c)?)
    }

    fn require_dim(&self, dim: usize, operation: &'static str) -> Result<(), GeometryError> {
        if self.dim() != dim {
            return Err(GeometryError::UnsupportedDimension {
                operation,
                dim: self.dim(),
            });
        }
        Ok(())
    }
}

impl Default for Vector {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        self.coordinates == other.coordinates
    }
}

impl Mul<f64> for &Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        Vector::new(self.coordinates.iter().map(|x| x * rhs).collect::<Vec<_>>())
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        &self * rhs
    }
}

impl Div<f64> for &Vector {
    type Output = Vector;

    fn div(self, rhs: f64) -> Vector {
        Vector::new(self.coordinates.iter().map(|x| x / rhs).collect::<Vec<_>>())
    }
}

impl Div<f64> for Vector {
    type Output = Vector;

    fn div(self, rhs: f64) -> Vector {
        &self / rhs
    }
}

/// Writes coordinates as `[1.0, 2.5, -3.0]`.
pub(crate) fn write_coordinates(f: &mut fmt::Formatter<'_>, coordinates: &[f64]) -> fmt::Result {
    f.write_str("[")?;
    for (i, &x) in coordinates.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_coordinate(f, x)?;
    }
    f.write_str("]")
}

/// Shortest round-trip form, with `.0` kept on integral values, lowercase `nan` and `inf`, and
/// exponents written with a sign and at least two digits (`1e+20`, `1e-05`).
fn write_coordinate(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        return f.write_str("nan");
    }
    if x.is_infinite() {
        return f.write_str(if x < 0.0 { "-inf" } else { "inf" });
    }

    // Debug switches to exponent notation below 1e-4 and from 1e16 on.
    let debug = format!("{x:?}");
    match debug.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().map_err(|_| fmt::Error)?;
            let sign = if exponent < 0 { '-' } else { '+' };
            write!(f, "{mantissa}e{sign}{:02}", exponent.unsigned_abs())
        }
        None => f.write_str(&debug),
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        write_coordinates(f, &self.coordinates)
    }
}
