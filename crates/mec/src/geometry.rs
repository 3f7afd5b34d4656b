//! Geometric objects: vectors, points, segments and the contours built out of them.

use std::{error::Error, fmt};

use crate::id::ObjectId;

pub mod contour;
pub mod point;
pub mod segment;
pub mod shapes;
pub mod vector;

pub use contour::Contour;
pub use point::Point;
pub use segment::Segment;
pub use shapes::parallelogram;
pub use vector::Vector;

macro_rules! impl_named {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::id::Named for $ty {
                fn id(&self) -> $crate::id::ObjectId {
                    self.id
                }

                fn name(&self) -> &str {
                    &self.name
                }

                fn set_name(&mut self, name: String) {
                    self.name = name;
                }
            }
        )*
    };
}

impl_named!(Vector, Point, Segment, Contour);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// Two operands live in spaces of different dimensions.
    DimensionMismatch { left: usize, right: usize },
    /// The operation only exists in some dimensions (e.g. the cross product is 3D only.)
    UnsupportedDimension { operation: &'static str, dim: usize },
    SegmentNotFound(ObjectId),
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::DimensionMismatch { left, right } => write!(
                f,
                "vectors are not the same dimension ({left} and {right})"
            ),
            GeometryError::UnsupportedDimension { operation, dim } => {
                write!(f, "{operation} doesn't exist in dimension {dim}")
            }
            GeometryError::SegmentNotFound(id) => write!(f, "segment {id} is not in the contour"),
        }
    }
}

impl Error for GeometryError {}
