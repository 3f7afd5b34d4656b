use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    fuzzy::{self, Found},
    id::ObjectId,
};

use super::{GeometryError, Segment, Vector};

/// Outline of a shape, made out of an ordered list of segments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contour {
    pub(super) id: ObjectId,
    pub(super) name: String,
    segments: Vec<Segment>,
}

impl Contour {
    pub fn new() -> Self {
        Self::named("")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::generate(),
            name: name.into(),
            segments: Vec::new(),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn append(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn delete(&mut self, id: ObjectId) -> Result<Segment, GeometryError> {
        let found = self
            .search_by_uid(id)
            .ok_or(GeometryError::SegmentNotFound(id))?;
        let index = found.index;
        Ok(self.segments.remove(index))
    }

    pub fn search_by_uid(&self, id: ObjectId) -> Option<Found<'_, Segment>> {
        fuzzy::search_by_id(&self.segments, id)
    }

    pub fn search_by_name(&self, name: &str) -> Vec<Found<'_, Segment>> {
        fuzzy::search_by_name(&self.segments, name, fuzzy::DEFAULT_MIN_SCORE)
    }

    pub fn is_finite(&self) -> bool {
        self.segments.iter().all(Segment::is_finite)
    }

    /// Whether the segments form a loop: each one ends where the next one starts, and the last
    /// one ends where the first one starts. An empty contour is not closed.
    pub fn is_closed(&self) -> bool {
        if self.segments.is_empty() {
            return false;
        }

        let next = self.segments.iter().cycle().skip(1);
        self.segments
            .iter()
            .zip(next)
            .all(|(segment, next)| segment.end().coincides(next.start()))
    }

    /// Whether all segment endpoints lie on a single plane.
    ///
    /// Contours in one or two dimensions are trivially coplanar, and so are contours whose points
    /// all lie on one line. Only three-dimensional contours are checked for real.
    pub fn is_coplanar(&self) -> Result<bool, GeometryError> {
        let points: Vec<&Vector> = self
            .segments
            .iter()
            .flat_map(|segment| [segment.start().position(), segment.end().position()])
            .collect();

        let Some(&origin) = points.first() else {
            return Ok(true);
        };
        for point in &points {
            origin.check_dim(point)?;
        }

        match origin.dim() {
            0..=2 => return Ok(true),
            3 => (),
            dim => {
                return Err(GeometryError::UnsupportedDimension {
                    operation: "coplanarity check",
                    dim,
                })
            }
        }

        let offsets = points
            .iter()
            .map(|point| point.checked_sub(origin))
            .collect::<Result<Vec<_>, _>>()?;

        let extent = offsets.iter().map(Vector::norm).fold(0.0, f64::max);
        let tolerance = 1e-9 * extent;

        let Some(u) = offsets.iter().find(|offset| offset.norm() > tolerance) else {
            // All points are the same.
            return Ok(true);
        };

        let mut normal = None;
        for offset in &offsets {
            let cross = u.cross_product(offset)?;
            if cross.norm() > tolerance * extent {
                normal = Some(&cross / cross.norm());
                break;
            }
        }
        let Some(normal) = normal else {
            // Collinear.
            return Ok(true);
        };

        for offset in &offsets {
            if offset.dot_product(&normal)?.abs() > tolerance {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl Default for Contour {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Contour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.name)?;
        for segment in &self.segments {
            write!(f, "\n{segment}")?;
        }
        Ok(())
    }
}
