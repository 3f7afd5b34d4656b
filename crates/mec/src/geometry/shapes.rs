//! Factories for common contours.

use super::{Contour, GeometryError, Point, Segment, Vector};

/// Builds a parallelogram starting at `corner`, with `side_1` as its first side and `side_2` as
/// its second.
///
/// The corners are visited in order `corner`, `corner + side_1`, `corner + side_1 + side_2`,
/// `corner + side_2`, and back to `corner`.
pub fn parallelogram(
    corner: &Point,
    side_1: &Vector,
    side_2: &Vector,
    name: impl Into<String>,
) -> Result<Contour, GeometryError> {
    let c1 = corner.clone();
    let c2 = corner.translate(side_1)?;
    let c3 = c2.translate(side_2)?;
    let c4 = corner.translate(side_2)?;

    let mut contour = Contour::named(name);
    contour.append(Segment::new(c1.clone(), c2.clone()));
    contour.append(Segment::new(c2, c3.clone()));
    contour.append(Segment::new(c3, c4.clone()));
    contour.append(Segment::new(c4, c1));
    Ok(contour)
}
