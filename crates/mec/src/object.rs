use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    geometry::{Contour, Point, Segment, Vector},
    id::{Named, ObjectId},
};

/// Any object that can be kept in a session's workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Object {
    Vector(Vector),
    Point(Point),
    Segment(Segment),
    Contour(Contour),
}

impl Object {
    pub fn kind(&self) -> &'static str {
        match self {
            Object::Vector(_) => "vector",
            Object::Point(_) => "point",
            Object::Segment(_) => "segment",
            Object::Contour(_) => "contour",
        }
    }

    fn as_named(&self) -> &dyn Named {
        match self {
            Object::Vector(v) => v,
            Object::Point(v) => v,
            Object::Segment(v) => v,
            Object::Contour(v) => v,
        }
    }

    fn as_named_mut(&mut self) -> &mut dyn Named {
        match self {
            Object::Vector(v) => v,
            Object::Point(v) => v,
            Object::Segment(v) => v,
            Object::Contour(v) => v,
        }
    }

    /// Whether every coordinate held by the object is finite. Only finite objects can be saved.
    pub fn is_finite(&self) -> bool {
        match self {
            Object::Vector(v) => v.is_finite(),
            Object::Point(v) => v.is_finite(),
            Object::Segment(v) => v.is_finite(),
            Object::Contour(v) => v.is_finite(),
        }
    }

    pub fn as_vector(&self) -> Option<&Vector> {
        match self {
            Self::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<&Point> {
        match self {
            Self::Point(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_segment(&self) -> Option<&Segment> {
        match self {
            Self::Segment(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_contour(&self) -> Option<&Contour> {
        match self {
            Self::Contour(v) => Some(v),
            _ => None,
        }
    }
}

impl Named for Object {
    fn id(&self) -> ObjectId {
        self.as_named().id()
    }

    fn name(&self) -> &str {
        self.as_named().name()
    }

    fn set_name(&mut self, name: String) {
        self.as_named_mut().set_name(name)
    }
}

impl From<Vector> for Object {
    fn from(value: Vector) -> Self {
        Self::Vector(value)
    }
}

impl From<Point> for Object {
    fn from(value: Point) -> Self {
        Self::Point(value)
    }
}

impl From<Segment> for Object {
    fn from(value: Segment) -> Self {
        Self::Segment(value)
    }
}

impl From<Contour> for Object {
    fn from(value: Contour) -> Self {
        Self::Contour(value)
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Vector(v) => fmt::Display::fmt(v, f),
            Object::Point(v) => fmt::Display::fmt(v, f),
            Object::Segment(v) => fmt::Display::fmt(v, f),
            Object::Contour(v) => fmt::Display::fmt(v, f),
        }
    }
}
