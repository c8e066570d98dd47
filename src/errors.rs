use std::fmt;
use std::error::Error;

/// Represents errors that can occur while building, transforming or moving collision objects.
///
/// These are precondition violations: the operation that returns one is aborted
/// without touching the object. Ordinary motion failures ("can't move", "stuck")
/// are not errors and are reported through `bool` / `DropState` results instead.
#[derive(Debug, Clone, PartialEq)]
pub enum CobjError {
    /// A rotation was requested about a zero-length axis.
    ZeroRotationAxis,
    /// No collision object with this id exists in the world.
    UnknownCobj(usize),
    /// Polygons must have exactly 3 or 4 points.
    UnsupportedPointCount(usize),
    /// The polygon points are collinear or coincident, so no normal exists.
    DegeneratePolygon,
    /// A radius, extent or thickness is negative, zero where it must be positive, or not finite.
    InvalidDimensions,
    /// Density must be positive.
    InvalidDensity,
    /// A simulation constant is out of range.
    InvalidConstant(String),
}

impl fmt::Display for CobjError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CobjError::ZeroRotationAxis => write!(f, "Rotation axis must be non-zero"),
            CobjError::UnknownCobj(id) => write!(f, "Unknown collision object {}", id),
            CobjError::UnsupportedPointCount(n) => write!(f, "Polygons need 3 or 4 points, got {}", n),
            CobjError::DegeneratePolygon => write!(f, "Polygon points do not span a plane"),
            CobjError::InvalidDimensions => write!(f, "Invalid shape dimensions"),
            CobjError::InvalidDensity => write!(f, "Invalid density value"),
            CobjError::InvalidConstant(msg) => write!(f, "Invalid simulation constant: {}", msg),
        }
    }
}

impl Error for CobjError {}
