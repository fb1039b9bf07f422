use crate::error::Error;
use ordered_float::NotNan;
use std::ops::{Add, Sub};

/// A 2D image-space coordinate. Neither component is ever NaN.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Result<Self, Error> {
        Ok(Self {
            x: NotNan::new(x)
                .map_err(|e| Error::ConstructNotNan(e, x))?
                .into_inner(),
            y: NotNan::new(y)
                .map_err(|e| Error::ConstructNotNan(e, y))?
                .into_inner(),
        })
    }

    pub fn squared_distance(self, other: Self) -> f32 {
        let delta = other - self;
        delta.dot(delta)
    }

    pub fn distance(self, other: Self) -> f32 {
        self.squared_distance(other).sqrt()
    }

    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Shift the point by `(dx, dy)`.
    #[inline]
    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    #[inline]
    pub fn x(self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(self) -> f32 {
        self.y
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::Output {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::Output {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

/// Compute the angle in degrees at vertex `b` formed by `a` and `c`, using the
/// law of cosines.
///
/// The cosine is clamped to `[-1, 1]` so collinear points give exactly 0 or
/// 180 degrees. If `b` coincides with `a` or `c` the angle is undefined and
/// [`Error::DegenerateAngle`] is returned.
pub fn angle_between(a: Point, b: Point, c: Point) -> Result<f32, Error> {
    let ab = a.distance(b);
    let bc = b.distance(c);
    let ac = a.distance(c);

    let denominator = 2.0 * ab * bc;
    if denominator <= 0.0 || !denominator.is_finite() {
        return Err(Error::DegenerateAngle(a, b, c));
    }

    let cosine = (ab * ab + bc * bc - ac * ac) / denominator;
    if !cosine.is_finite() {
        return Err(Error::DegenerateAngle(a, b, c));
    }

    Ok(cosine.clamp(-1.0, 1.0).acos().to_degrees())
}
