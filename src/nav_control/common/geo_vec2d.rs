use num::traits::{Num, NumAssignOps, NumCast, real::Real};
use std::fmt::{Display, Formatter};
use std::ops::{Add, Mul};

/// A planar 2D vector over geographic degrees.
///
/// The x-component carries longitude (east), the y-component latitude (north).
/// Small latitude/longitude deltas are treated as a flat Euclidean plane:
/// distances and directions computed here are only meaningful over short ranges
/// (a few kilometres, away from the poles and the antimeridian). Longitude
/// degrees are not scaled by `cos(lat)`, so "distances" are in raw degrees.
///
/// # Type Parameters
/// * `T` - The functionality for the vector depends on traits implemented by `T`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default)]
pub struct GeoVec2D<T> {
    /// Longitude component.
    x: T,
    /// Latitude component.
    y: T,
}

impl<T> GeoVec2D<T>
where
    T: Real + NumCast + NumAssignOps,
{
    /// Computes the magnitude (absolute value) of the vector.
    ///
    /// # Returns
    /// The magnitude of the vector as a scalar of type `T`.
    pub fn abs(&self) -> T { (self.x.powi(2) + self.y.powi(2)).sqrt() }

    /// Creates a vector pointing from the current vector (`self`) to another vector (`other`).
    ///
    /// # Arguments
    /// * `other` - The target vector.
    ///
    /// # Returns
    /// A new vector representing the direction from `self` to `other`.
    pub fn to(&self, other: &GeoVec2D<T>) -> GeoVec2D<T> {
        GeoVec2D::new(other.x - self.x, other.y - self.y)
    }

    /// Rotates the vector counter-clockwise by a given angle in degrees.
    ///
    /// # Arguments
    /// * `angle_degrees` - The angle to rotate by, in degrees.
    pub fn rotate_by(&mut self, angle_degrees: T) {
        let angle_radians = angle_degrees.to_radians();
        let new_x = self.x * angle_radians.cos() - self.y * angle_radians.sin();
        self.y = self.x * angle_radians.sin() + self.y * angle_radians.cos();
        self.x = new_x;
    }

    /// Returns a copy of the vector rotated counter-clockwise by `angle_degrees`.
    pub fn rotated(mut self, angle_degrees: T) -> Self {
        self.rotate_by(angle_degrees);
        self
    }

    /// Computes the Euclidean distance between the current vector and another vector.
    ///
    /// # Arguments
    /// * `other` - The other vector to compute the distance to.
    ///
    /// # Returns
    /// The Euclidean distance as a scalar of type `T`.
    pub fn euclid_distance(&self, other: &Self) -> T {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Moves linearly from `self` towards `target` by the fraction `progress`.
    ///
    /// `progress` is clamped into `[0, 1]`; a progress of exactly one yields `target`
    /// itself, not an approximation of it.
    pub fn lerp_towards(&self, target: &Self, progress: T) -> Self {
        let t = progress.max(T::zero()).min(T::one());
        if t >= T::one() {
            return *target;
        }
        *self + self.to(target) * t
    }

    /// Bearing of the vector in degrees, measured clockwise from north and wrapped
    /// into `[0, 360)`. Returns `None` for the zero vector.
    pub fn bearing_deg(&self) -> Option<T> {
        if self.abs().is_zero() {
            return None;
        }
        let full = <T as NumCast>::from(360.0)?;
        let raw = self.x.atan2(self.y).to_degrees();
        let wrapped = ((raw % full) + full) % full;
        Some(if wrapped >= full { T::zero() } else { wrapped })
    }
}

impl<T: Copy> GeoVec2D<T> {
    /// Creates a new vector with the given x (longitude) and y (latitude) components.
    pub const fn new(x: T, y: T) -> Self { Self { x, y } }

    /// Creates a vector from a latitude/longitude pair, in that order.
    pub const fn from_lat_lng(lat: T, lng: T) -> Self { Self { x: lng, y: lat } }

    /// Latitude, i.e. the y-component.
    pub const fn lat(&self) -> T { self.y }

    /// Longitude, i.e. the x-component.
    pub const fn lng(&self) -> T { self.x }
}

impl<T: Num> Add for GeoVec2D<T> {
    type Output = GeoVec2D<T>;

    fn add(self, rhs: Self) -> Self::Output {
        Self::Output {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl<T: Num + Copy> Mul<T> for GeoVec2D<T> {
    type Output = GeoVec2D<T>;

    /// Implements the `*` operator for a `GeoVec2D` and a scalar.
    fn mul(self, rhs: T) -> Self::Output {
        Self::Output {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl<T: Display> Display for GeoVec2D<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[lat {}, lng {}]", self.y, self.x)
    }
}
