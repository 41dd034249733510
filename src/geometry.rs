//! Defines the 2D vector type used by the swerve kinematics.
//!
//! [Vector2] is stored in polar form, as a magnitude and an angle measured in
//! degrees counter-clockwise from the positive x-axis. The polar form is the
//! natural one for a swerve module, where the magnitude is the wheel speed and
//! the angle is the steering heading. It also means a zero-magnitude vector
//! keeps the angle it was constructed with, which the kinematics use to park
//! idle wheels at a chosen heading.
//!
//! The angle is allowed to be any real value. Two vectors whose angles differ
//! by a multiple of 360 degrees describe the same physical direction, but the
//! raw angle is preserved so that steering commands remain continuous.

extern crate nalgebra as na;

use std::fmt::Display;

use crate::Error;

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod geometry_tests;

/// Defines a 2D vector in polar form.
///
/// The magnitude is always zero or greater; direction is encoded in the angle,
/// never in the sign of the magnitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector2 {
    /// The length of the vector. Never negative.
    magnitude: f64,

    /// The direction of the vector in degrees, counter-clockwise from the
    /// positive x-axis. May be any real value.
    angle_in_degrees: f64,
}

impl Vector2 {
    /// Returns the sum of this vector and the given vector.
    ///
    /// The addition is performed in Cartesian space. If the two vectors cancel
    /// exactly the result is a zero-magnitude vector with an arbitrary angle,
    /// which callers must not use as a direction.
    ///
    /// ## Parameters
    ///
    /// * 'other' - The vector to add to this vector.
    ///
    /// ## Example
    ///
    /// ```
    /// use swerve_drive_control::geometry::Vector2;
    ///
    /// let left = Vector2::from_polar(1.0, 0.0);
    /// let right = Vector2::from_polar(1.0, 90.0);
    /// let sum = left.add(&right);
    ///
    /// assert!((sum.magnitude() - 2.0_f64.sqrt()).abs() < 1e-9);
    /// assert!((sum.angle_in_degrees() - 45.0).abs() < 1e-9);
    /// ```
    pub fn add(&self, other: &Vector2) -> Vector2 {
        Vector2::from_cartesian(self.to_cartesian() + other.to_cartesian())
    }

    /// Returns the direction of the vector in degrees, counter-clockwise from
    /// the positive x-axis.
    ///
    /// For a zero-magnitude vector the returned angle is whatever the vector
    /// was constructed with and carries no directional meaning.
    pub fn angle_in_degrees(&self) -> f64 {
        self.angle_in_degrees
    }

    /// Creates a new [Vector2] from Cartesian coordinates.
    ///
    /// The zero vector maps to a zero-magnitude vector with angle 0.0.
    ///
    /// ## Parameters
    ///
    /// * 'coordinates' - The (x, y) coordinates of the vector.
    pub fn from_cartesian(coordinates: na::Vector2<f64>) -> Self {
        Self {
            magnitude: coordinates.norm(),
            angle_in_degrees: coordinates.y.atan2(coordinates.x).to_degrees(),
        }
    }

    /// Creates a new [Vector2] from a magnitude and an angle in degrees.
    ///
    /// ## Parameters
    ///
    /// * 'magnitude' - The length of the vector. Should not be negative.
    /// * 'angle_in_degrees' - The direction of the vector, counter-clockwise
    ///   from the positive x-axis.
    pub fn from_polar(magnitude: f64, angle_in_degrees: f64) -> Self {
        debug_assert!(
            magnitude >= 0.0,
            "Vector magnitudes are never negative, direction is encoded in the angle."
        );

        Self {
            magnitude,
            angle_in_degrees,
        }
    }

    /// Returns the length of the vector. Never negative.
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Returns a vector with the same angle and a magnitude of 1.0.
    ///
    /// ## Errors
    ///
    /// * [Error::ZeroMagnitudeVector] - Returned when the vector has a zero
    ///   magnitude, because such a vector has no direction to keep.
    pub fn normalize(&self) -> Result<Vector2, Error> {
        if self.magnitude == 0.0 {
            return Err(Error::ZeroMagnitudeVector);
        }

        Ok(Vector2 {
            magnitude: 1.0,
            angle_in_degrees: self.angle_in_degrees,
        })
    }

    /// Returns a vector rotated by the given angle. The magnitude is unchanged.
    ///
    /// ## Parameters
    ///
    /// * 'angle_in_degrees' - The rotation to apply, counter-clockwise positive.
    pub fn rotate(&self, angle_in_degrees: f64) -> Vector2 {
        Vector2 {
            magnitude: self.magnitude,
            angle_in_degrees: self.angle_in_degrees + angle_in_degrees,
        }
    }

    /// Returns a vector with the magnitude multiplied by the given factor. The
    /// angle is unchanged.
    ///
    /// ## Parameters
    ///
    /// * 'factor' - The scale factor. Should not be negative; a reversal is
    ///   expressed by rotating the vector 180 degrees, not by a negative
    ///   magnitude.
    pub fn scale(&self, factor: f64) -> Vector2 {
        debug_assert!(
            factor >= 0.0,
            "Vector magnitudes are never negative, direction is encoded in the angle."
        );

        Vector2 {
            magnitude: self.magnitude * factor,
            angle_in_degrees: self.angle_in_degrees,
        }
    }

    /// Returns the difference between this vector and the given vector.
    ///
    /// ## Parameters
    ///
    /// * 'other' - The vector to subtract from this vector.
    pub fn subtract(&self, other: &Vector2) -> Vector2 {
        Vector2::from_cartesian(self.to_cartesian() - other.to_cartesian())
    }

    /// Returns the (x, y) coordinates of the vector.
    pub fn to_cartesian(&self) -> na::Vector2<f64> {
        let angle_in_radians = self.angle_in_degrees.to_radians();
        na::Vector2::new(
            self.magnitude * angle_in_radians.cos(),
            self.magnitude * angle_in_radians.sin(),
        )
    }

    /// Creates a new [Vector2] with zero magnitude and angle 0.0.
    pub fn zero() -> Self {
        Self {
            magnitude: 0.0,
            angle_in_degrees: 0.0,
        }
    }
}

impl Default for Vector2 {
    fn default() -> Self {
        Self::zero()
    }
}

impl Display for Vector2 {
    #[cfg_attr(test, mutants::skip)] // Formatting output only, nothing depends on the text
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Vector2 [{} at {} degrees]",
            self.magnitude, self.angle_in_degrees
        )
    }
}
