//! The per-cycle swerve calculations: the frame transform, the per-module
//! solver and the output normalizer.
//!
//! Everything in this module is a pure function of its inputs, apart from
//! [FieldCentricToggle] which is a single boolean of cross-cycle state. The
//! per-cycle data flow is: [drive_translation] builds the robot-centric
//! translation vector, [solve_module] turns it into one command vector per
//! module, and [scale_largest_down] caps the set so no module is asked for
//! more than full power.

extern crate nalgebra as na;

use crate::config::IdleHeadingPolicy;
use crate::geometry::Vector2;

#[cfg(test)]
#[path = "kinematics_tests.rs"]
mod kinematics_tests;

/// Tracks whether drive commands are interpreted in the field frame or the
/// robot frame.
///
/// The toggle is the single owner of the field-centric state. The matching bus
/// flag, kept for other consumers, is a one-way projection written by the
/// drive behavior after each update, never a second source of truth.
#[derive(Clone, Copy, Debug)]
pub struct FieldCentricToggle {
    /// Whether drive commands are currently field-centric.
    enabled: bool,
}

impl FieldCentricToggle {
    /// Returns whether drive commands are currently field-centric.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Creates a new [FieldCentricToggle].
    ///
    /// ## Parameters
    ///
    /// * 'enabled' - Whether field-centric mode starts out active.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Flips the field-centric state. Called on each rising edge of the
    /// toggle button.
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }
}

/// Converts the joystick axes into a robot-centric translation vector.
///
/// The controller uses its y-axis for forward/backward and its x-axis for
/// right/left, while the robot drives forward/backward along its x-axis and
/// right/left along its y-axis. Swapping the axes translates between the two
/// coordinate systems; this convention is fixed, not configurable.
///
/// ## Parameters
///
/// * 'x_axis' - The right/left joystick axis, in [-1, 1].
/// * 'y_axis' - The forward/backward joystick axis, in [-1, 1].
/// * 'heading_correction_in_degrees' - The rotation applied to move the vector
///   from the driver's frame into the robot frame. 0.0 for robot-centric
///   driving; the negated measured heading (plus the configured offset) for
///   field-centric driving, so that pushing forward always means the far end
///   of the field. See [heading_correction].
pub fn drive_translation(
    x_axis: f64,
    y_axis: f64,
    heading_correction_in_degrees: f64,
) -> Vector2 {
    Vector2::from_cartesian(na::Vector2::new(y_axis, x_axis)).rotate(heading_correction_in_degrees)
}

/// Returns the heading correction for the frame transform.
///
/// While field-centric mode is active the measured chassis heading is
/// subtracted from the commanded direction. For example, with the chassis
/// rotated 15 degrees and the driver pushing straight forward, the corrected
/// direction is -15 degrees. Robot-centric driving applies no correction.
///
/// ## Parameters
///
/// * 'field_centric' - Whether field-centric mode is active.
/// * 'measured_heading_in_degrees' - The chassis heading from the heading
///   sensor.
/// * 'offset_in_degrees' - The configured field-centric angle offset.
pub fn heading_correction(
    field_centric: bool,
    measured_heading_in_degrees: f64,
    offset_in_degrees: f64,
) -> f64 {
    if field_centric {
        offset_in_degrees - measured_heading_in_degrees
    } else {
        0.0
    }
}

/// Computes the command vector for a single module: the magnitude is the drive
/// speed in [0, 1] scale and the angle is the steering setpoint in degrees.
///
/// The target vector is the commanded translation plus the module's rotation
/// direction scaled by the rotation rate, the standard swerve inverse
/// kinematics sum. Two policy branches then shape the command:
///
/// - When the target is exactly zero the wheel is parked, at its rotation
///   direction or at angle 0 depending on the idle policy, with zero speed.
/// - When the wheel's measured angle is more than 90 degrees away from the
///   target angle, the target is rotated 180 degrees and the drive direction
///   reverses, so the wheel always steers along the shorter path.
///
/// The speed is attenuated by the cosine of the heading error, raised to the
/// third power so that the ramp climbs steeply as the error approaches zero
/// and collapses once the error passes roughly 60 degrees. That keeps a
/// still-steering module from dragging the chassis off course.
///
/// This is a pure function; the cross-cycle module state lives with the
/// caller.
///
/// ## Parameters
///
/// * 'current_angle_in_degrees' - The measured steering angle of the wheel,
///   from the encoder, not the last commanded angle.
/// * 'translation' - The robot-centric translation vector for this cycle.
/// * 'rotation_direction' - The unit vector this module drives along for a
///   pure chassis rotation.
/// * 'rotation_scalar' - The commanded rotation rate fraction, in [-1, 1].
/// * 'idle_heading' - How the wheel is aimed when the target is zero.
pub fn solve_module(
    current_angle_in_degrees: f64,
    translation: &Vector2,
    rotation_direction: &Vector2,
    rotation_scalar: f64,
    idle_heading: IdleHeadingPolicy,
) -> Vector2 {
    let rotation = if rotation_scalar < 0.0 {
        rotation_direction.rotate(180.0).scale(-rotation_scalar)
    } else {
        rotation_direction.scale(rotation_scalar)
    };

    let mut target = translation.add(&rotation);

    if target.magnitude() == 0.0 {
        let idle_angle = match idle_heading {
            IdleHeadingPolicy::AlignToRotationDirection => rotation_direction.angle_in_degrees(),
            IdleHeadingPolicy::Zero => 0.0,
        };
        target = Vector2::from_polar(0.0, idle_angle);
    }

    let heading_error = target.angle_in_degrees() - current_angle_in_degrees;
    let direction_scalar = heading_error.to_radians().cos().powi(3);

    if direction_scalar < 0.0 {
        target = target.rotate(180.0);
    }

    target.scale(direction_scalar.abs())
}

/// Scales the whole command set down so the largest magnitude does not exceed
/// the given maximum. A set whose largest magnitude is already within the
/// maximum is left untouched; this never scales up.
///
/// Every vector is scaled by the same factor, preserving the relative speeds
/// between the modules so the chassis travels in the commanded direction
/// rather than a distorted one.
///
/// ## Parameters
///
/// * 'vectors' - The command vectors for this cycle.
/// * 'maximum_magnitude' - The cap on the largest magnitude, 1.0 for percent
///   power commands.
pub fn scale_largest_down(vectors: &mut [Vector2], maximum_magnitude: f64) {
    let largest = largest_magnitude(vectors);
    if largest > maximum_magnitude {
        let factor = maximum_magnitude / largest;
        for vector in vectors.iter_mut() {
            *vector = vector.scale(factor);
        }
    }
}

/// Scales the whole vector set, up or down, so the largest magnitude becomes
/// exactly the given value. A set of all zero-magnitude vectors is left
/// untouched.
///
/// Used for rotation-direction sets about an arbitrary center, where the
/// furthest module sets the pace and the rest follow proportionally.
///
/// ## Parameters
///
/// * 'vectors' - The vectors to scale.
/// * 'magnitude' - The magnitude the largest vector should end up with.
pub fn scale_largest_to(vectors: &mut [Vector2], magnitude: f64) {
    let largest = largest_magnitude(vectors);
    if largest == 0.0 {
        return;
    }

    let factor = magnitude / largest;
    for vector in vectors.iter_mut() {
        *vector = vector.scale(factor);
    }
}

/// Returns the largest magnitude in the vector set, or 0.0 for an empty set.
fn largest_magnitude(vectors: &[Vector2]) -> f64 {
    vectors
        .iter()
        .map(|vector| vector.magnitude())
        .fold(0.0, f64::max)
}
