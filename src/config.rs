//! Defines the startup configuration for the drivetrain.
//!
//! The configuration is loaded once by the host, validated, and read-only from
//! then on. It binds the behaviors to the named signal channels of the host
//! framework and captures the handful of policy choices that used to be spread
//! over near-identical drive behavior variants: the idle wheel heading, the
//! field-centric angle offset, and the orbit mode geometry.

use std::time::Duration;

use crate::chassis::{ModulePlacement, MODULE_COUNT};
use crate::Error;

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;

/// Defines how the wheels are aimed while no translation and no rotation is
/// commanded.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IdleHeadingPolicy {
    /// Park each wheel at its own rotation direction, so the chassis can start
    /// spinning or translating with minimal steering delay.
    AlignToRotationDirection,

    /// Park each wheel at angle 0, pointing along the front of the chassis.
    Zero,
}

/// The signal channels belonging to a single drive module.
#[derive(Clone, Debug)]
pub struct ModuleChannels {
    /// The numeric input channel carrying the measured steering angle of the
    /// wheel, in degrees.
    pub measured_angle: String,

    /// The numeric input channel carrying the measured angle offset from the
    /// zero reference, consumed by the zeroing gate.
    pub angle_position: String,

    /// The numeric input channel the commanded speed is mirrored onto for
    /// other consumers.
    pub feedback_speed: String,

    /// The numeric output channel carrying the steering angle command.
    pub output_angle: String,

    /// The numeric output channel carrying the drive speed command.
    pub output_speed: String,
}

impl ModuleChannels {
    /// Creates the conventional channel names for the given module placement,
    /// e.g. `ipn_drivetrain_front_right_angle` for the front right module.
    ///
    /// ## Parameters
    ///
    /// * 'placement' - The module the channels belong to.
    pub fn conventional(placement: ModulePlacement) -> Self {
        let corner = match placement {
            ModulePlacement::FrontRight => "front_right",
            ModulePlacement::FrontLeft => "front_left",
            ModulePlacement::BackLeft => "back_left",
            ModulePlacement::BackRight => "back_right",
        };

        Self {
            measured_angle: format!("ipn_drivetrain_{}_angle", corner),
            angle_position: format!("ipn_drivetrain_{}_angle_position", corner),
            feedback_speed: format!("ipn_drivetrain_{}_speed", corner),
            output_angle: format!("opn_drivetrain_{}_angle", corner),
            output_speed: format!("opn_drivetrain_{}_speed", corner),
        }
    }
}

/// The configuration of the zeroing gate.
#[derive(Clone, Debug, PartialEq)]
pub struct ZeroingConfig {
    /// How long the gate waits for the modules to converge before it gives up
    /// and lets the platform start anyway.
    pub timeout: Duration,

    /// The angle-position magnitude below which a module counts as zeroed.
    pub threshold: f64,
}

impl Default for ZeroingConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(500),
            threshold: 0.1,
        }
    }
}

/// The startup configuration of the swerve drivetrain.
#[derive(Clone, Debug)]
pub struct DriveConfig {
    /// The (x, y) position of each module relative to the center of the
    /// chassis, in placement order.
    pub module_positions: Vec<(f64, f64)>,

    /// The signal channels of each module, in placement order.
    pub module_channels: Vec<ModuleChannels>,

    /// The numeric input channel carrying the right/left joystick axis.
    pub x_axis: String,

    /// The numeric input channel carrying the forward/backward joystick axis.
    pub y_axis: String,

    /// The numeric input channel carrying the rotation joystick axis.
    pub rotate_axis: String,

    /// The boolean input channel whose rising edge toggles field-centric mode.
    pub field_centric_button: String,

    /// The boolean input channel the field-centric state is projected onto for
    /// other consumers.
    pub field_centric_flag: String,

    /// The vector input channel carrying the heading sensor; its "angle"
    /// component is the measured chassis heading in degrees.
    pub heading_channel: String,

    /// The boolean input channel that, while held, drives a rotation about
    /// [DriveConfig::orbit_center] instead of the joystick command.
    pub orbit_button: String,

    /// The center of the orbit rotation, relative to the center of the
    /// chassis.
    pub orbit_center: (f64, f64),

    /// The rotation rate fraction used while orbiting, in [-1, 1].
    pub orbit_rotation_scalar: f64,

    /// The angle added to the heading correction while field-centric mode is
    /// active. 0 on the robot; +90 or -90 for hosts whose display frame points
    /// a different way.
    pub field_centric_offset_in_degrees: f64,

    /// How the wheels are aimed while the joysticks are idle.
    pub idle_heading_policy: IdleHeadingPolicy,

    /// The boolean input channel that records whether the zeroing gate has
    /// completed.
    pub zeroed_flag: String,

    /// The configuration of the zeroing gate.
    pub zeroing: ZeroingConfig,
}

impl DriveConfig {
    /// Verifies that every per-module table has exactly one entry per module.
    ///
    /// Called once at startup by the behaviors; a mismatch is a fatal
    /// configuration error, never a per-cycle one.
    ///
    /// ## Errors
    ///
    /// * [Error::MismatchedModuleCount] - Returned when a per-module table
    ///   does not have [MODULE_COUNT] entries.
    pub fn validate(&self) -> Result<(), Error> {
        if self.module_positions.len() != MODULE_COUNT {
            return Err(Error::MismatchedModuleCount {
                table: "module_positions".to_string(),
                expected: MODULE_COUNT,
                actual: self.module_positions.len(),
            });
        }

        if self.module_channels.len() != MODULE_COUNT {
            return Err(Error::MismatchedModuleCount {
                table: "module_channels".to_string(),
                expected: MODULE_COUNT,
                actual: self.module_channels.len(),
            });
        }

        Ok(())
    }
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            module_positions: vec![(1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0), (1.0, -1.0)],
            module_channels: ModulePlacement::all()
                .iter()
                .map(|placement| ModuleChannels::conventional(*placement))
                .collect(),
            x_axis: "ipn_driver_left_x".to_string(),
            y_axis: "ipn_driver_left_y".to_string(),
            rotate_axis: "ipn_driver_right_x".to_string(),
            field_centric_button: "ipb_driver_start".to_string(),
            field_centric_flag: "ipb_swerve_field_centric".to_string(),
            heading_channel: "ipv_navx".to_string(),
            orbit_button: "ipb_driver_a".to_string(),
            orbit_center: (60.0, 0.0),
            orbit_rotation_scalar: 1.0,
            field_centric_offset_in_degrees: 0.0,
            idle_heading_policy: IdleHeadingPolicy::AlignToRotationDirection,
            zeroed_flag: "ipb_drivetrain_has_been_zeroed".to_string(),
            zeroing: ZeroingConfig::default(),
        }
    }
}
