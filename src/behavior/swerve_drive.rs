//! The per-cycle drive behavior: reads the driver's intent and the measured
//! wheel angles from the signal bus, runs the kinematics, and writes one speed
//! and one angle command per module.
//!
//! The behavior owns all cross-cycle drive state: the field-centric toggle and
//! each module's last commanded vector. The magnitude of that vector carries
//! over to the next cycle; the angle never does, it is re-read from the
//! steering encoders every cycle so the optimizer works against the real
//! hardware state.

extern crate nalgebra as na;

use log::{debug, trace};

use crate::chassis::{ModuleLayout, MODULE_COUNT};
use crate::config::{DriveConfig, IdleHeadingPolicy, ModuleChannels};
use crate::geometry::Vector2;
use crate::kinematics::{self, FieldCentricToggle};
use crate::modes::DriveVariant;
use crate::signals::{CommandKind, InputSignals, OutputSignals};
use crate::Error;

#[cfg(test)]
#[path = "swerve_drive_tests.rs"]
mod swerve_drive_tests;

/// Drives the robot in percent mode, based on the joystick values.
///
/// The host invokes [SwerveDriveBehavior::update] once per control cycle while
/// the drive state is active, after the zeroing gate has released the
/// platform.
pub struct SwerveDriveBehavior {
    /// The startup configuration. Read-only after construction.
    config: DriveConfig,

    /// The module positions and rotation directions. Computed once.
    layout: ModuleLayout,

    /// Each module's last commanded vector, in placement order. The magnitude
    /// feeds the next cycle; the angle is superseded by the encoders.
    module_vectors: Vec<Vector2>,

    /// The owner of the field-centric state.
    field_centric: FieldCentricToggle,
}

impl SwerveDriveBehavior {
    /// Applies a drive variant selected by the host mode logic, overriding the
    /// configured idle-heading policy and field-centric offset.
    ///
    /// ## Parameters
    ///
    /// * 'variant' - The drive variant to run with.
    pub fn apply_variant(&mut self, variant: &DriveVariant) {
        self.config.idle_heading_policy = variant.idle_heading_policy;
        self.config.field_centric_offset_in_degrees = variant.field_centric_offset_in_degrees;
    }

    /// Resets the per-module vectors on state entry. The field-centric toggle
    /// deliberately survives re-entry; the driver's last choice stays in
    /// effect until the button is pressed again.
    pub fn initialize(&mut self) {
        debug!("Entering swerve drive");

        for vector in &mut self.module_vectors {
            *vector = Vector2::zero();
        }
    }

    /// Creates a new [SwerveDriveBehavior] from the given configuration.
    ///
    /// Field-centric mode starts out enabled.
    ///
    /// ## Parameters
    ///
    /// * 'config' - The validated startup configuration.
    ///
    /// ## Errors
    ///
    /// * [Error::MismatchedModuleCount] - Returned when a per-module table in
    ///   the configuration does not have one entry per module.
    /// * [Error::ZeroMagnitudeVector] - Returned when a module position sits
    ///   exactly on the center of the chassis.
    pub fn new(config: DriveConfig) -> Result<Self, Error> {
        config.validate()?;
        let layout = ModuleLayout::from_positions(&config.module_positions)?;

        Ok(Self {
            config,
            layout,
            module_vectors: vec![Vector2::zero(); MODULE_COUNT],
            field_centric: FieldCentricToggle::new(true),
        })
    }

    /// Runs one control cycle: updates the field-centric toggle, builds the
    /// translation vector, solves every module, normalizes the set and writes
    /// the motor commands.
    ///
    /// ## Parameters
    ///
    /// * 'inputs' - The input side of the signal bus for this cycle.
    /// * 'outputs' - The output side of the signal bus for this cycle.
    pub fn update(&mut self, inputs: &mut dyn InputSignals, outputs: &mut dyn OutputSignals) {
        if inputs.boolean_rising_edge(&self.config.field_centric_button) {
            self.field_centric.toggle();
        }

        // One-way projection of the toggle state for other consumers.
        inputs.set_boolean(&self.config.field_centric_flag, self.field_centric.is_enabled());

        if inputs.boolean(&self.config.orbit_button) {
            self.update_orbit(inputs);
        } else {
            self.update_joystick(inputs);
        }

        kinematics::scale_largest_down(&mut self.module_vectors, 1.0);

        for (index, channels) in self.config.module_channels.iter().enumerate() {
            let command = &self.module_vectors[index];
            outputs.write(
                &channels.output_angle,
                CommandKind::AbsolutePosition,
                command.angle_in_degrees(),
            );
            outputs.write(
                &channels.output_speed,
                CommandKind::PercentPower,
                command.magnitude(),
            );
            // Each module mirrors its own commanded speed, never a neighbour's.
            inputs.set_numeric(&channels.feedback_speed, command.magnitude());
        }
    }

    /// Turns the drive motors off and leaves the wheels in their current
    /// positions. Called when the host leaves the drive state.
    ///
    /// ## Parameters
    ///
    /// * 'inputs' - The input side of the signal bus.
    /// * 'outputs' - The output side of the signal bus.
    pub fn dispose(&mut self, inputs: &mut dyn InputSignals, outputs: &mut dyn OutputSignals) {
        trace!("Leaving swerve drive");

        for vector in &mut self.module_vectors {
            *vector = Vector2::zero();
        }

        for channels in &self.config.module_channels {
            outputs.write(&channels.output_angle, CommandKind::PercentPower, 0.0);
            outputs.write(&channels.output_speed, CommandKind::PercentPower, 0.0);
            inputs.set_numeric(&channels.feedback_speed, 0.0);
        }
    }

    /// Solves every module for the regular joystick command.
    fn update_joystick(&mut self, inputs: &dyn InputSignals) {
        let x_axis = inputs.numeric(&self.config.x_axis);
        let y_axis = inputs.numeric(&self.config.y_axis);
        let rotate_axis = inputs.numeric(&self.config.rotate_axis);

        let correction = kinematics::heading_correction(
            self.field_centric.is_enabled(),
            inputs.vector_component(&self.config.heading_channel, "angle"),
            self.config.field_centric_offset_in_degrees,
        );
        let translation = kinematics::drive_translation(x_axis, y_axis, correction);

        Self::solve_all(
            &mut self.module_vectors,
            inputs,
            &self.config.module_channels,
            &translation,
            self.layout.rotation_directions(),
            rotate_axis,
            self.config.idle_heading_policy,
        );
    }

    /// Solves every module for a rotation about the configured external
    /// center, used while the orbit button is held.
    fn update_orbit(&mut self, inputs: &dyn InputSignals) {
        let center = Vector2::from_cartesian(na::Vector2::new(
            self.config.orbit_center.0,
            self.config.orbit_center.1,
        ));

        // An orbit center on top of a module has no rotation direction there;
        // rotate in place instead of skipping the cycle.
        let rotation_directions = match self.layout.rotation_directions_about(&center) {
            Ok(directions) => directions,
            Err(_) => self.layout.rotation_directions().to_vec(),
        };

        Self::solve_all(
            &mut self.module_vectors,
            inputs,
            &self.config.module_channels,
            &Vector2::zero(),
            &rotation_directions,
            self.config.orbit_rotation_scalar,
            self.config.idle_heading_policy,
        );
    }

    /// Solves each module independently against its measured wheel angle.
    fn solve_all(
        module_vectors: &mut [Vector2],
        inputs: &dyn InputSignals,
        module_channels: &[ModuleChannels],
        translation: &Vector2,
        rotation_directions: &[Vector2],
        rotation_scalar: f64,
        idle_heading: IdleHeadingPolicy,
    ) {
        for (index, channels) in module_channels.iter().enumerate() {
            let measured_angle = inputs.numeric(&channels.measured_angle);
            module_vectors[index] = kinematics::solve_module(
                measured_angle,
                translation,
                &rotation_directions[index],
                rotation_scalar,
                idle_heading,
            );
        }
    }
}
