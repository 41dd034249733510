//! The zeroing gate: a bounded-time calibration wait that keeps the drive
//! behavior from acting on untrusted wheel angles.
//!
//! On a cold start the absolute steering encoders have to be re-homed against
//! their zero reference before the measured angles mean anything. The gate
//! raises the zero flag on every module's angle actuator each cycle and waits
//! for all modules to report an angle position close to zero. If that does not
//! happen within the deadline the gate logs the failure and releases the
//! platform anyway; a degraded start beats a robot that never moves because of
//! one bad sensor.
//!
//! The gate takes the current time as an explicit parameter instead of reading
//! the clock, so the host passes `Instant::now()` and the tests pass whatever
//! they need.

use std::time::Instant;

use log::{debug, error};

use crate::config::{DriveConfig, ModuleChannels, ZeroingConfig};
use crate::signals::{CommandKind, InputSignals, OutputSignals};
use crate::Error;

#[cfg(test)]
#[path = "zeroing_tests.rs"]
mod zeroing_tests;

/// The state of the zeroing gate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ZeroingState {
    /// Waiting for every module to report near its zero reference.
    Zeroing,

    /// Every module converged below the threshold. Terminal.
    Zeroed,

    /// The deadline passed before convergence; the platform proceeds as
    /// zeroed anyway. Terminal, degraded.
    TimedOut,
}

/// Zeros the swerve modules.
///
/// The host runs this behavior before the drive behavior, each cycle, until
/// [ZeroingGate::is_done] reports completion. Completion is also projected
/// onto the configured zeroed flag on the bus, which the mode logic consumes.
pub struct ZeroingGate {
    /// The signal channels of each module, in placement order.
    module_channels: Vec<ModuleChannels>,

    /// The boolean input channel the completion flag is projected onto.
    zeroed_flag: String,

    /// The timeout and convergence threshold.
    config: ZeroingConfig,

    /// The moment the gate gives up waiting. [None] until initialized.
    deadline: Option<Instant>,

    /// The current state of the gate.
    state: ZeroingState,
}

impl ZeroingGate {
    /// Arms the deadline and zeroes all module outputs. Called on state entry.
    ///
    /// ## Parameters
    ///
    /// * 'outputs' - The output side of the signal bus.
    /// * 'now' - The current time.
    pub fn initialize(&mut self, outputs: &mut dyn OutputSignals, now: Instant) {
        debug!("Entering drivetrain zero");

        self.state = ZeroingState::Zeroing;
        self.deadline = Some(now + self.config.timeout);
        self.zero_outputs(outputs);
    }

    /// Returns true once the gate has released the platform, zeroed or timed
    /// out alike.
    pub fn is_done(&self) -> bool {
        self.state != ZeroingState::Zeroing
    }

    /// Creates a new [ZeroingGate] from the given configuration.
    ///
    /// ## Parameters
    ///
    /// * 'config' - The validated startup configuration.
    ///
    /// ## Errors
    ///
    /// * [Error::MismatchedModuleCount] - Returned when a per-module table in
    ///   the configuration does not have one entry per module.
    pub fn new(config: &DriveConfig) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self {
            module_channels: config.module_channels.clone(),
            zeroed_flag: config.zeroed_flag.clone(),
            config: config.zeroing.clone(),
            deadline: None,
            state: ZeroingState::Zeroing,
        })
    }

    /// Returns the current state of the gate.
    pub fn state(&self) -> ZeroingState {
        self.state
    }

    /// Runs one calibration cycle: re-asserts the zero flag on every module
    /// and checks for convergence or the deadline.
    ///
    /// ## Parameters
    ///
    /// * 'inputs' - The input side of the signal bus for this cycle.
    /// * 'outputs' - The output side of the signal bus for this cycle.
    /// * 'now' - The current time.
    pub fn update(
        &mut self,
        inputs: &mut dyn InputSignals,
        outputs: &mut dyn OutputSignals,
        now: Instant,
    ) -> ZeroingState {
        if self.state != ZeroingState::Zeroing {
            return self.state;
        }

        for channels in &self.module_channels {
            outputs.set_zero_flag(&channels.output_angle);
        }

        let converged = self.module_channels.iter().all(|channels| {
            inputs.numeric(&channels.angle_position).abs() < self.config.threshold
        });

        if converged {
            debug!("Drivetrain zero -> zeroed");
            self.state = ZeroingState::Zeroed;
            inputs.set_boolean(&self.zeroed_flag, true);
        } else if self.deadline.map_or(false, |deadline| now >= deadline) {
            error!(
                "Drivetrain zero timed out after {:?}; continuing with unverified module angles",
                self.config.timeout
            );
            self.deadline = None;
            self.state = ZeroingState::TimedOut;
            inputs.set_boolean(&self.zeroed_flag, true);
        }

        self.state
    }

    /// Zeroes all module outputs, whichever way the gate terminated. Called
    /// when the host leaves the zeroing state.
    ///
    /// ## Parameters
    ///
    /// * 'outputs' - The output side of the signal bus.
    pub fn dispose(&mut self, outputs: &mut dyn OutputSignals) {
        self.zero_outputs(outputs);
    }

    /// Writes zero speed and zero steering power for every module.
    fn zero_outputs(&self, outputs: &mut dyn OutputSignals) {
        for channels in &self.module_channels {
            outputs.write(&channels.output_speed, CommandKind::PercentPower, 0.0);
            outputs.write(&channels.output_angle, CommandKind::PercentPower, 0.0);
        }
    }
}
