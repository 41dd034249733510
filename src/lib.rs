#![warn(missing_docs)]

//! Kinematics core for a swerve (4 wheel steering and 4 wheel drive) robot.
//!
//! Computes, once per control cycle, the drive speed and steering angle for each
//! of the four independently steered modules, given the driver's commanded
//! translation and rotation and the measured wheel angles of the chassis. The
//! host control framework owns the cycle timing and the signal bus; this crate
//! owns the math.

use thiserror::Error;

/// Defines the 2D vector primitive used by the kinematics calculations
pub mod geometry;

/// Defines the fixed layout of the drive modules on the chassis
pub mod chassis;

/// Defines the signal bus seam between this crate and the host framework
pub mod signals;

/// Defines the startup configuration for the drivetrain
pub mod config;

/// Provides the frame transform, the per-module solver and the output normalizer
pub mod kinematics;

/// Provides the per-cycle drive behavior and the zeroing gate
pub mod behavior;

/// Provides the drive-mode selection consumed by the host mode logic
pub mod modes;

/// Defines the different errors for the swerve drive control crate.
#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A per-module table did not have exactly one entry for each drive module.
    #[error("Expected the {table} table to have {expected} entries, but it has {actual}.")]
    MismatchedModuleCount {
        /// The name of the table that failed validation.
        table: String,

        /// The number of entries the table should have.
        expected: usize,

        /// The number of entries the table actually has.
        actual: usize,
    },

    /// A mode selector was created without any drive variants to select from.
    #[error("At least one drive variant is required.")]
    NoDriveVariants,

    /// A zero-magnitude vector was used where a direction is required.
    #[error("A zero-magnitude vector has no meaningful direction.")]
    ZeroMagnitudeVector,
}
