//! Defines the fixed layout of the drive modules on the chassis.
//!
//! The layout is loaded once at startup and is read-only for the lifetime of
//! the robot. Every per-module sequence in this crate, inputs, outputs and
//! geometry alike, is ordered front-right, front-left, back-left, back-right
//! so that index `i` always refers to the same physical module.

extern crate nalgebra as na;

use std::fmt::Display;

use crate::geometry::Vector2;
use crate::kinematics;
use crate::Error;

#[cfg(test)]
#[path = "chassis_tests.rs"]
mod chassis_tests;

/// The number of drive modules on the chassis.
pub const MODULE_COUNT: usize = 4;

/// Identifies one of the four drive modules by its place on the chassis.
///
/// The discriminants fix the shared ordering of all per-module sequences.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ModulePlacement {
    /// The module at the front right corner of the chassis. Index 0.
    FrontRight,

    /// The module at the front left corner of the chassis. Index 1.
    FrontLeft,

    /// The module at the back left corner of the chassis. Index 2.
    BackLeft,

    /// The module at the back right corner of the chassis. Index 3.
    BackRight,
}

impl ModulePlacement {
    /// Returns all module placements in index order.
    pub fn all() -> [ModulePlacement; MODULE_COUNT] {
        [
            ModulePlacement::FrontRight,
            ModulePlacement::FrontLeft,
            ModulePlacement::BackLeft,
            ModulePlacement::BackRight,
        ]
    }

    /// Returns the index of this placement in every per-module sequence.
    pub fn index(&self) -> usize {
        match self {
            ModulePlacement::FrontRight => 0,
            ModulePlacement::FrontLeft => 1,
            ModulePlacement::BackLeft => 2,
            ModulePlacement::BackRight => 3,
        }
    }
}

impl Display for ModulePlacement {
    #[cfg_attr(test, mutants::skip)] // Formatting output only, nothing depends on the text
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ModulePlacement::FrontRight => "front right",
            ModulePlacement::FrontLeft => "front left",
            ModulePlacement::BackLeft => "back left",
            ModulePlacement::BackRight => "back right",
        };
        write!(f, "ModulePlacement [{}]", name)
    }
}

/// Stores the positions of the drive modules relative to the center of the
/// chassis, and the rotation directions derived from them.
///
/// The rotation direction of a module is its position vector, normalized and
/// rotated 90 degrees. It is the direction the module has to drive in to
/// produce a pure counter-clockwise rotation of the chassis, and it doubles as
/// the heading idle wheels are parked at so the robot can start rotating
/// without waiting on the steering.
#[derive(Debug)]
pub struct ModuleLayout {
    /// The position of each module relative to the center of the chassis.
    positions: Vec<Vector2>,

    /// The unit vector each module drives along for a pure chassis rotation.
    rotation_directions: Vec<Vector2>,
}

impl ModuleLayout {
    /// Creates a new [ModuleLayout] from the (x, y) positions of the modules
    /// relative to the center of the chassis, in placement order.
    ///
    /// ## Parameters
    ///
    /// * 'positions' - The module positions on a standard x,y grid with the
    ///   front of the chassis facing along the positive x-axis.
    ///
    /// ## Errors
    ///
    /// * [Error::MismatchedModuleCount] - Returned when the number of positions
    ///   is not [MODULE_COUNT].
    /// * [Error::ZeroMagnitudeVector] - Returned when a module sits exactly on
    ///   the center of the chassis, because such a module has no rotation
    ///   direction.
    pub fn from_positions(positions: &[(f64, f64)]) -> Result<ModuleLayout, Error> {
        if positions.len() != MODULE_COUNT {
            return Err(Error::MismatchedModuleCount {
                table: "module_positions".to_string(),
                expected: MODULE_COUNT,
                actual: positions.len(),
            });
        }

        let positions: Vec<Vector2> = positions
            .iter()
            .map(|(x, y)| Vector2::from_cartesian(na::Vector2::new(*x, *y)))
            .collect();

        let rotation_directions = positions
            .iter()
            .map(|position| Ok(position.normalize()?.rotate(90.0)))
            .collect::<Result<Vec<Vector2>, Error>>()?;

        Ok(ModuleLayout {
            positions,
            rotation_directions,
        })
    }

    /// Returns the position of the given module relative to the center of the
    /// chassis.
    pub fn position(&self, placement: ModulePlacement) -> &Vector2 {
        &self.positions[placement.index()]
    }

    /// Returns the rotation direction of the given module.
    pub fn rotation_direction(&self, placement: ModulePlacement) -> &Vector2 {
        &self.rotation_directions[placement.index()]
    }

    /// Returns the rotation directions of all modules, in placement order.
    pub fn rotation_directions(&self) -> &[Vector2] {
        &self.rotation_directions
    }

    /// Returns the rotation directions for a rotation about an arbitrary
    /// center instead of the center of the chassis, in placement order.
    ///
    /// The directions are scaled as a set so that the module furthest from the
    /// center has a magnitude of exactly 1.0. Modules closer to the center get
    /// proportionally smaller magnitudes, which keeps the chassis rigid while
    /// it orbits the center.
    ///
    /// ## Parameters
    ///
    /// * 'center' - The center of rotation, relative to the center of the
    ///   chassis. Must not coincide with a module position.
    pub fn rotation_directions_about(&self, center: &Vector2) -> Result<Vec<Vector2>, Error> {
        let mut directions = self
            .positions
            .iter()
            .map(|position| position.subtract(center).rotate(90.0))
            .collect::<Vec<Vector2>>();

        if directions
            .iter()
            .any(|direction| direction.magnitude() == 0.0)
        {
            return Err(Error::ZeroMagnitudeVector);
        }

        kinematics::scale_largest_to(&mut directions, 1.0);
        Ok(directions)
    }
}
