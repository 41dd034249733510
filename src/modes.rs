//! Provides the drive-mode selection consumed by the host mode logic.
//!
//! The host's state machine decides which behavior runs; this module gives it
//! a finite set of drive variants to cycle through and the two readiness
//! predicates it needs: the zeroing gate runs until the platform reports
//! zeroed, and the drive behavior runs afterwards. The kinematics core itself
//! never sees mode names, it only receives the policy values of the selected
//! variant.

use crate::config::IdleHeadingPolicy;
use crate::signals::InputSignals;
use crate::Error;

#[cfg(test)]
#[path = "modes_tests.rs"]
mod modes_tests;

/// One selectable drive variant: the policy values that used to distinguish
/// the near-identical drive behavior copies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriveVariant {
    /// How the wheels are aimed while the joysticks are idle.
    pub idle_heading_policy: IdleHeadingPolicy,

    /// The angle added to the heading correction in field-centric mode.
    pub field_centric_offset_in_degrees: f64,
}

/// Cycles through the configured drive variants on the mode button and gates
/// the drive behind the zeroing flag.
#[derive(Debug)]
pub struct ModeSelector {
    /// The drive variants, in cycling order. Never empty.
    variants: Vec<DriveVariant>,

    /// The index of the currently selected variant.
    selected: usize,

    /// The boolean input channel whose falling edge advances the selection.
    mode_button: String,

    /// The boolean input channel that records whether the zeroing gate has
    /// completed.
    zeroed_flag: String,
}

impl ModeSelector {
    /// Returns true when the drive behavior is allowed to run, i.e. once the
    /// zeroing gate has released the platform.
    pub fn drive_ready(&self, inputs: &dyn InputSignals) -> bool {
        inputs.boolean(&self.zeroed_flag)
    }

    /// Resets the selection to the first variant. Called on mode entry.
    pub fn initialize(&mut self) {
        self.selected = 0;
    }

    /// Creates a new [ModeSelector].
    ///
    /// ## Parameters
    ///
    /// * 'variants' - The drive variants to cycle through, in order.
    /// * 'mode_button' - The boolean input channel whose falling edge advances
    ///   the selection.
    /// * 'zeroed_flag' - The boolean input channel carrying the zeroing gate's
    ///   completion flag.
    ///
    /// ## Errors
    ///
    /// * [Error::NoDriveVariants] - Returned when the variant list is empty.
    pub fn new(
        variants: Vec<DriveVariant>,
        mode_button: &str,
        zeroed_flag: &str,
    ) -> Result<Self, Error> {
        if variants.is_empty() {
            return Err(Error::NoDriveVariants);
        }

        Ok(Self {
            variants,
            selected: 0,
            mode_button: mode_button.to_string(),
            zeroed_flag: zeroed_flag.to_string(),
        })
    }

    /// Returns the currently selected drive variant.
    pub fn selected(&self) -> &DriveVariant {
        &self.variants[self.selected]
    }

    /// Advances the selection on a falling edge of the mode button, wrapping
    /// back to the first variant after the last one.
    ///
    /// ## Parameters
    ///
    /// * 'inputs' - The input side of the signal bus for this cycle.
    pub fn update(&mut self, inputs: &dyn InputSignals) {
        if inputs.boolean_falling_edge(&self.mode_button) {
            self.selected = (self.selected + 1) % self.variants.len();
        }
    }

    /// Returns true when the zeroing gate should run, i.e. while the platform
    /// has not been zeroed yet.
    pub fn zeroing_ready(&self, inputs: &dyn InputSignals) -> bool {
        !inputs.boolean(&self.zeroed_flag)
    }
}
