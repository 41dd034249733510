//! Defines the signal bus seam between the swerve control code and the host
//! framework.
//!
//! The host framework carries all joystick, sensor and motor values on a named
//! signal bus. The behaviors in this crate never touch that bus directly;
//! instead they are handed an implementation of the [InputSignals] and
//! [OutputSignals] traits once per cycle. That keeps the kinematics testable
//! with synthetic signals, and it keeps the bus implementation free to live
//! wherever the host wants it.
//!
//! The [SignalStore] type is a complete in-memory implementation of both
//! traits. Hosts can use it as-is for a single-process robot, and the tests in
//! this crate drive the behaviors through it.

use std::collections::{HashMap, HashSet};

#[cfg(test)]
#[path = "signals_tests.rs"]
mod signals_tests;

/// The kind of command carried by a numeric output channel.
///
/// The downstream motor controller interprets the value differently depending
/// on the kind, so the kind travels with every numeric write.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CommandKind {
    /// An open-loop fraction of full power, in [-1, 1].
    PercentPower,

    /// An absolute position setpoint, e.g. a steering angle in degrees.
    AbsolutePosition,
}

/// Defines the read side of the signal bus, plus the few input channels the
/// control code writes back as one-way projections for other consumers.
pub trait InputSignals {
    /// Returns the current value of a boolean channel. Unknown channels read
    /// as false.
    fn boolean(&self, channel: &str) -> bool;

    /// Returns true when a boolean channel changed from false to true since
    /// the previous cycle.
    fn boolean_rising_edge(&self, channel: &str) -> bool;

    /// Returns true when a boolean channel changed from true to false since
    /// the previous cycle.
    fn boolean_falling_edge(&self, channel: &str) -> bool;

    /// Returns the current value of a numeric channel. Unknown channels read
    /// as 0.0.
    fn numeric(&self, channel: &str) -> f64;

    /// Returns a named component of a vector channel, e.g. the "angle"
    /// component of the heading sensor. Unknown channels and components read
    /// as 0.0.
    fn vector_component(&self, channel: &str, component: &str) -> f64;

    /// Writes a boolean channel. Used to project control-owned state, like the
    /// field-centric flag, onto the bus for other consumers.
    fn set_boolean(&mut self, channel: &str, value: bool);

    /// Writes a numeric channel. Used to mirror each module's commanded speed
    /// onto its feedback channel.
    fn set_numeric(&mut self, channel: &str, value: f64);
}

/// Defines the write side of the signal bus, carrying commands to the motor
/// controllers.
pub trait OutputSignals {
    /// Writes a numeric command to an output channel.
    fn write(&mut self, channel: &str, kind: CommandKind, value: f64);

    /// Raises the zero flag on an output channel, instructing the actuator to
    /// re-home against its zero reference. Distinct from a numeric setpoint.
    fn set_zero_flag(&mut self, channel: &str);
}

/// The stored value of a boolean channel, keeping one cycle of history for
/// edge detection.
#[derive(Clone, Copy, Debug)]
struct BooleanSignal {
    /// The value written most recently.
    current: bool,

    /// The value the channel had before the most recent write.
    previous: bool,
}

/// An in-memory signal bus implementing both [InputSignals] and
/// [OutputSignals].
///
/// Boolean edge detection works on write boundaries: every write shifts the
/// current value into the one-cycle history, so a host that writes each
/// channel once per cycle gets rising and falling edges relative to the
/// previous cycle.
#[derive(Debug, Default)]
pub struct SignalStore {
    /// The boolean input channels.
    booleans: HashMap<String, BooleanSignal>,

    /// The numeric input channels.
    numerics: HashMap<String, f64>,

    /// The vector input channels, stored as named components.
    vectors: HashMap<String, HashMap<String, f64>>,

    /// The numeric output channels, tagged with their command kind.
    outputs: HashMap<String, (CommandKind, f64)>,

    /// The output channels whose zero flag is currently raised.
    zero_flags: HashSet<String>,
}

impl SignalStore {
    /// Creates a new, empty [SignalStore].
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the most recent command written to a numeric output channel,
    /// or [None] when nothing has been written to it.
    pub fn output(&self, channel: &str) -> Option<(CommandKind, f64)> {
        self.outputs.get(channel).copied()
    }

    /// Removes and returns the zero flag of an output channel. The actuator
    /// host calls this once per cycle; a raised flag is consumed by reading
    /// it.
    pub fn take_zero_flag(&mut self, channel: &str) -> bool {
        self.zero_flags.remove(channel)
    }

    /// Returns whether the zero flag of an output channel is currently
    /// raised, without consuming it.
    pub fn zero_flag(&self, channel: &str) -> bool {
        self.zero_flags.contains(channel)
    }

    /// Writes a named component of a vector input channel.
    ///
    /// ## Parameters
    ///
    /// * 'channel' - The name of the vector channel.
    /// * 'component' - The name of the component within the channel.
    /// * 'value' - The new value of the component.
    pub fn update_vector_component(&mut self, channel: &str, component: &str, value: f64) {
        self.vectors
            .entry(channel.to_string())
            .or_default()
            .insert(component.to_string(), value);
    }
}

impl InputSignals for SignalStore {
    fn boolean(&self, channel: &str) -> bool {
        self.booleans
            .get(channel)
            .map(|signal| signal.current)
            .unwrap_or(false)
    }

    fn boolean_rising_edge(&self, channel: &str) -> bool {
        self.booleans
            .get(channel)
            .map(|signal| signal.current && !signal.previous)
            .unwrap_or(false)
    }

    fn boolean_falling_edge(&self, channel: &str) -> bool {
        self.booleans
            .get(channel)
            .map(|signal| !signal.current && signal.previous)
            .unwrap_or(false)
    }

    fn numeric(&self, channel: &str) -> f64 {
        self.numerics.get(channel).copied().unwrap_or(0.0)
    }

    fn vector_component(&self, channel: &str, component: &str) -> f64 {
        self.vectors
            .get(channel)
            .and_then(|components| components.get(component))
            .copied()
            .unwrap_or(0.0)
    }

    fn set_boolean(&mut self, channel: &str, value: bool) {
        let signal = self
            .booleans
            .entry(channel.to_string())
            .or_insert(BooleanSignal {
                current: false,
                previous: false,
            });
        signal.previous = signal.current;
        signal.current = value;
    }

    fn set_numeric(&mut self, channel: &str, value: f64) {
        self.numerics.insert(channel.to_string(), value);
    }
}

impl OutputSignals for SignalStore {
    fn write(&mut self, channel: &str, kind: CommandKind, value: f64) {
        self.outputs.insert(channel.to_string(), (kind, value));
    }

    fn set_zero_flag(&mut self, channel: &str) {
        self.zero_flags.insert(channel.to_string());
    }
}
