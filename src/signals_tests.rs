use super::*;

#[test]
fn test_unknown_channels_read_as_defaults() {
    let store = SignalStore::new();

    assert!(!store.boolean("ipb_unknown"));
    assert!(!store.boolean_rising_edge("ipb_unknown"));
    assert!(!store.boolean_falling_edge("ipb_unknown"));
    assert_eq!(store.numeric("ipn_unknown"), 0.0);
    assert_eq!(store.vector_component("ipv_unknown", "angle"), 0.0);
    assert_eq!(store.output("opn_unknown"), None);
    assert!(!store.zero_flag("opn_unknown"));
}

#[test]
fn test_boolean_rising_edge_triggers_once() {
    let mut store = SignalStore::new();

    store.set_boolean("ipb_button", false);
    assert!(!store.boolean_rising_edge("ipb_button"));

    store.set_boolean("ipb_button", true);
    assert!(store.boolean("ipb_button"));
    assert!(store.boolean_rising_edge("ipb_button"));

    // Held down on the next cycle, no new edge.
    store.set_boolean("ipb_button", true);
    assert!(!store.boolean_rising_edge("ipb_button"));
}

#[test]
fn test_boolean_falling_edge_triggers_once() {
    let mut store = SignalStore::new();

    store.set_boolean("ipb_button", true);
    store.set_boolean("ipb_button", false);
    assert!(store.boolean_falling_edge("ipb_button"));

    store.set_boolean("ipb_button", false);
    assert!(!store.boolean_falling_edge("ipb_button"));
}

#[test]
fn test_first_write_of_true_is_a_rising_edge() {
    let mut store = SignalStore::new();

    store.set_boolean("ipb_button", true);
    assert!(store.boolean_rising_edge("ipb_button"));
}

#[test]
fn test_numeric_channels_store_the_latest_value() {
    let mut store = SignalStore::new();

    store.set_numeric("ipn_drivetrain_front_right_angle", 42.5);
    assert_eq!(store.numeric("ipn_drivetrain_front_right_angle"), 42.5);

    store.set_numeric("ipn_drivetrain_front_right_angle", -10.0);
    assert_eq!(store.numeric("ipn_drivetrain_front_right_angle"), -10.0);
}

#[test]
fn test_vector_channels_store_named_components() {
    let mut store = SignalStore::new();

    store.update_vector_component("ipv_navx", "angle", 15.0);
    assert_eq!(store.vector_component("ipv_navx", "angle"), 15.0);
    assert_eq!(store.vector_component("ipv_navx", "pitch"), 0.0);
}

#[test]
fn test_outputs_keep_the_command_kind() {
    let mut store = SignalStore::new();

    OutputSignals::write(
        &mut store,
        "opn_drivetrain_front_right_angle",
        CommandKind::AbsolutePosition,
        90.0,
    );
    assert_eq!(
        store.output("opn_drivetrain_front_right_angle"),
        Some((CommandKind::AbsolutePosition, 90.0))
    );

    OutputSignals::write(
        &mut store,
        "opn_drivetrain_front_right_speed",
        CommandKind::PercentPower,
        0.5,
    );
    assert_eq!(
        store.output("opn_drivetrain_front_right_speed"),
        Some((CommandKind::PercentPower, 0.5))
    );
}

#[test]
fn test_take_zero_flag_consumes_the_flag() {
    let mut store = SignalStore::new();

    store.set_zero_flag("opn_drivetrain_front_right_angle");
    assert!(store.zero_flag("opn_drivetrain_front_right_angle"));

    assert!(store.take_zero_flag("opn_drivetrain_front_right_angle"));
    assert!(!store.zero_flag("opn_drivetrain_front_right_angle"));
    assert!(!store.take_zero_flag("opn_drivetrain_front_right_angle"));
}
