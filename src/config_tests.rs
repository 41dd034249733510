use super::*;

#[test]
fn test_default_config_is_valid() {
    let config = DriveConfig::default();
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_default_zeroing_matches_the_robot_defaults() {
    let zeroing = ZeroingConfig::default();
    assert_eq!(zeroing.timeout, Duration::from_millis(500));
    assert_eq!(zeroing.threshold, 0.1);
}

#[test]
fn test_conventional_channels_follow_the_naming_scheme() {
    let channels = ModuleChannels::conventional(ModulePlacement::BackLeft);
    assert_eq!(channels.measured_angle, "ipn_drivetrain_back_left_angle");
    assert_eq!(
        channels.angle_position,
        "ipn_drivetrain_back_left_angle_position"
    );
    assert_eq!(channels.feedback_speed, "ipn_drivetrain_back_left_speed");
    assert_eq!(channels.output_angle, "opn_drivetrain_back_left_angle");
    assert_eq!(channels.output_speed, "opn_drivetrain_back_left_speed");
}

#[test]
fn test_validate_rejects_wrong_position_count() {
    let mut config = DriveConfig::default();
    config.module_positions.pop();

    assert_eq!(
        config.validate(),
        Err(Error::MismatchedModuleCount {
            table: "module_positions".to_string(),
            expected: MODULE_COUNT,
            actual: MODULE_COUNT - 1,
        })
    );
}

#[test]
fn test_validate_rejects_wrong_channel_count() {
    let mut config = DriveConfig::default();
    config
        .module_channels
        .push(ModuleChannels::conventional(ModulePlacement::FrontRight));

    assert_eq!(
        config.validate(),
        Err(Error::MismatchedModuleCount {
            table: "module_channels".to_string(),
            expected: MODULE_COUNT,
            actual: MODULE_COUNT + 1,
        })
    );
}
