/// Provides the per-cycle swerve drive behavior
pub mod swerve_drive;

/// Provides the zeroing gate that calibrates the module angle references
pub mod zeroing;
