//! Range validation for drop list configs.

mod helpers;


use crate::schema::DropListConfig;
use dragdrop_common::ConfigError;

use helpers::validate_range_f64;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &DropListConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_range_f64(&mut errors, "auto_scroll_step", config.auto_scroll_step, 0.0, 100.0);
    validate_range_f64(
        &mut errors,
        "drop_proximity_threshold",
        config.drop_proximity_threshold,
        0.0,
        0.5,
    );
    validate_range_f64(
        &mut errors,
        "scroll_proximity_threshold",
        config.scroll_proximity_threshold,
        0.0,
        0.5,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
