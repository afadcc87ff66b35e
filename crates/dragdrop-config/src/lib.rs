//! Drop list configuration.
//!
//! A [`DropListConfig`] carries every knob a drop list exposes through its
//! builder calls. All fields have defaults, so a partial TOML table is
//! enough:
//!
//! ```rust
//! use dragdrop_config::load_from_str;
//!
//! let config = load_from_str("orientation = \"horizontal\"\nauto_scroll_step = 4.0").unwrap();
//! assert_eq!(config.auto_scroll_step, 4.0);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{DropListConfig, DEFAULT_PROXIMITY_THRESHOLD};
pub use toml_loader::{load_from_path, load_from_str};
pub use validation::validate;
