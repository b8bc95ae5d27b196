//! Configuration loading for herald.
//!
//! A config file lists named output sections, each selecting a plugin by
//! `type` and carrying that plugin's settings:
//!
//! ```toml
//! [outputs.ops_room]
//! type = "HipchatOutput"
//! auth_token = "${HIPCHAT_TOKEN}"
//! room_id = "ops"
//! ```

pub mod env_subst;
pub mod loader;
pub mod schema;

pub use {
    loader::{config_dir, discover_and_load, find_config_file, load_config},
    schema::{HeraldConfig, OutputSection, ValidationError},
};
