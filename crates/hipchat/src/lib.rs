//! HipChat output for herald.
//!
//! Forwards each pipeline message to a HipChat room through the v1
//! `rooms/message` API, coloring the notification by message severity.

pub mod color;
pub mod config;
#[cfg(feature = "metrics")]
pub mod definitions;
pub mod error;
pub mod outbound;
pub mod plugin;

pub use {
    color::Color,
    config::HipchatOutputConfig,
    error::{Error, RemoteStatus, Result},
    plugin::{HipchatOutput, PLUGIN_NAME, register},
};
