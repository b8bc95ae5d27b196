//! Host-side contract for herald output plugins.
//!
//! A host delivers [`PipelinePack`]s to an output through an
//! [`OutputRunner`], and the output hands each pack back with
//! [`PipelinePack::recycle`] once it is done with it. Outputs are built by
//! name from an explicit [`OutputRegistry`] owned by whoever composes the
//! pipeline.

pub mod error;
pub mod message;
pub mod pack;
pub mod plugin;
pub mod registry;
pub mod runner;

pub use {
    error::{Error, Result},
    message::{Message, PipelineMessage},
    pack::PipelinePack,
    plugin::OutputPlugin,
    registry::{OutputFactory, OutputRegistry},
    runner::{ChannelRunner, OutputRunner},
};
