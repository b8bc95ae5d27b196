use async_trait::async_trait;

use crate::{error::Result, runner::OutputRunner};

/// An output consumes packs from its runner until the host closes the
/// source.
#[async_trait]
pub trait OutputPlugin: Send + Sync {
    /// Name the plugin is registered under (e.g. "HipchatOutput").
    fn name(&self) -> &str;

    /// Drain the runner. Per-message failures are reported through
    /// [`OutputRunner::log_error`] and must not end the loop.
    async fn run(&self, runner: &mut dyn OutputRunner) -> Result<()>;
}
