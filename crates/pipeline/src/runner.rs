use std::sync::atomic::{AtomicU64, Ordering};

use {async_trait::async_trait, tokio::sync::mpsc, tracing::error};

use crate::pack::PipelinePack;

/// Host side of an output's consume loop.
#[async_trait]
pub trait OutputRunner: Send {
    /// Wait for the next pack. `None` means the host closed the source and
    /// the output should return.
    async fn next_pack(&mut self) -> Option<PipelinePack>;

    /// Report a per-message failure to the host.
    fn log_error(&self, plugin: &str, error: &(dyn std::error::Error + 'static));
}

/// [`OutputRunner`] fed by a bounded tokio channel.
///
/// Errors are reported as `tracing` events and counted.
#[derive(Debug)]
pub struct ChannelRunner {
    inbound: mpsc::Receiver<PipelinePack>,
    errors: AtomicU64,
}

impl ChannelRunner {
    pub fn new(inbound: mpsc::Receiver<PipelinePack>) -> Self {
        Self {
            inbound,
            errors: AtomicU64::new(0),
        }
    }

    /// Convenience constructor returning the sender alongside the runner.
    pub fn channel(capacity: usize) -> (mpsc::Sender<PipelinePack>, Self) {
        let (tx, rx) = mpsc::channel(capacity);
        (tx, Self::new(rx))
    }

    /// Number of errors reported so far.
    pub fn error_count(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl OutputRunner for ChannelRunner {
    async fn next_pack(&mut self) -> Option<PipelinePack> {
        self.inbound.recv().await
    }

    fn log_error(&self, plugin: &str, err: &(dyn std::error::Error + 'static)) {
        self.errors.fetch_add(1, Ordering::Relaxed);
        error!(plugin, error = %err, "output error");
    }
}
