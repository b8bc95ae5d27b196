use tokio::sync::mpsc;

use crate::message::PipelineMessage;

/// Sender side of the channel packs are returned on once consumed.
pub type Recycler = mpsc::UnboundedSender<u64>;

/// Host envelope around one inbound message.
///
/// Every pack handed to an output must be recycled exactly once, whether
/// or not the output managed to deliver it.
pub struct PipelinePack {
    pub sequence: u64,
    pub message: Box<dyn PipelineMessage>,
    recycler: Option<Recycler>,
}

impl std::fmt::Debug for PipelinePack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelinePack")
            .field("sequence", &self.sequence)
            .field("severity", &self.message.severity())
            .field("recyclable", &self.recycler.is_some())
            .finish_non_exhaustive()
    }
}

impl PipelinePack {
    pub fn new(sequence: u64, message: impl PipelineMessage + 'static) -> Self {
        Self::from_boxed(sequence, Box::new(message))
    }

    pub fn from_boxed(sequence: u64, message: Box<dyn PipelineMessage>) -> Self {
        Self {
            sequence,
            message,
            recycler: None,
        }
    }

    #[must_use]
    pub fn with_recycler(mut self, recycler: Recycler) -> Self {
        self.recycler = Some(recycler);
        self
    }

    /// Release the pack back to the host.
    pub fn recycle(self) {
        if let Some(recycler) = self.recycler {
            // The host may already have stopped listening; nothing to do then.
            let _ = recycler.send(self.sequence);
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::message::Message};

    #[test]
    fn recycle_reports_sequence() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        PipelinePack::new(7, Message::new("a"))
            .with_recycler(tx)
            .recycle();
        assert_eq!(rx.try_recv().unwrap(), 7);
    }

    #[test]
    fn recycle_after_host_stopped_is_silent() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        PipelinePack::new(1, Message::new("a"))
            .with_recycler(tx)
            .recycle();
    }

    #[test]
    fn recycle_without_recycler_is_noop() {
        PipelinePack::new(1, Message::new("a")).recycle();
    }
}
