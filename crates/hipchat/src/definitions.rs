//! Metric names emitted by the HipChat output.

/// Messages HipChat accepted with `{"status": "sent"}`
pub const MESSAGES_SENT_TOTAL: &str = "herald_hipchat_messages_sent_total";
/// Messages that failed, labelled by `reason`
pub const MESSAGES_FAILED_TOTAL: &str = "herald_hipchat_messages_failed_total";
