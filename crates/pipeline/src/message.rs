use std::collections::BTreeMap;

use {
    serde::{Deserialize, Serialize},
    uuid::Uuid,
};

/// Severity assigned to messages that do not carry one (syslog "debug").
pub const DEFAULT_SEVERITY: i32 = 7;

/// What an output may read from an inbound message.
///
/// Outputs only ever look at the payload and the severity, or ask for the
/// whole record as a JSON document.
pub trait PipelineMessage: Send + Sync {
    /// Primary textual content of the message.
    fn payload(&self) -> &str;

    /// Syslog-style level, lower is more severe.
    fn severity(&self) -> i32;

    /// Serialize the full record to a JSON document.
    fn to_json(&self) -> serde_json::Result<String>;
}

/// A single pipeline event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    pub uuid: Uuid,
    /// Nanoseconds since the Unix epoch.
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub msg_type: String,
    pub logger: String,
    pub severity: i32,
    pub payload: String,
    pub env_version: String,
    pub pid: i32,
    pub hostname: String,
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl Default for Message {
    fn default() -> Self {
        Self {
            uuid: Uuid::nil(),
            timestamp: 0,
            msg_type: String::new(),
            logger: String::new(),
            severity: DEFAULT_SEVERITY,
            payload: String::new(),
            env_version: String::new(),
            pid: 0,
            hostname: String::new(),
            fields: BTreeMap::new(),
        }
    }
}

fn unix_now_nanos() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_nanos()).unwrap_or(i64::MAX))
        .unwrap_or_default()
}

impl Message {
    /// Fresh message with a random UUID and the current timestamp.
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            timestamp: unix_now_nanos(),
            payload: payload.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_severity(mut self, severity: i32) -> Self {
        self.severity = severity;
        self
    }

    #[must_use]
    pub fn with_logger(mut self, logger: impl Into<String>) -> Self {
        self.logger = logger.into();
        self
    }

    #[must_use]
    pub fn with_field(
        mut self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

impl PipelineMessage for Message {
    fn payload(&self) -> &str {
        &self.payload
    }

    fn severity(&self) -> i32 {
        self.severity
    }

    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_severity_defaults_to_debug() {
        let msg: Message = serde_json::from_str(r#"{"payload": "disk full"}"#).unwrap();
        assert_eq!(msg.payload, "disk full");
        assert_eq!(msg.severity, DEFAULT_SEVERITY);
        assert!(msg.fields.is_empty());
    }

    #[test]
    fn type_field_is_renamed() {
        let msg: Message =
            serde_json::from_str(r#"{"type": "nginx.access", "severity": 3}"#).unwrap();
        assert_eq!(msg.msg_type, "nginx.access");
        assert_eq!(msg.severity(), 3);

        let json: serde_json::Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
        assert_eq!(json["type"], "nginx.access");
        assert!(json.get("msg_type").is_none());
    }

    #[test]
    fn to_json_includes_fields() {
        let msg = Message::new("hello")
            .with_severity(4)
            .with_logger("syslog")
            .with_field("status", 502);
        let json: serde_json::Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
        assert_eq!(json["payload"], "hello");
        assert_eq!(json["severity"], 4);
        assert_eq!(json["logger"], "syslog");
        assert_eq!(json["fields"]["status"], 502);
        assert_ne!(msg.uuid, Uuid::nil());
    }
}
