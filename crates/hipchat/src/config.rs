use {
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

use crate::error::{Error, Result};

/// HipChat v1 API base.
pub const DEFAULT_API_URL: &str = "https://api.hipchat.com/v1";

/// HipChat refuses sender names longer than this.
pub const MAX_FROM_LEN: usize = 15;

/// Configuration for the HipChat output.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HipchatOutputConfig {
    /// Send only the message payload instead of the whole message as JSON.
    pub payload_only: bool,

    /// API token, sent as the `auth_token` query parameter.
    #[serde(serialize_with = "serialize_secret")]
    pub auth_token: Secret<String>,

    /// ID or name of the room. Required. Numeric IDs may be given unquoted.
    #[serde(deserialize_with = "deserialize_room_id")]
    pub room_id: String,

    /// Sender name shown in the room, at most 15 characters.
    pub from: String,

    /// Whether the message should trigger a notification for people in the
    /// room. Each recipient's own preferences still apply.
    pub notify: bool,

    /// API base, without the trailing `/rooms/message`.
    pub api_url: String,
}

impl std::fmt::Debug for HipchatOutputConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HipchatOutputConfig")
            .field("payload_only", &self.payload_only)
            .field("auth_token", &"[REDACTED]")
            .field("room_id", &self.room_id)
            .field("from", &self.from)
            .field("notify", &self.notify)
            .field("api_url", &self.api_url)
            .finish()
    }
}

fn serialize_secret<S: serde::Serializer>(
    secret: &Secret<String>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

fn deserialize_room_id<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RoomId {
        Name(String),
        Id(u64),
    }

    Ok(match RoomId::deserialize(deserializer)? {
        RoomId::Name(name) => name,
        RoomId::Id(id) => id.to_string(),
    })
}

impl Default for HipchatOutputConfig {
    fn default() -> Self {
        Self {
            payload_only: true,
            auth_token: Secret::new(String::new()),
            room_id: String::new(),
            from: "Heka".into(),
            notify: false,
            api_url: DEFAULT_API_URL.into(),
        }
    }
}

impl HipchatOutputConfig {
    /// Check the fields HipChat would otherwise reject on every request.
    pub fn validate(&self) -> Result<()> {
        if self.room_id.is_empty() {
            return Err(Error::config(
                "room_id",
                "must contain a HipChat room ID or name",
            ));
        }
        let from_len = self.from.chars().count();
        if from_len > MAX_FROM_LEN {
            return Err(Error::config(
                "from",
                format!("must be at most {MAX_FROM_LEN} characters, got {from_len}"),
            ));
        }
        if self.api_url.is_empty() {
            return Err(Error::config("api_url", "must not be empty"));
        }
        Ok(())
    }
}
