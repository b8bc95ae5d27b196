use {secrecy::ExposeSecret, serde::Deserialize, tracing::debug};

use crate::{
    color::Color,
    config::HipchatOutputConfig,
    error::{Error, RemoteStatus, Result},
};

/// Value of the `message_format` form field.
pub const MESSAGE_FORMAT: &str = "text";

/// Body fields of a `rooms/message` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageForm<'a> {
    pub room_id: &'a str,
    pub from: &'a str,
    pub message: &'a str,
    pub message_format: &'static str,
    pub color: Color,
    pub notify: bool,
}

impl<'a> MessageForm<'a> {
    pub fn new(config: &'a HipchatOutputConfig, message: &'a str, severity: i32) -> Self {
        Self {
            room_id: &config.room_id,
            from: &config.from,
            message,
            message_format: MESSAGE_FORMAT,
            color: Color::from_severity(severity),
            notify: config.notify,
        }
    }

    /// Key/value pairs as they go on the wire. `notify` is only present
    /// when set.
    pub fn to_pairs(&self) -> Vec<(&'static str, &'a str)> {
        let mut pairs = vec![
            ("room_id", self.room_id),
            ("from", self.from),
            ("message", self.message),
            ("message_format", self.message_format),
            ("color", self.color.as_str()),
        ];
        if self.notify {
            pairs.push(("notify", "1"));
        }
        pairs
    }
}

/// Full endpoint URL, including the escaped auth token.
pub fn message_url(config: &HipchatOutputConfig) -> String {
    format!(
        "{}/rooms/message?auth_token={}",
        config.api_url.trim_end_matches('/'),
        urlencoding::encode(config.auth_token.expose_secret())
    )
}

#[derive(Deserialize)]
struct MessageResponse {
    status: String,
}

/// Map a documented failure status to its error.
///
/// Any other status, success or not, is judged by its body.
pub fn check_status(status: u16) -> Result<()> {
    match RemoteStatus::from_code(status) {
        Some(remote) => Err(Error::RemoteStatus(remote)),
        None => Ok(()),
    }
}

/// Decode a response body; only `{"status": "sent"}` counts as delivered.
pub fn decode_response(body: &[u8]) -> Result<()> {
    let response: MessageResponse = serde_json::from_slice(body).map_err(Error::Decode)?;
    if response.status != "sent" {
        return Err(Error::NotSent {
            status: response.status,
        });
    }
    Ok(())
}

/// POST `form` to `url` and classify the reply.
pub async fn post_message(http: &reqwest::Client, url: &str, form: &MessageForm<'_>) -> Result<()> {
    let resp = http.post(url).form(&form.to_pairs()).send().await?;
    let status = resp.status().as_u16();
    check_status(status)?;
    let body = resp.bytes().await?;
    debug!(status, bytes = body.len(), "HipChat response");
    decode_response(&body)
}
