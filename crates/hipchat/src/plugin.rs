use {
    async_trait::async_trait,
    secrecy::ExposeSecret,
    tracing::{debug, info, warn},
};

#[cfg(feature = "metrics")]
use {crate::definitions as hc_metrics, metrics::counter};

use herald_pipeline::{OutputPlugin, OutputRegistry, OutputRunner, PipelineMessage};

use crate::{
    config::HipchatOutputConfig,
    error::{Error, Result},
    outbound::{MessageForm, message_url, post_message},
};

/// Name the output is registered under.
pub const PLUGIN_NAME: &str = "HipchatOutput";

/// Register the HipChat output with `registry`.
pub fn register(registry: &mut OutputRegistry) {
    registry.register(PLUGIN_NAME, build);
}

fn build(settings: serde_json::Value) -> herald_pipeline::Result<Box<dyn OutputPlugin>> {
    let output = HipchatOutput::from_value(settings)
        .map_err(|e| herald_pipeline::Error::invalid_config(PLUGIN_NAME, e))?;
    Ok(Box::new(output))
}

/// Forwards pipeline messages to a HipChat room.
pub struct HipchatOutput {
    config: HipchatOutputConfig,
    http: reqwest::Client,
    url: String,
}

impl std::fmt::Debug for HipchatOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HipchatOutput")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HipchatOutput {
    /// Validate `config` and fix the endpoint for the output's lifetime.
    pub fn new(config: HipchatOutputConfig) -> Result<Self> {
        config.validate()?;
        if config.auth_token.expose_secret().is_empty() {
            warn!(
                room_id = %config.room_id,
                "HipChat auth_token is empty, requests will be rejected"
            );
        }
        let url = message_url(&config);
        info!(
            room_id = %config.room_id,
            from = %config.from,
            payload_only = config.payload_only,
            notify = config.notify,
            "HipChat output initialized"
        );
        Ok(Self {
            config,
            http: reqwest::Client::new(),
            url,
        })
    }

    /// Build from raw settings, as handed over by the registry.
    pub fn from_value(settings: serde_json::Value) -> Result<Self> {
        let config: HipchatOutputConfig = serde_json::from_value(settings)
            .map_err(|e| Error::config("settings", e.to_string()))?;
        Self::new(config)
    }

    /// Send one message to the room.
    pub async fn deliver(&self, message: &dyn PipelineMessage) -> Result<()> {
        let document;
        let text = if self.config.payload_only {
            message.payload()
        } else {
            document = message.to_json().map_err(Error::Serialize)?;
            document.as_str()
        };
        let form = MessageForm::new(&self.config, text, message.severity());
        post_message(&self.http, &self.url, &form).await
    }
}

#[async_trait]
impl OutputPlugin for HipchatOutput {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    async fn run(&self, runner: &mut dyn OutputRunner) -> herald_pipeline::Result<()> {
        info!(room_id = %self.config.room_id, "HipChat output running");
        let mut delivered = 0u64;
        let mut failed = 0u64;

        while let Some(pack) = runner.next_pack().await {
            match self.deliver(pack.message.as_ref()).await {
                Ok(()) => {
                    delivered += 1;
                    debug!(sequence = pack.sequence, "message sent to HipChat");
                    #[cfg(feature = "metrics")]
                    counter!(hc_metrics::MESSAGES_SENT_TOTAL).increment(1);
                },
                Err(e) => {
                    failed += 1;
                    #[cfg(feature = "metrics")]
                    counter!(hc_metrics::MESSAGES_FAILED_TOTAL, "reason" => e.kind())
                        .increment(1);
                    runner.log_error(PLUGIN_NAME, &e);
                },
            }
            pack.recycle();
        }

        info!(delivered, failed, "HipChat output stopped");
        Ok(())
    }
}
