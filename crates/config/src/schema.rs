use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level herald configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeraldConfig {
    /// Output sections keyed by instance name.
    pub outputs: BTreeMap<String, OutputSection>,
}

/// One configured output instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSection {
    /// Registered plugin name, e.g. "HipchatOutput".
    #[serde(rename = "type")]
    pub plugin: String,

    /// Everything else in the section, passed to the plugin factory as-is.
    #[serde(flatten)]
    pub settings: serde_json::Map<String, serde_json::Value>,
}

impl OutputSection {
    pub fn settings_value(&self) -> serde_json::Value {
        serde_json::Value::Object(self.settings.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("no outputs configured")]
    NoOutputs,

    #[error("output {name:?} has an empty type")]
    MissingType { name: String },
}

impl HeraldConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.outputs.is_empty() {
            return Err(ValidationError::NoOutputs);
        }
        if let Some((name, _)) = self
            .outputs
            .iter()
            .find(|(_, section)| section.plugin.trim().is_empty())
        {
            return Err(ValidationError::MissingType { name: name.clone() });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_keeps_plugin_settings() {
        let cfg: HeraldConfig = serde_json::from_value(serde_json::json!({
            "outputs": {
                "ops": { "type": "HipchatOutput", "room_id": "42", "notify": true }
            }
        }))
        .unwrap();
        let ops = &cfg.outputs["ops"];
        assert_eq!(ops.plugin, "HipchatOutput");
        assert_eq!(
            ops.settings_value(),
            serde_json::json!({ "room_id": "42", "notify": true })
        );
        cfg.validate().unwrap();
    }

    #[test]
    fn empty_config_is_invalid() {
        assert_eq!(
            HeraldConfig::default().validate(),
            Err(ValidationError::NoOutputs)
        );
    }

    #[test]
    fn blank_type_is_invalid() {
        let cfg: HeraldConfig = serde_json::from_value(serde_json::json!({
            "outputs": { "ops": { "type": " " } }
        }))
        .unwrap();
        assert_eq!(
            cfg.validate(),
            Err(ValidationError::MissingType { name: "ops".into() })
        );
    }

    #[test]
    fn missing_type_fails_to_parse() {
        let result: Result<HeraldConfig, _> = serde_json::from_value(serde_json::json!({
            "outputs": { "ops": { "room_id": "42" } }
        }));
        assert!(result.is_err());
    }
}
