use std::collections::HashMap;

use crate::{
    error::{Error, Result},
    plugin::OutputPlugin,
};

/// Builds a configured output from its raw settings.
pub type OutputFactory = fn(serde_json::Value) -> Result<Box<dyn OutputPlugin>>;

/// Name → factory table, owned by whoever composes the pipeline.
#[derive(Debug)]
pub struct OutputRegistry {
    factories: HashMap<String, OutputFactory>,
}

impl Default for OutputRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register `factory` under `name`, replacing any earlier entry.
    pub fn register(&mut self, name: impl Into<String>, factory: OutputFactory) {
        self.factories.insert(name.into(), factory);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Construct the output registered as `name` from `config`.
    pub fn build(&self, name: &str, config: serde_json::Value) -> Result<Box<dyn OutputPlugin>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| Error::unknown_plugin(name))?;
        factory(config)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::runner::OutputRunner, async_trait::async_trait};

    struct NullOutput;

    #[async_trait]
    impl OutputPlugin for NullOutput {
        fn name(&self) -> &str {
            "NullOutput"
        }

        async fn run(&self, runner: &mut dyn OutputRunner) -> Result<()> {
            while let Some(pack) = runner.next_pack().await {
                pack.recycle();
            }
            Ok(())
        }
    }

    fn null_factory(_config: serde_json::Value) -> Result<Box<dyn OutputPlugin>> {
        Ok(Box::new(NullOutput))
    }

    #[test]
    fn builds_registered_output() {
        let mut registry = OutputRegistry::new();
        registry.register("NullOutput", null_factory);
        assert!(registry.contains("NullOutput"));
        let output = registry
            .build("NullOutput", serde_json::json!({}))
            .unwrap();
        assert_eq!(output.name(), "NullOutput");
    }

    #[test]
    fn unknown_name_is_rejected() {
        let registry = OutputRegistry::new();
        let err = registry
            .build("SmtpOutput", serde_json::Value::Null)
            .err()
            .unwrap();
        assert!(matches!(err, Error::UnknownPlugin { ref name } if name == "SmtpOutput"));
    }

    #[test]
    fn names_are_sorted() {
        let mut registry = OutputRegistry::default();
        registry.register("b", null_factory);
        registry.register("a", null_factory);
        assert_eq!(registry.names(), vec!["a", "b"]);
    }
}
