//! Host-provided settings lookup.

use std::collections::BTreeMap;

/// The slice of the host agent runtime this crate consumes.
pub trait AgentRuntime: Send + Sync {
    /// Look up a named setting. `None` when the host does not know it.
    fn get_setting(&self, key: &str) -> Option<String>;
}

/// Settings backed by a fixed map, e.g. the `[settings]` table of the config file.
#[derive(Debug, Clone, Default)]
pub struct StaticSettings {
    values: BTreeMap<String, String>,
}

impl StaticSettings {
    pub fn new(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }

    /// Builder-style insert, mostly for tests.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl AgentRuntime for StaticSettings {
    fn get_setting(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Wraps a runtime and falls back to process environment variables for keys
/// it does not know or leaves blank.
#[derive(Debug, Clone, Default)]
pub struct EnvFallback<R> {
    inner: R,
}

impl<R: AgentRuntime> EnvFallback<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: AgentRuntime> AgentRuntime for EnvFallback<R> {
    fn get_setting(&self, key: &str) -> Option<String> {
        self.inner
            .get_setting(key)
            .filter(|value| !value.trim().is_empty())
            .or_else(|| std::env::var(key).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_lookup() {
        let settings = StaticSettings::default().with("A", "1");
        assert_eq!(settings.get_setting("A").as_deref(), Some("1"));
        assert!(settings.get_setting("B").is_none());
    }

    #[test]
    fn test_env_fallback_prefers_inner() {
        let key = format!("STAKE_ANALYST_TEST_{}", uuid::Uuid::new_v4().simple());
        std::env::set_var(&key, "from-env");

        let runtime =
            EnvFallback::new(StaticSettings::default().with(key.clone(), "from-settings"));
        assert_eq!(runtime.get_setting(&key).as_deref(), Some("from-settings"));

        let runtime = EnvFallback::new(StaticSettings::default().with(key.clone(), ""));
        assert_eq!(runtime.get_setting(&key).as_deref(), Some("from-env"));

        let runtime = EnvFallback::new(StaticSettings::default());
        assert_eq!(runtime.get_setting(&key).as_deref(), Some("from-env"));
        assert!(runtime.get_setting("STAKE_ANALYST_TEST_UNSET_KEY").is_none());

        std::env::remove_var(&key);
    }
}
