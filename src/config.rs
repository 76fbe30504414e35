use crate::constants::{DEFAULT_HISTORY_LIMIT, DEFAULT_LOG_ACTIONS};

/// Store tuning knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of dispatch records kept in the history ring.
    /// `0` disables the history.
    pub history_limit: usize,
    /// Log every dispatched action kind to the console.
    pub log_actions: bool,
}

impl Default for StoreConfig {
    /// Conservative defaults for tests and embedders that never call
    /// `from_env()`.
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            log_actions: DEFAULT_LOG_ACTIONS,
        }
    }
}

impl StoreConfig {
    /// Read the configuration baked in at build time.
    ///
    /// `STORE_HISTORY_LIMIT` (unsigned integer) and `STORE_LOG_ACTIONS`
    /// (`1`/`true`/`yes`) override the defaults. A value that does not parse
    /// is reported as an error instead of being silently ignored.
    pub fn from_env() -> Result<Self, String> {
        Self::from_vars(option_env!("STORE_HISTORY_LIMIT"), option_env!("STORE_LOG_ACTIONS"))
    }

    fn from_vars(history_limit: Option<&str>, log_actions: Option<&str>) -> Result<Self, String> {
        let mut config = Self::default();
        if let Some(raw) = history_limit {
            config.history_limit = raw
                .trim()
                .parse()
                .map_err(|_| format!("STORE_HISTORY_LIMIT must be an unsigned integer, got {:?}", raw))?;
        }
        if let Some(raw) = log_actions {
            config.log_actions = parse_flag(raw)
                .ok_or_else(|| format!("STORE_LOG_ACTIONS must be a boolean flag, got {:?}", raw))?;
        }
        Ok(config)
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn with_log_actions(mut self, enabled: bool) -> Self {
        self.log_actions = enabled;
        self
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_vars() {
        assert_eq!(StoreConfig::from_vars(None, None), Ok(StoreConfig::default()));
    }

    #[test]
    fn test_vars_override_defaults() {
        let config = StoreConfig::from_vars(Some(" 16 "), Some("Yes")).unwrap();
        assert_eq!(config.history_limit, 16);
        assert!(config.log_actions);
    }

    #[test]
    fn test_builders() {
        let config = StoreConfig::default().with_history_limit(8).with_log_actions(true);
        assert_eq!(config, StoreConfig { history_limit: 8, log_actions: true });
    }

    #[test]
    fn test_bad_vars_are_errors() {
        assert!(StoreConfig::from_vars(Some("-1"), None).is_err());
        assert!(StoreConfig::from_vars(None, Some("maybe")).is_err());
    }
}
