use std::time::Duration;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

use fieldrelay_core::{MAX_ANCESTOR_DEPTH, MAX_SEARCH_DEPTH, OwnerId};
use fieldrelay_devtools::DEFAULT_TRACE_CAPACITY;
use fieldrelay_surface::{DEFAULT_AUTO_CLOSE_DELAY, DEFAULT_KEYBOARD_DELAY, OverlayTimings};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Owner id of the router's own surface.
    pub self_owner: String,
    /// Window owners whose content churn is never inspected.
    pub excluded_owners: Vec<String>,
    pub keyboard_delay_ms: u64,
    pub auto_close_delay_ms: u64,
    pub max_ancestor_depth: usize,
    pub max_search_depth: usize,
    pub log_level: String,
    pub trace_capacity: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            self_owner: "com.fieldrelay".into(),
            excluded_owners: vec!["com.ayaneo.gamewindow".into()],
            keyboard_delay_ms: DEFAULT_KEYBOARD_DELAY.as_millis() as u64,
            auto_close_delay_ms: DEFAULT_AUTO_CLOSE_DELAY.as_millis() as u64,
            max_ancestor_depth: MAX_ANCESTOR_DEPTH,
            max_search_depth: MAX_SEARCH_DEPTH,
            log_level: "info".into(),
            trace_capacity: DEFAULT_TRACE_CAPACITY,
        }
    }
}

impl RouterConfig {
    /// Parses and validates a JSON config. Missing keys take their defaults.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let cfg: Self = serde_json::from_str(json).context("parsing router config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.self_owner.trim().is_empty() {
            bail!("self_owner must not be empty");
        }
        if self.max_ancestor_depth == 0 {
            bail!("max_ancestor_depth must be at least 1");
        }
        if self.max_search_depth == 0 {
            bail!("max_search_depth must be at least 1");
        }
        Ok(())
    }

    pub fn self_owner(&self) -> OwnerId {
        OwnerId::from(self.self_owner.as_str())
    }

    pub fn is_excluded(&self, owner: &OwnerId) -> bool {
        self.excluded_owners.iter().any(|o| owner == o.as_str())
    }

    pub fn timings(&self) -> OverlayTimings {
        OverlayTimings {
            keyboard_delay: Duration::from_millis(self.keyboard_delay_ms),
            auto_close_delay: Duration::from_millis(self.auto_close_delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let cfg = RouterConfig::from_json("{}").expect("valid");
        assert_eq!(cfg, RouterConfig::default());
        assert_eq!(cfg.timings().keyboard_delay, Duration::from_millis(100));
        assert_eq!(cfg.timings().auto_close_delay, Duration::from_millis(200));
        assert!(cfg.is_excluded(&OwnerId::from("com.ayaneo.gamewindow")));
        assert!(!cfg.is_excluded(&OwnerId::from("com.example.chat")));
    }

    #[test]
    fn test_partial_override() {
        let cfg = RouterConfig::from_json(
            r#"{ "self_owner": "org.example.relay", "excluded_owners": [], "auto_close_delay_ms": 500 }"#,
        )
        .expect("valid");
        assert_eq!(cfg.self_owner(), OwnerId::from("org.example.relay"));
        assert!(cfg.excluded_owners.is_empty());
        assert_eq!(cfg.timings().auto_close_delay, Duration::from_millis(500));
        assert_eq!(cfg.max_ancestor_depth, 64);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(RouterConfig::from_json(r#"{ "self_owner": "  " }"#).is_err());
        assert!(RouterConfig::from_json(r#"{ "max_ancestor_depth": 0 }"#).is_err());
        assert!(RouterConfig::from_json(r#"{ "max_search_depth": 0 }"#).is_err());
        assert!(RouterConfig::from_json("[1, 2]").is_err());
    }
}
