use anyhow::{Result, bail};

use super::AppConfig;

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.general.host.trim().is_empty() {
        errors.push("general.host must not be empty".to_string());
    }

    if cfg.general.public_dir.trim().is_empty() {
        errors.push("general.public_dir must not be empty".to_string());
    }

    if cfg.database.url.trim().is_empty() {
        errors.push("database.url must not be empty".to_string());
    }

    if cfg.database.max_connections == 0 {
        errors.push("database.max_connections must be > 0".to_string());
    }

    if cfg.database.min_idle > cfg.database.max_connections {
        errors.push(format!(
            "database.min_idle ({}) must be <= database.max_connections ({})",
            cfg.database.min_idle, cfg.database.max_connections
        ));
    }

    if cfg.realtime.max_connections == 0 {
        errors.push("realtime.max_connections must be > 0".to_string());
    }

    if cfg.realtime.max_message_bytes == 0 {
        errors.push("realtime.max_message_bytes must be > 0".to_string());
    }

    if cfg.realtime.heartbeat_interval_secs == 0 {
        errors.push("realtime.heartbeat_interval_secs must be > 0".to_string());
    }

    if cfg.realtime.idle_timeout_secs <= cfg.realtime.heartbeat_interval_secs {
        errors.push(
            "realtime.idle_timeout_secs must be greater than realtime.heartbeat_interval_secs"
                .to_string(),
        );
    }

    if cfg.realtime.outbound_queue_size == 0 {
        errors.push("realtime.outbound_queue_size must be > 0".to_string());
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use ::config as config_rs;

    use super::*;
    use crate::config::EnvConfig;

    fn env_source(vars: &[(&str, &str)]) -> config_rs::Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        config_rs::Environment::with_prefix("APP")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(Some(map))
    }

    #[test]
    fn defaults_are_valid() {
        validate(&AppConfig::default()).expect("default config should validate");
    }

    #[test]
    fn default_database_is_local_sqlite_file() {
        let cfg = AppConfig::default();
        assert!(cfg.database.url.starts_with("sqlite://"));
        assert!(cfg.database.url.contains("mode=rwc"));
    }

    #[test]
    fn collects_every_violation() {
        let mut cfg = AppConfig::default();
        cfg.database.url = "  ".to_string();
        cfg.realtime.heartbeat_interval_secs = 30;
        cfg.realtime.idle_timeout_secs = 30;

        let message = validate(&cfg).expect_err("config should fail").to_string();

        assert!(message.contains("database.url must not be empty"));
        assert!(message.contains("realtime.idle_timeout_secs must be greater"));
    }

    #[test]
    fn min_idle_cannot_exceed_pool_size() {
        let mut cfg = AppConfig::default();
        cfg.database.max_connections = 2;
        cfg.database.min_idle = 3;

        let message = validate(&cfg).expect_err("config should fail").to_string();
        assert!(message.contains("database.min_idle (3)"));
    }

    #[test]
    fn environment_overrides_nested_sections() {
        let cfg = AppConfig::from_source(env_source(&[
            ("APP_GENERAL__PORT", "8088"),
            ("APP_DATABASE__URL", "sqlite::memory:"),
            ("APP_REALTIME__ENABLED", "false"),
        ]))
        .expect("config should load");

        assert_eq!(cfg.general.port, 8088);
        assert_eq!(cfg.database.url, "sqlite::memory:");
        assert!(!cfg.realtime.enabled);
        assert_eq!(cfg.general.host, "127.0.0.1");
    }

    #[test]
    fn public_dir_is_read_from_general_section() {
        let cfg = AppConfig::from_source(env_source(&[("APP_GENERAL__PUBLIC_DIR", "/srv/public")]))
            .expect("config should load");

        assert_eq!(cfg.general.public_dir, "/srv/public");
        assert_eq!(AppConfig::default().general.public_dir, "public");
    }

    #[test]
    fn invalid_environment_is_rejected() {
        let err = AppConfig::from_source(env_source(&[("APP_DATABASE__MAX_CONNECTIONS", "0")]))
            .expect_err("zero pool should fail");

        assert!(format!("{err:#}").contains("database.max_connections must be > 0"));
    }
}
