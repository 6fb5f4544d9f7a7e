use crate::error::{PathContext, Result};
use crate::types::{Config, EngineConfig, SitedorkError};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Load the TOML file at `config_path` (if it exists), then layer the
/// environment on top and validate the result.
pub fn load_config(config_path: &Path) -> Result<Config> {
    let mut config = if config_path.exists() {
        let contents = fs::read_to_string(config_path).config_at("Failed to read", config_path)?;
        parse_config(&contents, config_path)?
    } else {
        Config::default()
    };

    apply_env_overrides(&mut config);
    validate_config(&config)?;

    Ok(config)
}

/// Parse TOML settings; `origin` only labels errors.
pub fn parse_config(contents: &str, origin: &Path) -> Result<Config> {
    toml::from_str::<Config>(contents).config_at("Failed to parse", origin)
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(dir) = env::var("SITEDORK_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }
    if let Ok(user_agent) = env::var("SITEDORK_USER_AGENT") {
        config.user_agent = user_agent;
    }
}

pub fn validate_config(config: &Config) -> Result<()> {
    if config.request_timeout_secs == 0 || config.resolve_timeout_secs == 0 {
        return Err(SitedorkError::ConfigError("Timeouts must be greater than 0".to_string()));
    }
    if config.user_agent.trim().is_empty() {
        return Err(SitedorkError::ConfigError("User agent must not be empty".to_string()));
    }
    validate_engine("google", &config.google)?;
    validate_engine("baidu", &config.baidu)?;
    Ok(())
}

fn validate_engine(name: &str, engine: &EngineConfig) -> Result<()> {
    if engine.base_url.trim().is_empty() {
        return Err(SitedorkError::ConfigError(format!("{}: base_url must not be empty", name)));
    }
    if engine.min_delay_secs > engine.max_delay_secs {
        return Err(SitedorkError::ConfigError(format!(
            "{}: min_delay_secs ({}) exceeds max_delay_secs ({})",
            name, engine.min_delay_secs, engine.max_delay_secs
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = parse_config(
            "output_dir = \"results\"\nrequest_timeout_secs = 20\n",
            Path::new("t.toml"),
        )
        .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("results"));
        assert_eq!(config.request_timeout_secs, 20);
        assert_eq!(config.resolve_timeout_secs, 5);
        assert_eq!(config.google.min_delay_secs, 15);
        assert_eq!(config.baidu.max_delay_secs, 10);
    }

    #[test]
    fn test_engine_table() {
        let config = parse_config(
            "[baidu]\nbase_url = \"http://127.0.0.1:8080\"\nmin_delay_secs = 1\nmax_delay_secs = 2\n",
            Path::new("t.toml"),
        )
        .unwrap();
        assert_eq!(config.baidu.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.google.base_url, "https://www.google.com");
    }

    #[test]
    fn test_rejects_inverted_delay_range() {
        let mut config = Config::default();
        config.google.min_delay_secs = 40;
        assert!(matches!(validate_config(&config), Err(SitedorkError::ConfigError(_))));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = Config::default();
        config.resolve_timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "resolve_timeout_secs = 3").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.resolve_timeout_secs, 3);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load_config(Path::new("/nonexistent/sitedork.toml")).unwrap();
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn test_malformed_file() {
        let err = parse_config("output_dir = [", Path::new("broken.toml")).unwrap_err();
        assert!(matches!(&err, SitedorkError::ConfigError(msg) if msg.starts_with("Failed to parse broken.toml")));
    }
}
