use std::path::PathBuf;

use crate::domain::validation::DEFAULT_MAX_UPLOAD_BYTES;

#[derive(Debug, Clone)]
pub struct Config {
    pub upload_dir: PathBuf,
    /// `None` disables the upload size ceiling
    pub max_upload_bytes: Option<u64>,
    pub public_base_url: Option<String>,
    pub listen_host: String,
    pub port: u16,
    pub durable_writes: bool,
    pub json_logs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            max_upload_bytes: Some(DEFAULT_MAX_UPLOAD_BYTES),
            public_base_url: None,
            listen_host: "0.0.0.0".to_string(),
            port: 8080,
            durable_writes: true,
            json_logs: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            upload_dir: lookup("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            max_upload_bytes: lookup("MAX_UPLOAD_BYTES")
                .map(|s| parse_upload_ceiling(&s))
                .unwrap_or(defaults.max_upload_bytes),
            public_base_url: lookup("PUBLIC_BASE_URL")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            listen_host: lookup("LISTEN_HOST").unwrap_or(defaults.listen_host),
            port: lookup("PORT")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.port),
            durable_writes: lookup("DURABLE_WRITES")
                .and_then(|s| parse_bool(&s))
                .unwrap_or(defaults.durable_writes),
            json_logs: lookup("LOG_FORMAT")
                .map(|s| s.trim().eq_ignore_ascii_case("json"))
                .unwrap_or(defaults.json_logs),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.listen_host, self.port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("PORT must be between 1 and 65535".to_string());
        }

        if self.upload_dir.as_os_str().is_empty() {
            return Err("UPLOAD_DIR cannot be empty".to_string());
        }

        if self.listen_host.trim().is_empty() {
            return Err("LISTEN_HOST cannot be empty".to_string());
        }

        if let Some(url) = &self.public_base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("PUBLIC_BASE_URL must start with http:// or https://".to_string());
            }
        }

        Ok(())
    }
}

/// Parse `MAX_UPLOAD_BYTES`.
///
/// A positive finite number sets the ceiling (fractional values round
/// down). Zero, negative, infinite or non-numeric values such as `off`
/// disable it.
fn parse_upload_ceiling(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(bytes) = raw.parse::<u64>() {
        return (bytes > 0).then_some(bytes);
    }

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 1.0 => Some(value as u64),
        _ => None,
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.max_upload_bytes, Some(20 * 1024 * 1024));
        assert_eq!(config.public_base_url, None);
        assert_eq!(config.port, 8080);
        assert_eq!(config.listen_addr(), "0.0.0.0:8080");
        assert!(config.durable_writes);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_recognized_options() {
        let config = config_from(&[
            ("UPLOAD_DIR", "/srv/images"),
            ("MAX_UPLOAD_BYTES", "5242880"),
            ("PUBLIC_BASE_URL", "https://cdn.example.com/"),
            ("PORT", "3001"),
            ("DURABLE_WRITES", "false"),
            ("LOG_FORMAT", "JSON"),
        ]);
        assert_eq!(config.upload_dir, PathBuf::from("/srv/images"));
        assert_eq!(config.max_upload_bytes, Some(5 * 1024 * 1024));
        assert_eq!(
            config.public_base_url.as_deref(),
            Some("https://cdn.example.com/")
        );
        assert_eq!(config.port, 3001);
        assert!(!config.durable_writes);
        assert!(config.json_logs);
    }

    #[test]
    fn test_non_finite_ceiling_disables_check() {
        for raw in ["inf", "Infinity", "off", "none", "NaN", "0", "-5"] {
            let config = config_from(&[("MAX_UPLOAD_BYTES", raw)]);
            assert_eq!(config.max_upload_bytes, None, "MAX_UPLOAD_BYTES={raw}");
        }
    }

    #[test]
    fn test_fractional_ceiling_rounds_down() {
        let config = config_from(&[("MAX_UPLOAD_BYTES", "1e6")]);
        assert_eq!(config.max_upload_bytes, Some(1_000_000));
    }

    #[test]
    fn test_blank_public_base_url_is_unset() {
        let config = config_from(&[("PUBLIC_BASE_URL", "   ")]);
        assert_eq!(config.public_base_url, None);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.public_base_url = Some("cdn.example.com".to_string());
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.port = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.upload_dir = PathBuf::new();
        assert!(config.validate().is_err());
    }
}
