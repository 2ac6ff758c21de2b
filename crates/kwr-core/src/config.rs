use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation are decoupled from the process environment so the
/// tests can drive them with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::{IpAddr, SocketAddr};
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u16 = |var: &str, default: &str| -> Result<u16, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let searchad_api_key = require("KWR_SEARCHAD_API_KEY")?;
    let searchad_secret_key = require("KWR_SEARCHAD_SECRET_KEY")?;
    let searchad_customer_id = require("KWR_SEARCHAD_CUSTOMER_ID")?;

    let env = parse_environment(&or_default("KWR_ENV", "development"));

    let host = or_default("KWR_BIND_HOST", "0.0.0.0");
    let host: IpAddr = host
        .trim()
        .parse()
        .map_err(|e: std::net::AddrParseError| ConfigError::InvalidEnvVar {
            var: "KWR_BIND_HOST".to_string(),
            reason: e.to_string(),
        })?;
    let port = parse_u16("PORT", "5050")?;
    let bind_addr = SocketAddr::new(host, port);

    let log_level = or_default("KWR_LOG_LEVEL", "info");

    let searchad_base_url = or_default("KWR_SEARCHAD_BASE_URL", "https://api.naver.com");
    let searchad_timeout_secs = parse_u64("KWR_SEARCHAD_TIMEOUT_SECS", "10")?;
    let inter_request_delay_ms = parse_u64("KWR_INTER_REQUEST_DELAY_MS", "300")?;

    let accounts_path = PathBuf::from(or_default("KWR_ACCOUNTS_PATH", "./accounts.json"));
    let presets_dir = PathBuf::from(or_default("KWR_PRESETS_DIR", "."));
    let templates_dir = PathBuf::from(or_default("KWR_TEMPLATES_DIR", "./static/templates"));
    let company_info_path = lookup("KWR_COMPANY_INFO_PATH")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from);

    let admin_account = or_default("KWR_ADMIN_ACCOUNT", "admin");
    let export_filename_prefix = or_default("KWR_EXPORT_PREFIX", "Keyword_Report");
    let dupcheck_search_url = or_default(
        "KWR_DUPCHECK_SEARCH_URL",
        "https://search.naver.com/search.naver",
    );

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        searchad_base_url,
        searchad_api_key,
        searchad_secret_key,
        searchad_customer_id,
        searchad_timeout_secs,
        inter_request_delay_ms,
        accounts_path,
        presets_dir,
        templates_dir,
        company_info_path,
        admin_account,
        export_filename_prefix,
        dupcheck_search_url,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated with valid values.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("KWR_SEARCHAD_API_KEY", "test-api-key");
        m.insert("KWR_SEARCHAD_SECRET_KEY", "test-secret");
        m.insert("KWR_SEARCHAD_CUSTOMER_ID", "1234567");
        m
    }

    #[test]
    fn parse_environment_development() {
        assert_eq!(parse_environment("development"), Environment::Development);
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn build_app_config_fails_without_api_key() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "KWR_SEARCHAD_API_KEY"),
            "expected MissingEnvVar(KWR_SEARCHAD_API_KEY), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_treats_blank_secret_as_missing() {
        let mut map = full_env();
        map.insert("KWR_SEARCHAD_SECRET_KEY", "   ");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "KWR_SEARCHAD_SECRET_KEY"),
            "expected MissingEnvVar(KWR_SEARCHAD_SECRET_KEY), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_defaults() {
        let map = full_env();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:5050");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.searchad_base_url, "https://api.naver.com");
        assert_eq!(cfg.searchad_customer_id, "1234567");
        assert_eq!(cfg.searchad_timeout_secs, 10);
        assert_eq!(cfg.inter_request_delay_ms, 300);
        assert_eq!(cfg.admin_account, "admin");
        assert!(cfg.company_info_path.is_none());
    }

    #[test]
    fn port_override_is_applied() {
        let mut map = full_env();
        map.insert("PORT", "8080");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.bind_addr.port(), 8080);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let mut map = full_env();
        map.insert("PORT", "not-a-port");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PORT"),
            "expected InvalidEnvVar(PORT), got: {result:?}"
        );
    }

    #[test]
    fn invalid_bind_host_is_rejected() {
        let mut map = full_env();
        map.insert("KWR_BIND_HOST", "not-an-ip");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "KWR_BIND_HOST"),
            "expected InvalidEnvVar(KWR_BIND_HOST), got: {result:?}"
        );
    }

    #[test]
    fn inter_request_delay_override() {
        let mut map = full_env();
        map.insert("KWR_INTER_REQUEST_DELAY_MS", "0");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.inter_request_delay_ms, 0);
    }

    #[test]
    fn inter_request_delay_invalid() {
        let mut map = full_env();
        map.insert("KWR_INTER_REQUEST_DELAY_MS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "KWR_INTER_REQUEST_DELAY_MS"),
            "expected InvalidEnvVar(KWR_INTER_REQUEST_DELAY_MS), got: {result:?}"
        );
    }

    #[test]
    fn company_info_path_is_optional() {
        let mut map = full_env();
        map.insert("KWR_COMPANY_INFO_PATH", "./config/company.yaml");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(
            cfg.company_info_path.as_deref(),
            Some(std::path::Path::new("./config/company.yaml"))
        );
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("test-secret"));
        assert!(!rendered.contains("test-api-key"));
    }
}
