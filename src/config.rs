use std::env;
use std::sync::OnceLock;

use crate::policy::{AccessRule, PolicyProfile, PolicyTable, Resource};

#[derive(Clone, Debug)]
pub struct EnvConfig {
    pub port: u16,
    pub db_url: String,
    pub jwt: JwtConfig,
    pub access_policy: PolicyTable,
    /// Empty means any origin.
    pub cors_origins: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub access_ttl_secs: i64,
    pub refresh_ttl_secs: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            access_ttl_secs: 5 * 60,
            refresh_ttl_secs: 24 * 60 * 60,
        }
    }
}

impl EnvConfig {
    fn get_env(key: &str) -> String {
        env::var(key).unwrap_or_else(|_| panic!("Environment variable {} not set", key))
    }

    fn get_env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
        env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
    }

    /// Only the connection string, for tools that never serve requests.
    pub fn database_url() -> String {
        dotenv::dotenv().ok();
        Self::get_env("POSTGRES_URI")
    }

    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let defaults = JwtConfig::default();
        let jwt = JwtConfig {
            secret: Self::get_env("JWT_SECRET"),
            access_ttl_secs: Self::get_env_or("ACCESS_TOKEN_TTL_SECS", defaults.access_ttl_secs),
            refresh_ttl_secs: Self::get_env_or("REFRESH_TOKEN_TTL_SECS", defaults.refresh_ttl_secs),
        };

        EnvConfig {
            port: Self::get_env_or("PORT", 8080),
            db_url: Self::get_env("POSTGRES_URI"),
            jwt,
            access_policy: Self::access_policy_from_env(),
            cors_origins: Self::cors_origins_from_env(),
        }
    }

    fn cors_origins_from_env() -> Vec<String> {
        env::var("CORS_ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default()
    }

    /// `ACCESS_POLICY` picks the profile, `ACCESS_RULE_<RESOURCE>` overrides one resource.
    fn access_policy_from_env() -> PolicyTable {
        let profile = match env::var("ACCESS_POLICY") {
            Ok(raw) => raw
                .parse::<PolicyProfile>()
                .unwrap_or_else(|e| panic!("ACCESS_POLICY: {e}")),
            Err(_) => PolicyProfile::default(),
        };

        let mut table = PolicyTable::for_profile(profile);
        for resource in Resource::ALL {
            let key = format!("ACCESS_RULE_{}", resource.prefix().to_uppercase());
            if let Ok(raw) = env::var(&key) {
                let rule = raw
                    .parse::<AccessRule>()
                    .unwrap_or_else(|e| panic!("{key}: {e}"));
                table = table.with_rule(resource, rule);
            }
        }
        table
    }
}

/// Comma-separated origins; a `*` anywhere widens the list to every origin.
fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect();
    if origins.iter().any(|o| o == "*") {
        return Vec::new();
    }
    origins
}

pub static CONFIG: OnceLock<EnvConfig> = OnceLock::new();

pub fn config() -> &'static EnvConfig {
    CONFIG.get().expect("Not initialized")
}
